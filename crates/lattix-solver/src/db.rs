//! The `TypeDatabase` trait: the engines' view of the interner.
//!
//! The assignability, lattice and inference engines never hold the
//! concrete [`TypeInterner`](crate::intern::TypeInterner); they work
//! against this trait so the descriptor storage stays swappable in tests
//! and the dependency direction stays one-way. The trait spans both the
//! read side (structural lookup) and the construction side (interning new
//! descriptors), because the lattice and inference engines build
//! descriptors as they go.

use crate::def::DefId;
use crate::types::{SizeRange, StructMember, StructShape, StructShapeId, TypeId, TypeKey, TypeListId};
use crate::version::VersionRange;
use lattix_common::interner::Atom;
use std::sync::Arc;

pub trait TypeDatabase {
    // ── Read side ──

    /// Structural content of `id`, or `None` for a handle this database
    /// never produced.
    fn lookup(&self, id: TypeId) -> Option<TypeKey>;

    fn type_list(&self, id: TypeListId) -> Arc<[TypeId]>;

    fn struct_shape(&self, id: StructShapeId) -> Arc<StructShape>;

    fn resolve_atom(&self, atom: Atom) -> Arc<str>;

    fn intern_atom(&self, text: &str) -> Atom;

    /// Forward-reference name of an alias definition.
    fn alias_name(&self, def: DefId) -> Arc<str>;

    /// Resolved target of an alias, or `None` while unresolved.
    fn alias_body(&self, def: DefId) -> Option<TypeId>;

    /// Whether the alias's resolved body reaches back to the alias.
    fn is_recursive_alias(&self, def: DefId) -> bool;

    /// Full-match `text` against the compiled form of `pattern`.
    fn regex_full_match(&self, pattern: Atom, text: &str) -> bool;

    // ── Construction side ──

    fn integer(&self, min: i64, max: i64) -> TypeId;

    fn float(&self, min: f64, max: f64) -> TypeId;

    fn string_sized(&self, size: SizeRange) -> TypeId;

    /// Literal string descriptor: exact value, exact length.
    fn string_value(&self, value: &str) -> TypeId;

    fn regexp(&self, pattern: &str) -> TypeId;

    /// Pattern over a list of Regexp descriptors.
    fn pattern(&self, regexps: Vec<TypeId>) -> TypeId;

    fn semver(&self, ranges: Vec<VersionRange>) -> TypeId;

    fn collection(&self, size: SizeRange) -> TypeId;

    fn array(&self, element: TypeId, size: SizeRange) -> TypeId;

    fn tuple(&self, elements: Vec<TypeId>) -> TypeId;

    fn hash(&self, key: TypeId, value: TypeId, size: SizeRange) -> TypeId;

    fn struct_of(&self, members: Vec<StructMember>) -> TypeId;

    fn optional(&self, inner: TypeId) -> TypeId;

    fn not_undef(&self, inner: TypeId) -> TypeId;

    /// Union constructor. Flattens nested variants, deduplicates, and
    /// collapses the empty union to Unit and the singleton union to its
    /// only member.
    fn variant(&self, members: Vec<TypeId>) -> TypeId;

    fn type_of(&self, inner: Option<TypeId>) -> TypeId;

    fn runtime(&self, runtime: &str, class_name: Option<&str>) -> TypeId;

    /// The descriptor node for an alias definition.
    fn alias_type(&self, def: DefId) -> TypeId;
}
