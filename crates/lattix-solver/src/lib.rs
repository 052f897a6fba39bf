//! Runtime type system for a dynamically-typed configuration language.
//!
//! This crate implements the descriptor engine:
//!
//! - **Interned descriptors**: structural type descriptors deduplicated in
//!   a [`TypeInterner`], so descriptor equality is O(1) `TypeId`
//!   comparison and the well-known singletons (Any, Unit, the empty
//!   collections, the lattice anchors) are canonical instances.
//! - **Assignability**: a recursive, cycle-guarded subtype check over
//!   possibly self-referential alias graphs ([`subtype`], [`recursion`]).
//! - **Generalization lattice**: canonical widening and least-common
//!   supertype over four anchor tiers ([`lattice`]).
//! - **Inference**: the narrowest classifying descriptor and the literal
//!   structural descriptor of an arbitrary runtime value ([`infer`]),
//!   extensible to foreign host kinds through [`ValueResolver`].
//!
//! Descriptors are immutable after interning; the one write-once mutation
//! point is an alias definition's target link ([`def`]). Everything is
//! safe to share across threads, and each top-level query owns its own
//! transient recursion state.

pub mod db;
pub mod def;
pub mod diagnostics;
pub mod format;
pub mod infer;
pub mod intern;
pub mod lattice;
pub mod recursion;
pub mod subtype;
mod subtype_rules;
pub mod types;
pub mod values;
pub mod version;
pub mod visitor;

pub use db::TypeDatabase;
pub use def::{DefId, DefinitionStore, ResolveError};
pub use diagnostics::{TypeMismatch, assert_instance_of};
pub use format::{kind_name, type_to_string};
pub use infer::{NullResolver, ValueInferrer, ValueResolver, infer, infer_set, reduce_type};
pub use intern::TypeInterner;
pub use lattice::{actual_type, common, generalize, normalize};
pub use recursion::{GuardState, RecursionGuard, Side};
pub use subtype::{AssignabilityChecker, is_assignable, is_assignable_opt, is_instance};
pub use types::{
    OrderedFloat, SizeRange, StructMember, StructShape, StructShapeId, TypeId, TypeKey, TypeListId,
};
pub use values::Value;
pub use version::VersionRange;
pub use visitor::{find_unresolved, for_each_child, reaches_definition, walk_type_graph};
