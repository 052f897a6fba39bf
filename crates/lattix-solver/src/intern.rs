//! Descriptor interning.
//!
//! `TypeInterner` owns every descriptor in a process: the structural key
//! table, the interned type lists and struct shapes, the string interner,
//! the alias definition store, and the compiled-regex cache. Interning
//! gives O(1) descriptor equality (`TypeId` comparison) and makes the
//! well-known singletons (Any, Unit, the empty collections, the lattice
//! anchors) canonical single instances reused everywhere.
//!
//! All tables use an insert-if-absent discipline over `DashMap`, so
//! concurrent first-use of the same descriptor races to one winner and
//! every caller observes the same id; a partially constructed descriptor
//! is never visible.

use crate::db::TypeDatabase;
use crate::def::{DefId, DefinitionStore, ResolveError};
use crate::types::{
    OrderedFloat, SizeRange, StructMember, StructShape, StructShapeId, TypeId, TypeKey, TypeListId,
};
use crate::version::VersionRange;
use dashmap::DashMap;
use lattix_common::interner::{Atom, Interner};
use lattix_common::limits::EXPECTED_INTERNED_TYPES;
use regex::Regex;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

pub struct TypeInterner {
    strings: Interner,
    defs: DefinitionStore,

    types: DashMap<TypeKey, TypeId>,
    keys: DashMap<TypeId, TypeKey>,
    next_type: AtomicU32,

    lists: DashMap<Arc<[TypeId]>, TypeListId>,
    list_values: DashMap<TypeListId, Arc<[TypeId]>>,
    next_list: AtomicU32,

    shapes: DashMap<Arc<StructShape>, StructShapeId>,
    shape_values: DashMap<StructShapeId, Arc<StructShape>>,
    next_shape: AtomicU32,

    /// Compiled, full-match-anchored regexps keyed by pattern atom.
    /// `None` records a pattern that failed to compile; it matches nothing.
    regexes: DashMap<Atom, Option<Arc<Regex>>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    /// Create an interner with every well-known singleton pre-registered
    /// at its fixed [`TypeId`], including the recursive `Data` alias.
    pub fn new() -> Self {
        let interner = Self {
            strings: Interner::new(),
            defs: DefinitionStore::new(),
            types: DashMap::with_capacity(EXPECTED_INTERNED_TYPES),
            keys: DashMap::with_capacity(EXPECTED_INTERNED_TYPES),
            next_type: AtomicU32::new(0),
            lists: DashMap::new(),
            list_values: DashMap::new(),
            next_list: AtomicU32::new(0),
            shapes: DashMap::new(),
            shape_values: DashMap::new(),
            next_shape: AtomicU32::new(0),
            regexes: DashMap::new(),
        };
        interner.register_singletons();
        interner
    }

    /// Pre-register the well-known descriptors in the order of the
    /// `TypeId` associated constants.
    fn register_singletons(&self) {
        let singletons = [
            (TypeId::ANY, TypeKey::Any),
            (TypeId::UNIT, TypeKey::Unit),
            (TypeId::UNDEF, TypeKey::Undef),
            (TypeId::DEFAULT, TypeKey::Default),
            (TypeId::BOOLEAN, TypeKey::Boolean),
            (
                TypeId::INTEGER,
                TypeKey::Integer {
                    min: i64::MIN,
                    max: i64::MAX,
                },
            ),
            (
                TypeId::FLOAT,
                TypeKey::Float {
                    min: OrderedFloat(f64::NEG_INFINITY),
                    max: OrderedFloat(f64::INFINITY),
                },
            ),
            (TypeId::NUMERIC, TypeKey::Numeric),
            (
                TypeId::STRING,
                TypeKey::String {
                    size: SizeRange::DEFAULT,
                    value: None,
                },
            ),
            (TypeId::REGEXP, TypeKey::Regexp { pattern: None }),
            (TypeId::SCALAR, TypeKey::Scalar),
            (TypeId::SCALAR_DATA, TypeKey::ScalarData),
            (
                TypeId::COLLECTION,
                TypeKey::Collection {
                    size: SizeRange::DEFAULT,
                },
            ),
            (
                TypeId::ARRAY,
                TypeKey::Array {
                    element: TypeId::ANY,
                    size: SizeRange::DEFAULT,
                },
            ),
            (
                TypeId::HASH,
                TypeKey::Hash {
                    key: TypeId::ANY,
                    value: TypeId::ANY,
                    size: SizeRange::DEFAULT,
                },
            ),
            (
                TypeId::EMPTY_ARRAY,
                TypeKey::Array {
                    element: TypeId::UNIT,
                    size: SizeRange::exact(0),
                },
            ),
            (
                TypeId::EMPTY_HASH,
                TypeKey::Hash {
                    key: TypeId::UNIT,
                    value: TypeId::UNIT,
                    size: SizeRange::exact(0),
                },
            ),
            (TypeId::SEMVER, TypeKey::SemVer { ranges: Vec::new() }),
            (TypeId::SEMVER_RANGE, TypeKey::SemVerRange),
            (TypeId::TYPE, TypeKey::Type { inner: None }),
        ];
        for (expected, key) in singletons {
            let id = self.intern_key(key);
            debug_assert_eq!(id, expected, "singleton registration order drifted");
        }

        // Data is itself a recursive alias:
        //   Data = Variant[ScalarData, Undef, Array[Data], Hash[String, Data]]
        // registered through the same two-phase machinery user aliases use.
        let data_def = self.declare_alias("Data");
        let data = self.alias_type(data_def);
        debug_assert_eq!(data, TypeId::DATA, "singleton registration order drifted");
        let body = self.variant(vec![
            TypeId::SCALAR_DATA,
            TypeId::UNDEF,
            self.array(TypeId::DATA, SizeRange::DEFAULT),
            self.hash(TypeId::STRING, TypeId::DATA, SizeRange::DEFAULT),
        ]);
        self.resolve_alias(data_def, body)
            .unwrap_or_else(|_| unreachable!("Data alias is resolved exactly once here"));
    }

    fn intern_key(&self, key: TypeKey) -> TypeId {
        if let Some(existing) = self.types.get(&key) {
            return *existing;
        }
        *self.types.entry(key.clone()).or_insert_with(|| {
            let id = TypeId(self.next_type.fetch_add(1, Ordering::SeqCst));
            self.keys.insert(id, key);
            id
        })
    }

    fn intern_list(&self, members: Vec<TypeId>) -> TypeListId {
        if let Some(existing) = self.lists.get(members.as_slice()) {
            return *existing;
        }
        let stored: Arc<[TypeId]> = members.into();
        *self.lists.entry(Arc::clone(&stored)).or_insert_with(|| {
            let id = TypeListId(self.next_list.fetch_add(1, Ordering::SeqCst));
            self.list_values.insert(id, stored);
            id
        })
    }

    fn intern_shape(&self, shape: StructShape) -> StructShapeId {
        if let Some(existing) = self.shapes.get(&shape) {
            return *existing;
        }
        let stored = Arc::new(shape);
        *self.shapes.entry(Arc::clone(&stored)).or_insert_with(|| {
            let id = StructShapeId(self.next_shape.fetch_add(1, Ordering::SeqCst));
            self.shape_values.insert(id, stored);
            id
        })
    }

    /// The alias definition store (registration, resolution, names).
    pub fn definitions(&self) -> &DefinitionStore {
        &self.defs
    }

    /// Register an unresolved alias definition under `name`.
    pub fn declare_alias(&self, name: &str) -> DefId {
        self.defs.register(self.strings.intern(name))
    }

    /// Resolve an alias definition to its target descriptor. Write-once;
    /// must run before any assignability query traverses the alias.
    pub fn resolve_alias(&self, def: DefId, body: TypeId) -> Result<(), ResolveError> {
        let name = self.alias_name(def);
        self.defs.resolve(def, body, &name)
    }

    /// The well-known singleton descriptors, in registration order.
    pub fn well_known_types(&self) -> Vec<TypeId> {
        vec![
            TypeId::ANY,
            TypeId::UNIT,
            TypeId::UNDEF,
            TypeId::DEFAULT,
            TypeId::BOOLEAN,
            TypeId::INTEGER,
            TypeId::FLOAT,
            TypeId::NUMERIC,
            TypeId::STRING,
            TypeId::REGEXP,
            TypeId::SCALAR,
            TypeId::SCALAR_DATA,
            TypeId::COLLECTION,
            TypeId::ARRAY,
            TypeId::HASH,
            TypeId::EMPTY_ARRAY,
            TypeId::EMPTY_HASH,
            TypeId::SEMVER,
            TypeId::SEMVER_RANGE,
            TypeId::TYPE,
            TypeId::DATA,
        ]
    }
}

impl TypeDatabase for TypeInterner {
    fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        self.keys.get(&id).map(|entry| entry.clone())
    }

    fn type_list(&self, id: TypeListId) -> Arc<[TypeId]> {
        self.list_values
            .get(&id)
            .map(|entry| Arc::clone(&entry))
            .unwrap_or_else(|| Vec::new().into())
    }

    fn struct_shape(&self, id: StructShapeId) -> Arc<StructShape> {
        self.shape_values
            .get(&id)
            .map(|entry| Arc::clone(&entry))
            .unwrap_or_else(|| {
                Arc::new(StructShape {
                    members: Vec::new(),
                })
            })
    }

    fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.strings.resolve(atom)
    }

    fn intern_atom(&self, text: &str) -> Atom {
        self.strings.intern(text)
    }

    fn alias_name(&self, def: DefId) -> Arc<str> {
        self.defs
            .name(def)
            .map(|atom| self.strings.resolve(atom))
            .unwrap_or_else(|| Arc::from(""))
    }

    fn alias_body(&self, def: DefId) -> Option<TypeId> {
        self.defs.body(def)
    }

    fn is_recursive_alias(&self, def: DefId) -> bool {
        self.defs.is_recursive(self, def)
    }

    fn regex_full_match(&self, pattern: Atom, text: &str) -> bool {
        let compiled = self
            .regexes
            .entry(pattern)
            .or_insert_with(|| {
                let source = self.strings.resolve(pattern);
                match Regex::new(&format!("^(?:{source})$")) {
                    Ok(regex) => Some(Arc::new(regex)),
                    Err(error) => {
                        debug!(%source, %error, "pattern failed to compile; it will match nothing");
                        None
                    }
                }
            })
            .clone();
        compiled.is_some_and(|regex| regex.is_match(text))
    }

    fn integer(&self, min: i64, max: i64) -> TypeId {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.intern_key(TypeKey::Integer { min, max })
    }

    fn float(&self, min: f64, max: f64) -> TypeId {
        let (min, max) = if min.total_cmp(&max).is_le() {
            (min, max)
        } else {
            (max, min)
        };
        self.intern_key(TypeKey::Float {
            min: OrderedFloat(min),
            max: OrderedFloat(max),
        })
    }

    fn string_sized(&self, size: SizeRange) -> TypeId {
        self.intern_key(TypeKey::String { size, value: None })
    }

    fn string_value(&self, value: &str) -> TypeId {
        let length = value.chars().count() as u64;
        self.intern_key(TypeKey::String {
            size: SizeRange::exact(length),
            value: Some(self.strings.intern(value)),
        })
    }

    fn regexp(&self, pattern: &str) -> TypeId {
        self.intern_key(TypeKey::Regexp {
            pattern: Some(self.strings.intern(pattern)),
        })
    }

    fn pattern(&self, regexps: Vec<TypeId>) -> TypeId {
        let patterns = self.intern_list(regexps);
        self.intern_key(TypeKey::Pattern { patterns })
    }

    fn semver(&self, ranges: Vec<VersionRange>) -> TypeId {
        self.intern_key(TypeKey::SemVer { ranges })
    }

    fn collection(&self, size: SizeRange) -> TypeId {
        self.intern_key(TypeKey::Collection { size })
    }

    fn array(&self, element: TypeId, size: SizeRange) -> TypeId {
        self.intern_key(TypeKey::Array { element, size })
    }

    fn tuple(&self, elements: Vec<TypeId>) -> TypeId {
        let elements = self.intern_list(elements);
        self.intern_key(TypeKey::Tuple { elements })
    }

    fn hash(&self, key: TypeId, value: TypeId, size: SizeRange) -> TypeId {
        self.intern_key(TypeKey::Hash { key, value, size })
    }

    fn struct_of(&self, members: Vec<StructMember>) -> TypeId {
        let shape = self.intern_shape(StructShape { members });
        self.intern_key(TypeKey::Struct { shape })
    }

    fn optional(&self, inner: TypeId) -> TypeId {
        self.intern_key(TypeKey::Optional { inner })
    }

    fn not_undef(&self, inner: TypeId) -> TypeId {
        self.intern_key(TypeKey::NotUndef { inner })
    }

    fn variant(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        let mut seen = FxHashSet::default();
        for member in members {
            match self.lookup(member) {
                Some(TypeKey::Variant { members: nested }) => {
                    for &inner in self.type_list(nested).iter() {
                        if seen.insert(inner) {
                            flat.push(inner);
                        }
                    }
                }
                _ => {
                    if seen.insert(member) {
                        flat.push(member);
                    }
                }
            }
        }
        match flat.len() {
            0 => TypeId::UNIT,
            1 => flat[0],
            _ => {
                let members = self.intern_list(flat.into_vec());
                self.intern_key(TypeKey::Variant { members })
            }
        }
    }

    fn type_of(&self, inner: Option<TypeId>) -> TypeId {
        self.intern_key(TypeKey::Type { inner })
    }

    fn runtime(&self, runtime: &str, class_name: Option<&str>) -> TypeId {
        self.intern_key(TypeKey::Runtime {
            runtime: self.strings.intern(runtime),
            class_name: class_name.map(|name| self.strings.intern(name)),
        })
    }

    fn alias_type(&self, def: DefId) -> TypeId {
        self.intern_key(TypeKey::Alias { def })
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod intern_tests;
