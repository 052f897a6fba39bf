//! Value-to-descriptor inference.
//!
//! Two forms, differing only for containers:
//!
//! - [`infer`] yields the narrowest *classifying* descriptor: scalars
//!   become singleton ranges, sequences become a homogeneous Array whose
//!   element type is the join of the element inferences, mappings become
//!   a joined Hash.
//! - [`infer_set`] yields the *literal structural* descriptor instance
//!   testing relies on: sequences become positional Tuples, mappings with
//!   non-empty string keys become Structs, and other mappings keep their
//!   per-entry inferences as Variants.
//!
//! The join folds through [`common`](crate::lattice::common) seeded with
//! Unit, the fold's identity: joining nothing yields Unit, joining one
//! element yields that element's descriptor unchanged.
//!
//! Dispatch over value kinds is a closed match with one extension point:
//! kinds the engine does not know are offered to the
//! [`ValueResolver`]; when that also passes, the value degrades to an
//! opaque Runtime descriptor carrying the host class name.

use crate::db::TypeDatabase;
use crate::lattice::common;
use crate::types::{SizeRange, StructMember, TypeId};
use crate::values::Value;
use crate::version::VersionRange;
use smallvec::SmallVec;

/// Resolver for foreign value kinds, consulted only when no built-in
/// inference rule matches. Must be side-effect-free and total: absence is
/// a normal `None`, never an error.
pub trait ValueResolver {
    fn lookup(&self, runtime: &str, class_name: &str) -> Option<TypeId>;
}

/// Resolver that knows nothing; every foreign value degrades to its
/// opaque Runtime descriptor.
pub struct NullResolver;

impl ValueResolver for NullResolver {
    fn lookup(&self, _runtime: &str, _class_name: &str) -> Option<TypeId> {
        None
    }
}

static NULL_RESOLVER: NullResolver = NullResolver;

/// Inference over runtime values, parameterized by the foreign-value
/// resolver.
pub struct ValueInferrer<'a> {
    db: &'a dyn TypeDatabase,
    resolver: &'a dyn ValueResolver,
}

impl<'a> ValueInferrer<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self {
            db,
            resolver: &NULL_RESOLVER,
        }
    }

    pub fn with_resolver(db: &'a dyn TypeDatabase, resolver: &'a dyn ValueResolver) -> Self {
        Self { db, resolver }
    }

    /// Narrowest classifying descriptor for `value`.
    pub fn infer(&self, value: &Value) -> TypeId {
        match value {
            Value::Undef => TypeId::UNDEF,
            Value::Default => TypeId::DEFAULT,
            Value::Boolean(_) => TypeId::BOOLEAN,
            Value::Integer(n) => self.db.integer(*n, *n),
            Value::Float(f) => self.db.float(*f, *f),
            Value::String(s) => self.db.string_value(s),
            Value::Regexp(pattern) => self.db.regexp(pattern),
            Value::Version(version) => self
                .db
                .semver(vec![VersionRange::exact(version.clone())]),
            Value::VersionRange(_) => TypeId::SEMVER_RANGE,
            Value::Type(inner) => self.db.type_of(Some(*inner)),
            Value::Array(items) => {
                if items.is_empty() {
                    return TypeId::EMPTY_ARRAY;
                }
                let element = self.reduce(items.iter().map(|item| self.infer(item)));
                self.db
                    .array(element, SizeRange::exact(items.len() as u64))
            }
            Value::Hash(entries) => {
                if entries.is_empty() {
                    return TypeId::EMPTY_HASH;
                }
                let key = self.reduce(entries.keys().map(|k| self.infer(k)));
                let value = self.reduce(entries.values().map(|v| self.infer(v)));
                self.db
                    .hash(key, value, SizeRange::exact(entries.len() as u64))
            }
            Value::Foreign {
                runtime,
                class_name,
            } => self
                .resolver
                .lookup(runtime, class_name)
                .unwrap_or_else(|| self.db.runtime(runtime, Some(class_name))),
        }
    }

    /// Literal structural descriptor for `value`, used by instance tests.
    pub fn infer_set(&self, value: &Value) -> TypeId {
        match value {
            Value::Array(items) => {
                if items.is_empty() {
                    return TypeId::EMPTY_ARRAY;
                }
                let elements = items.iter().map(|item| self.infer_set(item)).collect();
                self.db.tuple(elements)
            }
            Value::Hash(entries) => {
                let all_string_keys = entries
                    .keys()
                    .all(|key| matches!(key, Value::String(s) if !s.is_empty()));
                if all_string_keys {
                    let members = entries
                        .iter()
                        .map(|(key, value)| {
                            let Value::String(text) = key else {
                                unreachable!("guarded by all_string_keys")
                            };
                            StructMember::required(
                                self.db.intern_atom(text),
                                self.infer_set(value),
                            )
                        })
                        .collect();
                    return self.db.struct_of(members);
                }
                let keys: SmallVec<[TypeId; 8]> =
                    entries.keys().map(|k| self.infer_set(k)).collect();
                let values: SmallVec<[TypeId; 8]> =
                    entries.values().map(|v| self.infer_set(v)).collect();
                self.db.hash(
                    self.db.variant(keys.into_vec()),
                    self.db.variant(values.into_vec()),
                    SizeRange::exact(entries.len() as u64),
                )
            }
            _ => self.infer(value),
        }
    }

    /// Join a sequence of descriptors through the lattice, seeded with
    /// Unit.
    pub fn reduce(&self, types: impl IntoIterator<Item = TypeId>) -> TypeId {
        types
            .into_iter()
            .fold(TypeId::UNIT, |joined, next| common(self.db, joined, next))
    }
}

/// [`ValueInferrer::infer`] with the null resolver.
pub fn infer(db: &dyn TypeDatabase, value: &Value) -> TypeId {
    ValueInferrer::new(db).infer(value)
}

/// [`ValueInferrer::infer_set`] with the null resolver.
pub fn infer_set(db: &dyn TypeDatabase, value: &Value) -> TypeId {
    ValueInferrer::new(db).infer_set(value)
}

/// Join descriptors through the lattice, seeded with Unit.
pub fn reduce_type(db: &dyn TypeDatabase, types: impl IntoIterator<Item = TypeId>) -> TypeId {
    ValueInferrer::new(db).reduce(types)
}

#[cfg(test)]
#[path = "../tests/infer_tests.rs"]
mod infer_tests;
