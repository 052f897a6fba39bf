//! Generalization and the least-common-supertype join.
//!
//! `generalize` widens a descriptor to its canonical least-constrained
//! form of the same kind. `common` joins two descriptors: the wider
//! operand when one subsumes the other, a same-kind widening when the
//! kinds agree, and otherwise the first of the four lattice anchors
//! (numeric ⊂ scalar-data ⊂ scalar ⊂ data) that classifies both
//! operands. The probe order matters: Integer and Float must join to
//! Numeric, not to the coarser Scalar tiers.

use crate::db::TypeDatabase;
use crate::subtype::is_assignable;
use crate::types::{SizeRange, TypeId, TypeKey};

/// The actual descriptor behind Optional/NotUndef wrappers.
///
/// Optional and NotUndef are the one asymmetry in the hierarchy: they
/// generalize through their wrapped descriptor's actual form, which is
/// what lets `Optional[Optional[X]]`-shaped descriptors compare against
/// plain `X`.
pub fn actual_type(db: &dyn TypeDatabase, id: TypeId) -> TypeId {
    let mut current = id;
    loop {
        match db.lookup(current) {
            Some(TypeKey::Optional { inner }) | Some(TypeKey::NotUndef { inner }) => {
                current = inner;
            }
            _ => return current,
        }
    }
}

/// Canonical widened form of `id`: the kind's unparameterized default
/// instance, with element descriptors generalized recursively and bounds
/// dropped. Generalization never narrows: `generalize(T)` always accepts
/// `T`.
pub fn generalize(db: &dyn TypeDatabase, id: TypeId) -> TypeId {
    let Some(key) = db.lookup(id) else {
        return id;
    };
    match key {
        TypeKey::Any
        | TypeKey::Unit
        | TypeKey::Undef
        | TypeKey::Default
        | TypeKey::Boolean
        | TypeKey::Numeric
        | TypeKey::Scalar
        | TypeKey::ScalarData
        | TypeKey::SemVerRange => id,
        TypeKey::Integer { .. } => TypeId::INTEGER,
        TypeKey::Float { .. } => TypeId::FLOAT,
        TypeKey::String { .. } => TypeId::STRING,
        TypeKey::Regexp { .. } => TypeId::REGEXP,
        // A pattern constrains string content; its widened form is the
        // unconstrained String.
        TypeKey::Pattern { .. } => TypeId::STRING,
        TypeKey::SemVer { .. } => TypeId::SEMVER,
        TypeKey::Collection { .. } => TypeId::COLLECTION,
        TypeKey::Array { element, .. } => db.array(generalize(db, element), SizeRange::DEFAULT),
        TypeKey::Tuple { .. } => TypeId::ARRAY,
        TypeKey::Hash { key, value, .. } => db.hash(
            generalize(db, key),
            generalize(db, value),
            SizeRange::DEFAULT,
        ),
        TypeKey::Struct { .. } => db.hash(TypeId::STRING, TypeId::ANY, SizeRange::DEFAULT),
        TypeKey::Optional { .. } | TypeKey::NotUndef { .. } => {
            generalize(db, actual_type(db, id))
        }
        TypeKey::Variant { members } => {
            let widened = db
                .type_list(members)
                .iter()
                .map(|&member| generalize(db, member))
                .collect();
            db.variant(widened)
        }
        TypeKey::Alias { def } => {
            // A self-referential alias is its own widened form; expanding
            // it would never terminate.
            if db.is_recursive_alias(def) {
                return id;
            }
            match db.alias_body(def) {
                Some(body) => generalize(db, body),
                None => id,
            }
        }
        TypeKey::Type { .. } => TypeId::TYPE,
        TypeKey::Runtime { runtime, .. } => {
            let name = db.resolve_atom(runtime);
            db.runtime(&name, None)
        }
    }
}

/// Normalized form of `id`. Currently the identity for every kind; kept
/// as the counterpart hook to [`generalize`] so callers can normalize
/// descriptors without knowing their kind.
pub fn normalize(_db: &dyn TypeDatabase, id: TypeId) -> TypeId {
    id
}

/// Least common supertype of `a` and `b`.
pub fn common(db: &dyn TypeDatabase, a: TypeId, b: TypeId) -> TypeId {
    if is_assignable(db, a, b) {
        return a;
    }
    if is_assignable(db, b, a) {
        return b;
    }
    not_assignable_common(db, a, b)
}

fn not_assignable_common(db: &dyn TypeDatabase, a: TypeId, b: TypeId) -> TypeId {
    if let (Some(key_a), Some(key_b)) = (db.lookup(a), db.lookup(b))
        && std::mem::discriminant(&key_a) == std::mem::discriminant(&key_b)
    {
        return same_kind_common(db, a, &key_a, &key_b);
    }
    for anchor in [
        TypeId::NUMERIC,
        TypeId::SCALAR_DATA,
        TypeId::SCALAR,
        TypeId::DATA,
    ] {
        if is_assignable(db, anchor, a) && is_assignable(db, anchor, b) {
            return anchor;
        }
    }
    TypeId::ANY
}

/// Join of two same-kind descriptors neither of which subsumes the other.
/// Kinds with mergeable parameters merge them; the default is the kind's
/// widened form, since same-kind-but-incompatible parameters widen to the
/// unparameterized kind.
fn same_kind_common(db: &dyn TypeDatabase, a: TypeId, key_a: &TypeKey, key_b: &TypeKey) -> TypeId {
    match (key_a, key_b) {
        (
            TypeKey::Integer { min, max },
            TypeKey::Integer {
                min: other_min,
                max: other_max,
            },
        ) => db.integer((*min).min(*other_min), (*max).max(*other_max)),
        (
            TypeKey::Float { min, max },
            TypeKey::Float {
                min: other_min,
                max: other_max,
            },
        ) => db.float(min.0.min(other_min.0), max.0.max(other_max.0)),
        (
            TypeKey::String { size, .. },
            TypeKey::String {
                size: other_size, ..
            },
        ) => db.string_sized(size.merge(*other_size)),
        (
            TypeKey::Array { element, size },
            TypeKey::Array {
                element: other_element,
                size: other_size,
            },
        ) => db.array(common(db, *element, *other_element), size.merge(*other_size)),
        (
            TypeKey::Hash { key, value, size },
            TypeKey::Hash {
                key: other_key,
                value: other_value,
                size: other_size,
            },
        ) => db.hash(
            common(db, *key, *other_key),
            common(db, *value, *other_value),
            size.merge(*other_size),
        ),
        (
            TypeKey::Tuple { elements },
            TypeKey::Tuple {
                elements: other_elements,
            },
        ) => {
            let mine = db.type_list(*elements);
            let theirs = db.type_list(*other_elements);
            if mine.len() == theirs.len() {
                let joined = mine
                    .iter()
                    .zip(theirs.iter())
                    .map(|(&x, &y)| common(db, x, y))
                    .collect();
                db.tuple(joined)
            } else {
                TypeId::ARRAY
            }
        }
        (
            TypeKey::Collection { size },
            TypeKey::Collection { size: other_size },
        ) => db.collection(size.merge(*other_size)),
        (
            TypeKey::Variant { members },
            TypeKey::Variant {
                members: other_members,
            },
        ) => {
            let mut joined: Vec<TypeId> = db.type_list(*members).to_vec();
            joined.extend(db.type_list(*other_members).iter().copied());
            db.variant(joined)
        }
        (
            TypeKey::Optional { inner },
            TypeKey::Optional { inner: other_inner },
        ) => db.optional(common(db, *inner, *other_inner)),
        (
            TypeKey::NotUndef { inner },
            TypeKey::NotUndef { inner: other_inner },
        ) => db.not_undef(common(db, *inner, *other_inner)),
        (
            TypeKey::Pattern { patterns },
            TypeKey::Pattern {
                patterns: other_patterns,
            },
        ) => {
            let mut joined: Vec<TypeId> = db.type_list(*patterns).to_vec();
            for &regexp in db.type_list(*other_patterns).iter() {
                if !joined.contains(&regexp) {
                    joined.push(regexp);
                }
            }
            db.pattern(joined)
        }
        (
            TypeKey::SemVer { ranges },
            TypeKey::SemVer {
                ranges: other_ranges,
            },
        ) => {
            let mut joined = ranges.clone();
            for range in other_ranges {
                if !joined.contains(range) {
                    joined.push(range.clone());
                }
            }
            db.semver(joined)
        }
        (
            TypeKey::Type { inner },
            TypeKey::Type { inner: other_inner },
        ) => match (inner, other_inner) {
            (Some(mine), Some(theirs)) => db.type_of(Some(common(db, *mine, *theirs))),
            _ => TypeId::TYPE,
        },
        (
            TypeKey::Runtime { runtime, .. },
            TypeKey::Runtime {
                runtime: other_runtime,
                ..
            },
        ) => {
            if runtime == other_runtime {
                let name = db.resolve_atom(*runtime);
                db.runtime(&name, None)
            } else {
                TypeId::ANY
            }
        }
        // Two distinct aliases with no subsumption have no useful joint
        // widening.
        (TypeKey::Alias { .. }, TypeKey::Alias { .. }) => TypeId::ANY,
        _ => generalize(db, a),
    }
}

#[cfg(test)]
#[path = "../tests/lattice_tests.rs"]
mod lattice_tests;
