//! Structural assignability rules for container and wrapper targets.
//!
//! Step-6 comparisons for Collection, Array, Tuple, Hash, Struct, the
//! Optional/NotUndef wrappers, and Variant as a target. Zero-capacity
//! sources (the canonical empty array/hash, the empty struct) are
//! vacuously assignable to any container of the same family: with no
//! elements there is nothing the element or size constraints could
//! reject.

use crate::subtype::AssignabilityChecker;
use crate::types::{SizeRange, TypeId, TypeKey};

impl AssignabilityChecker<'_> {
    pub(crate) fn collection_unsafe_assignable(
        &mut self,
        target_key: &TypeKey,
        source: TypeId,
        source_key: &TypeKey,
    ) -> bool {
        match target_key {
            TypeKey::Collection { size } => match source_size_range(self.db(), source_key) {
                Some(source_size) => size.contains(source_size),
                None => false,
            },
            TypeKey::Array { element, size } => match source_key {
                TypeKey::Array {
                    element: source_element,
                    size: source_size,
                } => {
                    if source_size.max == 0 {
                        return true;
                    }
                    size.contains(*source_size) && self.check(*element, *source_element)
                }
                TypeKey::Tuple { elements } => {
                    let elements = self.db().type_list(*elements);
                    if elements.is_empty() {
                        return true;
                    }
                    size.includes(elements.len() as u64)
                        && elements.iter().all(|&part| self.check(*element, part))
                }
                _ => false,
            },
            TypeKey::Tuple { elements } => {
                let mine = self.db().type_list(*elements);
                match source_key {
                    TypeKey::Tuple {
                        elements: source_elements,
                    } => {
                        let theirs = self.db().type_list(*source_elements);
                        mine.len() == theirs.len()
                            && mine
                                .iter()
                                .zip(theirs.iter())
                                .all(|(&want, &have)| self.check(want, have))
                    }
                    TypeKey::Array {
                        element: source_element,
                        size: source_size,
                    } => {
                        let arity = mine.len() as u64;
                        if source_size.max == 0 && arity == 0 {
                            return true;
                        }
                        // The array must be known to hold exactly this many
                        // elements, each acceptable at every position.
                        source_size.min == arity
                            && source_size.max == arity
                            && mine.iter().all(|&want| self.check(want, *source_element))
                    }
                    _ => false,
                }
            }
            TypeKey::Hash { key, value, size } => match source_key {
                TypeKey::Hash {
                    key: source_key_type,
                    value: source_value,
                    size: source_size,
                } => {
                    if source_size.max == 0 {
                        return true;
                    }
                    size.contains(*source_size)
                        && self.check(*key, *source_key_type)
                        && self.check(*value, *source_value)
                }
                TypeKey::Struct { shape } => {
                    let shape = self.db().struct_shape(*shape);
                    if shape.members.is_empty() {
                        return true;
                    }
                    if !size.contains(shape.size_range()) {
                        return false;
                    }
                    shape.members.iter().all(|member| {
                        let literal = {
                            let text = self.db().resolve_atom(member.key);
                            self.db().string_value(&text)
                        };
                        self.check(*key, literal) && self.check(*value, member.value)
                    })
                }
                _ => false,
            },
            TypeKey::Struct { shape } => {
                let mine = self.db().struct_shape(*shape);
                match source_key {
                    TypeKey::Struct {
                        shape: source_shape,
                    } => {
                        let theirs = self.db().struct_shape(*source_shape);
                        let members_ok = mine.members.iter().all(|want| match theirs
                            .find(want.key)
                        {
                            Some(have) => {
                                (want.optional || !have.optional)
                                    && self.check(want.value, have.value)
                            }
                            None => want.optional,
                        });
                        members_ok
                            && theirs
                                .members
                                .iter()
                                .all(|have| mine.find(have.key).is_some())
                    }
                    TypeKey::Hash {
                        key: source_key_type,
                        value: source_value,
                        size: source_size,
                    } => {
                        if source_size.max == 0 {
                            return mine.required_count() == 0;
                        }
                        mine.size_range().contains(*source_size)
                            && self.check(TypeId::STRING, *source_key_type)
                            && mine
                                .members
                                .iter()
                                .all(|member| self.check(member.value, *source_value))
                    }
                    _ => false,
                }
            }
            TypeKey::Optional { inner } => match source_key {
                TypeKey::Undef => true,
                TypeKey::Optional {
                    inner: source_inner,
                } => self.check(*inner, *source_inner),
                _ => self.check(*inner, source),
            },
            TypeKey::NotUndef { inner } => match source_key {
                TypeKey::NotUndef {
                    inner: source_inner,
                } => self.check(*inner, *source_inner),
                // The source must itself exclude Undef, and the wrapped
                // descriptor must accept it.
                _ => !self.check(source, TypeId::UNDEF) && self.check(*inner, source),
            },
            TypeKey::Variant { members } => {
                let members = self.db().type_list(*members);
                match source_key {
                    // An optional source is Variant[inner, Undef] in
                    // disguise; both halves must land somewhere.
                    TypeKey::Optional {
                        inner: source_inner,
                    } => {
                        let undef_ok = members.iter().any(|&member| self.check(member, TypeId::UNDEF));
                        undef_ok && members.iter().any(|&member| self.check(member, *source_inner))
                    }
                    _ => members.iter().any(|&member| self.check(member, source)),
                }
            }
            _ => false,
        }
    }
}

/// The element-count range a source container is known to have, if the
/// source is a container at all.
fn source_size_range(
    db: &dyn crate::db::TypeDatabase,
    source_key: &TypeKey,
) -> Option<SizeRange> {
    match source_key {
        TypeKey::Collection { size }
        | TypeKey::Array { size, .. }
        | TypeKey::Hash { size, .. } => Some(*size),
        TypeKey::Tuple { elements } => {
            let arity = db.type_list(*elements).len() as u64;
            Some(SizeRange::exact(arity))
        }
        TypeKey::Struct { shape } => Some(db.struct_shape(*shape).size_range()),
        _ => None,
    }
}
