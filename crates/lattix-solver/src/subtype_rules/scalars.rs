//! Structural assignability rules for scalar-ish target kinds.
//!
//! These are the step-6 comparisons for targets without element
//! structure: numeric ranges, strings and their pattern forms, versions,
//! the lattice anchors, type values and foreign runtime kinds. The source
//! seen here is already concrete; aliases, variants and reducible
//! NotUndef wrappers were taken apart by the engine entry.

use crate::subtype::AssignabilityChecker;
use crate::types::TypeKey;

impl AssignabilityChecker<'_> {
    pub(crate) fn scalar_unsafe_assignable(
        &mut self,
        target_key: &TypeKey,
        source_key: &TypeKey,
    ) -> bool {
        match target_key {
            TypeKey::Any => true,
            // Unit is the bottom: nothing but Unit itself (handled by the
            // engine entry) is assignable to it.
            TypeKey::Unit => false,
            TypeKey::Undef => matches!(source_key, TypeKey::Undef),
            TypeKey::Default => matches!(source_key, TypeKey::Default),
            TypeKey::Boolean => matches!(source_key, TypeKey::Boolean),
            TypeKey::Integer { min, max } => match source_key {
                TypeKey::Integer {
                    min: source_min,
                    max: source_max,
                } => min <= source_min && source_max <= max,
                _ => false,
            },
            TypeKey::Float { min, max } => match source_key {
                TypeKey::Float {
                    min: source_min,
                    max: source_max,
                } => min <= source_min && source_max <= max,
                _ => false,
            },
            TypeKey::Numeric => matches!(
                source_key,
                TypeKey::Integer { .. } | TypeKey::Float { .. } | TypeKey::Numeric
            ),
            TypeKey::String { size, value } => match source_key {
                TypeKey::String {
                    size: source_size,
                    value: source_value,
                } => match value {
                    Some(value) => source_value.as_ref() == Some(value),
                    None => size.contains(*source_size),
                },
                // A pattern constrains content, not length, so only the
                // fully unconstrained String accepts it.
                TypeKey::Pattern { .. } => size.is_default() && value.is_none(),
                _ => false,
            },
            TypeKey::Regexp { pattern } => match source_key {
                TypeKey::Regexp {
                    pattern: source_pattern,
                } => pattern.is_none() || pattern == source_pattern,
                _ => false,
            },
            TypeKey::Pattern { patterns } => match source_key {
                TypeKey::String {
                    value: Some(value), ..
                } => {
                    let text = self.db().resolve_atom(*value);
                    let patterns = self.db().type_list(*patterns);
                    patterns.iter().any(|&regexp| {
                        matches!(
                            self.db().lookup(regexp),
                            Some(TypeKey::Regexp { pattern: Some(p) })
                                if self.db().regex_full_match(p, &text)
                        )
                    })
                }
                TypeKey::Pattern {
                    patterns: source_patterns,
                } => {
                    let mine = self.db().type_list(*patterns);
                    let theirs = self.db().type_list(*source_patterns);
                    theirs.iter().all(|regexp| mine.contains(regexp))
                }
                _ => false,
            },
            TypeKey::SemVer { ranges } => match source_key {
                TypeKey::SemVer {
                    ranges: source_ranges,
                } => {
                    if ranges.is_empty() {
                        return true;
                    }
                    if source_ranges.is_empty() {
                        return false;
                    }
                    source_ranges.iter().all(|source_range| {
                        ranges.iter().any(|range| range.includes_range(source_range))
                    })
                }
                _ => false,
            },
            TypeKey::SemVerRange => matches!(source_key, TypeKey::SemVerRange),
            TypeKey::Scalar => matches!(
                source_key,
                TypeKey::Boolean
                    | TypeKey::Integer { .. }
                    | TypeKey::Float { .. }
                    | TypeKey::Numeric
                    | TypeKey::String { .. }
                    | TypeKey::Pattern { .. }
                    | TypeKey::Regexp { .. }
                    | TypeKey::SemVer { .. }
                    | TypeKey::SemVerRange
                    | TypeKey::Scalar
                    | TypeKey::ScalarData
            ),
            TypeKey::ScalarData => matches!(
                source_key,
                TypeKey::Boolean
                    | TypeKey::Integer { .. }
                    | TypeKey::Float { .. }
                    | TypeKey::Numeric
                    | TypeKey::String { .. }
                    | TypeKey::ScalarData
            ),
            TypeKey::Type { inner } => match source_key {
                TypeKey::Type {
                    inner: source_inner,
                } => match (inner, source_inner) {
                    (None, _) => true,
                    (Some(_), None) => false,
                    (Some(target_inner), Some(source_inner)) => {
                        self.check(*target_inner, *source_inner)
                    }
                },
                _ => false,
            },
            TypeKey::Runtime {
                runtime,
                class_name,
            } => match source_key {
                TypeKey::Runtime {
                    runtime: source_runtime,
                    class_name: source_class,
                } => {
                    runtime == source_runtime
                        && (class_name.is_none() || class_name == source_class)
                }
                _ => false,
            },
            _ => false,
        }
    }
}
