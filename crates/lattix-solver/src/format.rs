//! Compact textual rendering of descriptors.
//!
//! This exists for error messages and debugging, not as a full rendering
//! layer: parameterized kinds print their structural fields in brackets,
//! defaults print as the bare kind name, and aliases print by name (never
//! expanded, which also keeps rendering safe on cyclic graphs).

use crate::db::TypeDatabase;
use crate::types::{SizeRange, TypeId, TypeKey};
use std::fmt::Write;

/// Kind name of `id`: the tag alone, no structural fields.
pub fn kind_name(db: &dyn TypeDatabase, id: TypeId) -> &'static str {
    db.lookup(id).map_or("Unknown", |key| key.kind_name())
}

/// Render `id` as text.
pub fn type_to_string(db: &dyn TypeDatabase, id: TypeId) -> String {
    let mut out = String::new();
    write_type(db, id, &mut out);
    out
}

fn write_type(db: &dyn TypeDatabase, id: TypeId, out: &mut String) {
    let Some(key) = db.lookup(id) else {
        out.push_str("Unknown");
        return;
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
        | TypeKey::SemVerRange => out.push_str(key.kind_name()),
        TypeKey::Integer { min, max } => {
            if min == i64::MIN && max == i64::MAX {
                out.push_str("Integer");
            } else {
                let _ = write!(out, "Integer[{min}, {max}]");
            }
        }
        TypeKey::Float { min, max } => {
            if min.0 == f64::NEG_INFINITY && max.0 == f64::INFINITY {
                out.push_str("Float");
            } else {
                let _ = write!(out, "Float[{min}, {max}]");
            }
        }
        TypeKey::String { size, value } => match value {
            Some(value) => {
                let _ = write!(out, "String['{}']", db.resolve_atom(value));
            }
            None if size.is_default() => out.push_str("String"),
            None => write_sized(out, "String", size),
        },
        TypeKey::Regexp { pattern } => match pattern {
            Some(pattern) => {
                let _ = write!(out, "Regexp[/{}/]", db.resolve_atom(pattern));
            }
            None => out.push_str("Regexp"),
        },
        TypeKey::Pattern { patterns } => {
            out.push_str("Pattern[");
            for (i, &regexp) in db.type_list(patterns).iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Some(TypeKey::Regexp {
                    pattern: Some(pattern),
                }) = db.lookup(regexp)
                {
                    let _ = write!(out, "/{}/", db.resolve_atom(pattern));
                } else {
                    write_type(db, regexp, out);
                }
            }
            out.push(']');
        }
        TypeKey::SemVer { ranges } => {
            if ranges.is_empty() {
                out.push_str("SemVer");
            } else {
                out.push_str("SemVer[");
                for (i, range) in ranges.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "'{range}'");
                }
                out.push(']');
            }
        }
        TypeKey::Collection { size } => {
            if size.is_default() {
                out.push_str("Collection");
            } else {
                write_sized(out, "Collection", size);
            }
        }
        TypeKey::Array { element, size } => {
            if element == TypeId::ANY && size.is_default() {
                out.push_str("Array");
                return;
            }
            out.push_str("Array[");
            write_type(db, element, out);
            write_size_suffix(out, size);
            out.push(']');
        }
        TypeKey::Tuple { elements } => {
            out.push_str("Tuple[");
            for (i, &element) in db.type_list(elements).iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(db, element, out);
            }
            out.push(']');
        }
        TypeKey::Hash { key, value, size } => {
            if key == TypeId::ANY && value == TypeId::ANY && size.is_default() {
                out.push_str("Hash");
                return;
            }
            out.push_str("Hash[");
            write_type(db, key, out);
            out.push_str(", ");
            write_type(db, value, out);
            write_size_suffix(out, size);
            out.push(']');
        }
        TypeKey::Struct { shape } => {
            out.push_str("Struct[{");
            for (i, member) in db.struct_shape(shape).members.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "'{}'", db.resolve_atom(member.key));
                if member.optional {
                    out.push('?');
                }
                out.push_str(" => ");
                write_type(db, member.value, out);
            }
            out.push_str("}]");
        }
        TypeKey::Optional { inner } => {
            out.push_str("Optional[");
            write_type(db, inner, out);
            out.push(']');
        }
        TypeKey::NotUndef { inner } => {
            out.push_str("NotUndef[");
            write_type(db, inner, out);
            out.push(']');
        }
        TypeKey::Variant { members } => {
            out.push_str("Variant[");
            for (i, &member) in db.type_list(members).iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(db, member, out);
            }
            out.push(']');
        }
        TypeKey::Alias { def } => {
            out.push_str(&db.alias_name(def));
        }
        TypeKey::Type { inner } => match inner {
            Some(inner) => {
                out.push_str("Type[");
                write_type(db, inner, out);
                out.push(']');
            }
            None => out.push_str("Type"),
        },
        TypeKey::Runtime {
            runtime,
            class_name,
        } => match class_name {
            Some(class_name) => {
                let _ = write!(
                    out,
                    "Runtime[{}, '{}']",
                    db.resolve_atom(runtime),
                    db.resolve_atom(class_name)
                );
            }
            None => {
                let _ = write!(out, "Runtime[{}]", db.resolve_atom(runtime));
            }
        },
    }
}

fn write_sized(out: &mut String, name: &str, size: SizeRange) {
    out.push_str(name);
    out.push('[');
    let _ = write!(out, "{}", size.min);
    if size.max != u64::MAX {
        let _ = write!(out, ", {}", size.max);
    } else {
        out.push_str(", default");
    }
    out.push(']');
}

fn write_size_suffix(out: &mut String, size: SizeRange) {
    if size.is_default() {
        return;
    }
    let _ = write!(out, ", {}", size.min);
    if size.max != u64::MAX {
        let _ = write!(out, ", {}", size.max);
    } else {
        out.push_str(", default");
    }
}
