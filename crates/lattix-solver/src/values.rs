//! Runtime values of the configuration language.
//!
//! The inference engine classifies these; the type system itself never
//! executes anything. Hash values preserve insertion order (`IndexMap`)
//! because struct inference and error rendering follow source order.
//!
//! `Value` implements `Eq`/`Hash` (floats compare by bit pattern) so
//! values can be hash keys; the language's hashes are keyed by arbitrary
//! values.

use crate::types::TypeId;
use crate::version::VersionRange;
use indexmap::IndexMap;
use semver::Version;
use std::hash::{Hash, Hasher};

#[derive(Clone, Debug)]
pub enum Value {
    Undef,
    /// The language's `default` marker.
    Default,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// A regexp value, carried as its source pattern.
    Regexp(String),
    Version(Version),
    VersionRange(VersionRange),
    Array(Vec<Value>),
    Hash(IndexMap<Value, Value>),
    /// A type used as a value; self-describing for inference.
    Type(TypeId),
    /// A host value the engine has no built-in rule for.
    Foreign {
        runtime: String,
        class_name: String,
    },
}

impl Value {
    /// Build a hash value from ordered pairs.
    pub fn hash_of(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Hash(pairs.into_iter().collect())
    }

    pub fn array_of(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    pub fn is_undef(&self) -> bool {
        matches!(self, Self::Undef)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undef, Self::Undef) | (Self::Default, Self::Default) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Regexp(a), Self::Regexp(b)) => a == b,
            (Self::Version(a), Self::Version(b)) => a == b,
            (Self::VersionRange(a), Self::VersionRange(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a == b,
            (Self::Type(a), Self::Type(b)) => a == b,
            (
                Self::Foreign {
                    runtime: a_runtime,
                    class_name: a_class,
                },
                Self::Foreign {
                    runtime: b_runtime,
                    class_name: b_class,
                },
            ) => a_runtime == b_runtime && a_class == b_class,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Undef | Self::Default => {}
            Self::Boolean(b) => b.hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::String(s) | Self::Regexp(s) => s.hash(state),
            Self::Version(v) => v.hash(state),
            Self::VersionRange(r) => r.hash(state),
            Self::Array(items) => {
                items.len().hash(state);
                for item in items {
                    item.hash(state);
                }
            }
            Self::Hash(entries) => {
                entries.len().hash(state);
                for (key, value) in entries {
                    key.hash(state);
                    value.hash(state);
                }
            }
            Self::Type(t) => t.hash(state),
            Self::Foreign {
                runtime,
                class_name,
            } => {
                runtime.hash(state);
                class_name.hash(state);
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

#[cfg(test)]
#[path = "../tests/values_tests.rs"]
mod values_tests;
