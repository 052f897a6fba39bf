//! Type mismatch errors and the assertion entry point.
//!
//! The assignability and inference primitives are total: they return
//! booleans and descriptors, never errors. The only user-visible failure
//! in this crate is [`TypeMismatch`], raised by [`assert_instance_of`]
//! when a value fails an instance test. The message names the failing
//! identifier, the expected descriptor, and the value's own literal
//! (inferred-set) descriptor; both renderings happen once, on the failure
//! path.

use crate::db::TypeDatabase;
use crate::format::type_to_string;
use crate::infer::infer_set;
use crate::subtype::AssignabilityChecker;
use crate::types::TypeId;
use crate::values::Value;
use std::fmt;
use tracing::debug;

/// A value failed an instance assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Identifier of the offending value (parameter name, key path, …).
    pub identifier: String,
    /// Expected descriptor.
    pub expected: TypeId,
    /// The value's inferred-set descriptor.
    pub actual: TypeId,
    expected_text: String,
    actual_text: String,
}

impl TypeMismatch {
    pub fn new(db: &dyn TypeDatabase, identifier: String, expected: TypeId, actual: TypeId) -> Self {
        Self {
            identifier,
            expected,
            actual,
            expected_text: type_to_string(db, expected),
            actual_text: type_to_string(db, actual),
        }
    }
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} expects a value of type {}, got {}",
            self.identifier, self.expected_text, self.actual_text
        )
    }
}

impl std::error::Error for TypeMismatch {}

/// Assert that `value` is an instance of `expected`, returning the value
/// untouched on success.
///
/// `allow_undef` lets an undef value pass regardless of the expected
/// descriptor (the caller treats absence as acceptable). The identifier
/// is built lazily; it is only evaluated on the failure path.
pub fn assert_instance_of<'v>(
    db: &dyn TypeDatabase,
    expected: TypeId,
    value: &'v Value,
    allow_undef: bool,
    identifier: impl FnOnce() -> String,
) -> Result<&'v Value, TypeMismatch> {
    if allow_undef && value.is_undef() {
        return Ok(value);
    }
    let actual = infer_set(db, value);
    if AssignabilityChecker::new(db).is_assignable(expected, actual) {
        Ok(value)
    } else {
        let mismatch = TypeMismatch::new(db, identifier(), expected, actual);
        debug!(%mismatch, "instance assertion failed");
        Err(mismatch)
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
