//! The assignability engine.
//!
//! `is_assignable(target, source)` decides the subtype relation: is every
//! value of `source` also a legal value of `target`? The entry sequence
//! below is shared by every kind and its order is load-bearing (source
//! aliases must unwrap before source variants, or cyclic aliases that
//! resolve to variants misbehave):
//!
//! 1. absent source → not assignable;
//! 2. source is Unit (bottom) or target is Any (top) → assignable;
//! 3. source alias → unwrap, guarded when the alias is self-referential;
//! 4. source variant → every arm must be assignable;
//! 5. source NotUndef whose inner already excludes Undef → unwrap;
//! 6. otherwise a kind-specific structural comparison
//!    (see [`subtype_rules`](crate::subtype_rules)).
//!
//! A target alias unwraps through the guard's other side before step 1
//! runs on the source. When both sides have closed a recursion loop, the
//! check short-circuits to true; see [`crate::recursion`].
//!
//! An instance check is assignability from the value's literal structural
//! descriptor (`infer_set`), not its loosely inferred type; that is what
//! makes tuple/struct matching exact while scalar ranges still widen
//! through the step-6 rules.

use crate::db::TypeDatabase;
use crate::def::DefId;
use crate::recursion::{GuardState, RecursionGuard, Side};
use crate::types::{TypeId, TypeKey};
use crate::values::Value;
use tracing::trace;

/// One assignability query. Owns the lazily created recursion guard;
/// create a fresh checker per top-level question.
pub struct AssignabilityChecker<'a> {
    db: &'a dyn TypeDatabase,
    guard: Option<RecursionGuard>,
}

impl<'a> AssignabilityChecker<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self { db, guard: None }
    }

    pub fn db(&self) -> &'a dyn TypeDatabase {
        self.db
    }

    /// Is `source` assignable to `target`?
    pub fn is_assignable(&mut self, target: TypeId, source: TypeId) -> bool {
        self.check(target, source)
    }

    /// Entry for callers holding an optional source descriptor: absence is
    /// never assignable.
    pub fn is_assignable_opt(&mut self, target: TypeId, source: Option<TypeId>) -> bool {
        match source {
            Some(source) => self.check(target, source),
            None => false,
        }
    }

    /// Is `value` an instance of `target`?
    pub fn is_instance(&mut self, target: TypeId, value: &Value) -> bool {
        let actual = crate::infer::infer_set(self.db, value);
        self.check(target, actual)
    }

    pub(crate) fn check(&mut self, target: TypeId, source: TypeId) -> bool {
        // Interning makes structural equality id equality.
        if target == source {
            return true;
        }
        let Some(target_key) = self.db.lookup(target) else {
            return false;
        };
        // A target alias unwraps before the source steps run, registering
        // on the guard's "this" side when self-referential.
        if let TypeKey::Alias { def } = target_key {
            return self.check_alias_target(def, source);
        }
        let Some(source_key) = self.db.lookup(source) else {
            return false;
        };
        if matches!(source_key, TypeKey::Unit) || matches!(target_key, TypeKey::Any) {
            return true;
        }
        if let TypeKey::Alias { def } = source_key {
            return self.check_alias_source(target, def);
        }
        if let TypeKey::Variant { members } = source_key {
            let members = self.db.type_list(members);
            return members.iter().all(|&member| self.check(target, member));
        }
        if let TypeKey::NotUndef { inner } = source_key {
            // NotUndef[D] where D already excludes Undef is just D; when D
            // admits Undef the comparison stays structural, against the
            // NotUndef node itself.
            if !self.check(inner, TypeId::UNDEF) {
                return self.check(target, inner);
            }
        }
        self.unsafe_assignable(&target_key, source, &source_key)
    }

    fn check_alias_target(&mut self, def: DefId, source: TypeId) -> bool {
        let Some(body) = self.db.alias_body(def) else {
            trace!(%def, "assignability query hit an unresolved alias target");
            return false;
        };
        if !self.db.is_recursive_alias(def) {
            return self.check(body, source);
        }
        let (state, entered) = self
            .guard
            .get_or_insert_with(RecursionGuard::new)
            .enter(Side::This, def);
        let result = if state.contains(GuardState::SELF_RECURSION_IN_BOTH) {
            // Both operands have looped; every check up to the point the
            // cycle closed was positive.
            trace!(%def, "recursion closed on both sides; assignable");
            true
        } else {
            self.check(body, source)
        };
        if let Some(guard) = self.guard.as_mut() {
            guard.leave(Side::This, def, entered);
        }
        result
    }

    fn check_alias_source(&mut self, target: TypeId, def: DefId) -> bool {
        let Some(body) = self.db.alias_body(def) else {
            trace!(%def, "assignability query hit an unresolved alias source");
            return false;
        };
        if !self.db.is_recursive_alias(def) {
            return self.check(target, body);
        }
        let (state, entered) = self
            .guard
            .get_or_insert_with(RecursionGuard::new)
            .enter(Side::That, def);
        let result = if state.contains(GuardState::SELF_RECURSION_IN_BOTH) {
            trace!(%def, "recursion closed on both sides; assignable");
            true
        } else {
            self.check(target, body)
        };
        if let Some(guard) = self.guard.as_mut() {
            guard.leave(Side::That, def, entered);
        }
        result
    }

    /// Step 6: structural comparison, assuming `source` is a concrete,
    /// non-alias, non-variant descriptor.
    fn unsafe_assignable(
        &mut self,
        target_key: &TypeKey,
        source: TypeId,
        source_key: &TypeKey,
    ) -> bool {
        match target_key {
            TypeKey::Any
            | TypeKey::Unit
            | TypeKey::Undef
            | TypeKey::Default
            | TypeKey::Boolean
            | TypeKey::Integer { .. }
            | TypeKey::Float { .. }
            | TypeKey::Numeric
            | TypeKey::String { .. }
            | TypeKey::Regexp { .. }
            | TypeKey::Pattern { .. }
            | TypeKey::SemVer { .. }
            | TypeKey::SemVerRange
            | TypeKey::Scalar
            | TypeKey::ScalarData
            | TypeKey::Type { .. }
            | TypeKey::Runtime { .. } => self.scalar_unsafe_assignable(target_key, source_key),
            TypeKey::Collection { .. }
            | TypeKey::Array { .. }
            | TypeKey::Tuple { .. }
            | TypeKey::Hash { .. }
            | TypeKey::Struct { .. }
            | TypeKey::Optional { .. }
            | TypeKey::NotUndef { .. }
            | TypeKey::Variant { .. } => {
                self.collection_unsafe_assignable(target_key, source, source_key)
            }
            // Aliases were unwrapped before step 1.
            TypeKey::Alias { .. } => false,
        }
    }
}

/// Is `source` assignable to `target`?
pub fn is_assignable(db: &dyn TypeDatabase, target: TypeId, source: TypeId) -> bool {
    AssignabilityChecker::new(db).is_assignable(target, source)
}

/// [`is_assignable`] for an optional source; absence is never assignable.
pub fn is_assignable_opt(db: &dyn TypeDatabase, target: TypeId, source: Option<TypeId>) -> bool {
    AssignabilityChecker::new(db).is_assignable_opt(target, source)
}

/// Is `value` an instance of `target`?
pub fn is_instance(db: &dyn TypeDatabase, target: TypeId, value: &Value) -> bool {
    AssignabilityChecker::new(db).is_instance(target, value)
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod subtype_tests;
