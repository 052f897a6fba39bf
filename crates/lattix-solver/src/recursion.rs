//! Recursion guard for cyclic alias traversal in assignability checks.
//!
//! # Design
//!
//! Self-referential aliases make the descriptor graph cyclic, so the
//! assignability walk needs cycle detection. The guard tracks the alias
//! definitions unwrapped so far on each operand side of one top-level
//! query: "this" is the assignment target, "that" is the source.
//! Re-encountering a definition on a side latches that side's flag in
//! [`GuardState`]; once **both** flags are set the engine concludes
//! assignable: every structural check performed before the double cycle
//! closed was positive, and a closed loop on both operands cannot produce
//! new counter-evidence.
//!
//! # Scoping
//!
//! A guard belongs to exactly one top-level query. It is created lazily
//! when the first recursive alias is encountered, threaded by `&mut`
//! through every nested check, and dropped when the query returns. Guard
//! state must never be reused across queries: the both-sides short-circuit
//! is only sound because all prior checks in *this* walk succeeded, so a
//! merged or cached guard would silently over-approve unrelated checks.
//!
//! # Usage
//!
//! ```ignore
//! let (state, entered) = guard.enter(Side::That, def);
//! let result = state.contains(GuardState::SELF_RECURSION_IN_BOTH)
//!     || check(target, resolved);
//! guard.leave(Side::That, def, entered);
//! ```

use crate::def::DefId;
use bitflags::bitflags;
use lattix_common::limits::MAX_GUARD_ENTRIES;
use rustc_hash::FxHashSet;

bitflags! {
    /// Which operand sides have closed a self-recursion loop so far.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct GuardState: u8 {
        /// The target operand re-entered one of its own aliases.
        const SELF_RECURSION_IN_THIS = 0b01;
        /// The source operand re-entered one of its own aliases.
        const SELF_RECURSION_IN_THAT = 0b10;
        /// Both sides have looped; the check short-circuits to true.
        const SELF_RECURSION_IN_BOTH = 0b11;
    }
}

/// Operand side of an assignability check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// The assignment target (the left operand).
    This,
    /// The source being tested (the right operand).
    That,
}

impl Side {
    const fn flag(self) -> GuardState {
        match self {
            Self::This => GuardState::SELF_RECURSION_IN_THIS,
            Self::That => GuardState::SELF_RECURSION_IN_THAT,
        }
    }
}

/// Per-query cycle-detection state. See the module docs for scoping rules.
pub struct RecursionGuard {
    this_seen: FxHashSet<DefId>,
    that_seen: FxHashSet<DefId>,
    state: GuardState,
}

impl Default for RecursionGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RecursionGuard {
    pub fn new() -> Self {
        Self {
            this_seen: FxHashSet::default(),
            that_seen: FxHashSet::default(),
            state: GuardState::empty(),
        }
    }

    /// Current recursion state.
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Register `def` on `side` before descending into its resolved body.
    ///
    /// Returns the state *after* registration plus whether the definition
    /// was newly added (in which case the caller must [`leave`](Self::leave)
    /// with `entered = true` when the descent returns). Once a side's flag
    /// is latched, further registrations on that side are no-ops; the
    /// flag is sticky for the rest of the query.
    pub fn enter(&mut self, side: Side, def: DefId) -> (GuardState, bool) {
        let flag = side.flag();
        if self.state.contains(flag) {
            return (self.state, false);
        }
        let seen = match side {
            Side::This => &mut self.this_seen,
            Side::That => &mut self.that_seen,
        };
        if seen.contains(&def) || seen.len() >= MAX_GUARD_ENTRIES {
            self.state |= flag;
            return (self.state, false);
        }
        seen.insert(def);
        (self.state, true)
    }

    /// Unregister a definition added by a successful [`enter`](Self::enter).
    pub fn leave(&mut self, side: Side, def: DefId, entered: bool) {
        if !entered {
            return;
        }
        let seen = match side {
            Side::This => &mut self.this_seen,
            Side::That => &mut self.that_seen,
        };
        let was_present = seen.remove(&def);
        debug_assert!(
            was_present,
            "RecursionGuard::leave() for a definition that was never entered"
        );
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod recursion_tests;
