//! Centralized limits and thresholds for the lattix type system.
//!
//! Shared constants for guard capacities and pre-allocation sizes.
//! Centralizing these keeps tuning in one place and prevents copy-paste
//! of magic numbers across crates.

/// Maximum number of alias definitions the recursion guard will track on
/// one side of a single assignability query.
///
/// Cycle detection makes every well-formed query terminate; this cap is a
/// backstop for degenerate descriptor graphs (thousands of distinct
/// aliases chained through one query). When the cap is hit the guard
/// reports the side as recursive, which terminates the walk conservatively
/// instead of growing without bound.
pub const MAX_GUARD_ENTRIES: usize = 10_000;

/// Expected number of interned descriptors in a typical process.
///
/// Used to pre-size the descriptor interning tables. Purely a capacity
/// hint; the tables grow past it without issue.
pub const EXPECTED_INTERNED_TYPES: usize = 256;
