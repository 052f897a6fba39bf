//! Common types and utilities for the lattix runtime type system.
//!
//! This crate provides the foundations shared by the lattix crates:
//! - String interning (`Atom`, `Interner`)
//! - Centralized limits and thresholds

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Centralized limits and thresholds
pub mod limits;
