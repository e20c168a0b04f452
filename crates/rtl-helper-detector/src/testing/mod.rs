//! Testing utilities for RTL Helper styling.
//!
//! Provides snapshot comparison for regression and idempotence checks.

pub mod snapshot_compare;

pub use snapshot_compare::{DiffStats, NodeChange, NodeDiff, SnapshotDiff, SnapshotMatcher};
