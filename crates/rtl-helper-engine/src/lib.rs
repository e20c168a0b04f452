//! # rtl-helper-engine
//!
//! Incremental reprocessing for RTL Helper.
//!
//! This crate provides:
//! - The reprocessing engine (initial scan, mutation batches, full reset)
//! - Idempotence bookkeeping through the processed set
//! - A process-wide engine handle with get-or-create initialization
//! - Debounced re-triggers for resize, focus and navigation events
//!
//! ## Architecture
//!
//! This is Layer 3 in the architecture - it drives rtl-helper-detector over
//! an rtl-helper-dom document.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod handle;
pub mod processed;
pub mod trigger;

// Re-export commonly used types
pub use engine::{Engine, EngineId, ScanReport};
pub use processed::ProcessedSet;
pub use trigger::{Debouncer, NavigationTracker, Retrigger};
