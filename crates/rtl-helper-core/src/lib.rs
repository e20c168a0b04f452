//! # rtl-helper-core
//!
//! Core types for RTL Helper.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other rtl-helper crates. It provides:
//!
//! - Direction verdicts and their presentation values
//! - Element kinds, marker classes and the markup identifiers the classifier keys on
//! - Configuration loaded from YAML
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other rtl-helper crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod direction;
pub mod element;
pub mod error;

// Re-export commonly used types
pub use config::{
    DetectionSettings, HelperConfig, LoggingSettings, PresentationSettings, TimingSettings,
};
pub use direction::Direction;
pub use element::{markers, selectors, ElementKind};
pub use error::{Error, Result};
