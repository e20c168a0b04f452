//! # rtl-helper-detector
//!
//! Classification and styling for RTL Helper.
//!
//! This crate provides:
//! - Direction classification of text samples (strong-character ratio)
//! - Self-referential link detection
//! - Priority-ordered element kind matchers
//! - The presentation policy that writes markers and inline styles
//! - A dispatcher tying the above together for one node
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on rtl-helper-core
//! and rtl-helper-dom to classify and style document nodes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod direction;
pub mod dispatch;
pub mod kind;
pub mod link;
pub mod matchers;
pub mod policy;
pub mod testing;

// Re-export commonly used types
pub use direction::{DirectionClassifier, StrongCounts};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use kind::{recognized_selectors, ElementClassifier, KindMatcher};
pub use link::LinkClassifier;
pub use matchers::{
    wrapper_code, wrapper_links, BoardTileMatcher, InlineMatcher, TestIdMatcher, WrapperBlockMatcher,
};
pub use policy::{marked_direction, PresentationPolicy};
