//! # rtl-helper-dom
//!
//! Live document tree for RTL Helper.
//!
//! This crate provides:
//! - Slab-backed document with generational node ids
//! - Classes, attributes, inline style declarations and text content
//! - Structural selectors (tag, class, attribute, within-ancestor)
//! - Mutation records filtered by observer options
//! - JSON fixtures and tree snapshots
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on rtl-helper-core
//! and plays the role of the hosting document the pipeline styles.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod fixture;
pub mod mutation;
pub mod node;
pub mod selector;

// Re-export commonly used types
pub use document::Document;
pub use fixture::{ChildSpec, NodeSnapshot, NodeSpec, SnapshotChild};
pub use mutation::{MutationKind, MutationRecord, ObserverOptions};
pub use node::{ElementData, Node, NodeData, NodeId, Priority, StyleDeclaration};
pub use selector::{Selector, SelectorList};
