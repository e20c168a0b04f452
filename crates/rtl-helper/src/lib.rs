//! RTL Helper host library
//!
//! This library contains the event script format and the host loop that
//! applies a script to a document while the engine keeps it styled.
//! The actual binary is in main.rs.

pub mod host;
pub mod script;

// Re-export commonly used types
pub use host::{Host, RunSummary};
pub use script::{Script, ScriptStep};
