//! Event scripts: document edits and host events applied in order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use rtl_helper_core::{Error, Result};
use rtl_helper_dom::NodeSpec;

fn default_location() -> String {
    "about:blank".to_string()
}

/// A sequence of steps run against a document.
///
/// Elements are addressed by their `id` attribute; `"body"` names the body.
///
/// ```
/// use rtl_helper::{Script, ScriptStep};
///
/// let script = Script::from_json(r#"{
///     "steps": [
///         {"op": "set_text", "target": "title", "text": "مرحبا"},
///         {"op": "resize"},
///         {"op": "wait", "ms": 400}
///     ]
/// }"#).unwrap();
/// assert_eq!(script.steps.len(), 3);
/// assert_eq!(script.steps[1], ScriptStep::Resize);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Location the document is loaded at
    #[serde(default = "default_location")]
    pub location: String,
    /// Steps, in order
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// One script step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Replace the text of an element
    SetText { target: String, text: String },
    /// Append a subtree under an element
    Append { parent: String, node: NodeSpec },
    /// Set an attribute
    SetAttribute {
        target: String,
        name: String,
        value: String,
    },
    /// Remove an attribute
    RemoveAttribute { target: String, name: String },
    /// Add a class
    AddClass { target: String, class: String },
    /// Detach and free an element
    Remove { target: String },
    /// Viewport resize event
    Resize,
    /// Window focus event
    Focus,
    /// In-app navigation to `url`
    Navigate { url: String },
    /// Manual reprocess request
    Reprocess,
    /// Let time pass
    Wait { ms: u64 },
}

impl ScriptStep {
    /// Whether the step edits the document.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            ScriptStep::SetText { .. }
                | ScriptStep::Append { .. }
                | ScriptStep::SetAttribute { .. }
                | ScriptStep::RemoveAttribute { .. }
                | ScriptStep::AddClass { .. }
                | ScriptStep::Remove { .. }
        )
    }
}

impl Default for Script {
    fn default() -> Self {
        Self {
            location: default_location(),
            steps: Vec::new(),
        }
    }
}

impl Script {
    /// Parse a script from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Other(format!("Cannot read script {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}
