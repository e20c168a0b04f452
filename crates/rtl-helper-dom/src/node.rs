//! Document nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Generational node identifier.
///
/// The slot is reused once a node is destroyed, the generation is not, so a
/// stale id never resolves to the node that took its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    slot: usize,
    generation: u64,
}

impl NodeId {
    pub(crate) fn new(slot: usize, generation: u64) -> Self {
        Self { slot, generation }
    }

    /// Slab slot of the node.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Creation generation of the node.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.slot, self.generation)
    }
}

/// Priority of an inline style declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Plain declaration
    #[default]
    Normal,
    /// `!important` declaration
    Important,
}

/// One inline style declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    /// Declared value
    pub value: String,
    /// Declaration priority
    pub priority: Priority,
}

impl StyleDeclaration {
    /// Create a new declaration.
    pub fn new(value: impl Into<String>, priority: Priority) -> Self {
        Self {
            value: value.into(),
            priority,
        }
    }

    /// Whether the declaration is `!important`.
    pub fn is_important(&self) -> bool {
        self.priority == Priority::Important
    }
}

impl std::fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.priority {
            Priority::Normal => f.write_str(&self.value),
            Priority::Important => write!(f, "{} !important", self.value),
        }
    }
}

/// Element payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes other than `class`
    pub attributes: BTreeMap<String, String>,
    /// Class list, in insertion order
    pub classes: Vec<String>,
    /// Inline style declarations
    pub style: BTreeMap<String, StyleDeclaration>,
}

impl ElementData {
    /// Create an element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-joined class list, as the `class` attribute reads.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Replace the class list from a `class` attribute value.
    pub(crate) fn set_class_name(&mut self, value: &str) {
        self.classes.clear();
        for class in value.split_ascii_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
    }

    /// Read an attribute, `class` included.
    pub fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            if self.classes.is_empty() {
                None
            } else {
                Some(self.class_name())
            }
        } else {
            self.attributes.get(name).cloned()
        }
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Element node
    Element(ElementData),
    /// Text node
    Text(String),
}

/// A node in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// This node's id
    pub id: NodeId,
    /// Parent node, if attached to one
    pub parent: Option<NodeId>,
    /// Child nodes in document order
    pub children: Vec<NodeId>,
    /// Payload
    pub data: NodeData,
}

impl Node {
    /// Element payload, if this is an element.
    pub fn element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(data) => Some(data),
            NodeData::Text(_) => None,
        }
    }

    /// Mutable element payload, if this is an element.
    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(data) => Some(data),
            NodeData::Text(_) => None,
        }
    }

    /// Whether this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::new(3, 7).to_string(), "3v7");
    }

    #[test]
    fn test_declaration_display() {
        let normal = StyleDeclaration::new("rtl", Priority::Normal);
        let important = StyleDeclaration::new("ltr", Priority::Important);
        assert_eq!(normal.to_string(), "rtl");
        assert_eq!(important.to_string(), "ltr !important");
        assert!(important.is_important());
    }

    #[test]
    fn test_class_name_round_trip() {
        let mut element = ElementData::new("DIV");
        assert_eq!(element.tag, "div");
        element.set_class_name("  a b   a c ");
        assert_eq!(element.classes, vec!["a", "b", "c"]);
        assert_eq!(element.attribute("class").as_deref(), Some("a b c"));
    }

    #[test]
    fn test_empty_class_attribute() {
        let element = ElementData::new("span");
        assert_eq!(element.attribute("class"), None);
    }
}
