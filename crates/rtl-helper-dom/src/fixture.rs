//! JSON fixtures for building documents and snapshots for inspecting them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rtl_helper_core::{selectors, Result};

use crate::document::Document;
use crate::node::{NodeData, NodeId};

fn default_tag() -> String {
    "div".to_string()
}

/// Declarative description of an element subtree.
///
/// ```
/// use rtl_helper_dom::{Document, NodeSpec};
///
/// let spec = NodeSpec::element("h2").test_id("list-name").text("Backlog");
/// let mut doc = Document::new();
/// let id = doc.build(&spec).unwrap();
/// assert_eq!(doc.text_content(id).unwrap(), "Backlog");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Tag name
    #[serde(default = "default_tag")]
    pub tag: String,
    /// `id` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Classes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Other attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Children; bare strings are text nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildSpec>,
}

/// Child of a [`NodeSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChildSpec {
    /// Text node
    Text(String),
    /// Element subtree
    Element(NodeSpec),
}

impl NodeSpec {
    /// Start describing an element.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set the `id` attribute.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the stable test identifier.
    pub fn test_id(self, value: impl Into<String>) -> Self {
        self.attr(selectors::TEST_ID_ATTR, value)
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ChildSpec::Text(text.into()));
        self
    }

    /// Append an element child.
    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(ChildSpec::Element(child));
        self
    }

    /// Parse a fixture from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Serializable view of a subtree after styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Tag name
    pub tag: String,
    /// Non-class attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Classes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Inline style, `!important` spelled out
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    /// Children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotChild>,
}

/// Child of a [`NodeSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotChild {
    /// Text node
    Text(String),
    /// Element subtree
    Element(NodeSnapshot),
}

impl Document {
    /// Build a detached subtree from `spec` and return its root.
    pub fn build(&mut self, spec: &NodeSpec) -> Result<NodeId> {
        let root = self.create_element(&spec.tag);
        if let Some(id) = &spec.id {
            self.set_attribute(root, "id", id)?;
        }
        if !spec.classes.is_empty() {
            let classes: Vec<&str> = spec.classes.iter().map(String::as_str).collect();
            self.add_classes(root, &classes)?;
        }
        for (name, value) in &spec.attributes {
            self.set_attribute(root, name, value)?;
        }
        for child in &spec.children {
            let child_id = match child {
                ChildSpec::Text(text) => self.create_text(text),
                ChildSpec::Element(element) => self.build(element)?,
            };
            self.append_child(root, child_id)?;
        }
        Ok(root)
    }

    /// Build `spec` and append it to `parent`.
    pub fn append_spec(&mut self, parent: NodeId, spec: &NodeSpec) -> Result<NodeId> {
        let id = self.build(spec)?;
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Build a document whose body holds the children of `spec`.
    ///
    /// The root spec's own tag, classes and attributes are ignored.
    pub fn from_spec(spec: &NodeSpec) -> Result<Self> {
        let mut doc = Document::new();
        let body = doc.body();
        for child in &spec.children {
            let child_id = match child {
                ChildSpec::Text(text) => doc.create_text(text),
                ChildSpec::Element(element) => doc.build(element)?,
            };
            doc.append_child(body, child_id)?;
        }
        Ok(doc)
    }

    /// Capture the element subtree at `id`.
    pub fn snapshot(&self, id: NodeId) -> Result<NodeSnapshot> {
        let element = self.element(id)?;
        let mut children = Vec::new();
        for child in self.children(id)? {
            match &self.node(*child)?.data {
                NodeData::Text(text) => children.push(SnapshotChild::Text(text.clone())),
                NodeData::Element(_) => children.push(SnapshotChild::Element(self.snapshot(*child)?)),
            }
        }
        Ok(NodeSnapshot {
            tag: element.tag.clone(),
            attributes: element.attributes.clone(),
            classes: element.classes.clone(),
            style: element
                .style
                .iter()
                .map(|(property, decl)| (property.clone(), decl.to_string()))
                .collect(),
            children,
        })
    }
}
