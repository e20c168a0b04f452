//! Live document tree.

use slab::Slab;

use rtl_helper_core::{Error, Result};

use crate::mutation::{MutationRecord, ObserverOptions};
use crate::node::{ElementData, Node, NodeData, NodeId, Priority, StyleDeclaration};
use crate::selector::{Selector, SelectorList};

/// A mutable document tree rooted at a `body` element.
///
/// Nodes live in a slab; a node created but never appended, or removed from
/// its parent, stays alive but detached until [`Document::destroy`] frees it.
#[derive(Debug, Clone)]
pub struct Document {
    /// Slab-backed node storage
    nodes: Slab<Node>,
    /// Generation handed to the next created node
    next_generation: u64,
    /// The body element
    body: NodeId,
    /// Active observer, if any
    observer: Option<ObserverOptions>,
    /// Records queued since the last delivery
    records: Vec<MutationRecord>,
}

impl Document {
    /// Create an empty document with a `body` element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Slab::new(),
            next_generation: 1,
            body: NodeId::new(0, 0),
            observer: None,
            records: Vec::new(),
        };
        doc.body = doc.insert_node(NodeData::Element(ElementData::new("body")));
        doc
    }

    /// The body element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live nodes, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn insert_node(&mut self, data: NodeData) -> NodeId {
        let entry = self.nodes.vacant_entry();
        let id = NodeId::new(entry.key(), self.next_generation);
        self.next_generation += 1;
        entry.insert(Node {
            id,
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Resolve a node id.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.slot())
            .filter(|node| node.id == id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.slot())
            .filter(|node| node.id == id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    /// Element payload of `id`.
    pub fn element(&self, id: NodeId) -> Result<&ElementData> {
        self.node(id)?
            .element()
            .ok_or_else(|| Error::NotAnElement(id.to_string()))
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        self.node_mut(id)?
            .element_mut()
            .ok_or_else(|| Error::NotAnElement(id.to_string()))
    }

    /// Whether `id` resolves to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Whether `id` resolves to a live element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.node(id).map(Node::is_element).unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Construction and structure
    // ------------------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert_node(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.insert_node(NodeData::Text(text.to_string()))
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Tag name of `id`, `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Result<Option<&str>> {
        Ok(self.node(id)?.element().map(|e| e.tag.as_str()))
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut result = Vec::new();
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            result.push(parent);
            current = self.node(parent)?.parent;
        }
        Ok(result)
    }

    /// Whether `id` is the body or inside it.
    pub fn is_attached(&self, id: NodeId) -> bool {
        if id == self.body {
            return true;
        }
        match self.ancestors(id) {
            Ok(ancestors) => ancestors.last() == Some(&self.body),
            Err(_) => false,
        }
    }

    /// Descendants of `id` in document order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id)?.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            result.push(next);
            stack.extend(self.node(next)?.children.iter().rev().copied());
        }
        Ok(result)
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.node(parent)?.is_element() {
            return Err(Error::Hierarchy(format!("{parent} cannot have children")));
        }
        if child == self.body {
            return Err(Error::Hierarchy("body cannot be re-parented".to_string()));
        }
        self.node(child)?;
        if parent == child || self.ancestors(parent)?.contains(&child) {
            return Err(Error::Hierarchy(format!(
                "{child} is an ancestor of {parent}"
            )));
        }

        if let Some(old_parent) = self.node(child)?.parent {
            self.remove_child(old_parent, child)?;
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        self.record(MutationRecord::ChildList {
            target: parent,
            added: vec![child],
            removed: vec![],
        });
        Ok(())
    }

    /// Detach `child` from `parent`. The child stays alive.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.node_mut(parent)?;
        let Some(pos) = parent_node.children.iter().position(|c| *c == child) else {
            return Err(Error::Hierarchy(format!("{child} is not a child of {parent}")));
        };
        parent_node.children.remove(pos);
        self.node_mut(child)?.parent = None;
        self.record(MutationRecord::ChildList {
            target: parent,
            added: vec![],
            removed: vec![child],
        });
        Ok(())
    }

    /// Detach `id` if needed and free it with its whole subtree.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        if id == self.body {
            return Err(Error::Hierarchy("body cannot be destroyed".to_string()));
        }
        if let Some(parent) = self.node(id)?.parent {
            self.remove_child(parent, id)?;
        }
        let mut doomed = self.descendants(id)?;
        doomed.push(id);
        for node in doomed {
            self.nodes.remove(node.slot());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Concatenated text of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> Result<String> {
        let node = self.node(id)?;
        if let NodeData::Text(text) = &node.data {
            return Ok(text.clone());
        }
        let mut text = String::new();
        for descendant in self.descendants(id)? {
            if let NodeData::Text(data) = &self.node(descendant)?.data {
                text.push_str(data);
            }
        }
        Ok(text)
    }

    /// Replace all children of `id` with a single text node.
    ///
    /// Old children are freed. An empty `text` leaves the element empty.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<()> {
        if let NodeData::Text(data) = &mut self.node_mut(id)?.data {
            *data = text.to_string();
            self.record(MutationRecord::CharacterData { target: id });
            return Ok(());
        }

        let old_children = std::mem::take(&mut self.node_mut(id)?.children);
        for child in &old_children {
            self.node_mut(*child)?.parent = None;
        }

        let mut added = Vec::new();
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.node_mut(text_node)?.parent = Some(id);
            self.node_mut(id)?.children.push(text_node);
            added.push(text_node);
        }

        if !old_children.is_empty() || !added.is_empty() {
            self.record(MutationRecord::ChildList {
                target: id,
                added,
                removed: old_children.clone(),
            });
        }

        for child in old_children {
            self.destroy(child)?;
        }
        Ok(())
    }

    /// Change the data of text node `id`.
    pub fn set_character_data(&mut self, id: NodeId, text: &str) -> Result<()> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(data) => {
                *data = text.to_string();
            }
            NodeData::Element(_) => {
                return Err(Error::Other(format!("{id} is not a text node")));
            }
        }
        self.record(MutationRecord::CharacterData { target: id });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Attributes and classes
    // ------------------------------------------------------------------

    /// Read an attribute of `id` (`class` included).
    pub fn attribute(&self, id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.element(id)?.attribute(name))
    }

    /// Set an attribute of `id`. `class` replaces the class list.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(id)?;
        if name == "class" {
            element.set_class_name(value);
        } else {
            element.attributes.insert(name.clone(), value.to_string());
        }
        self.record(MutationRecord::Attributes { target: id, name });
        Ok(())
    }

    /// Remove an attribute of `id`.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<()> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(id)?;
        let changed = if name == "class" {
            let had = !element.classes.is_empty();
            element.classes.clear();
            had
        } else {
            element.attributes.remove(&name).is_some()
        };
        if changed {
            self.record(MutationRecord::Attributes { target: id, name });
        }
        Ok(())
    }

    /// Class list of `id`.
    pub fn classes(&self, id: NodeId) -> Result<&[String]> {
        Ok(&self.element(id)?.classes)
    }

    /// Whether `id` carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> Result<bool> {
        Ok(self.element(id)?.has_class(class))
    }

    /// Add classes to `id`; records one change if any was missing.
    pub fn add_classes(&mut self, id: NodeId, classes: &[&str]) -> Result<()> {
        let element = self.element_mut(id)?;
        let mut changed = false;
        for class in classes {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
                changed = true;
            }
        }
        if changed {
            self.record(MutationRecord::Attributes {
                target: id,
                name: "class".to_string(),
            });
        }
        Ok(())
    }

    /// Add one class to `id`.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.add_classes(id, &[class])
    }

    /// Remove classes from `id`; records one change if any was present.
    pub fn remove_classes(&mut self, id: NodeId, classes: &[&str]) -> Result<()> {
        let element = self.element_mut(id)?;
        let before = element.classes.len();
        element.classes.retain(|c| !classes.contains(&c.as_str()));
        if element.classes.len() != before {
            self.record(MutationRecord::Attributes {
                target: id,
                name: "class".to_string(),
            });
        }
        Ok(())
    }

    /// Remove one class from `id`.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.remove_classes(id, &[class])
    }

    // ------------------------------------------------------------------
    // Inline style
    // ------------------------------------------------------------------

    /// Inline declaration of `property` on `id`.
    pub fn style(&self, id: NodeId, property: &str) -> Result<Option<&StyleDeclaration>> {
        Ok(self.element(id)?.style.get(property))
    }

    /// Inline value of `property` on `id`.
    pub fn style_value(&self, id: NodeId, property: &str) -> Result<Option<&str>> {
        Ok(self.style(id, property)?.map(|d| d.value.as_str()))
    }

    /// Set an inline declaration, replacing any previous one.
    pub fn set_style(
        &mut self,
        id: NodeId,
        property: &str,
        value: &str,
        priority: Priority,
    ) -> Result<()> {
        let declaration = StyleDeclaration::new(value, priority);
        let element = self.element_mut(id)?;
        if element.style.get(property) == Some(&declaration) {
            return Ok(());
        }
        element.style.insert(property.to_string(), declaration);
        self.record(MutationRecord::Attributes {
            target: id,
            name: "style".to_string(),
        });
        Ok(())
    }

    /// Remove an inline declaration.
    pub fn remove_style(&mut self, id: NodeId, property: &str) -> Result<()> {
        if self.element_mut(id)?.style.remove(property).is_some() {
            self.record(MutationRecord::Attributes {
                target: id,
                name: "style".to_string(),
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    fn ancestor_elements(&self, id: NodeId) -> Result<Vec<&ElementData>> {
        let mut result = Vec::new();
        for ancestor in self.ancestors(id)? {
            if let Some(element) = self.node(ancestor)?.element() {
                result.push(element);
            }
        }
        Ok(result)
    }

    /// Whether element `id` matches `selector`. Text nodes never match.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> Result<bool> {
        let Some(element) = self.node(id)?.element() else {
            return Ok(false);
        };
        let ancestors = self.ancestor_elements(id)?;
        Ok(selector.matches_with(element, &ancestors))
    }

    /// Whether element `id` matches any member of `list`.
    pub fn matches_any(&self, id: NodeId, list: &SelectorList) -> Result<bool> {
        let Some(element) = self.node(id)?.element() else {
            return Ok(false);
        };
        let ancestors = self.ancestor_elements(id)?;
        Ok(list.matches_with(element, &ancestors))
    }

    /// Nearest inclusive ancestor of `id` matching `list`.
    ///
    /// Starts at the parent element when `id` is a text node.
    pub fn closest(&self, id: NodeId, list: &SelectorList) -> Result<Option<NodeId>> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if self.matches_any(candidate, list)? {
                return Ok(Some(candidate));
            }
            current = self.node(candidate)?.parent;
        }
        Ok(None)
    }

    /// Descendants of `root` matching `list`, in document order.
    pub fn query_selector_all(&self, root: NodeId, list: &SelectorList) -> Result<Vec<NodeId>> {
        let mut result = Vec::new();
        for id in self.descendants(root)? {
            if self.matches_any(id, list)? {
                result.push(id);
            }
        }
        Ok(result)
    }

    /// Elements in the body matching `list`.
    pub fn select(&self, list: &SelectorList) -> Result<Vec<NodeId>> {
        self.query_selector_all(self.body, list)
    }

    /// First attached element whose `id` attribute equals `element_id`.
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.body).ok()?.into_iter().find(|id| {
            self.node(*id)
                .ok()
                .and_then(Node::element)
                .and_then(|e| e.attributes.get("id"))
                .is_some_and(|value| value == element_id)
        })
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    /// Start delivering mutation records under the body.
    ///
    /// Replaces any previous options; queued records are kept.
    pub fn observe(&mut self, options: ObserverOptions) {
        tracing::debug!("Observing document body: {:?}", options);
        self.observer = Some(options);
    }

    /// Stop observing and drop queued records.
    pub fn disconnect(&mut self) {
        self.observer = None;
        self.records.clear();
    }

    /// Whether an observer is registered.
    pub fn is_observed(&self) -> bool {
        self.observer.is_some()
    }

    /// Whether records are waiting for delivery.
    pub fn has_pending_records(&self) -> bool {
        !self.records.is_empty()
    }

    /// Drain the queued records as one delivery batch.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    fn record(&mut self, record: MutationRecord) {
        let Some(options) = &self.observer else {
            return;
        };
        let name = match &record {
            MutationRecord::Attributes { name, .. } => Some(name.as_str()),
            _ => None,
        };
        if !options.accepts(record.kind(), name) {
            return;
        }
        // Only the body subtree is observed.
        if !self.is_attached(record.target()) {
            return;
        }
        self.records.push(record);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
