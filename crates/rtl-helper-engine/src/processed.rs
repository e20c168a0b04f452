//! Bookkeeping of nodes already styled for their current content.

use std::collections::HashMap;

use rtl_helper_core::ElementKind;
use rtl_helper_dom::{Document, NodeId};

/// Nodes styled since their last invalidation, with the kind they were
/// styled as.
///
/// Entries hold generational ids only, so a freed node never resolves again
/// and is dropped by the next [`prune`](Self::prune).
#[derive(Debug, Clone, Default)]
pub struct ProcessedSet {
    entries: HashMap<NodeId, ElementKind>,
}

impl ProcessedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `node` is processed.
    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    /// Kind `node` was styled as.
    pub fn kind_of(&self, node: NodeId) -> Option<ElementKind> {
        self.entries.get(&node).copied()
    }

    /// Mark `node` processed as `kind`.
    pub fn insert(&mut self, node: NodeId, kind: ElementKind) {
        self.entries.insert(node, kind);
    }

    /// Invalidate `node`. Returns whether it was present.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.entries.remove(&node).is_some()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of processed nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries whose node was freed or is no longer attached.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self, doc: &Document) -> usize {
        let before = self.entries.len();
        self.entries.retain(|node, _| doc.is_attached(*node));
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtl_helper_dom::NodeSpec;

    #[test]
    fn test_insert_remove() {
        let mut doc = Document::new();
        let node = doc
            .append_spec(doc.body(), &NodeSpec::element("h2").test_id("list-name"))
            .unwrap();

        let mut set = ProcessedSet::new();
        assert!(set.is_empty());
        set.insert(node, ElementKind::ListTitle);
        assert!(set.contains(node));
        assert_eq!(set.kind_of(node), Some(ElementKind::ListTitle));
        assert_eq!(set.len(), 1);

        assert!(set.remove(node));
        assert!(!set.remove(node));
        assert!(!set.contains(node));
    }

    #[test]
    fn test_prune_detached_and_freed() {
        let mut doc = Document::new();
        let body = doc.body();
        let kept = doc
            .append_spec(body, &NodeSpec::element("h2").test_id("list-name"))
            .unwrap();
        let detached = doc
            .append_spec(body, &NodeSpec::element("a").test_id("card-name"))
            .unwrap();
        let freed = doc
            .append_spec(body, &NodeSpec::element("div").test_id("comment-container"))
            .unwrap();

        let mut set = ProcessedSet::new();
        set.insert(kept, ElementKind::ListTitle);
        set.insert(detached, ElementKind::CardTitle);
        set.insert(freed, ElementKind::Comment);

        doc.remove_child(body, detached).unwrap();
        doc.destroy(freed).unwrap();

        assert_eq!(set.prune(&doc), 2);
        assert!(set.contains(kept));
        assert!(!set.contains(detached));
        assert!(!set.contains(freed));
    }

    #[test]
    fn test_reused_slot_is_a_different_node() {
        let mut doc = Document::new();
        let old = doc
            .append_spec(doc.body(), &NodeSpec::element("h2").test_id("list-name"))
            .unwrap();
        let mut set = ProcessedSet::new();
        set.insert(old, ElementKind::ListTitle);

        doc.destroy(old).unwrap();
        let new = doc
            .append_spec(doc.body(), &NodeSpec::element("h2").test_id("list-name"))
            .unwrap();

        assert!(!set.contains(new));
        set.prune(&doc);
        assert!(set.is_empty());
    }
}
