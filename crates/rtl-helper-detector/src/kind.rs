//! Element kind classification.

use std::sync::Arc;

use rtl_helper_core::{selectors, ElementKind, Result};
use rtl_helper_dom::{Document, NodeId, Selector, SelectorList};

use crate::matchers::{BoardTileMatcher, InlineMatcher, TestIdMatcher, WrapperBlockMatcher};

/// Trait for element kind matchers.
pub trait KindMatcher: Send + Sync {
    /// Matcher name for debugging/logging.
    fn name(&self) -> &'static str;

    /// Priority (higher = consulted first, first match wins).
    ///
    /// Typical priorities:
    /// - 100: Wrapper blocks (may also carry other markers)
    /// - 90: Board tile titles
    /// - 80: Test identifier lookups
    /// - 10: Code and links nested in wrapper blocks
    fn priority(&self) -> u32;

    /// Kind of `node` if this matcher recognizes it.
    fn match_kind(&self, doc: &Document, node: NodeId) -> Result<Option<ElementKind>>;

    /// Whether this matcher is enabled.
    fn enabled(&self) -> bool {
        true
    }
}

/// Selectors of the six top-level kinds.
pub fn recognized_selectors() -> SelectorList {
    let mut list = vec![Selector::class(selectors::WRAPPER_CLASS)];
    list.extend(selectors::TEST_IDS.into_iter().map(Selector::test_id));
    list.push(Selector::class(selectors::BOARD_TILE_CLASS));
    SelectorList::new(list)
}

/// Runs kind matchers in priority order.
pub struct ElementClassifier {
    matchers: Vec<Arc<dyn KindMatcher>>,
    recognized: SelectorList,
}

impl Default for ElementClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementClassifier {
    /// Create a classifier with no matchers.
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
            recognized: recognized_selectors(),
        }
    }

    /// Create a classifier with the standard matchers for the host markup.
    pub fn standard() -> Self {
        let mut classifier = Self::new();
        classifier.add_matcher(Arc::new(WrapperBlockMatcher::new()));
        classifier.add_matcher(Arc::new(BoardTileMatcher::new()));
        classifier.add_matcher(Arc::new(TestIdMatcher::new()));
        classifier.add_matcher(Arc::new(InlineMatcher::new()));
        classifier
    }

    /// Add a matcher to the classifier.
    pub fn add_matcher(&mut self, matcher: Arc<dyn KindMatcher>) {
        self.matchers.push(matcher);
        // Sort by priority (descending)
        self.matchers
            .sort_by_key(|m| std::cmp::Reverse(m.priority()));
    }

    /// Matchers in consultation order.
    pub fn matchers(&self) -> &[Arc<dyn KindMatcher>] {
        &self.matchers
    }

    /// The six recognized selectors as one list.
    pub fn recognized_selectors(&self) -> &SelectorList {
        &self.recognized
    }

    /// Classify `node`. Text nodes and unmatched elements are `None`.
    pub fn classify(&self, doc: &Document, node: NodeId) -> Result<ElementKind> {
        if !doc.node(node)?.is_element() {
            return Ok(ElementKind::None);
        }
        for matcher in &self.matchers {
            if !matcher.enabled() {
                continue;
            }
            if let Some(kind) = matcher.match_kind(doc, node)? {
                return Ok(kind);
            }
        }
        Ok(ElementKind::None)
    }

    /// Whether `node` matches one of the six recognized selectors.
    pub fn is_recognized(&self, doc: &Document, node: NodeId) -> Result<bool> {
        doc.matches_any(node, &self.recognized)
    }

    /// Nearest inclusive ancestor of `node` matching a recognized selector.
    pub fn closest_recognized(&self, doc: &Document, node: NodeId) -> Result<Option<NodeId>> {
        doc.closest(node, &self.recognized)
    }

    /// Recognized descendants of `root`, in document order.
    pub fn recognized_within(&self, doc: &Document, root: NodeId) -> Result<Vec<NodeId>> {
        doc.query_selector_all(root, &self.recognized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtl_helper_dom::NodeSpec;

    fn build(doc: &mut Document, spec: NodeSpec) -> NodeId {
        let body = doc.body();
        doc.append_spec(body, &spec).unwrap()
    }

    #[test]
    fn test_matcher_priority_ordering() {
        struct TestMatcher {
            name: &'static str,
            priority: u32,
        }

        impl KindMatcher for TestMatcher {
            fn name(&self) -> &'static str {
                self.name
            }

            fn priority(&self) -> u32 {
                self.priority
            }

            fn match_kind(&self, _doc: &Document, _node: NodeId) -> Result<Option<ElementKind>> {
                Ok(None)
            }
        }

        let mut classifier = ElementClassifier::new();
        classifier.add_matcher(Arc::new(TestMatcher {
            name: "low",
            priority: 10,
        }));
        classifier.add_matcher(Arc::new(TestMatcher {
            name: "high",
            priority: 100,
        }));
        classifier.add_matcher(Arc::new(TestMatcher {
            name: "medium",
            priority: 50,
        }));

        assert_eq!(classifier.matchers()[0].name(), "high");
        assert_eq!(classifier.matchers()[1].name(), "medium");
        assert_eq!(classifier.matchers()[2].name(), "low");
    }

    #[test]
    fn test_standard_classification() {
        let mut doc = Document::new();
        let classifier = ElementClassifier::standard();

        let cases = [
            (NodeSpec::element("div").class("ak-renderer-wrapper"), ElementKind::WrapperBlock),
            (NodeSpec::element("div").test_id("checklist-container"), ElementKind::Checklist),
            (NodeSpec::element("div").test_id("comment-container"), ElementKind::Comment),
            (NodeSpec::element("a").test_id("card-name"), ElementKind::CardTitle),
            (NodeSpec::element("h2").test_id("list-name"), ElementKind::ListTitle),
            (NodeSpec::element("div").class("board-tile-details-name"), ElementKind::BoardTileTitle),
            (NodeSpec::element("div").test_id("board-header"), ElementKind::None),
            (NodeSpec::element("p"), ElementKind::None),
        ];

        for (spec, expected) in cases {
            let node = build(&mut doc, spec);
            assert_eq!(classifier.classify(&doc, node).unwrap(), expected);
        }
    }

    #[test]
    fn test_precedence_first_match_wins() {
        let mut doc = Document::new();
        let classifier = ElementClassifier::standard();

        let both = build(
            &mut doc,
            NodeSpec::element("div")
                .class("ak-renderer-wrapper")
                .class("board-tile-details-name")
                .test_id("card-name"),
        );
        assert_eq!(
            classifier.classify(&doc, both).unwrap(),
            ElementKind::WrapperBlock
        );

        let tile = build(
            &mut doc,
            NodeSpec::element("div")
                .class("board-tile-details-name")
                .test_id("list-name"),
        );
        assert_eq!(
            classifier.classify(&doc, tile).unwrap(),
            ElementKind::BoardTileTitle
        );
    }

    #[test]
    fn test_nested_inline_kinds() {
        let mut doc = Document::new();
        let classifier = ElementClassifier::standard();
        let wrapper = build(
            &mut doc,
            NodeSpec::element("div")
                .class("ak-renderer-wrapper")
                .child(NodeSpec::element("pre").child(NodeSpec::element("code").text("x = 1")))
                .child(NodeSpec::element("a").attr("href", "https://example.com")),
        );
        let descendants = doc.descendants(wrapper).unwrap();
        let code = descendants[1];
        let link = descendants[3];
        assert_eq!(classifier.classify(&doc, code).unwrap(), ElementKind::CodeBlock);
        assert_eq!(classifier.classify(&doc, link).unwrap(), ElementKind::Link);

        // Outside a wrapper block code and links are not ours
        let loose = build(&mut doc, NodeSpec::element("code").text("y"));
        assert_eq!(classifier.classify(&doc, loose).unwrap(), ElementKind::None);
    }

    #[test]
    fn test_text_nodes_are_none() {
        let mut doc = Document::new();
        let classifier = ElementClassifier::standard();
        let text = doc.create_text("مرحبا");
        assert_eq!(classifier.classify(&doc, text).unwrap(), ElementKind::None);
    }

    #[test]
    fn test_closest_recognized() {
        let mut doc = Document::new();
        let classifier = ElementClassifier::standard();
        let title = build(
            &mut doc,
            NodeSpec::element("h2")
                .test_id("list-name")
                .child(NodeSpec::element("span").text("Doing")),
        );
        let text = doc.descendants(title).unwrap()[1];
        assert_eq!(
            classifier.closest_recognized(&doc, text).unwrap(),
            Some(title)
        );
        assert!(classifier.is_recognized(&doc, title).unwrap());
        assert_eq!(classifier.recognized_selectors().selectors().len(), 6);
        assert_eq!(
            classifier.recognized_within(&doc, doc.body()).unwrap(),
            vec![title]
        );
    }
}
