//! Matcher for code blocks and links nested in wrapper blocks.

use rtl_helper_core::{selectors, ElementKind, Result};
use rtl_helper_dom::{Document, NodeId, Selector};

use crate::kind::KindMatcher;

/// Code elements inside a wrapper block.
pub fn wrapper_code() -> Selector {
    Selector::tag(selectors::CODE_TAG).within(Selector::class(selectors::WRAPPER_CLASS))
}

/// Links inside a wrapper block.
pub fn wrapper_links() -> Selector {
    Selector::tag(selectors::LINK_TAG).within(Selector::class(selectors::WRAPPER_CLASS))
}

/// Matches `code` and `a` elements inside a wrapper block.
pub struct InlineMatcher {
    code: Selector,
    link: Selector,
}

impl InlineMatcher {
    /// Create a new inline matcher.
    pub fn new() -> Self {
        Self {
            code: wrapper_code(),
            link: wrapper_links(),
        }
    }
}

impl Default for InlineMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KindMatcher for InlineMatcher {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn priority(&self) -> u32 {
        10
    }

    fn match_kind(&self, doc: &Document, node: NodeId) -> Result<Option<ElementKind>> {
        if doc.matches(node, &self.code)? {
            Ok(Some(ElementKind::CodeBlock))
        } else if doc.matches(node, &self.link)? {
            Ok(Some(ElementKind::Link))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtl_helper_dom::NodeSpec;

    #[test]
    fn test_inline_matcher() {
        let mut doc = Document::new();
        let body = doc.body();
        let wrapper = doc
            .append_spec(
                body,
                &NodeSpec::element("div")
                    .class("ak-renderer-wrapper")
                    .child(NodeSpec::element("p").child(NodeSpec::element("code").text("ls -la")))
                    .child(NodeSpec::element("a").text("docs")),
            )
            .unwrap();
        let nodes = doc.descendants(wrapper).unwrap();
        let (p, code, link) = (nodes[0], nodes[1], nodes[3]);

        let matcher = InlineMatcher::new();
        assert_eq!(
            matcher.match_kind(&doc, code).unwrap(),
            Some(ElementKind::CodeBlock)
        );
        assert_eq!(matcher.match_kind(&doc, link).unwrap(), Some(ElementKind::Link));
        assert_eq!(matcher.match_kind(&doc, p).unwrap(), None);
        assert_eq!(matcher.match_kind(&doc, wrapper).unwrap(), None);
    }
}
