//! Wrapper block matcher for rich-text renderer containers.

use rtl_helper_core::{selectors, ElementKind, Result};
use rtl_helper_dom::{Document, NodeId};

use crate::kind::KindMatcher;

/// Matches rich-text wrapper blocks by their marker class.
pub struct WrapperBlockMatcher;

impl WrapperBlockMatcher {
    /// Create a new wrapper block matcher.
    pub fn new() -> Self {
        Self
    }
}

impl Default for WrapperBlockMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KindMatcher for WrapperBlockMatcher {
    fn name(&self) -> &'static str {
        "wrapper_block"
    }

    fn priority(&self) -> u32 {
        100
    }

    fn match_kind(&self, doc: &Document, node: NodeId) -> Result<Option<ElementKind>> {
        Ok(doc
            .has_class(node, selectors::WRAPPER_CLASS)?
            .then_some(ElementKind::WrapperBlock))
    }
}
