//! Test identifier matcher for checklists, comments and titles.

use rtl_helper_core::{selectors, ElementKind, Result};
use rtl_helper_dom::{Document, NodeId};

use crate::kind::KindMatcher;

/// Matches elements by their stable test identifier attribute.
pub struct TestIdMatcher;

impl TestIdMatcher {
    /// Create a new test identifier matcher.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TestIdMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KindMatcher for TestIdMatcher {
    fn name(&self) -> &'static str {
        "test_id"
    }

    fn priority(&self) -> u32 {
        80
    }

    fn match_kind(&self, doc: &Document, node: NodeId) -> Result<Option<ElementKind>> {
        Ok(doc
            .attribute(node, selectors::TEST_ID_ATTR)?
            .and_then(|test_id| ElementKind::from_test_id(&test_id)))
    }
}
