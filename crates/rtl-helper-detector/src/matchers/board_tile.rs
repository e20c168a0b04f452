//! Board tile title matcher.

use rtl_helper_core::{selectors, ElementKind, Result};
use rtl_helper_dom::{Document, NodeId};

use crate::kind::KindMatcher;

/// Matches board tile titles by their marker class.
pub struct BoardTileMatcher;

impl BoardTileMatcher {
    /// Create a new board tile matcher.
    pub fn new() -> Self {
        Self
    }
}

impl Default for BoardTileMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl KindMatcher for BoardTileMatcher {
    fn name(&self) -> &'static str {
        "board_tile_title"
    }

    fn priority(&self) -> u32 {
        90
    }

    fn match_kind(&self, doc: &Document, node: NodeId) -> Result<Option<ElementKind>> {
        Ok(doc
            .has_class(node, selectors::BOARD_TILE_CLASS)?
            .then_some(ElementKind::BoardTileTitle))
    }
}
