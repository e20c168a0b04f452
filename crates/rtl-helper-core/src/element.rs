//! Element kinds and the selector contract with the host markup.

use serde::{Deserialize, Serialize};

/// Marker classes written onto styled nodes.
pub mod markers {
    /// Node content reads right-to-left.
    pub const RTL: &str = "rtl-content";
    /// Node content reads left-to-right.
    pub const LTR: &str = "ltr-content";
    /// Node is pinned left-to-right regardless of its content.
    pub const FORCE_LTR: &str = "force-ltr";
}

/// Structural identifiers of the host markup.
pub mod selectors {
    /// Attribute carrying the stable test identifier.
    pub const TEST_ID_ATTR: &str = "data-testid";

    /// Class of rich-text wrapper blocks (descriptions, comment bodies).
    pub const WRAPPER_CLASS: &str = "ak-renderer-wrapper";
    /// Class of board tile titles.
    pub const BOARD_TILE_CLASS: &str = "board-tile-details-name";

    /// Test identifier of checklist containers.
    pub const CHECKLIST_ID: &str = "checklist-container";
    /// Test identifier of comment containers.
    pub const COMMENT_ID: &str = "comment-container";
    /// Test identifier of card titles.
    pub const CARD_NAME_ID: &str = "card-name";
    /// Test identifier of list titles.
    pub const LIST_NAME_ID: &str = "list-name";

    /// Test identifiers of the four test-id kinds.
    pub const TEST_IDS: [&str; 4] = [CHECKLIST_ID, COMMENT_ID, CARD_NAME_ID, LIST_NAME_ID];

    /// Tag of code elements styled inside wrapper blocks.
    pub const CODE_TAG: &str = "code";
    /// Tag of links styled inside wrapper blocks.
    pub const LINK_TAG: &str = "a";
}

/// Classification of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Rich-text block containing prose, lists, code and links
    WrapperBlock,
    /// Checklist container
    Checklist,
    /// Comment container
    Comment,
    /// Card title
    CardTitle,
    /// List title
    ListTitle,
    /// Board tile title
    BoardTileTitle,
    /// Inline or block code inside a wrapper block
    CodeBlock,
    /// Hyperlink inside a wrapper block
    Link,
    /// Not recognized
    None,
}

impl ElementKind {
    /// Map a test identifier to its kind.
    pub fn from_test_id(test_id: &str) -> Option<Self> {
        match test_id {
            selectors::CHECKLIST_ID => Some(ElementKind::Checklist),
            selectors::COMMENT_ID => Some(ElementKind::Comment),
            selectors::CARD_NAME_ID => Some(ElementKind::CardTitle),
            selectors::LIST_NAME_ID => Some(ElementKind::ListTitle),
            _ => None,
        }
    }

    /// Whether this kind is one of the six recognized top-level kinds.
    pub fn is_recognized(&self) -> bool {
        matches!(
            self,
            ElementKind::WrapperBlock
                | ElementKind::Checklist
                | ElementKind::Comment
                | ElementKind::CardTitle
                | ElementKind::ListTitle
                | ElementKind::BoardTileTitle
        )
    }

    /// Whether the kind receives explicit text alignment in addition to `direction`.
    pub fn needs_explicit_alignment(&self) -> bool {
        matches!(
            self,
            ElementKind::WrapperBlock
                | ElementKind::CardTitle
                | ElementKind::ListTitle
                | ElementKind::BoardTileTitle
        )
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::WrapperBlock => "wrapper_block",
            ElementKind::Checklist => "checklist",
            ElementKind::Comment => "comment",
            ElementKind::CardTitle => "card_title",
            ElementKind::ListTitle => "list_title",
            ElementKind::BoardTileTitle => "board_tile_title",
            ElementKind::CodeBlock => "code_block",
            ElementKind::Link => "link",
            ElementKind::None => "none",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
