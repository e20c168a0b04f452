//! Writing direction verdicts.

use serde::{Deserialize, Serialize};

use crate::element::markers;

/// Writing direction assigned to a text sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right (the default for empty or letterless text)
    #[default]
    Ltr,
    /// Right-to-left
    Rtl,
}

impl Direction {
    /// Value of the CSS `direction` property.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    /// Explicit `text-align` value matching this direction.
    pub fn text_align(&self) -> &'static str {
        match self {
            Direction::Ltr => "left",
            Direction::Rtl => "right",
        }
    }

    /// Marker class recording this direction on a node.
    pub fn marker_class(&self) -> &'static str {
        match self {
            Direction::Ltr => markers::LTR,
            Direction::Rtl => markers::RTL,
        }
    }

    /// The other direction.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Ltr => Direction::Rtl,
            Direction::Rtl => Direction::Ltr,
        }
    }

    /// Whether this is right-to-left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
