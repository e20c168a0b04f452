//! Self-referential link detection.
//!
//! A link whose visible label is its own address stays LTR inside RTL prose.
//! A link whose label is prose pointing at that address follows normal
//! direction detection.

use lazy_static::lazy_static;
use regex::Regex;

use rtl_helper_core::Result;
use rtl_helper_dom::{Document, NodeId};

lazy_static! {
    static ref PROTOCOL_PREFIX: Regex =
        Regex::new(r"^https?://").expect("protocol prefix pattern is valid");
    static ref WWW_PREFIX: Regex = Regex::new(r"^www\.").expect("www prefix pattern is valid");
    static ref ADDRESS_CHARS: Regex =
        Regex::new(r"^[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+$")
            .expect("address charset pattern is valid");
}

/// Strip a leading `http(s)://` and then a leading `www.`.
pub fn strip_address_prefixes(value: &str) -> String {
    let without_protocol = PROTOCOL_PREFIX.replace(value, "");
    WWW_PREFIX.replace(&without_protocol, "").into_owned()
}

/// Whether `text` only uses characters valid in addresses.
pub fn is_address_text(text: &str) -> bool {
    ADDRESS_CHARS.is_match(text)
}

/// Whether a label reproduces its link target.
///
/// `text` is expected trimmed. Stripped and unstripped forms are compared in
/// all four pairings before the character-set check.
pub fn label_matches_address(href: &str, text: &str) -> bool {
    let clean_href = strip_address_prefixes(href);
    let clean_text = strip_address_prefixes(text);

    let texts_match =
        clean_text == clean_href || text == href || clean_text == href || text == clean_href;

    texts_match && !text.is_empty() && is_address_text(text)
}

/// Decides whether hyperlink elements are self-referential.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkClassifier;

impl LinkClassifier {
    /// Create a new link classifier.
    pub fn new() -> Self {
        Self
    }

    /// Whether `node` is an `a` element labelled with its own address.
    ///
    /// Non-link elements are never self-referential.
    pub fn is_self_referential(&self, doc: &Document, node: NodeId) -> Result<bool> {
        if doc.tag(node)? != Some("a") {
            return Ok(false);
        }
        let href = doc.attribute(node, "href")?.unwrap_or_default();
        let text = doc.text_content(node)?;
        Ok(label_matches_address(&href, text.trim()))
    }
}
