//! Structural selectors.
//!
//! A closed set of element conditions: tag name, class membership,
//! attribute equality, and "inside an ancestor matching". Selectors are
//! built in code and checked directly against [`ElementData`]; there is no
//! text syntax to parse.

use rtl_helper_core::selectors::TEST_ID_ATTR;

use crate::node::ElementData;

/// Condition on one element and, for [`Selector::Within`], its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Element with this tag name (lowercase)
    Tag(String),
    /// Element carrying this class
    Class(String),
    /// Element whose attribute equals a value
    Attribute {
        /// Attribute name (lowercase)
        name: String,
        /// Required value
        value: String,
    },
    /// Element matching `subject` that has some ancestor matching `ancestor`
    Within {
        /// Condition on some ancestor
        ancestor: Box<Selector>,
        /// Condition on the element itself
        subject: Box<Selector>,
    },
}

impl Selector {
    /// Match elements by tag name.
    pub fn tag(tag: impl Into<String>) -> Self {
        Selector::Tag(tag.into().to_ascii_lowercase())
    }

    /// Match elements carrying `class`.
    pub fn class(class: impl Into<String>) -> Self {
        Selector::Class(class.into())
    }

    /// Match elements whose attribute `name` equals `value`.
    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Selector::Attribute {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }

    /// Match elements whose test identifier equals `value`.
    pub fn test_id(value: impl Into<String>) -> Self {
        Self::attribute(TEST_ID_ATTR, value)
    }

    /// Restrict this selector to elements below one matching `ancestor`.
    pub fn within(self, ancestor: Selector) -> Self {
        Selector::Within {
            ancestor: Box::new(ancestor),
            subject: Box::new(self),
        }
    }

    /// Match against `element`, whose ancestor elements are given nearest
    /// first.
    pub(crate) fn matches_with(&self, element: &ElementData, ancestors: &[&ElementData]) -> bool {
        match self {
            Selector::Tag(tag) => element.tag == *tag,
            Selector::Class(class) => element.has_class(class),
            Selector::Attribute { name, value } => {
                element.attribute(name).is_some_and(|actual| actual == *value)
            }
            Selector::Within { ancestor, subject } => {
                subject.matches_with(element, ancestors)
                    && ancestors
                        .iter()
                        .enumerate()
                        .any(|(depth, candidate)| {
                            ancestor.matches_with(candidate, &ancestors[depth + 1..])
                        })
            }
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::Tag(tag) => f.write_str(tag),
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Attribute { name, value } => write!(f, "[{}=\"{}\"]", name, value),
            Selector::Within { ancestor, subject } => write!(f, "{} {}", ancestor, subject),
        }
    }
}

/// Selector list; matches when any member matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<Selector>,
}

impl SelectorList {
    /// Build a list from its members.
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    /// Member selectors.
    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub(crate) fn matches_with(&self, element: &ElementData, ancestors: &[&ElementData]) -> bool {
        self.selectors
            .iter()
            .any(|selector| selector.matches_with(element, ancestors))
    }
}

impl From<Selector> for SelectorList {
    fn from(selector: Selector) -> Self {
        Self::new(vec![selector])
    }
}

impl FromIterator<Selector> for SelectorList {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl std::fmt::Display for SelectorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, selector) in self.selectors.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, classes: &[&str], attrs: &[(&str, &str)]) -> ElementData {
        let mut data = ElementData::new(tag);
        data.classes = classes.iter().map(|c| c.to_string()).collect();
        for (name, value) in attrs {
            data.attributes.insert(name.to_string(), value.to_string());
        }
        data
    }

    #[test]
    fn test_class_selector() {
        let selector = Selector::class("ak-renderer-wrapper");
        let wrapper = element("div", &["ak-renderer-wrapper", "x"], &[]);
        let other = element("div", &["x"], &[]);
        assert!(selector.matches_with(&wrapper, &[]));
        assert!(!selector.matches_with(&other, &[]));
    }

    #[test]
    fn test_test_id_selector() {
        let selector = Selector::test_id("card-name");
        let card = element("h2", &[], &[("data-testid", "card-name")]);
        let list = element("h2", &[], &[("data-testid", "list-name")]);
        let bare = element("h2", &[], &[]);
        assert!(selector.matches_with(&card, &[]));
        assert!(!selector.matches_with(&list, &[]));
        assert!(!selector.matches_with(&bare, &[]));
    }

    #[test]
    fn test_tag_selector_is_case_insensitive() {
        let selector = Selector::tag("CODE");
        assert!(selector.matches_with(&element("code", &[], &[]), &[]));
        assert!(!selector.matches_with(&element("pre", &[], &[]), &[]));
    }

    #[test]
    fn test_within_selector() {
        let selector = Selector::tag("code").within(Selector::class("ak-renderer-wrapper"));
        let code = element("code", &[], &[]);
        let pre = element("pre", &[], &[]);
        let wrapper = element("div", &["ak-renderer-wrapper"], &[]);

        assert!(selector.matches_with(&code, &[&pre, &wrapper]));
        assert!(!selector.matches_with(&code, &[&pre]));
        assert!(!selector.matches_with(&pre, &[&wrapper]));
    }

    #[test]
    fn test_nested_within_keeps_ancestor_order() {
        // span inside code inside wrapper
        let selector = Selector::tag("span")
            .within(Selector::tag("code").within(Selector::class("ak-renderer-wrapper")));
        let span = element("span", &[], &[]);
        let code = element("code", &[], &[]);
        let wrapper = element("div", &["ak-renderer-wrapper"], &[]);

        assert!(selector.matches_with(&span, &[&code, &wrapper]));
        // wrapper below the code block does not count
        assert!(!selector.matches_with(&span, &[&wrapper, &code]));
    }

    #[test]
    fn test_selector_list() {
        let list: SelectorList = [
            Selector::class("ak-renderer-wrapper"),
            Selector::test_id("list-name"),
            Selector::class("board-tile-details-name"),
        ]
        .into_iter()
        .collect();
        assert_eq!(list.selectors().len(), 3);

        let title = element("h2", &[], &[("data-testid", "list-name")]);
        let tile = element("div", &["board-tile-details-name"], &[]);
        let other = element("div", &[], &[]);
        assert!(list.matches_with(&title, &[]));
        assert!(list.matches_with(&tile, &[]));
        assert!(!list.matches_with(&other, &[]));
        assert!(!SelectorList::default().matches_with(&title, &[]));
    }

    #[test]
    fn test_display() {
        let list = SelectorList::new(vec![
            Selector::tag("a").within(Selector::class("ak-renderer-wrapper")),
            Selector::test_id("card-name"),
        ]);
        assert_eq!(
            list.to_string(),
            ".ak-renderer-wrapper a, [data-testid=\"card-name\"]"
        );
    }
}
