//! Presentation policy: marker classes and inline styles per element kind.
//!
//! Rules, in priority order:
//! 1. Code blocks are forced LTR whatever their content.
//! 2. Self-referential links are forced LTR.
//! 3. Other links follow their own text's verdict.
//! 4. Wrapper blocks follow their verdict, mirror nested list padding, then
//!    rules 1-3 run over their nested code blocks and links.
//! 5. Checklists, comments and titles get a marker and `direction`.
//!
//! Every rule is idempotent and leaves at most one of the RTL/LTR markers on
//! a node. The force-LTR marker is independent.

use rtl_helper_core::{markers, selectors, Direction, ElementKind, PresentationSettings, Result};
use rtl_helper_dom::{Document, NodeId, Priority, Selector, SelectorList};

use crate::direction::DirectionClassifier;
use crate::link::LinkClassifier;

/// Read the direction marker currently on `node`.
///
/// Force-LTR counts as LTR. `None` when no marker has been applied.
pub fn marked_direction(doc: &Document, node: NodeId) -> Result<Option<Direction>> {
    if doc.has_class(node, markers::RTL)? {
        Ok(Some(Direction::Rtl))
    } else if doc.has_class(node, markers::LTR)? || doc.has_class(node, markers::FORCE_LTR)? {
        Ok(Some(Direction::Ltr))
    } else {
        Ok(None)
    }
}

/// Applies direction-specific presentation to classified nodes.
#[derive(Debug, Clone)]
pub struct PresentationPolicy {
    list_indent_px: u32,
    code_font_stack: String,
    direction: DirectionClassifier,
    links: LinkClassifier,
    lists: SelectorList,
    code_blocks: SelectorList,
    code_spans: SelectorList,
    anchors: SelectorList,
}

impl PresentationPolicy {
    /// Create a policy from presentation settings and the classifier used for
    /// nested links.
    pub fn new(settings: &PresentationSettings, direction: DirectionClassifier) -> Self {
        Self {
            list_indent_px: settings.list_indent_px,
            code_font_stack: settings.code_font_stack.clone(),
            direction,
            links: LinkClassifier::new(),
            lists: Selector::tag("ul").into(),
            code_blocks: Selector::tag(selectors::CODE_TAG).into(),
            code_spans: Selector::tag("span").into(),
            anchors: Selector::tag(selectors::LINK_TAG).into(),
        }
    }

    /// Indent moved between list edges, in pixels.
    pub fn list_indent_px(&self) -> u32 {
        self.list_indent_px
    }

    /// Apply the rule for `kind` to `node`.
    ///
    /// `verdict` is ignored for code blocks and self-referential links.
    pub fn apply(
        &self,
        doc: &mut Document,
        node: NodeId,
        kind: ElementKind,
        verdict: Direction,
    ) -> Result<()> {
        match kind {
            ElementKind::CodeBlock => self.force_code_ltr(doc, node),
            ElementKind::Link => self.apply_link(doc, node, verdict),
            ElementKind::WrapperBlock => {
                self.apply_marker(doc, node, kind, verdict)?;
                self.mirror_lists(doc, node, verdict)?;
                self.style_nested(doc, node)
            }
            ElementKind::Checklist
            | ElementKind::Comment
            | ElementKind::CardTitle
            | ElementKind::ListTitle
            | ElementKind::BoardTileTitle => self.apply_marker(doc, node, kind, verdict),
            ElementKind::None => Ok(()),
        }
    }

    /// Pin `node` left-to-right with important declarations.
    pub fn force_ltr(&self, doc: &mut Document, node: NodeId) -> Result<()> {
        doc.remove_classes(node, &[markers::RTL, markers::LTR])?;
        doc.add_class(node, markers::FORCE_LTR)?;

        doc.set_style(node, "direction", "ltr", Priority::Important)?;
        doc.set_style(node, "text-align", "left", Priority::Important)?;
        doc.set_style(node, "unicode-bidi", "embed", Priority::Important)?;

        if doc.tag(node)? == Some(selectors::CODE_TAG) {
            doc.set_style(node, "white-space", "pre", Priority::Important)?;
            doc.set_style(node, "font-family", &self.code_font_stack, Priority::Important)?;
        }
        Ok(())
    }

    /// Rule 1: force a code block and its nested spans LTR.
    pub fn force_code_ltr(&self, doc: &mut Document, code: NodeId) -> Result<()> {
        self.force_ltr(doc, code)?;
        for span in doc.query_selector_all(code, &self.code_spans)? {
            doc.set_style(span, "direction", "ltr", Priority::Important)?;
            doc.set_style(span, "text-align", "left", Priority::Important)?;
        }
        tracing::trace!("Forced code block {} LTR", code);
        Ok(())
    }

    /// Rules 2 and 3 for one link, with `verdict` computed from its text.
    pub fn apply_link(&self, doc: &mut Document, link: NodeId, verdict: Direction) -> Result<()> {
        if self.links.is_self_referential(doc, link)? {
            tracing::trace!("Link {} labels its own address, forcing LTR", link);
            return self.force_ltr(doc, link);
        }

        doc.remove_classes(link, &[markers::RTL, markers::LTR, markers::FORCE_LTR])?;
        doc.add_class(link, verdict.marker_class())?;
        doc.set_style(link, "direction", verdict.as_str(), Priority::Important)?;
        doc.set_style(link, "text-align", verdict.text_align(), Priority::Important)?;
        Ok(())
    }

    /// Rule 5 (and the container half of rule 4): marker plus `direction`.
    pub fn apply_marker(
        &self,
        doc: &mut Document,
        node: NodeId,
        kind: ElementKind,
        verdict: Direction,
    ) -> Result<()> {
        doc.remove_class(node, verdict.opposite().marker_class())?;
        doc.add_class(node, verdict.marker_class())?;
        doc.set_style(node, "direction", verdict.as_str(), Priority::Normal)?;

        if kind.needs_explicit_alignment() || doc.has_class(node, selectors::BOARD_TILE_CLASS)? {
            doc.set_style(node, "text-align", verdict.text_align(), Priority::Normal)?;
        }
        Ok(())
    }

    /// Move nested list indentation to the trailing edge for `verdict`.
    pub fn mirror_lists(&self, doc: &mut Document, wrapper: NodeId, verdict: Direction) -> Result<()> {
        let indent = format!("{}px", self.list_indent_px);
        let (left, right) = match verdict {
            Direction::Rtl => ("0px", indent.as_str()),
            Direction::Ltr => (indent.as_str(), "0px"),
        };

        for list in doc.query_selector_all(wrapper, &self.lists)? {
            doc.set_style(list, "padding-left", left, Priority::Normal)?;
            doc.set_style(list, "padding-right", right, Priority::Normal)?;
            doc.set_style(list, "direction", verdict.as_str(), Priority::Normal)?;
            doc.set_style(list, "text-align", verdict.text_align(), Priority::Normal)?;
        }
        Ok(())
    }

    /// Second pass of rule 4: code blocks and links inside `wrapper`.
    ///
    /// Runs unconditionally after the container is styled, so nested rules
    /// always win over the container's verdict.
    pub fn style_nested(&self, doc: &mut Document, wrapper: NodeId) -> Result<()> {
        for code in doc.query_selector_all(wrapper, &self.code_blocks)? {
            self.force_code_ltr(doc, code)?;
        }
        for link in doc.query_selector_all(wrapper, &self.anchors)? {
            let text = doc.text_content(link)?;
            let verdict = self.direction.classify(text.trim());
            self.apply_link(doc, link, verdict)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtl_helper_dom::NodeSpec;

    fn policy() -> PresentationPolicy {
        PresentationPolicy::new(&PresentationSettings::default(), DirectionClassifier::new())
    }

    fn add(doc: &mut Document, spec: NodeSpec) -> NodeId {
        let body = doc.body();
        doc.append_spec(body, &spec).unwrap()
    }

    #[test]
    fn test_marker_kinds() {
        let mut doc = Document::new();
        let policy = policy();
        let comment = add(&mut doc, NodeSpec::element("div").test_id("comment-container"));

        policy
            .apply(&mut doc, comment, ElementKind::Comment, Direction::Rtl)
            .unwrap();
        assert!(doc.has_class(comment, "rtl-content").unwrap());
        assert_eq!(doc.style_value(comment, "direction").unwrap(), Some("rtl"));
        // Comments inherit alignment from direction
        assert_eq!(doc.style_value(comment, "text-align").unwrap(), None);

        policy
            .apply(&mut doc, comment, ElementKind::Comment, Direction::Ltr)
            .unwrap();
        assert!(!doc.has_class(comment, "rtl-content").unwrap());
        assert!(doc.has_class(comment, "ltr-content").unwrap());
        assert_eq!(doc.style_value(comment, "direction").unwrap(), Some("ltr"));
    }

    #[test]
    fn test_titles_get_alignment() {
        let mut doc = Document::new();
        let policy = policy();
        let card = add(&mut doc, NodeSpec::element("a").test_id("card-name"));
        let list = add(&mut doc, NodeSpec::element("h2").test_id("list-name"));
        let tile = add(&mut doc, NodeSpec::element("div").class("board-tile-details-name"));

        for (node, kind) in [
            (card, ElementKind::CardTitle),
            (list, ElementKind::ListTitle),
            (tile, ElementKind::BoardTileTitle),
        ] {
            policy.apply(&mut doc, node, kind, Direction::Rtl).unwrap();
            assert_eq!(doc.style_value(node, "text-align").unwrap(), Some("right"));
            policy.apply(&mut doc, node, kind, Direction::Ltr).unwrap();
            assert_eq!(doc.style_value(node, "text-align").unwrap(), Some("left"));
        }
    }

    #[test]
    fn test_board_tile_class_on_other_kind_gets_alignment() {
        let mut doc = Document::new();
        let policy = policy();
        let checklist = add(
            &mut doc,
            NodeSpec::element("div")
                .test_id("checklist-container")
                .class("board-tile-details-name"),
        );
        policy
            .apply(&mut doc, checklist, ElementKind::Checklist, Direction::Rtl)
            .unwrap();
        assert_eq!(doc.style_value(checklist, "text-align").unwrap(), Some("right"));
    }

    #[test]
    fn test_code_block_ignores_verdict() {
        let mut doc = Document::new();
        let policy = policy();
        let code = add(
            &mut doc,
            NodeSpec::element("code")
                .class("rtl-content")
                .child(NodeSpec::element("span").text("مرحبا"))
                .text(" = 1"),
        );

        policy
            .apply(&mut doc, code, ElementKind::CodeBlock, Direction::Rtl)
            .unwrap();

        assert!(doc.has_class(code, "force-ltr").unwrap());
        assert!(!doc.has_class(code, "rtl-content").unwrap());
        let direction = doc.style(code, "direction").unwrap().unwrap();
        assert_eq!(direction.value, "ltr");
        assert!(direction.is_important());
        assert_eq!(doc.style_value(code, "white-space").unwrap(), Some("pre"));
        assert_eq!(doc.style_value(code, "unicode-bidi").unwrap(), Some("embed"));
        assert_eq!(
            doc.style_value(code, "font-family").unwrap(),
            Some("\"Monaco\", \"Menlo\", \"Ubuntu Mono\", monospace")
        );

        let span = doc.children(code).unwrap()[0];
        assert_eq!(doc.style_value(span, "direction").unwrap(), Some("ltr"));
        assert_eq!(doc.style_value(span, "text-align").unwrap(), Some("left"));
    }

    #[test]
    fn test_prose_link_follows_verdict() {
        let mut doc = Document::new();
        let policy = policy();
        let link = add(
            &mut doc,
            NodeSpec::element("a")
                .class("force-ltr")
                .attr("href", "https://example.com")
                .text("صفحة المثال"),
        );

        policy
            .apply(&mut doc, link, ElementKind::Link, Direction::Rtl)
            .unwrap();
        assert!(!doc.has_class(link, "force-ltr").unwrap());
        assert!(doc.has_class(link, "rtl-content").unwrap());
        let align = doc.style(link, "text-align").unwrap().unwrap();
        assert_eq!(align.value, "right");
        assert!(align.is_important());
    }

    #[test]
    fn test_self_referential_link_forced() {
        let mut doc = Document::new();
        let policy = policy();
        let link = add(
            &mut doc,
            NodeSpec::element("a")
                .attr("href", "https://www.example.com/path")
                .text("www.example.com/path"),
        );

        policy
            .apply(&mut doc, link, ElementKind::Link, Direction::Rtl)
            .unwrap();
        assert!(doc.has_class(link, "force-ltr").unwrap());
        assert_eq!(doc.style_value(link, "direction").unwrap(), Some("ltr"));
        // Not a code element: no monospace
        assert_eq!(doc.style_value(link, "font-family").unwrap(), None);
    }

    #[test]
    fn test_wrapper_block_end_to_end() {
        let mut doc = Document::new();
        let policy = policy();
        let wrapper = add(
            &mut doc,
            NodeSpec::element("div")
                .class("ak-renderer-wrapper")
                .child(NodeSpec::element("p").text("هذا وصف البطاقة مع رابط "))
                .child(
                    NodeSpec::element("ul")
                        .child(NodeSpec::element("li").text("العنصر الأول"))
                        .child(NodeSpec::element("li").text("العنصر الثاني")),
                )
                .child(NodeSpec::element("pre").child(NodeSpec::element("code").text("npm install")))
                .child(
                    NodeSpec::element("a")
                        .attr("href", "https://www.example.com/path")
                        .text("www.example.com/path"),
                ),
        );

        policy
            .apply(&mut doc, wrapper, ElementKind::WrapperBlock, Direction::Rtl)
            .unwrap();

        assert!(doc.has_class(wrapper, "rtl-content").unwrap());
        assert_eq!(doc.style_value(wrapper, "direction").unwrap(), Some("rtl"));
        assert_eq!(doc.style_value(wrapper, "text-align").unwrap(), Some("right"));

        let ul = doc.select(&Selector::tag("ul").into()).unwrap()[0];
        assert_eq!(doc.style_value(ul, "padding-left").unwrap(), Some("0px"));
        assert_eq!(doc.style_value(ul, "padding-right").unwrap(), Some("24px"));
        assert_eq!(doc.style_value(ul, "direction").unwrap(), Some("rtl"));
        assert_eq!(doc.style_value(ul, "text-align").unwrap(), Some("right"));

        let code = doc.select(&Selector::tag("code").into()).unwrap()[0];
        assert!(doc.has_class(code, "force-ltr").unwrap());
        assert_eq!(doc.style_value(code, "white-space").unwrap(), Some("pre"));

        let link = doc.select(&Selector::tag("a").into()).unwrap()[0];
        assert!(doc.has_class(link, "force-ltr").unwrap());
        assert_eq!(doc.style_value(link, "direction").unwrap(), Some("ltr"));
    }

    #[test]
    fn test_ltr_wrapper_restores_list_indent() {
        let mut doc = Document::new();
        let policy = policy();
        let wrapper = add(
            &mut doc,
            NodeSpec::element("div")
                .class("ak-renderer-wrapper")
                .child(NodeSpec::element("ul").child(NodeSpec::element("li").text("First item"))),
        );
        policy
            .apply(&mut doc, wrapper, ElementKind::WrapperBlock, Direction::Rtl)
            .unwrap();
        policy
            .apply(&mut doc, wrapper, ElementKind::WrapperBlock, Direction::Ltr)
            .unwrap();

        let ul = doc.children(wrapper).unwrap()[0];
        assert_eq!(doc.style_value(ul, "padding-left").unwrap(), Some("24px"));
        assert_eq!(doc.style_value(ul, "padding-right").unwrap(), Some("0px"));
        assert!(!doc.has_class(wrapper, "rtl-content").unwrap());
    }

    #[test]
    fn test_nested_prose_link_detected_on_own_text() {
        let mut doc = Document::new();
        let policy = policy();
        let wrapper = add(
            &mut doc,
            NodeSpec::element("div")
                .class("ak-renderer-wrapper")
                .child(
                    NodeSpec::element("p")
                        .text("See the guide ")
                        .child(
                            NodeSpec::element("a")
                                .attr("href", "https://example.com/guide")
                                .text("الدليل"),
                        ),
                ),
        );
        policy
            .apply(&mut doc, wrapper, ElementKind::WrapperBlock, Direction::Ltr)
            .unwrap();

        let link = doc.select(&Selector::tag("a").into()).unwrap()[0];
        assert!(doc.has_class(link, "rtl-content").unwrap());
        assert!(doc.has_class(wrapper, "ltr-content").unwrap());
    }

    #[test]
    fn test_marked_direction() {
        let mut doc = Document::new();
        let policy = policy();
        let title = add(&mut doc, NodeSpec::element("h2").test_id("list-name"));
        assert_eq!(marked_direction(&doc, title).unwrap(), None);

        policy
            .apply(&mut doc, title, ElementKind::ListTitle, Direction::Rtl)
            .unwrap();
        assert_eq!(marked_direction(&doc, title).unwrap(), Some(Direction::Rtl));
    }

    #[test]
    fn test_none_kind_is_noop() {
        let mut doc = Document::new();
        let policy = policy();
        let p = add(&mut doc, NodeSpec::element("p").text("hi"));
        policy
            .apply(&mut doc, p, ElementKind::None, Direction::Rtl)
            .unwrap();
        assert!(doc.classes(p).unwrap().is_empty());
    }
}
