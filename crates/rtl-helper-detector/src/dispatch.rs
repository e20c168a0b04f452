//! Per-node classification and styling.

use rtl_helper_core::{Direction, ElementKind, HelperConfig, Result};
use rtl_helper_dom::{Document, NodeId};

use crate::direction::DirectionClassifier;
use crate::kind::ElementClassifier;
use crate::link::LinkClassifier;
use crate::policy::PresentationPolicy;

/// What happened when a node was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The node was recognized and styled
    Styled {
        /// Kind the node was classified as
        kind: ElementKind,
        /// Direction that was applied
        direction: Direction,
    },
    /// No recognized kind; nothing was written
    Unrecognized,
    /// Styling failed; the message is the underlying error
    Failed(String),
}

impl DispatchOutcome {
    /// Whether the node was styled.
    pub fn is_styled(&self) -> bool {
        matches!(self, Self::Styled { .. })
    }

    /// Kind of a styled node.
    pub fn kind(&self) -> Option<ElementKind> {
        match self {
            Self::Styled { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Classifies one node and applies the matching presentation rule.
pub struct Dispatcher {
    classifier: ElementClassifier,
    direction: DirectionClassifier,
    links: LinkClassifier,
    policy: PresentationPolicy,
}

impl Dispatcher {
    /// Build a dispatcher with the standard matchers from `config`.
    pub fn new(config: &HelperConfig) -> Result<Self> {
        config.validate()?;
        let direction = DirectionClassifier::from_settings(&config.detection);
        Ok(Self {
            classifier: ElementClassifier::standard(),
            direction,
            links: LinkClassifier::new(),
            policy: PresentationPolicy::new(&config.presentation, direction),
        })
    }

    /// Element classifier in use.
    pub fn classifier(&self) -> &ElementClassifier {
        &self.classifier
    }

    /// Direction classifier in use.
    pub fn direction(&self) -> &DirectionClassifier {
        &self.direction
    }

    /// Presentation policy in use.
    pub fn policy(&self) -> &PresentationPolicy {
        &self.policy
    }

    /// Kind of `node` without touching it.
    pub fn classify(&self, doc: &Document, node: NodeId) -> Result<ElementKind> {
        self.classifier.classify(doc, node)
    }

    /// Direction verdict for a node of `kind`.
    ///
    /// Code blocks and self-referential links are LTR regardless of content.
    pub fn verdict(&self, doc: &Document, node: NodeId, kind: ElementKind) -> Result<Direction> {
        if kind == ElementKind::CodeBlock {
            return Ok(Direction::Ltr);
        }
        if kind == ElementKind::Link && self.links.is_self_referential(doc, node)? {
            return Ok(Direction::Ltr);
        }
        let text = doc.text_content(node)?;
        Ok(self.direction.classify(text.trim()))
    }

    /// Classify and style `node`, including code blocks and links nested in
    /// wrapper blocks. Errors propagate.
    pub fn dispatch(&self, doc: &mut Document, node: NodeId) -> Result<DispatchOutcome> {
        let kind = self.classify(doc, node)?;
        if kind == ElementKind::None {
            return Ok(DispatchOutcome::Unrecognized);
        }

        let direction = self.verdict(doc, node, kind)?;
        self.policy.apply(doc, node, kind, direction)?;

        tracing::debug!("Styled {} {} as {}", kind, node, direction);
        Ok(DispatchOutcome::Styled { kind, direction })
    }

    /// Like [`dispatch`](Self::dispatch), but a failure is logged and
    /// reported as [`DispatchOutcome::Failed`] instead of propagating.
    pub fn dispatch_isolated(&self, doc: &mut Document, node: NodeId) -> DispatchOutcome {
        match self.dispatch(doc, node) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Failed to style node {}: {}", node, e);
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }
}
