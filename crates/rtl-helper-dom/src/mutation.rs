//! Mutation records and observer options.

use crate::node::NodeId;

/// Category of a mutation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Children added or removed
    ChildList,
    /// Text node data changed
    CharacterData,
    /// Attribute changed
    Attributes,
}

/// One observed change to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// Children of `target` changed.
    ChildList {
        /// Parent whose child list changed
        target: NodeId,
        /// Nodes inserted under `target`
        added: Vec<NodeId>,
        /// Nodes removed from `target`
        removed: Vec<NodeId>,
    },
    /// Data of the text node `target` changed.
    CharacterData {
        /// The text node
        target: NodeId,
    },
    /// Attribute `name` of `target` changed.
    Attributes {
        /// The element
        target: NodeId,
        /// Attribute name
        name: String,
    },
}

impl MutationRecord {
    /// Node the record is about.
    pub fn target(&self) -> NodeId {
        match self {
            MutationRecord::ChildList { target, .. } => *target,
            MutationRecord::CharacterData { target } => *target,
            MutationRecord::Attributes { target, .. } => *target,
        }
    }

    /// Record category.
    pub fn kind(&self) -> MutationKind {
        match self {
            MutationRecord::ChildList { .. } => MutationKind::ChildList,
            MutationRecord::CharacterData { .. } => MutationKind::CharacterData,
            MutationRecord::Attributes { .. } => MutationKind::Attributes,
        }
    }

    /// Nodes added by this record.
    pub fn added_nodes(&self) -> &[NodeId] {
        match self {
            MutationRecord::ChildList { added, .. } => added,
            _ => &[],
        }
    }
}

/// Which mutations an observer wants delivered.
///
/// Observation always covers the whole body subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObserverOptions {
    /// Deliver child list changes
    pub child_list: bool,
    /// Deliver text data changes
    pub character_data: bool,
    /// Deliver attribute changes
    pub attributes: bool,
    /// Restrict attribute changes to these names
    pub attribute_filter: Option<Vec<String>>,
}

impl ObserverOptions {
    /// Observe every category and attribute.
    pub fn all() -> Self {
        Self {
            child_list: true,
            character_data: true,
            attributes: true,
            attribute_filter: None,
        }
    }

    /// Restrict attribute observation to `names`.
    pub fn with_attribute_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = true;
        self.attribute_filter = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Whether a record of `kind` (and attribute `name`) is delivered.
    pub fn accepts(&self, kind: MutationKind, name: Option<&str>) -> bool {
        match kind {
            MutationKind::ChildList => self.child_list,
            MutationKind::CharacterData => self.character_data,
            MutationKind::Attributes => {
                if !self.attributes {
                    return false;
                }
                match (&self.attribute_filter, name) {
                    (None, _) => true,
                    (Some(filter), Some(name)) => filter.iter().any(|n| n == name),
                    (Some(_), None) => false,
                }
            }
        }
    }
}
