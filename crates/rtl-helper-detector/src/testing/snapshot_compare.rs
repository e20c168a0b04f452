//! Snapshot comparison for styled subtrees.
//!
//! Walks two [`NodeSnapshot`] trees in lockstep and reports class, style,
//! attribute and text differences per element path.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use rtl_helper_dom::{NodeSnapshot, SnapshotChild};

/// Describes a change to a single element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeChange {
    /// Tag name changed
    TagChanged { expected: String, actual: String },
    /// Class present in actual only
    ClassAdded(String),
    /// Class present in expected only
    ClassRemoved(String),
    /// Inline style property differs (`None` when unset)
    StyleChanged {
        property: String,
        expected: Option<String>,
        actual: Option<String>,
    },
    /// Attribute differs (`None` when unset)
    AttributeChanged {
        name: String,
        expected: Option<String>,
        actual: Option<String>,
    },
    /// Direct text children differ
    TextChanged { expected: String, actual: String },
    /// Number of children differs; deeper comparison stops here
    ChildCountChanged { expected: usize, actual: usize },
}

/// Differences found at one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDiff {
    /// Path from the compared root, e.g. `div/ul[1]/li[0]`
    pub path: String,
    /// List of changes
    pub changes: Vec<NodeChange>,
}

/// Summary statistics for a snapshot diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Elements visited
    pub compared_count: usize,
    /// Elements with at least one change
    pub modified_count: usize,
}

/// Result of comparing two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    /// Elements that differ
    pub modified: Vec<NodeDiff>,
    /// Summary statistics
    pub stats: DiffStats,
}

impl SnapshotDiff {
    /// Check if snapshots are identical.
    pub fn is_match(&self) -> bool {
        self.modified.is_empty()
    }

    /// Get total number of changes.
    pub fn diff_count(&self) -> usize {
        self.modified.iter().map(|node| node.changes.len()).sum()
    }

    /// Changes recorded at `path`, if any.
    pub fn at(&self, path: &str) -> Option<&NodeDiff> {
        self.modified.iter().find(|node| node.path == path)
    }

    /// Generate a human-readable summary.
    pub fn summary(&self) -> String {
        if self.is_match() {
            return "Snapshots match".to_string();
        }

        let lines: Vec<String> = self
            .modified
            .iter()
            .map(|node| format!("{}: {} change(s)", node.path, node.changes.len()))
            .collect();
        format!(
            "Differences in {} of {} elements\n{}",
            self.stats.modified_count,
            self.stats.compared_count,
            lines.join("\n")
        )
    }
}

/// Compares styled snapshots.
#[derive(Debug, Clone, Default)]
pub struct SnapshotMatcher {
    ignored_styles: HashSet<String>,
    ignored_classes: HashSet<String>,
}

impl SnapshotMatcher {
    /// Create a matcher that compares everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip an inline style property.
    pub fn ignore_style(mut self, property: impl Into<String>) -> Self {
        self.ignored_styles.insert(property.into());
        self
    }

    /// Skip a class.
    pub fn ignore_class(mut self, class: impl Into<String>) -> Self {
        self.ignored_classes.insert(class.into());
        self
    }

    /// Compare two snapshots rooted at the same element.
    pub fn compare(&self, expected: &NodeSnapshot, actual: &NodeSnapshot) -> SnapshotDiff {
        let mut diff = SnapshotDiff::default();
        self.compare_node(expected.tag.clone(), expected, actual, &mut diff);
        diff.stats.modified_count = diff.modified.len();
        diff
    }

    fn compare_node(
        &self,
        path: String,
        expected: &NodeSnapshot,
        actual: &NodeSnapshot,
        diff: &mut SnapshotDiff,
    ) {
        diff.stats.compared_count += 1;
        let mut changes = Vec::new();

        if expected.tag != actual.tag {
            changes.push(NodeChange::TagChanged {
                expected: expected.tag.clone(),
                actual: actual.tag.clone(),
            });
        }
        self.compare_classes(expected, actual, &mut changes);
        self.compare_styles(&expected.style, &actual.style, &mut changes);
        compare_maps(&expected.attributes, &actual.attributes, &mut changes, |name, e, a| {
            NodeChange::AttributeChanged {
                name,
                expected: e,
                actual: a,
            }
        });

        let expected_text = direct_text(expected);
        let actual_text = direct_text(actual);
        if expected_text != actual_text {
            changes.push(NodeChange::TextChanged {
                expected: expected_text,
                actual: actual_text,
            });
        }

        let children_match = expected.children.len() == actual.children.len();
        if !children_match {
            changes.push(NodeChange::ChildCountChanged {
                expected: expected.children.len(),
                actual: actual.children.len(),
            });
        }

        if !changes.is_empty() {
            diff.modified.push(NodeDiff {
                path: path.clone(),
                changes,
            });
        }

        if children_match {
            for (index, pair) in expected.children.iter().zip(&actual.children).enumerate() {
                if let (SnapshotChild::Element(e), SnapshotChild::Element(a)) = pair {
                    self.compare_node(format!("{}/{}[{}]", path, e.tag, index), e, a, diff);
                }
            }
        }
    }

    fn compare_classes(
        &self,
        expected: &NodeSnapshot,
        actual: &NodeSnapshot,
        changes: &mut Vec<NodeChange>,
    ) {
        let keep = |class: &&String| !self.ignored_classes.contains(class.as_str());
        let expected: BTreeSet<&String> = expected.classes.iter().filter(keep).collect();
        let actual: BTreeSet<&String> = actual.classes.iter().filter(keep).collect();

        for class in actual.difference(&expected) {
            changes.push(NodeChange::ClassAdded((*class).clone()));
        }
        for class in expected.difference(&actual) {
            changes.push(NodeChange::ClassRemoved((*class).clone()));
        }
    }

    fn compare_styles(
        &self,
        expected: &BTreeMap<String, String>,
        actual: &BTreeMap<String, String>,
        changes: &mut Vec<NodeChange>,
    ) {
        let filter = |map: &BTreeMap<String, String>| -> BTreeMap<String, String> {
            map.iter()
                .filter(|(property, _)| !self.ignored_styles.contains(property.as_str()))
                .map(|(property, value)| (property.clone(), value.clone()))
                .collect()
        };
        compare_maps(&filter(expected), &filter(actual), changes, |property, e, a| {
            NodeChange::StyleChanged {
                property,
                expected: e,
                actual: a,
            }
        });
    }
}

fn compare_maps<F>(
    expected: &BTreeMap<String, String>,
    actual: &BTreeMap<String, String>,
    changes: &mut Vec<NodeChange>,
    make: F,
) where
    F: Fn(String, Option<String>, Option<String>) -> NodeChange,
{
    let keys: BTreeSet<&String> = expected.keys().chain(actual.keys()).collect();
    for key in keys {
        let e = expected.get(key);
        let a = actual.get(key);
        if e != a {
            changes.push(make(key.clone(), e.cloned(), a.cloned()));
        }
    }
}

fn direct_text(node: &NodeSnapshot) -> String {
    node.children
        .iter()
        .filter_map(|child| match child {
            SnapshotChild::Text(text) => Some(text.as_str()),
            SnapshotChild::Element(_) => None,
        })
        .collect()
}
