//! The reprocessing engine.
//!
//! Per observed node the engine walks `Unseen -> Processed -> (Invalidated ->
//! Processed)*`. A node is only ever skipped while it is in the
//! [`ProcessedSet`]; any content change below it removes it from the set and
//! dispatches it again in the same call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rtl_helper_core::{selectors, ElementKind, HelperConfig, Result};
use rtl_helper_detector::{wrapper_code, wrapper_links, DispatchOutcome, Dispatcher};
use rtl_helper_dom::{Document, MutationRecord, NodeId, ObserverOptions, Selector, SelectorList};

use crate::processed::ProcessedSet;

/// Unique identifier for an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(Uuid);

impl EngineId {
    /// Create a new random engine ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EngineId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counters for one scan or batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Candidate nodes considered
    pub matched: usize,
    /// Nodes styled
    pub dispatched: usize,
    /// Nodes skipped because they were already processed
    pub skipped: usize,
    /// Nodes whose styling failed
    pub failed: usize,
    /// Stale processed entries dropped
    pub pruned: usize,
}

impl ScanReport {
    /// Add the counters of `other`.
    pub fn merge(&mut self, other: ScanReport) {
        self.matched += other.matched;
        self.dispatched += other.dispatched;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.pruned += other.pruned;
    }

    /// Whether nothing was considered or pruned.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for ScanReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} matched, {} styled, {} skipped, {} failed, {} pruned",
            self.matched, self.dispatched, self.skipped, self.failed, self.pruned
        )
    }
}

/// Keeps a document's recognized nodes styled as it changes.
pub struct Engine {
    id: EngineId,
    dispatcher: Dispatcher,
    processed: ProcessedSet,
    focus_targets: SelectorList,
}

impl Engine {
    /// Build an engine from `config`.
    pub fn new(config: &HelperConfig) -> Result<Self> {
        let focus_targets = SelectorList::new(vec![
            Selector::test_id(selectors::LIST_NAME_ID),
            Selector::class(selectors::BOARD_TILE_CLASS),
            wrapper_code(),
            wrapper_links(),
        ]);

        Ok(Self {
            id: EngineId::new(),
            dispatcher: Dispatcher::new(config)?,
            processed: ProcessedSet::new(),
            focus_targets,
        })
    }

    /// Observer registration the engine expects from its host document.
    pub fn observer_options() -> ObserverOptions {
        ObserverOptions::all().with_attribute_filter([selectors::TEST_ID_ATTR, "class"])
    }

    /// Engine identifier.
    pub fn id(&self) -> EngineId {
        self.id
    }

    /// Nodes currently processed.
    pub fn processed(&self) -> &ProcessedSet {
        &self.processed
    }

    /// Dispatcher in use.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run the initial scan, then start observing `doc`.
    pub fn attach(&mut self, doc: &mut Document) -> Result<ScanReport> {
        let report = self.scan_all(doc)?;
        doc.observe(Self::observer_options());
        tracing::info!("Engine {} attached: {}", self.id, report);
        Ok(report)
    }

    /// Stop observing `doc`. Styling already applied stays.
    pub fn detach(&self, doc: &mut Document) {
        doc.disconnect();
        tracing::debug!("Engine {} detached", self.id);
    }

    /// Style every recognized node not already processed.
    pub fn scan_all(&mut self, doc: &mut Document) -> Result<ScanReport> {
        let mut report = ScanReport {
            pruned: self.processed.prune(doc),
            ..ScanReport::default()
        };

        let candidates = self
            .dispatcher
            .classifier()
            .recognized_within(doc, doc.body())?;
        for node in candidates {
            self.process(doc, node, &mut report);
        }

        tracing::info!("Scanned document: {}", report);
        Ok(report)
    }

    /// Forget all processed nodes, then scan again.
    pub fn reprocess_all(&mut self, doc: &mut Document) -> Result<ScanReport> {
        self.processed.clear();
        let report = self.scan_all(doc)?;
        tracing::info!("Reprocessed all elements");
        Ok(report)
    }

    /// Handle newly attached nodes: each node itself and every recognized
    /// node below it.
    pub fn on_nodes_added(&mut self, doc: &mut Document, nodes: &[NodeId]) -> ScanReport {
        let mut report = ScanReport::default();
        for &node in nodes {
            if let Err(e) = self.scan_added(doc, node, &mut report) {
                tracing::warn!("Failed to scan added node {}: {}", node, e);
                report.failed += 1;
            }
        }
        report
    }

    fn scan_added(&mut self, doc: &mut Document, node: NodeId, report: &mut ScanReport) -> Result<()> {
        if !doc.node(node)?.is_element() {
            return Ok(());
        }
        let classifier = self.dispatcher.classifier();
        let mut candidates = Vec::new();
        if classifier.is_recognized(doc, node)? {
            candidates.push(node);
        }
        candidates.extend(classifier.recognized_within(doc, node)?);

        for candidate in candidates {
            self.process(doc, candidate, report);
        }
        Ok(())
    }

    /// Handle a content change at `target` (an element or a text node).
    ///
    /// The nearest recognized inclusive ancestor is invalidated and styled
    /// again.
    pub fn on_content_changed(&mut self, doc: &mut Document, target: NodeId) -> ScanReport {
        let mut report = ScanReport::default();
        match self.dispatcher.classifier().closest_recognized(doc, target) {
            Ok(Some(owner)) => {
                self.processed.remove(owner);
                self.process(doc, owner, &mut report);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Failed to resolve content change at {}: {}", target, e);
                report.failed += 1;
            }
        }
        report
    }

    /// Handle a `class` or test identifier change at `target`.
    ///
    /// Only a change of recognized kind causes work; marker toggles written
    /// by the engine itself leave the kind unchanged and are skipped.
    pub fn on_attribute_changed(&mut self, doc: &mut Document, target: NodeId) -> ScanReport {
        let mut report = ScanReport::default();
        let kind = match self.recognized_kind(doc, target) {
            Ok(kind) => kind,
            Err(e) => {
                tracing::warn!("Failed to reclassify {}: {}", target, e);
                report.failed += 1;
                return report;
            }
        };

        match (self.processed.kind_of(target), kind.is_recognized()) {
            (Some(previous), true) if previous == kind => {}
            (Some(previous), true) => {
                tracing::debug!("Node {} changed kind from {} to {}", target, previous, kind);
                self.processed.remove(target);
                self.process(doc, target, &mut report);
            }
            (Some(_), false) => {
                self.processed.remove(target);
            }
            (None, true) => self.process(doc, target, &mut report),
            (None, false) => {}
        }
        report
    }

    fn recognized_kind(&self, doc: &Document, node: NodeId) -> Result<ElementKind> {
        if !self.dispatcher.classifier().is_recognized(doc, node)? {
            return Ok(ElementKind::None);
        }
        self.dispatcher.classify(doc, node)
    }

    /// Handle one delivery batch: additions first, then content and
    /// attribute changes.
    pub fn handle_batch(&mut self, doc: &mut Document, records: &[MutationRecord]) -> ScanReport {
        let mut report = ScanReport::default();

        for record in records {
            let added = record.added_nodes();
            if !added.is_empty() {
                report.merge(self.on_nodes_added(doc, added));
            }
        }

        for record in records {
            let changed = match record {
                MutationRecord::ChildList { target, .. }
                | MutationRecord::CharacterData { target } => self.on_content_changed(doc, *target),
                MutationRecord::Attributes { target, .. } => self.on_attribute_changed(doc, *target),
            };
            report.merge(changed);
        }

        if report.dispatched > 0 || report.failed > 0 {
            tracing::info!("Changes detected, reprocessed: {}", report);
        }
        report
    }

    /// Drain the records queued on `doc` and handle them as one batch.
    pub fn process_pending(&mut self, doc: &mut Document) -> ScanReport {
        let records = doc.take_records();
        if records.is_empty() {
            return ScanReport::default();
        }
        tracing::debug!("Delivering {} mutation records", records.len());
        self.handle_batch(doc, &records)
    }

    /// Restyle list titles, board tile titles and the code blocks and links
    /// of wrapper blocks, whether processed or not.
    pub fn refresh_targets(&mut self, doc: &mut Document) -> Result<ScanReport> {
        let mut report = ScanReport::default();
        for node in doc.select(&self.focus_targets)? {
            report.matched += 1;
            match self.dispatcher.dispatch_isolated(doc, node) {
                DispatchOutcome::Styled { .. } => report.dispatched += 1,
                DispatchOutcome::Failed(_) => report.failed += 1,
                DispatchOutcome::Unrecognized => {}
            }
        }
        tracing::info!("Refreshed focus targets: {}", report);
        Ok(report)
    }

    fn process(&mut self, doc: &mut Document, node: NodeId, report: &mut ScanReport) {
        report.matched += 1;
        if self.processed.contains(node) {
            report.skipped += 1;
            return;
        }
        match self.dispatcher.dispatch_isolated(doc, node) {
            DispatchOutcome::Styled { kind, .. } => {
                self.processed.insert(node, kind);
                report.dispatched += 1;
            }
            DispatchOutcome::Unrecognized => {}
            DispatchOutcome::Failed(_) => report.failed += 1,
        }
    }
}
