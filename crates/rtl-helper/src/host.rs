//! Host loop: applies script steps, delivers mutation batches and fires
//! debounced re-triggers.
//!
//! Each edit step is followed by delivery of the records it queued, which
//! stands in for the browser invoking the observer callback between tasks.

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use rtl_helper_core::{Error, HelperConfig, Result};
use rtl_helper_dom::{Document, NodeId, NodeSnapshot};
use rtl_helper_engine::{handle, Debouncer, NavigationTracker, Retrigger, ScanReport};

use crate::script::{Script, ScriptStep};

const MAX_DELIVERY_ROUNDS: usize = 4;

/// Totals over a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Steps applied
    pub steps: usize,
    /// Mutation batches delivered
    pub batches: usize,
    /// Re-triggers fired
    pub retriggers: usize,
    /// Combined scan counters
    pub report: ScanReport,
}

/// Owns the document and drives the process-wide engine over it.
pub struct Host {
    doc: Document,
    config: HelperConfig,
    debouncer: Debouncer,
    navigation: NavigationTracker,
    summary: RunSummary,
}

impl Host {
    /// Create a host for `doc` loaded at `location`.
    pub fn new(doc: Document, config: HelperConfig, location: impl Into<String>) -> Self {
        let debouncer = Debouncer::new(config.timing.clone());
        Self {
            doc,
            config,
            debouncer,
            navigation: NavigationTracker::new(location),
            summary: RunSummary::default(),
        }
    }

    /// The hosted document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Totals so far.
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Initialize the engine over the document.
    pub async fn start(&mut self) -> Result<ScanReport> {
        let report = handle::initialize(&mut self.doc, &self.config).await?;
        self.summary.report.merge(report);
        Ok(report)
    }

    /// Run every step of `script`, then wait for pending re-triggers.
    pub async fn run(&mut self, script: &Script) -> Result<()> {
        for step in &script.steps {
            self.apply(step).await?;
        }
        self.settle().await;
        Ok(())
    }

    /// Apply one step.
    pub async fn apply(&mut self, step: &ScriptStep) -> Result<()> {
        tracing::debug!("Applying step {:?}", step);
        match step {
            ScriptStep::SetText { target, text } => {
                let node = self.resolve(target)?;
                self.doc.set_text_content(node, text)?;
            }
            ScriptStep::Append { parent, node } => {
                let parent = self.resolve(parent)?;
                self.doc.append_spec(parent, node)?;
            }
            ScriptStep::SetAttribute {
                target,
                name,
                value,
            } => {
                let node = self.resolve(target)?;
                self.doc.set_attribute(node, name, value)?;
            }
            ScriptStep::RemoveAttribute { target, name } => {
                let node = self.resolve(target)?;
                self.doc.remove_attribute(node, name)?;
            }
            ScriptStep::AddClass { target, class } => {
                let node = self.resolve(target)?;
                self.doc.add_class(node, class)?;
            }
            ScriptStep::Remove { target } => {
                let node = self.resolve(target)?;
                self.doc.destroy(node)?;
            }
            ScriptStep::Resize => self.request(Retrigger::Resize),
            ScriptStep::Focus => self.request(Retrigger::Focus),
            ScriptStep::Navigate { url } => {
                if self.navigation.observe(url) {
                    self.request(Retrigger::Navigation);
                }
            }
            ScriptStep::Reprocess => self.request(Retrigger::Manual),
            ScriptStep::Wait { ms } => {
                tokio::time::sleep(std::time::Duration::from_millis(*ms)).await;
            }
        }

        self.summary.steps += 1;
        self.deliver();
        self.fire_due().await;
        Ok(())
    }

    /// Wait until every pending re-trigger has fired.
    pub async fn settle(&mut self) {
        while let Some(deadline) = self.debouncer.next_deadline() {
            tokio::time::sleep_until(Instant::from_std(deadline)).await;
            self.fire_due().await;
        }
    }

    /// Snapshot of the body subtree.
    pub fn snapshot(&self) -> Result<NodeSnapshot> {
        self.doc.snapshot(self.doc.body())
    }

    /// Tear the engine down and hand back the document.
    pub fn finish(mut self) -> (Document, RunSummary) {
        handle::teardown(&mut self.doc);
        (self.doc, self.summary)
    }

    fn resolve(&self, target: &str) -> Result<NodeId> {
        if target == "body" {
            return Ok(self.doc.body());
        }
        self.doc
            .get_element_by_id(target)
            .ok_or_else(|| Error::NodeNotFound(format!("#{}", target)))
    }

    fn request(&mut self, trigger: Retrigger) {
        self.debouncer.schedule(trigger, Instant::now().into_std());
    }

    /// Deliver queued records until the engine's own writes settle.
    fn deliver(&mut self) {
        for _ in 0..MAX_DELIVERY_ROUNDS {
            if !self.doc.has_pending_records() {
                return;
            }
            let Some(report) = handle::process_pending(&mut self.doc) else {
                return;
            };
            if !report.is_empty() {
                self.summary.batches += 1;
                self.summary.report.merge(report);
            }
        }
        if self.doc.has_pending_records() {
            tracing::warn!("Mutation records still pending after {} rounds", MAX_DELIVERY_ROUNDS);
        }
    }

    async fn fire_due(&mut self) {
        for trigger in self.debouncer.due(Instant::now().into_std()) {
            if let Some(report) = handle::fire(trigger, &mut self.doc, &self.config).await {
                self.summary.retriggers += 1;
                self.summary.report.merge(report);
            }
            self.deliver();
        }
    }
}
