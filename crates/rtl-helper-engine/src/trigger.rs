//! External re-triggers and their debouncing.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use rtl_helper_core::TimingSettings;

/// Host events that ask for styling to be re-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Retrigger {
    /// Viewport resized: full reprocess
    Resize,
    /// Window focused: refresh titles, code blocks and links
    Focus,
    /// In-app navigation: re-initialize
    Navigation,
    /// Explicit user request: reprocess, creating the engine if needed
    Manual,
}

impl Retrigger {
    /// Delay between the event and the work it triggers.
    pub fn delay(&self, timing: &TimingSettings) -> Duration {
        match self {
            Retrigger::Resize => timing.resize_debounce(),
            Retrigger::Focus => timing.focus_debounce(),
            Retrigger::Navigation => timing.navigation_debounce(),
            Retrigger::Manual => Duration::ZERO,
        }
    }
}

impl fmt::Display for Retrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Retrigger::Resize => "resize",
            Retrigger::Focus => "focus",
            Retrigger::Navigation => "navigation",
            Retrigger::Manual => "manual",
        };
        f.write_str(name)
    }
}

/// Coalesces re-triggers per kind.
///
/// A trigger fires once its delay has elapsed. Requests for a kind that is
/// already pending are folded into the pending one and keep its deadline, so
/// a continuous stream of resize events still fires.
#[derive(Debug, Clone)]
pub struct Debouncer {
    timing: TimingSettings,
    pending: HashMap<Retrigger, Instant>,
}

impl Debouncer {
    /// Create a debouncer with the given delays.
    pub fn new(timing: TimingSettings) -> Self {
        Self {
            timing,
            pending: HashMap::new(),
        }
    }

    /// Request `trigger` at `now`. Returns `false` if it was folded into a
    /// pending request.
    pub fn schedule(&mut self, trigger: Retrigger, now: Instant) -> bool {
        if self.pending.contains_key(&trigger) {
            tracing::trace!("Coalesced {} re-trigger", trigger);
            return false;
        }
        self.pending.insert(trigger, now + trigger.delay(&self.timing));
        true
    }

    /// Remove and return every trigger due at `now`, earliest first.
    pub fn due(&mut self, now: Instant) -> Vec<Retrigger> {
        let mut ready: Vec<(Instant, Retrigger)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(trigger, deadline)| (*deadline, *trigger))
            .collect();
        ready.sort_by_key(|(deadline, _)| *deadline);

        for (_, trigger) in &ready {
            self.pending.remove(trigger);
        }
        ready.into_iter().map(|(_, trigger)| trigger).collect()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().min().copied()
    }

    /// Whether nothing is pending.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending trigger.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

/// Detects in-app navigation by watching the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTracker {
    current: String,
}

impl NavigationTracker {
    /// Start tracking at `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            current: location.into(),
        }
    }

    /// Location last seen.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Record `location`; `true` when it differs from the last one.
    pub fn observe(&mut self, location: &str) -> bool {
        if location == self.current {
            return false;
        }
        tracing::info!("Location changed to {}, scheduling re-initialization", location);
        self.current = location.to_string();
        true
    }
}
