//! Text direction classification.
//!
//! A sample is RTL when RTL-script characters make up more than a threshold
//! share (25% by default) of its strong characters. Mixed prose such as an
//! Arabic sentence quoting a Latin product name stays RTL even when the Latin
//! run is locally long; a plain majority vote gets those wrong.

use rtl_helper_core::{DetectionSettings, Direction};

/// Whether `c` belongs to an RTL script block (Hebrew, Arabic and their
/// supplements and presentation forms).
pub fn is_rtl_char(c: char) -> bool {
    matches!(
        c,
        '\u{0590}'..='\u{05FF}'
            | '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}

/// Whether `c` is a strong LTR character (ASCII letter or digit).
pub fn is_ltr_strong_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Collapse whitespace runs to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strong character counts of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrongCounts {
    /// RTL-script characters
    pub rtl: usize,
    /// ASCII letters and digits
    pub ltr: usize,
}

impl StrongCounts {
    /// Count the strong characters of `text`.
    pub fn of(text: &str) -> Self {
        text.chars().fold(Self::default(), |mut counts, c| {
            if is_rtl_char(c) {
                counts.rtl += 1;
            } else if is_ltr_strong_char(c) {
                counts.ltr += 1;
            }
            counts
        })
    }

    /// Total strong characters.
    pub fn total(&self) -> usize {
        self.rtl + self.ltr
    }

    /// Share of RTL among strong characters, `None` when there are none.
    pub fn rtl_ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.rtl as f64 / total as f64),
        }
    }
}

/// Maps text samples to direction verdicts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionClassifier {
    threshold: f64,
}

impl DirectionClassifier {
    /// Default RTL share threshold (exclusive).
    pub const DEFAULT_THRESHOLD: f64 = 0.25;

    /// Create a classifier with the default threshold.
    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_THRESHOLD)
    }

    /// Create a classifier with a custom threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Create a classifier from configuration.
    pub fn from_settings(settings: &DetectionSettings) -> Self {
        Self::with_threshold(settings.rtl_threshold)
    }

    /// Configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify a text sample. Never fails; letterless text is LTR.
    ///
    /// # Example
    /// ```
    /// use rtl_helper_core::Direction;
    /// use rtl_helper_detector::DirectionClassifier;
    ///
    /// let classifier = DirectionClassifier::new();
    /// assert_eq!(classifier.classify("Hello مرحبا"), Direction::Rtl);
    /// assert_eq!(classifier.classify("  ...  "), Direction::Ltr);
    /// ```
    pub fn classify(&self, text: &str) -> Direction {
        let sample = normalize_whitespace(text);
        match StrongCounts::of(&sample).rtl_ratio() {
            Some(ratio) if ratio > self.threshold => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }
}

impl Default for DirectionClassifier {
    fn default() -> Self {
        Self::new()
    }
}
