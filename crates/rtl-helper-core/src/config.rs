//! Configuration types for RTL Helper.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::Error;

/// Helper configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HelperConfig {
    /// Direction detection settings
    pub detection: DetectionSettings,
    /// Presentation settings
    pub presentation: PresentationSettings,
    /// Re-trigger and retry timings
    pub timing: TimingSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl HelperConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: HelperConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        let threshold = self.detection.rtl_threshold;
        if !(0.0..1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "detection.rtl_threshold must be in [0, 1), got {threshold}"
            )));
        }

        if self.presentation.code_font_stack.trim().is_empty() {
            return Err(Error::Config(
                "presentation.code_font_stack cannot be empty".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Direction detection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectionSettings {
    /// Share of strong characters that must be RTL for an RTL verdict (exclusive)
    pub rtl_threshold: f64,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            rtl_threshold: 0.25,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresentationSettings {
    /// Horizontal indent of lists inside wrapper blocks, in pixels
    pub list_indent_px: u32,
    /// Font stack forced onto code blocks
    pub code_font_stack: String,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            list_indent_px: 24,
            code_font_stack: "\"Monaco\", \"Menlo\", \"Ubuntu Mono\", monospace".to_string(),
        }
    }
}

/// Re-trigger and retry timings, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingSettings {
    /// Delay before reprocessing after a viewport resize
    pub resize_debounce_ms: u64,
    /// Delay before the targeted refresh after window focus
    pub focus_debounce_ms: u64,
    /// Delay before re-initializing after in-app navigation
    pub navigation_debounce_ms: u64,
    /// Delay before the single initialization retry
    pub init_retry_delay_ms: u64,
}

impl TimingSettings {
    /// Resize debounce as a duration.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Focus debounce as a duration.
    pub fn focus_debounce(&self) -> Duration {
        Duration::from_millis(self.focus_debounce_ms)
    }

    /// Navigation debounce as a duration.
    pub fn navigation_debounce(&self) -> Duration {
        Duration::from_millis(self.navigation_debounce_ms)
    }

    /// Initialization retry delay as a duration.
    pub fn init_retry_delay(&self) -> Duration {
        Duration::from_millis(self.init_retry_delay_ms)
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 300,
            focus_debounce_ms: 500,
            navigation_debounce_ms: 1000,
            init_retry_delay_ms: 1000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
