use crate::error::{CoreError, Result};
use crate::variant::VariantSetting;
use const_format::concatcp;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Default delay between the end of one poll tick and the start of the next.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default vertical click offset on the volume slider.
pub const DEFAULT_VOLUME_CLICK_Y: f64 = 0.5;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_poll_interval")]
    pub interval_ms: u64,
    #[serde(default)]
    pub on_tick_error: TickErrorPolicy,
}

const fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval(),
            on_tick_error: TickErrorPolicy::default(),
        }
    }
}

impl PollingConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// What the poll loop does when publishing a snapshot fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickErrorPolicy {
    /// Log the failure and keep polling.
    #[default]
    Continue,
    /// Stop polling and return the error.
    Stop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub variant: VariantSetting,
    /// Vertical fraction of the slider box used for volume clicks.
    #[serde(default = "default_volume_click_y")]
    pub volume_click_y: f64,
}

const fn default_volume_click_y() -> f64 {
    DEFAULT_VOLUME_CLICK_Y
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            variant: VariantSetting::default(),
            volume_click_y: default_volume_click_y(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML config.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`, falling back to defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or validated.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigInvalid`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.polling.interval_ms == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "polling.interval_ms must be greater than 0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.page.volume_click_y) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "page.volume_click_y must be between 0.0 and 1.0, got {}",
                    self.page.volume_click_y
                ),
            });
        }
        Ok(())
    }
}

pub const CONFIG_TEMPLATE: &str = concatcp!(
    r#"# Tunerlink Configuration

[polling]
# Delay between the end of one tick and the start of the next
interval_ms = "#,
    DEFAULT_POLL_INTERVAL_MS,
    r#"
# What to do when publishing a tick fails: "continue" or "stop"
on_tick_error = "continue"

[page]
# Layout to resolve controls against: "auto", "now_playing", "tuner"
variant = "auto"
# Vertical click offset on the volume slider (0.0 - 1.0)
volume_click_y = 0.5
"#
);
