//! Application configuration for pomotally.
//!
//! Settings are loaded from `~/.pomotally/config.yaml`. These are host-level
//! preferences; the timer durations live in the persistent store (see
//! [`crate::features::focus::Settings`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::PomotallyError;
use crate::features::history::{ChartView, WeekStart, MAX_TRAILING_DAYS};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Timer loop settings.
    pub timer: TimerConfig,
    /// History chart settings.
    pub history: HistoryConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to `colored`'s global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Timer loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Start the next session automatically after a transition.
    #[serde(default)]
    pub auto_start_next: bool,
    /// Tick period in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// History chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// First day of the calendar week.
    #[serde(default)]
    pub week_start: WeekStart,
    /// Which series the chart shows by default.
    #[serde(default)]
    pub view: ChartView,
    /// Length of the trailing series.
    #[serde(default = "default_trailing_days")]
    pub trailing_days: u32,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_trailing_days() -> u32 {
    7
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            auto_start_next: false,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            view: ChartView::default(),
            trailing_days: default_trailing_days(),
        }
    }
}

impl Config {
    /// Load configuration from the config file under `paths`.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load(paths: &Paths) -> Result<Self, PomotallyError> {
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or if
    /// a value is out of range.
    pub fn load_from_path(path: &Path) -> Result<Self, PomotallyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomotallyError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            PomotallyError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PomotallyError> {
        if self.timer.tick_interval_ms == 0 {
            return Err(PomotallyError::Config(
                "timer.tick_interval_ms must be positive".to_string(),
            ));
        }
        if !(1..=MAX_TRAILING_DAYS).contains(&self.history.trailing_days) {
            return Err(PomotallyError::Config(format!(
                "history.trailing_days must be between 1 and {MAX_TRAILING_DAYS}"
            )));
        }
        Ok(())
    }
}
