//! Configuration management for pomotally.
//!
//! This module handles loading and saving configuration from `~/.pomotally/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, HistoryConfig, TimerConfig};
