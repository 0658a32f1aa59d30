//! Feature implementations for pomotally.
//!
//! - Focus: the session engine and its settings
//! - History: per-day completion counts and chart series
//! - Widget: the two wired together behind one persistent store

pub mod focus;
pub mod history;
pub mod widget;
