//! Command-line interface for pomotally.

pub mod args;
pub mod commands;
