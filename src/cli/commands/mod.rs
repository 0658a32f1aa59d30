//! Command implementations for pomotally.
//!
//! Each command returns the text to print.

mod history;
mod settings;

use std::rc::Rc;

pub use history::history;
pub use settings::settings;

use crate::config::Paths;
use crate::error::PomotallyError;
use crate::features::widget::SharedStore;
use crate::storage::{Database, SqliteStore};

/// Open the `SQLite` store under `paths`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub fn open_store(paths: &Paths) -> Result<SharedStore, PomotallyError> {
    let db = Database::open(paths)?;
    Ok(Rc::new(SqliteStore::new(db)))
}
