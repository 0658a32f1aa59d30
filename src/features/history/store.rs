//! Persisted per-day completion counts.
//!
//! Stored under [`HISTORY_KEY`] as a JSON object mapping ISO dates to counts:
//! `{"2024-03-13": 4, "2024-03-14": 2}`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use serde_json::{Map, Value};

use super::series::{self, DayEntry, WeekStart};
use crate::error::PomotallyError;
use crate::storage::{PersistentStore, HISTORY_KEY};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of recording one completion.
#[derive(Debug)]
pub struct Recorded {
    /// Date the completion was recorded for.
    pub date: NaiveDate,
    /// Count for that date after recording.
    pub count: u32,
    /// Set if the new count could not be persisted. The in-memory count has
    /// advanced regardless.
    pub persist_error: Option<PomotallyError>,
}

/// Durable record of completed work sessions per calendar day.
pub struct HistoryStore<S> {
    store: S,
    counts: BTreeMap<NaiveDate, u32>,
    /// The stored history could not be read at load time and has not been
    /// merged into `counts` yet.
    unmerged: bool,
}

impl<S: PersistentStore> HistoryStore<S> {
    /// Load history from `store`.
    ///
    /// Absent history is empty. Unreadable or malformed history also starts
    /// empty, with the failure returned alongside.
    ///
    /// If the store could not be read, the stored counts are merged in before
    /// the next write instead of being overwritten. Malformed history is
    /// replaced on the next write.
    pub fn load(store: S) -> (Self, Option<PomotallyError>) {
        let (counts, unmerged, warning) = match store.get(HISTORY_KEY) {
            Ok(None) => (BTreeMap::new(), false, None),
            Ok(Some(value)) => match parse_history(&value) {
                Ok(counts) => (counts, false, None),
                Err(e) => {
                    warn!("Starting with empty history: {e}");
                    (BTreeMap::new(), false, Some(e))
                }
            },
            Err(e) => {
                warn!("Starting with empty history: {e}");
                (BTreeMap::new(), true, Some(e))
            }
        };

        (
            Self {
                store,
                counts,
                unmerged,
            },
            warning,
        )
    }

    /// Add one completion for `date` and persist.
    pub fn record_completion(&mut self, date: NaiveDate) -> Recorded {
        let entry = self.counts.entry(date).or_insert(0);
        *entry = entry.saturating_add(1);

        let persist_error = self.persist().err();
        if let Some(e) = &persist_error {
            warn!("Completion for {date} kept in memory only: {e}");
        }
        let count = self.count_on(date);

        Recorded {
            date,
            count,
            persist_error,
        }
    }

    /// Completions recorded for `date`.
    #[must_use]
    pub fn count_on(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    /// Completions across all dates.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// The calendar week containing `reference`, relative to the current date.
    #[must_use]
    pub fn week_series(&self, reference: NaiveDate, week_start: WeekStart) -> Vec<DayEntry> {
        self.week_series_at(reference, week_start, series::today())
    }

    /// The calendar week containing `reference`, relative to `today`.
    #[must_use]
    pub fn week_series_at(
        &self,
        reference: NaiveDate,
        week_start: WeekStart,
        today: NaiveDate,
    ) -> Vec<DayEntry> {
        series::week_series(&self.counts, reference, week_start, today)
    }

    /// `days` days ending at `reference`, relative to the current date.
    #[must_use]
    pub fn trailing_series(&self, reference: NaiveDate, days: u32) -> Vec<DayEntry> {
        self.trailing_series_at(reference, days, series::today())
    }

    /// `days` days ending at `reference`, relative to `today`.
    #[must_use]
    pub fn trailing_series_at(
        &self,
        reference: NaiveDate,
        days: u32,
        today: NaiveDate,
    ) -> Vec<DayEntry> {
        series::trailing_series(&self.counts, reference, days, today)
    }

    fn persist(&mut self) -> Result<(), PomotallyError> {
        if self.unmerged {
            self.merge_stored()?;
        }

        let map: Map<String, Value> = self
            .counts
            .iter()
            .map(|(date, count)| (date.format(DATE_FORMAT).to_string(), Value::from(*count)))
            .collect();

        self.store.set(HISTORY_KEY, &Value::Object(map))
    }

    /// Add the stored counts to the ones recorded since load.
    fn merge_stored(&mut self) -> Result<(), PomotallyError> {
        let stored = match self.store.get(HISTORY_KEY) {
            Ok(None) => BTreeMap::new(),
            Ok(Some(value)) => parse_history(&value).unwrap_or_else(|e| {
                warn!("Replacing unreadable history: {e}");
                BTreeMap::new()
            }),
            Err(e) => {
                return Err(PomotallyError::Persistence(format!(
                    "stored history still unreadable, not overwriting it: {e}"
                )))
            }
        };

        for (date, count) in stored {
            let entry = self.counts.entry(date).or_insert(0);
            *entry = entry.saturating_add(count);
        }
        self.unmerged = false;
        Ok(())
    }
}

/// Parse the stored mapping. Entries with a bad date or count are skipped.
fn parse_history(value: &Value) -> Result<BTreeMap<NaiveDate, u32>, PomotallyError> {
    let Some(object) = value.as_object() else {
        return Err(PomotallyError::Persistence(
            "Malformed history: expected an object of date -> count".to_string(),
        ));
    };

    let mut counts = BTreeMap::new();
    for (key, raw) in object {
        let date = NaiveDate::parse_from_str(key, DATE_FORMAT);
        let count = raw.as_u64().and_then(|c| u32::try_from(c).ok());

        match (date, count) {
            (Ok(date), Some(count)) => {
                counts.insert(date, count);
            }
            _ => warn!("Skipping malformed history entry {key}: {raw}"),
        }
    }

    Ok(counts)
}
