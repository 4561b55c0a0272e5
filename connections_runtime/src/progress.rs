//! Daily progress — one stored outcome per calendar day.
//!
//! Written once, when a daily game first reaches a terminal state. A stored
//! outcome makes that day's puzzle unplayable: reloading rebuilds the
//! finished game instead.

use serde::{Deserialize, Serialize};

use connections_kernel::domain::{PuzzleGroup, Status};

use crate::error::StoreError;
use crate::store::{daily_key, load_json, save_json, KeyValueStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOutcome {
    pub day: String,
    pub status: Status,
    pub found: Vec<PuzzleGroup>,
    pub guesses: Vec<Vec<String>>,
    /// Fingerprint of the puzzle this outcome was played on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Stored outcome for `day`, or None if absent or unreadable.
pub fn load(store: &dyn KeyValueStore, day: &str) -> Option<DailyOutcome> {
    load_json(store, &daily_key(day))
}

/// Write the outcome for `day`, replacing any previous one.
pub fn save(
    store: &mut dyn KeyValueStore,
    day: &str,
    outcome: &DailyOutcome,
) -> Result<(), StoreError> {
    save_json(store, &daily_key(day), outcome)?;
    log::info!("[PROGRESS] saved day:{} status:{}", day, outcome.status.as_str());
    Ok(())
}
