//! Versioned save/load of the tournament document.

use crate::models::Tournament;
use crate::storage::{KeyValueStore, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The one key the tournament document lives under.
pub const STORAGE_KEY: &str = "pickleball_tournament";

/// Version 1 is the bare tournament object without an envelope, from before match formats and
/// tie-break settings existed. Version 2 wraps it in [`SavedTournament`].
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Envelope written by [`save_tournament`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedTournament {
    pub schema_version: u32,
    pub saved_at: DateTime<Utc>,
    pub tournament: Tournament,
}

/// What [`load_tournament`] found under [`STORAGE_KEY`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// Nothing saved yet.
    Empty,
    Loaded(SavedTournament),
    /// An older shape, upgraded in memory. Saving writes the current version.
    Migrated { from: u32, tournament: Tournament },
    /// Unreadable or from a newer version; the caller starts over from defaults.
    Reset { reason: String },
}

impl LoadOutcome {
    /// The loaded tournament, if any.
    pub fn into_tournament(self) -> Option<Tournament> {
        match self {
            LoadOutcome::Loaded(saved) => Some(saved.tournament),
            LoadOutcome::Migrated { tournament, .. } => Some(tournament),
            LoadOutcome::Empty | LoadOutcome::Reset { .. } => None,
        }
    }
}

/// Serialize the whole document under [`STORAGE_KEY`].
pub fn save_tournament<S: KeyValueStore + ?Sized>(
    store: &mut S,
    tournament: &Tournament,
) -> Result<(), StorageError> {
    let saved = SavedTournament {
        schema_version: CURRENT_SCHEMA_VERSION,
        saved_at: Utc::now(),
        tournament: tournament.clone(),
    };
    let json = serde_json::to_string(&saved)?;
    store.put(STORAGE_KEY, &json)?;
    log::debug!("Saved tournament {} ({} bytes)", tournament.id, json.len());
    Ok(())
}

/// Read the document, migrating version 1 and resetting on anything unreadable.
///
/// Only store failures are errors; a bad document is reported as [`LoadOutcome::Reset`].
pub fn load_tournament<S: KeyValueStore + ?Sized>(store: &S) -> Result<LoadOutcome, StorageError> {
    let Some(json) = store.get(STORAGE_KEY)? else {
        return Ok(LoadOutcome::Empty);
    };
    let outcome = match serde_json::from_str::<Value>(&json) {
        Ok(value) => decode(value),
        Err(e) => LoadOutcome::Reset {
            reason: format!("saved data is not JSON: {e}"),
        },
    };
    match &outcome {
        LoadOutcome::Reset { reason } => log::warn!("Discarding saved tournament: {}", reason),
        LoadOutcome::Migrated { from, .. } => {
            log::info!("Migrated saved tournament from schema version {}", from)
        }
        _ => {}
    }
    Ok(outcome)
}

/// Remove the saved document.
pub fn clear_tournament<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StorageError> {
    store.delete(STORAGE_KEY)
}

fn decode(value: Value) -> LoadOutcome {
    let version = match value.get("schema_version") {
        None => 1,
        Some(v) => match v.as_u64().and_then(|v| u32::try_from(v).ok()) {
            Some(v) => v,
            None => {
                return LoadOutcome::Reset {
                    reason: format!("schema_version {v} is not a version number"),
                }
            }
        },
    };
    match version {
        1 => match serde_json::from_value::<Tournament>(value) {
            Ok(tournament) => LoadOutcome::Migrated { from: 1, tournament },
            Err(e) => LoadOutcome::Reset {
                reason: format!("version 1 document does not match: {e}"),
            },
        },
        CURRENT_SCHEMA_VERSION => match serde_json::from_value::<SavedTournament>(value) {
            Ok(saved) => LoadOutcome::Loaded(saved),
            Err(e) => LoadOutcome::Reset {
                reason: format!("version {CURRENT_SCHEMA_VERSION} document does not match: {e}"),
            },
        },
        other => LoadOutcome::Reset {
            reason: format!("unknown schema version {other}"),
        },
    }
}
