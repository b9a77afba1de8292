//! Seeds a store from a JSON snapshot: an array of complete lead records with camelCase
//! field names, as produced by [`export`](crate::commands::export).
//!
//! Ids and timestamps are taken from the snapshot as-is. Records are not re-validated;
//! a snapshot is trusted data, not user input. The import is all or nothing: an id that
//! repeats within the snapshot, or that the store has already issued, rejects the whole
//! batch before any record is inserted.

use log::{info, warn};
use std::collections::HashSet;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LeadError, Result};
use crate::model::Lead;
use crate::store::DataStore;

pub fn parse_snapshot(json: &str) -> Result<Vec<Lead>> {
    Ok(serde_json::from_str(json)?)
}

pub fn run<S: DataStore>(store: &mut S, leads: Vec<Lead>) -> Result<CmdResult> {
    check_ids(store, &leads)?;

    let count = leads.len();
    for lead in leads {
        store.insert_lead(lead)?;
    }
    info!("event=lead_import count={}", count);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Imported {} leads", count)));
    Ok(result)
}

fn check_ids<S: DataStore>(store: &S, leads: &[Lead]) -> Result<()> {
    let mut seen = HashSet::new();
    for lead in leads {
        if !seen.insert(lead.id) || store.is_issued(&lead.id) {
            warn!("event=lead_import status=rejected duplicate_id={}", lead.id);
            return Err(LeadError::Store(format!(
                "Lead id {} has already been used; nothing imported",
                lead.id
            )));
        }
    }
    Ok(())
}
