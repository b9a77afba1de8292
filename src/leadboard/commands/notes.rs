//! # Lead Notes
//!
//! Notes are a chronological activity log. [`append`] is the normal way to add one: the new
//! entry is pushed inside the store's own edit call, so two appends can never overwrite
//! each other the way a read-then-write of the whole list could.
//!
//! [`replace`] swaps the whole history and is kept for bulk corrections (removing or
//! rewording an entry).
//!
//! Appended entries carry a local-time prefix: `"<timestamp>: <text>"`, with the timestamp
//! rendered by the configured chrono format (en-US style by default).

use chrono::{DateTime, Local};
use log::info;
use std::fmt::Write;
use uuid::Uuid;

use crate::commands::helpers::recover_not_found;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LeadError, Result};
use crate::model::Lead;
use crate::store::DataStore;

/// Renders a note entry as `"<timestamp>: <text>"`.
pub fn format_note(at: DateTime<Local>, timestamp_format: &str, text: &str) -> Result<String> {
    let mut entry = String::new();
    write!(entry, "{}: {}", at.format(timestamp_format), text).map_err(|_| {
        LeadError::Validation(format!(
            "invalid note timestamp format: {:?}",
            timestamp_format
        ))
    })?;
    Ok(entry)
}

/// Appends `text` to the notes of lead `id`, stamped with `at`.
pub fn append<S: DataStore>(
    store: &mut S,
    id: Uuid,
    text: &str,
    at: DateTime<Local>,
    timestamp_format: &str,
) -> Result<CmdResult> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LeadError::Validation("note text is required".into()));
    }
    let entry = format_note(at, timestamp_format, text)?;

    let mut result = CmdResult::default();
    let outcome = store.modify_lead(&id, &mut |lead: &mut Lead| lead.notes.push(entry.clone()));
    let Some(lead) = recover_not_found(outcome, "note", &mut result)? else {
        return Ok(result);
    };

    info!("event=lead_note id={} count={}", id, lead.notes.len());
    result.add_message(CmdMessage::success(format!("Note added to {}", lead.name)));
    Ok(result.with_affected_leads(vec![lead]))
}

/// Replaces the entire note history of lead `id`.
pub fn replace<S: DataStore>(store: &mut S, id: Uuid, notes: Vec<String>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let outcome = store.modify_lead(&id, &mut |lead: &mut Lead| lead.notes = notes.clone());
    let Some(lead) = recover_not_found(outcome, "update", &mut result)? else {
        return Ok(result);
    };

    info!(
        "event=lead_notes_replace id={} count={}",
        id,
        lead.notes.len()
    );
    result.add_message(CmdMessage::success(format!(
        "Notes replaced for {}",
        lead.name
    )));
    Ok(result.with_affected_leads(vec![lead]))
}
