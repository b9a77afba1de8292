use chrono::Utc;
use log::info;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Lead, LeadInput};
use crate::store::DataStore;

/// Validates `input`, assigns an id and creation time, and inserts the lead.
///
/// Validation happens before the store is touched; a rejected input leaves the store
/// unchanged. Duplicate emails or phones are allowed.
pub fn run<S: DataStore>(store: &mut S, input: LeadInput) -> Result<CmdResult> {
    input.validate()?;

    let lead = Lead::from_input(input, Utc::now());
    store.insert_lead(lead.clone())?;
    info!(
        "event=lead_create id={} status={} product={:?}",
        lead.id, lead.status, lead.product
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Lead created: {}", lead.name)));
    Ok(result.with_affected_leads(vec![lead]))
}
