use log::info;
use uuid::Uuid;

use crate::commands::helpers::recover_not_found;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Removes lead `id`. Deleting an id that is not (or no longer) present is a no-op.
pub fn run<S: DataStore>(store: &mut S, id: Uuid) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(lead) = recover_not_found(store.delete_lead(&id), "delete", &mut result)? else {
        return Ok(result);
    };

    info!("event=lead_delete id={} found=true", id);
    result.add_message(CmdMessage::success(format!("Lead deleted: {}", lead.name)));
    Ok(result.with_affected_leads(vec![lead]))
}
