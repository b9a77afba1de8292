use crate::analytics::stage_summaries;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::partition_by_status;
use crate::store::DataStore;

/// The pipeline board: six stage columns plus per-stage count and value.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let leads = store.list_leads()?;
    Ok(CmdResult::default()
        .with_board(partition_by_status(&leads))
        .with_stages(stage_summaries(&leads)))
}
