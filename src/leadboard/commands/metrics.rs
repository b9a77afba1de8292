use crate::analytics::{compute_metrics, stage_summaries, Metrics};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Lead;
use crate::store::DataStore;

/// Dashboard metrics for the current lead set.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let leads = store.list_leads()?;
    Ok(with_metrics(compute_metrics(&leads), &leads))
}

/// Builds the result around already computed (e.g. cached) metrics.
pub fn with_metrics(metrics: Metrics, leads: &[Lead]) -> CmdResult {
    CmdResult::default()
        .with_metrics(metrics)
        .with_stages(stage_summaries(leads))
}
