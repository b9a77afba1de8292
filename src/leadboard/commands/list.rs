use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::LeadQuery;
use crate::store::DataStore;

use super::helpers::indexed_leads;

/// Lists the leads matching `query`, each paired with its position in the full list.
pub fn run<S: DataStore>(store: &S, query: &LeadQuery) -> Result<CmdResult> {
    let listed: Vec<_> = indexed_leads(store)?
        .into_iter()
        .filter(|dl| query.matches(&dl.lead))
        .collect();

    Ok(CmdResult::default().with_listed_leads(listed))
}
