use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::LeadSelector;
use crate::store::DataStore;

use super::helpers::indexed_leads;

/// Looks up a single lead. Unlike the write commands, a miss is an error here.
pub fn run<S: DataStore>(store: &S, selector: &LeadSelector) -> Result<CmdResult> {
    let indexed = indexed_leads(store)?;
    let found = selector.resolve(&indexed)?.clone();
    Ok(CmdResult::default().with_listed_leads(vec![found]))
}
