use log::warn;
use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LeadError, Result};
use crate::index::{index_leads, DisplayLead, LeadSelector};
use crate::store::DataStore;

pub fn indexed_leads<S: DataStore>(store: &S) -> Result<Vec<DisplayLead>> {
    Ok(index_leads(store.list_leads()?))
}

/// Turns a user reference into a lead id.
///
/// A full UUID is passed through unchecked so that commands can apply their own
/// not-found handling; positions and prefixes must resolve against the current list.
pub fn resolve_selector<S: DataStore>(store: &S, selector: &LeadSelector) -> Result<Uuid> {
    if let LeadSelector::Id(id) = selector {
        return Ok(*id);
    }
    let indexed = indexed_leads(store)?;
    selector.resolve(&indexed).map(|dl| dl.lead.id)
}

/// Converts a store lookup miss into the no-op outcome shared by the write commands.
///
/// Returns `Ok(None)` (after recording a warning on `result`) for `NotFound`, passes
/// the value through on success, and propagates every other error.
pub fn recover_not_found<T>(
    outcome: Result<T>,
    action: &str,
    result: &mut CmdResult,
) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(LeadError::NotFound(id)) => {
            warn!("event=lead_{} id={} status=not_found", action, id);
            result.add_message(CmdMessage::warning(format!(
                "No lead with id {}; nothing to {}",
                id, action
            )));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn resolves_position_to_id() {
        let fixture = StoreFixture::new().with_sample_leads();
        let ids = fixture.ids();
        let id = resolve_selector(&fixture.store, &LeadSelector::Index(3)).unwrap();
        assert_eq!(id, ids[2]);
    }

    #[test]
    fn full_id_passes_through_even_if_absent() {
        let fixture = StoreFixture::new();
        let id = Uuid::new_v4();
        assert_eq!(
            resolve_selector(&fixture.store, &LeadSelector::Id(id)).unwrap(),
            id
        );
    }

    #[test]
    fn unknown_position_is_an_error() {
        let fixture = StoreFixture::new().with_leads(1);
        assert!(matches!(
            resolve_selector(&fixture.store, &LeadSelector::Index(2)),
            Err(LeadError::Selector(_))
        ));
    }

    #[test]
    fn not_found_becomes_warning() {
        let mut result = CmdResult::default();
        let id = Uuid::new_v4();
        let out: Option<()> =
            recover_not_found(Err(LeadError::NotFound(id)), "delete", &mut result).unwrap();
        assert!(out.is_none());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn other_errors_propagate() {
        let mut result = CmdResult::default();
        let out: Result<Option<()>> =
            recover_not_found(Err(LeadError::Store("boom".into())), "update", &mut result);
        assert!(matches!(out, Err(LeadError::Store(_))));
        assert!(result.messages.is_empty());
    }
}
