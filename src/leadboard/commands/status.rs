//! # Stage Changes
//!
//! Every stage may move to every other stage. There is no transition table: a closed deal
//! can be reopened, a lost lead can be re-engaged. The only rule is that the target is one
//! of the six [`LeadStatus`] values, which the type already guarantees.
//!
//! Two entry points share one code path:
//! - [`set`]: an explicit status edit (list view dropdown, edit form)
//! - [`apply_move`]: a board drag, described by a [`BoardMove`]
//!
//! A change to the stage a lead is already in writes nothing: no field changes, no note,
//! no store revision bump.

use log::info;
use uuid::Uuid;

use crate::commands::helpers::recover_not_found;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Lead, LeadStatus};
use crate::store::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged(LeadStatus),
    Changed { from: LeadStatus, to: LeadStatus },
}

/// Classifies a stage change. Never rejects.
pub fn transition(from: LeadStatus, to: LeadStatus) -> Transition {
    if from == to {
        Transition::Unchanged(from)
    } else {
        Transition::Changed { from, to }
    }
}

/// A card dropped on the board: where it came from and the column it landed in.
/// `to` is `None` when it was dropped outside every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardMove {
    pub lead_id: Uuid,
    pub from: LeadStatus,
    pub to: Option<LeadStatus>,
}

impl BoardMove {
    pub fn new(lead_id: Uuid, from: LeadStatus, to: Option<LeadStatus>) -> Self {
        Self { lead_id, from, to }
    }

    /// Builds a move from board column positions, as a drag-and-drop layer reports them.
    pub fn from_columns(lead_id: Uuid, from: LeadStatus, to_column: Option<usize>) -> Self {
        Self::new(lead_id, from, to_column.and_then(LeadStatus::from_column))
    }
}

/// Sets the stage of lead `id` to `to`.
pub fn set<S: DataStore>(store: &mut S, id: Uuid, to: LeadStatus) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(current) = recover_not_found(store.get_lead(&id), "move", &mut result)? else {
        return Ok(result);
    };

    match transition(current.status, to) {
        Transition::Unchanged(status) => {
            result.add_message(CmdMessage::info(format!(
                "{} is already {}",
                current.name, status
            )));
            Ok(result.with_affected_leads(vec![current]))
        }
        Transition::Changed { from, to } => {
            let outcome = store.modify_lead(&id, &mut |lead: &mut Lead| lead.status = to);
            let Some(lead) = recover_not_found(outcome, "move", &mut result)? else {
                return Ok(result);
            };
            info!("event=lead_move id={} from={} to={}", id, from, to);
            result.add_message(CmdMessage::success(format!(
                "{} moved from {} to {}",
                lead.name,
                from.title(),
                to.title()
            )));
            Ok(result.with_affected_leads(vec![lead]))
        }
    }
}

/// Applies a board drop. Drops outside the board and drops onto the source column do nothing.
pub fn apply_move<S: DataStore>(store: &mut S, mv: &BoardMove) -> Result<CmdResult> {
    match mv.to {
        None => Ok(CmdResult::default()),
        Some(to) if to == mv.from => Ok(CmdResult::default()),
        Some(to) => set(store, mv.lead_id, to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn every_pair_of_stages_is_allowed() {
        for from in LeadStatus::ALL {
            for to in LeadStatus::ALL {
                let t = transition(from, to);
                if from == to {
                    assert_eq!(t, Transition::Unchanged(from));
                } else {
                    assert_eq!(t, Transition::Changed { from, to });
                }
            }
        }
    }

    #[test]
    fn closed_lead_can_be_reopened() {
        let mut fixture = StoreFixture::new().with_lead("Won", LeadStatus::Closed, 500.0);
        let id = fixture.ids()[0];

        let result = set(&mut fixture.store, id, LeadStatus::Contacted).unwrap();
        assert_eq!(result.affected_leads[0].status, LeadStatus::Contacted);
        assert_eq!(
            fixture.store.get_lead(&id).unwrap().status,
            LeadStatus::Contacted
        );
    }

    #[test]
    fn moving_changes_only_status() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[0];
        let before = fixture.store.get_lead(&id).unwrap();

        set(&mut fixture.store, id, LeadStatus::Lost).unwrap();
        let after = fixture.store.get_lead(&id).unwrap();

        assert_eq!(after.status, LeadStatus::Lost);
        assert_eq!(after.last_contact, before.last_contact);
        assert_eq!(after.next_follow_up, before.next_follow_up);
        assert_eq!(after.notes, before.notes);
    }

    #[test]
    fn same_stage_is_a_no_op() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[0];
        let revision = fixture.store.revision();

        let result = set(&mut fixture.store, id, LeadStatus::Qualified).unwrap();
        assert_eq!(fixture.store.revision(), revision);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn drop_on_source_column_writes_nothing() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[1];
        let revision = fixture.store.revision();

        let mv = BoardMove::new(id, LeadStatus::Proposal, Some(LeadStatus::Proposal));
        let result = apply_move(&mut fixture.store, &mv).unwrap();
        assert!(result.affected_leads.is_empty());
        assert_eq!(fixture.store.revision(), revision);
    }

    #[test]
    fn drop_outside_board_is_cancelled() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[1];
        let revision = fixture.store.revision();

        let mv = BoardMove::from_columns(id, LeadStatus::Proposal, Some(17));
        assert_eq!(mv.to, None);
        apply_move(&mut fixture.store, &mv).unwrap();
        assert_eq!(fixture.store.revision(), revision);
    }

    #[test]
    fn drop_on_other_column_moves_lead() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[1];

        let mv = BoardMove::from_columns(id, LeadStatus::Proposal, Some(4));
        let result = apply_move(&mut fixture.store, &mv).unwrap();
        assert_eq!(result.affected_leads[0].status, LeadStatus::Closed);
    }

    #[test]
    fn unknown_lead_is_a_warning_not_an_error() {
        let mut fixture = StoreFixture::new();
        let result = set(&mut fixture.store, Uuid::new_v4(), LeadStatus::Lost).unwrap();
        assert!(result.affected_leads.is_empty());
        assert!(result.has_warnings());
    }
}
