use log::info;
use uuid::Uuid;

use crate::commands::helpers::recover_not_found;
use crate::commands::status::{transition, Transition};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Lead, LeadPatch};
use crate::store::DataStore;

/// Merges `patch` into lead `id`.
///
/// Fields absent from the patch keep their values; `patch.notes`, if set, replaces the
/// whole note history. An unknown id is reported as a warning and changes nothing.
pub fn run<S: DataStore>(store: &mut S, id: Uuid, patch: &LeadPatch) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if patch.is_empty() {
        let Some(lead) = recover_not_found(store.get_lead(&id), "update", &mut result)? else {
            return Ok(result);
        };
        result.add_message(CmdMessage::info(format!(
            "No changes given for {}",
            lead.name
        )));
        return Ok(result.with_affected_leads(vec![lead]));
    }

    let mut previous_status = None;
    let outcome = store.modify_lead(&id, &mut |lead: &mut Lead| {
        previous_status = Some(lead.status);
        patch.apply(lead);
    });
    let Some(lead) = recover_not_found(outcome, "update", &mut result)? else {
        return Ok(result);
    };

    info!(
        "event=lead_update id={} fields={}",
        id,
        patch.changed_fields().join(",")
    );
    if let Some(from) = previous_status {
        if let Transition::Changed { from, to } = transition(from, lead.status) {
            info!("event=lead_move id={} from={} to={}", id, from, to);
        }
    }

    result.add_message(CmdMessage::success(format!("Lead updated: {}", lead.name)));
    Ok(result.with_affected_leads(vec![lead]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{LeadStatus, Priority};
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn overwrites_exactly_the_given_fields() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[0];
        let before = fixture.store.get_lead(&id).unwrap();

        let patch = LeadPatch {
            email: Some("j.smith@work.example".into()),
            priority: Some(Priority::Low),
            ..LeadPatch::default()
        };
        run(&mut fixture.store, id, &patch).unwrap();

        let after = fixture.store.get_lead(&id).unwrap();
        let mut expected = before.clone();
        expected.email = "j.smith@work.example".into();
        expected.priority = Priority::Low;
        assert_eq!(after, expected);
    }

    #[test]
    fn applying_twice_equals_applying_once() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[2];
        let patch = LeadPatch {
            value: Some(4200.0),
            status: Some(LeadStatus::Contacted),
            ..LeadPatch::default()
        };

        run(&mut fixture.store, id, &patch).unwrap();
        let once = fixture.store.get_lead(&id).unwrap();
        run(&mut fixture.store, id, &patch).unwrap();
        assert_eq!(fixture.store.get_lead(&id).unwrap(), once);
    }

    #[test]
    fn notes_in_patch_replace_history() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[0];

        run(&mut fixture.store, id, &LeadPatch::notes(vec!["only".into()])).unwrap();
        assert_eq!(
            fixture.store.get_lead(&id).unwrap().notes,
            vec!["only".to_string()]
        );
    }

    #[test]
    fn keeps_list_position() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let ids = fixture.ids();
        run(
            &mut fixture.store,
            ids[1],
            &LeadPatch::status(LeadStatus::Closed),
        )
        .unwrap();
        assert_eq!(fixture.ids(), ids);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let revision = fixture.store.revision();

        let result = run(
            &mut fixture.store,
            Uuid::new_v4(),
            &LeadPatch::status(LeadStatus::Lost),
        )
        .unwrap();

        assert!(result.affected_leads.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(fixture.store.revision(), revision);
    }

    #[test]
    fn empty_patch_writes_nothing() {
        let mut fixture = StoreFixture::new().with_sample_leads();
        let id = fixture.ids()[0];
        let revision = fixture.store.revision();

        let result = run(&mut fixture.store, id, &LeadPatch::default()).unwrap();
        assert_eq!(result.affected_leads.len(), 1);
        assert_eq!(fixture.store.revision(), revision);
    }
}
