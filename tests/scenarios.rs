//! End-to-end checks of the lead lifecycle through the public API, using the demo data set:
//! John Smith (qualified, 1200), Emily Davis (proposal, 2400), Robert Wilson (new, 3600).

use leadboard::analytics::{bar_width_percent, compute_metrics, Metrics};
use leadboard::api::{BoardMove, LeadsApi, MessageLevel};
use leadboard::config::LeadboardConfig;
use leadboard::error::LeadError;
use leadboard::model::{sample_leads, LeadInput, LeadPatch, LeadStatus};
use leadboard::query::{filter, partition_by_status, LeadQuery};
use leadboard::store::memory::InMemoryStore;
use leadboard::store::DataStore;

fn session() -> LeadsApi<InMemoryStore> {
    let store = InMemoryStore::with_leads(sample_leads()).unwrap();
    LeadsApi::new(store, LeadboardConfig::default())
}

#[test]
fn demo_data_metrics_and_board() {
    let api = session();
    let leads = api.store().list_leads().unwrap();

    let metrics = compute_metrics(&leads);
    assert_eq!(metrics.total_leads, 3);
    assert_eq!(metrics.total_value, 7200.0);
    assert_eq!(metrics.closed_won, 0);
    assert_eq!(metrics.conversion_rate, 0.0);

    let board = partition_by_status(&leads);
    let names = |status| -> Vec<String> {
        board
            .column(status)
            .iter()
            .map(|l| l.name.clone())
            .collect()
    };
    assert_eq!(names(LeadStatus::Qualified), vec!["John Smith"]);
    assert_eq!(names(LeadStatus::Proposal), vec!["Emily Davis"]);
    assert_eq!(names(LeadStatus::New), vec!["Robert Wilson"]);
    assert!(names(LeadStatus::Contacted).is_empty());
    assert!(names(LeadStatus::Closed).is_empty());
    assert!(names(LeadStatus::Lost).is_empty());
}

#[test]
fn closing_a_deal_updates_conversion() {
    let mut api = session();
    let john = api.resolve("1").unwrap();

    api.update_lead(john, &LeadPatch::status(LeadStatus::Closed))
        .unwrap();

    let metrics = api.metrics().unwrap().metrics.unwrap();
    assert_eq!(metrics.closed_won, 1);
    assert_eq!(metrics.conversion_rate, 33.3);
}

#[test]
fn search_finds_emily_only() {
    let api = session();
    let leads = api.store().list_leads().unwrap();

    let found = filter(&leads, &LeadQuery::new().search("emily"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Emily Davis");
}

#[test]
fn empty_query_is_identity() {
    let leads = sample_leads();
    assert_eq!(filter(&leads, &LeadQuery::new()), leads);
}

#[test]
fn empty_store_metrics_are_all_zero() {
    assert_eq!(compute_metrics(&[]), Metrics::default());
    assert_eq!(compute_metrics(&[]).conversion_rate, 0.0);
}

#[test]
fn bar_width_of_empty_max_is_zero() {
    assert_eq!(bar_width_percent(0, 0), 0.0);
    assert_eq!(bar_width_percent(2, 4), 50.0);
}

#[test]
fn delete_then_update_or_delete_is_a_quiet_no_op() {
    let mut api = session();
    let emily = api.resolve("2").unwrap();

    api.delete_lead(emily).unwrap();
    let update = api
        .update_lead(emily, &LeadPatch::status(LeadStatus::Lost))
        .unwrap();
    let delete = api.delete_lead(emily).unwrap();

    assert!(update.affected_leads.is_empty());
    assert!(delete.affected_leads.is_empty());
    assert_eq!(update.messages[0].level, MessageLevel::Warning);
    assert_eq!(api.store().list_leads().unwrap().len(), 2);
}

#[test]
fn create_fills_defaults_and_validates() {
    let mut api = session();

    let created = api
        .create_lead(LeadInput::new(
            "Dana Cruz",
            "dana@example.com",
            "+1 555-0199",
            "Business Insurance",
        ))
        .unwrap();
    let lead = &created.affected_leads[0];
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.assigned_to, "System");
    assert_eq!(lead.value, 0.0);
    assert!(lead.notes.is_empty());
    assert_eq!(
        lead.next_follow_up - lead.last_contact,
        chrono::Duration::hours(24)
    );

    let rejected = api.create_lead(LeadInput::new("", "x@example.com", "1", "Auto Insurance"));
    assert!(matches!(rejected, Err(LeadError::Validation(_))));
    assert_eq!(api.store().list_leads().unwrap().len(), 4);
}

#[test]
fn board_drag_flow() {
    let mut api = session();
    let robert = api.resolve("3").unwrap();

    let cancelled = api
        .move_lead(&BoardMove::from_columns(robert, LeadStatus::New, None))
        .unwrap();
    assert!(cancelled.affected_leads.is_empty());

    let moved = api
        .move_lead(&BoardMove::new(
            robert,
            LeadStatus::New,
            Some(LeadStatus::Contacted),
        ))
        .unwrap();
    assert_eq!(moved.affected_leads[0].status, LeadStatus::Contacted);

    let board = api.board().unwrap().board.unwrap();
    assert_eq!(board.column(LeadStatus::Contacted)[0].id, robert);
    assert!(board.column(LeadStatus::New).is_empty());
}

#[test]
fn notes_append_in_order_and_survive_export() {
    let mut api = session();
    let emily = api.resolve("2").unwrap();

    api.append_note(emily, "Sent revised quote").unwrap();
    api.append_note(emily, "Asked for references").unwrap();

    let json = api.export_snapshot().unwrap();
    let notes = api.get_lead(emily).unwrap().notes;
    assert_eq!(notes.len(), 4);
    assert!(notes[2].ends_with(": Sent revised quote"));
    assert!(notes[3].ends_with(": Asked for references"));

    let mut next = LeadsApi::new(InMemoryStore::new(), LeadboardConfig::default());
    next.import_snapshot(&json).unwrap();
    assert_eq!(next.get_lead(emily).unwrap().notes, notes);
}

#[test]
fn session_hands_back_its_store() {
    let mut api = session();
    api.capture_lead(
        "Lee Park",
        "lee@example.com",
        "555-0142",
        "Home Insurance",
        "Phone Call",
        None,
    )
    .unwrap();

    let store = api.into_store();
    assert_eq!(store.len(), 4);
    assert_eq!(store.list_leads().unwrap()[3].source, "Phone Call");
}

#[test]
fn rejected_import_changes_nothing() {
    let mut api = session();
    let before = api.store().list_leads().unwrap();
    let revision = api.store().revision();

    let mut snapshot = sample_leads();
    snapshot.push(snapshot[0].clone());
    let json = serde_json::to_string(&snapshot).unwrap();

    assert!(matches!(
        api.import_snapshot(&json),
        Err(LeadError::Store(_))
    ));
    assert_eq!(api.store().list_leads().unwrap(), before);
    assert_eq!(api.store().revision(), revision);

    let mut fresh = LeadsApi::new(InMemoryStore::new(), LeadboardConfig::default());
    assert!(fresh.import_snapshot(&json).is_err());
    assert!(fresh.into_store().is_empty());
}
