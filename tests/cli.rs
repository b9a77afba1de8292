#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A command isolated from the user's config and log settings.
fn leadboard_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("leadboard"));
    cmd.env("NO_COLOR", "1")
        .env_remove("LEADBOARD_LOG")
        .arg("--config-dir")
        .arg(config_dir.path());
    cmd
}

#[test]
fn lists_demo_leads_by_default() {
    let temp = TempDir::new().unwrap();
    leadboard_cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("Emily Davis"))
        .stdout(predicate::str::contains("Robert Wilson"));
}

#[test]
fn search_filters_the_list() {
    let temp = TempDir::new().unwrap();
    leadboard_cmd(&temp)
        .args(["list", "--search", "EMILY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Emily Davis"))
        .stdout(predicate::str::contains("John Smith").not());
}

#[test]
fn unknown_status_filter_fails() {
    let temp = TempDir::new().unwrap();
    leadboard_cmd(&temp)
        .args(["list", "--status", "won"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown status: won"));
}

#[test]
fn blank_filters_mean_no_constraint() {
    let temp = TempDir::new().unwrap();
    leadboard_cmd(&temp)
        .args(["list", "--status", "", "--priority", " "])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("Emily Davis"))
        .stdout(predicate::str::contains("Robert Wilson"));
}

#[test]
fn moving_a_lead_reports_both_stages() {
    let temp = TempDir::new().unwrap();
    leadboard_cmd(&temp)
        .args(["move", "1", "closed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "John Smith moved from Qualified to Closed Won",
        ));
}

#[test]
fn metrics_json_for_demo_data() {
    let temp = TempDir::new().unwrap();
    let output = leadboard_cmd(&temp)
        .args(["metrics", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let metrics: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(metrics["totalLeads"], 3);
    assert_eq!(metrics["totalValue"], 7200.0);
    assert_eq!(metrics["conversionRate"], 0.0);
    assert_eq!(metrics["statusCounts"]["proposal"], 1);
}

#[test]
fn session_seeded_from_snapshot() {
    let temp = TempDir::new().unwrap();
    let exported = leadboard_cmd(&temp).args(["export"]).output().unwrap();
    assert!(exported.status.success());

    let mut leads: serde_json::Value = serde_json::from_slice(&exported.stdout).unwrap();
    leads[0]["status"] = "closed".into();
    let snapshot = temp.path().join("leads.json");
    fs::write(&snapshot, serde_json::to_string(&leads).unwrap()).unwrap();

    leadboard_cmd(&temp)
        .arg("--data")
        .arg(&snapshot)
        .args(["metrics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("33.3%"));
}

#[test]
fn add_requires_contact_details() {
    let temp = TempDir::new().unwrap();
    leadboard_cmd(&temp)
        .args(["add", "Ann Lee", "ann@example.com", " ", "Life Insurance"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("phone is required"));
}

#[test]
fn add_uses_configured_assignee() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.json"),
        r#"{ "default_assignee": "Intake Desk" }"#,
    )
    .unwrap();

    leadboard_cmd(&temp)
        .args([
            "add",
            "Ann Lee",
            "ann@example.com",
            "+1 555-0101",
            "Life Insurance",
            "--note",
            "Prefers email",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lead created: Ann Lee"))
        .stdout(predicate::str::contains("Intake Desk"))
        .stdout(predicate::str::contains("Prefers email"));
}

#[test]
fn note_is_appended_with_timestamp() {
    let temp = TempDir::new().unwrap();
    leadboard_cmd(&temp)
        .args(["note", "2", "Sent", "revised", "quote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added to Emily Davis"))
        .stdout(predicate::str::contains(": Sent revised quote"));
}

#[test]
fn deleting_by_id_twice_only_warns() {
    let temp = TempDir::new().unwrap();
    let missing = "5a1e0000-0000-4000-8000-00000000ffff";
    leadboard_cmd(&temp)
        .args(["delete", missing])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));
}

#[test]
fn ambiguous_prefix_is_rejected() {
    let temp = TempDir::new().unwrap();
    leadboard_cmd(&temp)
        .args(["show", "5a1e0000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous"));
}

#[test]
fn board_shows_every_stage() {
    let temp = TempDir::new().unwrap();
    let assert = leadboard_cmd(&temp).args(["board"]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for title in [
        "New Leads",
        "Contacted",
        "Qualified",
        "Proposal Sent",
        "Closed Won",
        "Closed Lost",
    ] {
        assert!(stdout.contains(title), "missing column {}", title);
    }
}
