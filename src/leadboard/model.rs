//! # Domain Model: Leads and the Pipeline Stages
//!
//! This module defines the core data structures for leadboard: [`Lead`], [`LeadStatus`],
//! [`Priority`], and the two write-side shapes [`LeadInput`] (create) and [`LeadPatch`]
//! (partial update).
//!
//! ## The Pipeline
//!
//! ```text
//! new → contacted → qualified → proposal → closed
//!                                        ↘ lost
//! ```
//!
//! The order above is the *display* order of the board columns. It is not a state machine:
//! a lead may move from any stage to any other, including out of `closed` or `lost`
//! (see [`crate::commands::status`]).
//!
//! ## Field Ownership
//!
//! - `id` and `created_at` are assigned once by the create command and are not
//!   representable in a [`LeadPatch`], so no update can touch them.
//! - `status` is a closed enum; a string that is not one of the six stages fails to
//!   parse with [`LeadError::InvalidStatus`] before it can reach a record.
//! - `notes` is chronological. Callers append through the dedicated note command; the
//!   patch field replaces the whole sequence and exists for bulk edits.
//!
//! ## Wire Shape
//!
//! Leads serialize with camelCase field names (`createdAt`, `nextFollowUp`, `assignedTo`)
//! and lowercase stage/priority names, matching the dashboard snapshot format.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::config::LeadboardConfig;
use crate::error::{LeadError, Result};

/// Insurance products offered on the capture form.
pub const PRODUCTS: [&str; 4] = [
    "Auto Insurance",
    "Home Insurance",
    "Life Insurance",
    "Business Insurance",
];

/// Acquisition channels offered on the edit form.
pub const SOURCES: [&str; 5] = [
    "Website",
    "Referral",
    "Social Media",
    "Phone Call",
    "Email Campaign",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Closed,
    Lost,
}

impl LeadStatus {
    /// All stages in board column order.
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Closed,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Proposal => "proposal",
            LeadStatus::Closed => "closed",
            LeadStatus::Lost => "lost",
        }
    }

    /// Column heading on the board.
    pub fn title(&self) -> &'static str {
        match self {
            LeadStatus::New => "New Leads",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Proposal => "Proposal Sent",
            LeadStatus::Closed => "Closed Won",
            LeadStatus::Lost => "Closed Lost",
        }
    }

    /// `closed` and `lost` end the funnel. Being terminal does not lock a lead.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeadStatus::Closed | LeadStatus::Lost)
    }

    /// Position of this stage's column on the board.
    pub fn column(&self) -> usize {
        Self::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    /// Maps a board column back to its stage. `None` for columns that don't exist.
    pub fn from_column(column: usize) -> Option<Self> {
        Self::ALL.get(column).copied()
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::New
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LeadError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LeadError::InvalidPriority(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub status: LeadStatus,
    pub priority: Priority,
    pub source: String,
    pub value: f64,
    pub created_at: DateTime<Utc>,
    pub last_contact: DateTime<Utc>,
    pub next_follow_up: DateTime<Utc>,
    #[serde(default)]
    pub notes: Vec<String>,
    pub assigned_to: String,
}

impl Lead {
    /// Builds a new record from `input`, assigning a fresh id and stamping `created_at`.
    pub fn from_input(input: LeadInput, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            product: input.product,
            status: input.status,
            priority: input.priority,
            source: input.source,
            value: input.value,
            created_at,
            last_contact: input.last_contact,
            next_follow_up: input.next_follow_up,
            notes: input.notes,
            assigned_to: input.assigned_to,
        }
    }
}

/// Every lead field except `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub product: String,
    pub status: LeadStatus,
    pub priority: Priority,
    pub source: String,
    pub value: f64,
    pub last_contact: DateTime<Utc>,
    pub next_follow_up: DateTime<Utc>,
    pub notes: Vec<String>,
    pub assigned_to: String,
}

impl LeadInput {
    /// Input with the stock defaults: status `new`, priority `medium`, value 0,
    /// assigned to "System", follow-up due in 24 hours.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self::from_config(&LeadboardConfig::default(), name, email, phone, product)
    }

    /// Input whose defaults (assignee, source, follow-up delay) come from `config`.
    pub fn from_config(
        config: &LeadboardConfig,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            product: product.into(),
            status: LeadStatus::New,
            priority: Priority::Medium,
            source: config.default_source.clone(),
            value: 0.0,
            last_contact: now,
            next_follow_up: config.follow_up_after(now),
            notes: Vec::new(),
            assigned_to: config.default_assignee.clone(),
        }
    }

    /// What the public capture form submits: contact details, a product, a source and
    /// an optional first message that becomes the only note.
    pub fn capture(
        config: &LeadboardConfig,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        product: impl Into<String>,
        source: impl Into<String>,
        note: Option<String>,
    ) -> Self {
        let notes = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .into_iter()
            .collect();
        Self::from_config(config, name, email, phone, product)
            .with_source(source)
            .with_notes(notes)
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_assignee(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = assigned_to.into();
        self
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Form-level checks: contact identity and product must be present, value must be a
    /// non-negative number.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("product", &self.product),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(LeadError::Validation(format!("{} is required", field)));
            }
        }
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(LeadError::Validation(format!(
                "value must be a non-negative number, got {}",
                self.value
            )));
        }
        Ok(())
    }
}

/// A partial update. Absent fields are left untouched.
///
/// `notes`, when present, replaces the whole sequence. Use the note commands for the
/// usual append case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub product: Option<String>,
    pub status: Option<LeadStatus>,
    pub priority: Option<Priority>,
    pub source: Option<String>,
    pub value: Option<f64>,
    pub last_contact: Option<DateTime<Utc>>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub notes: Option<Vec<String>>,
    pub assigned_to: Option<String>,
}

impl LeadPatch {
    pub fn status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn notes(notes: Vec<String>) -> Self {
        Self {
            notes: Some(notes),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Names of the fields this patch sets, in declaration order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let mut mark = |present: bool, name: &'static str| {
            if present {
                fields.push(name);
            }
        };
        mark(self.name.is_some(), "name");
        mark(self.email.is_some(), "email");
        mark(self.phone.is_some(), "phone");
        mark(self.product.is_some(), "product");
        mark(self.status.is_some(), "status");
        mark(self.priority.is_some(), "priority");
        mark(self.source.is_some(), "source");
        mark(self.value.is_some(), "value");
        mark(self.last_contact.is_some(), "lastContact");
        mark(self.next_follow_up.is_some(), "nextFollowUp");
        mark(self.notes.is_some(), "notes");
        mark(self.assigned_to.is_some(), "assignedTo");
        fields
    }

    /// Merges the present fields into `lead`.
    pub fn apply(&self, lead: &mut Lead) {
        if let Some(name) = &self.name {
            lead.name = name.clone();
        }
        if let Some(email) = &self.email {
            lead.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            lead.phone = phone.clone();
        }
        if let Some(product) = &self.product {
            lead.product = product.clone();
        }
        if let Some(status) = self.status {
            lead.status = status;
        }
        if let Some(priority) = self.priority {
            lead.priority = priority;
        }
        if let Some(source) = &self.source {
            lead.source = source.clone();
        }
        if let Some(value) = self.value {
            lead.value = value;
        }
        if let Some(at) = self.last_contact {
            lead.last_contact = at;
        }
        if let Some(at) = self.next_follow_up {
            lead.next_follow_up = at;
        }
        if let Some(notes) = &self.notes {
            lead.notes = notes.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            lead.assigned_to = assigned_to.clone();
        }
    }
}

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, date, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The three demo leads the dashboard starts with.
pub fn sample_leads() -> Vec<Lead> {
    vec![
        Lead {
            id: Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0001),
            name: "John Smith".into(),
            email: "john.smith@email.com".into(),
            phone: "+1 555-0123".into(),
            product: "Auto Insurance".into(),
            status: LeadStatus::Qualified,
            priority: Priority::High,
            source: "Website".into(),
            value: 1200.0,
            created_at: day(2024, 1, 15),
            last_contact: day(2024, 1, 18),
            next_follow_up: day(2024, 1, 22),
            notes: vec![
                "Interested in comprehensive coverage".into(),
                "Has existing policy expiring next month".into(),
            ],
            assigned_to: "Sarah Johnson".into(),
        },
        Lead {
            id: Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0002),
            name: "Emily Davis".into(),
            email: "emily.davis@email.com".into(),
            phone: "+1 555-0124".into(),
            product: "Home Insurance".into(),
            status: LeadStatus::Proposal,
            priority: Priority::Medium,
            source: "Referral".into(),
            value: 2400.0,
            created_at: day(2024, 1, 10),
            last_contact: day(2024, 1, 20),
            next_follow_up: day(2024, 1, 25),
            notes: vec!["New homeowner".into(), "Looking for competitive rates".into()],
            assigned_to: "Mike Chen".into(),
        },
        Lead {
            id: Uuid::from_u128(0x5a1e_0000_0000_4000_8000_0000_0000_0003),
            name: "Robert Wilson".into(),
            email: "robert.wilson@email.com".into(),
            phone: "+1 555-0125".into(),
            product: "Life Insurance".into(),
            status: LeadStatus::New,
            priority: Priority::High,
            source: "Social Media".into(),
            value: 3600.0,
            created_at: day(2024, 1, 21),
            last_contact: day(2024, 1, 21),
            next_follow_up: day(2024, 1, 23),
            notes: vec!["Family coverage needed".into()],
            assigned_to: "Sarah Johnson".into(),
        },
    ]
}
