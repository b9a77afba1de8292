//! # Query/Filter Engine
//!
//! Pure functions that derive views from a lead sequence. Nothing here touches a store;
//! callers pass in a snapshot (usually [`crate::store::DataStore::list_leads`]) and get a
//! new sequence back.
//!
//! ## Matching Rules
//!
//! A [`LeadQuery`] has three predicates, combined with AND:
//!
//! | Predicate     | Empty / `None` | Otherwise                                               |
//! |---------------|----------------|---------------------------------------------------------|
//! | `search_term` | matches all    | substring of `name` or `email` (case-insensitive), or of `phone` (raw) |
//! | `status`      | matches all    | exact stage                                             |
//! | `priority`    | matches all    | exact priority                                          |
//!
//! Phone numbers are compared as typed: `"555-01"` matches `"+1 555-0123"`, but no
//! digit normalization happens.
//!
//! ## Ordering
//!
//! [`filter`] is a stable filter. [`partition_by_status`] keeps insertion order inside each
//! column, and every lead lands in exactly one column.

use serde::Serialize;

use crate::model::{Lead, LeadStatus, Priority};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadQuery {
    pub search_term: String,
    pub status: Option<LeadStatus>,
    pub priority: Option<Priority>,
}

impl LeadQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// True when no predicate constrains anything.
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.status.is_none() && self.priority.is_none()
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        self.matches_search(lead)
            && self.status.is_none_or(|s| lead.status == s)
            && self.priority.is_none_or(|p| lead.priority == p)
    }

    fn matches_search(&self, lead: &Lead) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let term_lower = self.search_term.to_lowercase();
        lead.name.to_lowercase().contains(&term_lower)
            || lead.email.to_lowercase().contains(&term_lower)
            || lead.phone.contains(&self.search_term)
    }
}

/// Leads matching `query`, in input order.
pub fn filter(leads: &[Lead], query: &LeadQuery) -> Vec<Lead> {
    leads.iter().filter(|l| query.matches(l)).cloned().collect()
}

/// One board column.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub status: LeadStatus,
    pub leads: Vec<Lead>,
}

impl Column {
    pub fn title(&self) -> &'static str {
        self.status.title()
    }

    /// Summed estimated value of the column's leads.
    pub fn value(&self) -> f64 {
        self.leads.iter().map(|l| l.value).sum()
    }
}

/// Leads grouped into the six stage columns, in pipeline order.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    pub fn column(&self, status: LeadStatus) -> &[Lead] {
        self.columns
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.leads.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.leads.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `leads` into one column per stage. All six columns are always present,
/// possibly empty.
pub fn partition_by_status(leads: &[Lead]) -> Board {
    let columns = LeadStatus::ALL
        .iter()
        .map(|&status| Column {
            status,
            leads: leads.iter().filter(|l| l.status == status).cloned().collect(),
        })
        .collect();
    Board { columns }
}
