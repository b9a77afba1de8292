//! # Display Indexes
//!
//! Lead ids are UUIDs, which nobody wants to type. Every listing therefore pairs each lead
//! with its 1-based position in the store's insertion order, and commands accept a
//! [`LeadSelector`] that is either that position, a full UUID, or a unique UUID prefix.
//!
//! Positions are assigned over the *whole* store before any filter is applied, so `3` means
//! the same lead in `list`, `list --status new` and `board` until a create or delete
//! shifts the sequence.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{LeadError, Result};
use crate::model::Lead;

const MIN_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayLead {
    pub index: usize,
    pub lead: Lead,
}

/// Pairs each lead with its 1-based position, preserving order.
pub fn index_leads(leads: Vec<Lead>) -> Vec<DisplayLead> {
    leads
        .into_iter()
        .enumerate()
        .map(|(i, lead)| DisplayLead { index: i + 1, lead })
        .collect()
}

/// A user reference to a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadSelector {
    Index(usize),
    Id(Uuid),
    IdPrefix(String),
}

impl fmt::Display for LeadSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadSelector::Index(i) => write!(f, "{}", i),
            LeadSelector::Id(id) => write!(f, "{}", id),
            LeadSelector::IdPrefix(p) => write!(f, "{}…", p),
        }
    }
}

impl FromStr for LeadSelector {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err(LeadError::Selector("Lead positions start at 1".into()));
            }
            return Ok(LeadSelector::Index(n));
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(LeadSelector::Id(id));
        }
        let is_hex = s.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
        if is_hex && s.len() >= MIN_PREFIX_LEN {
            return Ok(LeadSelector::IdPrefix(s.to_ascii_lowercase()));
        }
        Err(LeadError::Selector(format!(
            "Invalid lead reference: {} (use a list position, an id, or an id prefix of at least {} characters)",
            s, MIN_PREFIX_LEN
        )))
    }
}

impl LeadSelector {
    /// Finds the single lead this selector names.
    pub fn resolve<'a>(&self, indexed: &'a [DisplayLead]) -> Result<&'a DisplayLead> {
        match self {
            LeadSelector::Index(n) => indexed
                .iter()
                .find(|dl| dl.index == *n)
                .ok_or_else(|| LeadError::Selector(format!("No lead at position {}", n))),
            LeadSelector::Id(id) => indexed
                .iter()
                .find(|dl| dl.lead.id == *id)
                .ok_or(LeadError::NotFound(*id)),
            LeadSelector::IdPrefix(prefix) => {
                let mut hits = indexed
                    .iter()
                    .filter(|dl| dl.lead.id.to_string().starts_with(prefix.as_str()));
                match (hits.next(), hits.next()) {
                    (Some(dl), None) => Ok(dl),
                    (None, _) => Err(LeadError::Selector(format!(
                        "No lead id starts with {}",
                        prefix
                    ))),
                    (Some(_), Some(_)) => Err(LeadError::Selector(format!(
                        "Id prefix {} is ambiguous",
                        prefix
                    ))),
                }
            }
        }
    }
}
