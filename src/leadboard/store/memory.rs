use super::DataStore;
use crate::error::{LeadError, Result};
use crate::model::Lead;
use std::collections::HashSet;
use uuid::Uuid;

/// In-memory lead storage. Does NOT persist data.
///
/// Records are kept in a `Vec` so that listing order is insertion order without
/// any sort step; lookups are linear, which is fine at dashboard volumes.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    leads: Vec<Lead>,
    issued: HashSet<Uuid>,
    revision: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `leads`, in order.
    pub fn with_leads(leads: Vec<Lead>) -> Result<Self> {
        let mut store = Self::new();
        for lead in leads {
            store.insert_lead(lead)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    fn position(&self, id: &Uuid) -> Result<usize> {
        self.leads
            .iter()
            .position(|lead| lead.id == *id)
            .ok_or(LeadError::NotFound(*id))
    }
}

impl DataStore for InMemoryStore {
    fn insert_lead(&mut self, lead: Lead) -> Result<()> {
        if !self.issued.insert(lead.id) {
            return Err(LeadError::Store(format!(
                "Lead id {} has already been used",
                lead.id
            )));
        }
        self.leads.push(lead);
        self.revision += 1;
        Ok(())
    }

    fn get_lead(&self, id: &Uuid) -> Result<Lead> {
        let pos = self.position(id)?;
        Ok(self.leads[pos].clone())
    }

    fn list_leads(&self) -> Result<Vec<Lead>> {
        Ok(self.leads.clone())
    }

    fn modify_lead(&mut self, id: &Uuid, edit: &mut dyn FnMut(&mut Lead)) -> Result<Lead> {
        let pos = self.position(id)?;
        let lead = &mut self.leads[pos];
        let created_at = lead.created_at;

        edit(lead);

        lead.id = *id;
        lead.created_at = created_at;
        self.revision += 1;
        Ok(lead.clone())
    }

    fn delete_lead(&mut self, id: &Uuid) -> Result<Lead> {
        let pos = self.position(id)?;
        let removed = self.leads.remove(pos);
        self.revision += 1;
        Ok(removed)
    }

    fn is_issued(&self, id: &Uuid) -> bool {
        self.issued.contains(id)
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{sample_leads, LeadInput, LeadStatus, Priority};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// The three demo leads: qualified/1200, proposal/2400, new/3600.
        pub fn with_sample_leads(mut self) -> Self {
            for lead in sample_leads() {
                self.store.insert_lead(lead).unwrap();
            }
            self
        }

        pub fn with_leads(mut self, count: usize) -> Self {
            for i in 0..count {
                let input = LeadInput::new(
                    format!("Test Lead {}", i + 1),
                    format!("lead{}@example.com", i + 1),
                    format!("+1 555-{:04}", i + 1),
                    "Auto Insurance",
                );
                self.store
                    .insert_lead(Lead::from_input(input, chrono::Utc::now()))
                    .unwrap();
            }
            self
        }

        pub fn with_lead(mut self, name: &str, status: LeadStatus, value: f64) -> Self {
            let input = LeadInput::new(
                name,
                format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                "+1 555-0000",
                "Home Insurance",
            )
            .with_status(status)
            .with_value(value);
            self.store
                .insert_lead(Lead::from_input(input, chrono::Utc::now()))
                .unwrap();
            self
        }

        pub fn with_priority_lead(mut self, name: &str, priority: Priority) -> Self {
            let input = LeadInput::new(
                name,
                format!("{}@example.com", name.to_lowercase()),
                "+1 555-0001",
                "Life Insurance",
            )
            .with_priority(priority);
            self.store
                .insert_lead(Lead::from_input(input, chrono::Utc::now()))
                .unwrap();
            self
        }

        pub fn ids(&self) -> Vec<Uuid> {
            self.store
                .list_leads()
                .unwrap()
                .into_iter()
                .map(|l| l.id)
                .collect()
        }
    }
}
