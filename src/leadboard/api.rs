//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point for
//! all lead operations, whichever UI drives them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the store**: a [`LeadsApi`] is the explicitly constructed store handle. Build it
//!   with [`LeadsApi::new`], operate on it, and take the store back with [`LeadsApi::into_store`].
//!   There is no global instance.
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (user references such as `"2"` or `"5a1e"` to lead ids)
//! - **Supplies configured defaults** (assignee, source, follow-up delay, note timestamps)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//!
//! ## Generic Over DataStore
//!
//! `LeadsApi<S: DataStore>` is generic over the storage backend. The only backend today is
//! `InMemoryStore`; the seam is where a durable store would plug in.
//!
//! ## Testing Strategy
//!
//! API tests verify dispatch and argument plumbing, not command logic (tested in the
//! command modules) or storage behavior (tested in store modules).

use chrono::Local;
use uuid::Uuid;

use crate::analytics::{Metrics, MetricsCache};
use crate::commands;
use crate::config::LeadboardConfig;
use crate::error::Result;
use crate::index::LeadSelector;
use crate::model::{Lead, LeadInput, LeadPatch, LeadStatus};
use crate::query::LeadQuery;
use crate::store::DataStore;

/// The main API facade for lead operations.
///
/// All UI clients (CLI, web, etc.) should interact through this API.
pub struct LeadsApi<S: DataStore> {
    store: S,
    config: LeadboardConfig,
    metrics: MetricsCache,
}

impl<S: DataStore> LeadsApi<S> {
    pub fn new(store: S, config: LeadboardConfig) -> Self {
        Self {
            store,
            config,
            metrics: MetricsCache::new(),
        }
    }

    /// Ends the session and hands the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LeadboardConfig {
        &self.config
    }

    /// A [`LeadInput`] carrying this session's configured defaults.
    pub fn new_input(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        product: impl Into<String>,
    ) -> LeadInput {
        LeadInput::from_config(&self.config, name, email, phone, product)
    }

    pub fn create_lead(&mut self, input: LeadInput) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, input)
    }

    /// Creates a lead the way the public capture form does.
    pub fn capture_lead(
        &mut self,
        name: &str,
        email: &str,
        phone: &str,
        product: &str,
        source: &str,
        note: Option<String>,
    ) -> Result<commands::CmdResult> {
        let input = LeadInput::capture(&self.config, name, email, phone, product, source, note);
        commands::create::run(&mut self.store, input)
    }

    pub fn update_lead(&mut self, id: Uuid, patch: &LeadPatch) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, patch)
    }

    pub fn set_status(&mut self, id: Uuid, status: LeadStatus) -> Result<commands::CmdResult> {
        commands::status::set(&mut self.store, id, status)
    }

    pub fn move_lead(&mut self, mv: &commands::status::BoardMove) -> Result<commands::CmdResult> {
        commands::status::apply_move(&mut self.store, mv)
    }

    /// Appends a note stamped with the current local time.
    pub fn append_note(&mut self, id: Uuid, text: &str) -> Result<commands::CmdResult> {
        commands::notes::append(
            &mut self.store,
            id,
            text,
            Local::now(),
            &self.config.note_timestamp_format,
        )
    }

    pub fn replace_notes(&mut self, id: Uuid, notes: Vec<String>) -> Result<commands::CmdResult> {
        commands::notes::replace(&mut self.store, id, notes)
    }

    pub fn delete_lead(&mut self, id: Uuid) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn get_lead(&self, id: Uuid) -> Result<Lead> {
        self.store.get_lead(&id)
    }

    pub fn view_lead(&self, reference: &str) -> Result<commands::CmdResult> {
        let selector: LeadSelector = reference.parse()?;
        commands::view::run(&self.store, &selector)
    }

    pub fn list_leads(&self, query: &LeadQuery) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, query)
    }

    pub fn board(&self) -> Result<commands::CmdResult> {
        commands::board::run(&self.store)
    }

    /// Dashboard metrics, recomputed only when the store changed since the last call.
    pub fn metrics(&mut self) -> Result<commands::CmdResult> {
        let metrics = self.metrics.get(&self.store)?.clone();
        let leads = self.store.list_leads()?;
        Ok(commands::metrics::with_metrics(metrics, &leads))
    }

    /// The cached metrics alone, without stage summaries.
    pub fn current_metrics(&mut self) -> Result<&Metrics> {
        self.metrics.get(&self.store)
    }

    pub fn import_snapshot(&mut self, json: &str) -> Result<commands::CmdResult> {
        let leads = commands::import::parse_snapshot(json)?;
        commands::import::run(&mut self.store, leads)
    }

    pub fn export_snapshot(&self) -> Result<String> {
        commands::export::run(&self.store)
    }

    /// Turns a user reference (position, id or id prefix) into a lead id.
    pub fn resolve(&self, reference: &str) -> Result<Uuid> {
        let selector: LeadSelector = reference.parse()?;
        commands::helpers::resolve_selector(&self.store, &selector)
    }
}

pub use crate::commands::status::BoardMove;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
