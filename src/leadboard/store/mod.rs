//! # Storage Layer
//!
//! This module defines the storage abstraction for leadboard. The [`DataStore`] trait
//! is the single owner of lead records; everything above it (commands, API, CLI) works
//! on copies and must come back through the trait to change anything.
//!
//! ## Guarantees Every Implementation Gives
//!
//! - **Insertion order**: [`DataStore::list_leads`] returns records in the order they were
//!   inserted. Updates never move a record; only inserts and deletes change the sequence.
//! - **Identity**: an id is accepted by [`DataStore::insert_lead`] at most once for the
//!   lifetime of the store, even after the record carrying it was deleted.
//! - **Immutable fields**: [`DataStore::modify_lead`] restores `id` and `created_at`
//!   after the edit closure runs, so no edit path can rewrite them.
//! - **Read-your-writes**: every mutating call is visible to the very next read.
//! - **Revision**: [`DataStore::revision`] increases by one on every successful mutation.
//!   Derived views such as the API's metrics cache use it to know when to recompute.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the only backend. Leads live for the process lifetime.

use crate::error::Result;
use crate::model::Lead;
use uuid::Uuid;

pub mod memory;

/// Abstract interface for lead storage.
pub trait DataStore {
    /// Insert a new record. Fails with `LeadError::Store` if the id was ever issued.
    fn insert_lead(&mut self, lead: Lead) -> Result<()>;

    /// Get a copy of a lead by id
    fn get_lead(&self, id: &Uuid) -> Result<Lead>;

    /// All leads in insertion order
    fn list_leads(&self) -> Result<Vec<Lead>>;

    /// Apply `edit` to the stored record in place and return the result.
    ///
    /// The read and the write happen inside one call, so concurrent-looking edits
    /// such as two note appends can't drop each other.
    fn modify_lead(&mut self, id: &Uuid, edit: &mut dyn FnMut(&mut Lead)) -> Result<Lead>;

    /// Remove a lead, returning the removed record
    fn delete_lead(&mut self, id: &Uuid) -> Result<Lead>;

    /// True if `id` was ever accepted by `insert_lead`, including ids of deleted leads
    fn is_issued(&self, id: &Uuid) -> bool;

    /// Mutation counter, bumped once per successful insert/modify/delete
    fn revision(&self) -> u64;
}
