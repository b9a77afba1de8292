//! # Leadboard Architecture
//!
//! Leadboard is a **UI-agnostic lead pipeline library**: the single source of truth for lead
//! records, the rules for moving leads between sales stages, the search/filter logic, and the
//! metrics derived from the live lead set. The `leadboard` binary is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the store handle         │
//! │  - Normalizes inputs (positions / prefixes → UUIDs)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic, returns CmdResult                   │
//! │  - Query (query.rs) and aggregation (analytics.rs) engines  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - InMemoryStore (insertion-ordered, revisioned)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns `Result<CmdResult>` or
//! plain data, and never writes to stdout/stderr. Diagnostics go through the `log` facade;
//! the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`query`]: Search/status/priority filtering and the stage board
//! - [`analytics`]: Metrics, bar widths, stage summaries, metrics cache
//! - [`store`]: Storage abstraction and the in-memory implementation
//! - [`model`]: Core data types (`Lead`, `LeadStatus`, `Priority`, `LeadInput`, `LeadPatch`)
//! - [`index`]: Display positions and lead references
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod analytics;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod query;
pub mod store;
