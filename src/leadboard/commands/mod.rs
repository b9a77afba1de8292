//! # Command Layer
//!
//! This module contains the **core business logic** of leadboard. Each command lives in its
//! own submodule and implements pure Rust functions over a [`DataStore`](crate::store::DataStore).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Validate input and stamp identity/timestamps on create
//! - Apply partial updates, stage moves and note appends through the store
//! - Build the read views (filtered list, board, metrics)
//! - Return structured [`CmdResult`] values, never strings
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, stderr, or terminal concerns
//! - **Argument parsing**: that's the CLI layer's job
//! - **Fail on a missing id** for update/delete/move/note: an unknown id is a no-op that
//!   leaves a warning in `messages`, so deleting twice or updating a just-deleted lead is safe
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `affected_leads`: leads created or changed, in their post-operation state
//! - `listed_leads`: leads to display, paired with their canonical position
//! - `board` / `metrics` / `stages`: read views for the board and analytics commands
//! - `messages`: leveled messages (info, success, warning, error)
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and check `CmdResult` contents plus the store state
//! afterwards. This is where most of the tests live.
//!
//! ## Command Modules
//!
//! - [`create`]: Validate and insert new leads
//! - [`list`]: Filtered listing
//! - [`view`]: Single lead lookup
//! - [`update`]: Partial field updates
//! - [`status`]: Stage changes and board moves
//! - [`notes`]: Append a note, or replace the note history
//! - [`delete`]: Remove leads
//! - [`board`]: Stage columns
//! - [`metrics`]: Dashboard metrics and stage summaries
//! - [`import`] / [`export`]: JSON snapshots of the lead set
//! - [`helpers`]: Shared utilities (selector resolution)

use serde::Serialize;

use crate::analytics::{Metrics, StageSummary};
use crate::index::DisplayLead;
use crate::model::Lead;
use crate::query::Board;

pub mod board;
pub mod create;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod import;
pub mod list;
pub mod metrics;
pub mod notes;
pub mod status;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_leads: Vec<Lead>,
    pub listed_leads: Vec<DisplayLead>,
    pub board: Option<Board>,
    pub metrics: Option<Metrics>,
    pub stages: Vec<StageSummary>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_leads(mut self, leads: Vec<Lead>) -> Self {
        self.affected_leads = leads;
        self
    }

    pub fn with_listed_leads(mut self, leads: Vec<DisplayLead>) -> Self {
        self.listed_leads = leads;
        self
    }

    pub fn with_board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_stages(mut self, stages: Vec<StageSummary>) -> Self {
        self.stages = stages;
        self
    }

    /// True if any message is a warning or error.
    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
