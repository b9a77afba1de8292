//! # CLI Layer
//!
//! This is **one possible UI client** for leadboard, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the `leadboard` library.
//!
//! ## Structure
//!
//! - `setup.rs`: clap argument definitions
//! - `commands.rs`: logger and context setup, dispatch, per-command handlers
//! - `print.rs`: rendering of `CmdResult` contents for the terminal
//!
//! ## Lead References
//!
//! Commands that act on one lead take a reference: the position shown by `list`
//! (`leadboard show 2`), a full id, or an id prefix of at least four characters.

mod commands;
mod print;
pub mod setup;

pub use commands::run;
