//! # Leadboard CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file only invokes
//! `cli::run()` and handles process termination.
//!
//! Every invocation is one session. The store is seeded from `--data <snapshot.json>` when
//! given, otherwise from the built-in demo leads, and is dropped when the process exits.
//! Use `export` to capture the state of a session and `--data` to start the next one from it.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
