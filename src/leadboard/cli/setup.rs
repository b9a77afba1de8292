use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "leadboard", bin_name = "leadboard", version)]
#[command(about = "Track sales leads through a stage pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON snapshot to seed the session with (defaults to the demo leads)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Directory holding config.json (else $LEADBOARD_CONFIG_DIR, else the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List leads, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Substring of name or email (any case), or of phone
        #[arg(short, long)]
        search: Option<String>,

        /// Only leads in this stage (new, contacted, qualified, proposal, closed, lost)
        #[arg(long)]
        status: Option<String>,

        /// Only leads with this priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,

        /// Print the matching leads as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every field of a lead
    #[command(alias = "v")]
    Show {
        /// Position, id or id prefix
        lead: String,
    },

    /// Add a lead
    #[command(alias = "n")]
    Add {
        name: String,
        email: String,
        phone: String,
        product: String,

        /// Where the lead came from (defaults to the configured source)
        #[arg(long)]
        source: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        /// Estimated value
        #[arg(long)]
        value: Option<f64>,

        /// Owner (defaults to the configured assignee)
        #[arg(short, long)]
        assign: Option<String>,

        /// First message from the lead, stored as the first note
        #[arg(long)]
        note: Option<String>,
    },

    /// Change fields of a lead
    #[command(alias = "e")]
    Update {
        /// Position, id or id prefix
        lead: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        product: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long)]
        source: Option<String>,

        #[arg(long)]
        value: Option<f64>,

        #[arg(long)]
        assign: Option<String>,
    },

    /// Move a lead to another stage
    #[command(alias = "mv")]
    Move {
        /// Position, id or id prefix
        lead: String,

        /// Target stage
        stage: String,
    },

    /// Append a timestamped note to a lead
    Note {
        /// Position, id or id prefix
        lead: String,

        /// Note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete a lead
    #[command(alias = "rm")]
    Delete {
        /// Position, id or id prefix
        lead: String,
    },

    /// Show the pipeline board
    #[command(alias = "b")]
    Board,

    /// Show dashboard metrics
    Metrics {
        /// Print the metrics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the session's leads as a JSON snapshot
    Export,
}
