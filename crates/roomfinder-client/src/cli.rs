//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// roomfinder - Free rooms on campus, right now or later today
#[derive(Debug, Parser)]
#[command(name = "roomfinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ROOMFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Maximum number of rooms to display
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// JSON output from the flag or the config file.
    pub fn wants_json(&self, configured: bool) -> bool {
        self.json || configured
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List free rooms (the default, from now until the next full hour)
    Free(QueryArgs),

    /// List the room catalog
    Rooms,

    /// Show the rest of today's plan for one room
    Schedule {
        /// Room number, e.g. 09-010
        room: String,
    },

    /// Show live seat occupancy of the study areas
    Occupancy,

    /// Print the indoor-map directions link between two rooms
    Route {
        /// Starting room
        from: String,

        /// Destination room
        to: String,

        /// Open the link in the default browser
        #[arg(long)]
        open: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options of a free-room query.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Start time as HH:MM, or "now"
    #[arg(long, short)]
    pub start: Option<String>,

    /// End time as HH:MM; without it the start is a single instant
    #[arg(long, short)]
    pub end: Option<String>,

    /// Date as YYYY-MM-DD (default: today)
    #[arg(long, short)]
    pub date: Option<String>,

    /// Only rooms with at most this many seats
    #[arg(long)]
    pub max_seats: Option<u32>,

    /// Rank rooms by distance from this room
    #[arg(long)]
    pub near: Option<String>,
}

impl QueryArgs {
    /// Returns true if no option was given.
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.date.is_none()
            && self.max_seats.is_none()
            && self.near.is_none()
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
