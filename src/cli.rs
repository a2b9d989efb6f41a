use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Elo ratings for bracket tournament series")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, default_value = "bracket_elo.toml")]
    pub config: PathBuf,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Post-computation filters, applied in field order.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct FilterArgs {
    /// Minimum sets played
    #[arg(long)]
    pub min_games: Option<u32>,

    /// Minimum sets won
    #[arg(long)]
    pub min_wins: Option<u32>,

    /// Minimum tournaments with a final placement
    #[arg(long)]
    pub min_tournaments: Option<usize>,

    /// Minimum rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// File with one competitor name per line to keep
    #[arg(long)]
    pub include: Option<PathBuf>,

    /// Keep only the N highest-rated competitors
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch configured tournaments from Challonge into the cache
    Fetch {
        /// Ignore cached responses and fetch everything again
        #[arg(short, long)]
        force: bool,
    },
    /// Compute ratings, save the snapshot and write reports
    Calculate {
        #[command(flatten)]
        filters: FilterArgs,

        /// Fetch tournaments again before computing
        #[arg(long)]
        refetch: bool,

        /// Continue from a previously saved snapshot
        #[arg(long)]
        resume: Option<PathBuf>,
    },
    /// Print the ranked list from the saved snapshot
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        /// Append a summary per competitor
        #[arg(short, long)]
        summaries: bool,

        /// Append the matchup matrix
        #[arg(short, long)]
        matrix: bool,
    },
    /// Head-to-head records of one competitor
    H2h {
        name: String,
        /// Show every set against this opponent
        opponent: Option<String>,
    },
    /// Ratings after a hypothetical set
    Predict {
        winner: String,
        loser: String,
        /// Score from the winner's side, e.g. 2-1
        score: String,
    },
    /// Print the seed order for an upcoming tournament
    ///
    /// Nothing is written back to Challonge; apply the order by hand.
    Seed {
        /// Challonge tournament identifier
        tournament: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
