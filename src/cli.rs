use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sports competitor rankings dashboard")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Summary metrics, top competitors and competitors per country
    Home,
    /// Search and filter competitors
    Search {
        /// Case-insensitive name substring
        #[arg(short, long)]
        name: Option<String>,
        /// Case-insensitive country substring
        #[arg(short, long)]
        country: Option<String>,
        /// Lowest rank to include (1-100, defaults to 1)
        #[arg(long)]
        min_rank: Option<i64>,
        /// Highest rank to include (1-100, defaults to 10)
        #[arg(long)]
        max_rank: Option<i64>,
        /// Minimum points (0-5000, defaults to 1000)
        #[arg(short = 'p', long)]
        min_points: Option<f64>,
    },
    /// Look up a competitor's ranking details by name
    Detail {
        /// Full or partial competitor name
        name: Option<String>,
    },
    /// Competitor counts and average points per country
    Countries,
    /// Top-ranked competitors and highest points
    Leaderboards,
    /// Start the JSON API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Print shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
