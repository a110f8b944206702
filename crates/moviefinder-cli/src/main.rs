use clap::{ArgAction, Parser, Subcommand};
use commands::{chat, clear, config, history, search, stats};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviefinder")]
#[command(about = "MovieFinder - find a movie in Kinopoisk and TMDB and where to watch it")]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a movie
    #[command(long_about = "Look the query up in every configured catalog at once, combine the answers, find watch-online links and record the search in your history.")]
    Search {
        /// Free-text query, e.g. a title with an optional year
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Whose history the search is recorded in (defaults to $MOVIEFINDER_REQUESTER or 0)
        #[arg(long)]
        requester: Option<i64>,
    },
    /// Show previous searches, newest first
    History {
        #[arg(long)]
        requester: Option<i64>,
    },
    /// Show how often each movie was found
    Stats {
        #[arg(long)]
        requester: Option<i64>,
    },
    /// Interactive session speaking the bot commands (/search, /history, /stats, ...)
    Chat {
        #[arg(long)]
        requester: Option<i64>,
    },
    /// Manage configuration and API keys
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Remove stored history or credentials
    Clear {
        /// Clear history and credentials
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["history", "credentials"])]
        all: bool,

        /// Clear search history
        #[arg(long, action = ArgAction::SetTrue)]
        history: bool,

        /// Clear stored API keys
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show API keys unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store API keys; prompts for any not given on the command line
    #[command(long_about = "Store API keys for Kinopoisk (kinopoiskapiunofficial.tech), TMDB and SerpApi. Keys from KP_UNOFFICIAL_API_KEY, TMDB_API_KEY and SERP_API_KEY take precedence at runtime.")]
    Keys {
        #[arg(long)]
        kinopoisk: Option<String>,

        #[arg(long)]
        tmdb: Option<String>,

        #[arg(long)]
        serpapi: Option<String>,
    },

    /// Set the sites searched for watch-online links, in display order
    Sites {
        #[arg(required = true, num_args = 1..)]
        sites: Vec<String>,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // A missing .env is fine; anything else set there is picked up like real env vars
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query, requester } => {
            search::run_search(&query.join(" "), context::resolve_requester(requester), &output).await
        }
        Commands::History { requester } => history::run_history(context::resolve_requester(requester), &output).await,
        Commands::Stats { requester } => stats::run_stats(context::resolve_requester(requester), &output).await,
        Commands::Chat { requester } => chat::run_chat(context::resolve_requester(requester), &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
        Commands::Clear { all, history, credentials } => clear::run_clear(all, history, credentials, &output).await,
    }
}
