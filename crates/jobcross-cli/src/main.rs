mod bookmarks;
mod commands;
mod config;
mod error;
mod history;
mod locality;
mod mentors;
mod pipeline;
mod render;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jobcross_common::api::ApiClient;
use jobcross_common::model::SearchRequest;

use config::Config;
use history::RecentSearches;
use pipeline::{FilterOptions, LocationMode, SortKey};

/// Terminal client for the job cross-reference backend: search job
/// postings against your skills, filter them locally, and track mentor
/// connections and bookmarks.
#[derive(Parser)]
#[command(name = "jobcross", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search job postings and render the filtered results
    Search(SearchArgs),
    /// Mentor dataset statistics
    Stats,
    /// List mentor connections at a company
    Mentors {
        company: String,
    },
    /// List saved jobs
    Bookmarks {
        /// Remove a saved job by id instead of listing
        #[arg(long)]
        remove: Option<String>,
    },
    /// List recent searches, or replay one with --run
    Recent {
        /// Replay the Nth most recent search (1-based)
        #[arg(long)]
        run: Option<usize>,
    },
    /// Download a generated report
    Report {
        filename: String,
        /// Output path (defaults to the report's file name)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Skills to match against, comma separated
    #[arg(long, value_delimiter = ',')]
    skills: Vec<String>,
    /// Interests, comma separated
    #[arg(long, value_delimiter = ',')]
    interests: Vec<String>,
    /// Your location as "City, ST"
    #[arg(long, default_value = "")]
    location: String,
    /// Search US-wide instead of near your location
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    us_wide: bool,
    /// Upload a resume and prefill skills/location from it
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Case-insensitive text filter on title, company, location
    #[arg(long)]
    filter: Option<String>,
    /// Minimum match score (0-100)
    #[arg(long)]
    min_score: Option<f64>,
    /// Which locations to keep
    #[arg(long, value_enum, default_value_t = LocationMode::All)]
    location_mode: LocationMode,
    /// Only jobs with mentor connections
    #[arg(long)]
    mentors_only: bool,
    /// Result ordering
    #[arg(long, value_enum, default_value_t = SortKey::ScoreDesc)]
    sort: SortKey,
    /// Toggle the bookmark on the Nth rendered card (repeatable)
    #[arg(long = "bookmark")]
    bookmark: Vec<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is the rendered output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let api = ApiClient::new(config.api.clone())?;
    let history = RecentSearches::new(&config.data_dir);

    let result = match cli.command {
        Command::Search(args) => {
            let request = SearchRequest {
                skills: split_terms(args.skills),
                interests: split_terms(args.interests),
                location: args.location.trim().to_string(),
                us_wide: args.us_wide,
            };
            let opts = FilterOptions {
                text: args.filter,
                min_score: args.min_score,
                location_mode: args.location_mode,
                mentors_only: args.mentors_only,
                sort: args.sort,
            };
            commands::run_search(
                &api,
                &history,
                request,
                &opts,
                args.resume.as_deref(),
                &args.bookmark,
            )
            .await
        }
        Command::Stats => commands::run_stats(&api).await,
        Command::Mentors { company } => commands::run_mentors(&api, &company).await,
        Command::Bookmarks { remove } => match remove {
            Some(job_id) => commands::run_bookmarks_remove(&api, &job_id).await,
            None => commands::run_bookmarks_list(&api).await,
        },
        Command::Recent { run } => commands::run_recent(&api, &history, run).await,
        Command::Report { filename, out } => {
            commands::run_report(&api, &filename, out.as_deref()).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

/// Trim comma-split terms and drop empties, the way the search form does.
fn split_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
