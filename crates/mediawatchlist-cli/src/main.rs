use clap::{ArgAction, Args, Parser, Subcommand};
use commands::{config, query, search, status, submit};
use watchlist_models::{CannedQuery, SearchCategory, SortKey};

mod commands;
mod context;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "mediawatchlist")]
#[command(about = "MediaWatchList - log what you watch and query the shared watch list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Backend URL (overrides config file and MEDIAWATCHLIST_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API and database liveness
    Status,
    /// Run one of the canned reports
    #[command(long_about = "Run a fixed report against the backend and print the result table. Reports: top-rated-media, top-users-completed, top-media-completions, avg-rating-genre, users-rated-high, low-rated-recent.")]
    Query {
        /// Report to run
        #[arg(value_parser = parse_report, required_unless_present = "all")]
        report: Option<CannedQuery>,

        /// Run every report in turn
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "report")]
        all: bool,
    },
    /// Search media, users or genres
    #[command(long_about = "Search the backend. Valid sorts depend on the category: media (az, za, rating_desc, rating_asc, year_desc, year_asc), user (az, za, count_desc, count_asc), genre (az, za, count_desc, count_asc, rating_desc, rating_asc).")]
    Search {
        /// Search text (empty matches everything)
        #[arg(default_value = "")]
        term: String,

        /// Category to search in
        #[arg(long, short, value_parser = parse_category, default_value = "media")]
        category: SearchCategory,

        /// Sort key, must be valid for the category (defaults to az)
        #[arg(long, short, value_parser = parse_sort)]
        sort: Option<SortKey>,
    },
    /// Submit a new media entry
    #[command(long_about = "Submit a media entry. Fields not given as flags are prompted for when running in a terminal. For media type, genre and platform, a value outside the listed choices is sent as custom text.")]
    Submit(SubmitArgs),
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Args, Default)]
pub struct SubmitArgs {
    #[arg(long)]
    pub firstname: Option<String>,
    #[arg(long)]
    pub lastname: Option<String>,
    #[arg(long)]
    pub profilename: Option<String>,
    #[arg(long)]
    pub mediatype: Option<String>,
    #[arg(long)]
    pub medianame: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub releaseyear: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    /// Rating from 1 to 5
    #[arg(long)]
    pub rating: Option<String>,
    /// Free-text review
    #[arg(long)]
    pub ratingtext: Option<String>,
    /// Planning, Watching, Completed or "Haven't Watched"
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub platform: Option<String>,

    /// Never prompt; fail if a required field is missing
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_prompt: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a configuration file with defaults
    Init {
        /// Backend URL to store
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

fn parse_report(s: &str) -> Result<CannedQuery, String> {
    s.parse().map_err(|e: watchlist_models::ModelError| e.to_string())
}

fn parse_category(s: &str) -> Result<SearchCategory, String> {
    s.parse().map_err(|e: watchlist_models::ModelError| e.to_string())
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    s.parse().map_err(|e: watchlist_models::ModelError| e.to_string())
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let output = output::Output::new(cli.output, cli.quiet);

    // Config first: it decides where and how to log
    let settings = context::load_config(cli.api_url.as_deref())?;
    logging::init_logging(cli.verbose, cli.quiet, &settings.config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    match cli.command {
        Commands::Status => {
            let ctx = settings.connect()?;
            status::run_status(&ctx, &output).await
        }
        Commands::Query { report, all } => {
            let ctx = settings.connect()?;
            let reports = if all { CannedQuery::ALL.to_vec() } else { report.into_iter().collect() };
            query::run_query(&ctx, &reports, &output).await
        }
        Commands::Search { term, category, sort } => {
            let ctx = settings.connect()?;
            search::run_search(&ctx, term, category, sort, &output).await
        }
        Commands::Submit(args) => {
            let ctx = settings.connect()?;
            submit::run_submit(&ctx, args, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &settings, &output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_sort_is_parsed() {
        let cli = Cli::try_parse_from(["mediawatchlist", "search", "dune", "--category", "genre", "--sort", "count_desc"]).unwrap();
        match cli.command {
            Commands::Search { term, category, sort } => {
                assert_eq!(term, "dune");
                assert_eq!(category, SearchCategory::Genre);
                assert_eq!(sort, Some(SortKey::CountDesc));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_query_requires_report_or_all() {
        assert!(Cli::try_parse_from(["mediawatchlist", "query"]).is_err());
        assert!(Cli::try_parse_from(["mediawatchlist", "query", "--all"]).is_ok());
        assert!(Cli::try_parse_from(["mediawatchlist", "query", "top-rated-media"]).is_ok());
    }
}
