use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use wikilens_client::Config;

mod commands;
mod sections;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "wikilens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Search Wikidata items by text
    ///
    /// Queries the wbsearchentities action and prints a numbered list of
    /// matching items with their IDs and short descriptions. Items without a
    /// label in the search language are listed under their ID.
    Search {
        /// Text to search for
        query: String,

        /// Maximum number of results (default: search_limit from config)
        #[arg(long, short = 'n')]
        limit: Option<u32>,

        /// Language to search and label results in
        #[arg(long)]
        lang: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch and display one entity
    ///
    /// Downloads the entity document from Special:EntityData, normalizes it
    /// and prints it in five sections:
    ///
    /// - Properties: core facts (instance of, dates, places, ...)
    /// - Identifiers: external identifiers (VIAF, GND, ...)
    /// - Statements: every other claim
    /// - Links: sitelinks to Wikipedia and sister projects
    /// - Languages: labels, descriptions and aliases per language
    ///
    /// ID may be a bare ID (Q42) or a concept URI
    /// (http://www.wikidata.org/entity/Q42).
    Entity {
        /// Entity ID, e.g. Q42
        id: String,

        /// Preferred language for the heading
        #[arg(long)]
        lang: Option<String>,

        /// Print the normalized entity as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize a saved entity document offline
    ///
    /// Reads a Special:EntityData JSON document (or a bare entity object,
    /// as found in dumps) and prints the normalized entity as JSON.
    Normalize {
        /// Path to the JSON document
        file: PathBuf,

        /// Entity to pick when the document holds several
        #[arg(long)]
        id: Option<String>,
    },
    /// Browse search results and entities interactively
    Explore {
        /// Text to search for
        query: String,

        /// Language to search and label results in
        #[arg(long)]
        lang: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one config value, or the whole config file
    Get {
        /// Config key (e.g. language, search_limit)
        key: Option<String>,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let language = match &cli.command {
        Commands::Search { lang, .. }
        | Commands::Entity { lang, .. }
        | Commands::Explore { lang, .. } => lang.clone(),
        _ => None,
    };
    let config = Config::load_with_language(language)?;

    // The explorer owns the terminal; keep log output off it.
    if !matches!(cli.command, Commands::Explore { .. }) {
        twyg::setup(config.logging.clone()).map_err(|e| anyhow!("{e:?}"))?;
    }

    match cli.command {
        Commands::Search {
            query, limit, json, ..
        } => {
            commands::run_search(&config, &query, limit, json).await?;
        }
        Commands::Entity { id, json, .. } => {
            commands::run_entity(&config, &id, json).await?;
        }
        Commands::Normalize { file, id } => {
            commands::run_normalize(&file, id.as_deref())?;
        }
        Commands::Explore { query, .. } => {
            commands::run_explore(&config, &query).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config()?,
            ConfigAction::Get { key } => commands::config::get_config(key)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
