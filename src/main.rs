//! acm-crawler main entry point
//!
//! This is the command-line interface for the co-authorship graph crawler.

use acm_crawler::config::{load_config_with_hash, Config};
use acm_crawler::crawler::{Explorer, TraversalSettings};
use acm_crawler::model::Author;
use acm_crawler::render::HttpRenderer;
use acm_crawler::storage::open_store;
use anyhow::Context;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// acm-crawler: lazy co-authorship graph discovery
///
/// Starting from one author profile, acm-crawler follows colleague links
/// breadth-first, storing authors, papers, authorship edges and BibTeX
/// citations in a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "acm-crawler")]
#[command(version)]
#[command(about = "Discovers co-authorship graphs from author profiles", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// External id of the author to start from
    #[arg(value_name = "SEED_ID", required_unless_present_any = ["stats", "export_bibtex"])]
    seed_id: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Stop after visiting this many authors (overrides the config)
    #[arg(long, value_name = "N")]
    max_authors: Option<NonZeroUsize>,

    /// Only discover colleagues; write nothing to the database
    #[arg(long)]
    no_store: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "export_bibtex")]
    stats: bool,

    /// Write every stored BibTeX record to the configured file and exit
    #[arg(long, conflicts_with = "stats")]
    export_bibtex: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(max_authors) = cli.max_authors {
        config.exploration.max_authors = max_authors.get();
    }

    if cli.stats {
        handle_stats(&config)
    } else if cli.export_bibtex {
        handle_export_bibtex(&config)
    } else {
        let seed_id = cli
            .seed_id
            .context("a seed author id is required to explore")?;
        handle_explore(&config, &seed_id, cli.no_store)
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("acm_crawler=info,warn"),
            1 => EnvFilter::new("acm_crawler=debug,info"),
            2 => EnvFilter::new("acm_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use acm_crawler::output::{load_statistics, print_statistics};

    println!("Database: {}\n", config.output.database_path);

    let store = open_store(Path::new(&config.output.database_path))
        .context("failed to open database")?;
    let stats = load_statistics(store.as_ref())?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --export-bibtex mode: writes the stored citations to disk
fn handle_export_bibtex(config: &Config) -> anyhow::Result<()> {
    use acm_crawler::output::export_bibtex;

    println!("=== Exporting BibTeX ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.bibtex_path);
    println!();

    let store = open_store(Path::new(&config.output.database_path))
        .context("failed to open database")?;
    let written = export_bibtex(store.as_ref(), Path::new(&config.output.bibtex_path))
        .with_context(|| format!("failed to write {}", config.output.bibtex_path))?;

    println!("✓ {} records exported to: {}", written, config.output.bibtex_path);

    Ok(())
}

/// Handles the main exploration
fn handle_explore(config: &Config, seed_id: &str, no_store: bool) -> anyhow::Result<()> {
    use acm_crawler::output::print_summary;

    let seed = Author::new(seed_id)?;
    let settings = TraversalSettings::from_config(config);

    let user_agent = config.user_agent.clone();
    let renderer_config = config.renderer.clone();
    let mut explorer = Explorer::new(settings, move || {
        HttpRenderer::new(&user_agent, &renderer_config)
    })
    .with_limits(
        config.exploration.max_authors,
        config.exploration.max_depth,
    );

    if no_store {
        tracing::info!("Running without a store; only colleagues are discovered");
    } else {
        let store = open_store(Path::new(&config.output.database_path))
            .context("failed to open database")?;
        explorer = explorer.with_store(store);
    }

    tracing::info!("Starting exploration from {}", seed);
    let summary = explorer.explore(seed)?;
    print_summary(&summary);

    Ok(())
}
