use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use cricket_stats_scraper::apis::{parse_payload, read_url_list};
use cricket_stats_scraper::config::{Config, ExportFormat};
use cricket_stats_scraper::error::ScraperError;
use cricket_stats_scraper::infra::http_client::ReqwestHttp;
use cricket_stats_scraper::logging;
use cricket_stats_scraper::pipeline::export::export_table;
use cricket_stats_scraper::pipeline::processing::{flatten, select_career};
use cricket_stats_scraper::pipeline::{CollectionReport, Collector, PlayerSource};
use cricket_stats_scraper::types::PlayerId;

#[derive(Parser)]
#[command(name = "cricket_stats_scraper")]
#[command(about = "Collect IPL player career statistics into CSV/JSON/SQLite")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for exported files
    #[arg(long, global = true)]
    output_dir: Option<String>,

    /// Export formats (comma-separated). Available: csv, json, sqlite
    #[arg(long, global = true)]
    formats: Option<String>,

    /// Minimum delay between stats feed requests in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover players from team roster pages and collect their stats
    Teams {
        /// Team slugs (comma-separated); defaults to the configured list
        #[arg(long)]
        teams: Option<String>,
    },
    /// Collect stats for an explicit list of player profile URLs
    Players {
        /// Profile URLs (comma-separated)
        #[arg(long)]
        urls: Option<String>,
        /// File with one profile URL per line
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Flatten a saved stats feed response and print the row as JSON
    Parse {
        /// Saved `<id>-playerstats.js` response
        path: PathBuf,
        /// Player id to put on the row
        #[arg(long, default_value = "0")]
        id: String,
    },
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };
    config.apply_env_overrides();

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(formats) = &cli.formats {
        config.output.formats = split_list(formats)
            .iter()
            .map(|f| f.parse::<ExportFormat>())
            .collect::<Result<_, _>>()?;
    }
    if let Some(delay) = cli.delay_ms {
        config.run.stats_interval_ms = delay;
    }

    config.validate()?;
    Ok(config)
}

fn player_source(command: &Commands, config: &Config) -> anyhow::Result<PlayerSource> {
    match command {
        Commands::Teams { teams } => {
            let teams = teams
                .as_deref()
                .map(split_list)
                .unwrap_or_else(|| config.run.teams.clone());
            Ok(PlayerSource::Teams(teams))
        }
        Commands::Players { urls, file } => {
            let mut list = urls.as_deref().map(split_list).unwrap_or_default();
            if let Some(path) = file {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading URL list {}", path.display()))?;
                list.extend(read_url_list(&text));
            }
            if list.is_empty() {
                list = config.run.player_urls.clone();
            }
            Ok(PlayerSource::Urls(list))
        }
        Commands::Parse { .. } => bail!("parse does not collect from a source"),
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed the run is never interrupted.
async fn interrupt_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn print_summary(report: &CollectionReport, outputs: &[PathBuf]) {
    println!("\n📊 Collection Results:");
    println!("   Players found: {}", report.identifiers);
    println!("   Collected: {}", report.collected);
    println!("   Skipped: {}", report.skipped);
    if report.interrupted {
        println!("   ⚠️  Interrupted: partial results");
    }
    println!("   Unique names: {}", report.table.unique_full_names());
    for path in outputs {
        println!("   Output file: {}", path.display());
    }

    if !report.errors.is_empty() {
        println!("\n⚠️  Errors encountered:");
        for error in &report.errors {
            println!("   - {}", error);
        }
    }
}

fn run_parse(path: &Path, id: &str) -> anyhow::Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let payload = parse_payload(&text)?;
    let row = flatten(&PlayerId::new(id), &select_career(&payload));
    println!("{}", serde_json::to_string_pretty(&row)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    if let Commands::Parse { path, id } = &cli.command {
        return run_parse(path, id);
    }

    let config = load_config(&cli)?;
    let source = player_source(&cli.command, &config)?;

    println!("🏏 IPL Career Stats Scraper");
    match &source {
        PlayerSource::Teams(teams) => println!("📋 Scanning {} team rosters", teams.len()),
        PlayerSource::Urls(urls) => println!("📝 Processing {} player URLs", urls.len()),
    }

    let http = Arc::new(ReqwestHttp::new(&config.source)?);
    let collector = Collector::new(http, &config);

    let report = match collector.run_until(&source, interrupt_signal()).await {
        Ok(report) => report,
        Err(ScraperError::NothingCollected(reason)) => {
            error!("Nothing collected: {}", reason);
            println!("\n❌ No data collected!");
            bail!("nothing collected: {reason}");
        }
        Err(e) => return Err(e.into()),
    };

    let outputs = export_table(&report.table, &config.output)?;
    if outputs.is_empty() {
        warn!("No export formats configured; nothing written");
    }
    info!("Run finished with {} rows", report.table.len());

    print_summary(&report, &outputs);
    println!("\n✅ Success! Total players: {}", report.table.len());
    Ok(())
}
