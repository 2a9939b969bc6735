//! Collection run: discover player ids, fetch each player's feed, select the
//! career aggregates, flatten, and accumulate the table.
//!
//! Every per-unit failure (a roster page, a profile URL, a player feed) is
//! logged and recorded in the report; only an empty result fails the run.

pub mod export;
pub mod processing;
pub mod table;

use crate::apis::{parse_player_urls, RosterCrawler, StatsFeed};
use crate::app::ports::HttpClientPort;
use crate::config::Config;
use crate::error::{Result, ScraperError};
use crate::rate_limiter::Pacer;
use crate::types::PlayerId;
use metrics::{counter, histogram};
use processing::{flatten, select_career, FlatPlayerRow};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use table::PlayerTable;
use tracing::{debug, info, instrument, warn};

/// Where the player ids of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    /// Team slugs whose roster pages are scanned
    Teams(Vec<String>),
    /// Player profile URLs
    Urls(Vec<String>),
}

/// Outcome of a collection run
#[derive(Debug, Default)]
pub struct CollectionReport {
    /// Unique identifiers discovered
    pub identifiers: usize,
    /// Players that produced a row
    pub collected: usize,
    /// Players skipped on fetch or parse failure
    pub skipped: usize,
    /// Every per-unit failure, in the order encountered
    pub errors: Vec<String>,
    /// The run was stopped before every identifier was processed
    pub interrupted: bool,
    pub table: PlayerTable,
}

/// Deduplicate, keeping first-seen order.
pub fn dedup_ids<I: IntoIterator<Item = PlayerId>>(ids: I) -> Vec<PlayerId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

pub struct Collector {
    roster: RosterCrawler,
    stats: StatsFeed,
    roster_pacer: Pacer,
    stats_pacer: Pacer,
    progress_every: usize,
}

impl Collector {
    pub fn new(http: Arc<dyn HttpClientPort>, config: &Config) -> Self {
        Self {
            roster: RosterCrawler::new(http.clone(), config.source.clone()),
            stats: StatsFeed::new(http, config.source.clone()),
            roster_pacer: Pacer::from_millis(config.run.roster_interval_ms),
            stats_pacer: Pacer::from_millis(config.run.stats_interval_ms),
            progress_every: config.run.progress_every,
        }
    }

    /// Union of all roster pages, deduplicated across teams. A team whose
    /// page cannot be fetched contributes nothing.
    #[instrument(skip(self, teams, errors), fields(team_count = teams.len()))]
    pub async fn discover_from_teams(
        &self,
        teams: &[String],
        errors: &mut Vec<String>,
    ) -> Vec<PlayerId> {
        let mut all_ids = Vec::new();

        for team in teams {
            self.roster_pacer.acquire().await;
            info!("📋 Fetching {}...", team);
            match self.roster.fetch_team_player_ids(team).await {
                Ok(ids) => {
                    counter!("cricket_rosters_fetched_total").increment(1);
                    all_ids.extend(ids);
                }
                Err(e) => {
                    counter!("cricket_roster_errors_total").increment(1);
                    warn!("✗ Roster for {} unavailable: {}", team, e);
                    errors.push(format!("roster {team}: {e}"));
                }
            }
        }

        let unique = dedup_ids(all_ids);
        info!("📊 Total unique players found: {}", unique.len());
        unique
    }

    /// Ids named by explicit profile URLs; bad URLs are reported and skipped.
    pub fn discover_from_urls(&self, urls: &[String], errors: &mut Vec<String>) -> Vec<PlayerId> {
        let (refs, bad) = parse_player_urls(urls);
        errors.extend(bad.iter().map(|e| e.to_string()));
        for player in &refs {
            debug!("{} -> {}", player.slug, player.id);
        }
        dedup_ids(refs.into_iter().map(|player| player.id))
    }

    pub async fn discover(&self, source: &PlayerSource, errors: &mut Vec<String>) -> Vec<PlayerId> {
        match source {
            PlayerSource::Teams(teams) => self.discover_from_teams(teams, errors).await,
            PlayerSource::Urls(urls) => self.discover_from_urls(urls, errors),
        }
    }

    /// Fetch, select and flatten one player.
    pub async fn collect_player(&self, player_id: &PlayerId) -> Result<FlatPlayerRow> {
        let started = Instant::now();
        let payload = self.stats.fetch(player_id).await;
        histogram!("cricket_fetch_duration_seconds").record(started.elapsed().as_secs_f64());

        let career = select_career(&payload?);
        if career.is_empty() {
            debug!("No AllTime aggregate for player {}", player_id);
        }
        Ok(flatten(player_id, &career))
    }

    /// Process ids sequentially; failures skip the player and never abort.
    pub async fn collect(&self, ids: &[PlayerId], report: &mut CollectionReport) {
        self.collect_until(ids, report, std::future::pending::<()>()).await
    }

    /// Like [`Collector::collect`], but stops as soon as `stop` resolves. Rows
    /// collected before the stop stay in the report.
    pub async fn collect_until<F>(&self, ids: &[PlayerId], report: &mut CollectionReport, stop: F)
    where
        F: Future<Output = ()>,
    {
        let total = ids.len();
        info!("⬇️ Downloading stats for {} players", total);
        tokio::pin!(stop);

        for (i, player_id) in ids.iter().enumerate() {
            if self.progress_every > 0 && (i + 1) % self.progress_every == 0 {
                info!("Progress: {}/{} players...", i + 1, total);
            }

            let outcome = tokio::select! {
                biased;
                _ = &mut stop => None,
                result = async {
                    self.stats_pacer.acquire().await;
                    self.collect_player(player_id).await
                } => Some(result),
            };

            match outcome {
                None => {
                    warn!("⚠️ Interrupted after {}/{} players; keeping partial results", i, total);
                    report.interrupted = true;
                    break;
                }
                Some(Ok(row)) => {
                    counter!("cricket_players_collected_total").increment(1);
                    report.collected += 1;
                    report.table.push(row);
                }
                Some(Err(e)) => {
                    counter!("cricket_players_skipped_total").increment(1);
                    warn!("✗ Skipping player {}: {}", player_id, e);
                    report.skipped += 1;
                    report.errors.push(format!("player {player_id}: {e}"));
                }
            }
        }
    }

    /// Full run. Fails only when no identifiers were found or no row was collected.
    pub async fn run(&self, source: &PlayerSource) -> Result<CollectionReport> {
        self.run_until(source, std::future::pending::<()>()).await
    }

    /// Full run that ends the per-player phase early when `stop` resolves,
    /// returning whatever was collected up to that point.
    pub async fn run_until<F>(&self, source: &PlayerSource, stop: F) -> Result<CollectionReport>
    where
        F: Future<Output = ()>,
    {
        let mut report = CollectionReport::default();

        let ids = self.discover(source, &mut report.errors).await;
        report.identifiers = ids.len();
        if ids.is_empty() {
            return Err(ScraperError::NothingCollected(format!(
                "no player identifiers discovered ({} errors)",
                report.errors.len()
            )));
        }

        self.collect_until(&ids, &mut report, stop).await;

        info!(
            "✅ Collected {} players ({} skipped, {} errors)",
            report.collected,
            report.skipped,
            report.errors.len()
        );

        if report.table.is_empty() {
            return Err(ScraperError::NothingCollected(if report.interrupted {
                "interrupted before any player was collected".to_string()
            } else {
                format!("all {} players were skipped", report.identifiers)
            }));
        }
        Ok(report)
    }
}
