use crate::app::ports::HttpClientPort;
use crate::config::SourceConfig;
use crate::error::{Result, ScraperError};
use crate::types::PlayerId;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

static PLAYER_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/players/[^/]+/(\d+)").expect("player link pattern"));

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Collect the numeric ids of every `/players/<slug>/<id>` link on a page,
/// deduplicated, in order of first appearance.
pub fn extract_player_ids(html: &str) -> Vec<PlayerId> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for link in document.select(&ANCHOR) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if let Some(captures) = PLAYER_LINK.captures(href) {
            let id = &captures[1];
            if seen.insert(id.to_string()) {
                ids.push(PlayerId::new(id));
            }
        }
    }

    ids
}

/// Fetches a team's squad page and pulls player ids out of it.
pub struct RosterCrawler {
    http: Arc<dyn HttpClientPort>,
    source: SourceConfig,
}

impl RosterCrawler {
    pub fn new(http: Arc<dyn HttpClientPort>, source: SourceConfig) -> Self {
        Self { http, source }
    }

    #[instrument(skip(self))]
    pub async fn fetch_team_player_ids(&self, team_slug: &str) -> Result<Vec<PlayerId>> {
        let url = self.source.roster_url(team_slug);
        debug!("Fetching roster page {}", url);

        let response = self
            .http
            .get(&url, None)
            .await
            .map_err(|e| ScraperError::fetch(&url, e))?;

        if !response.is_success() {
            return Err(ScraperError::fetch(
                &url,
                format!("roster page returned status {}", response.status),
            ));
        }

        let ids = extract_player_ids(&response.body);
        info!("Found {} players for {}", ids.len(), team_slug);
        Ok(ids)
    }
}
