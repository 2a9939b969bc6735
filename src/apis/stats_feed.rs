use crate::app::ports::HttpClientPort;
use crate::config::SourceConfig;
use crate::error::{Result, ScraperError};
use crate::types::{PlayerId, RawStatsPayload};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, instrument};

// `name(<data>)` with an optional trailing semicolon; `.` allowed for namespaced callbacks
static ENVELOPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^[A-Za-z_$][\w$.]*\s*\((.*)\)\s*;?$").expect("envelope pattern")
});

/// Strip the JSONP callback around the feed data. Bare JSON passes through.
pub fn unwrap_envelope(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed);
    }

    let captures = ENVELOPE.captures(trimmed).ok_or_else(|| {
        let preview: String = trimmed.chars().take(40).collect();
        ScraperError::Parse(format!("not a callback envelope: {preview:?}"))
    })?;

    let inner = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    Ok(inner)
}

/// Unwrap and deserialize a stats feed body.
pub fn parse_payload(text: &str) -> Result<RawStatsPayload> {
    let json = unwrap_envelope(text)?;
    serde_json::from_str(json).map_err(|e| ScraperError::Parse(e.to_string()))
}

/// Per-player stats feed client.
pub struct StatsFeed {
    http: Arc<dyn HttpClientPort>,
    source: SourceConfig,
}

impl StatsFeed {
    pub fn new(http: Arc<dyn HttpClientPort>, source: SourceConfig) -> Self {
        Self { http, source }
    }

    pub fn url_for(&self, player_id: &PlayerId) -> String {
        self.source.stats_url(player_id.as_str())
    }

    #[instrument(skip(self), fields(player_id = %player_id))]
    pub async fn fetch(&self, player_id: &PlayerId) -> Result<RawStatsPayload> {
        let url = self.url_for(player_id);
        debug!("Fetching stats feed {}", url);

        let response = self
            .http
            .get(&url, Some(&self.source.referer))
            .await
            .map_err(|e| ScraperError::fetch(&url, e))?;

        if !response.is_success() {
            return Err(ScraperError::fetch(&url, format!("HTTP {}", response.status)));
        }

        parse_payload(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwraps_callback() {
        assert_eq!(unwrap_envelope(r#"cb({"Batting":[]});"#).unwrap(), r#"{"Batting":[]}"#);
    }

    #[test]
    fn test_unwraps_without_semicolon_and_with_whitespace() {
        let text = "\n  onPlayerStats( {\"Bowling\":[]} )\n";
        assert_eq!(unwrap_envelope(text).unwrap(), r#"{"Bowling":[]}"#);
    }

    #[test]
    fn test_bare_json_is_untouched() {
        assert_eq!(unwrap_envelope(r#"{"Batting":[]}"#).unwrap(), r#"{"Batting":[]}"#);
        assert_eq!(unwrap_envelope("[1,2]").unwrap(), "[1,2]");
    }

    #[test]
    fn test_multiline_payload() {
        let text = "onPlayerStats({\n\"Batting\": [\n{\"Year\": \"AllTime\"}\n]\n});";
        let payload = parse_payload(text).unwrap();
        assert_eq!(payload.batting.unwrap().len(), 1);
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert!(matches!(unwrap_envelope("<html>403</html>"), Err(ScraperError::Parse(_))));
        assert!(matches!(parse_payload("cb({not json});"), Err(ScraperError::Parse(_))));
    }

    #[test]
    fn test_parse_keeps_both_series() {
        let payload = parse_payload(
            r#"onPlayerStats({"Batting":[{"Year":"2023","Runs":10}],"Bowling":[{"Year":"AllTime","Wickets":"3"}]});"#,
        )
        .unwrap();
        assert_eq!(payload.batting.as_ref().map(Vec::len), Some(1));
        assert_eq!(payload.bowling.as_ref().map(Vec::len), Some(1));
    }
}
