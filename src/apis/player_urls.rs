use crate::error::{Result, ScraperError};
use crate::types::{PlayerId, PlayerRef};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static PROFILE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"players/([^/]+)/(\d+)").expect("profile path pattern"));

fn strip_scheme_and_www(url: &str) -> &str {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    url.strip_prefix("www.").unwrap_or(url)
}

/// `https://www.iplt20.com/players/ms-dhoni/1` -> slug `ms-dhoni`, id `1`.
pub fn parse_player_url(url: &str) -> Result<PlayerRef> {
    let bare = strip_scheme_and_www(url);
    let captures = PROFILE_PATH
        .captures(bare)
        .ok_or_else(|| ScraperError::InvalidUrl(url.to_string()))?;

    Ok(PlayerRef {
        slug: captures[1].to_string(),
        id: PlayerId::new(&captures[2]),
    })
}

/// Parse every URL; bad entries are logged and returned alongside the good ones.
pub fn parse_player_urls(urls: &[String]) -> (Vec<PlayerRef>, Vec<ScraperError>) {
    let mut refs = Vec::new();
    let mut errors = Vec::new();

    for url in urls {
        match parse_player_url(url) {
            Ok(player) => refs.push(player),
            Err(e) => {
                warn!("⚠️ {}", e);
                errors.push(e);
            }
        }
    }

    (refs, errors)
}

/// One URL per line; blank lines and `#` comments are skipped.
pub fn read_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
