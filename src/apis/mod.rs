//! Upstream data sources: team roster pages, explicit profile URL lists, and
//! the per-player stats feed.

pub mod player_urls;
pub mod roster;
pub mod stats_feed;

pub use player_urls::{parse_player_url, parse_player_urls, read_url_list};
pub use roster::{extract_player_ids, RosterCrawler};
pub use stats_feed::{parse_payload, unwrap_envelope, StatsFeed};
