use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants;
use crate::error::{Result, ScraperError};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

/// Where rosters and stats feeds live and how to ask for them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub roster_url_template: String,
    pub stats_url_template: String,
    pub referer: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            roster_url_template: constants::DEFAULT_ROSTER_URL_TEMPLATE.to_string(),
            stats_url_template: constants::DEFAULT_STATS_URL_TEMPLATE.to_string(),
            referer: constants::DEFAULT_REFERER.to_string(),
            user_agent: constants::DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl SourceConfig {
    pub fn roster_url(&self, team_slug: &str) -> String {
        self.roster_url_template
            .replace(constants::TEAM_PLACEHOLDER, team_slug)
    }

    pub fn stats_url(&self, player_id: &str) -> String {
        self.stats_url_template
            .replace(constants::ID_PLACEHOLDER, player_id)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Minimum spacing between roster page requests
    pub roster_interval_ms: u64,
    /// Minimum spacing between stats feed requests
    pub stats_interval_ms: u64,
    pub teams: Vec<String>,
    pub player_urls: Vec<String>,
    /// Log a progress line every N players (0 disables)
    pub progress_every: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            roster_interval_ms: 1000,
            stats_interval_ms: 100,
            teams: constants::DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect(),
            player_urls: Vec::new(),
            progress_every: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Sqlite,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Sqlite => "db",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "sqlite" | "db" => Ok(ExportFormat::Sqlite),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(ScraperError::Config(format!(
                "Unknown export format '{other}' (expected csv, json, sqlite or xlsx)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub file_stem: String,
    pub formats: Vec<ExportFormat>,
    pub sqlite_table: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
            file_stem: "ipl_career_stats".to_string(),
            formats: vec![ExportFormat::Csv, ExportFormat::Sqlite],
            sqlite_table: "career_stats".to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit path; a missing file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&config_content)
    }

    /// Load `config.toml` if it exists, built-in defaults otherwise.
    pub fn load_or_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Environment overrides (a `.env` file is honored by the binary).
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SCRAPER_ROSTER_URL_TEMPLATE") {
            self.source.roster_url_template = v;
        }
        if let Ok(v) = std::env::var("SCRAPER_STATS_URL_TEMPLATE") {
            self.source.stats_url_template = v;
        }
        if let Ok(v) = std::env::var("SCRAPER_REFERER") {
            self.source.referer = v;
        }
        if let Ok(v) = std::env::var("SCRAPER_OUTPUT_DIR") {
            self.output.directory = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.source.stats_url_template.contains(constants::ID_PLACEHOLDER) {
            return Err(ScraperError::Config(format!(
                "stats_url_template must contain {}",
                constants::ID_PLACEHOLDER
            )));
        }
        if !self.source.roster_url_template.contains(constants::TEAM_PLACEHOLDER) {
            return Err(ScraperError::Config(format!(
                "roster_url_template must contain {}",
                constants::TEAM_PLACEHOLDER
            )));
        }
        if self.source.timeout_seconds == 0 {
            return Err(ScraperError::Config("timeout_seconds must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_ipl() {
        let config = Config::default();
        assert_eq!(config.run.teams.len(), 10);
        assert_eq!(
            config.source.roster_url("mumbai-indians"),
            "https://www.iplt20.com/teams/mumbai-indians"
        );
        assert!(config.source.stats_url("1").ends_with("/player/1-playerstats.js"));
        assert_eq!(config.source.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [run]
            teams = ["gujarat-titans"]
            stats_interval_ms = 300

            [output]
            formats = ["json"]
            "#,
        )
        .unwrap();

        assert_eq!(config.run.teams, vec!["gujarat-titans".to_string()]);
        assert_eq!(config.run.stats_interval_ms, 300);
        assert_eq!(config.run.roster_interval_ms, 1000);
        assert_eq!(config.output.formats, vec![ExportFormat::Json]);
        assert_eq!(config.source.referer, constants::DEFAULT_REFERER);
    }

    #[test]
    fn test_stats_template_without_placeholder_is_rejected() {
        let err = Config::from_toml(
            r#"
            [source]
            stats_url_template = "https://example.com/feed.js"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }

    #[test]
    fn test_export_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("db".parse::<ExportFormat>().unwrap(), ExportFormat::Sqlite);
        assert_eq!(" XLSX ".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!("parquet".parse::<ExportFormat>().is_err());
    }
}
