use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque numeric player token, kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A player named by profile URL: the name slug plus the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRef {
    pub slug: String,
    pub id: PlayerId,
}

/// One per-period entry of a stats series, fields as the feed sent them.
pub type PeriodRecord = Map<String, Value>;

/// Unwrapped stats feed body. Keys other than the two series are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatsPayload {
    #[serde(rename = "Batting", default)]
    pub batting: Option<Vec<PeriodRecord>>,
    #[serde(rename = "Bowling", default)]
    pub bowling: Option<Vec<PeriodRecord>>,
}

/// The career aggregates picked out of a payload; either side may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CareerRecord {
    pub batting: Option<PeriodRecord>,
    pub bowling: Option<PeriodRecord>,
}

impl CareerRecord {
    pub fn has_batting(&self) -> bool {
        self.batting.is_some()
    }

    pub fn has_bowling(&self) -> bool {
        self.bowling.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_batting() && !self.has_bowling()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_tolerates_missing_and_null_series() {
        let payload: RawStatsPayload =
            serde_json::from_str(r#"{"Batting": null, "Extra": 1}"#).unwrap();
        assert!(payload.batting.is_none());
        assert!(payload.bowling.is_none());
    }

    #[test]
    fn test_player_id_keeps_leading_zeros() {
        let id: PlayerId = serde_json::from_str(r#""007""#).unwrap();
        assert_eq!(id.as_str(), "007");
        assert_eq!(id.to_string(), "007");
    }
}
