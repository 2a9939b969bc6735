use crate::constants::{ALL_TIME_LABEL, YEAR_KEY};
use crate::types::{CareerRecord, PeriodRecord, RawStatsPayload};
use serde_json::Value;

/// First entry of a series whose `Year` is exactly `AllTime`.
pub fn select_all_time(series: Option<&[PeriodRecord]>) -> Option<PeriodRecord> {
    series?
        .iter()
        .find(|record| record.get(YEAR_KEY).and_then(Value::as_str) == Some(ALL_TIME_LABEL))
        .cloned()
}

/// Pick the batting and bowling career aggregates. A missing series and a
/// series without an `AllTime` entry both leave that side empty.
pub fn select_career(payload: &RawStatsPayload) -> CareerRecord {
    CareerRecord {
        batting: select_all_time(payload.batting.as_deref()),
        bowling: select_all_time(payload.bowling.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> RawStatsPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_picks_all_time_over_seasons() {
        let p = payload(json!({
            "Batting": [{"Year": "2023", "Runs": 10}, {"Year": "AllTime", "Runs": 500}]
        }));
        let career = select_career(&p);
        assert_eq!(career.batting.as_ref().unwrap()["Runs"], json!(500));
        assert!(!career.has_bowling());
    }

    #[test]
    fn test_no_all_time_entry_is_absent_not_error() {
        let p = payload(json!({
            "Batting": [{"Year": "2022", "Runs": 1}, {"Year": "2023", "Runs": 2}],
            "Bowling": []
        }));
        let career = select_career(&p);
        assert!(career.is_empty());
    }

    #[test]
    fn test_first_all_time_wins() {
        let p = payload(json!({
            "Bowling": [
                {"Year": "AllTime", "Wickets": "7"},
                {"Year": "AllTime", "Wickets": "99"}
            ]
        }));
        let career = select_career(&p);
        assert_eq!(career.bowling.unwrap()["Wickets"], json!("7"));
    }

    #[test]
    fn test_label_must_match_exactly() {
        let p = payload(json!({
            "Batting": [{"Year": "alltime"}, {"Year": " AllTime"}, {"Runs": 3}]
        }));
        assert!(select_career(&p).batting.is_none());
    }

    #[test]
    fn test_series_are_independent() {
        let p = payload(json!({
            "Batting": [{"Year": "2024"}],
            "Bowling": [{"Year": "2024"}, {"Year": "AllTime", "Overs": "12.3"}]
        }));
        let career = select_career(&p);
        assert!(!career.has_batting());
        assert!(career.has_bowling());
    }
}
