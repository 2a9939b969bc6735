use crate::constants::{
    BATTING_FIELDS, BOWLING_FIELDS, FIRST_NAME, FULL_NAME, LAST_NAME, PLAYER_ID, PLAYER_NAME_KEY,
};
use crate::types::{CareerRecord, PeriodRecord, PlayerId};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// One output row: ordered (column, value) pairs.
///
/// Identity columns are always present. The batting and bowling column blocks
/// appear only when the matching career aggregate was found; inside a present
/// block no value is null.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatPlayerRow {
    fields: Vec<(&'static str, Value)>,
}

impl FlatPlayerRow {
    fn push(&mut self, column: &'static str, value: Value) {
        self.fields.push((column, value));
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Text for a column; `""` when the row does not carry it.
    pub fn cell(&self, column: &str) -> String {
        self.get(column).map(render_cell).unwrap_or_default()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn player_id(&self) -> String {
        self.cell(PLAYER_ID)
    }

    pub fn full_name(&self) -> String {
        self.cell(FULL_NAME)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FlatPlayerRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Scalar to text without quoting strings; null is empty.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// First whitespace token, then the rest joined by single spaces.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}

fn source_value(record: &PeriodRecord, key: &str) -> Value {
    match record.get(key) {
        None | Some(Value::Null) => Value::String(String::new()),
        Some(value) => value.clone(),
    }
}

fn push_block(row: &mut FlatPlayerRow, record: &PeriodRecord, fields: &[(&'static str, &str)]) {
    for &(column, key) in fields {
        row.push(column, source_value(record, key));
    }
}

/// Map a player's career aggregates into one flat row. Values pass through
/// untouched: strings stay strings, numbers stay numbers.
pub fn flatten(player_id: &PlayerId, career: &CareerRecord) -> FlatPlayerRow {
    let full_name = career
        .batting
        .as_ref()
        .and_then(|bat| bat.get(PLAYER_NAME_KEY))
        .and_then(Value::as_str)
        .unwrap_or_default();
    let (first_name, last_name) = split_name(full_name);

    let mut row = FlatPlayerRow {
        fields: Vec::with_capacity(4 + BATTING_FIELDS.len() + BOWLING_FIELDS.len()),
    };
    row.push(PLAYER_ID, Value::String(player_id.to_string()));
    row.push(FIRST_NAME, Value::String(first_name));
    row.push(LAST_NAME, Value::String(last_name));
    row.push(FULL_NAME, Value::String(full_name.to_string()));

    if let Some(batting) = &career.batting {
        push_block(&mut row, batting, &BATTING_FIELDS);
    }
    if let Some(bowling) = &career.bowling {
        push_block(&mut row, bowling, &BOWLING_FIELDS);
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> PeriodRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("M S Dhoni"), ("M".into(), "S Dhoni".into()));
        assert_eq!(split_name("Rashid"), ("Rashid".into(), "".into()));
        assert_eq!(split_name("  Virat   Kohli "), ("Virat".into(), "Kohli".into()));
        assert_eq!(split_name(""), ("".into(), "".into()));
    }

    #[test]
    fn test_missing_batting_field_defaults_to_empty_string() {
        let career = CareerRecord {
            batting: Some(record(json!({"Year": "AllTime", "PlayerName": "Ruturaj Gaikwad", "Runs": "2380"}))),
            bowling: None,
        };
        let row = flatten(&PlayerId::new("5443"), &career);
        assert_eq!(row.get("Fours"), Some(&json!("")));
        assert_eq!(row.get("Runs"), Some(&json!("2380")));
        assert!(row.contains("Stumpings"));
        assert!(!row.contains("Overs"));
    }

    #[test]
    fn test_null_source_value_is_empty_string() {
        let career = CareerRecord {
            batting: None,
            bowling: Some(record(json!({"Year": "AllTime", "Econ": null, "Wickets": 12}))),
        };
        let row = flatten(&PlayerId::new("9"), &career);
        assert_eq!(row.get("Economy"), Some(&json!("")));
        assert_eq!(row.get("Wickets"), Some(&json!(12)));
    }

    #[test]
    fn test_identity_without_batting_is_empty_names() {
        let row = flatten(&PlayerId::new("3"), &CareerRecord::default());
        assert_eq!(row.len(), 4);
        assert_eq!(row.player_id(), "3");
        assert_eq!(row.get(FIRST_NAME), Some(&json!("")));
        assert_eq!(row.get(LAST_NAME), Some(&json!("")));
        assert_eq!(row.get(FULL_NAME), Some(&json!("")));
    }

    #[test]
    fn test_bowling_fields_map_from_source_keys() {
        let career = CareerRecord {
            batting: None,
            bowling: Some(record(json!({
                "Year": "AllTime",
                "Overs": "420.5", "Runs": 3100, "Wickets": "140", "Average": "22.1",
                "Econ": "7.36", "StrikeRate": "18.0", "BBM": "4/17",
                "FourWkts": "5", "FiveWkts": "0"
            }))),
        };
        let row = flatten(&PlayerId::new("2885"), &career);
        assert_eq!(row.cell("Runs_Conceded"), "3100");
        assert_eq!(row.get("Economy"), Some(&json!("7.36")));
        assert_eq!(row.cell("Best_Bowling"), "4/17");
        assert_eq!(row.cell("4_Wickets"), "5");
        assert_eq!(row.cell("5_Wickets"), "0");
        assert!(!row.contains("Runs"));
    }

    #[test]
    fn test_same_input_same_output() {
        let career = CareerRecord {
            batting: Some(record(json!({"Year": "AllTime", "PlayerName": "Jasprit Bumrah", "Matches": 133}))),
            bowling: Some(record(json!({"Year": "AllTime", "Wickets": "165"}))),
        };
        let id = PlayerId::new("1124");
        assert_eq!(flatten(&id, &career), flatten(&id, &career));
    }

    #[test]
    fn test_columns_follow_schema_order() {
        let career = CareerRecord {
            batting: Some(record(json!({"Year": "AllTime"}))),
            bowling: Some(record(json!({"Year": "AllTime"}))),
        };
        let row = flatten(&PlayerId::new("1"), &career);
        let columns: Vec<_> = row.columns().collect();
        assert_eq!(columns, crate::constants::all_columns());
    }

    #[test]
    fn test_serializes_in_column_order() {
        let row = flatten(&PlayerId::new("1"), &CareerRecord::default());
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"Player_ID":"1","First_Name":"","Last_Name":"","Full_Name":""}"#
        );
    }
}
