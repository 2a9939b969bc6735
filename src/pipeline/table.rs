use crate::constants::{all_columns, IDENTITY_FIELDS};
use crate::pipeline::processing::FlatPlayerRow;
use std::collections::HashSet;

/// Accumulated rows of a run, rendered as a rectangular table.
#[derive(Debug, Clone, Default)]
pub struct PlayerTable {
    rows: Vec<FlatPlayerRow>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: FlatPlayerRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[FlatPlayerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identity columns plus every column carried by at least one row, in schema order.
    pub fn columns(&self) -> Vec<&'static str> {
        all_columns()
            .into_iter()
            .filter(|column| {
                IDENTITY_FIELDS.contains(column) || self.rows.iter().any(|row| row.contains(column))
            })
            .collect()
    }

    /// One cell per column for every row; absent fields render as `""`.
    pub fn records(&self) -> Vec<Vec<String>> {
        let columns = self.columns();
        self.rows
            .iter()
            .map(|row| columns.iter().map(|column| row.cell(column)).collect())
            .collect()
    }

    pub fn unique_full_names(&self) -> usize {
        self.rows
            .iter()
            .map(FlatPlayerRow::full_name)
            .filter(|name| !name.is_empty())
            .collect::<HashSet<_>>()
            .len()
    }
}

impl FromIterator<FlatPlayerRow> for PlayerTable {
    fn from_iter<T: IntoIterator<Item = FlatPlayerRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
