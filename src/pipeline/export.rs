use crate::config::{ExportFormat, OutputConfig};
use crate::error::{Result, ScraperError};
use crate::pipeline::processing::FlatPlayerRow;
use crate::pipeline::table::PlayerTable;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the table as CSV with a header row.
pub fn write_csv<W: Write>(table: &PlayerTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for record in table.records() {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

// Every table column, in order; absent fields become "".
struct JsonRow<'a> {
    columns: &'a [&'static str],
    row: &'a FlatPlayerRow,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let empty = Value::String(String::new());
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in self.columns {
            map.serialize_entry(column, self.row.get(column).unwrap_or(&empty))?;
        }
        map.end()
    }
}

/// Write the table as a pretty JSON array of objects.
pub fn write_json<W: Write>(table: &PlayerTable, mut writer: W) -> Result<()> {
    let columns = table.columns();
    let rows: Vec<JsonRow<'_>> = table
        .rows()
        .iter()
        .map(|row| JsonRow { columns: &columns, row })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Replace `table_name` in the SQLite database at `path` with the table contents.
pub fn write_sqlite(table: &PlayerTable, path: &Path, table_name: &str) -> Result<()> {
    if table_name.trim().is_empty() {
        return Err(ScraperError::Config("sqlite_table must not be empty".into()));
    }

    let columns = table.columns();
    let table_ident = quote_ident(table_name);
    let column_defs = columns
        .iter()
        .map(|c| format!("{} TEXT", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");
    let column_list = columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");

    let mut conn = rusqlite::Connection::open(path)?;
    conn.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table_ident}; CREATE TABLE {table_ident} ({column_defs});"
    ))?;

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table_ident} ({column_list}) VALUES ({placeholders})"
        ))?;
        for record in table.records() {
            stmt.execute(rusqlite::params_from_iter(record.iter()))?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub const XLSX_SHEET_NAME: &str = "Career Stats";

/// Write the table to a single-sheet workbook at `path`.
pub fn write_xlsx(table: &PlayerTable, path: &Path) -> Result<()> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(XLSX_SHEET_NAME)?;

    for (col, name) in (0u16..).zip(table.columns()) {
        sheet.write_string(0, col, name)?;
    }
    for (row, record) in (1u32..).zip(table.records()) {
        for (col, cell) in (0u16..).zip(&record) {
            sheet.write_string(row, col, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// `<dir>/<stem>_<timestamp>.<ext>`
pub fn output_path(output: &OutputConfig, format: ExportFormat, timestamp: &str) -> PathBuf {
    Path::new(&output.directory).join(format!(
        "{}_{}.{}",
        output.file_stem,
        timestamp,
        format.extension()
    ))
}

/// Write every configured format and return the files produced.
pub fn export_table(table: &PlayerTable, output: &OutputConfig) -> Result<Vec<PathBuf>> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    export_table_at(table, output, &timestamp)
}

pub fn export_table_at(
    table: &PlayerTable,
    output: &OutputConfig,
    timestamp: &str,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&output.directory)?;

    let mut written = Vec::with_capacity(output.formats.len());
    for &format in &output.formats {
        let path = output_path(output, format, timestamp);
        match format {
            ExportFormat::Csv => write_csv(table, BufWriter::new(File::create(&path)?))?,
            ExportFormat::Json => write_json(table, BufWriter::new(File::create(&path)?))?,
            ExportFormat::Sqlite => write_sqlite(table, &path, &output.sqlite_table)?,
            ExportFormat::Xlsx => write_xlsx(table, &path)?,
        }
        info!("💾 Saved {} rows to {}", table.len(), path.display());
        written.push(path);
    }

    Ok(written)
}
