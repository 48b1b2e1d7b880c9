use std::io;
use std::path::Path;

use anyhow::Result;

use crate::mapper::OutputRow;

/// Union of all row columns in first-seen order: rows in accumulator order,
/// keys in per-row insertion order, later rows contributing only the column
/// names no earlier row had.
pub fn column_union(rows: &[OutputRow]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

pub fn write_csv<W: io::Write>(rows: &[OutputRow], sink: W) -> Result<()> {
    let columns = column_union(rows);
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(&columns)?;
    for row in rows {
        let record = columns
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or(""));
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_file(rows: &[OutputRow], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(rows, file)
}
