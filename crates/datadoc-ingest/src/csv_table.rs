use std::collections::BTreeSet;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Iterates the cells of one column. Short rows yield empty cells.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV file whose first non-blank row is the header.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let csv_error = |message: String| IngestError::Csv {
        path: path.to_path_buf(),
        message,
    };
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(e.to_string()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }

    let mut raw_rows = raw_rows.into_iter();
    let Some(header_row) = raw_rows.next() else {
        return Err(IngestError::Empty {
            path: path.to_path_buf(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();

    let mut seen = BTreeSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(IngestError::DuplicateColumn {
                path: path.to_path_buf(),
                column: header.clone(),
            });
        }
    }

    let rows = raw_rows
        .map(|record| {
            (0..headers.len())
                .map(|idx| record.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header_collapses_whitespace() {
        assert_eq!(normalize_header("\u{feff} pers   id "), "pers id");
    }
}
