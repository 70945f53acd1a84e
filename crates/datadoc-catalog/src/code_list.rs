#![deny(unsafe_code)]

//! Reference code lists (unit types, measurement units, data sources).
//!
//! Each list is a CSV file with `code` and `title` columns.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CatalogError;

pub const UNIT_TYPES_FILE: &str = "unit_types.csv";
pub const MEASUREMENT_UNITS_FILE: &str = "measurement_units.csv";
pub const DATA_SOURCES_FILE: &str = "data_sources.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeItem {
    pub code: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeList {
    pub name: String,
    pub items: Vec<CodeItem>,
}

impl CodeList {
    pub fn new(name: impl Into<String>, items: Vec<CodeItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn title_for(&self, code: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.code == code)
            .map(|item| item.title.as_str())
    }
}

/// All code lists the catalog resolves dropdown titles from.
#[derive(Debug, Clone, Default)]
pub struct CodeLists {
    pub unit_types: CodeList,
    pub measurement_units: CodeList,
    pub data_sources: CodeList,
}

impl CodeLists {
    /// Loads every code list from `dir`. A missing file gives an empty list.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        Ok(Self {
            unit_types: load_optional(dir, UNIT_TYPES_FILE, "unit_types")?,
            measurement_units: load_optional(dir, MEASUREMENT_UNITS_FILE, "measurement_units")?,
            data_sources: load_optional(dir, DATA_SOURCES_FILE, "data_sources")?,
        })
    }
}

fn load_optional(dir: &Path, file: &str, name: &str) -> Result<CodeList, CatalogError> {
    let path = dir.join(file);
    if !path.is_file() {
        warn!(path = %path.display(), "code list not found, using an empty list");
        return Ok(CodeList::new(name, Vec::new()));
    }
    let list = parse_code_list_csv(&path, name)?;
    debug!(name, items = list.items.len(), "loaded code list");
    Ok(list)
}

pub fn parse_code_list_csv(path: &Path, name: &str) -> Result<CodeList, CatalogError> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| CatalogError::csv(path, e.to_string()))?
        .clone();

    let position = |column: &str| {
        headers
            .iter()
            .position(|h| h.trim_matches('\u{feff}').trim().eq_ignore_ascii_case(column))
    };
    let code_idx = position("code").ok_or_else(|| CatalogError::csv(path, "missing code column"))?;
    let title_idx =
        position("title").ok_or_else(|| CatalogError::csv(path, "missing title column"))?;

    let mut items = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| CatalogError::csv(path, e.to_string()))?;
        let code = row.get(code_idx).map(str::trim).unwrap_or_default();
        if code.is_empty() {
            continue;
        }
        let title = row.get(title_idx).map(str::trim).unwrap_or_default();
        items.push(CodeItem {
            code: code.to_string(),
            title: title.to_string(),
        });
    }

    Ok(CodeList::new(name, items))
}
