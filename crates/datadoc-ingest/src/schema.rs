//! Column type inference for tabular datasets.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use datadoc_model::{DataType, VariableRecord};

use crate::csv_table::read_csv_table;
use crate::error::Result;
use crate::paths::dataset_short_name;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: DataType,
    pub non_empty: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSchema {
    pub short_name: Option<String>,
    pub columns: Vec<ColumnSchema>,
    pub row_count: usize,
}

/// Reads a CSV dataset and infers the data type of every column.
pub fn read_dataset_schema(path: &Path) -> Result<DatasetSchema> {
    let table = read_csv_table(path)?;
    let columns: Vec<ColumnSchema> = table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let data_type = infer_data_type(table.column(idx));
            let non_empty = table.column(idx).filter(|v| !v.is_empty()).count();
            debug!(column = %name, data_type = %data_type, non_empty, "inferred column type");
            ColumnSchema {
                name: name.clone(),
                data_type,
                non_empty,
            }
        })
        .collect();
    info!(
        path = %path.display(),
        columns = columns.len(),
        rows = table.rows.len(),
        "read dataset schema"
    );
    Ok(DatasetSchema {
        short_name: dataset_short_name(path),
        columns,
        row_count: table.rows.len(),
    })
}

/// One variable per column, with short name and data type filled in.
pub fn variables_from_schema(schema: &DatasetSchema) -> Vec<VariableRecord> {
    schema
        .columns
        .iter()
        .map(|column| VariableRecord {
            data_type: Some(column.data_type),
            ..VariableRecord::new(column.name.as_str())
        })
        .collect()
}

/// Picks the narrowest type every non-empty value fits. Empty columns are text.
pub fn infer_data_type<'a>(values: impl Iterator<Item = &'a str>) -> DataType {
    let values: Vec<&str> = values.map(str::trim).filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        return DataType::String;
    }
    if values.iter().all(|v| v.parse::<i64>().is_ok()) {
        DataType::Integer
    } else if values.iter().all(|v| v.parse::<f64>().is_ok()) {
        DataType::Float
    } else if values.iter().all(|v| is_boolean(v)) {
        DataType::Boolean
    } else if values.iter().all(|v| is_datetime(v)) {
        DataType::Datetime
    } else {
        DataType::String
    }
}

fn is_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

fn is_datetime(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_numeric_types() {
        assert_eq!(infer_data_type(["1", "", "42"].into_iter()), DataType::Integer);
        assert_eq!(infer_data_type(["1", "2.5"].into_iter()), DataType::Float);
    }

    #[test]
    fn test_infer_boolean_and_dates() {
        assert_eq!(infer_data_type(["TRUE", "false"].into_iter()), DataType::Boolean);
        assert_eq!(
            infer_data_type(["2020-12-31", "2021-01-01T10:00:00"].into_iter()),
            DataType::Datetime
        );
        assert_eq!(
            infer_data_type(["2021-01-01T10:00:00+01:00"].into_iter()),
            DataType::Datetime
        );
    }

    #[test]
    fn test_infer_falls_back_to_string() {
        assert_eq!(infer_data_type(["1", "x"].into_iter()), DataType::String);
        assert_eq!(infer_data_type(["", " "].into_iter()), DataType::String);
    }
}
