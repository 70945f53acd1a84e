//! Opening datasets: reading CSV files, inferring variable types and locating
//! the metadata document that belongs to a dataset.

pub mod csv_table;
pub mod error;
pub mod paths;
pub mod schema;

pub use csv_table::{CsvTable, read_csv_table};
pub use error::{IngestError, Result};
pub use paths::{dataset_short_name, document_path_for, is_document_path};
pub use schema::{
    ColumnSchema, DatasetSchema, infer_data_type, read_dataset_schema, variables_from_schema,
};
