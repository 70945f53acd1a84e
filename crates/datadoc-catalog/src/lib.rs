#![deny(unsafe_code)]

//! Field catalog for the globally editable variable fields, backed by
//! reference code lists loaded from CSV.

pub mod code_list;
pub mod error;
pub mod field_catalog;

pub use code_list::{CodeItem, CodeList, CodeLists, parse_code_list_csv};
pub use error::CatalogError;
pub use field_catalog::{
    DELETE_OPTION_TITLE, DELETE_SELECTED, DESELECT, DESELECT_OPTION_TITLE, FieldCatalog,
    FieldOption,
};
