use chrono::NaiveDate;
use thiserror::Error;

use datadoc_model::{ModelError, PseudoField};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("variable not found: {short_name}")]
    VariableNotFound { short_name: String },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid date '{value}' for {field}: expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { field: &'static str, value: String },

    #[error("contains_data_from ({from}) is after contains_data_until ({until})")]
    InvalidDateRange { from: NaiveDate, until: NaiveDate },

    #[error("no algorithm parameter of variable {short_name} holds '{key}'")]
    MissingParameter {
        short_name: String,
        key: &'static str,
    },

    #[error("{field} is read-only")]
    ReadOnlyField { field: PseudoField },

    #[error("variable {short_name} is not pseudonymized")]
    NotPseudonymized { short_name: String },

    #[error("{field} cannot be edited")]
    NotEditable { field: &'static str },
}

pub type Result<T> = std::result::Result<T, CoreError>;
