//! Editing rules for Datadoc metadata.
//!
//! - [`global`]: apply one value to a field across all variables, with
//!   deselect and delete support and a change report.
//! - [`pseudo`]: pseudonymization algorithm classification and migration.
//! - [`inherit`]: push dataset values down to variables.
//! - [`input`] and [`validate`]: single-field edits and obligatory checks.

pub mod error;
pub mod global;
pub mod inherit;
pub mod input;
pub mod pseudo;
pub mod session;
pub mod validate;

pub use error::{CoreError, Result};
pub use global::{
    GlobalFieldEntry, GlobalFieldState, GlobalProposals, Proposal, generate_report, reconcile,
    reset,
};
pub use inherit::{accept_dataset_input, inherit_derived_dates, inherit_scalar};
pub use input::accept_variable_input;
pub use pseudo::{
    PseudoFieldDescriptor, Selection, accept_pseudo_input, apply_algorithm, classify, fields_for,
    select_algorithm, update_selected,
};
pub use session::{MetadataSession, RecordStore};
pub use validate::{
    IssueSeverity, MetadataIssue, MetadataReport, check_all, check_dataset, check_short_names,
    check_variables, is_valid_short_name,
};
