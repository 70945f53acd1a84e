//! Metadata model for the Datadoc editor.
//!
//! Records for a dataset and its variables, the pseudonymization parameters
//! attached to a variable, typed field identifiers and the persisted
//! metadata document.

pub mod dataset;
pub mod document;
pub mod enums;
pub mod error;
pub mod field;
pub mod pseudonymization;
pub mod variable;

pub use dataset::DatasetRecord;
pub use document::{DOCUMENT_FILE_SUFFIX, DOCUMENT_VERSION, MetadataDocument};
pub use enums::{
    AlgorithmKind, Assessment, DataSetState, DataSetStatus, DataType, TemporalityType,
    VariableRole,
};
pub use error::{ModelError, Result};
pub use field::{DatasetField, FieldValue, GlobalField, InheritableField, VariableField};
pub use pseudonymization::{
    AlgorithmParameters, DAEAD_ENCRYPTION_ALGORITHM, DAEAD_ENCRYPTION_ALGORITHM_LEGACY,
    PAPIS_ENCRYPTION_ALGORITHM, PAPIS_STABLE_IDENTIFIER_TYPE, ParameterView, PseudoField,
    PseudonymizationRecord, SNAPSHOT_DATE_KEY,
};
pub use variable::VariableRecord;
