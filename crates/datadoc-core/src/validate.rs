//! Obligatory metadata and naming checks.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use datadoc_model::{
    DatasetField, DatasetRecord, PseudoField, PseudonymizationRecord, VariableField,
    VariableRecord,
};

use crate::pseudo::{classify, fields_for};

pub const MISSING_DATASET_FIELD: &str = "DD001";
pub const MISSING_VARIABLE_FIELD: &str = "DD002";
pub const MISSING_PSEUDO_FIELD: &str = "DD003";
pub const ILLEGAL_SHORT_NAME: &str = "DD004";
pub const MISSING_SHORT_NAME: &str = "DD005";

const OBLIGATORY_DATASET_FIELDS: [DatasetField; 10] = [
    DatasetField::Name,
    DatasetField::Description,
    DatasetField::Assessment,
    DatasetField::PopulationDescription,
    DatasetField::DatasetState,
    DatasetField::DatasetStatus,
    DatasetField::ContainsDataFrom,
    DatasetField::ContainsDataUntil,
    DatasetField::Version,
    DatasetField::Owner,
];

const OBLIGATORY_VARIABLE_FIELDS: [VariableField; 8] = [
    VariableField::Name,
    VariableField::DataType,
    VariableField::VariableRole,
    VariableField::IsPersonalData,
    VariableField::UnitType,
    VariableField::PopulationDescription,
    VariableField::DataSource,
    VariableField::TemporalityType,
];

static SHORT_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]{2,}$").expect("valid short name regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A metadata problem found by a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataIssue {
    pub code: String,
    pub message: String,
    pub severity: IssueSeverity,
    /// Short name of the variable, for variable issues.
    pub variable: Option<String>,
}

impl MetadataIssue {
    fn warning(code: &str, message: String, variable: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            message,
            severity: IssueSeverity::Warning,
            variable: variable.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataReport {
    pub issues: Vec<MetadataIssue>,
}

impl MetadataReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = MetadataIssue>) {
        self.issues.extend(issues);
    }
}

/// Obligatory dataset fields without a value.
pub fn check_dataset(dataset: &DatasetRecord) -> Vec<MetadataIssue> {
    OBLIGATORY_DATASET_FIELDS
        .iter()
        .filter(|field| dataset.get_field(**field).is_none())
        .map(|field| {
            MetadataIssue::warning(
                MISSING_DATASET_FIELD,
                format!("Datasett mangler {}", field.display_name()),
                None,
            )
        })
        .collect()
}

/// Obligatory variable fields without a value, including the editable
/// pseudonymization fields for the variable's algorithm.
pub fn check_variables(variables: &[VariableRecord]) -> Vec<MetadataIssue> {
    let mut issues = Vec::new();
    for variable in variables {
        let Some(short_name) = variable.short_name() else {
            issues.push(MetadataIssue {
                code: MISSING_SHORT_NAME.to_string(),
                message: "Variabel mangler kortnavn".to_string(),
                severity: IssueSeverity::Error,
                variable: None,
            });
            continue;
        };
        let missing: Vec<&str> = OBLIGATORY_VARIABLE_FIELDS
            .iter()
            .filter(|field| variable.get_field(**field).is_none())
            .map(VariableField::display_name)
            .collect();
        if !missing.is_empty() {
            issues.push(MetadataIssue::warning(
                MISSING_VARIABLE_FIELD,
                format!("{short_name}: {}", missing.join(", ")),
                Some(short_name),
            ));
        }

        let Some(record) = variable.pseudonymization.as_ref() else {
            continue;
        };
        let missing_pseudo: Vec<&str> = fields_for(classify(Some(record)))
            .into_iter()
            .filter(|descriptor| !descriptor.read_only)
            .filter(|descriptor| !has_pseudo_value(record, descriptor.field))
            .map(|descriptor| descriptor.display_name)
            .collect();
        if !missing_pseudo.is_empty() {
            issues.push(MetadataIssue::warning(
                MISSING_PSEUDO_FIELD,
                format!("{short_name}: {}", missing_pseudo.join(", ")),
                Some(short_name),
            ));
        }
    }
    issues
}

fn has_pseudo_value(record: &PseudonymizationRecord, field: PseudoField) -> bool {
    match field {
        PseudoField::PseudonymizationTime => record.pseudonymization_time.is_some(),
        PseudoField::StableIdentifierType => record.stable_identifier_type.is_some(),
        PseudoField::StableIdentifierVersion => record.stable_identifier_version.is_some(),
        PseudoField::EncryptionAlgorithm => record.encryption_algorithm.is_some(),
        PseudoField::EncryptionKeyReference => record.encryption_key_reference.is_some(),
        PseudoField::EncryptionAlgorithmParameters => !record.parameter_view().is_empty(),
    }
}

/// True when `short_name` follows the naming standard: lower case letters,
/// digits and underscores, at least two characters.
pub fn is_valid_short_name(short_name: &str) -> bool {
    SHORT_NAME_PATTERN.is_match(short_name)
}

/// Variables whose short name breaks the naming standard.
pub fn check_short_names(variables: &[VariableRecord]) -> Vec<MetadataIssue> {
    variables
        .iter()
        .filter_map(VariableRecord::short_name)
        .filter(|short_name| !is_valid_short_name(short_name))
        .map(|short_name| {
            MetadataIssue::warning(
                ILLEGAL_SHORT_NAME,
                format!("{short_name} følger ikke navnestandarden"),
                Some(short_name),
            )
        })
        .collect()
}

/// Runs every check over a dataset and its variables.
pub fn check_all(dataset: &DatasetRecord, variables: &[VariableRecord]) -> MetadataReport {
    let mut report = MetadataReport::default();
    report.extend(check_dataset(dataset));
    report.extend(check_variables(variables));
    report.extend(check_short_names(variables));
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_pattern() {
        assert!(is_valid_short_name("pers_id"));
        assert!(is_valid_short_name("a1"));
        assert!(!is_valid_short_name("a"));
        assert!(!is_valid_short_name("PersId"));
        assert!(!is_valid_short_name("pers id"));
        assert!(!is_valid_short_name("inntekt-2020"));
    }

    #[test]
    fn test_short_name_check_flags_only_bad_names() {
        let variables = vec![
            VariableRecord::new("pers_id"),
            VariableRecord::new("Inntekt"),
            VariableRecord::default(),
        ];
        let issues = check_short_names(&variables);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ILLEGAL_SHORT_NAME);
        assert_eq!(issues[0].variable.as_deref(), Some("Inntekt"));
    }

    #[test]
    fn test_empty_dataset_reports_every_obligatory_field() {
        let issues = check_dataset(&DatasetRecord::default());
        assert_eq!(issues.len(), OBLIGATORY_DATASET_FIELDS.len());
        assert!(issues.iter().all(|i| i.code == MISSING_DATASET_FIELD));
    }
}
