//! Pseudonymization rules.
//!
//! A variable's algorithm kind is derived from its pseudonymization record
//! and decides which input fields apply. Switching kind replaces the record.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info};

use datadoc_model::{
    AlgorithmKind, DAEAD_ENCRYPTION_ALGORITHM, DAEAD_ENCRYPTION_ALGORITHM_LEGACY,
    PAPIS_ENCRYPTION_ALGORITHM, PAPIS_STABLE_IDENTIFIER_TYPE, PseudoField,
    PseudonymizationRecord, SNAPSHOT_DATE_KEY, VariableRecord,
};

use crate::error::{CoreError, Result};
use crate::session::RecordStore;

/// Derives the algorithm kind from a pseudonymization record.
///
/// No record, or a record without an encryption algorithm, has no kind.
pub fn classify(record: Option<&PseudonymizationRecord>) -> Option<AlgorithmKind> {
    let algorithm = record?.encryption_algorithm.as_deref()?;
    let kind = match algorithm {
        PAPIS_ENCRYPTION_ALGORITHM => {
            let stable_type = record.and_then(|r| r.stable_identifier_type.as_deref());
            if stable_type == Some(PAPIS_STABLE_IDENTIFIER_TYPE) {
                AlgorithmKind::PapisWithStableId
            } else {
                AlgorithmKind::PapisWithoutStableId
            }
        }
        DAEAD_ENCRYPTION_ALGORITHM | DAEAD_ENCRYPTION_ALGORITHM_LEGACY => {
            AlgorithmKind::StandardDapla
        }
        _ => AlgorithmKind::Custom,
    };
    Some(kind)
}

/// An input field shown for an algorithm kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoFieldDescriptor {
    pub field: PseudoField,
    pub display_name: &'static str,
    pub read_only: bool,
}

impl From<PseudoField> for PseudoFieldDescriptor {
    fn from(field: PseudoField) -> Self {
        Self {
            field,
            display_name: field.display_name(),
            read_only: field.is_read_only(),
        }
    }
}

/// Input fields for an algorithm kind, in display order.
pub fn fields_for(kind: Option<AlgorithmKind>) -> Vec<PseudoFieldDescriptor> {
    let fields: &[PseudoField] = match kind {
        None => &[],
        Some(AlgorithmKind::PapisWithoutStableId | AlgorithmKind::StandardDapla) => {
            &[PseudoField::PseudonymizationTime]
        }
        Some(AlgorithmKind::PapisWithStableId) => &[
            PseudoField::PseudonymizationTime,
            PseudoField::StableIdentifierVersion,
        ],
        Some(AlgorithmKind::Custom) => &[
            PseudoField::PseudonymizationTime,
            PseudoField::StableIdentifierType,
            PseudoField::EncryptionAlgorithm,
            PseudoField::EncryptionKeyReference,
            PseudoField::EncryptionAlgorithmParameters,
        ],
    };
    fields.iter().copied().map(PseudoFieldDescriptor::from).collect()
}

/// Today's date as used for new stable identifier versions.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Attaches a fresh record for `kind`, replacing any existing one.
pub fn apply_algorithm(variable: &mut VariableRecord, kind: AlgorithmKind) {
    let record = match kind {
        AlgorithmKind::PapisWithoutStableId => {
            PseudonymizationRecord::with_algorithm(PAPIS_ENCRYPTION_ALGORITHM)
        }
        AlgorithmKind::PapisWithStableId => PseudonymizationRecord {
            stable_identifier_type: Some(PAPIS_STABLE_IDENTIFIER_TYPE.to_string()),
            stable_identifier_version: Some(today().to_string()),
            ..PseudonymizationRecord::with_algorithm(PAPIS_ENCRYPTION_ALGORITHM)
        },
        AlgorithmKind::StandardDapla => {
            PseudonymizationRecord::with_algorithm(DAEAD_ENCRYPTION_ALGORITHM)
        }
        AlgorithmKind::Custom => PseudonymizationRecord::default(),
    };
    debug!(variable = ?variable.short_name(), kind = %kind, "applied pseudonymization");
    variable.pseudonymization = Some(record);
}

/// Replaces the variable's record with one for `kind`.
pub fn update_selected(variable: &mut VariableRecord, kind: AlgorithmKind) {
    variable.pseudonymization = None;
    apply_algorithm(variable, kind);
    info!(
        variable = ?variable.short_name(),
        kind = %kind,
        "updated pseudonymization algorithm"
    );
}

/// Removes the variable's pseudonymization record.
pub fn delete(variable: &mut VariableRecord) {
    if variable.pseudonymization.take().is_some() {
        info!(variable = ?variable.short_name(), "removed pseudonymization");
    } else {
        debug!(
            variable = ?variable.short_name(),
            "no pseudonymization to remove"
        );
    }
}

/// A choice in the algorithm dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Delete,
    Algorithm(AlgorithmKind),
}

/// Handles an algorithm dropdown choice and returns the resulting kind.
///
/// An unpseudonymized variable gets the algorithm applied; a pseudonymized
/// one is switched only when the kind actually changes, so its other
/// parameters survive re-selecting the current algorithm.
pub fn select_algorithm(
    variable: &mut VariableRecord,
    selection: Selection,
) -> Option<AlgorithmKind> {
    match selection {
        Selection::Delete => delete(variable),
        Selection::Algorithm(kind) => {
            // A record without an algorithm is a custom record being filled in.
            let current = variable
                .pseudonymization
                .as_ref()
                .map(|record| classify(Some(record)).unwrap_or(AlgorithmKind::Custom));
            match current {
                None => apply_algorithm(variable, kind),
                Some(current) if current != kind => update_selected(variable, kind),
                Some(_) => debug!(
                    variable = ?variable.short_name(),
                    kind = %kind,
                    "algorithm unchanged"
                ),
            }
        }
    }
    classify(variable.pseudonymization.as_ref())
}

/// Writes one pseudonymization input field of a variable.
///
/// `None` or blank input clears the field, except for the PAPIS stable
/// identifier version, which defaults to today.
pub fn accept_pseudo_input<S>(
    store: &mut S,
    short_name: &str,
    field: PseudoField,
    raw: Option<&str>,
) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    if field.is_read_only() {
        return Err(CoreError::ReadOnlyField { field });
    }
    let variable = store.lookup_variable_mut(short_name)?;
    let Some(record) = variable.pseudonymization.as_mut() else {
        return Err(CoreError::NotPseudonymized {
            short_name: short_name.to_string(),
        });
    };
    let text = raw.map(str::trim).filter(|s| !s.is_empty());

    match field {
        PseudoField::PseudonymizationTime => {
            record.pseudonymization_time = text
                .map(|s| parse_pseudonymization_time(field, s))
                .transpose()?;
        }
        PseudoField::StableIdentifierVersion
            if record.encryption_algorithm.as_deref() == Some(PAPIS_ENCRYPTION_ALGORITHM) =>
        {
            let version = match text {
                Some(s) => parse_iso_date(field, s)?,
                None => today(),
            }
            .to_string();
            if record.encryption_algorithm_parameters.is_some() {
                let params = record.parameter_mut(SNAPSHOT_DATE_KEY).ok_or_else(|| {
                    CoreError::MissingParameter {
                        short_name: short_name.to_string(),
                        key: SNAPSHOT_DATE_KEY,
                    }
                })?;
                params.insert(
                    SNAPSHOT_DATE_KEY.to_string(),
                    serde_json::Value::String(version.clone()),
                );
            }
            record.stable_identifier_version = Some(version);
        }
        PseudoField::StableIdentifierVersion => {
            record.stable_identifier_version = text.map(str::to_string);
        }
        PseudoField::StableIdentifierType => {
            record.stable_identifier_type = text.map(str::to_string);
        }
        PseudoField::EncryptionAlgorithm => {
            record.encryption_algorithm = text.map(str::to_string);
        }
        PseudoField::EncryptionKeyReference => {
            record.encryption_key_reference = text.map(str::to_string);
        }
        PseudoField::EncryptionAlgorithmParameters => {
            return Err(CoreError::ReadOnlyField { field });
        }
    }
    info!(variable = short_name, field = %field, "updated pseudonymization field");
    Ok(())
}

fn parse_iso_date(field: PseudoField, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        field: field.as_str(),
        value: value.to_string(),
    })
}

/// Accepts an ISO date (midnight UTC) or an RFC 3339 timestamp.
fn parse_pseudonymization_time(field: PseudoField, value: &str) -> Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    let date = parse_iso_date(field, value)?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
