//! Pseudonymization parameters attached to a variable.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Encryption algorithm used by the PAPIS pseudonymization service.
pub const PAPIS_ENCRYPTION_ALGORITHM: &str = "TINK-FPE";
/// Encryption algorithm used by the standard Dapla pseudonymization.
pub const DAEAD_ENCRYPTION_ALGORITHM: &str = "TINK-DAED";
/// Spelling of the Dapla algorithm found in older documents.
pub const DAEAD_ENCRYPTION_ALGORITHM_LEGACY: &str = "TINK-DAEAD";
/// Stable identifier type used by PAPIS with stable ID.
pub const PAPIS_STABLE_IDENTIFIER_TYPE: &str = "FREG_SNR";
/// Parameter key that carries the stable identifier snapshot date.
pub const SNAPSHOT_DATE_KEY: &str = "snapshotDate";

/// One key-value map of algorithm parameters, kept in document order.
pub type AlgorithmParameters = serde_json::Map<String, serde_json::Value>;

/// Pseudonymization parameters of a variable. Presence means "pseudonymized".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PseudonymizationRecord {
    pub encryption_algorithm: Option<String>,
    pub encryption_key_reference: Option<String>,
    pub encryption_algorithm_parameters: Option<Vec<AlgorithmParameters>>,
    pub stable_identifier_type: Option<String>,
    pub stable_identifier_version: Option<String>,
    pub pseudonymization_time: Option<DateTime<Utc>>,
}

impl PseudonymizationRecord {
    pub fn with_algorithm(algorithm: &str) -> Self {
        Self {
            encryption_algorithm: Some(algorithm.to_string()),
            ..Self::default()
        }
    }

    /// Read-only projection of the algorithm parameters.
    pub fn parameter_view(&self) -> ParameterView<'_> {
        ParameterView {
            parameters: self.encryption_algorithm_parameters.as_deref().unwrap_or(&[]),
        }
    }

    /// Returns the parameter map holding `key`, if any.
    pub fn parameter_mut(&mut self, key: &str) -> Option<&mut AlgorithmParameters> {
        self.encryption_algorithm_parameters
            .as_mut()?
            .iter_mut()
            .find(|map| map.contains_key(key))
    }
}

/// Read-only view over `encryption_algorithm_parameters`.
#[derive(Debug, Clone, Copy)]
pub struct ParameterView<'a> {
    parameters: &'a [AlgorithmParameters],
}

impl<'a> ParameterView<'a> {
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a AlgorithmParameters> + 'a {
        self.parameters.iter()
    }

    /// First value stored under `key` across all maps.
    pub fn get(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.parameters.iter().find_map(|map| map.get(key))
    }

    /// Renders the parameters as one `key=value` list per map.
    pub fn render(&self) -> String {
        self.parameters
            .iter()
            .map(|map| {
                map.iter()
                    .map(|(key, value)| match value {
                        serde_json::Value::String(s) => format!("{key}={s}"),
                        other => format!("{key}={other}"),
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Input fields of a pseudonymization record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PseudoField {
    PseudonymizationTime,
    StableIdentifierType,
    StableIdentifierVersion,
    EncryptionAlgorithm,
    EncryptionKeyReference,
    EncryptionAlgorithmParameters,
}

impl PseudoField {
    pub const ALL: [PseudoField; 6] = [
        PseudoField::PseudonymizationTime,
        PseudoField::StableIdentifierType,
        PseudoField::StableIdentifierVersion,
        PseudoField::EncryptionAlgorithm,
        PseudoField::EncryptionKeyReference,
        PseudoField::EncryptionAlgorithmParameters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PseudoField::PseudonymizationTime => "pseudonymization_time",
            PseudoField::StableIdentifierType => "stable_identifier_type",
            PseudoField::StableIdentifierVersion => "stable_identifier_version",
            PseudoField::EncryptionAlgorithm => "encryption_algorithm",
            PseudoField::EncryptionKeyReference => "encryption_key_reference",
            PseudoField::EncryptionAlgorithmParameters => "encryption_algorithm_parameters",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PseudoField::PseudonymizationTime => "Pseudonymiseringstidspunkt",
            PseudoField::StableIdentifierType => "Stabil identifikator type",
            PseudoField::StableIdentifierVersion => "Stabil identifikator versjon",
            PseudoField::EncryptionAlgorithm => "Krypteringsalgoritme",
            PseudoField::EncryptionKeyReference => "Krypteringsnøkkel referanse",
            PseudoField::EncryptionAlgorithmParameters => "Krypteringsalgoritme-parametere",
        }
    }

    /// Parameters are generated by the pseudonymization service, never typed in.
    pub fn is_read_only(&self) -> bool {
        matches!(self, PseudoField::EncryptionAlgorithmParameters)
    }
}

impl fmt::Display for PseudoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PseudoField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        Self::ALL
            .iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(normalized))
            .copied()
            .ok_or_else(|| format!("Unknown pseudonymization field: {s}"))
    }
}
