//! Type-safe enumerations for Datadoc metadata.
//!
//! Each enum serializes to the upper-case code stored in metadata documents
//! and carries the Norwegian (bokmål) title shown in dropdowns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    String,
    Integer,
    Float,
    Datetime,
    Boolean,
}

impl DataType {
    pub const ALL: [DataType; 5] = [
        DataType::String,
        DataType::Integer,
        DataType::Float,
        DataType::Datetime,
        DataType::Boolean,
    ];

    /// Returns the code as stored in metadata documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "STRING",
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::Datetime => "DATETIME",
            DataType::Boolean => "BOOLEAN",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DataType::String => "TEKST",
            DataType::Integer => "HELTALL",
            DataType::Float => "DESIMALTALL",
            DataType::Datetime => "DATOTID",
            DataType::Boolean => "BOOLSK",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Self::ALL, Self::as_str).ok_or_else(|| format!("Unknown data type: {s}"))
    }
}

/// The role a variable plays in its dataset.
///
/// - **Identifier**: identifies the units, e.g. national id or organisation number
/// - **Measure**: describes properties, e.g. marital status or turnover
/// - **Start time / Stop time**: bounds for variables that have a duration
/// - **Attribute**: information added by the producer, e.g. data quality flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableRole {
    Identifier,
    Measure,
    StartTime,
    StopTime,
    Attribute,
}

impl VariableRole {
    pub const ALL: [VariableRole; 5] = [
        VariableRole::Identifier,
        VariableRole::Measure,
        VariableRole::StartTime,
        VariableRole::StopTime,
        VariableRole::Attribute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariableRole::Identifier => "IDENTIFIER",
            VariableRole::Measure => "MEASURE",
            VariableRole::StartTime => "START_TIME",
            VariableRole::StopTime => "STOP_TIME",
            VariableRole::Attribute => "ATTRIBUTE",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            VariableRole::Identifier => "IDENTIFIKATOR",
            VariableRole::Measure => "MÅLEVARIABEL",
            VariableRole::StartTime => "STARTTID",
            VariableRole::StopTime => "STOPPTID",
            VariableRole::Attribute => "ATTRIBUTT",
        }
    }
}

impl fmt::Display for VariableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VariableRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Self::ALL, Self::as_str)
            .ok_or_else(|| format!("Unknown variable role: {s}"))
    }
}

/// Time dimension of a variable or dataset.
///
/// Fixed data never changes (date of birth), status data is measured at a
/// point in time, accumulated data covers a period (yearly income) and event
/// data records when states change (change of address).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemporalityType {
    Fixed,
    Status,
    Accumulated,
    Event,
}

impl TemporalityType {
    pub const ALL: [TemporalityType; 4] = [
        TemporalityType::Fixed,
        TemporalityType::Status,
        TemporalityType::Accumulated,
        TemporalityType::Event,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalityType::Fixed => "FIXED",
            TemporalityType::Status => "STATUS",
            TemporalityType::Accumulated => "ACCUMULATED",
            TemporalityType::Event => "EVENT",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TemporalityType::Fixed => "FAST",
            TemporalityType::Status => "TVERRSNITT",
            TemporalityType::Accumulated => "AKKUMULERT",
            TemporalityType::Event => "HENDELSE",
        }
    }
}

impl fmt::Display for TemporalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemporalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Self::ALL, Self::as_str)
            .ok_or_else(|| format!("Unknown temporality type: {s}"))
    }
}

/// Sensitivity of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Assessment {
    Sensitive,
    Protected,
    Open,
}

impl Assessment {
    pub const ALL: [Assessment; 3] = [Assessment::Sensitive, Assessment::Protected, Assessment::Open];

    pub fn as_str(&self) -> &'static str {
        match self {
            Assessment::Sensitive => "SENSITIVE",
            Assessment::Protected => "PROTECTED",
            Assessment::Open => "OPEN",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Assessment::Sensitive => "SENSITIV",
            Assessment::Protected => "SKJERMET",
            Assessment::Open => "ÅPEN",
        }
    }
}

impl FromStr for Assessment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Self::ALL, Self::as_str).ok_or_else(|| format!("Unknown assessment: {s}"))
    }
}

/// Processing state of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSetState {
    SourceData,
    InputData,
    ProcessedData,
    Statistics,
    OutputData,
}

impl DataSetState {
    pub const ALL: [DataSetState; 5] = [
        DataSetState::SourceData,
        DataSetState::InputData,
        DataSetState::ProcessedData,
        DataSetState::Statistics,
        DataSetState::OutputData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSetState::SourceData => "SOURCE_DATA",
            DataSetState::InputData => "INPUT_DATA",
            DataSetState::ProcessedData => "PROCESSED_DATA",
            DataSetState::Statistics => "STATISTICS",
            DataSetState::OutputData => "OUTPUT_DATA",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DataSetState::SourceData => "KILDEDATA",
            DataSetState::InputData => "INNDATA",
            DataSetState::ProcessedData => "KLARGJORTE DATA",
            DataSetState::Statistics => "STATISTIKK",
            DataSetState::OutputData => "UTDATA",
        }
    }
}

impl FromStr for DataSetState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Self::ALL, Self::as_str)
            .ok_or_else(|| format!("Unknown dataset state: {s}"))
    }
}

/// Lifecycle status of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSetStatus {
    Draft,
    Internal,
    External,
    Deprecated,
}

impl DataSetStatus {
    pub const ALL: [DataSetStatus; 4] = [
        DataSetStatus::Draft,
        DataSetStatus::Internal,
        DataSetStatus::External,
        DataSetStatus::Deprecated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSetStatus::Draft => "DRAFT",
            DataSetStatus::Internal => "INTERNAL",
            DataSetStatus::External => "EXTERNAL",
            DataSetStatus::Deprecated => "DEPRECATED",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DataSetStatus::Draft => "UTKAST",
            DataSetStatus::Internal => "INTERN",
            DataSetStatus::External => "EKSTERN",
            DataSetStatus::Deprecated => "UTGÅTT",
        }
    }
}

impl FromStr for DataSetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Self::ALL, Self::as_str)
            .ok_or_else(|| format!("Unknown dataset status: {s}"))
    }
}

/// Pseudonymization algorithm classification used to pick input fields.
///
/// This is derived from a variable's pseudonymization record, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    #[serde(rename = "PAPIS_ALGORITHM_WITHOUT_STABLE_ID")]
    PapisWithoutStableId,
    #[serde(rename = "PAPIS_ALGORITHM_WITH_STABLE_ID")]
    PapisWithStableId,
    #[serde(rename = "STANDARD_ALGORITHM_DAPLA")]
    StandardDapla,
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::PapisWithoutStableId,
        AlgorithmKind::PapisWithStableId,
        AlgorithmKind::StandardDapla,
        AlgorithmKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::PapisWithoutStableId => "PAPIS_ALGORITHM_WITHOUT_STABLE_ID",
            AlgorithmKind::PapisWithStableId => "PAPIS_ALGORITHM_WITH_STABLE_ID",
            AlgorithmKind::StandardDapla => "STANDARD_ALGORITHM_DAPLA",
            AlgorithmKind::Custom => "CUSTOM",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AlgorithmKind::PapisWithoutStableId => "PAPIS-algoritme uten stabil ID",
            AlgorithmKind::PapisWithStableId => "PAPIS-algoritme med stabil ID",
            AlgorithmKind::StandardDapla => "Standard algoritme på Dapla (DAEAD)",
            AlgorithmKind::Custom => "Annen",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(s, &Self::ALL, Self::as_str)
            .ok_or_else(|| format!("Unknown pseudonymization algorithm: {s}"))
    }
}

/// Case-insensitive lookup of a code among the variants of an enum.
fn parse_code<T: Copy>(s: &str, all: &[T], code: fn(&T) -> &'static str) -> Option<T> {
    let normalized = s.trim();
    all.iter()
        .find(|variant| code(variant).eq_ignore_ascii_case(normalized))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_role_from_str() {
        assert_eq!(
            "ATTRIBUTE".parse::<VariableRole>().unwrap(),
            VariableRole::Attribute
        );
        assert_eq!(
            " start_time ".parse::<VariableRole>().unwrap(),
            VariableRole::StartTime
        );
        assert!("Topic".parse::<VariableRole>().is_err());
    }

    #[test]
    fn test_temporality_round_trips_through_code() {
        for kind in TemporalityType::ALL {
            assert_eq!(kind.as_str().parse::<TemporalityType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serde_uses_document_codes() {
        let json = serde_json::to_string(&VariableRole::StopTime).unwrap();
        assert_eq!(json, "\"STOP_TIME\"");
        let kind: AlgorithmKind =
            serde_json::from_str("\"PAPIS_ALGORITHM_WITH_STABLE_ID\"").unwrap();
        assert_eq!(kind, AlgorithmKind::PapisWithStableId);
    }
}
