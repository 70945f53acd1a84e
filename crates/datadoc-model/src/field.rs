//! Typed field identifiers and the scalar value union.
//!
//! Field identifiers are parsed from strings only at the boundary; everything
//! behind it works on these closed enums.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A scalar field value as it travels through forms, state and documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            FieldValue::Integer(_) => None,
        }
    }

    /// Converts a JSON scalar into a field value. Non-scalars yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(FieldValue::Text(s.clone())),
            serde_json::Value::Number(n) => Some(match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Text(n.to_string()),
            }),
            serde_json::Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Scalar variable fields that can be read and written generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableField {
    ShortName,
    Name,
    DataType,
    VariableRole,
    IsPersonalData,
    UnitType,
    DataSource,
    PopulationDescription,
    Comment,
    TemporalityType,
    MeasurementUnit,
    MultiplicationFactor,
    Format,
    ClassificationUri,
    DefinitionUri,
    InvalidValueDescription,
    ContainsDataFrom,
    ContainsDataUntil,
}

impl VariableField {
    pub const ALL: [VariableField; 18] = [
        VariableField::ShortName,
        VariableField::Name,
        VariableField::DataType,
        VariableField::VariableRole,
        VariableField::IsPersonalData,
        VariableField::UnitType,
        VariableField::DataSource,
        VariableField::PopulationDescription,
        VariableField::Comment,
        VariableField::TemporalityType,
        VariableField::MeasurementUnit,
        VariableField::MultiplicationFactor,
        VariableField::Format,
        VariableField::ClassificationUri,
        VariableField::DefinitionUri,
        VariableField::InvalidValueDescription,
        VariableField::ContainsDataFrom,
        VariableField::ContainsDataUntil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariableField::ShortName => "short_name",
            VariableField::Name => "name",
            VariableField::DataType => "data_type",
            VariableField::VariableRole => "variable_role",
            VariableField::IsPersonalData => "is_personal_data",
            VariableField::UnitType => "unit_type",
            VariableField::DataSource => "data_source",
            VariableField::PopulationDescription => "population_description",
            VariableField::Comment => "comment",
            VariableField::TemporalityType => "temporality_type",
            VariableField::MeasurementUnit => "measurement_unit",
            VariableField::MultiplicationFactor => "multiplication_factor",
            VariableField::Format => "format",
            VariableField::ClassificationUri => "classification_uri",
            VariableField::DefinitionUri => "definition_uri",
            VariableField::InvalidValueDescription => "invalid_value_description",
            VariableField::ContainsDataFrom => "contains_data_from",
            VariableField::ContainsDataUntil => "contains_data_until",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VariableField::ShortName => "Kortnavn",
            VariableField::Name => "Navn",
            VariableField::DataType => "Datatype",
            VariableField::VariableRole => "Variabelens rolle",
            VariableField::IsPersonalData => "Er personopplysning",
            VariableField::UnitType => "Enhetstype",
            VariableField::DataSource => "Datakilde",
            VariableField::PopulationDescription => "Populasjonen",
            VariableField::Comment => "Kommentar",
            VariableField::TemporalityType => "Temporalitetstype",
            VariableField::MeasurementUnit => "Måleenhet",
            VariableField::MultiplicationFactor => "Multiplikasjonsfaktor",
            VariableField::Format => "Format",
            VariableField::ClassificationUri => "Kodeverk ID",
            VariableField::DefinitionUri => "Variabeldefinisjon ID",
            VariableField::InvalidValueDescription => "Ugyldige verdier",
            VariableField::ContainsDataFrom => "Inneholder data f.o.m.",
            VariableField::ContainsDataUntil => "Inneholder data t.o.m.",
        }
    }

    /// Coerces a raw value into the canonical representation for this field.
    ///
    /// Integers become text for text fields, enum codes are upper-cased,
    /// dates are rewritten as ISO dates and booleans as `true`/`false`.
    pub fn normalize(&self, value: &FieldValue) -> Result<FieldValue> {
        let field = self.as_str();
        Ok(match self {
            VariableField::MultiplicationFactor => FieldValue::Integer(parse_integer(field, value)?),
            VariableField::DataType => {
                FieldValue::text(parse_code::<crate::DataType>(field, value)?.as_str())
            }
            VariableField::VariableRole => {
                FieldValue::text(parse_code::<crate::VariableRole>(field, value)?.as_str())
            }
            VariableField::TemporalityType => {
                FieldValue::text(parse_code::<crate::TemporalityType>(field, value)?.as_str())
            }
            VariableField::IsPersonalData => FieldValue::Text(parse_bool(field, value)?.to_string()),
            VariableField::ContainsDataFrom | VariableField::ContainsDataUntil => {
                FieldValue::Text(parse_date(field, value)?.to_string())
            }
            _ => FieldValue::Text(parse_text(value)),
        })
    }
}

impl fmt::Display for VariableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VariableField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim();
        Self::ALL
            .iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(normalized))
            .copied()
            .ok_or_else(|| format!("Unknown variable field: {s}"))
    }
}

/// The globally editable variable fields, ordered as the catalog lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalField {
    UnitType,
    MeasurementUnit,
    MultiplicationFactor,
    VariableRole,
    DataSource,
    TemporalityType,
}

impl GlobalField {
    pub const ALL: [GlobalField; 6] = [
        GlobalField::UnitType,
        GlobalField::MeasurementUnit,
        GlobalField::MultiplicationFactor,
        GlobalField::VariableRole,
        GlobalField::DataSource,
        GlobalField::TemporalityType,
    ];

    pub fn as_str(&self) -> &'static str {
        self.variable_field().as_str()
    }

    /// Parses a form field identifier. Unknown identifiers yield `None`.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.iter().find(|field| field.as_str() == id).copied()
    }

    pub fn variable_field(&self) -> VariableField {
        match self {
            GlobalField::UnitType => VariableField::UnitType,
            GlobalField::MeasurementUnit => VariableField::MeasurementUnit,
            GlobalField::MultiplicationFactor => VariableField::MultiplicationFactor,
            GlobalField::VariableRole => VariableField::VariableRole,
            GlobalField::DataSource => VariableField::DataSource,
            GlobalField::TemporalityType => VariableField::TemporalityType,
        }
    }
}

impl fmt::Display for GlobalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dataset fields whose values are pushed down to every variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritableField {
    TemporalityType,
    DataSource,
    ContainsDataFrom,
    ContainsDataUntil,
    PopulationDescription,
}

impl InheritableField {
    pub const ALL: [InheritableField; 5] = [
        InheritableField::TemporalityType,
        InheritableField::DataSource,
        InheritableField::ContainsDataFrom,
        InheritableField::ContainsDataUntil,
        InheritableField::PopulationDescription,
    ];

    pub fn variable_field(&self) -> VariableField {
        match self {
            InheritableField::TemporalityType => VariableField::TemporalityType,
            InheritableField::DataSource => VariableField::DataSource,
            InheritableField::ContainsDataFrom => VariableField::ContainsDataFrom,
            InheritableField::ContainsDataUntil => VariableField::ContainsDataUntil,
            InheritableField::PopulationDescription => VariableField::PopulationDescription,
        }
    }

    pub fn dataset_field(&self) -> DatasetField {
        match self {
            InheritableField::TemporalityType => DatasetField::TemporalityType,
            InheritableField::DataSource => DatasetField::DataSource,
            InheritableField::ContainsDataFrom => DatasetField::ContainsDataFrom,
            InheritableField::ContainsDataUntil => DatasetField::ContainsDataUntil,
            InheritableField::PopulationDescription => DatasetField::PopulationDescription,
        }
    }
}

/// Scalar dataset fields that can be read and written generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetField {
    ShortName,
    Name,
    Description,
    Assessment,
    DatasetState,
    DatasetStatus,
    Version,
    Keyword,
    Owner,
    DataSource,
    TemporalityType,
    PopulationDescription,
    ContainsDataFrom,
    ContainsDataUntil,
}

impl DatasetField {
    pub const ALL: [DatasetField; 14] = [
        DatasetField::ShortName,
        DatasetField::Name,
        DatasetField::Description,
        DatasetField::Assessment,
        DatasetField::DatasetState,
        DatasetField::DatasetStatus,
        DatasetField::Version,
        DatasetField::Keyword,
        DatasetField::Owner,
        DatasetField::DataSource,
        DatasetField::TemporalityType,
        DatasetField::PopulationDescription,
        DatasetField::ContainsDataFrom,
        DatasetField::ContainsDataUntil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetField::ShortName => "short_name",
            DatasetField::Name => "name",
            DatasetField::Description => "description",
            DatasetField::Assessment => "assessment",
            DatasetField::DatasetState => "dataset_state",
            DatasetField::DatasetStatus => "dataset_status",
            DatasetField::Version => "version",
            DatasetField::Keyword => "keyword",
            DatasetField::Owner => "owner",
            DatasetField::DataSource => "data_source",
            DatasetField::TemporalityType => "temporality_type",
            DatasetField::PopulationDescription => "population_description",
            DatasetField::ContainsDataFrom => "contains_data_from",
            DatasetField::ContainsDataUntil => "contains_data_until",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DatasetField::ShortName => "Kortnavn",
            DatasetField::Name => "Navn",
            DatasetField::Description => "Beskrivelse",
            DatasetField::Assessment => "Verdivurdering",
            DatasetField::DatasetState => "Datatilstand",
            DatasetField::DatasetStatus => "Status",
            DatasetField::Version => "Versjon",
            DatasetField::Keyword => "Nøkkelord",
            DatasetField::Owner => "Eier",
            DatasetField::DataSource => "Datakilde",
            DatasetField::TemporalityType => "Temporalitetstype",
            DatasetField::PopulationDescription => "Populasjon",
            DatasetField::ContainsDataFrom => "Inneholder data f.o.m.",
            DatasetField::ContainsDataUntil => "Inneholder data t.o.m.",
        }
    }

    /// The inheritance link to variables, if this field has one.
    pub fn inheritable(&self) -> Option<InheritableField> {
        InheritableField::ALL
            .iter()
            .find(|field| field.dataset_field() == *self)
            .copied()
    }
}

impl fmt::Display for DatasetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatasetField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim();
        Self::ALL
            .iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(normalized))
            .copied()
            .ok_or_else(|| format!("Unknown dataset field: {s}"))
    }
}

pub(crate) fn parse_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Integer(i) => i.to_string(),
        FieldValue::Text(s) => s.trim().to_string(),
    }
}

pub(crate) fn parse_integer(field: &'static str, value: &FieldValue) -> Result<i64> {
    match value {
        FieldValue::Integer(i) => Ok(*i),
        FieldValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ModelError::invalid(field, s.as_str(), "expected an integer")),
    }
}

pub(crate) fn parse_code<T>(field: &'static str, value: &FieldValue) -> Result<T>
where
    T: FromStr<Err = String>,
{
    match value {
        FieldValue::Text(s) => s
            .parse::<T>()
            .map_err(|reason| ModelError::invalid(field, s.as_str(), &reason)),
        FieldValue::Integer(i) => Err(ModelError::invalid(
            field,
            i.to_string(),
            "expected a code",
        )),
    }
}

pub(crate) fn parse_bool(field: &'static str, value: &FieldValue) -> Result<bool> {
    let text = parse_text(value);
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "ja" | "1" => Ok(true),
        "false" | "no" | "nei" | "0" => Ok(false),
        _ => Err(ModelError::invalid(field, text, "expected true or false")),
    }
}

pub(crate) fn parse_date(field: &'static str, value: &FieldValue) -> Result<NaiveDate> {
    let text = parse_text(value);
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map_err(|_| ModelError::invalid(field, text.as_str(), "expected an ISO date (YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_multiplication_factor() {
        let field = VariableField::MultiplicationFactor;
        assert_eq!(
            field.normalize(&FieldValue::text(" 12 ")).unwrap(),
            FieldValue::Integer(12)
        );
        assert!(field.normalize(&FieldValue::text("abc")).is_err());
    }

    #[test]
    fn test_normalize_role_uppercases_code() {
        let value = VariableField::VariableRole
            .normalize(&FieldValue::text("measure"))
            .unwrap();
        assert_eq!(value, FieldValue::text("MEASURE"));
    }

    #[test]
    fn test_normalize_text_field_accepts_integer() {
        let value = VariableField::UnitType
            .normalize(&FieldValue::Integer(3))
            .unwrap();
        assert_eq!(value, FieldValue::text("3"));
    }

    #[test]
    fn test_global_field_parse_ignores_unknown() {
        assert_eq!(GlobalField::parse("unit_type"), Some(GlobalField::UnitType));
        assert_eq!(GlobalField::parse("name"), None);
    }

    #[test]
    fn test_inheritable_links() {
        assert_eq!(
            DatasetField::ContainsDataUntil.inheritable(),
            Some(InheritableField::ContainsDataUntil)
        );
        assert_eq!(DatasetField::Owner.inheritable(), None);
    }

    #[test]
    fn test_field_value_json_is_untagged() {
        let json = serde_json::to_string(&FieldValue::Integer(2)).unwrap();
        assert_eq!(json, "2");
        let value: FieldValue = serde_json::from_str("\"03\"").unwrap();
        assert_eq!(value, FieldValue::text("03"));
    }
}
