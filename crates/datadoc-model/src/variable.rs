use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{DataType, TemporalityType, VariableRole};
use crate::error::Result;
use crate::field::{
    FieldValue, VariableField, parse_bool, parse_code, parse_date, parse_integer, parse_text,
};
use crate::pseudonymization::PseudonymizationRecord;

/// Metadata for one column of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableRecord {
    pub short_name: Option<String>,
    pub name: Option<String>,
    pub data_type: Option<DataType>,
    pub variable_role: Option<VariableRole>,
    pub is_personal_data: Option<bool>,
    pub unit_type: Option<String>,
    pub data_source: Option<String>,
    pub population_description: Option<String>,
    pub comment: Option<String>,
    pub temporality_type: Option<TemporalityType>,
    pub measurement_unit: Option<String>,
    pub multiplication_factor: Option<i64>,
    pub format: Option<String>,
    pub classification_uri: Option<String>,
    pub definition_uri: Option<String>,
    pub invalid_value_description: Option<String>,
    pub contains_data_from: Option<NaiveDate>,
    pub contains_data_until: Option<NaiveDate>,
    pub pseudonymization: Option<PseudonymizationRecord>,
}

impl VariableRecord {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: Some(short_name.into()),
            ..Self::default()
        }
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn is_pseudonymized(&self) -> bool {
        self.pseudonymization.is_some()
    }

    /// Reads a scalar field in its canonical [`FieldValue`] form.
    pub fn get_field(&self, field: VariableField) -> Option<FieldValue> {
        match field {
            VariableField::ShortName => self.short_name.clone().map(FieldValue::Text),
            VariableField::Name => self.name.clone().map(FieldValue::Text),
            VariableField::DataType => self.data_type.map(|v| FieldValue::text(v.as_str())),
            VariableField::VariableRole => {
                self.variable_role.map(|v| FieldValue::text(v.as_str()))
            }
            VariableField::IsPersonalData => self
                .is_personal_data
                .map(|v| FieldValue::Text(v.to_string())),
            VariableField::UnitType => self.unit_type.clone().map(FieldValue::Text),
            VariableField::DataSource => self.data_source.clone().map(FieldValue::Text),
            VariableField::PopulationDescription => {
                self.population_description.clone().map(FieldValue::Text)
            }
            VariableField::Comment => self.comment.clone().map(FieldValue::Text),
            VariableField::TemporalityType => {
                self.temporality_type.map(|v| FieldValue::text(v.as_str()))
            }
            VariableField::MeasurementUnit => self.measurement_unit.clone().map(FieldValue::Text),
            VariableField::MultiplicationFactor => {
                self.multiplication_factor.map(FieldValue::Integer)
            }
            VariableField::Format => self.format.clone().map(FieldValue::Text),
            VariableField::ClassificationUri => {
                self.classification_uri.clone().map(FieldValue::Text)
            }
            VariableField::DefinitionUri => self.definition_uri.clone().map(FieldValue::Text),
            VariableField::InvalidValueDescription => {
                self.invalid_value_description.clone().map(FieldValue::Text)
            }
            VariableField::ContainsDataFrom => self
                .contains_data_from
                .map(|d| FieldValue::Text(d.to_string())),
            VariableField::ContainsDataUntil => self
                .contains_data_until
                .map(|d| FieldValue::Text(d.to_string())),
        }
    }

    /// Writes a scalar field, coercing the value to the field's type.
    ///
    /// `None` clears the field. On error the record is left unchanged.
    pub fn set_field(&mut self, field: VariableField, value: Option<&FieldValue>) -> Result<()> {
        let name = field.as_str();
        match field {
            VariableField::ShortName => self.short_name = value.map(parse_text),
            VariableField::Name => self.name = value.map(parse_text),
            VariableField::DataType => {
                self.data_type = value.map(|v| parse_code(name, v)).transpose()?;
            }
            VariableField::VariableRole => {
                self.variable_role = value.map(|v| parse_code(name, v)).transpose()?;
            }
            VariableField::IsPersonalData => {
                self.is_personal_data = value.map(|v| parse_bool(name, v)).transpose()?;
            }
            VariableField::UnitType => self.unit_type = value.map(parse_text),
            VariableField::DataSource => self.data_source = value.map(parse_text),
            VariableField::PopulationDescription => {
                self.population_description = value.map(parse_text);
            }
            VariableField::Comment => self.comment = value.map(parse_text),
            VariableField::TemporalityType => {
                self.temporality_type = value.map(|v| parse_code(name, v)).transpose()?;
            }
            VariableField::MeasurementUnit => self.measurement_unit = value.map(parse_text),
            VariableField::MultiplicationFactor => {
                self.multiplication_factor = value.map(|v| parse_integer(name, v)).transpose()?;
            }
            VariableField::Format => self.format = value.map(parse_text),
            VariableField::ClassificationUri => self.classification_uri = value.map(parse_text),
            VariableField::DefinitionUri => self.definition_uri = value.map(parse_text),
            VariableField::InvalidValueDescription => {
                self.invalid_value_description = value.map(parse_text);
            }
            VariableField::ContainsDataFrom => {
                self.contains_data_from = value.map(|v| parse_date(name, v)).transpose()?;
            }
            VariableField::ContainsDataUntil => {
                self.contains_data_until = value.map(|v| parse_date(name, v)).transpose()?;
            }
        }
        Ok(())
    }
}
