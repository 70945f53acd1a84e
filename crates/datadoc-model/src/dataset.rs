use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{Assessment, DataSetState, DataSetStatus, TemporalityType};
use crate::error::Result;
use crate::field::{DatasetField, FieldValue, parse_code, parse_date, parse_text};

/// Dataset-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetRecord {
    pub short_name: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub assessment: Option<Assessment>,
    pub dataset_state: Option<DataSetState>,
    pub dataset_status: Option<DataSetStatus>,
    pub version: Option<String>,
    pub keyword: Vec<String>,
    pub owner: Option<String>,
    pub data_source: Option<String>,
    pub temporality_type: Option<TemporalityType>,
    pub population_description: Option<String>,
    pub contains_data_from: Option<NaiveDate>,
    pub contains_data_until: Option<NaiveDate>,
}

impl DatasetRecord {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: Some(short_name.into()),
            dataset_status: Some(DataSetStatus::Draft),
            ..Self::default()
        }
    }

    pub fn get_field(&self, field: DatasetField) -> Option<FieldValue> {
        match field {
            DatasetField::ShortName => self.short_name.clone().map(FieldValue::Text),
            DatasetField::Name => self.name.clone().map(FieldValue::Text),
            DatasetField::Description => self.description.clone().map(FieldValue::Text),
            DatasetField::Assessment => self.assessment.map(|v| FieldValue::text(v.as_str())),
            DatasetField::DatasetState => {
                self.dataset_state.map(|v| FieldValue::text(v.as_str()))
            }
            DatasetField::DatasetStatus => {
                self.dataset_status.map(|v| FieldValue::text(v.as_str()))
            }
            DatasetField::Version => self.version.clone().map(FieldValue::Text),
            DatasetField::Keyword => {
                (!self.keyword.is_empty()).then(|| FieldValue::Text(self.keyword.join(",")))
            }
            DatasetField::Owner => self.owner.clone().map(FieldValue::Text),
            DatasetField::DataSource => self.data_source.clone().map(FieldValue::Text),
            DatasetField::TemporalityType => {
                self.temporality_type.map(|v| FieldValue::text(v.as_str()))
            }
            DatasetField::PopulationDescription => {
                self.population_description.clone().map(FieldValue::Text)
            }
            DatasetField::ContainsDataFrom => self
                .contains_data_from
                .map(|d| FieldValue::Text(d.to_string())),
            DatasetField::ContainsDataUntil => self
                .contains_data_until
                .map(|d| FieldValue::Text(d.to_string())),
        }
    }

    /// Writes a scalar field. Keywords are given as a comma separated list.
    pub fn set_field(&mut self, field: DatasetField, value: Option<&FieldValue>) -> Result<()> {
        let name = field.as_str();
        match field {
            DatasetField::ShortName => self.short_name = value.map(parse_text),
            DatasetField::Name => self.name = value.map(parse_text),
            DatasetField::Description => self.description = value.map(parse_text),
            DatasetField::Assessment => {
                self.assessment = value.map(|v| parse_code(name, v)).transpose()?;
            }
            DatasetField::DatasetState => {
                self.dataset_state = value.map(|v| parse_code(name, v)).transpose()?;
            }
            DatasetField::DatasetStatus => {
                self.dataset_status = value.map(|v| parse_code(name, v)).transpose()?;
            }
            DatasetField::Version => self.version = value.map(parse_text),
            DatasetField::Keyword => {
                self.keyword = value
                    .map(|v| {
                        parse_text(v)
                            .split(',')
                            .map(str::trim)
                            .filter(|word| !word.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
            }
            DatasetField::Owner => self.owner = value.map(parse_text),
            DatasetField::DataSource => self.data_source = value.map(parse_text),
            DatasetField::TemporalityType => {
                self.temporality_type = value.map(|v| parse_code(name, v)).transpose()?;
            }
            DatasetField::PopulationDescription => {
                self.population_description = value.map(parse_text);
            }
            DatasetField::ContainsDataFrom => {
                self.contains_data_from = value.map(|v| parse_date(name, v)).transpose()?;
            }
            DatasetField::ContainsDataUntil => {
                self.contains_data_until = value.map(|v| parse_date(name, v)).transpose()?;
            }
        }
        Ok(())
    }
}
