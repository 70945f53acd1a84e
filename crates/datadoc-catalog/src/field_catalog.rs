#![deny(unsafe_code)]

use serde::Serialize;

use datadoc_model::{FieldValue, GlobalField, TemporalityType, VariableRole};

use crate::code_list::{CodeList, CodeLists};

/// Option id that reverts a global field to "not globally set".
pub const DESELECT: &str = "DESELECT";
/// Option id that clears a global field on every variable.
pub const DELETE_SELECTED: &str = "DELETE_SELECTED";

pub const DESELECT_OPTION_TITLE: &str = "Fjern valg";
pub const DELETE_OPTION_TITLE: &str = "Slett verdi";

/// One entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub title: String,
    pub id: String,
}

impl FieldOption {
    fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
        }
    }
}

/// Display metadata for the globally editable variable fields.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    code_lists: CodeLists,
}

impl FieldCatalog {
    pub fn new(code_lists: CodeLists) -> Self {
        Self { code_lists }
    }

    /// Global fields in catalog order.
    pub fn fields(&self) -> &'static [GlobalField] {
        &GlobalField::ALL
    }

    pub fn code_lists(&self) -> &CodeLists {
        &self.code_lists
    }

    pub fn display_name(&self, field: GlobalField) -> &'static str {
        field.variable_field().display_name()
    }

    pub fn is_dropdown(&self, field: GlobalField) -> bool {
        !matches!(field, GlobalField::MultiplicationFactor)
    }

    /// The code list backing a dropdown, for fields that are code-list based.
    pub fn code_list(&self, field: GlobalField) -> Option<&CodeList> {
        match field {
            GlobalField::UnitType => Some(&self.code_lists.unit_types),
            GlobalField::MeasurementUnit => Some(&self.code_lists.measurement_units),
            GlobalField::DataSource => Some(&self.code_lists.data_sources),
            _ => None,
        }
    }

    /// Human readable form of a value: the option title for dropdowns, the
    /// value itself otherwise or when no title is known.
    pub fn resolve_display_value(&self, field: GlobalField, value: &FieldValue) -> String {
        let raw = value.to_string();
        if !self.is_dropdown(field) {
            return raw;
        }
        let title = match field {
            GlobalField::VariableRole => raw
                .parse::<VariableRole>()
                .ok()
                .map(|role| role.title().to_string()),
            GlobalField::TemporalityType => raw
                .parse::<TemporalityType>()
                .ok()
                .map(|kind| kind.title().to_string()),
            _ => self
                .code_list(field)
                .and_then(|list| list.title_for(&raw))
                .map(str::to_string),
        };
        title.unwrap_or(raw)
    }

    /// Dropdown options led by the deselect and delete entries. Input fields
    /// have no options.
    pub fn options(&self, field: GlobalField) -> Vec<FieldOption> {
        if !self.is_dropdown(field) {
            return Vec::new();
        }
        let mut options = vec![
            FieldOption::new(DESELECT_OPTION_TITLE, DESELECT),
            FieldOption::new(DELETE_OPTION_TITLE, DELETE_SELECTED),
        ];
        match field {
            GlobalField::VariableRole => options.extend(
                VariableRole::ALL
                    .iter()
                    .map(|role| FieldOption::new(role.title(), role.as_str())),
            ),
            GlobalField::TemporalityType => options.extend(
                TemporalityType::ALL
                    .iter()
                    .map(|kind| FieldOption::new(kind.title(), kind.as_str())),
            ),
            _ => {
                if let Some(list) = self.code_list(field) {
                    options.extend(
                        list.items
                            .iter()
                            .map(|item| FieldOption::new(item.title.as_str(), item.code.as_str())),
                    );
                }
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_list::CodeItem;

    fn catalog() -> FieldCatalog {
        FieldCatalog::new(CodeLists {
            unit_types: CodeList::new(
                "unit_types",
                vec![
                    CodeItem {
                        code: "01".to_string(),
                        title: "Adresse".to_string(),
                    },
                    CodeItem {
                        code: "03".to_string(),
                        title: "Bolig".to_string(),
                    },
                ],
            ),
            ..CodeLists::default()
        })
    }

    #[test]
    fn test_display_value_from_code_list() {
        let catalog = catalog();
        assert_eq!(
            catalog.resolve_display_value(GlobalField::UnitType, &FieldValue::text("03")),
            "Bolig"
        );
        assert_eq!(
            catalog.resolve_display_value(GlobalField::UnitType, &FieldValue::text("99")),
            "99"
        );
    }

    #[test]
    fn test_display_value_for_enums_and_inputs() {
        let catalog = catalog();
        assert_eq!(
            catalog.resolve_display_value(GlobalField::VariableRole, &FieldValue::text("MEASURE")),
            "MÅLEVARIABEL"
        );
        assert_eq!(
            catalog.resolve_display_value(GlobalField::MultiplicationFactor, &FieldValue::Integer(2)),
            "2"
        );
    }

    #[test]
    fn test_options_lead_with_sentinels() {
        let catalog = catalog();
        let options = catalog.options(GlobalField::UnitType);
        let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec![DESELECT, DELETE_SELECTED, "01", "03"]);
        assert!(catalog.options(GlobalField::MultiplicationFactor).is_empty());
        assert_eq!(catalog.options(GlobalField::TemporalityType).len(), 6);
    }
}
