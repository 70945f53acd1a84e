//! Reconciliation state carried between global edits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use datadoc_model::{FieldValue, GlobalField};

/// Bookkeeping for one globally set field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalFieldEntry {
    pub display_name: String,
    /// The value written to every variable. `None` for delete entries.
    pub value: Option<FieldValue>,
    pub display_value: Option<String>,
    pub num_vars: usize,
    pub delete: bool,
    /// Value each touched variable had before its first global edit,
    /// keyed by short name. `None` when the variable had no value.
    #[serde(default)]
    pub vars_updated: BTreeMap<String, Option<FieldValue>>,
}

impl GlobalFieldEntry {
    pub fn is_delete(&self) -> bool {
        self.delete
    }
}

/// Globally set fields, iterated in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalFieldState {
    entries: BTreeMap<GlobalField, GlobalFieldEntry>,
}

impl GlobalFieldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: GlobalField) -> Option<&GlobalFieldEntry> {
        self.entries.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GlobalField, &GlobalFieldEntry)> {
        self.entries.iter().map(|(field, entry)| (*field, entry))
    }

    pub(crate) fn insert(&mut self, field: GlobalField, entry: GlobalFieldEntry) {
        self.entries.insert(field, entry);
    }

    pub(crate) fn take(&mut self, field: GlobalField) -> Option<GlobalFieldEntry> {
        self.entries.remove(&field)
    }

    pub(crate) fn into_entries(self) -> impl Iterator<Item = (GlobalField, GlobalFieldEntry)> {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_json_is_keyed_by_field_id() {
        let mut state = GlobalFieldState::new();
        state.insert(
            GlobalField::MultiplicationFactor,
            GlobalFieldEntry {
                display_name: "Multiplikasjonsfaktor".to_string(),
                value: Some(FieldValue::Integer(2)),
                display_value: Some("2".to_string()),
                num_vars: 1,
                delete: false,
                vars_updated: BTreeMap::from([("inntekt".to_string(), None)]),
            },
        );
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "multiplication_factor": {
                    "display_name": "Multiplikasjonsfaktor",
                    "value": 2,
                    "display_value": "2",
                    "num_vars": 1,
                    "delete": false,
                    "vars_updated": {"inntekt": null}
                }
            })
        );
        let back: GlobalFieldState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
