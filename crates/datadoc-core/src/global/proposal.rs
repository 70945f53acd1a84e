//! Boundary parsing of global edit input.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use datadoc_catalog::{DELETE_SELECTED, DESELECT};
use datadoc_model::{FieldValue, GlobalField, ModelError};

use crate::error::Result;

/// What the user asked for on one global field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    /// No input; the previous entry, if any, is kept.
    Absent,
    /// Revert to "not globally set" and restore prior values.
    Deselect,
    /// Clear the field on every variable.
    Delete,
    /// Set a coerced value on every variable.
    Set(FieldValue),
}

impl Proposal {
    /// Normalizes a raw input value for `field`.
    pub fn parse(field: GlobalField, raw: Option<&Value>) -> Result<Self> {
        let value = match raw {
            None | Some(Value::Null) => return Ok(Proposal::Absent),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(Proposal::Absent),
            Some(Value::String(s)) if s == DESELECT => return Ok(Proposal::Deselect),
            Some(Value::String(s)) if s == DELETE_SELECTED => return Ok(Proposal::Delete),
            Some(other) => FieldValue::from_json(other).ok_or_else(|| {
                ModelError::InvalidValue {
                    field: field.as_str(),
                    value: other.to_string(),
                    reason: "expected a scalar value".to_string(),
                }
            })?,
        };
        let value = field.variable_field().normalize(&value)?;
        if field == GlobalField::MultiplicationFactor && value == FieldValue::Integer(0) {
            return Ok(Proposal::Deselect);
        }
        Ok(Proposal::Set(value))
    }
}

static ABSENT: Proposal = Proposal::Absent;

/// Parsed proposals for every global field that received input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalProposals {
    proposals: BTreeMap<GlobalField, Proposal>,
}

impl GlobalProposals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw `field_id -> value` map. Unknown field ids are ignored.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self> {
        let mut proposals = BTreeMap::new();
        for (id, value) in raw {
            let Some(field) = GlobalField::parse(id) else {
                debug!(field = %id, "ignoring unknown global field");
                continue;
            };
            proposals.insert(field, Proposal::parse(field, Some(value))?);
        }
        Ok(Self { proposals })
    }

    pub fn with(mut self, field: GlobalField, proposal: Proposal) -> Self {
        self.proposals.insert(field, proposal);
        self
    }

    /// The proposal for `field`; fields without input are `Absent`.
    pub fn get(&self, field: GlobalField) -> &Proposal {
        self.proposals.get(&field).unwrap_or(&ABSENT)
    }
}
