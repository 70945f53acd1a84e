//! Parsing of `field=value` edit arguments.

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use datadoc_core::GlobalProposals;
use datadoc_model::GlobalField;

/// Splits a `field=value` argument and resolves the global field id.
pub fn parse_assignment(raw: &str) -> Result<(GlobalField, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected field=value, got {raw:?}"))?;
    let field = GlobalField::parse(name.trim()).ok_or_else(|| {
        let known: Vec<&str> = GlobalField::ALL.iter().map(GlobalField::as_str).collect();
        anyhow!(
            "unknown global field {:?} (expected one of: {})",
            name.trim(),
            known.join(", ")
        )
    })?;
    Ok((field, value.trim().to_string()))
}

/// Builds reconciler input from `field=value` arguments. Later arguments for
/// the same field win.
pub fn proposals_from_assignments(assignments: &[String]) -> Result<GlobalProposals> {
    let mut raw = Map::new();
    for assignment in assignments {
        let (field, value) = parse_assignment(assignment)?;
        raw.insert(field.as_str().to_string(), Value::String(value));
    }
    GlobalProposals::from_raw(&raw).context("invalid global edit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use datadoc_core::Proposal;
    use datadoc_model::FieldValue;

    #[test]
    fn test_parse_assignment() {
        let (field, value) = parse_assignment("unit_type = 03").unwrap();
        assert_eq!(field, GlobalField::UnitType);
        assert_eq!(value, "03");
        assert!(parse_assignment("unit_type").is_err());
        assert!(parse_assignment("short_name=x").is_err());
    }

    #[test]
    fn test_proposals_from_assignments() {
        let proposals = proposals_from_assignments(&[
            "multiplication_factor=1000".to_string(),
            "variable_role=DESELECT".to_string(),
            "data_source=".to_string(),
        ])
        .unwrap();
        assert_eq!(
            proposals.get(GlobalField::MultiplicationFactor),
            &Proposal::Set(FieldValue::Integer(1000))
        );
        assert_eq!(proposals.get(GlobalField::VariableRole), &Proposal::Deselect);
        assert_eq!(proposals.get(GlobalField::DataSource), &Proposal::Absent);
        assert!(proposals_from_assignments(&["multiplication_factor=mye".to_string()]).is_err());
    }
}
