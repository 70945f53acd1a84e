use tracing::info;

use datadoc_catalog::DELETE_SELECTED;
use datadoc_model::{FieldValue, VariableField};

use crate::error::{CoreError, Result};
use crate::session::RecordStore;

/// Writes one field of a single variable.
///
/// Blank input or the delete option clears the field; anything else is
/// coerced to the field's type. A data period that would end before it
/// starts is rejected and the variable is left unchanged.
pub fn accept_variable_input<S>(
    store: &mut S,
    short_name: &str,
    field: VariableField,
    raw: Option<&str>,
) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    if field == VariableField::ShortName {
        return Err(CoreError::NotEditable {
            field: field.as_str(),
        });
    }
    let value = raw
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != DELETE_SELECTED)
        .map(FieldValue::text);
    let variable = store.lookup_variable_mut(short_name)?;
    let mut updated = variable.clone();
    updated.set_field(field, value.as_ref())?;
    let period_edit = matches!(
        field,
        VariableField::ContainsDataFrom | VariableField::ContainsDataUntil
    );
    if period_edit
        && let (Some(from), Some(until)) = (updated.contains_data_from, updated.contains_data_until)
        && from > until
    {
        return Err(CoreError::InvalidDateRange { from, until });
    }
    *variable = updated;
    info!(variable = short_name, field = %field, "updated variable field");
    Ok(())
}
