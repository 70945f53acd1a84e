//! Dataset to variable inheritance.

use tracing::{debug, info};

use datadoc_model::{DatasetField, FieldValue, InheritableField};

use crate::error::{CoreError, Result};
use crate::session::RecordStore;

/// Writes a dataset value onto every variable.
///
/// `None` leaves the variables untouched. Returns the number of variables
/// written.
pub fn inherit_scalar<S>(
    store: &mut S,
    field: InheritableField,
    value: Option<&FieldValue>,
) -> Result<usize>
where
    S: RecordStore + ?Sized,
{
    let Some(value) = value else {
        return Ok(0);
    };
    let variable_field = field.variable_field();
    let value = variable_field.normalize(value)?;
    let variables = store.variables_mut();
    for variable in variables.iter_mut() {
        variable.set_field(variable_field, Some(&value))?;
    }
    debug!(field = %variable_field, count = variables.len(), "inherited dataset value");
    Ok(variables.len())
}

/// Fills variables' data period from the dataset where the variable has none.
pub fn inherit_derived_dates<S>(store: &mut S) -> usize
where
    S: RecordStore + ?Sized,
{
    let from = store.dataset().contains_data_from;
    let until = store.dataset().contains_data_until;
    let mut updated = 0;
    for variable in store.variables_mut() {
        let mut touched = false;
        if variable.contains_data_from.is_none() && from.is_some() {
            variable.contains_data_from = from;
            touched = true;
        }
        if variable.contains_data_until.is_none() && until.is_some() {
            variable.contains_data_until = until;
            touched = true;
        }
        updated += usize::from(touched);
    }
    if updated > 0 {
        info!(variables = updated, "filled data period from dataset");
    }
    updated
}

/// Writes one dataset field and pushes inheritable values to the variables.
///
/// Blank input clears the dataset field without touching the variables.
pub fn accept_dataset_input<S>(store: &mut S, field: DatasetField, raw: Option<&str>) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    if field == DatasetField::ShortName {
        return Err(CoreError::NotEditable {
            field: field.as_str(),
        });
    }
    let value = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(FieldValue::text);

    let mut dataset = store.dataset().clone();
    dataset.set_field(field, value.as_ref())?;
    if let (Some(from), Some(until)) = (dataset.contains_data_from, dataset.contains_data_until)
        && from > until
    {
        return Err(CoreError::InvalidDateRange { from, until });
    }
    let stored = dataset.get_field(field);
    *store.dataset_mut() = dataset;
    info!(field = %field, "updated dataset field");

    if let Some(inheritable) = field.inheritable() {
        inherit_scalar(store, inheritable, stored.as_ref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datadoc_model::{DatasetRecord, TemporalityType, VariableRecord};

    use crate::session::MetadataSession;

    fn session() -> MetadataSession {
        MetadataSession::from_records(
            DatasetRecord::new("person_data"),
            vec![
                VariableRecord {
                    contains_data_from: NaiveDate::from_ymd_opt(2019, 1, 1),
                    ..VariableRecord::new("a")
                },
                VariableRecord::new("b"),
            ],
        )
    }

    #[test]
    fn test_inherit_scalar_overwrites_every_variable() {
        let mut store = session();
        store.variables_mut()[0].temporality_type = Some(TemporalityType::Event);
        let count = inherit_scalar(
            &mut store,
            InheritableField::TemporalityType,
            Some(&FieldValue::text("status")),
        )
        .unwrap();
        assert_eq!(count, 2);
        assert!(
            store
                .variables()
                .iter()
                .all(|v| v.temporality_type == Some(TemporalityType::Status))
        );
    }

    #[test]
    fn test_inherit_scalar_none_is_noop() {
        let mut store = session();
        assert_eq!(
            inherit_scalar(&mut store, InheritableField::DataSource, None).unwrap(),
            0
        );
    }

    #[test]
    fn test_derived_dates_fill_only_missing() {
        let mut store = session();
        store.dataset_mut().contains_data_from = NaiveDate::from_ymd_opt(2020, 1, 1);
        store.dataset_mut().contains_data_until = NaiveDate::from_ymd_opt(2020, 12, 31);
        assert_eq!(inherit_derived_dates(&mut store), 2);
        let a = &store.variables()[0];
        assert_eq!(a.contains_data_from, NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(a.contains_data_until, NaiveDate::from_ymd_opt(2020, 12, 31));
        assert_eq!(
            store.variables()[1].contains_data_from,
            NaiveDate::from_ymd_opt(2020, 1, 1)
        );
    }

    #[test]
    fn test_dataset_input_rejects_inverted_range() {
        let mut store = session();
        accept_dataset_input(&mut store, DatasetField::ContainsDataUntil, Some("2020-12-31"))
            .unwrap();
        let err =
            accept_dataset_input(&mut store, DatasetField::ContainsDataFrom, Some("2021-01-01"))
                .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDateRange { .. }));
        assert_eq!(store.dataset().contains_data_from, None);
        assert_eq!(
            store.variables()[0].contains_data_until,
            NaiveDate::from_ymd_opt(2020, 12, 31)
        );
    }

    #[test]
    fn test_dataset_short_name_is_not_editable() {
        let mut store = session();
        assert!(matches!(
            accept_dataset_input(&mut store, DatasetField::ShortName, Some("x")),
            Err(CoreError::NotEditable { .. })
        ));
    }
}
