//! Applying global field values across all variables.
//!
//! A global edit runs in three phases:
//!
//! 1. **classify** turns every catalog field into a [`FieldAction`] from the
//!    proposal and the previous state entry. All coercion happens here.
//! 2. **mutate** walks the variables once and applies the actions, recording
//!    the value a variable had before it was first touched.
//! 3. the surviving entries become the new [`GlobalFieldState`], which
//!    [`generate_report`](super::generate_report) turns into text.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use datadoc_catalog::FieldCatalog;
use datadoc_model::{FieldValue, GlobalField};

use crate::error::Result;
use crate::global::proposal::{GlobalProposals, Proposal};
use crate::global::state::{GlobalFieldEntry, GlobalFieldState};
use crate::session::RecordStore;

/// Prior values keyed by variable short name.
type Priors = BTreeMap<String, Option<FieldValue>>;

#[derive(Debug, Clone, PartialEq)]
enum FieldAction {
    /// Write recorded prior values back; the field leaves the state.
    Restore(Priors),
    /// Set the field to null everywhere.
    Clear(GlobalFieldEntry),
    /// Leave variables alone and carry the entry over.
    Keep(GlobalFieldEntry),
    /// Write a new value everywhere.
    Assign(GlobalFieldEntry),
}

impl FieldAction {
    fn name(&self) -> &'static str {
        match self {
            FieldAction::Restore(_) => "restore",
            FieldAction::Clear(_) => "clear",
            FieldAction::Keep(_) => "keep",
            FieldAction::Assign(_) => "assign",
        }
    }

    fn mutates(&self) -> bool {
        !matches!(self, FieldAction::Keep(_))
    }
}

/// Applies proposed global values to every variable in `store`.
///
/// Variables are mutated in place. The returned state replaces `previous`.
pub fn reconcile<S>(
    store: &mut S,
    catalog: &FieldCatalog,
    proposals: &GlobalProposals,
    previous: GlobalFieldState,
) -> Result<GlobalFieldState>
where
    S: RecordStore + ?Sized,
{
    let mut actions = classify(catalog, proposals, previous)?;
    mutate(store, &mut actions)?;

    let mut state = GlobalFieldState::new();
    for (field, action) in actions {
        match action {
            FieldAction::Restore(_) => {}
            FieldAction::Clear(entry) | FieldAction::Keep(entry) | FieldAction::Assign(entry) => {
                state.insert(field, entry);
            }
        }
    }
    info!(fields = state.len(), "applied global edit");
    Ok(state)
}

/// Restores every recorded prior value and returns an empty state.
pub fn reset<S>(store: &mut S, state: GlobalFieldState) -> Result<GlobalFieldState>
where
    S: RecordStore + ?Sized,
{
    let mut actions = Vec::with_capacity(state.len());
    for (field, entry) in state.into_entries() {
        let priors = coerce_priors(field, entry.vars_updated)?;
        actions.push((field, FieldAction::Restore(priors)));
    }
    mutate(store, &mut actions)?;
    info!(fields = actions.len(), "reset global edits");
    Ok(GlobalFieldState::new())
}

fn classify(
    catalog: &FieldCatalog,
    proposals: &GlobalProposals,
    mut previous: GlobalFieldState,
) -> Result<Vec<(GlobalField, FieldAction)>> {
    let mut actions = Vec::new();
    for &field in catalog.fields() {
        let prev = previous.take(field);
        let action = match (proposals.get(field), prev) {
            (Proposal::Deselect, Some(prev)) => {
                Some(FieldAction::Restore(coerce_priors(field, prev.vars_updated)?))
            }
            (Proposal::Deselect, None) => None,
            (Proposal::Delete, Some(prev)) if prev.delete => Some(FieldAction::Keep(prev)),
            (Proposal::Delete, prev) => Some(FieldAction::Clear(GlobalFieldEntry {
                display_name: catalog.display_name(field).to_string(),
                value: None,
                display_value: None,
                num_vars: 0,
                delete: true,
                vars_updated: prev.map(|p| p.vars_updated).unwrap_or_default(),
            })),
            (Proposal::Absent, prev) => prev.map(FieldAction::Keep),
            (Proposal::Set(value), Some(prev))
                if !prev.delete && prev.value.as_ref() == Some(value) =>
            {
                Some(FieldAction::Keep(prev))
            }
            (Proposal::Set(value), prev) => Some(FieldAction::Assign(GlobalFieldEntry {
                display_name: catalog.display_name(field).to_string(),
                value: Some(value.clone()),
                display_value: Some(catalog.resolve_display_value(field, value)),
                num_vars: 0,
                delete: false,
                vars_updated: prev.map(|p| p.vars_updated).unwrap_or_default(),
            })),
        };
        if let Some(action) = action {
            debug!(field = %field, action = action.name(), "classified global field");
            actions.push((field, action));
        }
    }
    Ok(actions)
}

fn coerce_priors(field: GlobalField, priors: Priors) -> Result<Priors> {
    let variable_field = field.variable_field();
    let mut coerced = Priors::new();
    for (short_name, prior) in priors {
        let prior = prior
            .map(|value| variable_field.normalize(&value))
            .transpose()?;
        coerced.insert(short_name, prior);
    }
    Ok(coerced)
}

fn mutate<S>(store: &mut S, actions: &mut [(GlobalField, FieldAction)]) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    if !actions.iter().any(|(_, action)| action.mutates()) {
        return Ok(());
    }
    for variable in store.variables_mut() {
        let Some(short_name) = variable.short_name.clone() else {
            warn!("skipping variable without short name");
            continue;
        };
        for (field, action) in actions.iter_mut() {
            let variable_field = field.variable_field();
            // Values were normalized during classification.
            match action {
                FieldAction::Restore(priors) => {
                    if let Some(prior) = priors.get(&short_name) {
                        variable.set_field(variable_field, prior.as_ref())?;
                    }
                }
                FieldAction::Clear(entry) => {
                    entry
                        .vars_updated
                        .entry(short_name.clone())
                        .or_insert_with(|| variable.get_field(variable_field));
                    variable.set_field(variable_field, None)?;
                }
                FieldAction::Assign(entry) => {
                    entry
                        .vars_updated
                        .entry(short_name.clone())
                        .or_insert_with(|| variable.get_field(variable_field));
                    variable.set_field(variable_field, entry.value.as_ref())?;
                    entry.num_vars += 1;
                }
                FieldAction::Keep(_) => {}
            }
        }
    }
    Ok(())
}
