use crate::global::state::GlobalFieldState;

/// One line per globally set field, in catalog order.
pub fn generate_report(state: &GlobalFieldState) -> Vec<String> {
    state
        .iter()
        .map(|(_, entry)| {
            if entry.delete {
                format!("{}: will be cleared", entry.display_name)
            } else {
                let value = entry
                    .display_value
                    .clone()
                    .or_else(|| entry.value.as_ref().map(ToString::to_string))
                    .unwrap_or_default();
                format!(
                    "{}: {} variables will be updated with value: {}",
                    entry.display_name, entry.num_vars, value
                )
            }
        })
        .collect()
}
