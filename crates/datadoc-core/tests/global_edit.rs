//! Global edit scenarios and properties.

use proptest::prelude::*;
use serde_json::json;

use datadoc_catalog::{CodeItem, CodeList, CodeLists, FieldCatalog};
use datadoc_core::{
    GlobalFieldState, GlobalProposals, MetadataSession, Proposal, RecordStore, generate_report,
    reconcile, reset,
};
use datadoc_model::{
    DatasetRecord, FieldValue, GlobalField, TemporalityType, VariableRecord, VariableRole,
};

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
        data_sources: CodeList::new(
            "data_sources",
            vec![CodeItem {
                code: "05".to_string(),
                title: "Skatteetaten".to_string(),
            }],
        ),
        ..CodeLists::default()
    })
}

fn session(short_names: &[&str]) -> MetadataSession {
    MetadataSession::from_records(
        DatasetRecord::new("person_data_v1"),
        short_names.iter().map(|name| VariableRecord::new(*name)).collect(),
    )
}

fn proposals(raw: serde_json::Value) -> GlobalProposals {
    GlobalProposals::from_raw(raw.as_object().expect("object")).expect("valid proposals")
}

#[test]
fn set_unit_type_and_factor_on_all_variables() {
    let mut store = session(&["pers_id", "inntekt"]);
    let state = reconcile(
        &mut store,
        &catalog(),
        &proposals(json!({"unit_type": "03", "multiplication_factor": 2})),
        GlobalFieldState::new(),
    )
    .expect("reconcile");

    for variable in store.variables() {
        assert_eq!(variable.unit_type.as_deref(), Some("03"));
        assert_eq!(variable.multiplication_factor, Some(2));
    }
    let unit_type = state.get(GlobalField::UnitType).expect("unit type entry");
    assert_eq!(unit_type.num_vars, 2);
    assert_eq!(unit_type.display_value.as_deref(), Some("Bolig"));
    assert_eq!(unit_type.vars_updated.len(), 2);
    assert!(unit_type.vars_updated.values().all(Option::is_none));
    assert_eq!(
        state.get(GlobalField::MultiplicationFactor).map(|e| e.num_vars),
        Some(2)
    );

    insta::assert_snapshot!(generate_report(&state).join("\n"), @r"
    Enhetstype: 2 variables will be updated with value: Bolig
    Multiplikasjonsfaktor: 2 variables will be updated with value: 2
    ");
}

#[test]
fn delete_clears_every_variable() {
    let mut store = session(&["a", "b"]);
    store.variables_mut()[0].unit_type = Some("01".to_string());
    let state = reconcile(
        &mut store,
        &catalog(),
        &proposals(json!({"unit_type": "DELETE_SELECTED"})),
        GlobalFieldState::new(),
    )
    .expect("reconcile");

    assert!(store.variables().iter().all(|v| v.unit_type.is_none()));
    let entry = state.get(GlobalField::UnitType).expect("entry");
    assert!(entry.delete);
    assert_eq!(entry.value, None);
    assert_eq!(entry.num_vars, 0);
    assert_eq!(entry.vars_updated["a"], Some(FieldValue::text("01")));
    assert_eq!(generate_report(&state), vec!["Enhetstype: will be cleared"]);
}

#[test]
fn absent_fields_keep_previous_entries() {
    let mut store = session(&["a", "b"]);
    let catalog = catalog();
    let state = reconcile(
        &mut store,
        &catalog,
        &proposals(json!({"data_source": "05"})),
        GlobalFieldState::new(),
    )
    .expect("first edit");
    let state = reconcile(
        &mut store,
        &catalog,
        &proposals(json!({"variable_role": "MEASURE"})),
        state,
    )
    .expect("second edit");

    assert_eq!(state.len(), 2);
    assert_eq!(
        generate_report(&state),
        vec![
            "Variabelens rolle: 2 variables will be updated with value: MÅLEVARIABEL",
            "Datakilde: 2 variables will be updated with value: Skatteetaten",
        ]
    );
}

#[test]
fn reapplying_same_value_keeps_count() {
    let mut store = session(&["a", "b", "c"]);
    let catalog = catalog();
    let edit = proposals(json!({"temporality_type": "STATUS"}));
    let state = reconcile(&mut store, &catalog, &edit, GlobalFieldState::new()).expect("first");
    let again = reconcile(&mut store, &catalog, &edit, state.clone()).expect("second");
    assert_eq!(again, state);
    assert_eq!(again.get(GlobalField::TemporalityType).map(|e| e.num_vars), Some(3));
}

#[test]
fn zero_factor_without_previous_is_noop() {
    let mut store = session(&["a"]);
    let state = reconcile(
        &mut store,
        &catalog(),
        &proposals(json!({"multiplication_factor": 0})),
        GlobalFieldState::new(),
    )
    .expect("reconcile");
    assert!(state.is_empty());
    assert_eq!(store.variables()[0].multiplication_factor, None);
}

#[test]
fn variables_without_short_name_are_skipped() {
    let mut store = MetadataSession::from_records(
        DatasetRecord::default(),
        vec![VariableRecord::new("a"), VariableRecord::default()],
    );
    let state = reconcile(
        &mut store,
        &catalog(),
        &proposals(json!({"unit_type": "01"})),
        GlobalFieldState::new(),
    )
    .expect("reconcile");
    assert_eq!(state.get(GlobalField::UnitType).map(|e| e.num_vars), Some(1));
    assert_eq!(store.variables()[1].unit_type, None);
}

#[test]
fn invalid_factor_is_rejected() {
    let raw = json!({"unit_type": "03", "multiplication_factor": "tusen"});
    let err = GlobalProposals::from_raw(raw.as_object().expect("object")).unwrap_err();
    assert!(err.to_string().contains("multiplication_factor"));
}

#[test]
fn reset_restores_priors_and_empties_state() {
    let mut store = session(&["a", "b"]);
    store.variables_mut()[1].variable_role = Some(VariableRole::Identifier);
    let original = store.clone();
    let catalog = catalog();
    let state = reconcile(
        &mut store,
        &catalog,
        &proposals(json!({"variable_role": "ATTRIBUTE", "unit_type": "DELETE_SELECTED"})),
        GlobalFieldState::new(),
    )
    .expect("reconcile");

    let state = reset(&mut store, state).expect("reset");
    assert!(state.is_empty());
    assert_eq!(store.variables(), original.variables());
}

const SHORT_NAMES: [&str; 4] = ["pers_id", "kjonn", "alder", "inntekt"];

fn arb_variable(short_name: &'static str) -> impl Strategy<Value = VariableRecord> {
    (
        prop::option::of(prop::sample::select(vec!["01", "03", "05"])),
        prop::option::of(1i64..5),
        prop::option::of(prop::sample::select(VariableRole::ALL.to_vec())),
        prop::option::of(prop::sample::select(TemporalityType::ALL.to_vec())),
    )
        .prop_map(move |(unit_type, factor, role, temporality)| VariableRecord {
            unit_type: unit_type.map(str::to_string),
            multiplication_factor: factor,
            variable_role: role,
            temporality_type: temporality,
            ..VariableRecord::new(short_name)
        })
}

fn arb_session() -> impl Strategy<Value = MetadataSession> {
    SHORT_NAMES
        .iter()
        .map(|name| arb_variable(*name))
        .collect::<Vec<_>>()
        .prop_map(|variables| MetadataSession::from_records(DatasetRecord::default(), variables))
}

fn arb_value(field: GlobalField) -> BoxedStrategy<FieldValue> {
    match field {
        GlobalField::MultiplicationFactor => (1i64..5).prop_map(FieldValue::Integer).boxed(),
        GlobalField::VariableRole => prop::sample::select(VariableRole::ALL.to_vec())
            .prop_map(|role| FieldValue::text(role.as_str()))
            .boxed(),
        GlobalField::TemporalityType => prop::sample::select(TemporalityType::ALL.to_vec())
            .prop_map(|kind| FieldValue::text(kind.as_str()))
            .boxed(),
        _ => prop::sample::select(vec!["01", "03", "05"])
            .prop_map(FieldValue::text)
            .boxed(),
    }
}

fn arb_proposal(field: GlobalField, with_deselect: bool) -> BoxedStrategy<Proposal> {
    let mut options = vec![
        Just(Proposal::Absent).boxed(),
        Just(Proposal::Delete).boxed(),
        arb_value(field).prop_map(Proposal::Set).boxed(),
    ];
    if with_deselect {
        options.push(Just(Proposal::Deselect).boxed());
    }
    prop::strategy::Union::new(options).boxed()
}

fn arb_proposals(with_deselect: bool) -> impl Strategy<Value = GlobalProposals> {
    GlobalField::ALL
        .iter()
        .map(|&field| arb_proposal(field, with_deselect).prop_map(move |p| (field, p)))
        .collect::<Vec<_>>()
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .fold(GlobalProposals::new(), |acc, (field, p)| acc.with(field, p))
        })
}

fn deselect_all() -> GlobalProposals {
    GlobalField::ALL
        .iter()
        .fold(GlobalProposals::new(), |acc, field| {
            acc.with(*field, Proposal::Deselect)
        })
}

proptest! {
    #[test]
    fn reconcile_is_idempotent(
        store in arb_session(),
        first in arb_proposals(true),
        second in arb_proposals(true),
    ) {
        let catalog = catalog();
        let mut store = store;
        let state = reconcile(&mut store, &catalog, &first, GlobalFieldState::new()).unwrap();
        let state = reconcile(&mut store, &catalog, &second, state).unwrap();
        let snapshot = store.clone();

        let again = reconcile(&mut store, &catalog, &second, state.clone()).unwrap();
        prop_assert_eq!(again, state);
        prop_assert_eq!(store.variables(), snapshot.variables());
    }

    #[test]
    fn deselect_restores_original_values(
        store in arb_session(),
        first in arb_proposals(false),
        second in arb_proposals(false),
    ) {
        let catalog = catalog();
        let original = store.clone();
        let mut store = store;
        let state = reconcile(&mut store, &catalog, &first, GlobalFieldState::new()).unwrap();
        let state = reconcile(&mut store, &catalog, &second, state).unwrap();

        let state = reconcile(&mut store, &catalog, &deselect_all(), state).unwrap();
        prop_assert!(state.is_empty());
        prop_assert_eq!(store.variables(), original.variables());
    }
}
