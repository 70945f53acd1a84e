//! Pseudonymization rule scenarios.

use chrono::Utc;
use serde_json::json;

use datadoc_core::{
    CoreError, IssueSeverity, MetadataSession, RecordStore, Selection, accept_pseudo_input,
    check_all, classify, fields_for, select_algorithm,
};
use datadoc_model::{
    AlgorithmKind, AlgorithmParameters, DatasetRecord, PseudoField, PseudonymizationRecord,
    SNAPSHOT_DATE_KEY, VariableRecord,
};

fn session() -> MetadataSession {
    MetadataSession::from_records(
        DatasetRecord::new("person_data_v1"),
        vec![VariableRecord::new("pers_id"), VariableRecord::new("inntekt")],
    )
}

fn snapshot_parameters(date: &str) -> Vec<AlgorithmParameters> {
    let mut map = AlgorithmParameters::new();
    map.insert(SNAPSHOT_DATE_KEY.to_string(), json!(date));
    vec![map]
}

#[test]
fn papis_with_stable_id_defaults_version_to_today() {
    let mut variable = VariableRecord::new("pers_id");
    let kind = select_algorithm(
        &mut variable,
        Selection::Algorithm(AlgorithmKind::PapisWithStableId),
    );
    assert_eq!(kind, Some(AlgorithmKind::PapisWithStableId));

    let record = variable.pseudonymization.as_ref().expect("record");
    assert_eq!(record.encryption_algorithm.as_deref(), Some("TINK-FPE"));
    assert_eq!(record.stable_identifier_type.as_deref(), Some("FREG_SNR"));
    assert_eq!(
        record.stable_identifier_version,
        Some(Utc::now().date_naive().to_string())
    );
}

#[test]
fn switching_to_dapla_drops_stable_identifier() {
    let mut variable = VariableRecord::new("pers_id");
    select_algorithm(
        &mut variable,
        Selection::Algorithm(AlgorithmKind::PapisWithStableId),
    );
    let kind = select_algorithm(
        &mut variable,
        Selection::Algorithm(AlgorithmKind::StandardDapla),
    );

    assert_eq!(kind, Some(AlgorithmKind::StandardDapla));
    let record = variable.pseudonymization.as_ref().expect("record");
    assert_eq!(record.encryption_algorithm.as_deref(), Some("TINK-DAED"));
    assert_eq!(record.stable_identifier_type, None);
    assert_eq!(record.stable_identifier_version, None);
}

#[test]
fn reselecting_current_algorithm_keeps_record() {
    let mut variable = VariableRecord::new("pers_id");
    variable.pseudonymization = Some(PseudonymizationRecord {
        encryption_key_reference: Some("ssb-common-key-1".to_string()),
        ..PseudonymizationRecord::with_algorithm("TINK-DAEAD")
    });
    let before = variable.clone();

    let kind = select_algorithm(
        &mut variable,
        Selection::Algorithm(AlgorithmKind::StandardDapla),
    );
    assert_eq!(kind, Some(AlgorithmKind::StandardDapla));
    assert_eq!(variable, before);
}

#[test]
fn custom_selection_starts_from_empty_record() {
    let mut variable = VariableRecord::new("pers_id");
    let kind = select_algorithm(&mut variable, Selection::Algorithm(AlgorithmKind::Custom));
    assert_eq!(kind, None);
    assert!(variable.is_pseudonymized());
    assert_eq!(
        variable.pseudonymization,
        Some(PseudonymizationRecord::default())
    );
}

#[test]
fn delete_selection_removes_record() {
    let mut variable = VariableRecord::new("pers_id");
    select_algorithm(
        &mut variable,
        Selection::Algorithm(AlgorithmKind::PapisWithoutStableId),
    );
    assert_eq!(select_algorithm(&mut variable, Selection::Delete), None);
    assert!(!variable.is_pseudonymized());
    assert_eq!(select_algorithm(&mut variable, Selection::Delete), None);
}

#[test]
fn stable_version_updates_snapshot_date() {
    let mut store = session();
    let variable = store.lookup_variable_mut("pers_id").expect("variable");
    select_algorithm(
        variable,
        Selection::Algorithm(AlgorithmKind::PapisWithStableId),
    );
    if let Some(record) = variable.pseudonymization.as_mut() {
        record.encryption_algorithm_parameters = Some(snapshot_parameters("2020-01-01"));
    }

    accept_pseudo_input(
        &mut store,
        "pers_id",
        PseudoField::StableIdentifierVersion,
        Some("2023-08-31"),
    )
    .expect("version accepted");

    let record = store.variables()[0]
        .pseudonymization
        .as_ref()
        .expect("record");
    assert_eq!(record.stable_identifier_version.as_deref(), Some("2023-08-31"));
    assert_eq!(
        record.parameter_view().get(SNAPSHOT_DATE_KEY),
        Some(&json!("2023-08-31"))
    );
}

#[test]
fn stable_version_without_snapshot_key_is_an_error() {
    let mut store = session();
    let variable = store.lookup_variable_mut("pers_id").expect("variable");
    select_algorithm(
        variable,
        Selection::Algorithm(AlgorithmKind::PapisWithStableId),
    );
    if let Some(record) = variable.pseudonymization.as_mut() {
        let mut other = AlgorithmParameters::new();
        other.insert("keyId".to_string(), json!("papis-common-key-1"));
        record.encryption_algorithm_parameters = Some(vec![other]);
    }

    let err = accept_pseudo_input(
        &mut store,
        "pers_id",
        PseudoField::StableIdentifierVersion,
        Some("2023-08-31"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CoreError::MissingParameter {
            key: SNAPSHOT_DATE_KEY,
            ..
        }
    ));
}

#[test]
fn blank_stable_version_falls_back_to_today() {
    let mut store = session();
    let variable = store.lookup_variable_mut("pers_id").expect("variable");
    select_algorithm(
        variable,
        Selection::Algorithm(AlgorithmKind::PapisWithStableId),
    );
    accept_pseudo_input(
        &mut store,
        "pers_id",
        PseudoField::StableIdentifierVersion,
        Some("  "),
    )
    .expect("blank accepted");
    let record = store.variables()[0]
        .pseudonymization
        .as_ref()
        .expect("record");
    assert_eq!(
        record.stable_identifier_version,
        Some(Utc::now().date_naive().to_string())
    );
}

#[test]
fn pseudo_input_errors() {
    let mut store = session();
    assert!(matches!(
        accept_pseudo_input(
            &mut store,
            "inntekt",
            PseudoField::EncryptionAlgorithmParameters,
            Some("x"),
        ),
        Err(CoreError::ReadOnlyField { .. })
    ));
    assert!(matches!(
        accept_pseudo_input(
            &mut store,
            "inntekt",
            PseudoField::PseudonymizationTime,
            Some("2021-01-01"),
        ),
        Err(CoreError::NotPseudonymized { .. })
    ));
    assert!(matches!(
        accept_pseudo_input(
            &mut store,
            "kjonn",
            PseudoField::PseudonymizationTime,
            Some("2021-01-01"),
        ),
        Err(CoreError::VariableNotFound { .. })
    ));
}

#[test]
fn custom_fields_are_editable_and_reclassify() {
    let mut store = session();
    let variable = store.lookup_variable_mut("inntekt").expect("variable");
    select_algorithm(variable, Selection::Algorithm(AlgorithmKind::Custom));

    accept_pseudo_input(
        &mut store,
        "inntekt",
        PseudoField::EncryptionAlgorithm,
        Some("TINK-FPE"),
    )
    .expect("algorithm accepted");
    let record = store.variables()[1].pseudonymization.as_ref();
    assert_eq!(
        classify(record),
        Some(AlgorithmKind::PapisWithoutStableId)
    );
    assert_eq!(fields_for(classify(record)).len(), 1);
}

#[test]
fn check_reports_missing_pseudonymization_time() {
    let mut store = session();
    let variable = store.lookup_variable_mut("pers_id").expect("variable");
    select_algorithm(
        variable,
        Selection::Algorithm(AlgorithmKind::StandardDapla),
    );

    let report = check_all(store.dataset(), store.variables());
    let pseudo_issue = report
        .issues
        .iter()
        .find(|issue| issue.code == "DD003")
        .expect("pseudo issue");
    assert_eq!(pseudo_issue.variable.as_deref(), Some("pers_id"));
    assert_eq!(pseudo_issue.severity, IssueSeverity::Warning);
    assert_eq!(report.error_count(), 0);

    accept_pseudo_input(
        &mut store,
        "pers_id",
        PseudoField::PseudonymizationTime,
        Some("2024-02-01T08:30:00Z"),
    )
    .expect("time accepted");
    let report = check_all(store.dataset(), store.variables());
    assert!(report.issues.iter().all(|issue| issue.code != "DD003"));
}
