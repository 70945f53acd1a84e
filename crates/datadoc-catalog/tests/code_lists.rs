use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use datadoc_catalog::{CatalogError, CodeLists, FieldCatalog, parse_code_list_csv};
use datadoc_model::{FieldValue, GlobalField};

fn temp_dir(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("datadoc_catalog_{stamp}_{name}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn load_reads_present_lists_and_defaults_missing_ones() {
    let dir = temp_dir("partial");
    std::fs::write(
        dir.join("unit_types.csv"),
        "\u{feff}code,title\n01,Adresse\n03,Bolig\n,Tom\n",
    )
    .expect("write unit types");
    std::fs::write(
        dir.join("data_sources.csv"),
        "title,code\nSkatteetaten,05\n",
    )
    .expect("write data sources");

    let lists = CodeLists::load(&dir).expect("load code lists");
    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(lists.unit_types.items.len(), 2);
    assert_eq!(lists.unit_types.title_for("03"), Some("Bolig"));
    assert_eq!(lists.data_sources.title_for("05"), Some("Skatteetaten"));
    assert!(lists.measurement_units.is_empty());

    let catalog = FieldCatalog::new(lists);
    assert_eq!(
        catalog.resolve_display_value(GlobalField::DataSource, &FieldValue::text("05")),
        "Skatteetaten"
    );
}

#[test]
fn parse_rejects_list_without_title_column() {
    let dir = temp_dir("bad");
    let path = dir.join("measurement_units.csv");
    std::fs::write(&path, "code,name\n01,Kroner\n").expect("write list");

    let err = parse_code_list_csv(&path, "measurement_units").unwrap_err();
    let _ = std::fs::remove_dir_all(&dir);

    assert!(matches!(err, CatalogError::Csv { .. }));
    assert!(err.to_string().contains("missing title column"));
}
