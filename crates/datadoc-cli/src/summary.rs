use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use datadoc_catalog::FieldCatalog;
use datadoc_core::{
    IssueSeverity, MetadataReport, MetadataSession, RecordStore, classify, fields_for,
};
use datadoc_model::{
    AlgorithmKind, DatasetField, FieldValue, GlobalField, PseudoField, PseudonymizationRecord,
    VariableRecord,
};

pub fn print_document(path: &Path, session: &MetadataSession, catalog: &FieldCatalog) {
    println!("Document: {}", path.display());
    print_dataset(session);
    print_variables(session.variables(), catalog);
    print_pseudonymization(session.variables());
}

fn print_dataset(session: &MetadataSession) {
    let dataset = session.dataset();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Felt"), header_cell("Verdi")]);
    apply_table_style(&mut table);
    for field in DatasetField::ALL {
        let value = dataset.get_field(field);
        table.add_row(vec![Cell::new(field.display_name()), value_cell(value)]);
    }
    println!("{table}");
}

fn print_variables(variables: &[VariableRecord], catalog: &FieldCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kortnavn"),
        header_cell("Navn"),
        header_cell("Datatype"),
        header_cell("Rolle"),
        header_cell("Enhetstype"),
        header_cell("Måleenhet"),
        header_cell("Faktor"),
        header_cell("Datakilde"),
        header_cell("Temporalitet"),
        header_cell("Pseudonymisering"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 6, CellAlignment::Right);
    for variable in variables {
        let short_name = match variable.short_name() {
            Some(short_name) => Cell::new(short_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            None => Cell::new("?").fg(Color::Red),
        };
        table.add_row(vec![
            short_name,
            text_cell(variable.name.as_deref()),
            text_cell(variable.data_type.map(|v| v.title())),
            text_cell(variable.variable_role.map(|v| v.title())),
            global_cell(catalog, variable, GlobalField::UnitType),
            global_cell(catalog, variable, GlobalField::MeasurementUnit),
            global_cell(catalog, variable, GlobalField::MultiplicationFactor),
            global_cell(catalog, variable, GlobalField::DataSource),
            text_cell(variable.temporality_type.map(|v| v.title())),
            text_cell(pseudo_title(variable.pseudonymization.as_ref())),
        ]);
    }
    println!("{table}");
}

fn print_pseudonymization(variables: &[VariableRecord]) {
    let pseudonymized: Vec<(&str, &PseudonymizationRecord)> = variables
        .iter()
        .filter_map(|v| Some((v.short_name()?, v.pseudonymization.as_ref()?)))
        .collect();
    if pseudonymized.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kortnavn"),
        header_cell("Felt"),
        header_cell("Verdi"),
    ]);
    apply_table_style(&mut table);
    for (short_name, record) in pseudonymized {
        for descriptor in fields_for(classify(Some(record))) {
            let value = pseudo_value(record, descriptor.field);
            let label = if descriptor.read_only {
                Cell::new(format!("{} (les)", descriptor.display_name)).fg(Color::DarkGrey)
            } else {
                Cell::new(descriptor.display_name)
            };
            table.add_row(vec![Cell::new(short_name), label, text_cell(value.as_deref())]);
        }
    }
    println!();
    println!("Pseudonymisering:");
    println!("{table}");
}

fn pseudo_title(record: Option<&PseudonymizationRecord>) -> Option<&'static str> {
    let record = record?;
    Some(classify(Some(record)).unwrap_or(AlgorithmKind::Custom).title())
}

fn pseudo_value(record: &PseudonymizationRecord, field: PseudoField) -> Option<String> {
    match field {
        PseudoField::PseudonymizationTime => {
            record.pseudonymization_time.map(|time| time.to_rfc3339())
        }
        PseudoField::StableIdentifierType => record.stable_identifier_type.clone(),
        PseudoField::StableIdentifierVersion => record.stable_identifier_version.clone(),
        PseudoField::EncryptionAlgorithm => record.encryption_algorithm.clone(),
        PseudoField::EncryptionKeyReference => record.encryption_key_reference.clone(),
        PseudoField::EncryptionAlgorithmParameters => {
            let view = record.parameter_view();
            (!view.is_empty()).then(|| view.render())
        }
    }
}

pub fn print_fields(catalog: &FieldCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Felt"),
        header_cell("Navn"),
        header_cell("Valg"),
    ]);
    apply_table_style(&mut table);
    for &field in catalog.fields() {
        let options = if catalog.is_dropdown(field) {
            catalog
                .options(field)
                .iter()
                .map(|option| format!("{} ({})", option.title, option.id))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            "heltall, 0 fjerner valget".to_string()
        };
        table.add_row(vec![
            Cell::new(field.as_str()).add_attribute(Attribute::Bold),
            Cell::new(catalog.display_name(field)),
            Cell::new(options),
        ]);
    }
    println!("{table}");
}

pub fn print_global_report(lines: &[String], state_path: &Path) {
    if lines.is_empty() {
        println!("No global edits are active.");
    } else {
        for line in lines {
            println!("- {line}");
        }
    }
    println!("State: {}", state_path.display());
}

pub fn print_check_report(report: &MetadataReport) {
    if !report.has_issues() {
        println!("All obligatory metadata is filled in.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Variable"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by(|a, b| {
        severity_rank(a.severity)
            .cmp(&severity_rank(b.severity))
            .then_with(|| a.code.cmp(&b.code))
    });
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            text_cell(issue.variable.as_deref()),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");
    println!(
        "{} errors, {} warnings",
        report.error_count(),
        report.warning_count()
    );
}

fn global_cell(catalog: &FieldCatalog, variable: &VariableRecord, field: GlobalField) -> Cell {
    match variable.get_field(field.variable_field()) {
        Some(value) => Cell::new(catalog.resolve_display_value(field, &value)),
        None => dim_cell("-"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: Option<FieldValue>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
