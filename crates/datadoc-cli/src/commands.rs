use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use datadoc_catalog::FieldCatalog;
use datadoc_core::{
    MetadataReport, RecordStore, Selection, accept_dataset_input, accept_pseudo_input,
    accept_variable_input, check_all, generate_report, reconcile, reset, select_algorithm,
};

use crate::cli::{
    DocumentArgs, GlobalArgs, GlobalResetArgs, OpenArgs, PseudoArgs, PseudoSetArgs,
    SetDatasetArgs, SetVariableArgs,
};
use crate::summary::{print_check_report, print_document, print_global_report};
use datadoc_cli::document::{
    load_session, load_state, open_dataset, resolve_document, save_session, save_state,
    state_path_for,
};
use datadoc_cli::edits::proposals_from_assignments;

pub fn run_open(args: &OpenArgs, catalog: &FieldCatalog) -> Result<()> {
    let span = info_span!("open", dataset = %args.dataset.display());
    let _guard = span.enter();
    let opened = open_dataset(&args.dataset)?;
    if opened.created {
        println!("Created {}", opened.path.display());
    }
    print_document(&opened.path, &opened.session, catalog);
    Ok(())
}

pub fn run_show(args: &DocumentArgs, catalog: &FieldCatalog) -> Result<()> {
    let path = resolve_document(&args.document)?;
    let session = load_session(&path)?;
    print_document(&path, &session, catalog);
    Ok(())
}

pub fn run_global(args: &GlobalArgs, catalog: &FieldCatalog) -> Result<()> {
    let path = resolve_document(&args.document)?;
    let span = info_span!("global", document = %path.display());
    let _guard = span.enter();
    let proposals = proposals_from_assignments(&args.set)?;
    let state_path = state_file(args.state.as_ref(), &path);
    let previous = load_state(&state_path)?;
    let mut session = load_session(&path)?;

    let state =
        reconcile(&mut session, catalog, &proposals, previous).context("apply global edit")?;
    save_session(&path, &session)?;
    save_state(&state_path, &state)?;
    info!(fields = state.len(), "global edit applied");
    print_global_report(&generate_report(&state), &state_path);
    Ok(())
}

pub fn run_global_reset(args: &GlobalResetArgs) -> Result<()> {
    let path = resolve_document(&args.document)?;
    let span = info_span!("global_reset", document = %path.display());
    let _guard = span.enter();
    let state_path = state_file(args.state.as_ref(), &path);
    let previous = load_state(&state_path)?;
    let mut session = load_session(&path)?;

    let state = reset(&mut session, previous).context("reset global edits")?;
    save_session(&path, &session)?;
    save_state(&state_path, &state)?;
    print_global_report(&generate_report(&state), &state_path);
    Ok(())
}

pub fn run_pseudo(args: &PseudoArgs) -> Result<()> {
    let path = resolve_document(&args.document)?;
    let mut session = load_session(&path)?;
    let selection = match args.algorithm.kind() {
        Some(kind) => Selection::Algorithm(kind),
        None => Selection::Delete,
    };
    let variable = session.lookup_variable_mut(&args.short_name)?;
    let kind = select_algorithm(variable, selection);
    save_session(&path, &session)?;
    match kind {
        Some(kind) => println!("{}: {}", args.short_name, kind.title()),
        None if matches!(selection, Selection::Delete) => {
            println!("{}: pseudonymization removed", args.short_name);
        }
        None => println!("{}: custom pseudonymization", args.short_name),
    }
    Ok(())
}

pub fn run_pseudo_set(args: &PseudoSetArgs) -> Result<()> {
    let path = resolve_document(&args.document)?;
    let mut session = load_session(&path)?;
    accept_pseudo_input(
        &mut session,
        &args.short_name,
        args.field,
        args.value.as_deref(),
    )
    .with_context(|| format!("set {} on {}", args.field, args.short_name))?;
    save_session(&path, &session)
}

pub fn run_set_variable(args: &SetVariableArgs) -> Result<()> {
    let path = resolve_document(&args.document)?;
    let mut session = load_session(&path)?;
    accept_variable_input(
        &mut session,
        &args.short_name,
        args.field,
        args.value.as_deref(),
    )
    .with_context(|| format!("set {} on {}", args.field, args.short_name))?;
    save_session(&path, &session)
}

pub fn run_set_dataset(args: &SetDatasetArgs) -> Result<()> {
    let path = resolve_document(&args.document)?;
    let mut session = load_session(&path)?;
    accept_dataset_input(&mut session, args.field, args.value.as_deref())
        .with_context(|| format!("set dataset {}", args.field))?;
    save_session(&path, &session)?;
    let has_value = args.value.as_deref().is_some_and(|v| !v.trim().is_empty());
    if has_value && args.field.inheritable().is_some() {
        println!(
            "{} copied to {} variables",
            args.field.display_name(),
            session.variables().len()
        );
    }
    Ok(())
}

pub fn run_check(args: &DocumentArgs) -> Result<MetadataReport> {
    let path = resolve_document(&args.document)?;
    let session = load_session(&path)?;
    let report = check_all(session.dataset(), session.variables());
    info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "checked obligatory metadata"
    );
    print_check_report(&report);
    Ok(report)
}

fn state_file(explicit: Option<&PathBuf>, document_path: &Path) -> PathBuf {
    explicit
        .cloned()
        .unwrap_or_else(|| state_path_for(document_path))
}
