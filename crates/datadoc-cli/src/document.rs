//! Locating, creating and saving metadata documents and their global edit
//! state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use datadoc_catalog::{CodeLists, FieldCatalog};
use datadoc_core::{GlobalFieldState, MetadataSession, inherit_derived_dates};
use datadoc_ingest::{
    dataset_short_name, document_path_for, is_document_path, read_dataset_schema,
    variables_from_schema,
};
use datadoc_model::{DatasetRecord, MetadataDocument};

/// Suffix of the file that keeps global edit state next to a document.
pub const STATE_FILE_SUFFIX: &str = "__GLOBAL.json";

/// A document ready for editing.
#[derive(Debug)]
pub struct OpenedDocument {
    pub path: PathBuf,
    pub session: MetadataSession,
    /// True when the document was created from the dataset on this open.
    pub created: bool,
}

/// Opens the metadata document for a dataset, creating it from the dataset's
/// columns when none exists yet.
///
/// Global edit state belongs to one editing session, so any state file left
/// next to the document is removed.
pub fn open_dataset(path: &Path) -> Result<OpenedDocument> {
    let document_path = document_path_for(path)
        .with_context(|| format!("resolve document for {}", path.display()))?;
    discard_state(&state_path_for(&document_path))?;
    if document_path.exists() {
        let mut session = load_session(&document_path)?;
        if inherit_derived_dates(&mut session) > 0 {
            save_session(&document_path, &session)?;
        }
        return Ok(OpenedDocument {
            path: document_path,
            session,
            created: false,
        });
    }
    if is_document_path(path) {
        bail!("metadata document not found: {}", path.display());
    }

    let schema = read_dataset_schema(path)
        .with_context(|| format!("read dataset {}", path.display()))?;
    let dataset = match &schema.short_name {
        Some(short_name) => DatasetRecord::new(short_name.as_str()),
        None => DatasetRecord::default(),
    };
    let session = MetadataSession::from_records(dataset, variables_from_schema(&schema));
    save_session(&document_path, &session)?;
    info!(
        path = %document_path.display(),
        variables = schema.columns.len(),
        "created metadata document"
    );
    Ok(OpenedDocument {
        path: document_path,
        session,
        created: true,
    })
}

/// Resolves a dataset or document path to an existing document path.
pub fn resolve_document(path: &Path) -> Result<PathBuf> {
    let document_path = document_path_for(path)
        .with_context(|| format!("resolve document for {}", path.display()))?;
    if !document_path.exists() {
        bail!(
            "metadata document not found: {} (run `datadoc open` first)",
            document_path.display()
        );
    }
    Ok(document_path)
}

pub fn load_session(path: &Path) -> Result<MetadataSession> {
    let document = MetadataDocument::read_json(path)
        .with_context(|| format!("read metadata document {}", path.display()))?;
    Ok(MetadataSession::new(document))
}

pub fn save_session(path: &Path, session: &MetadataSession) -> Result<()> {
    session
        .document()
        .write_json(path)
        .with_context(|| format!("write metadata document {}", path.display()))?;
    info!(path = %path.display(), "saved metadata document");
    Ok(())
}

/// The state file kept next to a document: `<stem>__GLOBAL.json`.
pub fn state_path_for(document_path: &Path) -> PathBuf {
    let stem = dataset_short_name(document_path).unwrap_or_else(|| "datadoc".to_string());
    document_path.with_file_name(format!("{stem}{STATE_FILE_SUFFIX}"))
}

/// Reads global edit state; a missing file is an empty state.
pub fn load_state(path: &Path) -> Result<GlobalFieldState> {
    if !path.exists() {
        return Ok(GlobalFieldState::new());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read global edit state {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parse global edit state {}", path.display()))
}

pub fn save_state(path: &Path, state: &GlobalFieldState) -> Result<()> {
    let contents = serde_json::to_string_pretty(state).context("serialize global edit state")?;
    fs::write(path, contents)
        .with_context(|| format!("write global edit state {}", path.display()))
}

/// Removes a state file; a missing file is fine.
pub fn discard_state(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    fs::remove_file(path)
        .with_context(|| format!("remove global edit state {}", path.display()))?;
    info!(path = %path.display(), "discarded global edit state");
    Ok(())
}

/// Loads code lists from `dir`, or an empty catalog when no directory is set.
pub fn load_catalog(dir: Option<&Path>) -> Result<FieldCatalog> {
    let Some(dir) = dir else {
        return Ok(FieldCatalog::default());
    };
    let code_lists = CodeLists::load(dir)
        .with_context(|| format!("load code lists from {}", dir.display()))?;
    Ok(FieldCatalog::new(code_lists))
}
