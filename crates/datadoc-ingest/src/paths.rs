use std::path::{Path, PathBuf};

use datadoc_model::DOCUMENT_FILE_SUFFIX;

use crate::error::{IngestError, Result};

/// True when `path` names a metadata document rather than a dataset.
pub fn is_document_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(DOCUMENT_FILE_SUFFIX))
}

/// The metadata document stored next to a dataset: `<stem>__DOC.json`.
///
/// A path that already names a document is returned unchanged.
pub fn document_path_for(dataset_path: &Path) -> Result<PathBuf> {
    if is_document_path(dataset_path) {
        return Ok(dataset_path.to_path_buf());
    }
    let stem = dataset_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| IngestError::InvalidPath {
            path: dataset_path.to_path_buf(),
        })?;
    Ok(dataset_path.with_file_name(format!("{stem}{DOCUMENT_FILE_SUFFIX}")))
}

/// Dataset short name taken from the file name, without any document suffix.
pub fn dataset_short_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = match name.strip_suffix(DOCUMENT_FILE_SUFFIX) {
        Some(stem) => stem,
        None => path.file_stem()?.to_str()?,
    };
    (!stem.is_empty()).then(|| stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path_for_dataset() {
        let path = Path::new("/data/person_data_v1.csv");
        assert_eq!(
            document_path_for(path).unwrap(),
            PathBuf::from("/data/person_data_v1__DOC.json")
        );
    }

    #[test]
    fn test_document_path_is_stable_for_documents() {
        let path = Path::new("/data/person_data_v1__DOC.json");
        assert_eq!(document_path_for(path).unwrap(), path);
        assert_eq!(dataset_short_name(path).as_deref(), Some("person_data_v1"));
    }

    #[test]
    fn test_document_path_rejects_bare_root() {
        assert!(document_path_for(Path::new("/")).is_err());
    }
}
