use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetRecord;
use crate::error::{ModelError, Result};
use crate::variable::VariableRecord;

/// Version written into new metadata documents.
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// Suffix of the metadata document stored next to a dataset.
pub const DOCUMENT_FILE_SUFFIX: &str = "__DOC.json";

/// The persisted metadata sidecar for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default = "default_document_version")]
    pub document_version: String,
    #[serde(default)]
    pub dataset: DatasetRecord,
    #[serde(default)]
    pub variables: Vec<VariableRecord>,
}

fn default_document_version() -> String {
    DOCUMENT_VERSION.to_string()
}

impl MetadataDocument {
    pub fn new(dataset: DatasetRecord, variables: Vec<VariableRecord>) -> Self {
        Self {
            document_version: default_document_version(),
            dataset,
            variables,
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ModelError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the document as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|source| ModelError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
