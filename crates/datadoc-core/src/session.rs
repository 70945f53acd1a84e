//! Record store abstraction and the editing session that implements it.

use datadoc_model::{DatasetRecord, MetadataDocument, VariableRecord};

use crate::error::{CoreError, Result};

/// Access to the dataset and variable records of one opened document.
pub trait RecordStore {
    fn dataset(&self) -> &DatasetRecord;

    fn dataset_mut(&mut self) -> &mut DatasetRecord;

    /// Variables in document order.
    fn variables(&self) -> &[VariableRecord];

    fn variables_mut(&mut self) -> &mut [VariableRecord];

    fn lookup_variable(&self, short_name: &str) -> Result<&VariableRecord> {
        self.variables()
            .iter()
            .find(|v| v.short_name() == Some(short_name))
            .ok_or_else(|| CoreError::VariableNotFound {
                short_name: short_name.to_string(),
            })
    }

    fn lookup_variable_mut(&mut self, short_name: &str) -> Result<&mut VariableRecord> {
        self.variables_mut()
            .iter_mut()
            .find(|v| v.short_name() == Some(short_name))
            .ok_or_else(|| CoreError::VariableNotFound {
                short_name: short_name.to_string(),
            })
    }
}

/// Editing context for one metadata document.
#[derive(Debug, Clone)]
pub struct MetadataSession {
    document: MetadataDocument,
}

impl MetadataSession {
    pub fn new(document: MetadataDocument) -> Self {
        Self { document }
    }

    pub fn from_records(dataset: DatasetRecord, variables: Vec<VariableRecord>) -> Self {
        Self::new(MetadataDocument::new(dataset, variables))
    }

    pub fn document(&self) -> &MetadataDocument {
        &self.document
    }

    pub fn into_document(self) -> MetadataDocument {
        self.document
    }
}

impl RecordStore for MetadataSession {
    fn dataset(&self) -> &DatasetRecord {
        &self.document.dataset
    }

    fn dataset_mut(&mut self) -> &mut DatasetRecord {
        &mut self.document.dataset
    }

    fn variables(&self) -> &[VariableRecord] {
        &self.document.variables
    }

    fn variables_mut(&mut self) -> &mut [VariableRecord] {
        &mut self.document.variables
    }
}
