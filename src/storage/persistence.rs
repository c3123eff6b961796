//! Whole-document JSON persistence for the survey store

use crate::core::{Result, SurveyError, SurveyStore};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// ============================================================================
// JSON Document Store
// ============================================================================

/// Reads and rewrites the single survey document on disk.
///
/// Every save replaces the file atomically (temp file in the same directory,
/// fsync, rename). Callers are responsible for serializing writers.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    path: PathBuf,
}

impl JsonDocumentStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Creates the default document if none exists yet. Returns `true` when
    /// a new document was written.
    pub fn initialize(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        let temp = self.write_temp(&SurveyStore::default())?;
        match temp.persist_noclobber(&self.path) {
            Ok(_) => Ok(true),
            // Another initializer got there first.
            Err(_) if self.exists() => Ok(false),
            Err(e) => Err(SurveyError::storage(format!(
                "Failed to create {}: {}",
                self.path.display(),
                e.error
            ))),
        }
    }

    pub fn load(&self) -> Result<SurveyStore> {
        let data = fs::read(&self.path).map_err(|e| {
            SurveyError::storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_slice(&data).map_err(|e| {
            SurveyError::storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    pub fn save(&self, store: &SurveyStore) -> Result<()> {
        let temp = self.write_temp(store)?;
        temp.persist(&self.path).map_err(|e| {
            SurveyError::storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }

    fn write_temp(&self, store: &SurveyStore) -> Result<NamedTempFile> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .map_err(|e| SurveyError::storage(format!("Failed to create data directory: {}", e)))?;

        let serialized = serde_json::to_vec_pretty(store)
            .map_err(|e| SurveyError::storage(format!("Failed to serialize store: {}", e)))?;
        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|e| SurveyError::storage(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(&serialized)
            .map_err(|e| SurveyError::storage(format!("Failed to write store: {}", e)))?;
        temp.flush()
            .map_err(|e| SurveyError::storage(format!("Failed to flush store: {}", e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| SurveyError::storage(format!("Failed to sync store: {}", e)))?;
        Ok(temp)
    }
}
