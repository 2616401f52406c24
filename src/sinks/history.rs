//! JSON file holding the most recent submissions

use super::traits::HistorySink;
use crate::error::DeskError;
use crate::state::SubmissionRecord;
use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Number of submissions kept
pub const HISTORY_LIMIT: usize = 20;

const HISTORY_FILE: &str = "submission-history.json";

#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// History file inside the platform data directory
    pub fn default_location() -> Result<Self, DeskError> {
        let dirs =
            ProjectDirs::from("io", "dispute-desk", "dispute-desk").ok_or(DeskError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join(HISTORY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<SubmissionRecord>, DeskError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl HistorySink for JsonHistoryStore {
    fn append(&self, record: &SubmissionRecord) -> Result<(), DeskError> {
        let mut records = self.load()?;
        records.insert(0, record.clone());
        records.truncate(HISTORY_LIMIT);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }

    fn recent(&self) -> Result<Vec<SubmissionRecord>, DeskError> {
        self.load()
    }
}
