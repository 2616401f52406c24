//! Configuration handling for the desk

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::{FormLayout, DEFAULT_IDLE_RESUME, DEFAULT_ROTATION_PERIOD};

/// User configuration for the desk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeskConfig {
    /// Interval between automatic highlight/stat advances
    pub rotation_period_ms: Option<u64>,
    /// Quiet window after an interaction before rotation resumes
    pub idle_resume_ms: Option<u64>,
    /// Record successful submissions in the local history file
    pub persist_history: Option<bool>,
    /// Initial evidence confidence slider position
    pub default_evidence_confidence: Option<u8>,
    /// Initial merchant response hours slider position
    pub default_merchant_response_hours: Option<u8>,
    /// Also ask for the customer name and order id
    pub extended_form: Option<bool>,
}

impl DeskConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "dispute-desk", "dispute-desk")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: DeskConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn rotation_period(&self) -> Duration {
        self.rotation_period_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ROTATION_PERIOD)
    }

    pub fn idle_resume(&self) -> Duration {
        self.idle_resume_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_IDLE_RESUME)
    }

    pub fn persist_history(&self) -> bool {
        self.persist_history.unwrap_or(true)
    }

    pub fn evidence_confidence(&self) -> u8 {
        self.default_evidence_confidence.unwrap_or(60)
    }

    pub fn merchant_response_hours(&self) -> u8 {
        self.default_merchant_response_hours.unwrap_or(36)
    }

    /// Field layout of the refund form
    pub fn form_layout(&self) -> FormLayout {
        if self.extended_form.unwrap_or(false) {
            FormLayout::extended()
        } else {
            FormLayout::refund()
        }
    }
}
