//! Submission: full-form validation, case IDs and the post-submit reset

use super::attachment::FileAttachmentController;
use super::forms::{FormStateStore, RefundField};
use crate::sinks::HistorySink;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CASE_ID_PREFIX: &str = "RFD-";
const CASE_ID_LEN: usize = 5;
const CASE_ID_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MAX_ID_ATTEMPTS: usize = 8;

/// Draw `RFD-` followed by five independent base-36 characters
pub fn generate_case_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..CASE_ID_LEN)
        .map(|_| CASE_ID_ALPHABET[rng.gen_range(0..CASE_ID_ALPHABET.len())] as char)
        .collect();
    format!("{CASE_ID_PREFIX}{suffix}")
}

pub fn success_message(case_id: &str) -> String {
    format!(
        "Refund request submitted. Your Case ID is {case_id}. We'll get back to you within 48 hours."
    )
}

/// Snapshot of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub case_id: String,
    pub submitted_at: DateTime<Utc>,
    pub form: BTreeMap<RefundField, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted {
        record: SubmissionRecord,
        message: String,
    },
    /// Validation failed; the form is left as it was with errors visible
    Blocked { error_count: usize },
}

impl SubmitOutcome {
    pub fn case_id(&self) -> Option<&str> {
        match self {
            Self::Submitted { record, .. } => Some(&record.case_id),
            Self::Blocked { .. } => None,
        }
    }
}

/// Orchestrates submit; optionally records into a history sink
pub struct SubmissionController {
    history: Option<Box<dyn HistorySink>>,
}

impl SubmissionController {
    pub fn new(history: Option<Box<dyn HistorySink>>) -> Self {
        Self { history }
    }

    pub fn submit(
        &mut self,
        store: &mut FormStateStore,
        attachment: &mut FileAttachmentController,
    ) -> SubmitOutcome {
        self.submit_with(store, attachment, &mut rand::thread_rng(), Utc::now())
    }

    pub fn submit_with<R: Rng + ?Sized>(
        &mut self,
        store: &mut FormStateStore,
        attachment: &mut FileAttachmentController,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> SubmitOutcome {
        let required = store.layout().required.clone();
        if !store.validate_all(&required) {
            let error_count = store.errors().len();
            tracing::info!("Submission blocked by {error_count} error(s)");
            return SubmitOutcome::Blocked { error_count };
        }

        let case_id = self.fresh_case_id(rng);
        let record = SubmissionRecord {
            case_id: case_id.clone(),
            submitted_at: now,
            form: store.values().clone(),
        };

        // reset() already bumps the picker generation, so the attachment is
        // only discarded here rather than removed
        store.reset();
        attachment.discard();

        let message = success_message(&case_id);
        store.set_success_message(message.clone());
        tracing::info!("Submission accepted as {case_id}");

        if let Some(history) = self.history.as_ref() {
            if let Err(err) = history.append(&record) {
                tracing::warn!("Could not record submission {case_id}: {err}");
            }
        }

        SubmitOutcome::Submitted { record, message }
    }

    /// Recent submissions from the sink, or nothing if it is unavailable
    pub fn recent(&self) -> Vec<SubmissionRecord> {
        let Some(history) = self.history.as_ref() else {
            return Vec::new();
        };
        history.recent().unwrap_or_else(|err| {
            tracing::warn!("Could not read submission history: {err}");
            Vec::new()
        })
    }

    fn fresh_case_id<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let taken: Vec<String> = self.recent().into_iter().map(|r| r.case_id).collect();

        let mut case_id = generate_case_id(rng);
        for _ in 1..MAX_ID_ATTEMPTS {
            if !taken.contains(&case_id) {
                break;
            }
            tracing::debug!("Case ID {case_id} already used, drawing again");
            case_id = generate_case_id(rng);
        }
        case_id
    }
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new(None)
    }
}
