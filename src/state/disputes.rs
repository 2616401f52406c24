//! Dispute records and the list view's filter state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeStatus {
    Open,
    InProgress,
    Resolved,
}

impl DisputeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
        }
    }

    /// Display label: underscores become spaces
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispute {
    pub id: u32,
    pub customer_name: String,
    pub issue: String,
    pub status: DisputeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dispute {
    pub fn filed_label(&self) -> String {
        format!("Filed {}", self.created_at.format("%b %-d, %Y"))
    }

    pub fn updated_label(&self) -> String {
        format!("Last updated {}", self.updated_at.format("%b %-d, %Y"))
    }
}

/// Status filter for the list, cycled from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(DisputeStatus),
}

impl StatusFilter {
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Only(DisputeStatus::Open),
            Self::Only(DisputeStatus::Open) => Self::Only(DisputeStatus::InProgress),
            Self::Only(DisputeStatus::InProgress) => Self::Only(DisputeStatus::Resolved),
            Self::Only(DisputeStatus::Resolved) => Self::All,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Only(status) => status.label(),
        }
    }

    pub fn matches(&self, dispute: &Dispute) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => dispute.status == *status,
        }
    }
}

pub const EMPTY_FILTER_MESSAGE: &str = "No disputes match this status yet.";

/// Dispute list as supplied by the provider, plus view state
#[derive(Debug, Clone, Default)]
pub struct DisputeListState {
    pub disputes: Vec<Dispute>,
    pub filter: StatusFilter,
    pub selected_index: usize,
    pub load_error: Option<String>,
}

impl DisputeListState {
    pub fn load(&mut self, disputes: Vec<Dispute>) {
        self.disputes = disputes;
        self.load_error = None;
        self.clamp_selection();
    }

    /// Filtered disputes, oldest first
    pub fn visible(&self) -> Vec<&Dispute> {
        let mut visible: Vec<&Dispute> = self
            .disputes
            .iter()
            .filter(|d| self.filter.matches(d))
            .collect();
        visible.sort_by_key(|d| d.created_at);
        visible
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected_index = 0;
    }

    pub fn move_down(&mut self) {
        let count = self.visible().len();
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn count(&self, status: DisputeStatus) -> usize {
        self.disputes.iter().filter(|d| d.status == status).count()
    }

    fn clamp_selection(&mut self) {
        let count = self.visible().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dispute(id: u32, status: DisputeStatus, day: u32) -> Dispute {
        let at = Utc.with_ymd_and_hms(2023, 9, day, 12, 0, 0).unwrap();
        Dispute {
            id,
            customer_name: format!("Customer {id}"),
            issue: "Charged twice".to_string(),
            status,
            created_at: at,
            updated_at: at,
        }
    }

    mod status {
        use super::*;

        #[test]
        fn test_label_replaces_underscores() {
            assert_eq!(DisputeStatus::InProgress.label(), "IN PROGRESS");
            assert_eq!(DisputeStatus::Open.label(), "OPEN");
        }

        #[test]
        fn test_serializes_screaming_snake_case() {
            let json = serde_json::to_string(&DisputeStatus::InProgress).unwrap();
            assert_eq!(json, "\"IN_PROGRESS\"");
        }
    }

    mod dispute_labels {
        use super::*;

        #[test]
        fn test_date_labels() {
            let d = dispute(1, DisputeStatus::Open, 5);
            assert_eq!(d.filed_label(), "Filed Sep 5, 2023");
            assert_eq!(d.updated_label(), "Last updated Sep 5, 2023");
        }
    }

    mod list_state {
        use super::*;

        #[test]
        fn test_filter_cycles_back_to_all() {
            let mut filter = StatusFilter::default();
            for _ in 0..4 {
                filter = filter.next();
            }
            assert_eq!(filter, StatusFilter::All);
        }

        #[test]
        fn test_visible_is_filtered_and_sorted() {
            let mut list = DisputeListState::default();
            list.load(vec![
                dispute(3, DisputeStatus::Open, 20),
                dispute(1, DisputeStatus::Resolved, 2),
                dispute(2, DisputeStatus::Open, 10),
            ]);

            let ids: Vec<u32> = list.visible().iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![1, 2, 3]);

            list.cycle_filter();
            let ids: Vec<u32> = list.visible().iter().map(|d| d.id).collect();
            assert_eq!(ids, vec![2, 3]);
        }

        #[test]
        fn test_empty_filter_result() {
            let mut list = DisputeListState::default();
            list.load(vec![dispute(1, DisputeStatus::Open, 1)]);
            list.filter = StatusFilter::Only(DisputeStatus::Resolved);
            assert!(list.visible().is_empty());
        }

        #[test]
        fn test_selection_stays_in_bounds() {
            let mut list = DisputeListState::default();
            list.load(vec![
                dispute(1, DisputeStatus::Open, 1),
                dispute(2, DisputeStatus::Open, 2),
            ]);
            list.move_down();
            list.move_down();
            assert_eq!(list.selected_index, 1);
            list.move_up();
            list.move_up();
            assert_eq!(list.selected_index, 0);
        }

        #[test]
        fn test_counts_by_status() {
            let mut list = DisputeListState::default();
            list.load(vec![
                dispute(1, DisputeStatus::Open, 1),
                dispute(2, DisputeStatus::Resolved, 2),
                dispute(3, DisputeStatus::Open, 3),
            ]);
            assert_eq!(list.count(DisputeStatus::Open), 2);
            assert_eq!(list.count(DisputeStatus::InProgress), 0);
        }
    }
}
