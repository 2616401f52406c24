//! Highlight cards and live-stat widgets shown beside the form

use super::disputes::{DisputeListState, DisputeStatus};
use super::estimator::SliderInputs;

pub struct HighlightCard {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const HIGHLIGHT_CARDS: &[HighlightCard] = &[
    HighlightCard {
        title: "Secure evidence handling",
        description: "All uploaded proof is encrypted and routed only to the specialists assigned to your case.",
        icon: "◈",
    },
    HighlightCard {
        title: "Response within 48 hours",
        description: "Real-time routing ensures our compliance team reviews every submission in under two business days.",
        icon: "◷",
    },
    HighlightCard {
        title: "Dedicated dispute guidance",
        description: "Chat with our agents for tailored next steps while your investigation is progressing.",
        icon: "✉",
    },
];

pub fn highlight_titles() -> Vec<&'static str> {
    HIGHLIGHT_CARDS.iter().map(|card| card.title).collect()
}

pub fn highlight_card(title: &str) -> Option<&'static HighlightCard> {
    HIGHLIGHT_CARDS.iter().find(|card| card.title == title)
}

/// Live-stat widgets, in rotation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    OpenDisputes,
    ResolutionRate,
    ProjectedApproval,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [
        StatKind::OpenDisputes,
        StatKind::ResolutionRate,
        StatKind::ProjectedApproval,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenDisputes => "Open disputes",
            Self::ResolutionRate => "Resolution rate",
            Self::ProjectedApproval => "Projected approval",
        }
    }

    /// Current value, derived from the dispute list and slider positions
    pub fn value(&self, disputes: &DisputeListState, sliders: &SliderInputs) -> String {
        match self {
            Self::OpenDisputes => {
                let open = disputes.count(DisputeStatus::Open)
                    + disputes.count(DisputeStatus::InProgress);
                open.to_string()
            }
            Self::ResolutionRate => {
                let total = disputes.disputes.len();
                if total == 0 {
                    "n/a".to_string()
                } else {
                    let resolved = disputes.count(DisputeStatus::Resolved);
                    format!("{}%", resolved * 100 / total)
                }
            }
            Self::ProjectedApproval => format!("{}%", sliders.estimate().approval_probability),
        }
    }
}
