//! In-memory dispute source used by the list view

use super::traits::DisputeSource;
use crate::error::DeskError;
use crate::state::{Dispute, DisputeStatus};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

/// Fixed sample of disputes
#[derive(Debug, Default)]
pub struct SeededDisputes;

fn seeded(
    id: u32,
    customer_name: &str,
    issue: &str,
    status: DisputeStatus,
    created: (u32, u32),
    updated: (u32, u32),
) -> Result<Dispute, DeskError> {
    let at = |(month, day): (u32, u32)| {
        Utc.with_ymd_and_hms(2023, month, day, 9, 0, 0)
            .single()
            .ok_or_else(|| DeskError::Source(format!("invalid seed date 2023-{month}-{day}")))
    };

    Ok(Dispute {
        id,
        customer_name: customer_name.to_string(),
        issue: issue.to_string(),
        status,
        created_at: at(created)?,
        updated_at: at(updated)?,
    })
}

#[async_trait]
impl DisputeSource for SeededDisputes {
    async fn list_disputes(&self) -> Result<Vec<Dispute>, DeskError> {
        Ok(vec![
            seeded(
                1046,
                "Priya Singh",
                "Chargeback on a $249 order that never shipped.",
                DisputeStatus::InProgress,
                (9, 15),
                (9, 18),
            )?,
            seeded(
                1051,
                "Dana Cooper",
                "Subscription cancelled but renewal of $129 was still billed.",
                DisputeStatus::Open,
                (9, 18),
                (9, 18),
            )?,
            seeded(
                2108,
                "Michael Chen",
                "Billing error: charged $89 twice for the same invoice.",
                DisputeStatus::Resolved,
                (9, 10),
                (9, 14),
            )?,
            seeded(
                4112,
                "Sara López",
                "Unrecognised $499 purchase flagged as fraud.",
                DisputeStatus::InProgress,
                (9, 16),
                (9, 19),
            )?,
        ])
    }
}
