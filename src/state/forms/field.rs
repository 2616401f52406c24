//! Refund form fields and the per-field touch/validity state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields a refund request can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefundField {
    TransactionId,
    CustomerEmail,
    Reason,
    Description,
    ProofFileName,
    CustomerName,
    OrderId,
}

impl RefundField {
    /// Wire/storage key (matches the serde name)
    pub fn key(&self) -> &'static str {
        match self {
            Self::TransactionId => "transactionId",
            Self::CustomerEmail => "customerEmail",
            Self::Reason => "reason",
            Self::Description => "description",
            Self::ProofFileName => "proofFileName",
            Self::CustomerName => "customerName",
            Self::OrderId => "orderId",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TransactionId => "Transaction ID",
            Self::CustomerEmail => "Customer Email",
            Self::Reason => "Reason for Dispute",
            Self::Description => "Description / Explanation",
            Self::ProofFileName => "Upload Proof",
            Self::CustomerName => "Customer Name",
            Self::OrderId => "Order ID",
        }
    }

    /// Guidance shown while the field has focus
    pub fn hint(&self) -> &'static str {
        match self {
            Self::TransactionId => {
                "Enter the transaction number from your statement so we can fast-track the lookup."
            }
            Self::CustomerEmail => {
                "Provide the email tied to the purchase. We use it to send updates and confirm ownership."
            }
            Self::Reason => {
                "Choose the best fitting dispute type. This routes the request to the correct specialist."
            }
            Self::Description => {
                "Share helpful context (dates, conversations, or product details) to strengthen your case."
            }
            Self::ProofFileName => {
                "Upload receipts, chat transcripts, or screenshots that support your claim (max 5MB)."
            }
            Self::CustomerName => "The name on the account that made the purchase.",
            Self::OrderId => "Order number from the merchant's confirmation, if you have one.",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::TransactionId => "e.g. TXN-284729",
            Self::CustomerEmail => "customer@example.com",
            Self::Reason => "Select a reason",
            Self::Description => "Provide helpful details to speed up our investigation.",
            Self::ProofFileName => "path/to/receipt.pdf",
            Self::CustomerName => "Jane Doe",
            Self::OrderId => "e.g. ORD-1042",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Description)
    }
}

impl fmt::Display for RefundField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Dispute reasons offered by the reason selector
pub const REASON_OPTIONS: &[&str] = &[
    "Product not received",
    "Service issue",
    "Duplicate charge",
    "Unauthorized charge",
    "Fraud",
    "Other",
];

/// Which fields a form exposes and which of them must be filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLayout {
    pub fields: Vec<RefundField>,
    pub required: Vec<RefundField>,
}

impl FormLayout {
    /// The standard refund request form
    pub fn refund() -> Self {
        Self {
            fields: vec![
                RefundField::TransactionId,
                RefundField::CustomerEmail,
                RefundField::Reason,
                RefundField::Description,
                RefundField::ProofFileName,
            ],
            required: vec![
                RefundField::TransactionId,
                RefundField::CustomerEmail,
                RefundField::Reason,
            ],
        }
    }

    /// Refund form with the optional customer name and order id fields
    pub fn extended() -> Self {
        let mut layout = Self::refund();
        layout
            .fields
            .splice(0..0, [RefundField::CustomerName, RefundField::OrderId]);
        layout
    }

    pub fn contains(&self, field: RefundField) -> bool {
        self.fields.contains(&field)
    }

    pub fn is_required(&self, field: RefundField) -> bool {
        self.required.contains(&field)
    }
}

impl Default for FormLayout {
    fn default() -> Self {
        Self::refund()
    }
}

/// Result of running a field's validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    Invalid,
}

impl Outcome {
    pub fn of(error: Option<&str>) -> Self {
        if error.is_some() {
            Self::Invalid
        } else {
            Self::Valid
        }
    }
}

/// Events that drive a field's state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    /// Value changed by the user
    Edited(Outcome),
    /// Field lost focus
    Blurred(Outcome),
    /// Whole-form validation on submit
    Validated(Outcome),
    /// Full form reset, or removal of the attachment
    Reset,
}

/// Per-field state: untouched until the first edit or blur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPhase {
    #[default]
    Untouched,
    TouchedValid,
    TouchedInvalid,
}

impl FieldPhase {
    /// Transition table. Edit, blur and validate all land in the touched
    /// phase named by the rule outcome, whichever phase the field was in.
    /// Touched phases only return to `Untouched` on reset.
    pub fn on(self, event: FieldEvent) -> Self {
        use FieldEvent::*;
        use FieldPhase::*;

        match (self, event) {
            (_, Reset) => Untouched,
            (Untouched, Edited(outcome) | Blurred(outcome) | Validated(outcome)) => {
                Self::touched(outcome)
            }
            (TouchedValid, Edited(outcome) | Blurred(outcome) | Validated(outcome)) => {
                Self::touched(outcome)
            }
            (TouchedInvalid, Edited(outcome) | Blurred(outcome) | Validated(outcome)) => {
                Self::touched(outcome)
            }
        }
    }

    fn touched(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Valid => Self::TouchedValid,
            Outcome::Invalid => Self::TouchedInvalid,
        }
    }

    pub fn is_touched(&self) -> bool {
        !matches!(self, Self::Untouched)
    }
}
