//! Field validation rules

use super::field::RefundField;
use once_cell::sync::Lazy;
use regex::Regex;

pub const TRANSACTION_ID_REQUIRED: &str = "Transaction ID is required.";
pub const EMAIL_REQUIRED: &str = "Customer email is required.";
pub const EMAIL_INVALID: &str = "Enter a valid email address.";
pub const REASON_REQUIRED: &str = "Choose a reason for the dispute.";

/// Dot-atom or quoted local part, then one or more labels and an alphabetic TLD
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:[a-zA-Z0-9_'^&+{}=!-]+(?:\.[a-zA-Z0-9_'^&+{}=!-]+)*|"(?:[^"\\]|\\.)+")@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}$"#,
    )
    .expect("email pattern is a valid regex")
});

/// Check an address against the full email pattern (after trimming)
pub fn is_valid_email(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && EMAIL_PATTERN.is_match(trimmed)
}

/// Validate a single field value. `None` means the value is acceptable.
pub fn validate_field(field: RefundField, value: &str) -> Option<&'static str> {
    let trimmed = value.trim();

    match field {
        RefundField::TransactionId if trimmed.is_empty() => Some(TRANSACTION_ID_REQUIRED),
        RefundField::CustomerEmail if trimmed.is_empty() => Some(EMAIL_REQUIRED),
        RefundField::CustomerEmail if !is_valid_email(trimmed) => Some(EMAIL_INVALID),
        RefundField::Reason if trimmed.is_empty() => Some(REASON_REQUIRED),
        _ => None,
    }
}
