//! Refund form domain layer
//!
//! Field definitions, validation rules and the form state store.

mod field;
mod form_state;
mod rules;

pub use field::{FormLayout, RefundField, REASON_OPTIONS};
pub use form_state::FormStateStore;

#[cfg(test)]
pub use rules::{EMAIL_INVALID, TRANSACTION_ID_REQUIRED};
