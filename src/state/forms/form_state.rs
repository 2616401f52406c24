//! Form state store: values, touch phases and the error map

use super::field::{FieldEvent, FieldPhase, FormLayout, Outcome, RefundField};
use super::rules::validate_field;
use std::collections::BTreeMap;

/// Field name → message. A missing key means no error is known for the field.
pub type FormErrors = BTreeMap<RefundField, String>;

/// Holds the refund form's values, per-field phases and errors.
///
/// All mutation goes through the operations below; validation is always
/// re-derived from the value being committed, so the error for a field can
/// never lag behind its latest edit.
#[derive(Debug, Clone)]
pub struct FormStateStore {
    layout: FormLayout,
    values: BTreeMap<RefundField, String>,
    phases: BTreeMap<RefundField, FieldPhase>,
    errors: FormErrors,
    success_message: Option<String>,
    focused: Option<RefundField>,
    /// Bumped to force the attachment picker back to an empty state
    picker_generation: u64,
}

impl FormStateStore {
    pub fn new(layout: FormLayout) -> Self {
        let values = layout
            .fields
            .iter()
            .map(|field| (*field, String::new()))
            .collect();
        let phases = layout
            .fields
            .iter()
            .map(|field| (*field, FieldPhase::Untouched))
            .collect();

        Self {
            layout,
            values,
            phases,
            errors: FormErrors::new(),
            success_message: None,
            focused: None,
            picker_generation: 0,
        }
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    /// Current value of a field ("" when unset or not part of the layout)
    pub fn value(&self, field: RefundField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<RefundField, String> {
        &self.values
    }

    pub fn phase(&self, field: RefundField) -> FieldPhase {
        self.phases.get(&field).copied().unwrap_or_default()
    }

    pub fn is_touched(&self, field: RefundField) -> bool {
        self.phase(field).is_touched()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error(&self, field: RefundField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Error to display under a field: only once the field has been touched
    pub fn visible_error(&self, field: RefundField) -> Option<&str> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn set_success_message(&mut self, message: impl Into<String>) {
        self.success_message = Some(message.into());
    }

    pub fn focused(&self) -> Option<RefundField> {
        self.focused
    }

    pub fn focus(&mut self, field: RefundField) {
        if self.layout.contains(field) {
            self.focused = Some(field);
        }
    }

    pub fn picker_generation(&self) -> u64 {
        self.picker_generation
    }

    /// Overwrite a field's value, mark it touched and re-validate it
    pub fn set_field(&mut self, field: RefundField, value: impl Into<String>) {
        if !self.layout.contains(field) {
            tracing::debug!("Ignoring edit for field outside layout: {field}");
            return;
        }

        let value = value.into();
        self.success_message = None;
        let outcome = self.apply_rule(field, &value);
        self.values.insert(field, value);
        self.advance(field, FieldEvent::Edited(outcome));
    }

    /// Mark a field touched and re-validate its current value
    pub fn blur_field(&mut self, field: RefundField) {
        if !self.layout.contains(field) {
            return;
        }
        if self.focused == Some(field) {
            self.focused = None;
        }

        // The attachment's error slot belongs to the attachment controller
        let outcome = if field == RefundField::ProofFileName {
            Outcome::of(self.error(field))
        } else {
            let value = self.value(field).to_string();
            self.apply_rule(field, &value)
        };
        self.advance(field, FieldEvent::Blurred(outcome));
    }

    /// Validate the given fields, mark them touched, and report whether they
    /// are error-free and the attachment carries no error.
    pub fn validate_all(&mut self, required: &[RefundField]) -> bool {
        let mut all_valid = true;

        for field in required.iter().copied() {
            if !self.layout.contains(field) {
                continue;
            }
            let value = self.value(field).to_string();
            let outcome = self.apply_rule(field, &value);
            if outcome == Outcome::Invalid {
                all_valid = false;
            }
            self.advance(field, FieldEvent::Validated(outcome));
        }

        all_valid && self.error(RefundField::ProofFileName).is_none()
    }

    /// Derived validity, recomputed from current values on every call
    pub fn is_form_valid(&self) -> bool {
        self.layout
            .required
            .iter()
            .all(|field| validate_field(*field, self.value(*field)).is_none())
            && self.error(RefundField::ProofFileName).is_none()
    }

    /// Restore the pristine form and force the picker to clear
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
        for phase in self.phases.values_mut() {
            *phase = phase.on(FieldEvent::Reset);
        }
        self.errors.clear();
        self.success_message = None;
        self.focused = None;
        self.bump_picker_generation();
    }

    /// Install or clear the attachment field's error slot
    pub(crate) fn set_attachment_error(&mut self, error: Option<&str>) {
        match error {
            Some(message) => {
                self.errors
                    .insert(RefundField::ProofFileName, message.to_string());
            }
            None => {
                self.errors.remove(&RefundField::ProofFileName);
            }
        }
    }

    /// Project the attached file's name into the form values
    pub(crate) fn set_attachment_name(&mut self, name: &str) {
        if let Some(value) = self.values.get_mut(&RefundField::ProofFileName) {
            value.clear();
            value.push_str(name);
        }
    }

    pub(crate) fn touch_attachment(&mut self) {
        self.success_message = None;
        let outcome = Outcome::of(self.error(RefundField::ProofFileName));
        self.advance(RefundField::ProofFileName, FieldEvent::Edited(outcome));
    }

    /// The attachment is the one field whose touched flag reverts outside a reset
    pub(crate) fn untouch_attachment(&mut self) {
        self.advance(RefundField::ProofFileName, FieldEvent::Reset);
    }

    pub(crate) fn bump_picker_generation(&mut self) {
        self.picker_generation = self.picker_generation.wrapping_add(1);
    }

    fn apply_rule(&mut self, field: RefundField, value: &str) -> Outcome {
        let error = validate_field(field, value);
        match error {
            Some(message) => {
                self.errors.insert(field, message.to_string());
            }
            None => {
                self.errors.remove(&field);
            }
        }
        Outcome::of(error)
    }

    fn advance(&mut self, field: RefundField, event: FieldEvent) {
        if let Some(phase) = self.phases.get_mut(&field) {
            *phase = phase.on(event);
        }
    }
}

impl Default for FormStateStore {
    fn default() -> Self {
        Self::new(FormLayout::refund())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::rules::{EMAIL_INVALID, REASON_REQUIRED, TRANSACTION_ID_REQUIRED};

    fn filled_store() -> FormStateStore {
        let mut store = FormStateStore::default();
        store.set_field(RefundField::TransactionId, "TXN-1");
        store.set_field(RefundField::CustomerEmail, "a@b.com");
        store.set_field(RefundField::Reason, "Fraud");
        store
    }

    mod construction {
        use super::*;

        #[test]
        fn test_new_store_is_pristine() {
            let store = FormStateStore::default();
            for field in FormLayout::refund().fields {
                assert_eq!(store.value(field), "");
                assert!(!store.is_touched(field));
            }
            assert!(store.errors().is_empty());
            assert!(store.success_message().is_none());
            assert_eq!(store.picker_generation(), 0);
        }

        #[test]
        fn test_field_outside_layout_reads_empty() {
            let store = FormStateStore::default();
            assert_eq!(store.value(RefundField::OrderId), "");
            assert_eq!(store.phase(RefundField::OrderId), FieldPhase::Untouched);
        }
    }

    mod set_field {
        use super::*;

        #[test]
        fn test_round_trip_returns_value() {
            let mut store = FormStateStore::default();
            store.set_field(RefundField::Description, "Charged twice");
            assert_eq!(store.value(RefundField::Description), "Charged twice");
        }

        #[test]
        fn test_marks_touched_and_records_error() {
            let mut store = FormStateStore::default();
            store.set_field(RefundField::CustomerEmail, "nope");
            assert!(store.is_touched(RefundField::CustomerEmail));
            assert_eq!(store.error(RefundField::CustomerEmail), Some(EMAIL_INVALID));
            assert_eq!(
                store.phase(RefundField::CustomerEmail),
                FieldPhase::TouchedInvalid
            );
        }

        #[test]
        fn test_fixing_value_removes_error_key() {
            let mut store = FormStateStore::default();
            store.set_field(RefundField::CustomerEmail, "nope");
            store.set_field(RefundField::CustomerEmail, "nope@example.com");
            assert!(!store.errors().contains_key(&RefundField::CustomerEmail));
            assert_eq!(
                store.phase(RefundField::CustomerEmail),
                FieldPhase::TouchedValid
            );
        }

        #[test]
        fn test_last_write_wins_for_rapid_edits() {
            let mut store = FormStateStore::default();
            store.set_field(RefundField::CustomerEmail, "a@b.com");
            store.set_field(RefundField::CustomerEmail, "a@");
            store.set_field(RefundField::CustomerEmail, "a@b");
            assert_eq!(store.value(RefundField::CustomerEmail), "a@b");
            assert_eq!(store.error(RefundField::CustomerEmail), Some(EMAIL_INVALID));
        }

        #[test]
        fn test_clears_success_message() {
            let mut store = FormStateStore::default();
            store.set_success_message("done");
            store.set_field(RefundField::Description, "x");
            assert!(store.success_message().is_none());
        }

        #[test]
        fn test_ignores_field_outside_layout() {
            let mut store = FormStateStore::default();
            store.set_field(RefundField::OrderId, "ORD-1");
            assert_eq!(store.value(RefundField::OrderId), "");
            assert!(!store.is_touched(RefundField::OrderId));
        }

        #[test]
        fn test_extended_layout_accepts_optional_fields() {
            let mut store = FormStateStore::new(FormLayout::extended());
            store.set_field(RefundField::OrderId, "ORD-1");
            assert_eq!(store.value(RefundField::OrderId), "ORD-1");
            assert!(store.error(RefundField::OrderId).is_none());
        }
    }

    mod blur_field {
        use super::*;

        #[test]
        fn test_blur_marks_touched_without_changing_value() {
            let mut store = FormStateStore::default();
            store.blur_field(RefundField::TransactionId);
            assert!(store.is_touched(RefundField::TransactionId));
            assert_eq!(store.value(RefundField::TransactionId), "");
            assert_eq!(
                store.visible_error(RefundField::TransactionId),
                Some(TRANSACTION_ID_REQUIRED)
            );
        }

        #[test]
        fn test_blur_is_idempotent() {
            let mut store = FormStateStore::default();
            store.blur_field(RefundField::Reason);
            let first = store.clone();
            store.blur_field(RefundField::Reason);
            assert_eq!(store.phase(RefundField::Reason), first.phase(RefundField::Reason));
            assert_eq!(store.errors(), first.errors());
        }

        #[test]
        fn test_blur_clears_focus_for_that_field() {
            let mut store = FormStateStore::default();
            store.focus(RefundField::Reason);
            store.blur_field(RefundField::TransactionId);
            assert_eq!(store.focused(), Some(RefundField::Reason));
            store.blur_field(RefundField::Reason);
            assert_eq!(store.focused(), None);
        }

        #[test]
        fn test_blur_keeps_attachment_error() {
            let mut store = FormStateStore::default();
            store.set_attachment_error(Some("File must be 5MB or smaller."));
            store.blur_field(RefundField::ProofFileName);
            assert!(store.error(RefundField::ProofFileName).is_some());
            assert_eq!(
                store.phase(RefundField::ProofFileName),
                FieldPhase::TouchedInvalid
            );
        }
    }

    mod visibility {
        use super::*;

        #[test]
        fn test_errors_hidden_until_touched() {
            let mut store = FormStateStore::default();
            store.validate_all(&[RefundField::Reason]);
            assert_eq!(store.visible_error(RefundField::Reason), Some(REASON_REQUIRED));
            assert_eq!(store.visible_error(RefundField::TransactionId), None);
        }
    }

    mod validate_all {
        use super::*;

        #[test]
        fn test_empty_form_is_invalid_and_touched() {
            let mut store = FormStateStore::default();
            let required = store.layout().required.clone();
            assert!(!store.validate_all(&required));
            for field in &required {
                assert!(store.is_touched(*field));
                assert!(store.error(*field).is_some());
            }
            assert!(!store.is_touched(RefundField::Description));
        }

        #[test]
        fn test_filled_form_is_valid() {
            let mut store = filled_store();
            let required = store.layout().required.clone();
            assert!(store.validate_all(&required));
        }

        #[test]
        fn test_attachment_error_blocks_even_though_optional() {
            let mut store = filled_store();
            store.set_attachment_error(Some("File must be 5MB or smaller."));
            let required = store.layout().required.clone();
            assert!(!store.validate_all(&required));
            assert!(!store.is_form_valid());
        }
    }

    mod is_form_valid {
        use super::*;

        #[test]
        fn test_tracks_latest_edit() {
            let mut store = filled_store();
            assert!(store.is_form_valid());
            store.set_field(RefundField::CustomerEmail, "broken@");
            assert!(!store.is_form_valid());
            store.set_field(RefundField::CustomerEmail, "fixed@example.com");
            assert!(store.is_form_valid());
        }

        #[test]
        fn test_whitespace_reason_is_invalid() {
            let mut store = filled_store();
            store.set_field(RefundField::Reason, "   ");
            assert!(!store.is_form_valid());
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn test_reset_restores_pristine_state() {
            let mut store = filled_store();
            store.blur_field(RefundField::Description);
            store.set_attachment_error(Some("too big"));
            store.set_success_message("ok");
            store.focus(RefundField::Reason);

            store.reset();

            for field in FormLayout::refund().fields {
                assert_eq!(store.value(field), "");
                assert!(!store.is_touched(field));
            }
            assert!(store.errors().is_empty());
            assert!(store.success_message().is_none());
            assert!(store.focused().is_none());
        }

        #[test]
        fn test_reset_bumps_picker_generation_once() {
            let mut store = FormStateStore::default();
            store.reset();
            assert_eq!(store.picker_generation(), 1);
        }
    }
}
