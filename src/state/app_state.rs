//! Application state definitions

use super::attachment::{
    AttachmentError, FileAttachmentController, FileMeta, PreviewRequest, PreviewResult,
};
use super::disputes::DisputeListState;
use super::estimator::SliderInputs;
use super::forms::{FormLayout, FormStateStore, RefundField, REASON_OPTIONS};
use super::insights::{highlight_titles, StatKind};
use super::rotation::{Interaction, RotationScheduler};
use super::submission::{SubmissionController, SubmitOutcome};
use crate::config::DeskConfig;
use crate::sinks::HistorySink;
use std::path::Path;
use std::time::{Duration, Instant};

/// How long the active highlight takes to ease into emphasis
pub const EMPHASIS_DURATION: Duration = Duration::from_millis(500);
/// Lifetime of a transient notice such as "Copied"
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    Disputes,
}

impl View {
    pub const ALL: [View; 2] = [View::Form, View::Disputes];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Form => "Refund Form",
            Self::Disputes => "Disputes",
        }
    }
}

/// Focusable elements of the form view, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(RefundField),
    /// Path input standing in for the file picker
    Attachment,
    EvidenceSlider,
    ResponseSlider,
    Submit,
}

/// A rotation member under the mouse pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Highlight(&'static str),
    Stat(StatKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

/// Main application state
pub struct AppState {
    pub current_view: View,
    pub form: FormStateStore,
    pub attachment: FileAttachmentController,
    pub submission: SubmissionController,
    pub sliders: SliderInputs,
    pub highlights: RotationScheduler<&'static str>,
    pub stats: RotationScheduler<StatKind>,
    pub disputes: DisputeListState,
    pub focus: FormFocus,
    /// Text typed into the attachment path input
    pub attachment_input: String,
    /// Most recently issued case ID, kept for the copy shortcut
    pub last_case_id: Option<String>,
    pub notice: Option<Notice>,
    pub hovered: Option<HoverTarget>,
    seen_picker_generation: u64,
}

impl AppState {
    pub fn new(
        config: &DeskConfig,
        layout: FormLayout,
        history: Option<Box<dyn HistorySink>>,
        now: Instant,
    ) -> Self {
        let period = config.rotation_period();
        let idle = config.idle_resume();
        let form = FormStateStore::new(layout);
        let focus = Self::focus_order_for(&form)
            .first()
            .copied()
            .unwrap_or(FormFocus::Submit);
        let seen_picker_generation = form.picker_generation();

        let mut state = Self {
            current_view: View::default(),
            form,
            attachment: FileAttachmentController::new(),
            submission: SubmissionController::new(history),
            sliders: SliderInputs::new(
                config.evidence_confidence(),
                config.merchant_response_hours(),
            ),
            highlights: RotationScheduler::new(highlight_titles(), period, idle, now),
            stats: RotationScheduler::new(StatKind::ALL.to_vec(), period, idle, now),
            disputes: DisputeListState::default(),
            focus,
            attachment_input: String::new(),
            last_case_id: None,
            notice: None,
            hovered: None,
            seen_picker_generation,
        };
        state.enter_focus(focus);
        state
    }

    fn focus_order_for(form: &FormStateStore) -> Vec<FormFocus> {
        let mut order: Vec<FormFocus> = form
            .layout()
            .fields
            .iter()
            .map(|field| match field {
                RefundField::ProofFileName => FormFocus::Attachment,
                other => FormFocus::Field(*other),
            })
            .collect();
        order.extend([
            FormFocus::EvidenceSlider,
            FormFocus::ResponseSlider,
            FormFocus::Submit,
        ]);
        order
    }

    /// Focusable elements for the current layout
    pub fn focus_order(&self) -> Vec<FormFocus> {
        Self::focus_order_for(&self.form)
    }

    /// Move focus to the next element
    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    /// Move focus to the previous element
    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order
            .iter()
            .position(|f| *f == self.focus)
            .map(|i| i as isize)
            .unwrap_or(0);
        let next = order[(current + delta).rem_euclid(len) as usize];
        self.set_focus(next);
    }

    /// Focus an element, blurring the field that loses focus
    pub fn set_focus(&mut self, target: FormFocus) {
        if target == self.focus {
            return;
        }
        match self.focus {
            FormFocus::Field(field) => self.form.blur_field(field),
            FormFocus::Attachment => self.form.blur_field(RefundField::ProofFileName),
            _ => {}
        }
        self.focus = target;
        self.enter_focus(target);
    }

    fn enter_focus(&mut self, target: FormFocus) {
        match target {
            FormFocus::Field(field) => self.form.focus(field),
            FormFocus::Attachment => self.form.focus(RefundField::ProofFileName),
            _ => {}
        }
    }

    /// Type a character into the focused input
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormFocus::Field(RefundField::Reason) => {}
            FormFocus::Field(field) => {
                let mut value = self.form.value(field).to_string();
                value.push(c);
                self.form.set_field(field, value);
            }
            FormFocus::Attachment => self.attachment_input.push(c),
            _ => {}
        }
    }

    /// Delete the last character of the focused input
    pub fn backspace(&mut self) {
        match self.focus {
            FormFocus::Field(RefundField::Reason) => {}
            FormFocus::Field(field) => {
                let mut value = self.form.value(field).to_string();
                if value.pop().is_some() {
                    self.form.set_field(field, value);
                }
            }
            FormFocus::Attachment => {
                self.attachment_input.pop();
            }
            _ => {}
        }
    }

    /// Step through the reason options; the selector starts empty
    pub fn cycle_reason(&mut self, forward: bool) {
        let current = self.form.value(RefundField::Reason);
        let index = REASON_OPTIONS.iter().position(|r| *r == current);
        let last = REASON_OPTIONS.len() - 1;
        let next = match (index, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) => (i + 1) % REASON_OPTIONS.len(),
            (Some(0), false) => last,
            (Some(i), false) => i - 1,
        };
        self.form.set_field(RefundField::Reason, REASON_OPTIONS[next]);
    }

    /// Move the focused slider by `steps`
    pub fn nudge_slider(&mut self, steps: i16) {
        match self.focus {
            FormFocus::EvidenceSlider => self.sliders.nudge_evidence(steps),
            FormFocus::ResponseSlider => self.sliders.nudge_response_hours(steps),
            _ => {}
        }
    }

    /// Attach the file named in the path input; an empty path removes.
    ///
    /// Picker-level failures (wrong type, unreadable path) are returned to the
    /// caller and never enter the form's error map.
    pub fn attach_from_input(&mut self) -> Result<Option<PreviewRequest>, AttachmentError> {
        let path = self.attachment_input.trim().to_string();
        let request = if path.is_empty() {
            self.attachment.attach(&mut self.form, None)
        } else {
            let meta = FileMeta::from_path(Path::new(&path))?;
            self.attachment.attach(&mut self.form, Some(meta))
        };
        self.sync_picker();
        Ok(request)
    }

    pub fn remove_attachment(&mut self) {
        self.attachment.remove(&mut self.form);
        self.sync_picker();
    }

    /// Apply a finished preview decode; stale results are dropped
    pub fn complete_preview(&mut self, result: PreviewResult) -> bool {
        self.attachment.complete_preview(result)
    }

    /// Validate everything and, if valid, issue a case ID and reset
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.submission.submit(&mut self.form, &mut self.attachment);
        if let Some(case_id) = outcome.case_id() {
            self.last_case_id = Some(case_id.to_string());
            if let Some(first) = self.focus_order().first().copied() {
                self.focus = first;
                self.enter_focus(first);
            }
        }
        self.sync_picker();
        outcome
    }

    /// Clear the path input whenever the store asks for a fresh picker
    fn sync_picker(&mut self) {
        let generation = self.form.picker_generation();
        if generation != self.seen_picker_generation {
            self.attachment_input.clear();
            self.seen_picker_generation = generation;
        }
    }

    /// Click on a highlight card by position
    pub fn select_highlight(&mut self, index: usize, now: Instant) -> bool {
        let Some(title) = self.highlights.members().get(index).copied() else {
            return false;
        };
        self.highlights.interact(&title, Interaction::Click, now)
    }

    /// Click on a live-stat widget
    pub fn select_stat(&mut self, kind: StatKind, now: Instant) -> bool {
        self.stats.interact(&kind, Interaction::Click, now)
    }

    /// Track the pointer: entering a member pauses its group, leaving rests it
    pub fn hover(&mut self, target: Option<HoverTarget>, now: Instant) {
        if self.hovered == target {
            return;
        }
        match self.hovered {
            Some(HoverTarget::Highlight(_)) => self.highlights.rest(now),
            Some(HoverTarget::Stat(_)) => self.stats.rest(now),
            None => {}
        }
        match target {
            Some(HoverTarget::Highlight(title)) => {
                self.highlights
                    .interact(&title, Interaction::PointerEnter, now);
            }
            Some(HoverTarget::Stat(kind)) => {
                self.stats.interact(&kind, Interaction::PointerEnter, now);
            }
            None => {}
        }
        self.hovered = target;
    }

    /// Advance timers and expire notices. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let highlights = self.highlights.poll(now);
        let stats = self.stats.poll(now);
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.expires_at <= now);
        if expired {
            self.notice = None;
        }
        highlights || stats || expired
    }

    pub fn show_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            expires_at: now + NOTICE_DURATION,
        });
    }

    /// Eased emphasis (0.0 to 1.0) of the active highlight card
    pub fn highlight_emphasis(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.highlights.activated_at());
        let progress = (elapsed.as_secs_f32() / EMPHASIS_DURATION.as_secs_f32()).min(1.0);
        simple_easing::cubic_out(progress)
    }

    /// Whether the loop should redraw at animation rate
    pub fn is_animating(&self, now: Instant) -> bool {
        let transitioning =
            now.saturating_duration_since(self.highlights.activated_at()) < EMPHASIS_DURATION;
        transitioning || self.attachment.is_preview_pending()
    }

    /// Stop both rotation groups
    pub fn teardown(&mut self) {
        self.highlights.teardown();
        self.stats.teardown();
    }
}
