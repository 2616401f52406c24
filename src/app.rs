//! Application state and core logic

use crate::config::DeskConfig;
use crate::platform::COPY_MODIFIER;
use crate::sinks::{
    ClipboardSink, DisputeSource, HistorySink, JsonHistoryStore, SeededDisputes, SystemClipboard,
};
use crate::state::{
    decode_preview, AppState, FormFocus, HoverTarget, PreviewRequest, PreviewResult,
    RefundField, SubmitOutcome, View,
};
use crate::ui::layout::{self, FormRegions};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Poll interval while something on screen is animating (~60fps)
pub const FAST_POLL: Duration = Duration::from_millis(16);
/// Poll interval otherwise
pub const SLOW_POLL: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback shown in the status bar until the next input
    pub status_message: Option<String>,
    /// Terminal size for hit testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
    clipboard: Box<dyn ClipboardSink>,
    disputes: Arc<dyn DisputeSource>,
    preview_tx: mpsc::UnboundedSender<PreviewResult>,
    preview_rx: mpsc::UnboundedReceiver<PreviewResult>,
}

impl App {
    /// Create a new App instance with the shipped sinks and providers
    pub async fn new(config: DeskConfig) -> Result<Self> {
        let history: Option<Box<dyn HistorySink>> = if config.persist_history() {
            match JsonHistoryStore::default_location() {
                Ok(store) => {
                    tracing::info!("Recording submissions in {}", store.path().display());
                    Some(Box::new(store))
                }
                Err(err) => {
                    tracing::warn!("Submission history disabled: {err}");
                    None
                }
            }
        } else {
            None
        };

        let state = AppState::new(&config, config.form_layout(), history, Instant::now());
        let mut app = Self::with_parts(state, Box::new(SystemClipboard), Arc::new(SeededDisputes));
        app.reload_disputes().await;
        Ok(app)
    }

    /// Assemble an App from explicit collaborators
    pub fn with_parts(
        state: AppState,
        clipboard: Box<dyn ClipboardSink>,
        disputes: Arc<dyn DisputeSource>,
    ) -> Self {
        let (preview_tx, preview_rx) = mpsc::unbounded_channel();
        Self {
            state,
            quit: false,
            status_message: None,
            terminal_size: None,
            clipboard,
            disputes,
            preview_tx,
            preview_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// How long the event loop may block waiting for input
    pub fn poll_interval(&self, now: Instant) -> Duration {
        if self.state.current_view == View::Form && self.state.is_animating(now) {
            FAST_POLL
        } else {
            SLOW_POLL
        }
    }

    /// Advance rotation timers, expire notices and apply finished decodes
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.state.tick(now);
        while let Ok(result) = self.preview_rx.try_recv() {
            changed |= self.state.complete_preview(result);
        }
        changed
    }

    /// Cancel every timer before the terminal is torn down
    pub fn shutdown(&mut self) {
        self.state.teardown();
    }

    fn screen(&self) -> Rect {
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        Rect::new(0, 0, width, height)
    }

    /// Form view regions for the given main area
    pub fn form_regions(&self, main: Rect) -> FormRegions {
        layout::form_regions(
            main,
            &self.state.focus_order(),
            self.state.highlights.members().len(),
            self.state.stats.members().len(),
        )
    }

    fn switch_view(&mut self, view: View, now: Instant) {
        if view != View::Form {
            self.state.hover(None, now);
        }
        self.state.current_view = view;
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let now = Instant::now();

        // Clear any status messages on key press
        self.status_message = None;

        match key.code {
            KeyCode::F(5) => {
                self.switch_view(View::Form, now);
                return Ok(());
            }
            KeyCode::F(6) => {
                self.switch_view(View::Disputes, now);
                return Ok(());
            }
            KeyCode::Char('y') | KeyCode::Char('Y') if key.modifiers.contains(COPY_MODIFIER) => {
                self.copy_case_id(now);
                return Ok(());
            }
            _ => {}
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key, now),
            View::Disputes => self.handle_disputes_key(key).await?,
        }

        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S')) {
                self.submit();
            }
            return;
        }

        let on_reason = self.state.focus == FormFocus::Field(RefundField::Reason);

        match key.code {
            KeyCode::F(n @ 1..=3) => {
                self.state.select_highlight(usize::from(n - 1), now);
            }
            KeyCode::Tab => self.state.focus_next(),
            KeyCode::BackTab => self.state.focus_prev(),
            KeyCode::Enter => match self.state.focus {
                FormFocus::Field(RefundField::Description) => self.state.input_char('\n'),
                FormFocus::Attachment => self.attach(),
                FormFocus::Submit => self.submit(),
                _ => self.state.focus_next(),
            },
            KeyCode::Delete if self.state.focus == FormFocus::Attachment => {
                self.state.remove_attachment();
            }
            KeyCode::Left => self.state.nudge_slider(-1),
            KeyCode::Right => self.state.nudge_slider(1),
            KeyCode::Up if on_reason => self.state.cycle_reason(false),
            KeyCode::Down if on_reason => self.state.cycle_reason(true),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
                self.state.input_char(c);
            }
            _ => {}
        }
    }

    async fn handle_disputes_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.disputes.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.disputes.move_up(),
            KeyCode::Char('f') => self.state.disputes.cycle_filter(),
            KeyCode::Char('r') => self.reload_disputes().await,
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    fn submit(&mut self) {
        match self.state.submit() {
            SubmitOutcome::Submitted { .. } => {}
            SubmitOutcome::Blocked { error_count } => {
                self.status_message =
                    Some(format!("Fix {error_count} field(s) before submitting"));
            }
        }
    }

    fn attach(&mut self) {
        match self.state.attach_from_input() {
            Ok(Some(request)) => self.spawn_preview(request),
            Ok(None) => {}
            Err(err) => {
                tracing::info!("Attachment not accepted: {err}");
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Decode off the event loop; the result comes back through the channel
    fn spawn_preview(&self, request: PreviewRequest) {
        let tx = self.preview_tx.clone();
        tokio::spawn(async move {
            let result = decode_preview(request).await;
            if tx.send(result).is_err() {
                tracing::debug!("Preview finished after the app closed");
            }
        });
    }

    /// Copy the last case ID; failures are logged and produce no notice
    fn copy_case_id(&mut self, now: Instant) {
        let Some(case_id) = self.state.last_case_id.clone() else {
            return;
        };
        match self.clipboard.set_text(&case_id) {
            Ok(()) => self.state.show_notice("Copied", now),
            Err(err) => tracing::warn!("Could not copy {case_id}: {err}"),
        }
    }

    /// Fetch disputes from the provider; errors stay in the list view
    pub async fn reload_disputes(&mut self) {
        match self.disputes.list_disputes().await {
            Ok(disputes) => {
                tracing::debug!("Loaded {} disputes", disputes.len());
                self.state.disputes.load(disputes);
            }
            Err(err) => {
                tracing::warn!("Failed to load disputes: {err}");
                self.state.disputes.load_error = Some(err.to_string());
            }
        }
    }

    /// Handle a mouse event
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let now = Instant::now();
        let (sidebar, main) = layout::create_layout(self.screen());

        match mouse.kind {
            MouseEventKind::Moved if self.state.current_view == View::Form => {
                let regions = self.form_regions(main);
                let target = self.hover_target(&regions, mouse.column, mouse.row);
                self.state.hover(target, now);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.status_message = None;
                let buttons = layout::sidebar_button_areas(sidebar);
                if let Some(idx) = layout::hit(&buttons, mouse.column, mouse.row) {
                    self.switch_view(View::ALL[idx], now);
                    return Ok(());
                }
                if self.state.current_view == View::Form {
                    self.handle_form_click(main, mouse.column, mouse.row, now);
                }
            }
            MouseEventKind::ScrollDown if self.state.current_view == View::Disputes => {
                self.state.disputes.move_down();
            }
            MouseEventKind::ScrollUp if self.state.current_view == View::Disputes => {
                self.state.disputes.move_up();
            }
            _ => {}
        }

        Ok(())
    }

    fn hover_target(&self, regions: &FormRegions, column: u16, row: u16) -> Option<HoverTarget> {
        if let Some(idx) = layout::hit(&regions.highlights, column, row) {
            return self
                .state
                .highlights
                .members()
                .get(idx)
                .map(|title| HoverTarget::Highlight(*title));
        }
        layout::hit(&regions.stats, column, row)
            .and_then(|idx| self.state.stats.members().get(idx))
            .map(|kind| HoverTarget::Stat(*kind))
    }

    fn handle_form_click(&mut self, main: Rect, column: u16, row: u16, now: Instant) {
        let regions = self.form_regions(main);

        if let Some(idx) = layout::hit(&regions.highlights, column, row) {
            self.state.select_highlight(idx, now);
            return;
        }
        if let Some(kind) = layout::hit(&regions.stats, column, row)
            .and_then(|idx| self.state.stats.members().get(idx).copied())
        {
            self.state.select_stat(kind, now);
            return;
        }
        if let Some(idx) = layout::hit(&regions.controls, column, row) {
            let order = self.state.focus_order();
            let Some(target) = order.get(idx).copied() else {
                return;
            };
            self.state.set_focus(target);
            if target == FormFocus::Submit {
                self.submit();
            }
        }
    }
}
