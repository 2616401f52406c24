//! Layout components (sidebar, status bar) and the shared region geometry
//!
//! Region functions are pure so mouse handling can map a click back onto the
//! same rectangles the renderer used.

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{COPY_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FormFocus, RefundField, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const SIDEBAR_WIDTH: u16 = 20;

/// Rows per highlight card (border + title + description + border)
pub const HIGHLIGHT_CARD_HEIGHT: u16 = 4;
/// Rows per live-stat widget
pub const STAT_HEIGHT: u16 = 3;

/// Sidebar shortcut keys, parallel to `View::ALL`
const SIDEBAR_KEYS: [&str; 2] = ["F5", "F6"];

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(0),                // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar content
            Constraint::Length(1), // Status bar continuation
        ])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// One button per view, stacked from the top with a single row of padding
pub fn sidebar_button_areas(sidebar: Rect) -> Vec<Rect> {
    View::ALL
        .iter()
        .enumerate()
        .map(|(idx, _)| Rect {
            x: sidebar.x,
            y: sidebar.y + 1 + idx as u16 * BUTTON_HEIGHT,
            width: sidebar.width,
            height: BUTTON_HEIGHT,
        })
        .filter(|rect| rect.bottom() <= sidebar.bottom())
        .collect()
}

/// Regions of the form view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRegions {
    /// Form column, one rect per focusable element in tab order
    pub controls: Vec<Rect>,
    /// Estimate readout under the sliders
    pub estimates: Rect,
    /// Success banner / status line under the submit button
    pub banner: Rect,
    pub highlights: Vec<Rect>,
    pub stats: Vec<Rect>,
}

fn control_height(focus: &FormFocus) -> u16 {
    match focus {
        FormFocus::Field(RefundField::Description) => 5,
        FormFocus::Attachment => 4,
        _ => 3,
    }
}

/// Split the main area into the form column and the insights column
pub fn form_regions(
    main: Rect,
    order: &[FormFocus],
    highlight_count: usize,
    stat_count: usize,
) -> FormRegions {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(main);

    let mut constraints: Vec<Constraint> = Vec::with_capacity(order.len() + 3);
    for focus in order {
        if *focus == FormFocus::Submit {
            // Estimates sit between the sliders and the submit button
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(control_height(focus)));
    }
    constraints.push(Constraint::Length(3)); // Banner
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[0]);

    let mut controls = Vec::with_capacity(order.len());
    let mut estimates = Rect::default();
    let mut row = 0;
    for focus in order {
        if *focus == FormFocus::Submit {
            estimates = rows[row];
            row += 1;
        }
        controls.push(rows[row]);
        row += 1;
    }
    let banner = rows[row];

    let side = columns[1];
    let mut y = side.y;
    let highlights = stack(side, highlight_count, HIGHLIGHT_CARD_HEIGHT, &mut y);
    y += 1;
    let stats = stack(side, stat_count, STAT_HEIGHT, &mut y);

    FormRegions {
        controls,
        estimates,
        banner,
        highlights,
        stats,
    }
}

/// Fixed-height rects stacked downward from `y`; rows past the bottom are dropped
fn stack(side: Rect, count: usize, height: u16, y: &mut u16) -> Vec<Rect> {
    (0..count)
        .map(|_| {
            let rect = Rect {
                x: side.x,
                y: *y,
                width: side.width,
                height,
            };
            *y += height;
            rect
        })
        .filter(|rect| rect.bottom() <= side.bottom())
        .collect()
}

/// Index of the rect containing the given cell
pub fn hit(rects: &[Rect], column: u16, row: u16) -> Option<usize> {
    rects.iter().position(|rect| {
        column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
    })
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    for ((view, key), rect) in View::ALL
        .iter()
        .zip(SIDEBAR_KEYS)
        .zip(sidebar_button_areas(area))
    {
        let is_selected = app.state.current_view == *view;
        render_sidebar_button(frame, rect, key, view.label(), is_selected, true);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::styled(
        get_view_hints(&app.state.current_view),
        Style::default().fg(Color::Gray),
    )];

    if let Some(notice) = &app.state.notice {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            notice.text.as_str(),
            Style::default().fg(Color::Green),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> String {
    match view {
        View::Form => format!(
            " Tab:next  ←/→:slider  ↑/↓:reason  F1-F3:highlight  {SUBMIT_SHORTCUT}:submit  {COPY_SHORTCUT}:copy ID"
        ),
        View::Disputes => " j/k:nav  f:filter  r:reload  q:quit".to_string(),
    }
}
