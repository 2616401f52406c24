//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a bordered button. Disabled buttons stay focusable but render dimmed.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let accent = if is_enabled { Color::Cyan } else { Color::DarkGray };

    let border_style = if is_selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = match (is_selected, is_enabled) {
        (true, true) => Style::default().fg(accent).add_modifier(Modifier::BOLD),
        (_, false) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        (false, true) => Style::default(),
    };

    let border_type = if is_selected {
        BorderType::Thick
    } else {
        BorderType::Plain
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    frame.render_widget(paragraph.block(block), area);
}

/// Render a centered action button, e.g. the form's submit
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let style = match (is_selected, is_enabled) {
        (_, false) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (false, true) => Style::default().fg(Color::Cyan),
    };
    let block = Block::default().borders(Borders::ALL).border_style(style);
    let paragraph = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Render a sidebar button with key and label
pub fn render_sidebar_button(
    frame: &mut Frame,
    area: Rect,
    key: &str,
    label: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let content = format!("{key} {label}");
    render_button(frame, area, &content, is_selected, is_enabled);
}
