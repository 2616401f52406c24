//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Message shown under a field's border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFooter<'a> {
    Error(&'a str),
    Hint(&'a str),
}

/// Display data for one bordered input
pub struct FieldView<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: &'a str,
    pub required: bool,
    pub is_active: bool,
    pub is_multiline: bool,
    pub footer: Option<FieldFooter<'a>>,
}

/// Draw a bordered input with cursor, placeholder and footer message
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FieldView) {
    let has_error = matches!(field.footer, Some(FieldFooter::Error(_)));

    let border_style = match (has_error, field.is_active) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let cursor = if field.is_active { "▌" } else { "" };
    let cursor_span = Span::styled(cursor, Style::default().fg(Color::Cyan));

    let lines: Vec<Line> = if field.value.is_empty() {
        vec![Line::from(vec![
            Span::styled(
                field.placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            cursor_span,
        ])]
    } else if field.is_multiline {
        let mut lines: Vec<Line> = field
            .value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor_span);
        }
        lines
    } else {
        vec![Line::from(vec![Span::raw(field.value), cursor_span])]
    };

    let title = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    match field.footer {
        Some(FieldFooter::Error(message)) => {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {message} "),
                Style::default().fg(Color::Red),
            )));
        }
        Some(FieldFooter::Hint(hint)) => {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {hint} "),
                Style::default().fg(Color::Gray),
            )));
        }
        None => {}
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// Render a horizontal gauge-like slider
pub fn draw_slider(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: u8,
    range: (u8, u8),
    unit: &str,
    is_active: bool,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let readout = format!(" {value}{unit} ");
    let track_width = area
        .width
        .saturating_sub(4 + readout.chars().count() as u16) as usize;
    let span = f32::from(range.1 - range.0).max(1.0);
    let filled = ((f32::from(value.saturating_sub(range.0)) / span) * track_width as f32).round()
        as usize;
    let filled = filled.min(track_width);

    let line = Line::from(vec![
        Span::styled("━".repeat(filled), border_style),
        Span::styled("●", Style::default().fg(Color::White)),
        Span::styled(
            "─".repeat(track_width.saturating_sub(filled)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(readout, Style::default().add_modifier(Modifier::BOLD)),
    ]);

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
