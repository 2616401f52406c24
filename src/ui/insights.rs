//! Highlight cards and live-stat widgets beside the form

use crate::app::App;
use crate::state::{highlight_card, StatKind};
use crate::ui::layout::FormRegions;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

const RESTING: (u8, u8, u8) = (88, 88, 88);
const EMPHASIS: (u8, u8, u8) = (0, 200, 230);

/// Interpolate between the resting and emphasised border colours
fn blend(t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
    Color::Rgb(
        mix(RESTING.0, EMPHASIS.0),
        mix(RESTING.1, EMPHASIS.1),
        mix(RESTING.2, EMPHASIS.2),
    )
}

pub fn draw(frame: &mut Frame, regions: &FormRegions, app: &App, now: Instant) {
    let emphasis = app.state.highlight_emphasis(now);

    for (idx, (title, area)) in app
        .state
        .highlights
        .members()
        .iter()
        .zip(regions.highlights.iter().copied())
        .enumerate()
    {
        let is_active = app.state.highlights.is_active(title);
        draw_card(frame, area, idx, title, is_active.then_some(emphasis));
    }

    for (kind, area) in app
        .state
        .stats
        .members()
        .iter()
        .zip(regions.stats.iter().copied())
    {
        let is_active = app.state.stats.is_active(kind);
        draw_stat(frame, area, app, *kind, is_active);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, idx: usize, title: &str, emphasis: Option<f32>) {
    let Some(card) = highlight_card(title) else {
        return;
    };

    let (border_color, border_type, title_style) = match emphasis {
        Some(t) => (
            blend(t),
            BorderType::Rounded,
            Style::default().fg(blend(t)).add_modifier(Modifier::BOLD),
        ),
        None => (blend(0.0), BorderType::Plain, Style::default().fg(Color::Gray)),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
        .title(Line::from(vec![
            Span::styled(format!(" F{} ", idx + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{} {} ", card.icon, card.title), title_style),
        ]));

    let body = Paragraph::new(card.description)
        .style(Style::default().fg(if emphasis.is_some() {
            Color::White
        } else {
            Color::DarkGray
        }))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(body, area);
}

fn draw_stat(frame: &mut Frame, area: Rect, app: &App, kind: StatKind, is_active: bool) {
    let value = kind.value(&app.state.disputes, &app.state.sliders);
    let border = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", kind.label()), Style::default().fg(Color::Gray)),
        Span::styled(value, value_style),
    ]);
    let block = Block::default().borders(Borders::ALL).border_style(border);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
