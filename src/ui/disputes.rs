//! Dispute list view

use crate::app::App;
use crate::state::{Dispute, DisputeStatus, EMPTY_FILTER_MESSAGE};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

fn status_color(status: DisputeStatus) -> Color {
    match status {
        DisputeStatus::Open => Color::Yellow,
        DisputeStatus::InProgress => Color::Blue,
        DisputeStatus::Resolved => Color::Green,
    }
}

/// Draw the dispute list
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let disputes = &app.state.disputes;
    let block = Block::default()
        .title(" Disputes ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if let Some(error) = &disputes.load_error {
        let content = Paragraph::new(format!("Could not load disputes: {error}\nPress 'r' to retry."))
            .style(Style::default().fg(Color::Red))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" Filter: {}", disputes.filter.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" [f]cycle", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled(
            format!("{} total", disputes.disputes.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(header, chunks[0]);

    let visible = disputes.visible();
    if visible.is_empty() {
        let content = Paragraph::new(EMPTY_FILTER_MESSAGE)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, dispute)| dispute_item(dispute, idx == disputes.selected_index))
        .collect();

    let list = List::new(items).block(block);
    let mut list_state = ListState::default().with_selected(Some(disputes.selected_index));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn dispute_item(dispute: &Dispute, is_selected: bool) -> ListItem<'static> {
    let prefix = if is_selected { "▸" } else { " " };
    let style = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let heading = Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(format!("#{}", dispute.id), Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", dispute.status.label()),
            Style::default().fg(status_color(dispute.status)),
        ),
        Span::raw(" "),
        Span::styled(
            dispute.customer_name.clone(),
            style.add_modifier(Modifier::BOLD),
        ),
    ]);
    let issue = Line::from(Span::raw(format!("   {}", dispute.issue)));
    let dates = Line::from(Span::styled(
        format!("   {} · {}", dispute.filed_label(), dispute.updated_label()),
        Style::default().fg(Color::DarkGray),
    ));

    ListItem::new(vec![heading, issue, dates])
}
