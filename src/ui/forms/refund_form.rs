//! Refund request form: fields, attachment, estimator sliders and submit

use super::field_renderer::{draw_field, draw_slider, FieldFooter, FieldView};
use crate::app::App;
use crate::state::{
    Attachment, FormFocus, PreviewState, RefundField, EVIDENCE_RANGE, RESPONSE_HOURS_RANGE,
};
use crate::ui::components::render_action_button;
use crate::ui::layout::FormRegions;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the form column
pub fn draw_form(frame: &mut Frame, regions: &FormRegions, app: &App) {
    let order = app.state.focus_order();

    for (focus, area) in order.iter().zip(regions.controls.iter().copied()) {
        let is_active = app.state.focus == *focus;
        match focus {
            FormFocus::Field(field) => draw_refund_field(frame, area, app, *field, is_active),
            FormFocus::Attachment => draw_attachment(frame, area, app, is_active),
            FormFocus::EvidenceSlider => draw_slider(
                frame,
                area,
                "Evidence confidence",
                app.state.sliders.evidence_confidence(),
                EVIDENCE_RANGE,
                "%",
                is_active,
            ),
            FormFocus::ResponseSlider => draw_slider(
                frame,
                area,
                "Merchant response time",
                app.state.sliders.merchant_response_hours(),
                RESPONSE_HOURS_RANGE,
                "h",
                is_active,
            ),
            FormFocus::Submit => render_action_button(
                frame,
                area,
                "Submit refund request",
                is_active,
                app.state.form.is_form_valid(),
            ),
        }
    }

    draw_estimates(frame, regions.estimates, app);
    draw_banner(frame, regions.banner, app);
}

fn footer_for<'a>(app: &'a App, field: RefundField, is_active: bool) -> Option<FieldFooter<'a>> {
    if let Some(error) = app.state.form.visible_error(field) {
        return Some(FieldFooter::Error(error));
    }
    is_active.then(|| FieldFooter::Hint(field.hint()))
}

fn draw_refund_field(frame: &mut Frame, area: Rect, app: &App, field: RefundField, is_active: bool) {
    let form = &app.state.form;
    let value = form.value(field);
    let display = if field == RefundField::Reason && !value.is_empty() {
        format!("‹ {value} ›")
    } else {
        value.to_string()
    };

    let view = FieldView {
        label: field.label(),
        value: &display,
        placeholder: field.placeholder(),
        required: form.layout().is_required(field),
        is_active,
        is_multiline: field.is_multiline(),
        footer: footer_for(app, field, is_active),
    };
    draw_field(frame, area, &view);
}

fn draw_attachment(frame: &mut Frame, area: Rect, app: &App, is_active: bool) {
    let field = RefundField::ProofFileName;
    let footer = footer_for(app, field, is_active);

    let border_style = match (footer, is_active) {
        (Some(FieldFooter::Error(_)), _) => Style::default().fg(Color::Red),
        (_, true) => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::DarkGray),
    };

    let input = if app.state.attachment_input.is_empty() {
        Span::styled(
            field.placeholder(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::raw(app.state.attachment_input.as_str())
    };
    let cursor = if is_active { "▌" } else { "" };

    let status = match app.state.attachment.attachment() {
        Some(attachment) => attachment_line(attachment),
        None => Line::from(Span::styled(
            "No file attached (Enter attaches, Del removes)",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let mut block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style);
    block = match footer {
        Some(FieldFooter::Error(message)) => block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        ))),
        Some(FieldFooter::Hint(hint)) => block.title_bottom(Line::from(Span::styled(
            format!(" {hint} "),
            Style::default().fg(Color::Gray),
        ))),
        None => block,
    };

    let lines = vec![
        Line::from(vec![
            input,
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]),
        status,
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn attachment_line(attachment: &Attachment) -> Line<'static> {
    let preview = match &attachment.preview {
        PreviewState::NotApplicable => String::new(),
        PreviewState::Loading => " · preview loading…".to_string(),
        PreviewState::Ready(url) => format!(" · preview ready ({})", format_size(url.len() as u64)),
        PreviewState::Unavailable => " · preview unavailable".to_string(),
    };
    Line::from(vec![
        Span::styled("📎 ", Style::default().fg(Color::Green)),
        Span::styled(
            attachment.file_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " · {} · {}{preview}",
                attachment.kind.label(),
                format_size(attachment.size_bytes)
            ),
            Style::default().fg(Color::Gray),
        ),
    ])
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

fn draw_estimates(frame: &mut Frame, area: Rect, app: &App) {
    let out = app.state.sliders.estimate();
    let value = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::Gray);

    let line = Line::from(vec![
        Span::styled(" Resolution ", label),
        Span::styled(format!("{} days", out.resolution_days), value),
        Span::styled("  Approval ", label),
        Span::styled(format!("{}%", out.approval_probability), value),
        Span::styled("  Expedite ", label),
        Span::styled(format!("{}/100", out.expedite_score), value),
    ]);

    let block = Block::default()
        .title(" Estimated outcome ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_banner(frame: &mut Frame, area: Rect, app: &App) {
    let Some(message) = app.state.form.success_message() else {
        return;
    };
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("✓ ", Style::default().fg(Color::Green)),
        Span::styled(message, Style::default().fg(Color::Green)),
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
