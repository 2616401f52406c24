//! UI module for rendering the TUI

mod components;
mod disputes;
mod forms;
mod insights;
pub mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let now = Instant::now();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    layout::draw_sidebar(frame, sidebar_area, app);

    match app.state.current_view {
        View::Form => {
            let regions = app.form_regions(main_area);
            forms::draw_form(frame, &regions, app);
            insights::draw(frame, &regions, app, now);
        }
        View::Disputes => disputes::draw_list(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);
}
