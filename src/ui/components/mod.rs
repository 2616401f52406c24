//! Reusable UI components

mod button;

pub use button::{render_action_button, render_sidebar_button, BUTTON_HEIGHT};
