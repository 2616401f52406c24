//! Form rendering module
//!
//! - `field_renderer`: bordered inputs and sliders
//! - `refund_form`: the refund request form column

mod field_renderer;
mod refund_form;

pub use refund_form::draw_form;
