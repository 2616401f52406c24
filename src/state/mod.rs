//! Application state module

mod app_state;
mod attachment;
mod disputes;
mod estimator;
mod forms;
mod insights;
mod rotation;
mod submission;

pub use app_state::*;
pub use attachment::*;
pub use disputes::*;
pub use estimator::*;
pub use forms::*;
pub use insights::*;
pub use rotation::*;
pub use submission::*;
