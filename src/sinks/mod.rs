//! Side-effect sinks and data providers around the form engine

mod clipboard;
mod disputes;
mod history;
mod traits;

pub use clipboard::SystemClipboard;
pub use disputes::SeededDisputes;
pub use history::{JsonHistoryStore, HISTORY_LIMIT};
pub use traits::{ClipboardSink, DisputeSource, HistorySink};

#[cfg(test)]
pub use traits::{MockClipboardSink, MockDisputeSource, MockHistorySink};
