//! System clipboard via arboard

use super::traits::ClipboardSink;
use crate::error::DeskError;
use arboard::Clipboard;

#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), DeskError> {
        let mut clipboard = Clipboard::new().map_err(|e| DeskError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| DeskError::Clipboard(e.to_string()))?;
        Ok(())
    }
}
