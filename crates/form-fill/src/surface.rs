//! Drawing surfaces operators write onto

use crate::Result;
use pdf_core::PdfDocument;
use serde::Serialize;

/// Something text can be drawn on
pub trait Surface {
    /// Draw `text` with its baseline starting at (`x`, `y`), in points from
    /// the bottom-left corner of the page
    fn draw_string(&mut self, x: f64, y: f64, text: &str) -> Result<()>;
}

/// Draws on the first (and only) page of a rendered document
impl Surface for PdfDocument {
    fn draw_string(&mut self, x: f64, y: f64, text: &str) -> Result<()> {
        self.insert_text(text, 1, x, y)?;
        Ok(())
    }
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCall {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl DrawCall {
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

/// Surface that records draw calls instead of rendering them
#[derive(Debug, Clone, Default)]
pub struct DrawRecorder {
    calls: Vec<DrawCall>,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, in draw order
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Text of every recorded call, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.calls.iter().map(|call| call.text.as_str()).collect()
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }
}

impl Surface for DrawRecorder {
    fn draw_string(&mut self, x: f64, y: f64, text: &str) -> Result<()> {
        self.calls.push(DrawCall::new(x, y, text));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::{PageSize, StandardFont};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recorder_keeps_draw_order() {
        let mut recorder = DrawRecorder::new();
        recorder.draw_string(1.0, 2.0, "A").unwrap();
        recorder.draw_string(3.0, 4.0, "B").unwrap();

        assert_eq!(
            recorder.calls(),
            &[DrawCall::new(1.0, 2.0, "A"), DrawCall::new(3.0, 4.0, "B")]
        );
        assert_eq!(recorder.texts(), vec!["A", "B"]);
    }

    #[test]
    fn test_pdf_surface_requires_font() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        assert!(doc.draw_string(10.0, 10.0, "X").is_err());

        doc.set_font(StandardFont::COURIER_BOLD, 12.0);
        assert!(doc.draw_string(10.0, 10.0, "X").is_ok());
    }
}
