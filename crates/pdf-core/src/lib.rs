//! PDF Core - Low-level single-page PDF writing
//!
//! This crate provides functionality for:
//! - Creating blank PDF documents of a given page size
//! - Selecting one of the standard Type1 Courier faces
//! - Inserting text at specific coordinates
//! - Serializing the document to bytes
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{PageSize, PdfDocument, StandardFont, units};
//!
//! let mut doc = PdfDocument::new(PageSize::A4)?;
//! doc.set_font(StandardFont::COURIER_BOLD, 12.0);
//! doc.insert_text("Test Co", 1, units::mm(76.0), units::mm(210.2))?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod font;
mod text;

pub use document::{PageSize, PdfDocument};
pub use font::{FontStyle, FontWeight, StandardFont};
pub use text::{encode_win_ansi, generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("No font selected")]
    FontNotSet,

    #[error("Unknown standard font: {0}")]
    UnknownFont(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid page size: {0} x {1}")]
    InvalidPageSize(f64, f64),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Unit conversions into PDF user space (points)
pub mod units {
    /// Points per millimetre
    pub const MM: f64 = 72.0 / 25.4;

    /// Convert millimetres to points
    pub fn mm(value: f64) -> f64 {
        value * MM
    }
}
