//! Form Fill - CT600 box annotation engine
//!
//! This crate provides:
//! - The declarative spec mapping box ids to formatting operators
//! - Value sets keyed by box id
//! - Binding values to operators, grouped by form page
//! - Rendering one single-page PDF overlay per form page
//!
//! # Example
//!
//! ```ignore
//! use form_fill::{create_annotations, PageRenderer, Spec, ValueSet};
//!
//! let spec = Spec::from_json(r#"[[1, "WriteString", 0, 76, 210.2]]"#)?;
//! let values = ValueSet::from_json(r#"{"ct600": {"1": "Test Co"}}"#)?;
//! let annotations = create_annotations(&values, &spec);
//! let pdf_bytes = PageRenderer::default().render_page(&annotations, 0)?;
//! ```

mod binder;
pub mod config;
pub mod format;
pub mod operator;
mod registry;
mod renderer;
mod spec;
pub mod surface;
pub mod value;

pub use binder::{create_annotations, Annotation, PageAnnotations};
pub use config::{PageFormat, RenderOptions};
pub use operator::{CharBoxes, Format, Operator, Position};
pub use registry::OperatorKind;
pub use renderer::PageRenderer;
pub use spec::Spec;
pub use surface::{DrawCall, DrawRecorder, Surface};
pub use value::ValueSet;

use thiserror::Error;

/// Identifier of a box on the form
pub type BoxId = u32;

/// Zero-based form page number
pub type PageIndex = u32;

/// Errors that can occur while loading, binding or rendering
#[derive(Debug, Error)]
pub enum FillError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid spec: {0}")]
    InvalidSpec(String),

    #[error("Invalid values: {0}")]
    InvalidValues(String),

    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Page {0} has no annotations")]
    PageNotFound(PageIndex),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for form fill operations
pub type Result<T> = std::result::Result<T, FillError>;
