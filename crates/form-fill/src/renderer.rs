//! Page rendering

use crate::binder::{Annotation, PageAnnotations};
use crate::config::RenderOptions;
use crate::surface::{DrawCall, DrawRecorder, Surface};
use crate::{FillError, PageIndex, Result};
use pdf_core::PdfDocument;

/// Renders bound annotations into single-page PDF overlays
#[derive(Debug, Clone, Default)]
pub struct PageRenderer {
    options: RenderOptions,
}

impl PageRenderer {
    /// Create a renderer, rejecting unusable options
    pub fn new(options: RenderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render one form page into a one-page PDF
    pub fn render_page(&self, annotations: &PageAnnotations<'_>, page: PageIndex) -> Result<Vec<u8>> {
        let list = annotations.get(page).ok_or(FillError::PageNotFound(page))?;

        let mut doc = PdfDocument::new(self.options.page_size()?)?;
        doc.set_font(self.options.standard_font()?, self.options.font_size);

        let drawn = draw(&mut doc, list)?;
        let bytes = doc.to_bytes()?;

        log::debug!(
            "Rendered page {page}: {} annotations, {drawn} drawn, {} bytes",
            list.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Render every annotated page, in ascending page order
    pub fn render_all(&self, annotations: &PageAnnotations<'_>) -> Result<Vec<(PageIndex, Vec<u8>)>> {
        annotations
            .pages()
            .into_iter()
            .map(|page| Ok((page, self.render_page(annotations, page)?)))
            .collect()
    }

    /// Draw calls a page would issue, without producing a PDF
    pub fn preview(&self, annotations: &PageAnnotations<'_>, page: PageIndex) -> Result<Vec<DrawCall>> {
        let list = annotations.get(page).ok_or(FillError::PageNotFound(page))?;

        let mut recorder = DrawRecorder::new();
        draw(&mut recorder, list)?;
        Ok(recorder.into_calls())
    }
}

/// Apply each annotation to the surface, returning how many were drawn
fn draw<S: Surface + ?Sized>(surface: &mut S, list: &[Annotation<'_>]) -> Result<usize> {
    let mut drawn = 0;
    for annotation in list {
        if annotation.value.is_null() {
            log::trace!("Skipping null value on page {}", annotation.operator.page());
            continue;
        }
        annotation.operator.apply(surface, annotation.value)?;
        drawn += 1;
    }
    Ok(drawn)
}
