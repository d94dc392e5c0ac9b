//! PDF Document wrapper

use crate::text::{encode_win_ansi, generate_text_operators, to_hex_string, TextRenderContext};
use crate::{PdfError, Result, StandardFont};
use log::{debug, warn};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4, 210mm x 297mm
    pub const A4: Self = Self {
        width: 595.28,
        height: 841.89,
    };

    /// US Letter, 8.5in x 11in
    pub const LETTER: Self = Self {
        width: 612.0,
        height: 792.0,
    };

    /// Create a custom page size
    ///
    /// Both dimensions must be finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PdfError::InvalidPageSize(width, height));
        }
        Ok(Self { width, height })
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// A PDF being written, one blank page at a time
///
/// Text operators are buffered per page and written into the content
/// streams when the document is serialized.
pub struct PdfDocument {
    inner: Document,
    /// Size shared by every page
    page_size: PageSize,
    /// Current font
    current_font: Option<StandardFont>,
    /// Current font size
    current_font_size: f32,
    /// Font dictionary objects (font -> PDF object ID)
    embedded_fonts: HashMap<StandardFont, ObjectId>,
    /// Page font resources (page number -> font -> resource name)
    page_font_resources: HashMap<usize, HashMap<StandardFont, String>>,
    /// Number of the next `/Fn` resource name
    next_font_resource: u32,
    /// Text operators not yet written (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl PdfDocument {
    /// Create a document holding a single blank page
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::new(PageSize::A4)?;
    /// assert_eq!(doc.page_count(), 1);
    /// ```
    pub fn new(page_size: PageSize) -> Result<Self> {
        let page_size = PageSize::new(page_size.width, page_size.height)?;
        let mut inner = Document::with_version("1.4");

        // "Pages" is referenced by its kids, so reserve its ID first
        let pages_id = inner.new_object_id();

        let contents_id = inner.add_object(Stream::new(Dictionary::new(), vec![]));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page_size.width as f32),
                Object::Real(page_size.height as f32),
            ]),
        );
        page_dict.set("Resources", Object::Dictionary(Dictionary::new()));
        page_dict.set("Contents", Object::Reference(contents_id));
        let page_id = inner.add_object(page_dict);

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages_dict.set("Count", Object::Integer(1));
        inner
            .objects
            .insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = inner.add_object(catalog);

        inner.trailer.set("Root", Object::Reference(catalog_id));

        Ok(Self {
            inner,
            page_size,
            current_font: None,
            current_font_size: 12.0,
            embedded_fonts: HashMap::new(),
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            page_content_buffer: HashMap::new(),
        })
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Get the page size
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Select the font and size (points) used by later `insert_text` calls
    pub fn set_font(&mut self, font: StandardFont, size: f32) {
        self.current_font = Some(font);
        self.current_font_size = size;
    }

    /// Get the current font, if one is set
    pub fn current_font(&self) -> Option<StandardFont> {
        self.current_font
    }

    /// Width of `text` in points for the current font and size
    pub fn text_width(&self, text: &str) -> Result<f64> {
        let font = self.current_font.ok_or(PdfError::FontNotSet)?;
        Ok(font.text_width_points(text, self.current_font_size) as f64)
    }

    /// Queue `text` for drawing on `page` (1-indexed) with its baseline
    /// starting at (`x`, `y`) points from the bottom-left corner
    pub fn insert_text(&mut self, text: &str, page: usize, x: f64, y: f64) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        if text.is_empty() {
            return Ok(());
        }

        let font = self.current_font.ok_or(PdfError::FontNotSet)?;

        let (bytes, replaced) = encode_win_ansi(text);
        if replaced > 0 {
            warn!("{replaced} character(s) in {text:?} have no WinAnsi code, drawn as '?'");
        }

        let ctx = TextRenderContext {
            font_name: self.get_or_create_font_ref(font, page),
            font_size: self.current_font_size,
        };

        let ops = generate_text_operators(&to_hex_string(&bytes), x, y, &ctx);
        self.buffer_content(page, &ops);

        Ok(())
    }

    /// Serialize the document into `path`
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize the document
    ///
    /// Buffered text is written into the page content streams first, together
    /// with the font resources it uses.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let pages: BTreeSet<usize> = self
            .page_content_buffer
            .keys()
            .chain(self.page_font_resources.keys())
            .copied()
            .collect();
        for page in pages {
            self.finalize_page(page)?;
        }

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        debug!(
            "serialized {} page(s) into {} bytes",
            self.page_count(),
            buffer.len()
        );
        Ok(buffer)
    }

    /// Resource name ("F1", "F2", ...) of a font on a page, registering it on
    /// first use
    pub fn get_or_create_font_ref(&mut self, font: StandardFont, page: usize) -> String {
        let next = &mut self.next_font_resource;
        self.page_font_resources
            .entry(page)
            .or_default()
            .entry(font)
            .or_insert_with(|| {
                let name = format!("F{next}");
                *next += 1;
                name
            })
            .clone()
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    /// Font dictionary object for a standard font, added once per document
    fn font_object(&mut self, font: StandardFont) -> ObjectId {
        if let Some(id) = self.embedded_fonts.get(&font) {
            return *id;
        }
        let id = self.inner.add_object(font.to_pdf_object());
        self.embedded_fonts.insert(font, id);
        id
    }

    /// Write a page's buffered operators and font resources into its dictionary
    fn finalize_page(&mut self, page: usize) -> Result<()> {
        let page_id = self.page_id(page)?;
        let mut page_dict = self
            .inner
            .get_object(page_id)?
            .as_dict()
            .map_err(|_| PdfError::ParseError(format!("page {page} is not a dictionary")))?
            .clone();

        let fonts: Vec<(StandardFont, String)> = self
            .page_font_resources
            .get(&page)
            .map(|fonts| fonts.iter().map(|(f, name)| (*f, name.clone())).collect())
            .unwrap_or_default();
        if !fonts.is_empty() {
            let mut resources = page_dict
                .get(b"Resources")
                .and_then(Object::as_dict)
                .cloned()
                .unwrap_or_default();
            let mut font_dict = resources
                .get(b"Font")
                .and_then(Object::as_dict)
                .cloned()
                .unwrap_or_default();
            for (font, name) in fonts {
                let font_id = self.font_object(font);
                font_dict.set(name.as_bytes(), Object::Reference(font_id));
            }
            resources.set("Font", Object::Dictionary(font_dict));
            page_dict.set("Resources", Object::Dictionary(resources));
        }

        if let Some(ops) = self.page_content_buffer.remove(&page).filter(|ops| !ops.is_empty()) {
            let mut content = match page_dict.get(b"Contents") {
                Ok(Object::Reference(id)) => match self.inner.get_object(*id) {
                    Ok(Object::Stream(stream)) => stream.content.clone(),
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            };
            content.extend_from_slice(&ops);
            let stream_id = self
                .inner
                .add_object(Stream::new(Dictionary::new(), content));
            page_dict.set("Contents", Object::Reference(stream_id));
        }

        self.inner.objects.insert(page_id, Object::Dictionary(page_dict));
        Ok(())
    }

    /// Look up the object ID of a page (1-indexed)
    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.inner.get_pages();
        pages
            .get(&(page as u32))
            .copied()
            .ok_or(PdfError::InvalidPage(page, pages.len()))
    }

    /// Queue content operators for a page until serialization
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_one_page() {
        let doc = PdfDocument::new(PageSize::A4).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.page_size(), PageSize::A4);
        assert!(doc.current_font().is_none());
    }

    #[test]
    fn test_page_size_validation() {
        assert!(PageSize::new(100.0, 200.0).is_ok());
        assert!(matches!(
            PageSize::new(0.0, 200.0),
            Err(PdfError::InvalidPageSize(_, _))
        ));
        assert!(PageSize::new(f64::NAN, 200.0).is_err());
        assert!(PdfDocument::new(PageSize {
            width: -1.0,
            height: 10.0
        })
        .is_err());
    }

    #[test]
    fn test_insert_text_requires_font() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        let result = doc.insert_text("Hello", 1, 10.0, 10.0);
        assert!(matches!(result, Err(PdfError::FontNotSet)));
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        doc.set_font(StandardFont::COURIER_BOLD, 12.0);
        assert!(matches!(
            doc.insert_text("Hello", 0, 10.0, 10.0),
            Err(PdfError::InvalidPage(0, 1))
        ));
        assert!(matches!(
            doc.insert_text("Hello", 2, 10.0, 10.0),
            Err(PdfError::InvalidPage(2, 1))
        ));
    }

    #[test]
    fn test_insert_empty_text_is_noop() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        doc.insert_text("", 1, 10.0, 10.0).unwrap();
        assert!(doc.page_content_buffer.is_empty());
        assert!(doc.page_font_resources.is_empty());
    }

    #[test]
    fn test_font_ref_reused_per_page() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        let first = doc.get_or_create_font_ref(StandardFont::COURIER_BOLD, 1);
        let second = doc.get_or_create_font_ref(StandardFont::COURIER_BOLD, 1);
        let other = doc.get_or_create_font_ref(StandardFont::COURIER, 1);
        assert_eq!(first, "F1");
        assert_eq!(second, "F1");
        assert_eq!(other, "F2");
    }

    #[test]
    fn test_text_width() {
        let mut doc = PdfDocument::new(PageSize::A4).unwrap();
        assert!(doc.text_width("abc").is_err());
        doc.set_font(StandardFont::COURIER_BOLD, 10.0);
        assert_eq!(doc.text_width("abc").unwrap(), 18.0);
    }
}
