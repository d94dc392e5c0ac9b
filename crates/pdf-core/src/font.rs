//! Standard Type1 font handling
//!
//! Only the Courier family is supported. Every Courier glyph has the same
//! advance width, so text metrics need no font program.

use crate::{PdfError, Result};
use lopdf::{Dictionary, Object};

/// Advance width of every Courier glyph, in 1/1000 em
const COURIER_ADVANCE: f32 = 600.0;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// One of the four standard Courier faces every PDF viewer provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StandardFont {
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl StandardFont {
    pub const COURIER: Self = Self::new(FontWeight::Regular, FontStyle::Normal);
    pub const COURIER_BOLD: Self = Self::new(FontWeight::Bold, FontStyle::Normal);
    pub const COURIER_OBLIQUE: Self = Self::new(FontWeight::Regular, FontStyle::Italic);
    pub const COURIER_BOLD_OBLIQUE: Self = Self::new(FontWeight::Bold, FontStyle::Italic);

    pub const fn new(weight: FontWeight, style: FontStyle) -> Self {
        Self { weight, style }
    }

    /// PostScript name used as the `BaseFont` entry
    pub fn base_font_name(&self) -> &'static str {
        match (self.weight, self.style) {
            (FontWeight::Regular, FontStyle::Normal) => "Courier",
            (FontWeight::Bold, FontStyle::Normal) => "Courier-Bold",
            (FontWeight::Regular, FontStyle::Italic) => "Courier-Oblique",
            (FontWeight::Bold, FontStyle::Italic) => "Courier-BoldOblique",
        }
    }

    /// Look a face up by its PostScript name
    pub fn from_base_font_name(name: &str) -> Result<Self> {
        match name {
            "Courier" => Ok(Self::COURIER),
            "Courier-Bold" => Ok(Self::COURIER_BOLD),
            "Courier-Oblique" => Ok(Self::COURIER_OBLIQUE),
            "Courier-BoldOblique" => Ok(Self::COURIER_BOLD_OBLIQUE),
            other => Err(PdfError::UnknownFont(other.to_string())),
        }
    }

    /// Width of `text` in points at `font_size`
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * COURIER_ADVANCE * font_size / 1000.0
    }

    /// Font dictionary for this face, WinAnsi encoded
    pub fn to_pdf_object(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Font".to_vec()));
        dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        dict.set(
            "BaseFont",
            Object::Name(self.base_font_name().as_bytes().to_vec()),
        );
        dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        dict
    }
}
