//! Render configuration

use crate::{FillError, Result};
use pdf_core::{PageSize, StandardFont};
use serde::{Deserialize, Serialize};

/// Page size of the rendered overlay
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
    /// Width and height in points
    Custom { width: f64, height: f64 },
}

impl PageFormat {
    pub fn page_size(self) -> Result<PageSize> {
        let size = match self {
            PageFormat::A4 => PageSize::A4,
            PageFormat::Letter => PageSize::LETTER,
            PageFormat::Custom { width, height } => PageSize::new(width, height)?,
        };
        Ok(size)
    }
}

/// Options controlling how pages are rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub page_size: PageFormat,

    /// Standard Courier base font name
    #[serde(default = "default_font")]
    pub font: String,

    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_font() -> String {
    StandardFont::COURIER_BOLD.base_font_name().to_string()
}

fn default_font_size() -> f32 {
    12.0
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageFormat::default(),
            font: default_font(),
            font_size: default_font_size(),
        }
    }
}

impl RenderOptions {
    /// Parse and validate options from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn page_size(&self) -> Result<PageSize> {
        self.page_size.page_size()
    }

    pub fn standard_font(&self) -> Result<StandardFont> {
        Ok(StandardFont::from_base_font_name(&self.font)?)
    }

    /// Check the page size, font and font size are usable
    pub fn validate(&self) -> Result<()> {
        self.page_size()?;
        self.standard_font()?;
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(FillError::InvalidOptions(format!(
                "font size {} must be positive",
                self.font_size
            )));
        }
        Ok(())
    }
}
