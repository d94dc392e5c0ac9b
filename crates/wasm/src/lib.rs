//! WASM bindings for ct600-fill
//!
//! This crate provides JavaScript-friendly API for:
//! - Loading a CT600 box spec
//! - Listing the form pages a set of values touches
//! - Previewing and rendering page overlays
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { FormFiller } from 'ct600-fill-wasm';
//!
//! await init();
//!
//! const filler = FormFiller.fromSpecJson(specJson);
//! filler.setOptions({ pageSize: "a4", font: "Courier-Bold", fontSize: 12 });
//!
//! const values = { ct600: { "1": "Test Co", "145": 11218.0 } };
//! for (const page of filler.pages(values)) {
//!     const pdf = filler.renderPage(values, page);
//! }
//! ```

use form_fill::{create_annotations, PageRenderer, RenderOptions, Spec, ValueSet};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// CT600 form filler
#[wasm_bindgen]
pub struct FormFiller {
    spec: Spec,
    renderer: PageRenderer,
}

#[wasm_bindgen]
impl FormFiller {
    /// Create a filler from spec JSON
    ///
    /// @param json - Spec JSON string, an array of `[box, operator, page, ...args]`
    /// @returns FormFiller instance
    #[wasm_bindgen(js_name = fromSpecJson)]
    pub fn from_spec_json(json: &str) -> Result<FormFiller, JsValue> {
        let spec = Spec::from_json(json).map_err(to_js_error)?;
        Ok(FormFiller {
            spec,
            renderer: PageRenderer::default(),
        })
    }

    /// Set render options
    ///
    /// @param options - `{ pageSize, font, fontSize }`, every field optional
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options: RenderOptions = serde_wasm_bindgen::from_value(options)?;
        self.renderer = PageRenderer::new(options).map_err(to_js_error)?;
        Ok(())
    }

    /// Form pages the values draw on
    ///
    /// @param values - `{ ct600: { "<box>": value, ... } }`
    /// @returns Array of page numbers, ascending
    pub fn pages(&self, values: JsValue) -> Result<Vec<u32>, JsValue> {
        let values = parse_values(values)?;
        Ok(create_annotations(&values, &self.spec).pages())
    }

    /// Draw calls for one page
    ///
    /// @param values - `{ ct600: { "<box>": value, ... } }`
    /// @param page - Form page number
    /// @returns Array of `{ x, y, text }`, positions in points
    pub fn preview(&self, values: JsValue, page: u32) -> Result<JsValue, JsValue> {
        let values = parse_values(values)?;
        let annotations = create_annotations(&values, &self.spec);
        let calls = self
            .renderer
            .preview(&annotations, page)
            .map_err(to_js_error)?;

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        Ok(calls.serialize(&serializer)?)
    }

    /// Render one page overlay
    ///
    /// @param values - `{ ct600: { "<box>": value, ... } }`
    /// @param page - Form page number
    /// @returns PDF bytes (Uint8Array)
    #[wasm_bindgen(js_name = renderPage)]
    pub fn render_page(&self, values: JsValue, page: u32) -> Result<Vec<u8>, JsValue> {
        let values = parse_values(values)?;
        let annotations = create_annotations(&values, &self.spec);
        self.renderer
            .render_page(&annotations, page)
            .map_err(to_js_error)
    }

    /// Number of boxes in the spec
    #[wasm_bindgen(js_name = boxCount)]
    pub fn box_count(&self) -> usize {
        self.spec.len()
    }
}

fn parse_values(values: JsValue) -> Result<ValueSet, JsValue> {
    let document: serde_json::Value = serde_wasm_bindgen::from_value(values)?;
    ValueSet::from_value(&document).map_err(to_js_error)
}
