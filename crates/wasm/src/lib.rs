//! WASM-compatible wrapper for PPTX export.
//!
//! This crate exposes package building to the browser editor. The editor
//! passes its slide snapshot in and receives the finished file bytes, which
//! it then offers as a download.

use deck_core::{ExportOptions, Slide};
use deck_pptx::{Exporter, MemorySink, Package};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Export settings as sent by the editor. All fields optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub filename: Option<String>,
}

impl ExportRequest {
    fn into_options(self) -> ExportOptions {
        let mut options = ExportOptions::new();
        if let Some(title) = self.title {
            options = options.with_title(title);
        }
        if let Some(author) = self.author {
            options = options.with_author(author);
        }
        if let Some(filename) = self.filename {
            options = options.with_filename(filename);
        }
        options
    }
}

/// A finished presentation handed back to JavaScript.
#[wasm_bindgen]
pub struct ExportedPackage {
    package: Package,
}

#[wasm_bindgen]
impl ExportedPackage {
    /// Suggested download filename.
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.package.filename().to_string()
    }

    /// MIME type for the download blob.
    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        Package::MIME_TYPE.to_string()
    }

    /// The `.pptx` file contents.
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.package.bytes())
    }
}

/// Build a `.pptx` file from the editor's slides.
///
/// # Arguments
/// * `slides` - Array of slide objects from the editor
/// * `options` - Optional `{ title, author, filename }` object
///
/// # Returns
/// An `ExportedPackage`, or throws with a message on error.
#[wasm_bindgen(js_name = exportPptx)]
pub fn export_pptx(slides: JsValue, options: JsValue) -> Result<ExportedPackage, JsValue> {
    let slides: Vec<Slide> = serde_wasm_bindgen::from_value(slides)
        .map_err(|e| JsValue::from_str(&format!("Invalid slides array: {}", e)))?;

    let request = if options.is_undefined() || options.is_null() {
        ExportRequest::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid export options: {}", e)))?
    };

    let package = export_pptx_impl(&slides, request).map_err(|e| JsValue::from_str(&e))?;
    Ok(ExportedPackage { package })
}

fn export_pptx_impl(slides: &[Slide], request: ExportRequest) -> Result<Package, String> {
    let mut exporter = Exporter::new(request.into_options(), MemorySink::new());
    exporter
        .export(slides)
        .map_err(|e| format!("Could not build the presentation: {}", e))?;

    exporter
        .into_sink()
        .take_last()
        .ok_or_else(|| "Export produced no package".to_string())
}
