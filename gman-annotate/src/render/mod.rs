//! Renderer module: trait-based output format dispatch.

pub mod json;
pub mod pango;
pub mod table;

use anyhow::{anyhow, Result};
use gman_format::Annotations;

/// Trait for writing classified text out in a specific format.
pub trait Renderer {
    fn render(&self, text: &str, annotations: &Annotations) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer)),
        "table" | "tsv" => Ok(Box::new(table::TableRenderer)),
        "pango" | "markup" => Ok(Box::new(pango::PangoRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use json, table, or pango",
            format
        )),
    }
}
