//! Tab-separated renderer, one row per span, then one per reference.

use crate::render::Renderer;
use gman_format::Annotations;

pub struct TableRenderer;

impl Renderer for TableRenderer {
    fn render(&self, text: &str, annotations: &Annotations) -> String {
        let mut out = String::new();
        for span in &annotations.spans {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                span.kind,
                span.start,
                span.end,
                escape_field(span.text(text))
            ));
        }
        for ((start, end), name) in &annotations.references {
            out.push_str(&format!("reference\t{}\t{}\t{}\n", start, end, name));
        }
        out
    }

    fn file_extension(&self) -> &str {
        "tsv"
    }
}

/// Spans never hold a newline, but a tab or `\r` would still break rows.
fn escape_field(s: &str) -> String {
    s.replace('\t', "\\t").replace('\r', "\\r")
}
