//! Pango markup renderer.
//!
//! Spans may overlap (an option inside a header line, a path inside a
//! URL), but markup must nest. The text is cut at every span boundary and
//! each piece gets one `<span>` merging the styles of all kinds covering
//! it. Kinds later in `TagKind::ALL` win the colour, as later tags do in a
//! GTK tag table.

use crate::render::Renderer;
use gman_format::{Annotations, TagKind, TagStyle};

pub struct PangoRenderer;

impl Renderer for PangoRenderer {
    fn render(&self, text: &str, annotations: &Annotations) -> String {
        // (offset, kind index, +1 at start / -1 at end), swept in offset order
        let mut events: Vec<(usize, usize, i32)> = annotations
            .spans
            .iter()
            .flat_map(|s| [(s.start, s.kind as usize, 1), (s.end, s.kind as usize, -1)])
            .collect();
        events.sort_unstable_by_key(|&(offset, _, _)| offset);

        let mut active = [0i32; TagKind::ALL.len()];
        let mut next = 0;
        let mut start = 0;
        let mut out = String::with_capacity(text.len() * 2);
        while start < text.len() {
            while let Some(&(offset, kind, delta)) = events.get(next) {
                if offset > start {
                    break;
                }
                active[kind] += delta;
                next += 1;
            }
            let end = events.get(next).map_or(text.len(), |e| e.0.min(text.len()));

            let covering: Vec<TagKind> = TagKind::ALL
                .into_iter()
                .filter(|kind| active[*kind as usize] > 0)
                .collect();
            let body = escape(&text[start..end]);
            match attributes(&covering) {
                Some(attrs) => out.push_str(&format!("<span{}>{}</span>", attrs, body)),
                None => out.push_str(&body),
            }
            start = end;
        }
        out
    }

    fn file_extension(&self) -> &str {
        "pango"
    }
}

fn attributes(kinds: &[TagKind]) -> Option<String> {
    if kinds.is_empty() {
        return None;
    }
    let styles: Vec<TagStyle> = kinds.iter().map(|k| k.default_style()).collect();
    let mut attrs = String::new();
    if let Some(fg) = styles.iter().rev().find_map(|s| s.foreground) {
        attrs.push_str(&format!(" foreground='{}'", fg));
    }
    if let Some(bg) = styles.iter().rev().find_map(|s| s.background) {
        attrs.push_str(&format!(" background='{}'", bg));
    }
    if styles.iter().any(|s| s.bold) {
        attrs.push_str(" weight='bold'");
    }
    if styles.iter().any(|s| s.italic) {
        attrs.push_str(" style='italic'");
    }
    if styles.iter().any(|s| s.underline) {
        attrs.push_str(" underline='single'");
    }
    let scale = styles.iter().map(|s| s.scale).fold(1.0, f64::max);
    if scale > 1.0 {
        attrs.push_str(&format!(" font_scale='{}'", scale));
    }
    Some(attrs)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
