//! JSON renderer: spans and cross-references for tooling.

use crate::render::Renderer;
use gman_format::{Annotations, TagKind};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct Output<'a> {
    spans: Vec<SpanOut<'a>>,
    references: Vec<ReferenceOut<'a>>,
}

#[derive(Serialize)]
struct SpanOut<'a> {
    kind: TagKind,
    start: usize,
    end: usize,
    text: &'a str,
}

#[derive(Serialize)]
struct ReferenceOut<'a> {
    start: usize,
    end: usize,
    name: &'a str,
}

impl Renderer for JsonRenderer {
    fn render(&self, text: &str, annotations: &Annotations) -> String {
        let output = Output {
            spans: annotations
                .spans
                .iter()
                .map(|span| SpanOut {
                    kind: span.kind,
                    start: span.start,
                    end: span.end,
                    text: span.text(text),
                })
                .collect(),
            references: annotations
                .references
                .iter()
                .map(|(&(start, end), name)| ReferenceOut {
                    start,
                    end,
                    name,
                })
                .collect(),
        };
        // Only strings and integers; serialization cannot fail
        let mut out = serde_json::to_string_pretty(&output).unwrap_or_default();
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gman_format::classify;
    use serde_json::Value;

    #[test]
    fn spans_carry_kind_and_text() {
        let text = "NAME\nls - list\n";
        let out = JsonRenderer.render(text, &classify(text, "ls"));
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["spans"][0]["kind"], "header");
        assert_eq!(value["spans"][0]["text"], "NAME");
        assert_eq!(value["spans"][1]["kind"], "command");
        assert_eq!(value["spans"][1]["start"], 5);
        assert_eq!(value["references"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn references_listed() {
        let text = "see grep(1)\n";
        let out = JsonRenderer.render(text, &classify(text, "ls"));
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["references"][0]["name"], "grep");
        assert_eq!(value["references"][0]["start"], 4);
        assert_eq!(value["references"][0]["end"], 11);
        assert_eq!(value["spans"][0]["kind"], "manReference");
    }
}
