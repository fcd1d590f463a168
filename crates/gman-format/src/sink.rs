//! Rendering-surface abstraction.
//!
//! A [`TextSink`] exposes the text being shown and accepts tag
//! applications by byte range. The classifiers never touch the text; they
//! only tell the sink where each kind applies.

use crate::help::classify_help;
use crate::manpage::classify;
use crate::span::TagKind;
use std::collections::BTreeMap;

pub trait TextSink {
    fn text(&self) -> &str;
    fn apply_tag(&mut self, kind: TagKind, start: usize, end: usize);
}

/// Classify the sink's text as a manual page and apply every span in
/// emission order. Returns the cross-reference map for click handling.
pub fn format_man_page<S: TextSink + ?Sized>(
    sink: &mut S,
    program: &str,
) -> BTreeMap<(usize, usize), String> {
    let annotations = classify(sink.text(), program);
    for span in &annotations.spans {
        sink.apply_tag(span.kind, span.start, span.end);
    }
    annotations.references
}

/// Classify the sink's text as `--help` output and apply the spans.
pub fn format_help_text<S: TextSink + ?Sized>(sink: &mut S) {
    for span in classify_help(sink.text()) {
        sink.apply_tag(span.kind, span.start, span.end);
    }
}

/// Sink that owns its text and records applied tags in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    text: String,
    applied: Vec<(TagKind, usize, usize)>,
}

impl RecordingSink {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            applied: Vec::new(),
        }
    }

    pub fn applied(&self) -> &[(TagKind, usize, usize)] {
        &self.applied
    }

    pub fn has_tag(&self, kind: TagKind, start: usize, end: usize) -> bool {
        self.applied.contains(&(kind, start, end))
    }

    pub fn positions(&self, kind: TagKind) -> Vec<(usize, usize)> {
        self.applied
            .iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, start, end)| (*start, *end))
            .collect()
    }

    /// Text under each tag of `kind`, in application order.
    pub fn tagged_text(&self, kind: TagKind) -> Vec<&str> {
        self.positions(kind)
            .into_iter()
            .map(|(start, end)| &self.text[start..end])
            .collect()
    }
}

impl TextSink for RecordingSink {
    fn text(&self) -> &str {
        &self.text
    }

    fn apply_tag(&mut self, kind: TagKind, start: usize, end: usize) {
        self.applied.push((kind, start, end));
    }
}
