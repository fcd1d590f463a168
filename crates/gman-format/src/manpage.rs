//! Manual-page classifier: single pass, line by line.
//!
//! Each line first goes through one of three exclusive branches (section
//! header, lead word of a NAME/SYNOPSIS entry, inline mention of the
//! subject program), then through the option, argument, URL, file-path and
//! cross-reference rules, which run on every line. Spans are emitted in
//! exactly that order and never merged.

use crate::rules;
use crate::span::{Annotations, Span, TagKind};
use std::ops::Range;
use tracing::debug;

/// Where `name(N)` cross-references are picked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceScope {
    /// Anywhere in the page.
    #[default]
    Document,
    /// Only inside the SEE ALSO section.
    SeeAlso,
}

/// Section flags, recomputed at every header line.
#[derive(Debug, Default)]
struct SectionState {
    in_name: bool,
    in_synopsis: bool,
    in_see_also: bool,
}

impl SectionState {
    fn enter(&mut self, header: &str) {
        let title = header.trim();
        *self = SectionState {
            in_name: title == "NAME",
            in_synopsis: title == "SYNOPSIS",
            in_see_also: title == "SEE ALSO",
        };
    }

    fn highlights_lead_word(&self) -> bool {
        self.in_name || self.in_synopsis
    }
}

struct Pass<'a> {
    subject: &'a str,
    scope: ReferenceScope,
    sections: SectionState,
    out: Annotations,
}

impl Pass<'_> {
    fn push(&mut self, kind: TagKind, line_start: usize, range: Range<usize>) {
        if range.start < range.end {
            self.out
                .spans
                .push(Span::new(kind, line_start + range.start, line_start + range.end));
        }
    }

    fn push_all(&mut self, kind: TagKind, line_start: usize, ranges: Vec<Range<usize>>) {
        for range in ranges {
            self.push(kind, line_start, range);
        }
    }

    fn process_line(&mut self, line: &str, line_start: usize) {
        if rules::is_header(line) {
            self.push(TagKind::Header, line_start, 0..line.len());
            self.sections.enter(line);
        } else if self.sections.highlights_lead_word() && !line.trim().is_empty() {
            if let Some(word) = rules::first_word(line) {
                self.push(TagKind::Command, line_start, word);
            }
        } else if !self.subject.is_empty()
            && line.contains(self.subject)
            && !rules::is_running_header(line)
        {
            let found = rules::whole_word_occurrences(line, self.subject);
            self.push_all(TagKind::Command, line_start, found);
        }

        self.push_all(TagKind::Option, line_start, rules::options(line));
        self.push_all(TagKind::Argument, line_start, rules::arguments(line));
        self.push_all(TagKind::Url, line_start, rules::urls(line));
        self.push_all(TagKind::FilePath, line_start, rules::file_paths(line));

        if self.scope == ReferenceScope::SeeAlso && !self.sections.in_see_also {
            return;
        }
        for (range, name) in rules::man_references(line) {
            let key = (line_start + range.start, line_start + range.end);
            self.push(TagKind::ManReference, line_start, range);
            self.out.references.insert(key, name.to_string());
        }
    }
}

/// Classify a manual page, picking up cross-references anywhere.
///
/// `subject` is the program the page documents; whole-word mentions of it
/// are tagged as commands. An empty subject disables that rule.
pub fn classify(text: &str, subject: &str) -> Annotations {
    classify_with(text, subject, ReferenceScope::Document)
}

/// Classify a manual page with an explicit cross-reference scope.
pub fn classify_with(text: &str, subject: &str, scope: ReferenceScope) -> Annotations {
    let mut pass = Pass {
        subject,
        scope,
        sections: SectionState::default(),
        out: Annotations::default(),
    };

    let mut line_start = 0;
    let mut lines = 0usize;
    for line in text.split('\n') {
        pass.process_line(line, line_start);
        line_start += line.len() + 1;
        lines += 1;
    }

    debug!(
        lines,
        spans = pass.out.spans.len(),
        references = pass.out.references.len(),
        "classified manual page"
    );
    pass.out
}
