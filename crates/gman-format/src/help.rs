//! `--help` output classifier, used when a program has no manual page.
//!
//! A reduced rule set with no section tracking and no cross-references.

use crate::span::{Span, TagKind};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Application name used for the `~/.config/<app>` path hint.
pub const APP_NAME: &str = "gman";

const INDENT: &str = "    ";

static RE_KEY_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+([+\-]|Enter|Return|Letters)\s+(key|-)\s").unwrap()
});

static RE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(/[^\s]+|~/[^\s]+)").unwrap());

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s]+").unwrap());

/// Classify `--help` output using the default application name.
pub fn classify_help(text: &str) -> Vec<Span> {
    classify_help_for(text, APP_NAME)
}

/// Classify `--help` output; `app` names the `~/.config/<app>` directory
/// whose mention turns on path highlighting for a line.
pub fn classify_help_for(text: &str, app: &str) -> Vec<Span> {
    let config_dir = format!("~/.config/{app}");
    let mut spans = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let offset = line_start;
        line_start += line.len() + 1;

        if line.trim().is_empty() {
            continue;
        }

        if is_help_header(line) {
            spans.push(Span::new(TagKind::Header, offset, offset + line.len()));
            continue;
        }

        if line.starts_with(INDENT) {
            if let Some(m) = RE_KEY_HINT.find(line) {
                spans.push(Span::new(TagKind::Option, offset + m.start(), offset + m.end()));
                continue;
            }
        }

        if line.contains(&config_dir) || line.contains("/home/") {
            spans.extend(
                RE_PATH
                    .find_iter(line)
                    .map(|m| Span::new(TagKind::FilePath, offset + m.start(), offset + m.end())),
            );
        }

        if line.contains("http://") || line.contains("https://") {
            spans.extend(
                RE_URL
                    .find_iter(line)
                    .map(|m| Span::new(TagKind::Url, offset + m.start(), offset + m.end())),
            );
        }
    }

    debug!(spans = spans.len(), "classified help text");
    spans
}

/// Unindented line with nothing left to upper-case.
fn is_help_header(line: &str) -> bool {
    !line.starts_with(INDENT) && !line.starts_with('\t') && line.chars().all(upper_is_same)
}

/// True when upper-casing leaves `c` alone. Chars whose upper case is
/// several chars (`ß` to `SS`) have no single-char form and stay as they are.
fn upper_is_same(c: char) -> bool {
    let mut upper = c.to_uppercase();
    upper.len() != 1 || upper.next() == Some(c)
}
