//! Line-level matchers used by the manual-page classifier.
//!
//! The `regex` crate has no lookaround, so each rule is an anchored pattern
//! tried at a candidate position plus explicit predicates over the
//! characters around it. All ranges returned here are relative to the line.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

// Running header/footer, e.g. `LS(1)   User Commands   LS(1)`
static RE_RUNNING_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+\(\d+\).*\S+\(\d+\)\s*$").unwrap());

static RE_FIRST_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\S+)").unwrap());

// `-x`, `-arj`, `-?`; also swallows `--long` forms made only of ASCII
static RE_SHORT_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[-a-zA-Z0-9?]+").unwrap());

// `--long-name`, allowing the U+2010 hyphen groff emits
static RE_LONG_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--[a-zA-Z][-a-zA-Z0-9\x{2010}]*").unwrap());

// `=value` or `=[a|b|c]`; a bracket group without `=` is not a value
static RE_OPTION_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:=\[[^\]]+\]|=[^\s,\[\]]+)").unwrap());

static RE_ARG_ANGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<[A-Z_][A-Z_0-9]*>").unwrap());

static RE_ARG_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z_0-9]+").unwrap());

static RE_ARG_SNAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*[_\-][a-z0-9_\-:<>\[\]]*").unwrap());

static RE_ARG_OPTION_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9\-:<>\[\]]*").unwrap());

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<>\[\]]+").unwrap());

static RE_FILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(~?/[/\w\-\.]+)").unwrap());

static RE_MAN_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z0-9_\-\.]+)\(\d+\)").unwrap());

static RE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{P}$").unwrap());

// -- Section-level predicates -------------------------------------------------

/// An uppercase letter followed only by uppercase letters and whitespace.
///
/// A lone letter such as `A` counts. That departs from the classic
/// `^[A-Z][A-Z\s]+$` header pattern, which wants at least two chars.
pub(crate) fn is_header(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_whitespace())
}

pub(crate) fn is_running_header(line: &str) -> bool {
    RE_RUNNING_HEADER.is_match(line)
}

/// First run of non-whitespace after any leading whitespace.
pub(crate) fn first_word(line: &str) -> Option<Range<usize>> {
    RE_FIRST_WORD
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.range())
}

/// Non-overlapping occurrences of `word` delimited by whitespace,
/// punctuation or the line ends.
pub(crate) fn whole_word_occurrences(line: &str, word: &str) -> Vec<Range<usize>> {
    if word.is_empty() {
        return Vec::new();
    }
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(idx) = line[from..].find(word) {
        let start = from + idx;
        let end = start + word.len();
        if is_word_boundary(char_before(line, start)) && is_word_boundary(char_at(line, end)) {
            found.push(start..end);
        }
        from = end;
    }
    found
}

fn is_word_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| c.is_whitespace() || is_punctuation(c))
}

/// Unicode general category P (connector, dash, open/close, quote and
/// other punctuation). Math and currency symbols such as `+` `$` `|` are
/// not punctuation.
fn is_punctuation(c: char) -> bool {
    let mut buf = [0u8; 4];
    RE_PUNCTUATION.is_match(c.encode_utf8(&mut buf))
}

// -- Span rules ---------------------------------------------------------------

/// Short and long options with an optional `=value` suffix.
pub(crate) fn options(line: &str) -> Vec<Range<usize>> {
    scan(line, option_at)
}

fn option_at(line: &str, pos: usize) -> Option<usize> {
    let rest = &line[pos..];
    if !rest.starts_with('-') || !option_may_start_after(char_before(line, pos)) {
        return None;
    }
    [&*RE_SHORT_OPTION, &*RE_LONG_OPTION]
        .into_iter()
        .find_map(|re| {
            let body_end = pos + re.find(rest)?.end();
            if let Some(value) = RE_OPTION_VALUE.find(&line[body_end..]) {
                let end = body_end + value.end();
                if option_may_end_before(char_at(line, end)) {
                    return Some(end);
                }
            }
            option_may_end_before(char_at(line, body_end)).then_some(body_end)
        })
}

fn option_may_start_after(prev: Option<char>) -> bool {
    prev.map_or(true, |c| {
        c.is_whitespace() || matches!(c, '[' | '{' | '|' | ',')
    })
}

fn option_may_end_before(next: Option<char>) -> bool {
    next.map_or(true, |c| {
        c.is_whitespace() || matches!(c, ',' | '[' | ']' | '{' | '}' | '|')
    })
}

/// Argument placeholders. At each position the forms are tried in order:
/// `<NAME>`, a bare `UPPER_CASE` run, a lone letter before `, `, a
/// `snake_or-kebab` word, and a lowercase word right after an option.
pub(crate) fn arguments(line: &str) -> Vec<Range<usize>> {
    scan(line, argument_at)
}

fn argument_at(line: &str, pos: usize) -> Option<usize> {
    let rest = &line[pos..];
    let prev = char_before(line, pos);

    if let Some(m) = RE_ARG_ANGLE.find(rest) {
        return Some(pos + m.end());
    }

    if !prev.is_some_and(|c| c.is_ascii_alphabetic()) {
        if let Some(m) = RE_ARG_UPPER.find(rest) {
            // Give back trailing chars until the run is not glued to a letter
            let len = (2..=m.end())
                .rev()
                .find(|&len| !char_at(line, pos + len).is_some_and(|c| c.is_ascii_alphabetic()));
            if let Some(len) = len {
                return Some(pos + len);
            }
        }
    }

    if prev.map_or(true, char::is_whitespace) {
        let mut chars = rest.chars();
        if let (Some('a'..='z'), Some(','), Some(gap)) = (chars.next(), chars.next(), chars.next()) {
            if gap.is_whitespace() {
                return Some(pos + 1);
            }
        }
        if let Some(m) = RE_ARG_SNAKE.find(rest) {
            return Some(pos + m.end());
        }
    }

    if follows_option_word(line, pos) {
        if let Some(m) = RE_ARG_OPTION_VALUE.find(rest) {
            return Some(pos + m.end());
        }
    }

    None
}

/// True when `line[..pos]` ends with `-word ` (one whitespace char).
fn follows_option_word(line: &str, pos: usize) -> bool {
    let before = &line[..pos];
    let Some(gap) = before.chars().next_back() else {
        return false;
    };
    if !gap.is_whitespace() {
        return false;
    }
    let before = &before[..before.len() - gap.len_utf8()];
    let head = before.trim_end_matches(|c: char| c.is_ascii_alphanumeric() || c == '?');
    head.len() < before.len() && head.ends_with('-')
}

pub(crate) fn urls(line: &str) -> Vec<Range<usize>> {
    RE_URL.find_iter(line).map(|m| m.range()).collect()
}

/// `/abs/path` or `~/home/path` at line start or after whitespace. The
/// leading whitespace is not part of the range.
pub(crate) fn file_paths(line: &str) -> Vec<Range<usize>> {
    RE_FILE_PATH
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.range())
        .collect()
}

/// `name(N)` tokens with the bare page name.
pub(crate) fn man_references(line: &str) -> Vec<(Range<usize>, &str)> {
    RE_MAN_REFERENCE
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some((whole.range(), name.as_str()))
        })
        .collect()
}

// -- Helpers ------------------------------------------------------------------

/// Left-to-right, non-overlapping scan: a hit resumes after its end,
/// a miss advances one char.
fn scan(line: &str, at: fn(&str, usize) -> Option<usize>) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos < line.len() {
        match at(line, pos) {
            Some(end) => {
                found.push(pos..end);
                pos = end;
            }
            None => pos += char_at(line, pos).map_or(1, char::len_utf8),
        }
    }
    found
}

fn char_before(line: &str, pos: usize) -> Option<char> {
    line[..pos].chars().next_back()
}

fn char_at(line: &str, pos: usize) -> Option<char> {
    line[pos..].chars().next()
}
