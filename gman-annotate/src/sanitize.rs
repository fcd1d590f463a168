//! Input clean-up for raw `man` output.
//!
//! Formatters emit bold and underline as backspace overstrike (`X\bX`,
//! `_\bX`) and some pagers add ANSI escape sequences. The classifier
//! wants plain text, so both are collapsed before it runs.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// CSI sequences (`ESC [ ... final`) and two-char escapes (`ESC x`).
static RE_ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|[@-Z\\-_])").unwrap());

/// Remove overstrike, escape sequences and C0 controls other than
/// newline and tab. Text without any of those is returned borrowed.
pub fn clean(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_stripped_control) {
        return Cow::Borrowed(input);
    }

    let without_escapes = RE_ANSI.replace_all(input, "");
    let mut out = String::with_capacity(without_escapes.len());
    for c in without_escapes.chars() {
        match c {
            // Overstrike: the char after the backspace replaces the one before it
            '\u{8}' => {
                out.pop();
            }
            c if is_stripped_control(c) => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn is_stripped_control(c: char) -> bool {
    (c.is_ascii_control() && c != '\n' && c != '\t') || c == '\u{9b}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        let text = "NAME\n\tls - list\n";
        assert!(matches!(clean(text), Cow::Borrowed(_)));
    }

    #[test]
    fn bold_overstrike() {
        assert_eq!(clean("N\u{8}NA\u{8}AM\u{8}ME\u{8}E"), "NAME");
    }

    #[test]
    fn underline_overstrike() {
        assert_eq!(clean("_\u{8}f_\u{8}i_\u{8}l_\u{8}e"), "file");
    }

    #[test]
    fn ansi_sequences() {
        assert_eq!(clean("\x1b[1mls\x1b[0m - list"), "ls - list");
        assert_eq!(clean("\x1b[4;31mpath\x1b[24m"), "path");
    }

    #[test]
    fn other_controls_dropped_but_layout_kept() {
        assert_eq!(clean("a\x07b\r\n\tc\x0c"), "ab\n\tc");
    }

    #[test]
    fn leading_backspace_is_harmless() {
        assert_eq!(clean("\u{8}x"), "x");
    }
}
