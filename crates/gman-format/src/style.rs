//! Default visual style for each tag kind.
//!
//! The rendering surface owns painting; this table only says what each
//! kind should look like.

use crate::span::TagKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagStyle {
    pub name: &'static str,
    pub foreground: Option<&'static str>,
    pub background: Option<&'static str>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Font scale relative to the surrounding text.
    pub scale: f64,
}

impl TagStyle {
    const fn plain(name: &'static str) -> Self {
        Self {
            name,
            foreground: None,
            background: None,
            bold: false,
            italic: false,
            underline: false,
            scale: 1.0,
        }
    }
}

const BLUE: &str = "#2E86AB";
const PURPLE: &str = "#A23B72";
const ORANGE: &str = "#F18F01";
const RED: &str = "#C73E1D";
const TEAL: &str = "#06A77D";
const LINK_BLUE: &str = "#0077CC";

impl TagKind {
    pub fn default_style(self) -> TagStyle {
        let base = TagStyle::plain(self.name());
        match self {
            TagKind::Header => TagStyle {
                foreground: Some(BLUE),
                bold: true,
                scale: 1.3,
                ..base
            },
            TagKind::Command => TagStyle {
                foreground: Some(PURPLE),
                bold: true,
                ..base
            },
            TagKind::Option => TagStyle {
                foreground: Some(ORANGE),
                bold: true,
                ..base
            },
            TagKind::Argument => TagStyle {
                foreground: Some(RED),
                italic: true,
                ..base
            },
            TagKind::Bold => TagStyle { bold: true, ..base },
            TagKind::FilePath => TagStyle {
                foreground: Some(TEAL),
                underline: true,
                ..base
            },
            TagKind::Url | TagKind::ManReference => TagStyle {
                foreground: Some(LINK_BLUE),
                underline: true,
                ..base
            },
        }
    }
}

/// The full style table, one entry per kind in rule order.
pub fn default_styles() -> Vec<(TagKind, TagStyle)> {
    TagKind::ALL
        .into_iter()
        .map(|kind| (kind, kind.default_style()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_kind() {
        let styles = default_styles();
        assert_eq!(styles.len(), TagKind::ALL.len());
        for (kind, style) in &styles {
            assert_eq!(style.name, kind.name());
        }
    }

    #[test]
    fn header_is_scaled_bold_blue() {
        let style = TagKind::Header.default_style();
        assert_eq!(style.foreground, Some("#2E86AB"));
        assert!(style.bold);
        assert_eq!(style.scale, 1.3);
    }

    #[test]
    fn argument_is_italic_not_bold() {
        let style = TagKind::Argument.default_style();
        assert!(style.italic);
        assert!(!style.bold);
    }

    #[test]
    fn links_share_colour_and_underline() {
        let url = TagKind::Url.default_style();
        let man = TagKind::ManReference.default_style();
        assert_eq!(url.foreground, man.foreground);
        assert!(url.underline && man.underline);
    }

    #[test]
    fn bold_has_no_colour() {
        let style = TagKind::Bold.default_style();
        assert!(style.bold);
        assert_eq!(style.foreground, None);
        assert_eq!(style.scale, 1.0);
    }
}
