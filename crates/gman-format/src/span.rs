//! Tag kinds, spans and the per-pass annotation result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Semantic category of a tagged range.
///
/// Kinds are not exclusive: the same characters may carry several of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagKind {
    Header,
    Command,
    Option,
    Argument,
    Bold,
    FilePath,
    Url,
    ManReference,
}

impl TagKind {
    /// Every kind, in the order the classifier applies its rules.
    pub const ALL: [TagKind; 8] = [
        TagKind::Header,
        TagKind::Command,
        TagKind::Option,
        TagKind::Argument,
        TagKind::Bold,
        TagKind::FilePath,
        TagKind::Url,
        TagKind::ManReference,
    ];

    /// Tag-table name, as registered on the rendering surface.
    pub fn name(self) -> &'static str {
        match self {
            TagKind::Header => "header",
            TagKind::Command => "command",
            TagKind::Option => "option",
            TagKind::Argument => "argument",
            TagKind::Bold => "bold",
            TagKind::FilePath => "filePath",
            TagKind::Url => "url",
            TagKind::ManReference => "manReference",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag kind: {0}")]
pub struct UnknownTagKind(pub String);

impl FromStr for TagKind {
    type Err = UnknownTagKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TagKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTagKind(wanted.to_string()))
    }
}

/// A half-open `[start, end)` range of the document tagged with one kind.
///
/// Offsets are UTF-8 byte offsets into the whole document and always fall
/// on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub kind: TagKind,
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(kind: TagKind, start: usize, end: usize) -> Self {
        debug_assert!(start < end, "Span start must be < end");
        Self { kind, start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The tagged slice of `document`.
    pub fn text<'a>(&self, document: &'a str) -> &'a str {
        &document[self.range()]
    }
}

/// Output of one manual-page classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// Spans in emission order. Later kinds on a line override earlier ones
    /// when painted in this order.
    pub spans: Vec<Span>,
    /// `(start, end)` of each cross-reference span mapped to the page name,
    /// section number stripped.
    pub references: BTreeMap<(usize, usize), String>,
}

impl Annotations {
    pub fn spans_of(&self, kind: TagKind) -> impl Iterator<Item = &Span> + '_ {
        self.spans.iter().filter(move |span| span.kind == kind)
    }

    /// Page name of the cross-reference covering `offset`, if any.
    pub fn reference_at(&self, offset: usize) -> Option<&str> {
        self.references
            .range(..=(offset, usize::MAX))
            .rev()
            .find(|((start, end), _)| *start <= offset && offset < *end)
            .map(|(_, name)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty() && self.references.is_empty()
    }
}
