//! gman-format: text annotation for the gman manual-page viewer.
//!
//! Turns raw `man` output or `--help` text into a flat list of tagged
//! spans (headers, commands, options, arguments, paths, URLs and
//! cross-references to other manual pages), and provides the type-ahead
//! matcher used for keyboard search in program lists.
//!
//! Nothing here performs I/O. Callers hand in already-resolved text and
//! apply the resulting spans to whatever surface they render on.

pub mod help;
pub mod manpage;
pub mod sink;
pub mod span;
pub mod style;
pub mod typeahead;

mod rules;

pub use help::{classify_help, classify_help_for};
pub use manpage::{classify, classify_with, ReferenceScope};
pub use sink::{format_help_text, format_man_page, RecordingSink, TextSink};
pub use span::{Annotations, Span, TagKind, UnknownTagKind};
pub use style::{default_styles, TagStyle};
pub use typeahead::TypeAheadNavigator;
