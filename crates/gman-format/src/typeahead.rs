//! Type-ahead navigation for program lists.
//!
//! Keeps a short lower-cased buffer of recent keystrokes and finds the
//! first item that starts with it. Expiry of the buffer after a period of
//! inactivity is scheduled by the caller, which then calls [`reset`].
//!
//! [`reset`]: TypeAheadNavigator::reset

/// Longest buffer kept, in chars. Older keystrokes fall off the front.
pub const MAX_BUFFER_LEN: usize = 10;

const STATUS_PREFIX: &str = "Type-ahead: ";
const TIMEOUT_NOTICE: &str = "\u{23f1} Type-ahead timeout - cleared";

#[derive(Debug, Clone, Default)]
pub struct TypeAheadNavigator {
    buffer: String,
}

impl TypeAheadNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_active(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Append a keystroke, lower-cased, evicting from the front past
    /// [`MAX_BUFFER_LEN`].
    pub fn append(&mut self, c: char) {
        self.buffer.extend(c.to_lowercase());
        let len = self.buffer.chars().count();
        if len > MAX_BUFFER_LEN {
            let cut = self
                .buffer
                .char_indices()
                .nth(len - MAX_BUFFER_LEN)
                .map_or(0, |(idx, _)| idx);
            self.buffer.drain(..cut);
        }
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Index of the first item whose lower-cased text starts with the
    /// buffer. Empty items never match but still count toward the index.
    pub fn find_match<I, S>(&self, items: I) -> Option<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.buffer.is_empty() {
            return None;
        }
        items
            .into_iter()
            .position(|item| self.matches(item.as_ref()))
    }

    /// Like [`find_match`](Self::find_match), reading each item's text
    /// through `text`. Items for which it returns `None` are skipped.
    pub fn find_match_by<T, F>(&self, items: &[T], text: F) -> Option<usize>
    where
        F: Fn(&T) -> Option<&str>,
    {
        if self.buffer.is_empty() {
            return None;
        }
        items
            .iter()
            .position(|item| text(item).is_some_and(|t| self.matches(t)))
    }

    fn matches(&self, item: &str) -> bool {
        !item.is_empty() && item.to_lowercase().starts_with(&self.buffer)
    }

    /// `Type-ahead: <buffer>`, or empty when nothing has been typed.
    pub fn status_message(&self) -> String {
        if self.buffer.is_empty() {
            String::new()
        } else {
            format!("{STATUS_PREFIX}{}", self.buffer)
        }
    }

    /// Notice shown when the caller's inactivity timer clears the buffer.
    pub fn timeout_message(&self) -> &'static str {
        TIMEOUT_NOTICE
    }

    /// [`timeout_message`](Self::timeout_message) as Pango markup.
    pub fn timeout_markup(&self) -> String {
        format!("<span foreground='orange' weight='bold'>{TIMEOUT_NOTICE}</span>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> TypeAheadNavigator {
        let mut nav = TypeAheadNavigator::new();
        keys.chars().for_each(|c| nav.append(c));
        nav
    }

    #[test]
    fn starts_empty() {
        let nav = TypeAheadNavigator::new();
        assert_eq!(nav.buffer(), "");
        assert!(!nav.is_active());
    }

    #[test]
    fn append_lowercases() {
        let nav = typed("AB");
        assert_eq!(nav.buffer(), "ab");
        assert!(nav.is_active());
    }

    #[test]
    fn keeps_last_ten_chars() {
        let nav = typed("abcdefghijklmno");
        assert_eq!(nav.buffer(), "fghijklmno");
        let nav = typed("AAAAAAAAAAAAAAA");
        assert_eq!(nav.buffer(), "aaaaaaaaaa");
    }

    #[test]
    fn eviction_counts_chars_not_bytes() {
        let nav = typed("\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}\u{e9}x");
        assert_eq!(nav.buffer().chars().count(), MAX_BUFFER_LEN);
        assert!(nav.buffer().ends_with('x'));
    }

    #[test]
    fn reset_clears() {
        let mut nav = typed("ab");
        nav.reset();
        assert_eq!(nav.buffer(), "");
        assert!(!nav.is_active());
        assert_eq!(nav.find_match(["apple", "banana"]), None);
    }

    #[test]
    fn empty_buffer_never_matches() {
        let nav = TypeAheadNavigator::new();
        assert_eq!(nav.find_match(["apple", "banana", "cherry"]), None);
    }

    #[test]
    fn first_match_wins() {
        let nav = typed("a");
        assert_eq!(nav.find_match(["apple", "apricot", "banana"]), Some(0));
        let nav = typed("gr");
        assert_eq!(nav.find_match(["grep", "groff", "gunzip", "gzip"]), Some(0));
    }

    #[test]
    fn matching_ignores_item_case() {
        let nav = typed("b");
        assert_eq!(nav.find_match(vec!["Apple".to_string(), "Banana".to_string()]), Some(1));
    }

    #[test]
    fn no_match() {
        let nav = typed("z");
        assert_eq!(nav.find_match(["apple", "banana", "cherry"]), None);
    }

    #[test]
    fn empty_items_are_skipped_but_counted() {
        let nav = typed("a");
        assert_eq!(nav.find_match(["", "apple", "banana"]), Some(1));
    }

    #[test]
    fn selector_skips_absent_text() {
        let nav = typed("a");
        let items = [None, Some("apple")];
        assert_eq!(nav.find_match_by(&items, |item| *item), Some(1));

        let nav = typed("l");
        let programs = [(1, "grep"), (2, "ls"), (3, "cat")];
        assert_eq!(nav.find_match_by(&programs, |(_, name)| Some(*name)), Some(1));
    }

    #[test]
    fn status_message_tracks_buffer() {
        assert_eq!(TypeAheadNavigator::new().status_message(), "");
        assert_eq!(typed("gr").status_message(), "Type-ahead: gr");
    }

    #[test]
    fn timeout_notices() {
        let nav = TypeAheadNavigator::new();
        assert!(nav.timeout_message().contains("Type-ahead timeout"));
        let markup = nav.timeout_markup();
        assert!(markup.starts_with("<span"));
        assert!(markup.contains(nav.timeout_message()));
    }

    #[test]
    fn typing_toward_a_program() {
        let programs = ["cat", "grep", "groff", "ls", "man"];
        let mut nav = TypeAheadNavigator::new();
        for (key, status) in [('g', "Type-ahead: g"), ('r', "Type-ahead: gr"), ('e', "Type-ahead: gre")] {
            nav.append(key);
            assert_eq!(nav.status_message(), status);
            assert_eq!(nav.find_match(programs), Some(1));
        }
        nav.reset();
        assert!(!nav.is_active());
    }

    #[test]
    fn stale_prefix_blocks_matches() {
        let programs = ["cat", "grep", "ls"];
        let mut nav = typed("x");
        assert_eq!(nav.find_match(programs), None);
        "grep".chars().for_each(|c| nav.append(c));
        assert_eq!(nav.buffer(), "xgrep");
        assert_eq!(nav.find_match(programs), None);
    }
}
