//! Immutable document snapshots, line splitting and offset conversion.
//!
//! Every range produced by the parser is a half-open **UTF-8 byte** range into the
//! [`SourceText`] it was parsed from. Hosts whose text storage counts `char`s or UTF-16 code
//! units can translate through an [`OffsetMap`].

use std::ops::Range;
use std::sync::Arc;
use unicode_segmentation::GraphemeCursor;

/// An immutable snapshot of a document at parse time.
///
/// Cloning is cheap (the text is reference counted). Ranges into a snapshot are invalidated by
/// any later edit of the document it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub struct SourceText {
    text: Arc<str>,
}

impl SourceText {
    /// Take a snapshot of `text`.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// The snapshot contents.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Slice a byte range, returning `None` if it is out of bounds or splits a `char`.
    pub fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.text.get(range)
    }

    /// Split the snapshot into lines. See [`split_lines`].
    pub fn lines(&self) -> Vec<SourceLine<'_>> {
        split_lines(&self.text)
    }

    /// Build an [`OffsetMap`] for converting byte offsets into `char` / UTF-16 offsets.
    pub fn offset_map(&self) -> OffsetMap {
        OffsetMap::new(&self.text)
    }

    /// Returns `true` if `offset` falls on an extended grapheme cluster boundary.
    ///
    /// Ranges produced by the parser always fall on `char` boundaries, but a delimiter followed
    /// by a combining mark (e.g. `"*a*\u{301}"`) yields a range boundary inside a cluster. Hosts
    /// that place carets can use this to detect such positions.
    pub fn is_grapheme_boundary(&self, offset: usize) -> bool {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return false;
        }
        let mut cursor = GraphemeCursor::new(offset, self.text.len(), true);
        cursor.is_boundary(&self.text, 0).unwrap_or(false)
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<SourceText> for String {
    fn from(source: SourceText) -> Self {
        source.text.to_string()
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// One logical line of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Line contents, without the line break.
    pub text: &'a str,
    /// Byte range of [`SourceLine::text`] in the document.
    pub range: Range<usize>,
    /// Byte range of the terminating line break. Empty for the final line.
    pub line_break: Range<usize>,
}

impl SourceLine<'_> {
    /// Byte offset of the first character of the line.
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// Returns `true` if the line is terminated by a line break.
    pub fn has_line_break(&self) -> bool {
        !self.line_break.is_empty()
    }

    /// Byte offset just past the line break (or the line end for the final line).
    pub fn end_including_break(&self) -> usize {
        self.line_break.end
    }
}

/// Returns `true` for characters treated as line boundaries.
///
/// `"\r\n"` is handled by [`split_lines`] as a single boundary.
pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` into lines on any newline boundary.
///
/// `N` line breaks always produce `N + 1` lines (the last one possibly empty), so the lines and
/// their breaks tile the whole text.
pub fn split_lines(text: &str) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }

        let mut break_end = offset + ch.len_utf8();
        if ch == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
            chars.next();
            break_end += 1;
        }

        lines.push(SourceLine {
            text: &text[line_start..offset],
            range: line_start..offset,
            line_break: offset..break_end,
        });
        line_start = break_end;
    }

    lines.push(SourceLine {
        text: &text[line_start..],
        range: line_start..text.len(),
        line_break: text.len()..text.len(),
    });
    lines
}

/// Precomputed byte / `char` / UTF-16 offset conversion table for one snapshot.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// `char_to_byte[i]` = byte offset of char `i`; the last entry is the text length.
    char_to_byte: Vec<usize>,
    /// `char_to_utf16[i]` = UTF-16 offset of char `i`; the last entry is the UTF-16 length.
    char_to_utf16: Vec<usize>,
}

impl OffsetMap {
    /// Build the table for `text`.
    pub fn new(text: &str) -> Self {
        let mut char_to_byte = Vec::with_capacity(text.len() + 1);
        let mut char_to_utf16 = Vec::with_capacity(text.len() + 1);
        let mut utf16 = 0;
        for (byte, ch) in text.char_indices() {
            char_to_byte.push(byte);
            char_to_utf16.push(utf16);
            utf16 += ch.len_utf16();
        }
        char_to_byte.push(text.len());
        char_to_utf16.push(utf16);
        Self {
            char_to_byte,
            char_to_utf16,
        }
    }

    /// Number of `char`s in the text.
    pub fn char_count(&self) -> usize {
        self.char_to_byte.len() - 1
    }

    /// Length of the text in UTF-16 code units.
    pub fn utf16_len(&self) -> usize {
        self.char_to_utf16.last().copied().unwrap_or(0)
    }

    /// Convert a byte offset to a `char` offset.
    ///
    /// Offsets inside a multi-byte `char` round down; offsets past the end clamp to the end.
    pub fn byte_to_char(&self, byte_offset: usize) -> usize {
        match self.char_to_byte.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1).min(self.char_count()),
        }
    }

    /// Convert a `char` offset to a byte offset (clamped to the text length).
    pub fn char_to_byte(&self, char_offset: usize) -> usize {
        self.char_to_byte[char_offset.min(self.char_count())]
    }

    /// Convert a byte offset to a UTF-16 code unit offset.
    pub fn byte_to_utf16(&self, byte_offset: usize) -> usize {
        self.char_to_utf16[self.byte_to_char(byte_offset)]
    }

    /// Convert a UTF-16 code unit offset to a byte offset.
    ///
    /// Offsets between the two halves of a surrogate pair round down to the start of the `char`.
    pub fn utf16_to_byte(&self, utf16_offset: usize) -> usize {
        let idx = match self.char_to_utf16.binary_search(&utf16_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        self.char_to_byte[idx.min(self.char_count())]
    }

    /// Convert a byte range to a `char` range.
    pub fn byte_range_to_char(&self, range: Range<usize>) -> Range<usize> {
        self.byte_to_char(range.start)..self.byte_to_char(range.end)
    }

    /// Convert a byte range to a UTF-16 range.
    pub fn byte_range_to_utf16(&self, range: Range<usize>) -> Range<usize> {
        self.byte_to_utf16(range.start)..self.byte_to_utf16(range.end)
    }
}
