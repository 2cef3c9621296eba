//! The formatter capability contract.
//!
//! A formatter recognizes one syntax construct and proposes nodes for it. Inline formatters are
//! data-driven ([`InlineFormatter`](crate::formatters::InlineFormatter): a kind, a regex and a
//! priority); block formatters implement [`BlockFormatter`]. Registries sort formatters by
//! descending [`MarkdownFormatter::priority`], which is the only precedence mechanism.

use crate::source::SourceLine;
use crate::tree::SyntaxNode;
use std::ops::Range;

/// Default priority for inline formatters.
pub const DEFAULT_INLINE_PRIORITY: i32 = 100;

/// Default priority for block formatters.
pub const DEFAULT_BLOCK_PRIORITY: i32 = 200;

/// The shared matching contract.
///
/// `source` is the whole document and `range` a byte range into it. Implementations must return
/// nodes whose ranges lie inside `range`.
pub trait MarkdownFormatter: Send + Sync {
    /// Higher values are tried (and win ties) first.
    fn priority(&self) -> i32;

    /// Returns `true` if the formatter recognizes something in `range`.
    fn can_parse(&self, source: &str, range: Range<usize>) -> bool;

    /// The first node recognized in `range`.
    fn parse(&self, source: &str, range: Range<usize>) -> Option<SyntaxNode>;

    /// All non-overlapping nodes recognized in `range`, in document order.
    fn find_matches(&self, source: &str, range: Range<usize>) -> Vec<SyntaxNode>;
}

/// A block-level node plus the number of lines it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    /// The block node.
    pub node: SyntaxNode,
    /// Lines consumed, starting at the first line offered. Always at least 1.
    pub consumed_lines: usize,
}

/// A line-oriented formatter (headers, lists).
pub trait BlockFormatter: MarkdownFormatter {
    /// Cheap check on one line's text (no line break).
    fn can_parse_line(&self, line: &str) -> bool;

    /// Parse a block starting at `lines[0]`; `lines` holds every remaining line of the document.
    ///
    /// The returned node must start at `lines[0].range.start` and end at the end of the text of
    /// the last consumed line; the line break after it is left to the caller.
    fn parse_block(&self, lines: &[SourceLine<'_>]) -> Option<BlockMatch>;
}

/// Treat `range` as a single line of `source`, for block formatters answering
/// [`MarkdownFormatter`] queries.
pub(crate) fn single_line(source: &str, range: Range<usize>) -> Option<SourceLine<'_>> {
    let text = source.get(range.clone())?;
    Some(SourceLine {
        text,
        line_break: range.end..range.end,
        range,
    })
}

/// Stable sort by descending priority (registration order breaks ties).
pub(crate) fn sort_by_priority<T, F>(formatters: &mut [T], priority: F)
where
    F: Fn(&T) -> i32,
{
    formatters.sort_by(|a, b| priority(b).cmp(&priority(a)));
}
