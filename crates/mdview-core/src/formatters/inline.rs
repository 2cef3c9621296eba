use crate::error::ParserError;
use crate::formatter::{DEFAULT_INLINE_PRIORITY, MarkdownFormatter};
use crate::tree::{FormattedNode, FormattingType, SyntaxNode};
use regex::Regex;
use std::ops::Range;

/// `**bold**` or `__bold__`.
pub const BOLD_PATTERN: &str = r"\*\*([^*]+?)\*\*|__([^_]+?)__";
/// `` `code` ``.
pub const INLINE_CODE_PATTERN: &str = r"`([^`]+?)`";
/// `~~strike~~`.
pub const STRIKETHROUGH_PATTERN: &str = r"~~([^~]+?)~~";
/// `*italic*` or `_italic_`.
pub const ITALIC_PATTERN: &str = r"\*([^*]+?)\*|_([^_]+?)_";

/// A regex-driven inline formatter.
///
/// The content of a match is its first participating capture group; everything else in the
/// match is delimiter. A pattern without capture groups treats the whole match as content.
#[derive(Debug, Clone)]
pub struct InlineFormatter {
    kind: FormattingType,
    regex: Regex,
    priority: i32,
}

impl InlineFormatter {
    /// Compile a custom inline formatter with the default inline priority.
    pub fn new(kind: FormattingType, pattern: &str) -> Result<Self, ParserError> {
        let regex = Regex::new(pattern).map_err(|e| ParserError::InvalidPattern {
            kind,
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            kind,
            regex,
            priority: DEFAULT_INLINE_PRIORITY,
        })
    }

    /// Override the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Bold, priority 150.
    pub fn bold() -> Self {
        Self::builtin(FormattingType::Bold, BOLD_PATTERN, 150)
    }

    /// Inline code, priority 140.
    pub fn inline_code() -> Self {
        Self::builtin(FormattingType::InlineCode, INLINE_CODE_PATTERN, 140)
    }

    /// Strikethrough, priority 130.
    pub fn strikethrough() -> Self {
        Self::builtin(FormattingType::Strikethrough, STRIKETHROUGH_PATTERN, 130)
    }

    /// Italic, priority 100.
    pub fn italic() -> Self {
        Self::builtin(
            FormattingType::Italic,
            ITALIC_PATTERN,
            DEFAULT_INLINE_PRIORITY,
        )
    }

    fn builtin(kind: FormattingType, pattern: &str, priority: i32) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("valid built-in inline pattern"),
            priority,
        }
    }

    /// The formatting type produced by this formatter.
    pub fn formatting_type(&self) -> FormattingType {
        self.kind
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The first match in `range` starting at or after `from`.
    ///
    /// The pattern sees `source[range]` as its haystack, so anchors and word boundaries behave
    /// as if the range were the whole text. Empty matches are skipped.
    pub(crate) fn next_match(
        &self,
        source: &str,
        range: Range<usize>,
        from: usize,
    ) -> Option<InlineMatch> {
        let haystack = source.get(range.clone())?;
        let base = range.start;
        let mut at = from.checked_sub(base)?;

        while at <= haystack.len() {
            let caps = self.regex.captures_at(haystack, at)?;
            let full = caps.get(0)?;
            if full.is_empty() {
                let step = haystack[full.start()..].chars().next()?.len_utf8();
                at = full.start() + step;
                continue;
            }
            let content = (1..caps.len())
                .find_map(|group| caps.get(group))
                .map_or(full.range(), |m| m.range());
            return Some(InlineMatch {
                kind: self.kind,
                full_range: base + full.start()..base + full.end(),
                content_range: base + content.start..base + content.end,
            });
        }
        None
    }
}

impl MarkdownFormatter for InlineFormatter {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_parse(&self, source: &str, range: Range<usize>) -> bool {
        let start = range.start;
        self.next_match(source, range, start).is_some()
    }

    fn parse(&self, source: &str, range: Range<usize>) -> Option<SyntaxNode> {
        let start = range.start;
        self.next_match(source, range, start)
            .map(|m| m.into_node(Vec::new()))
    }

    fn find_matches(&self, source: &str, range: Range<usize>) -> Vec<SyntaxNode> {
        let mut nodes = Vec::new();
        let mut from = range.start;
        while let Some(m) = self.next_match(source, range.clone(), from) {
            from = m.full_range.end;
            nodes.push(m.into_node(Vec::new()));
        }
        nodes
    }
}

/// A candidate span proposed by an [`InlineFormatter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InlineMatch {
    pub(crate) kind: FormattingType,
    pub(crate) full_range: Range<usize>,
    pub(crate) content_range: Range<usize>,
}

impl InlineMatch {
    pub(crate) fn len(&self) -> usize {
        self.full_range.len()
    }

    /// Delimiters before and after the content; empty sides are omitted.
    pub(crate) fn marker_ranges(&self) -> Vec<Range<usize>> {
        [
            self.full_range.start..self.content_range.start,
            self.content_range.end..self.full_range.end,
        ]
        .into_iter()
        .filter(|marker| !marker.is_empty())
        .collect()
    }

    /// Build the node. Empty `children` means "content not scanned": a single text child is
    /// filled in for non-empty content.
    pub(crate) fn into_node(self, mut children: Vec<SyntaxNode>) -> SyntaxNode {
        if children.is_empty() && !self.content_range.is_empty() {
            children.push(SyntaxNode::Text(self.content_range.clone()));
        }
        SyntaxNode::Formatted(FormattedNode {
            marker_ranges: self.marker_ranges(),
            kind: self.kind,
            full_range: self.full_range,
            content_range: self.content_range,
            children,
        })
    }
}
