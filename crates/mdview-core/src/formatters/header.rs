use crate::formatter::{
    BlockFormatter, BlockMatch, DEFAULT_BLOCK_PRIORITY, MarkdownFormatter, single_line,
};
use crate::source::SourceLine;
use crate::tree::{FormattedNode, FormattingType, SyntaxNode};
use regex::Regex;
use std::ops::Range;

/// ATX header line: 1-6 hashes, whitespace, then content.
pub const HEADER_PATTERN: &str = r"^(#{1,6})\s+(.+)$";

/// `# Header` .. `###### Header` on a single line.
///
/// Seven or more hashes, or a hash run not followed by whitespace, is not a header.
#[derive(Debug, Clone)]
pub struct HeaderFormatter {
    regex: Regex,
    priority: i32,
}

impl HeaderFormatter {
    /// Create the formatter with the default block priority (200).
    pub fn new() -> Self {
        Self {
            regex: Regex::new(HEADER_PATTERN).expect("valid header regex"),
            priority: DEFAULT_BLOCK_PRIORITY,
        }
    }

    /// Override the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for HeaderFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockFormatter for HeaderFormatter {
    fn can_parse_line(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    fn parse_block(&self, lines: &[SourceLine<'_>]) -> Option<BlockMatch> {
        let line = lines.first()?;
        let caps = self.regex.captures(line.text)?;
        let hashes = caps.get(1)?;
        let content = caps.get(2)?;
        let kind = FormattingType::header(hashes.len())?;
        let base = line.start();

        Some(BlockMatch {
            node: SyntaxNode::Formatted(FormattedNode {
                kind,
                full_range: line.range.clone(),
                content_range: base + content.start()..base + content.end(),
                marker_ranges: vec![base + hashes.start()..base + hashes.end()],
                children: Vec::new(),
            }),
            consumed_lines: 1,
        })
    }
}

impl MarkdownFormatter for HeaderFormatter {
    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_parse(&self, source: &str, range: Range<usize>) -> bool {
        source
            .get(range)
            .is_some_and(|line| self.can_parse_line(line))
    }

    fn parse(&self, source: &str, range: Range<usize>) -> Option<SyntaxNode> {
        let line = single_line(source, range)?;
        self.parse_block(&[line]).map(|m| m.node)
    }

    fn find_matches(&self, source: &str, range: Range<usize>) -> Vec<SyntaxNode> {
        self.parse(source, range).into_iter().collect()
    }
}
