use crate::formatter::{BlockFormatter, BlockMatch, MarkdownFormatter, single_line};
use crate::source::SourceLine;
use crate::tree::{ContainerMetadata, ContainerNode, ContainerType, SyntaxNode};
use regex::Regex;
use std::ops::Range;

/// Priority of the list formatter: above headers, so list lines are claimed first.
pub const LIST_PRIORITY: i32 = 250;

/// Ordered item prefix, matched against the whitespace-trimmed line.
pub const ORDERED_ITEM_PATTERN: &str = r"^(\d+)\. ";

/// Default number of leading whitespace characters per nesting level.
pub const DEFAULT_LIST_INDENT_WIDTH: usize = 2;

/// Consecutive `- `, `* `, `+ ` or `N. ` lines.
///
/// The list type comes from the first item; later items join the list regardless of their own
/// marker. A line that is not a list item (a blank line included) ends the list.
#[derive(Debug, Clone)]
pub struct ListFormatter {
    ordered: Regex,
    indent_width: usize,
    priority: i32,
}

/// Where the pieces of one item line are, relative to the line start.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemPrefix {
    indent_chars: usize,
    marker: Range<usize>,
    bullet: Option<char>,
    content_start: usize,
}

impl ListFormatter {
    /// Create the formatter with the default indent width and priority.
    pub fn new() -> Self {
        Self {
            ordered: Regex::new(ORDERED_ITEM_PATTERN).expect("valid ordered list regex"),
            indent_width: DEFAULT_LIST_INDENT_WIDTH,
            priority: LIST_PRIORITY,
        }
    }

    /// Leading whitespace characters per nesting level (zero is treated as one).
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width.max(1);
        self
    }

    /// Override the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Leading whitespace characters per nesting level.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    fn item_prefix(&self, line: &str) -> Option<ItemPrefix> {
        let trimmed = line.trim();
        let body = line.trim_start();
        let indent = line.len() - body.len();
        let indent_chars = line[..indent].chars().count();

        let bytes = trimmed.as_bytes();
        if let [bullet @ (b'-' | b'*' | b'+'), b' ', ..] = bytes {
            return Some(ItemPrefix {
                indent_chars,
                marker: indent..indent + 1,
                bullet: Some(char::from(*bullet)),
                content_start: indent + 2,
            });
        }

        let caps = self.ordered.captures(trimmed)?;
        let number = caps.get(1)?;
        let prefix = caps.get(0)?;
        Some(ItemPrefix {
            indent_chars,
            marker: indent..indent + number.end() + 1,
            bullet: None,
            content_start: indent + prefix.end(),
        })
    }
}

impl Default for ListFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockFormatter for ListFormatter {
    fn can_parse_line(&self, line: &str) -> bool {
        self.item_prefix(line).is_some()
    }

    fn parse_block(&self, lines: &[SourceLine<'_>]) -> Option<BlockMatch> {
        let items: Vec<(&SourceLine<'_>, ItemPrefix)> = lines
            .iter()
            .map_while(|line| self.item_prefix(line.text).map(|prefix| (line, prefix)))
            .collect();
        let (first_line, first_prefix) = items.first()?;
        let (last_line, _) = items.last()?;

        let kind = match first_prefix.bullet {
            Some(marker) => ContainerType::UnorderedList { marker },
            None => ContainerType::OrderedList { start_number: 1 },
        };

        let count = items.len();
        let children = items
            .iter()
            .enumerate()
            .map(|(idx, (line, prefix))| {
                let base = line.start();
                // Items other than the last own their line break so the list stays contiguous.
                let end = if idx + 1 < count {
                    line.end_including_break()
                } else {
                    line.range.end
                };
                let marker_range = base + prefix.marker.start..base + prefix.marker.end;
                SyntaxNode::Container(ContainerNode {
                    kind: ContainerType::ListItem {
                        level: prefix.indent_chars / self.indent_width,
                        marker: line.text[prefix.marker.clone()].to_string(),
                    },
                    full_range: base..end,
                    children: vec![SyntaxNode::Text(
                        base + prefix.content_start..line.range.end,
                    )],
                    metadata: ContainerMetadata {
                        item_count: None,
                        marker_range: Some(marker_range),
                    },
                })
            })
            .collect();

        Some(BlockMatch {
            node: SyntaxNode::Container(ContainerNode {
                kind,
                full_range: first_line.start()..last_line.range.end,
                children,
                metadata: ContainerMetadata {
                    item_count: Some(count),
                    marker_range: None,
                },
            }),
            consumed_lines: count,
        })
    }
}

impl MarkdownFormatter for ListFormatter {
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
