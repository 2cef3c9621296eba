//! Block pass: line-oriented scan of the whole document.

use crate::formatter::{BlockFormatter, BlockMatch};
use crate::source::split_lines;
use crate::tree::SyntaxNode;

/// Split `source` into block-level nodes.
///
/// For each unconsumed line the formatters are tried in slice order (callers sort by priority);
/// the first one whose `can_parse_line` accepts the line and whose `parse_block` returns a
/// match wins. Unmatched lines become text nodes. The line break ending the last consumed line
/// of every block becomes its own text node, so the result tiles the whole document.
pub(crate) fn parse_blocks(
    formatters: &[Box<dyn BlockFormatter>],
    source: &str,
) -> Vec<SyntaxNode> {
    let lines = split_lines(source);
    let mut nodes = Vec::with_capacity(lines.len() * 2);
    let mut index = 0;

    while index < lines.len() {
        let remaining = &lines[index..];
        let line = &remaining[0];

        let matched = formatters
            .iter()
            .filter(|formatter| formatter.can_parse_line(line.text))
            .find_map(|formatter| formatter.parse_block(remaining));

        let consumed = match matched {
            Some(BlockMatch {
                node,
                consumed_lines,
            }) if consumed_lines > 0 => {
                nodes.push(node);
                consumed_lines.min(remaining.len())
            }
            _ => {
                if !line.range.is_empty() {
                    nodes.push(SyntaxNode::Text(line.range.clone()));
                }
                1
            }
        };

        let last = &remaining[consumed - 1];
        if last.has_line_break() {
            nodes.push(SyntaxNode::Text(last.line_break.clone()));
        }
        index += consumed;
    }

    nodes
}
