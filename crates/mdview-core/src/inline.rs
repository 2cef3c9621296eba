//! Inline pass: regex-driven, priority-ordered scan of text ranges.
//!
//! Candidates are ordered by start (ascending), then length (descending), then formatter
//! priority. A left-to-right sweep accepts the first candidate at or after the cursor, emits
//! text for any gap, and moves the cursor past the accepted span; candidates starting inside an
//! accepted span are dropped.
//!
//! Candidates are produced lazily. Each formatter holds its next match at or after the cursor
//! and is only re-queried once the cursor passes that match's start, so a delimiter closing an
//! accepted span can never be reused as the opener of a later candidate.

use crate::formatters::InlineFormatter;
use crate::formatters::inline::InlineMatch;
use crate::tree::SyntaxNode;
use std::cmp::Ordering;
use std::ops::Range;

pub(crate) struct InlinePass<'a> {
    formatters: &'a [InlineFormatter],
    source: &'a str,
    max_depth: usize,
}

impl<'a> InlinePass<'a> {
    /// `formatters` must already be sorted by descending priority.
    pub(crate) fn new(
        formatters: &'a [InlineFormatter],
        source: &'a str,
        max_depth: usize,
    ) -> Self {
        Self {
            formatters,
            source,
            max_depth,
        }
    }

    /// Apply the inline pass to block-level nodes.
    ///
    /// Text nodes are replaced by their scan result, formatted nodes get their content scanned
    /// into `children`, and containers are refined recursively.
    pub(crate) fn refine(&self, nodes: Vec<SyntaxNode>) -> Vec<SyntaxNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                SyntaxNode::Text(range) => out.extend(self.scan(range, 0)),
                SyntaxNode::Formatted(mut formatted) => {
                    formatted.children = self.scan(formatted.content_range.clone(), 0);
                    out.push(SyntaxNode::Formatted(formatted));
                }
                SyntaxNode::Container(mut container) => {
                    container.children = self.refine(std::mem::take(&mut container.children));
                    out.push(SyntaxNode::Container(container));
                }
            }
        }
        out
    }

    /// Tile `range` with text and formatted nodes. Empty ranges produce no nodes.
    pub(crate) fn scan(&self, range: Range<usize>, depth: usize) -> Vec<SyntaxNode> {
        if range.is_empty() {
            return Vec::new();
        }

        let mut pending: Vec<Option<InlineMatch>> = self
            .formatters
            .iter()
            .map(|formatter| formatter.next_match(self.source, range.clone(), range.start))
            .collect();

        let mut nodes = Vec::new();
        let mut cursor = range.start;

        loop {
            for (formatter, slot) in self.formatters.iter().zip(pending.iter_mut()) {
                if slot.as_ref().is_some_and(|m| m.full_range.start < cursor) {
                    *slot = formatter.next_match(self.source, range.clone(), cursor);
                }
            }

            let Some(accepted) = pending
                .iter()
                .enumerate()
                .filter_map(|(rank, slot)| slot.as_ref().map(|m| (rank, m)))
                .min_by(|a, b| compare_candidates(*a, *b))
                .map(|(_, m)| m.clone())
            else {
                break;
            };

            if accepted.full_range.start > cursor {
                nodes.push(SyntaxNode::Text(cursor..accepted.full_range.start));
            }
            cursor = accepted.full_range.end;

            let children = if depth < self.max_depth {
                self.scan(accepted.content_range.clone(), depth + 1)
            } else {
                Vec::new()
            };
            nodes.push(accepted.into_node(children));
        }

        if cursor < range.end {
            nodes.push(SyntaxNode::Text(cursor..range.end));
        }
        nodes
    }
}

/// Start ascending, then length descending, then registry rank (priority order).
fn compare_candidates(a: (usize, &InlineMatch), b: (usize, &InlineMatch)) -> Ordering {
    let (rank_a, a) = a;
    let (rank_b, b) = b;
    a.full_range
        .start
        .cmp(&b.full_range.start)
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| rank_a.cmp(&rank_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FormattingType;

    fn registry() -> Vec<InlineFormatter> {
        vec![
            InlineFormatter::bold(),
            InlineFormatter::inline_code(),
            InlineFormatter::strikethrough(),
            InlineFormatter::italic(),
        ]
    }

    fn kinds(nodes: &[SyntaxNode]) -> Vec<Option<FormattingType>> {
        nodes
            .iter()
            .map(|n| n.as_formatted().map(|f| f.kind))
            .collect()
    }

    #[test]
    fn test_closing_delimiter_is_not_reused() {
        let source = "Hello **bold** and *italic* text";
        let formatters = registry();
        let pass = InlinePass::new(&formatters, source, 8);
        let nodes = pass.scan(0..source.len(), 0);
        assert_eq!(
            kinds(&nodes),
            vec![
                None,
                Some(FormattingType::Bold),
                None,
                Some(FormattingType::Italic),
                None
            ]
        );
        assert_eq!(nodes[2], SyntaxNode::Text(14..19));
    }

    #[test]
    fn test_earlier_start_beats_priority() {
        // Code starts first, so the bold candidate inside it is dropped.
        let source = "`a **b` c**";
        let formatters = registry();
        let nodes = InlinePass::new(&formatters, source, 8).scan(0..source.len(), 0);
        assert_eq!(kinds(&nodes), vec![Some(FormattingType::InlineCode), None]);
    }

    #[test]
    fn test_outer_match_swallows_inner_candidate() {
        // The italic candidate `_a_` starts one byte later, inside the accepted bold span.
        let source = "__a__";
        let formatters = registry();
        let nodes = InlinePass::new(&formatters, source, 8).scan(0..source.len(), 0);
        assert_eq!(kinds(&nodes), vec![Some(FormattingType::Bold)]);
    }

    #[test]
    fn test_longer_match_wins_at_same_start() {
        let source = "abc";
        let formatters = vec![
            InlineFormatter::new(FormattingType::Strikethrough, "ab").unwrap(),
            InlineFormatter::new(FormattingType::InlineCode, "abc").unwrap(),
        ];
        let nodes = InlinePass::new(&formatters, source, 8).scan(0..source.len(), 0);
        assert_eq!(kinds(&nodes), vec![Some(FormattingType::InlineCode)]);
        assert!(nodes[0].as_formatted().unwrap().marker_ranges.is_empty());
    }

    #[test]
    fn test_equal_candidates_fall_back_to_rank() {
        let source = "~x~";
        let formatters = vec![
            InlineFormatter::new(FormattingType::Strikethrough, "~([^~]+)~").unwrap(),
            InlineFormatter::new(FormattingType::InlineCode, "~([^~]+)~").unwrap(),
        ];
        let nodes = InlinePass::new(&formatters, source, 8).scan(0..source.len(), 0);
        assert_eq!(kinds(&nodes), vec![Some(FormattingType::Strikethrough)]);
    }

    #[test]
    fn test_nested_content_and_depth_limit() {
        let source = "**a _b_ c**";
        let formatters = registry();

        let nodes = InlinePass::new(&formatters, source, 8).scan(0..source.len(), 0);
        let bold = nodes[0].as_formatted().unwrap();
        assert_eq!(
            kinds(&bold.children),
            vec![None, Some(FormattingType::Italic), None]
        );

        let flat = InlinePass::new(&formatters, source, 0).scan(0..source.len(), 0);
        let bold = flat[0].as_formatted().unwrap();
        assert_eq!(bold.children, vec![SyntaxNode::Text(2..9)]);
    }

    #[test]
    fn test_refine_descends_into_containers() {
        use crate::tree::{ContainerMetadata, ContainerNode, ContainerType};

        let source = "- *a*";
        let formatters = registry();
        let item = SyntaxNode::Container(ContainerNode {
            kind: ContainerType::ListItem {
                level: 0,
                marker: "-".to_string(),
            },
            full_range: 0..5,
            children: vec![SyntaxNode::Text(2..5)],
            metadata: ContainerMetadata::default(),
        });
        let refined = InlinePass::new(&formatters, source, 8).refine(vec![item]);
        let children = refined[0].children();
        assert_eq!(kinds(children), vec![Some(FormattingType::Italic)]);
    }
}
