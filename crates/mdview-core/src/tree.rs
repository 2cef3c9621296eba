//! Syntax tree node model.
//!
//! A [`SyntaxTree`] is built wholesale by one parse call and never mutated afterwards. Its
//! top-level nodes partition the whole source: they are sorted, non-overlapping, and cover
//! `[0, len)` without gaps (line breaks not consumed by a block are their own text nodes).

use crate::error::TreeError;
use crate::source::SourceText;
use std::ops::Range;

/// Inline and header formatting kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormattingType {
    /// `**bold**` / `__bold__`
    Bold,
    /// `*italic*` / `_italic_`
    Italic,
    /// `# header`
    Header1,
    /// `## header`
    Header2,
    /// `### header`
    Header3,
    /// `#### header`
    Header4,
    /// `##### header`
    Header5,
    /// `###### header`
    Header6,
    /// `` `code` ``
    InlineCode,
    /// `~~strike~~`
    Strikethrough,
}

impl FormattingType {
    /// Every formatting type, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Bold,
        Self::Italic,
        Self::Header1,
        Self::Header2,
        Self::Header3,
        Self::Header4,
        Self::Header5,
        Self::Header6,
        Self::InlineCode,
        Self::Strikethrough,
    ];

    /// Header type for a hash-run length of 1..=6.
    pub fn header(level: usize) -> Option<Self> {
        match level {
            1 => Some(Self::Header1),
            2 => Some(Self::Header2),
            3 => Some(Self::Header3),
            4 => Some(Self::Header4),
            5 => Some(Self::Header5),
            6 => Some(Self::Header6),
            _ => None,
        }
    }

    /// Header level (1..=6), or `None` for inline types.
    pub fn header_level(self) -> Option<u8> {
        match self {
            Self::Header1 => Some(1),
            Self::Header2 => Some(2),
            Self::Header3 => Some(3),
            Self::Header4 => Some(4),
            Self::Header5 => Some(5),
            Self::Header6 => Some(6),
            _ => None,
        }
    }

    /// Returns `true` for `Header1..=Header6`.
    pub fn is_header(self) -> bool {
        self.header_level().is_some()
    }
}

/// Container node kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerType {
    /// A bullet list; `marker` is the first item's bullet (`-`, `*` or `+`).
    UnorderedList {
        /// Bullet character.
        marker: char,
    },
    /// A numbered list.
    OrderedList {
        /// Number of the first item.
        start_number: u64,
    },
    /// One list item.
    ListItem {
        /// Nesting level derived from leading whitespace.
        level: usize,
        /// The literal marker (`-`, `*`, `+`, or `N.`).
        marker: String,
    },
    /// A blockquote. Reserved; the default block formatters never produce it.
    Blockquote,
}

impl ContainerType {
    /// Returns `true` for ordered and unordered lists.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::UnorderedList { .. } | Self::OrderedList { .. })
    }

    /// Returns `true` for list items.
    pub fn is_list_item(&self) -> bool {
        matches!(self, Self::ListItem { .. })
    }
}

/// Extra facts about a container that do not fit its children.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerMetadata {
    /// Number of items (lists only).
    pub item_count: Option<usize>,
    /// Range of the literal item marker, e.g. `-` or `12.` (list items only).
    pub marker_range: Option<Range<usize>>,
}

/// A formatted span: delimiters plus content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormattedNode {
    /// The formatting kind.
    pub kind: FormattingType,
    /// Whole span, delimiters included.
    pub full_range: Range<usize>,
    /// Span between the delimiters.
    pub content_range: Range<usize>,
    /// Delimiter spans; each lies in `full_range` and outside `content_range`.
    pub marker_ranges: Vec<Range<usize>>,
    /// Inline nodes covering `content_range`.
    pub children: Vec<SyntaxNode>,
}

/// A node owning ordered children (lists and list items).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerNode {
    /// The container kind.
    pub kind: ContainerType,
    /// Whole span of the container.
    pub full_range: Range<usize>,
    /// Child nodes, in document order.
    pub children: Vec<SyntaxNode>,
    /// Additional container facts.
    pub metadata: ContainerMetadata,
}

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxNode {
    /// Unformatted text.
    Text(Range<usize>),
    /// A formatted span.
    Formatted(FormattedNode),
    /// A container with children.
    Container(ContainerNode),
}

impl SyntaxNode {
    /// The node's full byte range.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Text(range) => range.clone(),
            Self::Formatted(node) => node.full_range.clone(),
            Self::Container(node) => node.full_range.clone(),
        }
    }

    /// Returns `true` if `offset` lies in the node's range (half-open).
    pub fn contains(&self, offset: usize) -> bool {
        self.range().contains(&offset)
    }

    /// Returns `true` for text nodes.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns `true` for formatted nodes.
    pub fn is_formatted(&self) -> bool {
        matches!(self, Self::Formatted(_))
    }

    /// Returns `true` for container nodes.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// The formatted node, if this is one.
    pub fn as_formatted(&self) -> Option<&FormattedNode> {
        match self {
            Self::Formatted(node) => Some(node),
            _ => None,
        }
    }

    /// The container node, if this is one.
    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            Self::Container(node) => Some(node),
            _ => None,
        }
    }

    /// Direct children (empty for text nodes).
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            Self::Text(_) => &[],
            Self::Formatted(node) => &node.children,
            Self::Container(node) => &node.children,
        }
    }

    /// Depth-first, pre-order iterator over this node and all its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`SyntaxNode::descendants`] and [`SyntaxTree::descendants`].
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// The result of one parse: top-level nodes plus the snapshot they index into.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    source: SourceText,
}

impl SyntaxTree {
    /// Wrap already-built nodes. No invariants are checked; see [`SyntaxTree::validate`].
    pub fn new(nodes: Vec<SyntaxNode>, source: impl Into<SourceText>) -> Self {
        Self {
            nodes,
            source: source.into(),
        }
    }

    /// Top-level nodes, in document order.
    pub fn nodes(&self) -> &[SyntaxNode] {
        &self.nodes
    }

    /// The snapshot the tree was parsed from.
    pub fn source(&self) -> &SourceText {
        &self.source
    }

    /// The snapshot contents.
    pub fn source_str(&self) -> &str {
        self.source.as_str()
    }

    /// Text of a range, or `""` if the range is invalid for this snapshot.
    pub fn text(&self, range: Range<usize>) -> &str {
        self.source.slice(range).unwrap_or("")
    }

    /// Depth-first iterator over every node in the tree.
    pub fn descendants(&self) -> impl Iterator<Item = &SyntaxNode> + '_ {
        self.nodes.iter().flat_map(SyntaxNode::descendants)
    }

    /// The top-level node containing `offset`.
    pub fn node_at(&self, offset: usize) -> Option<&SyntaxNode> {
        let idx = self.nodes.partition_point(|node| node.range().end <= offset);
        self.nodes.get(idx).filter(|node| node.contains(offset))
    }

    /// Check the structural invariants:
    ///
    /// - top-level nodes are sorted, non-overlapping and cover the whole source;
    /// - every range is in bounds and on `char` boundaries;
    /// - formatted content and markers lie inside the full range, markers outside the content,
    ///   and children tile the content;
    /// - list children tile the list; list item children lie inside the item, in order.
    pub fn validate(&self) -> Result<(), TreeError> {
        for node in &self.nodes {
            self.check_range(&node.range())?;
        }
        check_tiling(&self.nodes, 0..self.source.len())?;
        for node in &self.nodes {
            self.check_node(node)?;
        }
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), TreeError> {
        let text = self.source.as_str();
        if range.start > range.end || range.end > text.len() {
            return Err(TreeError::OutOfBounds {
                range: range.clone(),
                len: text.len(),
            });
        }
        for offset in [range.start, range.end] {
            if !text.is_char_boundary(offset) {
                return Err(TreeError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }

    fn check_node(&self, node: &SyntaxNode) -> Result<(), TreeError> {
        match node {
            SyntaxNode::Text(range) => self.check_range(range),
            SyntaxNode::Formatted(formatted) => {
                let full = &formatted.full_range;
                let content = &formatted.content_range;
                self.check_range(full)?;
                self.check_range(content)?;
                if content.start < full.start || content.end > full.end {
                    return Err(TreeError::ContentOutsideNode {
                        content: content.clone(),
                        full: full.clone(),
                    });
                }
                for marker in &formatted.marker_ranges {
                    self.check_range(marker)?;
                    let outside = marker.start < full.start || marker.end > full.end;
                    let overlaps = marker.start < content.end && content.start < marker.end;
                    if outside || overlaps {
                        return Err(TreeError::MarkerInsideContent {
                            marker: marker.clone(),
                            content: content.clone(),
                            full: full.clone(),
                        });
                    }
                }
                if !formatted.children.is_empty() {
                    check_tiling(&formatted.children, content.clone())?;
                }
                formatted
                    .children
                    .iter()
                    .try_for_each(|child| self.check_node(child))
            }
            SyntaxNode::Container(container) => {
                let full = &container.full_range;
                self.check_range(full)?;
                if container.kind.is_list_item() {
                    let mut cursor = full.start;
                    for child in &container.children {
                        let child_range = child.range();
                        if child_range.start < cursor || child_range.end > full.end {
                            return Err(TreeError::ChildOutsideParent {
                                child: child_range,
                                parent: full.clone(),
                            });
                        }
                        cursor = child_range.end;
                    }
                } else {
                    check_tiling(&container.children, full.clone())?;
                }
                container
                    .children
                    .iter()
                    .try_for_each(|child| self.check_node(child))
            }
        }
    }
}

/// Check that `nodes` tile `span` exactly, in order.
fn check_tiling(nodes: &[SyntaxNode], span: Range<usize>) -> Result<(), TreeError> {
    let mut cursor = span.start;
    for node in nodes {
        let range = node.range();
        if range.start > cursor {
            return Err(TreeError::Gap {
                expected: cursor,
                found: range.start,
            });
        }
        if range.start < cursor || range.end < range.start {
            return Err(TreeError::Overlap {
                expected: cursor,
                found: range.start,
            });
        }
        cursor = range.end;
    }
    if cursor != span.end {
        return Err(TreeError::Incomplete {
            covered: cursor,
            len: span.end,
        });
    }
    Ok(())
}
