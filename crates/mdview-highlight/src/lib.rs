//! `mdview-highlight` - Style spans for `mdview-core` syntax trees.
//!
//! This crate walks a [`SyntaxTree`] and produces flat [`StyleSpan`]s a host can hand to its
//! text storage. It does not parse anything itself; the tree is the single source of truth.

use mdview_core::{ContainerType, FormattingType, SyntaxNode, SyntaxTree};

/// Opaque style identifier. The UI/theme layer maps these to concrete attributes.
pub type StyleId = u32;

/// A styled half-open range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleSpan {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
    /// Style applied to the range.
    pub style_id: StyleId,
}

impl StyleSpan {
    /// Create a span.
    pub fn new(start: usize, end: usize, style_id: StyleId) -> Self {
        Self {
            start,
            end,
            style_id,
        }
    }

    /// Returns `true` if the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Style ids used by [`MarkdownHighlighter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownStyles {
    /// Header content, indexed by level - 1.
    pub headers: [StyleId; 6],
    pub bold: StyleId,
    pub italic: StyleId,
    pub strikethrough: StyleId,
    pub inline_code: StyleId,
    /// Delimiters of formatted nodes (`**`, `#`, backticks, ...).
    pub marker: StyleId,
    /// List item markers (`-`, `*`, `+`, `1.`).
    pub list_marker: StyleId,
}

impl MarkdownStyles {
    /// The content style for `kind`.
    pub fn for_kind(&self, kind: FormattingType) -> StyleId {
        match kind {
            FormattingType::Bold => self.bold,
            FormattingType::Italic => self.italic,
            FormattingType::Strikethrough => self.strikethrough,
            FormattingType::InlineCode => self.inline_code,
            header => {
                let level = header.header_level().unwrap_or(1).clamp(1, 6);
                self.headers[usize::from(level) - 1]
            }
        }
    }
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        Self {
            headers: [
                MD_STYLE_HEADER_1,
                MD_STYLE_HEADER_2,
                MD_STYLE_HEADER_3,
                MD_STYLE_HEADER_4,
                MD_STYLE_HEADER_5,
                MD_STYLE_HEADER_6,
            ],
            bold: MD_STYLE_BOLD,
            italic: MD_STYLE_ITALIC,
            strikethrough: MD_STYLE_STRIKETHROUGH,
            inline_code: MD_STYLE_INLINE_CODE,
            marker: MD_STYLE_MARKER,
            list_marker: MD_STYLE_LIST_MARKER,
        }
    }
}

/// Default `StyleId` constants for [`MarkdownStyles`].
///
/// These are only identifiers. UI/theme layer is expected to map them to actual colors.
pub const MD_STYLE_HEADER_1: StyleId = 0x0500_0001;
pub const MD_STYLE_HEADER_2: StyleId = 0x0500_0002;
pub const MD_STYLE_HEADER_3: StyleId = 0x0500_0003;
pub const MD_STYLE_HEADER_4: StyleId = 0x0500_0004;
pub const MD_STYLE_HEADER_5: StyleId = 0x0500_0005;
pub const MD_STYLE_HEADER_6: StyleId = 0x0500_0006;
pub const MD_STYLE_BOLD: StyleId = 0x0500_0010;
pub const MD_STYLE_ITALIC: StyleId = 0x0500_0011;
pub const MD_STYLE_STRIKETHROUGH: StyleId = 0x0500_0012;
pub const MD_STYLE_INLINE_CODE: StyleId = 0x0500_0013;
pub const MD_STYLE_MARKER: StyleId = 0x0500_0020;
pub const MD_STYLE_LIST_MARKER: StyleId = 0x0500_0021;

/// Maps syntax trees to style spans.
#[derive(Debug, Clone, Default)]
pub struct MarkdownHighlighter {
    styles: MarkdownStyles,
}

impl MarkdownHighlighter {
    pub fn new(styles: MarkdownStyles) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &MarkdownStyles {
        &self.styles
    }

    /// Spans in UTF-8 byte offsets, sorted by start offset.
    ///
    /// Each formatted node yields one span for its content and one per marker; list items yield
    /// one span for their marker. Nested nodes are visited, so spans may overlap (a bold span
    /// inside a header span); hosts apply them in order.
    pub fn highlight(&self, tree: &SyntaxTree) -> Vec<StyleSpan> {
        let mut spans = Vec::new();
        for node in tree.nodes() {
            self.collect(node, &mut spans);
        }
        spans.sort_by_key(|span| span.start);
        spans
    }

    /// Like [`highlight`](Self::highlight), with offsets converted to `char` offsets.
    pub fn highlight_chars(&self, tree: &SyntaxTree) -> Vec<StyleSpan> {
        let map = tree.source().offset_map();
        self.highlight(tree)
            .into_iter()
            .map(|span| {
                StyleSpan::new(
                    map.byte_to_char(span.start),
                    map.byte_to_char(span.end),
                    span.style_id,
                )
            })
            .filter(|span| !span.is_empty())
            .collect()
    }

    fn collect(&self, node: &SyntaxNode, spans: &mut Vec<StyleSpan>) {
        match node {
            SyntaxNode::Text(_) => {}
            SyntaxNode::Formatted(formatted) => {
                let content = &formatted.content_range;
                let style_id = self.styles.for_kind(formatted.kind);
                push(spans, content.start, content.end, style_id);
                for marker in &formatted.marker_ranges {
                    push(spans, marker.start, marker.end, self.styles.marker);
                }
                for child in &formatted.children {
                    self.collect(child, spans);
                }
            }
            SyntaxNode::Container(container) => {
                if let (ContainerType::ListItem { .. }, Some(marker)) =
                    (&container.kind, &container.metadata.marker_range)
                {
                    push(spans, marker.start, marker.end, self.styles.list_marker);
                }
                for child in &container.children {
                    self.collect(child, spans);
                }
            }
        }
    }
}

fn push(spans: &mut Vec<StyleSpan>, start: usize, end: usize, style_id: StyleId) {
    let span = StyleSpan::new(start, end, style_id);
    if !span.is_empty() {
        spans.push(span);
    }
}
