//! Parser orchestrator: owns the formatter registry and drives both passes.

use crate::block::parse_blocks;
use crate::formatter::{BlockFormatter, MarkdownFormatter, sort_by_priority};
use crate::formatters::{InlineFormatter, default_block_formatters, default_inline_formatters};
use crate::inline::InlinePass;
use crate::options::ParseOptions;
use crate::source::SourceText;
use crate::tree::SyntaxTree;
use std::fmt;
use std::time::Instant;

/// A markdown-subset parser.
///
/// `parse` is a pure function of its input: the registry is read-only after construction, so a
/// single parser can be shared across threads and calling `parse` twice on the same text yields
/// equal trees.
///
/// ```rust
/// use mdview_core::{FormattingType, MarkdownParser, SyntaxNode};
///
/// let parser = MarkdownParser::new();
/// let tree = parser.parse("Hello **bold**");
///
/// assert_eq!(tree.nodes().len(), 2);
/// let SyntaxNode::Formatted(bold) = &tree.nodes()[1] else { panic!() };
/// assert_eq!(bold.kind, FormattingType::Bold);
/// assert_eq!(tree.text(bold.content_range.clone()), "bold");
/// ```
pub struct MarkdownParser {
    block_formatters: Vec<Box<dyn BlockFormatter>>,
    inline_formatters: Vec<InlineFormatter>,
    options: ParseOptions,
}

impl MarkdownParser {
    /// Parser with the default registry and options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Parser with the default registry, filtered and tuned by `options`.
    pub fn with_options(options: ParseOptions) -> Self {
        Self::with_formatters(
            default_block_formatters(&options),
            default_inline_formatters(&options),
            options,
        )
    }

    /// Parser with a custom registry.
    ///
    /// Formatters are sorted by descending priority; equal priorities keep the given order.
    /// Only `max_inline_depth` and `slow_parse_threshold` apply from `options`. The formatter
    /// toggles and `list_indent_width` only shape the default registry; configure the given
    /// formatters directly instead (see [`ListFormatter::with_indent_width`]).
    ///
    /// [`ListFormatter::with_indent_width`]: crate::ListFormatter::with_indent_width
    pub fn with_formatters(
        mut block_formatters: Vec<Box<dyn BlockFormatter>>,
        mut inline_formatters: Vec<InlineFormatter>,
        options: ParseOptions,
    ) -> Self {
        sort_by_priority(&mut block_formatters, |f| f.priority());
        sort_by_priority(&mut inline_formatters, |f| f.priority());
        tracing::debug!(
            block = block_formatters.len(),
            inline = inline_formatters.len(),
            "built markdown formatter registry"
        );
        Self {
            block_formatters,
            inline_formatters,
            options,
        }
    }

    /// Block formatters, highest priority first.
    pub fn block_formatters(&self) -> &[Box<dyn BlockFormatter>] {
        &self.block_formatters
    }

    /// Inline formatters, highest priority first.
    pub fn inline_formatters(&self) -> &[InlineFormatter] {
        &self.inline_formatters
    }

    /// The options this parser was built with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `text` into a new tree.
    ///
    /// Runs the block pass over the whole document, then the inline pass over every text range,
    /// formatted content range and container child.
    pub fn parse(&self, text: &str) -> SyntaxTree {
        let started = Instant::now();
        let source = SourceText::new(text);

        let blocks = parse_blocks(&self.block_formatters, source.as_str());
        let block_count = blocks.len();
        let nodes = InlinePass::new(
            &self.inline_formatters,
            source.as_str(),
            self.options.max_inline_depth,
        )
        .refine(blocks);
        let tree = SyntaxTree::new(nodes, source);

        debug_assert!(
            tree.validate().is_ok(),
            "parser produced an invalid tree: {:?}",
            tree.validate()
        );

        let elapsed = started.elapsed();
        tracing::trace!(
            bytes = text.len(),
            blocks = block_count,
            nodes = tree.nodes().len(),
            elapsed_us = elapsed.as_micros() as u64,
            "parsed markdown"
        );
        if elapsed > self.options.slow_parse_threshold {
            tracing::warn!(
                bytes = text.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "markdown parse exceeded latency budget"
            );
        }
        tree
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MarkdownParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let block: Vec<i32> = self.block_formatters.iter().map(|b| b.priority()).collect();
        f.debug_struct("MarkdownParser")
            .field("block_priorities", &block)
            .field("inline_formatters", &self.inline_formatters)
            .field("options", &self.options)
            .finish()
    }
}
