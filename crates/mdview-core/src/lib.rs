#![warn(missing_docs)]
//! mdview Core - Markdown-subset parsing engine for live editor highlighting
//!
//! # Overview
//!
//! `mdview-core` turns raw text into an immutable, range-annotated [`SyntaxTree`]. It is meant
//! to run on every keystroke: the document owner calls [`parse`] after each mutation and
//! replaces the previous tree wholesale. Rendering, attributed-string bridging and widgets are
//! left to the host, which only reads the tree.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Parser Orchestrator (MarkdownParser)       │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Inline Pass (bold/italic/code/strike)      │  ← per text / content range
//! ├─────────────────────────────────────────────┤
//! │  Block Pass (headers, lists, text lines)    │  ← whole document, line by line
//! ├─────────────────────────────────────────────┤
//! │  Formatter Registry (priority ordered)      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use mdview_core::{ContainerType, SyntaxNode, parse};
//!
//! let tree = parse("# Notes\n- **one**\n- two");
//!
//! // Header, its line break, then the list.
//! assert_eq!(tree.nodes().len(), 3);
//! let SyntaxNode::Container(list) = &tree.nodes()[2] else { panic!() };
//! assert_eq!(list.kind, ContainerType::UnorderedList { marker: '-' });
//! assert_eq!(list.children.len(), 2);
//! ```
//!
//! # Offsets
//!
//! All ranges are UTF-8 byte offsets into [`SyntaxTree::source`]. Use
//! [`SourceText::offset_map`] to convert to `char` or UTF-16 offsets.
//!
//! # Module Description
//!
//! - [`formatter`] - the formatter capability traits
//! - [`formatters`] - built-in header, list and inline formatters
//! - [`tree`] - node model and invariants
//! - [`source`] - snapshots, line splitting and offset conversion
//! - [`parser`] - the orchestrator
//! - [`cursor`] - read-only position queries
//! - [`publish`] - last-writer-wins publication for background parsing
//! - [`options`] - parser configuration

mod block;
pub mod cursor;
pub mod error;
pub mod formatter;
pub mod formatters;
mod inline;
pub mod options;
pub mod parser;
pub mod publish;
pub mod source;
pub mod tree;

pub use cursor::CursorMapper;
pub use error::{ParserError, TreeError};
pub use formatter::{
    BlockFormatter, BlockMatch, DEFAULT_BLOCK_PRIORITY, DEFAULT_INLINE_PRIORITY, MarkdownFormatter,
};
pub use formatters::{HeaderFormatter, InlineFormatter, ListFormatter};
pub use options::ParseOptions;
pub use parser::MarkdownParser;
pub use publish::{ParseTicket, PublishedTree, TreePublisher};
pub use source::{OffsetMap, SourceLine, SourceText};
pub use tree::{
    ContainerMetadata, ContainerNode, ContainerType, FormattedNode, FormattingType, SyntaxNode,
    SyntaxTree,
};

use std::sync::LazyLock;

static DEFAULT_PARSER: LazyLock<MarkdownParser> = LazyLock::new(MarkdownParser::new);

/// Parse `text` with the shared default parser.
pub fn parse(text: &str) -> SyntaxTree {
    DEFAULT_PARSER.parse(text)
}

/// The shared default parser used by [`parse`].
pub fn default_parser() -> &'static MarkdownParser {
    &DEFAULT_PARSER
}
