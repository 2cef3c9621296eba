//! Error types for registry construction and tree validation.

use crate::tree::FormattingType;
use std::ops::Range;
use thiserror::Error;

/// Errors produced while building a formatter registry.
///
/// Parsing itself never fails: malformed markdown degrades to text nodes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("regex compile error for {kind:?} pattern '{pattern}': {message}")]
    /// An inline formatter pattern failed to compile.
    InvalidPattern {
        /// The formatting type the pattern was registered for.
        kind: FormattingType,
        /// The regex pattern string.
        pattern: String,
        /// The compiler error message.
        message: String,
    },
}

/// Structural invariant violations reported by
/// [`SyntaxTree::validate`](crate::SyntaxTree::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node range {range:?} exceeds source length {len}")]
    /// A range ends past the end of the source, or starts after it ends.
    OutOfBounds {
        /// The offending range.
        range: Range<usize>,
        /// Source length in bytes.
        len: usize,
    },

    #[error("offset {offset} is not on a char boundary")]
    /// A range boundary splits a UTF-8 sequence.
    NotCharBoundary {
        /// The offending byte offset.
        offset: usize,
    },

    #[error("gap in coverage: expected a node at {expected}, next node starts at {found}")]
    /// Sibling nodes leave bytes uncovered.
    Gap {
        /// Where the next node should have started.
        expected: usize,
        /// Where it actually started.
        found: usize,
    },

    #[error("overlapping nodes: expected a node at {expected}, next node starts at {found}")]
    /// Sibling nodes overlap or are out of order.
    Overlap {
        /// Where the next node should have started.
        expected: usize,
        /// Where it actually started.
        found: usize,
    },

    #[error("nodes cover only {covered} of {len} bytes")]
    /// The last sibling ends before the end of the covered span.
    Incomplete {
        /// End of the last covering node.
        covered: usize,
        /// End the nodes were required to reach.
        len: usize,
    },

    #[error("content range {content:?} lies outside node range {full:?}")]
    /// A formatted node's content escapes its full range.
    ContentOutsideNode {
        /// The content range.
        content: Range<usize>,
        /// The full node range.
        full: Range<usize>,
    },

    #[error("marker range {marker:?} is outside {full:?} or overlaps content {content:?}")]
    /// A marker range escapes the node or intersects the content.
    MarkerInsideContent {
        /// The marker range.
        marker: Range<usize>,
        /// The content range.
        content: Range<usize>,
        /// The full node range.
        full: Range<usize>,
    },

    #[error("child range {child:?} lies outside parent range {parent:?}")]
    /// A child node escapes its parent.
    ChildOutsideParent {
        /// The child range.
        child: Range<usize>,
        /// The parent range.
        parent: Range<usize>,
    },
}
