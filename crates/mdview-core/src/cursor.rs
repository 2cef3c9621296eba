//! Read-only position queries over a [`SyntaxTree`].
//!
//! Markers are never hidden yet, so visual and logical positions coincide and every position
//! is valid; the mapping methods are the identity and keep their signatures for when marker
//! hiding lands.

use crate::tree::{SyntaxNode, SyntaxTree};
use std::ops::Range;

/// Maps between document offsets and visual (rendered) offsets for one tree.
#[derive(Debug, Clone, Copy)]
pub struct CursorMapper<'a> {
    tree: &'a SyntaxTree,
}

impl<'a> CursorMapper<'a> {
    /// Create a mapper for `tree`.
    pub fn new(tree: &'a SyntaxTree) -> Self {
        Self { tree }
    }

    /// The tree being queried.
    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// Visual offset to document offset.
    pub fn visual_to_logical(&self, visual: usize) -> usize {
        visual
    }

    /// Document offset to visual offset.
    pub fn logical_to_visual(&self, logical: usize) -> usize {
        logical
    }

    /// Nearest offset a caret may occupy.
    pub fn snap_to_valid_position(&self, offset: usize) -> usize {
        offset
    }

    /// Marker ranges of every top-level formatted node whose full range contains `offset`.
    pub fn markers_visible_at(&self, offset: usize) -> Vec<Range<usize>> {
        self.tree
            .nodes()
            .iter()
            .filter_map(SyntaxNode::as_formatted)
            .filter(|node| node.full_range.contains(&offset))
            .flat_map(|node| node.marker_ranges.iter().cloned())
            .collect()
    }

    /// The first top-level formatted node containing `offset`.
    pub fn formatted_node_at(&self, offset: usize) -> Option<&'a SyntaxNode> {
        self.tree
            .nodes()
            .iter()
            .find(|node| node.is_formatted() && node.contains(offset))
    }
}
