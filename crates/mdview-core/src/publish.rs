//! Last-writer-wins publication of parse results.
//!
//! A host that parses off the interaction thread takes a [`ParseTicket`] when an edit happens,
//! parses, and then offers the tree to [`TreePublisher::publish`]. A tree is published only if
//! no newer ticket was issued in the meantime; stale results are dropped, never merged.

use crate::parser::MarkdownParser;
use crate::tree::SyntaxTree;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Identifies one edit in a monotonically increasing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParseTicket {
    seq: u64,
}

impl ParseTicket {
    /// The edit sequence number (starts at 1).
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A tree accepted by a [`TreePublisher`].
#[derive(Debug, Clone)]
pub struct PublishedTree {
    /// Sequence number of the edit the tree was parsed for.
    pub seq: u64,
    /// The tree.
    pub tree: Arc<SyntaxTree>,
}

#[derive(Debug, Default)]
struct PublisherState {
    issued: u64,
    published: Option<PublishedTree>,
}

/// Hands out edit tickets and keeps the newest published tree.
#[derive(Debug, Default)]
pub struct TreePublisher {
    state: Mutex<PublisherState>,
}

impl TreePublisher {
    /// Create a publisher with no tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PublisherState> {
        // The state is two plain values; a panic elsewhere cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new edit. Any ticket issued earlier becomes stale.
    pub fn begin_edit(&self) -> ParseTicket {
        let mut state = self.lock();
        state.issued += 1;
        ParseTicket { seq: state.issued }
    }

    /// Returns `true` if `ticket` is still the newest one.
    pub fn is_current(&self, ticket: ParseTicket) -> bool {
        self.lock().issued == ticket.seq
    }

    /// Publish `tree` for `ticket`. Returns `false` (and drops the tree) if a newer edit began.
    pub fn publish(&self, ticket: ParseTicket, tree: SyntaxTree) -> bool {
        let mut state = self.lock();
        if state.issued != ticket.seq {
            tracing::trace!(
                seq = ticket.seq,
                newest = state.issued,
                "discarding superseded syntax tree"
            );
            return false;
        }
        if state
            .published
            .as_ref()
            .is_some_and(|current| current.seq >= ticket.seq)
        {
            return false;
        }
        state.published = Some(PublishedTree {
            seq: ticket.seq,
            tree: Arc::new(tree),
        });
        true
    }

    /// Take a ticket, parse `text` and publish the result, all on the calling thread.
    pub fn parse_and_publish(&self, parser: &MarkdownParser, text: &str) -> bool {
        let ticket = self.begin_edit();
        let tree = parser.parse(text);
        self.publish(ticket, tree)
    }

    /// The newest published tree with its sequence number.
    pub fn latest(&self) -> Option<PublishedTree> {
        self.lock().published.clone()
    }

    /// The newest published tree.
    pub fn latest_tree(&self) -> Option<Arc<SyntaxTree>> {
        self.lock()
            .published
            .as_ref()
            .map(|published| Arc::clone(&published.tree))
    }

    /// Sequence number of the newest issued ticket (0 before the first edit).
    pub fn latest_seq(&self) -> u64 {
        self.lock().issued
    }
}
