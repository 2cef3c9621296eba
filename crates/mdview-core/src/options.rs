//! Parser configuration.

use crate::formatters::list::DEFAULT_LIST_INDENT_WIDTH;
use std::time::Duration;

/// Default nesting limit for re-scanning formatted content.
pub const DEFAULT_MAX_INLINE_DEPTH: usize = 8;

/// Default latency budget; slower parses are reported with `tracing::warn!`.
pub const DEFAULT_SLOW_PARSE_THRESHOLD: Duration = Duration::from_millis(10);

/// Options for building a [`MarkdownParser`](crate::MarkdownParser).
///
/// The formatter toggles only affect the default registry
/// ([`MarkdownParser::with_options`](crate::MarkdownParser::with_options)); bold and italic are
/// always registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Register the `#` header block formatter.
    pub headers: bool,
    /// Register the list block formatter.
    pub lists: bool,
    /// Register the `` `code` `` inline formatter.
    pub inline_code: bool,
    /// Register the `~~strike~~` inline formatter.
    pub strikethrough: bool,
    /// Leading whitespace characters per list nesting level.
    pub list_indent_width: usize,
    /// How deep formatted content is re-scanned for nested formatting. `0` disables nesting.
    pub max_inline_depth: usize,
    /// Parses slower than this are logged as warnings.
    pub slow_parse_threshold: Duration,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            headers: true,
            lists: true,
            inline_code: true,
            strikethrough: true,
            list_indent_width: DEFAULT_LIST_INDENT_WIDTH,
            max_inline_depth: DEFAULT_MAX_INLINE_DEPTH,
            slow_parse_threshold: DEFAULT_SLOW_PARSE_THRESHOLD,
        }
    }
}
