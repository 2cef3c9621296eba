//! Built-in formatters.
//!
//! | formatter       | kind   | priority |
//! |-----------------|--------|----------|
//! | list            | block  | 250      |
//! | header          | block  | 200      |
//! | bold            | inline | 150      |
//! | inline code     | inline | 140      |
//! | strikethrough   | inline | 130      |
//! | italic          | inline | 100      |

pub mod header;
pub mod inline;
pub mod list;

pub use header::HeaderFormatter;
pub use inline::InlineFormatter;
pub use list::ListFormatter;

use crate::formatter::BlockFormatter;
use crate::options::ParseOptions;

/// The default block formatters enabled by `options`, unsorted.
pub fn default_block_formatters(options: &ParseOptions) -> Vec<Box<dyn BlockFormatter>> {
    let mut formatters: Vec<Box<dyn BlockFormatter>> = Vec::new();
    if options.headers {
        formatters.push(Box::new(HeaderFormatter::new()));
    }
    if options.lists {
        formatters.push(Box::new(
            ListFormatter::new().with_indent_width(options.list_indent_width),
        ));
    }
    formatters
}

/// The default inline formatters enabled by `options`, unsorted.
pub fn default_inline_formatters(options: &ParseOptions) -> Vec<InlineFormatter> {
    let mut formatters = vec![InlineFormatter::bold()];
    if options.strikethrough {
        formatters.push(InlineFormatter::strikethrough());
    }
    if options.inline_code {
        formatters.push(InlineFormatter::inline_code());
    }
    formatters.push(InlineFormatter::italic());
    formatters
}
