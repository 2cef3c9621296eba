use mdview_core::{
    BlockFormatter, FormattingType, HeaderFormatter, InlineFormatter, ListFormatter,
    MarkdownFormatter, MarkdownParser, ParseOptions, ParserError, SyntaxNode,
};
use pretty_assertions::assert_eq;

#[test]
fn test_invalid_pattern_is_reported() {
    let err = InlineFormatter::new(FormattingType::Bold, "(unclosed").unwrap_err();
    match &err {
        ParserError::InvalidPattern { kind, pattern, .. } => {
            assert_eq!(*kind, FormattingType::Bold);
            assert_eq!(pattern, "(unclosed");
        }
    }
    assert!(err.to_string().contains("(unclosed"));
}

#[test]
fn test_equal_priorities_keep_registration_order() {
    let parser = MarkdownParser::with_formatters(
        vec![
            Box::new(HeaderFormatter::new().with_priority(10)),
            Box::new(ListFormatter::new().with_priority(10)),
        ],
        vec![
            InlineFormatter::new(FormattingType::InlineCode, "~([^~]+)~").unwrap(),
            InlineFormatter::strikethrough().with_priority(100),
        ],
        ParseOptions::default(),
    );
    let inline: Vec<_> = parser
        .inline_formatters()
        .iter()
        .map(InlineFormatter::formatting_type)
        .collect();
    assert_eq!(
        inline,
        vec![FormattingType::InlineCode, FormattingType::Strikethrough]
    );

    // With equal priority the header formatter is tried first, and it rejects list lines.
    let tree = parser.parse("# h\n- item");
    assert!(tree.nodes()[0].is_formatted());
    assert!(tree.nodes()[2].is_container());
}

#[test]
fn test_priority_override_changes_precedence() {
    // Italic outranks bold, but bold still wins where it starts first.
    let parser = MarkdownParser::with_formatters(
        vec![Box::new(HeaderFormatter::new())],
        vec![
            InlineFormatter::bold(),
            InlineFormatter::italic().with_priority(500),
        ],
        ParseOptions::default(),
    );
    assert_eq!(
        parser.inline_formatters()[0].formatting_type(),
        FormattingType::Italic
    );
    let tree = parser.parse("**a**");
    assert_eq!(
        tree.nodes()[0].as_formatted().map(|f| f.kind),
        Some(FormattingType::Bold)
    );
}

#[test]
fn test_custom_inline_pattern() {
    let highlight = InlineFormatter::new(FormattingType::Strikethrough, r"==([^=]+)==").unwrap();
    let parser =
        MarkdownParser::with_formatters(Vec::new(), vec![highlight], ParseOptions::default());
    let tree = parser.parse("x ==mark== y");
    let node = tree.nodes()[1].as_formatted().unwrap();
    assert_eq!(node.full_range, 2..10);
    assert_eq!(tree.text(node.content_range.clone()), "mark");
    assert_eq!(node.marker_ranges, vec![2..4, 8..10]);
}

#[test]
fn test_disabled_formatters() {
    let parser = MarkdownParser::with_options(ParseOptions {
        headers: false,
        lists: false,
        inline_code: false,
        strikethrough: false,
        ..ParseOptions::default()
    });
    let tree = parser.parse("# h\n- `a` ~~b~~ **c**");
    let kinds: Vec<_> = tree
        .nodes()
        .iter()
        .map(|n| n.as_formatted().map(|f| f.kind))
        .collect();
    assert_eq!(kinds, vec![None, None, None, Some(FormattingType::Bold)]);
    assert_eq!(tree.text(tree.nodes()[2].range()), "- `a` ~~b~~ ");
    assert!(tree.nodes().iter().all(|n| !n.is_container()));
}

#[test]
fn test_depth_zero_disables_nesting() {
    let parser = MarkdownParser::with_options(ParseOptions {
        max_inline_depth: 0,
        ..ParseOptions::default()
    });
    let tree = parser.parse("**a `b` c**");
    let bold = tree.nodes()[0].as_formatted().unwrap();
    assert_eq!(bold.children, vec![SyntaxNode::Text(2..9)]);

    let tree = MarkdownParser::new().parse("**a `b` c**");
    let bold = tree.nodes()[0].as_formatted().unwrap();
    assert_eq!(bold.children.len(), 3);
}

#[test]
fn test_formatter_queries_on_ranges() {
    let source = "pre **x** and **y**";
    let bold = InlineFormatter::bold();
    assert!(bold.can_parse(source, 0..source.len()));
    assert!(!bold.can_parse(source, 0..4));
    let ranges: Vec<_> = bold
        .find_matches(source, 0..source.len())
        .iter()
        .map(SyntaxNode::range)
        .collect();
    assert_eq!(ranges, vec![4..9, 14..19]);

    let header = HeaderFormatter::new();
    assert!(header.can_parse("## t", 0..4));
    assert_eq!(header.parse("## t", 0..4).map(|n| n.range()), Some(0..4));

    let list = ListFormatter::new().with_indent_width(4);
    assert_eq!(list.indent_width(), 4);
    assert!(list.can_parse_line("    - nested"));
    assert!(list.can_parse("1. one", 0..6));
}

#[test]
fn test_wide_indent_width_levels() {
    let parser = MarkdownParser::with_options(ParseOptions {
        list_indent_width: 4,
        ..ParseOptions::default()
    });
    let tree = parser.parse("- a\n  - b\n    - c");
    let list = tree.nodes()[0].as_container().unwrap();
    let levels: Vec<_> = list
        .children
        .iter()
        .filter_map(|c| match c.as_container()?.kind {
            mdview_core::ContainerType::ListItem { level, .. } => Some(level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![0, 0, 1]);
}

#[test]
fn test_custom_registry_keeps_its_own_indent_width() {
    let options = ParseOptions {
        list_indent_width: 4,
        ..ParseOptions::default()
    };
    let parser = MarkdownParser::with_formatters(
        vec![Box::new(ListFormatter::new())],
        Vec::new(),
        options,
    );
    assert_eq!(parser.options().list_indent_width, 4);

    let tree = parser.parse("- a\n  - b");
    let list = tree.nodes()[0].as_container().unwrap();
    assert_eq!(
        list.children[1].as_container().map(|item| &item.kind),
        Some(&mdview_core::ContainerType::ListItem {
            level: 1,
            marker: "-".to_string(),
        })
    );
}
