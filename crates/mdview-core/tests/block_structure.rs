use mdview_core::{ContainerType, FormattingType, SyntaxNode, SyntaxTree, parse};
use pretty_assertions::assert_eq;

fn texts(tree: &SyntaxTree) -> Vec<&str> {
    tree.nodes().iter().map(|n| tree.text(n.range())).collect()
}

#[test]
fn test_newlines_are_their_own_nodes() {
    let tree = parse("one\ntwo\n");
    assert_eq!(texts(&tree), vec!["one", "\n", "two", "\n"]);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_blank_lines() {
    let tree = parse("a\n\n\nb");
    assert_eq!(texts(&tree), vec!["a", "\n", "\n", "\n", "b"]);
}

#[test]
fn test_crlf_document() {
    let tree = parse("# Title\r\n- item\r\ntext");
    assert_eq!(
        texts(&tree),
        vec!["# Title", "\r\n", "- item", "\r\n", "text"]
    );
    assert!(tree.nodes()[0].is_formatted());
    assert!(tree.nodes()[2].is_container());
    assert!(tree.validate().is_ok());
}

#[test]
fn test_all_header_levels() {
    for level in 1..=6 {
        let text = format!("{} Level", "#".repeat(level));
        let tree = parse(&text);
        let header = tree.nodes()[0].as_formatted().unwrap();
        assert_eq!(header.kind, FormattingType::header(level).unwrap());
        assert_eq!(header.marker_ranges, vec![0..level]);
        assert_eq!(tree.text(header.content_range.clone()), "Level");
    }
}

#[test]
fn test_header_content_is_inline_scanned() {
    let tree = parse("## A **bold** title");
    assert_eq!(tree.nodes().len(), 1);
    let header = tree.nodes()[0].as_formatted().unwrap();
    assert_eq!(header.kind, FormattingType::Header2);
    let kinds: Vec<_> = header
        .children
        .iter()
        .map(|c| c.as_formatted().map(|f| f.kind))
        .collect();
    assert_eq!(kinds, vec![None, Some(FormattingType::Bold), None]);
    assert_eq!(tree.text(header.children[1].range()), "**bold**");
}

#[test]
fn test_header_whitespace_runs() {
    let tree = parse("#\tTabbed");
    let header = tree.nodes()[0].as_formatted().unwrap();
    assert_eq!(tree.text(header.content_range.clone()), "Tabbed");

    let tree = parse("###   spaced");
    let header = tree.nodes()[0].as_formatted().unwrap();
    assert_eq!(header.marker_ranges, vec![0..3]);
    assert_eq!(tree.text(header.content_range.clone()), "spaced");
}

#[test]
fn test_list_items_cover_container() {
    let tree = parse("- a\n- b\n- c\nafter");
    let list = tree.nodes()[0].as_container().unwrap();
    assert_eq!(list.full_range, 0..11);
    assert_eq!(list.metadata.item_count, Some(3));
    let ranges: Vec<_> = list.children.iter().map(SyntaxNode::range).collect();
    assert_eq!(ranges, vec![0..4, 4..8, 8..11]);
    assert_eq!(texts(&tree)[1..], ["\n", "after"]);
}

#[test]
fn test_list_kind_comes_from_first_item() {
    let tree = parse("* a\n- b\n1. c");
    let list = tree.nodes()[0].as_container().unwrap();
    assert_eq!(list.kind, ContainerType::UnorderedList { marker: '*' });
    assert_eq!(list.children.len(), 3);
    let markers: Vec<_> = list
        .children
        .iter()
        .map(|c| match &c.as_container().unwrap().kind {
            ContainerType::ListItem { marker, .. } => marker.clone(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(markers, vec!["*", "-", "1."]);
}

#[test]
fn test_plus_bullet_list() {
    let tree = parse("+ x");
    let list = tree.nodes()[0].as_container().unwrap();
    assert_eq!(list.kind, ContainerType::UnorderedList { marker: '+' });
}

#[test]
fn test_nested_levels() {
    let tree = parse("- a\n  - b\n    - c\n   - d");
    let list = tree.nodes()[0].as_container().unwrap();
    let levels: Vec<_> = list
        .children
        .iter()
        .map(|c| match c.as_container().unwrap().kind {
            ContainerType::ListItem { level, .. } => level,
            _ => usize::MAX,
        })
        .collect();
    assert_eq!(levels, vec![0, 1, 2, 1]);
}

#[test]
fn test_blank_line_splits_lists() {
    let tree = parse("- a\n\n- b");
    assert_eq!(tree.nodes().len(), 4);
    assert!(tree.nodes()[0].is_container());
    assert!(tree.nodes()[3].is_container());
}

#[test]
fn test_list_item_content_is_inline_scanned() {
    let tree = parse("- **a** `b`");
    let list = tree.nodes()[0].as_container().unwrap();
    let item = list.children[0].as_container().unwrap();
    assert_eq!(item.metadata.marker_range, Some(0..1));
    let kinds: Vec<_> = item
        .children
        .iter()
        .map(|c| c.as_formatted().map(|f| f.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(FormattingType::Bold),
            None,
            Some(FormattingType::InlineCode)
        ]
    );
}

#[test]
fn test_list_beats_header_and_emphasis() {
    // A bullet line starting with `*` is a list item, not italic.
    let tree = parse("* not *italic*");
    let list = tree.nodes()[0].as_container().unwrap();
    let item = list.children[0].as_container().unwrap();
    assert!(item.children.iter().any(|c| {
        c.as_formatted()
            .is_some_and(|f| f.kind == FormattingType::Italic)
    }));

    let tree = parse("- # heading text");
    assert!(tree.nodes()[0].is_container());
}

#[test]
fn test_inline_does_not_span_lines() {
    let tree = parse("**a\nb**");
    assert!(tree.nodes().iter().all(SyntaxNode::is_text));
}
