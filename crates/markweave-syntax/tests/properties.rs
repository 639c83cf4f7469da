use markweave_syntax::event::{Kind, Name};
use markweave_syntax::lexer::Preprocessor;
use markweave_syntax::mdast::{AlignKind, Node, ReferenceKind};
use markweave_syntax::util::constant::NESTING_DEPTH_MAX;
use markweave_syntax::{ParseOptions, parse, parse_chunks, to_mdast};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn children(input: &str, options: &ParseOptions) -> Vec<Node> {
    match to_mdast(input, options).unwrap() {
        Node::Root(root) => root.children,
        node => panic!("expected a root, found {node:?}"),
    }
}

fn first(input: &str) -> Node {
    children(input, &ParseOptions::default()).remove(0)
}

fn paragraph(input: &str) -> Vec<Node> {
    match first(input) {
        Node::Paragraph(paragraph) => paragraph.children,
        node => panic!("expected a paragraph, found {node:?}"),
    }
}

/// Every input compiles, so every enter has its exit.
#[rstest]
#[case("")]
#[case("\n\n\n")]
#[case("*a **b** c*")]
#[case("***a*b**c*")]
#[case("[a [b](c)](d)")]
#[case("![a ![b](c)](d)")]
#[case("> - a\n>   b\nc\n\n> ```\n> d")]
#[case("- a\n  - b\n    - c\n\n  d\n- e")]
#[case("1. a\n\n   > b\n2. c")]
#[case("<div>\n\n*a*\n\n</div>")]
#[case("[a]: b\n[a]\n[^c]: d\n\n[^c]")]
#[case("a\\\nb  \nc\t\n")]
#[case("| a |\n| - |\n| b |\n> c")]
#[case("\u{0}\r\n\r\t\u{feff}x")]
#[case("`` a ` b ``")]
#[case("<a href=\"x\"\n  title='y'>")]
#[case("&amp; &#123; &#x1F600; &bogus;")]
#[case("a\n>\nb")]
#[case("- a\n-\n- b")]
#[case("1. a\n<")]
#[case("> `a\n`")]
#[case("> a\n>\n> b")]
#[case("-\n\n- a")]
#[case("> *a\nb*")]
#[case("- a\n  >\n- b")]
#[case("a\\*b")]
#[case("a\\|b")]
#[case("~~a~~ [x - [ ] a")]
fn balanced(#[case] input: &str) {
    assert!(to_mdast(input, &ParseOptions::default()).is_ok());
    assert!(to_mdast(input, &ParseOptions::gfm()).is_ok());
}

#[test]
fn inner_star_cannot_close_strong() {
    let nodes = paragraph("**a*b**");

    assert_eq!(nodes.len(), 1);
    let Node::Strong(strong) = &nodes[0] else {
        panic!("expected strong, found {:?}", nodes[0]);
    };
    assert_eq!(strong.children.len(), 1);
    assert_eq!(strong.children[0].value(), Some("a*b"));
}

#[rstest]
#[case("*a**", "a*")]
#[case("**a*", "*a")]
#[case("a*b*c", "abc")]
#[case("_a_b", "_a_b")]
fn attention_leftovers_are_text(#[case] input: &str, #[case] text: &str) {
    assert_eq!(first(input).text_content(), text);
}

#[test]
fn undefined_reference_is_text() {
    let nodes = paragraph("[x][1]");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].value(), Some("[x][1]"));
}

#[rstest]
#[case("[x][1]\n\n[1]: /u")]
#[case("[1]: /u\n\n[x][1]")]
fn reference_resolves_wherever_the_definition_is(#[case] input: &str) {
    let nodes = children(input, &ParseOptions::default());
    let link = nodes
        .iter()
        .find_map(|node| match node {
            Node::Paragraph(paragraph) => paragraph.children.first(),
            _ => None,
        })
        .unwrap();

    let Node::LinkReference(reference) = link else {
        panic!("expected a link reference, found {link:?}");
    };
    assert_eq!(reference.identifier, "1");
    assert_eq!(reference.reference_kind, ReferenceKind::Full);

    let Some(Node::Definition(definition)) = nodes
        .iter()
        .find(|node| matches!(node, Node::Definition(_)))
    else {
        panic!("expected a definition");
    };
    assert_eq!(definition.url, "/u");
}

#[test]
fn fenced_code_with_language() {
    let Node::Code(code) = first("```js\nlet a = 1;\n\n  b\n```\nc") else {
        panic!("expected code");
    };
    assert_eq!(code.lang.as_deref(), Some("js"));
    assert_eq!(code.value, "let a = 1;\n\n  b");
}

#[test]
fn short_closing_fence_does_not_close() {
    let nodes = children("````\na\n```\n", &ParseOptions::default());
    assert_eq!(nodes.len(), 1);

    let Node::Code(code) = &nodes[0] else {
        panic!("expected code");
    };
    assert_eq!(code.value, "a\n```");
}

#[test]
fn ordered_list_starts_at_its_number() {
    let Node::List(list) = first("1. a\n2. b") else {
        panic!("expected a list");
    };
    assert!(list.ordered);
    assert_eq!(list.start, Some(1));
}

#[rstest]
#[case("1. a\n2. b", 2, false)]
#[case("1. a\n\n2. b", 2, true)]
#[case("- foo\n-   \n- bar", 3, false)]
#[case("* a\n  > b\n  >\n* c", 2, false)]
#[case("- a\n  - b\n\n- c", 2, true)]
#[case("- a\n-\n\n- b", 3, true)]
fn tight_and_loose_lists(#[case] input: &str, #[case] items: usize, #[case] spread: bool) {
    let Node::List(list) = first(input) else {
        panic!("expected a list");
    };
    assert_eq!(list.children.len(), items);
    assert_eq!(list.spread, spread);
}

#[rstest]
#[case("a\n>\nb", vec!["paragraph", "blockquote", "paragraph"])]
#[case("> a\n>\n> b", vec!["blockquote"])]
#[case("- a\n-\n- b", vec!["list"])]
#[case("-\n\n- a", vec!["list"])]
#[case("> a\n\nb", vec!["blockquote", "paragraph"])]
fn empty_container_lines(#[case] input: &str, #[case] expected: Vec<&str>) {
    let nodes = children(input, &ParseOptions::default());
    let types: Vec<&str> = nodes.iter().map(Node::type_name).collect();
    assert_eq!(types, expected);
}

#[test]
fn empty_items_stay_in_their_list() {
    let Node::List(list) = first("- a\n-\n- b") else {
        panic!("expected a list");
    };
    let texts: Vec<String> = list.children.iter().map(Node::text_content).collect();
    assert_eq!(texts, vec!["a", "", "b"]);

    let Node::Blockquote(quote) = first("> a\n>\n> b") else {
        panic!("expected a block quote");
    };
    let types: Vec<&str> = quote.children.iter().map(Node::type_name).collect();
    assert_eq!(types, vec!["paragraph", "paragraph"]);
}

#[test]
fn table_alignment() {
    let nodes = children("a|b|c\n---|:--:|--", &ParseOptions::gfm());
    let Node::Table(table) = &nodes[0] else {
        panic!("expected a table, found {:?}", nodes[0]);
    };

    assert_eq!(
        table.align,
        vec![AlignKind::None, AlignKind::Center, AlignKind::None]
    );
    assert_eq!(table.children.len(), 1);
}

#[test]
fn table_never_interrupts_a_paragraph() {
    let nodes = children("a\n| b |\n| - |", &ParseOptions::gfm());
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].type_name(), "paragraph");
}

#[test]
fn lazy_paragraph_continues_in_block_quote() {
    let nodes = children("> a\nb", &ParseOptions::default());
    assert_eq!(nodes.len(), 1);

    let Node::Blockquote(quote) = &nodes[0] else {
        panic!("expected a block quote");
    };
    assert_eq!(quote.children.len(), 1);
    assert_eq!(quote.children[0].text_content(), "a\nb");
}

#[rstest]
#[case("> `a\n`", "inlineCode")]
#[case("> *a\nb*", "emphasis")]
#[case("> [a\nb](c)", "link")]
fn lazy_line_closes_inline_constructs_inside_the_quote(#[case] input: &str, #[case] inline: &str) {
    let nodes = children(input, &ParseOptions::default());
    assert_eq!(nodes.len(), 1);

    let Node::Blockquote(quote) = &nodes[0] else {
        panic!("expected a block quote, found {:?}", nodes[0]);
    };
    assert_eq!(quote.children.len(), 1);
    let Node::Paragraph(paragraph) = &quote.children[0] else {
        panic!("expected a paragraph, found {:?}", quote.children[0]);
    };
    assert_eq!(paragraph.children[0].type_name(), inline);
}

#[test]
fn lazy_line_continues_a_list_item() {
    let Node::List(list) = first("1. a\n<") else {
        panic!("expected a list");
    };
    assert_eq!(list.children.len(), 1);
    assert_eq!(list.children[0].text_content(), "a\n<");
}

#[rstest]
#[case(&["a\r", "\nb"], "a\r\nb")]
#[case(&["> a\r", "\n> b"], "> a\r\n> b")]
#[case(&["", "\u{feff}a\r", "", "\n\tb"], "a\r\n\tb")]
fn input_written_in_pieces_parses_like_a_whole(#[case] pieces: &[&str], #[case] whole: &str) {
    let options = ParseOptions::default();
    let mut preprocessor = Preprocessor::new();
    let mut chunks = Vec::new();
    for piece in pieces {
        chunks.extend(preprocessor.write(piece));
    }
    chunks.extend(preprocessor.end());

    let (pieced, _) = parse_chunks(chunks, &options).unwrap();
    let (expected, _) = parse(whole, &options).unwrap();

    assert_eq!(pieced, expected);
    let line_endings = pieced
        .iter()
        .filter(|event| event.kind == Kind::Enter && event.name == Name::LineEnding)
        .count();
    assert_eq!(line_endings, 1);
}

#[rstest]
#[case("a\n".repeat(20_000), 1)]
#[case("a\n\n".repeat(20_000), 20_000)]
#[case("[".repeat(20_000), 1)]
#[case("*a ".repeat(10_000), 1)]
#[case("- a\n".repeat(10_000), 1)]
#[case("> a\n".repeat(10_000), 1)]
fn large_inputs(#[case] input: String, #[case] blocks: usize) {
    assert_eq!(children(&input, &ParseOptions::default()).len(), blocks);
}

#[test]
fn deep_block_quotes_nest_up_to_the_limit() {
    let nodes = children(&format!("{} a", ">".repeat(5000)), &ParseOptions::default());
    assert_eq!(nodes.len(), 1);

    let mut depth = 1;
    let mut node = &nodes[0];
    while let Some(child) = node.children().and_then(|children| children.first()) {
        depth += 1;
        node = child;
    }

    assert!(depth <= NESTING_DEPTH_MAX + 1);
    assert_eq!(node.value(), Some("a"));
}

#[test]
fn strikethrough_pairs_equal_runs() {
    let nodes = children("~~a~~ ~b~ ~~c~", &ParseOptions::gfm());
    let Node::Paragraph(paragraph) = &nodes[0] else {
        panic!("expected a paragraph");
    };

    let types: Vec<&str> = paragraph.children.iter().map(Node::type_name).collect();
    assert_eq!(types, vec!["delete", "text", "delete", "text"]);
    assert_eq!(paragraph.children[3].value(), Some(" ~~c~"));
}

#[test]
fn positions_track_lines_and_offsets() {
    let nodes = children("# a\n\nbc", &ParseOptions::default());
    let position = nodes[1].position().unwrap();

    assert_eq!(
        (position.start.line, position.start.column, position.start.offset),
        (3, 1, 5)
    );
    assert_eq!(
        (position.end.line, position.end.column, position.end.offset),
        (3, 3, 7)
    );
}
