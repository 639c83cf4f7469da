use markweave_engine::hast::Node;
use markweave_engine::{Options, RenderOptions, to_hast, to_html};
use markweave_syntax::util::constant::NESTING_DEPTH_MAX;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn html(input: &str) -> String {
    to_html(input, &Options::default()).unwrap()
}

fn gfm(input: &str) -> String {
    to_html(input, &Options::gfm()).unwrap()
}

#[test]
fn inner_star_stays_inside_strong() {
    assert_eq!(html("**a*b**"), "<p><strong>a*b</strong></p>");
}

#[rstest]
#[case("[x][1]", "<p>[x][1]</p>")]
#[case("[x][1]\n\n[1]: /u", "<p><a href=\"/u\">x</a></p>")]
#[case("[1]: /u\n\n[x][1]", "<p><a href=\"/u\">x</a></p>")]
#[case("[x]\n\n[x]: /u \"t\"", "<p><a href=\"/u\" title=\"t\">x</a></p>")]
fn references_resolve_or_stay_literal(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(html(input), expected);
}

#[test]
fn fenced_code_keeps_content_and_language() {
    assert_eq!(
        html("```js\nlet a = 1;\n```"),
        "<pre><code class=\"language-js\">let a = 1;\n</code></pre>"
    );
    assert_eq!(html("````\na\n```"), "<pre><code>a\n```\n</code></pre>");
}

#[test]
fn tight_and_loose_lists() {
    assert_eq!(html("1. a\n2. b"), "<ol>\n<li>a</li>\n<li>b</li>\n</ol>");
    assert_eq!(
        html("1. a\n\n2. b"),
        "<ol>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ol>"
    );
    assert_eq!(html("3. a"), "<ol start=\"3\">\n<li>a</li>\n</ol>");
    assert_eq!(
        html("- foo\n-   \n- bar"),
        "<ul>\n<li>foo</li>\n<li></li>\n<li>bar</li>\n</ul>"
    );
    assert_eq!(
        html("* a\n  > b\n  >\n* c"),
        "<ul>\n<li>a\n<blockquote>\n<p>b</p>\n</blockquote>\n</li>\n<li>c</li>\n</ul>"
    );
}

#[test]
fn blank_quote_line_between_paragraphs() {
    assert_eq!(html("a\n>\nb"), "<p>a</p>\n<blockquote>\n</blockquote>\n<p>b</p>");
    assert_eq!(html("- a\n-\n- b"), "<ul>\n<li>a</li>\n<li></li>\n<li>b</li>\n</ul>");
}

#[test]
fn deep_nesting_renders() {
    let rendered = html(&format!("{} a", ">".repeat(5000)));

    assert!(rendered.starts_with("<blockquote>"));
    assert!(rendered.matches("<blockquote>").count() <= NESTING_DEPTH_MAX);
    assert!(rendered.contains('a'));
}

#[test]
fn table_cells_carry_alignment() {
    assert_eq!(
        gfm("a|b|c\n---|:--:|--\nd|e"),
        "<table>\n<thead>\n<tr>\n<th>a</th>\n<th align=\"center\">b</th>\n<th>c</th>\n</tr>\n</thead>\n\
         <tbody>\n<tr>\n<td>d</td>\n<td align=\"center\">e</td>\n<td></td>\n</tr>\n</tbody>\n</table>"
    );
}

#[test]
fn dangerous_html_is_gated() {
    assert_eq!(html("<div>"), "");

    let options = Options {
        render: RenderOptions {
            allow_dangerous_html: true,
            ..RenderOptions::default()
        },
        ..Options::default()
    };
    let Node::Root(root) = to_hast("<div>", &options).unwrap() else {
        panic!("expected a root");
    };
    assert!(matches!(&root.children[0], Node::Raw(raw) if raw.value == "<div>"));
    assert_eq!(to_html("<div>", &options).unwrap(), "<div>");
}

#[test]
fn strikethrough_renders_as_del() {
    assert_eq!(gfm("~~a~~"), "<p><del>a</del></p>");
}

#[test]
fn footnotes_collect_into_a_section() {
    let expected = "<p>a<sup><a href=\"#user-content-fn-b\" id=\"user-content-fnref-b\" \
        data-footnote-ref aria-describedby=\"footnote-label\">1</a></sup></p>\n\
        <section data-footnotes class=\"footnotes\">\
        <h2 class=\"sr-only\" id=\"footnote-label\">Footnotes</h2>\n\
        <ol>\n<li id=\"user-content-fn-b\">\n<p>c <a href=\"#user-content-fnref-b\" \
        data-footnote-backref=\"\" aria-label=\"Back to reference 1\" \
        class=\"data-footnote-backref\">↩</a></p>\n</li>\n</ol>\n</section>";

    assert_eq!(gfm("a[^b]\n\n[^b]: c"), expected);
}

#[test]
fn clobber_prefix_changes_footnote_ids() {
    let options = Options {
        render: RenderOptions {
            clobber_prefix: Some(String::new()),
            footnote_label: Some("Notes".into()),
            ..RenderOptions::default()
        },
        ..Options::gfm()
    };
    let html = to_html("a[^b]\n\n[^b]: c", &options).unwrap();

    assert!(html.contains("href=\"#fn-b\""));
    assert!(html.contains("id=\"fnref-b\""));
    assert!(html.contains(">Notes</h2>"));
}
