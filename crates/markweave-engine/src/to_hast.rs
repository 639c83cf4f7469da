//! # Document Tree to Render Tree
//!
//! One handler per document node type, dispatched by type name. Callers can
//! replace any handler, copy node types through untouched, or change what
//! happens to nodes without a handler.
//!
//! Block-level siblings are separated by `"\n"` text nodes so the
//! serialized HTML has one block per line.

use std::collections::HashMap;

use log::debug;
use markweave_syntax::mdast::{self, AlignKind, ReferenceKind};

use crate::hast::{self, Element, PropertyValue};

/// Turns one document node into zero or more render nodes.
///
/// The second node is the parent, when there is one.
pub type Handler = fn(&mut State<'_>, &mdast::Node, Option<&mdast::Node>) -> Vec<hast::Node>;

const DEFAULT_CLOBBER_PREFIX: &str = "user-content-";
const DEFAULT_FOOTNOTE_LABEL: &str = "Footnotes";
const FOOTNOTE_BACK_CONTENT: &str = "↩";

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Keep raw HTML from the document instead of dropping it.
    pub allow_dangerous_html: bool,
    /// Handlers by node type name, tried before the built-in ones.
    pub handlers: HashMap<String, Handler>,
    /// Used by [`State::unknown`] instead of the generic fallback.
    pub unknown_handler: Option<Handler>,
    /// Node type names copied into the render tree as they are.
    pub pass_through: Vec<String>,
    pub footnote_label: Option<String>,
    /// Label for back-references. `{n}` is replaced by the footnote number;
    /// without it, the default `Back to reference N` wording is used.
    pub footnote_back_label: Option<String>,
    /// Prefix for generated ids; defaults to `user-content-`.
    pub clobber_prefix: Option<String>,
}

struct LinkTarget {
    url: String,
    title: Option<String>,
}

/// Per-document transform state: the definitions and the footnotes seen so
/// far.
pub struct State<'a> {
    pub options: &'a RenderOptions,
    definitions: HashMap<String, LinkTarget>,
    footnote_definitions: HashMap<String, &'a mdast::Node>,
    footnote_order: Vec<String>,
    footnote_counts: HashMap<String, usize>,
}

/// Transform a document tree.
pub fn to_hast(tree: &mdast::Node, options: &RenderOptions) -> hast::Node {
    let mut state = State::new(tree, options);
    let mut nodes = state.one(tree, None);
    let mut root = match nodes.len() {
        1 if matches!(nodes[0], hast::Node::Root(_)) => nodes.remove(0),
        _ => hast::Node::Root(hast::Root {
            children: nodes,
            position: None,
        }),
    };

    if let Some(section) = state.footer()
        && let Some(children) = root.children_mut()
    {
        children.push(hast::Node::text("\n"));
        children.push(section);
    }
    debug!(
        "to_hast: {} footnotes, {} definitions",
        state.footnote_order.len(),
        state.definitions.len()
    );
    root
}

impl<'a> State<'a> {
    fn new(tree: &'a mdast::Node, options: &'a RenderOptions) -> Self {
        let mut state = State {
            options,
            definitions: HashMap::new(),
            footnote_definitions: HashMap::new(),
            footnote_order: Vec::new(),
            footnote_counts: HashMap::new(),
        };
        state.collect(tree);
        state
    }

    /// First definition of an identifier wins.
    fn collect(&mut self, node: &'a mdast::Node) {
        match node {
            mdast::Node::Definition(definition) => {
                self.definitions
                    .entry(definition.identifier.clone())
                    .or_insert_with(|| LinkTarget {
                        url: definition.url.clone(),
                        title: definition.title.clone(),
                    });
            }
            mdast::Node::FootnoteDefinition(definition) => {
                self.footnote_definitions
                    .entry(definition.identifier.clone())
                    .or_insert(node);
            }
            _ => {}
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect(child);
            }
        }
    }

    /// Transform one node.
    pub fn one(&mut self, node: &mdast::Node, parent: Option<&mdast::Node>) -> Vec<hast::Node> {
        let name = node.type_name();
        if let Some(handler) = self.options.handlers.get(name).copied() {
            return handler(self, node, parent);
        }
        if self.options.pass_through.iter().any(|kind| kind == name) {
            return vec![hast::Node::Passthrough(node.clone())];
        }
        match default_handler(name) {
            Some(handler) => handler(self, node, parent),
            None => self.unknown(node, parent),
        }
    }

    /// Transform the children of `parent`.
    pub fn all(&mut self, parent: &mdast::Node) -> Vec<hast::Node> {
        let mut result = Vec::new();
        if let Some(children) = parent.children() {
            for child in children {
                result.extend(self.one(child, Some(parent)));
            }
        }
        result
    }

    /// Transform a node no handler claims: the configured unknown handler,
    /// or a `div` of its children, or its value as text.
    pub fn unknown(&mut self, node: &mdast::Node, parent: Option<&mdast::Node>) -> Vec<hast::Node> {
        if let Some(handler) = self.options.unknown_handler {
            return handler(self, node, parent);
        }
        match node.value() {
            Some(value) if node.children().is_none() => vec![hast::Node::text(value)],
            _ => {
                let children = self.all(node);
                vec![element(node, "div", children)]
            }
        }
    }

    fn clobber_prefix(&self) -> &str {
        self.options
            .clobber_prefix
            .as_deref()
            .unwrap_or(DEFAULT_CLOBBER_PREFIX)
    }

    fn footer(&mut self) -> Option<hast::Node> {
        let prefix = self.clobber_prefix().to_string();
        let mut items = Vec::new();

        // Definitions can call further footnotes, which join the order.
        let mut reference_index = 0;
        while reference_index < self.footnote_order.len() {
            let id = self.footnote_order[reference_index].clone();
            reference_index += 1;
            let Some(definition) = self.footnote_definitions.get(&id).copied() else {
                continue;
            };
            let mut content = self.all(definition);
            let safe_id = normalize_uri(&id);
            let count = self.footnote_counts.get(&id).copied().unwrap_or(0);

            let mut back_references = Vec::new();
            for rereference in 1..=count {
                if !back_references.is_empty() {
                    back_references.push(hast::Node::text(" "));
                }
                let suffix = rereference_suffix(rereference);
                let link = Element::new("a", vec![hast::Node::text(FOOTNOTE_BACK_CONTENT)])
                    .with_string("href", format!("#{prefix}fnref-{safe_id}{suffix}"))
                    .with_string("data-footnote-backref", "")
                    .with_string("aria-label", self.back_label(reference_index - 1, rereference))
                    .with_property(
                        "class",
                        PropertyValue::SpaceSeparated(vec!["data-footnote-backref".into()]),
                    );
                back_references.push(hast::Node::Element(link));
            }

            match content.last_mut() {
                Some(hast::Node::Element(tail)) if tail.tag_name == "p" => {
                    match tail.children.last_mut() {
                        Some(hast::Node::Text(text)) => text.value.push(' '),
                        _ => tail.children.push(hast::Node::text(" ")),
                    }
                    tail.children.extend(back_references);
                }
                _ => content.extend(back_references),
            }

            let item = Element::new("li", wrap(content, true))
                .with_string("id", format!("{prefix}fn-{safe_id}"));
            items.push(hast::Node::Element(item));
        }

        if items.is_empty() {
            return None;
        }

        let label = self
            .options
            .footnote_label
            .as_deref()
            .unwrap_or(DEFAULT_FOOTNOTE_LABEL);
        let heading = Element::new("h2", vec![hast::Node::text(label)])
            .with_property("class", PropertyValue::SpaceSeparated(vec!["sr-only".into()]))
            .with_string("id", "footnote-label");
        let section = Element::new(
            "section",
            vec![
                hast::Node::Element(heading),
                hast::Node::text("\n"),
                hast::Node::Element(Element::new("ol", wrap(items, true))),
                hast::Node::text("\n"),
            ],
        )
        .with_property("data-footnotes", PropertyValue::Boolean(true))
        .with_property("class", PropertyValue::SpaceSeparated(vec!["footnotes".into()]));

        Some(hast::Node::Element(section))
    }

    fn back_label(&self, reference_index: usize, rereference: usize) -> String {
        let number = format!("{}{}", reference_index + 1, rereference_suffix(rereference));
        match &self.options.footnote_back_label {
            Some(label) => label.replace("{n}", &number),
            None => format!("Back to reference {number}"),
        }
    }
}

fn rereference_suffix(index: usize) -> String {
    if index > 1 {
        format!("-{index}")
    } else {
        String::new()
    }
}

/// Built-in handlers by node type name.
pub fn default_handler(name: &str) -> Option<Handler> {
    let handler: Handler = match name {
        "root" => root,
        "blockquote" => blockquote,
        "break" => hard_break,
        "code" => code,
        "definition" | "footnoteDefinition" => ignore,
        "delete" => delete,
        "emphasis" => emphasis,
        "footnoteReference" => footnote_reference,
        "heading" => heading,
        "html" => html,
        "image" => image,
        "imageReference" => image_reference,
        "inlineCode" => inline_code,
        "link" => link,
        "linkReference" => link_reference,
        "list" => list,
        "listItem" => list_item,
        "paragraph" => paragraph,
        "strong" => strong,
        "table" => table,
        "tableRow" => table_row,
        "tableCell" => table_cell,
        "text" => text,
        "thematicBreak" => thematic_break,
        _ => return None,
    };
    Some(handler)
}

/// Join nodes with line endings, and surround them with one when `loose`.
pub fn wrap(nodes: Vec<hast::Node>, loose: bool) -> Vec<hast::Node> {
    let mut result = Vec::with_capacity(nodes.len() * 2 + 1);
    let any = !nodes.is_empty();
    if loose {
        result.push(hast::Node::text("\n"));
    }
    for (index, node) in nodes.into_iter().enumerate() {
        if index > 0 {
            result.push(hast::Node::text("\n"));
        }
        result.push(node);
    }
    if loose && any {
        result.push(hast::Node::text("\n"));
    }
    result
}

/// Percent-encode characters that are not safe in a URL, keeping existing
/// escapes.
pub fn normalize_uri(value: &str) -> String {
    const SAFE: &str = "!#$&'()*+,-./:;=?@_~";
    let bytes = value.as_bytes();
    let mut result = String::with_capacity(value.len());

    for (index, char) in value.char_indices() {
        if char == '%'
            && bytes.get(index + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(index + 2).is_some_and(u8::is_ascii_hexdigit)
        {
            result.push(char);
        } else if char.is_ascii_alphanumeric() || SAFE.contains(char) {
            result.push(char);
        } else {
            let mut buffer = [0; 4];
            for byte in char.encode_utf8(&mut buffer).bytes() {
                result.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    result
}

fn element(node: &mdast::Node, tag_name: &str, children: Vec<hast::Node>) -> hast::Node {
    hast::Node::Element(Element::new(tag_name, children).with_position(node.position().cloned()))
}

fn ignore(_: &mut State<'_>, _: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    Vec::new()
}

fn root(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let children = state.all(node);
    vec![hast::Node::Root(hast::Root {
        children: wrap(children, false),
        position: node.position().cloned(),
    })]
}

fn blockquote(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let children = state.all(node);
    vec![element(node, "blockquote", wrap(children, true))]
}

fn hard_break(_: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    vec![element(node, "br", Vec::new()), hast::Node::text("\n")]
}

fn code(_: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let mdast::Node::Code(code) = node else {
        return Vec::new();
    };
    let value = if code.value.is_empty() {
        String::new()
    } else {
        format!("{}\n", code.value)
    };
    let mut inner = Element::new("code", vec![hast::Node::text(value)]);
    if let Some(lang) = &code.lang {
        inner = inner.with_property(
            "class",
            PropertyValue::SpaceSeparated(vec![format!("language-{lang}")]),
        );
    }
    vec![element(node, "pre", vec![hast::Node::Element(inner)])]
}

fn delete(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let children = state.all(node);
    vec![element(node, "del", children)]
}

fn emphasis(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let children = state.all(node);
    vec![element(node, "em", children)]
}

fn strong(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let children = state.all(node);
    vec![element(node, "strong", children)]
}

fn paragraph(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let children = state.all(node);
    vec![element(node, "p", children)]
}

fn heading(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let depth = match node {
        mdast::Node::Heading(heading) => heading.depth.clamp(1, 6),
        _ => 1,
    };
    let children = state.all(node);
    vec![element(node, &format!("h{depth}"), children)]
}

fn thematic_break(_: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    vec![element(node, "hr", Vec::new())]
}

fn text(_: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let value = node.value().unwrap_or_default();
    vec![hast::Node::Text(hast::Text {
        value: value.to_string(),
        position: node.position().cloned(),
    })]
}

fn inline_code(_: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let value = node.value().unwrap_or_default().replace(['\r', '\n'], " ");
    vec![element(node, "code", vec![hast::Node::text(value)])]
}

fn html(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    if !state.options.allow_dangerous_html {
        return Vec::new();
    }
    vec![hast::Node::Raw(hast::Raw {
        value: node.value().unwrap_or_default().to_string(),
        position: node.position().cloned(),
    })]
}

fn link(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let mdast::Node::Link(link) = node else {
        return Vec::new();
    };
    let children = state.all(node);
    vec![anchor(node, &link.url, link.title.as_deref(), children)]
}

fn anchor(node: &mdast::Node, url: &str, title: Option<&str>, children: Vec<hast::Node>) -> hast::Node {
    let mut anchor = Element::new("a", children)
        .with_string("href", normalize_uri(url))
        .with_position(node.position().cloned());
    if let Some(title) = title {
        anchor = anchor.with_string("title", title);
    }
    hast::Node::Element(anchor)
}

fn img(node: &mdast::Node, url: &str, alt: &str, title: Option<&str>) -> hast::Node {
    let mut img = Element::new("img", Vec::new())
        .with_string("src", normalize_uri(url))
        .with_string("alt", alt)
        .with_position(node.position().cloned());
    if let Some(title) = title {
        img = img.with_string("title", title);
    }
    hast::Node::Element(img)
}

fn image(_: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let mdast::Node::Image(image) = node else {
        return Vec::new();
    };
    vec![img(node, &image.url, &image.alt, image.title.as_deref())]
}

fn link_reference(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let mdast::Node::LinkReference(reference) = node else {
        return Vec::new();
    };
    let Some(target) = state.definitions.get(&reference.identifier) else {
        return revert(state, node);
    };
    let (url, title) = (target.url.clone(), target.title.clone());
    let children = state.all(node);
    vec![anchor(node, &url, title.as_deref(), children)]
}

fn image_reference(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let mdast::Node::ImageReference(reference) = node else {
        return Vec::new();
    };
    match state.definitions.get(&reference.identifier) {
        Some(target) => vec![img(node, &target.url, &reference.alt, target.title.as_deref())],
        None => revert(state, node),
    }
}

/// Render an undefined reference as the bracket syntax it was written with.
fn revert(state: &mut State<'_>, node: &mdast::Node) -> Vec<hast::Node> {
    let (kind, identifier, label) = match node {
        mdast::Node::LinkReference(reference) => {
            (reference.reference_kind, &reference.identifier, &reference.label)
        }
        mdast::Node::ImageReference(reference) => {
            (reference.reference_kind, &reference.identifier, &reference.label)
        }
        _ => return Vec::new(),
    };
    let suffix = match kind {
        ReferenceKind::Shortcut => "]".to_string(),
        ReferenceKind::Collapsed => "][]".to_string(),
        ReferenceKind::Full => format!("][{}]", label.as_deref().unwrap_or(identifier.as_str())),
    };

    if let mdast::Node::ImageReference(reference) = node {
        return vec![hast::Node::text(format!("![{}{suffix}", reference.alt))];
    }

    let mut contents = state.all(node);
    match contents.first_mut() {
        Some(hast::Node::Text(head)) => head.value.insert(0, '['),
        _ => contents.insert(0, hast::Node::text("[")),
    }
    match contents.last_mut() {
        Some(hast::Node::Text(tail)) => tail.value.push_str(&suffix),
        _ => contents.push(hast::Node::text(suffix)),
    }
    contents
}

fn footnote_reference(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let mdast::Node::FootnoteReference(reference) = node else {
        return Vec::new();
    };
    let prefix = state.clobber_prefix().to_string();
    let id = reference.identifier.clone();
    let safe_id = normalize_uri(&id);

    let index = match state.footnote_order.iter().position(|seen| *seen == id) {
        Some(index) => index,
        None => {
            state.footnote_order.push(id.clone());
            state.footnote_order.len() - 1
        }
    };
    let count = state.footnote_counts.entry(id).or_insert(0);
    *count += 1;
    let reuse = rereference_suffix(*count);

    let link = Element::new("a", vec![hast::Node::text((index + 1).to_string())])
        .with_string("href", format!("#{prefix}fn-{safe_id}"))
        .with_string("id", format!("{prefix}fnref-{safe_id}{reuse}"))
        .with_property("data-footnote-ref", PropertyValue::Boolean(true))
        .with_string("aria-describedby", "footnote-label");
    vec![element(node, "sup", vec![hast::Node::Element(link)])]
}

fn list(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let mdast::Node::List(list) = node else {
        return Vec::new();
    };
    let items = state.all(node);
    let mut result = Element::new(if list.ordered { "ol" } else { "ul" }, wrap(items, true))
        .with_position(node.position().cloned());
    if list.ordered
        && let Some(start) = list.start
        && start != 1
    {
        result = result.with_string("start", start.to_string());
    }
    vec![hast::Node::Element(result)]
}

fn list_loose(node: &mdast::Node) -> bool {
    match node {
        mdast::Node::List(list) => list.spread || list.children.iter().any(list_item_loose),
        _ => false,
    }
}

fn list_item_loose(node: &mdast::Node) -> bool {
    matches!(node, mdast::Node::ListItem(item) if item.spread)
}

/// Paragraphs in tight items are unwrapped to their content.
fn list_item(state: &mut State<'_>, node: &mdast::Node, parent: Option<&mdast::Node>) -> Vec<hast::Node> {
    let loose = match parent {
        Some(parent) => list_loose(parent),
        None => list_item_loose(node),
    };
    let results = state.all(node);
    let last_is_paragraph = results.last().is_some_and(|tail| tail.is_element("p"));
    let any = !results.is_empty();
    let mut children = Vec::new();

    for (index, child) in results.into_iter().enumerate() {
        let is_paragraph = child.is_element("p");
        if loose || index != 0 || !is_paragraph {
            children.push(hast::Node::text("\n"));
        }
        match child {
            hast::Node::Element(paragraph) if paragraph.tag_name == "p" && !loose => {
                children.extend(paragraph.children);
            }
            child => children.push(child),
        }
    }
    if any && (loose || !last_is_paragraph) {
        children.push(hast::Node::text("\n"));
    }
    vec![element(node, "li", children)]
}

fn table(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let mut rows = state.all(node).into_iter();
    let mut content = Vec::new();

    if let Some(head) = rows.next() {
        content.push(hast::Node::Element(Element::new("thead", wrap(vec![head], true))));
    }
    let body: Vec<hast::Node> = rows.collect();
    if !body.is_empty() {
        content.push(hast::Node::Element(Element::new("tbody", wrap(body, true))));
    }
    vec![element(node, "table", wrap(content, true))]
}

/// Rows are padded or cut to the column count of their table.
fn table_row(state: &mut State<'_>, node: &mdast::Node, parent: Option<&mdast::Node>) -> Vec<hast::Node> {
    let Some(cells) = node.children() else {
        return Vec::new();
    };
    let (align, head) = match parent {
        Some(mdast::Node::Table(table)) => (
            Some(&table.align),
            table
                .children
                .first()
                .is_some_and(|first| std::ptr::eq(first, node)),
        ),
        _ => (None, false),
    };
    let tag_name = if head { "th" } else { "td" };
    let length = align.map_or(cells.len(), Vec::len);

    let mut result = Vec::with_capacity(length);
    for index in 0..length {
        let mut cell = Element::new(tag_name, Vec::new());
        let alignment = align.and_then(|align| align.get(index)).and_then(|kind| match kind {
            AlignKind::Left => Some("left"),
            AlignKind::Right => Some("right"),
            AlignKind::Center => Some("center"),
            AlignKind::None => None,
        });
        if let Some(alignment) = alignment {
            cell = cell.with_string("align", alignment);
        }
        if let Some(source) = cells.get(index) {
            cell.children = state.all(source);
            cell.position = source.position().cloned();
        }
        result.push(hast::Node::Element(cell));
    }
    vec![element(node, "tr", wrap(result, true))]
}

fn table_cell(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
    let children = state.all(node);
    vec![element(node, "td", children)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use markweave_syntax::{ParseOptions, to_mdast};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn transform(input: &str, options: &RenderOptions) -> hast::Node {
        let tree = to_mdast(input, &ParseOptions::gfm()).unwrap();
        to_hast(&tree, options)
    }

    fn root_children(node: hast::Node) -> Vec<hast::Node> {
        match node {
            hast::Node::Root(root) => root.children,
            node => panic!("expected a root, found {node:?}"),
        }
    }

    #[rstest]
    #[case("a b", "a%20b")]
    #[case("/ü", "/%C3%BC")]
    #[case("a%20b", "a%20b")]
    #[case("100%", "100%25")]
    #[case("https://x.y/?a=b&c#d", "https://x.y/?a=b&c#d")]
    fn normalizes_uris(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_uri(input), expected);
    }

    #[test]
    fn wrap_joins_and_surrounds() {
        let nodes = vec![hast::Node::text("a"), hast::Node::text("b")];
        assert_eq!(
            wrap(nodes.clone(), false),
            vec![hast::Node::text("a"), hast::Node::text("\n"), hast::Node::text("b")]
        );
        assert_eq!(wrap(nodes, true).len(), 5);
        assert_eq!(wrap(Vec::new(), true), vec![hast::Node::text("\n")]);
    }

    #[test]
    fn blocks_are_separated_by_line_endings() {
        let children = root_children(transform("# a\n\nb", &RenderOptions::default()));

        assert_eq!(children.len(), 3);
        assert!(children[0].is_element("h1"));
        assert_eq!(children[1], hast::Node::text("\n"));
        assert!(children[2].is_element("p"));
    }

    #[test]
    fn html_is_dropped_unless_allowed() {
        let children = root_children(transform("<div>", &RenderOptions::default()));
        assert_eq!(children, Vec::new());

        let options = RenderOptions {
            allow_dangerous_html: true,
            ..RenderOptions::default()
        };
        let children = root_children(transform("<div>", &options));
        assert!(matches!(&children[0], hast::Node::Raw(raw) if raw.value == "<div>"));
    }

    #[test]
    fn handlers_override_by_type_name() {
        fn shout(state: &mut State<'_>, node: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
            let children = state.all(node);
            vec![hast::Node::Element(Element::new("b", children))]
        }

        let mut options = RenderOptions::default();
        options.handlers.insert("emphasis".into(), shout);
        let children = root_children(transform("*a*", &options));

        let hast::Node::Element(paragraph) = &children[0] else {
            panic!("expected a paragraph");
        };
        assert!(paragraph.children[0].is_element("b"));
    }

    #[test]
    fn unknown_falls_back_to_div_or_text() {
        fn as_unknown(state: &mut State<'_>, node: &mdast::Node, parent: Option<&mdast::Node>) -> Vec<hast::Node> {
            state.unknown(node, parent)
        }

        let mut options = RenderOptions::default();
        options.handlers.insert("heading".into(), as_unknown);
        options.handlers.insert("inlineCode".into(), as_unknown);
        let children = root_children(transform("# `a`", &options));

        let hast::Node::Element(div) = &children[0] else {
            panic!("expected an element");
        };
        assert_eq!(div.tag_name, "div");
        assert_eq!(div.children, vec![hast::Node::text("a")]);
    }

    #[test]
    fn unknown_handler_replaces_the_fallback() {
        fn as_unknown(state: &mut State<'_>, node: &mdast::Node, parent: Option<&mdast::Node>) -> Vec<hast::Node> {
            state.unknown(node, parent)
        }
        fn nothing(_: &mut State<'_>, _: &mdast::Node, _: Option<&mdast::Node>) -> Vec<hast::Node> {
            vec![hast::Node::text("?")]
        }

        let mut options = RenderOptions::default();
        options.handlers.insert("thematicBreak".into(), as_unknown);
        options.unknown_handler = Some(nothing);

        assert_eq!(root_children(transform("***", &options)), vec![hast::Node::text("?")]);
    }

    #[test]
    fn pass_through_keeps_the_document_node() {
        let options = RenderOptions {
            pass_through: vec!["thematicBreak".into()],
            ..RenderOptions::default()
        };
        let children = root_children(transform("***", &options));

        assert!(matches!(&children[0], hast::Node::Passthrough(mdast::Node::ThematicBreak(_))));
    }

    #[rstest]
    #[case("[a]", "[a]")]
    #[case("[a][]", "[a][]")]
    #[case("[a][B]", "[a][B]")]
    fn undefined_references_revert(#[case] input: &str, #[case] expected: &str) {
        let children = root_children(transform(input, &RenderOptions::default()));
        let hast::Node::Element(paragraph) = &children[0] else {
            panic!("expected a paragraph");
        };
        let values: Vec<&str> = paragraph
            .children
            .iter()
            .map(|child| match child {
                hast::Node::Text(text) => text.value.as_str(),
                other => panic!("expected text, found {other:?}"),
            })
            .collect();
        assert_eq!(values, vec![expected]);
    }

    #[test]
    fn reference_without_definition_reverts_to_brackets() {
        let reference = mdast::Node::LinkReference(mdast::LinkReference {
            children: vec![mdast::Node::Emphasis(mdast::Emphasis {
                children: vec![mdast::Node::Text(mdast::Text {
                    value: "a".into(),
                    position: None,
                })],
                position: None,
            })],
            position: None,
            reference_kind: ReferenceKind::Full,
            identifier: "b".into(),
            label: Some("B".into()),
        });
        let image = mdast::Node::ImageReference(mdast::ImageReference {
            position: None,
            alt: "c".into(),
            reference_kind: ReferenceKind::Collapsed,
            identifier: "c".into(),
            label: None,
        });
        let tree = mdast::Node::Root(mdast::Root {
            children: vec![reference, image],
            position: None,
        });

        let children: Vec<hast::Node> = root_children(to_hast(&tree, &RenderOptions::default()))
            .into_iter()
            .filter(|child| *child != hast::Node::text("\n"))
            .collect();

        assert_eq!(children.len(), 4);
        assert_eq!(children[0], hast::Node::text("["));
        assert!(children[1].is_element("em"));
        assert_eq!(children[2], hast::Node::text("][B]"));
        assert_eq!(children[3], hast::Node::text("![c][]"));
    }

    #[test]
    fn first_definition_wins() {
        let children = root_children(transform(
            "[a]\n\n[a]: /one\n[a]: /two",
            &RenderOptions::default(),
        ));
        let hast::Node::Element(paragraph) = &children[0] else {
            panic!("expected a paragraph");
        };
        let hast::Node::Element(anchor) = &paragraph.children[0] else {
            panic!("expected a link");
        };
        assert_eq!(
            anchor.property("href"),
            Some(&PropertyValue::String("/one".into()))
        );
    }

    #[test]
    fn repeated_footnote_calls_get_numbered_ids() {
        let tree = transform("[^a] [^a]\n\n[^a]: b", &RenderOptions::default());
        let children = root_children(tree);
        let hast::Node::Element(paragraph) = &children[0] else {
            panic!("expected a paragraph");
        };

        let ids: Vec<&PropertyValue> = paragraph
            .children
            .iter()
            .filter_map(|node| match node {
                hast::Node::Element(sup) => match &sup.children[0] {
                    hast::Node::Element(anchor) => anchor.property("id"),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(
            ids,
            vec![
                &PropertyValue::String("user-content-fnref-a".into()),
                &PropertyValue::String("user-content-fnref-a-2".into()),
            ]
        );

        let section = children.last().unwrap();
        assert!(section.is_element("section"));
    }

    #[test]
    fn back_label_template() {
        let options = RenderOptions {
            footnote_back_label: Some("Zurück zu {n}".into()),
            ..RenderOptions::default()
        };
        let tree = to_mdast("[^a]\n\n[^a]: b", &ParseOptions::gfm()).unwrap();
        let state = State::new(&tree, &options);

        assert_eq!(state.back_label(0, 1), "Zurück zu 1");
        assert_eq!(state.back_label(1, 3), "Zurück zu 2-3");
    }

    #[test]
    fn unreferenced_footnotes_are_left_out() {
        let children = root_children(transform("a\n\n[^a]: b", &RenderOptions::default()));
        assert_eq!(children.len(), 1);
        assert!(children[0].is_element("p"));
    }
}
