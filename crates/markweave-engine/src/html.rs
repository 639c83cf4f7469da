//! # HTML Serializer

use crate::hast::{Element, Node, PropertyValue};

const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "input"];

/// Serialize a render tree to HTML.
///
/// Text and attribute values are escaped; raw nodes are written as they
/// are; document nodes copied through untouched have no HTML and write
/// nothing.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                write_node(out, child);
            }
        }
        Node::Element(element) => write_element(out, element),
        Node::Text(text) => out.push_str(&html_escape::encode_text(&text.value)),
        Node::Raw(raw) => out.push_str(&raw.value),
        Node::Passthrough(_) => {}
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.tag_name);
    for (name, value) in &element.properties {
        write_attribute(out, name, value);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
        return;
    }
    for child in &element.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&element.tag_name);
    out.push('>');
}

fn write_attribute(out: &mut String, name: &str, value: &PropertyValue) {
    let value = match value {
        PropertyValue::Boolean(false) => return,
        PropertyValue::Boolean(true) => {
            out.push(' ');
            out.push_str(name);
            return;
        }
        PropertyValue::String(value) => value.clone(),
        PropertyValue::SpaceSeparated(values) => values.join(" "),
    };
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(&value));
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hast::{Raw, Root};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn paragraph(children: Vec<Node>) -> Node {
        Node::Element(Element::new("p", children))
    }

    #[rstest]
    #[case(Node::text("a < b & c > d"), "a &lt; b &amp; c &gt; d")]
    #[case(Node::Raw(Raw { value: "<b>".into(), position: None }), "<b>")]
    #[case(paragraph(vec![Node::text("a")]), "<p>a</p>")]
    #[case(Node::Element(Element::new("br", Vec::new())), "<br>")]
    #[case(Node::Element(Element::new("hr", Vec::new())), "<hr>")]
    #[case(paragraph(Vec::new()), "<p></p>")]
    fn serializes_nodes(#[case] node: Node, #[case] expected: &str) {
        assert_eq!(to_html(&node), expected);
    }

    #[test]
    fn attributes_are_escaped_and_typed() {
        let element = Element::new("a", vec![Node::text("x")])
            .with_string("href", "/a?b=\"c\"&d")
            .with_property("data-on", PropertyValue::Boolean(true))
            .with_property("data-off", PropertyValue::Boolean(false))
            .with_property(
                "class",
                PropertyValue::SpaceSeparated(vec!["one".into(), "two".into()]),
            );

        assert_eq!(
            to_html(&Node::Element(element)),
            "<a href=\"/a?b=&quot;c&quot;&amp;d\" data-on class=\"one two\">x</a>"
        );
    }

    #[test]
    fn root_writes_children_only() {
        let root = Node::Root(Root {
            children: vec![paragraph(vec![Node::text("a")]), Node::text("\n")],
            position: None,
        });
        assert_eq!(to_html(&root), "<p>a</p>\n");
    }
}
