//! # Render Tree
//!
//! Generic presentation nodes: elements with properties, text, and raw
//! HTML. Element and property names are the HTML ones (`class`,
//! `aria-describedby`), so the serializer writes them as they are.

use markweave_syntax::mdast::{self, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    String(String),
    /// Present without a value when true, left out when false.
    Boolean(bool),
    /// Written joined by spaces, as `class` is.
    SpaceSeparated(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root(Root),
    Element(Element),
    Text(Text),
    /// Serialized verbatim.
    Raw(Raw),
    /// A document node copied through untouched.
    Passthrough(mdast::Node),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Root {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag_name: String,
    pub properties: Vec<(String, PropertyValue)>,
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub value: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raw {
    pub value: String,
    pub position: Option<Position>,
}

impl Element {
    pub fn new(tag_name: &str, children: Vec<Node>) -> Self {
        Element {
            tag_name: tag_name.to_string(),
            properties: Vec::new(),
            children,
            position: None,
        }
    }

    pub fn with_property(mut self, name: &str, value: PropertyValue) -> Self {
        self.properties.push((name.to_string(), value));
        self
    }

    pub fn with_string(self, name: &str, value: impl Into<String>) -> Self {
        self.with_property(name, PropertyValue::String(value.into()))
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
            position: None,
        })
    }

    pub fn element(element: Element) -> Self {
        Node::Element(element)
    }

    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root(root) => Some(&root.children),
            Node::Element(element) => Some(&element.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(root) => Some(&mut root.children),
            Node::Element(element) => Some(&mut element.children),
            _ => None,
        }
    }

    pub fn is_element(&self, tag_name: &str) -> bool {
        matches!(self, Node::Element(element) if element.tag_name == tag_name)
    }

    /// Print the tree, one node per line, indented by depth.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        match self {
            Node::Root(_) => out.push_str("root"),
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.tag_name);
                out.push('>');
                for (name, value) in &element.properties {
                    out.push_str(&format!(" {name}={value:?}"));
                }
            }
            Node::Text(text) => out.push_str(&format!("text {:?}", text.value)),
            Node::Raw(raw) => out.push_str(&format!("raw {:?}", raw.value)),
            Node::Passthrough(node) => out.push_str(&format!("passthrough {}", node.type_name())),
        }
        out.push('\n');
        if let Some(children) = self.children() {
            for child in children {
                child.write_tree(out, depth + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn properties_keep_order_and_look_up() {
        let element = Element::new("a", vec![Node::text("b")])
            .with_string("href", "c")
            .with_property("data-x", PropertyValue::Boolean(true));

        assert_eq!(
            element.property("href"),
            Some(&PropertyValue::String("c".into()))
        );
        assert_eq!(element.properties[1].0, "data-x");
        assert_eq!(element.property("title"), None);
    }

    #[test]
    fn debug_tree_shows_elements_and_text() {
        let tree = Node::Root(Root {
            children: vec![Node::element(Element::new("p", vec![Node::text("a")]))],
            position: None,
        });

        assert_eq!(tree.debug_tree(), "root\n  <p>\n    text \"a\"\n");
    }
}
