//! # Document Tree
//!
//! The typed tree the compiler builds from events. Every node knows where
//! it came from in the source; nodes built by later passes may have no
//! position.

use std::fmt;

/// A place in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// 1-indexed line.
    pub line: usize,
    /// 1-indexed column.
    pub column: usize,
    /// 0-indexed byte offset.
    pub offset: usize,
}

impl Point {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Point { line, column, offset }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    pub fn new(start: Point, end: Point) -> Self {
        Position { start, end }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// How a reference names its definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `[a]`
    Shortcut,
    /// `[a][]`
    Collapsed,
    /// `[a][b]`
    Full,
}

/// Alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignKind {
    Left,
    Right,
    Center,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Root(Root),
    Blockquote(Blockquote),
    FootnoteDefinition(FootnoteDefinition),
    List(List),
    ListItem(ListItem),
    Heading(Heading),
    Paragraph(Paragraph),
    ThematicBreak(ThematicBreak),
    Code(Code),
    Html(Html),
    Definition(Definition),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    Delete(Delete),
    InlineCode(InlineCode),
    Break(Break),
    Link(Link),
    Image(Image),
    LinkReference(LinkReference),
    ImageReference(ImageReference),
    FootnoteReference(FootnoteReference),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Root {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blockquote {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FootnoteDefinition {
    pub children: Vec<Node>,
    pub position: Option<Position>,
    /// Normalized label.
    pub identifier: String,
    /// Label as written.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List {
    pub children: Vec<Node>,
    pub position: Option<Position>,
    pub ordered: bool,
    /// Number of the first item of an ordered list.
    pub start: Option<u32>,
    /// Items are separated by blank lines, or one of them contains some.
    pub spread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    pub children: Vec<Node>,
    pub position: Option<Position>,
    /// Direct children are separated by blank lines.
    pub spread: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Heading {
    pub children: Vec<Node>,
    pub position: Option<Position>,
    /// 1 to 6.
    pub depth: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThematicBreak {
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    pub value: String,
    pub position: Option<Position>,
    pub lang: Option<String>,
    pub meta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Html {
    pub value: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Definition {
    pub position: Option<Position>,
    pub url: String,
    pub title: Option<String>,
    pub identifier: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub children: Vec<Node>,
    pub position: Option<Position>,
    pub align: Vec<AlignKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableCell {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub value: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Emphasis {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Strong {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delete {
    pub children: Vec<Node>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineCode {
    pub value: String,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Break {
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Link {
    pub children: Vec<Node>,
    pub position: Option<Position>,
    pub url: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    pub position: Option<Position>,
    pub alt: String,
    pub url: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub children: Vec<Node>,
    pub position: Option<Position>,
    pub reference_kind: ReferenceKind,
    pub identifier: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub position: Option<Position>,
    pub alt: String,
    pub reference_kind: ReferenceKind,
    pub identifier: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FootnoteReference {
    pub position: Option<Position>,
    pub identifier: String,
    pub label: Option<String>,
}

impl Node {
    /// The lowercase camel-case type name, as used to key handlers.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Root(_) => "root",
            Node::Blockquote(_) => "blockquote",
            Node::FootnoteDefinition(_) => "footnoteDefinition",
            Node::List(_) => "list",
            Node::ListItem(_) => "listItem",
            Node::Heading(_) => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::ThematicBreak(_) => "thematicBreak",
            Node::Code(_) => "code",
            Node::Html(_) => "html",
            Node::Definition(_) => "definition",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tableRow",
            Node::TableCell(_) => "tableCell",
            Node::Text(_) => "text",
            Node::Emphasis(_) => "emphasis",
            Node::Strong(_) => "strong",
            Node::Delete(_) => "delete",
            Node::InlineCode(_) => "inlineCode",
            Node::Break(_) => "break",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
            Node::LinkReference(_) => "linkReference",
            Node::ImageReference(_) => "imageReference",
            Node::FootnoteReference(_) => "footnoteReference",
        }
    }

    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root(x) => Some(&x.children),
            Node::Blockquote(x) => Some(&x.children),
            Node::FootnoteDefinition(x) => Some(&x.children),
            Node::List(x) => Some(&x.children),
            Node::ListItem(x) => Some(&x.children),
            Node::Heading(x) => Some(&x.children),
            Node::Paragraph(x) => Some(&x.children),
            Node::Table(x) => Some(&x.children),
            Node::TableRow(x) => Some(&x.children),
            Node::TableCell(x) => Some(&x.children),
            Node::Emphasis(x) => Some(&x.children),
            Node::Strong(x) => Some(&x.children),
            Node::Delete(x) => Some(&x.children),
            Node::Link(x) => Some(&x.children),
            Node::LinkReference(x) => Some(&x.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(x) => Some(&mut x.children),
            Node::Blockquote(x) => Some(&mut x.children),
            Node::FootnoteDefinition(x) => Some(&mut x.children),
            Node::List(x) => Some(&mut x.children),
            Node::ListItem(x) => Some(&mut x.children),
            Node::Heading(x) => Some(&mut x.children),
            Node::Paragraph(x) => Some(&mut x.children),
            Node::Table(x) => Some(&mut x.children),
            Node::TableRow(x) => Some(&mut x.children),
            Node::TableCell(x) => Some(&mut x.children),
            Node::Emphasis(x) => Some(&mut x.children),
            Node::Strong(x) => Some(&mut x.children),
            Node::Delete(x) => Some(&mut x.children),
            Node::Link(x) => Some(&mut x.children),
            Node::LinkReference(x) => Some(&mut x.children),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<&Position> {
        match self {
            Node::Root(x) => x.position.as_ref(),
            Node::Blockquote(x) => x.position.as_ref(),
            Node::FootnoteDefinition(x) => x.position.as_ref(),
            Node::List(x) => x.position.as_ref(),
            Node::ListItem(x) => x.position.as_ref(),
            Node::Heading(x) => x.position.as_ref(),
            Node::Paragraph(x) => x.position.as_ref(),
            Node::ThematicBreak(x) => x.position.as_ref(),
            Node::Code(x) => x.position.as_ref(),
            Node::Html(x) => x.position.as_ref(),
            Node::Definition(x) => x.position.as_ref(),
            Node::Table(x) => x.position.as_ref(),
            Node::TableRow(x) => x.position.as_ref(),
            Node::TableCell(x) => x.position.as_ref(),
            Node::Text(x) => x.position.as_ref(),
            Node::Emphasis(x) => x.position.as_ref(),
            Node::Strong(x) => x.position.as_ref(),
            Node::Delete(x) => x.position.as_ref(),
            Node::InlineCode(x) => x.position.as_ref(),
            Node::Break(x) => x.position.as_ref(),
            Node::Link(x) => x.position.as_ref(),
            Node::Image(x) => x.position.as_ref(),
            Node::LinkReference(x) => x.position.as_ref(),
            Node::ImageReference(x) => x.position.as_ref(),
            Node::FootnoteReference(x) => x.position.as_ref(),
        }
    }

    pub fn position_mut(&mut self) -> &mut Option<Position> {
        match self {
            Node::Root(x) => &mut x.position,
            Node::Blockquote(x) => &mut x.position,
            Node::FootnoteDefinition(x) => &mut x.position,
            Node::List(x) => &mut x.position,
            Node::ListItem(x) => &mut x.position,
            Node::Heading(x) => &mut x.position,
            Node::Paragraph(x) => &mut x.position,
            Node::ThematicBreak(x) => &mut x.position,
            Node::Code(x) => &mut x.position,
            Node::Html(x) => &mut x.position,
            Node::Definition(x) => &mut x.position,
            Node::Table(x) => &mut x.position,
            Node::TableRow(x) => &mut x.position,
            Node::TableCell(x) => &mut x.position,
            Node::Text(x) => &mut x.position,
            Node::Emphasis(x) => &mut x.position,
            Node::Strong(x) => &mut x.position,
            Node::Delete(x) => &mut x.position,
            Node::InlineCode(x) => &mut x.position,
            Node::Break(x) => &mut x.position,
            Node::Link(x) => &mut x.position,
            Node::Image(x) => &mut x.position,
            Node::LinkReference(x) => &mut x.position,
            Node::ImageReference(x) => &mut x.position,
            Node::FootnoteReference(x) => &mut x.position,
        }
    }

    /// The literal value of a value node.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Text(x) => Some(&x.value),
            Node::Code(x) => Some(&x.value),
            Node::Html(x) => Some(&x.value),
            Node::InlineCode(x) => Some(&x.value),
            _ => None,
        }
    }

    /// The plain text of the node and its descendants.
    ///
    /// Images contribute their alt text; breaks and raw HTML nothing.
    pub fn text_content(&self) -> String {
        let mut value = String::new();
        self.push_text(&mut value);
        value
    }

    fn push_text(&self, value: &mut String) {
        match self {
            Node::Text(x) => value.push_str(&x.value),
            Node::InlineCode(x) => value.push_str(&x.value),
            Node::Code(x) => value.push_str(&x.value),
            Node::Image(x) => value.push_str(&x.alt),
            Node::ImageReference(x) => value.push_str(&x.alt),
            _ => {
                if let Some(children) = self.children() {
                    for child in children {
                        child.push_text(value);
                    }
                }
            }
        }
    }

    /// Print the tree, one node per line, indented by depth.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(self.type_name());
        if let Some(position) = self.position() {
            out.push_str(&format!(" ({position})"));
        }
        if let Some(value) = self.value() {
            out.push_str(&format!(" {value:?}"));
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

    fn text(value: &str) -> Node {
        Node::Text(Text {
            value: value.into(),
            position: None,
        })
    }

    #[test]
    fn text_content_walks_children() {
        let node = Node::Paragraph(Paragraph {
            children: vec![
                text("a "),
                Node::Emphasis(Emphasis {
                    children: vec![text("b")],
                    position: None,
                }),
                Node::Image(Image {
                    alt: "c".into(),
                    ..Image::default()
                }),
            ],
            position: None,
        });

        assert_eq!(node.text_content(), "a bc");
    }

    #[test]
    fn debug_tree_indents() {
        let node = Node::Root(Root {
            children: vec![Node::Paragraph(Paragraph {
                children: vec![text("a")],
                position: Some(Position::new(Point::new(1, 1, 0), Point::new(1, 2, 1))),
            })],
            position: None,
        });

        assert_eq!(node.debug_tree(), "root\n  paragraph (1:1-1:2)\n    text \"a\"\n");
    }
}
