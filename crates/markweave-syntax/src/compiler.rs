//! # Event Compiler
//!
//! Walks the resolved event list into a [`mdast`](crate::mdast) tree.
//!
//! Two stacks are kept while walking: one of open nodes, with the root at
//! the bottom, and a shadow stack of open tokens. The shadow stack only
//! checks that every exit closes the token that is open; a mismatch means a
//! construct or resolver produced broken events and is reported as a
//! [`Message`].
//!
//! Values (code, titles, destinations, raw HTML) are collected in buffers
//! instead of text nodes. While a buffer is open, data goes into it.

use log::{debug, trace};

use crate::event::{self, Event, Kind, Name};
use crate::mdast::{
    AlignKind, Blockquote, Break, Code, Definition, Delete, Emphasis, FootnoteDefinition,
    FootnoteReference, Heading, Html, Image, ImageReference, InlineCode, Link, LinkReference,
    List, ListItem, Node, Paragraph, Point, Position, ReferenceKind, Root, Strong, Table,
    TableCell, TableRow, Text, ThematicBreak,
};
use crate::message::Message;
use crate::parser::ParseState;
use crate::util::constant::NESTING_DEPTH_MAX;
use crate::util::decode::{decode_named, decode_numeric};
use crate::util::identifier::normalize_identifier;
use crate::util::skip;

/// Tokens whose line endings are part of the text.
const TEXT_PARENTS: [Name; 7] = [
    Name::Paragraph,
    Name::HeadingAtxText,
    Name::HeadingSetextText,
    Name::EmphasisText,
    Name::StrongText,
    Name::GfmStrikethroughText,
    Name::LabelText,
];

/// Direct children of a container that never make it spread.
const NOT_CONTENT: [Name; 6] = [
    Name::LineEnding,
    Name::LinePrefix,
    Name::SpaceOrTab,
    Name::ListItemPrefix,
    Name::BlockQuotePrefix,
    Name::GfmFootnoteDefinitionPrefix,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKind {
    Link,
    Image,
    Footnote,
}

/// What is known about a link, image or footnote call while inside it.
#[derive(Debug)]
struct LinkInfo {
    kind: GroupKind,
    resource: bool,
    reference_kind: Option<ReferenceKind>,
    label: Option<String>,
    reference: Option<String>,
    url: String,
    title: Option<String>,
}

impl LinkInfo {
    fn new(kind: GroupKind) -> Self {
        LinkInfo {
            kind,
            resource: false,
            reference_kind: None,
            label: None,
            reference: None,
            url: String::new(),
            title: None,
        }
    }
}

struct Compiler<'a> {
    events: &'a [Event],
    parse_state: &'a ParseState<'a>,
    tree: Vec<Node>,
    tokens: Vec<(Name, usize)>,
    buffers: Vec<String>,
    links: Vec<LinkInfo>,
    reference_marker: char,
    at_hard_break: bool,
    /// Enter indices of groups past the nesting limit.
    flattened: Vec<usize>,
}

/// Turn events into a tree.
pub fn compile(events: &[Event], parse_state: &ParseState) -> Result<Node, Message> {
    debug!("compile: {} events", events.len());

    let start = events.first().map(|event| point(&event.point)).unwrap_or(Point::new(1, 1, 0));
    let end = events.last().map(|event| point(&event.point)).unwrap_or(start);

    let mut compiler = Compiler {
        events,
        parse_state,
        tree: vec![Node::Root(Root {
            children: Vec::new(),
            position: Some(Position::new(start, end)),
        })],
        tokens: Vec::new(),
        buffers: Vec::new(),
        links: Vec::new(),
        reference_marker: '&',
        at_hard_break: false,
        flattened: Vec::new(),
    };

    for index in 0..events.len() {
        match events[index].kind {
            Kind::Enter => compiler.enter(index),
            Kind::Exit => compiler.exit(index)?,
        }
    }

    if let Some((name, enter)) = compiler.tokens.last() {
        return Err(Message::new(
            Some(events[*enter].point.clone()),
            format!("Expected `{name:?}` to be closed"),
            "unclosed",
        ));
    }

    match compiler.tree.pop() {
        Some(root) if compiler.tree.is_empty() => Ok(root),
        _ => Err(Message::new(None, "Expected only the root to remain", "tree")),
    }
}

/// Case-folded identifier; tree identifiers are lowercase.
fn identifier(label: &str) -> String {
    normalize_identifier(label).to_lowercase()
}

fn point(point: &event::Point) -> Point {
    Point::new(point.line, point.column, point.offset)
}

impl<'a> Compiler<'a> {
    fn enter(&mut self, index: usize) {
        let events = self.events;
        let event = &events[index];
        self.tokens.push((event.name, index));
        let start = point(&event.point);
        let position = Some(Position::new(start, start));

        match event.name {
            Name::BlockQuote => self.open(index, Node::Blockquote(Blockquote {
                children: Vec::new(),
                position,
            })),
            Name::Paragraph => self.open(index, Node::Paragraph(Paragraph {
                children: Vec::new(),
                position,
            })),
            Name::HeadingAtx | Name::HeadingSetext => self.open(index, Node::Heading(Heading {
                children: Vec::new(),
                position,
                depth: 0,
            })),
            Name::ThematicBreak => self.open(index, Node::ThematicBreak(ThematicBreak { position })),
            Name::CodeFenced | Name::CodeIndented => {
                self.open(index, Node::Code(Code {
                    position,
                    ..Code::default()
                }));
                self.buffers.push(String::new());
            }
            Name::HtmlFlow | Name::HtmlText => {
                self.open(index, Node::Html(Html {
                    value: String::new(),
                    position,
                }));
                self.buffers.push(String::new());
            }
            Name::CodeText => {
                self.open(index, Node::InlineCode(InlineCode {
                    value: String::new(),
                    position,
                }));
                self.buffers.push(String::new());
            }
            Name::Definition => {
                self.open(index, Node::Definition(Definition {
                    position,
                    ..Definition::default()
                }));
                self.buffers.push(String::new());
            }
            Name::DefinitionTitle => {
                if let Some(Node::Definition(definition)) = self.tree.last_mut() {
                    definition.title = Some(String::new());
                }
            }
            Name::CodeFencedFenceInfo
            | Name::CodeFencedFenceMeta
            | Name::DefinitionLabelString
            | Name::DefinitionDestinationString
            | Name::DefinitionTitleString
            | Name::ResourceDestinationString
            | Name::ResourceTitleString
            | Name::ReferenceString
            | Name::GfmFootnoteDefinitionLabelString => self.buffers.push(String::new()),
            Name::GfmFootnoteDefinition => {
                self.open(index, Node::FootnoteDefinition(FootnoteDefinition {
                    position,
                    ..FootnoteDefinition::default()
                }));
            }
            Name::ListOrdered | Name::ListUnordered => {
                let spread = blank_between_children(events, index)
                    || list_items(events, index)
                        .into_iter()
                        .any(|item| item_spread(events, item));
                self.open(index, Node::List(List {
                    children: Vec::new(),
                    position,
                    ordered: event.name == Name::ListOrdered,
                    start: None,
                    spread,
                }));
            }
            Name::ListItem => {
                let spread = item_spread(events, index);
                self.open(index, Node::ListItem(ListItem {
                    children: Vec::new(),
                    position,
                    spread,
                }));
            }
            Name::GfmTable => {
                let align = self.table_align(index);
                self.open(index, Node::Table(Table {
                    children: Vec::new(),
                    position,
                    align,
                }));
            }
            Name::GfmTableRow => self.open(index, Node::TableRow(TableRow {
                children: Vec::new(),
                position,
            })),
            Name::GfmTableCell => self.open(index, Node::TableCell(TableCell {
                children: Vec::new(),
                position,
            })),
            Name::Emphasis => self.open(index, Node::Emphasis(Emphasis {
                children: Vec::new(),
                position,
            })),
            Name::Strong => self.open(index, Node::Strong(Strong {
                children: Vec::new(),
                position,
            })),
            Name::GfmStrikethrough => self.open(index, Node::Delete(Delete {
                children: Vec::new(),
                position,
            })),
            Name::HardBreakEscape | Name::HardBreakTrailing => {
                self.open(index, Node::Break(Break { position }))
            }
            Name::Autolink => self.open(index, Node::Link(Link {
                position,
                ..Link::default()
            })),
            Name::Link | Name::Image | Name::GfmFootnoteCall => {
                let kind = match event.name {
                    Name::Image => GroupKind::Image,
                    Name::GfmFootnoteCall => GroupKind::Footnote,
                    _ => GroupKind::Link,
                };
                self.links.push(LinkInfo::new(kind));
                // Children are collected in a link until the kind is known.
                self.open(index, Node::Link(Link {
                    position,
                    ..Link::default()
                }));
            }
            Name::Resource => {
                if let Some(info) = self.links.last_mut() {
                    info.resource = true;
                }
            }
            Name::ResourceTitle => {
                if let Some(info) = self.links.last_mut() {
                    info.title = Some(String::new());
                }
            }
            Name::Reference => {
                if let Some(info) = self.links.last_mut() {
                    info.reference_kind = Some(ReferenceKind::Collapsed);
                }
            }
            Name::CharacterReference => self.reference_marker = '&',
            _ => {}
        }
    }

    fn exit(&mut self, index: usize) -> Result<(), Message> {
        let events = self.events;
        let event = &events[index];
        let Some((name, enter)) = self.tokens.pop() else {
            return Err(Message::new(
                Some(event.point.clone()),
                format!("Cannot close `{:?}`, nothing is open", event.name),
                "mismatch",
            ));
        };

        if name != event.name {
            return Err(Message::new(
                Some(event.point.clone()),
                format!("Cannot close `{:?}`, `{name:?}` is open", event.name),
                "mismatch",
            ));
        }

        trace!("compile: exit `{name:?}`");
        let end = point(&event.point);

        // Its children already went to the deepest open node.
        if self.flattened.last() == Some(&enter) {
            self.flattened.pop();
            if matches!(name, Name::Link | Name::Image | Name::GfmFootnoteCall) {
                self.links.pop();
            }
            return Ok(());
        }

        match name {
            Name::BlockQuote
            | Name::Paragraph
            | Name::ThematicBreak
            | Name::GfmFootnoteDefinition
            | Name::ListOrdered
            | Name::ListUnordered
            | Name::ListItem
            | Name::GfmTable
            | Name::GfmTableRow
            | Name::GfmTableCell
            | Name::Emphasis
            | Name::Strong
            | Name::GfmStrikethrough
            | Name::HeadingAtx
            | Name::HeadingSetext
            | Name::Autolink => self.close(end)?,
            Name::HeadingAtxSequence => {
                let size = self.source(enter, index).chars().count();
                if let Some(Node::Heading(heading)) = self.tree.last_mut()
                    && heading.depth == 0
                {
                    heading.depth = u8::try_from(size).unwrap_or(6).min(6);
                }
            }
            Name::HeadingSetextUnderlineSequence => {
                let depth = if self.source(enter, index).starts_with('=') {
                    1
                } else {
                    2
                };
                if let Some(Node::Heading(heading)) = self.tree.last_mut() {
                    heading.depth = depth;
                }
            }
            Name::CodeFenced | Name::CodeIndented => {
                let value = self.buffers.pop().unwrap_or_default();
                if let Some(Node::Code(code)) = self.tree.last_mut() {
                    code.value = if name == Name::CodeFenced {
                        strip_eol_end(strip_eol_start(&value)).to_string()
                    } else {
                        strip_eol_end(&value).to_string()
                    };
                }
                self.close(end)?;
            }
            Name::CodeFencedFenceInfo | Name::CodeFencedFenceMeta => {
                let value = self.buffers.pop().unwrap_or_default();
                if let Some(Node::Code(code)) = self.tree.last_mut() {
                    if name == Name::CodeFencedFenceInfo {
                        code.lang = Some(value);
                    } else {
                        code.meta = Some(value);
                    }
                }
            }
            Name::CodeFlowChunk | Name::CodeTextData | Name::HtmlFlowData | Name::HtmlTextData => {
                let value = self.source(enter, index);
                self.value(&value, enter, index);
            }
            Name::HtmlFlow | Name::HtmlText => {
                let value = self.buffers.pop().unwrap_or_default();
                if let Some(Node::Html(html)) = self.tree.last_mut() {
                    html.value = value;
                }
                self.close(end)?;
            }
            Name::CodeText => {
                let value = self.buffers.pop().unwrap_or_default();
                if let Some(Node::InlineCode(code)) = self.tree.last_mut() {
                    code.value = value;
                }
                self.close(end)?;
            }
            Name::Definition => {
                self.buffers.pop();
                self.close(end)?;
            }
            Name::DefinitionLabelString => {
                self.buffers.pop();
                let label = self.source(enter, index);
                if let Some(Node::Definition(definition)) = self.tree.last_mut() {
                    definition.identifier = identifier(&label);
                    definition.label = Some(label);
                }
            }
            Name::DefinitionDestinationString => {
                let value = self.buffers.pop().unwrap_or_default();
                if let Some(Node::Definition(definition)) = self.tree.last_mut() {
                    definition.url = value;
                }
            }
            Name::DefinitionTitleString => {
                let value = self.buffers.pop().unwrap_or_default();
                if let Some(Node::Definition(definition)) = self.tree.last_mut() {
                    definition.title = Some(value);
                }
            }
            Name::GfmFootnoteDefinitionLabelString => {
                self.buffers.pop();
                let label = self.source(enter, index);
                if let Some(Node::FootnoteDefinition(definition)) = self.tree.last_mut() {
                    definition.identifier = identifier(&label);
                    definition.label = Some(label);
                }
            }
            Name::ListItemValue => {
                let value = self.source(enter, index).parse::<u32>().ok();
                if let Some(Node::List(list)) = self
                    .tree
                    .iter_mut()
                    .rev()
                    .find(|node| matches!(node, Node::List(_)))
                    && list.start.is_none()
                {
                    list.start = value;
                }
            }
            Name::HardBreakEscape | Name::HardBreakTrailing => {
                self.at_hard_break = true;
                self.close(end)?;
            }
            Name::LineEnding => self.line_ending(enter, index),
            Name::Data | Name::CharacterEscapeValue => {
                let value = self.source(enter, index);
                self.value(&value, enter, index);
            }
            Name::CharacterReferenceMarkerNumeric => self.reference_marker = '#',
            Name::CharacterReferenceMarkerHexadecimal => self.reference_marker = 'x',
            Name::CharacterReferenceValue => {
                let source = self.source(enter, index);
                let value = match self.reference_marker {
                    '#' => decode_numeric(&source, 10),
                    'x' => decode_numeric(&source, 16),
                    _ => decode_named(&source).unwrap_or_else(|| format!("&{source};")),
                };
                self.value(&value, enter, index);
            }
            Name::AutolinkProtocol | Name::AutolinkEmail => {
                let source = self.source(enter, index);
                if let Some(Node::Link(link)) = self.tree.last_mut() {
                    link.url = if name == Name::AutolinkEmail {
                        format!("mailto:{source}")
                    } else {
                        source.clone()
                    };
                }
                self.value(&source, enter, index);
            }
            Name::LabelText => {
                let label = self.source(enter, index);
                if let Some(info) = self.links.last_mut() {
                    info.label = Some(label);
                }
            }
            Name::ResourceDestinationString => {
                let value = self.buffers.pop().unwrap_or_default();
                if let Some(info) = self.links.last_mut() {
                    info.url = value;
                }
            }
            Name::ResourceTitleString => {
                let value = self.buffers.pop().unwrap_or_default();
                if let Some(info) = self.links.last_mut() {
                    info.title = Some(value);
                }
            }
            Name::ReferenceString => {
                self.buffers.pop();
                let reference = self.source(enter, index);
                if let Some(info) = self.links.last_mut() {
                    info.reference = Some(reference);
                    info.reference_kind = Some(ReferenceKind::Full);
                }
            }
            Name::Link | Name::Image | Name::GfmFootnoteCall => self.close_group(index)?,
            _ => {}
        }

        Ok(())
    }

    fn open(&mut self, index: usize, node: Node) {
        if self.tree.len() > NESTING_DEPTH_MAX && node.children().is_some() {
            trace!("compile: flatten `{}` at depth {}", node.type_name(), self.tree.len());
            self.flattened.push(index);
            return;
        }
        self.tree.push(node);
    }

    /// Pop the current node, finish its position, and add it to its parent.
    fn close(&mut self, end: Point) -> Result<(), Message> {
        let node = self.pop_node(end)?;
        self.append(node)
    }

    fn pop_node(&mut self, end: Point) -> Result<Node, Message> {
        if self.tree.len() < 2 {
            return Err(Message::new(None, "Cannot close the root", "tree"));
        }

        let Some(mut node) = self.tree.pop() else {
            return Err(Message::new(None, "Cannot close the root", "tree"));
        };

        if let Some(position) = node.position_mut() {
            position.end = end;
        }

        Ok(node)
    }

    fn append(&mut self, node: Node) -> Result<(), Message> {
        match self.tree.last_mut().and_then(Node::children_mut) {
            Some(children) => {
                children.push(node);
                Ok(())
            }
            None => Err(Message::new(
                None,
                format!("Cannot add `{}` to a node without children", node.type_name()),
                "tree",
            )),
        }
    }

    /// Turn the collected link into a link, image, reference or footnote call.
    fn close_group(&mut self, index: usize) -> Result<(), Message> {
        let end = point(&self.events[index].point);
        let node = self.pop_node(end)?;
        let Some(info) = self.links.pop() else {
            return Err(Message::new(
                Some(self.events[index].point.clone()),
                "Expected link information",
                "link",
            ));
        };
        let Node::Link(link) = node else {
            return Err(Message::new(
                Some(self.events[index].point.clone()),
                format!("Expected a link, found `{}`", node.type_name()),
                "link",
            ));
        };

        let position = link.position;
        let label = info.reference.clone().or(info.label.clone());
        let identifier = identifier(label.as_deref().unwrap_or_default());
        let reference_kind = info.reference_kind.unwrap_or(ReferenceKind::Shortcut);

        let node = match info.kind {
            GroupKind::Footnote => Node::FootnoteReference(FootnoteReference {
                position,
                identifier,
                label,
            }),
            GroupKind::Image => {
                let alt = Node::Paragraph(Paragraph {
                    children: link.children,
                    position: None,
                })
                .text_content();

                if info.resource {
                    Node::Image(Image {
                        position,
                        alt,
                        url: info.url,
                        title: info.title,
                    })
                } else {
                    Node::ImageReference(ImageReference {
                        position,
                        alt,
                        reference_kind,
                        identifier,
                        label,
                    })
                }
            }
            GroupKind::Link if info.resource => Node::Link(Link {
                children: link.children,
                position,
                url: info.url,
                title: info.title,
            }),
            GroupKind::Link => Node::LinkReference(LinkReference {
                children: link.children,
                position,
                reference_kind,
                identifier,
                label,
            }),
        };

        self.append(node)
    }

    fn line_ending(&mut self, enter: usize, exit: usize) {
        if self.at_hard_break {
            self.at_hard_break = false;
            return;
        }

        let parent = self.tokens.last().map(|(name, _)| *name);

        if parent == Some(Name::CodeText) {
            self.value(" ", enter, exit);
        } else if !self.buffers.is_empty() || parent.is_some_and(|name| TEXT_PARENTS.contains(&name))
        {
            let value = self.source(enter, exit);
            self.value(&value, enter, exit);
        }
    }

    /// Add to the open buffer, or as text to the current node.
    fn value(&mut self, value: &str, enter: usize, exit: usize) {
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.push_str(value);
            return;
        }

        let start = point(&self.events[enter].point);
        let end = point(&self.events[exit].point);

        let Some(children) = self.tree.last_mut().and_then(Node::children_mut) else {
            return;
        };

        if let Some(Node::Text(text)) = children.last_mut() {
            text.value.push_str(value);
            if let Some(position) = &mut text.position {
                position.end = end;
            }
        } else {
            children.push(Node::Text(Text {
                value: value.to_string(),
                position: Some(Position::new(start, end)),
            }));
        }
    }

    fn source(&self, enter: usize, exit: usize) -> String {
        self.parse_state
            .serialize(&self.events[enter].point, &self.events[exit].point, false)
    }

    fn table_align(&self, index: usize) -> Vec<AlignKind> {
        let exit = skip::exit_of(self.events, index);
        let mut align = Vec::new();
        let mut current = index + 1;

        while current < exit {
            let event = &self.events[current];
            if event.is_enter() && event.name == Name::GfmTableDelimiterCellValue {
                let end = skip::exit_of(self.events, current);
                let value = self.source(current, end);
                align.push(match (value.starts_with(':'), value.ends_with(':')) {
                    (true, true) => AlignKind::Center,
                    (true, false) => AlignKind::Left,
                    (false, true) => AlignKind::Right,
                    (false, false) => AlignKind::None,
                });
                current = end;
            } else if event.is_exit() && event.name == Name::GfmTableDelimiterRow {
                break;
            }
            current += 1;
        }

        align
    }
}

/// Enter indices of the items directly in the list entered at `index`.
fn list_items(events: &[Event], index: usize) -> Vec<usize> {
    let exit = skip::exit_of(events, index);
    let mut items = Vec::new();
    let mut depth = 0;

    for (current, event) in events.iter().enumerate().take(exit).skip(index + 1) {
        if event.is_enter() {
            depth += 1;
            if depth == 1 && event.name == Name::ListItem {
                items.push(current);
            }
        } else {
            depth -= 1;
        }
    }

    items
}

/// Whether a blank line sits between two direct children of the token
/// entered at `index`.
fn blank_between_children(events: &[Event], index: usize) -> bool {
    let exit = skip::exit_of(events, index);
    let mut depth = 0;
    let mut seen_content = false;
    let mut blank = false;

    for event in &events[index + 1..exit] {
        if event.is_exit() {
            depth -= 1;
            continue;
        }

        depth += 1;
        if depth != 1 {
            continue;
        }

        match event.name {
            Name::BlankLineEnding => blank = seen_content,
            name if NOT_CONTENT.contains(&name) => {}
            _ if blank => return true,
            _ => seen_content = true,
        }
    }

    false
}

/// Whether the item entered at `index` is spread: a blank line between two
/// of its children, or one at its end when another item follows.
fn item_spread(events: &[Event], index: usize) -> bool {
    if blank_between_children(events, index) {
        return true;
    }

    let exit = skip::exit_of(events, index);
    let mut skippable = NOT_CONTENT.to_vec();
    skippable.push(Name::BlankLineEnding);
    let next = skip::opt(events, exit + 1, &skippable);
    let followed = events
        .get(next)
        .is_some_and(|event| event.is_enter() && event.name == Name::ListItem);

    followed && ends_in_blank_line(events, index, exit)
}

/// Whether the item between `index` and `exit` has content and its last
/// line is blank.
///
/// Nested lists share their blank lines with the item, block quotes do not:
/// a `>` line is part of the quote.
fn ends_in_blank_line(events: &[Event], index: usize, exit: usize) -> bool {
    let mut current = exit;

    while current > index + 1 {
        current -= 1;
        let event = &events[current];

        match event.name {
            Name::BlankLineEnding => break,
            Name::ListItem | Name::ListOrdered | Name::ListUnordered if event.is_exit() => {}
            _ => return false,
        }
    }

    if events[current].name != Name::BlankLineEnding {
        return false;
    }

    let mut depth = 0;
    events[index + 1..current].iter().any(|event| {
        if event.is_exit() {
            depth -= 1;
            return false;
        }
        depth += 1;
        depth == 1 && event.name != Name::BlankLineEnding && !NOT_CONTENT.contains(&event.name)
    })
}

fn strip_eol_start(value: &str) -> &str {
    value
        .strip_prefix("\r\n")
        .or_else(|| value.strip_prefix('\n'))
        .or_else(|| value.strip_prefix('\r'))
        .unwrap_or(value)
}

fn strip_eol_end(value: &str) -> &str {
    value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .or_else(|| value.strip_suffix('\r'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseOptions, to_mdast};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn root(input: &str, options: &ParseOptions) -> Vec<Node> {
        match to_mdast(input, options).unwrap() {
            Node::Root(root) => root.children,
            node => panic!("expected a root, found {node:?}"),
        }
    }

    fn first(input: &str) -> Node {
        root(input, &ParseOptions::default()).remove(0)
    }

    #[test]
    fn paragraph_text_keeps_line_endings() {
        let Node::Paragraph(paragraph) = first("a\nb") else {
            panic!("expected a paragraph");
        };

        assert_eq!(paragraph.children.len(), 1);
        assert_eq!(paragraph.children[0].value(), Some("a\nb"));
        assert_eq!(
            paragraph.position,
            Some(Position::new(Point::new(1, 1, 0), Point::new(2, 2, 3)))
        );
    }

    #[rstest]
    #[case("# a", 1)]
    #[case("### a ###", 3)]
    #[case("a\n===", 1)]
    #[case("a\n---", 2)]
    fn heading_depth(#[case] input: &str, #[case] depth: u8) {
        let Node::Heading(heading) = first(input) else {
            panic!("expected a heading");
        };

        assert_eq!(heading.depth, depth);
        assert_eq!(heading.children[0].value(), Some("a"));
    }

    #[test]
    fn fenced_code_value_and_info() {
        let Node::Code(code) = first("```js  title\na\n\n  b\n```") else {
            panic!("expected code");
        };

        assert_eq!(code.lang.as_deref(), Some("js"));
        assert_eq!(code.meta.as_deref(), Some("title"));
        assert_eq!(code.value, "a\n\n  b");
    }

    #[test]
    fn indented_code_value() {
        let Node::Code(code) = first("    a\n     b\n") else {
            panic!("expected code");
        };

        assert_eq!(code.lang, None);
        assert_eq!(code.value, "a\n b");
    }

    #[test]
    fn hard_break_swallows_line_ending() {
        let Node::Paragraph(paragraph) = first("a\\\nb") else {
            panic!("expected a paragraph");
        };

        let types: Vec<&str> = paragraph.children.iter().map(Node::type_name).collect();
        assert_eq!(types, vec!["text", "break", "text"]);
        assert_eq!(paragraph.children[2].value(), Some("b"));
    }

    #[rstest]
    #[case("&amp;", "&")]
    #[case("&#35;", "#")]
    #[case("&#x41;", "A")]
    #[case("\\*", "*")]
    fn references_and_escapes_decode(#[case] input: &str, #[case] value: &str) {
        assert_eq!(first(input).text_content(), value);
    }

    #[test]
    fn inline_code_turns_line_endings_into_spaces() {
        let Node::Paragraph(paragraph) = first("`a\nb`") else {
            panic!("expected a paragraph");
        };

        assert_eq!(
            paragraph.children,
            vec![Node::InlineCode(InlineCode {
                value: "a b".into(),
                position: Some(Position::new(Point::new(1, 1, 0), Point::new(2, 3, 5))),
            })]
        );
    }

    #[test]
    fn definition_fields() {
        let Node::Definition(definition) = first("[A  b]: <c> \"d\"") else {
            panic!("expected a definition");
        };

        assert_eq!(definition.identifier, "a b");
        assert_eq!(definition.label.as_deref(), Some("A  b"));
        assert_eq!(definition.url, "c");
        assert_eq!(definition.title.as_deref(), Some("d"));
    }

    #[test]
    fn links_images_and_references() {
        let children = match first("[a](b \"c\") ![d](e) [f][g] ![h]\n\n[g]: x\n[h]: y") {
            Node::Paragraph(paragraph) => paragraph.children,
            node => panic!("expected a paragraph, found {node:?}"),
        };

        let types: Vec<&str> = children.iter().map(Node::type_name).collect();
        assert_eq!(
            types,
            vec!["link", "text", "image", "text", "linkReference", "text", "imageReference"]
        );

        let Node::Link(link) = &children[0] else {
            panic!("expected a link");
        };
        assert_eq!(link.url, "b");
        assert_eq!(link.title.as_deref(), Some("c"));

        let Node::Image(image) = &children[2] else {
            panic!("expected an image");
        };
        assert_eq!((image.alt.as_str(), image.url.as_str()), ("d", "e"));

        let Node::LinkReference(reference) = &children[4] else {
            panic!("expected a link reference");
        };
        assert_eq!(reference.reference_kind, ReferenceKind::Full);
        assert_eq!(reference.identifier, "g");

        let Node::ImageReference(reference) = &children[6] else {
            panic!("expected an image reference");
        };
        assert_eq!(reference.reference_kind, ReferenceKind::Shortcut);
        assert_eq!(reference.alt, "h");
    }

    #[test]
    fn autolinks() {
        let children = match first("<https://a.b> <c@d.e>") {
            Node::Paragraph(paragraph) => paragraph.children,
            node => panic!("expected a paragraph, found {node:?}"),
        };

        let Node::Link(link) = &children[0] else {
            panic!("expected a link");
        };
        assert_eq!(link.url, "https://a.b");

        let Node::Link(link) = &children[2] else {
            panic!("expected a link");
        };
        assert_eq!(link.url, "mailto:c@d.e");
        assert_eq!(children[2].text_content(), "c@d.e");
    }

    #[test]
    fn ordered_list_start_and_spread() {
        let Node::List(list) = first("3. a\n4. b") else {
            panic!("expected a list");
        };
        assert!(list.ordered);
        assert_eq!(list.start, Some(3));
        assert!(!list.spread);

        let Node::List(list) = first("- a\n\n- b") else {
            panic!("expected a list");
        };
        assert!(!list.ordered);
        assert_eq!(list.start, None);
        assert!(list.spread);
    }

    #[test]
    fn item_spread_comes_from_its_own_children() {
        let Node::List(list) = first("- a\n\n  b\n- c") else {
            panic!("expected a list");
        };

        let spreads: Vec<bool> = list
            .children
            .iter()
            .map(|item| match item {
                Node::ListItem(item) => item.spread,
                _ => false,
            })
            .collect();
        assert_eq!(spreads, vec![true, false]);
        assert!(list.spread);
    }

    #[test]
    fn nested_blank_lines_stay_nested() {
        let Node::List(list) = first("- a\n  - b\n\n  - c") else {
            panic!("expected a list");
        };

        let Node::ListItem(item) = &list.children[0] else {
            panic!("expected an item");
        };
        assert!(!item.spread);
        assert!(!list.spread);
    }

    #[test]
    fn table_alignment_and_cells() {
        let nodes = root("| a | b | c |\n| --- | :-: | -: |\n| d |", &ParseOptions::gfm());
        let Node::Table(table) = &nodes[0] else {
            panic!("expected a table, found {:?}", nodes[0]);
        };

        assert_eq!(
            table.align,
            vec![AlignKind::None, AlignKind::Center, AlignKind::Right]
        );
        assert_eq!(table.children.len(), 2);
        assert_eq!(table.children[1].text_content(), "d");
    }

    #[test]
    fn footnotes() {
        let nodes = root("a[^B]\n\n[^b]: c", &ParseOptions::gfm());
        let Node::Paragraph(paragraph) = &nodes[0] else {
            panic!("expected a paragraph");
        };
        let Node::FootnoteReference(reference) = &paragraph.children[1] else {
            panic!("expected a footnote reference");
        };
        assert_eq!(reference.identifier, "b");
        assert_eq!(reference.label.as_deref(), Some("B"));

        let Node::FootnoteDefinition(definition) = &nodes[1] else {
            panic!("expected a footnote definition");
        };
        assert_eq!(definition.identifier, "b");
        assert_eq!(definition.children[0].text_content(), "c");
    }

    #[test]
    fn html_is_kept_raw() {
        let Node::Html(html) = first("<div>\n*a*\n</div>") else {
            panic!("expected html");
        };
        assert_eq!(html.value, "<div>\n*a*\n</div>");
    }

    #[test]
    fn mismatched_exit_is_a_message() {
        let options = ParseOptions::default();
        let (_, parse_state) = crate::parse("a", &options).unwrap();
        let events = vec![
            Event::enter(Name::Paragraph, event::Point::start()),
            Event::exit(Name::Emphasis, event::Point::start()),
        ];

        let message = compile(&events, &parse_state).unwrap_err();
        assert_eq!(message.rule_id, "mismatch");
    }
}
