//! # Tokenizer Events
//!
//! The tokenizer never builds a tree. It emits a **flat list** of enter and
//! exit events, one pair per token, and every later stage (resolvers, the
//! subtokenizer, the compiler) works on that list:
//!
//! ```text
//! Enter(HeadingAtx)
//!   Enter(HeadingAtxSequence)   "#"
//!   Exit(HeadingAtxSequence)
//!   Enter(SpaceOrTab)           " "
//!   Exit(SpaceOrTab)
//!   Enter(HeadingAtxText)
//!     Enter(Data)               "Hello"
//!     Exit(Data)
//!   Exit(HeadingAtxText)
//! Exit(HeadingAtx)
//! ```
//!
//! ## Linked Content
//!
//! Some tokens are placeholders for content that is tokenized later by a
//! different content type: paragraph lines are text, a fence's info string
//! is string content, and so on. Such an enter event carries a [`Link`].
//! All enter events that share a `chain` id form one logical span, possibly
//! broken across lines or container prefixes, which the subtokenizer feeds
//! into a child tokenizer as a unit.

/// Content types that a linked token is subtokenized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Content {
    /// Block content inside containers.
    Flow,
    /// Definitions and paragraphs.
    Content,
    /// Escapes and references only.
    String,
    /// Full inline content.
    Text,
}

/// Connects an enter event to the rest of its content span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub chain: usize,
    pub content: Content,
}

/// A place in the preprocessed input.
///
/// `line` and `column` are 1-based; `column` counts tab filler. `offset` is a
/// byte offset into the preprocessed text. `index` and `buffer_index` locate
/// the chunk and the byte inside a text chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub index: usize,
    pub buffer_index: usize,
}

impl Point {
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
            index: 0,
            buffer_index: 0,
        }
    }

    /// Stream position, for ordering points from different tokenizers.
    pub fn position(&self) -> (usize, usize) {
        (self.index, self.buffer_index)
    }

    pub fn is_after(&self, other: &Point) -> bool {
        self.position() > other.position()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Enter,
    Exit,
}

/// Token names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Name {
    Attention,
    AttentionSequence,
    Autolink,
    AutolinkEmail,
    AutolinkMarker,
    AutolinkProtocol,
    BlankLineEnding,
    BlockQuote,
    BlockQuoteMarker,
    BlockQuotePrefix,
    CharacterEscape,
    CharacterEscapeMarker,
    CharacterEscapeValue,
    CharacterReference,
    CharacterReferenceMarker,
    CharacterReferenceMarkerHexadecimal,
    CharacterReferenceMarkerNumeric,
    CharacterReferenceMarkerSemi,
    CharacterReferenceValue,
    CodeFenced,
    CodeFencedFence,
    CodeFencedFenceInfo,
    CodeFencedFenceMeta,
    CodeFencedFenceSequence,
    CodeFlowChunk,
    CodeIndented,
    CodeText,
    CodeTextData,
    CodeTextPadding,
    CodeTextSequence,
    Content,
    ContentChunk,
    #[default]
    Data,
    Definition,
    DefinitionDestination,
    DefinitionDestinationLiteral,
    DefinitionDestinationLiteralMarker,
    DefinitionDestinationRaw,
    DefinitionDestinationString,
    DefinitionLabel,
    DefinitionLabelMarker,
    DefinitionLabelString,
    DefinitionMarker,
    DefinitionTitle,
    DefinitionTitleMarker,
    DefinitionTitleString,
    Emphasis,
    EmphasisSequence,
    EmphasisText,
    GfmFootnoteCall,
    GfmFootnoteCallLabel,
    GfmFootnoteCallMarker,
    GfmFootnoteDefinition,
    GfmFootnoteDefinitionLabel,
    GfmFootnoteDefinitionLabelMarker,
    GfmFootnoteDefinitionLabelString,
    GfmFootnoteDefinitionMarker,
    GfmFootnoteDefinitionPrefix,
    GfmStrikethrough,
    GfmStrikethroughSequence,
    GfmStrikethroughText,
    GfmTable,
    GfmTableBody,
    GfmTableCell,
    GfmTableCellDivider,
    GfmTableCellText,
    GfmTableDelimiterCell,
    GfmTableDelimiterCellValue,
    GfmTableDelimiterFiller,
    GfmTableDelimiterMarker,
    GfmTableDelimiterRow,
    GfmTableHead,
    GfmTableRow,
    HardBreakEscape,
    HardBreakTrailing,
    HeadingAtx,
    HeadingAtxSequence,
    HeadingAtxText,
    HeadingSetext,
    HeadingSetextText,
    HeadingSetextUnderline,
    HeadingSetextUnderlineSequence,
    HtmlFlow,
    HtmlFlowData,
    HtmlText,
    HtmlTextData,
    Image,
    Label,
    LabelEnd,
    LabelImage,
    LabelImageMarker,
    LabelLink,
    LabelMarker,
    LabelText,
    LineEnding,
    LinePrefix,
    Link,
    ListItem,
    ListItemMarker,
    ListItemPrefix,
    ListItemValue,
    ListOrdered,
    ListUnordered,
    Paragraph,
    Reference,
    ReferenceMarker,
    ReferenceString,
    Resource,
    ResourceDestination,
    ResourceDestinationLiteral,
    ResourceDestinationLiteralMarker,
    ResourceDestinationRaw,
    ResourceDestinationString,
    ResourceMarker,
    ResourceTitle,
    ResourceTitleMarker,
    ResourceTitleString,
    SpaceOrTab,
    Strong,
    StrongSequence,
    StrongText,
    ThematicBreak,
    ThematicBreakSequence,
}

/// One enter or exit occurrence of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: Kind,
    pub name: Name,
    pub point: Point,
    pub link: Option<Link>,
}

impl Event {
    pub fn enter(name: Name, point: Point) -> Self {
        Event {
            kind: Kind::Enter,
            name,
            point,
            link: None,
        }
    }

    pub fn exit(name: Name, point: Point) -> Self {
        Event {
            kind: Kind::Exit,
            name,
            point,
            link: None,
        }
    }

    pub fn is_enter(&self) -> bool {
        self.kind == Kind::Enter
    }

    pub fn is_exit(&self) -> bool {
        self.kind == Kind::Exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn event_enter_creation() {
        let event = Event::enter(Name::Paragraph, Point::start());
        assert_eq!(
            event,
            Event {
                kind: Kind::Enter,
                name: Name::Paragraph,
                point: Point::start(),
                link: None,
            }
        );
    }

    #[test]
    fn points_order_by_stream_position() {
        let a = Point {
            line: 1,
            column: 3,
            offset: 2,
            index: 0,
            buffer_index: 2,
        };
        let b = Point {
            line: 2,
            column: 1,
            offset: 4,
            index: 2,
            buffer_index: 0,
        };
        assert!(b.is_after(&a));
        assert!(!a.is_after(&b));
        assert!(!a.is_after(&a.clone()));
    }
}
