//! # Constructs
//!
//! A construct is a named parsing rule: a start state plus optional hooks
//! that the engine runs when the rule succeeds. Which constructs are tried
//! at a given code is decided by declarative [`ConstructMap`] tables, one per
//! content type:
//!
//! ```text
//! document        *  +  -  0-9  → list item      >  → block quote
//! content         [              → definition
//! flow (initial)  tab  space     → indented code
//! flow            #  → heading (atx)   *  → thematic break
//!                 -  → setext underline, thematic break
//!                 <  → html (flow)     =  → setext underline
//!                 _  → thematic break  `  ~  → fenced code
//! string          &  → character reference   \  → character escape
//! text            !  [  ]  &  *  _  <  \  `  (see `default_text`)
//! ```
//!
//! The order of candidates inside one entry is behavior: `-` tries a setext
//! underline before a thematic break, so `a\n---` is a heading.
//!
//! Extensions add entries before or after the built-in ones, and
//! [`ParseOptions::disable`](crate::ParseOptions::disable) removes
//! constructs from every table.

pub mod attention;
pub mod autolink;
pub mod blank_line;
pub mod block_quote;
pub mod character_escape;
pub mod character_reference;
pub mod code_fenced;
pub mod code_indented;
pub mod code_text;
pub mod content;
pub mod definition;
pub mod document;
pub mod flow;
pub mod gfm_footnote_definition;
pub mod gfm_label_start_footnote;
pub mod gfm_table;
pub mod hard_break_escape;
pub mod heading_atx;
pub mod heading_setext;
pub mod html_flow;
pub mod html_text;
pub mod label_end;
pub mod label_start_image;
pub mod label_start_link;
pub mod list_item;
pub mod partial_data;
pub mod partial_destination;
pub mod partial_label;
pub mod partial_space_or_tab;
pub mod partial_space_or_tab_eol;
pub mod partial_title;
pub mod partial_whitespace;
pub mod string;
pub mod text;
pub mod thematic_break;

use std::collections::HashMap;

use crate::event::Name;
use crate::lexer::Code;
use crate::resolve::ResolveName;
use crate::state::StateName;
use crate::ParseOptions;

/// Every construct the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructName {
    Attention,
    Autolink,
    BlankLine,
    BlockQuote,
    CharacterEscape,
    CharacterReference,
    CodeFenced,
    CodeIndented,
    CodeText,
    Content,
    Definition,
    GfmFootnoteDefinition,
    GfmLabelStartFootnote,
    GfmStrikethrough,
    GfmTable,
    HardBreakEscape,
    HeadingAtx,
    HeadingSetext,
    HtmlFlow,
    HtmlText,
    LabelEnd,
    LabelStartImage,
    LabelStartLink,
    ListItem,
    ThematicBreak,
}

/// The record behind a [`ConstructName`].
///
/// `start` is required; every hook is optional and checked explicitly by
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Construct {
    pub start: StateName,
    /// Start state for continuing an open container on a later line.
    pub continuation: Option<StateName>,
    /// Token the container driver closes when the container ends.
    pub exit: Option<Name>,
    /// Runs on the construct's own events right after it succeeds.
    pub resolve: Option<ResolveName>,
    /// Runs once over all events when tokenizing is done.
    pub resolve_all: Option<ResolveName>,
    /// Runs over all events so far, right after the construct succeeds.
    pub resolve_to: Option<ResolveName>,
    /// No new container may start while this construct is open.
    pub concrete: bool,
    /// Lines without the container prefix may continue this construct.
    pub lazy: bool,
    /// May start while another construct is being interrupted.
    pub interruptible: bool,
    /// Helper construct that never becomes the current construct.
    pub partial: bool,
}

const BASE: Construct = Construct {
    start: StateName::DataStart,
    continuation: None,
    exit: None,
    resolve: None,
    resolve_all: None,
    resolve_to: None,
    concrete: false,
    lazy: false,
    interruptible: true,
    partial: false,
};

impl ConstructName {
    /// Look a construct up by its kebab-case name, such as `code-indented`.
    pub fn from_name(name: &str) -> Option<Self> {
        let construct = match name {
            "attention" => ConstructName::Attention,
            "autolink" => ConstructName::Autolink,
            "blank-line" => ConstructName::BlankLine,
            "block-quote" => ConstructName::BlockQuote,
            "character-escape" => ConstructName::CharacterEscape,
            "character-reference" => ConstructName::CharacterReference,
            "code-fenced" => ConstructName::CodeFenced,
            "code-indented" => ConstructName::CodeIndented,
            "code-text" => ConstructName::CodeText,
            "content" => ConstructName::Content,
            "definition" => ConstructName::Definition,
            "gfm-footnote-definition" => ConstructName::GfmFootnoteDefinition,
            "gfm-label-start-footnote" => ConstructName::GfmLabelStartFootnote,
            "gfm-strikethrough" => ConstructName::GfmStrikethrough,
            "gfm-table" => ConstructName::GfmTable,
            "hard-break-escape" => ConstructName::HardBreakEscape,
            "heading-atx" => ConstructName::HeadingAtx,
            "heading-setext" => ConstructName::HeadingSetext,
            "html-flow" => ConstructName::HtmlFlow,
            "html-text" => ConstructName::HtmlText,
            "label-end" => ConstructName::LabelEnd,
            "label-start-image" => ConstructName::LabelStartImage,
            "label-start-link" => ConstructName::LabelStartLink,
            "list-item" => ConstructName::ListItem,
            "thematic-break" => ConstructName::ThematicBreak,
            _ => return None,
        };
        Some(construct)
    }

    pub fn construct(self) -> Construct {
        match self {
            ConstructName::Attention | ConstructName::GfmStrikethrough => Construct {
                start: StateName::AttentionStart,
                resolve_all: Some(ResolveName::Attention),
                ..BASE
            },
            ConstructName::Autolink => Construct {
                start: StateName::AutolinkStart,
                ..BASE
            },
            ConstructName::BlankLine => Construct {
                start: StateName::BlankLineStart,
                partial: true,
                ..BASE
            },
            ConstructName::BlockQuote => Construct {
                start: StateName::BlockQuoteStart,
                continuation: Some(StateName::BlockQuoteContStart),
                exit: Some(Name::BlockQuote),
                ..BASE
            },
            ConstructName::CharacterEscape => Construct {
                start: StateName::CharacterEscapeStart,
                ..BASE
            },
            ConstructName::CharacterReference => Construct {
                start: StateName::CharacterReferenceStart,
                ..BASE
            },
            ConstructName::CodeFenced => Construct {
                start: StateName::CodeFencedStart,
                concrete: true,
                ..BASE
            },
            ConstructName::CodeIndented => Construct {
                start: StateName::CodeIndentedStart,
                interruptible: false,
                ..BASE
            },
            ConstructName::CodeText => Construct {
                start: StateName::CodeTextStart,
                resolve: Some(ResolveName::CodeText),
                ..BASE
            },
            ConstructName::Content => Construct {
                start: StateName::ContentChunkStart,
                resolve: Some(ResolveName::Content),
                lazy: true,
                ..BASE
            },
            ConstructName::Definition => Construct {
                start: StateName::DefinitionStart,
                interruptible: false,
                ..BASE
            },
            ConstructName::GfmFootnoteDefinition => Construct {
                start: StateName::GfmFootnoteDefinitionStart,
                continuation: Some(StateName::GfmFootnoteDefinitionContStart),
                exit: Some(Name::GfmFootnoteDefinition),
                interruptible: false,
                ..BASE
            },
            ConstructName::GfmLabelStartFootnote => Construct {
                start: StateName::GfmLabelStartFootnoteStart,
                resolve_all: Some(ResolveName::Label),
                ..BASE
            },
            ConstructName::GfmTable => Construct {
                start: StateName::GfmTableStart,
                interruptible: false,
                ..BASE
            },
            ConstructName::HardBreakEscape => Construct {
                start: StateName::HardBreakEscapeStart,
                ..BASE
            },
            ConstructName::HeadingAtx => Construct {
                start: StateName::HeadingAtxStart,
                resolve: Some(ResolveName::HeadingAtx),
                ..BASE
            },
            ConstructName::HeadingSetext => Construct {
                start: StateName::HeadingSetextStart,
                resolve_to: Some(ResolveName::HeadingSetext),
                ..BASE
            },
            ConstructName::HtmlFlow => Construct {
                start: StateName::HtmlFlowStart,
                resolve_to: Some(ResolveName::HtmlFlow),
                concrete: true,
                ..BASE
            },
            ConstructName::HtmlText => Construct {
                start: StateName::HtmlTextStart,
                ..BASE
            },
            ConstructName::LabelEnd => Construct {
                start: StateName::LabelEndStart,
                resolve_all: Some(ResolveName::Label),
                ..BASE
            },
            ConstructName::LabelStartImage => Construct {
                start: StateName::LabelStartImageStart,
                resolve_all: Some(ResolveName::Label),
                ..BASE
            },
            ConstructName::LabelStartLink => Construct {
                start: StateName::LabelStartLinkStart,
                resolve_all: Some(ResolveName::Label),
                ..BASE
            },
            ConstructName::ListItem => Construct {
                start: StateName::ListItemStart,
                continuation: Some(StateName::ListItemContStart),
                exit: Some(Name::ListItem),
                resolve_all: Some(ResolveName::List),
                ..BASE
            },
            ConstructName::ThematicBreak => Construct {
                start: StateName::ThematicBreakStart,
                ..BASE
            },
        }
    }
}

/// The per-context dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Document,
    ContentInitial,
    FlowInitial,
    Flow,
    String,
    Text,
}

/// Candidates keyed by leading character, plus a list tried for any code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructMap {
    by_key: HashMap<char, Vec<ConstructName>>,
    null: Vec<ConstructName>,
}

impl ConstructMap {
    fn insert(&mut self, key: Option<char>, constructs: &[ConstructName], placement: Placement) {
        let list = match key {
            Some(key) => self.by_key.entry(key).or_default(),
            None => &mut self.null,
        };

        match placement {
            Placement::Before => {
                list.splice(0..0, constructs.iter().copied());
            }
            Placement::After => list.extend_from_slice(constructs),
        }
    }

    fn remove(&mut self, disabled: &[ConstructName]) {
        for list in self.by_key.values_mut() {
            list.retain(|name| !disabled.contains(name));
        }
        self.null.retain(|name| !disabled.contains(name));
    }

    /// Candidates for `code`: keyed ones first, then the null list.
    pub fn candidates(&self, code: Code) -> Vec<ConstructName> {
        let mut candidates = code
            .key()
            .and_then(|key| self.by_key.get(&key))
            .cloned()
            .unwrap_or_default();
        candidates.extend_from_slice(&self.null);
        candidates
    }

    /// Whether `code` is keyed in this table, so data must stop before it.
    pub fn is_marker(&self, code: Code) -> bool {
        code.key()
            .and_then(|key| self.by_key.get(&key))
            .is_some_and(|list| !list.is_empty())
    }

    /// Whether any construct could start at `code`.
    pub fn has_candidates(&self, code: Code) -> bool {
        !self.null.is_empty()
            || code
                .key()
                .and_then(|key| self.by_key.get(&key))
                .is_some_and(|list| !list.is_empty())
    }
}

/// Where extension constructs go relative to existing candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// One table entry contributed by an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionEntry {
    pub table: Table,
    pub key: Option<char>,
    pub constructs: Vec<ConstructName>,
    pub placement: Placement,
}

/// A set of additional table entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extension {
    pub entries: Vec<ExtensionEntry>,
}

impl Extension {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        table: Table,
        key: Option<char>,
        constructs: &[ConstructName],
        placement: Placement,
    ) -> Self {
        self.entries.push(ExtensionEntry {
            table,
            key,
            constructs: constructs.to_vec(),
            placement,
        });
        self
    }

    /// GitHub flavored tables, strikethrough and footnotes.
    pub fn gfm() -> Self {
        Extension::new()
            .with(
                Table::Document,
                Some('['),
                &[ConstructName::GfmFootnoteDefinition],
                Placement::After,
            )
            .with(
                Table::Flow,
                None,
                &[ConstructName::GfmTable],
                Placement::After,
            )
            .with(
                Table::Text,
                Some('['),
                &[ConstructName::GfmLabelStartFootnote],
                Placement::Before,
            )
            .with(
                Table::Text,
                Some('~'),
                &[ConstructName::GfmStrikethrough],
                Placement::After,
            )
    }
}

/// All tables for one parse, built once from the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    document: ConstructMap,
    content_initial: ConstructMap,
    flow_initial: ConstructMap,
    flow: ConstructMap,
    string: ConstructMap,
    text: ConstructMap,
}

impl Tables {
    pub fn new(options: &ParseOptions) -> Self {
        let mut tables = Tables::default_tables();

        for extension in &options.extensions {
            for entry in &extension.entries {
                tables
                    .get_mut(entry.table)
                    .insert(entry.key, &entry.constructs, entry.placement);
            }
        }

        if !options.disable.is_empty() {
            for table in [
                Table::Document,
                Table::ContentInitial,
                Table::FlowInitial,
                Table::Flow,
                Table::String,
                Table::Text,
            ] {
                tables.get_mut(table).remove(&options.disable);
            }
        }

        tables
    }

    fn default_tables() -> Self {
        use ConstructName::*;
        use Placement::After;

        let mut document = ConstructMap::default();
        for key in ['*', '+', '-', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9'] {
            document.insert(Some(key), &[ListItem], After);
        }
        document.insert(Some('>'), &[BlockQuote], After);

        let mut content_initial = ConstructMap::default();
        content_initial.insert(Some('['), &[Definition], After);

        let mut flow_initial = ConstructMap::default();
        flow_initial.insert(Some('\t'), &[CodeIndented], After);
        flow_initial.insert(Some(' '), &[CodeIndented], After);

        let mut flow = ConstructMap::default();
        flow.insert(Some('#'), &[HeadingAtx], After);
        flow.insert(Some('*'), &[ThematicBreak], After);
        flow.insert(Some('-'), &[HeadingSetext, ThematicBreak], After);
        flow.insert(Some('<'), &[HtmlFlow], After);
        flow.insert(Some('='), &[HeadingSetext], After);
        flow.insert(Some('_'), &[ThematicBreak], After);
        flow.insert(Some('`'), &[CodeFenced], After);
        flow.insert(Some('~'), &[CodeFenced], After);

        let mut string = ConstructMap::default();
        string.insert(Some('&'), &[CharacterReference], After);
        string.insert(Some('\\'), &[CharacterEscape], After);

        Tables {
            document,
            content_initial,
            flow_initial,
            flow,
            string,
            text: Tables::default_text(),
        }
    }

    fn default_text() -> ConstructMap {
        use ConstructName::*;
        use Placement::After;

        let mut text = ConstructMap::default();
        text.insert(Some('!'), &[LabelStartImage], After);
        text.insert(Some('&'), &[CharacterReference], After);
        text.insert(Some('*'), &[Attention], After);
        text.insert(Some('<'), &[Autolink, HtmlText], After);
        text.insert(Some('['), &[LabelStartLink], After);
        text.insert(Some('\\'), &[HardBreakEscape, CharacterEscape], After);
        text.insert(Some(']'), &[LabelEnd], After);
        text.insert(Some('_'), &[Attention], After);
        text.insert(Some('`'), &[CodeText], After);
        text
    }

    pub fn get(&self, table: Table) -> &ConstructMap {
        match table {
            Table::Document => &self.document,
            Table::ContentInitial => &self.content_initial,
            Table::FlowInitial => &self.flow_initial,
            Table::Flow => &self.flow,
            Table::String => &self.string,
            Table::Text => &self.text,
        }
    }

    fn get_mut(&mut self, table: Table) -> &mut ConstructMap {
        match table {
            Table::Document => &mut self.document,
            Table::ContentInitial => &mut self.content_initial,
            Table::FlowInitial => &mut self.flow_initial,
            Table::Flow => &mut self.flow,
            Table::String => &mut self.string,
            Table::Text => &mut self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dash_tries_setext_before_thematic_break() {
        let tables = Tables::new(&ParseOptions::default());
        assert_eq!(
            tables.get(Table::Flow).candidates(Code::Char('-')),
            vec![ConstructName::HeadingSetext, ConstructName::ThematicBreak]
        );
    }

    #[test]
    fn unkeyed_code_has_no_candidates() {
        let tables = Tables::new(&ParseOptions::default());
        assert!(!tables.get(Table::Flow).has_candidates(Code::Char('a')));
        assert!(tables.get(Table::Flow).candidates(Code::Eof).is_empty());
    }

    #[test]
    fn extension_before_goes_first() {
        let tables = Tables::new(&ParseOptions::gfm());
        assert_eq!(
            tables.get(Table::Text).candidates(Code::Char('[')),
            vec![
                ConstructName::GfmLabelStartFootnote,
                ConstructName::LabelStartLink
            ]
        );
    }

    #[test]
    fn null_entries_follow_keyed_candidates() {
        let tables = Tables::new(&ParseOptions::gfm());
        assert_eq!(
            tables.get(Table::Flow).candidates(Code::Char('#')),
            vec![ConstructName::HeadingAtx, ConstructName::GfmTable]
        );
        assert_eq!(
            tables.get(Table::Flow).candidates(Code::Char('|')),
            vec![ConstructName::GfmTable]
        );
    }

    #[test]
    fn disabled_constructs_are_removed() {
        let options = ParseOptions {
            disable: vec![ConstructName::CodeIndented],
            ..ParseOptions::default()
        };
        let tables = Tables::new(&options);
        assert!(
            tables
                .get(Table::FlowInitial)
                .candidates(Code::Char(' '))
                .is_empty()
        );
    }

    #[test]
    fn tab_filler_keys_like_space() {
        let tables = Tables::new(&ParseOptions::default());
        assert_eq!(
            tables.get(Table::FlowInitial).candidates(Code::VirtualSpace),
            vec![ConstructName::CodeIndented]
        );
    }

    #[test]
    fn names_look_up_constructs() {
        assert_eq!(
            ConstructName::from_name("code-indented"),
            Some(ConstructName::CodeIndented)
        );
        assert_eq!(ConstructName::from_name("gfm-table"), Some(ConstructName::GfmTable));
        assert_eq!(ConstructName::from_name("wikilink"), None);
    }
}
