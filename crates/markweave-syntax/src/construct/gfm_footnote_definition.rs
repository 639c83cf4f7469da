//! GFM footnote definitions: `[^label]:` opens a container whose later
//! lines are indented by four columns.
//!
//! ```markdown
//! [^note]: The first paragraph.
//!
//!     A second paragraph.
//! ```

use crate::construct::partial_space_or_tab::space_or_tab_min_max;
use crate::event::{Content, Link, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::{LINK_REFERENCE_SIZE_MAX, TAB_SIZE};
use crate::util::identifier::normalize_identifier;
use crate::util::skip;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('[') {
        tokenizer.enter(Name::GfmFootnoteDefinition);
        tokenizer.enter(Name::GfmFootnoteDefinitionPrefix);
        tokenizer.enter(Name::GfmFootnoteDefinitionLabel);
        tokenizer.enter(Name::GfmFootnoteDefinitionLabelMarker);
        tokenizer.consume();
        tokenizer.exit(Name::GfmFootnoteDefinitionLabelMarker);
        State::Next(StateName::GfmFootnoteDefinitionLabelAtMarker)
    } else {
        State::Nok
    }
}

pub fn label_at_marker(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('^') {
        tokenizer.enter(Name::GfmFootnoteDefinitionMarker);
        tokenizer.consume();
        tokenizer.exit(Name::GfmFootnoteDefinitionMarker);
        tokenizer.enter(Name::GfmFootnoteDefinitionLabelString);
        let chain = tokenizer.next_chain();
        tokenizer.enter_link(
            Name::Data,
            Link {
                chain,
                content: Content::String,
            },
        );
        State::Next(StateName::GfmFootnoteDefinitionLabelInside)
    } else {
        State::Nok
    }
}

pub fn label_inside(tokenizer: &mut Tokenizer) -> State {
    let size = tokenizer.tokenize_state.size;

    match tokenizer.current {
        // Whitespace is not allowed in footnote labels.
        Code::Char(' ' | '[') | Code::HorizontalTab | Code::VirtualSpace => nok(tokenizer),
        code if code.is_line_ending_or_eof() => nok(tokenizer),
        _ if size > LINK_REFERENCE_SIZE_MAX => nok(tokenizer),
        Code::Char(']') if size == 0 => nok(tokenizer),
        Code::Char(']') => {
            tokenizer.tokenize_state.size = 0;
            tokenizer.exit(Name::Data);
            tokenizer.exit(Name::GfmFootnoteDefinitionLabelString);
            tokenizer.enter(Name::GfmFootnoteDefinitionLabelMarker);
            tokenizer.consume();
            tokenizer.exit(Name::GfmFootnoteDefinitionLabelMarker);
            tokenizer.exit(Name::GfmFootnoteDefinitionLabel);
            State::Next(StateName::GfmFootnoteDefinitionLabelAfter)
        }
        code => {
            tokenizer.consume();
            tokenizer.tokenize_state.size += 1;
            if code == Code::Char('\\') {
                State::Next(StateName::GfmFootnoteDefinitionLabelEscape)
            } else {
                State::Next(StateName::GfmFootnoteDefinitionLabelInside)
            }
        }
    }
}

pub fn label_escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('\\' | '[' | ']') => {
            tokenizer.consume();
            tokenizer.tokenize_state.size += 1;
            State::Next(StateName::GfmFootnoteDefinitionLabelInside)
        }
        _ => State::Retry(StateName::GfmFootnoteDefinitionLabelInside),
    }
}

fn nok(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.size = 0;
    State::Nok
}

pub fn label_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char(':') {
        return State::Nok;
    }

    if let Some(end) = skip::to_back(
        &tokenizer.events,
        tokenizer.events.len() - 1,
        &[Name::GfmFootnoteDefinitionLabelString],
    ) && let Some(start) = end.checked_sub(3)
    {
        let label = tokenizer.parse_state.serialize(
            &tokenizer.events[start].point,
            &tokenizer.events[end].point,
            false,
        );
        tokenizer
            .parse_state
            .gfm_footnote_definitions
            .borrow_mut()
            .push(normalize_identifier(&label));
    }

    tokenizer.enter(Name::DefinitionMarker);
    tokenizer.consume();
    tokenizer.exit(Name::DefinitionMarker);
    tokenizer.attempt(
        State::Next(StateName::GfmFootnoteDefinitionWhitespaceAfter),
        State::Nok,
    );
    // All whitespace after the marker is eaten: content can not be
    // indented code on the first line.
    State::Next(space_or_tab_min_max(tokenizer, 0, usize::MAX))
}

pub fn whitespace_after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::GfmFootnoteDefinitionPrefix);
    State::Ok
}

pub fn cont_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.check(
        State::Next(StateName::GfmFootnoteDefinitionContBlank),
        State::Next(StateName::GfmFootnoteDefinitionContFilled),
    );
    State::Retry(StateName::BlankLineStart)
}

pub fn cont_blank(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        State::Retry(space_or_tab_min_max(tokenizer, 0, TAB_SIZE))
    } else {
        State::Ok
    }
}

pub fn cont_filled(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        State::Retry(space_or_tab_min_max(tokenizer, TAB_SIZE, TAB_SIZE))
    } else {
        State::Nok
    }
}
