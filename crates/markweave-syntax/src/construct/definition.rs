//! # Definitions
//!
//! ```markdown
//! [label]: <destination> "title"
//! ```
//!
//! Definitions only occur at the start of content, and several may follow
//! each other. The label is normalized and recorded on the parse state as
//! soon as the definition is complete, so references in any text of the
//! document can match it. The title may be on the next line; when what
//! follows the destination is not a valid title, the definition ends at
//! the destination if the rest of its line is blank.

use crate::construct::partial_space_or_tab::space_or_tab;
use crate::construct::partial_space_or_tab_eol::space_or_tab_eol;
use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::identifier::normalize_identifier;
use crate::util::skip;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('[') {
        return State::Nok;
    }

    tokenizer.enter(Name::Definition);
    tokenizer.tokenize_state.token_1 = Name::DefinitionLabel;
    tokenizer.tokenize_state.token_2 = Name::DefinitionLabelMarker;
    tokenizer.tokenize_state.token_3 = Name::DefinitionLabelString;
    tokenizer.attempt(
        State::Next(StateName::DefinitionLabelAfter),
        State::Next(StateName::DefinitionLabelNok),
    );
    State::Retry(StateName::LabelStart)
}

pub fn label_after(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);

    let events = &tokenizer.events;
    let label = skip::to_back(events, events.len() - 1, &[Name::DefinitionLabelString])
        .and_then(|exit| {
            events[..exit]
                .iter()
                .rposition(|event| event.is_enter() && event.name == Name::DefinitionLabelString)
                .map(|enter| (enter, exit))
        })
        .map(|(enter, exit)| {
            tokenizer
                .parse_state
                .serialize(&events[enter].point, &events[exit].point, false)
        });

    match (tokenizer.current, label) {
        (Code::Char(':'), Some(label)) => {
            tokenizer.tokenize_state.buffer = normalize_identifier(&label);
            tokenizer.enter(Name::DefinitionMarker);
            tokenizer.consume();
            tokenizer.exit(Name::DefinitionMarker);
            State::Next(StateName::DefinitionMarkerAfter)
        }
        _ => State::Nok,
    }
}

pub fn label_nok(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);
    State::Nok
}

pub fn marker_after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(
        State::Next(StateName::DefinitionDestinationBefore),
        State::Next(StateName::DefinitionDestinationBefore),
    );
    State::Retry(space_or_tab_eol(tokenizer))
}

pub fn destination_before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.token_1 = Name::DefinitionDestination;
    tokenizer.tokenize_state.token_2 = Name::DefinitionDestinationLiteral;
    tokenizer.tokenize_state.token_3 = Name::DefinitionDestinationLiteralMarker;
    tokenizer.tokenize_state.token_4 = Name::DefinitionDestinationRaw;
    tokenizer.tokenize_state.token_5 = Name::DefinitionDestinationString;
    tokenizer.tokenize_state.size_b = usize::MAX;
    tokenizer.attempt(
        State::Next(StateName::DefinitionDestinationAfter),
        State::Next(StateName::DefinitionDestinationMissing),
    );
    State::Retry(StateName::DestinationStart)
}

pub fn destination_after(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);
    tokenizer.tokenize_state.size_b = 0;
    tokenizer.attempt(
        State::Next(StateName::DefinitionAfter),
        State::Next(StateName::DefinitionAfter),
    );
    State::Retry(StateName::DefinitionTitleBefore)
}

pub fn destination_missing(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);
    tokenizer.tokenize_state.size_b = 0;
    tokenizer.tokenize_state.buffer.clear();
    State::Nok
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::DefinitionAfterWhitespace),
            State::Nok,
        );
        State::Retry(space_or_tab(tokenizer))
    } else {
        State::Retry(StateName::DefinitionAfterWhitespace)
    }
}

pub fn after_whitespace(tokenizer: &mut Tokenizer) -> State {
    let identifier = std::mem::take(&mut tokenizer.tokenize_state.buffer);

    if tokenizer.current.is_line_ending_or_eof() {
        tokenizer.exit(Name::Definition);
        tokenizer
            .parse_state
            .definitions
            .borrow_mut()
            .push(identifier);
        State::Ok
    } else {
        State::Nok
    }
}

/// A title must be separated from the destination by whitespace.
pub fn title_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_whitespace_or_eof() && tokenizer.current != Code::Eof {
        tokenizer.attempt(
            State::Next(StateName::DefinitionTitleBeforeMarker),
            State::Nok,
        );
        State::Retry(space_or_tab_eol(tokenizer))
    } else {
        State::Nok
    }
}

pub fn title_before_marker(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.token_1 = Name::DefinitionTitle;
    tokenizer.tokenize_state.token_2 = Name::DefinitionTitleMarker;
    tokenizer.tokenize_state.token_3 = Name::DefinitionTitleString;
    tokenizer.attempt(
        State::Next(StateName::DefinitionTitleAfter),
        State::Next(StateName::DefinitionTitleNok),
    );
    State::Retry(StateName::TitleStart)
}

pub fn title_nok(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);
    State::Nok
}

pub fn title_after(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);

    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::DefinitionTitleAfterOptionalWhitespace),
            State::Nok,
        );
        State::Retry(space_or_tab(tokenizer))
    } else {
        State::Retry(StateName::DefinitionTitleAfterOptionalWhitespace)
    }
}

pub fn title_after_optional_whitespace(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        State::Ok
    } else {
        State::Nok
    }
}

fn reset_tokens(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.token_1 = Name::Data;
    tokenizer.tokenize_state.token_2 = Name::Data;
    tokenizer.tokenize_state.token_3 = Name::Data;
    tokenizer.tokenize_state.token_4 = Name::Data;
    tokenizer.tokenize_state.token_5 = Name::Data;
}
