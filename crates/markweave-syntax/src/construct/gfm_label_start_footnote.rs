//! `[^`: the start of a footnote call.
//!
//! Whether it is one is only known at the `]`: when no footnote definition
//! has the label, the start is turned into a link start and the `^`
//! becomes part of the link text (see [`super::label_end`]).

use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{LabelKind, LabelStart, Tokenizer};

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('[') {
        return State::Nok;
    }

    tokenizer.tokenize_state.start = tokenizer.events.len();
    tokenizer.enter(Name::LabelLink);
    tokenizer.enter(Name::LabelMarker);
    tokenizer.consume();
    tokenizer.exit(Name::LabelMarker);
    State::Next(StateName::GfmLabelStartFootnoteOpen)
}

pub fn open(tokenizer: &mut Tokenizer) -> State {
    let enter = std::mem::take(&mut tokenizer.tokenize_state.start);

    if tokenizer.current != Code::Char('^') {
        return State::Nok;
    }

    tokenizer.enter(Name::GfmFootnoteCallMarker);
    tokenizer.consume();
    tokenizer.exit(Name::GfmFootnoteCallMarker);
    tokenizer.exit(Name::LabelLink);
    tokenizer.tokenize_state.label_starts.push(LabelStart {
        kind: LabelKind::GfmFootnote,
        start: (enter, tokenizer.events.len() - 1),
        inactive: false,
    });
    State::Ok
}
