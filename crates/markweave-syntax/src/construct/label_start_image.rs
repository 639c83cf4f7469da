//! `![`: the start of an image.

use crate::construct::{ConstructName, Table};
use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{LabelKind, LabelStart, Tokenizer};

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('!') {
        return State::Nok;
    }

    tokenizer.tokenize_state.start = tokenizer.events.len();
    tokenizer.enter(Name::LabelImage);
    tokenizer.enter(Name::LabelImageMarker);
    tokenizer.consume();
    tokenizer.exit(Name::LabelImageMarker);
    State::Next(StateName::LabelStartImageOpen)
}

pub fn open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('[') {
        tokenizer.tokenize_state.start = 0;
        return State::Nok;
    }

    tokenizer.enter(Name::LabelMarker);
    tokenizer.consume();
    tokenizer.exit(Name::LabelMarker);
    tokenizer.exit(Name::LabelImage);
    State::Next(StateName::LabelStartImageAfter)
}

/// `![^` is left alone when footnotes are on, so `!` can precede a call.
pub fn after(tokenizer: &mut Tokenizer) -> State {
    let enter = std::mem::take(&mut tokenizer.tokenize_state.start);
    let footnotes = tokenizer
        .parse_state
        .tables
        .get(Table::Text)
        .candidates(Code::Char('['))
        .contains(&ConstructName::GfmLabelStartFootnote);

    if footnotes && tokenizer.current == Code::Char('^') {
        return State::Nok;
    }

    tokenizer.tokenize_state.label_starts.push(LabelStart {
        kind: LabelKind::Image,
        start: (enter, tokenizer.events.len() - 1),
        inactive: false,
    });
    State::Ok
}
