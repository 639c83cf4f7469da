//! A backslash before ASCII punctuation makes that character literal.

use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::character::is_ascii_punctuation;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('\\') {
        return State::Nok;
    }

    tokenizer.enter(Name::CharacterEscape);
    tokenizer.enter(Name::CharacterEscapeMarker);
    tokenizer.consume();
    tokenizer.exit(Name::CharacterEscapeMarker);
    State::Next(StateName::CharacterEscapeInside)
}

pub fn inside(tokenizer: &mut Tokenizer) -> State {
    if is_ascii_punctuation(tokenizer.current) {
        tokenizer.enter(Name::CharacterEscapeValue);
        tokenizer.consume();
        tokenizer.exit(Name::CharacterEscapeValue);
        tokenizer.exit(Name::CharacterEscape);
        State::Ok
    } else {
        State::Nok
    }
}
