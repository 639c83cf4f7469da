//! A backslash at the end of a line is a hard break.

use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('\\') {
        return State::Nok;
    }

    tokenizer.enter(Name::HardBreakEscape);
    tokenizer.consume();
    State::Next(StateName::HardBreakEscapeAfter)
}

/// The line ending itself stays data.
pub fn after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending() {
        tokenizer.exit(Name::HardBreakEscape);
        State::Ok
    } else {
        State::Nok
    }
}
