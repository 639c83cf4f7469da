//! A line with nothing but spaces and tabs, or nothing at all.

use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

use super::partial_space_or_tab::space_or_tab;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::BlankLineAfter),
            State::Next(StateName::BlankLineAfter),
        );
        State::Retry(space_or_tab(tokenizer))
    } else {
        State::Retry(StateName::BlankLineAfter)
    }
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        State::Ok
    } else {
        State::Nok
    }
}
