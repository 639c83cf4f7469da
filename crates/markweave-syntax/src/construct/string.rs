//! String content: character escapes and references, everything else data.
//!
//! Used for titles, destinations, fence info and other places where markup
//! has no meaning.

use crate::construct::Table;
use crate::lexer::Code;
use crate::resolve::ResolveName;
use crate::state::{State, StateName};
use crate::tokenizer::{AttemptKind, Tokenizer};

pub fn start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.register_resolver(ResolveName::Data);
    tokenizer.register_resolver(ResolveName::String);
    tokenizer.tokenize_state.data_table = Some(Table::String);
    State::Retry(StateName::StringBefore)
}

pub fn before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof {
        return State::Ok;
    }

    tokenizer.constructs(
        AttemptKind::Attempt,
        Table::String,
        State::Next(StateName::StringBefore),
        State::Next(StateName::StringBeforeData),
    )
}

pub fn before_data(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(State::Next(StateName::StringBefore), State::Nok);
    State::Retry(StateName::DataStart)
}
