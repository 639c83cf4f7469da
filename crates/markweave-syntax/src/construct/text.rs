//! Text content: the full set of inline constructs.
//!
//! Codes that start a construct are looked up in the text table; when every
//! candidate fails the code becomes data, and data runs until the next code
//! in the table.

use crate::construct::Table;
use crate::lexer::Code;
use crate::resolve::ResolveName;
use crate::state::{State, StateName};
use crate::tokenizer::{AttemptKind, Tokenizer};

pub fn start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.register_resolver(ResolveName::Data);
    tokenizer.register_resolver(ResolveName::Text);
    tokenizer.tokenize_state.data_table = Some(Table::Text);
    State::Retry(StateName::TextBefore)
}

pub fn before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof {
        return State::Ok;
    }

    tokenizer.constructs(
        AttemptKind::Attempt,
        Table::Text,
        State::Next(StateName::TextBefore),
        State::Next(StateName::TextBeforeData),
    )
}

pub fn before_data(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(State::Next(StateName::TextBefore), State::Nok);
    State::Retry(StateName::DataStart)
}
