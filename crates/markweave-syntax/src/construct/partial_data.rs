//! Plain data in string and text content.
//!
//! Data runs until a line ending or a code that some construct of the
//! current table is keyed on. Adjacent data tokens are merged once
//! tokenizing is done.

use crate::event::{Kind, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

fn is_marker(tokenizer: &Tokenizer, code: Code) -> bool {
    tokenizer
        .tokenize_state
        .data_table
        .is_some_and(|table| tokenizer.parse_state.tables.get(table).is_marker(code))
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    // Every construct keyed on this code failed: it is data.
    if is_marker(tokenizer, tokenizer.current) {
        tokenizer.enter(Name::Data);
        tokenizer.consume();
        State::Next(StateName::DataInside)
    } else {
        State::Retry(StateName::DataAtBreak)
    }
}

pub fn at_break(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Ok,
        code if code.is_line_ending() => {
            tokenizer.enter(Name::LineEnding);
            tokenizer.consume();
            tokenizer.exit(Name::LineEnding);
            State::Next(StateName::DataAtBreak)
        }
        code if is_marker(tokenizer, code) => State::Ok,
        _ => {
            tokenizer.enter(Name::Data);
            State::Retry(StateName::DataInside)
        }
    }
}

pub fn inside(tokenizer: &mut Tokenizer) -> State {
    let code = tokenizer.current;

    if code.is_line_ending_or_eof() || is_marker(tokenizer, code) {
        tokenizer.exit(Name::Data);
        State::Retry(StateName::DataAtBreak)
    } else {
        tokenizer.consume();
        State::Next(StateName::DataInside)
    }
}

/// Merge adjacent data tokens.
pub fn resolve(tokenizer: &mut Tokenizer) {
    let mut index = 0;

    while index < tokenizer.events.len() {
        let event = &tokenizer.events[index];

        if event.kind == Kind::Enter && event.name == Name::Data {
            let exit = index + 1;
            let mut last = exit;

            while last + 1 < tokenizer.events.len() && tokenizer.events[last + 1].name == Name::Data {
                last += 2;
            }

            if last > exit {
                // Drop the inner exit and enter pairs, keep the last exit.
                tokenizer.map.add(exit, last - exit, vec![]);
            }

            index = last;
        }

        index += 1;
    }
}
