//! Destinations: `<enclosed>` or raw, as in definitions and resources.
//!
//! The caller names the tokens through `token_1` (whole destination),
//! `token_2` (enclosed), `token_3` (its markers), `token_4` (raw) and
//! `token_5` (the string), and sets `size_b` to how deeply parentheses may
//! nest in a raw destination.

use crate::event::{Content, Link, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::character::is_ascii_control;

fn enter_string(tokenizer: &mut Tokenizer) {
    tokenizer.enter(tokenizer.tokenize_state.token_5);
    let chain = tokenizer.next_chain();
    tokenizer.enter_link(
        Name::Data,
        Link {
            chain,
            content: Content::String,
        },
    );
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('<') => {
            tokenizer.enter(tokenizer.tokenize_state.token_1);
            tokenizer.enter(tokenizer.tokenize_state.token_2);
            tokenizer.enter(tokenizer.tokenize_state.token_3);
            tokenizer.consume();
            tokenizer.exit(tokenizer.tokenize_state.token_3);
            State::Next(StateName::DestinationEnclosedBefore)
        }
        Code::Eof | Code::Char(' ' | ')') => State::Nok,
        code if code.is_whitespace_or_eof() || is_ascii_control(code) => State::Nok,
        _ => {
            tokenizer.enter(tokenizer.tokenize_state.token_1);
            tokenizer.enter(tokenizer.tokenize_state.token_4);
            enter_string(tokenizer);
            State::Retry(StateName::DestinationRaw)
        }
    }
}

pub fn enclosed_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        tokenizer.enter(tokenizer.tokenize_state.token_3);
        tokenizer.consume();
        tokenizer.exit(tokenizer.tokenize_state.token_3);
        tokenizer.exit(tokenizer.tokenize_state.token_2);
        tokenizer.exit(tokenizer.tokenize_state.token_1);
        State::Ok
    } else {
        enter_string(tokenizer);
        State::Retry(StateName::DestinationEnclosed)
    }
}

pub fn enclosed(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => State::Nok,
        Code::Char('<') => State::Nok,
        Code::Char('>') => {
            tokenizer.exit(Name::Data);
            tokenizer.exit(tokenizer.tokenize_state.token_5);
            State::Retry(StateName::DestinationEnclosedBefore)
        }
        Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::DestinationEnclosedEscape)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::DestinationEnclosed)
        }
    }
}

pub fn enclosed_escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('<' | '>' | '\\') => {
            tokenizer.consume();
            State::Next(StateName::DestinationEnclosed)
        }
        _ => State::Retry(StateName::DestinationEnclosed),
    }
}

pub fn raw(tokenizer: &mut Tokenizer) -> State {
    let depth = tokenizer.tokenize_state.size;

    match tokenizer.current {
        code if depth == 0 && (code.is_whitespace_or_eof() || code == Code::Char(')')) => {
            tokenizer.exit(Name::Data);
            tokenizer.exit(tokenizer.tokenize_state.token_5);
            tokenizer.exit(tokenizer.tokenize_state.token_4);
            tokenizer.exit(tokenizer.tokenize_state.token_1);
            tokenizer.tokenize_state.size = 0;
            State::Ok
        }
        Code::Char('(') if depth < tokenizer.tokenize_state.size_b => {
            tokenizer.consume();
            tokenizer.tokenize_state.size += 1;
            State::Next(StateName::DestinationRaw)
        }
        Code::Char(')') => {
            tokenizer.consume();
            tokenizer.tokenize_state.size -= 1;
            State::Next(StateName::DestinationRaw)
        }
        code if code.is_whitespace_or_eof()
            || code == Code::Char('(')
            || is_ascii_control(code) =>
        {
            tokenizer.tokenize_state.size = 0;
            State::Nok
        }
        Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::DestinationRawEscape)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::DestinationRaw)
        }
    }
}

pub fn raw_escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('(' | ')' | '\\') => {
            tokenizer.consume();
            State::Next(StateName::DestinationRaw)
        }
        _ => State::Retry(StateName::DestinationRaw),
    }
}
