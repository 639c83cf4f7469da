//! Titles: text in double quotes, single quotes, or parentheses, which may
//! span lines but not contain a blank line.
//!
//! Tokens are named through `token_1` (whole title), `token_2` (markers)
//! and `token_3` (the string).

use crate::construct::partial_space_or_tab_eol::space_or_tab_eol_with_link;
use crate::event::{Content, Link, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

fn link(tokenizer: &mut Tokenizer) -> Link {
    let chain = match tokenizer.tokenize_state.chain {
        Some(chain) => chain,
        None => {
            let chain = tokenizer.next_chain();
            tokenizer.tokenize_state.chain = Some(chain);
            chain
        }
    };
    Link {
        chain,
        content: Content::String,
    }
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(marker @ ('"' | '\'' | '(')) => {
            tokenizer.tokenize_state.marker = if marker == '(' { ')' } else { marker };
            tokenizer.tokenize_state.chain = None;
            tokenizer.enter(tokenizer.tokenize_state.token_1);
            tokenizer.enter(tokenizer.tokenize_state.token_2);
            tokenizer.consume();
            tokenizer.exit(tokenizer.tokenize_state.token_2);
            State::Next(StateName::TitleBegin)
        }
        _ => State::Nok,
    }
}

pub fn begin(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(tokenizer.tokenize_state.marker) {
        tokenizer.enter(tokenizer.tokenize_state.token_2);
        tokenizer.consume();
        tokenizer.exit(tokenizer.tokenize_state.token_2);
        tokenizer.exit(tokenizer.tokenize_state.token_1);
        reset(tokenizer);
        State::Ok
    } else {
        tokenizer.enter(tokenizer.tokenize_state.token_3);
        State::Retry(StateName::TitleAtBreak)
    }
}

pub fn at_break(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if char == tokenizer.tokenize_state.marker => {
            tokenizer.exit(tokenizer.tokenize_state.token_3);
            State::Retry(StateName::TitleBegin)
        }
        Code::Eof => State::Retry(StateName::TitleNok),
        code if code.is_line_ending() => {
            let link = link(tokenizer);
            tokenizer.attempt(
                State::Next(StateName::TitleAtBreak),
                State::Next(StateName::TitleNok),
            );
            State::Retry(space_or_tab_eol_with_link(tokenizer, Some(link)))
        }
        _ => {
            let link = link(tokenizer);
            tokenizer.enter_link(Name::Data, link);
            State::Retry(StateName::TitleInside)
        }
    }
}

pub fn nok(tokenizer: &mut Tokenizer) -> State {
    reset(tokenizer);
    State::Nok
}

pub fn inside(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => {
            tokenizer.exit(Name::Data);
            State::Retry(StateName::TitleAtBreak)
        }
        Code::Char(char) if char == tokenizer.tokenize_state.marker => {
            tokenizer.exit(Name::Data);
            State::Retry(StateName::TitleAtBreak)
        }
        Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::TitleEscape)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::TitleInside)
        }
    }
}

pub fn escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if char == tokenizer.tokenize_state.marker || char == '\\' => {
            tokenizer.consume();
            State::Next(StateName::TitleInside)
        }
        _ => State::Retry(StateName::TitleInside),
    }
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.marker = '\0';
    tokenizer.tokenize_state.chain = None;
}
