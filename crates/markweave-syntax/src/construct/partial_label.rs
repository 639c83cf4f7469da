//! Labels: `[` and `]` around text that may span lines, used by
//! definitions and by full references.
//!
//! The caller names the tokens through `token_1` (the whole label),
//! `token_2` (the markers) and `token_3` (the string). The string must
//! contain something other than whitespace, and no unescaped brackets.

use crate::construct::partial_space_or_tab_eol::space_or_tab_eol_with_link;
use crate::event::{Content, Link, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::LINK_REFERENCE_SIZE_MAX;

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
    if tokenizer.current != Code::Char('[') {
        return State::Nok;
    }

    tokenizer.tokenize_state.chain = None;
    tokenizer.enter(tokenizer.tokenize_state.token_1);
    tokenizer.enter(tokenizer.tokenize_state.token_2);
    tokenizer.consume();
    tokenizer.exit(tokenizer.tokenize_state.token_2);
    tokenizer.enter(tokenizer.tokenize_state.token_3);
    State::Next(StateName::LabelAtBreak)
}

pub fn at_break(tokenizer: &mut Tokenizer) -> State {
    let size = tokenizer.tokenize_state.size;
    let seen = tokenizer.tokenize_state.seen;

    match tokenizer.current {
        _ if size > LINK_REFERENCE_SIZE_MAX => State::Retry(StateName::LabelNok),
        Code::Eof | Code::Char('[') => State::Retry(StateName::LabelNok),
        Code::Char(']') if !seen => State::Retry(StateName::LabelNok),
        Code::Char(']') => {
            tokenizer.exit(tokenizer.tokenize_state.token_3);
            tokenizer.enter(tokenizer.tokenize_state.token_2);
            tokenizer.consume();
            tokenizer.exit(tokenizer.tokenize_state.token_2);
            tokenizer.exit(tokenizer.tokenize_state.token_1);
            reset(tokenizer);
            State::Ok
        }
        code if code.is_line_ending() => {
            let link = link(tokenizer);
            tokenizer.attempt(
                State::Next(StateName::LabelAtBreak),
                State::Next(StateName::LabelNok),
            );
            State::Retry(space_or_tab_eol_with_link(tokenizer, Some(link)))
        }
        _ => {
            let link = link(tokenizer);
            tokenizer.enter_link(Name::Data, link);
            State::Retry(StateName::LabelInside)
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
            State::Retry(StateName::LabelAtBreak)
        }
        Code::Char('[' | ']') => {
            tokenizer.exit(Name::Data);
            State::Retry(StateName::LabelAtBreak)
        }
        _ if tokenizer.tokenize_state.size > LINK_REFERENCE_SIZE_MAX => {
            tokenizer.exit(Name::Data);
            State::Retry(StateName::LabelAtBreak)
        }
        code => {
            if !code.is_space_or_tab() {
                tokenizer.tokenize_state.seen = true;
            }
            tokenizer.tokenize_state.size += 1;
            tokenizer.consume();
            if code == Code::Char('\\') {
                State::Next(StateName::LabelEscape)
            } else {
                State::Next(StateName::LabelInside)
            }
        }
    }
}

pub fn escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('[' | '\\' | ']') => {
            tokenizer.tokenize_state.size += 1;
            tokenizer.consume();
            State::Next(StateName::LabelInside)
        }
        _ => State::Retry(StateName::LabelInside),
    }
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.chain = None;
    tokenizer.tokenize_state.seen = false;
    tokenizer.tokenize_state.size = 0;
}
