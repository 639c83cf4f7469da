//! Indented code: lines indented by at least four columns.
//!
//! Blank lines inside are kept, but trailing ones are not part of the code:
//! each further line is looked at before anything is consumed.

use crate::construct::partial_space_or_tab::{Options, space_or_tab_with_options};
use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::TAB_SIZE;

fn indent(tokenizer: &mut Tokenizer, min: usize, max: usize) -> StateName {
    space_or_tab_with_options(
        tokenizer,
        Options {
            min,
            max,
            name: Name::LinePrefix,
            link: None,
        },
    )
}

/// Indented code can not interrupt a paragraph, so the table never offers
/// it with `interrupt` set.
pub fn start(tokenizer: &mut Tokenizer) -> State {
    if !tokenizer.current.is_space_or_tab() {
        return State::Nok;
    }

    tokenizer.enter(Name::CodeIndented);
    tokenizer.attempt(State::Next(StateName::CodeIndentedAtBreak), State::Nok);
    State::Retry(indent(tokenizer, TAB_SIZE, TAB_SIZE))
}

pub fn at_break(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Retry(StateName::CodeIndentedAfter),
        code if code.is_line_ending() => {
            tokenizer.attempt(
                State::Next(StateName::CodeIndentedAtBreak),
                State::Next(StateName::CodeIndentedAfter),
            );
            State::Retry(StateName::CodeIndentedFurtherStart)
        }
        _ => {
            tokenizer.enter(Name::CodeFlowChunk);
            State::Retry(StateName::CodeIndentedInside)
        }
    }
}

pub fn inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        tokenizer.exit(Name::CodeFlowChunk);
        State::Retry(StateName::CodeIndentedAtBreak)
    } else {
        tokenizer.consume();
        State::Next(StateName::CodeIndentedInside)
    }
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::CodeIndented);
    State::Ok
}

/// Whether the next line continues the code: indented enough, or blank and
/// followed by such a line.
pub fn further_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.lazy || tokenizer.pierce {
        return State::Nok;
    }

    if tokenizer.current.is_line_ending() {
        tokenizer.enter(Name::LineEnding);
        tokenizer.consume();
        tokenizer.exit(Name::LineEnding);
        return State::Next(StateName::CodeIndentedFurtherStart);
    }

    tokenizer.attempt(
        State::Ok,
        State::Next(StateName::CodeIndentedFurtherBegin),
    );
    State::Retry(indent(tokenizer, TAB_SIZE, TAB_SIZE))
}

/// Not indented enough: only a line of whitespace may follow.
pub fn further_begin(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::CodeIndentedFurtherAfter),
            State::Nok,
        );
        State::Retry(indent(tokenizer, 1, usize::MAX))
    } else {
        State::Retry(StateName::CodeIndentedFurtherAfter)
    }
}

pub fn further_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending() {
        State::Retry(StateName::CodeIndentedFurtherStart)
    } else {
        State::Nok
    }
}
