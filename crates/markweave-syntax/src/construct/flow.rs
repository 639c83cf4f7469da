//! Flow: the blocks inside the innermost container.
//!
//! Each line tries, in order: a blank line, indented code, then (after the
//! line prefix) the keyed flow constructs, and finally content. Whatever
//! matched ends at a line ending, which flow eats before starting over.

use crate::construct::partial_space_or_tab::{Options, space_or_tab_with_options};
use crate::construct::{ConstructName, Table};
use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{AttemptKind, Tokenizer};
use crate::util::constant::TAB_SIZE;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Eof {
        return State::Ok;
    }

    tokenizer.attempt_construct(
        ConstructName::BlankLine,
        State::Next(StateName::FlowBlankLineAfter),
        State::Next(StateName::FlowBeforeInitial),
    )
}

pub fn before_initial(tokenizer: &mut Tokenizer) -> State {
    tokenizer.constructs(
        AttemptKind::Attempt,
        Table::FlowInitial,
        State::Next(StateName::FlowAfter),
        State::Next(StateName::FlowBeforePrefix),
    )
}

pub fn before_prefix(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::FlowBefore),
            State::Next(StateName::FlowBefore),
        );
        State::Retry(space_or_tab_with_options(
            tokenizer,
            Options {
                min: 1,
                max: usize::MAX,
                name: Name::LinePrefix,
                link: None,
            },
        ))
    } else {
        State::Retry(StateName::FlowBefore)
    }
}

pub fn before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.constructs(
        AttemptKind::Attempt,
        Table::Flow,
        State::Next(StateName::FlowAfter),
        State::Next(StateName::FlowBeforeContent),
    )
}

pub fn before_content(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt_construct(
        ConstructName::Content,
        State::Next(StateName::FlowAfter),
        State::Nok,
    )
}

pub fn blank_line_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending() {
        tokenizer.enter(Name::BlankLineEnding);
        tokenizer.consume();
        tokenizer.exit(Name::BlankLineEnding);
        tokenizer.current_construct = None;
        State::Next(StateName::FlowStart)
    } else {
        tokenizer.current_construct = None;
        State::Ok
    }
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => {
            tokenizer.current_construct = None;
            State::Ok
        }
        code if code.is_line_ending() => {
            tokenizer.enter(Name::LineEnding);
            tokenizer.consume();
            tokenizer.exit(Name::LineEnding);
            tokenizer.current_construct = None;
            State::Next(StateName::FlowStart)
        }
        _ => State::Nok,
    }
}

/// Whether the line prefix right before the current code is wide enough to
/// make the line indented code.
pub fn indented_as_code(tokenizer: &Tokenizer) -> bool {
    if tokenizer
        .parse_state
        .options
        .disable
        .contains(&ConstructName::CodeIndented)
    {
        return false;
    }

    let events = &tokenizer.events;
    match events.len().checked_sub(2) {
        Some(enter)
            if events[enter + 1].is_exit() && events[enter + 1].name == Name::LinePrefix =>
        {
            events[enter + 1].point.column - events[enter].point.column >= TAB_SIZE
        }
        _ => false,
    }
}

/// Eat a line ending, then fail if the next line is lazy.
///
/// Constructs that span lines but never take lazy lines check this before
/// each further line.
pub fn non_lazy_continuation_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending() {
        tokenizer.enter(Name::LineEnding);
        tokenizer.consume();
        tokenizer.exit(Name::LineEnding);
        State::Next(StateName::NonLazyContinuationAfter)
    } else {
        State::Nok
    }
}

pub fn non_lazy_continuation_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.lazy {
        State::Nok
    } else {
        State::Ok
    }
}
