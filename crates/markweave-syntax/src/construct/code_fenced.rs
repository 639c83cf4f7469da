//! # Fenced Code
//!
//! Code between an opening and a closing fence of at least three backticks
//! or tildes:
//!
//! ````markdown
//! ```rust title="a.rs"
//! fn main() {}
//! ```
//! ````
//!
//! The first word after the opening fence is the info string, the rest is
//! meta; both are string content, so escapes and references work there.
//! Backtick fences may not have backticks in their info or meta, which
//! keeps them apart from code spans.
//!
//! Content lines lose as many columns of indentation as the opening fence
//! had. The closing fence needs at least as many markers as the opening
//! one. Without a closing fence the code runs to the end of its container.

use crate::construct::ConstructName;
use crate::construct::flow::indented_as_code;
use crate::construct::partial_space_or_tab::{space_or_tab, space_or_tab_min_max};
use crate::event::{Content, Link, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::{CODE_FENCED_SEQUENCE_SIZE_MIN, TAB_SIZE};

/// Width of the line prefix right before the current code.
fn prefix_width(tokenizer: &Tokenizer) -> usize {
    let events = &tokenizer.events;
    match events.len().checked_sub(2) {
        Some(enter)
            if events[enter + 1].is_exit() && events[enter + 1].name == Name::LinePrefix =>
        {
            events[enter + 1].point.column - events[enter].point.column
        }
        _ => 0,
    }
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    let indent = prefix_width(tokenizer);

    match tokenizer.current {
        Code::Char(marker @ ('`' | '~')) if !indented_as_code(tokenizer) => {
            tokenizer.tokenize_state.marker = marker;
            tokenizer.tokenize_state.size_c = indent;
            tokenizer.enter(Name::CodeFenced);
            tokenizer.enter(Name::CodeFencedFence);
            tokenizer.enter(Name::CodeFencedFenceSequence);
            State::Retry(StateName::CodeFencedSequenceOpen)
        }
        _ => State::Nok,
    }
}

fn indent_is_code(tokenizer: &Tokenizer) -> bool {
    !tokenizer
        .parse_state
        .options
        .disable
        .contains(&ConstructName::CodeIndented)
}

pub fn sequence_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(tokenizer.tokenize_state.marker) {
        tokenizer.tokenize_state.size += 1;
        tokenizer.consume();
        State::Next(StateName::CodeFencedSequenceOpen)
    } else if tokenizer.tokenize_state.size < CODE_FENCED_SEQUENCE_SIZE_MIN {
        reset(tokenizer);
        State::Nok
    } else {
        tokenizer.exit(Name::CodeFencedFenceSequence);

        if tokenizer.current.is_space_or_tab() {
            tokenizer.attempt(State::Next(StateName::CodeFencedInfoBefore), State::Nok);
            State::Retry(space_or_tab(tokenizer))
        } else {
            State::Retry(StateName::CodeFencedInfoBefore)
        }
    }
}

fn enter_string(tokenizer: &mut Tokenizer) {
    let chain = tokenizer.next_chain();
    tokenizer.enter_link(
        Name::Data,
        Link {
            chain,
            content: Content::String,
        },
    );
}

pub fn info_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        tokenizer.exit(Name::CodeFencedFence);
        tokenizer.check(
            State::Next(StateName::CodeFencedAtNonLazyBreak),
            State::Next(StateName::CodeFencedAfter),
        );
        State::Retry(StateName::NonLazyContinuationStart)
    } else {
        tokenizer.enter(Name::CodeFencedFenceInfo);
        enter_string(tokenizer);
        State::Retry(StateName::CodeFencedInfo)
    }
}

pub fn info(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => {
            tokenizer.exit(Name::Data);
            tokenizer.exit(Name::CodeFencedFenceInfo);
            State::Retry(StateName::CodeFencedInfoBefore)
        }
        code if code.is_space_or_tab() => {
            tokenizer.exit(Name::Data);
            tokenizer.exit(Name::CodeFencedFenceInfo);
            tokenizer.attempt(State::Next(StateName::CodeFencedMetaBefore), State::Nok);
            State::Retry(space_or_tab(tokenizer))
        }
        Code::Char('`') if tokenizer.tokenize_state.marker == '`' => {
            reset(tokenizer);
            State::Nok
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::CodeFencedInfo)
        }
    }
}

pub fn meta_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        State::Retry(StateName::CodeFencedInfoBefore)
    } else {
        tokenizer.enter(Name::CodeFencedFenceMeta);
        enter_string(tokenizer);
        State::Retry(StateName::CodeFencedMeta)
    }
}

pub fn meta(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => {
            tokenizer.exit(Name::Data);
            tokenizer.exit(Name::CodeFencedFenceMeta);
            State::Retry(StateName::CodeFencedInfoBefore)
        }
        Code::Char('`') if tokenizer.tokenize_state.marker == '`' => {
            reset(tokenizer);
            State::Nok
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::CodeFencedMeta)
        }
    }
}

/// A line ending inside the code: either the closing fence follows, or
/// another content line.
pub fn at_non_lazy_break(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(
        State::Next(StateName::CodeFencedAfter),
        State::Next(StateName::CodeFencedContentBefore),
    );
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::CodeFencedCloseStart)
}

pub fn close_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::CodeFencedFence);

    if tokenizer.current.is_space_or_tab() {
        let max = if indent_is_code(tokenizer) {
            TAB_SIZE - 1
        } else {
            usize::MAX
        };
        tokenizer.attempt(
            State::Next(StateName::CodeFencedBeforeSequenceClose),
            State::Nok,
        );
        State::Retry(space_or_tab_min_max(tokenizer, 0, max))
    } else {
        State::Retry(StateName::CodeFencedBeforeSequenceClose)
    }
}

pub fn before_sequence_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(tokenizer.tokenize_state.marker) {
        tokenizer.enter(Name::CodeFencedFenceSequence);
        State::Retry(StateName::CodeFencedSequenceClose)
    } else {
        State::Nok
    }
}

pub fn sequence_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(tokenizer.tokenize_state.marker) {
        tokenizer.tokenize_state.size_b += 1;
        tokenizer.consume();
        State::Next(StateName::CodeFencedSequenceClose)
    } else if tokenizer.tokenize_state.size_b >= tokenizer.tokenize_state.size {
        tokenizer.tokenize_state.size_b = 0;
        tokenizer.exit(Name::CodeFencedFenceSequence);

        if tokenizer.current.is_space_or_tab() {
            tokenizer.attempt(
                State::Next(StateName::CodeFencedSequenceCloseAfter),
                State::Nok,
            );
            State::Retry(space_or_tab(tokenizer))
        } else {
            State::Retry(StateName::CodeFencedSequenceCloseAfter)
        }
    } else {
        tokenizer.tokenize_state.size_b = 0;
        State::Nok
    }
}

pub fn sequence_close_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        tokenizer.exit(Name::CodeFencedFence);
        State::Ok
    } else {
        State::Nok
    }
}

pub fn content_before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::CodeFencedContentStart)
}

/// Strip up to the opening fence's indentation.
pub fn content_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        let indent = tokenizer.tokenize_state.size_c;
        tokenizer.attempt(
            State::Next(StateName::CodeFencedBeforeContentChunk),
            State::Nok,
        );
        State::Retry(space_or_tab_min_max(tokenizer, 0, indent))
    } else {
        State::Retry(StateName::CodeFencedBeforeContentChunk)
    }
}

pub fn before_content_chunk(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        tokenizer.check(
            State::Next(StateName::CodeFencedAtNonLazyBreak),
            State::Next(StateName::CodeFencedAfter),
        );
        State::Retry(StateName::NonLazyContinuationStart)
    } else {
        tokenizer.enter(Name::CodeFlowChunk);
        State::Retry(StateName::CodeFencedContentChunk)
    }
}

pub fn content_chunk(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        tokenizer.exit(Name::CodeFlowChunk);
        State::Retry(StateName::CodeFencedBeforeContentChunk)
    } else {
        tokenizer.consume();
        State::Next(StateName::CodeFencedContentChunk)
    }
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::CodeFenced);
    reset(tokenizer);
    State::Ok
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.marker = '\0';
    tokenizer.tokenize_state.size = 0;
    tokenizer.tokenize_state.size_b = 0;
    tokenizer.tokenize_state.size_c = 0;
}
