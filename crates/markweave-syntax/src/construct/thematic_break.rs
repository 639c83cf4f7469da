//! Thematic breaks: three or more `*`, `-` or `_`, optionally spaced.

use crate::construct::flow::indented_as_code;
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::THEMATIC_BREAK_MARKER_COUNT_MIN;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(marker @ ('*' | '-' | '_')) if !indented_as_code(tokenizer) => {
            tokenizer.tokenize_state.marker = marker;
            tokenizer.enter(Name::ThematicBreak);
            State::Retry(StateName::ThematicBreakAtBreak)
        }
        _ => State::Nok,
    }
}

pub fn at_break(tokenizer: &mut Tokenizer) -> State {
    let marker = tokenizer.tokenize_state.marker;

    if tokenizer.current == Code::Char(marker) {
        tokenizer.enter(Name::ThematicBreakSequence);
        State::Retry(StateName::ThematicBreakSequence)
    } else if tokenizer.tokenize_state.size >= THEMATIC_BREAK_MARKER_COUNT_MIN
        && tokenizer.current.is_line_ending_or_eof()
    {
        reset(tokenizer);
        tokenizer.exit(Name::ThematicBreak);
        State::Ok
    } else {
        reset(tokenizer);
        State::Nok
    }
}

pub fn sequence(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(tokenizer.tokenize_state.marker) {
        tokenizer.consume();
        tokenizer.tokenize_state.size += 1;
        State::Next(StateName::ThematicBreakSequence)
    } else if tokenizer.current.is_space_or_tab() {
        tokenizer.exit(Name::ThematicBreakSequence);
        tokenizer.attempt(State::Next(StateName::ThematicBreakAtBreak), State::Nok);
        State::Retry(space_or_tab(tokenizer))
    } else {
        tokenizer.exit(Name::ThematicBreakSequence);
        State::Retry(StateName::ThematicBreakAtBreak)
    }
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.marker = '\0';
    tokenizer.tokenize_state.size = 0;
}
