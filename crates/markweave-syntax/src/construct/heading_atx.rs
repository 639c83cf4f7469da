//! ATX headings: one to six `#`, then text, then optional closing `#`s.
//!
//! The text is tokenized as separate data runs around whitespace and
//! sequences; [`resolve`] joins everything from the first to the last run
//! into one [`Name::HeadingAtxText`] linked to text content, so `# a # b`
//! keeps its inner `#`.

use crate::construct::flow::indented_as_code;
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::{Content, Event, Kind, Link, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::HEADING_ATX_OPENING_FENCE_SIZE_MAX;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('#') && !indented_as_code(tokenizer) {
        tokenizer.enter(Name::HeadingAtx);
        tokenizer.enter(Name::HeadingAtxSequence);
        State::Retry(StateName::HeadingAtxSequenceOpen)
    } else {
        State::Nok
    }
}

pub fn sequence_open(tokenizer: &mut Tokenizer) -> State {
    let size = tokenizer.tokenize_state.size;

    if tokenizer.current == Code::Char('#') && size < HEADING_ATX_OPENING_FENCE_SIZE_MAX {
        tokenizer.tokenize_state.size += 1;
        tokenizer.consume();
        State::Next(StateName::HeadingAtxSequenceOpen)
    } else if size > 0 && tokenizer.current.is_whitespace_or_eof() {
        tokenizer.tokenize_state.size = 0;
        tokenizer.exit(Name::HeadingAtxSequence);
        State::Retry(StateName::HeadingAtxAtBreak)
    } else {
        tokenizer.tokenize_state.size = 0;
        State::Nok
    }
}

pub fn at_break(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => {
            tokenizer.exit(Name::HeadingAtx);
            State::Ok
        }
        code if code.is_space_or_tab() => {
            tokenizer.attempt(State::Next(StateName::HeadingAtxAtBreak), State::Nok);
            State::Retry(space_or_tab(tokenizer))
        }
        Code::Char('#') => {
            tokenizer.enter(Name::HeadingAtxSequence);
            State::Retry(StateName::HeadingAtxSequenceFurther)
        }
        _ => {
            tokenizer.enter(Name::Data);
            State::Retry(StateName::HeadingAtxData)
        }
    }
}

pub fn sequence_further(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('#') {
        tokenizer.consume();
        State::Next(StateName::HeadingAtxSequenceFurther)
    } else {
        tokenizer.exit(Name::HeadingAtxSequence);
        State::Retry(StateName::HeadingAtxAtBreak)
    }
}

pub fn data(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_whitespace_or_eof() {
        tokenizer.exit(Name::Data);
        State::Retry(StateName::HeadingAtxAtBreak)
    } else {
        tokenizer.consume();
        State::Next(StateName::HeadingAtxData)
    }
}

/// Join the data runs of the heading that just ended.
pub fn resolve(tokenizer: &mut Tokenizer, from: usize) {
    let mut data_start = None;
    let mut data_end = None;

    for index in from..tokenizer.events.len() {
        let event = &tokenizer.events[index];
        if event.name == Name::Data {
            if event.kind == Kind::Enter {
                data_start.get_or_insert(index);
            } else {
                data_end = Some(index);
            }
        }
    }

    let (Some(start), Some(end)) = (data_start, data_end) else {
        return;
    };

    tokenizer.events[start].link = Some(Link {
        chain: tokenizer.next_chain(),
        content: Content::Text,
    });

    let enter_text = Event::enter(Name::HeadingAtxText, tokenizer.events[start].point.clone());
    let exit_text = Event::exit(Name::HeadingAtxText, tokenizer.events[end].point.clone());

    tokenizer.map.add(start, 0, vec![enter_text]);
    tokenizer.map.add(start + 1, end - start - 1, vec![]);
    tokenizer.map.add(end + 1, 0, vec![exit_text]);
}
