//! # Code (text)
//!
//! ```markdown
//! Use `` `ticks` `` inside code.
//! ```
//!
//! A run of backticks opens code that closes at the next run of the same
//! size. A run of another size inside is plain code data. Line endings are
//! allowed; they become spaces when compiled.
//!
//! When both ends are a space or line ending and the code is not all
//! spaces, one character is stripped from each side. That padding is
//! marked by the resolver.

use crate::event::{Event, Kind, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    let after_escape = tokenizer
        .events
        .last()
        .is_some_and(|event| event.name == Name::CharacterEscape);

    if tokenizer.current != Code::Char('`')
        || (tokenizer.previous == Code::Char('`') && !after_escape)
    {
        return State::Nok;
    }

    tokenizer.enter(Name::CodeText);
    tokenizer.enter(Name::CodeTextSequence);
    State::Retry(StateName::CodeTextSequenceOpen)
}

pub fn sequence_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('`') {
        tokenizer.tokenize_state.size += 1;
        tokenizer.consume();
        State::Next(StateName::CodeTextSequenceOpen)
    } else {
        tokenizer.exit(Name::CodeTextSequence);
        State::Retry(StateName::CodeTextBetween)
    }
}

pub fn between(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => {
            tokenizer.tokenize_state.size = 0;
            State::Nok
        }
        code if code.is_line_ending() => {
            tokenizer.enter(Name::LineEnding);
            tokenizer.consume();
            tokenizer.exit(Name::LineEnding);
            State::Next(StateName::CodeTextBetween)
        }
        Code::Char('`') => {
            tokenizer.enter(Name::CodeTextSequence);
            State::Retry(StateName::CodeTextSequenceClose)
        }
        _ => {
            tokenizer.enter(Name::CodeTextData);
            State::Retry(StateName::CodeTextData)
        }
    }
}

pub fn data(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('`') => {
            tokenizer.exit(Name::CodeTextData);
            State::Retry(StateName::CodeTextBetween)
        }
        code if code.is_line_ending_or_eof() => {
            tokenizer.exit(Name::CodeTextData);
            State::Retry(StateName::CodeTextBetween)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::CodeTextData)
        }
    }
}

pub fn sequence_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('`') {
        tokenizer.tokenize_state.size_b += 1;
        tokenizer.consume();
        return State::Next(StateName::CodeTextSequenceClose);
    }

    tokenizer.exit(Name::CodeTextSequence);

    if tokenizer.tokenize_state.size == tokenizer.tokenize_state.size_b {
        tokenizer.exit(Name::CodeText);
        tokenizer.tokenize_state.size = 0;
        tokenizer.tokenize_state.size_b = 0;
        State::Ok
    } else {
        // Not the closing run: it is code.
        let len = tokenizer.events.len();
        tokenizer.events[len - 2].name = Name::CodeTextData;
        tokenizer.events[len - 1].name = Name::CodeTextData;
        tokenizer.tokenize_state.size_b = 0;
        State::Retry(StateName::CodeTextBetween)
    }
}

/// Mark the padding of the code that just ended.
pub fn resolve(tokenizer: &mut Tokenizer, from: usize) {
    let Some(open) = (from..tokenizer.events.len()).find(|index| {
        let event = &tokenizer.events[*index];
        event.kind == Kind::Enter && event.name == Name::CodeText
    }) else {
        return;
    };

    let close = tokenizer.events.len() - 1;
    // Between the exit of the opening sequence and the enter of the closing.
    let head = open + 3;
    let Some(tail) = close.checked_sub(3) else {
        return;
    };

    if head > tail {
        return;
    }

    let codes = tokenizer
        .parse_state
        .codes(&tokenizer.events[head].point, &tokenizer.events[tail].point);

    let is_pad = |code: Code| code == Code::Char(' ') || code.is_line_ending();
    let has_content = codes.iter().any(|(_, code)| *code != Code::Char(' ') && !code.is_line_ending());

    let (Some(first), Some(last)) = (codes.first(), codes.last()) else {
        return;
    };

    if !has_content || !is_pad(first.1) || !is_pad(last.1) {
        return;
    }

    split_padding(tokenizer, head, true);
    split_padding(tokenizer, tail - 1, false);
}

/// Make one code at the start or end of the token entered at `enter` padding.
fn split_padding(tokenizer: &mut Tokenizer, enter: usize, at_start: bool) {
    let exit = enter + 1;

    if tokenizer.events[enter].name == Name::LineEnding {
        tokenizer.events[enter].name = Name::CodeTextPadding;
        tokenizer.events[exit].name = Name::CodeTextPadding;
        return;
    }

    let codes = tokenizer
        .parse_state
        .codes(&tokenizer.events[enter].point, &tokenizer.events[exit].point);

    if codes.len() <= 1 {
        tokenizer.events[enter].name = Name::CodeTextPadding;
        tokenizer.events[exit].name = Name::CodeTextPadding;
        return;
    }

    if at_start {
        let split = codes[1].0.clone();
        tokenizer.map.add(
            enter,
            0,
            vec![
                Event::enter(Name::CodeTextPadding, tokenizer.events[enter].point.clone()),
                Event::exit(Name::CodeTextPadding, split.clone()),
            ],
        );
        tokenizer.events[enter].point = split;
    } else {
        let split = codes[codes.len() - 1].0.clone();
        tokenizer.map.add(
            exit + 1,
            0,
            vec![
                Event::enter(Name::CodeTextPadding, split.clone()),
                Event::exit(Name::CodeTextPadding, tokenizer.events[exit].point.clone()),
            ],
        );
        tokenizer.events[exit].point = split;
    }
}
