//! Setext headings: a paragraph followed by a line of `=` or `-`.
//!
//! The underline is parsed as its own flow construct. When it succeeds,
//! [`resolve`] turns the paragraph right before it into the heading's text.
//! Definitions at the start of that content stay outside the heading:
//!
//! ```markdown
//! [a]: b
//! c
//! ===
//! ```

use crate::construct::flow::indented_as_code;
use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::{Event, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

fn paragraph_before(tokenizer: &Tokenizer) -> bool {
    tokenizer
        .events
        .iter()
        .rev()
        .find(|event| {
            !matches!(
                event.name,
                Name::LineEnding | Name::LinePrefix | Name::SpaceOrTab | Name::Content
            )
        })
        .is_some_and(|event| event.name == Name::Paragraph)
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    let allowed = !tokenizer.lazy
        && !tokenizer.pierce
        && (tokenizer.interrupt || paragraph_before(tokenizer))
        && !indented_as_code(tokenizer);

    match tokenizer.current {
        Code::Char(marker @ ('-' | '=')) if allowed => {
            tokenizer.tokenize_state.marker = marker;
            tokenizer.enter(Name::HeadingSetextUnderline);
            tokenizer.enter(Name::HeadingSetextUnderlineSequence);
            State::Retry(StateName::HeadingSetextInside)
        }
        _ => State::Nok,
    }
}

pub fn inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(tokenizer.tokenize_state.marker) {
        tokenizer.consume();
        State::Next(StateName::HeadingSetextInside)
    } else {
        tokenizer.tokenize_state.marker = '\0';
        tokenizer.exit(Name::HeadingSetextUnderlineSequence);

        if tokenizer.current.is_space_or_tab() {
            tokenizer.attempt(State::Next(StateName::HeadingSetextAfter), State::Nok);
            State::Retry(space_or_tab(tokenizer))
        } else {
            State::Retry(StateName::HeadingSetextAfter)
        }
    }
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        tokenizer.exit(Name::HeadingSetextUnderline);
        State::Ok
    } else {
        State::Nok
    }
}

/// Turn the paragraph before the underline that just ended into a heading.
pub fn resolve(tokenizer: &mut Tokenizer) {
    let events = &tokenizer.events;
    let Some(underline) = events
        .iter()
        .rposition(|event| event.is_enter() && event.name == Name::HeadingSetextUnderline)
    else {
        return;
    };
    let Some(content_enter) = events[..underline]
        .iter()
        .rposition(|event| event.is_enter() && event.name == Name::Content)
    else {
        return;
    };
    let Some(content_exit) = events[content_enter..underline]
        .iter()
        .rposition(|event| event.is_exit() && event.name == Name::Content)
        .map(|offset| content_enter + offset)
    else {
        return;
    };
    let Some(paragraph_enter) = events[content_enter..content_exit]
        .iter()
        .position(|event| event.is_enter() && event.name == Name::Paragraph)
        .map(|offset| content_enter + offset)
    else {
        return;
    };
    let Some(paragraph_exit) = events[paragraph_enter..content_exit]
        .iter()
        .rposition(|event| event.is_exit() && event.name == Name::Paragraph)
        .map(|offset| paragraph_enter + offset)
    else {
        return;
    };

    let definitions = events[content_enter + 1..paragraph_enter]
        .iter()
        .any(|event| event.name == Name::Definition);
    let start_point = events[paragraph_enter].point.clone();
    let end = tokenizer.events.len();
    let end_point = tokenizer.events[end - 1].point.clone();

    tokenizer.events[paragraph_enter].name = Name::HeadingSetextText;
    tokenizer.events[paragraph_exit].name = Name::HeadingSetextText;

    if definitions {
        // Content keeps the definitions and now ends where the text starts.
        let mut exit_content = tokenizer.events[content_exit].clone();
        exit_content.point = start_point.clone();
        tokenizer.map.add(
            paragraph_enter,
            0,
            vec![exit_content, Event::enter(Name::HeadingSetext, start_point)],
        );
        tokenizer.map.add(content_exit, 1, vec![]);
    } else {
        tokenizer.events[content_enter].name = Name::HeadingSetext;
        tokenizer.map.add(content_exit, 1, vec![]);
    }

    tokenizer.map.add(end, 0, vec![Event::exit(Name::HeadingSetext, end_point)]);
}
