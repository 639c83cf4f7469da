//! Content: runs of lines that become definitions and paragraphs.
//!
//! In flow, content is only delimited. Its lines are collected into linked
//! [`Name::ContentChunk`] tokens until a blank line, or a line that some
//! other flow construct can interrupt with:
//!
//! ```markdown
//! [a]: b
//! c
//! # d
//! ```
//!
//! When the construct succeeds its chunks are tokenized right away as the
//! content type, so definitions are known before any text is parsed. The
//! content type tries definitions first, and whatever is left of the lines
//! is one paragraph whose lines link into text.

use crate::construct::Table;
use crate::construct::flow::indented_as_code;
use crate::construct::partial_space_or_tab::{Options, space_or_tab_with_options};
use crate::event::{Content, Name};
use crate::lexer::Code;
use crate::message::Message;
use crate::state::{State, StateName};
use crate::subtokenize::subtokenize_from;
use crate::tokenizer::{AttemptKind, Tokenizer};

fn line_prefix(tokenizer: &mut Tokenizer) -> StateName {
    space_or_tab_with_options(
        tokenizer,
        Options {
            min: 1,
            max: usize::MAX,
            name: Name::LinePrefix,
            link: None,
        },
    )
}

fn enter_chunk(tokenizer: &mut Tokenizer) {
    let mut chain = tokenizer.tokenize_state.content_chain;
    tokenizer.enter_linked(Name::ContentChunk, Content::Content, &mut chain);
    tokenizer.tokenize_state.content_chain = chain;
}

pub fn chunk_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        return State::Nok;
    }

    tokenizer.tokenize_state.content_chain = None;
    tokenizer.enter(Name::Content);
    enter_chunk(tokenizer);
    State::Retry(StateName::ContentChunkInside)
}

pub fn chunk_inside(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Retry(StateName::ContentChunkEnd),
        code if code.is_line_ending() => {
            tokenizer.check(
                State::Next(StateName::ContentChunkContinue),
                State::Next(StateName::ContentChunkEnd),
            );
            State::Retry(StateName::ContentContinuationStart)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::ContentChunkInside)
        }
    }
}

/// The next line continues: the line ending stays in this chunk.
pub fn chunk_continue(tokenizer: &mut Tokenizer) -> State {
    tokenizer.consume();
    tokenizer.exit(Name::ContentChunk);
    enter_chunk(tokenizer);
    State::Next(StateName::ContentChunkInside)
}

pub fn chunk_end(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::ContentChunk);
    tokenizer.exit(Name::Content);
    tokenizer.tokenize_state.content_chain = None;
    State::Ok
}

pub fn continuation_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::ContentContinuationAfterEol)
}

pub fn continuation_after_eol(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::ContentContinuationPrefixed),
            State::Nok,
        );
        State::Retry(line_prefix(tokenizer))
    } else {
        State::Retry(StateName::ContentContinuationPrefixed)
    }
}

/// Blank lines end content, indented lines continue it, and anything else
/// continues unless a flow construct can interrupt here.
pub fn continuation_prefixed(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        return State::Nok;
    }

    if indented_as_code(tokenizer) {
        return State::Ok;
    }

    tokenizer.constructs(AttemptKind::Interrupt, Table::Flow, State::Nok, State::Ok)
}

/// Tokenize the chunks of the content that just ended.
pub fn resolve(tokenizer: &mut Tokenizer, from: usize) -> Result<(), Message> {
    subtokenize_from(
        &mut tokenizer.events,
        tokenizer.parse_state,
        Some(Content::Content),
        from,
    )?;
    Ok(())
}

pub fn definition_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::ContentDefinitionBeforeConstruct),
            State::Nok,
        );
        State::Retry(line_prefix(tokenizer))
    } else {
        State::Retry(StateName::ContentDefinitionBeforeConstruct)
    }
}

pub fn definition_before_construct(tokenizer: &mut Tokenizer) -> State {
    tokenizer.constructs(
        AttemptKind::Attempt,
        Table::ContentInitial,
        State::Next(StateName::ContentDefinitionAfter),
        State::Next(StateName::ParagraphStart),
    )
}

pub fn definition_after(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Ok,
        code if code.is_line_ending() => {
            tokenizer.enter(Name::LineEnding);
            tokenizer.consume();
            tokenizer.exit(Name::LineEnding);
            State::Next(StateName::ContentDefinitionBefore)
        }
        _ => State::Nok,
    }
}

pub fn paragraph_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::Paragraph);
    tokenizer.tokenize_state.paragraph_chain = None;
    State::Retry(StateName::ParagraphLineStart)
}

pub fn paragraph_line_start(tokenizer: &mut Tokenizer) -> State {
    let mut chain = tokenizer.tokenize_state.paragraph_chain;
    tokenizer.enter_linked(Name::Data, Content::Text, &mut chain);
    tokenizer.tokenize_state.paragraph_chain = chain;
    State::Retry(StateName::ParagraphInside)
}

pub fn paragraph_inside(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => {
            tokenizer.exit(Name::Data);
            tokenizer.exit(Name::Paragraph);
            tokenizer.tokenize_state.paragraph_chain = None;
            State::Ok
        }
        code if code.is_line_ending() => {
            tokenizer.consume();
            tokenizer.exit(Name::Data);
            State::Next(StateName::ParagraphLineStart)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::ParagraphInside)
        }
    }
}
