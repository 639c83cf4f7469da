//! Whitespace that may include one line ending, but not a blank line.
//!
//! Used between the parts of definitions and resources, and inside labels
//! and titles. With a link, the whitespace joins that linked content.

use crate::event::{Link, Name};
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

use super::partial_space_or_tab::{Options, space_or_tab_with_options};

pub fn space_or_tab_eol(tokenizer: &mut Tokenizer) -> StateName {
    space_or_tab_eol_with_link(tokenizer, None)
}

pub fn space_or_tab_eol_with_link(tokenizer: &mut Tokenizer, link: Option<Link>) -> StateName {
    tokenizer.tokenize_state.space_or_tab_eol_link = link;
    StateName::SpaceOrTabEolStart
}

fn whitespace(tokenizer: &mut Tokenizer) -> StateName {
    let link = tokenizer.tokenize_state.space_or_tab_eol_link;
    space_or_tab_with_options(
        tokenizer,
        Options {
            min: 1,
            max: usize::MAX,
            name: Name::SpaceOrTab,
            link,
        },
    )
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::SpaceOrTabEolAfterFirst),
            State::Next(StateName::SpaceOrTabEolAtEol),
        );
        State::Retry(whitespace(tokenizer))
    } else {
        State::Retry(StateName::SpaceOrTabEolAtEol)
    }
}

pub fn after_first(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.space_or_tab_eol_ok = true;
    State::Retry(StateName::SpaceOrTabEolAtEol)
}

pub fn at_eol(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending() {
        match tokenizer.tokenize_state.space_or_tab_eol_link {
            Some(link) => tokenizer.enter_link(Name::LineEnding, link),
            None => tokenizer.enter(Name::LineEnding),
        }
        tokenizer.consume();
        tokenizer.exit(Name::LineEnding);
        State::Next(StateName::SpaceOrTabEolAfterEol)
    } else {
        let ok = tokenizer.tokenize_state.space_or_tab_eol_ok;
        reset(tokenizer);
        if ok { State::Ok } else { State::Nok }
    }
}

pub fn after_eol(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::SpaceOrTabEolAfterMore),
            State::Nok,
        );
        State::Retry(whitespace(tokenizer))
    } else {
        State::Retry(StateName::SpaceOrTabEolAfterMore)
    }
}

pub fn after_more(tokenizer: &mut Tokenizer) -> State {
    reset(tokenizer);

    if tokenizer.current.is_line_ending_or_eof() {
        State::Nok
    } else {
        State::Ok
    }
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.space_or_tab_eol_ok = false;
    tokenizer.tokenize_state.space_or_tab_eol_link = None;
}
