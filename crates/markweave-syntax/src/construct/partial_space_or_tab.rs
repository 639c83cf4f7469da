//! Runs of spaces and tabs, bounded by a minimum and maximum size.
//!
//! Callers pick the bounds and token through one of the constructor
//! functions, which park them on the tokenizer and return the start state:
//!
//! ```ignore
//! tokenizer.attempt(State::Next(StateName::ListItemBefore), State::Nok);
//! State::Retry(space_or_tab_min_max(tokenizer, 0, TAB_SIZE - 1))
//! ```

use crate::event::{Link, Name};
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;

pub struct Options {
    pub min: usize,
    pub max: usize,
    pub name: Name,
    /// Make the whitespace part of linked content.
    pub link: Option<Link>,
}

/// One or more spaces or tabs.
pub fn space_or_tab(tokenizer: &mut Tokenizer) -> StateName {
    space_or_tab_min_max(tokenizer, 1, usize::MAX)
}

pub fn space_or_tab_min_max(tokenizer: &mut Tokenizer, min: usize, max: usize) -> StateName {
    space_or_tab_with_options(
        tokenizer,
        Options {
            min,
            max,
            name: Name::SpaceOrTab,
            link: None,
        },
    )
}

pub fn space_or_tab_with_options(tokenizer: &mut Tokenizer, options: Options) -> StateName {
    tokenizer.tokenize_state.space_or_tab_min = options.min;
    tokenizer.tokenize_state.space_or_tab_max = options.max;
    tokenizer.tokenize_state.space_or_tab_token = options.name;
    tokenizer.tokenize_state.space_or_tab_link = options.link;
    StateName::SpaceOrTabStart
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.tokenize_state.space_or_tab_max > 0 && tokenizer.current.is_space_or_tab() {
        let name = tokenizer.tokenize_state.space_or_tab_token;
        match tokenizer.tokenize_state.space_or_tab_link {
            Some(link) => tokenizer.enter_link(name, link),
            None => tokenizer.enter(name),
        }
        State::Retry(StateName::SpaceOrTabInside)
    } else {
        State::Retry(StateName::SpaceOrTabAfter)
    }
}

pub fn inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab()
        && tokenizer.tokenize_state.space_or_tab_size < tokenizer.tokenize_state.space_or_tab_max
    {
        tokenizer.consume();
        tokenizer.tokenize_state.space_or_tab_size += 1;
        State::Next(StateName::SpaceOrTabInside)
    } else {
        tokenizer.exit(tokenizer.tokenize_state.space_or_tab_token);
        State::Retry(StateName::SpaceOrTabAfter)
    }
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    let state = if tokenizer.tokenize_state.space_or_tab_size >= tokenizer.tokenize_state.space_or_tab_min
    {
        State::Ok
    } else {
        State::Nok
    };
    tokenizer.tokenize_state.space_or_tab_min = 0;
    tokenizer.tokenize_state.space_or_tab_max = 0;
    tokenizer.tokenize_state.space_or_tab_size = 0;
    tokenizer.tokenize_state.space_or_tab_token = Name::SpaceOrTab;
    tokenizer.tokenize_state.space_or_tab_link = None;
    state
}
