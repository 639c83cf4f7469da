//! Block quotes: `>` markers that open a container.

use crate::construct::partial_space_or_tab::space_or_tab_min_max;
use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::TAB_SIZE;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        tokenizer.enter(Name::BlockQuote);
        State::Retry(StateName::BlockQuoteContBefore)
    } else {
        State::Nok
    }
}

/// Later lines: up to three columns of indent, then the marker.
pub fn cont_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(State::Next(StateName::BlockQuoteContBefore), State::Nok);
        State::Retry(space_or_tab_min_max(tokenizer, 1, TAB_SIZE - 1))
    } else {
        State::Retry(StateName::BlockQuoteContBefore)
    }
}

pub fn cont_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        tokenizer.enter(Name::BlockQuotePrefix);
        tokenizer.enter(Name::BlockQuoteMarker);
        tokenizer.consume();
        tokenizer.exit(Name::BlockQuoteMarker);
        State::Next(StateName::BlockQuoteContAfter)
    } else {
        State::Nok
    }
}

/// One optional space after the marker belongs to the prefix. For a tab,
/// only its first column does.
pub fn cont_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.enter(Name::SpaceOrTab);
        tokenizer.consume();
        tokenizer.exit(Name::SpaceOrTab);
    }

    tokenizer.exit(Name::BlockQuotePrefix);
    State::Ok
}
