//! # List Items
//!
//! A list item is a container opened by a bullet (`*`, `+`, `-`) or an
//! ordered marker (`1.`, `2)`), followed by whitespace or the end of the
//! line:
//!
//! ```markdown
//! - a
//!
//!   b
//! 10) c
//! ```
//!
//! The columns up to the item's content are stored on the container; later
//! lines continue the item when they are blank or indented by that much.
//!
//! Items only become lists afterwards: [`resolve`] groups adjacent siblings
//! with the same marker and wraps them in [`Name::ListOrdered`] or
//! [`Name::ListUnordered`].

use crate::construct::partial_space_or_tab::space_or_tab_min_max;
use crate::event::{Kind, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::{LIST_ITEM_VALUE_SIZE_MAX, TAB_SIZE};
use crate::util::skip;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::ListItem);
    State::Retry(StateName::ListItemBefore)
}

pub fn before(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        // A thematic break wins over a bullet.
        Code::Char('*' | '-') => {
            tokenizer.check(State::Nok, State::Next(StateName::ListItemBeforeUnordered));
            State::Retry(StateName::ThematicBreakStart)
        }
        Code::Char('+') => State::Retry(StateName::ListItemBeforeUnordered),
        // Only `1` may interrupt a paragraph.
        Code::Char('1') => State::Retry(StateName::ListItemBeforeOrdered),
        Code::Char('0'..='9') if !tokenizer.interrupt => {
            State::Retry(StateName::ListItemBeforeOrdered)
        }
        _ => State::Nok,
    }
}

pub fn before_unordered(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::ListItemPrefix);
    State::Retry(StateName::ListItemMarker)
}

pub fn before_ordered(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::ListItemPrefix);
    tokenizer.enter(Name::ListItemValue);
    State::Retry(StateName::ListItemValue)
}

pub fn value(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('.' | ')')
            if tokenizer.tokenize_state.size > 0
                && (!tokenizer.interrupt || tokenizer.tokenize_state.size < 2) =>
        {
            tokenizer.exit(Name::ListItemValue);
            State::Retry(StateName::ListItemMarker)
        }
        Code::Char('0'..='9') if tokenizer.tokenize_state.size + 1 < LIST_ITEM_VALUE_SIZE_MAX => {
            tokenizer.tokenize_state.size += 1;
            tokenizer.consume();
            State::Next(StateName::ListItemValue)
        }
        _ => {
            tokenizer.tokenize_state.size = 0;
            State::Nok
        }
    }
}

pub fn marker(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.size = 0;
    tokenizer.enter(Name::ListItemMarker);
    tokenizer.consume();
    tokenizer.exit(Name::ListItemMarker);
    State::Next(StateName::ListItemMarkerAfter)
}

pub fn marker_after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.check(
        State::Next(StateName::ListItemAfterBlank),
        State::Next(StateName::ListItemMarkerAfterFilled),
    );
    State::Retry(StateName::BlankLineStart)
}

/// Take up to four columns of whitespace; with more, the content is
/// indented code and only one column belongs to the prefix.
pub fn marker_after_filled(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(
        State::Next(StateName::ListItemAfter),
        State::Next(StateName::ListItemPrefixOther),
    );
    State::Retry(StateName::ListItemWhitespace)
}

pub fn whitespace(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(State::Next(StateName::ListItemWhitespaceAfter), State::Nok);
    State::Retry(space_or_tab_min_max(tokenizer, 1, TAB_SIZE))
}

pub fn whitespace_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        State::Nok
    } else {
        State::Ok
    }
}

pub fn prefix_other(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.enter(Name::SpaceOrTab);
        tokenizer.consume();
        tokenizer.exit(Name::SpaceOrTab);
        State::Next(StateName::ListItemAfter)
    } else {
        State::Nok
    }
}

/// The item starts with a blank line.
pub fn after_blank(tokenizer: &mut Tokenizer) -> State {
    // An empty item cannot interrupt a paragraph.
    if tokenizer.interrupt {
        return State::Nok;
    }

    finish(tokenizer, true)
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    finish(tokenizer, false)
}

fn finish(tokenizer: &mut Tokenizer, blank: bool) -> State {
    let Some(enter) = skip::to_back(&tokenizer.events, tokenizer.events.len() - 1, &[Name::ListItem])
    else {
        return State::Nok;
    };

    // Indent before the item counts toward the content column.
    let mut from = tokenizer.events[enter].point.column;
    if enter >= 2
        && tokenizer.events[enter - 1].name == Name::LinePrefix
        && tokenizer.events[enter - 1].kind == Kind::Exit
    {
        from = tokenizer.events[enter - 2].point.column;
    }

    let mut size = tokenizer.point.column - from;
    if blank {
        size += 1;
    }

    let continued = tokenizer.tokenize_state.document_continued;
    if let Some(container) = tokenizer
        .tokenize_state
        .document_container_stack
        .get_mut(continued)
    {
        container.blank_initial = blank;
        container.size = size;
    }

    tokenizer.exit(Name::ListItemPrefix);
    State::Ok
}

pub fn cont_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.check(
        State::Next(StateName::ListItemContBlank),
        State::Next(StateName::ListItemContFilled),
    );
    State::Retry(StateName::BlankLineStart)
}

pub fn cont_blank(tokenizer: &mut Tokenizer) -> State {
    let continued = tokenizer.tokenize_state.document_continued;
    let Some(container) = tokenizer.tokenize_state.document_container_stack.get(continued) else {
        return State::Nok;
    };
    let size = container.size;

    // At most one blank line may start an item.
    if container.blank_initial {
        State::Nok
    } else if tokenizer.current.is_space_or_tab() {
        State::Retry(space_or_tab_min_max(tokenizer, 0, size))
    } else {
        State::Ok
    }
}

pub fn cont_filled(tokenizer: &mut Tokenizer) -> State {
    let continued = tokenizer.tokenize_state.document_continued;
    let Some(container) = tokenizer
        .tokenize_state
        .document_container_stack
        .get_mut(continued)
    else {
        return State::Nok;
    };
    let size = container.size;
    container.blank_initial = false;

    if tokenizer.current.is_space_or_tab() {
        State::Retry(space_or_tab_min_max(tokenizer, size, size))
    } else {
        State::Nok
    }
}

/// Group sibling items into lists.
///
/// Two items are siblings when they have the same marker, sit at the same
/// nesting depth, and nothing but whitespace, line endings and block quote
/// prefixes is between the end of one and the start of the other.
pub fn resolve(tokenizer: &mut Tokenizer) {
    // (marker, depth, enter, exit)
    let mut open: Vec<(char, usize, usize, usize)> = Vec::new();
    let mut lists: Vec<(char, usize, usize, usize)> = Vec::new();
    let mut depth = 0;

    for index in 0..tokenizer.events.len() {
        let event = &tokenizer.events[index];
        if event.name != Name::ListItem {
            continue;
        }

        if event.kind == Kind::Exit {
            depth -= 1;
            continue;
        }

        let exit = skip::exit_of(&tokenizer.events, index);
        let marker_index = skip::to(&tokenizer.events, index, &[Name::ListItemMarker]);
        let marker = tokenizer
            .events
            .get(marker_index)
            .and_then(|event| tokenizer.parse_state.code_at(&event.point).char())
            .unwrap_or('-');
        let current = (marker, depth, index, exit);

        let sibling = open.iter().rposition(|previous| {
            previous.0 == current.0
                && previous.1 == current.1
                && skip::opt(
                    &tokenizer.events,
                    previous.3 + 1,
                    &[
                        Name::SpaceOrTab,
                        Name::LinePrefix,
                        Name::LineEnding,
                        Name::BlankLineEnding,
                        Name::BlockQuotePrefix,
                        Name::BlockQuoteMarker,
                    ],
                ) == current.2
        });

        match sibling {
            Some(position) => {
                open[position].3 = current.3;
                lists.extend(open.split_off(position + 1));
            }
            None => {
                // Lists that ended before this item can no longer grow.
                let keep = open
                    .iter()
                    .rposition(|list| current.2 < list.3)
                    .map_or(0, |position| position + 1);
                lists.extend(open.split_off(keep));
                open.push(current);
            }
        }

        depth += 1;
    }

    lists.extend(open);

    for (marker, _, enter, exit) in lists {
        let name = match marker {
            '.' | ')' => Name::ListOrdered,
            _ => Name::ListUnordered,
        };
        let mut list_enter = tokenizer.events[enter].clone();
        let mut list_exit = tokenizer.events[exit].clone();
        list_enter.name = name;
        list_exit.name = name;
        tokenizer.map.add(enter, 0, vec![list_enter]);
        tokenizer.map.add(exit + 1, 0, vec![list_exit]);
    }
}
