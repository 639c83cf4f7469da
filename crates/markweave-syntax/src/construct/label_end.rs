//! # Label End
//!
//! `]` closes the most recent open label start, if what follows makes a
//! link, image or footnote call:
//!
//! ```markdown
//! [resource](/url "title")   [full][ref]   [collapsed][]   [shortcut]
//! ![image](/src.png)         [^footnote]
//! ```
//!
//! References only count when their identifier is defined. Once a link is
//! found, every earlier link start becomes inactive: links never contain
//! links. Images may.
//!
//! Matched labels are only recorded here. [`resolve`] wraps them in groups
//! and turns the unmatched starts back into data when the text is done.

use crate::construct::partial_space_or_tab_eol::space_or_tab_eol;
use crate::event::{Event, Name, Point};
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::{Label, LabelKind, Tokenizer};
use crate::util::constant::LINK_RESOURCE_DESTINATION_BALANCE_MAX;
use crate::util::identifier::normalize_identifier;
use crate::util::skip;

fn is_whitespace(code: Code) -> bool {
    code.is_space_or_tab() || code.is_line_ending()
}

fn is_defined(tokenizer: &Tokenizer, start: &Point, end: &Point) -> bool {
    let label = tokenizer.parse_state.serialize(start, end, false);
    let id = normalize_identifier(&label);
    tokenizer.parse_state.definitions.borrow().contains(&id)
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char(']') {
        return State::Nok;
    }

    let Some(label_start) = tokenizer.tokenize_state.label_starts.last() else {
        return State::Nok;
    };

    tokenizer.tokenize_state.end = tokenizer.events.len();

    // Would put a link inside a link.
    if label_start.inactive {
        return State::Retry(StateName::LabelEndNok);
    }

    tokenizer.enter(Name::LabelEnd);
    tokenizer.enter(Name::LabelMarker);
    tokenizer.consume();
    tokenizer.exit(Name::LabelMarker);
    tokenizer.exit(Name::LabelEnd);
    State::Next(StateName::LabelEndAfter)
}

pub fn after(tokenizer: &mut Tokenizer) -> State {
    let Some(label_start) = tokenizer.tokenize_state.label_starts.last().cloned() else {
        return State::Nok;
    };
    let end = tokenizer.tokenize_state.end;
    let end_point = tokenizer.events[end].point.clone();

    if label_start.kind == LabelKind::GfmFootnote {
        // After `[^`.
        let label = tokenizer
            .parse_state
            .serialize(&tokenizer.events[label_start.start.1].point, &end_point, false);
        let id = normalize_identifier(&label);

        if tokenizer
            .parse_state
            .gfm_footnote_definitions
            .borrow()
            .contains(&id)
        {
            return State::Retry(StateName::LabelEndOk);
        }

        // Not a call: the `[` starts a link and the `^` is text.
        let (enter, exit) = label_start.start;
        let caret_start = tokenizer.events[enter + 3].point.clone();
        let caret_end = tokenizer.events[exit].point.clone();
        tokenizer.events[enter + 3] = Event::exit(Name::LabelLink, caret_start.clone());
        tokenizer.events[enter + 4] = Event::enter(Name::Data, caret_start);
        tokenizer.events[enter + 5] = Event::exit(Name::Data, caret_end);

        if let Some(last) = tokenizer.tokenize_state.label_starts.last_mut() {
            last.kind = LabelKind::GfmUndefinedFootnote;
            last.start = (enter, enter + 3);
        }
    }

    let start_point = match tokenizer.tokenize_state.label_starts.last() {
        Some(label_start) => tokenizer.events[label_start.start.1].point.clone(),
        None => return State::Nok,
    };
    let defined = is_defined(tokenizer, &start_point, &end_point);

    match tokenizer.current {
        Code::Char('(') => {
            tokenizer.attempt(
                State::Next(StateName::LabelEndOk),
                State::Next(if defined {
                    StateName::LabelEndOk
                } else {
                    StateName::LabelEndNok
                }),
            );
            State::Retry(StateName::LabelEndResourceStart)
        }
        Code::Char('[') => {
            tokenizer.attempt(
                State::Next(StateName::LabelEndOk),
                State::Next(if defined {
                    StateName::LabelEndReferenceNotFull
                } else {
                    StateName::LabelEndNok
                }),
            );
            State::Retry(StateName::LabelEndReferenceFull)
        }
        _ if defined => State::Retry(StateName::LabelEndOk),
        _ => State::Retry(StateName::LabelEndNok),
    }
}

/// A full reference failed; try `[]`.
pub fn reference_not_full(tokenizer: &mut Tokenizer) -> State {
    tokenizer.attempt(
        State::Next(StateName::LabelEndOk),
        State::Next(StateName::LabelEndNok),
    );
    State::Retry(StateName::LabelEndReferenceCollapsed)
}

pub fn ok(tokenizer: &mut Tokenizer) -> State {
    let Some(label_start) = tokenizer.tokenize_state.label_starts.pop() else {
        return State::Nok;
    };

    if label_start.kind != LabelKind::Image {
        for earlier in &mut tokenizer.tokenize_state.label_starts {
            if earlier.kind != LabelKind::Image {
                earlier.inactive = true;
            }
        }
    }

    tokenizer.tokenize_state.labels.push(Label {
        kind: label_start.kind,
        start: label_start.start,
        end: (tokenizer.tokenize_state.end, tokenizer.events.len() - 1),
    });
    tokenizer.tokenize_state.end = 0;
    State::Ok
}

pub fn nok(tokenizer: &mut Tokenizer) -> State {
    if let Some(label_start) = tokenizer.tokenize_state.label_starts.pop() {
        tokenizer.tokenize_state.label_starts_loose.push(label_start);
    }
    tokenizer.tokenize_state.end = 0;
    State::Nok
}

pub fn resource_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('(') {
        return State::Nok;
    }

    tokenizer.enter(Name::Resource);
    tokenizer.enter(Name::ResourceMarker);
    tokenizer.consume();
    tokenizer.exit(Name::ResourceMarker);
    State::Next(StateName::LabelEndResourceBefore)
}

pub fn resource_before(tokenizer: &mut Tokenizer) -> State {
    if is_whitespace(tokenizer.current) {
        tokenizer.attempt(
            State::Next(StateName::LabelEndResourceOpen),
            State::Next(StateName::LabelEndResourceOpen),
        );
        State::Retry(space_or_tab_eol(tokenizer))
    } else {
        State::Retry(StateName::LabelEndResourceOpen)
    }
}

pub fn resource_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(')') {
        return State::Retry(StateName::LabelEndResourceEnd);
    }

    tokenizer.tokenize_state.token_1 = Name::ResourceDestination;
    tokenizer.tokenize_state.token_2 = Name::ResourceDestinationLiteral;
    tokenizer.tokenize_state.token_3 = Name::ResourceDestinationLiteralMarker;
    tokenizer.tokenize_state.token_4 = Name::ResourceDestinationRaw;
    tokenizer.tokenize_state.token_5 = Name::ResourceDestinationString;
    tokenizer.tokenize_state.size_b = LINK_RESOURCE_DESTINATION_BALANCE_MAX;
    tokenizer.attempt(
        State::Next(StateName::LabelEndResourceDestinationAfter),
        State::Next(StateName::LabelEndResourceDestinationMissing),
    );
    State::Retry(StateName::DestinationStart)
}

pub fn resource_destination_after(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);

    if is_whitespace(tokenizer.current) {
        tokenizer.attempt(
            State::Next(StateName::LabelEndResourceBetween),
            State::Next(StateName::LabelEndResourceEnd),
        );
        State::Retry(space_or_tab_eol(tokenizer))
    } else {
        State::Retry(StateName::LabelEndResourceEnd)
    }
}

pub fn resource_destination_missing(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);
    State::Nok
}

pub fn resource_between(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('"' | '\'' | '(') => {
            tokenizer.tokenize_state.token_1 = Name::ResourceTitle;
            tokenizer.tokenize_state.token_2 = Name::ResourceTitleMarker;
            tokenizer.tokenize_state.token_3 = Name::ResourceTitleString;
            tokenizer.attempt(
                State::Next(StateName::LabelEndResourceTitleAfter),
                State::Nok,
            );
            State::Retry(StateName::TitleStart)
        }
        _ => State::Retry(StateName::LabelEndResourceEnd),
    }
}

pub fn resource_title_after(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);

    if is_whitespace(tokenizer.current) {
        tokenizer.attempt(
            State::Next(StateName::LabelEndResourceEnd),
            State::Next(StateName::LabelEndResourceEnd),
        );
        State::Retry(space_or_tab_eol(tokenizer))
    } else {
        State::Retry(StateName::LabelEndResourceEnd)
    }
}

pub fn resource_end(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(')') {
        tokenizer.enter(Name::ResourceMarker);
        tokenizer.consume();
        tokenizer.exit(Name::ResourceMarker);
        tokenizer.exit(Name::Resource);
        State::Ok
    } else {
        State::Nok
    }
}

pub fn reference_full(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('[') {
        return State::Nok;
    }

    tokenizer.tokenize_state.token_1 = Name::Reference;
    tokenizer.tokenize_state.token_2 = Name::ReferenceMarker;
    tokenizer.tokenize_state.token_3 = Name::ReferenceString;
    tokenizer.attempt(
        State::Next(StateName::LabelEndReferenceFullAfter),
        State::Next(StateName::LabelEndReferenceFullMissing),
    );
    State::Retry(StateName::LabelStart)
}

pub fn reference_full_after(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);

    let events = &tokenizer.events;
    let Some(exit) = skip::to_back(events, events.len() - 1, &[Name::ReferenceString]) else {
        return State::Nok;
    };
    let Some(enter) = events[..exit]
        .iter()
        .rposition(|event| event.is_enter() && event.name == Name::ReferenceString)
    else {
        return State::Nok;
    };

    let (start, end) = (events[enter].point.clone(), events[exit].point.clone());
    if is_defined(tokenizer, &start, &end) {
        State::Ok
    } else {
        State::Nok
    }
}

pub fn reference_full_missing(tokenizer: &mut Tokenizer) -> State {
    reset_tokens(tokenizer);
    State::Nok
}

pub fn reference_collapsed(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('[') {
        return State::Nok;
    }

    tokenizer.enter(Name::Reference);
    tokenizer.enter(Name::ReferenceMarker);
    tokenizer.consume();
    tokenizer.exit(Name::ReferenceMarker);
    State::Next(StateName::LabelEndReferenceCollapsedOpen)
}

pub fn reference_collapsed_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char(']') {
        return State::Nok;
    }

    tokenizer.enter(Name::ReferenceMarker);
    tokenizer.consume();
    tokenizer.exit(Name::ReferenceMarker);
    tokenizer.exit(Name::Reference);
    State::Ok
}

fn reset_tokens(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.token_1 = Name::Data;
    tokenizer.tokenize_state.token_2 = Name::Data;
    tokenizer.tokenize_state.token_3 = Name::Data;
    tokenizer.tokenize_state.token_4 = Name::Data;
    tokenizer.tokenize_state.token_5 = Name::Data;
    tokenizer.tokenize_state.size_b = 0;
}

/// Wrap matched labels in groups; unmatched starts become data.
pub fn resolve(tokenizer: &mut Tokenizer) {
    let mut loose = std::mem::take(&mut tokenizer.tokenize_state.label_starts);
    loose.append(&mut tokenizer.tokenize_state.label_starts_loose);

    for label_start in loose {
        let (enter, exit) = label_start.start;
        tokenizer.events[enter].name = Name::Data;
        tokenizer.events[exit].name = Name::Data;
        tokenizer.map.add(enter + 1, exit - enter - 1, vec![]);
    }

    let labels = std::mem::take(&mut tokenizer.tokenize_state.labels);

    for label in labels {
        let group = match label.kind {
            LabelKind::GfmFootnote => Name::GfmFootnoteCall,
            LabelKind::Image => Name::Image,
            LabelKind::GfmUndefinedFootnote | LabelKind::Link => Name::Link,
        };
        let start_point = tokenizer.events[label.start.0].point.clone();

        tokenizer.map.add(
            label.start.0,
            0,
            vec![
                Event::enter(group, start_point.clone()),
                Event::enter(Name::Label, start_point),
            ],
        );

        if label.start.1 + 1 < label.end.0 {
            tokenizer.map.add_before(
                label.start.1 + 1,
                0,
                vec![Event::enter(
                    Name::LabelText,
                    tokenizer.events[label.start.1].point.clone(),
                )],
            );
            tokenizer.map.add(
                label.end.0,
                0,
                vec![Event::exit(
                    Name::LabelText,
                    tokenizer.events[label.end.0].point.clone(),
                )],
            );
        }

        // After the exit of the label end.
        tokenizer.map.add(
            label.end.0 + 4,
            0,
            vec![Event::exit(
                Name::Label,
                tokenizer.events[label.end.0 + 3].point.clone(),
            )],
        );
        tokenizer.map.add(
            label.end.1 + 1,
            0,
            vec![Event::exit(group, tokenizer.events[label.end.1].point.clone())],
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::event::{Kind, Name};
    use crate::{ParseOptions, parse};
    use pretty_assertions::assert_eq;

    fn groups(input: &str, options: &ParseOptions) -> Vec<Name> {
        let (events, _) = parse(input, options).unwrap();
        events
            .iter()
            .filter(|event| {
                event.kind == Kind::Enter
                    && matches!(event.name, Name::Link | Name::Image | Name::GfmFootnoteCall)
            })
            .map(|event| event.name)
            .collect()
    }

    #[test]
    fn resource_link_and_image() {
        let options = ParseOptions::default();
        assert_eq!(groups("[a](b)", &options), vec![Name::Link]);
        assert_eq!(groups("![a](b \"t\")", &options), vec![Name::Image]);
    }

    #[test]
    fn references_need_a_definition() {
        let options = ParseOptions::default();
        assert!(groups("[a]", &options).is_empty());
        assert_eq!(groups("[a]\n\n[a]: b", &options), vec![Name::Link]);
        assert_eq!(groups("[x][a]\n\n[a]: b", &options), vec![Name::Link]);
        assert_eq!(groups("[a][]\n\n[a]: b", &options), vec![Name::Link]);
    }

    #[test]
    fn links_do_not_nest() {
        let options = ParseOptions::default();
        assert_eq!(groups("[a [b](c)](d)", &options), vec![Name::Link]);
        assert_eq!(
            groups("[![a](b)](c)", &options),
            vec![Name::Link, Name::Image]
        );
    }

    #[test]
    fn footnote_calls_need_a_definition() {
        let options = ParseOptions::gfm();
        assert_eq!(
            groups("a[^b]\n\n[^b]: c", &options),
            vec![Name::GfmFootnoteCall]
        );
        assert!(groups("a[^b]", &options).is_empty());
        assert_eq!(groups("[^b](c)", &options), vec![Name::Link]);
    }
}
