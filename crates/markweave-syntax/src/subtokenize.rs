//! Expanding linked content.
//!
//! Tokens such as paragraph lines or a fence's info string are emitted as
//! placeholders with a [`Link`](crate::event::Link). All placeholders that
//! share a chain are fed, in order, into one child tokenizer of the linked
//! content type. The child's events are then split back over the
//! placeholders they came from, by position:
//!
//! ```text
//! parent:  [Enter Data ─ Exit Data]  BlockQuotePrefix  [Enter Data ─ Exit Data]
//! child:    Data "a"  LineEnding                        Data "b"
//! result:   Data "a"  LineEnding     BlockQuotePrefix   Data "b"
//! ```
//!
//! Child events can contain new links (text inside a definition's content),
//! so [`crate::parser::parse`] repeats this until a pass finds nothing.

use std::collections::HashMap;

use log::trace;

use crate::event::{Content, Event};
use crate::message::Message;
use crate::parser::ParseState;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::edit_map::EditMap;

fn start_of(content: Content) -> Option<StateName> {
    match content {
        Content::Flow => None,
        Content::Content => Some(StateName::ContentDefinitionBefore),
        Content::String => Some(StateName::StringStart),
        Content::Text => Some(StateName::TextStart),
    }
}

/// Expand every chain in `events`, optionally only those of one content type.
///
/// Returns whether there was nothing to expand.
pub fn subtokenize(
    events: &mut Vec<Event>,
    parse_state: &ParseState,
    filter: Option<Content>,
) -> Result<bool, Message> {
    subtokenize_from(events, parse_state, filter, 0)
}

/// Like [`subtokenize`], looking only at events from `from` on.
pub fn subtokenize_from(
    events: &mut Vec<Event>,
    parse_state: &ParseState,
    filter: Option<Content>,
    from: usize,
) -> Result<bool, Message> {
    let mut order = Vec::new();
    let mut chains: HashMap<usize, (Content, Vec<usize>)> = HashMap::new();

    for (index, event) in events.iter().enumerate().skip(from) {
        if event.is_enter()
            && let Some(link) = event.link
            && link.content != Content::Flow
            && filter.is_none_or(|content| content == link.content)
        {
            chains
                .entry(link.chain)
                .or_insert_with(|| {
                    order.push(link.chain);
                    (link.content, Vec::new())
                })
                .1
                .push(index);
        }
    }

    if order.is_empty() {
        return Ok(true);
    }

    let mut map = EditMap::new();

    for chain in order {
        let Some((content, indices)) = chains.remove(&chain) else {
            continue;
        };
        let Some(start) = start_of(content) else {
            continue;
        };

        trace!("subtokenize: chain {chain} ({content:?}), {} spans", indices.len());

        let mut tokenizer = Tokenizer::new(events[indices[0]].point.clone(), parse_state);
        let mut line = events[indices[0]].point.line;

        // Content resumes at the first span of each later line.
        for &index in &indices[1..] {
            if events[index].point.line != line {
                line = events[index].point.line;
                tokenizer.define_skip(events[index].point.clone());
            }
        }

        let mut state = State::Next(start);

        for &index in &indices {
            state = tokenizer.push(&events[index].point, &events[index + 1].point, state);
        }

        tokenizer.flush(state, true)?;
        divide_events(&mut map, events, &indices, tokenizer.events);
    }

    map.consume(events);
    Ok(false)
}

/// Replace each placeholder at `indices` with the child events inside it.
pub fn divide_events(
    map: &mut EditMap,
    events: &[Event],
    indices: &[usize],
    child_events: Vec<Event>,
) {
    let mut slices: Vec<Vec<Event>> = vec![Vec::new(); indices.len()];
    let mut span = 0;

    for event in child_events {
        while span + 1 < indices.len() && event.point.is_after(&events[indices[span] + 1].point)
        {
            span += 1;
        }
        slices[span].push(event);
    }

    for (slice, &index) in slices.into_iter().zip(indices) {
        map.add(index, 2, slice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseOptions;
    use crate::event::{Kind, Link, Name, Point};
    use crate::lexer::preprocess;
    use pretty_assertions::assert_eq;

    #[test]
    fn nothing_to_expand() {
        let options = ParseOptions::default();
        let parse_state = ParseState::new(preprocess("a"), &options);
        let mut events = vec![
            Event::enter(Name::Data, Point::start()),
            Event::exit(Name::Data, Point::start()),
        ];

        assert!(subtokenize(&mut events, &parse_state, None).unwrap());
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn expands_a_text_span() {
        let options = ParseOptions::default();
        let parse_state = ParseState::new(preprocess("a *b*"), &options);
        let mut end = Point::start();
        for _ in 0..5 {
            parse_state.step(&mut end);
        }

        let mut events = vec![
            Event {
                kind: Kind::Enter,
                name: Name::Data,
                point: Point::start(),
                link: Some(Link {
                    chain: parse_state.next_chain(),
                    content: Content::Text,
                }),
            },
            Event::exit(Name::Data, end),
        ];

        assert!(!subtokenize(&mut events, &parse_state, None).unwrap());

        let names: Vec<(Kind, Name)> = events
            .iter()
            .map(|event| (event.kind, event.name))
            .collect();
        assert_eq!(
            names,
            vec![
                (Kind::Enter, Name::Data),
                (Kind::Exit, Name::Data),
                (Kind::Enter, Name::Emphasis),
                (Kind::Enter, Name::EmphasisSequence),
                (Kind::Exit, Name::EmphasisSequence),
                (Kind::Enter, Name::EmphasisText),
                (Kind::Enter, Name::Data),
                (Kind::Exit, Name::Data),
                (Kind::Exit, Name::EmphasisText),
                (Kind::Enter, Name::EmphasisSequence),
                (Kind::Exit, Name::EmphasisSequence),
                (Kind::Exit, Name::Emphasis),
            ]
        );
    }
}
