//! # Document - The Container Driver
//!
//! The outermost tokenizer. Each line first tries to continue the open
//! containers (block quotes, list items, footnote definitions) in order,
//! then tries to open new ones, and feeds the rest of the line to a single
//! child tokenizer that parses flow.
//!
//! ```markdown
//! > - a
//! >   b
//! c
//! ```
//!
//! Line 2 continues both containers. Line 3 continues neither, but the
//! paragraph in the child takes it as a lazy line, so both stay open.
//!
//! Containers that end are not closed in the child. Their exit events are
//! collected with the start of the line that did not continue them, and are
//! woven into the child's events, after the line ending before that line,
//! once the whole document has been tokenized.

use log::trace;

use crate::construct::partial_space_or_tab::{Options, space_or_tab_with_options};
use crate::construct::{ConstructName, Table};
use crate::event::{Content, Event, Link, Name, Point};
use crate::lexer::Code;
use crate::message::Message;
use crate::state::{State, StateName};
use crate::subtokenize::divide_events;
use crate::tokenizer::{AttemptKind, Tokenizer};
use crate::util::constant::TAB_SIZE;

/// An open container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerState {
    pub kind: ConstructName,
    /// Columns a line must be indented by to continue a list item.
    pub size: usize,
    /// The list item started with a blank line.
    pub blank_initial: bool,
}

impl ContainerState {
    fn placeholder() -> Self {
        ContainerState {
            kind: ConstructName::BlockQuote,
            size: 0,
            blank_initial: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// A new container starts on this line.
    Prefix,
    /// The flow of this line has been fed.
    After,
    /// End of input.
    Eof,
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    let parse_state = tokenizer.parse_state;
    let mut child = Tokenizer::new(tokenizer.point.clone(), parse_state);
    child.current = tokenizer.current;
    tokenizer.tokenize_state.document_child = Some(Box::new(child));
    tokenizer.tokenize_state.document_child_state = Some(State::Next(StateName::FlowStart));
    tokenizer.tokenize_state.document_flow_chain = Some(tokenizer.next_chain());
    tokenizer.tokenize_state.document_line_start = Some(tokenizer.point.clone());
    State::Retry(StateName::DocumentContainerExistingBefore)
}

/// Try to continue the next open container.
pub fn container_existing_before(tokenizer: &mut Tokenizer) -> State {
    let continued = tokenizer.tokenize_state.document_continued;

    let continuation = tokenizer
        .tokenize_state
        .document_container_stack
        .get(continued)
        .and_then(|container| container.kind.construct().continuation);

    match continuation {
        Some(start) => {
            tokenizer.attempt(
                State::Next(StateName::DocumentContainerExistingAfter),
                State::Next(StateName::DocumentContainerNewBefore),
            );
            State::Retry(start)
        }
        None => State::Retry(StateName::DocumentContainerNewBefore),
    }
}

pub fn container_existing_after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.document_continued += 1;
    State::Retry(StateName::DocumentContainerExistingBefore)
}

/// Try to open a new container.
pub fn container_new_before(tokenizer: &mut Tokenizer) -> State {
    let continued = tokenizer.tokenize_state.document_continued;
    let all_continued = continued == tokenizer.tokenize_state.document_container_stack.len();

    if all_continued {
        let current_construct = tokenizer
            .tokenize_state
            .document_child
            .as_ref()
            .and_then(|child| child.current_construct);

        // Nothing can pierce into fenced code or raw html.
        if current_construct.is_some_and(|name| name.construct().concrete) {
            return State::Retry(StateName::DocumentContainersAfter);
        }

        tokenizer.interrupt = current_construct.is_some();
    }

    // The new container goes where `continuation` states look for it.
    let stack = &mut tokenizer.tokenize_state.document_container_stack;
    stack.push(ContainerState::placeholder());
    let tail = stack.len() - 1;
    stack.swap(continued, tail);

    tokenizer.attempt(
        State::Next(StateName::DocumentContainerNewAfter),
        State::Next(StateName::DocumentContainerNewNone),
    );
    State::Retry(StateName::DocumentContainerNewPrefix)
}

pub fn container_new_prefix(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        let max = if tokenizer
            .parse_state
            .options
            .disable
            .contains(&ConstructName::CodeIndented)
        {
            usize::MAX
        } else {
            TAB_SIZE - 1
        };

        tokenizer.attempt(
            State::Next(StateName::DocumentContainerNewConstruct),
            State::Nok,
        );
        State::Retry(space_or_tab_with_options(
            tokenizer,
            Options {
                min: 1,
                max,
                name: Name::LinePrefix,
                link: None,
            },
        ))
    } else {
        State::Retry(StateName::DocumentContainerNewConstruct)
    }
}

pub fn container_new_construct(tokenizer: &mut Tokenizer) -> State {
    tokenizer.constructs(AttemptKind::Attempt, Table::Document, State::Ok, State::Nok)
}

/// Nothing new here: drop the placeholder.
pub fn container_new_none(tokenizer: &mut Tokenizer) -> State {
    let continued = tokenizer.tokenize_state.document_continued;
    let stack = &mut tokenizer.tokenize_state.document_container_stack;
    let tail = stack.len() - 1;
    stack.swap(continued, tail);
    stack.pop();
    State::Retry(StateName::DocumentContainersAfter)
}

pub fn container_new_after(tokenizer: &mut Tokenizer) -> State {
    let continued = tokenizer.tokenize_state.document_continued;
    let mut container = tokenizer
        .tokenize_state
        .document_container_stack
        .swap_remove(continued);

    if let Some(kind) = tokenizer.current_construct {
        container.kind = kind;
    }

    trace!("document: new container `{:?}`", container.kind);

    // A new container closes the flow, and the containers not continued.
    if let Err(message) = exit_containers(tokenizer, Phase::Prefix) {
        return State::Error(message);
    }

    if let Some(child) = tokenizer.tokenize_state.document_child.as_mut() {
        child.pierce = true;
    }

    tokenizer.tokenize_state.document_container_stack.push(container);
    tokenizer.tokenize_state.document_continued += 1;
    tokenizer.interrupt = false;
    State::Retry(StateName::DocumentContainerNewBefore)
}

/// Hand the rest of the line to flow.
pub fn containers_after(tokenizer: &mut Tokenizer) -> State {
    let lazy = tokenizer.tokenize_state.document_continued
        != tokenizer.tokenize_state.document_container_stack.len();
    let point = tokenizer.point.clone();

    if let Some(child) = tokenizer.tokenize_state.document_child.as_mut() {
        child.lazy = lazy;
        child.define_skip(point);
    }

    if tokenizer.current == Code::Eof {
        return State::Retry(StateName::DocumentFlowEnd);
    }

    let chain = tokenizer.tokenize_state.document_flow_chain.unwrap_or_default();
    tokenizer.enter_link(
        Name::Data,
        Link {
            chain,
            content: Content::Flow,
        },
    );
    State::Retry(StateName::DocumentFlowInside)
}

pub fn flow_inside(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => {
            tokenizer.exit(Name::Data);
            State::Retry(StateName::DocumentFlowEnd)
        }
        code if code.is_line_ending() => {
            tokenizer.consume();
            tokenizer.exit(Name::Data);
            State::Next(StateName::DocumentFlowEnd)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::DocumentFlowInside)
        }
    }
}

pub fn flow_end(tokenizer: &mut Tokenizer) -> State {
    let to = tokenizer.point.clone();
    let state = tokenizer
        .tokenize_state
        .document_child_state
        .take()
        .unwrap_or(State::Next(StateName::FlowStart));

    let Some(child) = tokenizer.tokenize_state.document_child.as_mut() else {
        return State::Error(missing_child());
    };

    let from = child.point.clone();
    let mut state = child.push(&from, &to, state);
    child.pierce = false;
    if let State::Error(message) = state {
        return State::Error(message);
    }

    let lazy = child.lazy;
    let mut paragraph = match child.current_construct {
        Some(ConstructName::Content) => true,
        // A head row still waiting for its delimiter row may yet be a
        // paragraph.
        Some(ConstructName::GfmTable) => child.tokenize_state.gfm_table_delimiter_cells == 0,
        _ => false,
    };

    // The last line has no line ending, so the child can still be looking
    // ahead for an interruption. Settle that before deciding laziness.
    if tokenizer.current == Code::Eof {
        if let Err(message) = child.flush(state, false) {
            return State::Error(message);
        }
        child.current_construct = None;
        state = State::Next(StateName::FlowStart);

        if let Some(line_start) = tokenizer.tokenize_state.document_line_start.as_ref() {
            paragraph = content_continues_into(&child.events, line_start);
        }
    }

    tokenizer.tokenize_state.document_child_state = Some(state);

    // A lazy line that continued a paragraph keeps every container open.
    if lazy && paragraph && tokenizer.tokenize_state.document_paragraph_before {
        tokenizer.tokenize_state.document_continued =
            tokenizer.tokenize_state.document_container_stack.len();
    }

    if tokenizer.tokenize_state.document_continued
        != tokenizer.tokenize_state.document_container_stack.len()
        && let Err(message) = exit_containers(tokenizer, Phase::After)
    {
        return State::Error(message);
    }

    tokenizer.tokenize_state.document_continued = 0;

    if tokenizer.current == Code::Eof {
        if let Err(message) = exit_containers(tokenizer, Phase::Eof) {
            return State::Error(message);
        }
        if let Err(message) = resolve(tokenizer) {
            return State::Error(message);
        }
        return State::Ok;
    }

    tokenizer.tokenize_state.document_paragraph_before = paragraph;
    tokenizer.tokenize_state.document_line_start = Some(tokenizer.point.clone());
    tokenizer.interrupt = false;
    State::Retry(StateName::DocumentContainerExistingBefore)
}

fn missing_child() -> Message {
    Message::new(None, "Expected a flow tokenizer in the document", "document")
}

/// Close the containers from `document_continued` on.
///
/// Before a new container, and at the end, the child's flow is flushed
/// first. After the flow of a line, the child keeps going: only constructs
/// that already ended can be inside the containers that close here.
fn exit_containers(tokenizer: &mut Tokenizer, phase: Phase) -> Result<(), Message> {
    let continued = tokenizer.tokenize_state.document_continued;
    let closing = tokenizer
        .tokenize_state
        .document_container_stack
        .split_off(continued);

    if phase != Phase::After {
        let state = tokenizer
            .tokenize_state
            .document_child_state
            .take()
            .unwrap_or(State::Next(StateName::FlowStart));
        let child = tokenizer
            .tokenize_state
            .document_child
            .as_mut()
            .ok_or_else(missing_child)?;

        child.flush(state, false)?;
        child.current_construct = None;
        child.interrupt = false;
        tokenizer.tokenize_state.document_child_state = Some(State::Next(StateName::FlowStart));
    }

    if closing.is_empty() {
        return Ok(());
    }

    let mut exits = Vec::with_capacity(closing.len());

    for container in closing.iter().rev() {
        let Some(name) = container.kind.construct().exit else {
            continue;
        };
        trace!("document: close `{name:?}`");
        exits.push(Event::exit(name, tokenizer.point.clone()));
        if let Some(index) = tokenizer.stack.iter().rposition(|open| *open == name) {
            tokenizer.stack.remove(index);
        }
    }

    if phase == Phase::Eof {
        tokenizer.tokenize_state.document_eof_exits.extend(exits);
    } else {
        let line_start = tokenizer
            .tokenize_state
            .document_line_start
            .clone()
            .unwrap_or_else(|| tokenizer.point.clone());
        tokenizer
            .tokenize_state
            .document_exits
            .push((line_start, exits));
    }

    Ok(())
}

/// Weave the closed containers into the flow and merge both event lists.
fn resolve(tokenizer: &mut Tokenizer) -> Result<(), Message> {
    let Some(mut child) = tokenizer.tokenize_state.document_child.take() else {
        return Err(missing_child());
    };

    let exits = std::mem::take(&mut tokenizer.tokenize_state.document_exits);
    inject_exits(&mut child, exits);
    child.resolve()?;

    let indices: Vec<usize> = tokenizer
        .events
        .iter()
        .enumerate()
        .filter(|(_, event)| {
            event.is_enter() && event.link.is_some_and(|link| link.content == Content::Flow)
        })
        .map(|(index, _)| index)
        .collect();

    let child_events = std::mem::take(&mut child.events);

    if indices.is_empty() {
        tokenizer.events.extend(child_events);
    } else {
        divide_events(&mut tokenizer.map, &tokenizer.events, &indices, child_events);
        tokenizer.map.consume(&mut tokenizer.events);
    }

    let eof_exits = std::mem::take(&mut tokenizer.tokenize_state.document_eof_exits);
    tokenizer.events.extend(eof_exits);
    Ok(())
}

/// Whether the events end in content that started before `line_start`.
fn content_continues_into(events: &[Event], line_start: &Point) -> bool {
    let ends_in_content = events
        .last()
        .is_some_and(|event| event.is_exit() && event.name == Name::Content);

    ends_in_content
        && events
            .iter()
            .rposition(|event| event.is_enter() && event.name == Name::Content)
            .is_some_and(|enter| line_start.is_after(&events[enter].point))
}

/// Put each group of container exits right after the line ending of the
/// line before the one it was closed on, so a container keeps its trailing
/// blank lines.
///
/// Exits that follow that line ending belong to constructs around it, so
/// the group goes after those too.
fn inject_exits(child: &mut Tokenizer, exits: Vec<(Point, Vec<Event>)>) {
    let events = &child.events;
    let mut search = 0;

    for (line_start, mut group) in exits {
        let target = line_start.position();
        let ending = (search..events.len())
            .take_while(|index| events[*index].point.position() <= target)
            .find(|index| {
                let event = &events[*index];
                event.is_exit()
                    && matches!(event.name, Name::LineEnding | Name::BlankLineEnding)
                    && event.point.position() == target
            });

        let (at, point) = match ending {
            Some(exit) => {
                search = exit;
                let mut at = exit + 1;
                let mut point = events[exit].point.clone();

                while at < events.len() && events[at].is_exit() {
                    point = events[at].point.clone();
                    at += 1;
                }

                (at, point)
            }
            None => {
                while search < events.len() && line_start.is_after(&events[search].point) {
                    search += 1;
                }
                let point = match search.checked_sub(1) {
                    Some(before) => events[before].point.clone(),
                    None => line_start.clone(),
                };
                (search, point)
            }
        };

        trace!("document: {} exits at {at}", group.len());
        for exit in &mut group {
            exit.point = point.clone();
        }

        child.map.add(at, 0, group);
    }

    child.map.consume(&mut child.events);
}
