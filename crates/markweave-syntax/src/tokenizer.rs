//! # Tokenizer - The Construct Engine
//!
//! A pull state machine over the preprocessed chunk stream. Construct code is
//! written as small state functions (see [`crate::state`]): each one looks at
//! [`Tokenizer::current`], optionally consumes it, and returns the next
//! [`State`]. The tokenizer drives them with an iterative trampoline, so long
//! inputs never grow the native call stack.
//!
//! ## Backtracking
//!
//! [`Tokenizer::attempt`], [`Tokenizer::check`], [`Tokenizer::interrupt`] and
//! [`Tokenizer::constructs`] save a checkpoint before trying something. The
//! checkpoint only records lengths and positions; rolling back truncates the
//! event list and the token stack, so a failed attempt costs nothing beyond
//! the work it already did.
//!
//! ```text
//! attempt(ok, nok) ─┬─ Ok  → keep events, continue at `ok`
//!                   └─ Nok → truncate, continue at `nok`
//! check(ok, nok)    ─┬─ Ok  → truncate, continue at `ok`
//!                   └─ Nok → truncate, continue at `nok`
//! ```
//!
//! ## Skips
//!
//! Child tokenizers (flow inside containers, text inside paragraphs) see
//! only parts of each line. [`Tokenizer::define_skip`] records where content
//! resumes on a given line; consuming a line ending jumps straight there.

use std::collections::HashMap;

use log::trace;

use crate::construct::document::ContainerState;
use crate::construct::{ConstructName, Table};
use crate::event::{Content, Event, Kind, Link, Name, Point};
use crate::lexer::Code;
use crate::message::Message;
use crate::parser::ParseState;
use crate::resolve::{self, ResolveName};
use crate::state::{self, State};
use crate::util::edit_map::EditMap;

/// How an attempt treats its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptKind {
    /// Keep the events on success.
    Attempt,
    /// Always roll back.
    Check,
    /// Always roll back, and only try constructs that may interrupt.
    Interrupt,
}

#[derive(Debug, Clone)]
struct Progress {
    events_len: usize,
    stack_len: usize,
    point: Point,
    line_start: Point,
    previous: Code,
    current: Code,
    consumed: bool,
    current_construct: Option<ConstructName>,
    interrupt: bool,
}

#[derive(Debug)]
struct Attempt {
    kind: AttemptKind,
    ok: State,
    nok: State,
    progress: Progress,
    /// Remaining candidates, last one first.
    candidates: Vec<ConstructName>,
    construct: Option<ConstructName>,
}

/// Scratch state shared by the construct state functions.
///
/// Constructs that need more than one state to make a decision park their
/// counters and markers here. Each construct resets what it used before it
/// returns `Ok` or `Nok`.
#[derive(Default)]
pub struct TokenizeState<'a> {
    // Document.
    pub document_child: Option<Box<Tokenizer<'a>>>,
    pub document_child_state: Option<State>,
    pub document_container_stack: Vec<ContainerState>,
    pub document_continued: usize,
    pub document_exits: Vec<(Point, Vec<Event>)>,
    pub document_eof_exits: Vec<Event>,
    pub document_line_start: Option<Point>,
    pub document_paragraph_before: bool,
    pub document_flow_chain: Option<usize>,

    // Content and paragraphs.
    pub content_chain: Option<usize>,
    pub paragraph_chain: Option<usize>,

    // Space or tab.
    pub space_or_tab_min: usize,
    pub space_or_tab_max: usize,
    pub space_or_tab_size: usize,
    pub space_or_tab_token: Name,
    pub space_or_tab_link: Option<Link>,

    // Space or tab, with at most one line ending.
    pub space_or_tab_eol_link: Option<Link>,
    pub space_or_tab_eol_ok: bool,

    // Labels in text.
    pub label_starts: Vec<LabelStart>,
    pub label_starts_loose: Vec<LabelStart>,
    pub labels: Vec<Label>,
    pub end: usize,

    // Tables.
    pub gfm_table_head_cells: usize,
    pub gfm_table_delimiter_cells: usize,
    pub gfm_table_in_body: bool,

    // Data.
    pub data_table: Option<Table>,

    // Generic.
    pub marker: char,
    pub marker_b: char,
    pub size: usize,
    pub size_b: usize,
    pub size_c: usize,
    pub seen: bool,
    pub start: usize,
    pub buffer: String,
    pub chain: Option<usize>,
    pub token_1: Name,
    pub token_2: Name,
    pub token_3: Name,
    pub token_4: Name,
    pub token_5: Name,
    pub token_6: Name,
}

/// An opening `[` or `![` waiting for its `]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStart {
    pub kind: LabelKind,
    /// Indices of the enter and exit events of the start marker.
    pub start: (usize, usize),
    /// Set once a link was found after this start.
    pub inactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    GfmFootnote,
    GfmUndefinedFootnote,
    Image,
    Link,
}

/// A matched label, resolved when tokenizing is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub kind: LabelKind,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

pub struct Tokenizer<'a> {
    pub parse_state: &'a ParseState<'a>,
    pub point: Point,
    /// Point right after the last consumed line ending, before any skip.
    line_start: Point,
    pub previous: Code,
    pub current: Code,
    consumed: bool,
    column_start: HashMap<usize, Point>,
    attempts: Vec<Attempt>,
    pub events: Vec<Event>,
    pub stack: Vec<Name>,
    pub map: EditMap,
    resolvers: Vec<ResolveName>,
    pub tokenize_state: TokenizeState<'a>,
    /// Only constructs that may interrupt are tried.
    pub interrupt: bool,
    /// The current line does not continue all open containers.
    pub lazy: bool,
    /// A new container started on this line, so nothing before it in flow
    /// can be continued.
    pub pierce: bool,
    pub current_construct: Option<ConstructName>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(point: Point, parse_state: &'a ParseState<'a>) -> Self {
        Tokenizer {
            parse_state,
            line_start: point.clone(),
            point,
            previous: Code::Eof,
            current: Code::Eof,
            consumed: true,
            column_start: HashMap::new(),
            attempts: Vec::new(),
            events: Vec::new(),
            stack: Vec::new(),
            map: EditMap::new(),
            resolvers: Vec::new(),
            tokenize_state: TokenizeState::default(),
            interrupt: false,
            lazy: false,
            pierce: false,
            current_construct: None,
        }
    }

    /// Register a resolver to run when the tokenizer is flushed.
    pub fn register_resolver(&mut self, name: ResolveName) {
        if !self.resolvers.contains(&name) {
            self.resolvers.push(name);
        }
    }

    /// Record where content starts on the line of `point`.
    pub fn define_skip(&mut self, point: Point) {
        self.column_start.insert(point.line, point);
        self.account_for_skip();
    }

    fn account_for_skip(&mut self) {
        if self.point.column == 1
            && let Some(at) = self.column_start.get(&self.point.line)
            && at.is_after(&self.point)
        {
            self.point = at.clone();
        }
    }

    /// Accept the current code and move to the next one.
    pub fn consume(&mut self) {
        debug_assert!(!self.consumed, "expected code to not be consumed yet");
        debug_assert_ne!(self.current, Code::Eof, "cannot consume end of input");

        self.parse_state.step(&mut self.point);
        self.previous = self.current;
        self.consumed = true;

        if self.previous.is_line_ending() {
            self.line_start = self.point.clone();
            self.account_for_skip();
        }
    }

    /// Allocate a new chain id for linked content.
    pub fn next_chain(&self) -> usize {
        self.parse_state.next_chain()
    }

    pub fn enter(&mut self, name: Name) {
        self.enter_impl(name, None);
    }

    pub fn enter_link(&mut self, name: Name, link: Link) {
        self.enter_impl(name, Some(link));
    }

    fn enter_impl(&mut self, name: Name, link: Option<Link>) {
        trace!("enter: `{name:?}`");
        self.stack.push(name);
        self.events.push(Event {
            kind: Kind::Enter,
            name,
            point: self.point.clone(),
            link,
        });
    }

    pub fn exit(&mut self, name: Name) {
        let current = self.stack.pop();
        debug_assert_eq!(current, Some(name), "expected exit event to match");
        trace!("exit: `{name:?}`");

        // Right after a line ending, the token ends at the start of the
        // line, not where a skip moved the point to.
        let point = if self.previous.is_line_ending() {
            self.line_start.clone()
        } else {
            self.point.clone()
        };

        self.events.push(Event::exit(name, point));
    }

    /// Start a linked token that continues `chain`, or a new chain.
    pub fn enter_linked(&mut self, name: Name, content: Content, chain: &mut Option<usize>) {
        let id = match chain {
            Some(id) => *id,
            None => {
                let id = self.next_chain();
                *chain = Some(id);
                id
            }
        };
        self.enter_link(name, Link { chain: id, content });
    }

    fn progress(&self) -> Progress {
        Progress {
            events_len: self.events.len(),
            stack_len: self.stack.len(),
            point: self.point.clone(),
            line_start: self.line_start.clone(),
            previous: self.previous,
            current: self.current,
            consumed: self.consumed,
            current_construct: self.current_construct,
            interrupt: self.interrupt,
        }
    }

    fn restore(&mut self, progress: &Progress) {
        debug_assert!(self.events.len() >= progress.events_len);
        debug_assert!(self.stack.len() >= progress.stack_len);
        self.events.truncate(progress.events_len);
        self.stack.truncate(progress.stack_len);
        self.point = progress.point.clone();
        self.line_start = progress.line_start.clone();
        self.previous = progress.previous;
        self.current = progress.current;
        self.consumed = progress.consumed;
        self.current_construct = progress.current_construct;
        self.interrupt = progress.interrupt;
    }

    fn push_attempt(&mut self, kind: AttemptKind, ok: State, nok: State) {
        let progress = self.progress();
        if kind == AttemptKind::Interrupt {
            self.interrupt = true;
        }
        self.attempts.push(Attempt {
            kind,
            ok,
            nok,
            progress,
            candidates: Vec::new(),
            construct: None,
        });
    }

    /// Try what follows; keep its events if it succeeds.
    pub fn attempt(&mut self, ok: State, nok: State) {
        self.push_attempt(AttemptKind::Attempt, ok, nok);
    }

    /// Look ahead at what follows without keeping anything.
    pub fn check(&mut self, ok: State, nok: State) {
        self.push_attempt(AttemptKind::Check, ok, nok);
    }

    /// Look ahead with the interrupt flag set.
    pub fn interrupt(&mut self, ok: State, nok: State) {
        self.push_attempt(AttemptKind::Interrupt, ok, nok);
    }

    /// Try the candidates of `table` for the current code, in order.
    ///
    /// Returns the state to continue with: the start of the first candidate,
    /// or `nok` when nothing can start here. Nothing was consumed in that
    /// case, so a `Next` there becomes a `Retry`.
    pub fn constructs(&mut self, kind: AttemptKind, table: Table, ok: State, nok: State) -> State {
        let interrupt = self.interrupt || kind == AttemptKind::Interrupt;
        let mut candidates: Vec<ConstructName> = self
            .parse_state
            .tables
            .get(table)
            .candidates(self.current)
            .into_iter()
            .filter(|name| !interrupt || name.construct().interruptible)
            .collect();

        candidates.reverse();

        let Some(first) = candidates.pop() else {
            return match nok {
                State::Next(name) => State::Retry(name),
                other => other,
            };
        };

        let progress = self.progress();
        if kind == AttemptKind::Interrupt {
            self.interrupt = true;
        }
        self.attempts.push(Attempt {
            kind,
            ok,
            nok,
            progress,
            candidates,
            construct: Some(first),
        });

        self.start_construct(first)
    }

    /// Try one construct by name.
    pub fn attempt_construct(&mut self, name: ConstructName, ok: State, nok: State) -> State {
        let progress = self.progress();
        self.attempts.push(Attempt {
            kind: AttemptKind::Attempt,
            ok,
            nok,
            progress,
            candidates: Vec::new(),
            construct: Some(name),
        });

        self.start_construct(name)
    }

    fn start_construct(&mut self, name: ConstructName) -> State {
        let construct = name.construct();
        trace!("try construct: `{name:?}`");
        if !construct.partial {
            self.current_construct = Some(name);
        }
        State::Retry(construct.start)
    }

    fn construct_ok(&mut self, name: ConstructName, from: usize) -> Result<(), Message> {
        let construct = name.construct();

        if let Some(resolver) = construct.resolve_all {
            self.register_resolver(resolver);
        }

        if let Some(resolver) = construct.resolve {
            resolve::call_scoped(self, resolver, from)?;
        }

        if let Some(resolver) = construct.resolve_to {
            resolve::call(self, resolver)?;
        }

        Ok(())
    }

    /// Settle an `Ok` or `Nok` against the innermost attempt.
    fn settle(&mut self, success: bool) -> Option<State> {
        let mut attempt = self.attempts.pop()?;

        if success {
            if attempt.kind == AttemptKind::Attempt {
                if let Some(name) = attempt.construct
                    && let Err(message) = self.construct_ok(name, attempt.progress.events_len)
                {
                    return Some(State::Error(message));
                }
            } else {
                self.restore(&attempt.progress);
            }

            return Some(attempt.ok);
        }

        // Restores `consumed` too: the next candidate starts on a fresh code.
        self.restore(&attempt.progress);

        if let Some(next) = attempt.candidates.pop() {
            if attempt.kind == AttemptKind::Interrupt {
                self.interrupt = true;
            }
            attempt.construct = Some(next);
            self.attempts.push(attempt);
            return Some(self.start_construct(next));
        }

        Some(attempt.nok)
    }

    /// Feed the codes from `from` up to `to` into `state`.
    pub fn push(&mut self, from: &Point, to: &Point, state: State) -> State {
        self.move_to(from);
        self.run(to, state, false)
    }

    fn move_to(&mut self, to: &Point) {
        if to.is_after(&self.point) {
            self.point = to.clone();
        }
    }

    fn run(&mut self, to: &Point, mut state: State, flush: bool) -> State {
        loop {
            match state {
                State::Error(_) => break,
                State::Ok | State::Nok => match self.settle(state == State::Ok) {
                    Some(next) => state = next,
                    None => break,
                },
                State::Next(name) => {
                    if to.is_after(&self.point) {
                        self.current = self.parse_state.code_at(&self.point);
                    } else if flush {
                        self.current = Code::Eof;
                    } else {
                        break;
                    }

                    self.consumed = false;
                    state = state::call(self, name);

                    if let State::Next(_) = state
                        && !self.consumed
                    {
                        state = State::Error(Message::new(
                            Some(self.point.clone()),
                            format!("Expected `{name:?}` to consume before moving on"),
                            "unconsumed",
                        ));
                    }
                }
                State::Retry(name) => state = state::call(self, name),
            }
        }

        state
    }

    /// Feed the end of input and settle every pending attempt.
    pub fn flush(&mut self, state: State, resolve: bool) -> Result<(), Message> {
        let to = self.point.clone();

        match self.run(&to, state, true) {
            State::Ok => {}
            State::Error(message) => return Err(message),
            other => {
                return Err(Message::new(
                    Some(self.point.clone()),
                    format!("Expected `Ok` at end of input, not `{other:?}`"),
                    "flush",
                ));
            }
        }

        self.current = Code::Eof;
        self.consumed = true;

        if resolve {
            self.resolve()?;
        }

        Ok(())
    }

    /// Run the registered resolvers, in their fixed order.
    pub fn resolve(&mut self) -> Result<(), Message> {
        let mut resolvers = std::mem::take(&mut self.resolvers);
        resolvers.sort();

        for resolver in resolvers {
            resolve::call(self, resolver)?;
        }

        self.map.consume(&mut self.events);
        Ok(())
    }

    /// Move the resolvers of `child` into this tokenizer.
    pub fn adopt_resolvers(&mut self, child: &mut Tokenizer) {
        for resolver in std::mem::take(&mut child.resolvers) {
            self.register_resolver(resolver);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseOptions;
    use crate::lexer::preprocess;
    use crate::state::StateName;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn names(events: &[Event]) -> Vec<(Kind, Name)> {
        events.iter().map(|event| (event.kind, event.name)).collect()
    }

    #[test]
    fn check_restores_everything() {
        let options = ParseOptions::default();
        let parse_state = ParseState::new(preprocess("---\n"), &options);
        let mut tokenizer = Tokenizer::new(Point::start(), &parse_state);
        let end = parse_state.end_point();

        tokenizer.check(State::Ok, State::Nok);
        let state = tokenizer.push(
            &Point::start(),
            &end,
            State::Next(StateName::ThematicBreakStart),
        );
        tokenizer.flush(state, false).unwrap();

        assert!(tokenizer.events.is_empty());
        assert_eq!(tokenizer.point, Point::start());
    }

    #[test]
    fn attempt_keeps_events() {
        let options = ParseOptions::default();
        let parse_state = ParseState::new(preprocess("***"), &options);
        let mut tokenizer = Tokenizer::new(Point::start(), &parse_state);
        let end = parse_state.end_point();

        tokenizer.attempt(State::Ok, State::Nok);
        let state = tokenizer.push(
            &Point::start(),
            &end,
            State::Next(StateName::ThematicBreakStart),
        );
        tokenizer.flush(state, false).unwrap();

        assert_eq!(
            names(&tokenizer.events),
            vec![
                (Kind::Enter, Name::ThematicBreak),
                (Kind::Enter, Name::ThematicBreakSequence),
                (Kind::Exit, Name::ThematicBreakSequence),
                (Kind::Exit, Name::ThematicBreak),
            ]
        );
        assert_eq!(tokenizer.point.column, 4);
    }

    #[test]
    fn failed_construct_falls_through_to_next_candidate() {
        let options = ParseOptions::default();
        let parse_state = ParseState::new(preprocess("- - -"), &options);
        let mut tokenizer = Tokenizer::new(Point::start(), &parse_state);
        let end = parse_state.end_point();

        tokenizer.current = tokenizer.parse_state.code_at(&tokenizer.point);
        tokenizer.consumed = false;
        let state = tokenizer.constructs(AttemptKind::Attempt, Table::Flow, State::Ok, State::Nok);
        let state = tokenizer.push(&Point::start(), &end, state);
        tokenizer.flush(state, false).unwrap();

        assert_eq!(tokenizer.events[0].name, Name::ThematicBreak);
        assert_eq!(
            tokenizer.current_construct,
            Some(ConstructName::ThematicBreak)
        );
    }

    #[test]
    fn line_ending_jumps_to_skip() {
        let options = ParseOptions::default();
        let parse_state = ParseState::new(preprocess("a\n> b"), &options);
        let mut tokenizer = Tokenizer::new(Point::start(), &parse_state);
        let skip = Point {
            line: 2,
            column: 3,
            offset: 4,
            index: 2,
            buffer_index: 2,
        };
        tokenizer.define_skip(skip.clone());

        let mut point = Point::start();
        parse_state.step(&mut point);
        tokenizer.point = point;
        tokenizer.current = Code::LineFeed;
        tokenizer.consumed = false;
        tokenizer.consume();

        assert_eq!(tokenizer.point, skip);
    }

    #[test]
    fn failed_attempt_leaves_the_code_unconsumed() {
        let options = ParseOptions::default();
        let parse_state = ParseState::new(preprocess("**a"), &options);
        let mut tokenizer = Tokenizer::new(Point::start(), &parse_state);
        let end = parse_state.end_point();

        tokenizer.current = tokenizer.parse_state.code_at(&tokenizer.point);
        tokenizer.consumed = false;
        tokenizer.attempt(State::Ok, State::Nok);
        let state = tokenizer.push(
            &Point::start(),
            &end,
            State::Retry(StateName::ThematicBreakStart),
        );

        assert_eq!(state, State::Nok);
        assert!(!tokenizer.consumed);
        assert_eq!(tokenizer.current, Code::Char('*'));
        assert!(tokenizer.events.is_empty());
    }

    /// The first text construct tried at these codes fails, so the one after
    /// it has to start from a code nothing consumed.
    #[rstest]
    #[case("a\\*b", ParseOptions::default())]
    #[case("a\\|b", ParseOptions::default())]
    #[case("~~a~~", ParseOptions::gfm())]
    #[case("[x", ParseOptions::gfm())]
    #[case("- [ ] a", ParseOptions::gfm())]
    #[case("| \\| |\n| - |", ParseOptions::gfm())]
    fn later_candidates_start_unconsumed(#[case] input: &str, #[case] options: ParseOptions) {
        assert!(crate::parse(input, &options).is_ok());
    }
}
