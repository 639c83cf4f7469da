//! Whole-document parsing: preprocess, tokenize the document, then
//! subtokenize linked content until nothing is left to expand.

use std::cell::{Cell, RefCell};

use log::debug;

use crate::ParseOptions;
use crate::construct::Tables;
use crate::event::{Event, Point};
use crate::lexer::{Chunk, Code, preprocess};
use crate::message::Message;
use crate::state::{State, StateName};
use crate::subtokenize::subtokenize;
use crate::tokenizer::Tokenizer;

/// Everything shared by the tokenizers of one parse.
#[derive(Debug)]
pub struct ParseState<'a> {
    pub options: &'a ParseOptions,
    pub tables: Tables,
    pub chunks: Vec<Chunk>,
    /// Normalized identifiers of link definitions.
    pub definitions: RefCell<Vec<String>>,
    /// Normalized identifiers of footnote definitions.
    pub gfm_footnote_definitions: RefCell<Vec<String>>,
    chains: Cell<usize>,
}

impl<'a> ParseState<'a> {
    pub fn new(chunks: Vec<Chunk>, options: &'a ParseOptions) -> Self {
        ParseState {
            options,
            tables: Tables::new(options),
            chunks,
            definitions: RefCell::new(Vec::new()),
            gfm_footnote_definitions: RefCell::new(Vec::new()),
            chains: Cell::new(0),
        }
    }

    pub fn next_chain(&self) -> usize {
        let id = self.chains.get();
        self.chains.set(id + 1);
        id
    }

    /// Position of the final `Eof` chunk.
    pub fn end_point(&self) -> Point {
        Point {
            index: self.chunks.len().saturating_sub(1),
            ..Point::start()
        }
    }

    pub fn code_at(&self, point: &Point) -> Code {
        match self.chunks.get(point.index) {
            Some(Chunk::Text(text)) => text
                .get(point.buffer_index..)
                .and_then(|rest| rest.chars().next())
                .map(Code::Char)
                .unwrap_or(Code::Eof),
            Some(Chunk::Code(code)) => *code,
            None => Code::Eof,
        }
    }

    /// The code right before `point`, or `Eof` at the start.
    pub fn code_before(&self, point: &Point) -> Code {
        if point.buffer_index > 0
            && let Some(Chunk::Text(text)) = self.chunks.get(point.index)
        {
            return text
                .get(..point.buffer_index)
                .and_then(|before| before.chars().next_back())
                .map(Code::Char)
                .unwrap_or(Code::Eof);
        }

        match point.index.checked_sub(1).and_then(|index| self.chunks.get(index)) {
            Some(Chunk::Text(text)) => text.chars().next_back().map(Code::Char).unwrap_or(Code::Eof),
            Some(Chunk::Code(code)) => *code,
            None => Code::Eof,
        }
    }

    /// Move `point` past the code it is at. `Eof` is never passed.
    pub fn step(&self, point: &mut Point) {
        match self.chunks.get(point.index) {
            Some(Chunk::Text(text)) => {
                let Some(char) = text
                    .get(point.buffer_index..)
                    .and_then(|rest| rest.chars().next())
                else {
                    return;
                };
                point.column += 1;
                point.offset += char.len_utf8();
                point.buffer_index += char.len_utf8();

                if point.buffer_index >= text.len() {
                    point.index += 1;
                    point.buffer_index = 0;
                }
            }
            Some(Chunk::Code(code)) => {
                match code {
                    Code::Eof => return,
                    Code::CarriageReturnLineFeed => {
                        point.line += 1;
                        point.column = 1;
                        point.offset += 2;
                    }
                    Code::CarriageReturn | Code::LineFeed => {
                        point.line += 1;
                        point.column = 1;
                        point.offset += 1;
                    }
                    Code::HorizontalTab => {
                        point.column += 1;
                        point.offset += 1;
                    }
                    Code::VirtualSpace => point.column += 1,
                    Code::Char(char) => {
                        point.column += 1;
                        point.offset += char.len_utf8();
                    }
                }
                point.index += 1;
            }
            None => {}
        }
    }

    /// Every code between two points, with the point it is at.
    pub fn codes(&self, start: &Point, end: &Point) -> Vec<(Point, Code)> {
        let mut codes = Vec::new();
        let mut point = start.clone();

        while end.is_after(&point) {
            let code = self.code_at(&point);
            if code == Code::Eof {
                break;
            }
            codes.push((point.clone(), code));
            self.step(&mut point);
        }

        codes
    }

    /// The source between two points.
    ///
    /// With `expand_tabs`, a tab and its filler become spaces; otherwise the
    /// tab is kept and its filler dropped.
    pub fn serialize(&self, start: &Point, end: &Point, expand_tabs: bool) -> String {
        let mut value = String::new();
        let mut index = start.index;
        let mut at_tab = false;

        while index <= end.index && index < self.chunks.len() {
            let from = if index == start.index {
                start.buffer_index
            } else {
                0
            };

            match &self.chunks[index] {
                Chunk::Text(text) => {
                    let to = if index == end.index {
                        end.buffer_index
                    } else {
                        text.len()
                    };
                    if let Some(slice) = text.get(from..to) {
                        value.push_str(slice);
                    }
                    at_tab = false;
                }
                Chunk::Code(code) => {
                    if index == end.index {
                        break;
                    }
                    match code {
                        Code::CarriageReturn => value.push('\r'),
                        Code::LineFeed => value.push('\n'),
                        Code::CarriageReturnLineFeed => value.push_str("\r\n"),
                        Code::HorizontalTab => {
                            value.push(if expand_tabs { ' ' } else { '\t' });
                            at_tab = true;
                            index += 1;
                            continue;
                        }
                        Code::VirtualSpace => {
                            if expand_tabs || !at_tab {
                                value.push(' ');
                            }
                            index += 1;
                            continue;
                        }
                        Code::Char(char) => value.push(*char),
                        Code::Eof => break,
                    }
                    at_tab = false;
                }
            }

            index += 1;
        }

        value
    }

    /// The source of the token whose enter event is `events[index]`.
    pub fn slice(&self, events: &[Event], index: usize) -> String {
        let end = crate::util::skip::exit_of(events, index);
        self.serialize(&events[index].point, &events[end].point, false)
    }
}

/// Tokenize and fully resolve `value`.
pub fn parse<'a>(
    value: &str,
    options: &'a ParseOptions,
) -> Result<(Vec<Event>, ParseState<'a>), Message> {
    parse_chunks(preprocess(value), options)
}

/// Parse chunks a [`Preprocessor`](crate::lexer::Preprocessor) produced
/// from input written in pieces. The chunks must end with its `end`.
pub fn parse_chunks(
    chunks: Vec<Chunk>,
    options: &ParseOptions,
) -> Result<(Vec<Event>, ParseState<'_>), Message> {
    let parse_state = ParseState::new(chunks, options);
    debug!("parse: {} chunks", parse_state.chunks.len());

    let mut events = {
        let mut tokenizer = Tokenizer::new(Point::start(), &parse_state);
        let end = parse_state.end_point();
        let state = tokenizer.push(
            &Point::start(),
            &end,
            State::Next(StateName::DocumentStart),
        );
        tokenizer.flush(state, true)?;
        tokenizer.events
    };

    let mut pass = 0;
    while !subtokenize(&mut events, &parse_state, None)? {
        pass += 1;
        debug!("subtokenize: pass {pass}, {} events", events.len());
    }

    Ok((events, parse_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state<'a>(input: &str, options: &'a ParseOptions) -> ParseState<'a> {
        ParseState::new(preprocess(input), options)
    }

    fn walk(parse_state: &ParseState, steps: usize) -> Point {
        let mut point = Point::start();
        for _ in 0..steps {
            parse_state.step(&mut point);
        }
        point
    }

    #[test]
    fn step_counts_columns_and_offsets() {
        let options = ParseOptions::default();
        let parse_state = state("é\tb\r\nc", &options);
        let point = walk(&parse_state, 5);

        assert_eq!(point.line, 1);
        assert_eq!(point.column, 6);
        assert_eq!(point.offset, 4);
        assert_eq!(parse_state.code_at(&point), Code::CarriageReturnLineFeed);

        let point = walk(&parse_state, 6);
        assert_eq!((point.line, point.column, point.offset), (2, 1, 6));
        assert_eq!(parse_state.code_at(&point), Code::Char('c'));
    }

    #[test]
    fn step_never_passes_eof() {
        let options = ParseOptions::default();
        let parse_state = state("a", &options);
        let point = walk(&parse_state, 5);

        assert_eq!(point.offset, 1);
        assert_eq!(parse_state.code_at(&point), Code::Eof);
    }

    #[test]
    fn serialize_keeps_tabs_unless_expanded() {
        let options = ParseOptions::default();
        let parse_state = state("\ta\n", &options);
        let end = walk(&parse_state, 6);

        assert_eq!(parse_state.serialize(&Point::start(), &end, false), "\ta\n");
        assert_eq!(
            parse_state.serialize(&Point::start(), &end, true),
            "    a\n"
        );
    }

    #[test]
    fn code_before_crosses_chunks() {
        let options = ParseOptions::default();
        let parse_state = state("a\tb", &options);

        assert_eq!(parse_state.code_before(&Point::start()), Code::Eof);
        assert_eq!(parse_state.code_before(&walk(&parse_state, 1)), Code::Char('a'));
        assert_eq!(
            parse_state.code_before(&walk(&parse_state, 4)),
            Code::VirtualSpace
        );
    }

    #[test]
    fn serialize_from_inside_a_tab() {
        let options = ParseOptions::default();
        let parse_state = state("\ta", &options);
        let start = walk(&parse_state, 2);
        let end = walk(&parse_state, 5);

        assert_eq!(parse_state.serialize(&start, &end, false), "  a");
    }
}
