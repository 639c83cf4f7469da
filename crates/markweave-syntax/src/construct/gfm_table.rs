//! # GFM Tables
//!
//! A head row, a delimiter row with the same number of cells, and body rows
//! until a blank line or another block:
//!
//! ```markdown
//! | a | b  |
//! | - | :- |
//! | c | d  |
//! ```
//!
//! Rows are split on unescaped pipes, and each cell's text is linked text
//! content. Colons in the delimiter row set the alignment of a column.
//! Either the head or the delimiter row needs at least one pipe.
//!
//! The structure is emitted as it is parsed:
//!
//! ```text
//! GfmTable
//! ├─ GfmTableHead
//! │  ├─ GfmTableRow ─ GfmTableCell ─ GfmTableCellText
//! │  └─ GfmTableDelimiterRow ─ GfmTableDelimiterCell ─ GfmTableDelimiterCellValue
//! └─ GfmTableBody
//!    └─ GfmTableRow …
//! ```

use crate::construct::Table;
use crate::construct::flow::indented_as_code;
use crate::construct::partial_space_or_tab::{Options, space_or_tab, space_or_tab_with_options};
use crate::event::{Content, Link, Name};
use crate::lexer::Code;
use crate::state::{State, StateName};
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

fn in_head(tokenizer: &Tokenizer) -> bool {
    tokenizer.tokenize_state.gfm_table_head_cells == 0
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() || indented_as_code(tokenizer) {
        return State::Nok;
    }

    tokenizer.enter(Name::GfmTable);
    tokenizer.enter(Name::GfmTableHead);
    tokenizer.enter(Name::GfmTableRow);
    State::Retry(StateName::GfmTableRowStart)
}

pub fn row_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.size = 0;

    if tokenizer.current == Code::Char('|') {
        State::Retry(StateName::GfmTableRowDivider)
    } else {
        State::Retry(StateName::GfmTableRowCellBefore)
    }
}

pub fn row_divider(tokenizer: &mut Tokenizer) -> State {
    if in_head(tokenizer) {
        tokenizer.tokenize_state.seen = true;
    }
    tokenizer.enter(Name::GfmTableCellDivider);
    tokenizer.consume();
    tokenizer.exit(Name::GfmTableCellDivider);
    State::Next(StateName::GfmTableRowAfterDivider)
}

pub fn row_after_divider(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::GfmTableRowAfterWhitespace),
            State::Nok,
        );
        State::Retry(space_or_tab(tokenizer))
    } else {
        State::Retry(StateName::GfmTableRowAfterWhitespace)
    }
}

pub fn row_after_whitespace(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => State::Retry(StateName::GfmTableRowEnd),
        // Two dividers with only whitespace between them: an empty cell.
        Code::Char('|') => {
            tokenizer.enter(Name::GfmTableCell);
            tokenizer.exit(Name::GfmTableCell);
            tokenizer.tokenize_state.size += 1;
            State::Retry(StateName::GfmTableRowDivider)
        }
        _ => State::Retry(StateName::GfmTableRowCellBefore),
    }
}

pub fn row_cell_before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.size += 1;
    tokenizer.enter(Name::GfmTableCell);
    tokenizer.enter(Name::GfmTableCellText);
    let chain = tokenizer.next_chain();
    tokenizer.enter_link(
        Name::Data,
        Link {
            chain,
            content: Content::Text,
        },
    );
    State::Retry(StateName::GfmTableRowCellInside)
}

fn exit_cell(tokenizer: &mut Tokenizer) {
    tokenizer.exit(Name::Data);
    tokenizer.exit(Name::GfmTableCellText);
    tokenizer.exit(Name::GfmTableCell);
}

pub fn row_cell_inside(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => {
            exit_cell(tokenizer);
            State::Retry(StateName::GfmTableRowEnd)
        }
        Code::Char('|') => {
            exit_cell(tokenizer);
            State::Retry(StateName::GfmTableRowDivider)
        }
        Code::Char('\\') => {
            tokenizer.consume();
            State::Next(StateName::GfmTableRowCellEscape)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::GfmTableRowCellInside)
        }
    }
}

pub fn row_cell_escape(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('|' | '\\') => {
            tokenizer.consume();
            State::Next(StateName::GfmTableRowCellInside)
        }
        _ => State::Retry(StateName::GfmTableRowCellInside),
    }
}

pub fn row_end(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::GfmTableRow);

    if in_head(tokenizer) {
        State::Retry(StateName::GfmTableHeadRowAfter)
    } else {
        State::Retry(StateName::GfmTableBodyBreak)
    }
}

/// The head row needs cells and a next line for the delimiter row.
pub fn head_row_after(tokenizer: &mut Tokenizer) -> State {
    let cells = tokenizer.tokenize_state.size;

    if cells > 0 && tokenizer.current.is_line_ending() {
        tokenizer.tokenize_state.gfm_table_head_cells = cells;
        tokenizer.tokenize_state.size = 0;
        tokenizer.enter(Name::LineEnding);
        tokenizer.consume();
        tokenizer.exit(Name::LineEnding);
        State::Next(StateName::GfmTableDelimiterStart)
    } else {
        nok(tokenizer)
    }
}

pub fn delimiter_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.lazy || tokenizer.pierce {
        return nok(tokenizer);
    }

    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::GfmTableDelimiterPrefixed),
            State::Nok,
        );
        State::Retry(line_prefix(tokenizer))
    } else {
        State::Retry(StateName::GfmTableDelimiterPrefixed)
    }
}

pub fn delimiter_prefixed(tokenizer: &mut Tokenizer) -> State {
    if indented_as_code(tokenizer) {
        return nok(tokenizer);
    }

    tokenizer.enter(Name::GfmTableDelimiterRow);

    match tokenizer.current {
        Code::Char('|') => State::Retry(StateName::GfmTableDelimiterDivider),
        Code::Char('-' | ':') => State::Retry(StateName::GfmTableDelimiterCellBefore),
        _ => nok(tokenizer),
    }
}

pub fn delimiter_divider(tokenizer: &mut Tokenizer) -> State {
    tokenizer.tokenize_state.seen = true;
    tokenizer.enter(Name::GfmTableCellDivider);
    tokenizer.consume();
    tokenizer.exit(Name::GfmTableCellDivider);
    State::Next(StateName::GfmTableDelimiterAfterDivider)
}

pub fn delimiter_after_divider(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::GfmTableDelimiterAfterWhitespace),
            State::Nok,
        );
        State::Retry(space_or_tab(tokenizer))
    } else {
        State::Retry(StateName::GfmTableDelimiterAfterWhitespace)
    }
}

pub fn delimiter_after_whitespace(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => State::Retry(StateName::GfmTableDelimiterRowEnd),
        Code::Char('-' | ':') => State::Retry(StateName::GfmTableDelimiterCellBefore),
        _ => nok(tokenizer),
    }
}

pub fn delimiter_cell_before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::GfmTableDelimiterCell);
    tokenizer.enter(Name::GfmTableDelimiterCellValue);

    if tokenizer.current == Code::Char(':') {
        tokenizer.enter(Name::GfmTableDelimiterMarker);
        tokenizer.consume();
        tokenizer.exit(Name::GfmTableDelimiterMarker);
        State::Next(StateName::GfmTableDelimiterFillerStart)
    } else {
        State::Retry(StateName::GfmTableDelimiterFillerStart)
    }
}

pub fn delimiter_filler_start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') {
        tokenizer.enter(Name::GfmTableDelimiterFiller);
        State::Retry(StateName::GfmTableDelimiterFiller)
    } else {
        nok(tokenizer)
    }
}

pub fn delimiter_filler(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') {
        tokenizer.consume();
        return State::Next(StateName::GfmTableDelimiterFiller);
    }

    tokenizer.exit(Name::GfmTableDelimiterFiller);

    if tokenizer.current == Code::Char(':') {
        tokenizer.enter(Name::GfmTableDelimiterMarker);
        tokenizer.consume();
        tokenizer.exit(Name::GfmTableDelimiterMarker);
        State::Next(StateName::GfmTableDelimiterValueAfter)
    } else {
        State::Retry(StateName::GfmTableDelimiterValueAfter)
    }
}

pub fn delimiter_value_after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::GfmTableDelimiterCellValue);
    tokenizer.tokenize_state.size += 1;

    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::GfmTableDelimiterCellAfter),
            State::Nok,
        );
        State::Retry(space_or_tab(tokenizer))
    } else {
        State::Retry(StateName::GfmTableDelimiterCellAfter)
    }
}

pub fn delimiter_cell_after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::GfmTableDelimiterCell);

    match tokenizer.current {
        Code::Char('|') => State::Retry(StateName::GfmTableDelimiterDivider),
        code if code.is_line_ending_or_eof() => State::Retry(StateName::GfmTableDelimiterRowEnd),
        _ => nok(tokenizer),
    }
}

pub fn delimiter_row_end(tokenizer: &mut Tokenizer) -> State {
    let cells = tokenizer.tokenize_state.size;

    if !tokenizer.tokenize_state.seen || cells != tokenizer.tokenize_state.gfm_table_head_cells {
        return nok(tokenizer);
    }

    tokenizer.tokenize_state.gfm_table_delimiter_cells = cells;
    tokenizer.tokenize_state.size = 0;
    tokenizer.exit(Name::GfmTableDelimiterRow);
    tokenizer.exit(Name::GfmTableHead);
    State::Retry(StateName::GfmTableBodyBreak)
}

pub fn body_break(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending() {
        tokenizer.check(
            State::Next(StateName::GfmTableBodyLineStart),
            State::Next(StateName::GfmTableEnd),
        );
        State::Retry(StateName::GfmTableBodyCheckStart)
    } else {
        State::Retry(StateName::GfmTableEnd)
    }
}

pub fn body_check_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::GfmTableBodyCheckAfterEol)
}

pub fn body_check_after_eol(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.lazy || tokenizer.pierce {
        return State::Nok;
    }

    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(
            State::Next(StateName::GfmTableBodyCheckPrefixed),
            State::Nok,
        );
        State::Retry(line_prefix(tokenizer))
    } else {
        State::Retry(StateName::GfmTableBodyCheckPrefixed)
    }
}

/// A row, unless the line is blank or another block starts on it.
pub fn body_check_prefixed(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        return State::Nok;
    }

    if indented_as_code(tokenizer) {
        return State::Ok;
    }

    tokenizer.constructs(AttemptKind::Interrupt, Table::Flow, State::Nok, State::Ok)
}

pub fn body_line_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);

    if !tokenizer.tokenize_state.gfm_table_in_body {
        tokenizer.tokenize_state.gfm_table_in_body = true;
        tokenizer.enter(Name::GfmTableBody);
    }

    State::Next(StateName::GfmTableBodyRowPrefix)
}

pub fn body_row_prefix(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(State::Next(StateName::GfmTableBodyRowStart), State::Nok);
        State::Retry(line_prefix(tokenizer))
    } else {
        State::Retry(StateName::GfmTableBodyRowStart)
    }
}

pub fn body_row_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::GfmTableRow);
    State::Retry(StateName::GfmTableRowStart)
}

pub fn end(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.tokenize_state.gfm_table_in_body {
        tokenizer.exit(Name::GfmTableBody);
    }
    tokenizer.exit(Name::GfmTable);
    reset(tokenizer);
    State::Ok
}

fn nok(tokenizer: &mut Tokenizer) -> State {
    reset(tokenizer);
    State::Nok
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.gfm_table_head_cells = 0;
    tokenizer.tokenize_state.gfm_table_delimiter_cells = 0;
    tokenizer.tokenize_state.gfm_table_in_body = false;
    tokenizer.tokenize_state.seen = false;
    tokenizer.tokenize_state.size = 0;
}
