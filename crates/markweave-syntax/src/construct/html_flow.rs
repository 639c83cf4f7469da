//! # HTML (flow)
//!
//! Raw HTML blocks. There are seven kinds, told apart by how they start,
//! and each ends its own way:
//!
//! | kind        | starts with                       | ends                      |
//! |-------------|-----------------------------------|---------------------------|
//! | raw         | `<pre`, `<script`, `<style`, `<textarea` | line with a closing tag of those |
//! | comment     | `<!--`                            | line with `-->`           |
//! | instruction | `<?`                              | line with `?>`            |
//! | declaration | `<!` and a letter                 | line with `>`             |
//! | cdata       | `<![CDATA[`                       | line with `]]>`           |
//! | basic       | `<` or `</` and a known block name | blank line               |
//! | complete    | any complete tag alone on a line  | blank line                |
//!
//! Only the complete kind can not interrupt a paragraph. The block is kept
//! verbatim: lines are [`Name::HtmlFlowData`] tokens, and [`resolve`] pulls
//! the indentation of the first line into the block.

use crate::construct::flow::indented_as_code;
use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::character::{is_ascii_alphabetic, is_ascii_alphanumeric};
use crate::util::constant::{HTML_BLOCK_NAMES, HTML_CDATA_PREFIX, HTML_RAW_NAMES, HTML_RAW_SIZE_MAX};

const RAW: usize = 1;
const COMMENT: usize = 2;
const INSTRUCTION: usize = 3;
const DECLARATION: usize = 4;
const CDATA: usize = 5;
const BASIC: usize = 6;
const COMPLETE: usize = 7;

fn kind(tokenizer: &Tokenizer) -> usize {
    tokenizer.tokenize_state.size_c
}

fn set_kind(tokenizer: &mut Tokenizer, kind: usize) {
    tokenizer.tokenize_state.size_c = kind;
}

/// Once the kind is known, a lookahead for an interruption is done.
fn continue_or_interrupt(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.interrupt {
        reset(tokenizer);
        State::Ok
    } else {
        State::Retry(StateName::HtmlFlowContinuation)
    }
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('<') && !indented_as_code(tokenizer) {
        tokenizer.enter(Name::HtmlFlow);
        tokenizer.enter(Name::HtmlFlowData);
        tokenizer.consume();
        State::Next(StateName::HtmlFlowOpen)
    } else {
        State::Nok
    }
}

pub fn open(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('!') => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowDeclarationOpen)
        }
        Code::Char('/') => {
            tokenizer.tokenize_state.seen = true;
            tokenizer.consume();
            State::Next(StateName::HtmlFlowTagCloseStart)
        }
        Code::Char('?') => {
            set_kind(tokenizer, INSTRUCTION);
            tokenizer.consume();
            if tokenizer.interrupt {
                reset(tokenizer);
                State::Ok
            } else {
                State::Next(StateName::HtmlFlowContinuationDeclarationInside)
            }
        }
        Code::Char(char) if char.is_ascii_alphabetic() => {
            tokenizer.tokenize_state.buffer.push(char);
            tokenizer.consume();
            State::Next(StateName::HtmlFlowTagName)
        }
        _ => {
            reset(tokenizer);
            State::Nok
        }
    }
}

pub fn declaration_open(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('-') => {
            set_kind(tokenizer, COMMENT);
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCommentOpenInside)
        }
        Code::Char('[') => {
            set_kind(tokenizer, CDATA);
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCdataOpenInside)
        }
        code if is_ascii_alphabetic(code) => {
            set_kind(tokenizer, DECLARATION);
            tokenizer.consume();
            if tokenizer.interrupt {
                reset(tokenizer);
                State::Ok
            } else {
                State::Next(StateName::HtmlFlowContinuationDeclarationInside)
            }
        }
        _ => {
            reset(tokenizer);
            State::Nok
        }
    }
}

pub fn comment_open_inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') {
        tokenizer.consume();
        if tokenizer.interrupt {
            reset(tokenizer);
            State::Ok
        } else {
            State::Next(StateName::HtmlFlowContinuationDeclarationInside)
        }
    } else {
        reset(tokenizer);
        State::Nok
    }
}

pub fn cdata_open_inside(tokenizer: &mut Tokenizer) -> State {
    let expected = HTML_CDATA_PREFIX.chars().nth(tokenizer.tokenize_state.size);

    if tokenizer.current.char().is_some() && tokenizer.current.char() == expected {
        tokenizer.tokenize_state.size += 1;
        tokenizer.consume();

        if tokenizer.tokenize_state.size == HTML_CDATA_PREFIX.len() {
            tokenizer.tokenize_state.size = 0;
            if tokenizer.interrupt {
                reset(tokenizer);
                State::Ok
            } else {
                State::Next(StateName::HtmlFlowContinuation)
            }
        } else {
            State::Next(StateName::HtmlFlowCdataOpenInside)
        }
    } else {
        tokenizer.tokenize_state.size = 0;
        reset(tokenizer);
        State::Nok
    }
}

pub fn tag_close_start(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if char.is_ascii_alphabetic() => {
            tokenizer.tokenize_state.buffer.push(char);
            tokenizer.consume();
            State::Next(StateName::HtmlFlowTagName)
        }
        _ => {
            reset(tokenizer);
            State::Nok
        }
    }
}

pub fn tag_name(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if char.is_ascii_alphanumeric() || char == '-' => {
            tokenizer.tokenize_state.buffer.push(char);
            tokenizer.consume();
            State::Next(StateName::HtmlFlowTagName)
        }
        code if code.is_whitespace_or_eof() || matches!(code, Code::Char('/' | '>')) => {
            let closing = tokenizer.tokenize_state.seen;
            let slash = code == Code::Char('/');
            let name = tokenizer.tokenize_state.buffer.to_ascii_lowercase();

            if !slash && !closing && HTML_RAW_NAMES.contains(&name.as_str()) {
                set_kind(tokenizer, RAW);
                return continue_or_interrupt(tokenizer);
            }

            if HTML_BLOCK_NAMES.contains(&name.as_str()) {
                set_kind(tokenizer, BASIC);
                if slash {
                    tokenizer.consume();
                    return State::Next(StateName::HtmlFlowBasicSelfClosing);
                }
                return continue_or_interrupt(tokenizer);
            }

            set_kind(tokenizer, COMPLETE);

            if tokenizer.interrupt && !tokenizer.lazy {
                reset(tokenizer);
                State::Nok
            } else if closing {
                State::Retry(StateName::HtmlFlowCompleteClosingTagAfter)
            } else {
                State::Retry(StateName::HtmlFlowCompleteAttributeNameBefore)
            }
        }
        _ => {
            reset(tokenizer);
            State::Nok
        }
    }
}

pub fn basic_self_closing(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        tokenizer.consume();
        if tokenizer.interrupt {
            reset(tokenizer);
            State::Ok
        } else {
            State::Next(StateName::HtmlFlowContinuation)
        }
    } else {
        reset(tokenizer);
        State::Nok
    }
}

pub fn complete_closing_tag_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.consume();
        State::Next(StateName::HtmlFlowCompleteClosingTagAfter)
    } else {
        State::Retry(StateName::HtmlFlowCompleteEnd)
    }
}

pub fn complete_attribute_name_before(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('/') => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteEnd)
        }
        Code::Char(':' | '_') => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeName)
        }
        code if is_ascii_alphabetic(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeName)
        }
        code if code.is_space_or_tab() => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeNameBefore)
        }
        _ => State::Retry(StateName::HtmlFlowCompleteEnd),
    }
}

pub fn complete_attribute_name(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('-' | '.' | ':' | '_') => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeName)
        }
        code if is_ascii_alphanumeric(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeName)
        }
        _ => State::Retry(StateName::HtmlFlowCompleteAttributeNameAfter),
    }
}

pub fn complete_attribute_name_after(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('=') => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeValueBefore)
        }
        code if code.is_space_or_tab() => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeNameAfter)
        }
        _ => State::Retry(StateName::HtmlFlowCompleteAttributeNameBefore),
    }
}

pub fn complete_attribute_value_before(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => {
            reset(tokenizer);
            State::Nok
        }
        Code::Char('<' | '=' | '>' | '`') => {
            reset(tokenizer);
            State::Nok
        }
        Code::Char(quote @ ('"' | '\'')) => {
            tokenizer.tokenize_state.marker_b = quote;
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeValueQuoted)
        }
        code if code.is_space_or_tab() => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeValueBefore)
        }
        _ => State::Retry(StateName::HtmlFlowCompleteAttributeValueUnquoted),
    }
}

pub fn complete_attribute_value_quoted(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => {
            reset(tokenizer);
            State::Nok
        }
        Code::Char(char) if char == tokenizer.tokenize_state.marker_b => {
            tokenizer.tokenize_state.marker_b = '\0';
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeValueQuotedAfter)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeValueQuoted)
        }
    }
}

pub fn complete_attribute_value_unquoted(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_whitespace_or_eof() => {
            State::Retry(StateName::HtmlFlowCompleteAttributeNameAfter)
        }
        Code::Char('"' | '\'' | '/' | '<' | '=' | '>' | '`') => {
            State::Retry(StateName::HtmlFlowCompleteAttributeNameAfter)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAttributeValueUnquoted)
        }
    }
}

pub fn complete_attribute_value_quoted_after(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('/' | '>') => State::Retry(StateName::HtmlFlowCompleteAttributeNameBefore),
        code if code.is_space_or_tab() => {
            State::Retry(StateName::HtmlFlowCompleteAttributeNameBefore)
        }
        _ => {
            reset(tokenizer);
            State::Nok
        }
    }
}

pub fn complete_end(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        tokenizer.consume();
        State::Next(StateName::HtmlFlowCompleteAfter)
    } else {
        reset(tokenizer);
        State::Nok
    }
}

/// Only whitespace may follow a complete tag on its line.
pub fn complete_after(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending_or_eof() => continue_or_interrupt(tokenizer),
        code if code.is_space_or_tab() => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowCompleteAfter)
        }
        _ => {
            reset(tokenizer);
            State::Nok
        }
    }
}

pub fn continuation(tokenizer: &mut Tokenizer) -> State {
    let kind = kind(tokenizer);

    match tokenizer.current {
        Code::Char('-') if kind == COMMENT => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuationCommentInside)
        }
        Code::Char('<') if kind == RAW => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuationRawTagOpen)
        }
        Code::Char('>') if kind == DECLARATION => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuationClose)
        }
        Code::Char('?') if kind == INSTRUCTION => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuationDeclarationInside)
        }
        Code::Char(']') if kind == CDATA => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuationCdataInside)
        }
        code if code.is_line_ending() && (kind == BASIC || kind == COMPLETE) => {
            tokenizer.exit(Name::HtmlFlowData);
            tokenizer.check(
                State::Next(StateName::HtmlFlowContinuationAfter),
                State::Next(StateName::HtmlFlowContinuationStart),
            );
            State::Retry(StateName::HtmlFlowBlankLineBefore)
        }
        code if code.is_line_ending_or_eof() => {
            tokenizer.exit(Name::HtmlFlowData);
            State::Retry(StateName::HtmlFlowContinuationStart)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuation)
        }
    }
}

/// A lazy line, or the end, stops the block.
pub fn continuation_start(tokenizer: &mut Tokenizer) -> State {
    tokenizer.check(
        State::Next(StateName::HtmlFlowContinuationStartNonLazy),
        State::Next(StateName::HtmlFlowContinuationAfter),
    );
    State::Retry(StateName::NonLazyContinuationStart)
}

pub fn continuation_start_non_lazy(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::HtmlFlowContinuationBefore)
}

pub fn continuation_before(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        State::Retry(StateName::HtmlFlowContinuationStart)
    } else {
        tokenizer.enter(Name::HtmlFlowData);
        State::Retry(StateName::HtmlFlowContinuation)
    }
}

pub fn continuation_comment_inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') {
        tokenizer.consume();
        State::Next(StateName::HtmlFlowContinuationDeclarationInside)
    } else {
        State::Retry(StateName::HtmlFlowContinuation)
    }
}

pub fn continuation_raw_tag_open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('/') {
        tokenizer.tokenize_state.buffer.clear();
        tokenizer.consume();
        State::Next(StateName::HtmlFlowContinuationRawEndTag)
    } else {
        State::Retry(StateName::HtmlFlowContinuation)
    }
}

pub fn continuation_raw_end_tag(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('>') => {
            let name = tokenizer.tokenize_state.buffer.to_ascii_lowercase();
            tokenizer.tokenize_state.buffer.clear();

            if HTML_RAW_NAMES.contains(&name.as_str()) {
                tokenizer.consume();
                State::Next(StateName::HtmlFlowContinuationClose)
            } else {
                State::Retry(StateName::HtmlFlowContinuation)
            }
        }
        Code::Char(char)
            if char.is_ascii_alphabetic()
                && tokenizer.tokenize_state.buffer.len() < HTML_RAW_SIZE_MAX =>
        {
            tokenizer.tokenize_state.buffer.push(char);
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuationRawEndTag)
        }
        _ => {
            tokenizer.tokenize_state.buffer.clear();
            State::Retry(StateName::HtmlFlowContinuation)
        }
    }
}

pub fn continuation_cdata_inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(']') {
        tokenizer.consume();
        State::Next(StateName::HtmlFlowContinuationDeclarationInside)
    } else {
        State::Retry(StateName::HtmlFlowContinuation)
    }
}

pub fn continuation_declaration_inside(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('>') => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuationClose)
        }
        Code::Char('-') if kind(tokenizer) == COMMENT => {
            tokenizer.consume();
            State::Next(StateName::HtmlFlowContinuationDeclarationInside)
        }
        _ => State::Retry(StateName::HtmlFlowContinuation),
    }
}

/// The end marker was seen: the rest of the line still belongs to the block.
pub fn continuation_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_line_ending_or_eof() {
        tokenizer.exit(Name::HtmlFlowData);
        State::Retry(StateName::HtmlFlowContinuationAfter)
    } else {
        tokenizer.consume();
        State::Next(StateName::HtmlFlowContinuationClose)
    }
}

pub fn continuation_after(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::HtmlFlow);
    reset(tokenizer);
    State::Ok
}

pub fn blank_line_before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::BlankLineStart)
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.size_c = 0;
    tokenizer.tokenize_state.marker_b = '\0';
    tokenizer.tokenize_state.seen = false;
    tokenizer.tokenize_state.buffer.clear();
}

/// Start the block at its line prefix, so indentation is kept verbatim.
pub fn resolve(tokenizer: &mut Tokenizer) {
    let events = &tokenizer.events;
    let Some(enter) = events
        .iter()
        .rposition(|event| event.is_enter() && event.name == Name::HtmlFlow)
    else {
        return;
    };

    if enter >= 2
        && events[enter - 1].is_exit()
        && events[enter - 1].name == Name::LinePrefix
        && events[enter - 2].name == Name::LinePrefix
    {
        let point = events[enter - 2].point.clone();
        tokenizer.events[enter].point = point.clone();
        tokenizer.events[enter + 1].point = point;
        tokenizer.map.add(enter - 2, 2, vec![]);
    }
}
