//! # HTML (text)
//!
//! Inline tags, comments, processing instructions, declarations and CDATA:
//!
//! ```markdown
//! a <span class="x">b</span> <!-- c --> <?d?> <!E> <![CDATA[f]]>
//! ```
//!
//! Line endings are allowed inside; each one ends the current
//! [`Name::HtmlTextData`], and data resumes after the next line's
//! indentation.

use crate::construct::partial_space_or_tab::space_or_tab;
use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::HTML_CDATA_PREFIX;

fn is_alpha(code: Code) -> bool {
    code.char().is_some_and(|char| char.is_ascii_alphabetic())
}

/// Ends a tag name or attribute.
fn is_tag_break(code: Code) -> bool {
    code.is_line_ending() || code.is_space_or_tab() || matches!(code, Code::Char('/' | '>'))
}

/// Continue at `state` after a line ending inside the HTML.
fn line_ending(tokenizer: &mut Tokenizer, state: StateName) -> State {
    tokenizer.attempt(State::Next(state), State::Nok);
    State::Retry(StateName::HtmlTextLineEndingBefore)
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('<') {
        return State::Nok;
    }

    tokenizer.enter(Name::HtmlText);
    tokenizer.enter(Name::HtmlTextData);
    tokenizer.consume();
    State::Next(StateName::HtmlTextOpen)
}

pub fn open(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('!') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextDeclarationOpen)
        }
        Code::Char('/') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagCloseStart)
        }
        Code::Char('?') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextInstruction)
        }
        code if is_alpha(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpen)
        }
        _ => State::Nok,
    }
}

pub fn declaration_open(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('-') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCommentOpenInside)
        }
        Code::Char('[') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCdataOpenInside)
        }
        code if is_alpha(code) => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextDeclaration)
        }
        _ => State::Nok,
    }
}

pub fn comment_open_inside(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') {
        tokenizer.consume();
        State::Next(StateName::HtmlTextCommentEnd)
    } else {
        State::Nok
    }
}

pub fn comment(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Nok,
        code if code.is_line_ending() => line_ending(tokenizer, StateName::HtmlTextComment),
        Code::Char('-') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCommentClose)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextComment)
        }
    }
}

pub fn comment_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('-') {
        tokenizer.consume();
        State::Next(StateName::HtmlTextCommentEnd)
    } else {
        State::Retry(StateName::HtmlTextComment)
    }
}

/// After `--`: `>` closes, so `<!-->` and `<!--->` are comments too.
pub fn comment_end(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('>') => State::Retry(StateName::HtmlTextEnd),
        Code::Char('-') => State::Retry(StateName::HtmlTextCommentClose),
        _ => State::Retry(StateName::HtmlTextComment),
    }
}

pub fn cdata_open_inside(tokenizer: &mut Tokenizer) -> State {
    let expected = HTML_CDATA_PREFIX.chars().nth(tokenizer.tokenize_state.size);

    if expected.is_some() && tokenizer.current.char() == expected {
        tokenizer.consume();
        tokenizer.tokenize_state.size += 1;

        if tokenizer.tokenize_state.size == HTML_CDATA_PREFIX.len() {
            tokenizer.tokenize_state.size = 0;
            State::Next(StateName::HtmlTextCdata)
        } else {
            State::Next(StateName::HtmlTextCdataOpenInside)
        }
    } else {
        tokenizer.tokenize_state.size = 0;
        State::Nok
    }
}

pub fn cdata(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Nok,
        code if code.is_line_ending() => line_ending(tokenizer, StateName::HtmlTextCdata),
        Code::Char(']') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCdataClose)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextCdata)
        }
    }
}

pub fn cdata_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char(']') {
        tokenizer.consume();
        State::Next(StateName::HtmlTextCdataEnd)
    } else {
        State::Retry(StateName::HtmlTextCdata)
    }
}

pub fn cdata_end(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('>') => State::Retry(StateName::HtmlTextEnd),
        Code::Char(']') => State::Retry(StateName::HtmlTextCdataClose),
        _ => State::Retry(StateName::HtmlTextCdata),
    }
}

pub fn declaration(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof | Code::Char('>') => State::Retry(StateName::HtmlTextEnd),
        code if code.is_line_ending() => line_ending(tokenizer, StateName::HtmlTextDeclaration),
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextDeclaration)
        }
    }
}

pub fn instruction(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof => State::Nok,
        code if code.is_line_ending() => line_ending(tokenizer, StateName::HtmlTextInstruction),
        Code::Char('?') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextInstructionClose)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextInstruction)
        }
    }
}

pub fn instruction_close(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        State::Retry(StateName::HtmlTextEnd)
    } else {
        State::Retry(StateName::HtmlTextInstruction)
    }
}

pub fn tag_close_start(tokenizer: &mut Tokenizer) -> State {
    if is_alpha(tokenizer.current) {
        tokenizer.consume();
        State::Next(StateName::HtmlTextTagClose)
    } else {
        State::Nok
    }
}

pub fn tag_close(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if char == '-' || char.is_ascii_alphanumeric() => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagClose)
        }
        _ => State::Retry(StateName::HtmlTextTagCloseBetween),
    }
}

pub fn tag_close_between(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending() => line_ending(tokenizer, StateName::HtmlTextTagCloseBetween),
        code if code.is_space_or_tab() => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagCloseBetween)
        }
        _ => State::Retry(StateName::HtmlTextEnd),
    }
}

pub fn tag_open(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if char == '-' || char.is_ascii_alphanumeric() => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpen)
        }
        code if is_tag_break(code) => State::Retry(StateName::HtmlTextTagOpenBetween),
        _ => State::Nok,
    }
}

pub fn tag_open_between(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending() => line_ending(tokenizer, StateName::HtmlTextTagOpenBetween),
        code if code.is_space_or_tab() => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenBetween)
        }
        Code::Char('/') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextEnd)
        }
        Code::Char(char) if char == ':' || char == '_' || char.is_ascii_alphabetic() => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeName)
        }
        _ => State::Retry(StateName::HtmlTextEnd),
    }
}

pub fn tag_open_attribute_name(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if matches!(char, '-' | '.' | ':' | '_') || char.is_ascii_alphanumeric() => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeName)
        }
        _ => State::Retry(StateName::HtmlTextTagOpenAttributeNameAfter),
    }
}

pub fn tag_open_attribute_name_after(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        code if code.is_line_ending() => {
            line_ending(tokenizer, StateName::HtmlTextTagOpenAttributeNameAfter)
        }
        code if code.is_space_or_tab() => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeNameAfter)
        }
        Code::Char('=') => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueBefore)
        }
        _ => State::Retry(StateName::HtmlTextTagOpenBetween),
    }
}

pub fn tag_open_attribute_value_before(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof | Code::Char('<' | '=' | '>' | '`') => State::Nok,
        code if code.is_line_ending() => {
            line_ending(tokenizer, StateName::HtmlTextTagOpenAttributeValueBefore)
        }
        code if code.is_space_or_tab() => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueBefore)
        }
        Code::Char(quote @ ('"' | '\'')) => {
            tokenizer.tokenize_state.marker = quote;
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueQuoted)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueUnquoted)
        }
    }
}

pub fn tag_open_attribute_value_quoted(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if char == tokenizer.tokenize_state.marker => {
            tokenizer.tokenize_state.marker = '\0';
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueQuotedAfter)
        }
        Code::Eof => {
            tokenizer.tokenize_state.marker = '\0';
            State::Nok
        }
        code if code.is_line_ending() => {
            line_ending(tokenizer, StateName::HtmlTextTagOpenAttributeValueQuoted)
        }
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueQuoted)
        }
    }
}

pub fn tag_open_attribute_value_unquoted(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Eof | Code::Char('"' | '\'' | '<' | '=' | '`') => State::Nok,
        code if is_tag_break(code) => State::Retry(StateName::HtmlTextTagOpenBetween),
        _ => {
            tokenizer.consume();
            State::Next(StateName::HtmlTextTagOpenAttributeValueUnquoted)
        }
    }
}

pub fn tag_open_attribute_value_quoted_after(tokenizer: &mut Tokenizer) -> State {
    if is_tag_break(tokenizer.current) {
        State::Retry(StateName::HtmlTextTagOpenBetween)
    } else {
        State::Nok
    }
}

pub fn end(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('>') {
        tokenizer.consume();
        tokenizer.exit(Name::HtmlTextData);
        tokenizer.exit(Name::HtmlText);
        State::Ok
    } else {
        State::Nok
    }
}

pub fn line_ending_before(tokenizer: &mut Tokenizer) -> State {
    tokenizer.exit(Name::HtmlTextData);
    tokenizer.enter(Name::LineEnding);
    tokenizer.consume();
    tokenizer.exit(Name::LineEnding);
    State::Next(StateName::HtmlTextLineEndingAfter)
}

pub fn line_ending_after(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.is_space_or_tab() {
        tokenizer.attempt(State::Next(StateName::HtmlTextLineEndingAfterPrefix), State::Nok);
        State::Retry(space_or_tab(tokenizer))
    } else {
        State::Retry(StateName::HtmlTextLineEndingAfterPrefix)
    }
}

pub fn line_ending_after_prefix(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::HtmlTextData);
    State::Ok
}
