//! # Autolinks
//!
//! ```markdown
//! <https://example.com>  <user@example.com>
//! ```
//!
//! A scheme of 2 to 32 characters followed by `:` makes a URL; anything
//! without whitespace or `<` may follow, up to `>`. Otherwise the content
//! must be an email address. Both start as [`Name::AutolinkProtocol`]; an
//! email is renamed when it is complete.

use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::{AUTOLINK_DOMAIN_SIZE_MAX, AUTOLINK_SCHEME_SIZE_MAX};

fn is_atext(code: Code) -> bool {
    matches!(
        code,
        Code::Char(
            '!' | '#'..='\'' | '*' | '+' | '-' | '.' | '/' | '0'..='9' | '=' | '?' | 'A'..='Z'
                | '^'..='~'
        )
    )
}

fn is_scheme_char(code: Code) -> bool {
    matches!(code, Code::Char(char) if char.is_ascii_alphanumeric() || matches!(char, '+' | '-' | '.'))
}

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('<') {
        return State::Nok;
    }

    tokenizer.enter(Name::Autolink);
    tokenizer.enter(Name::AutolinkMarker);
    tokenizer.consume();
    tokenizer.exit(Name::AutolinkMarker);
    tokenizer.enter(Name::AutolinkProtocol);
    State::Next(StateName::AutolinkOpen)
}

pub fn open(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(char) if char.is_ascii_alphabetic() => {
            tokenizer.consume();
            State::Next(StateName::AutolinkSchemeOrEmailAtext)
        }
        Code::Char('@') => State::Nok,
        code if is_atext(code) => State::Retry(StateName::AutolinkEmailAtext),
        _ => State::Nok,
    }
}

pub fn scheme_or_email_atext(tokenizer: &mut Tokenizer) -> State {
    if is_scheme_char(tokenizer.current) {
        tokenizer.tokenize_state.size = 1;
        State::Retry(StateName::AutolinkSchemeInsideOrEmailAtext)
    } else {
        State::Retry(StateName::AutolinkEmailAtext)
    }
}

pub fn scheme_inside_or_email_atext(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char(':') => {
            tokenizer.consume();
            tokenizer.tokenize_state.size = 0;
            State::Next(StateName::AutolinkUrlInside)
        }
        code if is_scheme_char(code) && tokenizer.tokenize_state.size < AUTOLINK_SCHEME_SIZE_MAX => {
            tokenizer.consume();
            tokenizer.tokenize_state.size += 1;
            State::Next(StateName::AutolinkSchemeInsideOrEmailAtext)
        }
        _ => {
            tokenizer.tokenize_state.size = 0;
            State::Retry(StateName::AutolinkEmailAtext)
        }
    }
}

pub fn url_inside(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('>') => {
            tokenizer.exit(Name::AutolinkProtocol);
            State::Retry(StateName::AutolinkEnd)
        }
        Code::Char('<') => State::Nok,
        Code::Char(char) if char.is_ascii_control() || char == ' ' => State::Nok,
        Code::Char(_) => {
            tokenizer.consume();
            State::Next(StateName::AutolinkUrlInside)
        }
        _ => State::Nok,
    }
}

pub fn email_atext(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('@') => {
            tokenizer.consume();
            State::Next(StateName::AutolinkEmailAtSignOrDot)
        }
        code if is_atext(code) => {
            tokenizer.consume();
            State::Next(StateName::AutolinkEmailAtext)
        }
        _ => State::Nok,
    }
}

pub fn email_at_sign_or_dot(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current.char().is_some_and(|char| char.is_ascii_alphanumeric()) {
        State::Retry(StateName::AutolinkEmailValue)
    } else {
        State::Nok
    }
}

pub fn email_label(tokenizer: &mut Tokenizer) -> State {
    match tokenizer.current {
        Code::Char('.') => {
            tokenizer.tokenize_state.size = 0;
            tokenizer.consume();
            State::Next(StateName::AutolinkEmailAtSignOrDot)
        }
        Code::Char('>') => {
            tokenizer.tokenize_state.size = 0;
            if let Some(enter) = tokenizer
                .events
                .iter()
                .rposition(|event| event.is_enter() && event.name == Name::AutolinkProtocol)
            {
                tokenizer.events[enter].name = Name::AutolinkEmail;
            }
            tokenizer.stack.pop();
            tokenizer.stack.push(Name::AutolinkEmail);
            tokenizer.exit(Name::AutolinkEmail);
            State::Retry(StateName::AutolinkEnd)
        }
        _ => State::Retry(StateName::AutolinkEmailValue),
    }
}

pub fn email_value(tokenizer: &mut Tokenizer) -> State {
    let code = tokenizer.current;
    let allowed = code == Code::Char('-') || code.char().is_some_and(|char| char.is_ascii_alphanumeric());

    if allowed && tokenizer.tokenize_state.size < AUTOLINK_DOMAIN_SIZE_MAX {
        tokenizer.tokenize_state.size += 1;
        tokenizer.consume();
        if code == Code::Char('-') {
            State::Next(StateName::AutolinkEmailValue)
        } else {
            State::Next(StateName::AutolinkEmailLabel)
        }
    } else {
        tokenizer.tokenize_state.size = 0;
        State::Nok
    }
}

pub fn end(tokenizer: &mut Tokenizer) -> State {
    tokenizer.enter(Name::AutolinkMarker);
    tokenizer.consume();
    tokenizer.exit(Name::AutolinkMarker);
    tokenizer.exit(Name::Autolink);
    State::Ok
}
