//! Character references: `&amp;`, `&#35;`, `&#x1F600;`.
//!
//! Named references must be known HTML entities. Numeric ones are limited
//! to seven decimal or six hexadecimal digits; invalid code points are
//! replaced when the value is decoded.

use crate::event::Name;
use crate::lexer::Code;
use crate::state::{State, StateName};
use crate::tokenizer::Tokenizer;
use crate::util::constant::{
    CHARACTER_REFERENCE_DECIMAL_SIZE_MAX, CHARACTER_REFERENCE_HEXADECIMAL_SIZE_MAX,
    CHARACTER_REFERENCE_NAMED_SIZE_MAX,
};
use crate::util::decode::decode_named;

pub fn start(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current != Code::Char('&') {
        return State::Nok;
    }

    tokenizer.enter(Name::CharacterReference);
    tokenizer.enter(Name::CharacterReferenceMarker);
    tokenizer.consume();
    tokenizer.exit(Name::CharacterReferenceMarker);
    State::Next(StateName::CharacterReferenceOpen)
}

pub fn open(tokenizer: &mut Tokenizer) -> State {
    if tokenizer.current == Code::Char('#') {
        tokenizer.enter(Name::CharacterReferenceMarkerNumeric);
        tokenizer.consume();
        tokenizer.exit(Name::CharacterReferenceMarkerNumeric);
        State::Next(StateName::CharacterReferenceNumeric)
    } else {
        tokenizer.tokenize_state.marker = '&';
        tokenizer.enter(Name::CharacterReferenceValue);
        State::Retry(StateName::CharacterReferenceValue)
    }
}

pub fn numeric(tokenizer: &mut Tokenizer) -> State {
    if let Code::Char('x' | 'X') = tokenizer.current {
        tokenizer.enter(Name::CharacterReferenceMarkerHexadecimal);
        tokenizer.consume();
        tokenizer.exit(Name::CharacterReferenceMarkerHexadecimal);
        tokenizer.enter(Name::CharacterReferenceValue);
        tokenizer.tokenize_state.marker = 'x';
        State::Next(StateName::CharacterReferenceValue)
    } else {
        tokenizer.enter(Name::CharacterReferenceValue);
        tokenizer.tokenize_state.marker = '#';
        State::Retry(StateName::CharacterReferenceValue)
    }
}

pub fn value(tokenizer: &mut Tokenizer) -> State {
    let marker = tokenizer.tokenize_state.marker;
    let size = tokenizer.tokenize_state.size;

    if tokenizer.current == Code::Char(';') && size > 0 {
        if marker == '&' && decode_named(&tokenizer.tokenize_state.buffer).is_none() {
            reset(tokenizer);
            return State::Nok;
        }

        tokenizer.exit(Name::CharacterReferenceValue);
        tokenizer.enter(Name::CharacterReferenceMarkerSemi);
        tokenizer.consume();
        tokenizer.exit(Name::CharacterReferenceMarkerSemi);
        tokenizer.exit(Name::CharacterReference);
        reset(tokenizer);
        return State::Ok;
    }

    let (allowed, max) = match (marker, tokenizer.current) {
        ('&', Code::Char(char)) => (char.is_ascii_alphanumeric(), CHARACTER_REFERENCE_NAMED_SIZE_MAX),
        ('x', Code::Char(char)) => (char.is_ascii_hexdigit(), CHARACTER_REFERENCE_HEXADECIMAL_SIZE_MAX),
        (_, Code::Char(char)) => (char.is_ascii_digit(), CHARACTER_REFERENCE_DECIMAL_SIZE_MAX),
        _ => (false, 0),
    };

    if allowed && size < max {
        if let Code::Char(char) = tokenizer.current {
            tokenizer.tokenize_state.buffer.push(char);
        }
        tokenizer.tokenize_state.size += 1;
        tokenizer.consume();
        State::Next(StateName::CharacterReferenceValue)
    } else {
        reset(tokenizer);
        State::Nok
    }
}

fn reset(tokenizer: &mut Tokenizer) {
    tokenizer.tokenize_state.marker = '\0';
    tokenizer.tokenize_state.size = 0;
    tokenizer.tokenize_state.buffer.clear();
}
