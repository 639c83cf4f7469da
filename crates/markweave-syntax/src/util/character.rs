//! Character classes used around attention runs and autolinks.

use crate::lexer::Code;

/// How a character behaves next to an attention sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterKind {
    Whitespace,
    Punctuation,
    Other,
}

/// Classify the code before or after an attention sequence.
///
/// Line endings, the start and the end of input count as whitespace.
pub fn classify(code: Code) -> CharacterKind {
    match code {
        Code::Char(char) if char.is_whitespace() => CharacterKind::Whitespace,
        Code::Char(char) if is_punctuation(char) => CharacterKind::Punctuation,
        Code::Char(_) => CharacterKind::Other,
        _ => CharacterKind::Whitespace,
    }
}

/// ASCII or Unicode punctuation and symbols.
pub fn is_punctuation(char: char) -> bool {
    char.is_ascii_punctuation()
        || (!char.is_ascii()
            && !char.is_alphanumeric()
            && !char.is_whitespace()
            && !char.is_control())
}

pub fn is_ascii_alphanumeric(code: Code) -> bool {
    code.char().is_some_and(|char| char.is_ascii_alphanumeric())
}

pub fn is_ascii_alphabetic(code: Code) -> bool {
    code.char().is_some_and(|char| char.is_ascii_alphabetic())
}

pub fn is_ascii_digit(code: Code) -> bool {
    code.char().is_some_and(|char| char.is_ascii_digit())
}

pub fn is_ascii_hexdigit(code: Code) -> bool {
    code.char().is_some_and(|char| char.is_ascii_hexdigit())
}

pub fn is_ascii_punctuation(code: Code) -> bool {
    code.char().is_some_and(|char| char.is_ascii_punctuation())
}

/// ASCII control characters, which end raw destinations.
pub fn is_ascii_control(code: Code) -> bool {
    code.char().is_some_and(|char| char.is_ascii_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Code::Char(' '), CharacterKind::Whitespace)]
    #[case(Code::LineFeed, CharacterKind::Whitespace)]
    #[case(Code::Eof, CharacterKind::Whitespace)]
    #[case(Code::HorizontalTab, CharacterKind::Whitespace)]
    #[case(Code::Char('*'), CharacterKind::Punctuation)]
    #[case(Code::Char('“'), CharacterKind::Punctuation)]
    #[case(Code::Char('a'), CharacterKind::Other)]
    #[case(Code::Char('é'), CharacterKind::Other)]
    fn classifies_codes(#[case] code: Code, #[case] expected: CharacterKind) {
        assert_eq!(classify(code), expected);
    }
}
