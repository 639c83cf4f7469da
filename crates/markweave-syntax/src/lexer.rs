//! # Lexer - Preprocessing Markdown Source
//!
//! The first stage of parsing: raw input text is split by a [Logos] lexer
//! into runs of plain characters and the handful of characters the
//! tokenizer needs to see as sentinel codes.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Chunks and Codes
//!
//! The output is a flat list of [`Chunk`]s. A chunk is either a run of
//! literal text or a single [`Code`]:
//!
//! ```text
//! "a\tb\r\n" → [Text("a"), HorizontalTab, VirtualSpace, VirtualSpace,
//!              Text("b"), CarriageReturnLineFeed, Eof]
//! ```
//!
//! - `\r`, `\n` and `\r\n` each become exactly one line ending code.
//! - A tab becomes a [`Code::HorizontalTab`] followed by
//!   [`Code::VirtualSpace`]s up to the next tab stop (every 4 columns).
//! - A leading byte order mark is dropped.
//! - NUL becomes U+FFFD.
//!
//! ## Streaming
//!
//! [`Preprocessor::write`] can be called repeatedly. The column is carried
//! across calls so tab stops stay correct, and a `\r` at the end of one write
//! is held back in case the next write starts with `\n`.
//! [`Preprocessor::end`] closes the stream with a single [`Code::Eof`].

use logos::Logos;

/// A sentinel or character code, as seen by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    Char(char),
    CarriageReturn,
    LineFeed,
    CarriageReturnLineFeed,
    HorizontalTab,
    VirtualSpace,
    Eof,
}

impl Code {
    /// Whether this is one of the line ending variants.
    pub fn is_line_ending(self) -> bool {
        matches!(
            self,
            Code::CarriageReturn | Code::LineFeed | Code::CarriageReturnLineFeed
        )
    }

    /// Whether this is a line ending or the end of input.
    pub fn is_line_ending_or_eof(self) -> bool {
        self == Code::Eof || self.is_line_ending()
    }

    /// Space, tab, or tab filler.
    pub fn is_space_or_tab(self) -> bool {
        matches!(
            self,
            Code::Char(' ') | Code::HorizontalTab | Code::VirtualSpace
        )
    }

    /// Space, tab, line ending, or end of input.
    pub fn is_whitespace_or_eof(self) -> bool {
        self.is_space_or_tab() || self.is_line_ending_or_eof()
    }

    /// The character, if this is a plain character code.
    pub fn char(self) -> Option<char> {
        match self {
            Code::Char(char) => Some(char),
            _ => None,
        }
    }

    /// Character used to key construct tables.
    ///
    /// Tabs key as `\t`, tab fillers as a space and line endings as `\n`.
    pub fn key(self) -> Option<char> {
        match self {
            Code::Char(char) => Some(char),
            Code::HorizontalTab => Some('\t'),
            Code::VirtualSpace => Some(' '),
            Code::CarriageReturn | Code::LineFeed | Code::CarriageReturnLineFeed => Some('\n'),
            Code::Eof => None,
        }
    }
}

/// One unit of the preprocessed stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Text(String),
    Code(Code),
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
enum RawKind {
    #[token("\r\n")]
    CarriageReturnLineFeed,

    #[token("\r")]
    CarriageReturn,

    #[token("\n")]
    LineFeed,

    #[token("\t")]
    Tab,

    #[token("\u{0}")]
    Nul,

    #[regex(r"[^\r\n\t\x00]+")]
    Text,
}

const TAB_SIZE: usize = 4;

/// Streaming preprocessor from raw text to [`Chunk`]s.
#[derive(Debug)]
pub struct Preprocessor {
    column: usize,
    held_carriage_return: bool,
    started: bool,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            column: 1,
            held_carriage_return: false,
            started: false,
        }
    }

    /// Preprocess one piece of input.
    pub fn write(&mut self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut text = text;

        if !self.started && !text.is_empty() {
            self.started = true;
            text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        }

        if self.held_carriage_return {
            if text.is_empty() {
                return chunks;
            }

            self.held_carriage_return = false;

            if let Some(rest) = text.strip_prefix('\n') {
                self.line_ending(&mut chunks, Code::CarriageReturnLineFeed);
                text = rest;
            } else {
                self.line_ending(&mut chunks, Code::CarriageReturn);
            }
        }

        let mut lexer = RawKind::lexer(text);

        while let Some(result) = lexer.next() {
            let slice = lexer.slice();

            match result {
                Ok(RawKind::CarriageReturnLineFeed) => {
                    self.line_ending(&mut chunks, Code::CarriageReturnLineFeed);
                }
                Ok(RawKind::CarriageReturn) => {
                    if lexer.span().end == text.len() {
                        self.held_carriage_return = true;
                    } else {
                        self.line_ending(&mut chunks, Code::CarriageReturn);
                    }
                }
                Ok(RawKind::LineFeed) => self.line_ending(&mut chunks, Code::LineFeed),
                Ok(RawKind::Tab) => self.tab(&mut chunks),
                Ok(RawKind::Nul) => {
                    self.text(&mut chunks, "\u{FFFD}");
                }
                Ok(RawKind::Text) | Err(()) => self.text(&mut chunks, slice),
            }
        }

        chunks
    }

    /// Close the stream.
    pub fn end(mut self) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        if self.held_carriage_return {
            self.line_ending(&mut chunks, Code::CarriageReturn);
        }

        chunks.push(Chunk::Code(Code::Eof));
        chunks
    }

    fn line_ending(&mut self, chunks: &mut Vec<Chunk>, code: Code) {
        chunks.push(Chunk::Code(code));
        self.column = 1;
    }

    fn tab(&mut self, chunks: &mut Vec<Chunk>) {
        let next = self.column.div_ceil(TAB_SIZE) * TAB_SIZE;
        chunks.push(Chunk::Code(Code::HorizontalTab));

        while self.column < next {
            chunks.push(Chunk::Code(Code::VirtualSpace));
            self.column += 1;
        }

        self.column += 1;
    }

    fn text(&mut self, chunks: &mut Vec<Chunk>, slice: &str) {
        self.column += slice.chars().count();

        if let Some(Chunk::Text(previous)) = chunks.last_mut() {
            previous.push_str(slice);
        } else {
            chunks.push(Chunk::Text(slice.to_string()));
        }
    }
}

/// Preprocess a whole document in one go.
pub fn preprocess(input: &str) -> Vec<Chunk> {
    let mut preprocessor = Preprocessor::new();
    let mut chunks = preprocessor.write(input);
    chunks.extend(preprocessor.end());
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> Chunk {
        Chunk::Text(value.to_string())
    }

    fn code(code: Code) -> Chunk {
        Chunk::Code(code)
    }

    #[test]
    fn preprocess_empty_input() {
        assert_eq!(preprocess(""), vec![code(Code::Eof)]);
    }

    #[test]
    fn preprocess_plain_text() {
        assert_eq!(preprocess("hello"), vec![text("hello"), code(Code::Eof)]);
    }

    #[test]
    fn preprocess_line_endings() {
        assert_eq!(
            preprocess("a\nb\r\nc\rd"),
            vec![
                text("a"),
                code(Code::LineFeed),
                text("b"),
                code(Code::CarriageReturnLineFeed),
                text("c"),
                code(Code::CarriageReturn),
                text("d"),
                code(Code::Eof),
            ]
        );
    }

    #[test]
    fn preprocess_tab_at_line_start_fills_to_column_five() {
        assert_eq!(
            preprocess("\ta"),
            vec![
                code(Code::HorizontalTab),
                code(Code::VirtualSpace),
                code(Code::VirtualSpace),
                code(Code::VirtualSpace),
                text("a"),
                code(Code::Eof),
            ]
        );
    }

    #[test]
    fn preprocess_tab_after_text_fills_to_next_stop() {
        assert_eq!(
            preprocess("ab\tc"),
            vec![
                text("ab"),
                code(Code::HorizontalTab),
                code(Code::VirtualSpace),
                text("c"),
                code(Code::Eof),
            ]
        );
    }

    #[test]
    fn preprocess_tab_at_stop_has_no_filler() {
        assert_eq!(
            preprocess("abc\td"),
            vec![
                text("abc"),
                code(Code::HorizontalTab),
                text("d"),
                code(Code::Eof),
            ]
        );
    }

    #[test]
    fn preprocess_strips_bom_and_replaces_nul() {
        assert_eq!(
            preprocess("\u{FEFF}a\u{0}b"),
            vec![text("a\u{FFFD}b"), code(Code::Eof)]
        );
    }

    #[test]
    fn preprocess_bom_only_stripped_at_start() {
        let mut preprocessor = Preprocessor::new();
        let mut chunks = preprocessor.write("a");
        chunks.extend(preprocessor.write("\u{FEFF}"));
        chunks.extend(preprocessor.end());

        assert_eq!(chunks, vec![text("a"), text("\u{FEFF}"), code(Code::Eof)]);
    }

    #[test]
    fn empty_write_does_not_start_the_stream() {
        let mut preprocessor = Preprocessor::new();
        let mut chunks = preprocessor.write("");
        chunks.extend(preprocessor.write("\u{FEFF}a"));
        chunks.extend(preprocessor.end());

        assert_eq!(chunks, vec![text("a"), code(Code::Eof)]);
    }

    #[test]
    fn streaming_carries_column_across_writes() {
        let mut preprocessor = Preprocessor::new();
        let mut chunks = preprocessor.write("ab");
        chunks.extend(preprocessor.write("\tc"));
        chunks.extend(preprocessor.end());

        assert_eq!(
            chunks,
            vec![
                text("ab"),
                code(Code::HorizontalTab),
                code(Code::VirtualSpace),
                text("c"),
                code(Code::Eof),
            ]
        );
    }

    #[test]
    fn streaming_joins_split_crlf() {
        let mut preprocessor = Preprocessor::new();
        let mut chunks = preprocessor.write("a\r");
        chunks.extend(preprocessor.write("\nb"));
        chunks.extend(preprocessor.end());

        assert_eq!(
            chunks,
            vec![
                text("a"),
                code(Code::CarriageReturnLineFeed),
                text("b"),
                code(Code::Eof),
            ]
        );
    }

    #[test]
    fn streaming_flushes_trailing_cr_at_end() {
        let mut preprocessor = Preprocessor::new();
        let mut chunks = preprocessor.write("a\r");
        chunks.extend(preprocessor.end());

        assert_eq!(
            chunks,
            vec![text("a"), code(Code::CarriageReturn), code(Code::Eof)]
        );
    }

    #[test]
    fn exactly_one_eof() {
        let chunks = preprocess("a\n\tb\r\n");
        let eofs = chunks
            .iter()
            .filter(|chunk| **chunk == Chunk::Code(Code::Eof))
            .count();
        assert_eq!(eofs, 1);
        assert_eq!(chunks.last(), Some(&code(Code::Eof)));
    }
}
