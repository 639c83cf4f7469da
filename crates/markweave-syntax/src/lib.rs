//! # markweave-syntax
//!
//! A markdown tokenizer in the micromark model, and a compiler from its
//! events to a typed document tree.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Preprocessor → Chunks → Tokenizer → Events → Resolvers → Compiler → mdast
//!               (Logos)                 (states)             (rewrites)
//! ```
//!
//! ### 1. Preprocessor ([`lexer`] module)
//!
//! Splits input into text runs and sentinel codes for line endings, tabs
//! (with their virtual-space filler) and the end of input.
//!
//! ### 2. Tokenizer ([`tokenizer`], [`state`], [`construct`] modules)
//!
//! A trampoline over named states. Each [`construct`] is a small state
//! machine; which ones are tried at a code is decided by declarative tables.
//! `attempt` and `check` restore by truncating the event list.
//!
//! The document tokenizer drives containers line by line and feeds the rest
//! of each line to a flow tokenizer. Paragraph and string spans are linked
//! placeholders, expanded later by [`subtokenize`].
//!
//! ### 3. Resolvers ([`resolve`] module)
//!
//! Rewrite passes over the events: attention pairing, label matching, data
//! merging, list grouping.
//!
//! ### 4. Compiler ([`compiler`] module)
//!
//! Walks the final events into an [`mdast::Node`] tree.
//!
//! ## Quick Start
//!
//! ```
//! use markweave_syntax::{ParseOptions, mdast::Node, to_mdast};
//!
//! let tree = to_mdast("# Hello\n", &ParseOptions::default()).unwrap();
//!
//! let Node::Root(root) = tree else { unreachable!() };
//! assert_eq!(root.children[0].type_name(), "heading");
//! assert_eq!(root.children[0].text_content(), "Hello");
//! ```

pub mod compiler;
pub mod construct;
pub mod event;
pub mod lexer;
pub mod mdast;
pub mod message;
pub mod parser;
pub mod resolve;
pub mod state;
pub mod subtokenize;
pub mod tokenizer;
pub mod util;

use log::debug;

pub use construct::{ConstructName, Extension, Placement, Table};
pub use message::Message;
pub use parser::{parse, parse_chunks};

/// What to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Extra table entries, applied in order.
    pub extensions: Vec<Extension>,
    /// Constructs removed from every table.
    pub disable: Vec<ConstructName>,
}

impl ParseOptions {
    /// CommonMark with the GFM extension.
    pub fn gfm() -> Self {
        ParseOptions {
            extensions: vec![Extension::gfm()],
            disable: Vec::new(),
        }
    }
}

/// Parse `value` into a document tree.
pub fn to_mdast(value: &str, options: &ParseOptions) -> Result<mdast::Node, Message> {
    let (events, parse_state) = parse(value, options)?;
    debug!("to_mdast: {} events", events.len());
    compiler::compile(&events, &parse_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdast::Node;
    use pretty_assertions::assert_eq;

    fn types(input: &str, options: &ParseOptions) -> Vec<&'static str> {
        match to_mdast(input, options).unwrap() {
            Node::Root(root) => root.children.iter().map(Node::type_name).collect(),
            node => panic!("expected a root, found {node:?}"),
        }
    }

    #[test]
    fn empty_document() {
        assert_eq!(types("", &ParseOptions::default()), Vec::<&str>::new());
    }

    #[test]
    fn blocks_in_order() {
        let input = "# a\n\n> b\n\n- c\n\n***\n\n```\nd\n```\n\n    e\n\n<div>\n\n[f]: g";
        assert_eq!(
            types(input, &ParseOptions::default()),
            vec![
                "heading",
                "blockquote",
                "list",
                "thematicBreak",
                "code",
                "code",
                "html",
                "definition",
            ]
        );
    }

    #[test]
    fn gfm_is_opt_in() {
        let input = "| a |\n| - |";
        assert_eq!(types(input, &ParseOptions::default()), vec!["paragraph"]);
        assert_eq!(types(input, &ParseOptions::gfm()), vec!["table"]);
    }

    #[test]
    fn disabled_indented_code_is_a_paragraph() {
        let options = ParseOptions {
            disable: vec![ConstructName::CodeIndented],
            ..ParseOptions::default()
        };
        assert_eq!(types("    a", &options), vec!["paragraph"]);
    }
}
