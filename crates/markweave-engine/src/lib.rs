//! # markweave-engine
//!
//! Turns markdown into HTML: parse to a document tree, transform that into a
//! render tree of elements, then serialize.
//!
//! ```text
//! Source Text → markweave_syntax::to_mdast → to_hast → html::to_html → HTML
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use markweave_engine::{Options, to_html};
//!
//! let html = to_html("*hi*", &Options::default()).unwrap();
//! assert_eq!(html, "<p><em>hi</em></p>");
//! ```

pub mod hast;
pub mod html;
pub mod to_hast;

use log::debug;
use markweave_syntax::{Message, ParseOptions, mdast};
use thiserror::Error;

pub use to_hast::{Handler, RenderOptions, State};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to parse document: {0}")]
    Parse(#[from] Message),
    #[error("Document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Parse and render options together.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub parse: ParseOptions,
    pub render: RenderOptions,
}

impl Options {
    /// GFM parsing with default rendering.
    pub fn gfm() -> Self {
        Options {
            parse: ParseOptions::gfm(),
            render: RenderOptions::default(),
        }
    }
}

/// Parse `text` into a document tree.
pub fn to_mdast(text: &str, options: &Options) -> Result<mdast::Node, Error> {
    Ok(markweave_syntax::to_mdast(text, &options.parse)?)
}

/// Parse `text` and transform it into a render tree.
pub fn to_hast(text: &str, options: &Options) -> Result<hast::Node, Error> {
    let tree = to_mdast(text, options)?;
    Ok(to_hast::to_hast(&tree, &options.render))
}

/// Render `text` as HTML.
pub fn to_html(text: &str, options: &Options) -> Result<String, Error> {
    let tree = to_hast(text, options)?;
    let html = html::to_html(&tree);
    debug!("to_html: {} bytes in, {} bytes out", text.len(), html.len());
    Ok(html)
}

/// Render UTF-8 bytes as HTML.
pub fn to_html_from_bytes(bytes: &[u8], options: &Options) -> Result<String, Error> {
    to_html(std::str::from_utf8(bytes)?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("a", "<p>a</p>")]
    #[case("# a", "<h1>a</h1>")]
    #[case("a\n\nb", "<p>a</p>\n<p>b</p>")]
    #[case("***", "<hr>")]
    #[case("a  \nb", "<p>a<br>\nb</p>")]
    #[case("`a < b`", "<p><code>a &lt; b</code></p>")]
    #[case("> a", "<blockquote>\n<p>a</p>\n</blockquote>")]
    #[case("![a](b.png \"c\")", "<p><img src=\"b.png\" alt=\"a\" title=\"c\"></p>")]
    #[case("[a](<b c>)", "<p><a href=\"b%20c\">a</a></p>")]
    fn renders_commonmark(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_html(input, &Options::default()).unwrap(), expected);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let result = to_html_from_bytes(&[b'a', 0xff], &Options::default());
        assert!(matches!(result, Err(Error::Utf8(_))));
    }

    #[test]
    fn bytes_render_like_text() {
        assert_eq!(
            to_html_from_bytes(b"*a*", &Options::default()).unwrap(),
            "<p><em>a</em></p>"
        );
    }
}
