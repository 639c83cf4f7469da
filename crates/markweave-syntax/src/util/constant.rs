//! Sizes and names the constructs share.

/// Columns per tab stop, and the indent that makes code.
pub const TAB_SIZE: usize = 4;

pub const AUTOLINK_DOMAIN_SIZE_MAX: usize = 63;
pub const AUTOLINK_SCHEME_SIZE_MAX: usize = 32;

pub const CHARACTER_REFERENCE_DECIMAL_SIZE_MAX: usize = 7;
pub const CHARACTER_REFERENCE_HEXADECIMAL_SIZE_MAX: usize = 6;
pub const CHARACTER_REFERENCE_NAMED_SIZE_MAX: usize = 31;

pub const CODE_FENCED_SEQUENCE_SIZE_MIN: usize = 3;

pub const HARD_BREAK_PREFIX_SIZE_MIN: usize = 2;

pub const HEADING_ATX_OPENING_FENCE_SIZE_MAX: usize = 6;

pub const HTML_CDATA_PREFIX: &str = "CDATA[";
pub const HTML_RAW_SIZE_MAX: usize = 8;

/// Tag names that start a raw HTML block (kind 1).
pub const HTML_RAW_NAMES: [&str; 4] = ["pre", "script", "style", "textarea"];

/// Tag names that start a basic HTML block (kind 6).
pub const HTML_BLOCK_NAMES: [&str; 62] = [
    "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption", "center",
    "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu",
    "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param", "search", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "track", "ul",
];

pub const LINK_REFERENCE_SIZE_MAX: usize = 999;
pub const LINK_RESOURCE_DESTINATION_BALANCE_MAX: usize = 32;

pub const LIST_ITEM_VALUE_SIZE_MAX: usize = 10;

/// How deep tree nodes with children nest. Groups opened deeper than this
/// add their children to the deepest open node instead, which keeps every
/// recursive walk over the tree within the stack.
pub const NESTING_DEPTH_MAX: usize = 500;

pub const THEMATIC_BREAK_MARKER_COUNT_MIN: usize = 3;
