//! Character reference decoding.
//!
//! Named references go through the HTML5 entity table in `html-escape`; a
//! name is known when decoding `&name;` changes the text. That table keeps
//! one code point per name, so the names whose value is two code points are
//! listed here.

/// Names whose value is a base character followed by a second code point.
const TWO_CODE_POINTS: &[(&str, &str)] = &[
    ("acE", "\u{223E}\u{0333}"),
    ("bne", "=\u{20E5}"),
    ("bnequiv", "\u{2261}\u{20E5}"),
    ("caps", "\u{2229}\u{FE00}"),
    ("cups", "\u{222A}\u{FE00}"),
    ("fjlig", "fj"),
    ("gesl", "\u{22DB}\u{FE00}"),
    ("gvertneqq", "\u{2269}\u{FE00}"),
    ("gvnE", "\u{2269}\u{FE00}"),
    ("lates", "\u{2AAD}\u{FE00}"),
    ("lesg", "\u{22DA}\u{FE00}"),
    ("lvertneqq", "\u{2268}\u{FE00}"),
    ("lvnE", "\u{2268}\u{FE00}"),
    ("nang", "\u{2220}\u{20D2}"),
    ("napE", "\u{2A70}\u{0338}"),
    ("napid", "\u{224B}\u{0338}"),
    ("nbump", "\u{224E}\u{0338}"),
    ("nbumpe", "\u{224F}\u{0338}"),
    ("ncongdot", "\u{2A6D}\u{0338}"),
    ("nedot", "\u{2250}\u{0338}"),
    ("nesim", "\u{2242}\u{0338}"),
    ("ngE", "\u{2267}\u{0338}"),
    ("ngeqq", "\u{2267}\u{0338}"),
    ("ngeqslant", "\u{2A7E}\u{0338}"),
    ("nges", "\u{2A7E}\u{0338}"),
    ("nGg", "\u{22D9}\u{0338}"),
    ("nGt", "\u{226B}\u{20D2}"),
    ("nGtv", "\u{226B}\u{0338}"),
    ("nlE", "\u{2266}\u{0338}"),
    ("nleqq", "\u{2266}\u{0338}"),
    ("nleqslant", "\u{2A7D}\u{0338}"),
    ("nles", "\u{2A7D}\u{0338}"),
    ("nLl", "\u{22D8}\u{0338}"),
    ("nLt", "\u{226A}\u{20D2}"),
    ("nLtv", "\u{226A}\u{0338}"),
    ("NotEqualTilde", "\u{2242}\u{0338}"),
    ("NotGreaterFullEqual", "\u{2267}\u{0338}"),
    ("NotGreaterGreater", "\u{226B}\u{0338}"),
    ("NotGreaterSlantEqual", "\u{2A7E}\u{0338}"),
    ("NotHumpDownHump", "\u{224E}\u{0338}"),
    ("NotHumpEqual", "\u{224F}\u{0338}"),
    ("notindot", "\u{22F5}\u{0338}"),
    ("notinE", "\u{22F9}\u{0338}"),
    ("NotLeftTriangleBar", "\u{29CF}\u{0338}"),
    ("NotLessLess", "\u{226A}\u{0338}"),
    ("NotLessSlantEqual", "\u{2A7D}\u{0338}"),
    ("NotNestedGreaterGreater", "\u{2AA2}\u{0338}"),
    ("NotNestedLessLess", "\u{2AA1}\u{0338}"),
    ("NotPrecedesEqual", "\u{2AAF}\u{0338}"),
    ("NotRightTriangleBar", "\u{29D0}\u{0338}"),
    ("NotSquareSubset", "\u{228F}\u{0338}"),
    ("NotSquareSuperset", "\u{2290}\u{0338}"),
    ("NotSubset", "\u{2282}\u{20D2}"),
    ("NotSucceedsEqual", "\u{2AB0}\u{0338}"),
    ("NotSucceedsTilde", "\u{227F}\u{0338}"),
    ("NotSuperset", "\u{2283}\u{20D2}"),
    ("nparsl", "\u{2AFD}\u{20E5}"),
    ("npart", "\u{2202}\u{0338}"),
    ("npre", "\u{2AAF}\u{0338}"),
    ("npreceq", "\u{2AAF}\u{0338}"),
    ("nrarrc", "\u{2933}\u{0338}"),
    ("nrarrw", "\u{219D}\u{0338}"),
    ("nsce", "\u{2AB0}\u{0338}"),
    ("nsubE", "\u{2AC5}\u{0338}"),
    ("nsubseteqq", "\u{2AC5}\u{0338}"),
    ("nsubset", "\u{2282}\u{20D2}"),
    ("nsucceq", "\u{2AB0}\u{0338}"),
    ("nsupE", "\u{2AC6}\u{0338}"),
    ("nsupseteqq", "\u{2AC6}\u{0338}"),
    ("nsupset", "\u{2283}\u{20D2}"),
    ("nvap", "\u{224D}\u{20D2}"),
    ("nvge", "\u{2265}\u{20D2}"),
    ("nvgt", ">\u{20D2}"),
    ("nvle", "\u{2264}\u{20D2}"),
    ("nvlt", "<\u{20D2}"),
    ("nvltrie", "\u{22B4}\u{20D2}"),
    ("nvrtrie", "\u{22B5}\u{20D2}"),
    ("nvsim", "\u{223C}\u{20D2}"),
    ("race", "\u{223D}\u{0331}"),
    ("smtes", "\u{2AAC}\u{FE00}"),
    ("sqcaps", "\u{2293}\u{FE00}"),
    ("sqcups", "\u{2294}\u{FE00}"),
    ("ThickSpace", "\u{205F}\u{200A}"),
    ("varsubsetneq", "\u{228A}\u{FE00}"),
    ("varsubsetneqq", "\u{2ACB}\u{FE00}"),
    ("varsupsetneq", "\u{228B}\u{FE00}"),
    ("varsupsetneqq", "\u{2ACC}\u{FE00}"),
    ("vsubnE", "\u{2ACB}\u{FE00}"),
    ("vsubne", "\u{228A}\u{FE00}"),
    ("vsupnE", "\u{2ACC}\u{FE00}"),
    ("vsupne", "\u{228B}\u{FE00}"),
];

/// Decode a named reference such as `amp`.
pub fn decode_named(name: &str) -> Option<String> {
    if let Some((_, value)) = TWO_CODE_POINTS.iter().find(|(known, _)| *known == name) {
        return Some((*value).to_string());
    }

    let reference = format!("&{name};");
    let decoded = html_escape::decode_html_entities(&reference);

    if decoded == reference {
        None
    } else {
        Some(decoded.into_owned())
    }
}

/// Decode a numeric reference in the given radix.
///
/// NUL, surrogates and out of range values become U+FFFD.
pub fn decode_numeric(value: &str, radix: u32) -> String {
    let char = u32::from_str_radix(value, radix)
        .ok()
        .filter(|code| *code != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);

    char.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn decodes_known_names() {
        assert_eq!(decode_named("amp"), Some("&".to_string()));
        assert_eq!(decode_named("copy"), Some("©".to_string()));
    }

    #[rstest]
    #[case("ngE", "\u{2267}\u{0338}")]
    #[case("nvlt", "<\u{20D2}")]
    #[case("fjlig", "fj")]
    #[case("ThickSpace", "\u{205F}\u{200A}")]
    fn keeps_both_code_points(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(decode_named(name), Some(expected.to_string()));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(decode_named("notanentity"), None);
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_numeric("35", 10), "#");
        assert_eq!(decode_numeric("22", 16), "\"");
        assert_eq!(decode_numeric("0", 10), "\u{FFFD}");
        assert_eq!(decode_numeric("D800", 16), "\u{FFFD}");
    }
}
