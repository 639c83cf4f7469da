/// Normalize a label into a definition identifier.
///
/// Runs of whitespace collapse to one space, the ends are trimmed and the
/// result is case folded, so `[Foo  Bar]` matches `[foo bar]: /url`.
pub fn normalize_identifier(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_whitespace = false;

    for char in value.chars() {
        if matches!(char, '\t' | '\n' | '\r' | ' ') {
            at_whitespace = true;
        } else {
            if at_whitespace && !result.is_empty() {
                result.push(' ');
            }
            at_whitespace = false;
            result.push(char);
        }
    }

    result.to_lowercase().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("a", "A")]
    #[case(" a ", "A")]
    #[case("Foo \t\n Bar", "FOO BAR")]
    #[case("ẞ", "SS")]
    #[case("", "")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_identifier(input), expected);
    }
}
