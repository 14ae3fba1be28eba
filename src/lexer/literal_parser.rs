//! Literal decoding

/// Decode the escape sequences of a string literal body (quotes excluded).
///
/// Unknown escapes are kept verbatim, backslash included.
pub fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some('0') => result.push('\0'),
            Some(c) => {
                result.push('\\');
                result.push(c);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Inverse of [`unescape_string`] for the characters it decodes
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        match ch {
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\0' => result.push_str("\\0"),
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_known_sequences() {
        assert_eq!(unescape_string(r#"a\"b"#), "a\"b");
        assert_eq!(unescape_string(r"tab\there"), "tab\there");
        assert_eq!(unescape_string(r"back\\slash"), "back\\slash");
    }

    #[test]
    fn test_unescape_unknown_sequence_is_verbatim() {
        assert_eq!(unescape_string(r"\q"), "\\q");
        assert_eq!(unescape_string("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_escape_then_unescape() {
        let original = "path/with \"quotes\"\tand\\slashes";
        assert_eq!(unescape_string(&escape_string(original)), original);
    }
}
