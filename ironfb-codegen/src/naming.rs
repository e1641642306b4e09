//! Identifier case conversion and documentation comment rendering.

/// Delimiters of a documentation comment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
    /// Line opening the block.
    pub first_line: Option<&'static str>,
    /// Prefix of every content line, `///` when unset.
    pub content_prefix: Option<&'static str>,
    /// Line closing the block.
    pub last_line: Option<&'static str>,
}

/// Converts an `underscore_based` identifier to camel case.
///
/// Every run of underscores followed by another character is dropped and
/// that character upper-cased; trailing underscores are kept. The first
/// character of the result is then upper-cased when `first` is true and
/// lower-cased otherwise, so converting twice gives the same name.
#[must_use]
pub fn make_camel(input: &str, first: bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut underscores = 0usize;

    for c in input.chars() {
        if c == '_' {
            underscores += 1;
        } else if underscores > 0 {
            out.push(c.to_ascii_uppercase());
            underscores = 0;
        } else {
            out.push(c);
        }
    }
    out.extend(std::iter::repeat_n('_', underscores));

    let mut chars = out.chars();
    match chars.next() {
        Some(head) if first => format!("{}{}", head.to_ascii_uppercase(), chars.as_str()),
        Some(head) => format!("{}{}", head.to_ascii_lowercase(), chars.as_str()),
        None => out,
    }
}

/// Renders documentation lines as a comment block, each line indented by `prefix`.
///
/// Returns an empty string when there are no lines.
#[must_use]
pub fn gen_comment(lines: &[String], style: &CommentStyle, prefix: &str) -> String {
    let mut output = String::new();
    if lines.is_empty() {
        return output;
    }

    if let Some(first) = style.first_line {
        output.push_str(&format!("{prefix}{first}\n"));
    }
    let content_prefix = style.content_prefix.unwrap_or("///");
    for line in lines {
        output.push_str(&format!("{prefix}{content_prefix}{line}\n"));
    }
    if let Some(last) = style.last_line {
        output.push_str(&format!("{prefix}{last}\n"));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAVADOC: CommentStyle = CommentStyle {
        first_line: Some("/**"),
        content_prefix: Some(" *"),
        last_line: Some(" */"),
    };

    const TRIPLE_SLASH: CommentStyle = CommentStyle {
        first_line: None,
        content_prefix: None,
        last_line: None,
    };

    #[test]
    fn test_make_camel_upper() {
        assert_eq!(make_camel("test_empty", true), "TestEmpty");
        assert_eq!(make_camel("hp", true), "Hp");
        assert_eq!(make_camel("Name", true), "Name");
    }

    #[test]
    fn test_make_camel_lower() {
        assert_eq!(make_camel("test_empty", false), "testEmpty");
        assert_eq!(make_camel("Name", false), "name");
        assert_eq!(make_camel("testarrayofstring2", false), "testarrayofstring2");
    }

    #[test]
    fn test_make_camel_trailing_underscore() {
        assert_eq!(make_camel("pos_", false), "pos_");
        assert_eq!(make_camel("a_b_c", true), "ABC");
        assert_eq!(make_camel("a__", false), "a__");
    }

    #[test]
    fn test_make_camel_underscore_runs() {
        assert_eq!(make_camel("_x", false), "x");
        assert_eq!(make_camel("_x", true), "X");
        assert_eq!(make_camel("a__b", false), "aB");
        assert_eq!(make_camel("_", true), "_");
        assert_eq!(make_camel("", true), "");
    }

    #[test]
    fn test_make_camel_idempotent() {
        for name in [
            "hp",
            "test_nested_flatbuffer",
            "inventory",
            "testhashs32_fnv1",
            "_x",
            "__x",
            "a__b",
            "pos_",
            "a__",
            "_",
            "Name",
            "",
        ] {
            for first in [true, false] {
                let once = make_camel(name, first);
                assert_eq!(make_camel(&once, first), once);
            }
        }
    }

    #[test]
    fn test_gen_comment_empty() {
        assert_eq!(gen_comment(&[], &JAVADOC, "  "), "");
    }

    #[test]
    fn test_gen_comment_javadoc() {
        let lines = vec![" an example".to_string(), " second".to_string()];
        assert_eq!(
            gen_comment(&lines, &JAVADOC, "  "),
            "  /**\n   * an example\n   * second\n   */\n"
        );
    }

    #[test]
    fn test_gen_comment_default_prefix() {
        let lines = vec![" an example".to_string()];
        assert_eq!(gen_comment(&lines, &TRIPLE_SLASH, ""), "/// an example\n");
    }
}
