//! SQL utility functions

use crate::core::constants::{ESCAPED_PLACEHOLDER, PLACEHOLDER};

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Use this when building LIKE patterns from user input to prevent
/// unintended pattern matching.
///
/// # Example
///
/// ```
/// use filter_sql::utils::sql::escape_like_pattern;
///
/// let user_input = "100% match_test";
/// let pattern = format!("%{}%", escape_like_pattern(user_input));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Comma-separated run of `count` positional placeholders (`?,?,?`)
pub fn placeholders(count: usize) -> String {
    vec![PLACEHOLDER.to_string(); count].join(",")
}

/// Split `?`-placeholder SQL into the literal text around each placeholder.
///
/// The result always has one more segment than there are placeholders.
/// `??` is an escaped placeholder and stays in the text as a single `?`.
pub fn split_placeholders(sql: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut rest = sql;

    while let Some(pos) = rest.find(PLACEHOLDER) {
        current.push_str(&rest[..pos]);
        if rest[pos..].starts_with(ESCAPED_PLACEHOLDER) {
            current.push(PLACEHOLDER);
            rest = &rest[pos + ESCAPED_PLACEHOLDER.len()..];
        } else {
            segments.push(std::mem::take(&mut current));
            rest = &rest[pos + PLACEHOLDER.len_utf8()..];
        }
    }
    current.push_str(rest);
    segments.push(current);
    segments
}

/// Rewrite `?` placeholders using `format`, which receives the 1-based index
pub fn replace_placeholders<F>(sql: &str, format: F) -> String
where
    F: Fn(usize) -> String,
{
    let segments = split_placeholders(sql);
    let mut out = String::with_capacity(sql.len());
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push_str(&format(i));
        }
        out.push_str(segment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern_no_special_chars() {
        assert_eq!(escape_like_pattern("hello"), "hello");
    }

    #[test]
    fn test_escape_like_pattern_multiple() {
        assert_eq!(escape_like_pattern("100%_\\test"), "100\\%\\_\\\\test");
    }

    #[test]
    fn test_escape_like_pattern_empty() {
        assert_eq!(escape_like_pattern(""), "");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(0), "");
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?,?,?");
    }

    #[test]
    fn test_split_placeholders() {
        assert_eq!(split_placeholders("a = ?"), vec!["a = ", ""]);
        assert_eq!(split_placeholders("no params"), vec!["no params"]);
        assert_eq!(
            split_placeholders("(a = ? OR b = ?)"),
            vec!["(a = ", " OR b = ", ")"]
        );
    }

    #[test]
    fn test_split_placeholders_escaped() {
        assert_eq!(
            split_placeholders("data ?? 'k' AND a = ?"),
            vec!["data ? 'k' AND a = ", ""]
        );
    }

    #[test]
    fn test_replace_placeholders_dollar() {
        let sql = replace_placeholders("a = ? AND b IN (?,?)", |i| format!("${}", i));
        assert_eq!(sql, "a = $1 AND b IN ($2,$3)");
    }

    #[test]
    fn test_replace_placeholders_question() {
        let sql = replace_placeholders("a = ? AND b ?? c", |_| "?".to_string());
        assert_eq!(sql, "a = ? AND b ? c");
    }
}
