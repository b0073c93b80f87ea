//! `{{column}}` placeholder substitution.

use super::{Headers, Row, format_value};

/// Cheap containment check for placeholder tokens.
///
/// Also used by the measurement step: placeholder-bearing text keeps its
/// natural width instead of being wrap-capped, since the substituted value
/// usually differs in length from the token.
pub fn contains_placeholder(text: &str) -> bool {
    text.contains("{{") && text.contains("}}")
}

/// Substitute every `{{header}}` token in `template` with the formatted
/// value of that column in `row`.
///
/// Tokens naming a column absent from `headers` are left as literal text,
/// since templates may be authored before any dataset is loaded. A header that
/// is present but has no value in the row substitutes to the empty string.
pub fn resolve(template: &str, row: &Row, headers: &Headers) -> String {
    if !contains_placeholder(template) {
        return template.to_string();
    }
    let mut out = template.to_string();
    for header in headers.iter() {
        let token = format!("{{{{{header}}}}}");
        if out.contains(&token) {
            out = out.replace(&token, &format_value(row.get(header)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use pretty_assertions::assert_eq;

    fn headers(names: &[&str]) -> Headers {
        Headers::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn substitutes_known_column() {
        let row = Row::from_iter([("Name", "Alice")]);
        assert_eq!(resolve("{{Name}}", &row, &headers(&["Name"])), "Alice");
    }

    #[test]
    fn unknown_token_stays_literal() {
        let row = Row::from_iter([("Other", "x")]);
        assert_eq!(resolve("{{Name}}", &row, &headers(&["Other"])), "{{Name}}");
    }

    #[test]
    fn known_column_missing_from_row_becomes_empty() {
        let row = Row::new();
        assert_eq!(resolve("Hi {{Name}}!", &row, &headers(&["Name"])), "Hi !");
    }

    #[test]
    fn repeated_tokens_all_replaced() {
        let row = Row::from_iter([("N", "x")]);
        assert_eq!(resolve("{{N}} and {{N}}", &row, &headers(&["N"])), "x and x");
    }

    #[test]
    fn multiple_columns_mixed_with_literal_text() {
        let mut row = Row::new();
        row.set("Name", "Bo");
        row.set("Score", 45.0);
        assert_eq!(
            resolve(
                "Awarded to {{Name}} on {{Score}}",
                &row,
                &headers(&["Name", "Score"])
            ),
            "Awarded to Bo on 1900-02-13"
        );
    }

    #[test]
    fn literal_text_untouched() {
        let row = Row::new();
        assert_eq!(
            resolve("no tokens here", &row, &headers(&["Name"])),
            "no tokens here"
        );
    }

    #[test]
    fn detects_placeholders() {
        assert!(contains_placeholder("a {{b}} c"));
        assert!(!contains_placeholder("a {b} c"));
        assert!(!contains_placeholder("{{unclosed"));
    }
}
