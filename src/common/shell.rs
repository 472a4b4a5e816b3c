//! Shell utility functions
//!
//! Quoting and unquoting of values written to and read from shell startup files.

/// Quote a value for the right-hand side of an `export KEY=VALUE` line.
///
/// Values made only of safe characters are written bare. Anything else is
/// double-quoted so `$VAR` references keep expanding when the rc file is
/// sourced, matching how hand-written rc files usually look.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(quote_export_value("/usr/bin"), "/usr/bin");
/// assert_eq!(quote_export_value("has spaces"), "\"has spaces\"");
/// ```
pub fn quote_export_value(s: &str) -> String {
    if s.is_empty() {
        return "\"\"".to_string();
    }

    if s.chars().all(|c| {
        c.is_alphanumeric() || matches!(c, '-' | '_' | '=' | '/' | '.' | ':' | ',' | '@' | '%' | '+' | '$')
    }) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Undo shell quoting on the right-hand side of an `export` line.
///
/// Variable references are kept literally; nothing is expanded. Input that is
/// not valid shell syntax (an unbalanced quote, say) falls back to trimming
/// surrounding quote characters.
pub fn unquote_value(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match shell_words::split(raw) {
        Ok(words) => words.join(" "),
        Err(_) => raw.trim_matches(|c| c == '"' || c == '\'').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_export_value() {
        assert_eq!(quote_export_value(""), "\"\"");
        assert_eq!(quote_export_value("foo"), "foo");
        assert_eq!(quote_export_value("$HOME/bin:$PATH"), "$HOME/bin:$PATH");
        assert_eq!(quote_export_value("foo bar"), "\"foo bar\"");
        assert_eq!(quote_export_value("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_export_value("a`b"), "\"a\\`b\"");
    }

    #[test]
    fn test_unquote_value() {
        assert_eq!(unquote_value("plain"), "plain");
        assert_eq!(unquote_value("\"double quoted\""), "double quoted");
        assert_eq!(unquote_value("'single quoted'"), "single quoted");
        assert_eq!(unquote_value("$HOME/bin"), "$HOME/bin");
        assert_eq!(unquote_value("\"unbalanced"), "unbalanced");
        assert_eq!(unquote_value("   "), "");
    }

    #[test]
    fn test_quoted_values_read_back_unchanged() {
        for value in ["with space", "say \"hi\"", "back\\slash", "$JAVA_HOME/bin"] {
            assert_eq!(unquote_value(&quote_export_value(value)), value);
        }
    }
}
