//! JSON parsing with structured error positions.
//!
//! The parser delegates to `serde_json` and converts the result into the
//! internal [`JsonValue`] representation. Parse failures are reported as
//! [`ParseError`], which carries the parser's native 1-indexed line and
//! column plus a character offset derived by counting newlines, so error
//! reports never depend on scraping message text.
//!
//! # Example
//!
//! ```
//! use textquill::document::parser::parse_json;
//!
//! let json = r#"{"name": "Alice", "age": 30}"#;
//! let value = parse_json(json).unwrap();
//! assert!(value.is_object());
//! ```

use super::node::{JsonNumber, JsonValue};
use serde_json::Value as SerdeValue;
use thiserror::Error;

/// How many lines of context to show before and after the offending line.
const CONTEXT_BEFORE: usize = 2;
const CONTEXT_AFTER: usize = 2;

/// A JSON parse failure with position information.
///
/// `line` and `column` are 1-indexed. `offset` is the byte offset of the
/// failure in the source text, when it can be derived (it cannot when the
/// underlying error is an I/O error with no position).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message} (line {line}, column {column})")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub offset: Option<usize>,
}

impl ParseError {
    fn from_serde(err: &serde_json::Error, source: &str) -> Self {
        let line = err.line();
        let column = err.column();
        Self {
            message: err.to_string(),
            line,
            column,
            offset: offset_of(source, line, column),
        }
    }

    /// Renders a source snippet around the failure.
    ///
    /// The offending line is marked with `>` and a caret points at the
    /// exact column:
    ///
    /// ```text
    ///   1: {
    /// > 2:   "a": 1,}
    ///                ^
    ///   3: ...
    /// ```
    ///
    /// Returns `None` when the error has no usable position.
    pub fn snippet(&self, source: &str) -> Option<String> {
        if self.line == 0 {
            return None;
        }

        let lines: Vec<&str> = source.split('\n').collect();
        let bad = self.line.saturating_sub(1);
        if bad >= lines.len() {
            return None;
        }

        let start = bad.saturating_sub(CONTEXT_BEFORE);
        let end = (bad + CONTEXT_AFTER + 1).min(lines.len());
        let num_width = end.to_string().len();

        let mut out = String::new();
        for i in start..end {
            let marker = if i == bad { "> " } else { "  " };
            out.push_str(&format!(
                "{}{:>width$}: {}\n",
                marker,
                i + 1,
                lines[i],
                width = num_width
            ));
            if i == bad {
                // Align the caret under the offending column: marker, line
                // number, ": " and column-1 characters of padding.
                let pad = 2 + num_width + 2 + self.column.saturating_sub(1);
                out.push_str(&" ".repeat(pad));
                out.push_str("^\n");
            }
        }

        Some(out)
    }

    /// A short list of frequent JSON mistakes, appended to error reports.
    pub fn common_issues() -> &'static str {
        "Common issues: missing or extra commas; unquoted keys; \
         single quotes instead of double quotes; trailing commas; \
         unclosed brackets or braces"
    }

    /// Builds the full multi-line error report shown to the user.
    pub fn report(&self, source: &str) -> String {
        let mut out = format!("Invalid JSON: {}\n", self.message);
        if self.line > 0 {
            out.push_str(&format!("Location: line {}, column {}\n", self.line, self.column));
        }
        if let Some(snippet) = self.snippet(source) {
            out.push('\n');
            out.push_str(&snippet);
        }
        out.push('\n');
        out.push_str(Self::common_issues());
        out
    }
}

/// Derives a byte offset from a 1-indexed line and column.
fn offset_of(source: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let mut offset = 0usize;
    for (i, l) in source.split('\n').enumerate() {
        if i + 1 == line {
            return Some(offset + column.saturating_sub(1));
        }
        offset += l.len() + 1; // account for the newline
    }
    None
}

/// Parses a JSON string into a [`JsonValue`].
///
/// # Example
///
/// ```
/// use textquill::document::parser::parse_json;
/// use textquill::document::node::JsonValue;
///
/// let value = parse_json(r#"[1, 2, 3]"#).unwrap();
/// assert!(value.is_array());
///
/// let err = parse_json(r#"{"unclosed": "#).unwrap_err();
/// assert!(err.line >= 1);
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column/offset when the input is not
/// valid JSON.
pub fn parse_json(input: &str) -> Result<JsonValue, ParseError> {
    let serde_value: SerdeValue =
        serde_json::from_str(input).map_err(|e| ParseError::from_serde(&e, input))?;
    Ok(convert_value(&serde_value))
}

/// Checks whether the input parses, without building a value tree.
pub fn validate_json(input: &str) -> Result<(), ParseError> {
    serde_json::from_str::<SerdeValue>(input)
        .map(|_| ())
        .map_err(|e| ParseError::from_serde(&e, input))
}

/// Converts a `serde_json::Value` into the internal representation.
///
/// Object key order is preserved (serde_json is built with `preserve_order`).
fn convert_value(value: &SerdeValue) -> JsonValue {
    match value {
        SerdeValue::Null => JsonValue::Null,
        SerdeValue::Bool(b) => JsonValue::Boolean(*b),
        SerdeValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::Number(JsonNumber::Integer(i))
            } else {
                JsonValue::Number(JsonNumber::Float(n.as_f64().unwrap_or(0.0)))
            }
        }
        SerdeValue::String(s) => JsonValue::String(s.clone()),
        SerdeValue::Array(items) => JsonValue::Array(items.iter().map(convert_value).collect()),
        SerdeValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), convert_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_object() {
        let value = parse_json(r#"{"a": 1, "b": true}"#).unwrap();
        assert!(value.is_object());
        assert_eq!(value.child_count(), 2);
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let value = parse_json(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        assert_eq!(value.key_at(0), Some("z"));
        assert_eq!(value.key_at(1), Some("a"));
        assert_eq!(value.key_at(2), Some("m"));
    }

    #[test]
    fn test_parse_number_kinds() {
        let value = parse_json(r#"[1, -5, 2.5, 1e3]"#).unwrap();
        assert_eq!(
            value.get_path(&[0]),
            Some(&JsonValue::Number(JsonNumber::Integer(1)))
        );
        assert_eq!(
            value.get_path(&[1]),
            Some(&JsonValue::Number(JsonNumber::Integer(-5)))
        );
        assert_eq!(
            value.get_path(&[2]),
            Some(&JsonValue::Number(JsonNumber::Float(2.5)))
        );
    }

    #[test]
    fn test_trailing_comma_position() {
        // The error position points into the trailing comma region
        let input = r#"{"a": 1,}"#;
        let err = parse_json(input).unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 9);
        assert_eq!(err.offset, Some(8));
        assert_eq!(&input[8..9], "}");
    }

    #[test]
    fn test_multiline_offset_derivation() {
        let input = "{\n  \"a\": 1,\n}";
        let err = parse_json(input).unwrap_err();
        assert_eq!(err.line, 3);
        let offset = err.offset.unwrap();
        // Offset must land on the reported line
        let newlines = input[..offset].matches('\n').count();
        assert_eq!(newlines + 1, err.line);
    }

    #[test]
    fn test_snippet_marks_offending_line() {
        let input = "{\n  \"a\": 1,\n}";
        let err = parse_json(input).unwrap_err();
        let snippet = err.snippet(input).unwrap();
        assert!(snippet.contains("> 3: }"));
        assert!(snippet.contains('^'));
    }

    #[test]
    fn test_report_contains_hints() {
        let err = parse_json("{oops}").unwrap_err();
        let report = err.report("{oops}");
        assert!(report.starts_with("Invalid JSON:"));
        assert!(report.contains("Location: line 1"));
        assert!(report.contains("Common issues"));
    }

    #[test]
    fn test_validate_json() {
        assert!(validate_json(r#"{"ok": true}"#).is_ok());
        assert!(validate_json("[1, 2,").is_err());
    }
}
