//! JSON serialization with configurable indentation.
//!
//! The serializer walks a [`JsonValue`] and writes canonical JSON text,
//! either pretty-printed with an [`IndentSpec`] or minified. Every value
//! variant is matched exhaustively so a new variant can never fall through
//! silently.

use super::node::{JsonNumber, JsonValue};

/// The indentation unit used when pretty-printing.
///
/// # Example
///
/// ```
/// use textquill::document::serializer::IndentSpec;
///
/// assert_eq!(IndentSpec::default(), IndentSpec::Spaces(2));
/// assert_eq!(IndentSpec::Spaces(4).unit(), "    ");
/// assert_eq!(IndentSpec::Tab.unit(), "\t");
/// assert_eq!(IndentSpec::parse("tab"), Some(IndentSpec::Tab));
/// assert_eq!(IndentSpec::parse("3"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentSpec {
    /// Indent with N spaces per level (2 or 4)
    Spaces(usize),
    /// Indent with one tab per level
    Tab,
}

impl Default for IndentSpec {
    fn default() -> Self {
        IndentSpec::Spaces(2)
    }
}

impl std::fmt::Display for IndentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndentSpec::Spaces(n) => write!(f, "{} spaces", n),
            IndentSpec::Tab => write!(f, "tab"),
        }
    }
}

impl IndentSpec {
    /// The literal indent string for one nesting level.
    pub fn unit(&self) -> String {
        match self {
            IndentSpec::Spaces(n) => " ".repeat(*n),
            IndentSpec::Tab => "\t".to_string(),
        }
    }

    /// Parses a user-supplied indent name: "2", "4", or "tab".
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "2" => Some(IndentSpec::Spaces(2)),
            "4" => Some(IndentSpec::Spaces(4)),
            "tab" => Some(IndentSpec::Tab),
            _ => None,
        }
    }
}

/// Serializes a value as pretty-printed JSON.
///
/// Empty containers print inline as `{}` / `[]`; everything else gets one
/// line per value with the given indent unit.
///
/// # Example
///
/// ```
/// use textquill::document::parser::parse_json;
/// use textquill::document::serializer::{serialize, IndentSpec};
///
/// let value = parse_json(r#"{"a":[1,2]}"#).unwrap();
/// let text = serialize(&value, IndentSpec::Spaces(2));
/// assert_eq!(text, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
/// ```
pub fn serialize(value: &JsonValue, indent: IndentSpec) -> String {
    let mut out = String::new();
    write_value(value, &indent.unit(), 0, &mut out);
    out
}

/// Serializes a value as compact single-line JSON.
///
/// # Example
///
/// ```
/// use textquill::document::parser::parse_json;
/// use textquill::document::serializer::minify;
///
/// let value = parse_json("{ \"a\": 1,\n  \"b\": [1, 2, 3] }").unwrap();
/// assert_eq!(minify(&value), r#"{"a":1,"b":[1,2,3]}"#);
/// ```
pub fn minify(value: &JsonValue) -> String {
    let mut out = String::new();
    write_minified(value, &mut out);
    out
}

/// Quotes and escapes a string per JSON rules.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn write_scalar(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        JsonValue::Number(n) => out.push_str(&n.to_string()),
        JsonValue::String(s) => out.push_str(&quote_string(s)),
        JsonValue::Object(_) | JsonValue::Array(_) => unreachable!("containers are not scalars"),
    }
}

fn write_value(value: &JsonValue, unit: &str, depth: usize, out: &mut String) {
    match value {
        JsonValue::Null | JsonValue::Boolean(_) | JsonValue::Number(_) | JsonValue::String(_) => {
            write_scalar(value, out)
        }
        JsonValue::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            out.push('\n');
            for (i, item) in items.iter().enumerate() {
                out.push_str(&unit.repeat(depth + 1));
                write_value(item, unit, depth + 1, out);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&unit.repeat(depth));
            out.push(']');
        }
        JsonValue::Object(fields) => {
            if fields.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            out.push('\n');
            for (i, (key, item)) in fields.iter().enumerate() {
                out.push_str(&unit.repeat(depth + 1));
                out.push_str(&quote_string(key));
                out.push_str(": ");
                write_value(item, unit, depth + 1, out);
                if i + 1 < fields.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&unit.repeat(depth));
            out.push('}');
        }
    }
}

fn write_minified(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Null | JsonValue::Boolean(_) | JsonValue::Number(_) | JsonValue::String(_) => {
            write_scalar(value, out)
        }
        JsonValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_minified(item, out);
            }
            out.push(']');
        }
        JsonValue::Object(fields) => {
            out.push('{');
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&quote_string(key));
                out.push(':');
                write_minified(item, out);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json;

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serialize(&JsonValue::Null, IndentSpec::default()), "null");
        assert_eq!(serialize(&JsonValue::Boolean(false), IndentSpec::default()), "false");
        assert_eq!(
            serialize(&JsonValue::Number(JsonNumber::Integer(-3)), IndentSpec::default()),
            "-3"
        );
        assert_eq!(
            serialize(&JsonValue::String("hi".to_string()), IndentSpec::default()),
            "\"hi\""
        );
    }

    #[test]
    fn test_serialize_empty_containers_inline() {
        let value = parse_json(r#"{"a": {}, "b": []}"#).unwrap();
        let text = serialize(&value, IndentSpec::Spaces(2));
        assert_eq!(text, "{\n  \"a\": {},\n  \"b\": []\n}");
    }

    #[test]
    fn test_serialize_tab_indent() {
        let value = parse_json(r#"{"a": 1}"#).unwrap();
        let text = serialize(&value, IndentSpec::Tab);
        assert_eq!(text, "{\n\t\"a\": 1\n}");
    }

    #[test]
    fn test_minify_round_trip() {
        let input = r#"{"a":1,"b":[1,2,3]}"#;
        let value = parse_json(input).unwrap();
        assert_eq!(minify(&value), input);
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string("a\"b"), r#""a\"b""#);
        assert_eq!(quote_string("a\\b"), r#""a\\b""#);
        assert_eq!(quote_string("line\nbreak"), r#""line\nbreak""#);
        assert_eq!(quote_string("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_parse_serialize_round_trip() {
        let input = r#"{"users":[{"id":1,"name":"Alice","active":true},{"id":2,"name":"Bob","active":null}]}"#;
        let value = parse_json(input).unwrap();
        let pretty = serialize(&value, IndentSpec::Spaces(2));
        let reparsed = parse_json(&pretty).unwrap();
        assert_eq!(value, reparsed);
    }

    #[test]
    fn test_indent_spec_parse() {
        assert_eq!(IndentSpec::parse("2"), Some(IndentSpec::Spaces(2)));
        assert_eq!(IndentSpec::parse(" 4 "), Some(IndentSpec::Spaces(4)));
        assert_eq!(IndentSpec::parse("tab"), Some(IndentSpec::Tab));
        assert_eq!(IndentSpec::parse("8"), None);
    }
}
