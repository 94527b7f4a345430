//! JSON syntax highlighting.
//!
//! A single compiled regular expression classifies each token of a JSON
//! text fragment as a key, string, number, boolean, or null. The same pass
//! backs two outputs:
//!
//! - [`highlight_spans`]: structured spans for terminal rendering
//! - [`highlight`]: markup-escaped text with `<span class="json-…">`
//!   wrappers for HTML export
//!
//! Callers must not highlight the same text twice: [`highlight`] escapes
//! its input, so re-running it would double-escape.

use regex::Regex;
use std::sync::OnceLock;

/// Token classes the highlighter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A quoted string directly followed by a colon
    Key,
    String,
    Number,
    Boolean,
    Null,
}

impl TokenClass {
    /// CSS class name used in HTML output.
    pub fn css_class(&self) -> &'static str {
        match self {
            TokenClass::Key => "json-key",
            TokenClass::String => "json-string",
            TokenClass::Number => "json-number",
            TokenClass::Boolean => "json-boolean",
            TokenClass::Null => "json-null",
        }
    }
}

/// One run of text, classified or plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub class: Option<TokenClass>,
    pub text: String,
}

/// Escapes the three markup-sensitive characters.
///
/// `&` is replaced first so already-replaced entities are not escaped
/// again.
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Quoted string (skipping escaped quotes and unicode escapes),
        // optionally followed by a colon; bare true/false/null; or a
        // number with optional sign, fraction, and exponent.
        Regex::new(
            r#""(?:\\u[0-9a-fA-F]{4}|\\[^u]|[^\\"])*"(?:\s*:)?|\b(?:true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?"#,
        )
        .expect("token pattern is valid")
    })
}

fn classify(token: &str) -> TokenClass {
    if token.starts_with('"') {
        if token.ends_with(':') {
            TokenClass::Key
        } else {
            TokenClass::String
        }
    } else if token == "true" || token == "false" {
        TokenClass::Boolean
    } else if token == "null" {
        TokenClass::Null
    } else {
        TokenClass::Number
    }
}

/// Splits a text fragment into classified and plain spans.
///
/// Concatenating the span texts reproduces the input exactly; unmatched
/// text passes through with `class: None`.
///
/// # Example
///
/// ```
/// use textquill::render::highlight::{highlight_spans, TokenClass};
///
/// let spans = highlight_spans(r#""a": true"#);
/// assert_eq!(spans[0].class, Some(TokenClass::Key));
/// assert_eq!(spans[1].class, None);
/// assert_eq!(spans[2].class, Some(TokenClass::Boolean));
/// ```
pub fn highlight_spans(text: &str) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;

    for m in token_regex().find_iter(text) {
        if m.start() > pos {
            spans.push(HighlightSpan {
                class: None,
                text: text[pos..m.start()].to_string(),
            });
        }
        spans.push(HighlightSpan {
            class: Some(classify(m.as_str())),
            text: m.as_str().to_string(),
        });
        pos = m.end();
    }

    if pos < text.len() {
        spans.push(HighlightSpan {
            class: None,
            text: text[pos..].to_string(),
        });
    }

    spans
}

/// Escapes a JSON text fragment and wraps each classified token in a
/// `<span class="json-…">` marker.
///
/// # Example
///
/// ```
/// use textquill::render::highlight::highlight;
///
/// let html = highlight(r#"{"n": 1}"#);
/// assert_eq!(
///     html,
///     r#"{<span class="json-key">"n":</span> <span class="json-number">1</span>}"#
/// );
/// ```
pub fn highlight(text: &str) -> String {
    let escaped = escape_markup(text);
    let mut out = String::with_capacity(escaped.len());

    for span in highlight_spans(&escaped) {
        match span.class {
            Some(class) => {
                out.push_str("<span class=\"");
                out.push_str(class.css_class());
                out.push_str("\">");
                out.push_str(&span.text);
                out.push_str("</span>");
            }
            None => out.push_str(&span.text),
        }
    }

    out
}
