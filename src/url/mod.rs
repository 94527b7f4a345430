//! URL parsing and percent-encoding utilities.
//!
//! The URL inspector is built on the `url` crate for parsing and the
//! `percent-encoding` crate for component encoding. Decoding is strict:
//! a malformed percent escape is an [`EncodingError`] with the byte offset
//! of the offending escape, never silently passed through.
//!
//! Query parameters are collected in document order; duplicate keys
//! collapse into an array. [`ParsedUrl::params_value`] projects the
//! parameters into a [`JsonValue`] so they render through the same
//! serializer and highlighter as JSON documents.

use crate::document::node::JsonValue;
use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Characters a URL component encoder must escape.
///
/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )`, matching
/// the conventional component-encoding alphabet.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A malformed percent-encoding found while decoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed percent-encoding at byte {offset}: {detail}")]
pub struct EncodingError {
    /// Byte offset of the offending escape in the input
    pub offset: usize,
    pub detail: String,
}

/// A URL parse failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid URL: {0}")]
pub struct UrlError(#[from] pub url::ParseError);

/// The decomposed parts of a parsed URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUrl {
    /// Scheme with trailing colon, e.g. `https:`
    pub protocol: String,
    pub hostname: String,
    /// Explicit port, None when the scheme default applies
    pub port: Option<u16>,
    pub pathname: String,
    /// Query pairs, decoded, in document order
    pub params: Vec<(String, String)>,
    /// Fragment without the leading `#`
    pub hash: Option<String>,
}

impl ParsedUrl {
    /// Host with the explicit port appended, when present.
    pub fn host(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.hostname, port),
            None => self.hostname.clone(),
        }
    }

    /// Scheme, host, and path joined back together (the shareable part of
    /// the URL, without query or fragment).
    pub fn origin_and_path(&self) -> String {
        format!("{}//{}{}", self.protocol, self.host(), self.pathname)
    }

    /// Projects the query parameters into a JSON object.
    ///
    /// Keys keep their first-occurrence order; a repeated key collects all
    /// of its values into an array.
    pub fn params_value(&self) -> JsonValue {
        let mut fields: IndexMap<String, JsonValue> = IndexMap::new();

        for (key, value) in &self.params {
            match fields.get_mut(key) {
                None => {
                    fields.insert(key.clone(), JsonValue::String(value.clone()));
                }
                Some(JsonValue::Array(items)) => {
                    items.push(JsonValue::String(value.clone()));
                }
                Some(existing) => {
                    let first = existing.clone();
                    *existing = JsonValue::Array(vec![first, JsonValue::String(value.clone())]);
                }
            }
        }

        JsonValue::Object(fields)
    }
}

/// Parses an absolute URL into its display parts.
///
/// # Example
///
/// ```
/// use textquill::url::parse_url;
///
/// let parsed = parse_url("https://example.com:8080/a/b?x=1&x=2&y=z#frag").unwrap();
/// assert_eq!(parsed.protocol, "https:");
/// assert_eq!(parsed.host(), "example.com:8080");
/// assert_eq!(parsed.pathname, "/a/b");
/// assert_eq!(parsed.params.len(), 3);
/// assert_eq!(parsed.hash.as_deref(), Some("frag"));
/// ```
pub fn parse_url(input: &str) -> Result<ParsedUrl, UrlError> {
    let parsed = url::Url::parse(input)?;

    let params = parsed
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    Ok(ParsedUrl {
        protocol: format!("{}:", parsed.scheme()),
        hostname: parsed.host_str().unwrap_or_default().to_string(),
        port: parsed.port(),
        pathname: parsed.path().to_string(),
        params,
        hash: parsed.fragment().map(str::to_string),
    })
}

/// Percent-encodes a string as a URL component.
///
/// # Example
///
/// ```
/// use textquill::url::encode_component;
///
/// assert_eq!(encode_component("a b&c"), "a%20b%26c");
/// assert_eq!(encode_component("safe-chars_.!~*'()"), "safe-chars_.!~*'()");
/// ```
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Strictly decodes a percent-encoded string.
///
/// A `%` not followed by two hex digits, or a decoded byte sequence that is
/// not valid UTF-8, is an [`EncodingError`]. `+` is left as-is (this is
/// component decoding, not form decoding).
///
/// # Example
///
/// ```
/// use textquill::url::decode_component;
///
/// assert_eq!(decode_component("a%20b").unwrap(), "a b");
///
/// // Truncated escape
/// let err = decode_component("%E0%A4%A").unwrap_err();
/// assert_eq!(err.offset, 6);
/// ```
pub fn decode_component(text: &str) -> Result<String, EncodingError> {
    let bytes = text.as_bytes();
    let mut decoded: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    decoded.push(hi * 16 + lo);
                    i += 3;
                }
                _ => {
                    return Err(EncodingError {
                        offset: i,
                        detail: "'%' must be followed by two hex digits".to_string(),
                    });
                }
            }
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).map_err(|e| EncodingError {
        offset: e.utf8_error().valid_up_to(),
        detail: "decoded bytes are not valid UTF-8".to_string(),
    })
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::serializer::minify;

    #[test]
    fn test_parse_full_url() {
        let parsed = parse_url("https://user@example.com:8443/path/to?q=rust#top").unwrap();
        assert_eq!(parsed.protocol, "https:");
        assert_eq!(parsed.hostname, "example.com");
        assert_eq!(parsed.port, Some(8443));
        assert_eq!(parsed.pathname, "/path/to");
        assert_eq!(parsed.params, vec![("q".to_string(), "rust".to_string())]);
        assert_eq!(parsed.hash.as_deref(), Some("top"));
        assert_eq!(
            parsed.origin_and_path(),
            "https://example.com:8443/path/to"
        );
    }

    #[test]
    fn test_parse_default_port_is_none() {
        let parsed = parse_url("https://example.com/x").unwrap();
        assert_eq!(parsed.port, None);
        assert_eq!(parsed.host(), "example.com");
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert!(parse_url("/just/a/path").is_err());
        assert!(parse_url("not a url").is_err());
    }

    #[test]
    fn test_duplicate_params_collect_into_array() {
        let parsed = parse_url("http://h/?tag=a&x=1&tag=b&tag=c").unwrap();
        let value = parsed.params_value();

        // First-occurrence order is preserved
        assert_eq!(value.key_at(0), Some("tag"));
        assert_eq!(value.key_at(1), Some("x"));
        assert_eq!(minify(&value), r#"{"tag":["a","b","c"],"x":"1"}"#);
    }

    #[test]
    fn test_params_decoded() {
        let parsed = parse_url("http://h/?msg=hello%20world").unwrap();
        assert_eq!(parsed.params[0].1, "hello world");
    }

    #[test]
    fn test_encode_component_round_trip() {
        let input = "a b&c=d?e#f/g";
        let encoded = encode_component(input);
        assert!(!encoded.contains(' '));
        assert_eq!(decode_component(&encoded).unwrap(), input);
    }

    #[test]
    fn test_encode_multibyte() {
        assert_eq!(encode_component("café"), "caf%C3%A9");
        assert_eq!(decode_component("caf%C3%A9").unwrap(), "café");
    }

    #[test]
    fn test_decode_truncated_escape() {
        // Two valid escapes, then '%A' with nothing after it
        let err = decode_component("%E0%A4%A").unwrap_err();
        assert_eq!(err.offset, 6);
        assert!(err.detail.contains("hex"));
    }

    #[test]
    fn test_decode_invalid_hex() {
        let err = decode_component("ab%zz").unwrap_err();
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_decode_invalid_utf8() {
        // 0xE0 0xA4 is a truncated three-byte sequence
        let err = decode_component("%E0%A4").unwrap_err();
        assert!(err.detail.contains("UTF-8"));
    }

    #[test]
    fn test_decode_plus_left_alone() {
        assert_eq!(decode_component("a+b").unwrap(), "a+b");
    }
}
