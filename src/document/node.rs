//! JSON value representation.
//!
//! This module provides the core data model for textquill. A parsed document
//! is a tree of [`JsonValue`] nodes. Values are immutable once parsed: the
//! rest of the application only ever reads them, so the tree can be shared
//! freely between the tree builder, the chunked materializer, and search.
//!
//! # Example
//!
//! ```
//! use textquill::document::node::{JsonValue, JsonNumber};
//! use indexmap::IndexMap;
//!
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), JsonValue::String("textquill".to_string()));
//! fields.insert("version".to_string(), JsonValue::Number(JsonNumber::Integer(1)));
//! let object = JsonValue::Object(fields);
//!
//! assert!(object.is_object());
//! assert_eq!(object.child_count(), 2);
//! ```

use indexmap::IndexMap;

/// Represents JSON numbers (integer or float).
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonNumber::Integer(i) => write!(f, "{}", i),
            JsonNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl JsonNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            JsonNumber::Integer(i) => *i as f64,
            JsonNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, JsonNumber::Integer(_))
    }
}

/// A parsed JSON value.
///
/// This enum represents the core JSON types: objects, arrays, strings,
/// numbers, booleans, and null. Objects use [`IndexMap`] so key order is
/// the insertion order of the source document, and keys are unique within
/// a single object.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// A JSON object containing key-value pairs in source order
    Object(IndexMap<String, JsonValue>),
    /// A JSON array containing ordered values
    Array(Vec<JsonValue>),
    /// A JSON string
    String(String),
    /// A JSON number (integer or float)
    Number(JsonNumber),
    /// A JSON boolean
    Boolean(bool),
    /// A JSON null value
    Null,
}

impl JsonValue {
    /// Returns true if this value is an object.
    ///
    /// # Example
    ///
    /// ```
    /// use textquill::document::node::{JsonValue, JsonNumber};
    /// use indexmap::IndexMap;
    ///
    /// let obj = JsonValue::Object(IndexMap::new());
    /// assert!(obj.is_object());
    ///
    /// let num = JsonValue::Number(JsonNumber::Integer(42));
    /// assert!(!num.is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    ///
    /// # Example
    ///
    /// ```
    /// use textquill::document::node::{JsonValue, JsonNumber};
    /// use indexmap::IndexMap;
    ///
    /// assert!(JsonValue::Object(IndexMap::new()).is_container());
    /// assert!(JsonValue::Array(vec![]).is_container());
    /// assert!(!JsonValue::Number(JsonNumber::Integer(42)).is_container());
    /// ```
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    /// Returns the number of direct children.
    ///
    /// Scalars have zero children. The count is available without walking
    /// the children, which is what lets the tree builder defer large
    /// containers without touching their contents.
    pub fn child_count(&self) -> usize {
        match self {
            JsonValue::Object(fields) => fields.len(),
            JsonValue::Array(items) => items.len(),
            _ => 0,
        }
    }

    /// Gets the value at the specified path.
    ///
    /// The path is a sequence of indices that navigate through the tree:
    /// - For objects: the index selects the nth key-value pair
    /// - For arrays: the index selects the nth element
    ///
    /// Returns `None` if the path is out of bounds at any level or tries
    /// to traverse a scalar.
    ///
    /// # Example
    ///
    /// ```
    /// use textquill::document::node::{JsonValue, JsonNumber};
    /// use indexmap::IndexMap;
    ///
    /// let mut fields = IndexMap::new();
    /// fields.insert(
    ///     "items".to_string(),
    ///     JsonValue::Array(vec![
    ///         JsonValue::Number(JsonNumber::Integer(1)),
    ///         JsonValue::Number(JsonNumber::Integer(2)),
    ///     ]),
    /// );
    /// let root = JsonValue::Object(fields);
    ///
    /// // Navigate to items[1]
    /// let node = root.get_path(&[0, 1]).unwrap();
    /// assert_eq!(node, &JsonValue::Number(JsonNumber::Integer(2)));
    ///
    /// assert!(root.get_path(&[0, 99]).is_none());
    /// ```
    pub fn get_path(&self, path: &[usize]) -> Option<&JsonValue> {
        let mut current = self;

        for &index in path {
            match current {
                JsonValue::Object(fields) => {
                    current = fields.get_index(index)?.1;
                }
                JsonValue::Array(items) => {
                    current = items.get(index)?;
                }
                _ => return None,
            }
        }

        Some(current)
    }

    /// Returns the key of the nth child, if this value is an object.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        match self {
            JsonValue::Object(fields) => fields.get_index(index).map(|(k, _)| k.as_str()),
            _ => None,
        }
    }

    /// Returns the nth child of a container.
    pub fn child_at(&self, index: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(fields) => fields.get_index(index).map(|(_, v)| v),
            JsonValue::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// A short name for the value's type, used in messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::String(_) => "string",
            JsonValue::Number(_) => "number",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Null => "null",
        }
    }
}
