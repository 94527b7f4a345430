//! File I/O for JSON documents.
//!
//! This module provides functionality to load document text from disk or
//! stdin (with transparent gzip decompression) and to save serialized or
//! HTML-exported output.

pub mod loader;
pub mod saver;
