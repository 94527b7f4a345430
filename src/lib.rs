//! textquill — terminal text utilities for JSON and URLs.
//!
//! A JSON formatter/validator with a collapsible tree view (large
//! containers materialize lazily, very large documents render through a
//! virtualized read-only text view) and a URL encode/decode/parse
//! inspector, in one TUI.
//!
//! # Modules
//!
//! - [`document`]: the immutable value model, parsing, serialization
//! - [`render`]: tree building, chunked materialization, virtual
//!   scrolling, syntax highlighting, the per-document render session
//! - [`url`]: URL parsing and percent-encoding
//! - [`app`]: application state and clipboard
//! - [`ui`], [`input`], [`theme`], [`config`], [`file`]: the TUI shell

pub mod app;
pub mod config;
pub mod document;
pub mod file;
pub mod input;
pub mod render;
pub mod theme;
pub mod ui;
pub mod url;
