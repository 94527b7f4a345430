//! Document rendering core.
//!
//! This module turns a parsed [`crate::document::node::JsonValue`] into
//! something displayable, choosing between two strategies:
//!
//! - an interactive, collapsible tree ([`tree`]) whose large containers are
//!   materialized on demand in fixed-size batches ([`chunk`])
//! - a read-only virtualized text view over the serialized document
//!   ([`scroll`]) for documents too large to render as a tree
//!
//! The [`session::RenderSession`] bundles the parsed value, the indent
//! setting, and the chosen strategy; it is replaced wholesale on re-parse
//! or indent change. [`highlight`] classifies JSON tokens for coloring in
//! both strategies.

pub mod chunk;
pub mod highlight;
pub mod scroll;
pub mod session;
pub mod tree;

use std::time::Duration;

/// Containers with more children than this are not built eagerly; their
/// children are materialized in batches on demand.
pub const EAGER_CHILD_LIMIT: usize = 100;

/// How many children one "load more" step materializes.
pub const CHUNK_SIZE: usize = 50;

/// Serialized documents with more lines than this are rendered through the
/// virtual scroller instead of all at once.
pub const VIRTUAL_LINE_THRESHOLD: usize = 1000;

/// Serialized documents larger than this render as virtualized text
/// instead of an interactive tree.
pub const VIRTUAL_TEXT_BYTES: usize = 512 * 1024;

/// Extra lines rendered above and below the visible viewport.
pub const SCROLL_BUFFER_LINES: usize = 20;

/// Minimum interval between scroll window recomputations (~60 Hz).
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(16);
