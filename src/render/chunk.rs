//! Incremental child materialization for large containers.
//!
//! Containers with more than [`EAGER_CHILD_LIMIT`](super::EAGER_CHILD_LIMIT)
//! children are not built into tree nodes up front. Instead each such node
//! carries a [`ChunkCursor`] tracking how many of its children have been
//! realized, and [`load_next_chunk`] builds the next batch of
//! [`CHUNK_SIZE`](super::CHUNK_SIZE) children in original order.

use super::tree::{build_child, TreeNode};
use super::CHUNK_SIZE;
use crate::document::node::JsonValue;
use std::ops::Range;

/// Progress tracker for a partially materialized container.
///
/// Invariant: `0 <= loaded <= total`, and `loaded` only ever grows. When
/// `loaded == total` the cursor is retired (dropped from its node), which
/// removes the "load more" affordance permanently.
///
/// # Example
///
/// ```
/// use textquill::render::chunk::ChunkCursor;
///
/// let mut cursor = ChunkCursor::new(120);
/// assert_eq!(cursor.next_batch(), 0..50);
/// cursor.advance(50);
/// cursor.advance(50);
/// assert_eq!(cursor.next_batch(), 100..120);
/// cursor.advance(20);
/// assert!(cursor.is_exhausted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkCursor {
    loaded: usize,
    total: usize,
}

impl ChunkCursor {
    /// Creates a cursor for a container with `total` children, none loaded.
    pub fn new(total: usize) -> Self {
        Self { loaded: 0, total }
    }

    /// How many children have been realized so far.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// The container's total child count.
    pub fn total(&self) -> usize {
        self.total
    }

    /// How many children are still unrealized.
    pub fn remaining(&self) -> usize {
        self.total - self.loaded
    }

    /// True once every child has been realized.
    pub fn is_exhausted(&self) -> bool {
        self.loaded >= self.total
    }

    /// The index range the next load will realize.
    pub fn next_batch(&self) -> Range<usize> {
        self.loaded..(self.loaded + CHUNK_SIZE).min(self.total)
    }

    /// Advances the cursor after `n` children were realized.
    pub fn advance(&mut self, n: usize) {
        self.loaded = (self.loaded + n).min(self.total);
    }
}

/// Materializes the next batch of children for a deferred container node.
///
/// `container` must be the value the node projects (the value at the
/// node's path). New children are appended after the already-loaded ones,
/// preserving original key/index order. Returns the number of children
/// built; returns 0 when the node has no cursor (already fully loaded).
///
/// When the load exhausts the cursor it is retired: the node keeps its
/// children but offers no further loads.
pub fn load_next_chunk(node: &mut TreeNode, container: &JsonValue) -> usize {
    let batch = match &node.cursor {
        Some(cursor) => cursor.next_batch(),
        None => return 0,
    };

    let mut added = 0;
    for index in batch {
        let child = match container.child_at(index) {
            Some(child) => child,
            None => break,
        };
        let key = container.key_at(index).map(str::to_string);
        let last_sibling = index + 1 == node.child_count;

        let mut path = node.path.clone();
        path.push(index);
        node.children
            .push(build_child(child, node.depth + 1, path, key, last_sibling));
        added += 1;
    }

    if added > 0 {
        node.materialized = true;
    }

    let exhausted = match node.cursor.as_mut() {
        Some(cursor) => {
            cursor.advance(added);
            cursor.is_exhausted()
        }
        None => false,
    };
    if exhausted {
        node.cursor = None;
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::JsonNumber;
    use crate::render::tree::build_tree;

    fn numbers(n: usize) -> JsonValue {
        JsonValue::Array(
            (0..n)
                .map(|i| JsonValue::Number(JsonNumber::Integer(i as i64)))
                .collect(),
        )
    }

    #[test]
    fn test_cursor_monotonic_and_bounded() {
        let mut cursor = ChunkCursor::new(130);
        let mut prev = 0;
        while !cursor.is_exhausted() {
            let batch = cursor.next_batch();
            cursor.advance(batch.len());
            assert!(cursor.loaded() >= prev);
            assert!(cursor.loaded() <= cursor.total());
            prev = cursor.loaded();
        }
        assert_eq!(cursor.loaded(), 130);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_load_next_chunk_batches() {
        let value = numbers(250);
        let mut node = build_tree(&value, 0);
        assert!(!node.materialized);
        assert_eq!(node.children.len(), 0);

        assert_eq!(load_next_chunk(&mut node, &value), 50);
        assert!(node.materialized);
        assert_eq!(node.children.len(), 50);

        assert_eq!(load_next_chunk(&mut node, &value), 50);
        assert_eq!(load_next_chunk(&mut node, &value), 50);
        assert_eq!(load_next_chunk(&mut node, &value), 50);
        assert_eq!(load_next_chunk(&mut node, &value), 50);
        assert_eq!(node.children.len(), 250);

        // Cursor retired: further loads are no-ops
        assert!(node.cursor.is_none());
        assert_eq!(load_next_chunk(&mut node, &value), 0);
        assert_eq!(node.children.len(), 250);
    }

    #[test]
    fn test_loaded_children_preserve_order() {
        let value = numbers(150);
        let mut node = build_tree(&value, 0);
        load_next_chunk(&mut node, &value);
        load_next_chunk(&mut node, &value);

        for (i, child) in node.children.iter().enumerate() {
            assert_eq!(child.display, i.to_string());
            assert_eq!(child.path, vec![i]);
        }
    }

    #[test]
    fn test_only_final_child_is_last_sibling() {
        let value = numbers(120);
        let mut node = build_tree(&value, 0);
        load_next_chunk(&mut node, &value);
        load_next_chunk(&mut node, &value);
        load_next_chunk(&mut node, &value);

        assert!(node.cursor.is_none());
        let lasts: Vec<usize> = node
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| c.last_sibling)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(lasts, vec![119]);
    }

    #[test]
    fn test_object_chunks_carry_keys() {
        let mut fields = indexmap::IndexMap::new();
        for i in 0..110 {
            fields.insert(
                format!("field{:03}", i),
                JsonValue::Number(JsonNumber::Integer(i)),
            );
        }
        let value = JsonValue::Object(fields);

        let mut node = build_tree(&value, 0);
        load_next_chunk(&mut node, &value);
        assert_eq!(node.children[0].key.as_deref(), Some("field000"));
        assert_eq!(node.children[49].key.as_deref(), Some("field049"));
    }
}
