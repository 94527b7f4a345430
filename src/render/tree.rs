//! Tree model for displaying JSON as an expandable tree.
//!
//! [`build_tree`] projects a parsed [`JsonValue`] into a [`TreeNode`] tree.
//! Containers with at most [`EAGER_CHILD_LIMIT`](super::EAGER_CHILD_LIMIT)
//! children are built eagerly; larger containers are deferred and get their
//! children from the chunked materializer when first expanded.
//!
//! Expand/collapse state lives directly on the nodes as typed fields, and
//! [`TreeModel`] flattens the realized, expanded part of the tree into
//! [`TreeRow`]s for rendering.

use super::chunk::{load_next_chunk, ChunkCursor};
use super::EAGER_CHILD_LIMIT;
use crate::document::node::JsonValue;
use crate::document::serializer::quote_string;

/// Classification of JSON value types for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl ValueKind {
    /// Determines the kind from a value.
    ///
    /// # Example
    ///
    /// ```
    /// use textquill::document::node::JsonValue;
    /// use textquill::render::tree::ValueKind;
    ///
    /// let value = JsonValue::String("hello".to_string());
    /// assert_eq!(ValueKind::from_value(&value), ValueKind::String);
    /// ```
    pub fn from_value(value: &JsonValue) -> Self {
        match value {
            JsonValue::Object(_) => ValueKind::Object,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::Boolean(_) => ValueKind::Boolean,
            JsonValue::Null => ValueKind::Null,
        }
    }
}

/// The printable form of a scalar value.
///
/// Strings are quoted and escaped; numbers and booleans print as literals;
/// null prints as `null`.
pub fn scalar_display(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => quote_string(s),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Boolean(b) => b.to_string(),
        JsonValue::Null => "null".to_string(),
        JsonValue::Object(_) | JsonValue::Array(_) => String::new(),
    }
}

/// A renderable projection of one JSON value at one nesting depth.
///
/// Nodes own their direct children; no node is shared between parents.
/// `materialized == false` implies `children` is empty while `child_count`
/// is still the real count, taken from the underlying value without
/// walking it.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// The projected value's type
    pub kind: ValueKind,
    /// Nesting depth (0 for the root)
    pub depth: usize,
    /// Indices from the root value to this node; the descriptor through
    /// which deferred children are produced
    pub path: Vec<usize>,
    /// Object key, if this node is an object member
    pub key: Option<String>,
    /// Printable form for scalars and empty containers
    pub display: String,
    /// Number of direct children of the underlying value
    pub child_count: usize,
    /// Realized child nodes, a prefix of the underlying children
    pub children: Vec<TreeNode>,
    /// Whether the node's children are currently shown
    pub expanded: bool,
    /// Whether any children have been built yet
    pub materialized: bool,
    /// Whether this node is its parent's final child (controls the
    /// trailing comma)
    pub last_sibling: bool,
    /// Present while the container still has unrealized children
    pub cursor: Option<ChunkCursor>,
}

impl TreeNode {
    /// True for non-empty containers, which get a toggle control.
    pub fn is_expandable(&self) -> bool {
        self.child_count > 0
    }

    /// Opening bracket for container nodes.
    pub fn open_bracket(&self) -> char {
        match self.kind {
            ValueKind::Array => '[',
            _ => '{',
        }
    }

    /// Closing bracket for container nodes.
    pub fn close_bracket(&self) -> char {
        match self.kind {
            ValueKind::Array => ']',
            _ => '}',
        }
    }
}

/// Builds the tree projection of a value.
///
/// Pure function of its input: no I/O, and the value is not retained.
/// Scalars and empty containers become leaves; non-empty containers up to
/// the eager limit are built recursively; larger containers are deferred
/// with an attached [`ChunkCursor`].
///
/// # Example
///
/// ```
/// use textquill::document::parser::parse_json;
/// use textquill::render::tree::build_tree;
///
/// let value = parse_json(r#"{"a": 1, "b": [1, 2, 3]}"#).unwrap();
/// let root = build_tree(&value, 0);
/// assert_eq!(root.child_count, 2);
/// assert!(root.materialized);
/// assert_eq!(root.children[1].child_count, 3);
/// ```
pub fn build_tree(value: &JsonValue, depth: usize) -> TreeNode {
    build_child(value, depth, Vec::new(), None, true)
}

/// Builds one node of the projection; used by both the eager walk and the
/// chunked materializer.
pub fn build_child(
    value: &JsonValue,
    depth: usize,
    path: Vec<usize>,
    key: Option<String>,
    last_sibling: bool,
) -> TreeNode {
    let kind = ValueKind::from_value(value);
    let child_count = value.child_count();

    if !value.is_container() {
        return TreeNode {
            kind,
            depth,
            path,
            key,
            display: scalar_display(value),
            child_count: 0,
            children: Vec::new(),
            expanded: true,
            materialized: true,
            last_sibling,
            cursor: None,
        };
    }

    if child_count == 0 {
        // Empty containers print inline and never get a toggle
        let display = match kind {
            ValueKind::Array => "[]".to_string(),
            _ => "{}".to_string(),
        };
        return TreeNode {
            kind,
            depth,
            path,
            key,
            display,
            child_count: 0,
            children: Vec::new(),
            expanded: true,
            materialized: true,
            last_sibling,
            cursor: None,
        };
    }

    if child_count > EAGER_CHILD_LIMIT {
        // Deferred: children arrive through the chunked materializer on
        // first expansion
        return TreeNode {
            kind,
            depth,
            path,
            key,
            display: String::new(),
            child_count,
            children: Vec::new(),
            expanded: false,
            materialized: false,
            last_sibling,
            cursor: Some(ChunkCursor::new(child_count)),
        };
    }

    let mut children = Vec::with_capacity(child_count);
    match value {
        JsonValue::Object(fields) => {
            for (index, (child_key, child)) in fields.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(index);
                children.push(build_child(
                    child,
                    depth + 1,
                    child_path,
                    Some(child_key.clone()),
                    index + 1 == child_count,
                ));
            }
        }
        JsonValue::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(index);
                children.push(build_child(
                    child,
                    depth + 1,
                    child_path,
                    None,
                    index + 1 == child_count,
                ));
            }
        }
        JsonValue::String(_) | JsonValue::Number(_) | JsonValue::Boolean(_) | JsonValue::Null => {}
    }

    TreeNode {
        kind,
        depth,
        path,
        key,
        display: String::new(),
        child_count,
        children,
        expanded: true,
        materialized: true,
        last_sibling,
        cursor: None,
    }
}

/// Row kinds produced by flattening the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRowKind {
    /// A value line: scalar, empty container, collapsed container, or the
    /// opening bracket of an expanded container
    Node,
    /// The closing bracket of an expanded container
    Close,
    /// The "load more" affordance of a partially materialized container
    LoadMore,
}

/// A single displayable line of the tree view.
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub kind: TreeRowKind,
    /// Path of the node this row belongs to
    pub path: Vec<usize>,
    pub depth: usize,
    /// Object key name (None for array elements and the root)
    pub key: Option<String>,
    /// Row text: scalar display, bracket, or collapsed placeholder
    pub text: String,
    pub value_kind: ValueKind,
    pub expandable: bool,
    pub expanded: bool,
    /// Direct child count of the node (drives the count indicator shown
    /// while collapsed)
    pub child_count: usize,
    /// Unrealized children remaining (LoadMore rows only)
    pub remaining: usize,
    pub trailing_comma: bool,
}

/// The interactive tree for one document.
///
/// Wraps the root [`TreeNode`] and exposes toggling, bulk expansion, chunk
/// loading, and flattening into visible rows. Mutations never touch the
/// underlying value; deferred children are produced from it on demand via
/// node paths.
///
/// # Example
///
/// ```
/// use textquill::document::parser::parse_json;
/// use textquill::render::tree::TreeModel;
///
/// let value = parse_json(r#"{"a": 1, "b": [1, 2, 3]}"#).unwrap();
/// let mut model = TreeModel::new(&value);
///
/// // Root "{", "a", "b" "[", three items, "]", "}"
/// assert_eq!(model.visible_rows().len(), 8);
///
/// // Collapse "b"
/// model.toggle(&[1], &value);
/// assert_eq!(model.visible_rows().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TreeModel {
    root: TreeNode,
}

impl TreeModel {
    /// Builds the model for a parsed value.
    pub fn new(value: &JsonValue) -> Self {
        Self {
            root: build_tree(value, 0),
        }
    }

    /// Returns the root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Returns the realized node at the given path.
    ///
    /// Children are realized strictly in index order, so the nth realized
    /// child is the nth child of the underlying value.
    pub fn node(&self, path: &[usize]) -> Option<&TreeNode> {
        let mut current = &self.root;
        for &index in path {
            current = current.children.get(index)?;
        }
        Some(current)
    }

    /// Returns the realized node at the given path, mutably.
    pub fn node_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        let mut current = &mut self.root;
        for &index in path {
            current = current.children.get_mut(index)?;
        }
        Some(current)
    }

    /// Flips the expanded state of the container at `path`.
    ///
    /// The first expansion of a deferred container automatically loads one
    /// chunk of children. Collapsing never discards already-built children:
    /// re-expanding resumes exactly where the chunk cursor left off.
    ///
    /// Returns false when the path does not name an expandable node.
    pub fn toggle(&mut self, path: &[usize], root_value: &JsonValue) -> bool {
        let node = match self.node_mut(path) {
            Some(node) => node,
            None => return false,
        };
        if !node.is_expandable() {
            return false;
        }

        node.expanded = !node.expanded;
        if node.expanded && !node.materialized {
            if let Some(container) = root_value.get_path(path) {
                load_next_chunk(node, container);
            }
        }
        true
    }

    /// Materializes the next chunk of the container at `path`.
    ///
    /// Returns the number of children built (0 once the container is fully
    /// loaded).
    pub fn load_more(&mut self, path: &[usize], root_value: &JsonValue) -> usize {
        let node = match self.node_mut(path) {
            Some(node) => node,
            None => return 0,
        };
        let container = match root_value.get_path(path) {
            Some(container) => container,
            None => return 0,
        };
        load_next_chunk(node, container)
    }

    /// Expands every realized container node in one pass.
    ///
    /// Deferred containers being expanded for the first time get their
    /// automatic first chunk, same as a manual expand. Children that are
    /// still unmaterialized after that are unaffected until realized.
    pub fn expand_all(&mut self, root_value: &JsonValue) {
        fn walk(node: &mut TreeNode, root_value: &JsonValue) {
            if node.is_expandable() {
                node.expanded = true;
                if !node.materialized {
                    if let Some(container) = root_value.get_path(&node.path) {
                        load_next_chunk(node, container);
                    }
                }
            }
            for child in &mut node.children {
                walk(child, root_value);
            }
        }
        walk(&mut self.root, root_value);
    }

    /// Collapses every realized container node in one pass.
    ///
    /// Materialization state is untouched: children stay built.
    pub fn collapse_all(&mut self) {
        fn walk(node: &mut TreeNode) {
            if node.is_expandable() {
                node.expanded = false;
            }
            for child in &mut node.children {
                walk(child);
            }
        }
        walk(&mut self.root);
    }

    /// Flattens the expanded part of the tree into displayable rows.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        push_rows(&self.root, &mut rows);
        rows
    }
}

fn push_rows(node: &TreeNode, rows: &mut Vec<TreeRow>) {
    let trailing_comma = !node.last_sibling;

    if node.child_count == 0 {
        // Scalar or empty container
        rows.push(TreeRow {
            kind: TreeRowKind::Node,
            path: node.path.clone(),
            depth: node.depth,
            key: node.key.clone(),
            text: node.display.clone(),
            value_kind: node.kind,
            expandable: false,
            expanded: false,
            child_count: 0,
            remaining: 0,
            trailing_comma,
        });
        return;
    }

    if !node.expanded {
        rows.push(TreeRow {
            kind: TreeRowKind::Node,
            path: node.path.clone(),
            depth: node.depth,
            key: node.key.clone(),
            text: format!("{} … {}", node.open_bracket(), node.close_bracket()),
            value_kind: node.kind,
            expandable: true,
            expanded: false,
            child_count: node.child_count,
            remaining: 0,
            trailing_comma,
        });
        return;
    }

    rows.push(TreeRow {
        kind: TreeRowKind::Node,
        path: node.path.clone(),
        depth: node.depth,
        key: node.key.clone(),
        text: node.open_bracket().to_string(),
        value_kind: node.kind,
        expandable: true,
        expanded: true,
        child_count: node.child_count,
        remaining: 0,
        trailing_comma: false,
    });

    for child in &node.children {
        push_rows(child, rows);
    }

    // The load-more marker stays positioned after all loaded children
    if let Some(cursor) = &node.cursor {
        rows.push(TreeRow {
            kind: TreeRowKind::LoadMore,
            path: node.path.clone(),
            depth: node.depth + 1,
            key: None,
            text: String::new(),
            value_kind: node.kind,
            expandable: false,
            expanded: false,
            child_count: node.child_count,
            remaining: cursor.remaining(),
            trailing_comma: false,
        });
    }

    rows.push(TreeRow {
        kind: TreeRowKind::Close,
        path: node.path.clone(),
        depth: node.depth,
        key: None,
        text: node.close_bracket().to_string(),
        value_kind: node.kind,
        expandable: false,
        expanded: true,
        child_count: node.child_count,
        remaining: 0,
        trailing_comma,
    });
}
