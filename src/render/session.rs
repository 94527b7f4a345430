//! Per-document render state.
//!
//! A [`RenderSession`] is created on every successful parse and bundles the
//! parsed value, the source text, the indent setting, the serialized form,
//! and the chosen [`RenderStrategy`]. Sessions are replaced wholesale on
//! re-parse or indent change and discarded on clear; nothing ever patches
//! a session in place across documents.

use super::scroll::VirtualScroller;
use super::tree::{TreeModel, TreeRow};
use super::VIRTUAL_TEXT_BYTES;
use crate::document::node::JsonValue;
use crate::document::serializer::{minify, serialize, IndentSpec};

/// How the current document is rendered.
pub enum RenderStrategy {
    /// Interactive collapsible tree (small and medium documents)
    Tree(TreeModel),
    /// Read-only virtualized text over the serialized lines (large
    /// documents); not interactively collapsible
    VirtualText {
        lines: Vec<String>,
        scroller: VirtualScroller,
    },
}

/// State for one parsed document.
///
/// # Example
///
/// ```
/// use textquill::document::parser::parse_json;
/// use textquill::document::serializer::IndentSpec;
/// use textquill::render::session::RenderSession;
///
/// let source = r#"{"a": 1}"#.to_string();
/// let value = parse_json(&source).unwrap();
/// let session = RenderSession::new(value, source, IndentSpec::default());
///
/// assert!(!session.is_virtual());
/// assert_eq!(session.minified(), r#"{"a":1}"#);
/// ```
pub struct RenderSession {
    root: JsonValue,
    source: String,
    indent: IndentSpec,
    serialized: String,
    strategy: RenderStrategy,
    search: Option<String>,
}

impl RenderSession {
    /// Creates the session for a freshly parsed value.
    ///
    /// The strategy is picked from the serialized size: documents over
    /// [`VIRTUAL_TEXT_BYTES`] render as virtualized text, everything else
    /// as an interactive tree.
    pub fn new(root: JsonValue, source: String, indent: IndentSpec) -> Self {
        let serialized = serialize(&root, indent);
        let strategy = if serialized.len() > VIRTUAL_TEXT_BYTES {
            let lines: Vec<String> = serialized.lines().map(str::to_string).collect();
            let scroller = VirtualScroller::new(lines.len());
            RenderStrategy::VirtualText { lines, scroller }
        } else {
            RenderStrategy::Tree(TreeModel::new(&root))
        };

        Self {
            root,
            source,
            indent,
            serialized,
            strategy,
            search: None,
        }
    }

    /// Builds a replacement session with a different indent unit.
    ///
    /// Indent changes never mutate the current session; the caller swaps
    /// in the returned one.
    pub fn reindent(&self, indent: IndentSpec) -> RenderSession {
        RenderSession::new(self.root.clone(), self.source.clone(), indent)
    }

    pub fn root(&self) -> &JsonValue {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn indent(&self) -> IndentSpec {
        self.indent
    }

    /// The document serialized with the current indent.
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// The document serialized compactly.
    pub fn minified(&self) -> String {
        minify(&self.root)
    }

    pub fn strategy(&self) -> &RenderStrategy {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut RenderStrategy {
        &mut self.strategy
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.strategy, RenderStrategy::VirtualText { .. })
    }

    /// The tree model, when the tree strategy is active.
    pub fn tree(&self) -> Option<&TreeModel> {
        match &self.strategy {
            RenderStrategy::Tree(model) => Some(model),
            RenderStrategy::VirtualText { .. } => None,
        }
    }

    /// The last-applied search query, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn set_search(&mut self, query: Option<String>) {
        self.search = query;
    }

    /// Toggles the container at `path` in the tree strategy.
    pub fn toggle(&mut self, path: &[usize]) -> bool {
        let Self { root, strategy, .. } = self;
        match strategy {
            RenderStrategy::Tree(model) => model.toggle(path, root),
            RenderStrategy::VirtualText { .. } => false,
        }
    }

    /// Loads the next chunk of the container at `path`.
    pub fn load_more(&mut self, path: &[usize]) -> usize {
        let Self { root, strategy, .. } = self;
        match strategy {
            RenderStrategy::Tree(model) => model.load_more(path, root),
            RenderStrategy::VirtualText { .. } => 0,
        }
    }

    /// Expands every realized container.
    pub fn expand_all(&mut self) {
        let Self { root, strategy, .. } = self;
        if let RenderStrategy::Tree(model) = strategy {
            model.expand_all(root);
        }
    }

    /// Collapses every realized container.
    pub fn collapse_all(&mut self) {
        if let RenderStrategy::Tree(model) = &mut self.strategy {
            model.collapse_all();
        }
    }

    /// The flattened visible rows of the tree strategy (empty when the
    /// virtual text strategy is active).
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        match &self.strategy {
            RenderStrategy::Tree(model) => model.visible_rows(),
            RenderStrategy::VirtualText { .. } => Vec::new(),
        }
    }
}
