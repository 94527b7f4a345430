//! Application state.
//!
//! [`AppState`] holds everything the UI reads and the input handler
//! mutates: the current [`RenderSession`], the flattened tree rows, the
//! cursor and scroll positions, mode and input buffers, the URL inspector
//! fields, and the transient status message. There is exactly one session
//! at a time; a new parse, an indent change, or a clear replaces it
//! wholesale.

use crate::app::clipboard::copy_text;
use crate::document::parser::{parse_json, validate_json};
use crate::document::serializer::IndentSpec;
use crate::file::saver::{export_html, save_text};
use crate::render::highlight::{highlight, highlight_spans, HighlightSpan};
use crate::render::scroll::ViewportWindow;
use crate::render::session::{RenderSession, RenderStrategy};
use crate::render::tree::{TreeRow, TreeRowKind};
use crate::theme::get_builtin_theme;
use crate::url::{decode_component, encode_component, parse_url, ParsedUrl};
use std::time::{Duration, Instant};

/// How long a status message stays on screen before auto-dismissing.
pub const MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Which tool is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Json,
    Url,
}

/// Input mode, vim-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
    Command,
    Search,
}

/// Which field an Input-mode buffer feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    /// JSON document text to parse and render
    Document,
    /// The URL inspector's address line
    UrlLine,
    /// The URL inspector's encode/decode text
    EncodeLine,
}

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Error,
    Warning,
    Info,
}

/// A transient message shown in the message area.
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
    created: Instant,
}

/// Copyable parts of a parsed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlPart {
    OriginAndPath,
    Params,
    Fragment,
}

/// Result of executing a `:` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

/// The slice of serialized text lines to draw this frame.
pub struct TextSlice {
    /// Absolute index of the first returned line
    pub first_line: usize,
    pub total_lines: usize,
    pub lines: Vec<Vec<HighlightSpan>>,
}

pub struct AppState {
    view: View,
    mode: Mode,
    input_target: InputTarget,

    session: Option<RenderSession>,
    rows: Vec<TreeRow>,
    cursor_line: usize,
    scroll_offset: usize,
    last_viewport_rows: usize,

    text_scroll: usize,
    text_window: Option<ViewportWindow>,
    text_window_spans: Vec<Vec<HighlightSpan>>,

    /// The raw text last submitted for parsing, kept for `:validate`
    last_input: String,
    /// Rendered error report when the last parse failed
    parse_report: Option<String>,

    message: Option<Message>,
    input_buffer: String,
    command_buffer: String,
    search_buffer: String,
    filename: Option<String>,
    indent: IndentSpec,
    show_line_numbers: bool,
    enable_mouse: bool,
    pending_theme: Option<String>,
    show_help: bool,

    url_input: String,
    parsed_url: Option<ParsedUrl>,
    encode_input: String,
    encode_output: String,
}

impl AppState {
    pub fn new(indent: IndentSpec) -> Self {
        Self {
            view: View::Json,
            mode: Mode::Normal,
            input_target: InputTarget::Document,
            session: None,
            rows: Vec::new(),
            cursor_line: 0,
            scroll_offset: 0,
            last_viewport_rows: 24,
            text_scroll: 0,
            text_window: None,
            text_window_spans: Vec::new(),
            last_input: String::new(),
            parse_report: None,
            message: None,
            input_buffer: String::new(),
            command_buffer: String::new(),
            search_buffer: String::new(),
            filename: None,
            indent,
            show_line_numbers: true,
            enable_mouse: true,
            pending_theme: None,
            show_help: false,
            url_input: String::new(),
            parsed_url: None,
            encode_input: String::new(),
            encode_output: String::new(),
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn view(&self) -> View {
        self.view
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn input_target(&self) -> InputTarget {
        self.input_target
    }

    pub fn session(&self) -> Option<&RenderSession> {
        self.session.as_ref()
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn text_scroll(&self) -> usize {
        self.text_scroll
    }

    pub fn parse_report(&self) -> Option<&str> {
        self.parse_report.as_deref()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn search_buffer(&self) -> &str {
        &self.search_buffer
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn indent(&self) -> IndentSpec {
        self.indent
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn set_show_line_numbers(&mut self, on: bool) {
        self.show_line_numbers = on;
    }

    pub fn enable_mouse(&self) -> bool {
        self.enable_mouse
    }

    pub fn set_enable_mouse(&mut self, on: bool) {
        self.enable_mouse = on;
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn parsed_url(&self) -> Option<&ParsedUrl> {
        self.parsed_url.as_ref()
    }

    pub fn encode_input(&self) -> &str {
        &self.encode_input
    }

    pub fn encode_output(&self) -> &str {
        &self.encode_output
    }

    /// Takes a theme change requested via `:theme`, if any.
    pub fn take_pending_theme(&mut self) -> Option<String> {
        self.pending_theme.take()
    }

    // --- messages --------------------------------------------------------

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Sets a status message, replacing any current one immediately.
    pub fn set_message(&mut self, text: String, level: MessageLevel) {
        self.message = Some(Message {
            text,
            level,
            created: Instant::now(),
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Expires the status message after [`MESSAGE_TTL`]. Called from the
    /// event loop on every tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some(message) = &self.message {
            if now.duration_since(message.created) >= MESSAGE_TTL {
                self.message = None;
            }
        }
    }

    // --- modes and buffers -----------------------------------------------

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Json => View::Url,
            View::Url => View::Json,
        };
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn enter_input(&mut self, target: InputTarget) {
        self.mode = Mode::Input;
        self.input_target = target;
        self.input_buffer = match target {
            InputTarget::Document => String::new(),
            InputTarget::UrlLine => self.url_input.clone(),
            InputTarget::EncodeLine => self.encode_input.clone(),
        };
        self.clear_message();
    }

    pub fn enter_command(&mut self) {
        self.mode = Mode::Command;
        self.command_buffer.clear();
        self.clear_message();
    }

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.search_buffer.clear();
        self.clear_message();
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    /// The prompt label for the active input target.
    pub fn input_prompt(&self) -> &'static str {
        match self.input_target {
            InputTarget::Document => "JSON: ",
            InputTarget::UrlLine => "URL: ",
            InputTarget::EncodeLine => "Text: ",
        }
    }

    pub fn insert_char(&mut self, c: char) {
        match self.mode {
            Mode::Input => self.input_buffer.push(c),
            Mode::Command => self.command_buffer.push(c),
            Mode::Search => self.search_buffer.push(c),
            Mode::Normal => {}
        }
    }

    pub fn insert_backspace(&mut self) {
        match self.mode {
            Mode::Input => {
                self.input_buffer.pop();
            }
            Mode::Command => {
                self.command_buffer.pop();
            }
            Mode::Search => {
                self.search_buffer.pop();
            }
            Mode::Normal => {}
        }
    }

    /// Submits the Input-mode buffer to its target field.
    pub fn submit_input(&mut self) {
        self.mode = Mode::Normal;
        let text = std::mem::take(&mut self.input_buffer);
        match self.input_target {
            InputTarget::Document => self.open_document(&text, None),
            InputTarget::UrlLine => {
                self.url_input = text.trim().to_string();
                self.parse_url_input();
            }
            InputTarget::EncodeLine => {
                self.encode_input = text.trim().to_string();
            }
        }
    }

    // --- document lifecycle ----------------------------------------------

    /// Parses text and swaps in a fresh render session.
    ///
    /// On failure the previous session is discarded and the error report
    /// (with source snippet and caret) is kept for display.
    pub fn open_document(&mut self, text: &str, filename: Option<String>) {
        let trimmed = text.trim();
        self.last_input = trimmed.to_string();

        if trimmed.is_empty() {
            self.set_message(
                "Please enter some JSON text to format".to_string(),
                MessageLevel::Error,
            );
            return;
        }

        match parse_json(trimmed) {
            Ok(value) => {
                let session = RenderSession::new(value, trimmed.to_string(), self.indent);
                let virtual_note = session.is_virtual();
                self.session = Some(session);
                self.parse_report = None;
                self.filename = filename;
                self.reset_positions();
                self.rebuild_rows();

                if virtual_note {
                    let total = self.text_total_lines();
                    self.set_message(
                        format!("Large document: {} lines (read-only view)", total),
                        MessageLevel::Info,
                    );
                } else {
                    self.set_message(
                        "JSON formatted successfully".to_string(),
                        MessageLevel::Info,
                    );
                }
            }
            Err(err) => {
                self.session = None;
                self.rows.clear();
                self.reset_positions();
                self.parse_report = Some(err.report(trimmed));
                self.set_message(format!("Invalid JSON: {}", err.message), MessageLevel::Error);
            }
        }
    }

    fn reset_positions(&mut self) {
        self.cursor_line = 0;
        self.scroll_offset = 0;
        self.text_scroll = 0;
        self.text_window = None;
        self.text_window_spans.clear();
    }

    fn rebuild_rows(&mut self) {
        self.rows = match &self.session {
            Some(session) => session.visible_rows(),
            None => Vec::new(),
        };
        if !self.rows.is_empty() {
            self.cursor_line = self.cursor_line.min(self.rows.len() - 1);
        } else {
            self.cursor_line = 0;
        }
    }

    /// Clears the active view (document or URL fields).
    pub fn clear(&mut self) {
        match self.view {
            View::Json => {
                self.session = None;
                self.rows.clear();
                self.parse_report = None;
                self.last_input.clear();
                self.filename = None;
                self.reset_positions();
            }
            View::Url => {
                self.url_input.clear();
                self.parsed_url = None;
                self.encode_input.clear();
                self.encode_output.clear();
            }
        }
        self.clear_message();
    }

    /// Switches the indent unit by swapping in a re-serialized session.
    pub fn set_indent(&mut self, indent: IndentSpec) {
        self.indent = indent;
        if let Some(session) = &self.session {
            self.session = Some(session.reindent(indent));
            self.reset_positions();
            self.rebuild_rows();
        }
        self.set_message(format!("Indent: {}", indent), MessageLevel::Info);
    }

    // --- tree interaction ------------------------------------------------

    /// Activates the row under the cursor: toggles a container or loads
    /// the next chunk of a "load more" marker.
    pub fn activate_cursor_row(&mut self) {
        let row = match self.rows.get(self.cursor_line) {
            Some(row) => row.clone(),
            None => return,
        };
        if self.session.is_none() {
            return;
        }

        match row.kind {
            TreeRowKind::Node if row.expandable => {
                if let Some(session) = &mut self.session {
                    session.toggle(&row.path);
                }
                self.rebuild_rows();
            }
            TreeRowKind::Close => {
                // Activating a closing bracket collapses its container
                if let Some(session) = &mut self.session {
                    session.toggle(&row.path);
                }
                self.rebuild_rows();
                self.move_cursor_to_path(&row.path);
            }
            TreeRowKind::LoadMore => {
                let added = match &mut self.session {
                    Some(session) => session.load_more(&row.path),
                    None => 0,
                };
                self.rebuild_rows();
                if added > 0 {
                    self.set_message(format!("Loaded {} more items", added), MessageLevel::Info);
                }
            }
            _ => {}
        }
    }

    fn move_cursor_to_path(&mut self, path: &[usize]) {
        if let Some(idx) = self
            .rows
            .iter()
            .position(|r| r.kind == TreeRowKind::Node && r.path == path)
        {
            self.cursor_line = idx;
        }
    }

    pub fn expand_all(&mut self) {
        if let Some(session) = &mut self.session {
            session.expand_all();
        }
        self.rebuild_rows();
    }

    pub fn collapse_all(&mut self) {
        if let Some(session) = &mut self.session {
            session.collapse_all();
        }
        self.rebuild_rows();
        self.cursor_line = 0;
    }

    // --- movement --------------------------------------------------------

    fn text_total_lines(&self) -> usize {
        match self.session.as_ref().map(|s| s.strategy()) {
            Some(RenderStrategy::VirtualText { lines, .. }) => lines.len(),
            _ => 0,
        }
    }

    fn is_virtual(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_virtual())
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.is_virtual() {
            let max = self.text_total_lines().saturating_sub(1);
            self.text_scroll = add_clamped(self.text_scroll, delta, max);
        } else if !self.rows.is_empty() {
            let max = self.rows.len() - 1;
            self.cursor_line = add_clamped(self.cursor_line, delta, max);
        }
    }

    pub fn move_page(&mut self, pages: isize) {
        self.move_cursor(pages * self.last_viewport_rows as isize);
    }

    pub fn move_half_page(&mut self, halves: isize) {
        self.move_cursor(halves * (self.last_viewport_rows as isize / 2).max(1));
    }

    pub fn move_to_top(&mut self) {
        if self.is_virtual() {
            self.text_scroll = 0;
        } else {
            self.cursor_line = 0;
        }
    }

    pub fn move_to_bottom(&mut self) {
        if self.is_virtual() {
            self.text_scroll = self.text_total_lines().saturating_sub(1);
        } else {
            self.cursor_line = self.rows.len().saturating_sub(1);
        }
    }

    /// Keeps the cursor line inside the viewport; called by the UI with
    /// the current viewport height.
    pub fn adjust_scroll_to_cursor(&mut self, viewport_rows: usize) {
        self.last_viewport_rows = viewport_rows.max(1);
        if self.cursor_line < self.scroll_offset {
            self.scroll_offset = self.cursor_line;
        } else if self.cursor_line >= self.scroll_offset + self.last_viewport_rows {
            self.scroll_offset = self.cursor_line + 1 - self.last_viewport_rows;
        }
    }

    // --- virtualized text ------------------------------------------------

    /// Produces the highlighted lines to draw this frame.
    ///
    /// For small documents every line goes straight through the
    /// highlighter. For virtualized documents the scroller decides whether
    /// the window moved; an unchanged window reuses the previous
    /// highlighted spans untouched.
    pub fn visible_text(&mut self, viewport_rows: usize, now: Instant) -> Option<TextSlice> {
        let Self {
            session,
            text_scroll,
            text_window,
            text_window_spans,
            ..
        } = self;

        let session = session.as_mut()?;
        let (lines, scroller) = match session.strategy_mut() {
            RenderStrategy::VirtualText { lines, scroller } => (lines, scroller),
            RenderStrategy::Tree(_) => return None,
        };

        let total = lines.len();
        if total == 0 {
            return None;
        }
        *text_scroll = (*text_scroll).min(total - 1);

        if !scroller.is_virtual() {
            let end = (*text_scroll + viewport_rows).min(total);
            let rendered = lines[*text_scroll..end]
                .iter()
                .map(|line| highlight_spans(line))
                .collect();
            return Some(TextSlice {
                first_line: *text_scroll,
                total_lines: total,
                lines: rendered,
            });
        }

        let scroll_top = *text_scroll as f64 * scroller.line_height();
        let viewport_height = viewport_rows as f64 * scroller.line_height();
        if let Some(window) = scroller.on_scroll(scroll_top, viewport_height, now) {
            *text_window_spans = lines[window.start_line..window.end_line]
                .iter()
                .map(|line| highlight_spans(line))
                .collect();
            *text_window = Some(window);
        }

        let window = (*text_window)?;
        let rel_start = text_scroll
            .saturating_sub(window.start_line)
            .min(text_window_spans.len());
        let rel_end = (rel_start + viewport_rows).min(text_window_spans.len());

        Some(TextSlice {
            first_line: window.start_line + rel_start,
            total_lines: total,
            lines: text_window_spans[rel_start..rel_end].to_vec(),
        })
    }

    // --- search ----------------------------------------------------------

    pub fn submit_search(&mut self) {
        self.mode = Mode::Normal;
        let query = self.search_buffer.trim().to_string();

        if query.is_empty() {
            if let Some(session) = &mut self.session {
                session.set_search(None);
            }
            return;
        }

        if let Some(session) = &mut self.session {
            session.set_search(Some(query.clone()));
        }
        if !self.jump_to_match(true) {
            self.set_message(format!("No matches for {}", query), MessageLevel::Info);
        }
    }

    pub fn next_match(&mut self) {
        let has_query = self
            .session
            .as_ref()
            .and_then(|s| s.search())
            .is_some();
        if !has_query {
            self.set_message("No active search".to_string(), MessageLevel::Info);
            return;
        }
        if !self.jump_to_match(false) {
            self.set_message("No matches".to_string(), MessageLevel::Info);
        }
    }

    fn jump_to_match(&mut self, include_current: bool) -> bool {
        let query = match self.session.as_ref().and_then(|s| s.search()) {
            Some(query) => query.to_string(),
            None => return false,
        };

        let found = if self.is_virtual() {
            let lines = match self.session.as_ref().map(|s| s.strategy()) {
                Some(RenderStrategy::VirtualText { lines, .. }) => lines,
                _ => return false,
            };
            find_wrapping(lines.len(), self.text_scroll, include_current, |idx| {
                lines[idx].contains(&query)
            })
        } else {
            let rows = &self.rows;
            find_wrapping(rows.len(), self.cursor_line, include_current, |idx| {
                let row = &rows[idx];
                row.text.contains(&query)
                    || row.key.as_deref().is_some_and(|k| k.contains(&query))
            })
        };

        match found {
            Some(idx) => {
                if self.is_virtual() {
                    self.text_scroll = idx;
                } else {
                    self.cursor_line = idx;
                }
                true
            }
            None => false,
        }
    }

    // --- output operations -----------------------------------------------

    /// Copies the active view's output to the clipboard.
    pub fn copy_output(&mut self) {
        let text = match self.view {
            View::Json => match &self.session {
                Some(session) => session.serialized().to_string(),
                None => {
                    self.set_message("No formatted JSON to copy".to_string(), MessageLevel::Error);
                    return;
                }
            },
            View::Url => {
                if self.encode_output.is_empty() {
                    self.set_message("No output to copy".to_string(), MessageLevel::Error);
                    return;
                }
                self.encode_output.clone()
            }
        };
        self.copy_with_feedback(&text);
    }

    fn copy_with_feedback(&mut self, text: &str) {
        match copy_text(text) {
            Ok(()) => {
                self.set_message("Copied to clipboard".to_string(), MessageLevel::Info);
            }
            Err(err) => {
                self.set_message(err.to_string(), MessageLevel::Error);
            }
        }
    }

    /// Writes the serialized document (or, with `minified`, its compact
    /// form) to a file.
    pub fn save_document(&mut self, path: &str, minified: bool) {
        let text = match &self.session {
            Some(session) => {
                if minified {
                    session.minified()
                } else {
                    session.serialized().to_string()
                }
            }
            None => {
                self.set_message("No document to save".to_string(), MessageLevel::Error);
                return;
            }
        };

        match save_text(path, &text) {
            Ok(()) => self.set_message(format!("Saved {}", path), MessageLevel::Info),
            Err(err) => self.set_message(err.to_string(), MessageLevel::Error),
        }
    }

    /// Exports the document as highlighted HTML.
    pub fn export_document(&mut self, path: &str) {
        let body = match &self.session {
            Some(session) => highlight(session.serialized()),
            None => {
                self.set_message("No document to export".to_string(), MessageLevel::Error);
                return;
            }
        };
        let title = self.filename.clone().unwrap_or_else(|| "document".to_string());

        match export_html(path, &title, &body) {
            Ok(()) => self.set_message(format!("Exported {}", path), MessageLevel::Info),
            Err(err) => self.set_message(err.to_string(), MessageLevel::Error),
        }
    }

    /// Minifies the document: to a file when a path is given, otherwise to
    /// the clipboard.
    pub fn minify_document(&mut self, path: Option<&str>) {
        let minified = match &self.session {
            Some(session) => session.minified(),
            None => {
                self.set_message("No document to minify".to_string(), MessageLevel::Error);
                return;
            }
        };

        match path {
            Some(path) => match save_text(path, &minified) {
                Ok(()) => self.set_message(
                    format!("Minified JSON saved to {}", path),
                    MessageLevel::Info,
                ),
                Err(err) => self.set_message(err.to_string(), MessageLevel::Error),
            },
            None => match copy_text(&minified) {
                Ok(()) => self.set_message(
                    format!("Minified JSON copied ({} bytes)", minified.len()),
                    MessageLevel::Info,
                ),
                Err(err) => self.set_message(err.to_string(), MessageLevel::Error),
            },
        }
    }

    /// Re-validates the last submitted input text.
    pub fn validate_document(&mut self) {
        if self.last_input.is_empty() {
            self.set_message(
                "Please enter some JSON text to validate".to_string(),
                MessageLevel::Error,
            );
            return;
        }
        match validate_json(&self.last_input) {
            Ok(()) => self.set_message("Valid JSON".to_string(), MessageLevel::Info),
            Err(err) => {
                self.set_message(format!("Invalid JSON: {}", err.message), MessageLevel::Error)
            }
        }
    }

    // --- URL tool --------------------------------------------------------

    pub fn parse_url_input(&mut self) {
        let input = self.url_input.trim().to_string();
        if input.is_empty() {
            self.set_message("Please enter a URL to parse".to_string(), MessageLevel::Error);
            return;
        }

        match parse_url(&input) {
            Ok(parsed) => {
                self.parsed_url = Some(parsed);
                self.set_message("URL parsed successfully".to_string(), MessageLevel::Info);
            }
            Err(err) => {
                self.set_message(err.to_string(), MessageLevel::Error);
            }
        }
    }

    pub fn encode_text(&mut self) {
        if self.encode_input.is_empty() {
            self.set_message(
                "Please enter some text to encode".to_string(),
                MessageLevel::Error,
            );
            return;
        }
        self.encode_output = encode_component(&self.encode_input);
        self.set_message("Text encoded successfully".to_string(), MessageLevel::Info);
    }

    /// Decodes the encode/decode input. On a malformed escape the output
    /// field is left unchanged and the error is surfaced verbatim.
    pub fn decode_text(&mut self) {
        if self.encode_input.is_empty() {
            self.set_message(
                "Please enter some text to decode".to_string(),
                MessageLevel::Error,
            );
            return;
        }
        match decode_component(&self.encode_input) {
            Ok(decoded) => {
                self.encode_output = decoded;
                self.set_message("Text decoded successfully".to_string(), MessageLevel::Info);
            }
            Err(err) => {
                self.set_message(format!("Failed to decode: {}", err), MessageLevel::Error);
            }
        }
    }

    /// Copies one part of the parsed URL to the clipboard.
    pub fn copy_url_part(&mut self, part: UrlPart) {
        let text = match &self.parsed_url {
            Some(parsed) => match part {
                UrlPart::OriginAndPath => parsed.origin_and_path(),
                UrlPart::Params => {
                    crate::document::serializer::serialize(&parsed.params_value(), self.indent)
                }
                UrlPart::Fragment => match &parsed.hash {
                    Some(hash) => format!("#{}", hash),
                    None => {
                        self.set_message("URL has no fragment".to_string(), MessageLevel::Info);
                        return;
                    }
                },
            },
            None => {
                self.set_message("No parsed URL".to_string(), MessageLevel::Error);
                return;
            }
        };
        self.copy_with_feedback(&text);
    }

    // --- commands --------------------------------------------------------

    /// Executes a `:` command line.
    pub fn execute_command(&mut self) -> CommandOutcome {
        self.mode = Mode::Normal;
        let line = std::mem::take(&mut self.command_buffer);
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(command) => command,
            None => return CommandOutcome::Continue,
        };
        let arg = words.next();

        match command {
            "q" | "quit" => return CommandOutcome::Quit,
            "w" | "save" => match arg {
                Some(path) => self.save_document(path, false),
                None => self.set_message("Usage: :w <file>".to_string(), MessageLevel::Error),
            },
            "export" => match arg {
                Some(path) => self.export_document(path),
                None => self.set_message("Usage: :export <file>".to_string(), MessageLevel::Error),
            },
            "minify" => self.minify_document(arg),
            "validate" => self.validate_document(),
            "clear" => self.clear(),
            "copy" => self.copy_output(),
            "indent" => match arg.and_then(IndentSpec::parse) {
                Some(spec) => self.set_indent(spec),
                None => self.set_message(
                    "Usage: :indent 2|4|tab".to_string(),
                    MessageLevel::Error,
                ),
            },
            "theme" => match arg {
                Some(name) if get_builtin_theme(name).is_some() => {
                    self.pending_theme = Some(name.to_string());
                }
                Some(name) => {
                    self.set_message(format!("Unknown theme: {}", name), MessageLevel::Error)
                }
                None => self.set_message("Usage: :theme <name>".to_string(), MessageLevel::Error),
            },
            "url" => self.set_view(View::Url),
            "json" => self.set_view(View::Json),
            "help" => self.show_help = true,
            other => {
                self.set_message(format!("Unknown command: {}", other), MessageLevel::Error)
            }
        }

        CommandOutcome::Continue
    }
}

fn add_clamped(value: usize, delta: isize, max: usize) -> usize {
    let moved = value as isize + delta;
    moved.clamp(0, max as isize) as usize
}

fn find_wrapping<F>(len: usize, from: usize, include_current: bool, pred: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    if len == 0 {
        return None;
    }
    let start = if include_current { from } else { from + 1 };
    (0..len).map(|i| (start + i) % len).find(|&idx| pred(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(doc: &str) -> AppState {
        let mut state = AppState::new(IndentSpec::default());
        state.open_document(doc, None);
        state
    }

    #[test]
    fn test_open_document_success() {
        let state = state_with(r#"{"a": 1, "b": [1, 2, 3]}"#);
        assert!(state.session().is_some());
        assert!(state.parse_report().is_none());
        assert_eq!(state.rows().len(), 8);
        assert_eq!(state.message().unwrap().level, MessageLevel::Info);
    }

    #[test]
    fn test_open_document_failure_keeps_report() {
        let state = state_with(r#"{"a": 1,}"#);
        assert!(state.session().is_none());
        assert!(state.rows().is_empty());
        let report = state.parse_report().unwrap();
        assert!(report.contains("Location: line 1"));
        assert!(report.contains("^"));
        assert_eq!(state.message().unwrap().level, MessageLevel::Error);
    }

    #[test]
    fn test_open_empty_document_is_error() {
        let state = state_with("   ");
        assert!(state.session().is_none());
        assert_eq!(state.message().unwrap().level, MessageLevel::Error);
    }

    #[test]
    fn test_reparse_replaces_session() {
        let mut state = state_with(r#"{"a": 1}"#);
        let rows_before = state.rows().len();
        state.open_document(r#"[1, 2, 3, 4]"#, None);
        assert_ne!(state.rows().len(), rows_before);
        assert_eq!(state.cursor_line(), 0);
    }

    #[test]
    fn test_activate_toggles_and_rebuilds() {
        let mut state = state_with(r#"{"a": 1, "b": [1, 2, 3]}"#);
        state.move_cursor(2); // onto "b"
        assert_eq!(state.rows()[state.cursor_line()].key.as_deref(), Some("b"));

        state.activate_cursor_row();
        assert_eq!(state.rows().len(), 4);

        state.activate_cursor_row();
        assert_eq!(state.rows().len(), 8);
    }

    #[test]
    fn test_message_expires_after_ttl() {
        let mut state = state_with(r#"{"a": 1}"#);
        assert!(state.message().is_some());

        state.tick(Instant::now());
        assert!(state.message().is_some());

        state.tick(Instant::now() + MESSAGE_TTL);
        assert!(state.message().is_none());
    }

    #[test]
    fn test_new_message_replaces_old() {
        let mut state = AppState::new(IndentSpec::default());
        state.set_message("first".to_string(), MessageLevel::Info);
        state.set_message("second".to_string(), MessageLevel::Error);
        assert_eq!(state.message().unwrap().text, "second");
    }

    #[test]
    fn test_cursor_clamped_to_rows() {
        let mut state = state_with(r#"[1, 2]"#);
        // [, 1, 2, ] -> 4 rows
        state.move_cursor(100);
        assert_eq!(state.cursor_line(), 3);
        state.move_cursor(-100);
        assert_eq!(state.cursor_line(), 0);
    }

    #[test]
    fn test_command_mode_round_trip() {
        let mut state = state_with(r#"{"a": 1}"#);
        state.enter_command();
        for c in "validate".chars() {
            state.insert_char(c);
        }
        assert_eq!(state.command_buffer(), "validate");
        assert_eq!(state.execute_command(), CommandOutcome::Continue);
        assert_eq!(state.mode(), Mode::Normal);
        assert_eq!(state.message().unwrap().text, "Valid JSON");
    }

    #[test]
    fn test_quit_command() {
        let mut state = AppState::new(IndentSpec::default());
        state.enter_command();
        state.insert_char('q');
        assert_eq!(state.execute_command(), CommandOutcome::Quit);
    }

    #[test]
    fn test_unknown_command_reports_error() {
        let mut state = AppState::new(IndentSpec::default());
        state.enter_command();
        for c in "frobnicate".chars() {
            state.insert_char(c);
        }
        state.execute_command();
        assert_eq!(state.message().unwrap().level, MessageLevel::Error);
    }

    #[test]
    fn test_indent_command_swaps_session() {
        let mut state = state_with(r#"{"a": 1}"#);
        assert!(state.session().unwrap().serialized().contains("  \"a\""));

        state.enter_command();
        for c in "indent tab".chars() {
            state.insert_char(c);
        }
        state.execute_command();
        assert!(state.session().unwrap().serialized().contains("\t\"a\""));
        assert_eq!(state.indent(), IndentSpec::Tab);
    }

    #[test]
    fn test_theme_command_sets_pending() {
        let mut state = AppState::new(IndentSpec::default());
        state.enter_command();
        for c in "theme monokai".chars() {
            state.insert_char(c);
        }
        state.execute_command();
        assert_eq!(state.take_pending_theme().as_deref(), Some("monokai"));
        assert_eq!(state.take_pending_theme(), None);
    }

    #[test]
    fn test_clear_resets_json_view() {
        let mut state = state_with(r#"{"a": 1}"#);
        state.clear();
        assert!(state.session().is_none());
        assert!(state.rows().is_empty());
        assert!(state.parse_report().is_none());
    }

    #[test]
    fn test_url_flow() {
        let mut state = AppState::new(IndentSpec::default());
        state.set_view(View::Url);
        state.enter_input(InputTarget::UrlLine);
        for c in "https://example.com/p?a=1&a=2".chars() {
            state.insert_char(c);
        }
        state.submit_input();

        let parsed = state.parsed_url().unwrap();
        assert_eq!(parsed.hostname, "example.com");
        assert_eq!(parsed.params.len(), 2);
    }

    #[test]
    fn test_decode_error_leaves_output_unchanged() {
        let mut state = AppState::new(IndentSpec::default());
        state.set_view(View::Url);

        state.enter_input(InputTarget::EncodeLine);
        for c in "hello%20world".chars() {
            state.insert_char(c);
        }
        state.submit_input();
        state.decode_text();
        assert_eq!(state.encode_output(), "hello world");

        // Truncated escape: error surfaced, output untouched
        state.enter_input(InputTarget::EncodeLine);
        while !state.input_buffer().is_empty() {
            state.insert_backspace();
        }
        for c in "%E0%A4%A".chars() {
            state.insert_char(c);
        }
        state.submit_input();
        state.decode_text();
        assert_eq!(state.encode_output(), "hello world");
        let message = state.message().unwrap();
        assert_eq!(message.level, MessageLevel::Error);
        assert!(message.text.contains("byte 6"));
    }

    #[test]
    fn test_encode_round_trip_through_state() {
        let mut state = AppState::new(IndentSpec::default());
        state.enter_input(InputTarget::EncodeLine);
        for c in "a b".chars() {
            state.insert_char(c);
        }
        state.submit_input();
        state.encode_text();
        assert_eq!(state.encode_output(), "a%20b");
    }

    #[test]
    fn test_search_jumps_to_key() {
        let mut state = state_with(r#"{"alpha": 1, "beta": {"gamma": 2}}"#);
        state.enter_search();
        for c in "gamma".chars() {
            state.insert_char(c);
        }
        state.submit_search();

        let row = &state.rows()[state.cursor_line()];
        assert_eq!(row.key.as_deref(), Some("gamma"));
        assert_eq!(state.session().unwrap().search(), Some("gamma"));
    }

    #[test]
    fn test_search_wraps_around() {
        let mut state = state_with(r#"["x", "y", "x"]"#);
        state.enter_search();
        state.insert_char('x');
        state.submit_search();
        let first = state.cursor_line();

        state.next_match();
        let second = state.cursor_line();
        assert_ne!(first, second);

        state.next_match();
        assert_eq!(state.cursor_line(), first);
    }

    #[test]
    fn test_adjust_scroll_follows_cursor() {
        let mut state = state_with(r#"[0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19]"#);
        state.adjust_scroll_to_cursor(10);
        assert_eq!(state.scroll_offset(), 0);

        state.move_to_bottom();
        state.adjust_scroll_to_cursor(10);
        // 22 rows; cursor on the last one
        assert_eq!(state.scroll_offset(), state.cursor_line() + 1 - 10);

        state.move_to_top();
        state.adjust_scroll_to_cursor(10);
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_load_more_via_activate() {
        let numbers: Vec<String> = (0..150).map(|i| i.to_string()).collect();
        let doc = format!("[{}]", numbers.join(","));
        let mut state = state_with(&doc);

        // Deferred root renders collapsed as a single row
        assert_eq!(state.rows().len(), 1);
        state.activate_cursor_row();
        // open bracket + 50 children + load-more + close bracket
        assert_eq!(state.rows().len(), 53);

        // Move to the load-more row and activate it
        let lm = state
            .rows()
            .iter()
            .position(|r| r.kind == TreeRowKind::LoadMore)
            .unwrap();
        state.move_cursor(lm as isize - state.cursor_line() as isize);
        state.activate_cursor_row();
        // 100 children now, load-more still present
        assert_eq!(state.rows().len(), 103);
    }
}
