//! Viewport-based virtual scrolling over serialized text lines.
//!
//! When a serialized document exceeds
//! [`VIRTUAL_LINE_THRESHOLD`](super::VIRTUAL_LINE_THRESHOLD) lines, only the
//! lines intersecting the viewport (plus a buffer) are rendered. The
//! [`VirtualScroller`] recomputes the visible [`ViewportWindow`] from the
//! scroll offset, throttled to roughly one recompute per 16 ms, and skips
//! the recompute entirely when the window has not moved.

use super::{SCROLL_BUFFER_LINES, SCROLL_THROTTLE, VIRTUAL_LINE_THRESHOLD};
use std::time::Instant;

/// The currently rendered line range: `start_line..end_line` over the
/// flattened line array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportWindow {
    pub start_line: usize,
    pub end_line: usize,
}

impl ViewportWindow {
    pub fn len(&self) -> usize {
        self.end_line - self.start_line
    }

    pub fn is_empty(&self) -> bool {
        self.start_line == self.end_line
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start_line..self.end_line).contains(&line)
    }
}

/// Scroll state for one virtualized text view.
///
/// The scroller is parameterized over a fixed per-line height so the same
/// arithmetic serves both pixel-based hosts and the terminal, where a line
/// is one row (`line_height = 1.0`).
///
/// # Example
///
/// ```
/// use textquill::render::scroll::VirtualScroller;
///
/// let scroller = VirtualScroller::new(5000);
/// assert!(scroller.is_virtual());
///
/// // Scrolled to the midpoint of a 40-line viewport
/// let window = scroller.compute_window(2500.0, 40.0);
/// assert_eq!(window.start_line, 2480); // 20 lines of buffer above
/// assert_eq!(window.end_line, 2560);   // and 20 below
/// ```
#[derive(Debug, Clone)]
pub struct VirtualScroller {
    total_lines: usize,
    line_height: f64,
    buffer: usize,
    last_window: Option<ViewportWindow>,
    last_recompute: Option<Instant>,
}

impl VirtualScroller {
    /// Creates a scroller over `total_lines` lines, one row per line.
    pub fn new(total_lines: usize) -> Self {
        Self {
            total_lines,
            line_height: 1.0,
            buffer: SCROLL_BUFFER_LINES,
            last_window: None,
            last_recompute: None,
        }
    }

    /// Overrides the per-line height (pixels per line in a graphical host).
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    /// Overrides the buffer size (lines rendered beyond the viewport).
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    /// Whether this document is large enough to virtualize. Below the
    /// threshold all lines render in one pass.
    pub fn is_virtual(&self) -> bool {
        self.total_lines > VIRTUAL_LINE_THRESHOLD
    }

    /// Total scrollable height; the host sizes its scrollbar from this so
    /// the scrollbar reflects the true document size.
    pub fn content_height(&self) -> f64 {
        self.total_lines as f64 * self.line_height
    }

    /// The offset at which the rendered window must be positioned.
    pub fn offset_for(&self, window: ViewportWindow) -> f64 {
        window.start_line as f64 * self.line_height
    }

    /// The last window handed out by [`on_scroll`](Self::on_scroll).
    pub fn last_window(&self) -> Option<ViewportWindow> {
        self.last_window
    }

    /// Computes the window for a scroll position. Pure; does not update
    /// scroller state.
    ///
    /// Guarantees `0 <= start_line <= end_line <= total_lines` for any
    /// scroll position, including positions past the end of the content.
    pub fn compute_window(&self, scroll_top: f64, viewport_height: f64) -> ViewportWindow {
        let first = (scroll_top / self.line_height).floor() as isize - self.buffer as isize;
        let end_line = ((((scroll_top + viewport_height) / self.line_height).ceil() as usize)
            + self.buffer)
            .min(self.total_lines);
        let start_line = (first.max(0) as usize).min(end_line);

        ViewportWindow {
            start_line,
            end_line,
        }
    }

    /// Handles one scroll event.
    ///
    /// Returns the new window when a re-render is needed, or `None` when
    /// the event falls inside the throttle interval or the window is
    /// unchanged from the last render. Coalescing is last-write-wins: a
    /// throttled event is simply superseded by the next one, which sees
    /// the latest scroll position.
    pub fn on_scroll(
        &mut self,
        scroll_top: f64,
        viewport_height: f64,
        now: Instant,
    ) -> Option<ViewportWindow> {
        if let Some(last) = self.last_recompute {
            if now.duration_since(last) < SCROLL_THROTTLE {
                return None;
            }
        }
        self.last_recompute = Some(now);

        let window = self.compute_window(scroll_top, viewport_height);
        if self.last_window == Some(window) {
            return None;
        }
        self.last_window = Some(window);
        Some(window)
    }
}
