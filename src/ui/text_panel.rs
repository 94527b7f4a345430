//! Rendering of the virtualized serialized-text view.
//!
//! Large documents are shown as read-only text. Only the lines the
//! scroller's window covers are highlighted; the window itself is
//! recomputed by the scroller with throttling, so dragging through a
//! multi-megabyte document never re-highlights the whole file.

use crate::app::state::AppState;
use crate::render::highlight::{HighlightSpan, TokenClass};
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Renders the visible slice of serialized text with syntax coloring.
pub fn render_text_panel(f: &mut Frame, area: Rect, state: &mut AppState, colors: &ThemeColors) {
    let slice = match state.visible_text(area.height as usize, Instant::now()) {
        Some(slice) => slice,
        None => return,
    };

    let num_width = slice.total_lines.to_string().len();
    let mut lines_to_render = Vec::with_capacity(slice.lines.len());

    for (offset, spans) in slice.lines.iter().enumerate() {
        let mut rendered = Vec::with_capacity(spans.len() + 1);
        rendered.push(Span::styled(
            format!("{:>width$} ", slice.first_line + offset + 1, width = num_width),
            Style::default()
                .fg(colors.foreground)
                .add_modifier(Modifier::DIM),
        ));
        for span in spans {
            rendered.push(style_span(span, colors));
        }
        lines_to_render.push(Line::from(rendered));
    }

    let paragraph = Paragraph::new(lines_to_render)
        .style(Style::default().bg(colors.background).fg(colors.foreground));
    f.render_widget(paragraph, area);
}

fn style_span(span: &HighlightSpan, colors: &ThemeColors) -> Span<'static> {
    let style = match span.class {
        Some(TokenClass::Key) => Style::default().fg(colors.key),
        Some(TokenClass::String) => Style::default().fg(colors.string),
        Some(TokenClass::Number) => Style::default().fg(colors.number),
        Some(TokenClass::Boolean) => Style::default().fg(colors.boolean),
        Some(TokenClass::Null) => Style::default().fg(colors.null),
        None => Style::default().fg(colors.foreground),
    };
    Span::styled(span.text.clone(), style)
}
