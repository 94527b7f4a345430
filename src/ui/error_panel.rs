//! Rendering of parse error reports.
//!
//! Shows the report built by the parser: message, location, a snippet of
//! the surrounding source with the offending line marked and a caret at
//! the failing column, and a list of common JSON mistakes.

use crate::app::state::AppState;
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_error_panel(f: &mut Frame, area: Rect, state: &AppState, colors: &ThemeColors) {
    let report = match state.parse_report() {
        Some(report) => report,
        None => return,
    };

    let mut lines_to_render = Vec::new();
    for line in report.lines() {
        let styled = if line.starts_with("Invalid JSON:") {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(colors.error).add_modifier(Modifier::BOLD),
            ))
        } else if line.starts_with("> ") || line.trim_start().starts_with('^') {
            // The offending line and the caret under it
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(colors.error),
            ))
        } else if line.starts_with("Location:") {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(colors.warning),
            ))
        } else if line.starts_with("Common issues:") {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(colors.preview),
            ))
        } else {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(colors.foreground),
            ))
        };
        lines_to_render.push(styled);
    }

    let paragraph = Paragraph::new(lines_to_render)
        .style(Style::default().bg(colors.background).fg(colors.foreground));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::serializer::IndentSpec;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_error_panel_shows_caret_line() {
        let mut state = AppState::new(IndentSpec::default());
        state.open_document("{\n  \"a\": 1,\n}", None);

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let colors = ThemeColors::default_dark();
        terminal
            .draw(|f| render_error_panel(f, f.area(), &state, &colors))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Invalid JSON"));
        assert!(content.contains("Location: line 3"));
        assert!(content.contains("^"));
        assert!(content.contains("Common issues"));
    }
}
