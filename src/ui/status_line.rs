//! Status line rendering.

use crate::app::state::{AppState, View};
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the status line: tool name, file, view, indent, and position.
pub fn render_status_line(f: &mut Frame, area: Rect, state: &AppState, colors: &ThemeColors) {
    let style = Style::default()
        .bg(colors.status_line_bg)
        .fg(colors.status_line_fg);

    let view_name = match state.view() {
        View::Json => "JSON",
        View::Url => "URL",
    };
    let file = state.filename().unwrap_or("(no file)");

    let position = match state.view() {
        View::Json => match state.session() {
            Some(session) if session.is_virtual() => {
                format!("line {}", state.text_scroll() + 1)
            }
            Some(_) => {
                let total = state.rows().len();
                format!("{}/{}", state.cursor_line() + 1, total.max(1))
            }
            None => String::new(),
        },
        View::Url => String::new(),
    };

    let left = format!(
        " textquill │ {} │ {} │ indent: {}",
        view_name,
        file,
        state.indent()
    );
    let width = area.width as usize;
    let padding = width
        .saturating_sub(left.chars().count())
        .saturating_sub(position.chars().count() + 1);

    let line = Line::from(vec![
        Span::styled(left, style),
        Span::styled(" ".repeat(padding), style),
        Span::styled(format!("{} ", position), style),
    ]);

    f.render_widget(Paragraph::new(line).style(style), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::serializer::IndentSpec;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_status_line_content() {
        let mut state = AppState::new(IndentSpec::default());
        state.open_document(r#"{"a": 1}"#, None);

        let backend = TestBackend::new(80, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let colors = ThemeColors::default_dark();
        terminal
            .draw(|f| render_status_line(f, f.area(), &state, &colors))
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("textquill"));
        assert!(content.contains("JSON"));
        assert!(content.contains("(no file)"));
        assert!(content.contains("2 spaces"));
    }
}
