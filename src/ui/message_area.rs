//! Message area rendering for displaying messages and prompt input.

use crate::app::state::{AppState, MessageLevel, Mode};
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders the message area at the bottom of the screen.
///
/// Displays:
/// - Input mode: the active prompt with the input buffer
/// - Command mode: `:` prompt with input buffer
/// - Search mode: `/` prompt with input buffer
/// - Otherwise: the current message, if any
pub fn render_message_area(f: &mut Frame, area: Rect, state: &AppState, colors: &ThemeColors) {
    let content = match state.mode() {
        Mode::Input => {
            let text = format!("{}{}", state.input_prompt(), state.input_buffer());
            Line::from(vec![Span::styled(
                text,
                Style::default().fg(colors.foreground),
            )])
        }
        Mode::Command => {
            let text = format!(":{}", state.command_buffer());
            Line::from(vec![Span::styled(
                text,
                Style::default().fg(colors.foreground),
            )])
        }
        Mode::Search => {
            let text = format!("/{}", state.search_buffer());
            Line::from(vec![Span::styled(text, Style::default().fg(colors.info))])
        }
        Mode::Normal => {
            if let Some(message) = state.message() {
                let color = match message.level {
                    MessageLevel::Error => colors.error,
                    MessageLevel::Warning => colors.warning,
                    MessageLevel::Info => colors.info,
                };
                Line::from(vec![Span::styled(
                    message.text.clone(),
                    Style::default().fg(color),
                )])
            } else {
                Line::from("")
            }
        }
    };

    let paragraph =
        Paragraph::new(content).style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}
