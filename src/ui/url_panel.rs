//! Rendering of the URL inspector.
//!
//! Shows the address line, the decomposed parts of the last parsed URL
//! (with query parameters as highlighted JSON), and the encode/decode
//! fields.

use crate::app::state::AppState;
use crate::document::serializer::serialize;
use crate::render::highlight::{highlight_spans, HighlightSpan, TokenClass};
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_url_panel(f: &mut Frame, area: Rect, state: &AppState, colors: &ThemeColors) {
    let label = Style::default().fg(colors.key).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(colors.foreground);
    let hint = Style::default().fg(colors.preview);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("URL: ", label),
            Span::styled(state.url_input().to_string(), value),
        ]),
        Line::from(Span::styled(
            "  u edits the address, Enter parses it",
            hint,
        )),
        Line::from(""),
    ];

    if let Some(parsed) = state.parsed_url() {
        let port_text = match parsed.port {
            Some(port) => port.to_string(),
            None => "(default)".to_string(),
        };
        let hash_text = match &parsed.hash {
            Some(hash) => format!("#{}", hash),
            None => "(none)".to_string(),
        };

        lines.push(field(colors, "Protocol", &parsed.protocol));
        lines.push(field(colors, "Host", &parsed.host()));
        lines.push(field(colors, "Hostname", &parsed.hostname));
        lines.push(field(colors, "Port", &port_text));
        lines.push(field(colors, "Path", &parsed.pathname));
        lines.push(field(colors, "Hash", &hash_text));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Query parameters:", label)));

        let params_json = serialize(&parsed.params_value(), state.indent());
        for text_line in params_json.lines() {
            let mut spans = vec![Span::raw("  ")];
            for span in highlight_spans(text_line) {
                spans.push(style_span(&span, colors));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  copy: 1 origin+path, 2 params JSON, 3 fragment",
            hint,
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Text:   ", label),
        Span::styled(state.encode_input().to_string(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Output: ", label),
        Span::styled(
            state.encode_output().to_string(),
            Style::default().fg(colors.string),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "  e edits the text, E encodes, D decodes, c copies the output",
        hint,
    )));

    let paragraph =
        Paragraph::new(lines).style(Style::default().bg(colors.background).fg(colors.foreground));
    f.render_widget(paragraph, area);
}

fn field(colors: &ThemeColors, name: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<10}", format!("{}:", name)),
            Style::default().fg(colors.key),
        ),
        Span::styled(text.to_string(), Style::default().fg(colors.foreground)),
    ])
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
