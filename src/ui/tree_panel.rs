//! Rendering of the interactive JSON tree.
//!
//! Displays the flattened tree rows with:
//! - indentation based on depth
//! - expand/collapse indicators (▼/▶) for containers
//! - a size/count indicator on collapsed containers
//! - a "load more" marker for partially materialized containers
//! - syntax-colored keys and values, and a cursor highlight

use crate::app::state::AppState;
use crate::document::serializer::quote_string;
use crate::render::tree::{TreeRow, TreeRowKind, ValueKind};
use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the tree view with syntax highlighting and cursor.
pub fn render_tree_panel(f: &mut Frame, area: Rect, state: &AppState, colors: &ThemeColors) {
    let rows = state.rows();
    let max_line_num_width = if state.show_line_numbers() {
        rows.len().to_string().len()
    } else {
        0
    };
    let viewport_height = area.height as usize;

    let mut lines_to_render = Vec::new();
    for (line_num, row) in rows
        .iter()
        .enumerate()
        .skip(state.scroll_offset())
        .take(viewport_height)
    {
        let is_cursor = line_num == state.cursor_line();
        lines_to_render.push(render_row(
            row,
            line_num,
            is_cursor,
            max_line_num_width,
            colors,
        ));
    }

    let paragraph = Paragraph::new(lines_to_render)
        .block(Block::default().borders(Borders::NONE))
        .style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(paragraph, area);
}

fn render_row(
    row: &TreeRow,
    line_num: usize,
    is_cursor: bool,
    num_width: usize,
    colors: &ThemeColors,
) -> Line<'static> {
    let mut spans = Vec::new();

    if num_width > 0 {
        spans.push(Span::styled(
            format!("{:>width$} ", line_num + 1, width = num_width),
            Style::default()
                .fg(colors.foreground)
                .add_modifier(Modifier::DIM),
        ));
    }

    spans.push(Span::raw("  ".repeat(row.depth)));

    // Toggle glyph for containers, marker for load-more rows
    match row.kind {
        TreeRowKind::Node if row.expandable => {
            spans.push(Span::raw(if row.expanded { "▼ " } else { "▶ " }));
        }
        TreeRowKind::LoadMore => {
            spans.push(Span::raw("+ "));
        }
        _ => spans.push(Span::raw("  ")),
    }

    let cursor_style = Style::default()
        .fg(Color::White)
        .bg(colors.cursor)
        .add_modifier(Modifier::BOLD);

    if let Some(key) = &row.key {
        let key_style = if is_cursor {
            cursor_style
        } else {
            Style::default().fg(colors.key)
        };
        spans.push(Span::styled(format!("{}: ", quote_string(key)), key_style));
    }

    match row.kind {
        TreeRowKind::LoadMore => {
            let style = if is_cursor {
                cursor_style
            } else {
                Style::default().fg(colors.info)
            };
            spans.push(Span::styled(
                format!("load more ({} remaining)", row.remaining),
                style,
            ));
        }
        _ => {
            let value_style = if is_cursor {
                cursor_style
            } else {
                Style::default().fg(value_color(row, colors))
            };
            spans.push(Span::styled(row.text.clone(), value_style));

            // Count indicator: visible only while collapsed
            if row.expandable && !row.expanded {
                let noun = match row.value_kind {
                    ValueKind::Object => "fields",
                    _ => "items",
                };
                spans.push(Span::styled(
                    format!(" ({} {})", row.child_count, noun),
                    Style::default().fg(colors.preview),
                ));
            }

            if row.trailing_comma {
                spans.push(Span::styled(",", Style::default().fg(colors.foreground)));
            }
        }
    }

    Line::from(spans)
}

fn value_color(row: &TreeRow, colors: &ThemeColors) -> Color {
    if row.expandable && !row.expanded {
        return colors.preview;
    }
    match row.kind {
        TreeRowKind::Close => colors.foreground,
        _ => match row.value_kind {
            ValueKind::String => colors.string,
            ValueKind::Number => colors.number,
            ValueKind::Boolean => colors.boolean,
            ValueKind::Null => colors.null,
            ValueKind::Object | ValueKind::Array => colors.foreground,
        },
    }
}

/// Renders the placeholder shown before any document is loaded.
pub fn render_welcome(f: &mut Frame, area: Rect, colors: &ThemeColors) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  textquill — JSON formatter & URL inspector",
            Style::default()
                .fg(colors.foreground)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Press i and paste JSON to format it, for example:",
            Style::default().fg(colors.foreground),
        )),
        Line::from(Span::styled(
            r#"    {"name": "John Doe", "age": 30, "city": "New York"}"#,
            Style::default().fg(colors.preview),
        )),
        Line::from(Span::styled(
            r#"    [{"id": 1, "name": "Apple"}, {"id": 2, "name": "Banana"}]"#,
            Style::default().fg(colors.preview),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  v switches to the URL tool, ? shows all keys, :q quits",
            Style::default().fg(colors.preview),
        )),
    ];

    let paragraph =
        Paragraph::new(lines).style(Style::default().bg(colors.background).fg(colors.foreground));
    f.render_widget(paragraph, area);
}
