//! Help overlay listing the keybindings.

use crate::theme::colors::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("j/k, arrows", "move"),
    ("Enter/space", "toggle container / load more"),
    ("E / C", "expand all / collapse all"),
    ("g / G", "top / bottom"),
    ("Ctrl-d/u/f/b", "page movement"),
    ("i", "paste JSON to format"),
    ("/  n", "search, next match"),
    ("c", "copy output"),
    ("v", "switch JSON <-> URL tool"),
    ("u, Enter", "URL tool: edit address, parse"),
    ("e, E, D", "URL tool: edit text, encode, decode"),
    ("1 / 2 / 3", "URL tool: copy origin / params / fragment"),
    (":w FILE", "save formatted JSON"),
    (":export FILE", "export highlighted HTML"),
    (":minify [FILE]", "minify to clipboard or file"),
    (":validate", "re-check the last input"),
    (":indent 2|4|tab", "change indent"),
    (":theme NAME", "switch theme"),
    (":clear  :q", "clear view, quit"),
];

/// Renders the help overlay centered on top of the UI.
pub fn render_help_overlay(f: &mut Frame, colors: &ThemeColors) {
    let area = centered_rect(f.area(), 52, HELP_ENTRIES.len() as u16 + 4);
    f.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    for (keys, action) in HELP_ENTRIES {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<16}", keys),
                Style::default().fg(colors.key).add_modifier(Modifier::BOLD),
            ),
            Span::styled((*action).to_string(), Style::default().fg(colors.foreground)),
        ]));
    }

    let block = Block::default()
        .title(" textquill help (any key to close) ")
        .borders(Borders::ALL)
        .style(Style::default().bg(colors.background).fg(colors.foreground));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered_rect(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}
