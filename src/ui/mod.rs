//! UI module for the textquill terminal interface.
//!
//! This module provides the main UI structure for rendering the terminal
//! interface, including layout management and widget composition.

pub mod error_panel;
pub mod help_overlay;
pub mod message_area;
pub mod status_line;
pub mod text_panel;
pub mod tree_panel;
pub mod url_panel;

use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;

use crate::app::state::{AppState, View};
use crate::theme::Theme;

/// Main UI structure that manages the terminal interface rendering.
///
/// The UI is composed of three areas:
/// - Main view (top): the JSON tree / virtualized text / URL inspector
/// - Status line (middle): view, file info, indent, position
/// - Message area (bottom): messages and input prompts
pub struct UI {
    theme: Theme,
}

impl UI {
    /// Creates a new UI instance with the specified theme.
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Returns the current theme name.
    pub fn theme_name(&self) -> &str {
        &self.theme.name
    }

    /// Changes the current theme.
    ///
    /// Returns true if the theme was successfully changed, false if the
    /// theme name is invalid.
    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        use crate::theme::get_builtin_theme;

        if let Some(new_theme) = get_builtin_theme(theme_name) {
            self.theme = new_theme;
            true
        } else {
            false
        }
    }

    /// Renders the complete UI layout.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal drawing fails.
    pub fn render<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        state: &mut AppState,
    ) -> Result<()> {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),    // Main view area
                    Constraint::Length(1), // Status line
                    Constraint::Length(1), // Message area
                ])
                .split(f.area());

            let colors = &self.theme.colors;

            match state.view() {
                View::Url => {
                    url_panel::render_url_panel(f, chunks[0], state, colors);
                }
                View::Json => {
                    if state.parse_report().is_some() {
                        error_panel::render_error_panel(f, chunks[0], state, colors);
                    } else if state.session().is_some() {
                        let viewport = chunks[0].height as usize;
                        state.adjust_scroll_to_cursor(viewport);
                        if state.session().map(|s| s.is_virtual()).unwrap_or(false) {
                            text_panel::render_text_panel(f, chunks[0], state, colors);
                        } else {
                            tree_panel::render_tree_panel(f, chunks[0], state, colors);
                        }
                    } else {
                        tree_panel::render_welcome(f, chunks[0], colors);
                    }
                }
            }

            status_line::render_status_line(f, chunks[1], state, colors);
            message_area::render_message_area(f, chunks[2], state, colors);

            if state.show_help() {
                help_overlay::render_help_overlay(f, colors);
            }
        })?;

        Ok(())
    }
}
