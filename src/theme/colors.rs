//! Color definitions for textquill themes.
//!
//! This module defines the [`ThemeColors`] struct which contains all color
//! values used in the textquill terminal UI. Colors are organized into
//! three categories: syntax highlighting, UI elements, and semantic colors.

use ratatui::style::Color;

/// Defines all colors used in a textquill theme.
///
/// - **Syntax colors**: JSON token highlighting (keys, strings, numbers, …)
/// - **UI colors**: interface chrome (background, foreground, cursor, status line)
/// - **Semantic colors**: messages and highlights (errors, warnings, info, search)
///
/// # Examples
///
/// ```
/// use textquill::theme::colors::ThemeColors;
///
/// let dark = ThemeColors::default_dark();
/// println!("Background: {:?}", dark.background);
/// ```
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Syntax colors
    /// Color for JSON object keys.
    pub key: Color,
    /// Color for JSON string values.
    pub string: Color,
    /// Color for JSON number values.
    pub number: Color,
    /// Color for JSON boolean values (true/false).
    pub boolean: Color,
    /// Color for JSON null values.
    pub null: Color,

    // UI colors
    /// Main background color.
    pub background: Color,
    /// Main foreground/text color (brackets, commas, plain text).
    pub foreground: Color,
    /// Color for the cursor line highlight.
    pub cursor: Color,
    /// Background color for the status line.
    pub status_line_bg: Color,
    /// Foreground/text color for the status line.
    pub status_line_fg: Color,

    // Semantic colors
    /// Color for error messages and indicators.
    pub error: Color,
    /// Color for warning messages.
    pub warning: Color,
    /// Color for informational messages and the load-more affordance.
    pub info: Color,
    /// Background color for search result highlights.
    pub search_highlight: Color,
    /// Color for collapsed previews and size/count indicators.
    pub preview: Color,
}

impl ThemeColors {
    /// Returns the default dark color scheme.
    ///
    /// Uses ANSI colors so the actual RGB values adapt to the user's
    /// terminal color scheme.
    pub fn default_dark() -> Self {
        Self {
            key: Color::LightBlue,
            string: Color::Green,
            number: Color::Magenta,
            boolean: Color::Yellow,
            null: Color::DarkGray,

            background: Color::Reset,
            foreground: Color::Gray,
            cursor: Color::LightBlue,
            status_line_bg: Color::White,
            status_line_fg: Color::Black,

            error: Color::Red,
            warning: Color::Yellow,
            info: Color::LightBlue,
            search_highlight: Color::Yellow,
            preview: Color::DarkGray,
        }
    }

    /// Returns the default light color scheme.
    pub fn default_light() -> Self {
        Self {
            key: Color::Blue,
            string: Color::Rgb(0, 128, 0),
            number: Color::Rgb(170, 0, 170),
            boolean: Color::Rgb(170, 120, 0),
            null: Color::Rgb(120, 120, 120),

            background: Color::Reset,
            foreground: Color::Black,
            cursor: Color::Blue,
            status_line_bg: Color::Rgb(40, 40, 40),
            status_line_fg: Color::White,

            error: Color::Rgb(200, 0, 0),
            warning: Color::Rgb(170, 120, 0),
            info: Color::Blue,
            search_highlight: Color::Rgb(255, 235, 130),
            preview: Color::Rgb(120, 120, 120),
        }
    }

    /// Retro groove color scheme with warm, earthy tones.
    pub fn gruvbox_dark() -> Self {
        Self {
            key: Color::Rgb(131, 165, 152),
            string: Color::Rgb(184, 187, 38),
            number: Color::Rgb(211, 134, 155),
            boolean: Color::Rgb(250, 189, 47),
            null: Color::Rgb(146, 131, 116),

            background: Color::Rgb(40, 40, 40),
            foreground: Color::Rgb(235, 219, 178),
            cursor: Color::Rgb(131, 165, 152),
            status_line_bg: Color::Rgb(60, 56, 54),
            status_line_fg: Color::Rgb(235, 219, 178),

            error: Color::Rgb(251, 73, 52),
            warning: Color::Rgb(250, 189, 47),
            info: Color::Rgb(131, 165, 152),
            search_highlight: Color::Rgb(250, 189, 47),
            preview: Color::Rgb(146, 131, 116),
        }
    }

    /// Popular color scheme inspired by Monokai Pro.
    pub fn monokai() -> Self {
        Self {
            key: Color::Rgb(102, 217, 239),
            string: Color::Rgb(230, 219, 116),
            number: Color::Rgb(174, 129, 255),
            boolean: Color::Rgb(253, 151, 31),
            null: Color::Rgb(117, 113, 94),

            background: Color::Rgb(39, 40, 34),
            foreground: Color::Rgb(248, 248, 242),
            cursor: Color::Rgb(102, 217, 239),
            status_line_bg: Color::Rgb(62, 61, 50),
            status_line_fg: Color::Rgb(248, 248, 242),

            error: Color::Rgb(249, 38, 114),
            warning: Color::Rgb(253, 151, 31),
            info: Color::Rgb(102, 217, 239),
            search_highlight: Color::Rgb(230, 219, 116),
            preview: Color::Rgb(117, 113, 94),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dark_uses_terminal_background() {
        let colors = ThemeColors::default_dark();
        assert_eq!(colors.background, Color::Reset);
        assert_eq!(colors.status_line_bg, Color::White);
    }

    #[test]
    fn test_schemes_are_distinct() {
        let dark = ThemeColors::default_dark();
        let gruvbox = ThemeColors::gruvbox_dark();
        assert_ne!(dark.background, gruvbox.background);
    }
}
