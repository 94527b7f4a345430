//! Configuration system for textquill.
//!
//! Configuration lives in `~/.config/textquill/config.toml` and is loaded
//! with sensible defaults for every missing field; a missing or unreadable
//! file falls back to `Config::default()` entirely.
//!
//! # Example
//!
//! ```
//! use textquill::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.theme, "default-dark");
//! assert_eq!(config.indent, "2");
//!
//! let custom = Config {
//!     theme: "monokai".to_string(),
//!     ..Config::default()
//! };
//! assert_eq!(custom.indent, "2");
//! ```

use crate::document::serializer::IndentSpec;
use serde::{Deserialize, Serialize};

/// Configuration for the textquill application.
///
/// # Fields
///
/// * `theme` - Color scheme name (default: "default-dark")
/// * `indent` - Indent unit: "2", "4", or "tab" (default: "2")
/// * `show_line_numbers` - Display line numbers (default: true)
/// * `enable_mouse` - Enable mouse/trackpad scrolling (default: true)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Color scheme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Indent unit: "2", "4", or "tab"
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Display line numbers in the document view
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Enable mouse/trackpad scrolling
    #[serde(default = "default_enable_mouse")]
    pub enable_mouse: bool,
}

fn default_theme() -> String {
    "default-dark".to_string()
}

fn default_indent() -> String {
    "2".to_string()
}

fn default_show_line_numbers() -> bool {
    true
}

fn default_enable_mouse() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            indent: default_indent(),
            show_line_numbers: default_show_line_numbers(),
            enable_mouse: default_enable_mouse(),
        }
    }
}

impl Config {
    /// The indent unit as an [`IndentSpec`], falling back to two spaces
    /// when the configured value is not recognized.
    pub fn indent_spec(&self) -> IndentSpec {
        IndentSpec::parse(&self.indent).unwrap_or_default()
    }

    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/textquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("textquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or
    /// can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|_| Self::default()),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, "default-dark");
        assert_eq!(config.indent_spec(), IndentSpec::Spaces(2));
        assert!(config.show_line_numbers);
        assert!(config.enable_mouse);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("theme = \"monokai\"").unwrap();
        assert_eq!(config.theme, "monokai");
        assert_eq!(config.indent, "2");
        assert!(config.show_line_numbers);
    }

    #[test]
    fn test_indent_spec_parsing() {
        let config: Config = toml::from_str("indent = \"tab\"").unwrap();
        assert_eq!(config.indent_spec(), IndentSpec::Tab);

        let config: Config = toml::from_str("indent = \"nonsense\"").unwrap();
        assert_eq!(config.indent_spec(), IndentSpec::Spaces(2));
    }

    #[test]
    fn test_round_trip() {
        let config = Config {
            theme: "gruvbox-dark".to_string(),
            indent: "4".to_string(),
            show_line_numbers: false,
            enable_mouse: false,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.theme, "gruvbox-dark");
        assert_eq!(back.indent_spec(), IndentSpec::Spaces(4));
        assert!(!back.show_line_numbers);
    }
}
