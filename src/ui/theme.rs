//! Color themes and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two are built in:
//!
//! - `safenet-light`: relief-green accents on a light background (default)
//! - `safenet-dark`: the same accents for dark terminals
//!
//! Custom themes are loaded with [`Theme::from_file`].
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#1b5e20"
//! tab_active_fg = "#ffffff"
//! tab_active_bg = "#2e7d32"
//! selection_fg = "#ffffff"
//! selection_bg = "#388e3c"
//! text_normal = "#212121"
//! text_dim = "#757575"
//! accent_fg = "#2e7d32"
//! border = "#bdbdbd"
//! search_bar_border = "#2e7d32"
//! match_highlight_fg = "#212121"
//! match_highlight_bg = "#ffeb3b"
//! empty_state_fg = "#2e7d32"
//! error_fg = "#c62828"
//! alert_border = "#2e7d32"
//! ```

use crate::domain::error::{Result, SafeNetError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "safenet-light";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bg: Option<String>,

    /// Active screen tab.
    pub tab_active_fg: String,
    pub tab_active_bg: String,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, column headings, secondary text.
    pub text_dim: String,
    /// Detail labels, district column, focused form field.
    pub accent_fg: String,

    pub border: String,
    pub search_bar_border: String,

    /// Filter match within the district column.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Loading and "nothing found" messages.
    pub empty_state_fg: String,
    /// Failed fetches.
    pub error_fg: String,

    pub alert_border: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_bg: Option<String>,
}

impl Theme {
    /// Loads a built-in theme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "safenet-light" => include_str!("../../themes/safenet-light.toml"),
            "safenet-dark" => include_str!("../../themes/safenet-dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SafeNetError::Theme`] if the file cannot be read or is not a
    /// valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SafeNetError::Theme(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| SafeNetError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Plain palette used if the built-in default ever fails to parse.
    fn monochrome() -> Self {
        let white = || "#ffffff".to_string();
        let grey = || "#808080".to_string();
        let black = || "#000000".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white(),
                header_bg: None,
                tab_active_fg: black(),
                tab_active_bg: white(),
                selection_fg: black(),
                selection_bg: white(),
                text_normal: white(),
                text_dim: grey(),
                accent_fg: white(),
                border: grey(),
                search_bar_border: white(),
                match_highlight_fg: black(),
                match_highlight_bg: grey(),
                empty_state_fg: white(),
                error_fg: white(),
                alert_border: white(),
                alert_bg: None,
            },
        }
    }

    /// Converts `"#rrggbb"` to RGB, white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::warn!(theme = DEFAULT_THEME, "built-in theme failed to parse");
            Self::monochrome()
        })
    }
}
