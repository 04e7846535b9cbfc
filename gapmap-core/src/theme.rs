//! Theme and color mapping
//!
//! The five-stop maturity colorscale is shared by both themes; switching
//! the theme swaps the surrounding palette only, never chart data.

use serde::{Deserialize, Serialize};

/// Red → orange → yellow → light green → dark green, indexed by level 0-4.
pub const COLOR_SCALE: [&str; 5] = ["#d73027", "#fc8d59", "#fee08b", "#d9ef8b", "#1a9850"];

/// Map a maturity level to its colorscale stop.
pub fn level_color(level: u8) -> &'static str {
    COLOR_SCALE[usize::from(level.min(4))]
}

/// UI theme selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Flip between light and dark.
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Chrome colors for this theme.
    pub fn palette(self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette {
                background: "#1a1a2e",
                surface: "#16213e",
                text: "#ffffff",
                muted: "#9ca3af",
                grid: "#444444",
                accent: "#1a9850",
            },
            Theme::Light => ThemePalette {
                background: "#ffffff",
                surface: "#f9fafb",
                text: "#000000",
                muted: "#6b7280",
                grid: "#cccccc",
                accent: "#1a9850",
            },
        }
    }
}

/// Chrome colors surrounding the charts (backgrounds, text, gridlines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub grid: &'static str,
    pub accent: &'static str,
}
