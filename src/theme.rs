//! Color theme system for Swapix
//!
//! Provides 4 retro-inspired color schemes that can be selected via CLI flag.
//! Card accents (yellow films, blue characters, green planets, cyan starships)
//! are part of each scheme so monochrome themes can collapse them.

use ratatui::style::Color;
use std::fmt;

use crate::catalog::Tone;

/// Available color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Nord-inspired theme (default) - modern muted colors
    #[default]
    Nord,
    /// Classic DOS Blue - bright white on blue background
    DosBlue,
    /// Amber CRT - orange/amber text on black (retro terminal)
    AmberCrt,
    /// Green Phosphor - green text on black (classic terminal)
    GreenPhosphor,
}

impl Theme {
    /// Parse theme name from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "nord" => Ok(Theme::Nord),
            "dos" | "dosblue" | "dos-blue" => Ok(Theme::DosBlue),
            "amber" | "ambercrt" | "amber-crt" => Ok(Theme::AmberCrt),
            "green" | "greenphosphor" | "green-phosphor" => Ok(Theme::GreenPhosphor),
            _ => Err(format!(
                "Unknown theme '{s}'. Available: nord, dos-blue, amber-crt, green-phosphor"
            )),
        }
    }

    /// Get the color scheme for this theme
    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Nord => ColorScheme::nord(),
            Theme::DosBlue => ColorScheme::dos_blue(),
            Theme::AmberCrt => ColorScheme::amber_crt(),
            Theme::GreenPhosphor => ColorScheme::green_phosphor(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Nord => write!(f, "nord"),
            Theme::DosBlue => write!(f, "dos-blue"),
            Theme::AmberCrt => write!(f, "amber-crt"),
            Theme::GreenPhosphor => write!(f, "green-phosphor"),
        }
    }
}

/// Color scheme for a theme
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub background: Color,
    /// Primary text color
    pub text: Color,
    /// Dimmed text color (labels, descriptions)
    pub text_dim: Color,
    /// Border of the selected card and the active tab
    pub focus_border: Color,
    pub unfocused_border: Color,
    /// Skeleton placeholder blocks
    pub skeleton: Color,
    pub accent_yellow: Color,
    pub accent_blue: Color,
    pub accent_cyan: Color,
    pub accent_green: Color,
    /// Toast success message color
    pub toast_success: Color,
    /// Error fallback and toast error color
    pub toast_error: Color,
    /// Debug panel indicator color
    pub debug_indicator: Color,
}

impl ColorScheme {
    /// Nord theme (default) - Modern muted colors
    pub fn nord() -> Self {
        Self {
            background: Color::Black,
            text: Color::White,
            text_dim: Color::Gray,
            focus_border: Color::Yellow,
            unfocused_border: Color::DarkGray,
            skeleton: Color::Rgb(50, 50, 60),
            accent_yellow: Color::Rgb(255, 232, 31), // crawl yellow
            accent_blue: Color::Rgb(77, 166, 255),
            accent_cyan: Color::Rgb(0, 212, 255),
            accent_green: Color::Rgb(57, 255, 20),
            toast_success: Color::Green,
            toast_error: Color::Red,
            debug_indicator: Color::Magenta,
        }
    }

    /// DOS Blue theme - Classic DOS aesthetic
    pub fn dos_blue() -> Self {
        Self {
            background: Color::Blue,
            text: Color::White,
            text_dim: Color::LightBlue,
            focus_border: Color::Yellow,
            unfocused_border: Color::Cyan,
            skeleton: Color::Rgb(20, 20, 200),
            accent_yellow: Color::Yellow,
            accent_blue: Color::LightCyan,
            accent_cyan: Color::Cyan,
            accent_green: Color::LightGreen,
            toast_success: Color::LightGreen,
            toast_error: Color::LightRed,
            debug_indicator: Color::LightMagenta,
        }
    }

    /// Amber CRT theme - Retro terminal
    pub fn amber_crt() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_bright = Color::Rgb(255, 200, 100);
        let amber_dim = Color::Rgb(180, 120, 0);

        Self {
            background: Color::Black,
            text: amber,
            text_dim: amber_dim,
            focus_border: amber_bright,
            unfocused_border: amber_dim,
            skeleton: Color::Rgb(60, 40, 0),
            accent_yellow: amber_bright,
            accent_blue: amber,
            accent_cyan: amber,
            accent_green: amber,
            toast_success: Color::Rgb(100, 255, 100), // Bright green stands out
            toast_error: Color::Red,
            debug_indicator: Color::Rgb(255, 100, 255),
        }
    }

    /// Green Phosphor theme - Classic green screen
    pub fn green_phosphor() -> Self {
        let green = Color::Rgb(0, 255, 0);
        let green_dim = Color::Rgb(0, 180, 0);
        let green_bright = Color::Rgb(100, 255, 100);

        Self {
            background: Color::Black,
            text: green,
            text_dim: green_dim,
            focus_border: green_bright,
            unfocused_border: green_dim,
            skeleton: Color::Rgb(0, 50, 0),
            accent_yellow: green_bright,
            accent_blue: green,
            accent_cyan: green,
            accent_green: green,
            toast_success: green_bright,
            toast_error: Color::Red, // Red stands out against green
            debug_indicator: Color::Cyan,
        }
    }

    /// Concrete color for a card accent.
    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Neutral => self.text_dim,
            Tone::Yellow => self.accent_yellow,
            Tone::Blue => self.accent_blue,
            Tone::Cyan => self.accent_cyan,
            Tone::Green => self.accent_green,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::nord()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        assert_eq!(Theme::from_str("nord").unwrap(), Theme::Nord);
        assert_eq!(Theme::from_str("NORD").unwrap(), Theme::Nord);
        assert_eq!(Theme::from_str("dos-blue").unwrap(), Theme::DosBlue);
        assert_eq!(Theme::from_str("amber").unwrap(), Theme::AmberCrt);
        assert_eq!(Theme::from_str("green").unwrap(), Theme::GreenPhosphor);
        assert!(Theme::from_str("invalid").is_err());
    }

    #[test]
    fn nord_keeps_entity_accents_distinct() {
        let c = Theme::Nord.colors();
        let accents = [
            c.tone(Tone::Yellow),
            c.tone(Tone::Blue),
            c.tone(Tone::Cyan),
            c.tone(Tone::Green),
        ];
        for (i, a) in accents.iter().enumerate() {
            assert!(accents[i + 1..].iter().all(|b| b != a));
        }
        assert_eq!(c.tone(Tone::Neutral), c.text_dim);
    }
}
