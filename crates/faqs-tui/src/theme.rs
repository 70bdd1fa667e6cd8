//! Colour theme for the faqs TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::by_name`] at startup and pass the result through the
//! application as a shared reference.

use config::{Config, File, FileFormat};
use faqs_core::BlockKind;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawFaq {
    question: RawStyle,
    question_open: RawStyle,
    paragraph: RawStyle,
    list_item: RawStyle,
    no_results: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    highlight: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    active: RawStyle,
    inactive: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBanner {
    text: RawStyle,
    dot: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    faq: RawFaq,
    borders: RawBorders,
    search: RawSearch,
    categories: RawCategories,
    banner: RawBanner,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// All styles are pre-resolved ratatui [`Style`] values, so rendering never
/// parses colours.
#[derive(Debug, Clone)]
pub struct Theme {
    pub question: Style,
    /// Question line of an expanded entry.
    pub question_open: Style,
    pub paragraph: Style,
    pub list_item: Style,
    pub no_results: Style,

    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for the command bar pane
    pub border_command_bar: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,

    /// Inline highlight applied to matched search spans.
    pub search_highlight: Style,

    pub category_active: Style,
    pub category_inactive: Style,

    pub banner_text: Style,
    pub banner_dot: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed; the unit tests load both
    /// embedded themes.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up one of the embedded themes by name.
    pub fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Resolve the theme named in config. Unknown names fall back to the
    /// default theme with a warning.
    pub fn by_name(name: &str) -> Self {
        Self::named(name).unwrap_or_else(|| {
            tracing::warn!(theme = name, "unknown theme, using default");
            Self::load_default()
        })
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so user themes stay forward-compatible.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            question: raw.faq.question.into_style(),
            question_open: raw.faq.question_open.into_style(),
            paragraph: raw.faq.paragraph.into_style(),
            list_item: raw.faq.list_item.into_style(),
            no_results: raw.faq.no_results.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            search_highlight: raw.search.highlight.into_style(),
            category_active: raw.categories.active.into_style(),
            category_inactive: raw.categories.inactive.into_style(),
            banner_text: raw.banner.text.into_style(),
            banner_dot: raw.banner.dot.into_style(),
        })
    }

    /// Style for an answer block of the given kind.
    pub fn block_style(&self, kind: BlockKind) -> Style {
        match kind {
            BlockKind::Paragraph => self.paragraph,
            BlockKind::ListItem => self.list_item,
        }
    }

    /// `base` with the search highlight layered on top.
    pub fn highlighted(&self, base: Style) -> Style {
        base.patch(self.search_highlight)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.search_highlight, Style::default());
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.category_active, Style::default());
    }

    #[test]
    fn gruvbox_dark_theme_loads() {
        let theme = Theme::load_gruvbox_dark();
        assert_ne!(theme.search_highlight, Style::default());
        assert_ne!(theme.question_open, Style::default());
    }

    #[test]
    fn named_rejects_unknown_theme() {
        assert!(Theme::named("solarized").is_none());
        assert!(Theme::named("Gruvbox").is_some());
        assert!(Theme::named("default").is_some());
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        let theme = Theme::by_name("solarized");
        assert_eq!(theme.search_highlight, Theme::load_default().search_highlight);
    }

    #[test]
    fn highlight_patches_base_style() {
        let theme = Theme::load_default();
        let style = theme.highlighted(theme.paragraph);
        assert_eq!(style.bg, theme.search_highlight.bg);
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
