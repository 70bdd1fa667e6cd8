//! Configuration types for faqs.
//!
//! [`Config::load`] reads `~/.config/faqs/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
show_categories = true
answer_indent   = 4
theme           = "default"

[search]
debounce_ms     = 300
highlight_open  = "<mark>"
highlight_close = "</mark>"

[rotation]
display_ms = 8000

[corpus]
path = ""
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/faqs/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_categories")]
    pub show_categories: bool,
    #[serde(default = "default_answer_indent")]
    pub answer_indent: u16,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_show_categories() -> bool { true }
fn default_answer_indent() -> u16 { 4 }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_categories: default_show_categories(),
            answer_indent: default_answer_indent(),
            theme: default_theme(),
        }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiescence window before a typed query takes effect.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Marker inserted before each highlighted span in text output.
    #[serde(default = "default_highlight_open")]
    pub highlight_open: String,
    #[serde(default = "default_highlight_close")]
    pub highlight_close: String,
}

fn default_debounce_ms() -> u64 { 300 }
fn default_highlight_open() -> String { crate::highlight::DEFAULT_OPEN.to_string() }
fn default_highlight_close() -> String { crate::highlight::DEFAULT_CLOSE.to_string() }

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            highlight_open: default_highlight_open(),
            highlight_close: default_highlight_close(),
        }
    }
}

/// `[rotation]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RotationConfig {
    /// How long each banner message stays on screen.
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
}

fn default_display_ms() -> u64 { 8000 }

impl RotationConfig {
    pub fn display(&self) -> Duration {
        Duration::from_millis(self.display_ms)
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self { display_ms: default_display_ms() }
    }
}

/// `[corpus]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorpusConfig {
    /// Corpus file to load. Empty means the embedded corpus.
    #[serde(default)]
    pub path: String,
}

impl CorpusConfig {
    pub fn path(&self) -> Option<PathBuf> {
        (!self.path.trim().is_empty()).then(|| PathBuf::from(self.path.trim()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/faqs/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Layer the file at `path` (if present) over the built-in defaults.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("faqs")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
