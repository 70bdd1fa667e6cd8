//! faqs TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use faqs_core::{config::Config, Corpus};

/// Start the TUI over `corpus`. `location` is an optional page-load location
/// (`faq.html#min-deposit`) whose fragment opens an entry on start-up.
pub fn run(config: Config, corpus: Corpus, location: Option<&str>) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    let mut app = App::new(corpus, config, theme);
    if let Some(location) = location {
        if !app.open_location(location) {
            tracing::warn!(location, "deep link did not match any entry");
        }
    }
    app.run()
}
