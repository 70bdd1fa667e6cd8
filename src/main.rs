use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use faqs::config::Config;
use faqs::headless::{self, Markers, OutputFormat};
use faqs::{Corpus, FaqEngine};

#[derive(Parser)]
#[command(name = "faqs", about = "Search, filter and read FAQs in the terminal")]
struct Cli {
    /// Write debug logs to /tmp/faqs-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Config file to use instead of ~/.config/faqs/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Corpus TOML file. Defaults to `[corpus] path` from the config, then
    /// to the built-in corpus.
    #[arg(long, value_name = "PATH")]
    corpus: Option<PathBuf>,

    /// Page location whose fragment opens an entry, e.g. `faq.html#min-deposit`.
    #[arg(long, value_name = "LOCATION")]
    open: Option<String>,

    /// Print results instead of starting the terminal UI. Without --query,
    /// each stdin line is taken as the contents of the search box.
    #[arg(long)]
    headless: bool,

    /// Run a single search (headless only).
    #[arg(long, requires = "headless")]
    query: Option<String>,

    /// Headless output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Raw)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/faqs-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("faqs debug log started, tail -f /tmp/faqs-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });

    let corpus = load_corpus(&cli, &config)?;

    if cli.headless {
        run_headless(&cli, &config, corpus)
    } else {
        faqs_tui::run(config, corpus, cli.open.as_deref())
    }
}

fn load_corpus(cli: &Cli, config: &Config) -> anyhow::Result<Corpus> {
    match cli.corpus.clone().or_else(|| config.corpus.path()) {
        Some(path) => Corpus::load(&path)
            .with_context(|| format!("failed to load corpus from {}", path.display())),
        None => Ok(Corpus::embedded()),
    }
}

fn run_headless(cli: &Cli, config: &Config, corpus: Corpus) -> anyhow::Result<()> {
    let markers = Markers::from(&config.search);
    let mut engine = FaqEngine::from(corpus);
    let mut out = std::io::stdout();

    if let Some(location) = &cli.open {
        if engine.open_location(location).is_none() {
            tracing::warn!(location = %location, "deep link did not match any entry");
        }
        if cli.query.is_none() {
            let report = headless::report(&engine, &markers);
            return headless::write_report(&mut out, &report, cli.format);
        }
    }

    if let Some(query) = &cli.query {
        engine.search(query);
        let report = headless::report(&engine, &markers);
        return headless::write_report(&mut out, &report, cli.format);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let reports = runtime.block_on(headless::run_stream(
        &mut engine,
        tokio::io::BufReader::new(tokio::io::stdin()),
        config.search.debounce(),
        &markers,
        cli.format,
        &mut out,
    ))?;
    tracing::debug!(reports, "headless: input exhausted");
    Ok(())
}
