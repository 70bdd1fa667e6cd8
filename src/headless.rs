//! Headless mode: run searches without a terminal UI and print what the
//! view would show.
//!
//! Two entry points:
//!
//! - [`report`] + [`write_report`] for a single, already-applied search
//!   (`faqs --headless --query deposit`).
//! - [`run_stream`] treats every input line as the current contents of the
//!   search box. Lines go through the async debouncer, so a burst of
//!   keystrokes produces one search and one report.

use std::io::Write;
use std::time::Duration;

use faqs_core::config::SearchConfig;
use faqs_core::debounce::debounce;
use faqs_core::highlight::render_markup;
use faqs_core::{FaqEngine, FaqEntry};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Output format for headless reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with highlight markers around matches.
    #[default]
    Raw,
    /// One JSON object per report.
    Jsonl,
}

/// Strings wrapped around each highlighted span in text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl From<&SearchConfig> for Markers {
    fn from(search: &SearchConfig) -> Self {
        Self {
            open: search.highlight_open.clone(),
            close: search.highlight_close.clone(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Snapshot of what the view shows after a search or category change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub category: String,
    /// The query echoed by the "no results" message, when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_results: Option<String>,
    pub entries: Vec<EntryReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub id: String,
    pub category: String,
    pub expanded: bool,
    /// Number of highlighted spans across question and answer.
    pub matches: usize,
    pub question: String,
    /// Answer blocks, only present for expanded entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answer: Vec<String>,
}

/// Build a report of the engine's current view state.
pub fn report(engine: &FaqEngine, markers: &Markers) -> SearchReport {
    let state = engine.search_state();
    SearchReport {
        query: state.query.clone(),
        category: state.category.to_string(),
        no_results: engine.no_results().map(str::to_string),
        entries: engine
            .shown_entries()
            .map(|entry| entry_report(entry, markers))
            .collect(),
    }
}

fn entry_report(entry: &FaqEntry, markers: &Markers) -> EntryReport {
    let highlights = entry.highlights();
    let mark = |text: &str, spans: &[std::ops::Range<usize>]| {
        render_markup(text, spans, &markers.open, &markers.close)
    };

    let answer = if entry.is_expanded() {
        entry
            .answer()
            .iter()
            .enumerate()
            .map(|(i, block)| {
                let spans = highlights.answer.get(i).map(Vec::as_slice).unwrap_or(&[]);
                mark(&block.text, spans)
            })
            .collect()
    } else {
        Vec::new()
    };

    EntryReport {
        id: entry.id().to_string(),
        category: entry.category_id().to_string(),
        expanded: entry.is_expanded(),
        matches: highlights.count(),
        question: mark(entry.question(), &highlights.question),
        answer,
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Write one report to `out` in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &SearchReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Jsonl => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Raw => write_raw(out, report)?,
    }
    out.flush()?;
    Ok(())
}

fn write_raw<W: Write>(out: &mut W, report: &SearchReport) -> std::io::Result<()> {
    writeln!(
        out,
        "query: {:?}  category: {}  shown: {}",
        report.query,
        report.category,
        report.entries.len()
    )?;

    if let Some(query) = &report.no_results {
        writeln!(out, "No results found")?;
        writeln!(out, "We couldn't find any FAQs matching \"{query}\"")?;
    }

    for entry in &report.entries {
        let marker = if entry.expanded { '-' } else { '+' };
        writeln!(out, "[{marker}] {} ({}): {}", entry.id, entry.category, entry.question)?;
        for block in &entry.answer {
            writeln!(out, "      {block}")?;
        }
    }
    writeln!(out)
}

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

/// Read query snapshots from `reader` (one per line), debounce them over
/// `window`, and write a report after every effective search. Returns the
/// number of reports written once the input is exhausted.
pub async fn run_stream<R, W>(
    engine: &mut FaqEngine,
    reader: R,
    window: Duration,
    markers: &Markers,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<usize>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: Write,
{
    let (tx, rx) = mpsc::channel(64);

    let feeder = tokio::spawn(async move {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if tx.send(line).await.is_err() {
                break;
            }
        }
        Ok::<_, std::io::Error>(())
    });

    let reports = run_events(engine, rx, window, markers, format, out).await?;
    feeder.await??;
    Ok(reports)
}

/// Like [`run_stream`], for callers that already have a channel of raw
/// query inputs.
pub async fn run_events<W: Write>(
    engine: &mut FaqEngine,
    inputs: mpsc::Receiver<String>,
    window: Duration,
    markers: &Markers,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<usize> {
    let mut queries = debounce(inputs, window);
    let mut reports = 0;

    while let Some(query) = queries.recv().await {
        engine.search(&query);
        tracing::debug!(query = %query, "headless: search applied");
        write_report(out, &report(engine, markers), format)?;
        reports += 1;
    }

    Ok(reports)
}
