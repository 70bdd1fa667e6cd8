//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Everything time-based
//! (search debounce, banner rotation) is deadline-driven from [`App::tick`],
//! which takes the current instant so tests can step time by hand.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        banner::Banner,
        category_bar::CategoryBar,
        command_bar::{CommandBar, CommandBarState},
        faq_list::{FaqList, FaqListState},
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use faqs_core::{config::Config, debounce::Debouncer, rotation::Rotator, Corpus, FaqEngine};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub engine: FaqEngine,
    pub list: FaqListState,
    pub query: QueryBarState,
    /// Raw query text waiting out the debounce window.
    pub debounce: Debouncer<String>,
    pub rotator: Rotator,
    pub messages: Vec<String>,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    /// Show or hide the help popup. The banner holds still while it is open.
    pub fn set_help(&mut self, show: bool, now: Instant) {
        self.show_help = show;
        if show {
            self.rotator.stop();
        } else {
            self.rotator.start(now);
        }
        tracing::debug!(show, "help popup");
    }

    /// Drop the search immediately: clears the input, cancels any pending
    /// debounced search and restores every entry.
    pub fn clear_search(&mut self) {
        self.query.clear();
        self.debounce.cancel();
        self.engine.clear_search();
        self.list.sync(&self.engine);
    }

    /// Open `entry_id` the way a deep link does and move the cursor onto it.
    /// Returns `false` for an unknown id.
    pub fn open_entry(&mut self, entry_id: &str) -> bool {
        self.clear_search();
        match self.engine.open_deep_link(entry_id) {
            Some(target) => {
                self.list.select(&target.entry_id, &self.engine);
                true
            }
            None => {
                tracing::warn!(entry = entry_id, "no such entry");
                false
            }
        }
    }

    fn apply_search(&mut self, raw: &str) {
        self.engine.search(raw);
        self.list.sync(&self.engine);
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(corpus: Corpus, config: Config, theme: Theme) -> Self {
        let messages = corpus.messages.clone();
        let engine = FaqEngine::from(corpus);
        let list = FaqListState::new(&engine);

        let mut rotator = Rotator::new(messages.len(), config.rotation.display());
        rotator.start(Instant::now());

        let state = AppState {
            engine,
            list,
            query: QueryBarState::default(),
            debounce: Debouncer::new(config.search.debounce()),
            rotator,
            messages,
            focus: Focus::List,
            prev_focus: Focus::List,
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };

        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply a page-load location such as `faq.html#min-deposit`. Locations
    /// without a fragment, or naming an unknown entry, change nothing.
    pub fn open_location(&mut self, location: &str) -> bool {
        match faqs_core::engine::fragment(location) {
            Some(id) => self.state.open_entry(id),
            None => false,
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev, Instant::now());
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev, Instant::now());
                        }
                    }
                }
            }

            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Fire whatever is due: a debounced search, a banner advance.
    pub fn tick(&mut self, now: Instant) {
        let s = &mut self.state;
        if let Some(query) = s.debounce.poll(now) {
            tracing::debug!(query = %query, "debounced search fired");
            s.apply_search(&query);
        }
        s.rotator.tick(now);
    }

    pub fn handle(&mut self, event: AppEvent, now: Instant) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                s.set_help(false, now);
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            match execute_command(s, cmd, now) {
                                Ok(()) => {
                                    s.command_bar.clear();
                                    s.focus = s.prev_focus;
                                }
                                Err(msg) => s.command_bar.error = Some(msg),
                            }
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input: just close
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::QueryBar => s.set_help(true, now),

            AppEvent::Char(':') if s.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            // Escape in the search bar drops the search without waiting
            AppEvent::Escape if s.focus == Focus::QueryBar => {
                tracing::debug!("search cleared, focus: QueryBar -> List");
                s.clear_search();
                s.focus = Focus::List;
            }

            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::List => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::List,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> QueryBar");
                s.focus = Focus::QueryBar;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other, now),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent, now: Instant) {
    match s.focus {
        Focus::List => s.list.handle(&event, &mut s.engine),
        Focus::QueryBar => match event {
            // Enter skips the rest of the window and hands over to the list
            AppEvent::Enter => {
                s.debounce.cancel();
                let query = s.query.query.clone();
                s.apply_search(&query);
                s.focus = Focus::List;
            }
            AppEvent::Nav(Direction::Up | Direction::Down) => s.list.handle(&event, &mut s.engine),
            other => {
                if s.query.handle(&other) {
                    s.debounce.push(s.query.query.clone(), now);
                }
            }
        },
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let show_categories = state.config.ui.show_categories;
    let show_banner = !state.messages.is_empty();

    // Vertical: category bar | questions | 3-line query bar | banner
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(u16::from(show_categories)),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(u16::from(show_banner)),
        ])
        .split(area);

    if show_categories {
        frame.render_widget(CategoryBar::new(&state.engine, &state.theme), vert[0]);
    }
    frame.render_widget(
        FaqList::new(
            &state.list,
            &state.engine,
            state.focus == Focus::List,
            state.config.ui.answer_indent,
            &state.theme,
        ),
        vert[1],
    );
    let query_bar = QueryBar::new(
        &state.query,
        state.focus == Focus::QueryBar,
        state.debounce.is_pending(),
        &state.theme,
    );
    let cursor = query_bar.cursor_position(vert[2]);
    frame.render_widget(query_bar, vert[2]);
    if show_banner {
        frame.render_widget(Banner::new(&state.messages, &state.rotator, &state.theme), vert[3]);
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        frame.set_cursor_position(cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
