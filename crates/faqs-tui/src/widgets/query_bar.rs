//! Query bar widget: the search input at the bottom of the screen.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! The bar only edits text. The app shell feeds every edit into the search
//! debouncer; see [`QueryBarState::handle`].

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The raw text typed by the user (not normalised).
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Handle a key event from the app shell. Returns `true` when the query
    /// text changed, so the caller knows to schedule a search.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                // Walk back one char boundary
                let prev = self.query[..self.cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                if self.cursor > 0 {
                    self.cursor = self.query[..self.cursor]
                        .char_indices()
                        .last()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.query.len() {
                    self.cursor = self.query[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.query.len());
                }
                false
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    focused: bool,
    /// A typed query is waiting out the debounce window.
    pending: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(state: &'a QueryBarState, focused: bool, pending: bool, theme: &'a Theme) -> Self {
        Self { state, focused, pending, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = if self.pending { "Search …" } else { "Search" };
        let block = Block::bordered().title(title).border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search questions and answers",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_and_backspace_report_changes() {
        let mut s = QueryBarState::default();
        assert!(s.handle(&AppEvent::Char('f')));
        assert!(s.handle(&AppEvent::Char('é')));
        assert_eq!(s.query, "fé");
        assert_eq!(s.cursor, 3);
        assert!(s.handle(&AppEvent::Backspace));
        assert_eq!(s.query, "f");
    }

    #[test]
    fn cursor_moves_do_not_change_query() {
        let mut s = QueryBarState::default();
        s.handle(&AppEvent::Char('a'));
        s.handle(&AppEvent::Char('b'));
        assert!(!s.handle(&AppEvent::Nav(Direction::Left)));
        assert!(s.handle(&AppEvent::Char('x')));
        assert_eq!(s.query, "axb");
        assert!(!s.handle(&AppEvent::Nav(Direction::Right)));
        assert_eq!(s.cursor, 3);
    }

    #[test]
    fn backspace_at_start_is_no_change() {
        let mut s = QueryBarState::default();
        assert!(!s.handle(&AppEvent::Backspace));
    }
}
