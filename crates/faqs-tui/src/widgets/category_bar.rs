//! Category bar: the 1-line strip of category filters at the top of the
//! screen.

use crate::theme::Theme;
use faqs_core::{CategoryFilter, FaqEngine};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders `All` followed by every category label. The active filter is
/// highlighted; while a search is running the selection is forced to `All`,
/// and categories with no matching entries are dimmed.
///
/// Keybinding hints (`q:quit  ?:help`) are right-aligned in the same row.
pub struct CategoryBar<'a> {
    engine: &'a FaqEngine,
    theme: &'a Theme,
}

impl<'a> CategoryBar<'a> {
    pub fn new(engine: &'a FaqEngine, theme: &'a Theme) -> Self {
        Self { engine, theme }
    }

    fn selected(&self) -> usize {
        match &self.engine.search_state().category {
            CategoryFilter::All => 0,
            CategoryFilter::Only(id) => self
                .engine
                .categories()
                .iter()
                .position(|c| &c.id == id)
                .map_or(0, |i| i + 1),
        }
    }
}

impl Widget for CategoryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let searching = self.engine.search_state().is_searching();
        let mut labels = vec![Line::from(" All ")];
        labels.extend(self.engine.categories().iter().map(|c| {
            let line = Line::from(format!(" {} ", c.label));
            if searching && !c.is_visible() {
                line.style(Style::default().add_modifier(Modifier::DIM))
            } else {
                line
            }
        }));

        Tabs::new(labels)
            .select(self.selected())
            .style(self.theme.category_inactive)
            .highlight_style(self.theme.category_active)
            .divider("")
            .render(area, buf);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}
