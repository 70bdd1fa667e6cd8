//! Banner: one rotating message at the bottom of the screen, with a dot per
//! message on the right (`● ○ ○`).

use crate::theme::Theme;
use faqs_core::rotation::Rotator;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

pub struct Banner<'a> {
    messages: &'a [String],
    rotator: &'a Rotator,
    theme: &'a Theme,
}

impl<'a> Banner<'a> {
    pub fn new(messages: &'a [String], rotator: &'a Rotator, theme: &'a Theme) -> Self {
        Self { messages, rotator, theme }
    }
}

impl Widget for Banner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(message) = self.messages.get(self.rotator.current()) else {
            return;
        };

        buf.set_line(
            area.x,
            area.y,
            &Line::from(Span::styled(format!(" {message}"), self.theme.banner_text)),
            area.width,
        );

        if self.messages.len() < 2 {
            return;
        }
        let dots: Vec<Span> = (0..self.messages.len())
            .map(|i| {
                let glyph = if i == self.rotator.current() { "● " } else { "○ " };
                Span::styled(glyph, self.theme.banner_dot)
            })
            .collect();
        let width = (self.messages.len() * 2) as u16;
        let x = area.right().saturating_sub(width);
        buf.set_line(x, area.y, &Line::from(dots), width);
    }
}
