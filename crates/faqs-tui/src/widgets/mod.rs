//! Ratatui widgets for the faqs TUI.

pub mod banner;
pub mod category_bar;
pub mod command_bar;
pub mod faq_list;
pub mod help;
pub mod query_bar;
