// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use std::time::Instant;

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Filter to one category, or `all`
    Category(String),
    // Open an entry as if arriving through a deep link
    Open(String),
    // Drop the current search
    Clear,
    // Jump the banner to message n (1-based)
    Message(usize),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        let required = |usage: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("usage: {usage}"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => required("theme <default|gruvbox>").map(Command::Theme),
            "cat" | "category" => required("category <id|all>").map(Command::Category),
            "open" => required("open <id>").map(Command::Open),
            "msg" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Command::Message(n)),
                _ => Err("usage: msg <n>".to_string()),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns `Err(message)` when the argument names nothing that exists; the
/// app shell shows it in the command bar.
pub fn execute_command(s: &mut AppState, cmd: Command, now: Instant) -> Result<(), String> {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.set_help(!s.show_help, now);
        }
        Command::Theme(name) => {
            s.theme = Theme::named(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
        }
        Command::Category(id) => {
            s.engine.set_category(&id);
            s.list.sync(&s.engine);
        }
        Command::Open(id) => {
            if !s.open_entry(&id) {
                return Err(format!("no such entry: {id}"));
            }
        }
        Command::Clear => {
            s.clear_search();
        }
        Command::Message(n) => {
            s.rotator.show(n - 1, now);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("q", Command::Quit)]
    #[case("  quit  ", Command::Quit)]
    #[case("help", Command::Help)]
    #[case("clear", Command::Clear)]
    #[case("theme gruvbox", Command::Theme("gruvbox".into()))]
    #[case("category billing", Command::Category("billing".into()))]
    #[case("cat all", Command::Category("all".into()))]
    #[case("open fees", Command::Open("fees".into()))]
    #[case("msg 2", Command::Message(2))]
    fn parses(#[case] input: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(input), Ok(expected));
    }

    #[rstest]
    #[case("theme")]
    #[case("open")]
    #[case("category")]
    #[case("msg 0")]
    #[case("msg x")]
    fn missing_or_bad_argument_is_usage_error(#[case] input: &str) {
        assert!(Command::parse(input).unwrap_err().starts_with("usage:"));
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("  "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
