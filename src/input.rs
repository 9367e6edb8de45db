// Typed commands for each kind of prompt. Raw lines are parsed exactly once
// here; the rest of the crate only matches on these enums.

const HELP: &[&str] = &["h", "help", "?"];
const QUIT: &[&str] = &["q", "quit", "salir"];
const YES: &[&str] = &["y", "yes", "s", "si", "sí"];
const NO: &[&str] = &["n", "no"];

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn is_help(token: &str) -> bool {
    HELP.contains(&token)
}

fn is_quit(token: &str) -> bool {
    QUIT.contains(&token)
}

/// Strictly decimal digits, 1-based as shown on screen.
fn number(token: &str) -> Option<usize> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Answer to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Empty line: take the prompt's default.
    Default,
    Help,
    Quit,
}

impl Answer {
    /// `None` when the line is not a recognised answer.
    pub fn parse(raw: &str) -> Option<Answer> {
        let token = normalize(raw);
        match token.as_str() {
            "" => Some(Answer::Default),
            t if is_help(t) => Some(Answer::Help),
            t if is_quit(t) => Some(Answer::Quit),
            t if YES.contains(&t) => Some(Answer::Yes),
            t if NO.contains(&t) => Some(Answer::No),
            _ => None,
        }
    }
}

/// Input at the folder browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// 1-based index of a listed subfolder. Range is checked by the navigator.
    Descend(usize),
    Ascend,
    Begin,
    Help,
    Quit,
}

impl NavCommand {
    pub fn parse(raw: &str) -> Option<NavCommand> {
        let token = normalize(raw);
        match token.as_str() {
            "u" => Some(NavCommand::Ascend),
            "b" => Some(NavCommand::Begin),
            t if is_help(t) => Some(NavCommand::Help),
            t if is_quit(t) => Some(NavCommand::Quit),
            t => number(t).map(NavCommand::Descend),
        }
    }
}

/// Input at an enumerated pick-list: a number or an exact entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Index(usize),
    /// Case-sensitive: remote names are matched exactly.
    Name(String),
    Help,
    Quit,
}

impl Pick {
    pub fn parse(raw: &str) -> Pick {
        let token = normalize(raw);
        if is_help(&token) {
            return Pick::Help;
        }
        if is_quit(&token) {
            return Pick::Quit;
        }
        match number(&token) {
            Some(n) => Pick::Index(n),
            None => Pick::Name(raw.trim().to_string()),
        }
    }
}

/// Input at a free-text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Value(String),
    Empty,
    Help,
    Quit,
}

impl Text {
    pub fn parse(raw: &str) -> Text {
        let value = raw.trim();
        let token = value.to_lowercase();
        if value.is_empty() {
            Text::Empty
        } else if is_help(&token) {
            Text::Help
        } else if is_quit(&token) {
            Text::Quit
        } else {
            Text::Value(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers() {
        assert_eq!(Answer::parse(""), Some(Answer::Default));
        assert_eq!(Answer::parse("  Y "), Some(Answer::Yes));
        assert_eq!(Answer::parse("Sí"), Some(Answer::Yes));
        assert_eq!(Answer::parse("no"), Some(Answer::No));
        assert_eq!(Answer::parse("?"), Some(Answer::Help));
        assert_eq!(Answer::parse("salir"), Some(Answer::Quit));
        assert_eq!(Answer::parse("maybe"), None);
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(NavCommand::parse("B"), Some(NavCommand::Begin));
        assert_eq!(NavCommand::parse("u"), Some(NavCommand::Ascend));
        assert_eq!(NavCommand::parse("12"), Some(NavCommand::Descend(12)));
        assert_eq!(NavCommand::parse("0"), Some(NavCommand::Descend(0)));
        assert_eq!(NavCommand::parse("help"), Some(NavCommand::Help));
        assert_eq!(NavCommand::parse("Q"), Some(NavCommand::Quit));
        assert_eq!(NavCommand::parse("-1"), None);
        assert_eq!(NavCommand::parse("x"), None);
        assert_eq!(NavCommand::parse(""), None);
    }

    #[test]
    fn picks_keep_name_case() {
        assert_eq!(Pick::parse("2"), Pick::Index(2));
        assert_eq!(Pick::parse(" Work "), Pick::Name("Work".into()));
        assert_eq!(Pick::parse("H"), Pick::Help);
        assert_eq!(Pick::parse("quit"), Pick::Quit);
    }

    #[test]
    fn free_text() {
        assert_eq!(Text::parse("   "), Text::Empty);
        assert_eq!(Text::parse(" Photos/2024 "), Text::Value("Photos/2024".into()));
        assert_eq!(Text::parse("?"), Text::Help);
        assert_eq!(Text::parse("Q"), Text::Quit);
    }
}
