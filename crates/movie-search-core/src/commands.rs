/// A chat message interpreted as a bot command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Search(String),
    History,
    Stats,
    Unknown(String),
}

impl BotCommand {
    /// Parse `/name args`; a `@botname` suffix on the command is ignored
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (head, args) = match text.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (text, ""),
        };

        let Some(name) = head.strip_prefix('/') else {
            return Self::Unknown(text.to_string());
        };
        let name = name.split('@').next().unwrap_or_default();

        match name.to_lowercase().as_str() {
            "start" => Self::Start,
            "help" => Self::Help,
            "search" => Self::Search(args.to_string()),
            "history" => Self::History,
            "stats" => Self::Stats,
            _ => Self::Unknown(text.to_string()),
        }
    }
}
