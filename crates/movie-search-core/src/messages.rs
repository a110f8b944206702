//! Fixed replies of the chat interface

pub const START_MESSAGE: &str = "Hi! I look movies up in Kinopoisk and TMDB and tell you where to watch them.\n\
Send /search followed by a title to start, or /help for the full list of commands.";

pub const HELP_MESSAGE: &str = "Commands:\n\
/search <title> - find a movie and links to watch it online\n\
/history - your previous searches, newest first\n\
/stats - how often each movie came up in your searches\n\
/help - this message";

pub const UNKNOWN_COMMAND_MESSAGE: &str = "Sorry, I don't understand that. Try /help.";

pub const NO_RESULT_MESSAGE: &str = "Nothing found for that query. Try another spelling or the original title.";

pub const EMPTY_QUERY_MESSAGE: &str = "Tell me what to look for, e.g. /search Inception";

pub const EMPTY_HISTORY_MESSAGE: &str = "You haven't searched for anything yet.";

pub const EMPTY_STATS_MESSAGE: &str = "No statistics yet: search for a movie first.";

pub const NOT_RECORDED_MESSAGE: &str = "This search could not be saved to your history.";
