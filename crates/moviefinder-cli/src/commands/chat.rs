use crate::context;
use crate::output::Output;
use color_eyre::Result;
use movie_search_core::{messages, BotCommand, MovieSearchService, Reply};
use std::io::{self, IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

const QUIT_COMMANDS: [&str; 3] = ["/quit", "/exit", "/q"];

/// Read bot commands from stdin until EOF or `/quit`, answering each in turn
pub async fn run_chat(requester_id: i64, output: &Output) -> Result<()> {
    let service = context::build_service()?;
    let interactive = io::stdin().is_terminal() && output.is_human();

    if interactive {
        output.info(messages::START_MESSAGE);
        output.info("Type /quit to leave.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.iter().any(|q| q.eq_ignore_ascii_case(line)) {
            break;
        }

        answer(&service, requester_id, line, output).await;
    }

    tracing::debug!("Chat session for requester {} ended", requester_id);
    Ok(())
}

async fn answer(service: &MovieSearchService, requester_id: i64, line: &str, output: &Output) {
    let command = BotCommand::parse(line);
    tracing::debug!("Requester {} sent {:?}", requester_id, command);

    match service.handle_command(requester_id, command).await {
        Ok(Reply::Text(text)) => output.info(text),
        Ok(Reply::Banner { banner, recorded }) => {
            output.banner(&banner);
            if !recorded {
                output.warn(messages::NOT_RECORDED_MESSAGE);
            }
        }
        // A broken history file should not end the session
        Err(e) => output.error(format!("Could not read your history: {}", e)),
    }
}
