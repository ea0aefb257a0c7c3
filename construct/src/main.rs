//! Interactive game-master session on stdin/stdout.
//!
//! Reads provider credentials from the environment (OPENAI_API_KEY,
//! CONSTRUCT_AI_PROVIDER). Without a key, the session runs entirely on
//! the local narrator.

use construct_core::{Character, EnvStore, GameSession, SessionConfig};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SessionConfig::default()
        .with_theme(env_or("CONSTRUCT_THEME", "Classic D&D"))
        .with_session_time(env_or("CONSTRUCT_SESSION_TIME", "1 hour"));
    let character = Character::new(
        env_or("CONSTRUCT_RACE", "Human"),
        env_or("CONSTRUCT_CLASS", "Fighter"),
        env_or("CONSTRUCT_BACKGROUND", "Folk Hero"),
    );

    let mut session = GameSession::new(config, character, Arc::new(EnvStore));

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(greeting) = session.conversation().last() {
        stdout
            .write_all(format!("{}\n\n", greeting.text).as_bytes())
            .await?;
    }
    stdout
        .write_all(b"Enter your action (/roll [modifier] to roll a d20, /quit to leave).\n")
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "/quit" || input == "/exit" {
            break;
        }

        if let Some(rest) = input.strip_prefix("/roll") {
            let modifier: i32 = rest.trim().parse().unwrap_or(0);
            let message = session.roll_d20(modifier);
            stdout.write_all(format!("{message}\n\n").as_bytes()).await?;
            continue;
        }

        let reply = session.player_action(input).await;
        stdout.write_all(format!("{reply}\n\n").as_bytes()).await?;
    }

    stdout.write_all(b"Farewell, adventurer.\n").await?;
    Ok(())
}
