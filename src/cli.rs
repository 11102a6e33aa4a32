use std::sync::atomic::{AtomicU64, Ordering};

use clap::{Parser, Subcommand};
use inquire::Text;
use serenity::async_trait;

use crate::error::ResponderError;
use crate::handlers::discord::BotHandler;
use crate::handlers::discord_responder::{ChannelResponder, SentMessage};
use crate::service::commands::BotCommand;
use crate::service::dates::today_in;

#[derive(Parser)]
#[command(version, about = "Discord bridge for the school timetable")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Connect to Discord and serve chat commands (default).
    Bot,
    /// Run a single chat command and print the replies.
    Run {
        /// Command text, e.g. `!data 2024-03-04`.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Interactive prompt for chat commands.
    Shell,
}

/// Prints replies to stdout instead of a chat channel.
#[derive(Default)]
pub struct StdoutResponder {
    next_id: AtomicU64,
}

#[async_trait]
impl ChannelResponder for StdoutResponder {
    async fn send(&self, content: &str) -> Result<SentMessage, ResponderError> {
        println!("{content}");
        Ok(SentMessage(self.next_id.fetch_add(1, Ordering::Relaxed) + 1))
    }

    async fn edit(&self, _message: SentMessage, content: &str) -> Result<(), ResponderError> {
        println!("{content}");
        Ok(())
    }

    async fn delete(&self, _message: SentMessage) -> Result<(), ResponderError> {
        Ok(())
    }
}

pub async fn run_once(handler: &BotHandler, text: &str) {
    let today = today_in(handler.timezone());
    let Some(command) = BotCommand::parse(text.trim(), false, today) else {
        println!("Unknown command '{}'. Try !pomoc.", text.trim());
        return;
    };
    handler
        .handle_command_with(&StdoutResponder::default(), command, today)
        .await;
}

pub async fn shell(handler: &BotHandler) {
    loop {
        // Esc / Ctrl-C end the session.
        let Ok(line) = Text::new(">")
            .with_help_message("!pomoc lists commands, empty line quits")
            .prompt()
        else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }
        run_once(handler, &line).await;
    }
}
