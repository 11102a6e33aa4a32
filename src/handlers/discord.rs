use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ResponderError;
use crate::handlers::discord_responder::{ChannelResponder, SentMessage, SerenityResponder};
use crate::models::lucky_number::LuckyNumberOutcome;
use crate::models::record::FormattedOutput;
use crate::service::commands::{BotCommand, help_message};
use crate::service::dates::{format_date_range, today_in};
use crate::service::exam_format::format_exams;
use crate::service::homework_format::format_homework;
use crate::service::lesson_format::format_lessons;
use crate::service::lucky_number::{UNAVAILABLE_MESSAGE, extract_lucky_number, render_lucky_number};
use crate::service::timetable::{FetchRequest, TimetableSource, fetch};

pub const GENERIC_FAILURE: &str = "❌ Wystapil blad podczas przetwarzania zapytania.";
const PLAN_FAILURE: &str = "❌ Nie udalo sie pobrac planu.";
const HOMEWORK_FAILURE: &str = "❌ Nie udalo sie pobrac zadan.";
const EXAMS_FAILURE: &str = "❌ Nie udalo sie pobrac testow.";

pub struct BotHandler {
    source: Arc<dyn TimetableSource>,
    tz: Tz,
}

impl BotHandler {
    pub fn new(source: Arc<dyn TimetableSource>, tz: Tz) -> Self {
        BotHandler { source, tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Runs one command end to end against `responder`. Never fails: errors
    /// are logged and reported in the channel.
    pub async fn handle_command_with(
        &self,
        responder: &dyn ChannelResponder,
        command: BotCommand,
        today: NaiveDate,
    ) {
        let request_id = Uuid::new_v4();
        info!(%request_id, command = command.name(), "CMD_START");

        if command == BotCommand::Help {
            match responder.send(&help_message()).await {
                Ok(_) => info!(%request_id, command = command.name(), "CMD_SUCCESS"),
                Err(err) => error!(%request_id, command = command.name(), "CMD_ERROR: {}", err),
            }
            return;
        }

        let loading = match responder.send(loading_text(command)).await {
            Ok(message) => message,
            Err(err) => {
                error!(%request_id, command = command.name(), "CMD_ERROR: could not send loading message: {}", err);
                return;
            }
        };

        match self.run(responder, command, loading, today).await {
            Ok(()) => info!(%request_id, command = command.name(), "CMD_SUCCESS"),
            Err(err) => {
                error!(%request_id, command = command.name(), "CMD_ERROR: {}", err);
                if let Err(edit_err) = responder.edit(loading, GENERIC_FAILURE).await {
                    warn!(%request_id, "could not report failure: {}", edit_err);
                }
            }
        }
    }

    async fn run(
        &self,
        responder: &dyn ChannelResponder,
        command: BotCommand,
        loading: SentMessage,
        today: NaiveDate,
    ) -> Result<(), ResponderError> {
        let source = self.source.as_ref();
        match command {
            BotCommand::Help => {
                responder.edit(loading, &help_message()).await?;
            }
            BotCommand::Plan { day } => {
                let Some(payload) = fetch(source, FetchRequest::Lessons { start: day, end: day }).await else {
                    return responder.edit(loading, PLAN_FAILURE).await;
                };
                let days = match format_lessons(&payload, self.tz, today) {
                    FormattedOutput::Days(days) => days,
                    other => return edit_diagnostic(responder, loading, &other).await,
                };
                responder.delete(loading).await?;
                if days.is_empty() {
                    responder.send("✨ Brak lekcji na dzis!").await?;
                }
                send_all(responder, &days).await?;
            }
            BotCommand::Data { start, end } => {
                let Some(payload) = fetch(source, FetchRequest::Lessons { start, end }).await else {
                    return responder.edit(loading, PLAN_FAILURE).await;
                };
                let days = match format_lessons(&payload, self.tz, today) {
                    FormattedOutput::Days(days) => days,
                    other => return edit_diagnostic(responder, loading, &other).await,
                };
                responder.delete(loading).await?;
                responder
                    .send(&format!("\n📗 **Plan lekcji**{}", format_date_range(start, end)))
                    .await?;
                send_all(responder, &days).await?;
            }
            BotCommand::LuckyNumber => {
                let outcome = match fetch(source, FetchRequest::LuckyNumber { day: today }).await {
                    Some(payload) => extract_lucky_number(&payload, self.tz, today),
                    None => LuckyNumberOutcome::Unavailable,
                };
                let text = match outcome {
                    LuckyNumberOutcome::Available(lucky) => render_lucky_number(&lucky),
                    LuckyNumberOutcome::Unavailable => UNAVAILABLE_MESSAGE.to_string(),
                };
                responder.edit(loading, &text).await?;
            }
            BotCommand::Homework { day } => {
                let Some(payload) = fetch(source, FetchRequest::Homework { start: day, end: day }).await else {
                    return responder.edit(loading, HOMEWORK_FAILURE).await;
                };
                let output = format_homework(&payload, self.tz, today);
                responder.delete(loading).await?;
                match output {
                    FormattedOutput::NotFound(_) => {
                        responder.send("✨ Brak zadan na jutro! 🎉").await?;
                    }
                    FormattedOutput::NoData(msg) => {
                        responder.send(&msg).await?;
                    }
                    FormattedOutput::Days(days) => send_all(responder, &days).await?,
                }
            }
            BotCommand::Exams { start, end } => {
                let Some(payload) = fetch(source, FetchRequest::Exams { start, end }).await else {
                    return responder.edit(loading, EXAMS_FAILURE).await;
                };
                let days = match format_exams(&payload, self.tz, today) {
                    FormattedOutput::Days(days) => days,
                    other => return edit_diagnostic(responder, loading, &other).await,
                };
                responder.delete(loading).await?;
                if days.is_empty() {
                    responder.send("\n✨ **Brak testow!** 🎉").await?;
                } else {
                    responder
                        .send(&format!("\n✍️ **Testy**{}", format_date_range(start, end)))
                        .await?;
                    send_all(responder, &days).await?;
                }
            }
        }
        Ok(())
    }
}

fn loading_text(command: BotCommand) -> &'static str {
    match command {
        BotCommand::Help => "🔄 ...",
        BotCommand::Plan { .. } => "🔄 Pobieram plan na dzis...",
        BotCommand::Data { .. } => "🔄 Pobieram plan...",
        BotCommand::LuckyNumber => "🔄 Pobieram numerek...",
        BotCommand::Homework { .. } => "🔄 Pobieram zadania...",
        BotCommand::Exams { .. } => "🔄 Pobieram sprawdziany...",
    }
}

async fn edit_diagnostic(
    responder: &dyn ChannelResponder,
    loading: SentMessage,
    output: &FormattedOutput,
) -> Result<(), ResponderError> {
    let text = output.diagnostic().unwrap_or(GENERIC_FAILURE);
    responder.edit(loading, text).await
}

async fn send_all(responder: &dyn ChannelResponder, blocks: &[String]) -> Result<(), ResponderError> {
    for block in blocks {
        responder.send(block).await?;
    }
    Ok(())
}

#[async_trait]
impl EventHandler for BotHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {}", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let mentioned = !msg.mention_everyone && msg.mentions_me(&ctx).await.unwrap_or(false);
        let today = today_in(self.tz);
        let Some(command) = BotCommand::parse(&msg.content, mentioned, today) else {
            return;
        };
        let responder = SerenityResponder::new(ctx.http.clone(), msg.channel_id);
        self.handle_command_with(&responder, command, today).await;
    }
}
