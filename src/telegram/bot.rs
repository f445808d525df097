use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::Message as TgMessage;
use tracing::{debug, info, warn};

use super::command::{Command, registered_commands};
use super::handlers::{self, HandlerContext};
use crate::ai::Summarizer;
use crate::core::config::AppConfig;
use crate::store::SharedStore;

/// Update routing: commands first, then plain text, edits and membership
/// changes of the bot itself.
#[must_use]
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    let messages = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handlers::handle_command),
        )
        .branch(
            dptree::filter(|msg: TgMessage| msg.text().is_some()).endpoint(handlers::handle_text),
        );

    dptree::entry()
        .branch(messages)
        .branch(Update::filter_edited_message().endpoint(handlers::handle_edit))
        .branch(Update::filter_my_chat_member().endpoint(handlers::handle_membership))
}

pub struct SummoBot {
    bot: Bot,
    context: HandlerContext,
}

impl SummoBot {
    #[must_use]
    pub fn new(config: &AppConfig, store: SharedStore, summarizer: Arc<Summarizer>) -> Self {
        Self {
            bot: Bot::new(&config.telegram_bot_token),
            context: HandlerContext {
                store,
                summarizer,
                purge_on_removal: config.purge_on_removal,
            },
        }
    }

    /// Poll for updates until SIGINT or SIGTERM arrives.
    ///
    /// A signal that lands before the dispatcher is polling is not lost; the
    /// watcher keeps listening and stops on the next one.
    pub async fn run(self) {
        info!("Starting Telegram bot...");

        if let Err(error) = self.bot.set_my_commands(registered_commands()).await {
            warn!(%error, "Failed to register bot commands");
        }

        let mut dispatcher = Dispatcher::builder(self.bot, schema())
            .dependencies(dptree::deps![self.context])
            .default_handler(|update| async move {
                debug!(?update, "Unhandled update");
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .build();

        let shutdown = dispatcher.shutdown_token();
        tokio::spawn(async move {
            loop {
                let signal = shutdown_signal().await;
                info!(signal, "Termination signal received, stopping dispatcher");
                match shutdown.shutdown() {
                    Ok(stopped) => {
                        stopped.await;
                        break;
                    }
                    Err(error) => warn!(?error, "Dispatcher not running yet, waiting for next signal"),
                }
            }
        });

        dispatcher.dispatch().await;
        info!("Telegram bot stopped");
    }
}

/// Wait for Ctrl+C or SIGTERM, returning which one arrived.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    }
}
