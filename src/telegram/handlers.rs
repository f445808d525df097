use std::sync::Arc;

use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatMemberKind, ChatMemberUpdated, Message as TgMessage, ParseMode};
use tracing::{debug, info};

use super::command::Command;
use super::inbound::{chat_key, recorded_message};
use super::response_builder::{GREETING, HELP_HTML, history_replies, summary_reply};
use crate::ai::Summarizer;
use crate::store::{ChatStore, SharedStore};

/// Shared context injected into teloxide's dispatcher.
#[derive(Clone)]
pub struct HandlerContext {
    pub store: SharedStore,
    pub summarizer: Arc<Summarizer>,
    pub purge_on_removal: bool,
}

pub async fn handle_command(
    bot: Bot,
    msg: TgMessage,
    cmd: Command,
    ctx: HandlerContext,
) -> ResponseResult<()> {
    let chat_id = chat_key(&msg);
    info!(%chat_id, ?cmd, "Handling command");

    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, GREETING).await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, HELP_HTML)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Command::Tldr => {
            let result = ctx.summarizer.summarize(&ctx.store, &chat_id).await;
            if let Err(error) = &result {
                tracing::error!(%chat_id, %error, "Failed to generate summary");
            }
            bot.send_message(msg.chat.id, summary_reply(&result)).await?;
        }
        Command::ShowMessages => {
            let replies = {
                let store = ctx.store.lock().await;
                history_replies(store.read(&chat_id))
            };
            for reply in replies {
                bot.send_message(msg.chat.id, reply).await?;
            }
        }
    }

    Ok(())
}

pub async fn handle_text(msg: TgMessage, ctx: HandlerContext) -> ResponseResult<()> {
    let chat_id = chat_key(&msg);
    let Some(message) = recorded_message(&msg) else {
        debug!(%chat_id, message_id = msg.id.0, "Ignoring message without sender or text");
        return Ok(());
    };

    info!(
        %chat_id,
        message_id = message.id,
        username = msg.from.as_ref().and_then(|u| u.username.as_deref()),
        "Recording message"
    );
    ctx.store.lock().await.append(&chat_id, message);
    Ok(())
}

pub async fn handle_edit(msg: TgMessage, ctx: HandlerContext) -> ResponseResult<()> {
    let chat_id = chat_key(&msg);
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let updated = ctx.store.lock().await.update(&chat_id, msg.id.0, text);
    if updated {
        info!(%chat_id, message_id = msg.id.0, "Applied message edit");
    } else {
        debug!(%chat_id, message_id = msg.id.0, "Edit target not recorded");
    }
    Ok(())
}

/// How the bot's own membership in a chat changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Added,
    Removed,
    Unchanged,
}

#[must_use]
pub fn membership_change(was_present: bool, is_present: bool) -> MembershipChange {
    match (was_present, is_present) {
        (false, true) => MembershipChange::Added,
        (true, false) => MembershipChange::Removed,
        _ => MembershipChange::Unchanged,
    }
}

/// Handle the bot leaving a chat. Returns the number of purged messages, or
/// `None` when the history is kept.
pub fn apply_removal(store: &mut ChatStore, chat_id: &str, purge: bool) -> Option<usize> {
    if !purge {
        return None;
    }
    Some(store.remove(chat_id).map_or(0, |log| log.messages.len()))
}

pub async fn handle_membership(
    bot: Bot,
    update: ChatMemberUpdated,
    ctx: HandlerContext,
) -> ResponseResult<()> {
    let chat_id = update.chat.id.0.to_string();
    let change = membership_change(
        update.old_chat_member.kind.is_present(),
        update.new_chat_member.kind.is_present(),
    );

    match change {
        MembershipChange::Added => {
            info!(%chat_id, "Bot added to chat");
            bot.send_message(update.chat.id, GREETING).await?;
        }
        MembershipChange::Removed => {
            let purged = apply_removal(&mut *ctx.store.lock().await, &chat_id, ctx.purge_on_removal);
            match purged {
                Some(count) => info!(%chat_id, purged = count, "Bot removed from chat, history purged"),
                None => info!(%chat_id, "Bot removed from chat, history kept"),
            }
        }
        MembershipChange::Unchanged => debug!(%chat_id, "Bot membership changed"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Message;

    #[test]
    fn test_membership_change_decision() {
        assert_eq!(membership_change(false, true), MembershipChange::Added);
        assert_eq!(membership_change(true, false), MembershipChange::Removed);
        assert_eq!(membership_change(true, true), MembershipChange::Unchanged);
        assert_eq!(membership_change(false, false), MembershipChange::Unchanged);
    }

    #[test]
    fn test_left_member_is_not_present() {
        assert!(!ChatMemberKind::Left.is_present());
    }

    #[test]
    fn test_removal_keeps_history_by_default() {
        let mut store = ChatStore::new();
        store.append("42", Message::new(1, "Alice", "hi", 0));

        assert_eq!(apply_removal(&mut store, "42", false), None);
        assert_eq!(store.read("42").len(), 1);
    }

    #[test]
    fn test_removal_purges_when_enabled() {
        let mut store = ChatStore::new();
        store.append("42", Message::new(1, "Alice", "hi", 0));
        store.append("42", Message::new(2, "Bob", "yo", 1));
        store.append("7", Message::new(1, "Carol", "hey", 2));

        assert_eq!(apply_removal(&mut store, "42", true), Some(2));
        assert!(!store.contains("42"));
        assert!(store.contains("7"));
        assert_eq!(apply_removal(&mut store, "unknown", true), Some(0));
    }
}
