//! Conversion of inbound Telegram events into recorded messages.
//!
//! Events that lack the fields a [`Message`] needs are dropped here rather
//! than being stored half-filled.

use teloxide::types::{Message as TgMessage, User};

use crate::core::models::{Message, RepliedTo};

/// The pieces of an inbound event needed to record a message
#[derive(Debug, Clone, Default)]
pub struct InboundParts<'a> {
    pub message_id: i32,
    pub sender_first_name: Option<&'a str>,
    pub text: Option<&'a str>,
    pub timestamp: i64,
    pub reply_author_first_name: Option<&'a str>,
    pub reply_author_username: Option<&'a str>,
}

impl InboundParts<'_> {
    /// Build a [`Message`], or `None` when there is no sender or no text.
    #[must_use]
    pub fn into_message(self) -> Option<Message> {
        let from = self.sender_first_name.filter(|name| !name.is_empty())?;
        let text = self.text?;

        let replied_to = self
            .reply_author_first_name
            .filter(|name| !name.is_empty())
            .map(|first_name| RepliedTo {
                first_name: first_name.to_string(),
                username: self.reply_author_username.map(str::to_string),
            });

        Some(Message {
            id: self.message_id,
            text: text.to_string(),
            from: from.to_string(),
            timestamp: self.timestamp,
            replied_to,
        })
    }
}

/// Chat identifier as stored in the chat log.
#[must_use]
pub fn chat_key(msg: &TgMessage) -> String {
    msg.chat.id.0.to_string()
}

fn parts_of(msg: &TgMessage) -> InboundParts<'_> {
    let sender: Option<&User> = msg.from.as_ref();
    let reply_author: Option<&User> = msg.reply_to_message().and_then(|r| r.from.as_ref());

    InboundParts {
        message_id: msg.id.0,
        sender_first_name: sender.map(|u| u.first_name.as_str()),
        text: msg.text(),
        timestamp: msg.date.timestamp(),
        reply_author_first_name: reply_author.map(|u| u.first_name.as_str()),
        reply_author_username: reply_author.and_then(|u| u.username.as_deref()),
    }
}

/// Typed message for an inbound text event.
#[must_use]
pub fn recorded_message(msg: &TgMessage) -> Option<Message> {
    parts_of(msg).into_message()
}
