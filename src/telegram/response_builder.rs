//! Reply texts sent back to the chat.
//!
//! Every outcome, including failures, ends up as plain text here; nothing
//! structured crosses back over the Telegram boundary.

use crate::ai::SummaryOutcome;
use crate::core::models::Message;
use crate::errors::SummoError;
use crate::prompt::{DISPLAY_SEPARATOR, format_message};

pub const GREETING: &str = "Hey, my name is Summo. I summarize text messages for you :)";
pub const CHAT_NOT_FOUND: &str = "Chat not found";
pub const NO_RESPONSE: &str = "No response";
pub const NO_MESSAGES: &str = "No messages";

/// Longest text Telegram accepts in one message, in UTF-16 code units
pub const TELEGRAM_MAX_LENGTH: usize = 4096;

/// Help text, sent with HTML parse mode
pub const HELP_HTML: &str = "<b>Commands</b>\n\
    1. /tldr - show summary\n\
    2. /showMessages - show recorded messages\n\
    3. /help - show this message";

/// Reply for a `/tldr` request
#[must_use]
pub fn summary_reply(result: &Result<SummaryOutcome, SummoError>) -> String {
    match result {
        Ok(SummaryOutcome::Summary(text)) if !text.is_empty() => text.clone(),
        Ok(SummaryOutcome::Summary(_) | SummaryOutcome::NoResponse) => NO_RESPONSE.to_string(),
        Ok(SummaryOutcome::ChatNotFound) => CHAT_NOT_FOUND.to_string(),
        Err(SummoError::OpenAIStatus { status, reason }) => {
            format!("Error generating summary: {status} {reason}")
        }
        Err(e) => format!("Error generating summary: {e}"),
    }
}

/// Replies for a `/showMessages` request.
///
/// The history is cut at message boundaries into chunks Telegram will accept;
/// a single message longer than the limit is split on its own.
#[must_use]
pub fn history_replies(messages: &[Message]) -> Vec<String> {
    if messages.is_empty() {
        return vec![NO_MESSAGES.to_string()];
    }

    let separator_len = utf16_len(DISPLAY_SEPARATOR);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in messages.iter().map(format_message) {
        for piece in split_to_limit(&line, TELEGRAM_MAX_LENGTH) {
            let piece_len = utf16_len(&piece);
            if !current.is_empty() && current_len + separator_len + piece_len > TELEGRAM_MAX_LENGTH {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if !current.is_empty() {
                current.push_str(DISPLAY_SEPARATOR);
                current_len += separator_len;
            }
            current.push_str(&piece);
            current_len += piece_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[must_use]
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn split_to_limit(text: &str, limit: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for ch in text.chars() {
        let width = ch.len_utf16();
        if current_len + width > limit {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(ch);
        current_len += width;
    }

    if !current.is_empty() || parts.is_empty() {
        parts.push(current);
    }
    parts
}
