use crate::core::models::Message;

/// Separator used when the history is embedded in a summarization prompt
pub const PROMPT_SEPARATOR: &str = ". ";

/// Separator used when the history is shown back to the chat
pub const DISPLAY_SEPARATOR: &str = "\n";

/// Instruction appended after the formatted history
pub const TLDR_INSTRUCTION: &str =
    "tl;dr based on who said it with up to 3 bullet points per author. Skip greetings.";

/// Render one message as `<sender>[ replied to <recipient>]: <text>`
#[must_use]
pub fn format_message(message: &Message) -> String {
    match &message.replied_to {
        Some(replied) => format!(
            "{} replied to {}: {}",
            message.from, replied.first_name, message.text
        ),
        None => format!("{}: {}", message.from, message.text),
    }
}

/// Render every message and join them with `separator`.
/// An empty history yields an empty string.
#[must_use]
pub fn format_messages(messages: &[Message], separator: &str) -> String {
    messages
        .iter()
        .map(format_message)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Build the full completion prompt from an already formatted history
#[must_use]
pub fn build_tldr_prompt(history: &str) -> String {
    format!("{history} {TLDR_INSTRUCTION}")
}
