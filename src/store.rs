//! In-memory chat history, persisted to a JSON file.
//!
//! The store is loaded once at startup and written back on shutdown. Between
//! those two points every change lives in memory only.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::models::{ChatLog, Message};
use crate::errors::SummoError;

/// Store handle shared between the composition root and the bot handlers.
pub type SharedStore = Arc<Mutex<ChatStore>>;

/// Chat id to message history.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChatStore {
    chats: BTreeMap<String, ChatLog>,
}

impl ChatStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store from `path`, creating the file as `{}` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or read, or if its
    /// content is not a valid chat store document.
    pub fn load(path: &Path) -> Result<Self, SummoError> {
        if !path.exists() {
            info!(path = %path.display(), "Chat store not found, creating an empty one");
            fs::write(path, "{}")?;
        }

        let raw = fs::read_to_string(path)?;
        let chats: BTreeMap<String, ChatLog> = serde_json::from_str(&raw).map_err(|e| {
            SummoError::ParseError(format!("{}: {e}", path.display()))
        })?;

        let store = Self { chats };
        info!(
            path = %path.display(),
            chats = store.chat_count(),
            messages = store.message_count(),
            "Loaded chat store"
        );
        Ok(store)
    }

    /// Write the whole store to `path` as pretty-printed JSON, replacing any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn flush(&self, path: &Path) -> Result<(), SummoError> {
        let json = serde_json::to_string_pretty(&self.chats)?;
        fs::write(path, json)?;
        info!(
            path = %path.display(),
            chats = self.chat_count(),
            messages = self.message_count(),
            "Flushed chat store"
        );
        Ok(())
    }

    pub fn append(&mut self, chat_id: &str, message: Message) {
        debug!(chat_id, message_id = message.id, "Recording message");
        self.chats
            .entry(chat_id.to_string())
            .or_default()
            .messages
            .push(message);
    }

    /// Overwrite the text of the message with `message_id`. Returns `false`
    /// when the chat or message is unknown.
    pub fn update(&mut self, chat_id: &str, message_id: i32, new_text: &str) -> bool {
        let Some(log) = self.chats.get_mut(chat_id) else {
            return false;
        };

        match log.messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) => {
                message.text = new_text.to_string();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn read(&self, chat_id: &str) -> &[Message] {
        self.chats
            .get(chat_id)
            .map(|log| log.messages.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains(&self, chat_id: &str) -> bool {
        self.chats.contains_key(chat_id)
    }

    /// Drop a chat's history. Returns the removed log, if any.
    pub fn remove(&mut self, chat_id: &str) -> Option<ChatLog> {
        self.chats.remove(chat_id)
    }

    #[must_use]
    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.chats.values().map(|log| log.messages.len()).sum()
    }

    #[must_use]
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_unknown_chat_is_empty() {
        let store = ChatStore::new();
        assert!(store.read("nope").is_empty());
        assert!(!store.contains("nope"));
    }

    #[test]
    fn test_append_creates_chat_lazily() {
        let mut store = ChatStore::new();
        store.append("42", Message::new(1, "Alice", "hi", 100));

        assert!(store.contains("42"));
        assert_eq!(store.chat_count(), 1);
        assert_eq!(store.message_count(), 1);
    }

    #[test]
    fn test_update_unknown_targets_are_noops() {
        let mut store = ChatStore::new();
        assert!(!store.update("42", 1, "edited"));

        store.append("42", Message::new(1, "Alice", "hi", 100));
        let before = store.clone();
        assert!(!store.update("42", 99, "edited"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_drops_history() {
        let mut store = ChatStore::new();
        store.append("42", Message::new(1, "Alice", "hi", 100));

        let removed = store.remove("42").unwrap();
        assert_eq!(removed.messages.len(), 1);
        assert!(!store.contains("42"));
        assert!(store.remove("42").is_none());
    }
}
