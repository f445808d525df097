use std::sync::Arc;

use tracing::{info, warn};

use super::client::CompletionBackend;
use crate::errors::SummoError;
use crate::prompt::{PROMPT_SEPARATOR, build_tldr_prompt, format_messages};
use crate::store::SharedStore;

/// What a summarization produced, short of a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(String),
    /// The service answered without any candidate text
    NoResponse,
    /// Nothing has been recorded for this chat
    ChatNotFound,
}

pub struct Summarizer {
    backend: Arc<dyn CompletionBackend>,
}

impl Summarizer {
    #[must_use]
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Summarize the recorded history of `chat_id`.
    ///
    /// The store lock is released before the outbound call, so other events
    /// for the same chat may land while the summary is being generated.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion request fails.
    pub async fn summarize(
        &self,
        store: &SharedStore,
        chat_id: &str,
    ) -> Result<SummaryOutcome, SummoError> {
        let history = {
            let store = store.lock().await;
            if !store.contains(chat_id) {
                info!(chat_id, "No history recorded for chat");
                return Ok(SummaryOutcome::ChatNotFound);
            }
            format_messages(store.read(chat_id), PROMPT_SEPARATOR)
        };

        // An empty history still goes out as a request.
        let prompt = build_tldr_prompt(&history);

        match self.backend.complete(&prompt).await? {
            Some(text) => Ok(SummaryOutcome::Summary(text.trim().to_string())),
            None => {
                warn!(chat_id, "Completion returned no candidate text");
                Ok(SummaryOutcome::NoResponse)
            }
        }
    }
}
