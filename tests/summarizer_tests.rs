use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use summo::ai::{CompletionBackend, Summarizer, SummaryOutcome};
use summo::core::models::Message;
use summo::errors::SummoError;
use summo::store::{ChatStore, SharedStore};

/// Backend that records every prompt and answers with a canned reply
struct MockBackend {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    reply: fn() -> Result<Option<String>, SummoError>,
}

impl MockBackend {
    fn new(reply: fn() -> Result<Option<String>, SummoError>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            reply,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, SummoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.reply)()
    }
}

fn store_with_chat() -> SharedStore {
    let mut store = ChatStore::new();
    store.append("42", Message::new(1, "Alice", "hi", 1_700_000_000));
    store.append(
        "42",
        Message::new(2, "Bob", "yo", 1_700_000_005).replying_to("Alice", None),
    );
    store.into_shared()
}

#[tokio::test]
async fn test_unknown_chat_makes_no_outbound_call() {
    let backend = MockBackend::new(|| Ok(Some("unused".into())));
    let summarizer = Summarizer::new(backend.clone());

    let outcome = summarizer.summarize(&store_with_chat(), "999").await.unwrap();

    assert_eq!(outcome, SummaryOutcome::ChatNotFound);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_summary_uses_prompt_template() {
    let backend = MockBackend::new(|| Ok(Some("\n- Alice: greeted\n- Bob: replied ".into())));
    let summarizer = Summarizer::new(backend.clone());

    let outcome = summarizer.summarize(&store_with_chat(), "42").await.unwrap();

    assert_eq!(
        outcome,
        SummaryOutcome::Summary("- Alice: greeted\n- Bob: replied".into())
    );
    assert_eq!(backend.calls(), 1);
    assert_eq!(
        backend.prompts.lock().unwrap()[0],
        "Alice: hi. Bob replied to Alice: yo tl;dr based on who said it with up to 3 bullet points per author. Skip greetings."
    );
}

#[tokio::test]
async fn test_empty_history_still_calls_backend_once() {
    // A chat log with no messages can only come from a stored file
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chats.json");
    std::fs::write(&path, r#"{"42": {"messages": []}}"#).unwrap();
    let shared = ChatStore::load(&path).unwrap().into_shared();

    let backend = MockBackend::new(|| Ok(Some("nothing happened".into())));
    let summarizer = Summarizer::new(backend.clone());

    let outcome = summarizer.summarize(&shared, "42").await.unwrap();

    assert_eq!(outcome, SummaryOutcome::Summary("nothing happened".into()));
    assert_eq!(backend.calls(), 1);
    assert_eq!(
        backend.prompts.lock().unwrap()[0],
        " tl;dr based on who said it with up to 3 bullet points per author. Skip greetings."
    );
}

#[tokio::test]
async fn test_missing_candidate_is_no_response() {
    let backend = MockBackend::new(|| Ok(None));
    let summarizer = Summarizer::new(backend.clone());

    let outcome = summarizer.summarize(&store_with_chat(), "42").await.unwrap();
    assert_eq!(outcome, SummaryOutcome::NoResponse);
}

#[tokio::test]
async fn test_backend_failure_is_returned_typed() {
    let backend = MockBackend::new(|| {
        Err(SummoError::OpenAIStatus {
            status: 503,
            reason: "Service Unavailable".into(),
        })
    });
    let summarizer = Summarizer::new(backend.clone());

    let err = summarizer.summarize(&store_with_chat(), "42").await.unwrap_err();
    assert!(matches!(err, SummoError::OpenAIStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_store_is_not_locked_during_outbound_call() {
    struct AppendingBackend {
        store: SharedStore,
    }

    #[async_trait]
    impl CompletionBackend for AppendingBackend {
        async fn complete(&self, _prompt: &str) -> Result<Option<String>, SummoError> {
            // An event landing while the request is in flight
            self.store
                .lock()
                .await
                .append("42", Message::new(3, "Carol", "late", 1_700_000_010));
            Ok(Some("summary".into()))
        }
    }

    let store = store_with_chat();
    let summarizer = Summarizer::new(Arc::new(AppendingBackend {
        store: Arc::clone(&store),
    }));

    let outcome = summarizer.summarize(&store, "42").await.unwrap();

    assert_eq!(outcome, SummaryOutcome::Summary("summary".into()));
    assert_eq!(store.lock().await.read("42").len(), 3);
}
