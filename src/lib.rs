//! Summo - A Telegram chatbot that records group conversations and summarizes
//! them on request with an `OpenAI` text-completion model.
//!
//! # Architecture
//!
//! The system uses:
//! - teloxide for the Telegram long-polling loop and command parsing
//! - an in-memory chat store, loaded from and flushed to a JSON file
//! - reqwest for the `OpenAI` completions endpoint
//! - Tokio for async runtime and termination signals
//!
//! # Example
//!
//! ```
//! use summo::core::models::Message;
//! use summo::prompt::{DISPLAY_SEPARATOR, format_messages};
//! use summo::store::ChatStore;
//!
//! let mut store = ChatStore::new();
//! store.append("42", Message::new(1, "Alice", "hi", 1_700_000_000));
//! store.append(
//!     "42",
//!     Message::new(2, "Bob", "yo", 1_700_000_005).replying_to("Alice", None),
//! );
//!
//! assert_eq!(
//!     format_messages(store.read("42"), DISPLAY_SEPARATOR),
//!     "Alice: hi\nBob replied to Alice: yo"
//! );
//! ```

// Module declarations
pub mod ai;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod store;
pub mod telegram;

/// Configure structured logging with JSON output.
///
/// Verbosity follows `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// summo::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
