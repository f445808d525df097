//! All AI/LLM functionality

pub mod client;
pub mod summarizer;

// Re-export main types for convenience
pub use client::{CompletionBackend, LlmClient};
pub use summarizer::{Summarizer, SummaryOutcome};
