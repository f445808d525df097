//! All Telegram-specific functionality

pub mod bot;
pub mod command;
pub mod handlers;
pub mod inbound;
pub mod response_builder;

// Re-export main types for convenience
pub use bot::SummoBot;
pub use command::Command;
pub use handlers::HandlerContext;
