use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show this help message")]
    Help,
    #[command(description = "Summarize the recorded conversation")]
    Tldr,
    #[command(rename = "showMessages", description = "Show the recorded messages")]
    ShowMessages,
}

/// Commands advertised in the Telegram client menu.
///
/// `setMyCommands` only accepts lowercase names, so `/showMessages` is parsed
/// but left out of the menu.
#[must_use]
pub fn registered_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Start the bot"),
        BotCommand::new("help", "Show this help message"),
        BotCommand::new("tldr", "Summarize the recorded conversation"),
    ]
}
