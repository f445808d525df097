use std::env;
use std::path::PathBuf;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHATS_FILE: &str = "chats.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub chats_file: PathBuf,
    /// Drop a chat's stored history when the bot is removed from it.
    pub purge_on_removal: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup, so tests don't have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("{key}: environment variable not found"))
        };

        let purge_on_removal = match lookup("PURGE_ON_REMOVAL") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| format!("PURGE_ON_REMOVAL: invalid boolean '{raw}'"))?,
            None => false,
        };

        Ok(Self {
            telegram_bot_token: required("TELEGRAM_BOT_API_KEY")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_org_id: lookup("OPENAI_ORG_ID").filter(|v| !v.is_empty()),
            openai_model: lookup("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            chats_file: lookup("CHATS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CHATS_FILE)),
            purge_on_removal,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
