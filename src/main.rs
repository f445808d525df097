use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use summo::ai::{LlmClient, Summarizer};
use summo::core::config::AppConfig;
use summo::store::ChatStore;
use summo::telegram::SummoBot;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the real environment still applies.
    let _ = dotenvy::dotenv();
    summo::setup_logging();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    info!(
        chats_file = %config.chats_file.display(),
        model = %config.openai_model,
        "Starting Summo"
    );

    let store = ChatStore::load(&config.chats_file)
        .with_context(|| format!("Failed to load {}", config.chats_file.display()))?
        .into_shared();

    let summarizer = Arc::new(Summarizer::new(Arc::new(LlmClient::from_config(&config))));
    let bot = SummoBot::new(&config, Arc::clone(&store), summarizer);

    bot.run().await;

    if let Err(e) = store.lock().await.flush(&config.chats_file) {
        error!("Failed to flush chat store: {}", e);
    }

    Ok(())
}
