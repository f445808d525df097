//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the text-completion call used to produce summaries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::errors::SummoError;

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 60;
const TOP_P: f64 = 1.0;
const FREQUENCY_PENALTY: f64 = 0.0;
const PRESENCE_PENALTY: f64 = 1.0;

/// Anything that can turn a prompt into generated text.
///
/// `Ok(None)` means the service answered but produced no candidate text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, SummoError>;
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl<'a> CompletionRequest<'a> {
    #[must_use]
    pub fn tldr(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub text: Option<String>,
}

impl CompletionResponse {
    /// Text of the first choice, if there is any non-empty text.
    #[must_use]
    pub fn first_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.text)
            .filter(|text| !text.trim().is_empty())
    }
}

/// LLM API client for generating summaries
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_key: String, org_id: Option<String>, model_name: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            org_id,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
        )
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, SummoError> {
        #[cfg(feature = "debug-logs")]
        info!("Using completion prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            prompt_chars = prompt.chars().count(),
            "Requesting completion"
        );

        let request_body = CompletionRequest::tldr(&self.model_name, prompt);

        let mut request = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummoError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "OpenAI API error");
            return Err(SummoError::OpenAIStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            SummoError::OpenAIError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        Ok(parsed.first_text())
    }
}
