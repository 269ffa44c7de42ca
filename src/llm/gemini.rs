// src/llm/gemini.rs
// Client for the Gemini generateContent endpoint. `generate` is a single
// attempt that surfaces every failure; `generate_reply` wraps it with the
// retry-then-fallback policy the conversational surfaces rely on.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::CONFIG;
use crate::session::{ConversationTurn, TurnRole};

/// Canned reply returned once every attempt against the provider has failed.
pub const FALLBACK_REPLY: &str = "I apologize for the technical difficulty. Here are some general well-being strategies: 1) Take deep breaths, 2) Step away for a short break, 3) Stretch your body, 4) Stay hydrated. How are you feeling right now?";

/// Outcome of [`GeminiClient::generate_reply`]. `text` is always usable;
/// `succeeded` is false when it holds the canned fallback.
#[derive(Debug, Clone)]
pub struct GeminiReply {
    pub text: String,
    pub succeeded: bool,
}

/// Sampling parameters sent as the request's `generationConfig`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1000,
        }
    }
}

impl GenerationConfig {
    /// Short-reply variant for the voice surface.
    pub fn voice() -> Self {
        Self {
            max_output_tokens: 100,
            ..Self::default()
        }
    }
}

// Wire types for the generateContent request/response bodies.

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

pub struct GeminiClient {
    client: HttpClient,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: HttpClient::new(),
            api_key,
            base_url: CONFIG.gemini_base_url.clone(),
            model: CONFIG.gemini_model.clone(),
            timeout: CONFIG.gemini_request_timeout(),
            max_retries: CONFIG.gemini_max_retries,
            retry_delay: CONFIG.gemini_retry_delay(),
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different endpoint, e.g. a local stub in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the attempt count and base delay between attempts.
    pub fn with_retry_policy(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.retry_delay = retry_delay;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Delay before the attempt after `attempt` failures; grows linearly so
    /// consecutive waits never shrink.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_delay * attempt
    }

    /// Assemble request contents: prior turns in order, then the current
    /// message as a final user turn. Assistant turns map to the `model` role.
    fn build_contents(message: &str, history: &[ConversationTurn]) -> Vec<GeminiContent> {
        let mut contents: Vec<GeminiContent> = history
            .iter()
            .map(|turn| GeminiContent {
                role: match turn.role {
                    TurnRole::User => "user".to_string(),
                    TurnRole::Assistant => "model".to_string(),
                },
                parts: vec![GeminiPart {
                    text: turn.content.clone(),
                }],
            })
            .collect();

        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: message.to_string(),
            }],
        });

        contents
    }

    /// One generateContent call. Fails on transport errors, non-2xx status,
    /// provider-reported errors and responses without any candidate text.
    pub async fn generate(
        &self,
        message: &str,
        history: &[ConversationTurn],
        config: &GenerationConfig,
    ) -> Result<String> {
        let request = GeminiRequest {
            contents: Self::build_contents(message, history),
            generation_config: config.clone(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API returned {}: {}", status, body);
        }

        let response: GeminiResponse = response.json().await?;

        if let Some(error) = &response.error {
            anyhow::bail!("Gemini API error: {}", error.message);
        }

        Self::extract_text(response)
    }

    fn extract_text(response: GeminiResponse) -> Result<String> {
        let text = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("Gemini response contained no candidate text");
        }

        Ok(text)
    }

    /// Generate a reply, absorbing provider failures. Retries up to the
    /// configured attempt count with a linearly growing delay between
    /// attempts, then falls back to [`FALLBACK_REPLY`] with
    /// `succeeded = false`. Never returns an error.
    pub async fn generate_reply(
        &self,
        message: &str,
        history: &[ConversationTurn],
        config: &GenerationConfig,
    ) -> GeminiReply {
        info!(
            message_len = message.len(),
            history_len = history.len(),
            "Sending Gemini request"
        );

        let mut attempt = 0;
        loop {
            attempt += 1;

            match self.generate(message, history, config).await {
                Ok(text) => {
                    info!(attempt, response_len = text.len(), "Gemini reply generated");
                    return GeminiReply {
                        text,
                        succeeded: true,
                    };
                }
                Err(e) if attempt < self.max_retries => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Gemini request failed, retrying"
                    );
                    sleep(delay).await;
                }
                Err(e) => {
                    error!(attempt, error = %e, "Gemini request failed on final attempt, using fallback reply");
                    return GeminiReply {
                        text: FALLBACK_REPLY.to_string(),
                        succeeded: false,
                    };
                }
            }
        }
    }
}
