//! Gemini `generateContent` client
//!
//! Sends a single-part prompt with fixed generation and safety settings and
//! extracts `candidates[0].content.parts[0].text` from the response.
//!
//! # Example
//!
//! ```rust,ignore
//! use feelora::llm::{GeminiClient, LLMClient};
//!
//! let client = GeminiClient::new(api_key, DEFAULT_API_BASE.to_string(), "gemini-pro".to_string());
//! let reply = client.generate("Hello!").await?;
//! ```

use crate::llm::client::{default_safety_settings, GenerationConfig, LLMClient, SafetySetting};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        Self::with_config(api_key, api_base, model, GenerationConfig::default())
    }

    pub fn with_config(
        api_key: String,
        api_base: String,
        model: String,
        generation_config: GenerationConfig,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            generation_config,
            safety_settings: default_safety_settings(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.generation_config,
            safety_settings: &self.safety_settings,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "calling generateContent");

        // The key travels in the query string; errors are stripped of the URL
        // before they can reach a log line.
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LLM(format!("Gemini request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLM(format!("Gemini API error {}: {}", status, text)));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| {
                AppError::LLM(format!(
                    "Invalid response body from Gemini: {}",
                    e.without_url()
                ))
            })?;

        body.first_text()
            .ok_or_else(|| AppError::LLM("Invalid response format from Gemini API".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
