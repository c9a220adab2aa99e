//! Gemini client: discover a usable model, then ask it for a one-word answer.
//!
//! Both calls authenticate with the API key as the `key` query parameter.
//! Every failure surfaces as [`Error::AiUnavailable`]; nothing is retried.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::error::{Error, Result};

/// Prefix prepended to every question
pub const ONE_WORD_INSTRUCTION: &str = "Answer in exactly one word: ";

const GENERATE_METHOD: &str = "generateContent";

/// Model descriptor as returned by the listing endpoint
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-1.5-flash`
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Name without the `models/` resource prefix
    pub fn id(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }
}

/// First listed Gemini model that supports content generation
pub fn select_model(models: &[ModelInfo]) -> Option<&ModelInfo> {
    models.iter().find(|m| {
        m.name.contains("gemini")
            && m.supported_generation_methods
                .iter()
                .any(|method| method == GENERATE_METHOD)
    })
}

/// First whitespace-delimited token of the text
pub fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

pub struct GeminiClient {
    config: AiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::AiUnavailable("GEMINI_API_KEY is not configured".into()))
    }

    /// List the models available to the configured key (first page only)
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/models", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key()?)])
            .timeout(self.config.list_timeout())
            .send()
            .await?;

        let listing: ModelList = check_status(response).await?.json().await?;
        tracing::debug!(count = listing.models.len(), "Listed AI models");
        Ok(listing.models)
    }

    /// Generate text from `model` (bare id, without `models/`)
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:{}", self.config.base_url, model, GENERATE_METHOD);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key()?)])
            .timeout(self.config.generate_timeout())
            .json(&request)
            .send()
            .await?;

        let generated: GenerateContentResponse = check_status(response).await?.json().await?;

        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| Error::AiUnavailable("No text returned from AI".into()))
    }

    /// Discover a model and ask it `question`, keeping only the first word of the reply
    pub async fn answer_in_one_word(&self, question: &str) -> Result<String> {
        tracing::debug!(question, "Asking AI");

        let result: Result<String> = async {
            let models = self.list_models().await?;
            let model = select_model(&models).ok_or_else(|| {
                Error::AiUnavailable("No valid Gemini model found for this key".into())
            })?;
            tracing::info!(model = %model.id(), "Using AI model");

            let prompt = format!("{}{}", ONE_WORD_INSTRUCTION, question);
            let text = self.generate(model.id(), &prompt).await?;

            first_word(&text)
                .map(str::to_string)
                .ok_or_else(|| Error::AiUnavailable("No text returned from AI".into()))
        }
        .await;

        if let Err(e) = &result {
            tracing::warn!("AI request failed: {}", e);
        }
        result
    }
}

/// Turn a non-2xx response into `AiUnavailable` carrying the status code
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), body = %body, "AI provider returned an error");
    Err(Error::AiUnavailable(status.as_u16().to_string()))
}

// Wire types

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}
