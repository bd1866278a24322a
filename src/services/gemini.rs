// src/services/gemini.rs

//! Google Gemini client, used for both collaborators: text completion and
//! image-to-text extraction. One blocking-free `generateContent` call per
//! invocation; no streaming, no conversation state.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::{Completion, ServiceError, TextExtraction};

pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Resolved model settings handed to the client at construction time.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub api_url: String,
    pub api_key: String,
    pub temperature: f32,
}

impl ModelConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            temperature: 0.0,
        }
    }
}

pub struct GeminiClient {
    http: Client,
    config: ModelConfig,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    async fn generate(&self, parts: Vec<ReqPart>) -> Result<String, ServiceError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_url, self.config.model, self.config.api_key
        );

        let body = GenerateRequest {
            contents: vec![ReqContent {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.config.temperature),
            }),
        };

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(ServiceError::Unavailable(format!("HTTP {status}: {body}")));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ServiceError::Malformed(
                "response contained no text candidate".to_string(),
            ));
        }

        debug!(model = %self.config.model, chars = text.len(), "generateContent ok");
        Ok(text)
    }
}

impl Completion for GeminiClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        Box::pin(async move {
            self.generate(vec![ReqPart::Text {
                text: prompt.to_string(),
            }])
            .await
        })
    }
}

impl TextExtraction for GeminiClient {
    fn extract<'a>(&'a self, media_ref: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(media_ref)
                .await
                .map_err(|e| ServiceError::Unavailable(format!("reading media '{media_ref}': {e}")))?;

            self.generate(vec![
                ReqPart::InlineData {
                    inline_data: Blob {
                        mime_type: mime_for(media_ref).to_string(),
                        data: BASE64.encode(&bytes),
                    },
                },
                ReqPart::Text {
                    text: "Return the text visible in this image.".to_string(),
                },
            ])
            .await
        })
    }
}

fn mime_for(media_ref: &str) -> &'static str {
    match media_ref.rsplit('.').next().map(str::to_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

// ── Request types ────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<ReqContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct ReqContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ReqPart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ReqPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

#[derive(Serialize)]
struct Blob {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

// ── Response types ───────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<RespContent>,
}

#[derive(Deserialize)]
struct RespContent {
    #[serde(default)]
    parts: Vec<RespPart>,
}

#[derive(Deserialize)]
struct RespPart {
    #[serde(default)]
    text: Option<String>,
}
