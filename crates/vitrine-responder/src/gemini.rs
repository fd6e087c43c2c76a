// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini text-generation API.
//!
//! Used only as the menu's last resort. Each call is a single attempt with
//! a client-level timeout; the engine adds its own bound on top and
//! substitutes a fixed reply on any failure, so no retry logic lives here.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vitrine_config::model::ResponderConfig;
use vitrine_core::{FallbackResponder, VitrineError};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Fallback responder backed by the Gemini generateContent endpoint.
pub struct GeminiResponder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiResponder {
    /// Builds the client from config. Fails when no API key is configured.
    pub fn new(config: &ResponderConfig) -> Result<Self, VitrineError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| VitrineError::Config("responder.api_key is not set".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VitrineError::Responder {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

fn build_prompt(text: &str, display_name: &str) -> String {
    format!(
        "Você é o assistente virtual de uma agência que vende sites e templates. \
         Responda em português, de forma breve e cordial, ao cliente {display_name}. \
         Mensagem do cliente: {text}"
    )
}

#[async_trait]
impl FallbackResponder for GeminiResponder {
    async fn respond(&self, text: &str, display_name: &str) -> Result<String, VitrineError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(text, display_name),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| VitrineError::Responder {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VitrineError::Responder {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|e| VitrineError::Responder {
                message: format!("malformed API response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let reply = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| VitrineError::Responder {
                message: "API response carried no candidates".to_string(),
                source: None,
            })?;

        debug!(chars = reply.len(), "fallback responder reply received");
        Ok(reply)
    }
}
