// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gemini `generateContent` as the intent classifier.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{optional_env, required_env};
use crate::error::{Error, ProtocolError};
use crate::protocol::IntentClassifier;

/// Configuration for the Gemini classifier.
///
/// # Examples
///
/// ```
/// use voxlight::protocol::GeminiConfig;
///
/// let config = GeminiConfig::new("my-key").with_model("gemini-1.5-flash");
/// assert_eq!(
///     config.endpoint(),
///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
/// );
/// ```
#[derive(Clone)]
pub struct GeminiConfig {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiConfig {
    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";
    /// Public API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    /// Default HTTP timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// - `GEMINI_API_KEY` (required)
    /// - `GEMINI_MODEL` (optional)
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the API key is not set.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::new(required_env("GEMINI_API_KEY")?);
        if let Some(model) = optional_env("GEMINI_MODEL") {
            config = config.with_model(model);
        }
        Ok(config)
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the client at another host, e.g. a proxy or a test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the HTTP timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `generateContent` URL for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Creates a `GeminiClassifier` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<GeminiClassifier, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(GeminiClassifier {
            endpoint: self.endpoint(),
            api_key: self.api_key,
            client,
        })
    }
}

// The API key stays out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// [`IntentClassifier`] backed by Gemini.
///
/// ```no_run
/// use voxlight::command::{build_prompt, resolve};
/// use voxlight::protocol::{GeminiConfig, IntentClassifier};
///
/// # async fn example() -> voxlight::Result<()> {
/// let classifier = GeminiConfig::from_env()?.into_client()?;
/// let raw = classifier.classify(&build_prompt("불 켜줘")).await?;
/// let command = resolve(&raw);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GeminiClassifier {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl GeminiClassifier {
    /// Returns the `generateContent` URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for GeminiClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClassifier")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl IntentClassifier for GeminiClassifier {
    async fn classify(&self, prompt: &str) -> Result<String, ProtocolError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(endpoint = %self.endpoint, "Sending classifier request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProtocolError::AuthenticationFailed);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(ProtocolError::Http)?;
        let text = body.text().ok_or_else(|| {
            ProtocolError::InvalidResponse("no text in first candidate".to_string())
        })?;

        tracing::debug!(text = %text, "Received classifier response");
        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
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

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GeminiConfig::new("key");
        assert_eq!(config.model(), "gemini-2.0-flash");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(
            config.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn base_url_override() {
        let config = GeminiConfig::new("key").with_base_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.endpoint(),
            "http://127.0.0.1:9000/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn debug_hides_api_key() {
        let config = GeminiConfig::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));

        let client = config.into_client().unwrap();
        assert!(!format!("{client:?}").contains("super-secret"));
    }

    #[test]
    fn response_text_joins_parts() {
        let body: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "```json\n"}, {"text": "{\"action\":\"led_on\"}\n```"}]}
            }]
        }))
        .unwrap();
        assert_eq!(
            body.text().as_deref(),
            Some("```json\n{\"action\":\"led_on\"}\n```")
        );
    }

    #[test]
    fn response_without_candidates() {
        let body: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(body.text().is_none());

        let body: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert!(body.text().is_none());
    }

    #[test]
    fn request_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: "hi" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]})
        );
    }
}
