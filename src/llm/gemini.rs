use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::{GroundedResponse, LanguageModel};
use crate::config::{api_key_from_env, AppConfig};
use crate::error::AnalysisError;

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Gemini `generateContent` REST client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<[Tool; 1]>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_json_schema: &'a Value,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

impl<'a> GenerateContentRequest<'a> {
    fn text(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: None,
            tools: None,
        }
    }

    fn structured(prompt: &'a str, schema: &'a Value) -> Self {
        Self {
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_json_schema: schema,
            }),
            ..Self::text(prompt)
        }
    }

    fn grounded(prompt: &'a str) -> Self {
        Self {
            tools: Some([Tool {
                google_search: GoogleSearch {},
            }]),
            ..Self::text(prompt)
        }
    }
}

impl GeminiClient {
    pub fn new(
        api_base: &str,
        model: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        })
    }

    /// Build a client from settings, taking the API key from the environment.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        let api_key = api_key_from_env();
        if api_key.is_none() {
            warn!("No Gemini API key in the environment; every model call will fail");
        }
        Self::new(
            &config.gemini_api_base,
            &config.gemini_model,
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GroundedResponse, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AnalysisError::Authentication(
                "no API key found in GEMINI_API_KEY or GOOGLE_API_KEY".to_string(),
            )
        })?;

        debug!("POST {} ({})", self.endpoint(), self.model);
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    AnalysisError::Authentication(format!("{}: {}", status, preview))
                }
                _ => AnalysisError::ModelCall(format!("{}: {}", status, preview)),
            });
        }

        response.json::<GroundedResponse>().await.map_err(|e| {
            AnalysisError::ModelCall(format!("undecodable generateContent response: {}", e))
        })
    }
}

impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let response = self
            .generate_content(&GenerateContentRequest::text(prompt))
            .await?;
        Ok(response.text())
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<String, AnalysisError> {
        let response = self
            .generate_content(&GenerateContentRequest::structured(prompt, schema))
            .await?;
        Ok(response.text())
    }

    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedResponse, AnalysisError> {
        self.generate_content(&GenerateContentRequest::grounded(prompt))
            .await
    }
}
