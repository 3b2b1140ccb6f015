pub mod gemini;
#[cfg(test)]
pub mod mock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

use crate::error::AnalysisError;

pub use gemini::GeminiClient;

/// The three call shapes the scorers need from a language model.
pub trait LanguageModel: Send + Sync {
    /// Plain free-text completion.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, AnalysisError>> + Send;

    /// Completion constrained to JSON matching `schema`. Returns the raw text.
    fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> impl Future<Output = Result<String, AnalysisError>> + Send;

    /// Completion with web-search grounding enabled.
    fn generate_grounded(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<GroundedResponse, AnalysisError>> + Send;
}

/// `generateContent` response body. Every level is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundedResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search_queries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GroundedResponse {
    /// Concatenated text parts of the first candidate, empty if there are none.
    pub fn text(&self) -> String {
        self.candidates
            .as_deref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_deref())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Grounding metadata of the first candidate, if the response has any.
    pub fn grounding_metadata(&self) -> Option<&GroundingMetadata> {
        self.candidates
            .as_deref()
            .and_then(|c| c.first())
            .and_then(|c| c.grounding_metadata.as_ref())
    }
}
