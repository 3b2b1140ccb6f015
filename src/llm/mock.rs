use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{
    Candidate, GroundedResponse, GroundingChunk, GroundingMetadata, LanguageModel, WebSource,
};
use crate::error::AnalysisError;

/// Scripted in-memory model. Each call shape pops its own queue in order;
/// an empty queue fails the call with `ModelCall`.
#[derive(Default)]
pub struct MockModel {
    text: Mutex<VecDeque<Result<String, AnalysisError>>>,
    structured: Mutex<VecDeque<Result<String, AnalysisError>>>,
    grounded: Mutex<VecDeque<Result<GroundedResponse, AnalysisError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: &str) -> Self {
        self.text.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn with_text_error(self, err: AnalysisError) -> Self {
        self.text.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_structured(self, text: &str) -> Self {
        self.structured.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn with_grounded(self, response: GroundedResponse) -> Self {
        self.grounded.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Every prompt received, in call order, across all call shapes.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn record(&self, prompt: &str) {
        self.prompts.lock().unwrap().push(prompt.to_string());
    }
}

fn exhausted() -> AnalysisError {
    AnalysisError::ModelCall("mock model has no scripted response".to_string())
}

impl LanguageModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        self.record(prompt);
        let next = self.text.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(exhausted()))
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        _schema: &Value,
    ) -> Result<String, AnalysisError> {
        self.record(prompt);
        let next = self.structured.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(exhausted()))
    }

    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedResponse, AnalysisError> {
        self.record(prompt);
        let next = self.grounded.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(exhausted()))
    }
}

/// Grounded response whose chunks cite `pages` as `(uri, title)`.
pub fn grounded_pages(pages: &[(&str, Option<&str>)]) -> GroundedResponse {
    let chunks = pages
        .iter()
        .map(|(uri, title)| GroundingChunk {
            web: Some(WebSource {
                uri: Some(uri.to_string()),
                title: title.map(str::to_string),
            }),
        })
        .collect();

    GroundedResponse {
        candidates: Some(vec![Candidate {
            content: None,
            grounding_metadata: Some(GroundingMetadata {
                web_search_queries: None,
                grounding_chunks: Some(chunks),
            }),
        }]),
    }
}

/// Grounded response with a candidate but no grounding metadata.
pub fn ungrounded() -> GroundedResponse {
    GroundedResponse {
        candidates: Some(vec![Candidate::default()]),
    }
}
