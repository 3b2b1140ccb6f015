use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};

use crate::citations::score_citations;
use crate::error::AnalysisError;
use crate::llm::LanguageModel;
use crate::models::AnalysisReport;
use crate::queries::generate_queries;
use crate::visibility::score_visibility;

/// Inputs of one run: a category and the brands to track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub category: String,
    pub brands: Vec<String>,
}

impl AnalysisRequest {
    /// Build a request from dashboard input. Brands are comma separated and
    /// trimmed; blank entries are dropped, duplicates are kept. The category
    /// is kept exactly as typed.
    pub fn parse(category: &str, brands_csv: &str) -> Result<Self, AnalysisError> {
        Self::new(category, brands_csv.split(',').map(str::to_string).collect())
    }

    pub fn new(category: &str, brands: Vec<String>) -> Result<Self, AnalysisError> {
        if category.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(
                "category must not be empty".to_string(),
            ));
        }
        let brands = brands
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            category: category.to_string(),
            brands,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub concurrent_scorers: bool,
}

/// Generate queries, then score visibility and citations for them.
/// Any fatal error discards the whole run.
pub async fn run_analysis<M: LanguageModel>(
    model: &M,
    request: &AnalysisRequest,
    options: RunOptions,
) -> Result<AnalysisReport, AnalysisError> {
    let span = info_span!("analysis", category = %request.category, brands = request.brands.len());

    async move {
        info!("Starting analysis");
        let queries = generate_queries(model, &request.category).await?;

        let (visibility, citations) = if options.concurrent_scorers {
            tokio::try_join!(
                score_visibility(model, &request.brands, &queries.prompts),
                score_citations(model, &request.brands, &queries.prompts),
            )?
        } else {
            let visibility = score_visibility(model, &request.brands, &queries.prompts).await?;
            let citations = score_citations(model, &request.brands, &queries.prompts).await?;
            (visibility, citations)
        };

        info!(
            "Analysis complete: {} prompts, {} valid citations",
            visibility.total_prompts, citations.total_valid_citations
        );
        Ok(AnalysisReport {
            category: request.category.clone(),
            brands: request.brands.clone(),
            queries,
            visibility,
            citations,
            generated_at: Utc::now(),
        })
    }
    .instrument(span)
    .await
}
