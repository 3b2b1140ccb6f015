use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Search queries generated for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySet {
    pub category: String,
    pub prompts: Vec<String>,
}

/// Visibility metrics for one brand across all prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandVisibility {
    pub brand: String,
    pub appeared_in_prompts: u32,
    pub total_mentions: u32,
    pub visibility_score: f64,
    pub contexts: Vec<String>,
}

impl BrandVisibility {
    pub fn new(brand: &str) -> Self {
        Self {
            brand: brand.to_string(),
            appeared_in_prompts: 0,
            total_mentions: 0,
            visibility_score: 0.0,
            contexts: Vec::new(),
        }
    }
}

/// Which brands one prompt's response mentioned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptBreakdown {
    pub prompt: String,
    pub brands_mentioned: Vec<String>,
    pub response_preview: String,
}

/// Output of the visibility pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityReport {
    pub metrics: Vec<BrandVisibility>,
    pub breakdown: Vec<PromptBreakdown>,
    pub total_prompts: usize,
}

impl VisibilityReport {
    pub fn metric(&self, brand: &str) -> Option<&BrandVisibility> {
        self.metrics.iter().find(|m| m.brand == brand)
    }
}

/// A page cited by a grounded response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedPage {
    pub url: String,
    pub title: String,
}

/// Citation metrics for one brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandCitation {
    pub brand: String,
    pub raw_citations: u32,
    pub share_of_voice: f64,
}

/// Output of the citation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationReport {
    pub metrics: Vec<BrandCitation>,
    pub top_pages: Vec<CitedPage>,
    pub total_valid_citations: u32,
}

impl CitationReport {
    pub fn metric(&self, brand: &str) -> Option<&BrandCitation> {
        self.metrics.iter().find(|m| m.brand == brand)
    }
}

/// Complete result of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub category: String,
    pub brands: Vec<String>,
    pub queries: QuerySet,
    pub visibility: VisibilityReport,
    pub citations: CitationReport,
    pub generated_at: DateTime<Utc>,
}

/// Summary figures for the key metrics row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_prompts: usize,
    pub top_brand: Option<String>,
    pub top_brand_visibility: f64,
    pub total_citations_scanned: u32,
    pub total_valid_citations: u32,
}

/// One bar group in the leaderboard chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub brand: String,
    pub visibility: f64,
    pub citation_share: f64,
}

/// Prompt analysis table row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub prompt: String,
    pub brands_mentioned: String,
    pub response_preview: String,
}

/// How often a URL was cited
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlFrequency {
    pub url: String,
    pub citations: usize,
}

/// Context snippets for one brand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandContexts {
    pub brand: String,
    pub contexts: Vec<String>,
}

/// Everything the report template binds to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub category: String,
    pub generated_at: String,
    pub stats: DashboardStats,
    pub leaderboard: Vec<LeaderboardRow>,
    pub breakdown: Vec<BreakdownRow>,
    pub url_counts: Vec<UrlFrequency>,
    pub contexts: Vec<BrandContexts>,
}
