use std::collections::HashMap;

use crate::models::*;

const NO_BRANDS_MENTIONED: &str = "❌ None";

/// Key metrics row. The top brand is the first one with the highest visibility.
pub fn dashboard_stats(report: &AnalysisReport) -> DashboardStats {
    let top = report
        .visibility
        .metrics
        .iter()
        .fold(None::<&BrandVisibility>, |best, m| match best {
            Some(b) if b.visibility_score >= m.visibility_score => Some(b),
            _ => Some(m),
        });

    DashboardStats {
        total_prompts: report.visibility.total_prompts,
        top_brand: top.map(|m| m.brand.clone()),
        top_brand_visibility: top.map_or(0.0, |m| m.visibility_score),
        total_citations_scanned: report.citations.metrics.iter().map(|m| m.raw_citations).sum(),
        total_valid_citations: report.citations.total_valid_citations,
    }
}

/// Visibility vs. citation share per brand, in input order.
pub fn leaderboard(report: &AnalysisReport) -> Vec<LeaderboardRow> {
    report
        .visibility
        .metrics
        .iter()
        .map(|m| LeaderboardRow {
            brand: m.brand.clone(),
            visibility: m.visibility_score,
            citation_share: report
                .citations
                .metric(&m.brand)
                .map_or(0.0, |c| c.share_of_voice),
        })
        .collect()
}

pub fn breakdown_rows(report: &AnalysisReport) -> Vec<BreakdownRow> {
    report
        .visibility
        .breakdown
        .iter()
        .map(|b| BreakdownRow {
            prompt: b.prompt.clone(),
            brands_mentioned: if b.brands_mentioned.is_empty() {
                NO_BRANDS_MENTIONED.to_string()
            } else {
                b.brands_mentioned.join(", ")
            },
            response_preview: b.response_preview.clone(),
        })
        .collect()
}

/// Citation count per URL, most cited first; ties keep first-seen order.
pub fn url_frequencies(pages: &[CitedPage]) -> Vec<UrlFrequency> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<UrlFrequency> = Vec::new();
    for page in pages {
        match index.get(page.url.as_str()) {
            Some(&i) => counts[i].citations += 1,
            None => {
                index.insert(page.url.as_str(), counts.len());
                counts.push(UrlFrequency {
                    url: page.url.clone(),
                    citations: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.citations.cmp(&a.citations));
    counts
}

pub fn brand_contexts(report: &AnalysisReport) -> Vec<BrandContexts> {
    report
        .visibility
        .metrics
        .iter()
        .map(|m| BrandContexts {
            brand: m.brand.clone(),
            contexts: m.contexts.clone(),
        })
        .collect()
}

/// Bind a finished report to everything the report page shows.
pub fn build_view(report: &AnalysisReport) -> DashboardView {
    DashboardView {
        category: report.category.clone(),
        generated_at: report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        stats: dashboard_stats(report),
        leaderboard: leaderboard(report),
        breakdown: breakdown_rows(report),
        url_counts: url_frequencies(&report.citations.top_pages),
        contexts: brand_contexts(report),
    }
}
