use tracing::{debug, info};

use crate::config::NO_TITLE;
use crate::error::AnalysisError;
use crate::llm::LanguageModel;
use crate::models::{BrandCitation, CitationReport, CitedPage};

/// Share of all valid citations, rounded to two decimals.
pub fn share_of_voice(raw: u32, total_valid: u32) -> f64 {
    if total_valid == 0 {
        return 0.0;
    }
    let share = f64::from(raw) / f64::from(total_valid) * 100.0;
    (share * 100.0).round_ties_even() / 100.0
}

/// Ask each query with web grounding and count which brands the cited pages are about.
pub async fn score_citations<M: LanguageModel>(
    model: &M,
    brands: &[String],
    queries: &[String],
) -> Result<CitationReport, AnalysisError> {
    let needles: Vec<String> = brands.iter().map(|b| b.to_lowercase()).collect();
    let mut counts = vec![0u32; brands.len()];
    let mut total_valid_citations = 0u32;
    let mut top_pages = Vec::new();

    for (index, query) in queries.iter().enumerate() {
        let response = model.generate_grounded(query).await?;

        let Some(chunks) = response
            .grounding_metadata()
            .and_then(|m| m.grounding_chunks.as_deref())
        else {
            debug!("No grounding metadata for query {}: {}", index + 1, query);
            continue;
        };

        for web in chunks.iter().filter_map(|c| c.web.as_ref()) {
            let url = match web.uri.as_deref() {
                Some(uri) if !uri.is_empty() => uri,
                _ => continue,
            };
            let title = web
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(NO_TITLE);

            total_valid_citations += 1;
            top_pages.push(CitedPage {
                url: url.to_string(),
                title: title.to_string(),
            });

            let url_lower = url.to_lowercase();
            let title_lower = title.to_lowercase();
            for (needle, count) in needles.iter().zip(counts.iter_mut()) {
                if url_lower.contains(needle.as_str()) || title_lower.contains(needle.as_str()) {
                    *count += 1;
                }
            }
        }
    }

    let metrics = brands
        .iter()
        .zip(counts)
        .map(|(brand, raw)| BrandCitation {
            brand: brand.clone(),
            raw_citations: raw,
            share_of_voice: share_of_voice(raw, total_valid_citations),
        })
        .collect();

    info!(
        "Citation pass done: {} prompts, {} valid citations",
        queries.len(),
        total_valid_citations
    );
    Ok(CitationReport {
        metrics,
        top_pages,
        total_valid_citations,
    })
}
