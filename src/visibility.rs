use regex::Regex;
use tracing::{debug, info};

use crate::config::{ELLIPSIS, SNIPPET_CHARS};
use crate::error::AnalysisError;
use crate::llm::LanguageModel;
use crate::models::{BrandVisibility, PromptBreakdown, VisibilityReport};

/// Case-insensitive whole-word matcher for a brand name.
pub fn brand_pattern(brand: &str) -> Result<Regex, AnalysisError> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(brand)))
        .map_err(|e| AnalysisError::InvalidInput(format!("brand '{}': {}", brand, e)))
}

/// Split text after `.`, `!` or `?` when followed by whitespace.
/// Approximate: abbreviations and decimals followed by a space split too.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let Some(&(end, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }
        sentences.push(&text[start..end]);
        while chars.peek().is_some_and(|&(_, w)| w.is_whitespace()) {
            chars.next();
        }
        start = chars.peek().map_or(text.len(), |&(i, _)| i);
    }

    if start < text.len() || sentences.is_empty() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// First `SNIPPET_CHARS` characters followed by the ellipsis marker.
pub fn truncate_with_ellipsis(text: &str) -> String {
    let mut out: String = text.chars().take(SNIPPET_CHARS).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Snippets of every sentence in `response` that mentions `brand`.
pub fn extract_contexts(response: &str, brand: &str) -> Vec<String> {
    let needle = brand.to_lowercase();
    split_sentences(response)
        .into_iter()
        .filter(|sentence| sentence.to_lowercase().contains(&needle))
        .map(|sentence| truncate_with_ellipsis(&sentence.trim().replace('\n', " ")))
        .collect()
}

pub fn visibility_percent(appeared: u32, total_prompts: usize) -> f64 {
    if total_prompts == 0 {
        return 0.0;
    }
    f64::from(appeared) / total_prompts as f64 * 100.0
}

/// Ask the model each query in turn and measure how often each brand shows up.
/// The first failed call aborts the whole pass.
pub async fn score_visibility<M: LanguageModel>(
    model: &M,
    brands: &[String],
    queries: &[String],
) -> Result<VisibilityReport, AnalysisError> {
    let patterns = brands
        .iter()
        .map(|b| brand_pattern(b))
        .collect::<Result<Vec<_>, _>>()?;
    let mut metrics: Vec<BrandVisibility> = brands.iter().map(|b| BrandVisibility::new(b)).collect();
    let mut breakdown = Vec::with_capacity(queries.len());

    for (index, query) in queries.iter().enumerate() {
        debug!("Visibility query {}/{}: {}", index + 1, queries.len(), query);
        let response = model.generate(query).await?;

        let mut found = Vec::new();
        for ((brand, pattern), metric) in brands.iter().zip(&patterns).zip(metrics.iter_mut()) {
            let matches = pattern.find_iter(&response).count() as u32;
            if matches == 0 {
                continue;
            }
            found.push(brand.clone());
            metric.appeared_in_prompts += 1;
            metric.total_mentions += matches;
            metric.contexts.extend(extract_contexts(&response, brand));
        }

        breakdown.push(PromptBreakdown {
            prompt: query.clone(),
            brands_mentioned: found,
            response_preview: truncate_with_ellipsis(&response),
        });
    }

    let total_prompts = queries.len();
    for metric in &mut metrics {
        metric.visibility_score = visibility_percent(metric.appeared_in_prompts, total_prompts);
    }

    info!(
        "Visibility pass done: {} prompts, {} brands",
        total_prompts,
        brands.len()
    );
    Ok(VisibilityReport {
        metrics,
        breakdown,
        total_prompts,
    })
}
