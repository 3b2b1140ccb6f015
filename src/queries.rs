use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::EXPECTED_QUERY_COUNT;
use crate::error::AnalysisError;
use crate::llm::LanguageModel;
use crate::models::QuerySet;
use crate::prompts::query_generator_prompt;

/// JSON schema the model's structured output must follow.
pub fn query_set_schema() -> Value {
    json!({
        "title": "Prompts",
        "type": "object",
        "properties": {
            "category": {"title": "Category", "type": "string"},
            "prompts": {
                "title": "Prompts",
                "type": "array",
                "items": {"type": "string"}
            }
        },
        "required": ["category", "prompts"]
    })
}

/// Lenient wire shape; required fields are checked after decoding.
#[derive(Deserialize)]
struct RawQuerySet {
    category: Option<String>,
    prompts: Option<Vec<String>>,
}

/// Ask the model for search queries about `category`.
pub async fn generate_queries<M: LanguageModel>(
    model: &M,
    category: &str,
) -> Result<QuerySet, AnalysisError> {
    let prompt = query_generator_prompt(category);
    let raw = model
        .generate_structured(&prompt, &query_set_schema())
        .await?;

    let queries = parse_query_set(&raw)?;
    if queries.prompts.len() != EXPECTED_QUERY_COUNT {
        warn!(
            "Expected {} queries for '{}', model returned {}",
            EXPECTED_QUERY_COUNT,
            category,
            queries.prompts.len()
        );
    }
    info!("Generated {} queries for '{}'", queries.prompts.len(), category);
    Ok(queries)
}

/// Decode and validate structured query output.
pub fn parse_query_set(raw: &str) -> Result<QuerySet, AnalysisError> {
    let trimmed = strip_code_fence(raw.trim());

    let decoded: RawQuerySet = serde_json::from_str(trimmed).map_err(|e| {
        let preview: String = trimmed.chars().take(100).collect();
        AnalysisError::MalformedModelOutput(format!("{} (output starts with: {})", e, preview))
    })?;

    let category = decoded.category.ok_or_else(|| {
        AnalysisError::MalformedModelOutput("missing required field `category`".to_string())
    })?;
    let prompts = decoded.prompts.ok_or_else(|| {
        AnalysisError::MalformedModelOutput("missing required field `prompts`".to_string())
    })?;

    Ok(QuerySet { category, prompts })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::MockModel;

    #[test]
    fn test_parse_valid_output() {
        let raw = r#"{"category": "CRM Software", "prompts": ["a", "b", "c", "d", "e"]}"#;
        let set = parse_query_set(raw).unwrap();
        assert_eq!(set.category, "CRM Software");
        assert_eq!(set.prompts, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_parse_fenced_output() {
        let raw = "```json\n{\"category\": \"CRM\", \"prompts\": [\"x\"]}\n```";
        let set = parse_query_set(raw).unwrap();
        assert_eq!(set.prompts, vec!["x"]);
    }

    #[test]
    fn test_missing_prompts_is_malformed() {
        let err = parse_query_set(r#"{"category": "CRM"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedModelOutput(ref m) if m.contains("prompts")));
    }

    #[test]
    fn test_null_category_is_malformed() {
        let err = parse_query_set(r#"{"category": null, "prompts": []}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedModelOutput(ref m) if m.contains("category")));
    }

    #[test]
    fn test_not_json_is_malformed() {
        let err = parse_query_set("* free crm tools\n* crm pricing").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedModelOutput(_)));
    }

    #[test]
    fn test_wrong_types_are_malformed() {
        let err = parse_query_set(r#"{"category": "CRM", "prompts": "one"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedModelOutput(_)));
    }

    #[test]
    fn test_schema_requires_both_fields() {
        let schema = query_set_schema();
        assert_eq!(schema["required"], json!(["category", "prompts"]));
        assert_eq!(schema["properties"]["prompts"]["items"]["type"], "string");
    }

    #[tokio::test]
    async fn test_generate_sends_rendered_prompt() {
        let model = MockModel::new()
            .with_structured(r#"{"category": "CRM Software", "prompts": ["crm pricing"]}"#);

        let set = generate_queries(&model, "CRM Software").await.unwrap();
        assert_eq!(set.prompts, vec!["crm pricing"]);

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], query_generator_prompt("CRM Software"));
    }

    #[tokio::test]
    async fn test_count_other_than_five_is_accepted() {
        let model = MockModel::new().with_structured(
            r#"{"category": "CRM", "prompts": ["1", "2", "3", "4", "5", "6", "7"]}"#,
        );
        let set = generate_queries(&model, "CRM").await.unwrap();
        assert_eq!(set.prompts.len(), 7);
    }

    #[tokio::test]
    async fn test_call_failure_propagates() {
        let model = MockModel::new();
        let err = generate_queries(&model, "CRM").await.unwrap_err();
        assert!(matches!(err, AnalysisError::ModelCall(_)));
    }
}
