use rocket::form::Form;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, routes, FromForm, Route, State};
use rocket_dyn_templates::{context, Template};
use serde::Deserialize;
use tracing::{error, info};

use crate::analysis::{run_analysis, AnalysisRequest, RunOptions};
use crate::config::{AppConfig, DEFAULT_BRANDS, DEFAULT_CATEGORY};
use crate::dashboard;
use crate::error::AnalysisError;
use crate::llm::GeminiClient;
use crate::models::AnalysisReport;
use crate::prompts::query_generator_prompt;

/// Sidebar configuration form
#[derive(Debug, FromForm)]
pub struct AnalysisForm {
    pub category: String,
    pub brands: String,
}

/// Brands as a JSON list or as the comma separated text the form takes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BrandsInput {
    List(Vec<String>),
    Csv(String),
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    pub category: String,
    pub brands: BrandsInput,
}

impl AnalyzeBody {
    fn into_request(self) -> Result<AnalysisRequest, AnalysisError> {
        match self.brands {
            BrandsInput::List(brands) => AnalysisRequest::new(&self.category, brands),
            BrandsInput::Csv(csv) => AnalysisRequest::parse(&self.category, &csv),
        }
    }
}

fn run_options(config: &AppConfig) -> RunOptions {
    RunOptions {
        concurrent_scorers: config.concurrent_scorers,
    }
}

/// Serialize chart data for embedding in a `<script>` block.
fn chart_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c")
}

// =====================
// HTML Page Routes
// =====================

#[get("/")]
pub fn index(model: &State<GeminiClient>) -> Template {
    Template::render("index", context! {
        title: "AI Brand Share of Voice Tracker",
        category: DEFAULT_CATEGORY,
        brands: DEFAULT_BRANDS,
        model: model.model(),
        has_api_key: model.has_api_key(),
    })
}

#[post("/analyze", data = "<form>")]
pub async fn analyze(
    form: Form<AnalysisForm>,
    model: &State<GeminiClient>,
    config: &State<AppConfig>,
) -> (Status, Template) {
    let form = form.into_inner();
    let result = match AnalysisRequest::parse(&form.category, &form.brands) {
        Ok(request) => run_analysis(model.inner(), &request, run_options(config)).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            let view = dashboard::build_view(&report);
            let chart = chart_json(&view.leaderboard);
            let brand_options: Vec<&str> = view.contexts.iter().map(|c| c.brand.as_str()).collect();
            (
                Status::Ok,
                Template::render("report", context! {
                    title: "AI Brand Share of Voice Tracker",
                    category: &form.category,
                    brands: &form.brands,
                    model: model.model(),
                    view: &view,
                    chart_data: chart,
                    brand_options: brand_options,
                }),
            )
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            (
                e.status(),
                Template::render("error", context! {
                    title: "Analysis failed",
                    category: &form.category,
                    brands: &form.brands,
                    model: model.model(),
                    message: e.to_string(),
                }),
            )
        }
    }
}

// =====================
// JSON API Routes
// =====================

#[post("/analyze", format = "json", data = "<body>")]
pub async fn api_analyze(
    body: Json<AnalyzeBody>,
    model: &State<GeminiClient>,
    config: &State<AppConfig>,
) -> Result<Json<AnalysisReport>, AnalysisError> {
    let request = body.into_inner().into_request()?;
    info!("API analysis requested for '{}'", request.category);
    let report = run_analysis(model.inner(), &request, run_options(config)).await?;
    Ok(Json(report))
}

#[get("/prompt?<category>")]
pub fn api_prompt(category: &str) -> String {
    query_generator_prompt(category)
}

#[get("/health")]
pub fn health() -> &'static str {
    "ok"
}

// =====================
// Route Collections
// =====================

pub fn index_routes() -> Vec<Route> {
    routes![index, analyze, health]
}

pub fn api_routes() -> Vec<Route> {
    routes![api_analyze, api_prompt]
}
