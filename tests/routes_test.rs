use std::time::Duration;

use brand_visibility::config::AppConfig;
use brand_visibility::llm::GeminiClient;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;

async fn client_without_key() -> Client {
    let model = GeminiClient::new(
        "http://127.0.0.1:9/v1beta",
        "gemini-2.5-flash",
        None,
        Duration::from_secs(1),
    )
    .unwrap();
    let rocket = brand_visibility::mount(
        rocket::build()
            .manage(model)
            .manage(AppConfig::default()),
    );
    Client::tracked(rocket).await.unwrap()
}

#[rocket::async_test]
async fn test_index_renders_form() {
    let client = client_without_key().await;
    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let body = response.into_string().await.unwrap();
    assert!(body.contains("Run Analysis"));
    assert!(body.contains("CRM Software"));
    assert!(body.contains("Salesforce, HubSpot, Pipedrive"));
    assert!(body.contains("No API key found"));
}

#[rocket::async_test]
async fn test_health() {
    let client = client_without_key().await;
    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().await.unwrap(), "ok");
}

#[rocket::async_test]
async fn test_prompt_endpoint_embeds_category() {
    let client = client_without_key().await;
    let response = client
        .get("/api/prompt?category=Email%20Marketing")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();
    assert!(body.contains("\"Email Marketing\""));
}

#[rocket::async_test]
async fn test_analyze_without_key_shows_authentication_error() {
    let client = client_without_key().await;
    let response = client
        .post("/analyze")
        .header(ContentType::Form)
        .body("category=CRM+Software&brands=Salesforce%2C+HubSpot")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);

    let body = response.into_string().await.unwrap();
    assert!(body.contains("Authentication failed"));
    // The sidebar keeps what the user typed.
    assert!(body.contains("Salesforce, HubSpot"));
}

#[rocket::async_test]
async fn test_analyze_empty_category_is_rejected() {
    let client = client_without_key().await;
    let response = client
        .post("/analyze")
        .header(ContentType::Form)
        .body("category=+&brands=Salesforce")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::UnprocessableEntity);
}

#[rocket::async_test]
async fn test_api_analyze_without_key_returns_json_error() {
    let client = client_without_key().await;
    let response = client
        .post("/api/analyze")
        .header(ContentType::JSON)
        .body(r#"{"category": "CRM Software", "brands": ["Salesforce", "HubSpot"]}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
    assert_eq!(response.content_type(), Some(ContentType::JSON));

    let body: serde_json::Value =
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Authentication failed"));
}

#[rocket::async_test]
async fn test_api_analyze_rejects_blank_category() {
    let client = client_without_key().await;
    let response = client
        .post("/api/analyze")
        .header(ContentType::JSON)
        .body(r#"{"category": "", "brands": "Salesforce"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::UnprocessableEntity);
}
