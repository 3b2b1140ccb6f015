#[macro_use]
extern crate rocket;

use rocket::fairing::AdHoc;
use tracing::{error, info};

use brand_visibility::config::AppConfig;
use brand_visibility::llm::GeminiClient;

#[launch]
fn rocket() -> _ {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brand_visibility=info,rocket=info".into()),
        )
        .init();

    info!("Starting brand-visibility v{}", env!("CARGO_PKG_VERSION"));

    brand_visibility::mount(rocket::build())
        .attach(AdHoc::config::<AppConfig>())
        .attach(AdHoc::try_on_ignite("Gemini Client", |rocket| async move {
            let Some(config) = rocket.state::<AppConfig>().cloned() else {
                error!("Application configuration was not loaded");
                return Err(rocket);
            };

            match GeminiClient::from_config(&config) {
                Ok(client) => {
                    info!(
                        "Using model {} (concurrent scorers: {})",
                        client.model(),
                        config.concurrent_scorers
                    );
                    Ok(rocket.manage(client))
                }
                Err(e) => {
                    error!("Failed to build model client: {}", e);
                    Err(rocket)
                }
            }
        }))
}
