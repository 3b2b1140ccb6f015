pub mod analysis;
pub mod citations;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod queries;
pub mod routes;
pub mod visibility;

use rocket::fs::{relative, FileServer};
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;

/// Mount the dashboard and API onto `rocket`. The caller manages the
/// `GeminiClient` and `AppConfig` state.
pub fn mount(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .attach(Template::fairing())
        .mount("/", routes::index_routes())
        .mount("/api", routes::api_routes())
        .mount("/static", FileServer::from(relative!("static")))
}
