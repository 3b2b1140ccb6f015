use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use std::io::Cursor;

/// Fatal failures of an analysis run. Any of these aborts the whole run;
/// nothing is retried and no partial report is kept.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Model call failed: {0}")]
    ModelCall(String),

    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AnalysisError {
    pub fn status(&self) -> Status {
        match self {
            AnalysisError::Authentication(_) => Status::Unauthorized,
            AnalysisError::ModelCall(_) => Status::BadGateway,
            AnalysisError::MalformedModelOutput(_) => Status::BadGateway,
            AnalysisError::InvalidInput(_) => Status::UnprocessableEntity,
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::ModelCall(err.to_string())
    }
}

impl<'r> Responder<'r, 'static> for AnalysisError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = serde_json::json!({
            "error": self.to_string(),
        })
        .to_string();

        Response::build()
            .status(self.status())
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}
