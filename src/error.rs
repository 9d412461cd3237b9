/// Application-level errors
///
/// These never reach the client directly: the pipeline turns them into status messages and
/// logs the underlying cause.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

pub type AppResult<T> = Result<T, AppError>;
