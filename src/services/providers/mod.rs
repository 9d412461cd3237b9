//! External service abstraction
//!
//! The pipeline talks to two collaborators: a chat completion service that produces
//! recommendations, and a movie metadata service that is searched for posters. Both are
//! trait objects so the pipeline can be wired against real clients or test doubles.
use std::future::Future;

use reqwest::{Client as HttpClient, Response};

use crate::{
    config::RequestPolicy,
    error::{AppError, AppResult},
    models::TmdbSearchResponse,
};

pub mod openai;
pub mod tmdb;

/// Trait for chat completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends a system instruction and a user message, asking for a JSON object reply.
    ///
    /// Returns the raw text of the first choice.
    async fn complete_json(&self, system_prompt: &str, user_message: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for movie metadata search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieSearchService: Send + Sync {
    /// Free-text search by movie title
    async fn search_movies(&self, title: &str) -> AppResult<TmdbSearchResponse>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the HTTP client shared by a provider, applying the configured timeout
pub fn build_http_client(policy: &RequestPolicy) -> AppResult<HttpClient> {
    let mut builder = HttpClient::builder();
    if let Some(timeout) = policy.timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Turns a non-success status into `AppError::ExternalApi`, keeping the body text
pub async fn ensure_success(response: Response, api: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::ExternalApi(format!(
        "{} returned status {}: {}",
        api, status, body
    )))
}

/// Runs `op` until it succeeds or `max_attempts` calls have failed
pub async fn with_attempts<T, F, Fut>(
    provider: &'static str,
    max_attempts: u32,
    mut op: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    provider,
                    attempt,
                    max_attempts,
                    error = %e,
                    "Outbound call failed, retrying"
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_single_attempt_by_default() {
        let calls = AtomicU32::new(0);
        let result: AppResult<()> = with_attempts("test", 1, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::ExternalApi("down".to_string())) }
        })
        .await;

        assert_err!(result);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_attempts("test", 3, || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call < 2 {
                    Err(AppError::ExternalApi("flaky".to_string()))
                } else {
                    Ok(call)
                }
            }
        })
        .await;

        assert_eq!(assert_ok!(result), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: AppResult<()> = with_attempts("test", 2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::ExternalApi("down".to_string())) }
        })
        .await;

        assert_err!(result);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_build_http_client_with_timeout() {
        let policy = RequestPolicy {
            timeout: Some(Duration::from_secs(5)),
            max_attempts: 1,
        };
        assert_ok!(build_http_client(&policy));
        assert_ok!(build_http_client(&RequestPolicy::default()));
    }

    fn response_with(status: u16, body: &'static str) -> Response {
        Response::from(
            axum::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_ensure_success_passes_ok_response() {
        let response = assert_ok!(ensure_success(response_with(200, "{}"), "TMDB API").await);
        assert_eq!(response.text().await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_ensure_success_maps_error_status() {
        let response = response_with(401, "Invalid API key");
        let err = assert_err!(ensure_success(response, "TMDB API").await);
        assert!(matches!(err, AppError::ExternalApi(_)));
        assert_eq!(
            err.to_string(),
            "External API error: TMDB API returned status 401 Unauthorized: Invalid API key"
        );
    }
}
