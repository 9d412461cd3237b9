//! TMDB movie search provider
//!
//! Only the `/search/movie` endpoint is used; the enricher reads `poster_path`
//! from the first result.
use crate::{
    config::RequestPolicy,
    error::{AppError, AppResult},
    models::TmdbSearchResponse,
    services::providers::{build_http_client, ensure_success, with_attempts, MovieSearchService},
};
use reqwest::{Client as HttpClient, Request};

const PROVIDER: &str = "tmdb";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    max_attempts: u32,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, policy: &RequestPolicy) -> AppResult<Self> {
        Ok(Self {
            http_client: build_http_client(policy)?,
            api_key,
            api_url,
            max_attempts: policy.max_attempts,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search/movie", self.api_url.trim_end_matches('/'))
    }

    fn search_request(&self, title: &str) -> AppResult<Request> {
        Ok(self
            .http_client
            .get(self.search_url())
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .build()?)
    }

    async fn send(&self, title: &str) -> AppResult<TmdbSearchResponse> {
        let request = self.search_request(title)?;
        let response = self.http_client.execute(request).await?;
        let response = ensure_success(response, "TMDB API").await?;

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::MalformedResponse(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MovieSearchService for TmdbProvider {
    async fn search_movies(&self, title: &str) -> AppResult<TmdbSearchResponse> {
        let response = with_attempts(PROVIDER, self.max_attempts, || self.send(title)).await?;

        tracing::info!(
            title = %title,
            results = response.results.as_ref().map_or(0, Vec::len),
            provider = PROVIDER,
            "Movie search completed"
        );

        Ok(response)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider(api_url: &str) -> TmdbProvider {
        TmdbProvider::new(
            "test_key".to_string(),
            api_url.to_string(),
            &RequestPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_search_url() {
        let provider = create_test_provider("https://api.themoviedb.org/3");
        assert_eq!(
            provider.search_url(),
            "https://api.themoviedb.org/3/search/movie"
        );

        let provider = create_test_provider("http://test.local/3/");
        assert_eq!(provider.search_url(), "http://test.local/3/search/movie");
    }

    #[test]
    fn test_search_request_query_params() {
        let provider = create_test_provider("https://api.themoviedb.org/3");
        let request = provider.search_request("The Matrix").unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/3/search/movie");
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("api_key".to_string(), "test_key".to_string()),
                ("query".to_string(), "The Matrix".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_response_deserialization() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "id": 27205,
                    "title": "Inception",
                    "poster_path": "/abc.jpg",
                    "vote_average": 8.4
                },
                {
                    "id": 64956,
                    "title": "Inception: The Cobol Job",
                    "poster_path": null
                }
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;

        let response: TmdbSearchResponse = serde_json::from_str(json).unwrap();
        let results = response.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title.as_deref(), Some("Inception"));
        assert_eq!(results[0].poster_path.as_deref(), Some("/abc.jpg"));
        assert_eq!(results[1].poster_path, None);
    }

    #[test]
    fn test_provider_name() {
        let provider = create_test_provider("http://test.local/3");
        assert_eq!(provider.name(), "tmdb");
    }
}
