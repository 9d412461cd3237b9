use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        providers::{openai::OpenAiProvider, tmdb::TmdbProvider},
        PosterEnricher, RecommendationPipeline, RecommendationResolver,
    },
};

/// Shared application state
///
/// Holds only the read-only pipeline; every request runs its own isolated query.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RecommendationPipeline>,
}

impl AppState {
    pub fn new(pipeline: RecommendationPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Wires the OpenAI and TMDB providers from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let policy = config.request_policy();

        let completion = OpenAiProvider::new(
            config.openai_api_key.clone(),
            config.openai_api_url.clone(),
            config.openai_model.clone(),
            &policy,
        )?;
        let search = TmdbProvider::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            &policy,
        )?;

        let resolver =
            RecommendationResolver::new(Arc::new(completion)).with_resort(config.resort_by_rating);
        let enricher = PosterEnricher::new(
            Arc::new(search),
            config.tmdb_image_base_url.clone(),
            config.default_poster_url.clone(),
        );

        tracing::info!(
            model = %config.openai_model,
            timeout_secs = ?config.request_timeout_secs,
            max_attempts = policy.max_attempts,
            resort_by_rating = config.resort_by_rating,
            "Recommendation pipeline configured"
        );

        Ok(Self::new(RecommendationPipeline::new(resolver, enricher)))
    }
}
