use std::{cmp::Ordering, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    models::{CandidateMovie, RecommendationPayload},
    services::providers::CompletionService,
};

/// Instruction sent ahead of every user query
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant designed to help people find movies to watch based on their inputs and preferences. Provide outputs in the form of a json object with a list of 5 recommended movies with key as 'movies'. Each movie should be a dictionary with keys 'title', 'overview', 'release_date', 'imdb_rating'. The value for 'title' should be the movie title, 'overview' should be a short description of the movie, 'release_date' should be the release date of the movie, and 'imdb_rating' should be the IMDB rating of the movie. The movies should be sorted in descending order of IMDB rating.";

/// Turns a free-text query into candidate movies via the completion service
pub struct RecommendationResolver {
    completion: Arc<dyn CompletionService>,
    resort_by_rating: bool,
}

impl RecommendationResolver {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            resort_by_rating: false,
        }
    }

    /// Re-sort candidates by descending rating instead of trusting the model's order
    pub fn with_resort(mut self, resort_by_rating: bool) -> Self {
        self.resort_by_rating = resort_by_rating;
        self
    }

    /// Resolves a query into 0-5 candidates.
    ///
    /// Any transport, parse or shape error fails the whole call; there is no partial
    /// recovery of individual records. An empty list is a successful outcome.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> AppResult<Vec<CandidateMovie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput("Query cannot be empty".to_string()));
        }

        let text = self.completion.complete_json(SYSTEM_PROMPT, query).await?;
        let mut candidates = parse_candidates(&text)?;

        if self.resort_by_rating {
            sort_by_rating_desc(&mut candidates);
        }

        tracing::info!(candidates = candidates.len(), "Recommendations resolved");

        Ok(candidates)
    }
}

/// Parses the `{"movies": [...]}` payload returned by the model
pub fn parse_candidates(text: &str) -> AppResult<Vec<CandidateMovie>> {
    let payload: RecommendationPayload = serde_json::from_str(text)?;
    Ok(payload.movies.unwrap_or_default())
}

/// Stable sort, highest rating first. Candidates with unusable ratings go last.
fn sort_by_rating_desc(candidates: &mut [CandidateMovie]) {
    candidates.sort_by(|a, b| match (a.rating().ok(), b.rating().ok()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
