use std::sync::Arc;

use crate::{
    models::{CandidateMovie, EnrichedMovie, RatingError, StatusEvent, TmdbSearchResponse},
    services::{progress::ProgressSink, providers::MovieSearchService},
};

/// Outcome of looking up a poster for one title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterLookup {
    /// Poster path of the first search result
    Found(String),
    /// No results, or the first result has no poster
    NotFound,
    /// The search round trip itself failed
    TransientError(String),
}

impl PosterLookup {
    /// Reads the poster path of the first result, if there is a usable one
    pub fn from_response(response: TmdbSearchResponse) -> Self {
        response
            .results
            .and_then(|results| results.into_iter().next())
            .and_then(|first| first.poster_path)
            .filter(|path| !path.is_empty())
            .map_or(PosterLookup::NotFound, PosterLookup::Found)
    }
}

/// A candidate that could not be turned into a display panel
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("cannot display {title}: {source}")]
pub struct DisplayFailure {
    pub title: String,
    #[source]
    pub source: RatingError,
}

/// Attaches a poster URL and a half-star rating to each candidate
pub struct PosterEnricher {
    search: Arc<dyn MovieSearchService>,
    image_base_url: String,
    default_poster_url: String,
}

impl PosterEnricher {
    pub fn new(
        search: Arc<dyn MovieSearchService>,
        image_base_url: String,
        default_poster_url: String,
    ) -> Self {
        Self {
            search,
            image_base_url,
            default_poster_url,
        }
    }

    /// Searches by title and classifies the result. Never fails.
    pub async fn lookup_poster(&self, title: &str) -> PosterLookup {
        match self.search.search_movies(title).await {
            Ok(response) => PosterLookup::from_response(response),
            Err(e) => PosterLookup::TransientError(e.to_string()),
        }
    }

    /// Absolute poster URL for a lookup, or `None` when the placeholder applies
    pub fn poster_url(&self, lookup: &PosterLookup) -> Option<String> {
        match lookup {
            PosterLookup::Found(path) => Some(format!("{}{}", self.image_base_url, path)),
            PosterLookup::NotFound | PosterLookup::TransientError(_) => None,
        }
    }

    /// Enriches one candidate.
    ///
    /// Poster problems always degrade to the default poster with a warning. Only a rating
    /// that cannot be coerced to a number fails, and only for this candidate.
    pub async fn enrich(
        &self,
        candidate: CandidateMovie,
        progress: &dyn ProgressSink,
    ) -> Result<EnrichedMovie, DisplayFailure> {
        let title = candidate.title.clone();
        progress.emit(StatusEvent::fetching_poster(&title));

        let lookup = self.lookup_poster(&title).await;
        let poster_url = match self.poster_url(&lookup) {
            Some(url) => url,
            None => {
                match &lookup {
                    PosterLookup::TransientError(cause) => {
                        tracing::warn!(title = %title, cause = %cause, "Poster search failed")
                    }
                    _ => tracing::warn!(title = %title, "No poster path in search results"),
                }
                progress.emit(StatusEvent::poster_fallback(&title));
                self.default_poster_url.clone()
            }
        };

        let result = match candidate.rating() {
            Ok(rating) => Ok(EnrichedMovie::new(candidate, rating, poster_url)),
            Err(source) => {
                tracing::warn!(title = %title, error = %source, "Cannot display movie details");
                progress.emit(StatusEvent::display_failed(&title));
                Err(DisplayFailure {
                    title: title.clone(),
                    source,
                })
            }
        };

        progress.emit(StatusEvent::poster_done(&title));
        result
    }
}
