use crate::{
    models::{EnrichedMovie, PipelineState, RecommendationResponse, StatusEvent},
    services::{enricher::PosterEnricher, progress::ProgressSink, resolver::RecommendationResolver},
};

/// Ordered, display-ready recommendations for one query
pub type ResultSet = Vec<EnrichedMovie>;

/// How a single query ended
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Blank query, nothing was run
    Idle,
    /// The completion service answered with zero movies
    Empty { query: String },
    /// Resolving failed; nothing was enriched
    Failed { query: String },
    Complete { query: String, movies: ResultSet },
}

impl PipelineOutcome {
    pub fn state(&self) -> PipelineState {
        match self {
            PipelineOutcome::Idle => PipelineState::Idle,
            PipelineOutcome::Empty { .. } => PipelineState::Empty,
            PipelineOutcome::Failed { .. } => PipelineState::Error,
            PipelineOutcome::Complete { .. } => PipelineState::Complete,
        }
    }

    /// Packages the outcome and the collected events for the presentation layer
    pub fn into_response(self, events: Vec<StatusEvent>) -> RecommendationResponse {
        let state = self.state();
        let (query, label, movies) = match self {
            PipelineOutcome::Idle => return RecommendationResponse::idle(),
            PipelineOutcome::Empty { query } => {
                let label = StatusEvent::no_recommendations(&query).message;
                (query, label, Vec::new())
            }
            PipelineOutcome::Failed { query } => {
                let label = StatusEvent::resolve_failed(&query).message;
                (query, label, Vec::new())
            }
            PipelineOutcome::Complete { query, movies } => {
                let label = StatusEvent::resolved(&query).message;
                (query, label, movies)
            }
        };

        RecommendationResponse {
            query: Some(query),
            state,
            label,
            events,
            movies,
        }
    }
}

/// Resolver followed by per-candidate enrichment, strictly in sequence
pub struct RecommendationPipeline {
    resolver: RecommendationResolver,
    enricher: PosterEnricher,
}

impl RecommendationPipeline {
    pub fn new(resolver: RecommendationResolver, enricher: PosterEnricher) -> Self {
        Self { resolver, enricher }
    }

    /// Runs one query end to end.
    ///
    /// Resolver failures end the query. Enrichment problems are confined to the candidate
    /// they occur on; candidates that cannot be displayed are left out of the result set.
    pub async fn run(&self, query: &str, progress: &dyn ProgressSink) -> PipelineOutcome {
        if query.trim().is_empty() {
            return PipelineOutcome::Idle;
        }

        progress.emit(StatusEvent::resolving(query));

        let candidates = match self.resolver.resolve(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Failed to resolve recommendations");
                progress.emit(StatusEvent::resolve_failed(query));
                return PipelineOutcome::Failed {
                    query: query.to_string(),
                };
            }
        };

        if candidates.is_empty() {
            tracing::info!(query = %query, "No recommendations returned");
            progress.emit(StatusEvent::no_recommendations(query));
            return PipelineOutcome::Empty {
                query: query.to_string(),
            };
        }

        progress.emit(StatusEvent::resolved(query));

        let candidate_count = candidates.len();
        let mut movies = Vec::with_capacity(candidate_count);
        for candidate in candidates {
            match self.enricher.enrich(candidate, progress).await {
                Ok(movie) => movies.push(movie),
                Err(failure) => {
                    tracing::warn!(error = %failure, "Candidate left out of results");
                }
            }
        }

        if movies.len() < candidate_count {
            tracing::warn!(
                query = %query,
                displayed = movies.len(),
                candidates = candidate_count,
                "Partial result set"
            );
        }

        tracing::info!(query = %query, movies = movies.len(), "Recommendations complete");

        PipelineOutcome::Complete {
            query: query.to_string(),
            movies,
        }
    }
}
