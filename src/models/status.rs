use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EnrichedMovie;

/// Placeholder shown when no query has been entered
pub const IDLE_MESSAGE: &str = "Enter text about any movie here to get recommendations.";

/// Severity of a status notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One notification on the progress channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusEvent {
    pub level: StatusLevel,
    pub message: String,
    /// Query or movie title the event is about
    pub subject: String,
    pub emitted_at: DateTime<Utc>,
}

impl StatusEvent {
    fn new(level: StatusLevel, message: String, subject: &str) -> Self {
        Self {
            level,
            message,
            subject: subject.to_string(),
            emitted_at: Utc::now(),
        }
    }

    pub fn resolving(query: &str) -> Self {
        Self::new(
            StatusLevel::Info,
            format!("Getting movie recommendations for {}", query),
            query,
        )
    }

    pub fn resolved(query: &str) -> Self {
        Self::new(
            StatusLevel::Success,
            format!("Got movie recommendations for {}", query),
            query,
        )
    }

    pub fn no_recommendations(query: &str) -> Self {
        Self::new(
            StatusLevel::Warning,
            format!("No movie recommendations found for {}", query),
            query,
        )
    }

    pub fn resolve_failed(query: &str) -> Self {
        Self::new(
            StatusLevel::Error,
            format!(
                "Something went wrong while getting movie recommendations for {}",
                query
            ),
            query,
        )
    }

    pub fn fetching_poster(title: &str) -> Self {
        Self::new(
            StatusLevel::Info,
            format!("Getting movie poster for {}", title),
            title,
        )
    }

    pub fn poster_done(title: &str) -> Self {
        Self::new(
            StatusLevel::Success,
            format!("Got movie poster for {}", title),
            title,
        )
    }

    pub fn poster_fallback(title: &str) -> Self {
        Self::new(
            StatusLevel::Warning,
            format!("Failed to get movie poster for {}", title),
            title,
        )
    }

    pub fn display_failed(title: &str) -> Self {
        Self::new(
            StatusLevel::Warning,
            format!(
                "Something went wrong while displaying movie details for {}",
                title
            ),
            title,
        )
    }
}

/// Final state of one query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Complete,
    Empty,
    Error,
}

/// Body returned to the presentation layer for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub query: Option<String>,
    pub state: PipelineState,
    /// Headline for the status indicator
    pub label: String,
    pub events: Vec<StatusEvent>,
    pub movies: Vec<EnrichedMovie>,
}

impl RecommendationResponse {
    pub fn idle() -> Self {
        Self {
            query: None,
            state: PipelineState::Idle,
            label: IDLE_MESSAGE.to_string(),
            events: Vec::new(),
            movies: Vec::new(),
        }
    }
}
