pub mod movie;
pub mod status;

pub use movie::{half_star_rating, CandidateMovie, EnrichedMovie, RatingError, StarRating};
pub use status::{PipelineState, RecommendationResponse, StatusEvent, StatusLevel};

use serde::{Deserialize, Serialize};

// ============================================================================
// Completion Service Types (OpenAI-compatible chat completions)
// ============================================================================

/// One message of a chat exchange
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Request body for `POST /chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub response_format: ResponseFormat,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Structured payload the model is instructed to return
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationPayload {
    /// `null` means no recommendations; the key itself is required
    #[serde(deserialize_with = "Option::deserialize")]
    pub movies: Option<Vec<CandidateMovie>>,
}

// ============================================================================
// TMDB Search Types
// ============================================================================

/// Raw response from TMDB `/search/movie`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Option<Vec<TmdbMovieResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieResult {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}
