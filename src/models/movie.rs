use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of stars shown by the rating display
pub const RATING_SCALE: u8 = 10;

/// A recommendation as returned by the completion service, before enrichment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateMovie {
    pub title: String,
    pub overview: String,
    /// Opaque display value, never parsed
    pub release_date: String,
    /// Number or numeric string; coerced at enrichment time
    pub imdb_rating: Value,
}

/// Failure to coerce a candidate's rating into a number
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    #[error("rating {0:?} is not numeric")]
    NotNumeric(String),

    #[error("rating {0} is not finite")]
    NotFinite(f64),
}

impl CandidateMovie {
    /// Coerces `imdb_rating` to a float. Accepts JSON numbers and numeric strings; booleans are
    /// not ratings.
    pub fn rating(&self) -> Result<f64, RatingError> {
        let value = match &self.imdb_rating {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| RatingError::NotNumeric(n.to_string()))?,
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| RatingError::NotNumeric(s.clone()))?,
            other => return Err(RatingError::NotNumeric(other.to_string())),
        };

        if !value.is_finite() {
            return Err(RatingError::NotFinite(value));
        }

        Ok(value)
    }
}

/// Rounds a rating to the nearest half star.
///
/// Halfway cases round to even, so `7.25` becomes `7.0` and `7.75` becomes `8.0`.
pub fn half_star_rating(rating: f64) -> f64 {
    (rating * 2.0).round_ties_even() / 2.0
}

/// Descriptor for the star-rating widget
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StarRating {
    pub value: f64,
    pub count: u8,
    pub half: bool,
}

impl StarRating {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            count: RATING_SCALE,
            half: true,
        }
    }
}

/// A display-ready recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedMovie {
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub imdb_rating: f64,
    /// Always populated, falls back to the placeholder poster
    pub poster_url: String,
    /// `imdb_rating` rounded to a multiple of 0.5
    pub display_rating: f64,
    pub rating: StarRating,
}

impl EnrichedMovie {
    pub fn new(candidate: CandidateMovie, imdb_rating: f64, poster_url: String) -> Self {
        let display_rating = half_star_rating(imdb_rating);
        Self {
            title: candidate.title,
            overview: candidate.overview,
            release_date: candidate.release_date,
            imdb_rating,
            poster_url,
            display_rating,
            rating: StarRating::new(display_rating),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(rating: Value) -> CandidateMovie {
        CandidateMovie {
            title: "Inception".to_string(),
            overview: "A thief who steals corporate secrets through dreams.".to_string(),
            release_date: "2010-07-16".to_string(),
            imdb_rating: rating,
        }
    }

    #[test]
    fn test_rating_from_number() {
        assert_eq!(candidate(json!(8.8)).rating(), Ok(8.8));
        assert_eq!(candidate(json!(9)).rating(), Ok(9.0));
    }

    #[test]
    fn test_rating_from_numeric_string() {
        assert_eq!(candidate(json!("7.3")).rating(), Ok(7.3));
        assert_eq!(candidate(json!(" 6.1 ")).rating(), Ok(6.1));
    }

    #[test]
    fn test_rating_rejects_non_numeric() {
        assert!(matches!(
            candidate(json!("N/A")).rating(),
            Err(RatingError::NotNumeric(_))
        ));
        assert!(candidate(json!(null)).rating().is_err());
        assert!(candidate(json!([8.0])).rating().is_err());
        assert!(candidate(json!(true)).rating().is_err());
    }

    #[test]
    fn test_rating_rejects_non_finite_string() {
        assert!(matches!(
            candidate(json!("inf")).rating(),
            Err(RatingError::NotFinite(_))
        ));
        assert!(candidate(json!("NaN")).rating().is_err());
    }

    #[test]
    fn test_half_star_rating() {
        assert_eq!(half_star_rating(7.3), 7.5);
        assert_eq!(half_star_rating(8.8), 9.0);
        assert_eq!(half_star_rating(6.1), 6.0);
        assert_eq!(half_star_rating(10.0), 10.0);
        assert_eq!(half_star_rating(0.0), 0.0);
    }

    #[test]
    fn test_half_star_rating_ties_to_even() {
        assert_eq!(half_star_rating(7.25), 7.0);
        assert_eq!(half_star_rating(7.75), 8.0);
        assert_eq!(half_star_rating(8.25), 8.0);
    }

    #[test]
    fn test_half_star_rating_is_multiple_of_half() {
        for tenth in 0..=100 {
            let rating = tenth as f64 / 10.0;
            let doubled = half_star_rating(rating) * 2.0;
            assert_eq!(doubled, doubled.trunc(), "rating {rating}");
            assert!((half_star_rating(rating) - rating).abs() <= 0.25);
        }
    }

    #[test]
    fn test_enriched_movie_carries_candidate_fields() {
        let movie = EnrichedMovie::new(
            candidate(json!("7.3")),
            7.3,
            "https://image.tmdb.org/t/p/w500/abc.jpg".to_string(),
        );

        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.release_date, "2010-07-16");
        assert_eq!(movie.imdb_rating, 7.3);
        assert_eq!(movie.display_rating, 7.5);
        assert_eq!(movie.rating, StarRating::new(7.5));
        assert_eq!(movie.rating.count, 10);
    }

    #[test]
    fn test_candidate_requires_rating_field() {
        let result = serde_json::from_value::<CandidateMovie>(json!({
            "title": "Heat",
            "overview": "A crew of thieves.",
            "release_date": "1995"
        }));
        assert!(result.is_err());
    }
}
