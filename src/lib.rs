//! Movie recommendations from free-text preferences.
//!
//! A chat completion service proposes up to five movies for a query; each one is then
//! enriched with a TMDB poster and a half-star rating before being handed to the client.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
