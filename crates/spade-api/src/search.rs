//! Handler for `GET /search/`: live search suggestions.
//!
//! Response shape:
//!
//! ```json
//! {"results": [{"title": "...", "artist": "...", "url": "/song/<slug>/", "type": "song"}]}
//! ```
//!
//! Queries under two characters get an empty list without touching the store.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use spade_core::{query::SuggestionQuery, song::SongListing, store::CatalogStore};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct SuggestParams {
  pub q: Option<String>,
}

/// One compact suggestion record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
  pub title:  String,
  pub artist: String,
  pub url:    String,
  #[serde(rename = "type")]
  pub kind:   &'static str,
}

impl From<SongListing> for Suggestion {
  fn from(song: SongListing) -> Self {
    Self {
      url:    song.url(),
      title:  song.title,
      artist: song.artist_name,
      kind:   "song",
    }
  }
}

#[derive(Debug, Serialize)]
pub struct Suggestions {
  pub results: Vec<Suggestion>,
}

/// `GET /search/?q=...`
pub async fn suggestions<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<SuggestParams>, QueryRejection>,
) -> Result<Json<Suggestions>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let params = crate::params_or_default(params);
  let Some(query) = params.q.as_deref().and_then(SuggestionQuery::new) else {
    return Ok(Json(Suggestions { results: Vec::new() }));
  };

  let songs = state
    .store
    .suggestions(&query, state.limits.suggestions)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(Suggestions {
    results: songs.into_iter().map(Suggestion::from).collect(),
  }))
}
