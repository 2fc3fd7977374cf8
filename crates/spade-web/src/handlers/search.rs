//! `GET /search/`: HTML fragment of catalog search results.
//!
//! Matches published songs by title or lyrics and artists by name. A blank
//! query renders an empty fragment without touching the store.

use axum::{
  extract::{Query, State, rejection::QueryRejection},
  response::Html,
};
use serde::Deserialize;
use spade_api::params_or_default;
use spade_core::{query::CatalogSearch, store::CatalogStore};

use crate::{AppState, error::Error, pages};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  pub q: Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Html<String>, Error>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = params_or_default(params).q.unwrap_or_default();
  let listing = &state.config.listing;

  let results = if query.trim().is_empty() {
    CatalogSearch::default()
  } else {
    state
      .store
      .search_catalog(&query, listing.search_song_limit, listing.search_artist_limit)
      .await
      .map_err(Error::store)?
  };

  Ok(Html(pages::search_results(&query, &results)))
}
