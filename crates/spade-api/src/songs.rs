//! Handlers for the JSON catalog listing.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/songs/` | Optional `q`, `genre`, `sort=newest\|views\|bpm\|title` |
//! | `GET`  | `/genres/` | All genres by name |
//!
//! Unrecognised or blank parameters are treated as absent.

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use spade_core::{
  query::SongQuery,
  song::SongListing,
  store::CatalogStore,
  taxonomy::Genre,
};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub q:     Option<String>,
  pub genre: Option<String>,
  pub sort:  Option<String>,
}

impl ListParams {
  pub fn to_query(&self) -> SongQuery {
    SongQuery::from_params(
      self.q.as_deref(),
      self.genre.as_deref(),
      self.sort.as_deref(),
    )
  }
}

/// `GET /songs/[?q=...][&genre=...][&sort=...]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<SongListing>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let params = crate::params_or_default(params);
  let songs = state
    .store
    .list_songs(&params.to_query())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(songs))
}

/// `GET /genres/`
pub async fn genres<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Genre>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let genres = state.store.list_genres().await.map_err(ApiError::store)?;
  Ok(Json(genres))
}
