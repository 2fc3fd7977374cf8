//! `GET /`: the catalog listing with filters and the trending sidebar.

use axum::{
  extract::{Query, State, rejection::QueryRejection},
  response::Html,
};
use spade_api::{params_or_default, songs::ListParams};
use spade_core::store::CatalogStore;

use crate::{AppState, error::Error, pages};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Html<String>, Error>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = params_or_default(params).to_query();

  let songs = state.store.list_songs(&query).await.map_err(Error::store)?;
  let genres = state.store.list_genres().await.map_err(Error::store)?;
  let trending = state
    .store
    .trending(state.config.listing.trending_limit)
    .await
    .map_err(Error::store)?;

  Ok(Html(pages::index(&pages::IndexPage {
    query:    &query,
    songs:    &songs,
    genres:   &genres,
    trending: &trending,
  })))
}
