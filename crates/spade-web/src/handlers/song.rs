//! `GET /song/{slug}/`: the annotated lyric sheet.
//!
//! Every successful request counts exactly one view. Drafts are reachable
//! here by direct slug even though no listing shows them.

use axum::{
  extract::{Path, State},
  response::{Html, Redirect},
};
use spade_core::{lyrics::AnnotatedLyrics, slug, song::song_url, store::CatalogStore};
use tracing::debug;

use crate::{AppState, error::Error, pages};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Html<String>, Error>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let detail = state
    .store
    .view_song(&slug)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| {
      debug!(%slug, "song not found");
      Error::NotFound
    })?;

  let lyrics = AnnotatedLyrics::new(&detail.song.lyrics, &detail.annotations);
  let trending = state
    .store
    .trending(state.config.listing.sidebar_trending_limit)
    .await
    .map_err(Error::store)?;

  let html = pages::song(&pages::SongPage {
    detail:   &detail,
    lyrics:   &lyrics,
    trending: &trending,
  })?;
  Ok(Html(html))
}

/// `GET /song/{slug}`: canonicalise to the trailing-slash form. Only
/// well-formed slugs are echoed into `Location`.
pub async fn redirect(Path(slug): Path<String>) -> Result<Redirect, Error> {
  if let Err(err) = slug::validate(&slug) {
    debug!(%err, "refusing to redirect malformed slug");
    return Err(Error::NotFound);
  }
  Ok(Redirect::permanent(&song_url(&slug)))
}
