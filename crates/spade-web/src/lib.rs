//! Public website for Spade.
//!
//! Exposes an axum [`Router`] serving the catalog listing, the annotated
//! song pages and the search fragment, with the JSON API from `spade-api`
//! mounted under `/api`. Backed by any [`CatalogStore`].

pub mod error;
pub mod handlers;
pub mod pages;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use spade_api::ApiLimits;
use spade_core::store::CatalogStore;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `spade.toml` and
/// `SPADE_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub listing:    ListingConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8000,
      store_path: PathBuf::from("spade.db"),
      listing:    ListingConfig::default(),
    }
  }
}

/// Result caps for the public pages and the API.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ListingConfig {
  /// Trending songs on the index page.
  pub trending_limit:         usize,
  /// Trending songs in the song page sidebar.
  pub sidebar_trending_limit: usize,
  pub suggestion_limit:       usize,
  pub search_song_limit:      usize,
  pub search_artist_limit:    usize,
}

impl Default for ListingConfig {
  fn default() -> Self {
    Self {
      trending_limit:         5,
      sidebar_trending_limit: 3,
      suggestion_limit:       5,
      search_song_limit:      5,
      search_artist_limit:    3,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CatalogStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the site router, API included.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let api = spade_api::api_router(state.store.clone(), ApiLimits {
    suggestions: state.config.listing.suggestion_limit,
  });

  Router::new()
    .route("/",             get(handlers::index::handler::<S>))
    .route("/song/{slug}/", get(handlers::song::handler::<S>))
    .route("/song/{slug}",  get(handlers::song::redirect))
    .route("/search/",      get(handlers::search::handler::<S>))
    .with_state(state)
    .nest("/api", api)
    .fallback(handlers::not_found)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
