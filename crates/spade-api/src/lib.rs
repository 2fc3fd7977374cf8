//! JSON endpoints for the Spade catalog.
//!
//! Exposes an axum [`Router`] backed by any [`spade_core::store::CatalogStore`].
//! Page rendering, auth, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", spade_api::api_router(store.clone(), ApiLimits::default()))
//! ```

pub mod error;
pub mod search;
pub mod songs;

use std::sync::Arc;

use axum::{
  Router,
  extract::{Query, rejection::QueryRejection},
  routing::get,
};
use spade_core::store::CatalogStore;

pub use error::ApiError;

/// Result caps applied by the API handlers.
#[derive(Debug, Clone, Copy)]
pub struct ApiLimits {
  /// Maximum live-search suggestions returned.
  pub suggestions: usize,
}

impl Default for ApiLimits {
  fn default() -> Self { Self { suggestions: 5 } }
}

/// Shared state for the API handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub limits: ApiLimits,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      limits: self.limits,
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, limits: ApiLimits) -> Router<()>
where
  S: CatalogStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/search/", get(search::suggestions::<S>))
    .route("/songs/", get(songs::list::<S>))
    .route("/genres/", get(songs::genres::<S>))
    .with_state(ApiState { store, limits })
}

/// Unparseable query strings degrade to "no parameters".
pub fn params_or_default<T: Default>(
  params: Result<Query<T>, QueryRejection>,
) -> T {
  match params {
    Ok(Query(params)) => params,
    Err(rejection) => {
      tracing::debug!(%rejection, "ignoring malformed query string");
      T::default()
    }
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod counting_store;
