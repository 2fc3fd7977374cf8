//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::pages;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,
  #[error("render error: {0}")]
  Render(#[from] spade_core::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound => {
        (StatusCode::NOT_FOUND, Html(pages::not_found())).into_response()
      }
      Error::Render(e) => {
        tracing::error!(error = %e, "page render failure");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error()))
          .into_response()
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error()))
          .into_response()
      }
    }
  }
}
