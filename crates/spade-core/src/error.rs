//! Error types for `spade-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot derive a slug from {0:?}")]
  EmptySlug(String),

  #[error("invalid slug: {0:?}")]
  InvalidSlug(String),

  #[error("unknown value: {0}")]
  UnknownValue(#[from] strum::ParseError),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
