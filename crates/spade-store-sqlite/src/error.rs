//! Error type for `spade-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] spade_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A uniqueness or foreign-key constraint rejected the write, e.g. a
  /// duplicate slug or a reference to a missing artist.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("decode error: {0}")]
  Decode(String),

  #[error("song not found: {0}")]
  SongNotFound(i64),

  #[error("artist not found: {0}")]
  ArtistNotFound(i64),

  #[error("editor not found: {0}")]
  EditorNotFound(i64),

  #[error("genre not found: {0}")]
  GenreNotFound(i64),

  #[error("producer not found: {0}")]
  ProducerNotFound(i64),

  #[error("annotation not found: {0}")]
  AnnotationNotFound(i64),

  #[error("session not found: {0}")]
  SessionNotFound(i64),
}

impl Error {
  /// Classify a failed write, turning constraint violations into
  /// [`Error::Conflict`].
  pub(crate) fn from_write(e: tokio_rusqlite::Error) -> Self {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      failure,
      message,
    )) = &e
      && failure.code == rusqlite::ErrorCode::ConstraintViolation
    {
      return Error::Conflict(
        message.clone().unwrap_or_else(|| failure.to_string()),
      );
    }
    Error::Database(e)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
