pub mod index;
pub mod search;
pub mod song;

use axum::response::IntoResponse;

use crate::error::Error;

/// Fallback for every unmatched path.
pub async fn not_found() -> impl IntoResponse { Error::NotFound }
