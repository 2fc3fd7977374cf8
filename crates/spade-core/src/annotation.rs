//! Annotations: per-snippet explanations attached to a song's lyrics.
//!
//! An annotation is joined to the lyrics by exact snippet text only. Nothing
//! at the storage level checks that the snippet still appears in the song's
//! lyrics; after a lyric edit an annotation may linger unmatched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An editor account that can be credited as an annotation's creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editor {
  pub id:       i64,
  pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
  pub id:          i64,
  /// Deleting the song deletes its annotations.
  pub song_id:     i64,
  /// The exact text between a bracket pair in the song's lyrics.
  pub snippet:     String,
  pub explanation: String,
  /// Set to `None` when the creating editor is deleted.
  pub created_by:  Option<i64>,
  /// Server-assigned; never changes after creation.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::CatalogStore::add_annotation`].
/// `created_at` is always set by the store.
#[derive(Debug, Clone)]
pub struct NewAnnotation {
  pub song_id:     i64,
  pub snippet:     String,
  pub explanation: String,
  pub created_by:  Option<i64>,
}

impl NewAnnotation {
  pub fn new(
    song_id: i64,
    snippet: impl Into<String>,
    explanation: impl Into<String>,
  ) -> Self {
    Self {
      song_id,
      snippet: snippet.into(),
      explanation: explanation.into(),
      created_by: None,
    }
  }
}

/// Editor changes to an annotation. The creator and creation time are fixed.
#[derive(Debug, Clone, Default)]
pub struct AnnotationPatch {
  pub snippet:     Option<String>,
  pub explanation: Option<String>,
}

impl AnnotationPatch {
  pub fn is_empty(&self) -> bool { self.snippet.is_none() && self.explanation.is_none() }
}
