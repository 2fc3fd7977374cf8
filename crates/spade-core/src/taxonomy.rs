//! Genre and producer taxonomies. Both are many-to-many with songs.

use serde::{Deserialize, Serialize};

/// A musical genre, e.g. "Afrobeats".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
  pub id:   i64,
  pub name: String,
  pub slug: String,
}

/// A credited producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
  pub id:   i64,
  pub name: String,
  pub slug: String,
}

/// A rename of a genre or producer. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyPatch {
  pub name: Option<String>,
  pub slug: Option<String>,
}

impl TaxonomyPatch {
  pub fn is_empty(&self) -> bool { self.name.is_none() && self.slug.is_none() }
}
