//! Artists: the owners of songs.

use serde::{Deserialize, Serialize};

/// A performing artist. Deleting an artist deletes all of their songs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  pub id:             i64,
  pub name:           String,
  /// Unique across all artists.
  pub slug:           String,
  pub bio:            String,
  /// Path of an uploaded cover image, relative to the media root.
  pub cover_image:    Option<String>,
  pub facebook_link:  Option<String>,
  pub instagram_link: Option<String>,
}

/// Input to [`crate::store::CatalogStore::add_artist`].
#[derive(Debug, Clone, Default)]
pub struct NewArtist {
  pub name:           String,
  pub slug:           String,
  pub bio:            String,
  pub cover_image:    Option<String>,
  pub facebook_link:  Option<String>,
  pub instagram_link: Option<String>,
}

impl NewArtist {
  /// Convenience constructor with all optional fields left empty.
  pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      slug: slug.into(),
      ..Self::default()
    }
  }
}

/// Editor changes to an existing artist. `None` leaves a field untouched;
/// `Some(None)` clears an optional link.
#[derive(Debug, Clone, Default)]
pub struct ArtistPatch {
  pub name:           Option<String>,
  pub slug:           Option<String>,
  pub bio:            Option<String>,
  pub cover_image:    Option<Option<String>>,
  pub facebook_link:  Option<Option<String>>,
  pub instagram_link: Option<Option<String>>,
}

impl ArtistPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.slug.is_none()
      && self.bio.is_none()
      && self.cover_image.is_none()
      && self.facebook_link.is_none()
      && self.instagram_link.is_none()
  }
}
