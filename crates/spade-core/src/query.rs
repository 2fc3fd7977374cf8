//! Query types for the catalog read paths.
//!
//! Request parameters are normalised here rather than rejected: blank text
//! counts as absent and an unrecognised sort key falls back to the default.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{artist::Artist, song::{SongListing, SongStatus}};

/// Queries shorter than this (in characters, after trimming) never reach the
/// store for suggestions.
pub const MIN_SUGGESTION_CHARS: usize = 2;

// ─── Sort ────────────────────────────────────────────────────────────────────

/// Ordering for the catalog listing.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  EnumString,
  Display,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SongSort {
  /// Release date descending, then most recently created first. Songs
  /// without a release date come last.
  #[default]
  Newest,
  /// View count descending.
  Views,
  /// Slow to fast. Songs without a BPM come last.
  Bpm,
  /// Alphabetical.
  Title,
}

impl SongSort {
  pub const ALL: [SongSort; 4] =
    [SongSort::Newest, SongSort::Views, SongSort::Bpm, SongSort::Title];

  /// Parse a raw `sort` parameter; anything unrecognised means the default.
  pub fn from_param(raw: Option<&str>) -> Self {
    raw
      .map(str::trim)
      .and_then(|s| s.parse().ok())
      .unwrap_or_default()
  }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
  raw
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::CatalogStore::list_songs`].
///
/// Only published songs are ever returned, whatever the filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongQuery {
  /// Case-insensitive substring over title, artist name and producer names.
  pub text:  Option<String>,
  /// Restrict to songs tagged with this genre slug.
  pub genre: Option<String>,
  pub sort:  SongSort,
}

impl SongQuery {
  pub fn from_params(
    text: Option<&str>,
    genre: Option<&str>,
    sort: Option<&str>,
  ) -> Self {
    Self {
      text:  non_blank(text),
      genre: non_blank(genre),
      sort:  SongSort::from_param(sort),
    }
  }
}

// ─── Suggestions ─────────────────────────────────────────────────────────────

/// A validated live-search query; see [`SuggestionQuery::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionQuery(String);

impl SuggestionQuery {
  /// Returns `None` when the trimmed query is shorter than
  /// [`MIN_SUGGESTION_CHARS`], in which case the result is empty by
  /// definition and the store must not be consulted.
  pub fn new(raw: &str) -> Option<Self> {
    let trimmed = raw.trim();
    (trimmed.chars().count() >= MIN_SUGGESTION_CHARS)
      .then(|| Self(trimmed.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

// ─── Catalog search ──────────────────────────────────────────────────────────

/// Result of [`crate::store::CatalogStore::search_catalog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSearch {
  /// Published songs whose title or lyrics match.
  pub songs:   Vec<SongListing>,
  /// Artists whose name matches.
  pub artists: Vec<Artist>,
}

impl CatalogSearch {
  pub fn is_empty(&self) -> bool { self.songs.is_empty() && self.artists.is_empty() }
}

// ─── Editor list ─────────────────────────────────────────────────────────────

/// Filters for [`crate::store::CatalogStore::admin_songs`]. Unlike the
/// public listing this sees drafts.
#[derive(Debug, Clone, Default)]
pub struct AdminSongFilter {
  pub status:      Option<SongStatus>,
  pub trending:    Option<bool>,
  pub featured:    Option<bool>,
  pub exclusive:   Option<bool>,
  pub artist_slug: Option<String>,
  /// Case-insensitive substring over title, lyrics and artist name.
  pub search:      Option<String>,
}
