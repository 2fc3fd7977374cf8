//! Songs: the central entity of the archive.
//!
//! A song belongs to exactly one artist and carries its lyrics as raw text
//! with bracket-delimited annotation anchors (see [`crate::lyrics`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
  annotation::Annotation,
  artist::Artist,
  session::SpadeSession,
  taxonomy::{Genre, Producer},
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Publication status. Transitions are unconstrained in both directions.
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
pub enum SongStatus {
  #[default]
  Draft,
  Published,
}

// ─── Song ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
  pub id:           i64,
  pub title:        String,
  /// Unique across all songs; editors may change it.
  pub slug:         String,
  pub artist_id:    i64,
  /// Raw lyric text; `[snippet]` marks an annotation anchor.
  pub lyrics:       String,
  pub album:        Option<String>,
  pub release_date: Option<NaiveDate>,
  pub youtube_url:  Option<String>,
  /// Beats per minute.
  pub bpm:          Option<u32>,
  /// Musical key, e.g. "C# Minor".
  pub key:          Option<String>,
  /// Detail-page reads. Never decreases.
  pub views:        u64,
  pub featured:     bool,
  /// Content produced in-house by Spade.
  pub is_exclusive: bool,
  pub is_trending:  bool,
  pub status:       SongStatus,
}

impl Song {
  pub fn is_published(&self) -> bool { self.status == SongStatus::Published }

  pub fn url(&self) -> String { song_url(&self.slug) }
}

/// Canonical detail-page path for a song slug.
pub fn song_url(slug: &str) -> String { format!("/song/{slug}/") }

// ─── NewSong ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::CatalogStore::add_song`].
/// `views` always starts at zero and is not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewSong {
  pub title:        String,
  pub slug:         String,
  pub artist_id:    i64,
  pub lyrics:       String,
  pub album:        Option<String>,
  pub release_date: Option<NaiveDate>,
  pub youtube_url:  Option<String>,
  pub bpm:          Option<u32>,
  pub key:          Option<String>,
  pub featured:     bool,
  pub is_exclusive: bool,
  pub is_trending:  bool,
  pub status:       SongStatus,
  pub genre_ids:    Vec<i64>,
  pub producer_ids: Vec<i64>,
}

impl NewSong {
  /// Convenience constructor: a draft with no metadata or taxonomy links.
  pub fn new(
    artist_id: i64,
    title: impl Into<String>,
    slug: impl Into<String>,
    lyrics: impl Into<String>,
  ) -> Self {
    Self {
      title: title.into(),
      slug: slug.into(),
      artist_id,
      lyrics: lyrics.into(),
      album: None,
      release_date: None,
      youtube_url: None,
      bpm: None,
      key: None,
      featured: false,
      is_exclusive: false,
      is_trending: false,
      status: SongStatus::default(),
      genre_ids: Vec::new(),
      producer_ids: Vec::new(),
    }
  }
}

/// Editor changes to an existing song. `None` leaves a field untouched.
///
/// Optional columns take `Some(None)` to clear the stored value. The link
/// lists replace the song's current genres or producers wholesale.
#[derive(Debug, Clone, Default)]
pub struct SongPatch {
  pub title:        Option<String>,
  pub slug:         Option<String>,
  pub artist_id:    Option<i64>,
  pub lyrics:       Option<String>,
  pub album:        Option<Option<String>>,
  pub release_date: Option<Option<NaiveDate>>,
  pub youtube_url:  Option<Option<String>>,
  pub bpm:          Option<Option<u32>>,
  pub key:          Option<Option<String>>,
  pub featured:     Option<bool>,
  pub is_exclusive: Option<bool>,
  pub is_trending:  Option<bool>,
  pub status:       Option<SongStatus>,
  pub genre_ids:    Option<Vec<i64>>,
  pub producer_ids: Option<Vec<i64>>,
}

impl SongPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.slug.is_none()
      && self.artist_id.is_none()
      && self.lyrics.is_none()
      && self.album.is_none()
      && self.release_date.is_none()
      && self.youtube_url.is_none()
      && self.bpm.is_none()
      && self.key.is_none()
      && self.featured.is_none()
      && self.is_exclusive.is_none()
      && self.is_trending.is_none()
      && self.status.is_none()
      && self.genre_ids.is_none()
      && self.producer_ids.is_none()
  }
}

// ─── Read models ─────────────────────────────────────────────────────────────

/// A compact song row for listings, joined with its artist's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongListing {
  pub id:           i64,
  pub title:        String,
  pub slug:         String,
  pub artist_name:  String,
  pub artist_slug:  String,
  pub album:        Option<String>,
  pub release_date: Option<NaiveDate>,
  pub bpm:          Option<u32>,
  pub key:          Option<String>,
  pub views:        u64,
  pub featured:     bool,
  pub is_exclusive: bool,
  pub is_trending:  bool,
}

impl SongListing {
  pub fn url(&self) -> String { song_url(&self.slug) }
}

/// Everything the song detail page needs, loaded together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongDetail {
  pub song:        Song,
  pub artist:      Artist,
  pub genres:      Vec<Genre>,
  pub producers:   Vec<Producer>,
  /// In creation order.
  pub annotations: Vec<Annotation>,
  /// In creation order.
  pub sessions:    Vec<SpadeSession>,
}

impl SongDetail {
  /// The video shown on the detail page: the first session linked to the
  /// song, if any.
  pub fn primary_session(&self) -> Option<&SpadeSession> {
    self.sessions.first()
  }
}

/// One row of the editor song list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSongRow {
  pub id:               i64,
  pub title:            String,
  pub slug:             String,
  pub artist_name:      String,
  pub status:           SongStatus,
  pub is_trending:      bool,
  pub featured:         bool,
  pub annotation_count: u64,
}

impl AdminSongRow {
  pub fn annotation_label(&self) -> String {
    format!("{} annotations", self.annotation_count)
  }
}
