//! Encoding and decoding helpers between Rust domain types and the plain
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`.
//! Enums are stored as their snake_case names. Rows are first read into raw
//! structs inside the connection closure and decoded afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use spade_core::{
  annotation::Annotation,
  artist::Artist,
  session::{SessionKind, SpadeSession},
  song::{AdminSongRow, Song, SongListing, SongStatus},
  taxonomy::{Genre, Producer},
};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::Decode(format!("date {s:?}: {e}")))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn decode_status(s: &str) -> Result<SongStatus> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown song status: {s:?}")))
}

pub fn decode_kind(s: &str) -> Result<SessionKind> {
  s.parse()
    .map_err(|_| Error::Decode(format!("unknown session kind: {s:?}")))
}

// ─── Integers ────────────────────────────────────────────────────────────────

fn decode_count(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::Decode(format!("negative count: {n}")))
}

fn decode_bpm(n: Option<i64>) -> Result<Option<u32>> {
  n.map(|n| u32::try_from(n).map_err(|_| Error::Decode(format!("bpm out of range: {n}"))))
    .transpose()
}

// ─── Plain rows ──────────────────────────────────────────────────────────────

pub const ARTIST_COLUMNS: &str =
  "a.id, a.name, a.slug, a.bio, a.cover_image, a.facebook_link, a.instagram_link";

pub fn artist_row(row: &Row<'_>) -> rusqlite::Result<Artist> {
  Ok(Artist {
    id:             row.get(0)?,
    name:           row.get(1)?,
    slug:           row.get(2)?,
    bio:            row.get(3)?,
    cover_image:    row.get(4)?,
    facebook_link:  row.get(5)?,
    instagram_link: row.get(6)?,
  })
}

pub fn genre_row(row: &Row<'_>) -> rusqlite::Result<Genre> {
  Ok(Genre {
    id:   row.get(0)?,
    name: row.get(1)?,
    slug: row.get(2)?,
  })
}

pub fn producer_row(row: &Row<'_>) -> rusqlite::Result<Producer> {
  Ok(Producer {
    id:   row.get(0)?,
    name: row.get(1)?,
    slug: row.get(2)?,
  })
}

// ─── Songs ───────────────────────────────────────────────────────────────────

pub const SONG_COLUMNS: &str = "s.id, s.title, s.slug, s.artist_id, s.lyrics, \
   s.album, s.release_date, s.youtube_url, s.bpm, s.key, s.views, \
   s.featured, s.is_exclusive, s.is_trending, s.status";

/// Raw values read directly from a `songs` row.
pub struct RawSong {
  pub id:           i64,
  pub title:        String,
  pub slug:         String,
  pub artist_id:    i64,
  pub lyrics:       String,
  pub album:        Option<String>,
  pub release_date: Option<String>,
  pub youtube_url:  Option<String>,
  pub bpm:          Option<i64>,
  pub key:          Option<String>,
  pub views:        i64,
  pub featured:     bool,
  pub is_exclusive: bool,
  pub is_trending:  bool,
  pub status:       String,
}

pub fn raw_song(row: &Row<'_>) -> rusqlite::Result<RawSong> {
  Ok(RawSong {
    id:           row.get(0)?,
    title:        row.get(1)?,
    slug:         row.get(2)?,
    artist_id:    row.get(3)?,
    lyrics:       row.get(4)?,
    album:        row.get(5)?,
    release_date: row.get(6)?,
    youtube_url:  row.get(7)?,
    bpm:          row.get(8)?,
    key:          row.get(9)?,
    views:        row.get(10)?,
    featured:     row.get(11)?,
    is_exclusive: row.get(12)?,
    is_trending:  row.get(13)?,
    status:       row.get(14)?,
  })
}

impl RawSong {
  pub fn into_song(self) -> Result<Song> {
    Ok(Song {
      id:           self.id,
      title:        self.title,
      slug:         self.slug,
      artist_id:    self.artist_id,
      lyrics:       self.lyrics,
      album:        self.album,
      release_date: self.release_date.as_deref().map(decode_date).transpose()?,
      youtube_url:  self.youtube_url,
      bpm:          decode_bpm(self.bpm)?,
      key:          self.key,
      views:        decode_count(self.views)?,
      featured:     self.featured,
      is_exclusive: self.is_exclusive,
      is_trending:  self.is_trending,
      status:       decode_status(&self.status)?,
    })
  }
}

pub const LISTING_COLUMNS: &str = "s.id, s.title, s.slug, a.name, a.slug, \
   s.album, s.release_date, s.bpm, s.key, s.views, \
   s.featured, s.is_exclusive, s.is_trending";

/// Raw values for a song joined with its artist.
pub struct RawListing {
  pub id:           i64,
  pub title:        String,
  pub slug:         String,
  pub artist_name:  String,
  pub artist_slug:  String,
  pub album:        Option<String>,
  pub release_date: Option<String>,
  pub bpm:          Option<i64>,
  pub key:          Option<String>,
  pub views:        i64,
  pub featured:     bool,
  pub is_exclusive: bool,
  pub is_trending:  bool,
}

pub fn raw_listing(row: &Row<'_>) -> rusqlite::Result<RawListing> {
  Ok(RawListing {
    id:           row.get(0)?,
    title:        row.get(1)?,
    slug:         row.get(2)?,
    artist_name:  row.get(3)?,
    artist_slug:  row.get(4)?,
    album:        row.get(5)?,
    release_date: row.get(6)?,
    bpm:          row.get(7)?,
    key:          row.get(8)?,
    views:        row.get(9)?,
    featured:     row.get(10)?,
    is_exclusive: row.get(11)?,
    is_trending:  row.get(12)?,
  })
}

impl RawListing {
  pub fn into_listing(self) -> Result<SongListing> {
    Ok(SongListing {
      id:           self.id,
      title:        self.title,
      slug:         self.slug,
      artist_name:  self.artist_name,
      artist_slug:  self.artist_slug,
      album:        self.album,
      release_date: self.release_date.as_deref().map(decode_date).transpose()?,
      bpm:          decode_bpm(self.bpm)?,
      key:          self.key,
      views:        decode_count(self.views)?,
      featured:     self.featured,
      is_exclusive: self.is_exclusive,
      is_trending:  self.is_trending,
    })
  }
}

pub fn decode_listings(raws: Vec<RawListing>) -> Result<Vec<SongListing>> {
  raws.into_iter().map(RawListing::into_listing).collect()
}

/// Raw values for one editor list row.
pub struct RawAdminRow {
  pub id:               i64,
  pub title:            String,
  pub slug:             String,
  pub artist_name:      String,
  pub status:           String,
  pub is_trending:      bool,
  pub featured:         bool,
  pub annotation_count: i64,
}

impl RawAdminRow {
  pub fn into_row(self) -> Result<AdminSongRow> {
    Ok(AdminSongRow {
      id:               self.id,
      title:            self.title,
      slug:             self.slug,
      artist_name:      self.artist_name,
      status:           decode_status(&self.status)?,
      is_trending:      self.is_trending,
      featured:         self.featured,
      annotation_count: decode_count(self.annotation_count)?,
    })
  }
}

// ─── Annotations & sessions ──────────────────────────────────────────────────

pub const ANNOTATION_COLUMNS: &str =
  "id, song_id, snippet, explanation, created_by, created_at";

/// Raw values read directly from an `annotations` row.
pub struct RawAnnotation {
  pub id:          i64,
  pub song_id:     i64,
  pub snippet:     String,
  pub explanation: String,
  pub created_by:  Option<i64>,
  pub created_at:  String,
}

pub fn raw_annotation(row: &Row<'_>) -> rusqlite::Result<RawAnnotation> {
  Ok(RawAnnotation {
    id:          row.get(0)?,
    song_id:     row.get(1)?,
    snippet:     row.get(2)?,
    explanation: row.get(3)?,
    created_by:  row.get(4)?,
    created_at:  row.get(5)?,
  })
}

impl RawAnnotation {
  pub fn into_annotation(self) -> Result<Annotation> {
    Ok(Annotation {
      id:          self.id,
      song_id:     self.song_id,
      snippet:     self.snippet,
      explanation: self.explanation,
      created_by:  self.created_by,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub const SESSION_COLUMNS: &str =
  "id, song_id, title, youtube_id, kind, description, published_at";

/// Raw values read directly from a `sessions` row.
pub struct RawSession {
  pub id:           i64,
  pub song_id:      Option<i64>,
  pub title:        String,
  pub youtube_id:   String,
  pub kind:         String,
  pub description:  String,
  pub published_at: String,
}

pub fn raw_session(row: &Row<'_>) -> rusqlite::Result<RawSession> {
  Ok(RawSession {
    id:           row.get(0)?,
    song_id:      row.get(1)?,
    title:        row.get(2)?,
    youtube_id:   row.get(3)?,
    kind:         row.get(4)?,
    description:  row.get(5)?,
    published_at: row.get(6)?,
  })
}

impl RawSession {
  pub fn into_session(self) -> Result<SpadeSession> {
    Ok(SpadeSession {
      id:           self.id,
      song_id:      self.song_id,
      title:        self.title,
      youtube_id:   self.youtube_id,
      kind:         decode_kind(&self.kind)?,
      description:  self.description,
      published_at: decode_dt(&self.published_at)?,
    })
  }
}

// ─── LIKE patterns ───────────────────────────────────────────────────────────

/// Build a `LIKE ... ESCAPE '\'` pattern matching `text` anywhere.
pub fn contains_pattern(text: &str) -> String {
  let escaped = text
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_");
  format!("%{escaped}%")
}
