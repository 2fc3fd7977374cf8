//! Spade sessions: externally hosted videos, optionally tied to a song.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// The format of a session video.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SessionKind {
  Interview,
  #[default]
  LyricsBreakdown,
  LivePerformance,
}

impl SessionKind {
  /// Human-readable label shown next to the video.
  pub fn label(self) -> &'static str {
    match self {
      Self::Interview => "The Dig (Interview)",
      Self::LyricsBreakdown => "Uncover (Lyrics Breakdown)",
      Self::LivePerformance => "Live Performance",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpadeSession {
  pub id:           i64,
  /// `None` for sessions that stand on their own.
  pub song_id:      Option<i64>,
  pub title:        String,
  /// The 11-character YouTube video ID.
  pub youtube_id:   String,
  pub kind:         SessionKind,
  pub description:  String,
  /// Server-assigned.
  pub published_at: DateTime<Utc>,
}

impl SpadeSession {
  pub fn embed_url(&self) -> String {
    format!("https://www.youtube.com/embed/{}", self.youtube_id)
  }
}

/// Input to [`crate::store::CatalogStore::add_session`].
#[derive(Debug, Clone)]
pub struct NewSession {
  pub song_id:     Option<i64>,
  pub title:       String,
  pub youtube_id:  String,
  pub kind:        SessionKind,
  pub description: String,
}

/// Editor changes to a session. `song_id: Some(None)` detaches it from its
/// song; `published_at` never changes.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
  pub song_id:     Option<Option<i64>>,
  pub title:       Option<String>,
  pub youtube_id:  Option<String>,
  pub kind:        Option<SessionKind>,
  pub description: Option<String>,
}

impl SessionPatch {
  pub fn is_empty(&self) -> bool {
    self.song_id.is_none()
      && self.title.is_none()
      && self.youtube_id.is_none()
      && self.kind.is_none()
      && self.description.is_none()
  }
}
