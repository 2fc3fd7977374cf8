//! Command-line surface of `spade-admin`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use spade_core::{admin::BulkAction, session::SessionKind, song::SongStatus};

#[derive(Parser, Debug)]
#[command(name = "spade-admin", about = "Editor tooling for the Spade catalog")]
pub struct Cli {
  /// Path to the SQLite store.
  #[arg(long, env = "SPADE_STORE_PATH", default_value = "spade.db")]
  pub store: PathBuf,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Manage editor accounts.
  #[command(subcommand)]
  Editor(EditorCommand),
  /// Manage artists.
  #[command(subcommand)]
  Artist(ArtistCommand),
  /// Manage genres.
  #[command(subcommand)]
  Genre(TaxonomyCommand),
  /// Manage producers.
  #[command(subcommand)]
  Producer(TaxonomyCommand),
  /// Manage songs and their annotations and sessions.
  #[command(subcommand)]
  Song(SongCommand),
  /// Edit or remove annotations by id, as listed by `song show`.
  #[command(subcommand)]
  Annotation(AnnotationCommand),
  /// Manage Spade sessions.
  #[command(subcommand)]
  Session(SessionCommand),
  /// Print what the editor interface offers per entity, as JSON.
  Capabilities {
    /// Restrict output to one entity, e.g. `song`.
    entity: Option<String>,
  },
}

// ─── Editors ──────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum EditorCommand {
  Add { username: String },
  /// Delete an editor. Their annotations are kept without a creator.
  Delete { id: i64 },
}

// ─── Artists & taxonomy ───────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum ArtistCommand {
  Add {
    name:           String,
    /// Derived from the name when omitted.
    #[arg(long)]
    slug:           Option<String>,
    #[arg(long, default_value = "")]
    bio:            String,
    #[arg(long)]
    cover_image:    Option<String>,
    #[arg(long)]
    facebook:       Option<String>,
    #[arg(long)]
    instagram:      Option<String>,
  },
  List,
  Update(ArtistUpdateArgs),
  /// Delete an artist and every song they own.
  Delete { slug: String },
}

#[derive(Args, Debug)]
pub struct ArtistUpdateArgs {
  pub slug:               String,
  #[arg(long)]
  pub name:               Option<String>,
  #[arg(long)]
  pub new_slug:           Option<String>,
  #[arg(long)]
  pub bio:                Option<String>,
  #[arg(long)]
  pub cover_image:        Option<String>,
  #[arg(long, conflicts_with = "cover_image")]
  pub clear_cover_image:  bool,
  #[arg(long)]
  pub facebook:           Option<String>,
  #[arg(long, conflicts_with = "facebook")]
  pub clear_facebook:     bool,
  #[arg(long)]
  pub instagram:          Option<String>,
  #[arg(long, conflicts_with = "instagram")]
  pub clear_instagram:    bool,
}

#[derive(Subcommand, Debug)]
pub enum TaxonomyCommand {
  Add {
    name: String,
    /// Derived from the name when omitted.
    #[arg(long)]
    slug: Option<String>,
  },
  List,
  /// Rename an entry; songs keep their links.
  Update {
    slug:     String,
    #[arg(long)]
    name:     Option<String>,
    #[arg(long)]
    new_slug: Option<String>,
  },
  /// Delete an entry and unlink it from every song.
  Delete { slug: String },
}

// ─── Songs ────────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum SongCommand {
  Add(SongAddArgs),
  Update(SongUpdateArgs),
  Delete { slug: String },
  /// Print a song with its annotations and sessions.
  Show { slug: String },
  /// The editor list: drafts included, with annotation counts.
  List(SongListArgs),
  /// Attach an annotation to a bracketed lyric span.
  Annotate {
    slug:        String,
    #[arg(long)]
    snippet:     String,
    #[arg(long)]
    explanation: String,
    /// Editor id recorded as the creator.
    #[arg(long)]
    editor:      Option<i64>,
  },
  /// Attach a Spade session video to the song.
  Session {
    slug: String,
    #[command(flatten)]
    session: SessionArgs,
  },
  /// Apply a bulk action (`mark-published`, `mark-trending`) to song ids.
  Bulk {
    action: BulkAction,
    #[arg(required = true)]
    ids:    Vec<i64>,
  },
  /// List annotations whose snippet no longer appears in the lyrics.
  Orphans { slug: String },
}

#[derive(Args, Debug)]
pub struct LyricsSource {
  /// Lyrics text; mark annotatable spans with `[...]`.
  #[arg(long, conflicts_with = "lyrics_file")]
  pub lyrics:      Option<String>,
  /// Read lyrics from a file.
  #[arg(long)]
  pub lyrics_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SongAddArgs {
  /// Slug of the owning artist.
  #[arg(long)]
  pub artist:       String,
  #[arg(long)]
  pub title:        String,
  /// Derived from the title when omitted.
  #[arg(long)]
  pub slug:         Option<String>,
  #[command(flatten)]
  pub lyrics:       LyricsSource,
  #[arg(long)]
  pub album:        Option<String>,
  /// `YYYY-MM-DD`.
  #[arg(long)]
  pub release_date: Option<NaiveDate>,
  #[arg(long)]
  pub youtube_url:  Option<String>,
  #[arg(long)]
  pub bpm:          Option<u32>,
  #[arg(long)]
  pub key:          Option<String>,
  /// Genre slug; repeatable.
  #[arg(long = "genre")]
  pub genres:       Vec<String>,
  /// Producer slug; repeatable.
  #[arg(long = "producer")]
  pub producers:    Vec<String>,
  #[arg(long)]
  pub featured:     bool,
  #[arg(long)]
  pub exclusive:    bool,
  #[arg(long)]
  pub trending:     bool,
  #[arg(long, default_value = "draft")]
  pub status:       SongStatus,
}

/// Every `--clear-*` flag empties the matching optional field.
#[derive(Args, Debug)]
pub struct SongUpdateArgs {
  pub slug:               String,
  #[arg(long)]
  pub title:              Option<String>,
  #[arg(long)]
  pub new_slug:           Option<String>,
  /// Move the song to the artist with this slug.
  #[arg(long)]
  pub artist:             Option<String>,
  #[command(flatten)]
  pub lyrics:             LyricsSource,
  #[arg(long)]
  pub album:              Option<String>,
  #[arg(long, conflicts_with = "album")]
  pub clear_album:        bool,
  #[arg(long)]
  pub release_date:       Option<NaiveDate>,
  #[arg(long, conflicts_with = "release_date")]
  pub clear_release_date: bool,
  #[arg(long)]
  pub youtube_url:        Option<String>,
  #[arg(long, conflicts_with = "youtube_url")]
  pub clear_youtube_url:  bool,
  #[arg(long)]
  pub bpm:                Option<u32>,
  #[arg(long, conflicts_with = "bpm")]
  pub clear_bpm:          bool,
  #[arg(long)]
  pub key:                Option<String>,
  #[arg(long, conflicts_with = "key")]
  pub clear_key:          bool,
  /// Genre slug; repeatable. Replaces the current genres.
  #[arg(long = "genre")]
  pub genres:             Vec<String>,
  #[arg(long, conflicts_with = "genres")]
  pub clear_genres:       bool,
  /// Producer slug; repeatable. Replaces the current producers.
  #[arg(long = "producer")]
  pub producers:          Vec<String>,
  #[arg(long, conflicts_with = "producers")]
  pub clear_producers:    bool,
  #[arg(long)]
  pub featured:           Option<bool>,
  #[arg(long)]
  pub exclusive:          Option<bool>,
  #[arg(long)]
  pub trending:           Option<bool>,
  #[arg(long)]
  pub status:             Option<SongStatus>,
}

#[derive(Args, Debug, Default)]
pub struct SongListArgs {
  #[arg(long)]
  pub status:    Option<SongStatus>,
  #[arg(long)]
  pub trending:  Option<bool>,
  #[arg(long)]
  pub featured:  Option<bool>,
  #[arg(long)]
  pub exclusive: Option<bool>,
  /// Artist slug.
  #[arg(long)]
  pub artist:    Option<String>,
  /// Substring over title, lyrics and artist name.
  #[arg(long)]
  pub search:    Option<String>,
}

// ─── Annotations ──────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum AnnotationCommand {
  Update {
    id:          i64,
    #[arg(long)]
    snippet:     Option<String>,
    #[arg(long)]
    explanation: Option<String>,
  },
  Delete { id: i64 },
}

// ─── Sessions ─────────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
  #[arg(long)]
  pub title:       String,
  /// The 11-character YouTube video ID.
  #[arg(long)]
  pub youtube_id:  String,
  /// `interview`, `lyrics_breakdown` or `live_performance`.
  #[arg(long, default_value = "lyrics_breakdown")]
  pub kind:        SessionKind,
  #[arg(long, default_value = "")]
  pub description: String,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
  /// Add a session that is not tied to a song.
  Add(SessionArgs),
  /// All sessions, newest first.
  List,
  Update(SessionUpdateArgs),
  Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct SessionUpdateArgs {
  pub id:          i64,
  #[arg(long)]
  pub title:       Option<String>,
  #[arg(long)]
  pub youtube_id:  Option<String>,
  #[arg(long)]
  pub kind:        Option<SessionKind>,
  #[arg(long)]
  pub description: Option<String>,
  /// Link the session to the song with this slug.
  #[arg(long)]
  pub song:        Option<String>,
  /// Unlink the session from its song.
  #[arg(long, conflicts_with = "song")]
  pub detach:      bool,
}
