//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `spade-store-sqlite`).
//! Higher layers (`spade-api`, `spade-web`, `spade-admin`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  annotation::{Annotation, AnnotationPatch, Editor, NewAnnotation},
  artist::{Artist, ArtistPatch, NewArtist},
  query::{AdminSongFilter, CatalogSearch, SongQuery, SuggestionQuery},
  session::{NewSession, SessionPatch, SpadeSession},
  song::{AdminSongRow, NewSong, Song, SongDetail, SongListing, SongPatch},
  taxonomy::{Genre, Producer, TaxonomyPatch},
};

/// Abstraction over a Spade catalog backend.
///
/// Every read is a single consistent snapshot; an empty result is never an
/// error. Public read paths (`list_songs`, `trending`, `suggestions`,
/// `search_catalog`) only ever return published songs.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Editors ───────────────────────────────────────────────────────────

  fn add_editor(
    &self,
    username: String,
  ) -> impl Future<Output = Result<Editor, Self::Error>> + Send + '_;

  /// Delete an editor. Their annotations survive with no creator.
  fn delete_editor(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Artists & taxonomy ────────────────────────────────────────────────

  /// Returns a conflict error if the slug is taken.
  fn add_artist(
    &self,
    input: NewArtist,
  ) -> impl Future<Output = Result<Artist, Self::Error>> + Send + '_;

  fn get_artist<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Artist>, Self::Error>> + Send + 'a;

  /// All artists ordered by name.
  fn list_artists(
    &self,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + '_;

  /// Apply `patch` and return the updated artist.
  fn update_artist(
    &self,
    id: i64,
    patch: ArtistPatch,
  ) -> impl Future<Output = Result<Artist, Self::Error>> + Send + '_;

  /// Delete an artist together with all of their songs.
  fn delete_artist(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn add_genre(
    &self,
    name: String,
    slug: String,
  ) -> impl Future<Output = Result<Genre, Self::Error>> + Send + '_;

  /// All genres ordered by name.
  fn list_genres(
    &self,
  ) -> impl Future<Output = Result<Vec<Genre>, Self::Error>> + Send + '_;

  fn update_genre(
    &self,
    id: i64,
    patch: TaxonomyPatch,
  ) -> impl Future<Output = Result<Genre, Self::Error>> + Send + '_;

  /// Delete a genre. Songs lose the link and are otherwise untouched.
  fn delete_genre(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn add_producer(
    &self,
    name: String,
    slug: String,
  ) -> impl Future<Output = Result<Producer, Self::Error>> + Send + '_;

  /// All producers ordered by name.
  fn list_producers(
    &self,
  ) -> impl Future<Output = Result<Vec<Producer>, Self::Error>> + Send + '_;

  fn update_producer(
    &self,
    id: i64,
    patch: TaxonomyPatch,
  ) -> impl Future<Output = Result<Producer, Self::Error>> + Send + '_;

  /// Delete a producer. Songs lose the credit and are otherwise untouched.
  fn delete_producer(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Songs: editor writes ─────────────────────────────────────────────

  /// Create a song with its genre and producer links.
  fn add_song(
    &self,
    input: NewSong,
  ) -> impl Future<Output = Result<Song, Self::Error>> + Send + '_;

  /// Apply `patch` and return the updated song. Link lists in the patch
  /// replace the existing links in the same transaction.
  fn update_song(
    &self,
    id: i64,
    patch: SongPatch,
  ) -> impl Future<Output = Result<Song, Self::Error>> + Send + '_;

  /// Delete a song together with its annotations. Linked sessions are
  /// deleted with it.
  fn delete_song(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Set `status = published` on every listed song; returns how many
  /// matched.
  fn mark_published<'a>(
    &'a self,
    ids: &'a [i64],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Set the trending flag on every listed song; returns how many matched.
  fn mark_trending<'a>(
    &'a self,
    ids: &'a [i64],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  fn add_annotation(
    &self,
    input: NewAnnotation,
  ) -> impl Future<Output = Result<Annotation, Self::Error>> + Send + '_;

  fn update_annotation(
    &self,
    id: i64,
    patch: AnnotationPatch,
  ) -> impl Future<Output = Result<Annotation, Self::Error>> + Send + '_;

  fn delete_annotation(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn add_session(
    &self,
    input: NewSession,
  ) -> impl Future<Output = Result<SpadeSession, Self::Error>> + Send + '_;

  fn update_session(
    &self,
    id: i64,
    patch: SessionPatch,
  ) -> impl Future<Output = Result<SpadeSession, Self::Error>> + Send + '_;

  fn delete_session(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All sessions, newest first.
  fn list_sessions(
    &self,
  ) -> impl Future<Output = Result<Vec<SpadeSession>, Self::Error>> + Send + '_;

  // ── Song detail ───────────────────────────────────────────────────────

  /// Load a song and everything its page shows, without counting a view.
  fn get_song<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<SongDetail>, Self::Error>> + Send + 'a;

  /// Count one view atomically and load the song's page data.
  /// Returns `None` (and counts nothing) for an unknown slug.
  fn view_song<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<SongDetail>, Self::Error>> + Send + 'a;

  // ── Catalog queries ───────────────────────────────────────────────────

  /// The filtered, sorted catalog listing.
  fn list_songs<'a>(
    &'a self,
    query: &'a SongQuery,
  ) -> impl Future<Output = Result<Vec<SongListing>, Self::Error>> + Send + 'a;

  /// Published trending songs by views descending, at most `limit`.
  fn trending(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<SongListing>, Self::Error>> + Send + '_;

  /// Published songs whose title or artist name matches, at most `limit`.
  fn suggestions<'a>(
    &'a self,
    query: &'a SuggestionQuery,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<SongListing>, Self::Error>> + Send + 'a;

  /// Published songs matching title or lyrics plus artists matching name.
  fn search_catalog<'a>(
    &'a self,
    text: &'a str,
    song_limit: usize,
    artist_limit: usize,
  ) -> impl Future<Output = Result<CatalogSearch, Self::Error>> + Send + 'a;

  /// The editor song list, drafts included, with annotation counts.
  fn admin_songs<'a>(
    &'a self,
    filter: &'a AdminSongFilter,
  ) -> impl Future<Output = Result<Vec<AdminSongRow>, Self::Error>> + Send + 'a;
}
