//! A [`CatalogStore`] wrapper that counts suggestion lookups and forwards
//! every call to an in-memory [`SqliteStore`].

use std::sync::atomic::{AtomicUsize, Ordering};

use spade_core::{
  annotation::{Annotation, AnnotationPatch, Editor, NewAnnotation},
  artist::{Artist, ArtistPatch, NewArtist},
  query::{AdminSongFilter, CatalogSearch, SongQuery, SuggestionQuery},
  session::{NewSession, SessionPatch, SpadeSession},
  song::{AdminSongRow, NewSong, Song, SongDetail, SongListing, SongPatch},
  store::CatalogStore,
  taxonomy::{Genre, Producer, TaxonomyPatch},
};
use spade_store_sqlite::{Error, SqliteStore};

type Result<T> = std::result::Result<T, Error>;

pub struct CountingStore {
  inner:            SqliteStore,
  suggestion_calls: AtomicUsize,
}

impl CountingStore {
  pub fn new(inner: SqliteStore) -> Self {
    Self { inner, suggestion_calls: AtomicUsize::new(0) }
  }

  pub fn suggestion_calls(&self) -> usize { self.suggestion_calls.load(Ordering::SeqCst) }
}

impl CatalogStore for CountingStore {
  type Error = Error;

  async fn add_editor(&self, username: String) -> Result<Editor> {
    self.inner.add_editor(username).await
  }

  async fn delete_editor(&self, id: i64) -> Result<()> { self.inner.delete_editor(id).await }

  async fn add_artist(&self, input: NewArtist) -> Result<Artist> {
    self.inner.add_artist(input).await
  }

  async fn get_artist(&self, slug: &str) -> Result<Option<Artist>> {
    self.inner.get_artist(slug).await
  }

  async fn list_artists(&self) -> Result<Vec<Artist>> { self.inner.list_artists().await }

  async fn update_artist(&self, id: i64, patch: ArtistPatch) -> Result<Artist> {
    self.inner.update_artist(id, patch).await
  }

  async fn delete_artist(&self, id: i64) -> Result<()> { self.inner.delete_artist(id).await }

  async fn add_genre(&self, name: String, slug: String) -> Result<Genre> {
    self.inner.add_genre(name, slug).await
  }

  async fn list_genres(&self) -> Result<Vec<Genre>> { self.inner.list_genres().await }

  async fn update_genre(&self, id: i64, patch: TaxonomyPatch) -> Result<Genre> {
    self.inner.update_genre(id, patch).await
  }

  async fn delete_genre(&self, id: i64) -> Result<()> { self.inner.delete_genre(id).await }

  async fn add_producer(&self, name: String, slug: String) -> Result<Producer> {
    self.inner.add_producer(name, slug).await
  }

  async fn list_producers(&self) -> Result<Vec<Producer>> {
    self.inner.list_producers().await
  }

  async fn update_producer(&self, id: i64, patch: TaxonomyPatch) -> Result<Producer> {
    self.inner.update_producer(id, patch).await
  }

  async fn delete_producer(&self, id: i64) -> Result<()> {
    self.inner.delete_producer(id).await
  }

  async fn add_song(&self, input: NewSong) -> Result<Song> { self.inner.add_song(input).await }

  async fn update_song(&self, id: i64, patch: SongPatch) -> Result<Song> {
    self.inner.update_song(id, patch).await
  }

  async fn delete_song(&self, id: i64) -> Result<()> { self.inner.delete_song(id).await }

  async fn mark_published(&self, ids: &[i64]) -> Result<usize> {
    self.inner.mark_published(ids).await
  }

  async fn mark_trending(&self, ids: &[i64]) -> Result<usize> {
    self.inner.mark_trending(ids).await
  }

  async fn add_annotation(&self, input: NewAnnotation) -> Result<Annotation> {
    self.inner.add_annotation(input).await
  }

  async fn update_annotation(&self, id: i64, patch: AnnotationPatch) -> Result<Annotation> {
    self.inner.update_annotation(id, patch).await
  }

  async fn delete_annotation(&self, id: i64) -> Result<()> {
    self.inner.delete_annotation(id).await
  }

  async fn add_session(&self, input: NewSession) -> Result<SpadeSession> {
    self.inner.add_session(input).await
  }

  async fn update_session(&self, id: i64, patch: SessionPatch) -> Result<SpadeSession> {
    self.inner.update_session(id, patch).await
  }

  async fn delete_session(&self, id: i64) -> Result<()> { self.inner.delete_session(id).await }

  async fn list_sessions(&self) -> Result<Vec<SpadeSession>> {
    self.inner.list_sessions().await
  }

  async fn get_song(&self, slug: &str) -> Result<Option<SongDetail>> {
    self.inner.get_song(slug).await
  }

  async fn view_song(&self, slug: &str) -> Result<Option<SongDetail>> {
    self.inner.view_song(slug).await
  }

  async fn list_songs(&self, query: &SongQuery) -> Result<Vec<SongListing>> {
    self.inner.list_songs(query).await
  }

  async fn trending(&self, limit: usize) -> Result<Vec<SongListing>> {
    self.inner.trending(limit).await
  }

  async fn suggestions(
    &self,
    query: &SuggestionQuery,
    limit: usize,
  ) -> Result<Vec<SongListing>> {
    self.suggestion_calls.fetch_add(1, Ordering::SeqCst);
    self.inner.suggestions(query, limit).await
  }

  async fn search_catalog(
    &self,
    text: &str,
    song_limit: usize,
    artist_limit: usize,
  ) -> Result<CatalogSearch> {
    self.inner.search_catalog(text, song_limit, artist_limit).await
  }

  async fn admin_songs(&self, filter: &AdminSongFilter) -> Result<Vec<AdminSongRow>> {
    self.inner.admin_songs(filter).await
  }
}
