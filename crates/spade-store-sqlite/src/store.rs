//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _, Row, types::Value};
use spade_core::{
  annotation::{Annotation, AnnotationPatch, Editor, NewAnnotation},
  artist::{Artist, ArtistPatch, NewArtist},
  query::{AdminSongFilter, CatalogSearch, SongQuery, SongSort, SuggestionQuery},
  session::{NewSession, SessionPatch, SpadeSession},
  song::{AdminSongRow, NewSong, Song, SongDetail, SongListing, SongPatch, SongStatus},
  store::CatalogStore,
  taxonomy::{Genre, Producer, TaxonomyPatch},
};

use crate::{
  Error, Result,
  encode::{
    ANNOTATION_COLUMNS, ARTIST_COLUMNS, LISTING_COLUMNS, RawAdminRow, RawAnnotation,
    RawListing, RawSession, RawSong, SESSION_COLUMNS, SONG_COLUMNS, artist_row,
    contains_pattern, decode_listings, encode_date, encode_dt, genre_row, producer_row,
    raw_annotation, raw_listing, raw_session, raw_song,
  },
  schema::SCHEMA,
};

// ─── Detail rows ─────────────────────────────────────────────────────────────

/// Everything read for one song page, before decoding.
struct RawDetail {
  song:        RawSong,
  artist:      Artist,
  genres:      Vec<Genre>,
  producers:   Vec<Producer>,
  annotations: Vec<RawAnnotation>,
  sessions:    Vec<RawSession>,
}

impl RawDetail {
  fn into_detail(self) -> Result<SongDetail> {
    Ok(SongDetail {
      song:        self.song.into_song()?,
      artist:      self.artist,
      genres:      self.genres,
      producers:   self.producers,
      annotations: self
        .annotations
        .into_iter()
        .map(RawAnnotation::into_annotation)
        .collect::<Result<_>>()?,
      sessions:    self
        .sessions
        .into_iter()
        .map(RawSession::into_session)
        .collect::<Result<_>>()?,
    })
  }
}

/// Read a song page by slug on an open connection or transaction.
fn load_detail(conn: &Connection, slug: &str) -> rusqlite::Result<Option<RawDetail>> {
  let song = conn
    .query_row(
      &format!("SELECT {SONG_COLUMNS} FROM songs s WHERE s.slug = ?1"),
      rusqlite::params![slug],
      raw_song,
    )
    .optional()?;
  let Some(song) = song else {
    return Ok(None);
  };

  let artist = conn.query_row(
    &format!("SELECT {ARTIST_COLUMNS} FROM artists a WHERE a.id = ?1"),
    rusqlite::params![song.artist_id],
    artist_row,
  )?;

  let genres = conn
    .prepare(
      "SELECT g.id, g.name, g.slug FROM genres g
       JOIN song_genres sg ON sg.genre_id = g.id
       WHERE sg.song_id = ?1
       ORDER BY g.name",
    )?
    .query_map(rusqlite::params![song.id], genre_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let producers = conn
    .prepare(
      "SELECT p.id, p.name, p.slug FROM producers p
       JOIN song_producers sp ON sp.producer_id = p.id
       WHERE sp.song_id = ?1
       ORDER BY p.name",
    )?
    .query_map(rusqlite::params![song.id], producer_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let annotations = conn
    .prepare(&format!(
      "SELECT {ANNOTATION_COLUMNS} FROM annotations WHERE song_id = ?1 ORDER BY id"
    ))?
    .query_map(rusqlite::params![song.id], raw_annotation)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let sessions = conn
    .prepare(&format!(
      "SELECT {SESSION_COLUMNS} FROM sessions WHERE song_id = ?1 ORDER BY id"
    ))?
    .query_map(rusqlite::params![song.id], raw_session)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(Some(RawDetail {
    song,
    artist,
    genres,
    producers,
    annotations,
    sessions,
  }))
}

/// `ORDER BY` clause for a listing sort. Missing values always sort last.
fn order_clause(sort: SongSort) -> &'static str {
  match sort {
    SongSort::Newest => "s.release_date IS NULL, s.release_date DESC, s.id DESC",
    SongSort::Views => "s.views DESC, s.id DESC",
    SongSort::Bpm => "s.bpm IS NULL, s.bpm ASC, s.id DESC",
    SongSort::Title => "s.title COLLATE NOCASE ASC, s.id ASC",
  }
}

fn placeholders(n: usize) -> String { vec!["?"; n].join(", ") }

fn limit_param(limit: usize) -> i64 { i64::try_from(limit).unwrap_or(i64::MAX) }

fn sorted_ids(mut ids: Vec<i64>) -> Vec<i64> {
  ids.sort_unstable();
  ids.dedup();
  ids
}

/// Point a song's `song_genres` or `song_producers` rows at exactly `ids`.
fn replace_links(
  conn: &Connection,
  table: &str,
  column: &str,
  song_id: i64,
  ids: &[i64],
) -> rusqlite::Result<()> {
  conn.execute(
    &format!("DELETE FROM {table} WHERE song_id = ?1"),
    rusqlite::params![song_id],
  )?;
  for id in ids {
    conn.execute(
      &format!("INSERT INTO {table} (song_id, {column}) VALUES (?1, ?2)"),
      rusqlite::params![song_id, id],
    )?;
  }
  Ok(())
}

// ─── Partial updates ─────────────────────────────────────────────────────────

/// The `SET` list of a partial `UPDATE`, holding only the patched columns.
#[derive(Default)]
struct Assignments {
  columns: Vec<&'static str>,
  values:  Vec<Value>,
}

impl Assignments {
  /// Record `column = value` when the field was patched. An inner `None`
  /// writes `NULL`.
  fn set(&mut self, column: &'static str, value: Option<impl Into<Value>>) {
    if let Some(value) = value {
      self.columns.push(column);
      self.values.push(value.into());
    }
  }

  /// Update row `id` of `table` and report whether it exists. With nothing
  /// to assign this is only an existence check.
  fn apply(self, conn: &Connection, table: &str, id: i64) -> rusqlite::Result<bool> {
    if self.columns.is_empty() {
      let found = conn
        .query_row(
          &format!("SELECT 1 FROM {table} WHERE id = ?1"),
          rusqlite::params![id],
          |_| Ok(()),
        )
        .optional()?;
      return Ok(found.is_some());
    }

    let set = self
      .columns
      .iter()
      .map(|column| format!("{column} = ?"))
      .collect::<Vec<_>>()
      .join(", ");
    let mut values = self.values;
    values.push(Value::Integer(id));
    let matched = conn.execute(
      &format!("UPDATE {table} SET {set} WHERE id = ?"),
      rusqlite::params_from_iter(values),
    )?;
    Ok(matched > 0)
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Spade catalog backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, as the tests do.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn bulk_update(&self, set_clause: &'static str, ids: &[i64]) -> Result<usize> {
    if ids.is_empty() {
      return Ok(0);
    }
    let ids = ids.to_vec();
    let updated = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "UPDATE songs SET {set_clause} WHERE id IN ({})",
          placeholders(ids.len())
        );
        Ok(conn.execute(&sql, rusqlite::params_from_iter(ids.iter()))?)
      })
      .await
      .map_err(Error::from_write)?;
    tracing::info!(updated, set_clause, "bulk song update");
    Ok(updated)
  }

  async fn add_named(&self, table: &'static str, name: String, slug: String) -> Result<i64> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!("INSERT INTO {table} (name, slug) VALUES (?1, ?2)"),
          rusqlite::params![name, slug],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_write)
  }

  /// Rename a genre or producer and read it back with `row`.
  async fn update_named<T: Send + 'static>(
    &self,
    table: &'static str,
    id: i64,
    patch: TaxonomyPatch,
    row: fn(&Row<'_>) -> rusqlite::Result<T>,
  ) -> Result<Option<T>> {
    let mut changes = Assignments::default();
    changes.set("name", patch.name);
    changes.set("slug", patch.slug);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !changes.apply(&tx, table, id)? {
          return Ok(None);
        }
        let updated = tx.query_row(
          &format!("SELECT id, name, slug FROM {table} WHERE id = ?1"),
          rusqlite::params![id],
          row,
        )?;
        tx.commit()?;
        Ok(Some(updated))
      })
      .await
      .map_err(Error::from_write)
  }

  /// Delete row `id` of `table`; returns whether it existed.
  async fn delete_row(&self, table: &'static str, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!("DELETE FROM {table} WHERE id = ?1"),
          rusqlite::params![id],
        )?)
      })
      .await
      .map_err(Error::from_write)?;
    if deleted > 0 {
      tracing::info!(table, id, "deleted row");
    }
    Ok(deleted > 0)
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Editors ───────────────────────────────────────────────────────────────

  async fn add_editor(&self, username: String) -> Result<Editor> {
    let name = username.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO editors (username) VALUES (?1)",
          rusqlite::params![name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_write)?;
    Ok(Editor { id, username })
  }

  async fn delete_editor(&self, id: i64) -> Result<()> {
    if !self.delete_row("editors", id).await? {
      return Err(Error::EditorNotFound(id));
    }
    Ok(())
  }

  // ── Artists & taxonomy ────────────────────────────────────────────────────

  async fn add_artist(&self, input: NewArtist) -> Result<Artist> {
    let row = input.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO artists (
             name, slug, bio, cover_image, facebook_link, instagram_link
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            row.name,
            row.slug,
            row.bio,
            row.cover_image,
            row.facebook_link,
            row.instagram_link,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_write)?;

    Ok(Artist {
      id,
      name: input.name,
      slug: input.slug,
      bio: input.bio,
      cover_image: input.cover_image,
      facebook_link: input.facebook_link,
      instagram_link: input.instagram_link,
    })
  }

  async fn get_artist(&self, slug: &str) -> Result<Option<Artist>> {
    let slug = slug.to_owned();
    let artist = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {ARTIST_COLUMNS} FROM artists a WHERE a.slug = ?1"),
              rusqlite::params![slug],
              artist_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(artist)
  }

  async fn list_artists(&self) -> Result<Vec<Artist>> {
    let artists = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ARTIST_COLUMNS} FROM artists a ORDER BY a.name, a.id"
        ))?;
        let rows = stmt
          .query_map([], artist_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(artists)
  }

  async fn update_artist(&self, id: i64, patch: ArtistPatch) -> Result<Artist> {
    let mut changes = Assignments::default();
    changes.set("name", patch.name);
    changes.set("slug", patch.slug);
    changes.set("bio", patch.bio);
    changes.set("cover_image", patch.cover_image);
    changes.set("facebook_link", patch.facebook_link);
    changes.set("instagram_link", patch.instagram_link);

    let artist = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !changes.apply(&tx, "artists", id)? {
          return Ok(None);
        }
        let artist = tx.query_row(
          &format!("SELECT {ARTIST_COLUMNS} FROM artists a WHERE a.id = ?1"),
          rusqlite::params![id],
          artist_row,
        )?;
        tx.commit()?;
        Ok(Some(artist))
      })
      .await
      .map_err(Error::from_write)?;
    artist.ok_or(Error::ArtistNotFound(id))
  }

  async fn delete_artist(&self, id: i64) -> Result<()> {
    if !self.delete_row("artists", id).await? {
      return Err(Error::ArtistNotFound(id));
    }
    Ok(())
  }

  async fn add_genre(&self, name: String, slug: String) -> Result<Genre> {
    let id = self.add_named("genres", name.clone(), slug.clone()).await?;
    Ok(Genre { id, name, slug })
  }

  async fn list_genres(&self) -> Result<Vec<Genre>> {
    let genres = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name, slug FROM genres ORDER BY name, id")?;
        let rows = stmt
          .query_map([], genre_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(genres)
  }

  async fn update_genre(&self, id: i64, patch: TaxonomyPatch) -> Result<Genre> {
    self
      .update_named("genres", id, patch, genre_row)
      .await?
      .ok_or(Error::GenreNotFound(id))
  }

  async fn delete_genre(&self, id: i64) -> Result<()> {
    if !self.delete_row("genres", id).await? {
      return Err(Error::GenreNotFound(id));
    }
    Ok(())
  }

  async fn add_producer(&self, name: String, slug: String) -> Result<Producer> {
    let id = self.add_named("producers", name.clone(), slug.clone()).await?;
    Ok(Producer { id, name, slug })
  }

  async fn list_producers(&self) -> Result<Vec<Producer>> {
    let producers = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, slug FROM producers ORDER BY name, id")?;
        let rows = stmt
          .query_map([], producer_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(producers)
  }

  async fn update_producer(&self, id: i64, patch: TaxonomyPatch) -> Result<Producer> {
    self
      .update_named("producers", id, patch, producer_row)
      .await?
      .ok_or(Error::ProducerNotFound(id))
  }

  async fn delete_producer(&self, id: i64) -> Result<()> {
    if !self.delete_row("producers", id).await? {
      return Err(Error::ProducerNotFound(id));
    }
    Ok(())
  }

  // ── Songs: editor writes ─────────────────────────────────────────────────

  async fn add_song(&self, input: NewSong) -> Result<Song> {
    let release_date = input.release_date.map(encode_date);
    let status = input.status.to_string();
    let genre_ids = sorted_ids(input.genre_ids);
    let producer_ids = sorted_ids(input.producer_ids);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO songs (
             title, slug, artist_id, lyrics, album, release_date, youtube_url,
             bpm, key, featured, is_exclusive, is_trending, status
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            input.title,
            input.slug,
            input.artist_id,
            input.lyrics,
            input.album,
            release_date,
            input.youtube_url,
            input.bpm,
            input.key,
            input.featured,
            input.is_exclusive,
            input.is_trending,
            status,
          ],
        )?;
        let id = tx.last_insert_rowid();
        replace_links(&tx, "song_genres", "genre_id", id, &genre_ids)?;
        replace_links(&tx, "song_producers", "producer_id", id, &producer_ids)?;

        let raw = tx.query_row(
          &format!("SELECT {SONG_COLUMNS} FROM songs s WHERE s.id = ?1"),
          rusqlite::params![id],
          raw_song,
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await
      .map_err(Error::from_write)?;

    raw.into_song()
  }

  async fn update_song(&self, id: i64, patch: SongPatch) -> Result<Song> {
    let mut changes = Assignments::default();
    changes.set("title", patch.title);
    changes.set("slug", patch.slug);
    changes.set("artist_id", patch.artist_id);
    changes.set("lyrics", patch.lyrics);
    changes.set("album", patch.album);
    changes.set("release_date", patch.release_date.map(|d| d.map(encode_date)));
    changes.set("youtube_url", patch.youtube_url);
    changes.set("bpm", patch.bpm);
    changes.set("key", patch.key);
    changes.set("featured", patch.featured);
    changes.set("is_exclusive", patch.is_exclusive);
    changes.set("is_trending", patch.is_trending);
    changes.set("status", patch.status.map(|s| s.to_string()));
    let genre_ids = patch.genre_ids.map(sorted_ids);
    let producer_ids = patch.producer_ids.map(sorted_ids);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !changes.apply(&tx, "songs", id)? {
          return Ok(None);
        }
        if let Some(ids) = &genre_ids {
          replace_links(&tx, "song_genres", "genre_id", id, ids)?;
        }
        if let Some(ids) = &producer_ids {
          replace_links(&tx, "song_producers", "producer_id", id, ids)?;
        }
        let raw = tx.query_row(
          &format!("SELECT {SONG_COLUMNS} FROM songs s WHERE s.id = ?1"),
          rusqlite::params![id],
          raw_song,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await
      .map_err(Error::from_write)?;

    raw.ok_or(Error::SongNotFound(id))?.into_song()
  }

  async fn delete_song(&self, id: i64) -> Result<()> {
    if !self.delete_row("songs", id).await? {
      return Err(Error::SongNotFound(id));
    }
    Ok(())
  }

  async fn mark_published(&self, ids: &[i64]) -> Result<usize> {
    self.bulk_update("status = 'published'", ids).await
  }

  async fn mark_trending(&self, ids: &[i64]) -> Result<usize> {
    self.bulk_update("is_trending = 1", ids).await
  }

  async fn add_annotation(&self, input: NewAnnotation) -> Result<Annotation> {
    let annotation_at = Utc::now();
    let at_str = encode_dt(annotation_at);
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO annotations (song_id, snippet, explanation, created_by, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![row.song_id, row.snippet, row.explanation, row.created_by, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_write)?;

    Ok(Annotation {
      id,
      song_id: input.song_id,
      snippet: input.snippet,
      explanation: input.explanation,
      created_by: input.created_by,
      created_at: annotation_at,
    })
  }

  async fn update_annotation(&self, id: i64, patch: AnnotationPatch) -> Result<Annotation> {
    let mut changes = Assignments::default();
    changes.set("snippet", patch.snippet);
    changes.set("explanation", patch.explanation);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !changes.apply(&tx, "annotations", id)? {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!("SELECT {ANNOTATION_COLUMNS} FROM annotations WHERE id = ?1"),
          rusqlite::params![id],
          raw_annotation,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await
      .map_err(Error::from_write)?;

    raw.ok_or(Error::AnnotationNotFound(id))?.into_annotation()
  }

  async fn delete_annotation(&self, id: i64) -> Result<()> {
    if !self.delete_row("annotations", id).await? {
      return Err(Error::AnnotationNotFound(id));
    }
    Ok(())
  }

  async fn add_session(&self, input: NewSession) -> Result<SpadeSession> {
    let published_at = Utc::now();
    let at_str = encode_dt(published_at);
    let kind_str = input.kind.to_string();
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (song_id, title, youtube_id, kind, description, published_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            row.song_id,
            row.title,
            row.youtube_id,
            kind_str,
            row.description,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_write)?;

    Ok(SpadeSession {
      id,
      song_id: input.song_id,
      title: input.title,
      youtube_id: input.youtube_id,
      kind: input.kind,
      description: input.description,
      published_at,
    })
  }

  async fn update_session(&self, id: i64, patch: SessionPatch) -> Result<SpadeSession> {
    let mut changes = Assignments::default();
    changes.set("song_id", patch.song_id);
    changes.set("title", patch.title);
    changes.set("youtube_id", patch.youtube_id);
    changes.set("kind", patch.kind.map(|k| k.to_string()));
    changes.set("description", patch.description);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !changes.apply(&tx, "sessions", id)? {
          return Ok(None);
        }
        let raw = tx.query_row(
          &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"),
          rusqlite::params![id],
          raw_session,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await
      .map_err(Error::from_write)?;

    raw.ok_or(Error::SessionNotFound(id))?.into_session()
  }

  async fn delete_session(&self, id: i64) -> Result<()> {
    if !self.delete_row("sessions", id).await? {
      return Err(Error::SessionNotFound(id));
    }
    Ok(())
  }

  async fn list_sessions(&self) -> Result<Vec<SpadeSession>> {
    let raws: Vec<RawSession> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SESSION_COLUMNS} FROM sessions ORDER BY published_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], raw_session)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawSession::into_session).collect()
  }

  // ── Song detail ───────────────────────────────────────────────────────────

  async fn get_song(&self, slug: &str) -> Result<Option<SongDetail>> {
    let slug = slug.to_owned();
    let raw = self
      .conn
      .call(move |conn| Ok(load_detail(conn, &slug)?))
      .await?;
    raw.map(RawDetail::into_detail).transpose()
  }

  async fn view_song(&self, slug: &str) -> Result<Option<SongDetail>> {
    let slug = slug.to_owned();
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        // Single-statement increment; concurrent readers never lose a count.
        let counted = tx.execute(
          "UPDATE songs SET views = views + 1 WHERE slug = ?1",
          rusqlite::params![slug],
        )?;
        if counted == 0 {
          return Ok(None);
        }
        let detail = load_detail(&tx, &slug)?;
        tx.commit()?;
        Ok(detail)
      })
      .await?;

    if let Some(raw) = &raw {
      tracing::debug!(slug = %raw.song.slug, views = raw.song.views, "counted song view");
    }
    raw.map(RawDetail::into_detail).transpose()
  }

  // ── Catalog queries ───────────────────────────────────────────────────────

  async fn list_songs(&self, query: &SongQuery) -> Result<Vec<SongListing>> {
    let text_pattern = query.text.as_deref().map(contains_pattern);
    let genre = query.genre.clone();
    let order = order_clause(query.sort);

    let raws: Vec<RawListing> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {LISTING_COLUMNS}
           FROM songs s
           JOIN artists a ON a.id = s.artist_id
           WHERE s.status = 'published'
             AND (?1 IS NULL
                  OR s.title LIKE ?1 ESCAPE '\\'
                  OR a.name  LIKE ?1 ESCAPE '\\'
                  OR EXISTS (
                       SELECT 1 FROM song_producers sp
                       JOIN producers p ON p.id = sp.producer_id
                       WHERE sp.song_id = s.id AND p.name LIKE ?1 ESCAPE '\\'))
             AND (?2 IS NULL
                  OR EXISTS (
                       SELECT 1 FROM song_genres sg
                       JOIN genres g ON g.id = sg.genre_id
                       WHERE sg.song_id = s.id AND g.slug = ?2))
           ORDER BY {order}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![text_pattern, genre], raw_listing)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    decode_listings(raws)
  }

  async fn trending(&self, limit: usize) -> Result<Vec<SongListing>> {
    let limit = limit_param(limit);
    let raws: Vec<RawListing> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LISTING_COLUMNS}
           FROM songs s
           JOIN artists a ON a.id = s.artist_id
           WHERE s.status = 'published' AND s.is_trending = 1
           ORDER BY s.views DESC, s.id DESC
           LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit], raw_listing)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    decode_listings(raws)
  }

  async fn suggestions(
    &self,
    query: &SuggestionQuery,
    limit: usize,
  ) -> Result<Vec<SongListing>> {
    let pattern = contains_pattern(query.as_str());
    let limit = limit_param(limit);

    let raws: Vec<RawListing> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LISTING_COLUMNS}
           FROM songs s
           JOIN artists a ON a.id = s.artist_id
           WHERE s.status = 'published'
             AND (s.title LIKE ?1 ESCAPE '\\' OR a.name LIKE ?1 ESCAPE '\\')
           ORDER BY s.views DESC, s.id DESC
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![pattern, limit], raw_listing)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    decode_listings(raws)
  }

  async fn search_catalog(
    &self,
    text: &str,
    song_limit: usize,
    artist_limit: usize,
  ) -> Result<CatalogSearch> {
    let text = text.trim();
    if text.is_empty() {
      return Ok(CatalogSearch::default());
    }
    let pattern = contains_pattern(text);
    let song_limit = limit_param(song_limit);
    let artist_limit = limit_param(artist_limit);

    let (raws, artists): (Vec<RawListing>, Vec<Artist>) = self
      .conn
      .call(move |conn| {
        let songs = conn
          .prepare(&format!(
            "SELECT {LISTING_COLUMNS}
             FROM songs s
             JOIN artists a ON a.id = s.artist_id
             WHERE s.status = 'published'
               AND (s.title LIKE ?1 ESCAPE '\\' OR s.lyrics LIKE ?1 ESCAPE '\\')
             ORDER BY s.id DESC
             LIMIT ?2"
          ))?
          .query_map(rusqlite::params![pattern, song_limit], raw_listing)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let artists = conn
          .prepare(&format!(
            "SELECT {ARTIST_COLUMNS} FROM artists a
             WHERE a.name LIKE ?1 ESCAPE '\\'
             ORDER BY a.name, a.id
             LIMIT ?2"
          ))?
          .query_map(rusqlite::params![pattern, artist_limit], artist_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((songs, artists))
      })
      .await?;

    Ok(CatalogSearch {
      songs: decode_listings(raws)?,
      artists,
    })
  }

  async fn admin_songs(&self, filter: &AdminSongFilter) -> Result<Vec<AdminSongRow>> {
    let status = filter.status.map(|s: SongStatus| s.to_string());
    let trending = filter.trending;
    let featured = filter.featured;
    let exclusive = filter.exclusive;
    let artist_slug = filter.artist_slug.clone();
    let search = filter.search.as_deref().map(contains_pattern);

    let raws: Vec<RawAdminRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT s.id, s.title, s.slug, a.name, s.status, s.is_trending, s.featured,
                  (SELECT COUNT(*) FROM annotations n WHERE n.song_id = s.id)
           FROM songs s
           JOIN artists a ON a.id = s.artist_id
           WHERE (?1 IS NULL OR s.status = ?1)
             AND (?2 IS NULL OR s.is_trending = ?2)
             AND (?3 IS NULL OR s.featured = ?3)
             AND (?4 IS NULL OR s.is_exclusive = ?4)
             AND (?5 IS NULL OR a.slug = ?5)
             AND (?6 IS NULL
                  OR s.title  LIKE ?6 ESCAPE '\\'
                  OR s.lyrics LIKE ?6 ESCAPE '\\'
                  OR a.name   LIKE ?6 ESCAPE '\\')
           ORDER BY s.id DESC",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![status, trending, featured, exclusive, artist_slug, search],
            |row| {
              Ok(RawAdminRow {
                id:               row.get(0)?,
                title:            row.get(1)?,
                slug:             row.get(2)?,
                artist_name:      row.get(3)?,
                status:           row.get(4)?,
                is_trending:      row.get(5)?,
                featured:         row.get(6)?,
                annotation_count: row.get(7)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAdminRow::into_row).collect()
  }
}
