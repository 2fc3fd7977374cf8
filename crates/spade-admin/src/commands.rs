//! Command execution. Every command returns the text to print.

use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow, bail};
use spade_core::{
  admin::{BulkAction, CAPABILITIES, capabilities_for},
  annotation::{AnnotationPatch, NewAnnotation},
  artist::{Artist, ArtistPatch, NewArtist},
  lyrics,
  query::AdminSongFilter,
  session::{NewSession, SessionPatch},
  slug,
  song::{NewSong, SongDetail, SongPatch},
  store::CatalogStore,
  taxonomy::TaxonomyPatch,
};
use tracing::{info, warn};

use crate::cli::{
  AnnotationCommand,
  ArtistCommand,
  ArtistUpdateArgs,
  Command,
  EditorCommand,
  LyricsSource,
  SessionArgs,
  SessionCommand,
  SessionUpdateArgs,
  SongAddArgs,
  SongCommand,
  SongListArgs,
  SongUpdateArgs,
  TaxonomyCommand,
};

pub async fn run<S: CatalogStore>(store: &S, command: Command) -> Result<String> {
  match command {
    Command::Editor(cmd) => editor(store, cmd).await,
    Command::Artist(cmd) => artist(store, cmd).await,
    Command::Genre(cmd) => genre(store, cmd).await,
    Command::Producer(cmd) => producer(store, cmd).await,
    Command::Song(cmd) => song(store, cmd).await,
    Command::Annotation(cmd) => annotation(store, cmd).await,
    Command::Session(cmd) => session(store, cmd).await,
    Command::Capabilities { entity } => capabilities(entity.as_deref()),
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Use the explicit slug if given (after validation), otherwise derive one.
fn resolve_slug(explicit: Option<String>, source: &str) -> Result<String> {
  match explicit {
    Some(s) => {
      slug::validate(&s)?;
      Ok(s)
    }
    None => Ok(slug::slugify(source)?),
  }
}

fn read_lyrics(source: LyricsSource) -> Result<Option<String>> {
  if let Some(path) = source.lyrics_file {
    let text = std::fs::read_to_string(&path)
      .with_context(|| format!("reading lyrics from {}", path.display()))?;
    return Ok(Some(text));
  }
  Ok(source.lyrics)
}

/// Validate a replacement slug before it reaches the store.
fn new_slug(explicit: Option<String>) -> Result<Option<String>> {
  if let Some(s) = &explicit {
    slug::validate(s)?;
  }
  Ok(explicit)
}

/// Fold a `--field`/`--clear-field` pair into a patch value.
fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
  if clear { Some(None) } else { value.map(Some) }
}

async fn load_song<S: CatalogStore>(store: &S, slug: &str) -> Result<SongDetail> {
  store
    .get_song(slug)
    .await?
    .ok_or_else(|| anyhow!("no song with slug {slug:?}"))
}

async fn load_artist<S: CatalogStore>(store: &S, slug: &str) -> Result<Artist> {
  store
    .get_artist(slug)
    .await?
    .ok_or_else(|| anyhow!("no artist with slug {slug:?}"))
}

async fn genre_id<S: CatalogStore>(store: &S, slug: &str) -> Result<i64> {
  store
    .list_genres()
    .await?
    .into_iter()
    .find(|g| g.slug == slug)
    .map(|g| g.id)
    .ok_or_else(|| anyhow!("no genre with slug {slug:?}"))
}

async fn producer_id<S: CatalogStore>(store: &S, slug: &str) -> Result<i64> {
  store
    .list_producers()
    .await?
    .into_iter()
    .find(|p| p.slug == slug)
    .map(|p| p.id)
    .ok_or_else(|| anyhow!("no producer with slug {slug:?}"))
}

async fn genre_ids<S: CatalogStore>(store: &S, slugs: &[String]) -> Result<Vec<i64>> {
  let mut ids = Vec::with_capacity(slugs.len());
  for slug in slugs {
    ids.push(genre_id(store, slug).await?);
  }
  Ok(ids)
}

async fn producer_ids<S: CatalogStore>(store: &S, slugs: &[String]) -> Result<Vec<i64>> {
  let mut ids = Vec::with_capacity(slugs.len());
  for slug in slugs {
    ids.push(producer_id(store, slug).await?);
  }
  Ok(ids)
}

/// Replacement link list for an update: `--clear-*` empties it, repeated
/// slugs replace it, neither leaves it alone.
fn relink(ids: Vec<i64>, clear: bool) -> Option<Vec<i64>> {
  if clear {
    Some(Vec::new())
  } else if ids.is_empty() {
    None
  } else {
    Some(ids)
  }
}

// ─── Editors ──────────────────────────────────────────────────────────────────

async fn editor<S: CatalogStore>(store: &S, cmd: EditorCommand) -> Result<String> {
  match cmd {
    EditorCommand::Add { username } => {
      let editor = store.add_editor(username).await?;
      info!(id = editor.id, username = %editor.username, "editor added");
      Ok(format!("editor {} added ({})\n", editor.id, editor.username))
    }
    EditorCommand::Delete { id } => {
      store.delete_editor(id).await?;
      info!(id, "editor deleted");
      Ok(format!("editor {id} deleted\n"))
    }
  }
}

// ─── Artists & taxonomy ───────────────────────────────────────────────────────

async fn artist<S: CatalogStore>(store: &S, cmd: ArtistCommand) -> Result<String> {
  match cmd {
    ArtistCommand::Add { name, slug, bio, cover_image, facebook, instagram } => {
      let slug = resolve_slug(slug, &name)?;
      let artist = store
        .add_artist(NewArtist {
          name,
          slug,
          bio,
          cover_image,
          facebook_link: facebook,
          instagram_link: instagram,
        })
        .await?;
      info!(id = artist.id, slug = %artist.slug, "artist added");
      Ok(format!("artist {} added as /{}\n", artist.name, artist.slug))
    }
    ArtistCommand::List => {
      let mut out = String::new();
      for a in store.list_artists().await? {
        writeln!(out, "{:>5}  {:<24}  {}", a.id, a.slug, a.name)?;
      }
      Ok(out)
    }
    ArtistCommand::Update(args) => update_artist(store, args).await,
    ArtistCommand::Delete { slug } => {
      let artist = load_artist(store, &slug).await?;
      store.delete_artist(artist.id).await?;
      info!(id = artist.id, %slug, "artist deleted with their songs");
      Ok(format!("artist {} deleted\n", artist.name))
    }
  }
}

async fn update_artist<S: CatalogStore>(store: &S, args: ArtistUpdateArgs) -> Result<String> {
  let artist = load_artist(store, &args.slug).await?;
  let patch = ArtistPatch {
    name:           args.name,
    slug:           new_slug(args.new_slug)?,
    bio:            args.bio,
    cover_image:    clearable(args.cover_image, args.clear_cover_image),
    facebook_link:  clearable(args.facebook, args.clear_facebook),
    instagram_link: clearable(args.instagram, args.clear_instagram),
  };
  if patch.is_empty() {
    bail!("nothing to update");
  }

  let artist = store.update_artist(artist.id, patch).await?;
  info!(id = artist.id, slug = %artist.slug, "artist updated");
  Ok(format!("artist {} updated\n", artist.name))
}

fn taxonomy_patch(name: Option<String>, slug: Option<String>) -> Result<TaxonomyPatch> {
  let patch = TaxonomyPatch { name, slug: new_slug(slug)? };
  if patch.is_empty() {
    bail!("nothing to update");
  }
  Ok(patch)
}

async fn genre<S: CatalogStore>(store: &S, cmd: TaxonomyCommand) -> Result<String> {
  match cmd {
    TaxonomyCommand::Add { name, slug } => {
      let slug = resolve_slug(slug, &name)?;
      let genre = store.add_genre(name, slug).await?;
      info!(id = genre.id, slug = %genre.slug, "genre added");
      Ok(format!("genre {} added\n", genre.slug))
    }
    TaxonomyCommand::List => {
      let mut out = String::new();
      for g in store.list_genres().await? {
        writeln!(out, "{:<24}  {}", g.slug, g.name)?;
      }
      Ok(out)
    }
    TaxonomyCommand::Update { slug, name, new_slug } => {
      let patch = taxonomy_patch(name, new_slug)?;
      let genre = store.update_genre(genre_id(store, &slug).await?, patch).await?;
      info!(id = genre.id, slug = %genre.slug, "genre updated");
      Ok(format!("genre {} updated\n", genre.slug))
    }
    TaxonomyCommand::Delete { slug } => {
      let id = genre_id(store, &slug).await?;
      store.delete_genre(id).await?;
      info!(id, %slug, "genre deleted");
      Ok(format!("genre {slug} deleted\n"))
    }
  }
}

async fn producer<S: CatalogStore>(store: &S, cmd: TaxonomyCommand) -> Result<String> {
  match cmd {
    TaxonomyCommand::Add { name, slug } => {
      let slug = resolve_slug(slug, &name)?;
      let producer = store.add_producer(name, slug).await?;
      info!(id = producer.id, slug = %producer.slug, "producer added");
      Ok(format!("producer {} added\n", producer.slug))
    }
    TaxonomyCommand::List => {
      let mut out = String::new();
      for p in store.list_producers().await? {
        writeln!(out, "{:<24}  {}", p.slug, p.name)?;
      }
      Ok(out)
    }
    TaxonomyCommand::Update { slug, name, new_slug } => {
      let patch = taxonomy_patch(name, new_slug)?;
      let producer = store.update_producer(producer_id(store, &slug).await?, patch).await?;
      info!(id = producer.id, slug = %producer.slug, "producer updated");
      Ok(format!("producer {} updated\n", producer.slug))
    }
    TaxonomyCommand::Delete { slug } => {
      let id = producer_id(store, &slug).await?;
      store.delete_producer(id).await?;
      info!(id, %slug, "producer deleted");
      Ok(format!("producer {slug} deleted\n"))
    }
  }
}

// ─── Songs ────────────────────────────────────────────────────────────────────

async fn song<S: CatalogStore>(store: &S, cmd: SongCommand) -> Result<String> {
  match cmd {
    SongCommand::Add(args) => add_song(store, args).await,
    SongCommand::Update(args) => update_song(store, args).await,
    SongCommand::Delete { slug } => {
      let detail = load_song(store, &slug).await?;
      store.delete_song(detail.song.id).await?;
      info!(id = detail.song.id, %slug, "song deleted");
      Ok(format!("song {} deleted\n", detail.song.title))
    }
    SongCommand::Show { slug } => show_song(store, &slug).await,
    SongCommand::List(args) => list_songs(store, args).await,
    SongCommand::Annotate { slug, snippet, explanation, editor } => {
      let detail = load_song(store, &slug).await?;
      if !lyrics::snippets(&detail.song.lyrics).contains(&snippet.as_str()) {
        warn!(%slug, %snippet, "snippet does not match any bracketed span in the lyrics");
      }
      let annotation = store
        .add_annotation(NewAnnotation {
          song_id: detail.song.id,
          snippet,
          explanation,
          created_by: editor,
        })
        .await?;
      info!(id = annotation.id, %slug, "annotation added");
      Ok(format!("annotation {} added to {}\n", annotation.id, detail.song.title))
    }
    SongCommand::Session { slug, session } => {
      let detail = load_song(store, &slug).await?;
      add_session(store, Some(detail.song.id), session).await
    }
    SongCommand::Bulk { action, ids } => {
      let updated = match action {
        BulkAction::MarkPublished => store.mark_published(&ids).await?,
        BulkAction::MarkTrending => store.mark_trending(&ids).await?,
      };
      Ok(format!("{}: {updated} of {} songs updated\n", action.description(), ids.len()))
    }
    SongCommand::Orphans { slug } => {
      let detail = load_song(store, &slug).await?;
      let mut out = String::new();
      for a in lyrics::orphaned(&detail.song.lyrics, &detail.annotations) {
        writeln!(out, "{:>5}  [{}]", a.id, a.snippet)?;
      }
      Ok(out)
    }
  }
}

async fn add_song<S: CatalogStore>(store: &S, args: SongAddArgs) -> Result<String> {
  let artist = load_artist(store, &args.artist).await?;
  let genre_ids = genre_ids(store, &args.genres).await?;
  let producer_ids = producer_ids(store, &args.producers).await?;

  let slug = resolve_slug(args.slug, &args.title)?;
  let lyrics = read_lyrics(args.lyrics)?.unwrap_or_default();

  let song = store
    .add_song(NewSong {
      title: args.title,
      slug,
      artist_id: artist.id,
      lyrics,
      album: args.album,
      release_date: args.release_date,
      youtube_url: args.youtube_url,
      bpm: args.bpm,
      key: args.key,
      featured: args.featured,
      is_exclusive: args.exclusive,
      is_trending: args.trending,
      status: args.status,
      genre_ids,
      producer_ids,
    })
    .await?;
  info!(id = song.id, slug = %song.slug, status = %song.status, "song added");
  Ok(format!("song {} added at {}\n", song.title, song.url()))
}

async fn update_song<S: CatalogStore>(store: &S, args: SongUpdateArgs) -> Result<String> {
  let detail = load_song(store, &args.slug).await?;
  let artist_id = match &args.artist {
    Some(slug) => Some(load_artist(store, slug).await?.id),
    None => None,
  };
  let genres = relink(genre_ids(store, &args.genres).await?, args.clear_genres);
  let producers = relink(producer_ids(store, &args.producers).await?, args.clear_producers);

  let patch = SongPatch {
    title:        args.title,
    slug:         new_slug(args.new_slug)?,
    artist_id,
    lyrics:       read_lyrics(args.lyrics)?,
    album:        clearable(args.album, args.clear_album),
    release_date: clearable(args.release_date, args.clear_release_date),
    youtube_url:  clearable(args.youtube_url, args.clear_youtube_url),
    bpm:          clearable(args.bpm, args.clear_bpm),
    key:          clearable(args.key, args.clear_key),
    featured:     args.featured,
    is_exclusive: args.exclusive,
    is_trending:  args.trending,
    status:       args.status,
    genre_ids:    genres,
    producer_ids: producers,
  };
  if patch.is_empty() {
    bail!("nothing to update");
  }

  let song = store.update_song(detail.song.id, patch).await?;
  info!(id = song.id, slug = %song.slug, "song updated");
  Ok(format!("song {} updated\n", song.title))
}

async fn show_song<S: CatalogStore>(store: &S, slug: &str) -> Result<String> {
  let detail = load_song(store, slug).await?;
  let song = &detail.song;

  let mut out = String::new();
  writeln!(out, "{} by {} [{}]", song.title, detail.artist.name, song.status)?;
  writeln!(out, "  url:       {}", song.url())?;
  writeln!(out, "  views:     {}", song.views)?;
  if let Some(album) = &song.album {
    writeln!(out, "  album:     {album}")?;
  }
  if let Some(date) = song.release_date {
    writeln!(out, "  released:  {date}")?;
  }
  if let Some(bpm) = song.bpm {
    writeln!(out, "  bpm:       {bpm}")?;
  }
  if let Some(key) = &song.key {
    writeln!(out, "  key:       {key}")?;
  }
  let flags: Vec<&str> = [
    (song.featured, "featured"),
    (song.is_exclusive, "exclusive"),
    (song.is_trending, "trending"),
  ]
  .into_iter()
  .filter_map(|(on, name)| on.then_some(name))
  .collect();
  if !flags.is_empty() {
    writeln!(out, "  flags:     {}", flags.join(", "))?;
  }
  if !detail.genres.is_empty() {
    let names: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
    writeln!(out, "  genres:    {}", names.join(", "))?;
  }
  if !detail.producers.is_empty() {
    let names: Vec<&str> = detail.producers.iter().map(|p| p.name.as_str()).collect();
    writeln!(out, "  producers: {}", names.join(", "))?;
  }

  writeln!(out, "annotations:")?;
  for a in &detail.annotations {
    writeln!(out, "  {:>5}  [{}] {}", a.id, a.snippet, a.explanation)?;
  }
  writeln!(out, "sessions:")?;
  for s in &detail.sessions {
    writeln!(out, "  {:>5}  {} ({}) {}", s.id, s.title, s.kind.label(), s.embed_url())?;
  }
  Ok(out)
}

async fn list_songs<S: CatalogStore>(store: &S, args: SongListArgs) -> Result<String> {
  let filter = AdminSongFilter {
    status:      args.status,
    trending:    args.trending,
    featured:    args.featured,
    exclusive:   args.exclusive,
    artist_slug: args.artist,
    search:      args.search,
  };

  let mut out = String::new();
  for row in store.admin_songs(&filter).await? {
    let mut marks = String::new();
    if row.is_trending {
      marks.push_str(" trending");
    }
    if row.featured {
      marks.push_str(" featured");
    }
    writeln!(
      out,
      "{:>5}  {:<10}  {:<32}  {:<20}  {}{}",
      row.id,
      row.status,
      row.title,
      row.artist_name,
      row.annotation_label(),
      marks,
    )?;
  }
  Ok(out)
}

// ─── Annotations ──────────────────────────────────────────────────────────────

async fn annotation<S: CatalogStore>(store: &S, cmd: AnnotationCommand) -> Result<String> {
  match cmd {
    AnnotationCommand::Update { id, snippet, explanation } => {
      let patch = AnnotationPatch { snippet, explanation };
      if patch.is_empty() {
        bail!("nothing to update");
      }
      let annotation = store.update_annotation(id, patch).await?;
      info!(id, song_id = annotation.song_id, "annotation updated");
      Ok(format!("annotation {id} updated: [{}]\n", annotation.snippet))
    }
    AnnotationCommand::Delete { id } => {
      store.delete_annotation(id).await?;
      info!(id, "annotation deleted");
      Ok(format!("annotation {id} deleted\n"))
    }
  }
}

// ─── Sessions ─────────────────────────────────────────────────────────────────

async fn add_session<S: CatalogStore>(
  store: &S,
  song_id: Option<i64>,
  args: SessionArgs,
) -> Result<String> {
  let session = store
    .add_session(NewSession {
      song_id,
      title: args.title,
      youtube_id: args.youtube_id,
      kind: args.kind,
      description: args.description,
    })
    .await?;
  info!(id = session.id, kind = %session.kind, "session added");
  Ok(format!("session {} added: {}\n", session.id, session.embed_url()))
}

async fn session<S: CatalogStore>(store: &S, cmd: SessionCommand) -> Result<String> {
  match cmd {
    SessionCommand::Add(args) => add_session(store, None, args).await,
    SessionCommand::List => {
      let mut out = String::new();
      for s in store.list_sessions().await? {
        writeln!(
          out,
          "{:>5}  {}  {:<28}  {}",
          s.id,
          s.published_at.format("%Y-%m-%d"),
          s.kind.label(),
          s.title,
        )?;
      }
      Ok(out)
    }
    SessionCommand::Update(args) => update_session(store, args).await,
    SessionCommand::Delete { id } => {
      store.delete_session(id).await?;
      info!(id, "session deleted");
      Ok(format!("session {id} deleted\n"))
    }
  }
}

async fn update_session<S: CatalogStore>(store: &S, args: SessionUpdateArgs) -> Result<String> {
  let song_id = match (&args.song, args.detach) {
    (_, true) => Some(None),
    (Some(slug), false) => Some(Some(load_song(store, slug).await?.song.id)),
    (None, false) => None,
  };
  let patch = SessionPatch {
    song_id,
    title: args.title,
    youtube_id: args.youtube_id,
    kind: args.kind,
    description: args.description,
  };
  if patch.is_empty() {
    bail!("nothing to update");
  }

  let session = store.update_session(args.id, patch).await?;
  info!(id = session.id, kind = %session.kind, "session updated");
  Ok(format!("session {} updated: {}\n", session.id, session.title))
}

// ─── Capabilities ─────────────────────────────────────────────────────────────

fn capabilities(entity: Option<&str>) -> Result<String> {
  let json = match entity {
    Some(name) => {
      let caps = capabilities_for(name).ok_or_else(|| anyhow!("unknown entity {name:?}"))?;
      serde_json::to_string_pretty(caps)?
    }
    None => serde_json::to_string_pretty(CAPABILITIES)?,
  };
  Ok(json + "\n")
}
