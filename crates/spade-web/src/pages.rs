//! Server-rendered HTML pages.
//!
//! Every interpolated value goes through [`escape_html`]. The lyric body is
//! the one exception: it arrives already rendered by [`AnnotatedLyrics`].

use chrono::NaiveDate;
use spade_core::{
  lyrics::{AnnotatedLyrics, escape_html},
  query::{CatalogSearch, SongQuery, SongSort},
  song::{SongDetail, SongListing},
  taxonomy::Genre,
};

const SITE_NAME: &str = "Spade";

const ALPINE_SRC: &str = "https://unpkg.com/alpinejs@3/dist/cdn.min.js";
const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Drives the annotation panel on the song page. Reads the lookup from the
/// `annotations-data` block so explanations never pass through attributes.
const LYRIC_SHEET_JS: &str = r#"
function lyricSheet() {
  const notes = JSON.parse(document.getElementById('annotations-data').textContent);
  return {
    activeAnnotation: null,
    openAnnotation(snippet) {
      this.activeAnnotation = {
        snippet,
        explanation: notes[snippet] ?? 'No annotation available.',
      };
    },
    closeAnnotation() {
      this.activeAnnotation = null;
    },
  };
}
"#;

// ─── Page models ─────────────────────────────────────────────────────────────

pub struct IndexPage<'a> {
  pub query:    &'a SongQuery,
  pub songs:    &'a [SongListing],
  pub genres:   &'a [Genre],
  pub trending: &'a [SongListing],
}

pub struct SongPage<'a> {
  pub detail:   &'a SongDetail,
  pub lyrics:   &'a AnnotatedLyrics,
  pub trending: &'a [SongListing],
}

// ─── Layout ──────────────────────────────────────────────────────────────────

fn layout(title: &str, body: &str) -> String {
  format!(
    r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {SITE_NAME}</title>
<script defer src="{ALPINE_SRC}"></script>
<script src="{HTMX_SRC}"></script>
</head>
<body>
<header class="site-header">
<a href="/" class="logo">{SITE_NAME}</a>
<input type="search" name="q" placeholder="Search songs, lyrics, artists"
  hx-get="/search/" hx-trigger="keyup changed delay:300ms" hx-target="#search-results">
<div id="search-results"></div>
</header>
<main>
{body}
</main>
</body>
</html>
"##,
    title = escape_html(title),
  )
}

fn sort_label(sort: SongSort) -> &'static str {
  match sort {
    SongSort::Newest => "Newest",
    SongSort::Views => "Most viewed",
    SongSort::Bpm => "BPM",
    SongSort::Title => "Title",
  }
}

fn format_date(date: NaiveDate) -> String { date.format("%B %-d, %Y").to_string() }

fn selected(yes: bool) -> &'static str { if yes { " selected" } else { "" } }

fn song_item(song: &SongListing) -> String {
  let mut meta = Vec::new();
  if let Some(album) = &song.album {
    meta.push(escape_html(album));
  }
  if let Some(date) = song.release_date {
    meta.push(format_date(date));
  }
  if let Some(bpm) = song.bpm {
    meta.push(format!("{bpm} BPM"));
  }
  if let Some(key) = &song.key {
    meta.push(escape_html(key));
  }
  let badge = if song.is_exclusive {
    r#" <span class="badge">Exclusive</span>"#
  } else {
    ""
  };

  format!(
    r#"<li class="song"><a href="{url}">{title}</a> <span class="artist">{artist}</span>{badge} <span class="meta">{meta}</span> <span class="views">{views} views</span></li>"#,
    url = escape_html(&song.url()),
    title = escape_html(&song.title),
    artist = escape_html(&song.artist_name),
    meta = meta.join(" · "),
    views = song.views,
  )
}

fn song_list(class: &str, songs: &[SongListing], empty: &str) -> String {
  if songs.is_empty() {
    return format!(r#"<p class="empty">{}</p>"#, escape_html(empty));
  }
  let items: String = songs.iter().map(song_item).collect();
  format!(r#"<ul class="{class}">{items}</ul>"#)
}

fn trending_aside(trending: &[SongListing]) -> String {
  format!(
    r#"<aside class="trending"><h2>Trending</h2>{}</aside>"#,
    song_list("trending-list", trending, "Nothing trending yet.")
  )
}

// ─── Index ───────────────────────────────────────────────────────────────────

pub fn index(page: &IndexPage<'_>) -> String {
  let text = page.query.text.as_deref().unwrap_or_default();

  let mut genre_options = String::from(r#"<option value="">All genres</option>"#);
  for genre in page.genres {
    let is_selected = page.query.genre.as_deref() == Some(genre.slug.as_str());
    genre_options.push_str(&format!(
      r#"<option value="{}"{}>{}</option>"#,
      escape_html(&genre.slug),
      selected(is_selected),
      escape_html(&genre.name),
    ));
  }

  let mut sort_options = String::new();
  for sort in SongSort::ALL {
    sort_options.push_str(&format!(
      r#"<option value="{sort}"{}>{}</option>"#,
      selected(sort == page.query.sort),
      sort_label(sort),
    ));
  }

  let body = format!(
    r#"<section class="catalog">
<form method="get" action="/" class="filters">
<input type="text" name="q" value="{text}" placeholder="Title, artist or producer">
<select name="genre">{genre_options}</select>
<select name="sort">{sort_options}</select>
<button type="submit">Filter</button>
</form>
{songs}
</section>
{trending}"#,
    text = escape_html(text),
    songs = song_list("song-list", page.songs, "No songs match."),
    trending = trending_aside(page.trending),
  );

  layout("Lyrics & Sessions", &body)
}

// ─── Song detail ─────────────────────────────────────────────────────────────

pub fn song(page: &SongPage<'_>) -> spade_core::Result<String> {
  let SongDetail { song, artist, genres, producers, .. } = page.detail;

  let mut facts = Vec::new();
  if let Some(album) = &song.album {
    facts.push(format!("<dt>Album</dt><dd>{}</dd>", escape_html(album)));
  }
  if let Some(date) = song.release_date {
    facts.push(format!("<dt>Released</dt><dd>{}</dd>", format_date(date)));
  }
  if let Some(bpm) = song.bpm {
    facts.push(format!("<dt>BPM</dt><dd>{bpm}</dd>"));
  }
  if let Some(key) = &song.key {
    facts.push(format!("<dt>Key</dt><dd>{}</dd>", escape_html(key)));
  }
  if !producers.is_empty() {
    let names: Vec<String> = producers.iter().map(|p| escape_html(&p.name)).collect();
    facts.push(format!("<dt>Produced by</dt><dd>{}</dd>", names.join(", ")));
  }
  if !genres.is_empty() {
    let names: Vec<String> = genres.iter().map(|g| escape_html(&g.name)).collect();
    facts.push(format!("<dt>Genres</dt><dd>{}</dd>", names.join(", ")));
  }

  let video = match page.detail.primary_session() {
    Some(session) => format!(
      r#"<figure class="session"><iframe src="{src}" title="{title}" allowfullscreen></iframe><figcaption>{label}: {title}</figcaption></figure>"#,
      src = escape_html(&session.embed_url()),
      title = escape_html(&session.title),
      label = session.kind.label(),
    ),
    None => match &song.youtube_url {
      Some(url) => format!(
        r#"<p class="video-link"><a href="{}" rel="noopener">Watch the video</a></p>"#,
        escape_html(url),
      ),
      None => String::new(),
    },
  };

  let body = format!(
    r#"<article class="song-detail" x-data="lyricSheet()" @click="closeAnnotation()">
<header>
<h1>{title}</h1>
<p class="artist">{artist}</p>
<dl class="facts">{facts}</dl>
</header>
{video}
<div class="lyrics" style="white-space: pre-line">{lyrics}</div>
<aside class="annotation-panel" x-show="activeAnnotation" x-cloak @click.stop>
<h3 x-text="activeAnnotation?.snippet"></h3>
<p x-text="activeAnnotation?.explanation"></p>
</aside>
<script id="annotations-data" type="application/json">{json}</script>
<script>{LYRIC_SHEET_JS}</script>
</article>
{trending}"#,
    title = escape_html(&song.title),
    artist = escape_html(&artist.name),
    facts = facts.concat(),
    lyrics = page.lyrics.html,
    json = page.lyrics.annotations_json()?,
    trending = trending_aside(page.trending),
  );

  Ok(layout(&format!("{} by {}", song.title, artist.name), &body))
}

// ─── Search partial ──────────────────────────────────────────────────────────

/// Fragment swapped into `#search-results`; no layout.
pub fn search_results(query: &str, results: &CatalogSearch) -> String {
  if query.trim().is_empty() {
    return String::new();
  }
  if results.is_empty() {
    return format!(
      r#"<p class="empty">No results for &ldquo;{}&rdquo;.</p>"#,
      escape_html(query.trim())
    );
  }

  let mut out = String::new();
  if !results.songs.is_empty() {
    out.push_str(r#"<h4>Songs</h4><ul class="search-songs">"#);
    for song in &results.songs {
      out.push_str(&format!(
        r#"<li><a href="{}">{}</a> <span class="artist">{}</span></li>"#,
        escape_html(&song.url()),
        escape_html(&song.title),
        escape_html(&song.artist_name),
      ));
    }
    out.push_str("</ul>");
  }
  if !results.artists.is_empty() {
    out.push_str(r#"<h4>Artists</h4><ul class="search-artists">"#);
    for artist in &results.artists {
      out.push_str(&format!(
        r#"<li data-slug="{}">{}</li>"#,
        escape_html(&artist.slug),
        escape_html(&artist.name),
      ));
    }
    out.push_str("</ul>");
  }
  out
}

// ─── Error pages ─────────────────────────────────────────────────────────────

pub fn not_found() -> String {
  layout("Not found", r#"<h1>Not found</h1><p><a href="/">Back to the catalog</a></p>"#)
}

pub fn server_error() -> String {
  layout("Server error", "<h1>Something went wrong</h1>")
}
