//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use spade_core::{
  annotation::{AnnotationPatch, NewAnnotation},
  artist::{ArtistPatch, NewArtist},
  query::{AdminSongFilter, SongQuery, SongSort, SuggestionQuery},
  session::{NewSession, SessionKind, SessionPatch},
  song::{NewSong, SongPatch, SongStatus},
  store::CatalogStore,
  taxonomy::TaxonomyPatch,
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn published(artist_id: i64, title: &str, slug: &str) -> NewSong {
  let mut song = NewSong::new(artist_id, title, slug, "");
  song.status = SongStatus::Published;
  song
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> { NaiveDate::from_ymd_opt(y, m, d) }

fn titles(listings: &[spade_core::song::SongListing]) -> Vec<&str> {
  listings.iter().map(|l| l.title.as_str()).collect()
}

// ─── Artists ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_artist() {
  let s = store().await;
  let mut input = NewArtist::new("Burna Boy", "burna-boy");
  input.bio = "Port Harcourt.".into();
  let artist = s.add_artist(input).await.unwrap();

  let fetched = s.get_artist("burna-boy").await.unwrap().unwrap();
  assert_eq!(fetched, artist);
  assert_eq!(fetched.bio, "Port Harcourt.");
  assert!(s.get_artist("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_artist_slug_conflicts() {
  let s = store().await;
  s.add_artist(NewArtist::new("A", "same")).await.unwrap();
  let err = s.add_artist(NewArtist::new("B", "same")).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn duplicate_song_slug_conflicts() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  s.add_song(NewSong::new(a.id, "One", "one", "")).await.unwrap();
  let err = s
    .add_song(NewSong::new(a.id, "Another One", "one", ""))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn song_for_missing_artist_conflicts() {
  let s = store().await;
  let err = s.add_song(NewSong::new(999, "Ghost", "ghost", "")).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");
}

#[tokio::test]
async fn update_artist_patches_and_clears_links() {
  let s = store().await;
  let mut input = NewArtist::new("Wizkid", "wizkid");
  input.instagram_link = Some("https://instagram.com/wizkid".into());
  input.facebook_link = Some("https://facebook.com/wizkid".into());
  let artist = s.add_artist(input).await.unwrap();

  let updated = s
    .update_artist(artist.id, ArtistPatch {
      name: Some("Big Wiz".into()),
      bio: Some("Surulere.".into()),
      instagram_link: Some(None),
      ..ArtistPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.name, "Big Wiz");
  assert_eq!(updated.slug, "wizkid");
  assert_eq!(updated.bio, "Surulere.");
  assert_eq!(updated.instagram_link, None);
  assert_eq!(updated.facebook_link.as_deref(), Some("https://facebook.com/wizkid"));
  assert_eq!(s.get_artist("wizkid").await.unwrap().unwrap(), updated);

  let err = s.update_artist(99, ArtistPatch::default()).await.unwrap_err();
  assert!(matches!(err, Error::ArtistNotFound(99)), "{err:?}");
}

#[tokio::test]
async fn renaming_artist_onto_taken_slug_conflicts() {
  let s = store().await;
  s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let b = s.add_artist(NewArtist::new("B", "b")).await.unwrap();
  let err = s
    .update_artist(b.id, ArtistPatch {
      slug: Some("a".into()),
      ..ArtistPatch::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");
}

// ─── Genres & producers ──────────────────────────────────────────────────────

#[tokio::test]
async fn genre_rename_and_delete_keeps_songs() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let genre = s.add_genre("Afro Pop".into(), "afro-pop".into()).await.unwrap();
  let mut input = published(a.id, "Essence", "essence");
  input.genre_ids = vec![genre.id];
  s.add_song(input).await.unwrap();

  let renamed = s
    .update_genre(genre.id, TaxonomyPatch {
      name: Some("Afrobeats".into()),
      ..TaxonomyPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(renamed.name, "Afrobeats");
  assert_eq!(renamed.slug, "afro-pop");
  let detail = s.get_song("essence").await.unwrap().unwrap();
  assert_eq!(detail.genres, vec![renamed]);

  s.delete_genre(genre.id).await.unwrap();
  assert!(s.list_genres().await.unwrap().is_empty());
  let detail = s.get_song("essence").await.unwrap().unwrap();
  assert!(detail.genres.is_empty());

  assert!(matches!(
    s.delete_genre(genre.id).await.unwrap_err(),
    Error::GenreNotFound(_)
  ));
  assert!(matches!(
    s.update_genre(genre.id, TaxonomyPatch::default()).await.unwrap_err(),
    Error::GenreNotFound(_)
  ));
}

#[tokio::test]
async fn producer_rename_and_delete_drops_credit() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let sarz = s.add_producer("Sarz".into(), "sarz".into()).await.unwrap();
  s.add_producer("Kel P".into(), "kel-p".into()).await.unwrap();
  let mut input = published(a.id, "Joro", "joro");
  input.producer_ids = vec![sarz.id];
  s.add_song(input).await.unwrap();

  let err = s
    .update_producer(sarz.id, TaxonomyPatch {
      slug: Some("kel-p".into()),
      ..TaxonomyPatch::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");

  let renamed = s
    .update_producer(sarz.id, TaxonomyPatch {
      name: Some("Sarz Beat".into()),
      slug: Some("sarz-beat".into()),
    })
    .await
    .unwrap();
  assert_eq!(renamed.slug, "sarz-beat");

  s.delete_producer(sarz.id).await.unwrap();
  let detail = s.get_song("joro").await.unwrap().unwrap();
  assert!(detail.producers.is_empty());
  let names: Vec<String> = s
    .list_producers()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert_eq!(names, vec!["Kel P"]);
  assert!(matches!(
    s.delete_producer(sarz.id).await.unwrap_err(),
    Error::ProducerNotFound(_)
  ));
}

// ─── Songs ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_song_round_trips_metadata() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let g = s.add_genre("Afrobeats".into(), "afrobeats".into()).await.unwrap();
  let p = s.add_producer("Kel P".into(), "kel-p".into()).await.unwrap();

  let mut input = NewSong::new(a.id, "Fire", "fire", "walk through [fire]");
  input.bpm = Some(102);
  input.key = Some("C# Minor".into());
  input.release_date = date(2023, 5, 1);
  input.album = Some("Heat".into());
  input.genre_ids = vec![g.id, g.id];
  input.producer_ids = vec![p.id];
  let song = s.add_song(input).await.unwrap();

  assert_eq!(song.views, 0);
  assert_eq!(song.status, SongStatus::Draft);
  assert_eq!(song.bpm, Some(102));
  assert_eq!(song.release_date, date(2023, 5, 1));

  let detail = s.get_song("fire").await.unwrap().unwrap();
  assert_eq!(detail.song, song);
  assert_eq!(detail.artist.slug, "a");
  assert_eq!(detail.genres.len(), 1);
  assert_eq!(detail.producers[0].name, "Kel P");
}

#[tokio::test]
async fn update_song_changes_only_patched_fields() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let mut input = NewSong::new(a.id, "Old", "old", "lyrics");
  input.bpm = Some(90);
  let song = s.add_song(input).await.unwrap();

  let updated = s
    .update_song(song.id, SongPatch {
      title: Some("New".into()),
      slug: Some("new".into()),
      status: Some(SongStatus::Published),
      ..SongPatch::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.title, "New");
  assert_eq!(updated.slug, "new");
  assert_eq!(updated.status, SongStatus::Published);
  assert_eq!(updated.bpm, Some(90));
  assert_eq!(updated.lyrics, "lyrics");
  assert!(s.get_song("old").await.unwrap().is_none());

  // Status moves freely in both directions.
  let back = s
    .update_song(song.id, SongPatch {
      status: Some(SongStatus::Draft),
      ..SongPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(back.status, SongStatus::Draft);
}

#[tokio::test]
async fn update_missing_song_errors() {
  let s = store().await;
  let err = s.update_song(42, SongPatch::default()).await.unwrap_err();
  assert!(matches!(err, Error::SongNotFound(42)));
}

#[tokio::test]
async fn update_song_clears_fields_and_replaces_links() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let b = s.add_artist(NewArtist::new("B", "b")).await.unwrap();
  let pop = s.add_genre("Pop".into(), "pop".into()).await.unwrap();
  let rnb = s.add_genre("R&B".into(), "rnb".into()).await.unwrap();
  let p = s.add_producer("P".into(), "p".into()).await.unwrap();

  let mut input = NewSong::new(a.id, "Song", "song", "");
  input.album = Some("Made in Lagos".into());
  input.bpm = Some(100);
  input.key = Some("A Minor".into());
  input.release_date = date(2020, 10, 30);
  input.youtube_url = Some("https://youtu.be/x".into());
  input.genre_ids = vec![pop.id];
  input.producer_ids = vec![p.id];
  let song = s.add_song(input).await.unwrap();

  let updated = s
    .update_song(song.id, SongPatch {
      artist_id: Some(b.id),
      album: Some(None),
      bpm: Some(None),
      release_date: Some(None),
      youtube_url: Some(Some("https://youtu.be/y".into())),
      genre_ids: Some(vec![rnb.id, pop.id, rnb.id]),
      producer_ids: Some(Vec::new()),
      ..SongPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.artist_id, b.id);
  assert_eq!(updated.album, None);
  assert_eq!(updated.bpm, None);
  assert_eq!(updated.release_date, None);
  assert_eq!(updated.key.as_deref(), Some("A Minor"));
  assert_eq!(updated.youtube_url.as_deref(), Some("https://youtu.be/y"));

  let detail = s.get_song("song").await.unwrap().unwrap();
  assert_eq!(detail.artist.slug, "b");
  let genres: Vec<&str> = detail.genres.iter().map(|g| g.slug.as_str()).collect();
  assert_eq!(genres, vec!["pop", "rnb"]);
  assert!(detail.producers.is_empty());
}

#[tokio::test]
async fn failed_song_update_leaves_row_untouched() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let g = s.add_genre("G".into(), "g".into()).await.unwrap();
  let mut input = NewSong::new(a.id, "Song", "song", "");
  input.genre_ids = vec![g.id];
  let song = s.add_song(input).await.unwrap();

  let err = s
    .update_song(song.id, SongPatch {
      title: Some("Renamed".into()),
      genre_ids: Some(vec![404]),
      ..SongPatch::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");

  let detail = s.get_song("song").await.unwrap().unwrap();
  assert_eq!(detail.song.title, "Song");
  assert_eq!(detail.genres.len(), 1);
}

// ─── Views ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sequential_views_count_exactly() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  s.add_song(published(a.id, "Hit", "hit")).await.unwrap();

  for n in 1..=7u64 {
    let detail = s.view_song("hit").await.unwrap().unwrap();
    assert_eq!(detail.song.views, n);
  }
  let detail = s.get_song("hit").await.unwrap().unwrap();
  assert_eq!(detail.song.views, 7);
}

#[tokio::test]
async fn concurrent_views_are_not_lost() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  s.add_song(published(a.id, "Hit", "hit")).await.unwrap();

  let mut handles = Vec::new();
  for _ in 0..20 {
    let s = s.clone();
    handles.push(tokio::spawn(async move { s.view_song("hit").await.map(|d| d.is_some()) }));
  }
  for h in handles {
    assert!(h.await.unwrap().unwrap());
  }
  assert_eq!(s.get_song("hit").await.unwrap().unwrap().song.views, 20);
}

#[tokio::test]
async fn viewing_unknown_slug_returns_none() {
  let s = store().await;
  assert!(s.view_song("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn get_song_does_not_count_a_view() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  s.add_song(published(a.id, "Hit", "hit")).await.unwrap();
  s.get_song("hit").await.unwrap();
  assert_eq!(s.get_song("hit").await.unwrap().unwrap().song.views, 0);
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn listing_excludes_drafts_even_when_they_match() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("Fire Boy", "fire-boy")).await.unwrap();
  s.add_song(published(a.id, "Fire", "fire")).await.unwrap();
  s.add_song(NewSong::new(a.id, "Fire Draft", "fire-draft", "")).await.unwrap();

  let all = s.list_songs(&SongQuery::default()).await.unwrap();
  assert_eq!(titles(&all), vec!["Fire"]);

  let q = SongQuery::from_params(Some("fire"), None, None);
  assert_eq!(titles(&s.list_songs(&q).await.unwrap()), vec!["Fire"]);
}

#[tokio::test]
async fn text_filter_matches_title_artist_or_producer_once() {
  let s = store().await;
  let wave = s.add_artist(NewArtist::new("Wave", "wave")).await.unwrap();
  let other = s.add_artist(NewArtist::new("Other", "other")).await.unwrap();
  let p = s.add_producer("Sarz Wave".into(), "sarz".into()).await.unwrap();

  s.add_song(published(other.id, "New Wave", "new-wave")).await.unwrap();
  s.add_song(published(wave.id, "By Artist", "by-artist")).await.unwrap();
  let mut produced = published(other.id, "By Producer", "by-producer");
  produced.producer_ids = vec![p.id];
  s.add_song(produced).await.unwrap();
  // Matches on title, artist and producer at once; listed a single time.
  let mut triple = published(wave.id, "Wave Triple", "wave-triple");
  triple.producer_ids = vec![p.id];
  s.add_song(triple).await.unwrap();
  s.add_song(published(other.id, "Unrelated", "unrelated")).await.unwrap();

  let q = SongQuery {
    text: Some("WAVE".into()),
    sort: SongSort::Title,
    ..SongQuery::default()
  };
  let found = s.list_songs(&q).await.unwrap();
  assert_eq!(titles(&found), vec![
    "By Artist",
    "By Producer",
    "New Wave",
    "Wave Triple"
  ]);
}

#[tokio::test]
async fn title_sort_ignores_case() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  s.add_song(published(a.id, "bad guy", "bad-guy")).await.unwrap();
  s.add_song(published(a.id, "Zombie", "zombie")).await.unwrap();
  s.add_song(published(a.id, "Apple", "apple")).await.unwrap();

  let q = SongQuery { sort: SongSort::Title, ..SongQuery::default() };
  let found = s.list_songs(&q).await.unwrap();
  assert_eq!(titles(&found), vec!["Apple", "bad guy", "Zombie"]);
}

#[tokio::test]
async fn like_wildcards_in_text_are_literal() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  s.add_song(published(a.id, "100% Real", "real")).await.unwrap();
  s.add_song(published(a.id, "1000 Days", "days")).await.unwrap();

  let q = SongQuery::from_params(Some("100%"), None, None);
  assert_eq!(titles(&s.list_songs(&q).await.unwrap()), vec!["100% Real"]);
}

#[tokio::test]
async fn genre_filter_intersects_with_text() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let afro = s.add_genre("Afrobeats".into(), "afrobeats".into()).await.unwrap();
  let rap = s.add_genre("Rap".into(), "rap".into()).await.unwrap();

  let mut one = published(a.id, "Love Afro", "love-afro");
  one.genre_ids = vec![afro.id];
  s.add_song(one).await.unwrap();
  let mut two = published(a.id, "Love Rap", "love-rap");
  two.genre_ids = vec![rap.id, afro.id];
  s.add_song(two).await.unwrap();
  let mut three = published(a.id, "Hate Afro", "hate-afro");
  three.genre_ids = vec![afro.id];
  s.add_song(three).await.unwrap();

  let q = SongQuery::from_params(Some("love"), Some("afrobeats"), Some("title"));
  assert_eq!(titles(&s.list_songs(&q).await.unwrap()), vec![
    "Love Afro",
    "Love Rap"
  ]);

  let q = SongQuery::from_params(None, Some("rap"), None);
  assert_eq!(titles(&s.list_songs(&q).await.unwrap()), vec!["Love Rap"]);

  let q = SongQuery::from_params(None, Some("polka"), None);
  assert!(s.list_songs(&q).await.unwrap().is_empty());
}

#[tokio::test]
async fn bpm_sort_is_non_decreasing_with_missing_bpm_last() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  for (title, bpm) in [
    ("Unknown 1", None),
    ("Fast", Some(140)),
    ("Slow", Some(70)),
    ("Unknown 2", None),
    ("Mid", Some(100)),
    ("Mid Too", Some(100)),
  ] {
    let mut song = published(a.id, title, &title.to_lowercase().replace(' ', "-"));
    song.bpm = bpm;
    s.add_song(song).await.unwrap();
  }

  let q = SongQuery::from_params(None, None, Some("bpm"));
  let listed = s.list_songs(&q).await.unwrap();
  let bpms: Vec<Option<u32>> = listed.iter().map(|l| l.bpm).collect();

  let known: Vec<u32> = bpms.iter().flatten().copied().collect();
  assert!(known.windows(2).all(|w| w[0] <= w[1]), "{bpms:?}");
  assert_eq!(known.len(), 4);
  assert_eq!(&bpms[4..], &[None, None], "missing BPM must come last: {bpms:?}");
}

#[tokio::test]
async fn views_sort_is_descending() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  s.add_song(published(a.id, "Quiet", "quiet")).await.unwrap();
  s.add_song(published(a.id, "Loud", "loud")).await.unwrap();
  s.add_song(published(a.id, "Middle", "middle")).await.unwrap();
  for _ in 0..3 {
    s.view_song("loud").await.unwrap();
  }
  s.view_song("middle").await.unwrap();

  let q = SongQuery::from_params(None, None, Some("views"));
  assert_eq!(titles(&s.list_songs(&q).await.unwrap()), vec![
    "Loud", "Middle", "Quiet"
  ]);
}

#[tokio::test]
async fn newest_sort_uses_release_date_then_creation_order() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let mut old = published(a.id, "Old", "old");
  old.release_date = date(2019, 1, 1);
  s.add_song(old).await.unwrap();
  s.add_song(published(a.id, "Undated", "undated")).await.unwrap();
  let mut first = published(a.id, "Same Day First", "same-day-first");
  first.release_date = date(2024, 6, 1);
  s.add_song(first).await.unwrap();
  let mut second = published(a.id, "Same Day Second", "same-day-second");
  second.release_date = date(2024, 6, 1);
  s.add_song(second).await.unwrap();

  let listed = s.list_songs(&SongQuery::default()).await.unwrap();
  assert_eq!(titles(&listed), vec![
    "Same Day Second",
    "Same Day First",
    "Old",
    "Undated"
  ]);
}

// ─── Trending & suggestions ──────────────────────────────────────────────────

#[tokio::test]
async fn trending_is_published_by_views_and_capped() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  for i in 0..6 {
    let mut song = published(a.id, &format!("T{i}"), &format!("t{i}"));
    song.is_trending = true;
    s.add_song(song).await.unwrap();
    for _ in 0..i {
      s.view_song(&format!("t{i}")).await.unwrap();
    }
  }
  let mut draft = NewSong::new(a.id, "Draft", "draft", "");
  draft.is_trending = true;
  s.add_song(draft).await.unwrap();
  for _ in 0..50 {
    s.view_song("draft").await.unwrap();
  }
  s.add_song(published(a.id, "Not Trending", "not-trending")).await.unwrap();

  let five = s.trending(5).await.unwrap();
  assert_eq!(titles(&five), vec!["T5", "T4", "T3", "T2", "T1"]);
  let three = s.trending(3).await.unwrap();
  assert_eq!(titles(&three), vec!["T5", "T4", "T3"]);
}

#[tokio::test]
async fn suggestions_match_title_or_artist_published_only() {
  let s = store().await;
  let tems = s.add_artist(NewArtist::new("Tems", "tems")).await.unwrap();
  let other = s.add_artist(NewArtist::new("Other", "other")).await.unwrap();
  s.add_song(published(tems.id, "Free Mind", "free-mind")).await.unwrap();
  s.add_song(published(other.id, "Temsy Song", "temsy")).await.unwrap();
  s.add_song(NewSong::new(tems.id, "Unreleased", "unreleased", "")).await.unwrap();
  let mut lyric_only = published(other.id, "Elsewhere", "elsewhere");
  lyric_only.lyrics = "tems tems tems".into();
  s.add_song(lyric_only).await.unwrap();

  let q = SuggestionQuery::new("tem").unwrap();
  let mut found = titles(&s.suggestions(&q, 5).await.unwrap())
    .into_iter()
    .map(str::to_owned)
    .collect::<Vec<_>>();
  found.sort();
  assert_eq!(found, vec!["Free Mind", "Temsy Song"]);
}

#[tokio::test]
async fn suggestions_are_capped() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  for i in 0..8 {
    s.add_song(published(a.id, &format!("Echo {i}"), &format!("echo-{i}")))
      .await
      .unwrap();
  }
  let q = SuggestionQuery::new("echo").unwrap();
  assert_eq!(s.suggestions(&q, 5).await.unwrap().len(), 5);
}

// ─── Catalog search ──────────────────────────────────────────────────────────

#[tokio::test]
async fn catalog_search_matches_lyrics_and_artists() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("Rema", "rema")).await.unwrap();
  let mut song = published(a.id, "Calm Down", "calm-down");
  song.lyrics = "another banger, [baby calm down]".into();
  s.add_song(song).await.unwrap();
  let mut hidden = NewSong::new(a.id, "Banger Draft", "banger-draft", "banger");
  hidden.status = SongStatus::Draft;
  s.add_song(hidden).await.unwrap();

  let by_lyrics = s.search_catalog("BANGER", 5, 3).await.unwrap();
  assert_eq!(titles(&by_lyrics.songs), vec!["Calm Down"]);
  assert!(by_lyrics.artists.is_empty());

  let by_artist = s.search_catalog("rem", 5, 3).await.unwrap();
  assert!(by_artist.songs.is_empty());
  assert_eq!(by_artist.artists[0].name, "Rema");

  assert!(s.search_catalog("   ", 5, 3).await.unwrap().is_empty());
}

// ─── Annotations, editors & cascades ─────────────────────────────────────────

#[tokio::test]
async fn annotations_load_in_creation_order() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let song = s
    .add_song(NewSong::new(a.id, "S", "s", "[one] [two]"))
    .await
    .unwrap();
  let first = s.add_annotation(NewAnnotation::new(song.id, "one", "1")).await.unwrap();
  let second = s.add_annotation(NewAnnotation::new(song.id, "two", "2")).await.unwrap();

  let detail = s.get_song("s").await.unwrap().unwrap();
  let ids: Vec<i64> = detail.annotations.iter().map(|n| n.id).collect();
  assert_eq!(ids, vec![first.id, second.id]);
  assert_eq!(detail.annotations[0].created_at, first.created_at);
}

#[tokio::test]
async fn deleting_editor_keeps_annotations() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let song = s.add_song(NewSong::new(a.id, "S", "s", "[x]")).await.unwrap();
  let editor = s.add_editor("ada".into()).await.unwrap();

  let mut input = NewAnnotation::new(song.id, "x", "explained");
  input.created_by = Some(editor.id);
  let annotation = s.add_annotation(input).await.unwrap();
  assert_eq!(annotation.created_by, Some(editor.id));

  s.delete_editor(editor.id).await.unwrap();
  let detail = s.get_song("s").await.unwrap().unwrap();
  assert_eq!(detail.annotations.len(), 1);
  assert_eq!(detail.annotations[0].created_by, None);

  assert!(matches!(
    s.delete_editor(editor.id).await.unwrap_err(),
    Error::EditorNotFound(_)
  ));
}

#[tokio::test]
async fn deleting_song_deletes_annotations_and_linked_sessions() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let song = s.add_song(NewSong::new(a.id, "S", "s", "[x]")).await.unwrap();
  s.add_annotation(NewAnnotation::new(song.id, "x", "y")).await.unwrap();
  s.add_session(NewSession {
    song_id:     Some(song.id),
    title:       "Breakdown".into(),
    youtube_id:  "dQw4w9WgXcQ".into(),
    kind:        SessionKind::LyricsBreakdown,
    description: String::new(),
  })
  .await
  .unwrap();
  s.add_session(NewSession {
    song_id:     None,
    title:       "Standalone".into(),
    youtube_id:  "aaaaaaaaaaa".into(),
    kind:        SessionKind::Interview,
    description: String::new(),
  })
  .await
  .unwrap();

  s.delete_song(song.id).await.unwrap();
  assert!(s.get_song("s").await.unwrap().is_none());
  let sessions = s.list_sessions().await.unwrap();
  assert_eq!(sessions.len(), 1);
  assert_eq!(sessions[0].title, "Standalone");
  assert_eq!(sessions[0].song_id, None);
}

#[tokio::test]
async fn annotation_edits_keep_creation_time() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let song = s.add_song(NewSong::new(a.id, "S", "s", "[agbada] [owo]")).await.unwrap();
  let note = s
    .add_annotation(NewAnnotation::new(song.id, "agbada", "A robe"))
    .await
    .unwrap();

  let edited = s
    .update_annotation(note.id, AnnotationPatch {
      explanation: Some("A flowing wide-sleeved robe".into()),
      ..AnnotationPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(edited.snippet, "agbada");
  assert_eq!(edited.explanation, "A flowing wide-sleeved robe");
  assert_eq!(edited.created_at, note.created_at);

  s.delete_annotation(note.id).await.unwrap();
  let detail = s.get_song("s").await.unwrap().unwrap();
  assert!(detail.annotations.is_empty());
  assert!(matches!(
    s.delete_annotation(note.id).await.unwrap_err(),
    Error::AnnotationNotFound(_)
  ));
  assert!(matches!(
    s.update_annotation(note.id, AnnotationPatch::default()).await.unwrap_err(),
    Error::AnnotationNotFound(_)
  ));
}

#[tokio::test]
async fn session_edits_can_detach_and_delete() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let song = s.add_song(published(a.id, "S", "s")).await.unwrap();
  let session = s
    .add_session(NewSession {
      song_id:     Some(song.id),
      title:       "Uncover".into(),
      youtube_id:  "dQw4w9WgXcQ".into(),
      kind:        SessionKind::LyricsBreakdown,
      description: String::new(),
    })
    .await
    .unwrap();

  let edited = s
    .update_session(session.id, SessionPatch {
      song_id: Some(None),
      kind: Some(SessionKind::Interview),
      title: Some("The Dig".into()),
      ..SessionPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(edited.song_id, None);
  assert_eq!(edited.kind, SessionKind::Interview);
  assert_eq!(edited.youtube_id, "dQw4w9WgXcQ");
  assert_eq!(edited.published_at, session.published_at);
  assert!(s.get_song("s").await.unwrap().unwrap().sessions.is_empty());

  let err = s
    .update_session(session.id, SessionPatch {
      song_id: Some(Some(999)),
      ..SessionPatch::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");

  s.delete_session(session.id).await.unwrap();
  assert!(s.list_sessions().await.unwrap().is_empty());
  assert!(matches!(
    s.delete_session(session.id).await.unwrap_err(),
    Error::SessionNotFound(_)
  ));
}

#[tokio::test]
async fn deleting_artist_deletes_their_songs() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let b = s.add_artist(NewArtist::new("B", "b")).await.unwrap();
  s.add_song(published(a.id, "Gone", "gone")).await.unwrap();
  s.add_song(published(b.id, "Stays", "stays")).await.unwrap();

  s.delete_artist(a.id).await.unwrap();
  let listed = s.list_songs(&SongQuery::default()).await.unwrap();
  assert_eq!(titles(&listed), vec!["Stays"]);
}

#[tokio::test]
async fn primary_session_is_the_first_linked() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let song = s.add_song(published(a.id, "S", "s")).await.unwrap();
  for (title, kind) in [
    ("First", SessionKind::Interview),
    ("Second", SessionKind::LivePerformance),
  ] {
    s.add_session(NewSession {
      song_id: Some(song.id),
      title: title.into(),
      youtube_id: "dQw4w9WgXcQ".into(),
      kind,
      description: String::new(),
    })
    .await
    .unwrap();
  }

  let detail = s.get_song("s").await.unwrap().unwrap();
  let primary = detail.primary_session().unwrap();
  assert_eq!(primary.title, "First");
  assert_eq!(primary.kind, SessionKind::Interview);
}

// ─── Bulk actions & editor list ──────────────────────────────────────────────

#[tokio::test]
async fn bulk_actions_update_selected_songs() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("A", "a")).await.unwrap();
  let one = s.add_song(NewSong::new(a.id, "One", "one", "")).await.unwrap();
  let two = s.add_song(NewSong::new(a.id, "Two", "two", "")).await.unwrap();
  s.add_song(NewSong::new(a.id, "Three", "three", "")).await.unwrap();

  assert_eq!(s.mark_published(&[one.id, two.id, 999]).await.unwrap(), 2);
  assert_eq!(s.mark_trending(&[two.id]).await.unwrap(), 1);
  assert_eq!(s.mark_trending(&[]).await.unwrap(), 0);

  let listed = s
    .list_songs(&SongQuery::from_params(None, None, Some("title")))
    .await
    .unwrap();
  assert_eq!(titles(&listed), vec!["One", "Two"]);
  assert_eq!(titles(&s.trending(5).await.unwrap()), vec!["Two"]);
}

#[tokio::test]
async fn admin_list_counts_annotations_and_filters() {
  let s = store().await;
  let a = s.add_artist(NewArtist::new("Asake", "asake")).await.unwrap();
  let b = s.add_artist(NewArtist::new("Wizkid", "wizkid")).await.unwrap();
  let one = s
    .add_song(NewSong::new(a.id, "Lonely", "lonely", "[at] [the] top"))
    .await
    .unwrap();
  s.add_annotation(NewAnnotation::new(one.id, "at", "x")).await.unwrap();
  s.add_annotation(NewAnnotation::new(one.id, "the", "y")).await.unwrap();
  s.add_song(published(b.id, "Essence", "essence")).await.unwrap();

  let all = s.admin_songs(&AdminSongFilter::default()).await.unwrap();
  assert_eq!(all.len(), 2);
  let lonely = all.iter().find(|r| r.slug == "lonely").unwrap();
  assert_eq!(lonely.annotation_label(), "2 annotations");
  assert_eq!(lonely.status, SongStatus::Draft);

  let drafts = s
    .admin_songs(&AdminSongFilter {
      status: Some(SongStatus::Draft),
      ..AdminSongFilter::default()
    })
    .await
    .unwrap();
  assert_eq!(drafts.len(), 1);

  let by_artist = s
    .admin_songs(&AdminSongFilter {
      artist_slug: Some("wizkid".into()),
      ..AdminSongFilter::default()
    })
    .await
    .unwrap();
  assert_eq!(by_artist[0].title, "Essence");

  let by_lyrics = s
    .admin_songs(&AdminSongFilter {
      search: Some("TOP".into()),
      ..AdminSongFilter::default()
    })
    .await
    .unwrap();
  assert_eq!(by_lyrics.len(), 1);
  assert_eq!(by_lyrics[0].title, "Lonely");
}
