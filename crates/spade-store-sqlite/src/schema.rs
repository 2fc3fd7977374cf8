//! SQL schema for the Spade SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS editors (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    username  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS artists (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    slug            TEXT NOT NULL UNIQUE,
    bio             TEXT NOT NULL DEFAULT '',
    cover_image     TEXT,
    facebook_link   TEXT,
    instagram_link  TEXT
);

CREATE TABLE IF NOT EXISTS genres (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    slug  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS producers (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    slug  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS songs (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    title         TEXT NOT NULL,
    slug          TEXT NOT NULL UNIQUE,
    artist_id     INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
    lyrics        TEXT NOT NULL,
    album         TEXT,
    release_date  TEXT,              -- YYYY-MM-DD or NULL
    youtube_url   TEXT,
    bpm           INTEGER,
    key           TEXT,
    views         INTEGER NOT NULL DEFAULT 0 CHECK (views >= 0),
    featured      INTEGER NOT NULL DEFAULT 0,
    is_exclusive  INTEGER NOT NULL DEFAULT 0,
    is_trending   INTEGER NOT NULL DEFAULT 0,
    status        TEXT NOT NULL DEFAULT 'draft'
                  CHECK (status IN ('draft', 'published'))
);

CREATE TABLE IF NOT EXISTS song_genres (
    song_id   INTEGER NOT NULL REFERENCES songs(id)  ON DELETE CASCADE,
    genre_id  INTEGER NOT NULL REFERENCES genres(id) ON DELETE CASCADE,
    PRIMARY KEY (song_id, genre_id)
);

CREATE TABLE IF NOT EXISTS song_producers (
    song_id      INTEGER NOT NULL REFERENCES songs(id)     ON DELETE CASCADE,
    producer_id  INTEGER NOT NULL REFERENCES producers(id) ON DELETE CASCADE,
    PRIMARY KEY (song_id, producer_id)
);

-- The snippet is matched against the lyrics by exact text only; there is no
-- check that it still occurs there.
CREATE TABLE IF NOT EXISTS annotations (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    song_id      INTEGER NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
    snippet      TEXT NOT NULL,
    explanation  TEXT NOT NULL,
    created_by   INTEGER REFERENCES editors(id) ON DELETE SET NULL,
    created_at   TEXT NOT NULL       -- RFC 3339 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS sessions (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    song_id       INTEGER REFERENCES songs(id) ON DELETE CASCADE,
    title         TEXT NOT NULL,
    youtube_id    TEXT NOT NULL,
    kind          TEXT NOT NULL DEFAULT 'lyrics_breakdown',
    description   TEXT NOT NULL DEFAULT '',
    published_at  TEXT NOT NULL      -- RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS songs_artist_idx       ON songs(artist_id);
CREATE INDEX IF NOT EXISTS songs_status_idx       ON songs(status);
CREATE INDEX IF NOT EXISTS annotations_song_idx   ON annotations(song_id);
CREATE INDEX IF NOT EXISTS sessions_song_idx      ON sessions(song_id);

PRAGMA user_version = 1;
";
