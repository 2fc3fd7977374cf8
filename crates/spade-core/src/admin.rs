//! Declarative description of the editor interface.
//!
//! Each entry says what the editor tooling shows and allows for one entity:
//! list columns, searchable fields, sidebar filters, bulk actions and which
//! child entities are edited inline on the parent.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// An action applied to every selected song at once.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BulkAction {
  MarkPublished,
  MarkTrending,
}

impl BulkAction {
  pub fn description(self) -> &'static str {
    match self {
      Self::MarkPublished => "Mark selected songs as Published",
      Self::MarkTrending => "Mark selected songs as Trending",
    }
  }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntityCapabilities {
  pub entity:          &'static str,
  pub list_display:    &'static [&'static str],
  pub search_fields:   &'static [&'static str],
  pub list_filters:    &'static [&'static str],
  /// Field the slug is prepopulated from, if any.
  pub slug_source:     Option<&'static str>,
  pub bulk_actions:    &'static [BulkAction],
  /// Child entities edited on this entity's page.
  pub inlines:         &'static [&'static str],
}

pub const CAPABILITIES: &[EntityCapabilities] = &[
  EntityCapabilities {
    entity:        "artist",
    list_display:  &["name", "slug"],
    search_fields: &["name"],
    list_filters:  &[],
    slug_source:   Some("name"),
    bulk_actions:  &[],
    inlines:       &[],
  },
  EntityCapabilities {
    entity:        "genre",
    list_display:  &["name", "slug"],
    search_fields: &["name"],
    list_filters:  &[],
    slug_source:   Some("name"),
    bulk_actions:  &[],
    inlines:       &[],
  },
  EntityCapabilities {
    entity:        "producer",
    list_display:  &["name", "slug"],
    search_fields: &["name"],
    list_filters:  &[],
    slug_source:   Some("name"),
    bulk_actions:  &[],
    inlines:       &[],
  },
  EntityCapabilities {
    entity:        "song",
    list_display:  &[
      "title",
      "artist",
      "status",
      "is_trending",
      "featured",
      "annotations",
    ],
    search_fields: &["title", "lyrics", "artist.name"],
    list_filters:  &["status", "is_trending", "featured", "is_exclusive", "artist"],
    slug_source:   Some("title"),
    bulk_actions:  &[BulkAction::MarkPublished, BulkAction::MarkTrending],
    inlines:       &["annotation", "session"],
  },
  EntityCapabilities {
    entity:        "annotation",
    list_display:  &["song", "snippet", "created_by"],
    search_fields: &["song.title", "snippet", "explanation"],
    list_filters:  &[],
    slug_source:   None,
    bulk_actions:  &[],
    inlines:       &[],
  },
  EntityCapabilities {
    entity:        "session",
    list_display:  &["title", "song", "kind", "published_at"],
    search_fields: &[],
    list_filters:  &["kind"],
    slug_source:   None,
    bulk_actions:  &[],
    inlines:       &[],
  },
];

/// Look up the capabilities for an entity by name.
pub fn capabilities_for(entity: &str) -> Option<&'static EntityCapabilities> {
  CAPABILITIES.iter().find(|c| c.entity == entity)
}
