//! Slug derivation and validation.

use crate::{Error, Result};

/// Derive a URL-safe slug from a display name.
///
/// ASCII letters and digits are lower-cased and kept, underscores are kept,
/// runs of whitespace and hyphens become a single hyphen, and everything else
/// is dropped. Leading and trailing hyphens and underscores are trimmed.
pub fn slugify(name: &str) -> Result<String> {
  let mut slug = String::with_capacity(name.len());
  let mut pending_hyphen = false;
  for c in name.chars() {
    if c.is_ascii_alphanumeric() || c == '_' {
      if pending_hyphen && !slug.is_empty() {
        slug.push('-');
      }
      pending_hyphen = false;
      slug.push(c.to_ascii_lowercase());
    } else if c.is_whitespace() || c == '-' {
      pending_hyphen = true;
    }
  }

  let slug = slug.trim_matches(|c| c == '-' || c == '_');
  if slug.is_empty() {
    return Err(Error::EmptySlug(name.to_owned()));
  }
  Ok(slug.to_owned())
}

/// Check a caller-supplied slug: non-empty ASCII letters, digits, `-`, `_`.
pub fn validate(slug: &str) -> Result<()> {
  let ok = !slug.is_empty()
    && slug
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
  if ok {
    Ok(())
  } else {
    Err(Error::InvalidSlug(slug.to_owned()))
  }
}
