//! Lyric annotation rendering.
//!
//! Lyrics are stored as plain text in which `[snippet]` marks a span that can
//! carry an annotation. Rendering turns every such span into an interactive
//! anchor element and escapes everything else, and pairs the output with a
//! snippet → explanation map built from the song's annotations.
//!
//! Bracket matching is non-greedy: the first `]` after a `[` closes the span,
//! and a span never crosses a line break. Nested or unbalanced brackets are
//! not interpreted; whatever the pattern does not match stays literal text.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::{Result, annotation::Annotation};

static RE_ANCHOR: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("valid regex: RE_ANCHOR"));

const ANCHOR_CLASS: &str =
  "cursor-pointer border-b border-red-600 hover:bg-red-900/50 transition-colors";
const ACTIVE_CLASS: &str = "bg-red-600 text-black font-bold";

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// A piece of lyric text: either literal text or an annotation anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
  Text(&'a str),
  /// The text between the brackets, brackets excluded.
  Anchor(&'a str),
}

/// Split `lyrics` into text and anchor segments, in order.
pub fn parse(lyrics: &str) -> Vec<Segment<'_>> {
  let mut segments = Vec::new();
  let mut last = 0;
  for m in RE_ANCHOR.find_iter(lyrics) {
    if m.start() > last {
      segments.push(Segment::Text(&lyrics[last..m.start()]));
    }
    // Both delimiters are single-byte ASCII.
    segments.push(Segment::Anchor(&lyrics[m.start() + 1..m.end() - 1]));
    last = m.end();
  }
  if last < lyrics.len() {
    segments.push(Segment::Text(&lyrics[last..]));
  }
  segments
}

/// Every anchor snippet in `lyrics`, in order of appearance, duplicates kept.
pub fn snippets(lyrics: &str) -> Vec<&str> {
  parse(lyrics)
    .into_iter()
    .filter_map(|s| match s {
      Segment::Anchor(snippet) => Some(snippet),
      Segment::Text(_) => None,
    })
    .collect()
}

/// Annotations whose snippet no longer appears as an anchor in `lyrics`.
pub fn orphaned<'a>(lyrics: &str, annotations: &'a [Annotation]) -> Vec<&'a Annotation> {
  let present = snippets(lyrics);
  annotations
    .iter()
    .filter(|a| !present.contains(&a.snippet.as_str()))
    .collect()
}

// ─── Escaping ────────────────────────────────────────────────────────────────

/// Escape text for HTML element content and double- or single-quoted
/// attribute values.
pub fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

/// Escape text for the inside of a single-quoted JavaScript string literal.
fn escape_js_string(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      _ => out.push(c),
    }
  }
  out
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Render `lyrics` to HTML with one anchor element per bracketed span.
///
/// The snippet is written into four places: the visible label, a
/// `data-snippet` attribute, and two JavaScript string literals inside
/// attribute values. Each gets the escaping its context needs, so no input
/// can break out of the surrounding markup.
pub fn render_html(lyrics: &str) -> String {
  let mut out = String::with_capacity(lyrics.len() * 2);
  for segment in parse(lyrics) {
    match segment {
      Segment::Text(text) => out.push_str(&escape_html(text)),
      Segment::Anchor(snippet) => push_anchor(&mut out, snippet),
    }
  }
  out
}

fn push_anchor(out: &mut String, snippet: &str) {
  let label = escape_html(snippet);
  let literal = escape_html(&escape_js_string(snippet));
  out.push_str(&format!(
    "<span class=\"{ANCHOR_CLASS}\" data-snippet=\"{label}\" \
     @click.stop=\"openAnnotation('{literal}')\" \
     :class=\"activeAnnotation?.snippet === '{literal}' ? '{ACTIVE_CLASS}' : ''\">\
     {label}</span>"
  ));
}

/// Build the snippet → explanation lookup for one song's annotations.
///
/// When two annotations share a snippet the later one (by position in
/// `annotations`) wins.
pub fn annotation_map(annotations: &[Annotation]) -> BTreeMap<String, String> {
  annotations
    .iter()
    .map(|a| (a.snippet.clone(), a.explanation.clone()))
    .collect()
}

// ─── Bundled output ──────────────────────────────────────────────────────────

/// A rendered anchor paired with the explanation it resolves to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAnchor<'a> {
  pub snippet:     &'a str,
  pub explanation: Option<&'a str>,
}

/// Rendered lyrics plus the annotation lookup for the same song.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedLyrics {
  pub html:        String,
  pub annotations: BTreeMap<String, String>,
  #[serde(skip)]
  anchors:         Vec<String>,
}

impl AnnotatedLyrics {
  pub fn new(lyrics: &str, annotations: &[Annotation]) -> Self {
    Self {
      html:        render_html(lyrics),
      annotations: annotation_map(annotations),
      anchors:     snippets(lyrics).into_iter().map(str::to_owned).collect(),
    }
  }

  /// Exact-match lookup. A missing key means "no annotation available".
  pub fn explanation(&self, snippet: &str) -> Option<&str> {
    self.annotations.get(snippet).map(String::as_str)
  }

  /// One entry per rendered anchor element, in document order.
  pub fn anchors(&self) -> impl Iterator<Item = ResolvedAnchor<'_>> {
    self.anchors.iter().map(|snippet| ResolvedAnchor {
      snippet,
      explanation: self.explanation(snippet),
    })
  }

  /// The annotation map as JSON that is safe to embed in a `<script>` block.
  pub fn annotations_json(&self) -> Result<String> {
    let json = serde_json::to_string(&self.annotations)?;
    Ok(
      json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"),
    )
  }
}
