// src/quote.rs
// Canonical quote record + the normalization helpers every source funnels through.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Display marker for quotes whose upstream did not name a real author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Stable within a session; upstream id when one exists, otherwise a
    /// deterministic content hash (see [`synthesize_id`]).
    pub id: String,
    pub content: String,
    pub author: String,
    /// Lowercase topic labels. Always present, possibly empty.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Quote {
    /// Case-insensitive substring match against content, author and tags.
    /// Used for local-pool filtering and degraded-mode search.
    pub fn matches(&self, needle: &str) -> bool {
        let n = needle.to_lowercase();
        if n.is_empty() {
            return true;
        }
        self.content.to_lowercase().contains(&n)
            || self.author.to_lowercase().contains(&n)
            || self.tags.iter().any(|t| t.contains(&n))
    }
}

/// Normalize quote body text: trim, collapse runs of whitespace, and map
/// curly quotes to their ASCII forms so dedup hashing is stable across
/// upstreams that disagree on typography.
pub fn normalize_text(s: &str) -> String {
    let s = s
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            if !in_ws {
                out.push(' ');
            }
            in_ws = true;
        } else {
            out.push(ch);
            in_ws = false;
        }
    }
    out
}

/// Map empty authors and upstream placeholder authors (e.g. the provider's
/// own domain) to the explicit [`UNKNOWN_AUTHOR`] marker.
pub fn normalize_author(raw: &str, sentinels: &[&str]) -> String {
    let trimmed = normalize_text(raw);
    if trimmed.is_empty() || sentinels.iter().any(|s| trimmed.eq_ignore_ascii_case(s)) {
        return UNKNOWN_AUTHOR.to_string();
    }
    trimmed
}

/// Lowercase, trim and dedup tag labels, dropping empties.
pub fn normalize_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for t in raw {
        let t = t.as_ref().trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

/// Deterministic id for upstreams that do not carry a stable identifier.
/// Identical (content, author) always yields the same id, so re-parsing the
/// same payload is idempotent.
pub fn synthesize_id(prefix: &str, content: &str, author: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hasher.update([0x1f]);
    hasher.update(author.as_bytes());
    let digest = hasher.finalize();
    let hex: String = digest.iter().take(6).map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{hex}")
}
