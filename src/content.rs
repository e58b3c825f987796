//! Content-Record Value Types
//!
//! Persisted content records reference external links in two historical
//! shapes: the original schema stored a bare URL string, the current one
//! stores a `{text, url}` object. Both shapes are normalized here, at
//! the persistence boundary, into a single [`Link`] — nothing deeper in
//! the crate ever branches on the raw shape.

use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Link
// ─────────────────────────────────────────────────────────────────────────────

/// A normalized external link: display text plus destination URL.
///
/// Display text falls back to the URL when the record carries none, and
/// scheme-less URLs get `https://` prepended, so a `Link` read from
/// storage is always directly displayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub url: String,
}

/// The two shapes a link may take on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum LinkRepr {
    Url(String),
    Full {
        #[serde(default)]
        text: String,
        #[serde(default)]
        url: String,
    },
}

impl Link {
    /// Build a link from raw record fields, applying both normalizations.
    pub fn normalized(text: &str, url: &str) -> Self {
        let url = normalize_url(url);
        let text = if text.trim().is_empty() {
            url.clone()
        } else {
            text.to_string()
        };
        Link { text, url }
    }

    /// True if the record carried no usable destination.
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = LinkRepr::deserialize(deserializer)?;
        Ok(match repr {
            LinkRepr::Url(url) => Link::normalized("", &url),
            LinkRepr::Full { text, url } => Link::normalized(&text, &url),
        })
    }
}

/// Prepend `https://` to a URL that names no scheme. Empty input stays
/// empty so missing URLs remain detectable.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
