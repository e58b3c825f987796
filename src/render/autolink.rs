//! URL Auto-Linking
//!
//! Post-processing pass over rendered HTML that turns bare
//! `http://`/`https://` URLs into anchors. Existing anchors are masked
//! behind placeholder tokens before the URL scan runs, so neither their
//! `href` nor their display text can ever be wrapped a second time, and
//! restored verbatim afterwards.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// ─────────────────────────────────────────────────────────────────────────────
// Compiled Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// An existing anchor element, masked before URL scanning.
static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s+[^>]*href\s*=\s*["'][^"']+["'][^>]*>.*?</a>"#).unwrap()
});

/// A bare URL. The body excludes whitespace, quoting, and bracket
/// characters; the final character additionally excludes sentence
/// punctuation so a trailing `.`, `,`, `;`, `!` or `?` stays outside
/// the link.
static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]()]+[^\s<>"{}|\\^`\[\]().,;!?]"#).unwrap()
});

// ─────────────────────────────────────────────────────────────────────────────
// Auto-Linker
// ─────────────────────────────────────────────────────────────────────────────

/// Wrap bare URLs in `html` as anchors opening in a new browsing context.
///
/// Total function; HTML without bare URLs passes through unchanged.
pub fn auto_link(html: &str) -> String {
    if html.is_empty() {
        return html.to_string();
    }

    // Mask existing anchors so they are never re-scanned.
    let mut anchors: Vec<String> = Vec::new();
    let masked = ANCHOR
        .replace_all(html, |caps: &Captures| {
            let token = format!("__ANCHOR_{}__", anchors.len());
            anchors.push(caps[0].to_string());
            token
        })
        .into_owned();

    let linked = BARE_URL
        .replace_all(&masked, |caps: &Captures| {
            let url = &caps[0];
            format!(
                "<a href=\"{0}\" target=\"_blank\" rel=\"noopener noreferrer\">{0}</a>",
                url
            )
        })
        .into_owned();

    // Restore the masked anchors verbatim.
    let mut restored = linked;
    for (index, anchor) in anchors.iter().enumerate() {
        restored = restored.replace(&format!("__ANCHOR_{}__", index), anchor);
    }
    restored
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
