//! Document Import Module
//!
//! Bulk authoring: HTML produced by the external document-conversion
//! step is mapped onto the markup dialect, and the result is merged
//! into whatever the operator already wrote.
//!
//! # Architecture
//!
//! - `html.rs` - recursive DOM walk emitting markup
//! - the merge policy below - replace or append, decided by the operator

mod html;

pub use html::markup_from_html;

use crate::prompt::Prompter;

// ─────────────────────────────────────────────────────────────────────────────
// Merge Policy
// ─────────────────────────────────────────────────────────────────────────────

/// Merge freshly imported markup into existing authored content.
///
/// Empty existing content is simply replaced. Otherwise the operator
/// decides: confirming replaces the authored text, declining appends
/// the import after a blank line. The existing content is never
/// modified beyond trimming in the append case.
pub fn merge_imported(existing: &str, imported: &str, prompter: &dyn Prompter) -> String {
    let existing = existing.trim();
    if existing.is_empty() {
        return imported.to_string();
    }

    if prompter.confirm("Content field already has text. Replace it with the imported content?") {
        imported.to_string()
    } else {
        format!("{}\n\n{}", existing, imported)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
