//! Markup dialect vocabulary
//!
//! The constrained dialect used for authored site content: headings
//! (`#` through `###`), bold/italic emphasis, `[text](url)` links,
//! ordered and bullet lists, and `[left]`/`[center]`/`[right]`
//! alignment regions. This module owns the token spellings; the
//! `render`, `editor`, and `import` modules consume them.

mod primitives;

pub use primitives::{
    is_bullet_line, Alignment, HeadingLevel, ALIGNMENTS, BOLD_DELIMITER, BULLET_MARKERS,
    BULLET_PREFIX, ITALIC_DELIMITER,
};
