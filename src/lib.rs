//! sitemark - a constrained site-markup engine
//!
//! Authored site content (trainings, talks, publications) is stored as
//! plain text in a small markup dialect: `#`-style headings, bold and
//! italic emphasis, `[text](url)` links, ordered and bullet lists, and
//! `[left]`/`[center]`/`[right]` alignment regions. This crate owns
//! both directions of that dialect:
//!
//! - **Render**: [`render::render`] turns markup into an HTML fragment
//!   through a fixed-order pass pipeline; [`render::auto_link`] wires
//!   up bare URLs afterwards; [`render::render_document`] wraps the
//!   result in a standalone preview page.
//! - **Author**: [`editor::EditableBuffer`] plus
//!   [`editor::FormatCommand`] implement the toolbar operations over a
//!   text selection, and [`import::markup_from_html`] bulk-converts
//!   HTML from an uploaded document into the same dialect.
//!
//! Everything is a synchronous, pure text transform; persistence,
//! prompting, and display are collaborator concerns behind small
//! boundaries ([`prompt::Prompter`]).
//!
//! # Example
//! ```
//! use sitemark::render::render;
//!
//! let html = render("## Talks\n\n1. Rust basics\n2. Advanced Rust");
//! assert_eq!(
//!     html,
//!     "<h2>Talks</h2>\n<ol><li>Rust basics</li><li>Advanced Rust</li></ol>"
//! );
//! ```

pub mod content;
pub mod editor;
pub mod error;
pub mod import;
pub mod markup;
pub mod prompt;
pub mod render;
mod string_utils;

pub use content::Link;
pub use editor::{apply_format, EditableBuffer, FormatCommand, FormatResult};
pub use error::{Error, Result};
pub use import::{markup_from_html, merge_imported};
pub use markup::Alignment;
pub use prompt::Prompter;
pub use render::{auto_link, render, render_document, RenderOptions};
