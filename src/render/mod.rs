//! Markup Rendering Module
//!
//! The display direction of the engine: transforms authored markup into
//! sanitized-by-construction HTML.
//!
//! # Architecture
//!
//! - `pipeline.rs` - the fixed-order pass pipeline producing a fragment
//! - `autolink.rs` - bare-URL anchoring over rendered HTML
//! - `document.rs` - standalone HTML page export with inlined CSS

mod autolink;
mod document;
mod pipeline;

pub use autolink::auto_link;
pub use document::{export_html_file, render_document, RenderOptions};
pub use pipeline::render;
