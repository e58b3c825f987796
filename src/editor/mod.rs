//! Authoring Editor Module
//!
//! The interactive direction of the engine: an [`EditableBuffer`] holds
//! the markup text and the current selection, and toolbar commands
//! ([`FormatCommand`]) rewrite it — wrapping emphasis, converting
//! selections to lists, inserting prompted links, and toggling
//! alignment regions.

mod buffer;
mod commands;

pub use buffer::EditableBuffer;
pub use commands::{apply_format, FormatCommand, FormatResult};
