//! Toolbar Formatting Commands
//!
//! Selection-based editing operations over an [`EditableBuffer`]:
//! bold/italic wrapping, list conversion, prompted link insertion, and
//! the alignment toggle. Operations never fail and never panic —
//! commands that need a selection and do not have one leave the buffer
//! untouched and carry a user-facing hint instead.

use crate::editor::EditableBuffer;
use crate::markup::{Alignment, ALIGNMENTS, BOLD_DELIMITER, BULLET_PREFIX, ITALIC_DELIMITER};
use crate::prompt::Prompter;
use crate::string_utils::floor_char_boundary;

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Formatting commands offered by the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Bullet list (- item)
    BulletList,
    /// Numbered list (1. item)
    NumberedList,
    /// Link ([text](url)), URL requested from the operator
    Link,
    /// Alignment region toggle ([center]...[/center])
    Align(Alignment),
}

impl FormatCommand {
    /// Toolbar label for this command.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::BulletList => "Bullet List",
            Self::NumberedList => "Numbered List",
            Self::Link => "Insert Link",
            Self::Align(Alignment::Left) => "Align Left",
            Self::Align(Alignment::Center) => "Align Center",
            Self::Align(Alignment::Right) => "Align Right",
        }
    }

    /// The hint shown when the command needs a selection and has none.
    pub fn hint_message(&self) -> &'static str {
        match self {
            Self::Bold => "Please select the text you want to make bold first.",
            Self::Italic => "Please select the text you want to make italic first.",
            Self::BulletList => "Please select the text you want to convert to a bullet list first.",
            Self::NumberedList => {
                "Please select the text you want to convert to a numbered list first."
            }
            _ => "Please select text first to apply formatting.",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone)]
pub struct FormatResult {
    /// The new text after formatting
    pub text: String,
    /// New cursor position (byte index)
    pub cursor: usize,
    /// New selection range (start, end) if applicable
    pub selection: Option<(usize, usize)>,
    /// Whether the formatting was applied (vs removed or refused)
    pub applied: bool,
    /// User-facing hint when the command could not be applied
    pub hint: Option<&'static str>,
}

impl FormatResult {
    /// Create a result with just a cursor position.
    fn with_cursor(text: String, cursor: usize) -> Self {
        Self {
            text,
            cursor,
            selection: None,
            applied: true,
            hint: None,
        }
    }

    /// Create a result with a selection range.
    fn with_selection(text: String, start: usize, end: usize) -> Self {
        Self {
            text,
            cursor: end,
            selection: Some((start, end)),
            applied: true,
            hint: None,
        }
    }

    /// An untouched buffer, optionally carrying a hint for the operator.
    fn unchanged(buffer: &EditableBuffer, hint: Option<&'static str>) -> Self {
        Self {
            text: buffer.text().to_string(),
            cursor: buffer.selection().0,
            selection: Some(buffer.selection()),
            applied: false,
            hint,
        }
    }

    /// Mark that formatting was removed rather than applied.
    fn toggled_off(mut self) -> Self {
        self.applied = false;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Application
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a formatting command to a buffer.
///
/// Pure with respect to the buffer: the result carries the new text and
/// selection; committing it is the caller's (or
/// [`EditableBuffer::apply`]'s) job. The prompter is consulted only by
/// [`FormatCommand::Link`].
pub fn apply_format(
    buffer: &EditableBuffer,
    command: FormatCommand,
    prompter: &dyn Prompter,
) -> FormatResult {
    match command {
        FormatCommand::Bold => apply_inline(buffer, command, BOLD_DELIMITER),
        FormatCommand::Italic => apply_inline(buffer, command, ITALIC_DELIMITER),
        FormatCommand::BulletList => apply_list(buffer, command, false),
        FormatCommand::NumberedList => apply_list(buffer, command, true),
        FormatCommand::Link => apply_link(buffer, prompter),
        FormatCommand::Align(alignment) => apply_align(buffer, alignment),
    }
}

impl EditableBuffer {
    /// Apply a command and commit the outcome to this buffer.
    pub fn apply(&mut self, command: FormatCommand, prompter: &dyn Prompter) -> FormatResult {
        let result = apply_format(self, command, prompter);
        let (start, end) = result.selection.unwrap_or((result.cursor, result.cursor));
        self.replace(result.text.clone(), start, end);
        result
    }
}

/// Wrap the selection in an inline delimiter pair (bold, italic).
fn apply_inline(buffer: &EditableBuffer, command: FormatCommand, delimiter: &str) -> FormatResult {
    let (start, end) = buffer.selection();
    let selected = buffer.selected_text();

    if selected.is_empty() {
        return FormatResult::unchanged(buffer, Some(command.hint_message()));
    }

    let text = buffer.text();
    let wrapped = format!("{delimiter}{selected}{delimiter}");
    let new_text = format!("{}{}{}", &text[..start], wrapped, &text[end..]);
    FormatResult::with_cursor(new_text, start + wrapped.len())
}

/// Convert the selected lines into a list block.
///
/// Blank lines in the selection are discarded, each remaining line is
/// trimmed and prefixed, and the block is set off with single newlines.
fn apply_list(buffer: &EditableBuffer, command: FormatCommand, numbered: bool) -> FormatResult {
    let (start, end) = buffer.selection();
    let selected = buffer.selected_text();

    if selected.is_empty() {
        return FormatResult::unchanged(buffer, Some(command.hint_message()));
    }

    let items: Vec<String> = selected
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| {
            if numbered {
                format!("{}. {}", index + 1, line.trim())
            } else {
                format!("{}{}", BULLET_PREFIX, line.trim())
            }
        })
        .collect();

    let formatted = format!("\n{}\n", items.join("\n"));
    let text = buffer.text();
    let new_text = format!("{}{}{}", &text[..start], formatted, &text[end..]);
    FormatResult::with_cursor(new_text, start + formatted.len())
}

/// Insert a `[text](url)` link at the selection, asking the operator
/// for the URL. A scheme-less URL triggers a confirm offering an
/// automatic `https://` prefix; declining cancels the insertion.
fn apply_link(buffer: &EditableBuffer, prompter: &dyn Prompter) -> FormatResult {
    let url = match prompter.request_url() {
        Some(url) if !url.is_empty() => url,
        _ => return FormatResult::unchanged(buffer, None),
    };

    let has_scheme =
        url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:");

    let final_url = if has_scheme {
        url.clone()
    } else {
        if !prompter.confirm("URL should start with http:// or https://. Add https:// automatically?")
        {
            return FormatResult::unchanged(buffer, None);
        }
        format!("https://{}", url)
    };

    let (start, end) = buffer.selection();
    let selected = buffer.selected_text();
    // Display text falls back to the URL exactly as entered.
    let link_text = if selected.is_empty() {
        url.as_str()
    } else {
        selected
    };

    let markup = format!("[{}]({})", link_text, final_url);
    let text = buffer.text();
    let new_text = format!("{}{}{}", &text[..start], markup, &text[end..]);
    FormatResult::with_cursor(new_text, start + markup.len())
}

/// Toggle an alignment region on the selection, or on the enclosing
/// paragraph when the selection is collapsed.
fn apply_align(buffer: &EditableBuffer, alignment: Alignment) -> FormatResult {
    let (start, end) = buffer.selection();
    if start != end {
        toggle_alignment(buffer, alignment, start, end)
    } else {
        let (para_start, para_end) = enclosing_paragraph(buffer.text(), start);
        toggle_alignment(buffer, alignment, para_start, para_end)
    }
}

/// The wrap/unwrap/replace logic shared by both alignment paths.
fn toggle_alignment(
    buffer: &EditableBuffer,
    alignment: Alignment,
    start: usize,
    end: usize,
) -> FormatResult {
    let text = buffer.text();
    let target = &text[start..end];

    let replacement = match parse_alignment_wrapper(target.trim()) {
        Some((existing, inner)) if existing == alignment => {
            // Same alignment applied twice: unwrap instead of doubling.
            let new_text = format!("{}{}{}", &text[..start], inner, &text[end..]);
            return FormatResult::with_selection(new_text, start, start + inner.len())
                .toggled_off();
        }
        Some((_, inner)) => format!(
            "{}{}{}",
            alignment.open_tag(),
            inner,
            alignment.close_tag()
        ),
        None => format!(
            "{}{}{}",
            alignment.open_tag(),
            target,
            alignment.close_tag()
        ),
    };

    let new_text = format!("{}{}{}", &text[..start], replacement, &text[end..]);
    FormatResult::with_selection(new_text, start, start + replacement.len())
}

/// If `trimmed` is exactly one `[x]...[/x]` wrapper, return its
/// alignment and inner content.
fn parse_alignment_wrapper(trimmed: &str) -> Option<(Alignment, &str)> {
    for alignment in ALIGNMENTS {
        let open = alignment.open_tag();
        let close = alignment.close_tag();
        if trimmed.len() >= open.len() + close.len()
            && trimmed.starts_with(&open)
            && trimmed.ends_with(&close)
        {
            return Some((alignment, &trimmed[open.len()..trimmed.len() - close.len()]));
        }
    }
    None
}

/// Locate the paragraph enclosing `cursor`: the span between the
/// nearest blank-line boundaries (or the buffer ends).
fn enclosing_paragraph(text: &str, cursor: usize) -> (usize, usize) {
    // Search for a separator starting at or before cursor - 1; the
    // paragraph begins just past it. The separator is ASCII, so
    // flooring the window to a character boundary cannot skip a match.
    let backward_window = floor_char_boundary(text, cursor.saturating_sub(1) + 2);
    let para_start = text[..backward_window]
        .rfind("\n\n")
        .map(|index| index + 2)
        .unwrap_or(0);

    let para_end = text[cursor..]
        .find("\n\n")
        .map(|index| cursor + index)
        .unwrap_or(text.len());

    (para_start.min(para_end), para_end)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompter;

    fn no_prompt() -> ScriptedPrompter {
        ScriptedPrompter::dismissed()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bold and Italic
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_with_selection() {
        let buffer = EditableBuffer::with_selection("Hello world", 0, 5);
        let result = apply_format(&buffer, FormatCommand::Bold, &no_prompt());
        assert_eq!(result.text, "**Hello** world");
        assert!(result.applied);
        assert_eq!(result.cursor, 9);
    }

    #[test]
    fn test_italic_with_selection() {
        let buffer = EditableBuffer::with_selection("Hello world", 6, 11);
        let result = apply_format(&buffer, FormatCommand::Italic, &no_prompt());
        assert_eq!(result.text, "Hello *world*");
    }

    #[test]
    fn test_bold_without_selection_is_byte_identical() {
        let buffer = EditableBuffer::with_selection("Hello", 5, 5);
        let result = apply_format(&buffer, FormatCommand::Bold, &no_prompt());
        assert_eq!(result.text, "Hello");
        assert!(!result.applied);
        assert_eq!(
            result.hint,
            Some("Please select the text you want to make bold first.")
        );
    }

    #[test]
    fn test_italic_hint_differs_from_bold() {
        let buffer = EditableBuffer::new("Hello");
        let bold = apply_format(&buffer, FormatCommand::Bold, &no_prompt());
        let italic = apply_format(&buffer, FormatCommand::Italic, &no_prompt());
        assert_ne!(bold.hint, italic.hint);
    }

    #[test]
    fn test_bold_multibyte_selection() {
        let buffer = EditableBuffer::with_selection("Hei på deg", 4, 6);
        let result = apply_format(&buffer, FormatCommand::Bold, &no_prompt());
        assert!(result.text.contains("**på**"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lists
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bullet_list_conversion() {
        let buffer = EditableBuffer::with_selection("one\ntwo\nthree", 0, 13);
        let result = apply_format(&buffer, FormatCommand::BulletList, &no_prompt());
        assert_eq!(result.text, "\n- one\n- two\n- three\n");
    }

    #[test]
    fn test_numbered_list_conversion() {
        let buffer = EditableBuffer::with_selection("one\ntwo\nthree", 0, 13);
        let result = apply_format(&buffer, FormatCommand::NumberedList, &no_prompt());
        assert_eq!(result.text, "\n1. one\n2. two\n3. three\n");
    }

    #[test]
    fn test_list_discards_blank_lines() {
        let buffer = EditableBuffer::with_selection("one\n\n  \ntwo", 0, 11);
        let result = apply_format(&buffer, FormatCommand::NumberedList, &no_prompt());
        assert_eq!(result.text, "\n1. one\n2. two\n");
    }

    #[test]
    fn test_list_trims_item_lines() {
        let buffer = EditableBuffer::with_selection("  one  \n two", 0, 12);
        let result = apply_format(&buffer, FormatCommand::BulletList, &no_prompt());
        assert_eq!(result.text, "\n- one\n- two\n");
    }

    #[test]
    fn test_list_without_selection_hints() {
        let buffer = EditableBuffer::new("one\ntwo");
        let result = apply_format(&buffer, FormatCommand::BulletList, &no_prompt());
        assert_eq!(result.text, "one\ntwo");
        assert!(!result.applied);
        assert!(result.hint.unwrap().contains("bullet list"));
    }

    #[test]
    fn test_list_replaces_only_selection() {
        let buffer = EditableBuffer::with_selection("keep\na\nb\nkeep", 5, 8);
        let result = apply_format(&buffer, FormatCommand::BulletList, &no_prompt());
        assert_eq!(result.text, "keep\n\n- a\n- b\n\nkeep");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_link_with_selection() {
        let buffer = EditableBuffer::with_selection("Click here", 6, 10);
        let prompter = ScriptedPrompter::with_url("https://example.com");
        let result = apply_format(&buffer, FormatCommand::Link, &prompter);
        assert_eq!(result.text, "Click [here](https://example.com)");
        assert_eq!(result.cursor, result.text.len());
    }

    #[test]
    fn test_link_without_selection_uses_url_as_text() {
        let buffer = EditableBuffer::with_selection("Hello ", 6, 6);
        let prompter = ScriptedPrompter::with_url("https://example.com");
        let result = apply_format(&buffer, FormatCommand::Link, &prompter);
        assert_eq!(result.text, "Hello [https://example.com](https://example.com)");
    }

    #[test]
    fn test_link_prompt_dismissed_is_noop() {
        let buffer = EditableBuffer::with_selection("Click here", 6, 10);
        let result = apply_format(&buffer, FormatCommand::Link, &no_prompt());
        assert_eq!(result.text, "Click here");
        assert!(!result.applied);
    }

    #[test]
    fn test_link_scheme_prepended_on_confirm() {
        let buffer = EditableBuffer::with_selection("Click here", 6, 10);
        let prompter = ScriptedPrompter {
            url: Some("example.com/page".to_string()),
            confirm_answer: true,
        };
        let result = apply_format(&buffer, FormatCommand::Link, &prompter);
        assert_eq!(result.text, "Click [here](https://example.com/page)");
    }

    #[test]
    fn test_link_scheme_declined_cancels() {
        let buffer = EditableBuffer::with_selection("Click here", 6, 10);
        let prompter = ScriptedPrompter {
            url: Some("example.com/page".to_string()),
            confirm_answer: false,
        };
        let result = apply_format(&buffer, FormatCommand::Link, &prompter);
        assert_eq!(result.text, "Click here");
        assert!(!result.applied);
    }

    #[test]
    fn test_link_mailto_accepted_without_confirm() {
        let buffer = EditableBuffer::with_selection("Write me", 6, 8);
        let prompter = ScriptedPrompter {
            url: Some("mailto:me@example.com".to_string()),
            confirm_answer: false, // must not be consulted
        };
        let result = apply_format(&buffer, FormatCommand::Link, &prompter);
        assert_eq!(result.text, "Write [me](mailto:me@example.com)");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Alignment Toggle
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_align_wraps_selection() {
        let buffer = EditableBuffer::with_selection("Hello world", 0, 5);
        let result = apply_format(&buffer, FormatCommand::Align(Alignment::Center), &no_prompt());
        assert_eq!(result.text, "[center]Hello[/center] world");
        assert_eq!(result.selection, Some((0, 22)));
    }

    #[test]
    fn test_align_double_toggle_round_trips() {
        let mut buffer = EditableBuffer::with_selection("Hello world", 0, 5);
        buffer.apply(FormatCommand::Align(Alignment::Center), &no_prompt());
        assert_eq!(buffer.text(), "[center]Hello[/center] world");
        buffer.apply(FormatCommand::Align(Alignment::Center), &no_prompt());
        assert_eq!(buffer.text(), "Hello world");
        assert_eq!(buffer.selection(), (0, 5));
    }

    #[test]
    fn test_align_replaces_differing_wrapper() {
        let text = "[center]Hello[/center]";
        let buffer = EditableBuffer::with_selection(text, 0, text.len());
        let result = apply_format(&buffer, FormatCommand::Align(Alignment::Right), &no_prompt());
        assert_eq!(result.text, "[right]Hello[/right]");
    }

    #[test]
    fn test_align_collapsed_cursor_wraps_paragraph() {
        let buffer = EditableBuffer::with_selection("first\n\nsecond para\n\nthird", 10, 10);
        let result = apply_format(&buffer, FormatCommand::Align(Alignment::Center), &no_prompt());
        assert_eq!(
            result.text,
            "first\n\n[center]second para[/center]\n\nthird"
        );
    }

    #[test]
    fn test_align_collapsed_cursor_first_paragraph() {
        let buffer = EditableBuffer::with_selection("only one paragraph", 4, 4);
        let result = apply_format(&buffer, FormatCommand::Align(Alignment::Left), &no_prompt());
        assert_eq!(result.text, "[left]only one paragraph[/left]");
    }

    #[test]
    fn test_align_collapsed_cursor_unwraps_aligned_paragraph() {
        let buffer = EditableBuffer::with_selection("[center]middle[/center]", 10, 10);
        let result = apply_format(&buffer, FormatCommand::Align(Alignment::Center), &no_prompt());
        assert_eq!(result.text, "middle");
        assert!(!result.applied);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Command Metadata
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_labels() {
        assert_eq!(FormatCommand::Bold.label(), "Bold");
        assert_eq!(FormatCommand::Align(Alignment::Center).label(), "Align Center");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Robustness
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_no_panic_on_any_byte_offset() {
        let text = "Hei på deg 你好 🎉";
        for i in 0..=text.len() + 5 {
            for j in i..=text.len() + 5 {
                let buffer = EditableBuffer::with_selection(text, i, j);
                let _ = apply_format(&buffer, FormatCommand::Bold, &no_prompt());
                let _ = apply_format(&buffer, FormatCommand::Italic, &no_prompt());
                let _ = apply_format(&buffer, FormatCommand::NumberedList, &no_prompt());
                let _ = apply_format(
                    &buffer,
                    FormatCommand::Align(Alignment::Center),
                    &no_prompt(),
                );
            }
        }
    }
}
