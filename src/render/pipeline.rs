//! Markup-to-HTML Render Pipeline
//!
//! Transforms the constrained markup dialect into an HTML fragment via a
//! fixed sequence of textual passes. The behavior of the dialect is
//! defined by the pass order, not by a grammar: alignment regions are
//! resolved before anything can split them, links before emphasis so
//! literal `*` inside link text survives, bold before italic so a
//! single-`*` match cannot swallow half of a `**` pair, and lists are
//! fully assembled before paragraph segmentation runs.
//!
//! Rendering is total. Malformed or partial markup is never an error;
//! unmatched tokens simply pass through as literal text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::markup::{is_bullet_line, Alignment, HeadingLevel, ALIGNMENTS};

/// Internal marker distinguishing ordered from bullet items between the
/// item-conversion and list-wrapping passes. Stripped before output.
const ORDERED_MARK: &str = "<!--ol-->";

// ─────────────────────────────────────────────────────────────────────────────
// Compiled Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// One `(alignment, pattern)` pair per alignment, in scan order.
/// Non-greedy across newlines; surrounding whitespace inside the region
/// is trimmed away by the `\s*` arms.
static ALIGN_PATTERNS: Lazy<Vec<(Alignment, Regex)>> = Lazy::new(|| {
    ALIGNMENTS
        .iter()
        .map(|a| {
            let re = Regex::new(&format!(r"(?s)\[{0}\]\s*(.*?)\s*\[/{0}\]", a.name()))
                .expect("alignment pattern is valid");
            (*a, re)
        })
        .collect()
});

/// Heading patterns, deepest level first so `###` is never consumed as `#`.
static HEADING_PATTERNS: Lazy<Vec<(HeadingLevel, Regex)>> = Lazy::new(|| {
    [HeadingLevel::H3, HeadingLevel::H2, HeadingLevel::H1]
        .iter()
        .map(|level| {
            let re = Regex::new(&format!(r"(?m)^{} (.+)$", level.marker()))
                .expect("heading pattern is valid");
            (*level, re)
        })
        .collect()
});

static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+?)\*\*").unwrap());

/// Two ordered-list lines with nothing but blank lines between them.
static ORDERED_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^\d+\. .+)\s*\n\s*\n+\s*(^\d+\. .+)").unwrap());

/// Two bullet lines with nothing but blank lines between them.
static BULLET_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^[-•*] .+)\s*\n\s*\n+\s*(^[-•*] .+)").unwrap());

static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\d+)\. (.+)$").unwrap());

static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[-•*] (.+)$").unwrap());

/// A maximal run of list items separated by single newlines.
static LIST_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)((?:<!--ol-->)?<li>.*?</li>(?:\s*\n\s*(?:<!--ol-->)?<li>.*?</li>)*)").unwrap()
});

static ITEM_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"</li>\s*\n+\s*<li>").unwrap());

/// A digit-dot list marker anywhere in the line; such lines are left
/// alone by the per-line italic pass.
static DIGIT_DOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.").unwrap());

/// Italic run: no inner `*` or newline; a bare `<` is rejected but a
/// complete HTML tag is allowed through, so emphasis wrapped around an
/// already-rendered bold span still resolves.
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*((?:[^*\n<]|<[^>]*>)+?)\*").unwrap());

/// A fully-wrapped list container, masked during paragraph segmentation.
static LIST_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<(?:ul|ol)>.*?</(?:ul|ol)>").unwrap());

/// One or more blank lines: the paragraph separator.
static PARAGRAPH_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// A paragraph candidate that is already block-level output.
static BLOCK_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<(h[1-6]|ul|ol|div)").unwrap());

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// Render markup to an HTML fragment.
///
/// Total function: any input produces output, and tokens that fail to
/// match degrade to literal text.
pub fn render(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    let text = apply_alignment(markup.to_string());
    let text = apply_headings(text);
    let text = apply_links(text);
    let text = apply_bold(text);
    let text = collapse_list_gaps(text);
    let text = convert_list_items(text);
    let text = wrap_list_runs(text);
    let text = apply_italic(text);
    wrap_paragraphs(text)
}

/// Pass 1: `[left]`/`[center]`/`[right]` regions become styled divs.
/// Runs before every structural pass so a region is never split by
/// paragraph segmentation.
fn apply_alignment(text: String) -> String {
    let mut text = text;
    for (alignment, re) in ALIGN_PATTERNS.iter() {
        let replacement = format!("<div style=\"{}\">${{1}}</div>", alignment.css());
        text = re.replace_all(&text, replacement.as_str()).into_owned();
    }
    text
}

/// Pass 2: `#`-marked lines become heading elements, deepest first.
fn apply_headings(text: String) -> String {
    let mut text = text;
    for (level, re) in HEADING_PATTERNS.iter() {
        let tag = level.tag_name();
        let replacement = format!("<{0}>${{1}}</{0}>", tag);
        text = re.replace_all(&text, replacement.as_str()).into_owned();
    }
    text
}

/// Pass 3: `[text](url)` becomes an anchor. Must precede the emphasis
/// passes so `*` or `#` inside link text or URLs is not reinterpreted.
fn apply_links(text: String) -> String {
    LINK.replace_all(
        &text,
        "<a href=\"${2}\" target=\"_blank\" rel=\"noopener noreferrer\">${1}</a>",
    )
    .into_owned()
}

/// Pass 4: `**text**` becomes a bold span. Must precede italic.
fn apply_bold(text: String) -> String {
    BOLD.replace_all(&text, "<strong>${1}</strong>").into_owned()
}

/// Pass 5: repeatedly remove blank lines sitting between two adjacent
/// list lines of the same kind, to a fixed point. A single replacement
/// sweep can expose new adjacent pairs, hence the loop; each iteration
/// strictly reduces the number of blank-line separators, so it halts.
fn collapse_list_gaps(text: String) -> String {
    let text = collapse_to_fixed_point(text, &ORDERED_GAP);
    collapse_to_fixed_point(text, &BULLET_GAP)
}

fn collapse_to_fixed_point(mut text: String, gap: &Regex) -> String {
    loop {
        let next = gap.replace_all(&text, "${1}\n${2}").into_owned();
        if next == text {
            return text;
        }
        text = next;
    }
}

/// Pass 6: marker lines become `<li>` elements. Ordered items keep an
/// internal mark so the wrapping pass can pick the right container.
fn convert_list_items(text: String) -> String {
    let text = ORDERED_ITEM
        .replace_all(&text, &format!("{ORDERED_MARK}<li>${{2}}</li>"))
        .into_owned();
    BULLET_ITEM
        .replace_all(&text, |caps: &Captures| {
            // A bullet line that somehow already holds an item is left alone.
            if caps[0].contains("<li>") {
                caps[0].to_string()
            } else {
                format!("<li>{}</li>", &caps[1])
            }
        })
        .into_owned()
}

/// Pass 7: maximal runs of consecutive items (single-newline separated)
/// become one list container. The container kind follows the run's first
/// item; whitespace between items is stripped so nothing blank renders.
fn wrap_list_runs(text: String) -> String {
    LIST_RUN
        .replace_all(&text, |caps: &Captures| {
            let run = &caps[1];
            if run.contains("<ol>") || run.contains("<ul>") {
                return run.to_string();
            }
            let ordered = run.starts_with(ORDERED_MARK);
            let items = run.replace(ORDERED_MARK, "");
            let items = ITEM_GAP.replace_all(&items, "</li><li>");
            let items = items.trim();
            if ordered {
                format!("<ol>{}</ol>", items)
            } else {
                format!("<ul>{}</ul>", items)
            }
        })
        .into_owned()
}

/// Pass 8: per-line italic. Lines that are already block-level output
/// (or still carry a list marker) are skipped wholesale; by this point
/// list items live inside container lines starting with `<`, so
/// emphasis does not resolve inside them.
fn apply_italic(text: String) -> String {
    text.split('\n')
        .map(|line| {
            let trimmed = line.trim();
            let skip = trimmed.starts_with('<')
                || trimmed.starts_with('#')
                || is_bullet_line(trimmed)
                || DIGIT_DOT.is_match(trimmed);
            if skip {
                line.to_string()
            } else {
                ITALIC.replace_all(line, "<em>${1}</em>").into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Passes 9 and 10: paragraph segmentation and wrapping.
///
/// Completed list containers are masked behind opaque tokens first so a
/// blank line inside surrounding prose cannot fracture them, then the
/// remaining text splits on blank lines, the tokens are restored, and
/// each candidate is wrapped (or passed through if already block-level).
fn wrap_paragraphs(text: String) -> String {
    let mut list_blocks: Vec<String> = Vec::new();
    let masked = LIST_BLOCK
        .replace_all(&text, |caps: &Captures| {
            let token = format!("__LIST_BLOCK_{}__", list_blocks.len());
            list_blocks.push(caps[0].to_string());
            token
        })
        .into_owned();

    let mut rendered: Vec<String> = Vec::new();
    for candidate in PARAGRAPH_GAP.split(&masked) {
        let mut para = candidate.to_string();
        for (index, block) in list_blocks.iter().enumerate() {
            para = para.replace(&format!("__LIST_BLOCK_{}__", index), block);
        }
        let para = para.trim();
        if para.is_empty() {
            continue;
        }

        if BLOCK_START.is_match(para) {
            // Alignment divs may hold multi-line free text; keep the
            // line structure as explicit breaks.
            if para.contains("style=\"text-align:") {
                rendered.push(para.replace('\n', "<br>"));
            } else {
                rendered.push(para.to_string());
            }
        } else {
            rendered.push(format!(
                "<p style=\"text-align: left;\">{}</p>",
                para.replace('\n', "<br>")
            ));
        }
    }

    rendered.join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
