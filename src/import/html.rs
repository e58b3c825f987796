//! Document HTML to Markup Conversion
//!
//! The bulk authoring path: an uploaded word-processor document is
//! turned into HTML by an external conversion step, and this module
//! maps that HTML onto the markup dialect. The tree is walked
//! recursively, children first, so a parent formats its children's
//! already-converted markup. Unrecognized elements contribute their
//! children unchanged; nothing here can fail.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, Attribute};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::RefCell;

use crate::markup::Alignment;

/// Three or more newlines left behind by block conversions.
static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

// ─────────────────────────────────────────────────────────────────────────────
// Conversion Entry Point
// ─────────────────────────────────────────────────────────────────────────────

/// Convert document HTML into markup.
///
/// Total function: any input yields markup, with unsupported structure
/// degrading to its text content.
pub fn markup_from_html(html: &str) -> String {
    let raw = raw_markup(html);
    EXCESS_NEWLINES
        .replace_all(&raw, "\n\n")
        .trim()
        .to_string()
}

/// The conversion before final whitespace normalization.
fn raw_markup(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    // parse_document always synthesizes <html><body>; the fallback to
    // the document node keeps this total regardless.
    let root = find_body(&dom.document).unwrap_or_else(|| dom.document.clone());
    children_markup(&root)
}

// ─────────────────────────────────────────────────────────────────────────────
// DOM Walk
// ─────────────────────────────────────────────────────────────────────────────

fn find_body(node: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &node.data {
        if name.local.as_ref() == "body" {
            return Some(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(body) = find_body(child) {
            return Some(body);
        }
    }
    None
}

fn children_markup(node: &Handle) -> String {
    node.children.borrow().iter().map(node_to_markup).collect()
}

fn node_to_markup(node: &Handle) -> String {
    match &node.data {
        NodeData::Text { contents } => contents.borrow().to_string(),
        NodeData::Element { name, attrs, .. } => {
            let children = children_markup(node);
            match name.local.as_ref() {
                "h1" => format!("\n\n# {}\n\n", children.trim()),
                "h2" => format!("\n\n## {}\n\n", children.trim()),
                "h3" => format!("\n\n### {}\n\n", children.trim()),
                "h4" => format!("\n\n#### {}\n\n", children.trim()),
                "h5" => format!("\n\n##### {}\n\n", children.trim()),
                "h6" => format!("\n\n###### {}\n\n", children.trim()),
                "p" => format!("{}\n\n", children.trim()),
                "br" => "\n".to_string(),
                "strong" | "b" => format!("**{}**", children.trim()),
                "em" | "i" => format!("*{}*", children.trim()),
                "ul" => format_list(node, false),
                "ol" => format_list(node, true),
                // A stray list item outside ul/ol contributes its content.
                "li" => children,
                "a" => format_anchor(attrs, &children),
                "div" => format_container(attrs, &children),
                _ => children,
            }
        }
        // Comments, doctypes, and processing instructions are dropped.
        _ => String::new(),
    }
}

/// Emit one marker line per `<li>` descendant, joined by single
/// newlines, with blank lines setting the block off from its
/// surroundings.
fn format_list(node: &Handle, ordered: bool) -> String {
    let mut items = Vec::new();
    collect_list_items(node, &mut items);

    let lines: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(index, li)| {
            let content = children_markup(li);
            let content = content.trim();
            if ordered {
                format!("{}. {}", index + 1, content)
            } else {
                format!("- {}", content)
            }
        })
        .collect();

    format!("\n{}\n\n", lines.join("\n"))
}

fn collect_list_items(node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if name.local.as_ref() == "li" {
                out.push(child.clone());
            }
        }
        collect_list_items(child, out);
    }
}

fn format_anchor(attrs: &RefCell<Vec<Attribute>>, children: &str) -> String {
    let href = attr_value(attrs, "href").unwrap_or_default();
    let text = children.trim();
    let text = if text.is_empty() { href.as_str() } else { text };
    format!("[{}]({})", text, href)
}

/// A `div` carrying a text-alignment style becomes an alignment region;
/// any other `div` passes its children through.
fn format_container(attrs: &RefCell<Vec<Attribute>>, children: &str) -> String {
    let style = attr_value(attrs, "style").unwrap_or_default();
    match Alignment::from_style(&style) {
        Some(alignment) => format!(
            "\n{}{}{}\n\n",
            alignment.open_tag(),
            children.trim(),
            alignment.close_tag()
        ),
        None => children.to_string(),
    }
}

fn attr_value(attrs: &RefCell<Vec<Attribute>>, name: &str) -> Option<String> {
    attrs
        .borrow()
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
