//! Standalone HTML Document Export
//!
//! Wraps a rendered fragment in a complete HTML page with inlined CSS,
//! for previewing authored content outside the site. The page styles
//! exactly the vocabulary the renderer emits: headings, paragraphs,
//! line breaks, lists, alignment divs, and anchors.

use log::info;
use std::path::Path;

use crate::error::{Error, Result};
use crate::render::{auto_link, render};

// ─────────────────────────────────────────────────────────────────────────────
// Render Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for document export.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Run the bare-URL auto-linking pass over the rendered fragment.
    pub auto_link: bool,
    /// Document title; falls back to a generic one.
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            auto_link: true,
            title: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Base CSS for the rendered dialect (layout, typography).
const BASE_CSS: &str = r#"
*, *::before, *::after {
    box-sizing: border-box;
}

body {
    margin: 0;
    padding: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
    font-size: 16px;
    line-height: 1.6;
    color: #2c3e50;
}

.content-body {
    max-width: 800px;
    margin: 0 auto;
    padding: 32px 24px;
}

.content-body h1,
.content-body h2,
.content-body h3 {
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}

.content-body h1 { font-size: 2em; }
.content-body h2 { font-size: 1.5em; }
.content-body h3 { font-size: 1.25em; }

.content-body p {
    margin-top: 0;
    margin-bottom: 16px;
}

.content-body a {
    color: #2980b9;
    text-decoration: none;
}

.content-body a:hover {
    text-decoration: underline;
}

.content-body ul,
.content-body ol {
    margin-top: 0;
    margin-bottom: 16px;
    padding-left: 2em;
}

.content-body li {
    margin-bottom: 4px;
}

.content-body div {
    margin-bottom: 16px;
}

.content-body strong {
    font-weight: 600;
}

.content-body em {
    font-style: italic;
}
"#;

/// Generate a complete HTML document from markup.
///
/// The body is `render(markup)`, post-processed by [`auto_link`] when
/// the options ask for it.
pub fn render_document(markup: &str, options: &RenderOptions) -> String {
    let mut body = render(markup);
    if options.auto_link {
        body = auto_link(&body);
    }

    let title = options.title.as_deref().unwrap_or("Content Preview");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="sitemark">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="content-body">
{body}
    </article>
</body>
</html>"#,
        title = html_escape(title),
        css = BASE_CSS,
        body = body,
    )
}

/// Render a markup file to a standalone HTML file.
pub fn export_html_file(source_path: &Path, output_path: &Path, options: &RenderOptions) -> Result<()> {
    let markup = std::fs::read_to_string(source_path).map_err(|source| Error::FileRead {
        path: source_path.to_path_buf(),
        source,
    })?;

    // Use the file stem as the title unless one was configured.
    let mut options = options.clone();
    if options.title.is_none() {
        options.title = source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
    }

    let html = render_document(&markup, &options);

    std::fs::write(output_path, html).map_err(|source| Error::FileWrite {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!(
        "Exported {} to {}",
        source_path.display(),
        output_path.display()
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// HTML-escape a string for use in document metadata.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_document_structure() {
        let html = render_document("# Test\n\nParagraph text.", &RenderOptions::default());
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Content Preview</title>"));
        assert!(html.contains("<article class=\"content-body\">"));
        assert!(html.contains("<h1>Test</h1>"));
        assert!(html.contains("Paragraph text."));
    }

    #[test]
    fn test_render_document_custom_title() {
        let options = RenderOptions {
            title: Some("About & Contact".to_string()),
            ..Default::default()
        };
        let html = render_document("body", &options);
        assert!(html.contains("<title>About &amp; Contact</title>"));
    }

    #[test]
    fn test_auto_link_applied_by_default() {
        let html = render_document("Visit https://example.com today", &RenderOptions::default());
        assert!(html.contains("<a href=\"https://example.com\""));
    }

    #[test]
    fn test_auto_link_disabled() {
        let options = RenderOptions {
            auto_link: false,
            ..Default::default()
        };
        let html = render_document("Visit https://example.com today", &options);
        assert!(!html.contains("<a href="));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("plain"), "plain");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_export_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("post.md");
        let output = dir.path().join("post.html");
        std::fs::write(&source, "## Hello\n\nWorld").unwrap();

        export_html_file(&source, &output, &RenderOptions::default()).unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("<h2>Hello</h2>"));
        // title falls back to the file stem
        assert!(html.contains("<title>post</title>"));
    }

    #[test]
    fn test_export_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.md");
        let output = dir.path().join("out.html");
        let err = export_html_file(&missing, &output, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
