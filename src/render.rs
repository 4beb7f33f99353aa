//! Preview renderer
//!
//! Turns (content, file type) into the markup written to the preview
//! surface. Rendering is total: parse failures become inline preformatted
//! error text instead of propagating. The surface is fully replaced on each
//! call, never patched.

use pulldown_cmark::{html, Options, Parser};

use crate::document::FileType;

/// Render document content as preview markup for the declared file type.
///
/// - html: passed through verbatim
/// - css: wrapped in a `<style>` block
/// - javascript: wrapped in a `<script>` block (runs in the preview surface)
/// - markdown: converted to HTML
/// - json: strict parse, pretty-printed on success, inline error on failure
/// - plain: escaped inside a `<pre>` block
pub fn render(content: &str, file_type: FileType) -> String {
    match file_type {
        FileType::Html => content.to_string(),
        FileType::Css => format!("<style>\n{}\n</style>", content),
        FileType::Javascript => format!("<script>\n{}\n</script>", content),
        FileType::Markdown => render_markdown(content),
        FileType::Json => render_json(content),
        FileType::Plain => format!("<pre>{}</pre>", escape_html(content)),
    }
}

fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(content, options);

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Strict JSON parse; valid input round-trips through a 2-space
/// pretty-print, invalid input renders the parser's error text inline.
fn render_json(content: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) => {
            // to_string_pretty uses 2-space indentation
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|_| value.to_string());
            format!("<pre>{}</pre>", escape_html(&pretty))
        }
        Err(err) => format!("<pre>Invalid JSON: {}</pre>", escape_html(&err.to_string())),
    }
}

/// Escape text for embedding in markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
