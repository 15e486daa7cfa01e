//! HTML to Markdown conversion.
//!
//! Wraps `htmd` and applies a couple of cleanup passes that keep the output
//! friendly to the line-based section splitter: runs of blank lines are
//! collapsed and anchor links that point nowhere are reduced to their text.

use std::sync::LazyLock;

use regex::Regex;

use crate::{DocsplitError, Result};

#[allow(clippy::expect_used)]
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

#[allow(clippy::expect_used)]
static EMPTY_ANCHOR_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(#\)").expect("valid regex"));

/// Configuration for Markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownConfig {
    /// Strip images from output
    pub strip_images: bool,
}

/// Convert HTML content to cleaned-up Markdown.
///
/// Empty input yields an empty string.
pub fn convert_to_markdown(html: &str, config: &MarkdownConfig) -> Result<String> {
    if html.trim().is_empty() {
        return Ok(String::new());
    }

    let processed_html = if config.strip_images { strip_images(html)? } else { html.to_string() };
    let markdown = html_to_markdown(&processed_html);

    Ok(clean_markdown(&markdown))
}

/// Collapse blank-line runs, unwrap `[text](#)` links and trim.
pub fn clean_markdown(markdown: &str) -> String {
    let collapsed = EXCESS_NEWLINES.replace_all(markdown, "\n\n");
    let unwrapped = EMPTY_ANCHOR_LINK.replace_all(&collapsed, "$1");
    unwrapped.trim().to_string()
}

/// Convert HTML to Markdown using htmd crate
#[cfg(feature = "markdown")]
fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_default()
}

/// Fallback HTML to text conversion when markdown feature is disabled
#[cfg(not(feature = "markdown"))]
fn html_to_markdown(html: &str) -> String {
    let doc = scraper::Html::parse_document(html);
    doc.root_element().text().collect::<String>()
}

/// Strip all img tags from HTML
fn strip_images(html: &str) -> Result<String> {
    let mut output = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("img", |el| {
                el.remove();
                Ok(())
            })],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return Ok(html.to_string());
    }

    match rewriter.end() {
        Ok(_) => {
            if output.is_empty() {
                Ok(html.to_string())
            } else {
                String::from_utf8(output).map_err(|e| DocsplitError::HtmlParseError(e.to_string()))
            }
        }
        Err(_) => Ok(html.to_string()),
    }
}
