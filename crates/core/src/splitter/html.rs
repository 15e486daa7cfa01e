use scraper::ElementRef;

use super::Section;
use crate::Result;
use crate::convert::{MarkdownConfig, convert_to_markdown};
use crate::parse::Document;

/// Title used when the content has no `<h1>` at all.
pub const UNTITLED_PAGE_TITLE: &str = "Home";

/// Options for splitting extracted HTML at `<h1>` elements.
#[derive(Debug, Clone)]
pub struct HtmlSplitConfig {
    /// Sections whose Markdown is this short or shorter are dropped.
    pub min_section_chars: usize,
}

impl Default for HtmlSplitConfig {
    fn default() -> Self {
        Self { min_section_chars: 50 }
    }
}

/// Split extracted HTML into Markdown sections, one per `<h1>`.
///
/// A section is the `<h1>` plus the siblings that follow it up to the next
/// `<h1>`. Content without any `<h1>` becomes a single `Home` section.
/// Sections whose Markdown is too short to be useful are left out, so an
/// empty result tells the caller to fall back to [`super::split_markdown`].
pub fn split_html_sections(
    content_html: &str, config: &HtmlSplitConfig, markdown: &MarkdownConfig,
) -> Result<Vec<Section>> {
    let doc = Document::parse_fragment(content_html)?;
    let headings = doc.select("h1")?;

    if headings.is_empty() {
        let body = convert_to_markdown(content_html, markdown)?;
        if is_substantial(&body, config) {
            return Ok(vec![Section::new(UNTITLED_PAGE_TITLE, body)]);
        }
        return Ok(Vec::new());
    }

    let mut sections = Vec::new();
    for heading in &headings {
        let heading = heading.element_ref();
        let title = heading_text(heading);
        let body = convert_to_markdown(&section_html(heading), markdown)?;

        if is_substantial(&body, config) {
            sections.push(Section::new(title, body));
        } else {
            tracing::debug!(title = %title, "Dropping near-empty HTML section");
        }
    }

    tracing::debug!(headings = headings.len(), sections = sections.len(), "Split HTML at <h1>");
    Ok(sections)
}

fn is_substantial(markdown: &str, config: &HtmlSplitConfig) -> bool {
    markdown.trim().chars().count() > config.min_section_chars
}

/// Text of the heading with whitespace runs collapsed.
fn heading_text(heading: ElementRef<'_>) -> String {
    let text: String = heading.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Outer HTML of `heading` followed by its siblings up to the next `<h1>`.
fn section_html(heading: ElementRef<'_>) -> String {
    let mut html = heading.html();

    for sibling in heading.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            if element.value().name() == "h1" {
                break;
            }
            html.push_str(&element.html());
        } else if let Some(text) = sibling.value().as_text()
            && !text.trim().is_empty()
        {
            html.push_str(&escape_text(text));
        }
    }

    html
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(all(test, feature = "markdown"))]
mod tests {
    use super::*;

    const FILLER: &str = "This paragraph has enough words in it to clear the minimum section length.";

    fn split(html: &str) -> Vec<Section> {
        split_html_sections(html, &HtmlSplitConfig::default(), &MarkdownConfig::default()).unwrap()
    }

    #[test]
    fn test_splits_at_each_h1() {
        let html = format!(
            "<main><h1>Authentication</h1><p>{FILLER}</p><h2>OAuth</h2><p>{FILLER}</p>\
             <h1>Database</h1><p>{FILLER}</p></main>"
        );

        let sections = split(&html);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Authentication");
        assert!(sections[0].body.starts_with("# Authentication"));
        assert!(sections[0].body.contains("OAuth"));
        assert!(!sections[0].body.contains("Database"));
        assert_eq!(sections[1].title, "Database");
    }

    #[test]
    fn test_short_sections_are_dropped() {
        let html = format!("<div><h1>Empty</h1><h1>Full</h1><p>{FILLER}</p></div>");
        let sections = split(&html);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Full");
    }

    #[test]
    fn test_no_headings_becomes_home() {
        let html = format!("<div><p>{FILLER}</p></div>");
        let sections = split(&html);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Home");
    }

    #[test]
    fn test_no_headings_and_little_text_yields_nothing() {
        assert!(split("<div><p>tiny</p></div>").is_empty());
    }

    #[test]
    fn test_heading_text_is_trimmed() {
        let html = format!("<div><h1>\n  Rate <span>Limiting</span>\n</h1><p>{FILLER}</p></div>");
        let sections = split(&html);
        assert_eq!(sections[0].title, "Rate Limiting");
    }

    #[test]
    fn test_loose_text_between_elements_is_kept() {
        let html = format!("<div><h1>Images</h1>Loose text with a &lt;tag&gt; and {FILLER}</div>");
        let sections = split(&html);
        assert_eq!(sections.len(), 1);
        assert!(sections[0].body.contains("Loose text"));
        assert!(sections[0].body.contains("<tag>") || sections[0].body.contains("\\<tag\\>"));
    }
}
