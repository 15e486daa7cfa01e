use crate::parse::{Document, Element};

/// Ordered CSS selectors tried when looking for the documentation body.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "div.content",
    "div.main-content",
    "div.documentation",
    "div#content",
    "div#main",
    r#"div[role="main"]"#,
];

/// Page chrome that disqualifies a fallback `div`.
const CHROME_TAGS: &[&str] = &["nav", "header", "footer"];

/// Removed from a matched content region.
const REGION_STRIP_TAGS: &str = "nav, script, style, header, footer";

/// Removed from `<body>` when no content region was found.
const BODY_STRIP_TAGS: &str = "nav, header, footer, script, style";

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// CSS selectors tried in order; the first match wins
    pub selectors: Vec<String>,
    /// A fallback `div` must hold more non-whitespace characters than this
    pub min_fallback_chars: usize,
    /// Remove buttons and asides whose class mentions nav or sidebar
    pub strip_navigation_widgets: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            min_fallback_chars: 500,
            strip_navigation_widgets: true,
        }
    }
}

/// Locate the main documentation content and return it as cleaned HTML.
///
/// This is a heuristic: it tries well-known content containers, then the
/// first substantial `div` outside of page chrome, and finally the whole
/// `<body>` with navigation removed. `None` means the document had nothing
/// to offer, which callers treat as an ordinary outcome.
pub fn extract_main_content(doc: &Document, config: &ExtractConfig) -> Option<String> {
    if let Some(region) = find_content_region(doc, config) {
        tracing::debug!(tag = %region.tag_name(), "Found content region");
        return Some(clean_region(&region.outer_html(), config.strip_navigation_widgets));
    }

    let body = doc.first("body").ok().flatten()?;
    tracing::debug!("No content region found, falling back to <body>");
    Some(remove_elements(&body.outer_html(), BODY_STRIP_TAGS, false))
}

/// Find the element holding the documentation body, if any.
pub fn find_content_region<'a>(doc: &'a Document, config: &ExtractConfig) -> Option<Element<'a>> {
    for selector in &config.selectors {
        match doc.first(selector) {
            Ok(Some(element)) => return Some(element),
            Ok(None) => {}
            Err(e) => tracing::warn!(selector = %selector, error = %e, "Skipping content selector"),
        }
    }

    doc.select("div").ok()?.into_iter().find(|div| {
        !div.has_ancestor(CHROME_TAGS) && div.dense_text_len() > config.min_fallback_chars
    })
}

/// Strip navigation, scripts, and styling from a content region.
pub fn clean_region(html: &str, strip_navigation_widgets: bool) -> String {
    remove_elements(html, REGION_STRIP_TAGS, strip_navigation_widgets)
}

fn is_navigation_class(class: &str) -> bool {
    let class = class.to_lowercase();
    class.contains("nav") || class.contains("sidebar")
}

/// Remove every element matching `tags`; leaves the input untouched if
/// the rewriter rejects it.
fn remove_elements(html: &str, tags: &'static str, strip_navigation_widgets: bool) -> String {
    let mut output = Vec::new();

    let mut handlers = vec![lol_html::element!(tags, |el| {
        el.remove();
        Ok(())
    })];
    if strip_navigation_widgets {
        handlers.push(lol_html::element!("button[class], aside[class]", |el| {
            if let Some(class) = el.get_attribute("class")
                && is_navigation_class(&class)
            {
                el.remove();
            }
            Ok(())
        }));
    }

    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return html.to_string();
    }
    if rewriter.end().is_err() {
        return html.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| html.to_string())
}
