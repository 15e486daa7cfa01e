//! Documentation link discovery.
//!
//! Finds the pages of a documentation site that a landing page links to and
//! maps their URLs onto relative Markdown paths.

use std::collections::HashSet;
use std::path::PathBuf;

use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

/// A link to another page of the same documentation site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocLink {
    /// Absolute URL without fragment or trailing slash
    pub url: String,
    /// Link text, or the last path segment when the link has none
    pub title: String,
}

/// Collect links that stay under `base`'s origin and `prefix` path.
///
/// Fragment-only links and `mailto:` links are skipped, as are relative
/// links outside of `prefix`. URLs are de-duplicated in document order.
///
/// ```rust
/// use docsplit_core::links::extract_doc_links;
/// use url::Url;
///
/// let base = Url::parse("https://www.example.com/developers").unwrap();
/// let html = r#"<a href="/developers/database#search">Search</a><a href="/blog">Blog</a>"#;
/// let links = extract_doc_links(html, &base, "/developers");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].url, "https://www.example.com/developers/database");
/// ```
pub fn extract_doc_links(html: &str, base: &Url, prefix: &str) -> Vec<DocLink> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let root = match base.join(prefix) {
        Ok(root) => root.as_str().trim_end_matches('/').to_string(),
        Err(e) => {
            tracing::warn!(prefix, error = %e, "Invalid link prefix");
            return Vec::new();
        }
    };

    let mut links = Vec::new();
    let mut seen_urls = HashSet::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(url) = resolve_doc_url(href, base, prefix, &root) else {
            continue;
        };

        if !seen_urls.insert(url.clone()) {
            continue;
        }

        let text = element.text().collect::<String>();
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let title = if text.is_empty() { fallback_title(&url) } else { text };

        links.push(DocLink { url, title });
    }

    links
}

fn resolve_doc_url(href: &str, base: &Url, prefix: &str, root: &str) -> Option<String> {
    if href.starts_with('#') || href.starts_with("mailto:") {
        return None;
    }

    let mut url = if href.starts_with(prefix) {
        base.join(href).ok()?
    } else if href.starts_with("http://") || href.starts_with("https://") {
        Url::parse(href).ok()?
    } else {
        return None;
    };

    url.set_fragment(None);
    let normalized = url.as_str().trim_end_matches('/').to_string();

    let under_root = normalized == root || normalized.starts_with(&format!("{root}/"));
    under_root.then_some(normalized)
}

fn fallback_title(url: &str) -> String {
    match url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => "Untitled".to_string(),
    }
}

/// Map a documentation URL onto a relative Markdown path.
///
/// The `prefix` is removed from the URL path; the landing page becomes
/// `index.md` and every other page keeps its directory structure with
/// `.md` appended to the last segment.
pub fn url_to_relative_path(url: &Url, prefix: &str) -> PathBuf {
    let path = url.path();
    let path = path.strip_prefix(prefix).unwrap_or(path);
    let path = path.trim_matches('/');

    if path.is_empty() {
        return PathBuf::from("index.md");
    }

    let mut relative: PathBuf = path.split('/').collect();
    if relative.extension().is_none_or(|ext| ext != "md") {
        let file_name = format!("{}.md", relative.file_name().map(|n| n.to_string_lossy()).unwrap_or_default());
        relative.set_file_name(file_name);
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.discogs.com/developers").unwrap()
    }

    #[test]
    fn test_extract_doc_links() {
        let html = r##"
            <nav>
                <a href="#authentication">Authentication</a>
                <a href="/developers/database">Database</a>
                <a href="https://www.discogs.com/developers/marketplace/">Marketplace</a>
                <a href="mailto:api@discogs.com">Mail</a>
                <a href="/blog">Blog</a>
                <a href="https://www.discogs.com/developers-legacy">Legacy</a>
                <a href="https://github.com/discogs">GitHub</a>
                <a href="relative/page">Relative</a>
            </nav>
        "##;

        let links = extract_doc_links(html, &base(), "/developers");
        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://www.discogs.com/developers/database",
                "https://www.discogs.com/developers/marketplace",
            ]
        );
        assert_eq!(links[0].title, "Database");
    }

    #[test]
    fn test_extract_doc_links_deduplication() {
        let html = r#"
            <a href="/developers/database#search">Search</a>
            <a href="/developers/database/">Database</a>
        "#;

        let links = extract_doc_links(html, &base(), "/developers");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Search");
    }

    #[test]
    fn test_extract_doc_links_fallback_title() {
        let html = r#"<a href="/developers/inventory"><img src="icon.png"></a>"#;
        let links = extract_doc_links(html, &base(), "/developers");
        assert_eq!(links[0].title, "inventory");
    }

    #[test]
    fn test_url_to_relative_path() {
        let cases = [
            ("https://www.discogs.com/developers", "index.md"),
            ("https://www.discogs.com/developers/", "index.md"),
            ("https://www.discogs.com/developers/database", "database.md"),
            ("https://www.discogs.com/developers/user/collection", "user/collection.md"),
            ("https://www.discogs.com/developers/notes.md", "notes.md"),
        ];

        for (url, expected) in cases {
            let url = Url::parse(url).unwrap();
            assert_eq!(url_to_relative_path(&url, "/developers"), PathBuf::from(expected), "{url}");
        }
    }
}
