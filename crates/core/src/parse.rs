//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types, thin wrappers
//! over `scraper` used by the content extractor and the HTML section splitter.
//!
//! # Example
//!
//! ```rust
//! use docsplit_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <main><h1>Authentication</h1></main>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let main = doc.first("main").unwrap().unwrap();
//! assert_eq!(main.text().trim(), "Authentication");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{DocsplitError, Result};

/// Represents a parsed HTML document or fragment.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Parses an HTML fragment, such as an extracted content region.
    pub fn parse_fragment(html: &str) -> Result<Self> {
        let html = Html::parse_fragment(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`DocsplitError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use docsplit_core::parse::Document;
    ///
    /// let html = r#"<h1>First</h1><h2>Sub</h2><h1>Second</h1>"#;
    /// let doc = Document::parse(html).unwrap();
    /// assert_eq!(doc.select("h1").unwrap().len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector, in document order.
    pub fn first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| DocsplitError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the outer HTML of this element, including its own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Counts text characters with all whitespace removed.
    ///
    /// Used to judge whether a container holds substantial content.
    pub fn dense_text_len(&self) -> usize {
        self.element
            .text()
            .flat_map(str::chars)
            .filter(|c| !c.is_whitespace())
            .count()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Returns true if any ancestor element has one of the given tag names.
    pub fn has_ancestor(&self, tags: &[&str]) -> bool {
        self.element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| tags.contains(&ancestor.value().name()))
    }

    /// Gets the underlying `scraper::ElementRef`.
    pub fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }
}
