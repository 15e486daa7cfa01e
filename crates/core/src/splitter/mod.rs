//! Splitting documentation into per-section documents.
//!
//! [`split_markdown`] walks Markdown line by line and starts a new
//! [`Section`] at every top-level `# ` heading. [`split_html_sections`] does
//! the same on extracted HTML by cutting at `<h1>` elements before
//! conversion. [`sanitize_title`] turns section titles into file names.

pub mod filename;
pub mod html;
pub mod markdown;

use serde::Serialize;

pub use filename::{FALLBACK_FILE_STEM, sanitize_title, section_file_name};
pub use html::{HtmlSplitConfig, split_html_sections};
pub use markdown::{SplitConfig, heading_title, is_top_level_heading, split_lines, split_markdown};

/// A titled run of content that begins at its own heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text as written, without the marker.
    pub title: String,
    /// Full section text, heading line included.
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into() }
    }

    /// File name this section is written to, e.g. `rate-limiting.md`.
    pub fn file_name(&self) -> String {
        section_file_name(&self.title)
    }
}
