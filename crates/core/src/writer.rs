//! Persisting sections to disk.
//!
//! Every section is written to `<output_dir>/<sanitized title>.md`. A
//! section that fails to write is recorded in the [`WriteReport`] and the
//! remaining sections are still written.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::Result;
use crate::splitter::Section;

/// File name of the complete, unsplit document.
pub const INDEX_FILE_NAME: &str = "index.md";

/// Where a section titled like the index goes when `index.md` is kept.
pub const INDEX_SECTION_FILE_NAME: &str = "index-section.md";

/// Where and how sections are written.
#[derive(Debug, Clone)]
pub struct WriteConfig {
    /// Directory receiving the Markdown files; created if missing.
    pub output_dir: PathBuf,
    /// When set, each file gets a `# title` / `Source: url` header.
    pub source_url: Option<String>,
    /// `index.md` holds the full document and must not be replaced by a section.
    pub keep_index: bool,
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("docs"), source_url: None, keep_index: false }
    }
}

/// A section that could not be written.
#[derive(Debug, Clone, Serialize)]
pub struct WriteFailure {
    pub title: String,
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of writing a batch of sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteReport {
    /// Paths written, in section order.
    pub written: Vec<PathBuf>,
    pub failed: Vec<WriteFailure>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// File contents for a section.
///
/// Without a source URL this is the body as-is; with one, the body is
/// preceded by a title heading and a `Source:` attribution line.
pub fn render_section(section: &Section, source_url: Option<&str>) -> String {
    match source_url {
        Some(url) => format!("# {}\n\nSource: {}\n\n{}", section.title, url, section.body),
        None => section.body.clone(),
    }
}

/// Write each section to its own file under `config.output_dir`.
///
/// Only failing to create the output directory is an error. Two sections
/// mapping to the same file name are logged and the later one wins. With
/// `keep_index` set, a section mapping to `index.md` is saved as
/// `index-section.md` instead.
pub fn write_sections(sections: &[Section], config: &WriteConfig) -> Result<WriteReport> {
    fs::create_dir_all(&config.output_dir)?;

    let mut report = WriteReport::default();
    let mut seen = HashSet::new();

    for section in sections {
        let mut path = config.output_dir.join(section.file_name());

        if config.keep_index && section.file_name() == INDEX_FILE_NAME {
            tracing::warn!(
                title = %section.title,
                "Section would replace {INDEX_FILE_NAME}, saving as {INDEX_SECTION_FILE_NAME}"
            );
            path = config.output_dir.join(INDEX_SECTION_FILE_NAME);
        }

        if !seen.insert(path.clone()) {
            tracing::warn!(title = %section.title, path = %path.display(), "Duplicate section file name, overwriting");
        }

        let contents = render_section(section, config.source_url.as_deref());
        match fs::write(&path, contents) {
            Ok(()) => {
                tracing::debug!(title = %section.title, path = %path.display(), "Saved section");
                report.written.push(path);
            }
            Err(e) => {
                tracing::warn!(title = %section.title, path = %path.display(), error = %e, "Failed to save section");
                report.failed.push(WriteFailure { title: section.title.clone(), path, error: e.to_string() });
            }
        }
    }

    Ok(report)
}

/// Write the complete document to `index.md` with a title and source header.
pub fn write_index(markdown: &str, index_title: &str, config: &WriteConfig) -> Result<PathBuf> {
    fs::create_dir_all(&config.output_dir)?;

    let path = config.output_dir.join(INDEX_FILE_NAME);
    let mut contents = format!("# {index_title}\n\n");
    if let Some(url) = &config.source_url {
        contents.push_str(&format!("Source: {url}\n\n"));
    }
    contents.push_str(markdown);

    fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), "Saved complete document");
    Ok(path)
}
