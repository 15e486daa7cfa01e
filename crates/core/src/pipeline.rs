//! End-to-end flows.
//!
//! [`scrape`] fetches a documentation page, saves the whole thing as
//! `index.md` and writes one file per top-level section. [`split_file`]
//! splits a Markdown document that is already on disk.
//!
//! # Example
//!
//! ```rust,no_run
//! use docsplit_core::ScrapeConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScrapeConfig::builder("https://www.discogs.com/developers")
//!     .output_dir("discogs/docs")
//!     .max_attempts(5)
//!     .build();
//! let report = docsplit_core::scrape(&config).await?;
//! println!("{} sections", report.sections.len());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::convert::{MarkdownConfig, convert_to_markdown};
use crate::extract::{ExtractConfig, extract_main_content};
use crate::fetch::{FetchConfig, fetch_file};
use crate::parse::Document;
use crate::splitter::{HtmlSplitConfig, Section, SplitConfig, split_html_sections, split_markdown};
use crate::writer::{INDEX_FILE_NAME, INDEX_SECTION_FILE_NAME, WriteConfig, WriteReport, write_index, write_sections};
use crate::{DocsplitError, Result};

/// Title for `index.md` when neither the caller nor the page provides one.
pub const DEFAULT_INDEX_TITLE: &str = "Documentation";

/// Everything the scrape flow needs.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Page to fetch.
    pub url: String,
    /// Directory receiving `index.md` and the section files.
    pub output_dir: PathBuf,
    /// Heading for `index.md`; defaults to the page `<title>`.
    pub index_title: Option<String>,
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    pub markdown: MarkdownConfig,
    pub html_split: HtmlSplitConfig,
    pub split: SplitConfig,
}

impl ScrapeConfig {
    /// Creates a builder for scraping `url`.
    pub fn builder(url: impl Into<String>) -> ScrapeConfigBuilder {
        ScrapeConfigBuilder::new(url)
    }
}

/// Builder for [`ScrapeConfig`].
pub struct ScrapeConfigBuilder {
    config: ScrapeConfig,
}

impl ScrapeConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            config: ScrapeConfig {
                url: url.into(),
                output_dir: PathBuf::from("docs"),
                index_title: None,
                fetch: FetchConfig::default(),
                extract: ExtractConfig::default(),
                markdown: MarkdownConfig::default(),
                html_split: HtmlSplitConfig::default(),
                split: SplitConfig::default(),
            },
        }
    }

    /// Sets the output directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Sets the heading written at the top of `index.md`.
    pub fn index_title(mut self, title: impl Into<String>) -> Self {
        self.config.index_title = Some(title.into());
        self
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = user_agent.into();
        self
    }

    /// Sets the number of fetch attempts.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.fetch.max_attempts = attempts;
        self
    }

    /// Sets the pause after failed attempts and challenge pages alike.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.fetch.retry_delay = delay;
        self.config.fetch.challenge_delay = delay;
        self
    }

    /// Sets whether images are dropped during conversion.
    pub fn strip_images(mut self, value: bool) -> Self {
        self.config.markdown.strip_images = value;
        self
    }

    /// Sets whether leading `Source:` lines are ignored by the Markdown splitter.
    pub fn skip_source_prefix_lines(mut self, value: bool) -> Self {
        self.config.split.skip_source_prefix_lines = value;
        self
    }

    /// Sets the minimum Markdown length for HTML sections.
    pub fn min_section_chars(mut self, value: usize) -> Self {
        self.config.html_split.min_section_chars = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ScrapeConfig {
        self.config
    }
}

/// How the sections of a scrape were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Cut at `<h1>` elements before conversion.
    Html,
    /// Cut at `# ` lines after conversion.
    Markdown,
}

/// One line of a report: a section and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub title: String,
    pub file_name: String,
    pub lines: usize,
}

impl From<&Section> for SectionSummary {
    fn from(section: &Section) -> Self {
        Self { title: section.title.clone(), file_name: section.file_name(), lines: section.body.lines().count() }
    }
}

/// Result of a scrape.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub url: String,
    pub index_path: PathBuf,
    pub strategy: SplitStrategy,
    pub sections: Vec<SectionSummary>,
    pub write: WriteReport,
}

/// Fetch `config.url` and split it into files.
#[cfg(feature = "fetch")]
pub async fn scrape(config: &ScrapeConfig) -> Result<ScrapeReport> {
    tracing::debug!(url = %config.url, "Fetching main documentation page");
    let html = crate::fetch::fetch_url(&config.url, &config.fetch).await?;
    scrape_html(&html, config)
}

/// The scrape flow for a page that has already been fetched.
///
/// Saves the whole page as `index.md`, then splits at `<h1>` elements and
/// falls back to splitting the converted Markdown when that finds nothing.
pub fn scrape_html(html: &str, config: &ScrapeConfig) -> Result<ScrapeReport> {
    let doc = Document::parse(html)?;

    let content = extract_main_content(&doc, &config.extract).ok_or(DocsplitError::NoContent)?;
    let markdown = convert_to_markdown(&content, &config.markdown)?;
    if markdown.is_empty() {
        return Err(DocsplitError::NoContent);
    }

    let write_config = WriteConfig {
        output_dir: config.output_dir.clone(),
        source_url: Some(config.url.clone()),
        keep_index: true,
    };
    let index_title = config
        .index_title
        .clone()
        .or_else(|| doc.title().map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_INDEX_TITLE.to_string());
    let index_path = write_index(&markdown, &index_title, &write_config)?;

    let mut strategy = SplitStrategy::Html;
    let mut sections = split_html_sections(&content, &config.html_split, &config.markdown)?;
    if sections.is_empty() {
        tracing::debug!("No <h1> sections found, splitting Markdown directly");
        strategy = SplitStrategy::Markdown;
        sections = split_markdown(&markdown, &config.split);
    }

    let write = write_sections(&sections, &write_config)?;

    let mut summaries: Vec<SectionSummary> = sections.iter().map(SectionSummary::from).collect();
    for summary in summaries.iter_mut().filter(|s| s.file_name == INDEX_FILE_NAME) {
        summary.file_name = INDEX_SECTION_FILE_NAME.to_string();
    }

    Ok(ScrapeReport { url: config.url.clone(), index_path, strategy, sections: summaries, write })
}

/// Options for splitting an existing Markdown document.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub output_dir: PathBuf,
    pub split: SplitConfig,
    /// Report the sections without writing anything.
    pub dry_run: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("docs"), split: SplitConfig::default(), dry_run: false }
    }
}

/// Result of splitting an existing document.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    /// File path, or `-` for stdin.
    pub source: String,
    pub sections: Vec<SectionSummary>,
    /// `None` on a dry run.
    pub write: Option<WriteReport>,
}

/// Split Markdown text and write each section's body verbatim.
pub fn split_document(markdown: &str, source: &str, options: &SplitOptions) -> Result<SplitReport> {
    let sections = split_markdown(markdown, &options.split);
    tracing::debug!(source, sections = sections.len(), "Split document");

    let write = if options.dry_run {
        None
    } else {
        let config = WriteConfig { output_dir: options.output_dir.clone(), source_url: None, keep_index: false };
        Some(write_sections(&sections, &config)?)
    };

    Ok(SplitReport { source: source.to_string(), sections: sections.iter().map(SectionSummary::from).collect(), write })
}

/// Read a Markdown file and split it.
pub fn split_file(path: &Path, options: &SplitOptions) -> Result<SplitReport> {
    let display = path.display().to_string();
    let markdown = fetch_file(&display)?;
    split_document(&markdown, &display, options)
}


#[cfg(all(test, feature = "markdown"))]
mod scrape_tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"
        <html>
        <head><title> Example API </title></head>
        <body>
            <nav><a href="/developers">Home</a></nav>
            <main>
                <h1>Authentication</h1>
                <p>Requests are authenticated with a personal access token sent in a header.</p>
                <h1>Database</h1>
                <p>The database endpoints return releases, masters, artists and labels.</p>
            </main>
        </body>
        </html>
    "#;

    #[test]
    fn test_scrape_html_uses_html_headings() {
        let dir = TempDir::new().unwrap();
        let config = ScrapeConfig::builder("https://example.com/developers")
            .output_dir(dir.path())
            .build();

        let report = scrape_html(PAGE, &config).unwrap();

        assert_eq!(report.strategy, SplitStrategy::Html);
        let titles: Vec<_> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Authentication", "Database"]);

        let index = std::fs::read_to_string(&report.index_path).unwrap();
        assert!(index.starts_with("# Example API\n\nSource: https://example.com/developers\n\n"));

        let auth = std::fs::read_to_string(dir.path().join("authentication.md")).unwrap();
        assert!(auth.starts_with("# Authentication\n\nSource: https://example.com/developers\n\n# Authentication"));
    }

    #[test]
    fn test_scrape_html_falls_back_to_markdown_split() {
        let dir = TempDir::new().unwrap();
        let config = ScrapeConfig::builder("https://example.com/developers")
            .output_dir(dir.path())
            .min_section_chars(10_000)
            .build();

        let report = scrape_html(PAGE, &config).unwrap();

        assert_eq!(report.strategy, SplitStrategy::Markdown);
        assert_eq!(report.sections.len(), 2);
    }

    #[test]
    fn test_scrape_html_keeps_index_when_a_section_is_named_index() {
        let dir = TempDir::new().unwrap();
        let page = PAGE.replace("<h1>Database</h1>", "<h1>Index</h1>");
        let config = ScrapeConfig::builder("https://example.com/developers")
            .output_dir(dir.path())
            .build();

        let report = scrape_html(&page, &config).unwrap();

        assert!(report.write.is_complete());
        assert_eq!(report.sections[1].file_name, "index-section.md");
        let index = std::fs::read_to_string(dir.path().join("index.md")).unwrap();
        assert!(index.starts_with("# Example API\n"));
        assert!(index.contains("personal access token"));
        let section = std::fs::read_to_string(dir.path().join("index-section.md")).unwrap();
        assert!(section.contains("releases, masters, artists and labels"));
    }

    #[test]
    fn test_scrape_html_without_content() {
        let dir = TempDir::new().unwrap();
        let config = ScrapeConfig::builder("https://example.com").output_dir(dir.path()).build();

        let result = scrape_html("<html><body><nav>Menu</nav></body></html>", &config);
        assert!(matches!(result, Err(DocsplitError::NoContent)));
    }
}
