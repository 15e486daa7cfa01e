pub mod convert;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod links;
pub mod parse;
pub mod pipeline;
pub mod splitter;
pub mod writer;

pub use convert::{MarkdownConfig, clean_markdown, convert_to_markdown};
pub use error::{DocsplitError, Result};
pub use extract::{ExtractConfig, extract_main_content};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{FetchConfig, fetch_file, fetch_stdin};
pub use links::{DocLink, extract_doc_links, url_to_relative_path};
pub use parse::Document;
#[cfg(feature = "fetch")]
pub use pipeline::scrape;
pub use pipeline::{
    ScrapeConfig, ScrapeConfigBuilder, ScrapeReport, SectionSummary, SplitOptions, SplitReport, SplitStrategy,
    scrape_html, split_document, split_file,
};
pub use splitter::{
    HtmlSplitConfig, Section, SplitConfig, heading_title, is_top_level_heading, sanitize_title, section_file_name,
    split_html_sections, split_lines, split_markdown,
};
pub use writer::{WriteConfig, WriteFailure, WriteReport, write_index, write_sections};
