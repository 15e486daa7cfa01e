use std::sync::LazyLock;

use regex::Regex;

use super::Section;

/// Marker that opens a top-level heading.
const HEADING_PREFIX: &str = "# ";

/// Prefix of second and deeper level headings.
const SUBHEADING_PREFIX: &str = "##";

/// Lines before the first heading starting with this are attribution, not intro text.
const SOURCE_PREFIX: &str = "Source:";

/// Title given to content that appears before the first heading.
pub const INTRODUCTION_TITLE: &str = "Introduction";

/// Trailing `__` left behind by some converters after a heading's anchor icon.
#[allow(clippy::expect_used)]
static TRAILING_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*_+\s*$").expect("valid regex"));

/// Options for the line-based splitter.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Do not let a leading `Source: ...` line open the introduction section.
    pub skip_source_prefix_lines: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { skip_source_prefix_lines: true }
    }
}

/// True for `# Title` lines; `## Title` and deeper do not count.
pub fn is_top_level_heading(line: &str) -> bool {
    line.starts_with(HEADING_PREFIX) && !line.starts_with(SUBHEADING_PREFIX)
}

/// Title text of a heading line, without the marker and trailing underscores.
///
/// ```rust
/// use docsplit_core::heading_title;
///
/// assert_eq!(heading_title("# Rate Limiting __"), "Rate Limiting");
/// assert_eq!(heading_title("# "), "");
/// ```
pub fn heading_title(line: &str) -> String {
    let text = line.strip_prefix(HEADING_PREFIX).unwrap_or(line).trim();
    TRAILING_UNDERSCORES.replace(text, "").into_owned()
}

/// The section currently being accumulated.
struct OpenSection {
    title: String,
    lines: Vec<String>,
}

impl OpenSection {
    fn new(title: String, heading: &str) -> Self {
        Self { title, lines: vec![heading.to_string()] }
    }

    fn introduction() -> Self {
        Self {
            title: INTRODUCTION_TITLE.to_string(),
            lines: vec![format!("{HEADING_PREFIX}{INTRODUCTION_TITLE}"), String::new()],
        }
    }

    /// `None` when everything accumulated is whitespace.
    fn finish(self) -> Option<Section> {
        let body = self.lines.join("\n");
        if body.trim().is_empty() { None } else { Some(Section { title: self.title, body }) }
    }
}

/// Split lines into sections at every top-level heading.
///
/// Each section's body starts with its heading line and runs up to the next
/// heading. Non-blank lines before the first heading are gathered into an
/// `Introduction` section. Blank input yields no sections.
///
/// ```rust
/// use docsplit_core::{SplitConfig, split_lines};
///
/// let sections = split_lines(["intro text", "# Real Section", "body"], &SplitConfig::default());
/// let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
/// assert_eq!(titles, ["Introduction", "Real Section"]);
/// ```
pub fn split_lines<I, S>(lines: I, config: &SplitConfig) -> Vec<Section>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sections = Vec::new();
    let mut current: Option<OpenSection> = None;

    for line in lines {
        let line = line.as_ref();

        if is_top_level_heading(line) {
            if let Some(section) = current.take().and_then(OpenSection::finish) {
                sections.push(section);
            }
            current = Some(OpenSection::new(heading_title(line), line));
            continue;
        }

        match current.as_mut() {
            Some(open) => open.lines.push(line.to_string()),
            None => {
                let is_source_line = config.skip_source_prefix_lines && line.starts_with(SOURCE_PREFIX);
                if !line.trim().is_empty() && !is_source_line {
                    let mut intro = OpenSection::introduction();
                    intro.lines.push(line.to_string());
                    current = Some(intro);
                }
            }
        }
    }

    if let Some(section) = current.and_then(OpenSection::finish) {
        sections.push(section);
    }

    tracing::debug!(sections = sections.len(), "Split lines into sections");
    sections
}

/// Split a Markdown document on `\n` and then into sections.
///
/// A trailing newline produces a trailing empty line in the last section.
pub fn split_markdown(markdown: &str, config: &SplitConfig) -> Vec<Section> {
    split_lines(markdown.split('\n'), config)
}
