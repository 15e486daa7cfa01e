/// Stem used when a title sanitizes to nothing.
pub const FALLBACK_FILE_STEM: &str = "untitled";

/// Turn a free-text title into a lowercase, hyphen-separated file stem.
///
/// Characters other than alphanumerics, whitespace and `-` are dropped,
/// runs of whitespace and hyphens become a single `-`, and hyphens at
/// either end are trimmed. A title with nothing left becomes
/// [`FALLBACK_FILE_STEM`]. Applying it twice changes nothing.
///
/// ```rust
/// use docsplit_core::sanitize_title;
///
/// assert_eq!(sanitize_title("Rate Limiting & Quotas!"), "rate-limiting-quotas");
/// assert_eq!(sanitize_title("???"), "untitled");
/// ```
pub fn sanitize_title(title: &str) -> String {
    // Lowercase first: some uppercase letters lowercase into combining marks,
    // which the filter below must get to see.
    let lowered = title.to_lowercase();

    let mut stem = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for c in lowered.chars() {
        if c.is_whitespace() || c == '-' {
            pending_separator = true;
        } else if c.is_alphanumeric() {
            if pending_separator && !stem.is_empty() {
                stem.push('-');
            }
            pending_separator = false;
            stem.push(c);
        }
    }

    if stem.is_empty() { FALLBACK_FILE_STEM.to_string() } else { stem }
}

/// `sanitize_title(title)` plus the `.md` extension.
pub fn section_file_name(title: &str) -> String {
    format!("{}.md", sanitize_title(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Rate Limiting & Quotas!", "rate-limiting-quotas")]
    #[case("???", "untitled")]
    #[case("", "untitled")]
    #[case("Authentication", "authentication")]
    #[case("  Marketplace -- Inventory  ", "marketplace-inventory")]
    #[case("User Collection: Fields", "user-collection-fields")]
    #[case("snake_case_name", "snakecasename")]
    #[case("---", "untitled")]
    #[case("Version 2.0 Changes", "version-20-changes")]
    #[case("Données Référence", "données-référence")]
    #[case("a - & - b", "a-b")]
    fn test_sanitize_title(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(sanitize_title(title), expected);
    }

    #[rstest]
    #[case("Rate Limiting & Quotas!")]
    #[case("???")]
    #[case("  --Mixed__ Case-- ")]
    #[case("İstanbul Guide")]
    #[case("Ünïcödé — Títle")]
    #[case("tab\tseparated\nlines")]
    fn test_sanitize_title_is_idempotent(#[case] title: &str) {
        let once = sanitize_title(title);
        assert_eq!(sanitize_title(&once), once);
    }

    #[test]
    fn test_drop_between_separators_collapses() {
        // "a & b" leaves two spaces around the dropped '&'
        assert_eq!(sanitize_title("a & b"), "a-b");
    }

    #[test]
    fn test_section_file_name() {
        assert_eq!(section_file_name("Database"), "database.md");
        assert_eq!(section_file_name("!!!"), "untitled.md");
    }
}
