use std::path::Path;

use docsplit_core::{SectionSummary, WriteReport};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "docsplit".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Split documentation into per-section Markdown files\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print one row per section: title, target file and line count
pub fn print_sections(sections: &[SectionSummary]) {
    let width = sections.iter().map(|s| s.title.chars().count()).max().unwrap_or(0);

    for section in sections {
        println!(
            "  {:<width$}  {} {}",
            section.title,
            section.file_name.bright_white(),
            format!("({} lines)", section.lines).dimmed(),
            width = width
        );
    }
}

/// Print the outcome of a write pass
pub fn print_write_summary(report: &WriteReport, output_dir: &Path) {
    for failure in &report.failed {
        print_error(&format!(
            "Failed to save {} ({}): {}",
            failure.title,
            failure.path.display(),
            failure.error
        ));
    }

    eprintln!("{}", "─".repeat(50).dimmed());
    eprintln!(
        "  {} {}",
        "Saved:".dimmed(),
        report.written.len().to_string().bright_white()
    );
    if !report.failed.is_empty() {
        eprintln!(
            "  {} {}",
            "Failed:".dimmed(),
            report.failed.len().to_string().bright_red()
        );
    }
    eprintln!(
        "  {} {}",
        "Output directory:".dimmed(),
        output_dir.display().bright_white()
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
