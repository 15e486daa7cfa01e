mod echo;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args as ClapArgs, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use docsplit_core::{
    FetchConfig, ScrapeConfig, SplitConfig, SplitOptions, extract_doc_links, fetch_file, fetch_stdin, fetch_url,
    scrape_html, split_document, split_file,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::echo::{
    format_size, print_banner, print_error, print_info, print_sections, print_step, print_success, print_warning,
    print_write_summary,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scrape documentation pages and split them into per-section Markdown files
#[derive(Parser, Debug)]
#[command(name = "docsplit")]
#[command(version)]
#[command(about = "Scrape documentation pages and split them into per-section Markdown files", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a page, save it as index.md and write one file per top-level section
    Scrape(ScrapeArgs),
    /// Split an existing Markdown file at its top-level headings
    Split(SplitArgs),
    /// List the documentation links found on a page
    Links(LinksArgs),
    /// Generate a shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ClapArgs, Debug)]
struct ScrapeArgs {
    /// Documentation URL to fetch
    #[arg(value_name = "URL")]
    url: String,

    /// Output directory
    #[arg(short, long, default_value = "docs", value_name = "DIR")]
    output: PathBuf,

    /// Heading for index.md (default: the page title)
    #[arg(long, value_name = "TITLE")]
    index_title: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Number of fetch attempts
    #[arg(long, default_value = "3", value_name = "NUM")]
    attempts: u32,

    /// Seconds to wait between failed attempts
    #[arg(long, default_value = "3", value_name = "SECS")]
    retry_delay: u64,

    /// Strip images from output
    #[arg(long)]
    no_images: bool,

    /// Let a leading "Source:" line open the Introduction section
    #[arg(long)]
    keep_source_lines: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ClapArgs, Debug)]
struct SplitArgs {
    /// Markdown file to split, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = "docs", value_name = "DIR")]
    output: PathBuf,

    /// Let a leading "Source:" line open the Introduction section
    #[arg(long)]
    keep_source_lines: bool,

    /// List sections without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ClapArgs, Debug)]
struct LinksArgs {
    /// URL to fetch or local HTML file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Base URL for resolving links (default: INPUT when it is a URL)
    #[arg(long, value_name = "URL")]
    base: Option<String>,

    /// Only keep links under this path (default: the base URL path)
    #[arg(long, value_name = "PATH")]
    prefix: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Print the links as JSON
    #[arg(long)]
    json: bool,
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Send library events to stderr; `-v` turns on debug output for docsplit itself.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "warn,docsplit=debug,docsplit_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

async fn run_scrape(args: ScrapeArgs, verbose: bool) -> anyhow::Result<()> {
    let mut builder = ScrapeConfig::builder(args.url.as_str())
        .output_dir(&args.output)
        .timeout(args.timeout)
        .max_attempts(args.attempts)
        .retry_delay(Duration::from_secs(args.retry_delay))
        .strip_images(args.no_images)
        .skip_source_prefix_lines(!args.keep_source_lines);
    if let Some(title) = args.index_title {
        builder = builder.index_title(title);
    }
    if let Some(user_agent) = args.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let config = builder.build();
    tracing::debug!(?config, "scrape configuration");

    if !args.json {
        print_step(1, 3, &format!("Fetching {}", args.url.bright_white().underline()));
    }
    let html = fetch_url(&config.url, &config.fetch)
        .await
        .with_context(|| format!("Failed to fetch {}", args.url))?;
    if verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(html.len()).bright_white());
    }

    if !args.json {
        print_step(2, 3, "Extracting, converting and splitting content");
    }
    let report = scrape_html(&html, &config).context("Failed to process page")?;

    if args.json {
        print_json(&report)?;
    } else {
        print_step(3, 3, "Writing sections");
        print_success(&format!("Saved complete documentation to {}", report.index_path.display()));
        if verbose {
            print_info(&format!("Sections found by {:?} headings", report.strategy));
        }
        if report.sections.is_empty() {
            print_warning("No sections found to split");
        } else {
            print_sections(&report.sections);
        }
        print_write_summary(&report.write, &args.output);
    }

    if !report.write.is_complete() {
        bail!("{} section(s) could not be saved", report.write.failed.len());
    }
    Ok(())
}

fn run_split(args: &SplitArgs, verbose: bool) -> anyhow::Result<()> {
    let options = SplitOptions {
        output_dir: args.output.clone(),
        split: SplitConfig { skip_source_prefix_lines: !args.keep_source_lines },
        dry_run: args.dry_run,
    };

    let report = if args.input == "-" {
        if verbose {
            print_step(1, 2, "Reading from stdin");
        }
        let markdown = fetch_stdin().context("Failed to read from stdin")?;
        split_document(&markdown, "-", &options).context("Failed to split document")?
    } else {
        if verbose {
            print_step(1, 2, &format!("Reading from file {}", args.input.bright_white()));
        }
        split_file(Path::new(&args.input), &options)
            .with_context(|| format!("Failed to split file: {}", args.input))?
    };

    if args.json {
        return print_json(&report);
    }

    if verbose {
        print_step(2, 2, if args.dry_run { "Listing sections" } else { "Writing sections" });
    }
    if report.sections.is_empty() {
        print_warning("No sections found");
    } else {
        print_sections(&report.sections);
    }

    match &report.write {
        Some(write) => {
            print_write_summary(write, &args.output);
            if !write.is_complete() {
                bail!("{} section(s) could not be saved", write.failed.len());
            }
            print_success(&format!("Split into {} sections", write.written.len()));
        }
        None => print_info("Dry run: no files written"),
    }

    Ok(())
}

async fn run_links(args: &LinksArgs) -> anyhow::Result<()> {
    let base = match (&args.base, is_url(&args.input)) {
        (Some(base), _) => base.clone(),
        (None, true) => args.input.clone(),
        (None, false) => bail!("--base is required when INPUT is a file"),
    };
    let base = Url::parse(&base).with_context(|| format!("Invalid base URL: {}", base))?;
    let prefix = args
        .prefix
        .clone()
        .unwrap_or_else(|| base.path().trim_end_matches('/').to_string());

    let html = if is_url(&args.input) {
        let config = FetchConfig { timeout: args.timeout, ..Default::default() };
        fetch_url(&args.input, &config)
            .await
            .with_context(|| format!("Failed to fetch {}", args.input))?
    } else {
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    let links = extract_doc_links(&html, &base, if prefix.is_empty() { "/" } else { &prefix });

    if args.json {
        return print_json(&links);
    }
    for link in &links {
        println!("{}  {}", link.url, link.title.dimmed());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let result = match args.command {
        Command::Scrape(scrape) => run_scrape(scrape, args.verbose).await,
        Command::Split(split) => run_split(&split, args.verbose),
        Command::Links(links) => run_links(&links).await,
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Args::command(), "docsplit", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
