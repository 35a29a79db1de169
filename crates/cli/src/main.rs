use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use gleaner_core::{
    ExtractionResult, Extractor, ExtractorConfig, FetchConfig, HttpFetcher, MetadataResult, ReadabilityConfig,
    fetch_file, fetch_stdin, resolve_metadata,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Source URL assumed for stdin input when `--url` is not given.
const STDIN_URL: &str = "about:blank";

/// Output format for extracted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Html,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, html, text", s)),
        }
    }
}

/// Extract readable content and news metadata from web pages
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(author = "Gleaner Contributors")]
#[command(version)]
#[command(about = "Extract readable content and news metadata from web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, html, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Resolve news metadata instead of extracting content
    #[arg(short, long)]
    metadata: bool,

    /// Page URL for file or stdin input, used for links and title fallback
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Time budget of the readability plan in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    readability_timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Minimum character threshold for content candidates
    #[arg(long, default_value = "500", value_name = "NUM")]
    char_threshold: usize,

    /// Strip images from output
    #[arg(long)]
    no_images: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

/// Raw page and the URL it is attributed to.
struct Input {
    html: String,
    url: String,
}

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

async fn read_input(input: &str, args: &Args) -> anyhow::Result<Input> {
    if input == "-" {
        let html = fetch_stdin().context("Failed to read from stdin")?;
        let url = args.url.clone().unwrap_or_else(|| STDIN_URL.to_string());
        return Ok(Input { html, url });
    }

    if is_remote(input) {
        let defaults = FetchConfig::default();
        let config = FetchConfig {
            timeout: args.timeout,
            user_agent: args.user_agent.clone().unwrap_or(defaults.user_agent),
            ..defaults
        };
        let fetcher = HttpFetcher::new(config).context("Failed to build HTTP client")?;
        let html = fetcher.fetch_url(input).await.context("Failed to fetch URL")?;
        return Ok(Input { html, url: input.to_string() });
    }

    let html = fetch_file(input).with_context(|| format!("Failed to read file: {}", input))?;
    let url = match &args.url {
        Some(url) => url.clone(),
        None => file_url(Path::new(input)),
    };
    Ok(Input { html, url })
}

/// `file://` URL of a local path, so titles fall back to the file name.
fn file_url(path: &Path) -> String {
    fs::canonicalize(path)
        .ok()
        .and_then(|absolute| Url::from_file_path(absolute).ok())
        .map_or_else(|| STDIN_URL.to_string(), String::from)
}

fn extractor(args: &Args) -> Extractor {
    let readability = ReadabilityConfig::builder()
        .char_threshold(args.char_threshold)
        .preserve_images(!args.no_images)
        .build();
    let config = ExtractorConfig::builder()
        .readability_timeout(Duration::from_secs(args.readability_timeout))
        .readability(readability)
        .build();

    Extractor::with_config(config)
}

fn render_extraction(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(result).context("Failed to serialize result")?,
        OutputFormat::Html => result.content.clone(),
        OutputFormat::Text => result.text_content.clone(),
    })
}

fn render_metadata(metadata: &MetadataResult, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?,
        OutputFormat::Html => metadata.content.clone(),
        OutputFormat::Text => metadata.text_content.clone(),
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gleaner_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "gleaner", &mut io::stdout());
        return Ok(());
    }

    let input = args.input.as_deref().context("Missing INPUT")?;
    let total = Instant::now();
    let mut timings = Vec::new();

    if args.verbose {
        echo::print_banner();
        init_logging();
        echo::print_info("Debug logging enabled");
        eprintln!();
        if input == "-" {
            echo::print_step(1, 3, "Reading from stdin");
        } else if is_remote(input) {
            echo::print_step(1, 3, &format!("Fetching from {}", input.bright_white().underline()));
        } else {
            echo::print_step(1, 3, &format!("Reading from file {}", input.bright_white()));
        }
    }

    let started = Instant::now();
    let page = read_input(input, &args).await?;
    timings.push(("Read", started.elapsed()));

    if args.verbose {
        echo::print_field("Size", echo::format_size(page.html.len()));
        echo::print_field("URL", &page.url);
        eprintln!();
    }

    let started = Instant::now();
    let (output, success) = if args.metadata {
        if args.verbose {
            echo::print_step(2, 3, "Resolving metadata");
        }
        let metadata = resolve_metadata(&page.html, &page.url);
        timings.push(("Resolve", started.elapsed()));
        if args.verbose {
            echo::print_metadata_details(&metadata);
        }
        (render_metadata(&metadata, args.format)?, true)
    } else {
        if args.verbose {
            echo::print_step(2, 3, "Extracting main content");
        }
        let result = extractor(&args).extract(&page.html, &page.url).await;
        timings.push(("Extract", started.elapsed()));
        if args.verbose {
            echo::print_extraction_details(&result);
            if result.success && result.length == 0 {
                echo::print_warning("Extraction produced no content");
            }
        }
        (render_extraction(&result, args.format)?, result.success)
    };

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
        echo::print_field("Format", format!("{:?}", args.format));
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    if args.verbose {
        echo::print_timing_summary(total.elapsed(), &timings);
    }

    if !success {
        echo::print_error("All extraction plans failed");
        std::process::exit(1);
    }

    Ok(())
}
