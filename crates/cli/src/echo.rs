use std::time::Duration;

use gleaner_core::{ExtractionResult, MetadataResult};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Gleaner".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Extract readable content and news metadata from web pages\n".dimmed());
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

/// Print a labelled value, indented under the current step
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    eprintln!("  {} {}", format!("{label}:").dimmed(), value.to_string().bright_white());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 50.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 100.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

fn print_section(title: &str) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", title.bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
}

/// Print extraction details summary
pub fn print_extraction_details(result: &ExtractionResult) {
    print_section("Extraction Details");
    print_field("Plan", result.plan);
    print_field("Confidence", result.confidence);
    print_field("Length", result.length);
    if !result.title.is_empty() {
        print_field("Title", &result.title);
    }
    if !result.byline.is_empty() {
        print_field("Byline", &result.byline);
    }
    if let Some(message) = &result.message {
        print_field("Note", message);
    }
    eprintln!();
}

/// Print resolved metadata summary
pub fn print_metadata_details(metadata: &MetadataResult) {
    print_section("Metadata Details");
    print_field("Source", format!("{:?}", metadata.source));
    print_field("Confidence", metadata.confidence);
    print_field("Title", &metadata.title);
    if !metadata.author.is_empty() {
        print_field("Author", &metadata.author);
    }
    if !metadata.paywalled_indicators.is_empty() {
        print_field("Paywall", metadata.paywalled_indicators.join(", "));
    }
    eprintln!();
}

/// Print timing summary
pub fn print_timing_summary(total: Duration, timings: &[(&str, Duration)]) {
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Timing Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    for (label, duration) in timings {
        print_timing(label, *duration);
    }

    eprintln!("  {} {:>8.2}ms\n", format!("{}:", "Total").bold().dimmed(), total.as_secs_f64() * 1000.0);
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
