//! Text and URL helpers shared by the plans and the resolver.

use time::{Date, Month, OffsetDateTime, Time, format_description::well_known::Rfc3339};
use url::Url;

use crate::patterns;

/// Longest excerpt body before the ellipsis is appended.
pub const EXCERPT_CHARS: usize = 200;

/// Keywords that hint at a subscription wall, matched case-insensitively.
pub const PAYWALL_KEYWORDS: &[&str] = &[
    "subscribe",
    "membership",
    "paywall",
    "premium content",
    "login required",
    "sign in to read",
    "limited articles",
];

/// First [`EXCERPT_CHARS`] characters of `text`, trimmed, with `...`
/// appended when the text was cut.
///
/// # Example
///
/// ```rust
/// use gleaner_core::text::build_excerpt;
///
/// assert_eq!(build_excerpt("short"), "short");
/// assert!(build_excerpt(&"a".repeat(300)).ends_with("..."));
/// ```
pub fn build_excerpt(text: &str) -> String {
    let head: String = text.chars().take(EXCERPT_CHARS).collect();
    let head = head.trim();

    if text.chars().nth(EXCERPT_CHARS).is_some() { format!("{head}...") } else { head.to_string() }
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    patterns::WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Turns a markup fragment into plain text without a DOM.
///
/// Tags become spaces, the five basic entities are decoded, and whitespace
/// is collapsed.
pub fn strip_html(html: &str) -> String {
    let text = patterns::ANY_TAG.replace_all(html, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    collapse_whitespace(&text)
}

/// Derives a human-readable title from a URL.
///
/// Uses the last path segment with its extension dropped and `-`/`_`
/// turned into spaces. Falls back to the host, then to `"Untitled"`.
pub fn title_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return "Untitled".to_string();
    };

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(|s| s.rsplit_once('.').map_or(s, |(stem, _)| stem))
        .map(|s| collapse_whitespace(&s.replace(['-', '_'], " ")))
        .filter(|s| !s.is_empty());

    segment
        .or_else(|| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Host of the URL with a leading `www.` removed, or empty when unparseable.
pub fn site_name_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.trim_start_matches("www.").to_string()))
        .unwrap_or_default()
}

/// Paywall keywords that occur in `text`, in [`PAYWALL_KEYWORDS`] order.
pub fn detect_paywall(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    PAYWALL_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Parses the date formats seen in article markup.
///
/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates, and long-form
/// dates such as `March 3, 2024`. Date-only values land on midnight UTC.
pub fn parse_date(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }

    find_date(raw)
}

/// First recognisable calendar date anywhere in free text.
pub fn find_date(text: &str) -> Option<OffsetDateTime> {
    let iso = patterns::ISO_DATE.captures(text).and_then(|caps| {
        let start = caps.get(0)?.start();
        let month = Month::try_from(caps[2].parse::<u8>().ok()?).ok()?;
        let date = Date::from_calendar_date(caps[1].parse().ok()?, month, caps[3].parse().ok()?).ok()?;
        Some((start, date))
    });

    let long = patterns::LONG_DATE.captures(text).and_then(|caps| {
        let start = caps.get(0)?.start();
        let month = month_from_abbrev(&caps[1])?;
        let date = Date::from_calendar_date(caps[3].parse().ok()?, month, caps[2].parse().ok()?).ok()?;
        Some((start, date))
    });

    let (_, date) = match (iso, long) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }?;

    Some(date.with_time(Time::MIDNIGHT).assume_utc())
}

fn month_from_abbrev(abbrev: &str) -> Option<Month> {
    let month = match abbrev.to_ascii_lowercase().as_str() {
        "jan" => Month::January,
        "feb" => Month::February,
        "mar" => Month::March,
        "apr" => Month::April,
        "may" => Month::May,
        "jun" => Month::June,
        "jul" => Month::July,
        "aug" => Month::August,
        "sep" => Month::September,
        "oct" => Month::October,
        "nov" => Month::November,
        "dec" => Month::December,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_excerpt_cut_at_200_chars() {
        let text = "word ".repeat(100);
        let excerpt = build_excerpt(&text);

        assert!(excerpt.ends_with("..."));
        assert!(excerpt.chars().count() <= EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_excerpt_exactly_200_chars_has_no_ellipsis() {
        let text = "x".repeat(EXCERPT_CHARS);
        assert_eq!(build_excerpt(&text), text);
    }

    #[test]
    fn test_excerpt_counts_chars_not_bytes() {
        let text = "é".repeat(250);
        let excerpt = build_excerpt(&text);
        assert_eq!(excerpt.chars().count(), EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_strip_html_decodes_entities() {
        let text = strip_html("<p>Fish &amp; chips</p><p>&lt;b&gt;&nbsp;&quot;ok&quot;</p>");
        assert_eq!(text, "Fish & chips <b> \"ok\"");
    }

    #[rstest]
    #[case("https://example.com/news/my-great_story.html", "my great story")]
    #[case("https://example.com/posts/rust-tips/", "rust tips")]
    #[case("https://www.example.com/", "www.example.com")]
    #[case("not a url", "Untitled")]
    fn test_title_from_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(title_from_url(url), expected);
    }

    #[rstest]
    #[case("https://www.example.com/a", "example.com")]
    #[case("https://news.example.org/", "news.example.org")]
    #[case("nope", "")]
    fn test_site_name_from_url(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(site_name_from_url(url), expected);
    }

    #[test]
    fn test_detect_paywall_is_case_insensitive() {
        let found = detect_paywall("Premium Content: SUBSCRIBE now, login required");
        assert_eq!(found, vec!["subscribe", "premium content", "login required"]);
        assert!(detect_paywall("free to read").is_empty());
    }

    #[test]
    fn test_parse_date_rfc3339() {
        let date = parse_date("2024-03-01T10:30:00Z").unwrap();
        assert_eq!(date.hour(), 10);
        assert_eq!(date.day(), 1);
    }

    #[test]
    fn test_parse_date_plain_forms() {
        let iso = parse_date("2024-03-01").unwrap();
        assert_eq!(iso.month(), Month::March);

        let long = parse_date("Published Sep 9, 2023").unwrap();
        assert_eq!((long.year(), long.month(), long.day()), (2023, Month::September, 9));
    }

    #[test]
    fn test_find_date_prefers_earliest_match() {
        let date = find_date("Updated 2024-05-06, first posted May 1, 2024").unwrap();
        assert_eq!(date.month(), Month::May);
        assert_eq!(date.day(), 6);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("").is_none());
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024-13-45").is_none());
    }
}
