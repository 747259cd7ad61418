use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::data_models::{Article, non_blank};

pub const NO_TITLE: &str = "No title";
pub const NO_SUMMARY: &str = "No summary available";
pub const UNKNOWN_SOURCE: &str = "Unknown";
pub const NO_RESULTS: &str = "No results found.";

/// Zoned formats seen from the scrape server, tried after RFC 3339 / RFC 2822.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Bytes `encodeURIComponent` leaves alone: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A single rendered article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub source_label: String,
    pub date_label: Option<String>,
    pub title: String,
    pub summary: String,
    pub link: String,
}

/// Whatever currently fills the results area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsContent {
    #[default]
    Blank,
    NoResults,
    Cards(Vec<Card>),
    Error(String),
}

/// Shapes a server result list into cards, newest first.
///
/// Articles without a usable `published_date` go after every dated one. The
/// sort is stable, so ties keep the order the server sent.
pub fn render_results(articles: Option<&[Article]>, keyword: &str) -> ResultsContent {
    let articles = match articles {
        Some(articles) if !articles.is_empty() => articles,
        _ => return ResultsContent::NoResults,
    };
    let keyword = keyword.trim();

    let mut dated: Vec<(Option<DateTime<FixedOffset>>, &Article)> = articles
        .iter()
        .map(|article| {
            let published = article.published_date.as_deref().and_then(parse_published);
            (published, article)
        })
        .collect();
    // Option orders None first, so reversing puts undated articles last
    dated.sort_by(|(a, _), (b, _)| {
        let a = a.map(|d| d.with_timezone(&Utc));
        let b = b.map(|d| d.with_timezone(&Utc));
        b.cmp(&a)
    });

    let cards = dated
        .into_iter()
        .map(|(published, article)| Card {
            source_label: source_label(article.source.as_deref()),
            date_label: published.map(|d| format_date(&d)),
            title: non_blank(article.title.clone()).unwrap_or_else(|| NO_TITLE.to_string()),
            summary: non_blank(article.summary.clone())
                .unwrap_or_else(|| NO_SUMMARY.to_string()),
            link: article_link(article.url.as_deref(), keyword),
        })
        .collect();

    ResultsContent::Cards(cards)
}

/// `"bbc.co.uk"` -> `"Bbc"`.
pub fn source_label(source: Option<&str>) -> String {
    let Some(source) = source.filter(|s| !s.is_empty()) else {
        return UNKNOWN_SOURCE.to_string();
    };
    let head = source.split('.').next().unwrap_or_default();
    let mut chars = head.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn parse_published(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(raw) {
        return Some(d);
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(raw) {
        return Some(d);
    }
    for fmt in ZONED_FORMATS {
        if let Ok(d) = DateTime::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(d) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(d.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc().fixed_offset())
}

/// `Jan 5, 2025`, in the timestamp's own offset.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Link to the article that scrolls to the searched keyword when the browser
/// supports text fragments.
pub fn article_link(url: Option<&str>, keyword: &str) -> String {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return "#".to_string();
    };
    if keyword.is_empty() {
        return url.to_string();
    }
    let directive = format!(":~:text={}", encode_uri_component(keyword));
    if url.contains('#') {
        format!("{url}{directive}")
    } else {
        format!("{url}#{directive}")
    }
}

/// Percent-encodes a text fragment the way browsers' `encodeURIComponent` does.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}
