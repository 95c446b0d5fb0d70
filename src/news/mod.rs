pub mod category;
pub mod summary;
pub mod time;

use crate::{
    catalog::FeedSource,
    model::{Article, RawEntry},
    util::html::{clean_text, sanitize_for_embedding},
};

pub const NO_TITLE: &str = "No title available";
pub const NO_LINK: &str = "#";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Normalize one feed entry into an article for `source`.
pub fn build_article(entry: &RawEntry, feed_title: Option<&str>, source: &FeedSource) -> Article {
    let title = entry
        .title
        .as_deref()
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());
    let summary = summary::extract_summary(entry);

    let url = entry
        .link
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(NO_LINK)
        .to_string();

    let source_name = feed_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_SOURCE)
        .to_string();

    Article {
        safe_title: sanitize_for_embedding(&title),
        safe_summary: sanitize_for_embedding(&summary),
        category: category::detect_category(&title, &summary),
        published: time::format_time(entry),
        title,
        summary,
        url,
        source: source_name,
        country: source.name.clone(),
        country_code: source.code.clone(),
    }
}
