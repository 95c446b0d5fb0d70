use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::news::category::Category;

/// One feed item before normalization. Every field is optional because feeds disagree
/// on what they carry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub content: Vec<String>,
    pub subtitle: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
    /// Set when the parser recovered from broken input.
    pub malformed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub safe_title: String,
    pub safe_summary: String,
    pub url: String,
    pub published: String,
    pub source: String,
    pub category: Category,
    pub country: String,
    pub country_code: String,
}

#[derive(Debug, Serialize)]
pub struct CountryOut {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub feed_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ContinentOut {
    pub key: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub color: String,
    pub countries: Vec<CountryOut>,
}

#[derive(Debug, Serialize)]
pub struct CategoryOut {
    pub label: Category,
    pub emoji: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CountryNewsOut {
    pub continent: String,
    pub continent_key: String,
    pub country: String,
    pub flag: String,
    pub country_code: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewsQuery {
    pub max: Option<usize>,
}
