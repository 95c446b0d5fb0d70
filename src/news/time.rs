use chrono::{DateTime, Utc};

use crate::model::RawEntry;

pub const RECENTLY_PUBLISHED: &str = "Recently published";

const DISPLAY_FORMAT: &str = "%B %d, %Y %I:%M %p";

pub fn format_time(entry: &RawEntry) -> String {
    entry
        .published
        .as_ref()
        .map(render)
        .unwrap_or_else(|| RECENTLY_PUBLISHED.to_string())
}

fn render(published: &DateTime<Utc>) -> String {
    published.format(DISPLAY_FORMAT).to_string()
}
