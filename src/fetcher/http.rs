use std::time::Duration;

use async_trait::async_trait;
use feed_rs::{
    model::{Entry, Feed},
    parser,
};
use reqwest::Client;
use tracing::debug;

use super::FeedTransport;
use crate::{
    config::FetcherConfig,
    error::FeedError,
    model::{ParsedFeed, RawEntry},
};

/// Fetches feeds over HTTP and parses them with feed-rs (RSS 0.9x/1.0/2.0, Atom, JSON Feed).
pub struct HttpFeedTransport {
    client: Client,
}

impl HttpFeedTransport {
    pub fn new(config: &FetcherConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpFeedTransport {
    async fn fetch(&self, url: &str) -> Result<ParsedFeed, FeedError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let bytes = response.bytes().await?;
        debug!(url, bytes = bytes.len(), "feed downloaded");

        parse_feed(&bytes)
    }
}

pub fn parse_feed(bytes: &[u8]) -> Result<ParsedFeed, FeedError> {
    let feed = parser::parse(bytes)?;
    Ok(ParsedFeed::from(feed))
}

impl From<Feed> for ParsedFeed {
    fn from(feed: Feed) -> Self {
        ParsedFeed {
            title: feed.title.map(|text| text.content),
            entries: feed.entries.into_iter().map(RawEntry::from).collect(),
            malformed: false,
        }
    }
}

impl From<Entry> for RawEntry {
    fn from(entry: Entry) -> Self {
        let link = entry
            .links
            .iter()
            .find(|link| link.rel.as_deref() == Some("alternate"))
            .or_else(|| entry.links.first())
            .map(|link| link.href.clone());

        // feed-rs folds RSS <description> into `summary`, so there is no separate
        // description field to carry over.
        let content = entry
            .content
            .and_then(|content| content.body)
            .into_iter()
            .collect();

        let subtitle = entry
            .media
            .into_iter()
            .find_map(|media| media.description)
            .map(|text| text.content);

        RawEntry {
            title: entry.title.map(|text| text.content),
            summary: entry.summary.map(|text| text.content),
            description: None,
            content,
            subtitle,
            link,
            published: entry.published,
        }
    }
}
