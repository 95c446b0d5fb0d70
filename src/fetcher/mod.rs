pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use tracing::{debug, info, warn};

use crate::{
    catalog::{Catalog, FeedSource},
    config::FetcherConfig,
    error::FeedError,
    model::{Article, ParsedFeed},
    news::build_article,
};

pub use http::HttpFeedTransport;

/// Retrieves and parses one feed.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ParsedFeed, FeedError>;
}

/// Turns a country code into a flat, capped list of normalized articles.
#[derive(Clone)]
pub struct Aggregator {
    catalog: Arc<Catalog>,
    transport: Arc<dyn FeedTransport>,
    per_feed_limit: usize,
    concurrency: usize,
}

impl Aggregator {
    pub fn new(
        catalog: Arc<Catalog>,
        transport: Arc<dyn FeedTransport>,
        config: &FetcherConfig,
    ) -> Self {
        Self {
            catalog,
            transport,
            per_feed_limit: config.per_feed_limit.max(1),
            concurrency: config.concurrency.max(1),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Articles for `country_code`, feed declaration order then entry order, at most
    /// `max_articles` long. Unknown codes and failing feeds yield fewer (or zero) articles,
    /// never an error.
    pub async fn fetch_news(&self, country_code: &str, max_articles: usize) -> Vec<Article> {
        let Some(source) = self.catalog.source(country_code) else {
            debug!(country_code, "no feeds configured for country");
            return Vec::new();
        };

        // `buffered` yields results in input order regardless of completion order.
        // URLs are owned so the stream's futures don't borrow per-item and stay `Send`.
        let per_feed: Vec<Vec<Article>> = stream::iter(source.feeds.clone())
            .map(|url| async move { self.collect_feed(source, &url).await })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut articles: Vec<Article> = per_feed.into_iter().flatten().collect();
        info!(
            country_code,
            feeds = source.feeds.len(),
            count = articles.len(),
            "aggregated country news"
        );

        articles.truncate(max_articles);
        articles
    }

    /// Failure boundary for a single feed: any error becomes an empty list.
    async fn collect_feed(&self, source: &FeedSource, url: &str) -> Vec<Article> {
        debug!(url, country_code = %source.code, "fetching feed");

        let feed = match self.load_feed(url).await {
            Ok(feed) => feed,
            Err(err) => {
                warn!(url, error = %err, "skipping feed");
                return Vec::new();
            }
        };

        debug!(url, entries = feed.entries.len(), "feed parsed");

        let feed_title = feed.title.as_deref();
        feed.entries
            .iter()
            .take(self.per_feed_limit)
            .map(|entry| build_article(entry, feed_title, source))
            .collect()
    }

    async fn load_feed(&self, url: &str) -> Result<ParsedFeed, FeedError> {
        let feed = self.transport.fetch(url).await?;
        if feed.malformed && feed.entries.is_empty() {
            return Err(FeedError::Malformed);
        }
        Ok(feed)
    }
}
