use std::{path::Path, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    api,
    catalog::Catalog,
    config::AppConfig,
    fetcher::{Aggregator, HttpFeedTransport},
};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
    pub default_max_articles: usize,
}

pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let catalog = match config.catalog.file.as_deref() {
        Some(path) => Catalog::load(Path::new(path))?,
        None => Catalog::builtin()?,
    };
    tracing::info!(
        continents = catalog.continents().len(),
        custom = config.catalog.file.is_some(),
        "catalog loaded"
    );

    let transport =
        HttpFeedTransport::new(&config.fetcher).context("failed to build feed http client")?;
    let aggregator = Aggregator::new(Arc::new(catalog), Arc::new(transport), &config.fetcher);

    Ok(AppState {
        aggregator,
        default_max_articles: config.fetcher.default_max_articles,
    })
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Router::new()
        .route("/healthz", get(api::health::health_check))
        .route("/api/continents", get(api::catalog::list_continents))
        .route("/api/continents/:continent", get(api::catalog::get_continent))
        .route(
            "/api/continents/:continent/news/:country_code",
            get(api::news::continent_country_news),
        )
        .route("/api/categories", get(api::catalog::list_categories))
        .route("/api/news/:country_code", get(api::news::country_news))
        .layer(middleware)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::FetcherConfig,
        error::FeedError,
        fetcher::FeedTransport,
        model::{ParsedFeed, RawEntry},
    };

    /// Every URL returns the same two-entry feed.
    struct StaticTransport;

    #[async_trait]
    impl FeedTransport for StaticTransport {
        async fn fetch(&self, url: &str) -> Result<ParsedFeed, FeedError> {
            Ok(ParsedFeed {
                title: Some(format!("Feed at {url}")),
                entries: vec![
                    RawEntry {
                        title: Some("Cricket final draws record crowd".into()),
                        link: Some("https://news.example/1".into()),
                        ..RawEntry::default()
                    },
                    RawEntry {
                        title: Some("Minister's \"bold\" plan".into()),
                        ..RawEntry::default()
                    },
                ],
                malformed: false,
            })
        }
    }

    fn router() -> Router {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        let aggregator = Aggregator::new(
            catalog,
            Arc::new(StaticTransport),
            &FetcherConfig::default(),
        );
        build_router(AppState {
            aggregator,
            default_max_articles: 10,
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = get_json("/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["continents"], 6);
    }

    #[tokio::test]
    async fn news_for_country_code() {
        // India has two feeds, each yielding two entries.
        let (status, body) = get_json("/api/news/in").await;
        assert_eq!(status, StatusCode::OK);
        let articles = body.as_array().unwrap();
        assert_eq!(articles.len(), 4);

        let first = &articles[0];
        assert_eq!(first["category"], "Sports");
        assert_eq!(first["country"], "India");
        assert_eq!(first["country_code"], "in");
        assert_eq!(first["published"], "Recently published");
        assert_eq!(
            first["source"],
            "Feed at https://feeds.feedburner.com/ndtvnews-top-stories"
        );

        let second = &articles[1];
        assert_eq!(second["url"], "#");
        assert_eq!(second["safe_title"], "Minister s  bold  plan");
        assert_eq!(second["category"], "Politics");
    }

    #[tokio::test]
    async fn max_query_caps_results() {
        let (_, body) = get_json("/api/news/in?max=3").await;
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (status, body) = get_json("/api/news/in?max=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BadRequest");
    }

    #[tokio::test]
    async fn unknown_country_code_is_empty_list() {
        let (status, body) = get_json("/api/news/zz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn continent_country_route_validates_membership() {
        let (status, body) = get_json("/api/continents/asia/news/jp").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["country"], "Japan");
        assert_eq!(body["continent"], "Asia");
        assert_eq!(body["articles"].as_array().unwrap().len(), 2);

        let (status, body) = get_json("/api/continents/europe/news/jp").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NotFound");

        let (status, _) = get_json("/api/continents/atlantis/news/jp").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn catalog_routes() {
        let (status, body) = get_json("/api/continents").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 6);

        let (_, body) = get_json("/api/continents/oceania").await;
        assert_eq!(body["countries"][1]["name"], "New Zealand");

        let (status, _) = get_json("/api/continents/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = get_json("/api/categories").await;
        let categories = body.as_array().unwrap();
        assert_eq!(categories.len(), 9);
        assert_eq!(categories[8]["label"], "General");
        assert_eq!(categories[8]["color"], "secondary");
    }
}
