use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Feeds of one country fetched at the same time. 1 fetches them one after another.
    pub concurrency: usize,
    pub request_timeout_secs: u64,
    pub per_feed_limit: usize,
    pub default_max_articles: usize,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            request_timeout_secs: 15,
            per_feed_limit: 6,
            default_max_articles: 10,
            user_agent: "RegionalNewsFetcher/0.1".to_string(),
        }
    }
}

impl FetcherConfig {
    fn normalized(mut self) -> Self {
        if self.concurrency == 0 {
            self.concurrency = 1;
        }
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = 10;
        }
        if self.per_feed_limit == 0 {
            self.per_feed_limit = 6;
        }
        if self.default_max_articles == 0 {
            self.default_max_articles = 10;
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = FetcherConfig::default().user_agent;
        }
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// YAML file replacing the built-in country/feed table.
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: String,
    pub level: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: "logs/regional_news.log".to_string(),
            level: Some("info".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub fetcher: FetcherConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let explicit_path = std::env::var("CONFIG_FILE").ok();
        let config = if let Some(path) = explicit_path {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(anyhow!("config file {:?} not found", path));
            }
            Self::load_from_file(&path)?
        } else {
            let path = locate_default_config();
            if let Some(path) = path {
                Self::load_from_file(&path)?
            } else {
                AppConfig::default()
            }
        };

        Self::apply_env_overrides(config)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("failed to parse config file {:?}", path))
    }

    pub fn from_yaml_str(contents: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    fn apply_env_overrides(mut config: AppConfig) -> anyhow::Result<AppConfig> {
        if let Ok(bind) = std::env::var("SERVER_BIND") {
            config.server.bind = bind;
        }

        if let Some(concurrency) = parse_optional_env("FETCH_CONCURRENCY")? {
            config.fetcher.concurrency = concurrency;
        }

        if let Some(timeout) = parse_optional_env("FETCH_TIMEOUT_SECS")? {
            config.fetcher.request_timeout_secs = timeout;
        }

        if let Some(limit) = parse_optional_env("FETCH_PER_FEED_LIMIT")? {
            config.fetcher.per_feed_limit = limit;
        }

        if let Some(max) = parse_optional_env("NEWS_MAX_ARTICLES")? {
            config.fetcher.default_max_articles = max;
        }

        if let Ok(catalog_file) = std::env::var("CATALOG_FILE") {
            config.catalog.file = Some(catalog_file);
        }

        if let Ok(log_file) = std::env::var("LOG_FILE_PATH") {
            config.logging.file = log_file;
        }

        if let Ok(log_level) = std::env::var("LOG_LEVEL") {
            config.logging.level = Some(log_level);
        }

        config.fetcher = config.fetcher.normalized();
        Ok(config)
    }
}

fn parse_optional_env<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => Ok(Some(
            v.parse::<T>()
                .with_context(|| format!("{key} must be a valid value"))?,
        )),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn locate_default_config() -> Option<PathBuf> {
    let candidates = [
        PathBuf::from("config/config.yaml"),
        PathBuf::from("../config/config.yaml"),
    ];

    candidates.into_iter().find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml_str(
            r#"
server:
  bind: "0.0.0.0:9000"
fetcher:
  concurrency: 2
"#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.fetcher.concurrency, 2);
        assert_eq!(config.fetcher.per_feed_limit, 6);
        assert_eq!(config.fetcher.default_max_articles, 10);
        assert!(config.catalog.file.is_none());
        assert_eq!(config.logging.level.as_deref(), Some("info"));
    }

    #[test]
    fn zero_values_are_normalized() {
        let fetcher = FetcherConfig {
            concurrency: 0,
            request_timeout_secs: 0,
            per_feed_limit: 0,
            default_max_articles: 0,
            user_agent: " ".to_string(),
        }
        .normalized();

        assert_eq!(fetcher.concurrency, 1);
        assert_eq!(fetcher.request_timeout_secs, 10);
        assert_eq!(fetcher.per_feed_limit, 6);
        assert_eq!(fetcher.default_max_articles, 10);
        assert_eq!(fetcher.user_agent, FetcherConfig::default().user_agent);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(AppConfig::from_yaml_str("fetcher:\n  concurrency: lots\n").is_err());
    }
}
