use std::{collections::HashSet, fs, path::Path};

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use url::Url;

use crate::model::{ContinentOut, CountryOut};

const BUILTIN_CATALOG: &str = include_str!("../config/catalog.yaml");

/// A country and the feeds polled for it, in fetch order.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedSource {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub feeds: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Continent {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    pub countries: Vec<FeedSource>,
}

impl Continent {
    pub fn country(&self, code: &str) -> Option<&FeedSource> {
        self.countries.iter().find(|c| c.code == code)
    }
}

/// Read-only country/feed table, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    continents: Vec<Continent>,
}

impl Catalog {
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG).context("built-in catalog is invalid")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file {:?}", path))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("failed to load catalog file {:?}", path))
    }

    pub fn from_yaml_str(contents: &str) -> anyhow::Result<Self> {
        let catalog: Catalog =
            serde_yaml::from_str(contents).context("failed to parse catalog yaml")?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut continent_keys = HashSet::new();
        let mut country_codes = HashSet::new();

        for continent in &self.continents {
            if !continent_keys.insert(continent.key.as_str()) {
                bail!("duplicate continent key {:?}", continent.key);
            }
            for country in &continent.countries {
                if country.code.trim().is_empty() {
                    bail!("country without code in continent {:?}", continent.key);
                }
                if !country_codes.insert(country.code.as_str()) {
                    bail!("duplicate country code {:?}", country.code);
                }
                for feed in &country.feeds {
                    let url = Url::parse(feed).with_context(|| {
                        format!("invalid feed url {feed:?} for {}", country.code)
                    })?;
                    if !matches!(url.scheme(), "http" | "https") {
                        return Err(anyhow!(
                            "feed url {feed:?} for {} must be http or https",
                            country.code
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn continents(&self) -> &[Continent] {
        &self.continents
    }

    pub fn continent(&self, key: &str) -> Option<&Continent> {
        self.continents.iter().find(|c| c.key == key)
    }

    pub fn source(&self, code: &str) -> Option<&FeedSource> {
        self.continents.iter().find_map(|c| c.country(code))
    }
}

impl From<&FeedSource> for CountryOut {
    fn from(source: &FeedSource) -> Self {
        CountryOut {
            code: source.code.clone(),
            name: source.name.clone(),
            flag: source.flag.clone(),
            feed_count: source.feeds.len(),
        }
    }
}

impl From<&Continent> for ContinentOut {
    fn from(continent: &Continent) -> Self {
        ContinentOut {
            key: continent.key.clone(),
            name: continent.name.clone(),
            emoji: continent.emoji.clone(),
            description: continent.description.clone(),
            color: continent.color.clone(),
            countries: continent.countries.iter().map(CountryOut::from).collect(),
        }
    }
}
