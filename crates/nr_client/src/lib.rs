use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use nr_core::{Article, CategoryStat, Error, Filter, NewsGateway, Result, TrendingKeyword};

/// API root used when no base URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`HttpGateway`], injected at construction.
/// The gateway never consults the environment on its own.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GatewayConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
struct ArticlesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
struct TrendingResponse {
    #[serde(default)]
    trending_keywords: Vec<TrendingKeyword>,
}

#[derive(Deserialize)]
struct StatsResponse {
    #[serde(default)]
    category_distribution: Vec<CategoryStat>,
}

/// reqwest-backed [`NewsGateway`] over the aggregation API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("base URL must not be empty".to_string()));
        }
        Url::parse(&base_url)
            .map_err(|err| Error::Config(format!("invalid base URL {base_url:?}: {err}")))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| Error::Config(format!("HTTP client setup failed: {err}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_trending(&self) -> Result<Vec<TrendingKeyword>> {
        let response = self
            .client
            .get(format!("{}/ai/trending-keywords", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "trending keywords request returned {status}"
            )));
        }

        let parsed: TrendingResponse = response.json().await?;
        Ok(parsed.trending_keywords)
    }

    async fn fetch_stats(&self) -> Result<Vec<CategoryStat>> {
        let response = self
            .client
            .get(format!("{}/ai/category-stats", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "category stats request returned {status}"
            )));
        }

        let parsed: StatsResponse = response.json().await?;
        Ok(parsed.category_distribution)
    }
}

#[async_trait]
impl NewsGateway for HttpGateway {
    async fn list_articles(&self, filter: &Filter) -> Result<Vec<Article>> {
        debug!(?filter, "requesting articles");
        let response = self
            .client
            .get(format!("{}/articles", self.base_url))
            .query(&filter.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "articles request returned {status}"
            )));
        }

        let parsed: ArticlesResponse = response.json().await?;
        debug!(count = parsed.articles.len(), "articles received");
        Ok(parsed.articles)
    }

    async fn trending_keywords(&self) -> Vec<TrendingKeyword> {
        match self.fetch_trending().await {
            Ok(keywords) => keywords,
            Err(err) => {
                warn!("trending keywords unavailable: {err}");
                Vec::new()
            }
        }
    }

    async fn category_stats(&self) -> Vec<CategoryStat> {
        match self.fetch_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!("category stats unavailable: {err}");
                Vec::new()
            }
        }
    }

    async fn trigger_bulk_fetch(&self) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/news/bulk-fetch", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "bulk fetch request returned {status}"
            )));
        }
        Ok(())
    }

    async fn trigger_analysis(&self) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/ai/analyze-stored-articles", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "analysis request returned {status}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_local_api() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn new_trims_trailing_slashes() {
        let gateway =
            HttpGateway::new(GatewayConfig::with_base_url("http://localhost:5000/api/")).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn new_rejects_empty_base_url() {
        let err = HttpGateway::new(GatewayConfig::with_base_url("")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn new_rejects_unparseable_base_url() {
        let err = HttpGateway::new(GatewayConfig::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
