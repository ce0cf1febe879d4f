use async_trait::async_trait;

use crate::article::{Article, CategoryStat, TrendingKeyword};
use crate::filter::Filter;
use crate::Result;

/// Remote news API surface the feed depends on. The HTTP implementation
/// lives in `nr_client`; tests substitute their own.
#[async_trait]
pub trait NewsGateway: Send + Sync {
    /// Fetch articles matching the filter
    async fn list_articles(&self, filter: &Filter) -> Result<Vec<Article>>;

    /// Trending keywords; best effort, failures yield an empty list
    async fn trending_keywords(&self) -> Vec<TrendingKeyword>;

    /// Category distribution; best effort, failures yield an empty list
    async fn category_stats(&self) -> Vec<CategoryStat>;

    /// Ask the server to ingest a fresh batch of articles
    async fn trigger_bulk_fetch(&self) -> Result<()>;

    /// Ask the server to analyze stored articles
    async fn trigger_analysis(&self) -> Result<()>;
}
