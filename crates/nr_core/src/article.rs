use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::{Category, Sentiment};

/// A single article as served by the aggregation API. Read-only on the
/// client; list order is server-determined and never re-sorted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, with = "flexible_date")]
    pub published_date: Option<DateTime<Utc>>,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub is_fake: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, with = "flexible_date")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Publication timestamp, falling back to ingestion time.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_date.or(self.created_at)
    }

    /// Card blurb: the summary when present and non-empty, otherwise a
    /// character-safe prefix of the content with a trailing ellipsis.
    pub fn excerpt(&self, max_chars: usize) -> String {
        match self.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary.to_string(),
            _ => {
                if self.content.chars().count() <= max_chars {
                    self.content.clone()
                } else {
                    let prefix: String = self.content.chars().take(max_chars).collect();
                    format!("{}...", prefix)
                }
            }
        }
    }
}

/// Keyword with its occurrence count, served frequency-descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingKeyword {
    pub keyword: String,
    #[serde(default)]
    pub frequency: u64,
}

/// One bucket of the category distribution. The category string stays
/// raw: the analytics vocabulary is open-ended on the server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: String,
    #[serde(default)]
    pub count: u64,
}

/// Relative bar widths for a category distribution, scaled against the
/// largest count and clamped to 1.0. An all-zero distribution yields
/// all-zero widths rather than dividing by zero.
pub fn bar_widths(stats: &[CategoryStat]) -> Vec<f32> {
    let max = stats.iter().map(|stat| stat.count).max().unwrap_or(0);
    if max == 0 {
        return vec![0.0; stats.len()];
    }
    stats
        .iter()
        .map(|stat| (stat.count as f32 / max as f32).min(1.0))
        .collect()
}

/// Serde adapter for timestamps. The API emits naive ISO 8601 strings
/// (no offset), while other deployments send RFC 3339; both are read as
/// UTC, and anything unparseable reads as absent instead of failing the
/// whole article.
mod flexible_date {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_timestamp))
    }

    fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "88a570cf-5f9a-4b5c-9579-ef55a35bbd8f",
            "title": "Chip startup raises new round",
            "url": "https://example.com/chip-startup",
            "source": "TechWire",
            "author": "Dana Cruz",
            "published_date": "2025-08-20T14:30:00.123456",
            "content": "The round values the company at...",
            "summary": null,
            "category": "technology",
            "sentiment": "positive",
            "is_fake": false,
            "image_url": null,
            "created_at": "2025-08-20T15:00:00"
        }"#
    }

    #[test]
    fn parses_backend_article_json() {
        let article: Article = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(article.id, "88a570cf-5f9a-4b5c-9579-ef55a35bbd8f");
        assert_eq!(article.category, Some(Category::Technology));
        assert_eq!(article.sentiment, Some(Sentiment::Positive));
        assert!(!article.is_fake);
        assert_eq!(
            article.published_date.unwrap().to_rfc3339(),
            "2025-08-20T14:30:00.123456+00:00"
        );
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let minimal = r#"{
            "id": "1",
            "title": "t",
            "url": "https://example.com/t",
            "source": "s",
            "content": "c"
        }"#;
        let article: Article = serde_json::from_str(minimal).unwrap();
        assert!(article.author.is_none());
        assert!(article.category.is_none());
        assert!(!article.is_fake);
        assert!(article.published_at().is_none());
    }

    #[test]
    fn unparseable_date_reads_as_absent() {
        let odd = r#"{
            "id": "1",
            "title": "t",
            "url": "https://example.com/t",
            "source": "s",
            "content": "c",
            "published_date": "not a date"
        }"#;
        let article: Article = serde_json::from_str(odd).unwrap();
        assert!(article.published_date.is_none());
    }

    #[test]
    fn published_at_prefers_published_date() {
        let article: Article = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(article.published_at(), article.published_date);

        let ingested_only = r#"{
            "id": "2",
            "title": "t",
            "url": "https://example.com/t2",
            "source": "s",
            "content": "c",
            "created_at": "2025-08-21T09:00:00"
        }"#;
        let article: Article = serde_json::from_str(ingested_only).unwrap();
        assert_eq!(article.published_at(), article.created_at);
    }

    #[test]
    fn excerpt_prefers_summary_and_truncates_on_chars() {
        let mut article: Article = serde_json::from_str(sample_json()).unwrap();
        article.summary = Some("Short take.".to_string());
        assert_eq!(article.excerpt(200), "Short take.");

        article.summary = Some(String::new());
        article.content = "añejo ".repeat(50);
        let excerpt = article.excerpt(10);
        assert_eq!(excerpt, "añejo añej...");
        assert_eq!(excerpt.chars().count(), 13);
    }

    #[test]
    fn bar_widths_scale_to_largest_count() {
        let stats = vec![
            CategoryStat { category: "technology".into(), count: 10 },
            CategoryStat { category: "business".into(), count: 5 },
        ];
        assert_eq!(bar_widths(&stats), vec![1.0, 0.5]);
    }

    #[test]
    fn bar_widths_guard_all_zero_counts() {
        let stats = vec![
            CategoryStat { category: "technology".into(), count: 0 },
            CategoryStat { category: "business".into(), count: 0 },
        ];
        assert_eq!(bar_widths(&stats), vec![0.0, 0.0]);
        assert!(bar_widths(&[]).is_empty());
    }
}
