use serde::{Deserialize, Serialize};

/// Field selector for [`Filter::with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Category,
    Sentiment,
    Source,
}

/// The complete article query. Values are replaced wholesale, never
/// mutated in place; the empty filter means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sentiment: Option<String>,
    pub source: Option<String>,
}

impl Filter {
    /// Replacement filter differing only in the given field. Empty
    /// strings and the `"all"` placeholder clear the field.
    pub fn with(&self, field: FilterField, value: impl Into<String>) -> Filter {
        let value = normalize(value.into());
        let mut next = self.clone();
        match field {
            FilterField::Search => next.search = value,
            FilterField::Category => next.category = value,
            FilterField::Sentiment => next.sentiment = value,
            FilterField::Source => next.source = value,
        }
        next
    }

    /// Query pairs for the articles request. Unset fields are omitted
    /// entirely, never sent as empty parameters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(sentiment) = &self.sentiment {
            pairs.push(("sentiment", sentiment.clone()));
        }
        if let Some(source) = &self.source {
            pairs.push(("source", source.clone()));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.sentiment.is_none()
            && self.source.is_none()
    }
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_replaces_only_the_named_field() {
        let base = Filter::default().with(FilterField::Category, "technology");
        let next = base.with(FilterField::Search, "ai");
        assert_eq!(next.search.as_deref(), Some("ai"));
        assert_eq!(next.category.as_deref(), Some("technology"));
        assert_eq!(base.search, None);
    }

    #[test]
    fn all_and_empty_clear_the_field() {
        let filter = Filter::default()
            .with(FilterField::Category, "technology")
            .with(FilterField::Category, "all");
        assert!(filter.category.is_none());

        let filter = Filter::default()
            .with(FilterField::Search, "ai")
            .with(FilterField::Search, "  ");
        assert!(filter.search.is_none());
        assert!(filter.is_empty());
    }

    #[test]
    fn query_pairs_omit_unset_fields() {
        let filter = Filter::default()
            .with(FilterField::Search, "ai")
            .with(FilterField::Category, "all");
        assert_eq!(filter.query_pairs(), vec![("search", "ai".to_string())]);

        assert!(Filter::default().query_pairs().is_empty());
    }

    #[test]
    fn query_pairs_cover_every_set_field() {
        let filter = Filter {
            search: Some("rates".into()),
            category: Some("business".into()),
            sentiment: Some("negative".into()),
            source: Some("Reuters".into()),
        };
        let pairs = filter.query_pairs();
        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&("sentiment", "negative".to_string())));
        assert!(pairs.contains(&("source", "Reuters".to_string())));
    }

    #[test]
    fn identical_updates_compare_equal() {
        let first = Filter::default().with(FilterField::Category, "all");
        let second = first.with(FilterField::Category, "all");
        assert_eq!(first, second);
    }
}
