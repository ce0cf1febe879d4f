use std::sync::Arc;

use tokio::sync::watch;

use nr_core::{Filter, FilterField};

/// Holds the current article query and publishes replacements to
/// subscribers. Every setter builds a whole new [`Filter`]; updates
/// that change nothing are suppressed, so subscribers observe exactly
/// one event per effective change.
#[derive(Debug, Clone)]
pub struct FilterStore {
    tx: Arc<watch::Sender<Filter>>,
}

impl FilterStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Filter::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Filter {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Filter> {
        self.tx.subscribe()
    }

    pub fn set_search(&self, text: impl Into<String>) {
        self.set_field(FilterField::Search, text);
    }

    pub fn set_category(&self, category: impl Into<String>) {
        self.set_field(FilterField::Category, category);
    }

    pub fn set_sentiment(&self, sentiment: impl Into<String>) {
        self.set_field(FilterField::Sentiment, sentiment);
    }

    pub fn set_source(&self, source: impl Into<String>) {
        self.set_field(FilterField::Source, source);
    }

    pub fn set_field(&self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        self.tx.send_if_modified(|filter| {
            let next = filter.with(field, value.as_str());
            if next == *filter {
                false
            } else {
                *filter = next;
                true
            }
        });
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn setters_publish_replacement_filters() {
        let store = FilterStore::new();
        let mut rx = store.subscribe();

        store.set_search("ai");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().search.as_deref(), Some("ai"));

        store.set_category("technology");
        rx.changed().await.unwrap();
        let current = rx.borrow_and_update().clone();
        assert_eq!(current.search.as_deref(), Some("ai"));
        assert_eq!(current.category.as_deref(), Some("technology"));
    }

    #[test]
    fn all_resets_the_category() {
        let store = FilterStore::new();
        store.set_category("technology");
        store.set_category("all");
        assert!(store.current().category.is_none());
    }

    #[test]
    fn ineffective_updates_do_not_notify() {
        let store = FilterStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.set_category("all");
        assert!(!rx.has_changed().unwrap());

        store.set_category("sports");
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.set_category("sports");
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn whitespace_search_clears_the_field() {
        let store = FilterStore::new();
        store.set_search("ai");
        store.set_search("   ");
        assert!(store.current().search.is_none());
    }

    #[test]
    fn set_field_reaches_every_slot() {
        let store = FilterStore::new();
        store.set_field(FilterField::Sentiment, "negative");
        store.set_field(FilterField::Source, "Reuters");
        let current = store.current();
        assert_eq!(current.sentiment.as_deref(), Some("negative"));
        assert_eq!(current.source.as_deref(), Some("Reuters"));
    }
}
