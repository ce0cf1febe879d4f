use crate::article::{bar_widths, Article, CategoryStat, TrendingKeyword};

/// How many trending keywords the sidebar shows.
pub const TRENDING_LIMIT: usize = 10;

/// Render-ready snapshot of everything the news screen displays.
/// Written only by the feed task; consumers receive whole cloned
/// snapshots and never mutate fields in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    pub articles: Vec<Article>,
    pub loading: bool,
    pub error: Option<String>,
    pub trending: Vec<TrendingKeyword>,
    pub category_stats: Vec<CategoryStat>,
    pub selected: Option<Article>,
    pub overlay_open: bool,
}

impl ViewModel {
    /// Top trending keywords capped for display; the full list stays
    /// available in `trending`.
    pub fn top_trending(&self) -> &[TrendingKeyword] {
        let shown = self.trending.len().min(TRENDING_LIMIT);
        &self.trending[..shown]
    }

    /// Category distribution paired with its relative bar width.
    pub fn category_bars(&self) -> Vec<(CategoryStat, f32)> {
        let widths = bar_widths(&self.category_stats);
        self.category_stats.iter().cloned().zip(widths).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(word: &str, frequency: u64) -> TrendingKeyword {
        TrendingKeyword { keyword: word.to_string(), frequency }
    }

    #[test]
    fn top_trending_caps_at_limit() {
        let mut view = ViewModel::default();
        view.trending = (0..15).map(|i| keyword(&format!("kw{i}"), 15 - i)).collect();
        assert_eq!(view.top_trending().len(), TRENDING_LIMIT);
        assert_eq!(view.top_trending()[0].keyword, "kw0");
        assert_eq!(view.trending.len(), 15);
    }

    #[test]
    fn top_trending_handles_short_lists() {
        let mut view = ViewModel::default();
        view.trending = vec![keyword("ai", 3)];
        assert_eq!(view.top_trending().len(), 1);
        assert!(ViewModel::default().top_trending().is_empty());
    }

    #[test]
    fn category_bars_pair_stats_with_widths() {
        let mut view = ViewModel::default();
        view.category_stats = vec![
            CategoryStat { category: "technology".into(), count: 10 },
            CategoryStat { category: "business".into(), count: 5 },
        ];
        let bars = view.category_bars();
        assert_eq!(bars[0].1, 1.0);
        assert_eq!(bars[1].1, 0.5);
        assert_eq!(bars[1].0.category, "business");
    }
}
