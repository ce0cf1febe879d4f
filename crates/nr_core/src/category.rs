use serde::{Deserialize, Serialize};

/// Article category vocabulary. The server's vocabulary is not
/// contractually fixed, so unknown values collapse to `General`
/// instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Technology,
    Business,
    Sports,
    Health,
    Science,
    Entertainment,
    Politics,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Sports => "sports",
            Category::Health => "health",
            Category::Science => "science",
            Category::Entertainment => "entertainment",
            Category::Politics => "politics",
            Category::General => "general",
        }
    }

    /// Capitalized form shown on badges and menus.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Sports => "Sports",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Entertainment => "Entertainment",
            Category::Politics => "Politics",
            Category::General => "General",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Technology => "💻",
            Category::Business => "💼",
            Category::Sports => "⚽",
            Category::Health => "🏥",
            Category::Science => "🔬",
            Category::Entertainment => "🎬",
            Category::Politics => "🏛️",
            Category::General => "📰",
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "technology" => Category::Technology,
            "business" => Category::Business,
            "sports" => Category::Sports,
            "health" => Category::Health,
            "science" => Category::Science,
            "entertainment" => Category::Entertainment,
            "politics" => Category::Politics,
            _ => Category::General,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment tag attached by server-side analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Negative => "😟",
            Sentiment::Neutral => "😐",
        }
    }
}

impl From<&str> for Sentiment {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl From<String> for Sentiment {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<Sentiment> for String {
    fn from(value: Sentiment) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_round_trip() {
        assert_eq!(Category::from("technology"), Category::Technology);
        assert_eq!(Category::from("Politics"), Category::Politics);
        assert_eq!(String::from(Category::Science), "science");
    }

    #[test]
    fn unknown_category_falls_back_to_general() {
        assert_eq!(Category::from("cryptozoology"), Category::General);
        assert_eq!(Category::from(""), Category::General);
    }

    #[test]
    fn unknown_sentiment_falls_back_to_neutral() {
        assert_eq!(Sentiment::from("mixed"), Sentiment::Neutral);
        assert_eq!(Sentiment::from("NEGATIVE"), Sentiment::Negative);
    }

    #[test]
    fn deserializes_from_json_strings() {
        let category: Category = serde_json::from_str("\"sports\"").unwrap();
        assert_eq!(category, Category::Sports);

        let odd: Category = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(odd, Category::General);

        let sentiment: Sentiment = serde_json::from_str("\"positive\"").unwrap();
        assert_eq!(sentiment, Sentiment::Positive);
    }
}
