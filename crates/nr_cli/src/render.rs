use chrono::{DateTime, Utc};

use nr_core::{Article, Filter, ViewModel};

/// Characters of content shown on a card when an article has no summary.
pub const EXCERPT_CHARS: usize = 200;

const BAR_CELLS: usize = 24;

/// Feed header line, e.g. `3 articles found for "rust" in technology`.
pub fn headline(count: usize, filter: &Filter) -> String {
    let mut line = format!("{count} articles found");
    if let Some(search) = filter.search.as_deref() {
        line.push_str(&format!(" for \"{search}\""));
    }
    if let Some(category) = filter.category.as_deref() {
        line.push_str(&format!(" in {category}"));
    }
    line
}

/// Compact age shown on cards. Falls back to the calendar date once an
/// article is more than two days old.
pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - date).num_hours();
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if hours < 48 {
        "Yesterday".to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Full timestamp shown on the detail view.
pub fn long_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y, %I:%M %p").to_string()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn bar(width: f32) -> String {
    let filled = ((width * BAR_CELLS as f32).round() as usize).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

fn badges(article: &Article) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(category) = article.category {
        badges.push(format!("{} {}", category.emoji(), category.label()));
    }
    if let Some(sentiment) = article.sentiment {
        badges.push(format!("{} {}", sentiment.emoji(), sentiment.as_str()));
    }
    if article.is_fake {
        badges.push("⚠️ Suspicious".to_string());
    }
    badges
}

/// One feed card: badges, title, excerpt, metadata line, and the id the
/// `read` command takes.
pub fn card(article: &Article, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let badges = badges(article);
    if !badges.is_empty() {
        out.push_str(&badges.join("  "));
        out.push('\n');
    }
    out.push_str(&article.title);
    out.push('\n');
    out.push_str(&article.excerpt(EXCERPT_CHARS));
    out.push('\n');

    let mut meta = Vec::new();
    if let Some(date) = article.published_at() {
        meta.push(relative_date(date, now));
    }
    meta.push(article.source.clone());
    if let Some(author) = article.author.as_deref() {
        meta.push(format!("by {author}"));
    }
    out.push_str(&meta.join(" | "));
    out.push('\n');
    out.push_str(&format!("id: {} | {}\n", article.id, article.url));
    out
}

/// The whole feed listing. Errors and empty feeds render the matching
/// placeholder instead of cards.
pub fn article_list(view: &ViewModel, filter: &Filter, now: DateTime<Utc>) -> String {
    if let Some(message) = view.error.as_deref() {
        return format!("Error Loading Articles\n{message}\n");
    }
    if view.articles.is_empty() {
        return format!(
            "{}\n\nNo Articles Found\nTry adjusting your filters or fetch some sample news to get started.\n",
            headline(0, filter)
        );
    }

    let mut out = format!("Latest News\n{}\n\n", headline(view.articles.len(), filter));
    for article in &view.articles {
        out.push_str(&card(article, now));
        out.push('\n');
    }
    out
}

/// Trending keyword listing, capped the same way the feed caps it.
pub fn trending(view: &ViewModel) -> String {
    let mut out = String::from("Trending Now\n");
    let top = view.top_trending();
    if top.is_empty() {
        out.push_str("No trending keywords available\n");
        return out;
    }
    for keyword in top {
        out.push_str(&format!("{:>5}  {}\n", keyword.frequency, keyword.keyword));
    }
    out
}

/// Category distribution with proportional text bars.
pub fn categories(view: &ViewModel) -> String {
    let mut out = String::from("Categories\n");
    if view.category_stats.is_empty() {
        out.push_str("No category data available\n");
        return out;
    }
    for (stat, width) in view.category_bars() {
        out.push_str(&format!(
            "{:<14} {} {}\n",
            capitalize(&stat.category),
            bar(width),
            stat.count
        ));
    }
    out
}

/// Detail view shown by the `read` command: the overlay counterpart,
/// with the summary block when one exists and the full content.
pub fn article_detail(article: &Article) -> String {
    let mut out = String::new();
    let badges = badges(article);
    if !badges.is_empty() {
        out.push_str(&badges.join("  "));
        out.push('\n');
    }
    out.push_str(&article.title);
    out.push('\n');

    let mut meta = Vec::new();
    if let Some(date) = article.published_at() {
        meta.push(long_date(date));
    }
    meta.push(article.source.clone());
    if let Some(author) = article.author.as_deref() {
        meta.push(author.to_string());
    }
    out.push_str(&meta.join(" | "));
    out.push('\n');

    if let Some(summary) = article.summary.as_deref() {
        if !summary.is_empty() {
            out.push_str("\nAI Summary\n");
            out.push_str(summary);
            out.push('\n');
        }
    }
    out.push('\n');
    out.push_str(&article.content);
    out.push('\n');
    out.push_str(&format!("\nRead Original: {}\n", article.url));
    out
}
