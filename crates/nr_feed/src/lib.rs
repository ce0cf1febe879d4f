pub mod feed;
pub mod store;

pub use feed::NewsFeed;
pub use store::FilterStore;
