pub mod article;
pub mod category;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod view;

pub use article::{bar_widths, Article, CategoryStat, TrendingKeyword};
pub use category::{Category, Sentiment};
pub use error::{Error, Result};
pub use filter::{Filter, FilterField};
pub use gateway::NewsGateway;
pub use view::ViewModel;
