//! Article persistence.

pub mod models;
pub mod store;

pub use models::{Article, NewArticle, parse_flexible_datetime};
pub use store::ArticleStore;
