pub mod api;
pub mod query;


pub use api::{ArticleClient, ListOptions};
pub use query::{ArticleQuery, Direction};
