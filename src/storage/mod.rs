pub mod cache;
pub mod models;

pub use cache::{read_cache, write_cache};
pub use models::CacheDocument;
