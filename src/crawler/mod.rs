pub mod arxiv;
pub mod feed;
pub mod query;

pub use arxiv::ArxivClient;
pub use feed::parse_feed;
pub use query::build_query;
