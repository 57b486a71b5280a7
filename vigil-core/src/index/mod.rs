pub mod search_http;

pub use search_http::HttpSearchIndex;
