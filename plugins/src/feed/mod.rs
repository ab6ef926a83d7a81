pub mod file;
pub mod http;

pub use file::FileFeedSource;
pub use http::HttpFeedSource;
