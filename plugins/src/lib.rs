pub mod factory;
pub mod feed;
pub mod http_client;
pub mod ingest;

pub use http_client::{HttpClient, HttpError};
