pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod indicator;
pub mod ingest;
pub mod input;
