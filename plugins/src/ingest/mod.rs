pub mod service;

pub use service::IngestServicePlugin;
