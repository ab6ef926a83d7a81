mod load;
mod types;

pub use load::{apply_env_overrides, default_log_dir, get_data_dir, load_default, load_from_path};
pub use types::{AppConfig, FeedConfig, IngestConfig, LimitsConfig, LoggingConfig};
