use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default iocdrop data directory: ~/.iocdrop
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".iocdrop"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.iocdrop/config.toml
    let data_dir = get_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    default_log_dir(&mut cfg, &data_dir);
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

/// File logging without a directory writes to `<data_dir>/logs`.
pub fn default_log_dir(cfg: &mut AppConfig, data_dir: &Path) {
    if cfg.logging.file
        && cfg
            .logging
            .directory
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    Ok(cfg)
}

/// Environment variable overrides (highest priority after CLI flags).
/// Blank values are ignored.
pub fn apply_env_overrides(cfg: &mut AppConfig, get: impl Fn(&str) -> Option<String>) {
    let non_blank = |key: &str| get(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank("IOCDROP_INGEST_URL") {
        cfg.ingest.url = v;
    }
    if let Some(v) = non_blank("IOCDROP_API_KEY") {
        cfg.ingest.api_key = v;
    }
    if let Some(v) = non_blank("IOCDROP_FEED_SOURCE") {
        cfg.feed.source = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn env_overrides_skip_blank_values() {
        let env: HashMap<&str, &str> = [
            ("IOCDROP_INGEST_URL", "https://ingest.example"),
            ("IOCDROP_API_KEY", "   "),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        cfg.ingest.api_key = "keep".to_string();
        apply_env_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.ingest.url, "https://ingest.example");
        assert_eq!(cfg.ingest.api_key, "keep");
        assert_eq!(cfg.feed.source, "data/ioc.json");
    }

    #[test]
    fn load_from_path_reads_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[feed]\nsource = \"https://feed.example/ioc.json\"").unwrap();
        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(cfg.feed.source, "https://feed.example/ioc.json");
    }

    #[test]
    fn file_logging_defaults_to_data_dir_logs() {
        let data_dir = Path::new("/home/analyst/.iocdrop");
        let mut cfg = AppConfig::default();
        default_log_dir(&mut cfg, data_dir);
        assert_eq!(cfg.logging.directory, None);

        cfg.logging.file = true;
        cfg.logging.directory = Some("  ".to_string());
        default_log_dir(&mut cfg, data_dir);
        assert_eq!(
            cfg.logging.directory.as_deref().map(Path::new),
            Some(data_dir.join("logs").as_path())
        );

        cfg.logging.directory = Some("/var/log/iocdrop".to_string());
        default_log_dir(&mut cfg, data_dir);
        assert_eq!(cfg.logging.directory.as_deref(), Some("/var/log/iocdrop"));
    }

    #[test]
    fn load_from_path_reports_invalid_toml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[feed\nsource = 1").unwrap();
        let err = load_from_path(f.path()).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
