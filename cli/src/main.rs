use clap::Parser;
mod commands;
use commands::cli;
use iocdrop_core::config;
use iocdrop_core::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();
    let cfg = load_config(args.config.as_deref())?;
    init_tracing(&cfg.logging).map_err(error::CliError::Config)?;

    dispatch(args.command, &cfg).await?;
    Ok(0)
}

fn load_config(path: Option<&str>) -> Result<config::AppConfig, error::CliError> {
    match path {
        Some(p) => {
            let mut cfg = config::load_from_path(std::path::Path::new(p))
                .map_err(|e| error::CliError::Config(e.to_string()))?;
            if cfg.logging.file {
                let data_dir =
                    config::get_data_dir().map_err(|e| error::CliError::Config(e.to_string()))?;
                config::default_log_dir(&mut cfg, &data_dir);
            }
            config::apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
            Ok(cfg)
        }
        None => config::load_default().map_err(|e| error::CliError::Config(e.to_string())),
    }
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: success
    // 11: config error
    // 12: input error / nothing left to submit
    // 20: IO or feed error
    // 30: submission rejected or unreachable
    // 50: internal/uncategorized
    match e {
        error::CliError::Config(_) => 11,
        error::CliError::Input(_) => 12,
        error::CliError::NoValidItems => 12,
        error::CliError::Io(_) => 20,
        error::CliError::Feed(_) => 20,
        error::CliError::Submit(_) => 30,
        error::CliError::Command(_) => 50,
        error::CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(cmd: cli::Commands, cfg: &config::AppConfig) -> Result<(), error::CliError> {
    match cmd {
        cli::Commands::Submit(submit_args) => {
            commands::submit::handle_submit(submit_args, cfg).await
        }
        cli::Commands::Parse(parse_args) => commands::submit::handle_parse(parse_args, cfg),
        cli::Commands::Recent(recent_args) => {
            commands::feed::handle_recent(recent_args, cfg).await
        }
        cli::Commands::Browse(browse_args) => {
            commands::feed::handle_browse(browse_args, cfg).await
        }
    }
}

fn init_tracing(logging: &config::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("iocdrop"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("iocdrop.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
