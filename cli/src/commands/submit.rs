//! Submit and dry-run (parse) commands
use crate::commands::cli::{ParseArgs, SubmitArgs};
use crate::commands::input::load_payload;
use iocdrop_core::api as core_api;

/// Handle submit command
pub async fn handle_submit(
    args: SubmitArgs,
    cfg: &core_api::AppConfig,
) -> Result<(), core_api::CliError> {
    let mut ingest_cfg = cfg.ingest.clone();
    if let Some(url) = args.ingest_url.filter(|u| !u.trim().is_empty()) {
        ingest_cfg.url = url;
    }
    if let Some(key) = args.api_key {
        ingest_cfg.api_key = key;
    }

    // Fail on missing configuration before reading any input.
    let ingest = iocdrop_plugins::factory::build_ingest(&ingest_cfg)
        .map_err(|e| core_api::CliError::Config(e.to_string()))?;

    let payload = load_payload(&args.input, cfg)?;
    let count = payload.items.len();

    ingest
        .submit(&payload)
        .await
        .map_err(|e| core_api::CliError::Submit(e.to_string()))?;

    println!("Submitted {} indicator(s).", count);
    Ok(())
}

/// Handle parse command
pub fn handle_parse(args: ParseArgs, cfg: &core_api::AppConfig) -> Result<(), core_api::CliError> {
    let payload = load_payload(&args.input, cfg)?;
    print!("{}", render_preview(&payload, &args.format)?);
    Ok(())
}

pub fn render_preview(
    payload: &core_api::SubmissionPayload,
    format: &str,
) -> Result<String, core_api::CliError> {
    match format {
        "json" => {
            let s = serde_json::to_string_pretty(payload)
                .map_err(|e| core_api::CliError::Command(e.to_string()))?;
            Ok(s + "\n")
        }
        "text" => {
            let mut out = String::new();
            for it in &payload.items {
                let kind = core_api::classify(&it.value)
                    .map(|k| k.as_str())
                    .unwrap_or("text");
                match it.description.as_deref() {
                    Some(d) => out.push_str(&format!("{:<7}{} | {}\n", kind, it.value, d)),
                    None => out.push_str(&format!("{:<7}{}\n", kind, it.value)),
                }
            }
            out.push_str(&format!("{} item(s)\n", payload.items.len()));
            Ok(out)
        }
        other => Err(core_api::CliError::Command(format!(
            "Unknown format: {}",
            other
        ))),
    }
}
