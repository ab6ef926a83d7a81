use std::io::Read;
use std::path::Path;

use iocdrop_core::api as core_api;
use iocdrop_core::error::InputError;

use crate::commands::cli::{InputArgs, ModeArg};

pub fn resolve_mode(arg: Option<ModeArg>, cfg: &core_api::AppConfig) -> core_api::ParseMode {
    match arg {
        Some(ModeArg::Enhanced) => core_api::ParseMode::Enhanced,
        Some(ModeArg::Simple) => core_api::ParseMode::Simple,
        None => cfg.parse_mode,
    }
}

/// Decodes piped input the same way as uploaded files.
fn read_text(mut reader: impl Read) -> Result<String, InputError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(InputError::Stdin)?;
    Ok(iocdrop_core::input::decode_bytes(&buf))
}

/// Reads text/stdin/files and returns the sanitized submission payload.
pub fn load_payload(
    args: &InputArgs,
    cfg: &core_api::AppConfig,
) -> Result<core_api::SubmissionPayload, core_api::CliError> {
    let text = if args.stdin {
        Some(read_text(std::io::stdin().lock())?)
    } else {
        args.text.clone()
    };

    let files = args
        .files
        .iter()
        .map(|p| core_api::InputFile::read(Path::new(p)))
        .collect::<Result<Vec<_>, _>>()?;

    let mode = resolve_mode(args.mode, cfg);
    let items = core_api::collect_items(text.as_deref(), &files, mode)?;
    let parsed = items.len();

    let payload =
        core_api::build_payload(items, &cfg.limits).ok_or(core_api::CliError::NoValidItems)?;
    tracing::info!(
        target: "iocdrop.input",
        stage = "input.payload.built",
        parsed = parsed,
        kept = payload.items.len(),
        mode = ?mode
    );
    Ok(payload)
}
