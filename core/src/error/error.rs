use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("input error: {0}")]
    Input(#[from] InputError),
    #[error("no valid items after processing")]
    NoValidItems,
    #[error("submission failed: {0}")]
    Submit(String),
    #[error("feed error: {0}")]
    Feed(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("please enter an indicator or add a file")]
    Empty,
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(std::io::Error),
}
