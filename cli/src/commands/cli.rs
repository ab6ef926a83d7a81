use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Enhanced,
    Simple,
}

#[derive(Parser, Debug)]
#[command(name = "iocdrop", version, about = "Submit and browse threat indicators")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Read configuration from this TOML file instead of the default locations.
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InputArgs {
    /// Indicators as free text (one per line, `value | description` supported).
    #[arg(long)]
    pub text: Option<String>,

    /// Read free text from stdin.
    #[arg(long, conflicts_with = "text")]
    pub stdin: bool,

    /// Files to parse; `.json` files are read as a single JSON document.
    /// Can be specified multiple times.
    #[arg(long = "file", action = clap::ArgAction::Append)]
    pub files: Vec<String>,

    /// Parser to use. Defaults to `parse_mode` from the config.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long)]
    pub ingest_url: Option<String>,

    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RecentArgs {
    /// Feed URL or local path.
    #[arg(long)]
    pub feed: Option<String>,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct BrowseArgs {
    /// Feed URL or local path.
    #[arg(long)]
    pub feed: Option<String>,

    /// Case-insensitive text to look for in value, description and type.
    #[arg(long, default_value = "")]
    pub query: String,

    /// Only show entries of this type (e.g. `ip`, `url`).
    #[arg(long = "type", default_value = "")]
    pub kind: String,

    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse indicators and post them to the ingestion endpoint.
    Submit(SubmitArgs),
    /// Parse and sanitize indicators without sending them.
    Parse(ParseArgs),
    /// Show the newest submitted indicators.
    Recent(RecentArgs),
    /// Search all submitted indicators.
    Browse(BrowseArgs),
}
