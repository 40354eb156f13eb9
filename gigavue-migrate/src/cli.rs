use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gigavue-migrate")]
#[command(about = "Plan GigaVUE-HC2 hardware migrations from show-command captures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Show the structured inventory parsed from one capture.
    Inspect(InspectArgs),
    /// Show the recommendation facts and parse warnings for one capture.
    Analyze(AnalyzeArgs),
    /// Produce the full migration plan: platform, port map, bill of materials.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Captured show-command output file.
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Also list lines no section claimed.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    pub file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Directory holding a platforms.toml overriding the embedded catalog.
    #[arg(long)]
    pub catalog_dir: Option<PathBuf>,
    /// Fail with a nonzero exit when any port could not be mapped.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
