use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "cep-race")]
#[command(about = "Looks up a Brazilian CEP on several providers at once and prints the fastest answer")]
pub struct CliArgs {
    /// CEP to look up, e.g. 01001-000
    pub cep: String,

    /// Path to a TOML file describing the providers
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the race deadline in milliseconds
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the winning result as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Show what would be requested without executing
    #[arg(long)]
    pub dry_run: bool,
}
