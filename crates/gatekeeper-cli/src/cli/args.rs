use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gatekeeper",
    version,
    about = "LLM-as-judge validation gate: accept or reject a model's output against its task"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Judge an output file against a task file
    Check(CheckArgs),
    Persona(PersonaArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Clone, Debug)]
pub struct CheckArgs {
    #[arg(long, default_value = "gatekeeper.yaml")]
    pub config: PathBuf,

    /// Task file (YAML or JSON) with `title`, `description` and optional `id`
    #[arg(long)]
    pub task: PathBuf,

    /// File holding the candidate output to judge
    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also write the JSON report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
pub struct PersonaArgs {
    #[command(subcommand)]
    pub cmd: PersonaSub,
}

#[derive(Subcommand, Clone, Debug)]
pub enum PersonaSub {
    /// Print the resolved persona text
    Show {
        #[arg(long, default_value = "gatekeeper.yaml")]
        config: PathBuf,

        /// Persona name (defaults to `gate.persona` from the config)
        #[arg(long)]
        name: Option<String>,
    },
}
