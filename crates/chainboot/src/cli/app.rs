use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(name = "chainboot", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "r", name = "run", about = "Download and install the bootstrap archive")]
    Run(RunArg),
    #[command(alias = "cfg", name = "config", about = "Print the effective configuration")]
    Config(ConfigArg),
}

#[derive(Clone, Debug, Args)]
pub struct Source {
    /// TOML config file; missing keys take defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Override the archive URL.
    #[arg(long)]
    pub url: Option<String>,
    /// Override the chain data directory.
    #[arg(short, long)]
    pub destination: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct RunArg {
    #[command(flatten)]
    pub source: Source,
    /// Print each progress broadcast as a JSON line instead of a progress bar.
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ConfigArg {
    #[command(flatten)]
    pub source: Source,
}
