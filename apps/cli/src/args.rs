use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about = "Warehouse cost breakdown from query usage logs", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the config file (defaults to ~/.config/bluefin/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the upload UI on 127.0.0.1 (default)
    Serve {
        /// Override the configured port for this run only
        #[arg(long)]
        port: Option<u16>,
        /// Do not open the browser automatically
        #[arg(long)]
        no_open: bool,
    },
    /// Break down a usage log once and print or write the result
    Report {
        /// Usage log CSV
        input: PathBuf,
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Csv,
    Json,
}

impl Default for Command {
    fn default() -> Self {
        Self::Serve {
            port: None,
            no_open: false,
        }
    }
}
