pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "stride",
    about = "Conversational goal-planning assistant",
    long_about = "Chat with stride to turn a personal goal into a structured weekly plan, \
                  inspect effective configuration, or check collaborator readiness.",
    after_help = "Examples:\n  stride chat\n  stride config\n  stride doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a stride.toml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Start an interactive goal-planning chat session")]
    Chat {
        #[arg(long, help = "Seed the prompt selector for reproducible sessions")]
        seed: Option<u64>,
    },
    #[command(about = "Inspect effective configuration values with secret redaction")]
    Config,
    #[command(about = "Validate configuration and report collaborator readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}
