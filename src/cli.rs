use crate::command::Command;
use clap::Parser;

/// Patch a computed release version into deployment manifests.
#[derive(Parser)]
#[command(name = "manifest-patch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}
