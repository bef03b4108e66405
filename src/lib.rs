#![doc = include_str!("../README.md")]

pub mod cli;
pub mod command;
pub mod error;
pub mod fs;
pub mod patch;
pub mod profile;
pub mod version;

pub use error::*;
pub use patch::{PatchResult, Patcher, TargetRule, patch};
pub use profile::{ReleaseConfig, ReleaseProfile};
pub use version::ReleaseVersion;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() -> Result<()> {
    use clap::Parser;
    use command::Command;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = cli::Cli::parse();
    match cli.command {
        Command::Patch(args) => command::patch::execute(args),
        Command::Plan(args) => command::plan::execute(args),
    }
}
