use crate::error::Result;
use crate::profile::{MAIN_BRANCH, ReleaseConfig};
use crate::version::ReleaseVersion;
use clap::Parser;
use colored::Colorize;

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    /// Branch being released
    #[arg(long, env = "BRANCH_NAME", default_value = MAIN_BRANCH)]
    pub branch: String,

    /// Release version, to preview the commit message
    #[arg(long = "version", value_name = "VERSION")]
    pub release_version: Option<String>,
}

pub fn execute(args: PlanArgs) -> Result<()> {
    let config = ReleaseConfig::for_branch(&args.branch);

    println!("\n{}", "Release Plan:".bold().cyan());
    println!("  {} {}", "Branch:".bold(), args.branch);
    println!("  {} {}", "Profile:".bold(), config.profile);
    if let Some(channel) = config.prerelease_channel {
        println!("  {} {}", "Channel:".bold(), channel);
    }
    println!(
        "  {} {}",
        "Changelog:".bold(),
        if config.changelog { "yes" } else { "no" }
    );

    println!("\n{}", "Manifests:".bold());
    for rule in &config.rules {
        println!("  {} {}", "✓".green(), rule);
    }

    println!("\n{}", "Assets:".bold());
    for asset in &config.assets {
        println!("  • {}", asset);
    }

    if let Some(version) = &args.release_version {
        let version = ReleaseVersion::parse(version)?;
        println!("\n{}", "Commit message:".bold());
        println!("  {}", config.commit_message(&version, None));
    }

    Ok(())
}
