pub mod patch;
pub mod plan;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite manifest revisions to the release version.
    Patch(patch::PatchArgs),
    /// Show what a release on the given branch would patch and stage.
    Plan(plan::PlanArgs),
}
