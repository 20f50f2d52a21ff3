//! Deploy step and outcome value objects

use std::fmt;

/// One named step of the deploy pipeline, in execution order.
///
/// Steps up to and including `CommitAndPush` form the pipeline proper and
/// stop at the first failure. The last three are cleanup steps and are
/// attempted no matter where the pipeline stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeployStep {
    ResolveContext,
    ResetStaging,
    CleanBuild,
    BuildDocs,
    InjectSnippet,
    Snapshot,
    SwitchBranch,
    ClearPublished,
    Publish,
    CommitAndPush,
    RestoreBranch,
    RestoreBuild,
    Cleanup,
}

impl DeployStep {
    pub const ALL: [DeployStep; 13] = [
        DeployStep::ResolveContext,
        DeployStep::ResetStaging,
        DeployStep::CleanBuild,
        DeployStep::BuildDocs,
        DeployStep::InjectSnippet,
        DeployStep::Snapshot,
        DeployStep::SwitchBranch,
        DeployStep::ClearPublished,
        DeployStep::Publish,
        DeployStep::CommitAndPush,
        DeployStep::RestoreBranch,
        DeployStep::RestoreBuild,
        DeployStep::Cleanup,
    ];

    /// 1-based position in the pipeline
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Stable identifier used in JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            DeployStep::ResolveContext => "resolve-context",
            DeployStep::ResetStaging => "reset-staging",
            DeployStep::CleanBuild => "clean-build",
            DeployStep::BuildDocs => "build-docs",
            DeployStep::InjectSnippet => "inject-snippet",
            DeployStep::Snapshot => "snapshot",
            DeployStep::SwitchBranch => "switch-branch",
            DeployStep::ClearPublished => "clear-published",
            DeployStep::Publish => "publish",
            DeployStep::CommitAndPush => "commit-and-push",
            DeployStep::RestoreBranch => "restore-branch",
            DeployStep::RestoreBuild => "restore-build",
            DeployStep::Cleanup => "cleanup",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DeployStep::ResolveContext => "resolve context",
            DeployStep::ResetStaging => "reset staging",
            DeployStep::CleanBuild => "clean build",
            DeployStep::BuildDocs => "build docs",
            DeployStep::InjectSnippet => "inject snippet",
            DeployStep::Snapshot => "snapshot build",
            DeployStep::SwitchBranch => "switch branch",
            DeployStep::ClearPublished => "clear published tree",
            DeployStep::Publish => "publish",
            DeployStep::CommitAndPush => "commit and push",
            DeployStep::RestoreBranch => "restore branch",
            DeployStep::RestoreBuild => "restore build",
            DeployStep::Cleanup => "clean up",
        }
    }

    pub fn is_cleanup(self) -> bool {
        matches!(
            self,
            DeployStep::RestoreBranch | DeployStep::RestoreBuild | DeployStep::Cleanup
        )
    }
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// How a deploy run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    /// A commit was recorded on the publish branch
    Published { pushed: bool },
    /// The commit step found no changes; nothing was pushed
    NothingToPublish,
    /// Dry run; no step was executed
    Planned,
    /// The pipeline stopped at this step
    Failed { step: DeployStep },
}

impl DeployOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            DeployOutcome::Published { pushed: true } => "published",
            DeployOutcome::Published { pushed: false } => "committed",
            DeployOutcome::NothingToPublish => "unchanged",
            DeployOutcome::Planned => "planned",
            DeployOutcome::Failed { .. } => "failed",
        }
    }
}
