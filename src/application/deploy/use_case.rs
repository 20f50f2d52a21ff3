//! Deploy Use Case
//!
//! Orchestrates a publish run:
//! 1. Resolve the source branch and its tip log line
//! 2. Rebuild the docs and inject the tracking snippet
//! 3. Snapshot the build, switch to the publish branch, replace the
//!    published tree, commit and push
//! 4. Restore the source branch and the local build, remove the snapshot
//!
//! Steps 1-10 stop at the first failure. Steps 11-13 always run.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::domain::ports::{
    CommitOutcome, DeployEvent, DeployEventSink, DocBuilder, FileSystem, NoopEventSink, VcsError,
    VersionControl,
};
use crate::domain::services::{inject_after_marker, render_commit_message};
use crate::domain::value_objects::{DeployOutcome, DeployStep, PublishPatterns};
use crate::error::{DocpubError, DocpubResult};

use super::options::DeployOptions;
use super::result::DeployReport;

/// A step as it would run with the given options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: DeployStep,
    pub action: String,
}

/// Mutable state threaded through one run
#[derive(Default)]
struct RunState {
    source_branch: Option<String>,
    source_log: Option<String>,
    clear: PublishPatterns,
    prune: PublishPatterns,
    staging_created: bool,
    snapshot_taken: bool,
    on_publish_branch: bool,
    published_files: usize,
    outcome: Option<DeployOutcome>,
}

/// Deploy use case - orchestrates the publish flow
///
/// Parameterized by its collaborators (ports) so the whole pipeline runs
/// against in-memory stand-ins in tests.
///
/// A run mutates the working tree and the checked-out branch in place. It
/// is not safe to run concurrently with itself or with any other git
/// operation on the same repository.
pub struct DeployUseCase<FS, VC, DB>
where
    FS: FileSystem,
    VC: VersionControl,
    DB: DocBuilder,
{
    file_system: FS,
    vcs: VC,
    builder: DB,
    interrupted: Arc<AtomicBool>,
}

impl<FS, VC, DB> DeployUseCase<FS, VC, DB>
where
    FS: FileSystem,
    VC: VersionControl,
    DB: DocBuilder,
{
    pub fn new(file_system: FS, vcs: VC, builder: DB) -> Self {
        Self {
            file_system,
            vcs,
            builder,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a flag that aborts the pipeline before its next step when set
    pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    /// Describe every step with the concrete paths and commands it would use
    pub fn plan(&self, options: &DeployOptions) -> Vec<PlannedStep> {
        let tmp = options.tmp_dir.display();
        let build = options.build_path().display().to_string();

        DeployStep::ALL
            .iter()
            .map(|&step| {
                let action = match step {
                    DeployStep::ResolveContext => {
                        "read current branch and its last commit".to_string()
                    }
                    DeployStep::ResetStaging => format!("remove {}", tmp),
                    DeployStep::CleanBuild => format!("remove {}", build),
                    DeployStep::BuildDocs => format!(
                        "run `{}` in {}",
                        self.builder.describe(),
                        options.docs_dir.display()
                    ),
                    DeployStep::InjectSnippet => format!(
                        "insert {} after '{}' in {}",
                        options.snippet_path().display(),
                        options.snippet_marker,
                        options.index_path().display()
                    ),
                    DeployStep::Snapshot => format!("copy {} to {}", build, tmp),
                    DeployStep::SwitchBranch => {
                        format!("git checkout {}", options.publish_branch)
                    }
                    DeployStep::ClearPublished => format!(
                        "remove entries of {} matching [{}]",
                        options.dst_dir.display(),
                        options.clear.join(", ")
                    ),
                    DeployStep::Publish => {
                        let mut action = format!(
                            "copy {} to {}",
                            options.html_path().display(),
                            options.dst_dir.display()
                        );
                        if !options.prune.is_empty() {
                            action.push_str(&format!(", then remove [{}]", options.prune.join(", ")));
                        }
                        action
                    }
                    DeployStep::CommitAndPush => {
                        if options.push {
                            format!(
                                "git add --all, git commit, git push {} {}",
                                options.remote, options.publish_branch
                            )
                        } else {
                            "git add --all, git commit (no push)".to_string()
                        }
                    }
                    DeployStep::RestoreBranch => "git checkout <current branch>".to_string(),
                    DeployStep::RestoreBuild => format!("copy {} back to {}", tmp, build),
                    DeployStep::Cleanup => format!("remove {}", tmp),
                };
                PlannedStep { step, action }
            })
            .collect()
    }

    /// Execute the deploy use case
    pub fn execute(&self, options: &DeployOptions) -> DeployReport {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the deploy use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &DeployOptions,
        event_sink: Arc<dyn DeployEventSink>,
    ) -> DeployReport {
        let mut report = DeployReport::new();
        let mut state = RunState::default();
        let detailed = event_sink.wants_detailed_events();

        event_sink.on_event(DeployEvent::Started {
            source_branch: self.vcs.current_branch().ok(),
            publish_branch: options.publish_branch.clone(),
            remote: options.remote.clone(),
            dry_run: options.dry_run,
        });

        for step in DeployStep::ALL.into_iter().filter(|s| !s.is_cleanup()) {
            if options.dry_run && step != DeployStep::ResolveContext {
                if detailed {
                    event_sink.on_event(DeployEvent::StepSkipped {
                        step,
                        reason: "dry run".to_string(),
                    });
                }
                continue;
            }

            if detailed {
                event_sink.on_event(DeployEvent::StepStarted { step });
            }

            let result = if self.interrupted.load(Ordering::SeqCst) {
                Err(DocpubError::Interrupted)
            } else {
                self.run_step(step, options, &mut state)
            };

            match result {
                Ok(detail) => {
                    report.completed_steps.push(step);
                    if detailed {
                        event_sink.on_event(DeployEvent::StepCompleted { step, detail });
                    }
                }
                Err(err) => {
                    event_sink.on_event(DeployEvent::StepFailed {
                        step,
                        error: err.to_string(),
                    });
                    report.error = Some(DocpubError::StepFailed {
                        step,
                        source: Box::new(err),
                    });
                    state.outcome = Some(DeployOutcome::Failed { step });
                    break;
                }
            }
        }

        if !options.dry_run {
            self.run_cleanup(options, &mut state, &mut report, event_sink.as_ref());
        }

        report.source_branch = state.source_branch;
        report.source_log = state.source_log;
        report.published_files = state.published_files;
        report.outcome = state.outcome.unwrap_or(DeployOutcome::Planned);
        report.finished_at = Utc::now();

        event_sink.on_event(DeployEvent::Completed {
            outcome: report.outcome,
            published_files: report.published_files,
            success: report.is_success(),
        });

        report
    }

    fn run_step(
        &self,
        step: DeployStep,
        options: &DeployOptions,
        state: &mut RunState,
    ) -> DocpubResult<Option<String>> {
        match step {
            DeployStep::ResolveContext => self.resolve_context(options, state),
            DeployStep::ResetStaging => {
                self.file_system.remove_all(&options.tmp_dir)?;
                Ok(Some(options.tmp_dir.display().to_string()))
            }
            DeployStep::CleanBuild => {
                self.file_system.remove_all(&options.build_path())?;
                Ok(None)
            }
            DeployStep::BuildDocs => {
                self.builder.build_html(&options.docs_dir)?;
                Ok(Some(self.builder.describe()))
            }
            DeployStep::InjectSnippet => self.inject_snippet(options),
            DeployStep::Snapshot => {
                // Set before copying so a partial snapshot is still removed
                state.staging_created = true;
                self.file_system
                    .copy_dir_contents(&options.build_path(), &options.tmp_dir)?;
                state.snapshot_taken = true;
                let files = self.file_system.list_files(&options.tmp_dir)?;
                Ok(Some(format!("{} files", files.len())))
            }
            DeployStep::SwitchBranch => {
                self.vcs.checkout(&options.publish_branch)?;
                state.on_publish_branch = true;
                Ok(Some(options.publish_branch.clone()))
            }
            DeployStep::ClearPublished => {
                let removed = self.remove_matching(&options.dst_dir, &state.clear)?;
                Ok(Some(format!("removed {} entries", removed)))
            }
            DeployStep::Publish => {
                let html = options.html_path();
                self.file_system.copy_dir_contents(&html, &options.dst_dir)?;
                state.published_files = self.file_system.list_files(&html)?.len();
                let pruned = self.remove_matching(&options.dst_dir, &state.prune)?;

                let mut detail = format!("{} files", state.published_files);
                if pruned > 0 {
                    detail.push_str(&format!(", pruned {} entries", pruned));
                }
                Ok(Some(detail))
            }
            DeployStep::CommitAndPush => self.commit_and_push(options, state),
            DeployStep::RestoreBranch | DeployStep::RestoreBuild | DeployStep::Cleanup => {
                Ok(None)
            }
        }
    }

    fn resolve_context(
        &self,
        options: &DeployOptions,
        state: &mut RunState,
    ) -> DocpubResult<Option<String>> {
        if !self.vcs.is_repository() {
            return Err(VcsError::Other(format!(
                "{} is not inside a git repository",
                options.dst_dir.display()
            ))
            .into());
        }

        let branch = self.vcs.current_branch()?;
        if branch == options.publish_branch {
            return Err(DocpubError::OnPublishBranch { branch });
        }

        if !self.vcs.branch_exists(&options.publish_branch)? {
            return Err(VcsError::Other(format!(
                "publish branch '{}' does not exist locally",
                options.publish_branch
            ))
            .into());
        }

        if options.push && !self.vcs.remote_exists(&options.remote)? {
            return Err(VcsError::Other(format!("remote '{}' is not configured", options.remote)).into());
        }

        if !options.allow_dirty && !self.vcs.is_clean()? {
            return Err(DocpubError::DirtyWorkingTree);
        }

        let log = self.vcs.last_commit_oneline(&branch)?;

        let mut clear = PublishPatterns::new(&options.clear)?;
        if let Some(docs_entry) = options.docs_entry_in_dst() {
            clear = clear.protect(docs_entry);
        }
        state.clear = clear;
        state.prune = PublishPatterns::new(&options.prune)?;

        let detail = format!("{} ({})", branch, log);
        state.source_branch = Some(branch);
        state.source_log = Some(log);
        Ok(Some(detail))
    }

    fn inject_snippet(&self, options: &DeployOptions) -> DocpubResult<Option<String>> {
        let snippet = self.file_system.read(&options.snippet_path())?;
        let index = options.index_path();
        let html = self.file_system.read(&index)?;

        let patched = inject_after_marker(&html, &snippet, &options.snippet_marker).ok_or_else(
            || DocpubError::MarkerNotFound {
                marker: options.snippet_marker.clone(),
                file: index.clone(),
            },
        )?;

        self.file_system.write(&index, &patched)?;
        Ok(Some(index.display().to_string()))
    }

    fn commit_and_push(
        &self,
        options: &DeployOptions,
        state: &mut RunState,
    ) -> DocpubResult<Option<String>> {
        let message = render_commit_message(
            &options.commit_message,
            &options.publish_branch,
            state.source_branch.as_deref().unwrap_or_default(),
            state.source_log.as_deref().unwrap_or_default(),
        );

        self.vcs.stage_all()?;
        match self.vcs.commit(&message)? {
            CommitOutcome::NothingToCommit => {
                state.outcome = Some(DeployOutcome::NothingToPublish);
                Ok(Some("nothing to commit".to_string()))
            }
            CommitOutcome::Committed if options.push => {
                self.vcs.push(&options.remote, &options.publish_branch)?;
                state.outcome = Some(DeployOutcome::Published { pushed: true });
                Ok(Some(format!(
                    "pushed to {} {}",
                    options.remote, options.publish_branch
                )))
            }
            CommitOutcome::Committed => {
                state.outcome = Some(DeployOutcome::Published { pushed: false });
                Ok(Some("committed (not pushed)".to_string()))
            }
        }
    }

    /// Remove the top-level entries of `dir` selected by `patterns`
    fn remove_matching(&self, dir: &Path, patterns: &PublishPatterns) -> DocpubResult<usize> {
        if patterns.is_empty() {
            return Ok(0);
        }
        let entries = self.file_system.list_entries(dir)?;
        let selected = patterns.select(&entries);
        for entry in &selected {
            self.file_system.remove_all(&dir.join(&entry.name))?;
        }
        Ok(selected.len())
    }

    fn run_cleanup(
        &self,
        options: &DeployOptions,
        state: &mut RunState,
        report: &mut DeployReport,
        event_sink: &dyn DeployEventSink,
    ) {
        let detailed = event_sink.wants_detailed_events();
        let skip = |step: DeployStep, reason: &str| {
            if detailed {
                event_sink.on_event(DeployEvent::StepSkipped {
                    step,
                    reason: reason.to_string(),
                });
            }
        };

        // Restore branch
        let step = DeployStep::RestoreBranch;
        match (&state.source_branch, state.on_publish_branch) {
            (Some(branch), true) => {
                if detailed {
                    event_sink.on_event(DeployEvent::StepStarted { step });
                }
                match self.vcs.checkout(branch) {
                    Ok(()) => {
                        state.on_publish_branch = false;
                        report.completed_steps.push(step);
                        if detailed {
                            event_sink.on_event(DeployEvent::StepCompleted {
                                step,
                                detail: Some(branch.clone()),
                            });
                        }
                    }
                    Err(err) => {
                        let err = DocpubError::from(err);
                        event_sink.on_event(DeployEvent::CleanupFailed {
                            step,
                            error: err.to_string(),
                        });
                        report.cleanup_errors.push((step, err));
                    }
                }
            }
            _ => skip(step, "branch was not switched"),
        }

        // The build snapshot is the only copy of the output while the
        // branch is wrong; keep it.
        if state.on_publish_branch {
            skip(DeployStep::RestoreBuild, "branch not restored");
            skip(DeployStep::Cleanup, "branch not restored");
            if state.staging_created {
                report.staging_kept = Some(options.tmp_dir.clone());
            }
            return;
        }

        // Restore build
        let step = DeployStep::RestoreBuild;
        let mut build_restored = true;
        if state.snapshot_taken {
            if detailed {
                event_sink.on_event(DeployEvent::StepStarted { step });
            }
            let build = options.build_path();
            let result = self
                .file_system
                .remove_all(&build)
                .and_then(|_| self.file_system.create_dir_all(&build))
                .and_then(|_| self.file_system.copy_dir_contents(&options.tmp_dir, &build));
            match result {
                Ok(()) => {
                    report.completed_steps.push(step);
                    if detailed {
                        event_sink.on_event(DeployEvent::StepCompleted {
                            step,
                            detail: Some(build.display().to_string()),
                        });
                    }
                }
                Err(err) => {
                    build_restored = false;
                    let err = DocpubError::from(err);
                    event_sink.on_event(DeployEvent::CleanupFailed {
                        step,
                        error: err.to_string(),
                    });
                    report.cleanup_errors.push((step, err));
                }
            }
        } else {
            skip(step, "no snapshot taken");
        }

        // Cleanup
        let step = DeployStep::Cleanup;
        if !build_restored {
            skip(step, "build not restored");
            report.staging_kept = Some(options.tmp_dir.clone());
        } else if state.staging_created {
            if detailed {
                event_sink.on_event(DeployEvent::StepStarted { step });
            }
            match self.file_system.remove_all(&options.tmp_dir) {
                Ok(()) => {
                    report.completed_steps.push(step);
                    if detailed {
                        event_sink.on_event(DeployEvent::StepCompleted { step, detail: None });
                    }
                }
                Err(err) => {
                    let err = DocpubError::from(err);
                    event_sink.on_event(DeployEvent::CleanupFailed {
                        step,
                        error: err.to_string(),
                    });
                    report.cleanup_errors.push((step, err));
                }
            }
        } else {
            skip(step, "staging directory was not created");
        }
    }
}
