use docpub::application::{DeployOptions, DeployReport, PlannedStep};
use docpub::domain::ports::{DeployEvent, DeployEventSink};
use docpub::domain::value_objects::{DeployOutcome, DeployStep};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_deploy_header(
    options: &DeployOptions,
    source_branch: Option<&str>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = if options.dry_run {
        "docpub deploy (dry run)"
    } else {
        "docpub deploy"
    };
    let mut header = CommandHeader::new(Icon::Deploy, title);
    header.add("Docs", options.docs_dir.display().to_string());
    header.add("Publish to", options.dst_dir.display().to_string());
    header.add(
        "Branch",
        format!(
            "{} -> {}",
            source_branch.unwrap_or("?"),
            options.publish_branch
        ),
    );
    if options.push {
        header.add("Remote", options.remote.as_str());
    } else {
        header.add("Remote", "(no push)");
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_plan(plan: &[PlannedStep], supports_color: bool, supports_unicode: bool) -> String {
    let mut out = String::new();
    for planned in plan {
        out.push_str(&format!(
            "  {} {} {}\n",
            Icon::Skipped.colored(supports_color, supports_unicode),
            step_label(planned.step),
            ColoredText::dim(planned.action.as_str()).render(supports_color)
        ));
    }
    out
}

pub fn render_deploy_summary(
    options: &DeployOptions,
    report: &DeployReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let (icon, line) = match report.outcome {
        DeployOutcome::Published { pushed: true } => (
            Icon::Success,
            ColoredText::success(format!(
                "Published {} files to {} {}",
                report.published_files, options.remote, options.publish_branch
            )),
        ),
        DeployOutcome::Published { pushed: false } => (
            Icon::Success,
            ColoredText::success(format!(
                "Committed {} files to {} (not pushed)",
                report.published_files, options.publish_branch
            )),
        ),
        DeployOutcome::NothingToPublish => (
            Icon::Success,
            ColoredText::info(format!(
                "Nothing to publish; {} is up to date",
                options.publish_branch
            )),
        ),
        DeployOutcome::Planned => (
            Icon::Success,
            ColoredText::info("Dry run complete; nothing was changed"),
        ),
        DeployOutcome::Failed { step } => (
            Icon::Error,
            ColoredText::error(format!("Deploy failed at {}", step_label(step))),
        ),
    };

    let mut out = format!(
        "\n{} {} {}\n",
        icon.colored(supports_color, supports_unicode),
        line.bold().render(supports_color),
        ColoredText::dim(format!(
            "({:.1}s)",
            report.duration().num_milliseconds() as f64 / 1000.0
        ))
        .render(supports_color)
    );

    for (step, err) in &report.cleanup_errors {
        out.push_str(&format!(
            "{} {}: {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            step_label(*step),
            err
        ));
    }

    if let Some(kept) = &report.staging_kept {
        out.push_str(&format!(
            "{} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            ColoredText::warning(format!(
                "Build snapshot kept at {}; restore it by hand",
                kept.display()
            ))
            .render(supports_color)
        ));
    }

    out
}

fn step_label(step: DeployStep) -> String {
    format!("{:>2}/{} {}", step.number(), DeployStep::ALL.len(), step)
}

/// Prints step progress to the terminal as events arrive
pub struct ConsoleEventSink {
    ui: UiContext,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }

    fn line(&self, icon: Icon, step: DeployStep, suffix: Option<String>) -> String {
        let mut out = format!(
            "  {} {}",
            icon.colored(self.ui.color, self.ui.unicode),
            step_label(step)
        );
        if let Some(suffix) = suffix {
            out.push(' ');
            out.push_str(&suffix);
        }
        out
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let verbose = self.ui.is_verbose();
        let quiet = self.ui.is_quiet();

        match event {
            DeployEvent::StepStarted { step } if verbose => {
                println!("{}", self.line(Icon::Progress, step, None));
            }
            DeployEvent::StepCompleted { step, detail } if !quiet => {
                let detail = detail.map(|d| ColoredText::dim(d).render(self.ui.color));
                println!("{}", self.line(Icon::Success, step, detail));
            }
            DeployEvent::StepSkipped { step, reason } if verbose => {
                let reason = ColoredText::dim(format!("({})", reason)).render(self.ui.color);
                println!("{}", self.line(Icon::Skipped, step, Some(reason)));
            }
            DeployEvent::StepFailed { step, error } | DeployEvent::CleanupFailed { step, error } => {
                let error = ColoredText::error(error).render(self.ui.color);
                eprintln!("{}", self.line(Icon::Error, step, Some(error)));
            }
            _ => {}
        }
    }

    fn wants_detailed_events(&self) -> bool {
        !self.ui.is_quiet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpub::DocpubError;
    use std::path::PathBuf;

    fn options() -> DeployOptions {
        DeployOptions::new("/repo/docs", "/repo", "/home/u/.docpub/staging")
    }

    #[test]
    fn header_shows_branches_and_remote() {
        let rendered = render_deploy_header(&options(), Some("main"), false, false);
        assert!(rendered.contains("[DEPLOY] docpub deploy"));
        assert!(rendered.contains("main -> gh-pages"));
        assert!(rendered.contains("Remote:") && rendered.contains("origin"));
    }

    #[test]
    fn header_marks_dry_run_and_no_push() {
        let opts = options().with_dry_run(true).with_push(false);
        let rendered = render_deploy_header(&opts, None, false, false);
        assert!(rendered.contains("(dry run)"));
        assert!(rendered.contains("(no push)"));
    }

    #[test]
    fn summary_names_failed_step_and_kept_staging() {
        let mut report = DeployReport::new();
        report.outcome = DeployOutcome::Failed {
            step: DeployStep::CommitAndPush,
        };
        report.cleanup_errors.push((
            DeployStep::RestoreBranch,
            DocpubError::Interrupted,
        ));
        report.staging_kept = Some(PathBuf::from("/home/u/.docpub/staging"));

        let rendered = render_deploy_summary(&options(), &report, false, false);
        assert!(rendered.contains("[FAIL] Deploy failed at 10/13 commit and push"));
        assert!(rendered.contains("11/13 restore branch"));
        assert!(rendered.contains("Build snapshot kept at /home/u/.docpub/staging"));
    }

    #[test]
    fn summary_for_unchanged_branch() {
        let mut report = DeployReport::new();
        report.outcome = DeployOutcome::NothingToPublish;
        let rendered = render_deploy_summary(&options(), &report, false, false);
        assert!(rendered.contains("Nothing to publish; gh-pages is up to date"));
    }

    #[test]
    fn plan_lists_every_step() {
        let plan = vec![
            PlannedStep {
                step: DeployStep::ResolveContext,
                action: "read current branch".to_string(),
            },
            PlannedStep {
                step: DeployStep::Cleanup,
                action: "remove /tmp/x".to_string(),
            },
        ];
        let rendered = render_plan(&plan, false, false);
        assert!(rendered.contains(" 1/13 resolve context read current branch"));
        assert!(rendered.contains("13/13 clean up remove /tmp/x"));
    }
}
