use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use docpub::domain::ports::{DeployEventSink, VersionControl};
use docpub::infrastructure::{CommandDocBuilder, GitCli, JsonEventSink, LocalFs, RunLock};
use docpub::DeployUseCase;

use crate::cli::{ColorWhen, ConfigArgs};
use crate::ui::context::UiContext;
use crate::ui::views::deploy::{
    render_deploy_header, render_deploy_summary, render_plan, ConsoleEventSink,
};

/// Deploy-only switches
#[derive(Debug, Clone, Copy, Default)]
pub struct DeployFlags {
    pub dry_run: bool,
    pub no_push: bool,
    pub allow_dirty: bool,
}

pub fn cmd_deploy(
    args: &ConfigArgs,
    flags: DeployFlags,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
    interrupted: Arc<AtomicBool>,
) -> Result<()> {
    let settings = super::load_settings(args)?;
    super::print_config_warnings(&settings.warnings, json);
    let ui = UiContext::new(verbose, color, &settings.config);

    let options = settings
        .options
        .with_dry_run(flags.dry_run)
        .with_push(!flags.no_push)
        .with_allow_dirty(flags.allow_dirty);

    let git = GitCli::new(&options.docs_dir);
    let builder = CommandDocBuilder::new(settings.config.build.command.clone()).with_quiet(json);
    let use_case =
        DeployUseCase::new(LocalFs::new(), &git, builder).with_interrupt_flag(interrupted);

    if !json {
        let source_branch = git.current_branch().ok();
        print!(
            "{}",
            render_deploy_header(&options, source_branch.as_deref(), ui.color, ui.unicode)
        );
        if options.dry_run {
            print!(
                "{}",
                render_plan(&use_case.plan(&options), ui.color, ui.unicode)
            );
        }
        println!();
    }

    // A dry run never touches the staging directory
    let _lock = if options.dry_run {
        None
    } else {
        Some(RunLock::acquire(&options.tmp_dir)?)
    };

    let sink: Arc<dyn DeployEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::new(ui))
    };

    let mut report = use_case.execute_with_events(&options, sink);

    if !json {
        print!(
            "{}",
            render_deploy_summary(&options, &report, ui.color, ui.unicode)
        );
    }

    if let Some(err) = report.error.take() {
        return Err(err.into());
    }
    if !report.cleanup_errors.is_empty() {
        let steps: Vec<String> = report
            .cleanup_errors
            .iter()
            .map(|(step, _)| step.to_string())
            .collect();
        return Err(anyhow!("cleanup failed: {}", steps.join(", ")));
    }
    Ok(())
}
