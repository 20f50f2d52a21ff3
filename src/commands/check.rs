use anyhow::{bail, Result};
use docpub::infrastructure::{CommandDocBuilder, GitCli, LocalFs};
use docpub::run_check;

use crate::cli::{ColorWhen, ConfigArgs};
use crate::ui::context::UiContext;

pub fn cmd_check(
    args: &ConfigArgs,
    json: bool,
    verbose: u8,
    color: Option<ColorWhen>,
) -> Result<()> {
    let settings = super::load_settings(args)?;
    super::print_config_warnings(&settings.warnings, json);
    let ui = UiContext::new(verbose, color, &settings.config);
    let options = &settings.options;

    let git = GitCli::new(&options.docs_dir);
    let fs = LocalFs::new();
    let builder = CommandDocBuilder::new(settings.config.build.command.clone());

    if !json {
        print!(
            "{}",
            crate::ui::views::check::render_check_header(
                &options.docs_dir,
                settings.config_file.as_deref(),
                ui.color,
                ui.unicode
            )
        );
    }

    let report = run_check(options, &git, &fs, &builder);

    if json {
        let mut out = std::io::stdout().lock();
        for item in &report.items {
            crate::ui::json::write_event(
                &mut out,
                &serde_json::json!({
                    "event": "check",
                    "command": "check",
                    "name": item.name,
                    "status": item.status.as_str(),
                    "message": item.message,
                    "recommendation": item.recommendation,
                }),
            )?;
        }
        crate::ui::json::write_event(
            &mut out,
            &serde_json::json!({
                "event": "complete",
                "command": "check",
                "passed": report.passed,
                "warnings": report.warnings,
                "errors": report.errors,
                "success": report.is_success(),
            }),
        )?;
    } else {
        print!(
            "{}",
            crate::ui::views::check::render_check_report(&report, ui.color, ui.unicode)
        );
    }

    if !report.is_success() {
        bail!("{} of {} checks failed", report.errors, report.items.len());
    }
    Ok(())
}
