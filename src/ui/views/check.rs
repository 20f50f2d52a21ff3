use std::path::Path;

use docpub::application::CheckReport;

use crate::ui::blocks::check_item::render_check_item;
use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_check_header(
    docs_dir: &Path,
    config_file: Option<&Path>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "docpub check");
    header.add("Docs", docs_dir.display().to_string());
    header.add(
        "Config",
        config_file
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string()),
    );
    header.render(supports_color, supports_unicode)
}

pub fn render_check_report(
    report: &CheckReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    for item in &report.items {
        out.push_str(&render_check_item(item, supports_color, supports_unicode));
    }

    let summary = format!(
        "{} passed, {} warnings, {} errors",
        report.passed, report.warnings, report.errors
    );
    let summary = if !report.is_success() {
        ColoredText::error(summary)
    } else if report.warnings > 0 {
        ColoredText::warning(summary)
    } else {
        ColoredText::success(summary)
    };
    out.push_str(&format!("\n{}\n", summary.render(supports_color)));
    out
}
