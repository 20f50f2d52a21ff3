use docpub::DocpubError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Follow-up advice for errors the user can act on
fn hint(err: &DocpubError) -> Option<&'static str> {
    match err {
        DocpubError::StepFailed { source, .. } => hint(source),
        DocpubError::OnPublishBranch { .. } => {
            Some("check out the branch whose docs should be published, then run docpub again")
        }
        DocpubError::DirtyWorkingTree => Some("run `git stash`, or pass --allow-dirty"),
        DocpubError::MarkerNotFound { .. } => {
            Some("set build.snippet_marker to text that appears in the entry page")
        }
        DocpubError::Locked { .. } => {
            Some("wait for the other deploy to finish; remove the lock file if none is running")
        }
        DocpubError::InvalidConfig { .. } => Some("run `docpub config` to see the effective settings"),
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).render(supports_color)
    );

    // anyhow context layers below the top message
    for cause in err.chain().skip(1) {
        if matches!(
            cause.downcast_ref::<DocpubError>(),
            Some(DocpubError::StepFailed { .. })
        ) {
            continue;
        }
        let text = cause.to_string();
        if err.to_string().contains(&text) {
            continue;
        }
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            text
        ));
    }

    if let Some(hint) = err.downcast_ref::<DocpubError>().and_then(hint) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            ColoredText::dim(hint).render(supports_color)
        ));
    }

    out
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let step = err
            .downcast_ref::<DocpubError>()
            .and_then(DocpubError::failed_step);
        let output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
            "step": step.map(|s| s.as_str()),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    if caps.is_ci && std::env::var("GITHUB_ACTIONS").is_ok() {
        eprintln!("::error::{}", err);
    }
    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}
