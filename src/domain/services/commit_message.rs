//! Commit message rendering

/// Placeholder replaced by the source branch tip's one-line log entry
pub const LOG_PLACEHOLDER: &str = "{log}";
/// Placeholder replaced by the publish branch name
pub const BRANCH_PLACEHOLDER: &str = "{branch}";
/// Placeholder replaced by the source branch name
pub const SOURCE_PLACEHOLDER: &str = "{source}";

/// Render the publish commit message.
///
/// Placeholders are substituted in a single pass, so a branch name or log
/// line that itself contains a placeholder is inserted literally. The log
/// line is appended when the template has no `{log}` placeholder, so the
/// message always identifies the commit that was published.
pub fn render_commit_message(
    template: &str,
    publish_branch: &str,
    source_branch: &str,
    source_log: &str,
) -> String {
    let substitutions = [
        (LOG_PLACEHOLDER, source_log),
        (BRANCH_PLACEHOLDER, publish_branch),
        (SOURCE_PLACEHOLDER, source_branch),
    ];

    let mut rendered = String::with_capacity(template.len() + source_log.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let tail = &rest[open..];
        match substitutions
            .iter()
            .find(|(placeholder, _)| tail.starts_with(placeholder))
        {
            Some((placeholder, value)) => {
                rendered.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
    }
    rendered.push_str(rest);

    if template.contains(LOG_PLACEHOLDER) {
        rendered
    } else if rendered.trim().is_empty() {
        source_log.to_string()
    } else {
        format!("{} {}", rendered.trim_end(), source_log)
    }
}
