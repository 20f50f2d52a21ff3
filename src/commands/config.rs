use anyhow::Result;

use crate::cli::ConfigArgs;

/// Print the effective configuration, with paths resolved
pub fn cmd_config(args: &ConfigArgs, json: bool) -> Result<()> {
    let settings = super::load_settings(args)?;
    super::print_config_warnings(&settings.warnings, json);

    let mut config = settings.config;
    config.paths.docs_dir = Some(settings.options.docs_dir.clone());
    config.paths.dst_dir = Some(settings.options.dst_dir.clone());
    config.paths.tmp_dir = Some(settings.options.tmp_dir.clone());

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "config",
            "command": "config",
            "file": settings.config_file.map(|p| p.display().to_string()),
            "config": serde_json::to_value(&config)?,
        }))?;
        return Ok(());
    }

    if let Some(file) = &settings.config_file {
        println!("# loaded from {}", file.display());
    } else {
        println!("# no docpub.toml found; defaults");
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
