use crate::output::{print_json, print_table, warning_line};
use anyhow::Context;
use clap::Subcommand;
use mcpcheck_core::config::{McpConfig, WarnLevel};
use mcpcheck_core::{credential, CheckError};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Validate the GitHub tool entry without reading the token or calling the API
    Validate,

    /// Show the GitHub tool entry and whether its token variable is set
    Show,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config_path: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Validate => validate(config_path, json),
        ConfigSubcommand::Show => show(config_path, json),
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = McpConfig::load(config_path).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "path": config.path().display().to_string(),
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            println!("{}", warning_line(w));
        }
    }

    let errors: Vec<String> = warnings
        .into_iter()
        .filter(|w| w.level == WarnLevel::Error)
        .map(|w| w.message)
        .collect();
    if !errors.is_empty() {
        return Err(anyhow::Error::new(CheckError::Structural(errors))
            .context("config validation found errors"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let config = McpConfig::load(config_path).context("failed to load config")?;
    let tool = config.github_tool().context("invalid GitHub tool entry")?;
    // Only presence is reported; the value never leaves the credential.
    let token_set = credential::resolve(&tool.token_env).is_ok();
    let identity_url = tool.identity_url()?.to_string();

    if json {
        let value = serde_json::json!({
            "path": config.path().display().to_string(),
            "github": tool,
            "identityUrl": identity_url,
            "tokenSet": token_set,
        });
        print_json(&value)?;
        return Ok(());
    }

    let token_state = if token_set { "set" } else { "not set" };
    let rows = vec![
        vec!["type".to_string(), tool.tool_type.clone()],
        vec![
            "tokenEnv".to_string(),
            format!("{} ({token_state})", tool.token_env),
        ],
        vec!["owner".to_string(), tool.owner.clone()],
        vec!["repo".to_string(), tool.repo.clone()],
        vec!["baseUrl".to_string(), tool.base_url.clone()],
        vec!["identity".to_string(), identity_url],
    ];
    print_table(&["FIELD", "VALUE"], rows);
    Ok(())
}
