use crate::output::print_json;
use anyhow::Context;
use mcpcheck_core::config::{GithubTool, McpConfig};
use std::path::Path;

pub fn run(
    config_path: &Path,
    owner: String,
    repo: String,
    token_env: Option<String>,
    base_url: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut tool = GithubTool::new(owner, repo);
    if let Some(var) = token_env {
        tool.token_env = var;
    }
    if let Some(url) = base_url {
        tool.base_url = url;
    }

    // Refuse to write something the check would reject.
    let draft = McpConfig::from_value(
        config_path,
        serde_json::json!({ "tools": { "github": &tool } }),
    );
    draft
        .github_tool()
        .context("refusing to write an invalid GitHub tool entry")?;

    let created = McpConfig::write_template(config_path, &tool)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    if json {
        let value = serde_json::json!({
            "path": config_path.display().to_string(),
            "created": created,
        });
        print_json(&value)?;
    } else if created {
        println!("Created {}", config_path.display());
        println!(
            "Export {} and run `mcpcheck` to verify the token.",
            tool.token_env
        );
    } else {
        println!(
            "{} already exists; left unchanged.",
            config_path.display()
        );
    }
    Ok(())
}
