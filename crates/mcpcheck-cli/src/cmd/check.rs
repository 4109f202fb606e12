use crate::output::{print_json, report_lines};
use mcpcheck_core::credential;
use mcpcheck_core::smoke::SmokeTest;
use std::path::Path;

pub fn run(config_path: &Path, json: bool) -> anyhow::Result<()> {
    let smoke = SmokeTest::new(config_path, &credential::process_env);
    tracing::debug!(config = %smoke.config_path().display(), "running smoke test");
    let outcome = smoke.run();

    if json {
        print_json(&outcome.report)?;
    } else {
        println!("Checking GitHub MCP configuration...");
        for line in report_lines(&outcome.report) {
            println!("{line}");
        }
    }

    match outcome.error {
        None => {
            if !json {
                println!("✅ GitHub MCP smoke test passed.");
            }
            Ok(())
        }
        Some(err) => {
            let check = err.check();
            Err(anyhow::Error::new(err).context(format!("{check} check failed")))
        }
    }
}
