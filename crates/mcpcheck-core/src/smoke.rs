//! The smoke test: load → structure → credential → authentication.
//!
//! Each stage runs only if the previous one passed. The first error stops the
//! run and is recorded in the report as a failed check.

use crate::auth::AuthChecker;
use crate::config::McpConfig;
use crate::credential::{self, EnvLookup};
use crate::error::{CheckError, Result};
use crate::report::{CheckName, Report};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a smoke-test run: the report plus the error that stopped it.
#[derive(Debug)]
pub struct SmokeOutcome {
    pub report: Report,
    pub error: Option<CheckError>,
}

impl SmokeOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.report.passed()
    }

    pub fn exit_code(&self) -> i32 {
        self.error.as_ref().map_or(0, CheckError::exit_code)
    }
}

pub struct SmokeTest<'a> {
    config_path: PathBuf,
    env: &'a EnvLookup<'a>,
}

impl<'a> SmokeTest<'a> {
    pub fn new(config_path: impl Into<PathBuf>, env: &'a EnvLookup<'a>) -> Self {
        Self {
            config_path: config_path.into(),
            env,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn run(&self) -> SmokeOutcome {
        let mut report = Report::default();
        match self.execute(&mut report) {
            Ok(()) => {
                info!("all checks passed");
                SmokeOutcome {
                    report,
                    error: None,
                }
            }
            Err(error) => {
                let check = error.check();
                info!(check = check.as_str(), "check failed");
                report.fail(check, error.to_string());
                SmokeOutcome {
                    report,
                    error: Some(error),
                }
            }
        }
    }

    fn execute(&self, report: &mut Report) -> Result<()> {
        let config = McpConfig::load(&self.config_path)?;
        report.pass(
            CheckName::LoadConfig,
            Some(self.config_path.display().to_string()),
        );

        let (warnings, tool) = config.check_structure();
        report.warnings = warnings;
        let tool = tool?;
        report.pass(
            CheckName::Structure,
            Some(format!("{}/{}", tool.owner, tool.repo)),
        );

        let credential = credential::resolve_with(&tool.token_env, self.env)?;
        report.pass(
            CheckName::Credential,
            Some(format!("{} is set", credential.var())),
        );

        debug!(base_url = %tool.base_url, "structure and credential ok, contacting API");
        let identity = AuthChecker::new()?.verify(&tool, &credential)?;
        report.pass(
            CheckName::Authentication,
            identity
                .login
                .as_ref()
                .map(|login| format!("token is valid for user {login}")),
        );
        report.login = identity.login;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthFailure;
    use serde_json::json;
    use tempfile::TempDir;

    const TOKEN_VAR: &str = "MCPCHECK_TEST_TOKEN";

    fn write_config(dir: &TempDir, base_url: &str) -> PathBuf {
        let path = dir.path().join(".mcp.json");
        let doc = json!({
            "tools": {
                "github": {
                    "type": "github",
                    "tokenEnv": TOKEN_VAR,
                    "owner": "octo-org",
                    "repo": "handbook",
                    "baseUrl": base_url
                }
            }
        });
        std::fs::write(&path, doc.to_string()).unwrap();
        path
    }

    fn with_token(name: &str) -> Option<String> {
        (name == TOKEN_VAR).then(|| "ghp_test".to_string())
    }

    fn without_token(_: &str) -> Option<String> {
        None
    }

    fn checks(outcome: &SmokeOutcome) -> Vec<(CheckName, bool)> {
        outcome
            .report
            .checks
            .iter()
            .map(|c| (c.check, c.passed))
            .collect()
    }

    #[test]
    fn all_checks_pass() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/user")
            .match_header("authorization", "Bearer ghp_test")
            .with_status(200)
            .with_body(r#"{"login":"octocat"}"#)
            .create();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &server.url());

        let outcome = SmokeTest::new(&path, &with_token).run();

        assert!(outcome.passed(), "{:?}", outcome.error);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            checks(&outcome),
            vec![
                (CheckName::LoadConfig, true),
                (CheckName::Structure, true),
                (CheckName::Credential, true),
                (CheckName::Authentication, true),
            ]
        );
        assert_eq!(outcome.report.login.as_deref(), Some("octocat"));
        mock.assert();
    }

    #[test]
    fn missing_config_stops_at_load() {
        let dir = TempDir::new().unwrap();
        let outcome = SmokeTest::new(dir.path().join(".mcp.json"), &with_token).run();
        assert!(!outcome.passed());
        assert_eq!(checks(&outcome), vec![(CheckName::LoadConfig, false)]);
        assert!(matches!(outcome.error, Some(CheckError::ConfigNotFound { .. })));
        assert_eq!(outcome.exit_code(), 2);
    }

    #[test]
    fn malformed_config_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".mcp.json");
        std::fs::write(&path, "tools: github").unwrap();
        let outcome = SmokeTest::new(&path, &with_token).run();
        assert_eq!(checks(&outcome), vec![(CheckName::LoadConfig, false)]);
        assert_eq!(outcome.exit_code(), 3);
    }

    #[test]
    fn missing_subtree_makes_no_request() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", mockito::Matcher::Any).expect(0).create();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".mcp.json");
        std::fs::write(&path, r#"{"tools":{}}"#).unwrap();

        let outcome = SmokeTest::new(&path, &with_token).run();

        assert_eq!(
            checks(&outcome),
            vec![(CheckName::LoadConfig, true), (CheckName::Structure, false)]
        );
        let failure = outcome.report.failure().unwrap();
        assert!(failure
            .message
            .as_deref()
            .unwrap()
            .contains("tools.github"));
        assert_eq!(outcome.exit_code(), 4);
        mock.assert();
    }

    #[test]
    fn unset_token_makes_no_request() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", mockito::Matcher::Any).expect(0).create();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &server.url());

        let outcome = SmokeTest::new(&path, &without_token).run();

        assert!(matches!(
            outcome.error,
            Some(CheckError::MissingCredential { ref var }) if var == TOKEN_VAR
        ));
        assert_eq!(checks(&outcome).last(), Some(&(CheckName::Credential, false)));
        assert_eq!(outcome.exit_code(), 5);
        mock.assert();
    }

    #[test]
    fn rejected_token_reports_status() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/user")
            .with_status(401)
            .with_body(r#"{"message":"Bad credentials"}"#)
            .expect(1)
            .create();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &server.url());

        let outcome = SmokeTest::new(&path, &with_token).run();

        assert!(matches!(
            outcome.error,
            Some(CheckError::AuthenticationFailed(AuthFailure::Rejected { status: 401, .. }))
        ));
        let failure = outcome.report.failure().unwrap();
        assert_eq!(failure.check, CheckName::Authentication);
        assert!(failure.message.as_deref().unwrap().contains("401"));
        assert_eq!(outcome.exit_code(), 6);
        mock.assert();
    }

    #[test]
    fn warnings_are_kept_on_pass() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(r#"{"login":"octocat"}"#)
            .create();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &server.url());

        let outcome = SmokeTest::new(&path, &with_token).run();

        assert!(outcome.passed());
        // Plain http base URL and a non-default token variable.
        assert_eq!(outcome.report.warnings.len(), 2);
    }

    #[test]
    fn repeated_runs_produce_identical_reports() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(r#"{"login":"octocat"}"#)
            .expect(2)
            .create();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &server.url());
        let smoke = SmokeTest::new(&path, &with_token);

        let first = smoke.run();
        let second = smoke.run();

        assert!(first.passed() && second.passed());
        assert_eq!(first.report, second.report);
        mock.assert();
    }
}
