use crate::config::ConfigWarning;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CheckName
// ---------------------------------------------------------------------------

/// The checks, in the order the smoke test runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    LoadConfig,
    Structure,
    Credential,
    Authentication,
}

impl CheckName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckName::LoadConfig => "load_config",
            CheckName::Structure => "structure",
            CheckName::Credential => "credential",
            CheckName::Authentication => "authentication",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CheckName::LoadConfig => "config file loads",
            CheckName::Structure => "GitHub tool config shape",
            CheckName::Credential => "token present in environment",
            CheckName::Authentication => "token accepted by GitHub API",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: CheckName,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Outcome of one smoke-test run. Checks are appended as they execute, so a
/// fail-fast run holds the passed checks followed by exactly one failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub checks: Vec<CheckResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ConfigWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

impl Report {
    pub fn pass(&mut self, check: CheckName, message: Option<String>) {
        self.checks.push(CheckResult {
            check,
            passed: true,
            message,
        });
    }

    pub fn fail(&mut self, check: CheckName, message: impl Into<String>) {
        self.checks.push(CheckResult {
            check,
            passed: false,
            message: Some(message.into()),
        });
    }

    /// True only when at least one check ran and none failed.
    pub fn passed(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|c| c.passed)
    }

    pub fn failure(&self) -> Option<&CheckResult> {
        self.checks.iter().find(|c| !c.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_not_a_pass() {
        assert!(!Report::default().passed());
    }

    #[test]
    fn failure_is_found_after_passes() {
        let mut report = Report::default();
        report.pass(CheckName::LoadConfig, None);
        report.fail(CheckName::Structure, "missing required object 'tools.github'");
        assert!(!report.passed());
        let failure = report.failure().unwrap();
        assert_eq!(failure.check, CheckName::Structure);
        assert_eq!(report.checks.len(), 2);
    }

    #[test]
    fn report_json_uses_snake_case_names() {
        let mut report = Report::default();
        report.pass(CheckName::LoadConfig, Some(".mcp.json".to_string()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["checks"][0]["check"], "load_config");
        assert!(json.get("warnings").is_none());
        assert!(json.get("login").is_none());
    }

    #[test]
    fn display_matches_serialized_name() {
        let json = serde_json::to_value(CheckName::Authentication).unwrap();
        assert_eq!(json, CheckName::Authentication.to_string());
    }
}
