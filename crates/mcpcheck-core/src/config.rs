use crate::error::{CheckError, Result};
use crate::paths::{self, GITHUB_TOOL_PATH, GITHUB_TOOL_POINTER};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const GITHUB_TOOL_TYPE: &str = "github";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Fields that must be present and non-empty under `tools.github`.
pub const REQUIRED_FIELDS: &[&str] = &["type", "tokenEnv", "owner", "repo", "baseUrl"];

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl ConfigWarning {
    fn error(message: impl Into<String>) -> Self {
        Self {
            level: WarnLevel::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: WarnLevel::Warning,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// GithubTool
// ---------------------------------------------------------------------------

/// The validated `tools.github` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub token_env: String,
    pub owner: String,
    pub repo: String,
    pub base_url: String,
}

impl GithubTool {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            tool_type: GITHUB_TOOL_TYPE.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// The "who am I" endpoint under `base_url`. Any path prefix on the base
    /// (GitHub Enterprise uses `/api/v3`) is kept, as is a query string.
    pub fn identity_url(&self) -> Result<Url> {
        let invalid = |reason: String| {
            CheckError::Structural(vec![format!(
                "field '{}' {reason}",
                paths::github_field("baseUrl")
            )])
        };
        let mut url =
            Url::parse(&self.base_url).map_err(|e| invalid(format!("is not a valid URL: {e}")))?;
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be used as a base URL".to_string()))?
            .pop_if_empty()
            .push("user");
        Ok(url)
    }
}

// ---------------------------------------------------------------------------
// McpConfig
// ---------------------------------------------------------------------------

/// A parsed `.mcp.json`. The document is kept untyped so that validation can
/// name exactly which part of `tools.github` is missing, and so unrelated
/// keys never cause a failure.
#[derive(Debug, Clone)]
pub struct McpConfig {
    path: PathBuf,
    document: Value,
}

impl McpConfig {
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading MCP config");
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CheckError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let document = serde_json::from_slice(&data).map_err(|error| CheckError::ConfigParse {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn from_value(path: impl Into<PathBuf>, document: Value) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw `tools.github` value, if the document has one.
    pub fn github_value(&self) -> Option<&Value> {
        self.document.pointer(GITHUB_TOOL_POINTER)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Inspect the `tools.github` subtree. Errors make the structural check
    /// fail; warnings are reported alongside a pass.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let github = match self.github_value() {
            Some(Value::Object(map)) => map,
            Some(_) => {
                warnings.push(ConfigWarning::error(format!(
                    "'{GITHUB_TOOL_PATH}' must be an object"
                )));
                return warnings;
            }
            None => {
                warnings.push(ConfigWarning::error(format!(
                    "missing required object '{GITHUB_TOOL_PATH}'"
                )));
                return warnings;
            }
        };

        for field in REQUIRED_FIELDS {
            let path = paths::github_field(field);
            let value = match github.get(*field) {
                None | Some(Value::Null) => {
                    warnings.push(ConfigWarning::error(format!(
                        "missing required field '{path}'"
                    )));
                    continue;
                }
                Some(Value::String(s)) if s.trim().is_empty() => {
                    warnings.push(ConfigWarning::error(format!(
                        "field '{path}' must not be empty"
                    )));
                    continue;
                }
                Some(Value::String(s)) => s.as_str(),
                Some(_) => {
                    warnings.push(ConfigWarning::error(format!(
                        "field '{path}' must be a string"
                    )));
                    continue;
                }
            };

            match *field {
                "type" if value != GITHUB_TOOL_TYPE => {
                    warnings.push(ConfigWarning::error(format!(
                        "field '{path}' must be \"{GITHUB_TOOL_TYPE}\" (found \"{value}\")"
                    )));
                }
                "tokenEnv" => validate_token_env(&path, value, &mut warnings),
                "baseUrl" => validate_base_url(&path, value, &mut warnings),
                _ => {}
            }
        }

        warnings
    }

    /// The typed GitHub tool entry. Fails with every structural error found.
    pub fn github_tool(&self) -> Result<GithubTool> {
        self.check_structure().1
    }

    /// Validate once and split the findings: warnings are returned either
    /// way, errors become the `Err` of the tool entry.
    pub fn check_structure(&self) -> (Vec<ConfigWarning>, Result<GithubTool>) {
        let (errors, warnings): (Vec<ConfigWarning>, Vec<ConfigWarning>) = self
            .validate()
            .into_iter()
            .partition(|w| w.level == WarnLevel::Error);
        if !errors.is_empty() {
            let messages = errors.into_iter().map(|w| w.message).collect();
            return (warnings, Err(CheckError::Structural(messages)));
        }
        (warnings, self.typed_tool())
    }

    fn typed_tool(&self) -> Result<GithubTool> {
        let value = self.github_value().cloned().ok_or_else(|| {
            CheckError::Structural(vec![format!(
                "missing required object '{GITHUB_TOOL_PATH}'"
            )])
        })?;
        Ok(serde_json::from_value(value)?)
    }

    // -----------------------------------------------------------------------
    // Template
    // -----------------------------------------------------------------------

    /// Pretty JSON for a fresh `.mcp.json` holding only `tool`.
    pub fn template(tool: &GithubTool) -> Result<String> {
        let document = serde_json::json!({
            "tools": {
                "github": tool,
            }
        });
        let mut data = serde_json::to_string_pretty(&document)?;
        data.push('\n');
        Ok(data)
    }

    /// Write a template config at `path` unless a file is already there.
    /// Returns true if the file was written.
    pub fn write_template(path: &Path, tool: &GithubTool) -> Result<bool> {
        let data = Self::template(tool)?;
        crate::io::write_if_missing(path, data.as_bytes())
    }
}

fn validate_token_env(path: &str, value: &str, warnings: &mut Vec<ConfigWarning>) {
    if value.contains(['=', '\0']) || value.chars().any(char::is_whitespace) {
        warnings.push(ConfigWarning::error(format!(
            "field '{path}' is not a valid environment variable name"
        )));
    } else if value != DEFAULT_TOKEN_ENV {
        warnings.push(ConfigWarning::warning(format!(
            "'{path}' is '{value}'; the conventional name is '{DEFAULT_TOKEN_ENV}'"
        )));
    }
}

fn validate_base_url(path: &str, value: &str, warnings: &mut Vec<ConfigWarning>) {
    match Url::parse(value) {
        Err(e) => warnings.push(ConfigWarning::error(format!(
            "field '{path}' is not a valid URL: {e}"
        ))),
        Ok(url) => match url.scheme() {
            "https" => {}
            "http" => warnings.push(ConfigWarning::warning(format!(
                "'{path}' uses plain http; the token will be sent unencrypted"
            ))),
            other => warnings.push(ConfigWarning::error(format!(
                "field '{path}' must be an http(s) URL (found scheme '{other}')"
            ))),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
