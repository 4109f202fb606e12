use crate::report::CheckName;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("config not found at {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to parse {}: {error}", .path.display())]
    ConfigParse {
        path: PathBuf,
        error: serde_json::Error,
    },

    #[error("{}", .0.join("; "))]
    Structural(Vec<String>),

    #[error("environment variable {var} is not set or empty")]
    MissingCredential { var: String },

    #[error("{0}")]
    AuthenticationFailed(AuthFailure),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Why the identity endpoint did not accept the token.
#[derive(Debug, Error, PartialEq)]
pub enum AuthFailure {
    #[error("GitHub API returned HTTP {status}{}", .message.as_deref().map(|m| format!(" ({m})")).unwrap_or_default())]
    Rejected { status: u16, message: Option<String> },

    #[error("request failed: {0}")]
    Transport(String),
}

impl CheckError {
    /// The check this error fails.
    pub fn check(&self) -> CheckName {
        match self {
            CheckError::ConfigNotFound { .. } | CheckError::ConfigParse { .. } | CheckError::Io(_) => {
                CheckName::LoadConfig
            }
            CheckError::Structural(_) | CheckError::Json(_) => CheckName::Structure,
            CheckError::MissingCredential { .. } => CheckName::Credential,
            CheckError::AuthenticationFailed(_) => CheckName::Authentication,
        }
    }

    /// Process exit code for this failure. Each failure kind gets its own code;
    /// `1` is left for errors outside the check pipeline.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::ConfigNotFound { .. } => 2,
            CheckError::ConfigParse { .. } => 3,
            CheckError::Structural(_) => 4,
            CheckError::MissingCredential { .. } => 5,
            CheckError::AuthenticationFailed(_) => 6,
            CheckError::Io(_) | CheckError::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
