//! Token check against the GitHub identity endpoint.
//!
//! One blocking `GET <baseUrl>/user` per call, no retries. A 2xx status is a
//! pass; anything else is reported with the status code and the API's
//! `message` field when the body carries one.

use crate::config::GithubTool;
use crate::credential::Credential;
use crate::error::{AuthFailure, CheckError, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

pub const USER_AGENT: &str = concat!("mcpcheck/", env!("CARGO_PKG_VERSION"));
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Who the token belongs to, when the API says.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub login: Option<String>,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct AuthChecker {
    client: Client,
}

impl AuthChecker {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CheckError::AuthenticationFailed(AuthFailure::Transport(error_chain(&e))))?;
        Ok(Self { client })
    }

    pub fn verify(&self, tool: &GithubTool, credential: &Credential) -> Result<Identity> {
        let url = tool.identity_url()?;
        debug!(url = %url, token_env = credential.var(), "checking token against identity endpoint");

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(credential.expose())
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .send()
            .map_err(|e| {
                warn!(url = %url, "identity request failed");
                CheckError::AuthenticationFailed(AuthFailure::Transport(error_chain(&e)))
            })?;

        let status = response.status();
        // The body is only used for diagnostics, so a read failure is not fatal.
        let body = response.text().unwrap_or_default();
        let parsed = serde_json::from_str::<ApiMessage>(&body).ok();

        if status.is_success() {
            let login = parsed.and_then(|m| m.login);
            debug!(status = status.as_u16(), login = ?login, "token accepted");
            return Ok(Identity { login });
        }

        debug!(status = status.as_u16(), "token rejected");
        Err(CheckError::AuthenticationFailed(AuthFailure::Rejected {
            status: status.as_u16(),
            message: parsed.and_then(|m| m.message),
        }))
    }
}

/// reqwest keeps the useful part ("connection refused") in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !msg.contains(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }
    msg
}
