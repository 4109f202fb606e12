use crate::error::{CheckError, Result};
use secrecy::{ExposeSecret, Secret};
use tracing::debug;

/// Environment lookup used to resolve the token variable.
pub type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// A token read from the environment. `Debug` output is redacted.
#[derive(Debug)]
pub struct Credential {
    var: String,
    token: Secret<String>,
}

impl Credential {
    /// Name of the variable the token came from.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// The token itself. Only the HTTP layer should call this.
    pub fn expose(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Read from the real process environment. Non-unicode values count as unset.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub fn resolve(var: &str) -> Result<Credential> {
    resolve_with(var, &process_env)
}

pub fn resolve_with(var: &str, lookup: &EnvLookup<'_>) -> Result<Credential> {
    // Surrounding whitespace (a trailing newline from `$(cat token.txt)`)
    // is never part of a token and would make an invalid header.
    match lookup(var).map(|token| token.trim().to_string()) {
        Some(token) if !token.is_empty() => {
            debug!(var, "token found in environment");
            Ok(Credential {
                var: var.to_string(),
                token: Secret::new(token),
            })
        }
        _ => {
            debug!(var, "token missing from environment");
            Err(CheckError::MissingCredential {
                var: var.to_string(),
            })
        }
    }
}
