use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and key constants
// ---------------------------------------------------------------------------

pub const MCP_FILE: &str = ".mcp.json";

/// Dotted path of the GitHub tool subtree, used in messages.
pub const GITHUB_TOOL_PATH: &str = "tools.github";

/// JSON pointer form of [`GITHUB_TOOL_PATH`].
pub const GITHUB_TOOL_POINTER: &str = "/tools/github";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(MCP_FILE)
}

/// Dotted path of a field under `tools.github`, e.g. `tools.github.owner`.
pub fn github_field(field: &str) -> String {
    format!("{GITHUB_TOOL_PATH}.{field}")
}
