use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `MCPCHECK_ROOT` env var (passed in as `explicit`)
/// 2. The current working directory
///
/// There is no upward search: a missing `.mcp.json` in the working directory
/// is reported as such rather than silently picking up a parent's config.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
