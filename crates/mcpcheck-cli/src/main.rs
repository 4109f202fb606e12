mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use mcpcheck_core::{paths, CheckError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mcpcheck",
    about = "Smoke test for the GitHub tool entry in .mcp.json: config shape, token presence, and token validity",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root holding .mcp.json (default: current directory)
    #[arg(long, global = true, env = "MCPCHECK_ROOT")]
    root: Option<PathBuf>,

    /// Config file to check (default: <root>/.mcp.json)
    #[arg(long, global = true, env = "MCPCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every check: load, structure, credential, authentication (default)
    Check,

    /// Inspect the config without contacting the API
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Write a template .mcp.json with a GitHub tool entry (never overwrites)
    Init {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,

        /// Repository name
        #[arg(long)]
        repo: String,

        /// Environment variable holding the token
        #[arg(long)]
        token_env: Option<String>,

        /// API base URL (e.g. https://ghe.example.com/api/v3)
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let config_path = cli.config.unwrap_or_else(|| paths::config_path(&root));
    tracing::debug!(root = %root.display(), config = %config_path.display(), "resolved paths");

    let result = match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => cmd::check::run(&config_path, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&config_path, subcommand, cli.json),
        Commands::Init {
            owner,
            repo,
            token_env,
            base_url,
        } => cmd::init::run(&config_path, owner, repo, token_env, base_url, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        let code = e
            .downcast_ref::<CheckError>()
            .map_or(1, CheckError::exit_code);
        std::process::exit(code);
    }
}
