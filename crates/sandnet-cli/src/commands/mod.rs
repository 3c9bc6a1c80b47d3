//! CLI command definitions and dispatch.

pub mod paths;
pub mod resolv;
pub mod setup;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sandnet_common::config::SandnetConfig;
use sandnet_common::constants::{ENV_CONFIG, ENV_HOSTS_FILE, ENV_SANDBOX_ROOT};

/// sandnet — sandbox network identity setup.
#[derive(Parser, Debug)]
#[command(name = "sandnet", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file.
    #[arg(long, global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Base directory holding one subdirectory per sandbox.
    #[arg(long, global = true, env = ENV_SANDBOX_ROOT)]
    pub sandbox_root: Option<PathBuf>,

    /// Hosts file copied into each sandbox.
    #[arg(long, global = true, env = ENV_HOSTS_FILE)]
    pub hosts_file: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the artifact paths for a sandbox id.
    Paths(paths::PathsArgs),
    /// Write hostname, hosts, and resolv.conf for a sandbox.
    Setup(setup::SetupArgs),
    /// Render resolv.conf content from explicit lists.
    Resolv(resolv::ResolvArgs),
}

impl Cli {
    /// Builds the effective configuration: file first, then flags and env.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or the
    /// result contains a relative path.
    pub fn resolve_config(&self) -> anyhow::Result<SandnetConfig> {
        let mut config = match &self.config {
            Some(path) => SandnetConfig::load(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => SandnetConfig::default(),
        };
        if let Some(root) = &self.sandbox_root {
            config.sandbox_root.clone_from(root);
        }
        if let Some(hosts) = &self.hosts_file {
            config.hosts_file.clone_from(hosts);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    match cli.command {
        Command::Paths(args) => paths::execute(&config, &args),
        Command::Setup(args) => setup::execute(&config, &args),
        Command::Resolv(args) => resolv::execute(&args),
    }
}
