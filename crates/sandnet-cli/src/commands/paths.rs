//! `sandnet paths` — Show where a sandbox's artifacts live.

use clap::Args;
use sandnet_common::config::SandnetConfig;
use sandnet_common::types::SandboxId;
use sandnet_core::paths::SandboxPaths;

/// Arguments for the `paths` command.
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Sandbox identifier.
    pub id: String,
}

/// Executes the `paths` command.
///
/// # Errors
///
/// Returns an error if the id is not a valid sandbox id.
pub fn execute(config: &SandnetConfig, args: &PathsArgs) -> anyhow::Result<()> {
    let id = SandboxId::new(args.id.as_str())?;
    for (label, path) in rows(&SandboxPaths::new(&config.sandbox_root), &id) {
        println!("{label:<12} {}", path.display());
    }
    Ok(())
}

fn rows(paths: &SandboxPaths, id: &SandboxId) -> [(&'static str, std::path::PathBuf); 4] {
    [
        ("root", paths.root_dir(id)),
        ("hostname", paths.hostname_path(id)),
        ("hosts", paths.hosts_path(id)),
        ("resolv.conf", paths.resolv_path(id)),
    ]
}
