//! `sandnet setup` — Materialize a sandbox's network identity files.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use sandnet_common::config::SandnetConfig;
use sandnet_common::types::{OperationContext, SandboxId};
use sandnet_core::network::InMemoryRegistry;
use sandnet_core::spec::Spec;
use sandnet_runtime::identity::IdentityMaterializer;

/// Arguments for the `setup` command.
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Sandbox identifier.
    pub id: String,

    /// OCI runtime spec (JSON).
    #[arg(long)]
    pub spec: PathBuf,

    /// Network namespaces with their adapters (JSON array).
    #[arg(long)]
    pub namespaces: PathBuf,

    /// Write the sanitized spec here instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Correlation id for log records (generated when omitted).
    #[arg(long)]
    pub activity_id: Option<String>,
}

/// Executes the `setup` command.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded, setup fails, or the
/// sanitized spec cannot be written.
pub fn execute(config: &SandnetConfig, args: &SetupArgs) -> anyhow::Result<()> {
    let id = SandboxId::new(args.id.as_str())?;
    let spec = Spec::load(&args.spec)
        .with_context(|| format!("loading spec {}", args.spec.display()))?;
    let registry = InMemoryRegistry::load(&args.namespaces)
        .with_context(|| format!("loading namespaces {}", args.namespaces.display()))?;

    let ctx = args
        .activity_id
        .as_deref()
        .map_or_else(OperationContext::new, OperationContext::with_activity_id);
    let materializer = IdentityMaterializer::from_config(config, Arc::new(registry));
    let sanitized = materializer
        .setup(&ctx, &id, &spec)
        .with_context(|| format!("setting up sandbox {id}"))?;

    let json = sanitized.to_json()?;
    match &args.out {
        Some(path) => std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("writing sanitized spec {}", path.display()))?,
        None => println!("{json}"),
    }
    tracing::info!(cid = %id, root = %materializer.paths().root_dir(&id).display(), "sandbox ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_writes_artifacts_and_sanitized_spec() {
        let dir = tempfile::tempdir().expect("tempdir");
        let hosts = dir.path().join("hosts");
        std::fs::write(&hosts, "127.0.0.1 localhost\n").expect("hosts");
        let spec = dir.path().join("spec.json");
        std::fs::write(
            &spec,
            r#"{"hostname": "web-1", "windows": {"network": {"networkNamespace": "NS"}}}"#,
        )
        .expect("spec");
        let namespaces = dir.path().join("ns.json");
        std::fs::write(
            &namespaces,
            r#"[{"Id": "ns", "Adapters": [{"DNSSuffix": "corp.local", "DNSServerList": "10.0.0.1"}]}]"#,
        )
        .expect("namespaces");
        let out = dir.path().join("out.json");

        let config = SandnetConfig {
            sandbox_root: dir.path().join("cri"),
            hosts_file: hosts,
        };
        let args = SetupArgs {
            id: "abc123".into(),
            spec,
            namespaces,
            out: Some(out.clone()),
            activity_id: Some("act".into()),
        };
        execute(&config, &args).expect("setup");

        let root = dir.path().join("cri").join("abc123");
        assert_eq!(
            std::fs::read_to_string(root.join("hostname")).expect("read"),
            "web-1\n"
        );
        assert_eq!(
            std::fs::read_to_string(root.join("resolv.conf")).expect("read"),
            "search corp.local\nnameserver 10.0.0.1\n"
        );
        let written = std::fs::read_to_string(out).expect("read out");
        assert!(!written.contains("windows"));
        assert!(written.contains("web-1"));
    }
}
