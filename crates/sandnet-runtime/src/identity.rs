//! Sandbox identity materialization.
//!
//! Before a sandbox's spec is handed to the container runtime, its
//! `hostname`, `hosts`, and `resolv.conf` files must exist under the
//! sandbox directory. [`IdentityMaterializer::setup`] produces them.
//!
//! There is no rollback: a failure at one step leaves the files of the
//! earlier steps on disk. Every write overwrites a fixed path, so rerunning
//! the whole setup converges. Concurrent setup of the *same* sandbox id is
//! not coordinated here and must be serialized by the caller.

use std::sync::Arc;

use sandnet_common::config::SandnetConfig;
use sandnet_common::constants::{SANDBOX_DIR_MODE, SANDBOX_FILE_MODE};
use sandnet_common::error::{Result, SandnetError};
use sandnet_common::types::{OperationContext, SandboxId};
use sandnet_core::filesystem;
use sandnet_core::network::{MergedDns, NamespaceRegistry, ResolvConfGenerator, StandardResolvConf};
use sandnet_core::paths::SandboxPaths;
use sandnet_core::spec::Spec;
use sandnet_core::sysinfo::{HostSystem, SystemInfo};

use crate::instrument::{OperationLog, OperationSpan, TracingLog};

/// Operation name attached to every setup record.
pub const SETUP_OPERATION: &str = "setup_sandbox_identity";

/// Writes a sandbox's network identity files.
pub struct IdentityMaterializer {
    paths: SandboxPaths,
    registry: Arc<dyn NamespaceRegistry>,
    generator: Arc<dyn ResolvConfGenerator>,
    system: Arc<dyn SystemInfo>,
    log: Arc<dyn OperationLog>,
}

impl IdentityMaterializer {
    /// Creates a materializer with the host system, the standard
    /// `resolv.conf` layout, and `tracing` output.
    #[must_use]
    pub fn new(paths: SandboxPaths, registry: Arc<dyn NamespaceRegistry>) -> Self {
        Self {
            paths,
            registry,
            generator: Arc::new(StandardResolvConf),
            system: Arc::new(HostSystem::default()),
            log: Arc::new(TracingLog),
        }
    }

    /// Creates a materializer from the sandbox root and hosts file in `config`.
    #[must_use]
    pub fn from_config(config: &SandnetConfig, registry: Arc<dyn NamespaceRegistry>) -> Self {
        Self::new(SandboxPaths::new(&config.sandbox_root), registry)
            .with_system(Arc::new(HostSystem::new(&config.hosts_file)))
    }

    /// Replaces the `resolv.conf` generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn ResolvConfGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replaces the hostname and hosts-file provider.
    #[must_use]
    pub fn with_system(mut self, system: Arc<dyn SystemInfo>) -> Self {
        self.system = system;
        self
    }

    /// Replaces the sink for per-invocation records.
    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn OperationLog>) -> Self {
        self.log = log;
        self
    }

    /// Returns the path layout used by this materializer.
    #[must_use]
    pub const fn paths(&self) -> &SandboxPaths {
        &self.paths
    }

    /// Materializes the identity files for `id` and returns `spec` without
    /// its Windows section.
    ///
    /// Steps, in order: create the sandbox directory, write `hostname`
    /// (from the spec, or the system hostname when empty), copy the hosts
    /// file, then merge the DNS settings of every adapter in the spec's
    /// network namespace and write `resolv.conf`. The caller's `spec` is
    /// left untouched.
    ///
    /// Exactly one [`OperationRecord`](crate::instrument::OperationRecord)
    /// is emitted per call.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error. Namespace lookup errors are
    /// returned exactly as the registry produced them.
    pub fn setup(&self, ctx: &OperationContext, id: &SandboxId, spec: &Spec) -> Result<Spec> {
        let mut span =
            OperationSpan::start(self.log.as_ref(), SETUP_OPERATION, id.as_str(), ctx.activity_id());
        let result = self.materialize(ctx, id, spec);
        if let Err(e) = &result {
            span.fail(e);
        }
        result
    }

    fn materialize(&self, ctx: &OperationContext, id: &SandboxId, spec: &Spec) -> Result<Spec> {
        let root = self.paths.root_dir(id);
        filesystem::ensure_dir(&root, SANDBOX_DIR_MODE).map_err(|source| SandnetError::CreateDir {
            path: root.clone(),
            source,
        })?;

        let hostname = self.hostname_for(spec)?;
        let hostname_path = self.paths.hostname_path(id);
        filesystem::write_file(&hostname_path, format!("{hostname}\n").as_bytes(), SANDBOX_FILE_MODE)
            .map_err(|source| SandnetError::WriteFile {
                artifact: "hostname",
                path: hostname_path.clone(),
                source,
            })?;

        let hosts_source = self.system.hosts_file();
        let hosts_path = self.paths.hosts_path(id);
        filesystem::copy_file(hosts_source, &hosts_path, SANDBOX_FILE_MODE).map_err(|source| {
            SandnetError::CopyFile {
                from: hosts_source.to_path_buf(),
                to: hosts_path.clone(),
                source,
            }
        })?;

        let content = self.resolv_conf_content(ctx, spec)?;
        let resolv_path = self.paths.resolv_path(id);
        filesystem::write_file(&resolv_path, content.as_bytes(), SANDBOX_FILE_MODE).map_err(
            |source| SandnetError::WriteFile {
                artifact: "resolv.conf",
                path: resolv_path.clone(),
                source,
            },
        )?;

        tracing::debug!(cid = %id, hostname = %hostname, root = %root.display(), "sandbox identity written");
        Ok(spec.sanitized())
    }

    fn hostname_for(&self, spec: &Spec) -> Result<String> {
        if !spec.hostname.is_empty() {
            return Ok(spec.hostname.clone());
        }
        self.system
            .hostname()
            .map_err(|source| SandnetError::Hostname { source })
    }

    fn resolv_conf_content(&self, ctx: &OperationContext, spec: &Spec) -> Result<String> {
        let ns = self.registry.resolve(ctx, &spec.network_namespace_id())?;
        let merged = MergedDns::from_adapters(ns.adapters());
        tracing::debug!(
            namespace = %ns.id,
            adapters = ns.adapters().len(),
            searches = ?merged.searches,
            servers = ?merged.servers,
            "merged adapter DNS settings"
        );
        self.generator
            .generate(ctx, &merged.searches, &merged.servers, &[])
            .map_err(|e| SandnetError::ResolvConf { source: Box::new(e) })
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use sandnet_core::network::{Adapter, InMemoryRegistry, NetworkNamespace};

    use super::*;
    use crate::instrument::MemoryLog;

    struct FakeSystem {
        hostname: Option<String>,
        hosts_file: PathBuf,
    }

    impl SystemInfo for FakeSystem {
        fn hostname(&self) -> std::io::Result<String> {
            self.hostname
                .clone()
                .ok_or_else(|| std::io::Error::other("no hostname"))
        }

        fn hosts_file(&self) -> &Path {
            &self.hosts_file
        }
    }

    struct Fixture {
        dir: tempfile::TempDir,
        log: Arc<MemoryLog>,
        materializer: IdentityMaterializer,
    }

    fn fixture(system_hostname: Option<&str>, adapters: Vec<Adapter>) -> Fixture {
        let dir = tempfile::tempdir().expect("tempdir");
        let hosts_file = dir.path().join("etc-hosts");
        std::fs::write(&hosts_file, "127.0.0.1 localhost\n").expect("seed hosts");

        let registry = InMemoryRegistry::new();
        registry.add_namespace(NetworkNamespace {
            id: "ns1".into(),
            adapters,
        });

        let log = Arc::new(MemoryLog::new());
        let materializer =
            IdentityMaterializer::new(SandboxPaths::new(dir.path().join("sandboxes")), Arc::new(registry))
                .with_system(Arc::new(FakeSystem {
                    hostname: system_hostname.map(str::to_owned),
                    hosts_file,
                }))
                .with_log(log.clone());
        Fixture {
            dir,
            log,
            materializer,
        }
    }

    fn spec(hostname: &str, namespace: &str) -> Spec {
        Spec::from_json(&format!(
            r#"{{"hostname": "{hostname}", "windows": {{"network": {{"networkNamespace": "{namespace}"}}}}}}"#
        ))
        .expect("spec")
    }

    fn sid(s: &str) -> SandboxId {
        SandboxId::new(s).expect("id")
    }

    #[test]
    fn spec_hostname_wins() {
        let fx = fixture(Some("host-machine"), Vec::new());
        let id = sid("sb1");
        let _ = fx
            .materializer
            .setup(&OperationContext::new(), &id, &spec("web-1", "ns1"))
            .expect("setup");
        let written = std::fs::read_to_string(fx.materializer.paths().hostname_path(&id)).expect("read");
        assert_eq!(written, "web-1\n");
    }

    #[test]
    fn empty_hostname_falls_back_to_system() {
        let fx = fixture(Some("host-machine"), Vec::new());
        let id = sid("sb1");
        let _ = fx
            .materializer
            .setup(&OperationContext::new(), &id, &spec("", "ns1"))
            .expect("setup");
        let written = std::fs::read_to_string(fx.materializer.paths().hostname_path(&id)).expect("read");
        assert_eq!(written, "host-machine\n");
    }

    #[test]
    fn hostname_fallback_failure_is_fatal() {
        let fx = fixture(None, Vec::new());
        let id = sid("sb1");
        let err = fx
            .materializer
            .setup(&OperationContext::new(), &id, &spec("", "ns1"))
            .unwrap_err();
        assert!(matches!(err, SandnetError::Hostname { .. }));
        assert!(fx.materializer.paths().root_dir(&id).is_dir());
        assert!(!fx.materializer.paths().hostname_path(&id).exists());
    }

    #[test]
    fn resolv_conf_merges_adapters() {
        let fx = fixture(
            Some("h"),
            vec![
                Adapter::new("n1", "a,b", "1.1.1.1,2.2.2.2"),
                Adapter::new("n2", "b,c", "2.2.2.2,3.3.3.3"),
            ],
        );
        let id = sid("sb1");
        let _ = fx
            .materializer
            .setup(&OperationContext::new(), &id, &spec("h", "NS1"))
            .expect("setup");
        let resolv = std::fs::read_to_string(fx.materializer.paths().resolv_path(&id)).expect("read");
        assert_eq!(
            resolv,
            "search a b c\nnameserver 1.1.1.1\nnameserver 2.2.2.2\nnameserver 3.3.3.3\n"
        );
    }

    #[test]
    fn namespace_error_is_passed_through() {
        let fx = fixture(Some("h"), Vec::new());
        let id = sid("sb1");
        let err = fx
            .materializer
            .setup(&OperationContext::new(), &id, &spec("h", "other"))
            .unwrap_err();
        assert!(matches!(err, SandnetError::NamespaceNotFound { ref id } if id == "other"));
        let paths = fx.materializer.paths();
        assert!(paths.hostname_path(&id).exists());
        assert!(paths.hosts_path(&id).exists());
        assert!(!paths.resolv_path(&id).exists());
    }

    #[test]
    fn generator_error_is_wrapped() {
        let adapter = Adapter::new("n1", "a,b,c,d,e,f,g", "1.1.1.1");
        let fx = fixture(Some("h"), vec![adapter]);
        let err = fx
            .materializer
            .setup(&OperationContext::new(), &sid("sb1"), &spec("h", "ns1"))
            .unwrap_err();
        assert!(matches!(err, SandnetError::ResolvConf { .. }));
        assert!(
            err.to_string()
                .starts_with("failed to generate sandbox resolv.conf content")
        );
    }

    #[test]
    fn missing_hosts_source_names_both_paths() {
        let fx = fixture(Some("h"), Vec::new());
        std::fs::remove_file(fx.dir.path().join("etc-hosts")).expect("remove");
        let err = fx
            .materializer
            .setup(&OperationContext::new(), &sid("sb1"), &spec("h", "ns1"))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("etc-hosts"));
        assert!(msg.contains("sb1/hosts"));
    }

    #[test]
    fn returned_spec_is_sanitized_and_input_untouched() {
        let fx = fixture(Some("h"), Vec::new());
        let input = spec("h", "ns1");
        let out = fx
            .materializer
            .setup(&OperationContext::new(), &sid("sb1"), &input)
            .expect("setup");
        assert!(out.windows.is_none());
        assert!(input.windows.is_some());
    }

    #[test]
    fn one_record_per_invocation() {
        let fx = fixture(Some("h"), Vec::new());
        let ctx = OperationContext::with_activity_id("act-42");
        let _ = fx.materializer.setup(&ctx, &sid("ok"), &spec("h", "ns1")).expect("setup");
        let _ = fx
            .materializer
            .setup(&ctx, &sid("bad"), &spec("h", "missing"))
            .unwrap_err();

        let records = fx.log.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operation, SETUP_OPERATION);
        assert_eq!(records[0].cid, "ok");
        assert_eq!(records[0].activity_id, "act-42");
        assert!(records[0].error.is_none());
        assert_eq!(records[1].cid, "bad");
        assert!(
            records[1]
                .error
                .as_deref()
                .is_some_and(|e| e.contains("network namespace not found"))
        );
    }

    #[test]
    fn root_dir_failure_is_fatal() {
        let fx = fixture(Some("h"), Vec::new());
        std::fs::write(fx.dir.path().join("sandboxes"), "not a dir").expect("block root");
        let err = fx
            .materializer
            .setup(&OperationContext::new(), &sid("sb1"), &spec("h", "ns1"))
            .unwrap_err();
        assert!(matches!(err, SandnetError::CreateDir { .. }));
        assert!(err.to_string().contains("failed to create sandbox root directory"));
    }
}
