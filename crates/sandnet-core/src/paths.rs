//! Sandbox artifact path layout.
//!
//! Every sandbox owns exactly one directory `<root>/<id>` containing
//! `hostname`, `hosts`, and `resolv.conf`. Other components must ask
//! [`SandboxPaths`] for these locations instead of joining paths themselves.

use std::path::{Path, PathBuf};

use sandnet_common::constants::{HOSTNAME_FILE, HOSTS_FILE, RESOLV_CONF_FILE};
use sandnet_common::types::SandboxId;

/// Resolves on-disk artifact paths from a sandbox id.
///
/// Pure and infallible; derivation depends only on the base directory and
/// the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxPaths {
    base: PathBuf,
}

impl SandboxPaths {
    /// Creates a resolver rooted at `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Returns the base directory shared by all sandboxes.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the sandbox root directory.
    #[must_use]
    pub fn root_dir(&self, id: &SandboxId) -> PathBuf {
        self.base.join(id.as_str())
    }

    /// Returns the hostname artifact path.
    #[must_use]
    pub fn hostname_path(&self, id: &SandboxId) -> PathBuf {
        self.root_dir(id).join(HOSTNAME_FILE)
    }

    /// Returns the hosts artifact path.
    #[must_use]
    pub fn hosts_path(&self, id: &SandboxId) -> PathBuf {
        self.root_dir(id).join(HOSTS_FILE)
    }

    /// Returns the `resolv.conf` artifact path.
    #[must_use]
    pub fn resolv_path(&self, id: &SandboxId) -> PathBuf {
        self.root_dir(id).join(RESOLV_CONF_FILE)
    }
}

impl Default for SandboxPaths {
    fn default() -> Self {
        Self::new(sandnet_common::constants::DEFAULT_SANDBOX_ROOT)
    }
}
