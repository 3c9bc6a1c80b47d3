//! Host system facts consumed during identity setup.

use std::path::{Path, PathBuf};

/// Source of the host's hostname and base hosts file.
///
/// Injected into the materializer so tests can replace the ambient host.
pub trait SystemInfo: Send + Sync {
    /// Returns the current system hostname.
    ///
    /// # Errors
    ///
    /// Returns an error if the hostname cannot be determined.
    fn hostname(&self) -> std::io::Result<String>;

    /// Returns the hosts file to duplicate into each sandbox.
    fn hosts_file(&self) -> &Path;
}

/// [`SystemInfo`] backed by the running host.
#[derive(Debug, Clone)]
pub struct HostSystem {
    hosts_file: PathBuf,
}

impl HostSystem {
    /// Creates a provider that copies hosts entries from `hosts_file`.
    #[must_use]
    pub fn new(hosts_file: impl Into<PathBuf>) -> Self {
        Self {
            hosts_file: hosts_file.into(),
        }
    }
}

impl Default for HostSystem {
    fn default() -> Self {
        Self::new(sandnet_common::constants::SYSTEM_HOSTS_FILE)
    }
}

impl SystemInfo for HostSystem {
    fn hostname(&self) -> std::io::Result<String> {
        let name = nix::unistd::gethostname().map_err(std::io::Error::from)?;
        name.into_string().map_err(|raw| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("hostname is not valid UTF-8: {raw:?}"),
            )
        })
    }

    fn hosts_file(&self) -> &Path {
        &self.hosts_file
    }
}
