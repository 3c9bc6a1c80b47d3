//! Unified error type for the sandnet workspace.
//!
//! Every fallible operation in the library crates returns [`SandnetError`].
//! Variants carry the path or stage that failed so a single terminal error
//! is enough to diagnose a failed sandbox setup.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum SandnetError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The sandbox root directory could not be created.
    #[error("failed to create sandbox root directory {path:?}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An artifact file could not be written.
    #[error("failed to write {artifact} to {path:?}: {source}")]
    WriteFile {
        /// Human-readable artifact name (`hostname`, `resolv.conf`).
        artifact: &'static str,
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A file copy failed.
    #[error("failed to copy {from:?} to {to:?}: {source}")]
    CopyFile {
        /// Source path.
        from: PathBuf,
        /// Destination path.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The system hostname could not be determined.
    #[error("failed to get hostname: {source}")]
    Hostname {
        /// Underlying error from the system-info provider.
        source: std::io::Error,
    },

    /// No network namespace is registered under the given id.
    #[error("network namespace not found: {id:?}")]
    NamespaceNotFound {
        /// Namespace id that was looked up.
        id: String,
    },

    /// More search domains were supplied than the resolver accepts.
    #[error("search list has {count} domains, at most {max} are allowed")]
    TooManySearchDomains {
        /// Number of domains supplied.
        count: usize,
        /// Maximum accepted.
        max: usize,
    },

    /// The operation context was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// Resolver content generation failed.
    #[error("failed to generate sandbox resolv.conf content: {source}")]
    ResolvConf {
        /// Error reported by the generator.
        source: Box<SandnetError>,
    },

    /// A sandbox id cannot be used as a directory name.
    #[error("invalid sandbox id {id:?}: {reason}")]
    InvalidSandboxId {
        /// Rejected id.
        id: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SandnetError>;
