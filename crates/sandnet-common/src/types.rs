//! Domain primitive types used across the sandnet workspace.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SandnetError};

/// Unique identifier for a sandbox instance.
///
/// The id is used verbatim as a single directory name under the sandbox
/// root, so it must not be empty, a dot entry, or contain a separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SandboxId(String);

impl SandboxId {
    /// Creates a sandbox id from a string value.
    ///
    /// # Errors
    ///
    /// Returns [`SandnetError::InvalidSandboxId`] if the value cannot be
    /// used as a single path segment.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let reason = if id.is_empty() {
            Some("id is empty")
        } else if id == "." || id == ".." {
            Some("id is a relative directory entry")
        } else if id.contains('/') {
            Some("id contains a path separator")
        } else if id.contains('\0') {
            Some("id contains a NUL byte")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(SandnetError::InvalidSandboxId { id, reason }),
            None => Ok(Self(id)),
        }
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SandboxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SandboxId {
    type Error = SandnetError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SandboxId> for String {
    fn from(id: SandboxId) -> Self {
        id.0
    }
}

/// Per-invocation context threaded through every collaborator call.
///
/// Carries a correlation id for log output and a cancellation flag that
/// can be shared with the caller. Nothing in the materializer blocks on
/// the flag; collaborators that can abort early are expected to check it.
#[derive(Debug, Clone)]
pub struct OperationContext {
    activity_id: String,
    cancelled: Arc<AtomicBool>,
}

impl OperationContext {
    /// Creates a context with a freshly generated activity id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_activity_id(uuid::Uuid::new_v4().to_string())
    }

    /// Creates a context with a caller-supplied activity id.
    #[must_use]
    pub fn with_activity_id(activity_id: impl Into<String>) -> Self {
        Self {
            activity_id: activity_id.into(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the correlation id for log records.
    #[must_use]
    pub fn activity_id(&self) -> &str {
        &self.activity_id
    }

    /// Marks this context and all of its clones as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns whether [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns [`SandnetError::Cancelled`] if the context was cancelled.
    ///
    /// # Errors
    ///
    /// Fails only when the context has been cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(SandnetError::Cancelled);
        }
        Ok(())
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
