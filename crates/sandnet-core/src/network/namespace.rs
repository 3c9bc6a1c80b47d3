//! Network namespaces and the registry that resolves them.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use sandnet_common::error::{Result, SandnetError};
use sandnet_common::types::OperationContext;
use serde::{Deserialize, Serialize};

use super::Adapter;

/// A sandbox's networking context and its ordered adapters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkNamespace {
    /// Namespace id, lower-case.
    pub id: String,
    /// Adapters in attach order.
    pub adapters: Vec<Adapter>,
}

impl NetworkNamespace {
    /// Creates an empty namespace. The id is lower-cased.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_lowercase(),
            adapters: Vec::new(),
        }
    }

    /// Returns the adapters in attach order.
    #[must_use]
    pub fn adapters(&self) -> &[Adapter] {
        &self.adapters
    }
}

/// Resolves a namespace id to its current state.
pub trait NamespaceRegistry: Send + Sync {
    /// Looks up the namespace registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if no namespace matches or the registry is
    /// unavailable. Callers propagate it unchanged.
    fn resolve(&self, ctx: &OperationContext, id: &str) -> Result<NetworkNamespace>;
}

/// Thread-safe, in-process namespace registry.
///
/// Ids are case-insensitive.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    namespaces: RwLock<HashMap<String, NetworkNamespace>>,
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a JSON array of namespaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(content: &str) -> Result<Self> {
        let namespaces: Vec<NetworkNamespace> = serde_json::from_str(content)?;
        let registry = Self::new();
        for ns in namespaces {
            registry.add_namespace(ns);
        }
        Ok(registry)
    }

    /// Reads a JSON array of namespaces from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SandnetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Registers `ns`, replacing any namespace with the same id.
    pub fn add_namespace(&self, mut ns: NetworkNamespace) {
        ns.id = ns.id.to_lowercase();
        tracing::debug!(namespace = %ns.id, adapters = ns.adapters.len(), "namespace registered");
        let mut map = self.namespaces.write().unwrap_or_else(PoisonError::into_inner);
        let _ = map.insert(ns.id.clone(), ns);
    }

    /// Removes the namespace registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SandnetError::NamespaceNotFound`] if nothing was registered.
    pub fn remove_namespace(&self, id: &str) -> Result<NetworkNamespace> {
        let key = id.to_lowercase();
        let mut map = self.namespaces.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(&key)
            .ok_or(SandnetError::NamespaceNotFound { id: key })
    }

    /// Appends `adapter` to the namespace registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SandnetError::NamespaceNotFound`] if the namespace is unknown.
    pub fn add_adapter(&self, id: &str, adapter: Adapter) -> Result<()> {
        let key = id.to_lowercase();
        let mut map = self.namespaces.write().unwrap_or_else(PoisonError::into_inner);
        let ns = map
            .get_mut(&key)
            .ok_or_else(|| SandnetError::NamespaceNotFound { id: key.clone() })?;
        tracing::debug!(namespace = %key, adapter = %adapter.adapter_instance_id, "adapter added");
        ns.adapters.push(adapter);
        Ok(())
    }

    /// Detaches the adapter with `adapter_id` from the namespace `id`.
    ///
    /// Returns whether an adapter was removed.
    ///
    /// # Errors
    ///
    /// Returns [`SandnetError::NamespaceNotFound`] if the namespace is unknown.
    pub fn remove_adapter(&self, id: &str, adapter_id: &str) -> Result<bool> {
        let key = id.to_lowercase();
        let mut map = self.namespaces.write().unwrap_or_else(PoisonError::into_inner);
        let ns = map
            .get_mut(&key)
            .ok_or_else(|| SandnetError::NamespaceNotFound { id: key.clone() })?;
        let before = ns.adapters.len();
        ns.adapters.retain(|a| a.adapter_instance_id != adapter_id);
        Ok(ns.adapters.len() != before)
    }
}

impl NamespaceRegistry for InMemoryRegistry {
    fn resolve(&self, _ctx: &OperationContext, id: &str) -> Result<NetworkNamespace> {
        let key = id.to_lowercase();
        let map = self.namespaces.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&key)
            .cloned()
            .ok_or(SandnetError::NamespaceNotFound { id: key })
    }
}
