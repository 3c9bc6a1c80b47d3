//! The subset of the OCI runtime spec read during identity setup.
//!
//! Only `hostname` and the `windows` section are modelled. Every other key
//! is kept verbatim so a sanitized spec can be forwarded to the runtime
//! without losing fields this crate does not understand.

use std::path::Path;

use sandnet_common::error::{Result, SandnetError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// OCI runtime spec, partially typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// Container hostname. Empty means unset.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    /// Section that only applies to Windows hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<WindowsSection>,
    /// Remaining spec fields, passed through untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Windows-specific spec section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowsSection {
    /// Network settings for the container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<WindowsNetwork>,
    /// Remaining section fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Network part of the Windows section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsNetwork {
    /// Id of the network namespace the sandbox joins.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network_namespace: String,
    /// Remaining network fields.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Spec {
    /// Parses a spec from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of the expected shape.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reads and parses a spec file.
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

    /// Serializes the spec as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the network namespace id, lower-cased.
    ///
    /// Returns an empty string when the spec names no namespace.
    #[must_use]
    pub fn network_namespace_id(&self) -> String {
        self.windows
            .as_ref()
            .and_then(|w| w.network.as_ref())
            .map(|n| n.network_namespace.to_lowercase())
            .unwrap_or_default()
    }

    /// Returns a copy with the Windows section removed.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            windows: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = r#"{
        "ociVersion": "1.0.2",
        "hostname": "web-1",
        "process": {"args": ["/bin/sh"]},
        "windows": {
            "layerFolders": ["C:\\layers\\1"],
            "network": {"networkNamespace": "ABC-DEF", "allowUnqualifiedDNSQuery": true}
        }
    }"#;

    #[test]
    fn parses_known_and_unknown_fields() {
        let spec = Spec::from_json(SPEC).expect("parse");
        assert_eq!(spec.hostname, "web-1");
        assert!(spec.other.contains_key("ociVersion"));
        assert!(spec.other.contains_key("process"));
        let windows = spec.windows.as_ref().expect("windows");
        assert!(windows.other.contains_key("layerFolders"));
    }

    #[test]
    fn namespace_id_is_lowercased() {
        let spec = Spec::from_json(SPEC).expect("parse");
        assert_eq!(spec.network_namespace_id(), "abc-def");
    }

    #[test]
    fn namespace_id_empty_without_windows_section() {
        let spec = Spec::from_json(r#"{"hostname": "x"}"#).expect("parse");
        assert_eq!(spec.network_namespace_id(), "");
    }

    #[test]
    fn sanitized_drops_windows_and_keeps_rest() {
        let spec = Spec::from_json(SPEC).expect("parse");
        let clean = spec.sanitized();
        assert!(clean.windows.is_none());
        assert_eq!(clean.hostname, "web-1");
        assert_eq!(clean.other, spec.other);
        assert!(spec.windows.is_some(), "input must not be modified");

        let json = clean.to_json().expect("serialize");
        assert!(!json.contains("windows"));
        assert!(json.contains("ociVersion"));
    }

    #[test]
    fn missing_hostname_is_empty() {
        let spec = Spec::from_json("{}").expect("parse");
        assert!(spec.hostname.is_empty());
        assert!(spec.windows.is_none());
    }
}
