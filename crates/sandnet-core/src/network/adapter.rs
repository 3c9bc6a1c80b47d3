//! Virtual network adapters attached to a namespace.

use serde::{Deserialize, Serialize};

use super::dns;

/// One virtual adapter and its DNS configuration fragment.
///
/// DNS data arrives from the network subsystem as comma-separated strings.
/// [`search_domains`](Self::search_domains) and
/// [`dns_servers`](Self::dns_servers) are the only places those strings are
/// split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Adapter {
    /// Identifier assigned by the host for this adapter.
    pub adapter_instance_id: String,
    /// Comma-separated DNS search suffixes.
    #[serde(rename = "DNSSuffix")]
    pub dns_suffix: String,
    /// Comma-separated DNS server addresses.
    #[serde(rename = "DNSServerList")]
    pub dns_server_list: String,
    /// MAC address of the adapter.
    pub mac_address: String,
    /// IP address allocated to the guest side.
    #[serde(rename = "AllocatedIPAddress")]
    pub allocated_ip_address: String,
}

impl Adapter {
    /// Creates an adapter with the given id and raw DNS lists.
    #[must_use]
    pub fn new(
        adapter_instance_id: impl Into<String>,
        dns_suffix: impl Into<String>,
        dns_server_list: impl Into<String>,
    ) -> Self {
        Self {
            adapter_instance_id: adapter_instance_id.into(),
            dns_suffix: dns_suffix.into(),
            dns_server_list: dns_server_list.into(),
            ..Self::default()
        }
    }

    /// Returns the search domains in declared order.
    #[must_use]
    pub fn search_domains(&self) -> Vec<String> {
        dns::split_list(&self.dns_suffix)
    }

    /// Returns the DNS servers in declared order.
    #[must_use]
    pub fn dns_servers(&self) -> Vec<String> {
        dns::split_list(&self.dns_server_list)
    }
}
