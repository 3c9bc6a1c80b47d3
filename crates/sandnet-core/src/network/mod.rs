//! Network identity model for sandboxes.
//!
//! A sandbox joins one [`NetworkNamespace`](namespace::NetworkNamespace)
//! holding an ordered list of [`Adapter`](adapter::Adapter)s. Each adapter
//! contributes DNS search domains and servers; [`dns`] merges them and
//! [`resolv`] renders the result as `resolv.conf` text.

pub mod adapter;
pub mod dns;
pub mod namespace;
pub mod resolv;

pub use adapter::Adapter;
pub use dns::MergedDns;
pub use namespace::{InMemoryRegistry, NamespaceRegistry, NetworkNamespace};
pub use resolv::{ResolvConfGenerator, StandardResolvConf};
