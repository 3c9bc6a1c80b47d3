//! # sandnet-core
//!
//! Building blocks for materializing a sandbox's network identity:
//! - **Paths**: the single source of truth for where sandbox artifacts live.
//! - **Spec**: the subset of the OCI runtime spec this workspace reads and sanitizes.
//! - **Network**: namespaces, adapters, DNS list merging, and `resolv.conf` rendering.
//! - **Filesystem**: create/write/copy primitives with fixed permissions.
//! - **System info**: hostname and hosts-file source, injectable for tests.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod filesystem;
pub mod network;
pub mod paths;
pub mod spec;
pub mod sysinfo;
