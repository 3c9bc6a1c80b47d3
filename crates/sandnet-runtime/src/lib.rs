//! Sandbox identity setup for the sandnet workspace.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod identity;
pub mod instrument;
