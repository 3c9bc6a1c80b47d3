//! Rendering of `resolv.conf` content.

use std::fmt::Write;

use sandnet_common::constants::MAX_DNS_SEARCHES;
use sandnet_common::error::{Result, SandnetError};
use sandnet_common::types::OperationContext;

/// Produces resolver configuration text from merged DNS data.
pub trait ResolvConfGenerator: Send + Sync {
    /// Renders the literal contents of a `resolv.conf` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be represented or the context
    /// has been cancelled.
    fn generate(
        &self,
        ctx: &OperationContext,
        searches: &[String],
        servers: &[String],
        options: &[String],
    ) -> Result<String>;
}

/// Classic glibc-style `resolv.conf` layout.
///
/// ```text
/// search a b
/// nameserver 1.1.1.1
/// nameserver 2.2.2.2
/// options ndots:2
/// ```
///
/// Each section is omitted when its input is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardResolvConf;

impl ResolvConfGenerator for StandardResolvConf {
    fn generate(
        &self,
        ctx: &OperationContext,
        searches: &[String],
        servers: &[String],
        options: &[String],
    ) -> Result<String> {
        ctx.check()?;
        if searches.len() > MAX_DNS_SEARCHES {
            return Err(SandnetError::TooManySearchDomains {
                count: searches.len(),
                max: MAX_DNS_SEARCHES,
            });
        }

        let mut content = String::new();
        if !searches.is_empty() {
            let _ = writeln!(content, "search {}", searches.join(" "));
        }
        for server in servers {
            let _ = writeln!(content, "nameserver {server}");
        }
        if !options.is_empty() {
            let _ = writeln!(content, "options {}", options.join(" "));
        }
        Ok(content)
    }
}
