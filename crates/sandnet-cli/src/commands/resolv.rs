//! `sandnet resolv` — Render resolv.conf content from explicit lists.

use clap::Args;
use sandnet_common::types::OperationContext;
use sandnet_core::network::dns::{merge_values, split_list};
use sandnet_core::network::{ResolvConfGenerator, StandardResolvConf};

/// Arguments for the `resolv` command.
#[derive(Args, Debug)]
pub struct ResolvArgs {
    /// Comma-separated search domains; repeat to merge several lists.
    #[arg(long = "search")]
    pub searches: Vec<String>,

    /// Comma-separated DNS servers; repeat to merge several lists.
    #[arg(long = "server")]
    pub servers: Vec<String>,

    /// Resolver option such as `ndots:2`.
    #[arg(long = "option")]
    pub options: Vec<String>,
}

/// Executes the `resolv` command.
///
/// # Errors
///
/// Returns an error if the generator rejects the input.
pub fn execute(args: &ResolvArgs) -> anyhow::Result<()> {
    print!("{}", render(args)?);
    Ok(())
}

fn render(args: &ResolvArgs) -> anyhow::Result<String> {
    let mut searches = Vec::new();
    for raw in &args.searches {
        merge_values(&mut searches, split_list(raw));
    }
    let mut servers = Vec::new();
    for raw in &args.servers {
        merge_values(&mut servers, split_list(raw));
    }
    Ok(StandardResolvConf.generate(&OperationContext::new(), &searches, &servers, &args.options)?)
}
