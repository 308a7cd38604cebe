//! `pea-fetch resolve` command implementation.

use pea_core::error::PeaResult;
use pea_ipfs::{IpnsFetcher, NameSpec};

use super::CommandContext;

/// Resolve each name and print `name -> /ipfs/<cid>`
///
/// Repeated names are answered from the resolution cache.
pub async fn execute(names: &[String], ctx: &CommandContext) -> PeaResult<()> {
    let fetcher = IpnsFetcher::new(ctx.fetch.clone());

    for raw in names {
        let raw = raw.strip_prefix("ipns://").unwrap_or(raw.as_str());
        let name = NameSpec::parse(raw)?.name;

        let cid = fetcher.resolve(&name, &ctx.options).await?;
        ctx.output.data(&format!("{} -> {}", name, cid.path()))?;
    }

    let stats = ctx.fetch.cache().stats();
    ctx.output.info(&format!("{} cached resolution(s)", stats.fresh_entries));
    Ok(())
}
