//! `pea-fetch packument` command implementation.

use pea_core::error::PeaResult;

use super::{parse_spec, render_json, CommandContext};

/// Fetch and print the packument behind a spec
pub async fn execute(spec: &str, ctx: &CommandContext) -> PeaResult<()> {
    let spec = parse_spec(spec, ctx)?;
    let fetcher = ctx.fetch.fetcher_for(spec.protocol());

    let packument = fetcher.packument(&spec, &ctx.options).await?;

    ctx.output.success(&format!(
        "{}: {} version(s), dist-tags {:?}",
        packument.name,
        packument.versions.len(),
        packument.dist_tags
    ));
    ctx.output.data(&render_json(&packument)?)
}
