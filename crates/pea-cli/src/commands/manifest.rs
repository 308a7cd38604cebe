//! `pea-fetch manifest` command implementation.
//!
//! Resolves the requested name, selects a version with the effective
//! default tag, cutoff and deprecation settings, and prints the manifest.

use pea_core::error::PeaResult;

use super::{parse_spec, render_json, CommandContext};

/// Fetch and print the manifest selected for a spec
pub async fn execute(spec: &str, ctx: &CommandContext) -> PeaResult<()> {
    let spec = parse_spec(spec, ctx)?;
    let fetcher = ctx.fetch.fetcher_for(spec.protocol());

    match fetcher.manifest(&spec, &ctx.options).await? {
        Some(manifest) => {
            match manifest.content_id() {
                Some(cid) => ctx.output.success(&format!("{}@{} ({})", manifest.name, manifest.version, cid)),
                None => ctx.output.warn(&format!("{}@{} has no dist.cid", manifest.name, manifest.version)),
            }
            ctx.output.data(&render_json(&manifest)?)
        },
        None => {
            ctx.output.warn(&format!("{} carries no manifest", spec));
            Ok(())
        },
    }
}
