//! `pea-fetch tarball` command implementation.

use std::path::PathBuf;
use std::time::Instant;

use futures::StreamExt;
use pea_core::error::{PeaError, PeaResult};
use pea_ipfs::ByteStream;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use super::{parse_spec, CommandContext};

/// Download a tarball to `output`, or to stdout
pub async fn execute(spec: &str, output: Option<PathBuf>, ctx: &CommandContext) -> PeaResult<()> {
    let start_time = Instant::now();
    let spec = parse_spec(spec, ctx)?;
    let fetcher = ctx.fetch.fetcher_for(spec.protocol());
    let mut stream = fetcher.tarball(&spec, &ctx.options);

    let written = match output {
        Some(path) => {
            let path = ctx.cwd.as_std_path().join(path);
            let file = tokio::fs::File::create(&path)
                .await
                .map_err(|e| PeaError::io(format!("Failed to create {}", path.display()), e))?;

            let mut writer = BufWriter::new(file);
            match copy(&mut stream, &mut writer).await {
                Ok(written) => written,
                Err(e) => {
                    // Leave no truncated tarball behind
                    drop(writer);
                    let _ = tokio::fs::remove_file(&path).await;
                    return Err(e);
                },
            }
        },
        None => copy(&mut stream, &mut tokio::io::stdout()).await?,
    };

    ctx.output.success(&format!(
        "Fetched {} ({} bytes) in {:.2}s",
        spec,
        written,
        start_time.elapsed().as_secs_f64()
    ));
    Ok(())
}

/// Drain `stream` into `writer`, returning the byte count
pub async fn copy<W>(stream: &mut ByteStream, writer: &mut W) -> PeaResult<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| PeaError::io("Failed to write tarball".to_string(), e))?;
        written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| PeaError::io("Failed to write tarball".to_string(), e))?;
    Ok(written)
}
