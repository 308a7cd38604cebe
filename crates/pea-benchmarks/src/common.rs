//! Common utilities for benchmarks

use criterion::Criterion;
use pea_core::types::Packument;
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Packument JSON with `count` versions spread over majors, minors and patches,
/// every tenth one deprecated and every seventh one a prerelease
pub fn synthetic_packument_json(count: usize) -> String {
    let mut versions = serde_json::Map::new();
    let mut time = serde_json::Map::new();
    let mut latest = String::new();

    for i in 0..count {
        let mut version = format!("{}.{}.{}", i / 100, (i / 10) % 10, i % 10);
        if i % 7 == 6 {
            version.push_str("-beta.1");
        } else {
            latest = version.clone();
        }

        let mut manifest = serde_json::json!({
            "name": "bench-module",
            "version": version,
            "dist": { "cid": "bafybeifprvl6iqk3oj6a5yw74v5ggmdc7orhyibcz437kdont5tuj7pjfa" }
        });
        if i % 10 == 9 {
            manifest["deprecated"] = serde_json::json!("use a newer release");
        }

        time.insert(version.clone(), serde_json::json!(format!("2020-01-01T00:{:02}:{:02}Z", (i / 60) % 60, i % 60)));
        versions.insert(version, manifest);
    }

    serde_json::json!({
        "name": "bench-module",
        "dist-tags": { "latest": latest },
        "versions": versions,
        "time": time
    })
    .to_string()
}

/// Parsed form of [`synthetic_packument_json`]
pub fn synthetic_packument(count: usize) -> Packument {
    serde_json::from_str(&synthetic_packument_json(count)).unwrap_or_default()
}
