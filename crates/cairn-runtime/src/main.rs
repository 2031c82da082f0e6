// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Preloads every resource found in an asset directory through the async
// loader and prints the resulting statistics.
// Run with: cargo run -p cairn-runtime -- <asset-dir>

use anyhow::{Context, Result};
use cairn_agents::ResourceManager;
use cairn_core::ResourceConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Asset directory to scan. Overrides the one from `--config`.
    asset_dir: Option<PathBuf>,

    /// RON file with a `ResourceConfig`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Descend into subdirectories.
    #[arg(short, long)]
    recursive: bool,

    /// Seconds to wait for each request before giving up on it.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cairn_telemetry::logging::init(&cli.log);

    let mut config = match &cli.config {
        Some(path) => ResourceConfig::load(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => ResourceConfig::default(),
    };
    if let Some(dir) = cli.asset_dir {
        config.asset_directory = dir;
    }
    let asset_dir = config.asset_directory.clone();

    let manager = ResourceManager::new(config);
    manager
        .initialize(&asset_dir)
        .context("initializing the resource manager")?;

    let files = manager.scan_directory(&asset_dir, cli.recursive)?;
    let started = Instant::now();

    let handles: Vec<_> = files
        .iter()
        .filter_map(|(path, kind)| {
            let key = path.strip_prefix(&asset_dir).unwrap_or(path);
            match key.to_str() {
                Some(key) => Some(manager.request_load_async(key, *kind)),
                None => {
                    log::warn!("Skipping non UTF-8 path '{}'", path.display());
                    None
                }
            }
        })
        .collect();

    let timeout = Duration::from_secs(cli.timeout);
    let mut failures = 0;
    for handle in &handles {
        match handle.wait_timeout(timeout) {
            Some(Ok(resource)) if resource.is_loaded() || resource.is_placeholder() => {}
            Some(Ok(_)) => failures += 1,
            Some(Err(e)) if e.is_content_error() => {
                log::warn!("{}", e);
                failures += 1;
            }
            Some(Err(e)) => {
                log::error!("{}", e);
                failures += 1;
            }
            None => {
                log::warn!("'{}' did not finish within {:?}", handle.path(), timeout);
                failures += 1;
            }
        }
    }

    log::info!(
        "Processed {} request(s) in {:.2?} ({} failed)",
        handles.len(),
        started.elapsed(),
        failures
    );
    manager.print_stats();
    manager.shutdown();
    Ok(())
}
