//! `vodfetch get` – download a single named item.

use anyhow::{Context, Result};
use std::path::PathBuf;
use vodfetch_core::config::VodfetchConfig;
use vodfetch_core::http::HttpClient;
use vodfetch_core::job::JobRunner;
use vodfetch_core::locate::SearchPageDiscovery;

pub fn run_get(
    cfg: &VodfetchConfig,
    name: &str,
    output_dir: Option<PathBuf>,
    keep_workdir: bool,
) -> Result<()> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let http = HttpClient::new(&cfg.user_agent);
    let discovery = SearchPageDiscovery::new(http.clone(), cfg.search_url.clone());
    let runner = JobRunner {
        http: &http,
        config: cfg,
        discovery: &discovery,
        output_dir: &output_dir,
        keep_workdir,
    };

    runner
        .run_job(name)
        .with_context(|| format!("download {}", name))?;
    println!("{} downloaded.", name);
    Ok(())
}
