//! `vodfetch run` – process the names file sequentially.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use vodfetch_core::config::VodfetchConfig;
use vodfetch_core::http::HttpClient;
use vodfetch_core::job::{JobRunner, JobStatus};
use vodfetch_core::locate::SearchPageDiscovery;

pub fn run_batch(cfg: &VodfetchConfig, list: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let data = fs::read_to_string(list)
        .with_context(|| format!("read names file {}", list.display()))?;
    let names: Vec<String> = data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    if names.is_empty() {
        println!("No names in {}.", list.display());
        return Ok(());
    }
    tracing::debug!("names: {:?}", names);

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
        keep_workdir: false,
    };

    let outcomes = runner.run_all(&names);

    let mut failed = 0usize;
    for outcome in &outcomes {
        match outcome.status {
            JobStatus::Succeeded => println!("{}: succeeded", outcome.name),
            JobStatus::Failed => {
                failed += 1;
                let reason = outcome
                    .error
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown error".to_string());
                println!("{}: failed ({})", outcome.name, reason);
            }
        }
    }
    let skipped = names.len() - outcomes.len();
    if skipped > 0 {
        println!("{} job(s) skipped after storage failure.", skipped);
    }

    if failed + skipped > 0 {
        anyhow::bail!("{} of {} job(s) did not complete", failed + skipped, names.len());
    }
    Ok(())
}
