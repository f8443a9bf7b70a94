//! CLI for the m3ugrab playlist builder.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use m3ugrab_core::config;
use m3ugrab_core::pipeline;
use m3ugrab_core::resolver::HttpResolver;

/// Build an M3U playlist from a channel list file.
#[derive(Debug, Parser)]
#[command(name = "m3ugrab")]
#[command(about = "m3ugrab: resolve a channel list into an M3U playlist", long_about = None)]
pub struct Cli {
    /// Channel list file: one channel per line, `#` comments skipped.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Playlist output path. Omit to write the playlist to stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Per-page fetch timeout in seconds (overrides config).
    #[arg(short = 't', long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Number of resolution workers (overrides config; 1 = sequential).
    #[arg(short = 'c', long = "concurrency", value_name = "N")]
    pub concurrency: Option<usize>,

    /// Suppress the end-of-run summary.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let mut cfg = config::load_or_init()?;
        if let Some(t) = self.timeout {
            cfg.timeout_secs = t;
        }
        if let Some(c) = self.concurrency {
            cfg.workers = c;
        }
        tracing::debug!("effective config: {:?}", cfg);

        let resolver = HttpResolver::from_config(&cfg);
        let report = pipeline::run(
            &self.input,
            self.output.as_deref(),
            &resolver,
            cfg.workers,
            cfg.epg_url.as_deref(),
        )?;

        tracing::info!(
            channels = report.channels,
            entries = report.entries,
            failed = report.failed,
            "run finished"
        );
        if !self.quiet {
            // Summary goes to stderr so a stdout playlist stays clean.
            eprintln!(
                "{} channels, {} entries written, {} failed",
                report.channels, report.entries, report.failed
            );
        }
        Ok(())
    }
}
