//! Run orchestration: channel list → resolution → ordered playlist → output.
//!
//! Resolution runs on a bounded pool of OS threads (curl transfers block).
//! Results land in a write-once slot per input index, so playlist order is
//! always input order, never completion order.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use crate::channel_list::{read_channel_list, ChannelSpec};
use crate::error::{Error, Result};
use crate::playlist::{write_atomic, Playlist, StreamEntry};
use crate::resolver::ResolveChannel;

/// Outcome summary for one run. Per-channel failures are already logged by
/// the time the caller sees this; they do not fail the run.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// Channels parsed from the input file.
    pub channels: usize,
    /// Stream entries written to the playlist.
    pub entries: usize,
    /// Channels that failed resolution and were skipped.
    pub failed: usize,
}

/// Resolve every channel and assemble the playlist in input order.
/// Returns the playlist and the number of failed channels.
pub fn resolve_all<R: ResolveChannel>(
    specs: &[ChannelSpec],
    resolver: &R,
    workers: usize,
) -> (Playlist, usize) {
    let workers = workers.max(1).min(specs.len().max(1));
    let mut slots: Vec<Option<Vec<StreamEntry>>> = vec![None; specs.len()];
    let mut failed = 0usize;

    if workers == 1 {
        for spec in specs {
            match resolver.resolve(spec) {
                Ok(entries) => slots[spec.index] = Some(entries),
                Err(e) => {
                    tracing::warn!(error = %e, "channel resolution failed, skipping");
                    failed += 1;
                }
            }
        }
    } else {
        let next = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel();
        std::thread::scope(|s| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                s.spawn(move || loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(spec) = specs.get(i) else { break };
                    // Send can only fail once the receiver side has finished.
                    let _ = tx.send((i, resolver.resolve(spec)));
                });
            }
            drop(tx);
            for (i, res) in rx {
                match res {
                    Ok(entries) => {
                        debug_assert!(slots[i].is_none(), "slot {i} resolved twice");
                        slots[i] = Some(entries);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "channel resolution failed, skipping");
                        failed += 1;
                    }
                }
            }
        });
    }

    let mut playlist = Playlist::new();
    for entries in slots.into_iter().flatten() {
        for entry in entries {
            playlist.push(entry);
        }
    }
    (playlist, failed)
}

/// Full run: read the channel list, resolve, render, write.
///
/// `output = None` streams the playlist to stdout (not atomic). Fatal errors
/// are `Error::Input` (before any network work) and `Error::Output` (after
/// all resolution work, so scraped data is never silently discarded).
pub fn run<R: ResolveChannel>(
    input: &Path,
    output: Option<&Path>,
    resolver: &R,
    workers: usize,
    epg_url: Option<&str>,
) -> Result<RunReport> {
    let specs = read_channel_list(input)?;
    tracing::info!(channels = specs.len(), input = %input.display(), "channel list loaded");

    let (playlist, failed) = resolve_all(&specs, resolver, workers);
    let rendered = playlist.render(epg_url);

    match output {
        Some(path) => write_atomic(path, &rendered)?,
        None => {
            use std::io::Write;
            let mut out = std::io::stdout().lock();
            out.write_all(rendered.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|source| Error::Output {
                    path: PathBuf::from("-"),
                    source,
                })?;
        }
    }

    Ok(RunReport {
        channels: specs.len(),
        entries: playlist.len(),
        failed,
    })
}
