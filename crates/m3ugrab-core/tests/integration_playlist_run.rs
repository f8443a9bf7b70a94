//! End-to-end pipeline tests: channel list file in, playlist file out.
//! Uses a deterministic resolver; no network.

use std::fs;
use std::path::Path;

use m3ugrab_core::channel_list::ChannelSpec;
use m3ugrab_core::error::{Error, Result};
use m3ugrab_core::pipeline;
use m3ugrab_core::playlist::StreamEntry;
use m3ugrab_core::resolver::ResolveChannel;

/// Maps each channel page to a fixed CDN URL; fails pages listed in `down`.
struct FixtureResolver {
    down: Vec<String>,
}

impl FixtureResolver {
    fn all_up() -> Self {
        Self { down: Vec::new() }
    }
}

impl ResolveChannel for FixtureResolver {
    fn resolve(&self, spec: &ChannelSpec) -> Result<Vec<StreamEntry>> {
        if self.down.contains(&spec.page) {
            return Err(Error::Resolution {
                page: spec.page.clone(),
                reason: "offline".to_string(),
            });
        }
        Ok(vec![StreamEntry::new(
            spec,
            format!("https://cdn.example.com/{}/index.m3u8", spec.page),
        )])
    }
}

const CHANNEL_LIST: &str = "\
# personal channel list
alpha | Alpha TV | News
beta | Beta TV

gamma
";

#[test]
fn list_file_to_playlist_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("channels.txt");
    let output = dir.path().join("out.m3u");
    fs::write(&input, CHANNEL_LIST).unwrap();

    let report = pipeline::run(&input, Some(&output), &FixtureResolver::all_up(), 2, None).unwrap();
    assert_eq!(report.channels, 3);
    assert_eq!(report.entries, 3);
    assert_eq!(report.failed, 0);

    let playlist = fs::read_to_string(&output).unwrap();
    assert!(playlist.starts_with("#EXTM3U\n"));
    let alpha = playlist.find("alpha/index.m3u8").unwrap();
    let beta = playlist.find("beta/index.m3u8").unwrap();
    let gamma = playlist.find("gamma/index.m3u8").unwrap();
    assert!(alpha < beta && beta < gamma);
    assert!(playlist.contains("#EXTINF:-1 group-title=\"News\", Alpha TV"));
}

#[test]
fn rerun_with_same_input_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("channels.txt");
    let output = dir.path().join("out.m3u");
    fs::write(&input, CHANNEL_LIST).unwrap();

    pipeline::run(&input, Some(&output), &FixtureResolver::all_up(), 3, None).unwrap();
    let first = fs::read(&output).unwrap();
    pipeline::run(&input, Some(&output), &FixtureResolver::all_up(), 3, None).unwrap();
    let second = fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn failed_channel_still_writes_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("channels.txt");
    let output = dir.path().join("out.m3u");
    fs::write(&input, CHANNEL_LIST).unwrap();

    let resolver = FixtureResolver {
        down: vec!["beta".to_string()],
    };
    let report = pipeline::run(&input, Some(&output), &resolver, 2, None).unwrap();
    assert_eq!(report.channels, 3);
    assert_eq!(report.entries, 2);
    assert_eq!(report.failed, 1);

    let playlist = fs::read_to_string(&output).unwrap();
    assert!(playlist.contains("alpha/index.m3u8"));
    assert!(!playlist.contains("beta/index.m3u8"));
    assert!(playlist.contains("gamma/index.m3u8"));
}

#[test]
fn entries_never_exceed_input_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("channels.txt");
    let output = dir.path().join("out.m3u");
    fs::write(&input, CHANNEL_LIST).unwrap();

    let report = pipeline::run(&input, Some(&output), &FixtureResolver::all_up(), 4, None).unwrap();
    // 3 non-comment, non-blank lines in the fixture list.
    assert!(report.entries <= 3);
    assert_eq!(report.channels, 3);
}

#[test]
fn missing_input_is_fatal_input_error() {
    let err = pipeline::run(
        Path::new("/no/such/channels.txt"),
        None,
        &FixtureResolver::all_up(),
        1,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Input { .. }));
}

#[test]
fn unwritable_output_keeps_previous_playlist() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("channels.txt");
    let output = dir.path().join("out.m3u");
    fs::write(&input, CHANNEL_LIST).unwrap();
    fs::write(&output, "previous playlist\n").unwrap();

    // Occupy the temp slot so the atomic write cannot start.
    fs::create_dir(format!("{}.part", output.display())).unwrap();
    let err =
        pipeline::run(&input, Some(&output), &FixtureResolver::all_up(), 2, None).unwrap_err();

    assert!(matches!(err, Error::Output { .. }));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous playlist\n");
}

#[test]
fn epg_url_lands_on_header_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("channels.txt");
    let output = dir.path().join("out.m3u");
    fs::write(&input, "alpha\n").unwrap();

    pipeline::run(
        &input,
        Some(&output),
        &FixtureResolver::all_up(),
        1,
        Some("https://example.com/epg.xml"),
    )
    .unwrap();
    let playlist = fs::read_to_string(&output).unwrap();
    assert!(playlist.starts_with("#EXTM3U x-tvg-url=\"https://example.com/epg.xml\"\n"));
}
