//! Playlist model and M3U rendering.
//!
//! A `Playlist` is an ordered sequence of resolved `StreamEntry` values;
//! order is fixed by the channel list, never by resolution completion.

mod writer;

pub use writer::{temp_path, write_atomic, TEMP_SUFFIX};

use crate::channel_list::ChannelSpec;

/// One resolved playable item. Never mutated after creation; `channel` is the
/// input index of the `ChannelSpec` this entry was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEntry {
    pub channel: usize,
    pub name: String,
    pub url: String,
    pub group: Option<String>,
    pub logo: Option<String>,
    pub tvg_id: Option<String>,
}

impl StreamEntry {
    /// Build an entry for `spec` pointing at the resolved stream `url`.
    pub fn new(spec: &ChannelSpec, url: String) -> Self {
        Self {
            channel: spec.index,
            name: spec.display_name().to_string(),
            url,
            group: spec.group.clone(),
            logo: spec.logo.clone(),
            tvg_id: spec.tvg_id.clone(),
        }
    }
}

/// Ordered playlist, rendered once at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: Vec<StreamEntry>,
}

/// Quote-safe attribute value: strips double quotes and control characters
/// so metadata can't break the `#EXTINF` line.
fn attr(value: &str) -> String {
    value.chars().filter(|c| *c != '"' && !c.is_control()).collect()
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: StreamEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[StreamEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the playlist as extended M3U text. `epg_url`, when set, is
    /// emitted as an `x-tvg-url` attribute on the header line.
    pub fn render(&self, epg_url: Option<&str>) -> String {
        let mut out = String::new();
        match epg_url {
            Some(epg) => {
                out.push_str(&format!("#EXTM3U x-tvg-url=\"{}\"\n", attr(epg)));
            }
            None => out.push_str("#EXTM3U\n"),
        }

        for e in &self.entries {
            out.push_str("#EXTINF:-1");
            if let Some(group) = &e.group {
                out.push_str(&format!(" group-title=\"{}\"", attr(group)));
            }
            if let Some(logo) = &e.logo {
                out.push_str(&format!(" tvg-logo=\"{}\"", attr(logo)));
            }
            if let Some(id) = &e.tvg_id {
                out.push_str(&format!(" tvg-id=\"{}\"", attr(id)));
            }
            out.push_str(&format!(", {}\n", attr(&e.name)));
            out.push_str(&e.url);
            out.push('\n');
        }
        out
    }
}
