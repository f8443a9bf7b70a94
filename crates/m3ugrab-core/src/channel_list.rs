//! Channel list input: one channel per line, `#` comments and blank lines skipped.
//!
//! Line format: `page [| name [| group [| logo [| tvg-id]]]]`. The first field
//! is a page URL or a bare platform identifier; the rest is optional playlist
//! metadata carried through to the rendered `#EXTINF` line.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// One parsed input line. Immutable once read; `index` is the position among
/// the non-comment, non-blank lines and fixes the channel's playlist slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub index: usize,
    /// Page URL or bare identifier (e.g. `@somehandle`).
    pub page: String,
    pub name: Option<String>,
    pub group: Option<String>,
    pub logo: Option<String>,
    pub tvg_id: Option<String>,
}

impl ChannelSpec {
    /// Display name for the playlist entry: explicit name, else the page field.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.page)
    }

    /// URL to fetch for this channel. Full URLs pass through; bare identifiers
    /// are mapped to the channel's live page (`@handle` keeps its handle form,
    /// anything else is treated as a channel ID).
    pub fn page_url(&self) -> String {
        let p = self.page.as_str();
        if p.starts_with("http://") || p.starts_with("https://") {
            p.to_string()
        } else if p.starts_with('@') {
            format!("https://www.youtube.com/{p}/live")
        } else {
            format!("https://www.youtube.com/channel/{p}/live")
        }
    }
}

/// Parse one non-comment line. `index` is the channel's input-order slot.
fn parse_line(index: usize, line: &str) -> ChannelSpec {
    let mut fields = line.split('|').map(str::trim);
    // split always yields at least one item
    let page = fields.next().unwrap_or_default().to_string();
    let opt = |f: Option<&str>| f.filter(|s| !s.is_empty()).map(str::to_string);
    let name = opt(fields.next());
    let group = opt(fields.next());
    let logo = opt(fields.next());
    let tvg_id = opt(fields.next());
    ChannelSpec {
        index,
        page,
        name,
        group,
        logo,
        tvg_id,
    }
}

/// Parse channel list text. Blank lines and `#` comment lines are skipped;
/// every remaining line yields exactly one `ChannelSpec`, in file order.
pub fn parse_channel_list(text: &str) -> Vec<ChannelSpec> {
    let mut specs = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        specs.push(parse_line(specs.len(), line));
    }
    specs
}

/// Read and parse the channel list file. Missing or unreadable file is
/// `Error::Input`, raised before any network work happens.
pub fn read_channel_list(path: &Path) -> Result<Vec<ChannelSpec>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_channel_list(&text))
}
