//! `.m3u8` stream URL extraction from a fetched page body.
//!
//! Layered strategy, most precise first:
//!   1. absolute `https?://….m3u8` match,
//!   2. bare `.m3u8` occurrence with a backwards window scan for the URL,
//!   3. relative `href=`/`src=` attributes joined against the page URL,
//!   4. any absolute URL containing `.m3u8`, truncated after the extension.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

fn m3u8_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)https?://[^\s"'<>#]+?\.m3u8"#).expect("static regex"))
}

fn rel_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:href|src)=["']([^"']+\.m3u8)["']"#).expect("static regex")
    })
}

fn any_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)https?://[^\s"'<>#]+"#).expect("static regex"))
}

/// Back `pos` up to the nearest char boundary so window slicing can't panic.
fn floor_char_boundary(s: &str, mut pos: usize) -> usize {
    while pos > 0 && !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Strategy 2: find a bare `.m3u8` and scan a window before it for the
/// enclosing absolute URL.
fn window_scan(body: &str) -> Option<String> {
    let lower = body.to_ascii_lowercase();
    let idx = lower.find(".m3u8")?;
    let start = floor_char_boundary(body, idx.saturating_sub(400));
    let window = &body[start..idx + 5];
    let http_idx = window.to_ascii_lowercase().rfind("http")?;
    let candidate = window[http_idx..]
        .split_whitespace()
        .next()?
        .trim_matches(|c| matches!(c, '\'' | '"' | '<' | '>' | ')' | ',' | ';'));
    if candidate.to_ascii_lowercase().ends_with(".m3u8") {
        return Some(candidate.to_string());
    }
    None
}

/// Strategy 3: relative link in an href/src attribute, resolved against the page.
fn relative_attr(body: &str, page_url: &str) -> Option<String> {
    let caps = rel_attr_re().captures(body)?;
    let rel = caps.get(1)?.as_str();
    let base = Url::parse(page_url).ok()?;
    Some(base.join(rel).ok()?.to_string())
}

/// Strategy 4: any absolute URL containing `.m3u8`, cut after the extension.
fn any_url_containing(body: &str) -> Option<String> {
    for m in any_url_re().find_iter(body) {
        let u = m.as_str();
        if let Some(pos) = u.to_ascii_lowercase().find(".m3u8") {
            return Some(u[..pos + 5].to_string());
        }
    }
    None
}

/// Extract the first stream URL from `body`. Returns None when the page has
/// no `.m3u8` reference at all (e.g. a channel that is not live).
pub fn extract_stream_url(body: &str, page_url: &str) -> Option<String> {
    if let Some(m) = m3u8_url_re().find(body) {
        return Some(m.as_str().to_string());
    }
    if let Some(u) = window_scan(body) {
        return Some(u);
    }
    if let Some(u) = relative_attr(body, page_url) {
        return Some(u);
    }
    any_url_containing(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://example.com/watch";

    #[test]
    fn direct_absolute_url() {
        let body = r#"<script>var s = "https://cdn.example.com/hls/live.m3u8";</script>"#;
        assert_eq!(
            extract_stream_url(body, PAGE).as_deref(),
            Some("https://cdn.example.com/hls/live.m3u8")
        );
    }

    #[test]
    fn first_match_wins() {
        let body = "https://a.example/one.m3u8 then https://b.example/two.m3u8";
        assert_eq!(
            extract_stream_url(body, PAGE).as_deref(),
            Some("https://a.example/one.m3u8")
        );
    }

    #[test]
    fn window_scan_recovers_url_the_direct_regex_rejects() {
        // '#' is excluded from the direct match, so only the window scan finds this.
        let body = "src=https://cdn.example.com/fragment#chunk.m3u8 more";
        assert_eq!(
            extract_stream_url(body, PAGE).as_deref(),
            Some("https://cdn.example.com/fragment#chunk.m3u8")
        );
    }

    #[test]
    fn relative_href_joined_against_page() {
        let body = r#"<source src="/hls/stream.m3u8" type="application/x-mpegURL">"#;
        assert_eq!(
            extract_stream_url(body, PAGE).as_deref(),
            Some("https://example.com/hls/stream.m3u8")
        );
    }

    #[test]
    fn url_with_query_after_extension_is_truncated() {
        let body = "play: https://cdn.example.com/live.m3u8?token=abc123 end";
        assert_eq!(
            extract_stream_url(body, PAGE).as_deref(),
            Some("https://cdn.example.com/live.m3u8")
        );
    }

    #[test]
    fn no_m3u8_reference_is_none() {
        let body = "<html><body>channel is offline</body></html>";
        assert!(extract_stream_url(body, PAGE).is_none());
    }

    #[test]
    fn case_insensitive_extension() {
        let body = "HTTPS://CDN.EXAMPLE.COM/LIVE.M3U8";
        assert_eq!(
            extract_stream_url(body, PAGE).as_deref(),
            Some("HTTPS://CDN.EXAMPLE.COM/LIVE.M3U8")
        );
    }
}
