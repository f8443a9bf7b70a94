//! Channel resolution: turn a `ChannelSpec` into playable stream entries.
//!
//! The pipeline only depends on the `ResolveChannel` trait, so tests can
//! substitute deterministic resolvers; `HttpResolver` is the production
//! implementation (fetch page, extract `.m3u8`, retry on transient failures).

mod extract;
mod fetch;

pub use extract::extract_stream_url;
pub use fetch::{fetch_page, FetchOptions};

use crate::channel_list::ChannelSpec;
use crate::config::GrabConfig;
use crate::error::{Error, Result};
use crate::playlist::StreamEntry;
use crate::retry::{run_with_retry, RetryPolicy};

/// Resolves one channel to zero or more stream entries.
///
/// `Sync` bound lets the pipeline share one resolver across worker threads.
pub trait ResolveChannel: Sync {
    fn resolve(&self, spec: &ChannelSpec) -> Result<Vec<StreamEntry>>;
}

/// Production resolver: GET the channel page and extract its `.m3u8` URL.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    options: FetchOptions,
    policy: RetryPolicy,
    fallback_url: Option<String>,
}

impl HttpResolver {
    pub fn new(options: FetchOptions, policy: RetryPolicy) -> Self {
        Self {
            options,
            policy,
            fallback_url: None,
        }
    }

    pub fn from_config(cfg: &GrabConfig) -> Self {
        Self {
            options: FetchOptions {
                connect_timeout: std::time::Duration::from_secs(cfg.connect_timeout_secs),
                timeout: std::time::Duration::from_secs(cfg.timeout_secs),
                user_agent: cfg.user_agent.clone(),
            },
            policy: cfg.retry_policy(),
            fallback_url: cfg.fallback_url.clone(),
        }
    }

    /// Entry substituted when a channel fails and a fallback URL is configured.
    fn fallback_entry(&self, spec: &ChannelSpec) -> Option<StreamEntry> {
        self.fallback_url
            .as_ref()
            .map(|url| StreamEntry::new(spec, url.clone()))
    }
}

impl ResolveChannel for HttpResolver {
    fn resolve(&self, spec: &ChannelSpec) -> Result<Vec<StreamEntry>> {
        let page = spec.page_url();
        let resolution_err = |reason: String| Error::Resolution {
            page: page.clone(),
            reason,
        };

        let body = match run_with_retry(&self.policy, || fetch_page(&page, &self.options)) {
            Ok(body) => body,
            Err(e) => {
                return match self.fallback_entry(spec) {
                    Some(entry) => {
                        tracing::warn!(channel = %page, error = %e, "fetch failed, using fallback stream");
                        Ok(vec![entry])
                    }
                    None => Err(resolution_err(e.to_string())),
                };
            }
        };

        match extract_stream_url(&body, &page) {
            Some(url) => {
                tracing::debug!(channel = %page, stream = %url, "resolved channel");
                Ok(vec![StreamEntry::new(spec, url)])
            }
            None => match self.fallback_entry(spec) {
                Some(entry) => {
                    tracing::warn!(channel = %page, "no stream found, using fallback stream");
                    Ok(vec![entry])
                }
                None => Err(resolution_err("no .m3u8 URL found in page".to_string())),
            },
        }
    }
}
