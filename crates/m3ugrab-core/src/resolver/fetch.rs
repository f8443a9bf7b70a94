//! Channel page fetch over HTTP(S).
//!
//! Uses the curl crate (libcurl) to GET the page body. Runs in the current
//! thread; the pipeline dispatches fetches onto its worker threads.

use std::time::Duration;

use crate::retry::FetchError;

/// Transfer options for a page fetch, derived from `GrabConfig`.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(15),
            user_agent: crate::config::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// GET `url` and return the response body as text. Follows redirects.
/// Non-2xx statuses and transport failures come back as `FetchError` so the
/// retry layer can classify them.
pub fn fetch_page(url: &str, opts: &FetchOptions) -> Result<String, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.useragent(&opts.user_agent)?;
    easy.accept_encoding("")?; // let libcurl negotiate and decode

    let mut list = curl::easy::List::new();
    list.append("Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    // Channel pages are HTML; tolerate stray bytes rather than failing.
    Ok(String::from_utf8_lossy(&body).into_owned())
}
