//! Retry and backoff policy for page fetches.
//!
//! Encapsulates error classification (timeouts, throttling, connection
//! failures) and exponential backoff decisions so the resolver applies a
//! consistent policy across channels.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
