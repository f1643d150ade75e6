use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by a [`Navigator`](crate::scrapers::Navigator).
///
/// Callers decide per call site whether a failure aborts the run or only
/// degrades it; nothing here is fatal by itself.
#[derive(Debug, Error)]
pub enum NavError {
    /// The browser session could not be started at all.
    #[error("browser session could not start: {0}")]
    Init(#[source] anyhow::Error),

    /// The page we landed on is not on the expected host.
    #[error("redirected to unexpected URL: {url}")]
    Redirect { url: String },

    /// A bounded wait for an element expired.
    #[error("timed out after {timeout:?} waiting for `{selector}`")]
    Timeout { selector: String, timeout: Duration },

    /// The element was present but the interaction with it failed, e.g. a
    /// click obstructed by an overlay or a select without the wanted label.
    #[error("interaction with `{selector}` failed: {reason}")]
    Interaction { selector: String, reason: String },

    /// Anything else the browser reported.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
