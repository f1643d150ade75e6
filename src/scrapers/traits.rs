use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Listing;
use crate::scrapers::error::NavError;

/// Wait-guarded interaction surface over a live browser session.
///
/// Kept deliberately narrow so orchestration and extraction logic can be
/// exercised against an in-memory fake instead of a real browser. Every
/// element-addressed method waits for the target with a bounded timeout
/// before acting.
pub trait Navigator {
    /// Load `url` and block until the page's root element is present.
    /// Fails with [`NavError::Redirect`] if the landed host differs from the
    /// target host.
    fn open(&self, url: &str) -> Result<(), NavError>;

    /// Poll for the presence of `selector`, up to `timeout`.
    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), NavError>;

    /// Wait for `selector` to be present, then click it.
    fn click(&self, selector: &str, timeout: Duration) -> Result<(), NavError>;

    /// Wait for a select control and choose the option whose visible label
    /// matches `label` exactly.
    fn select_option(&self, selector: &str, label: &str, timeout: Duration)
        -> Result<(), NavError>;

    /// Wait for an input, clear whatever is in it, and type `text`.
    fn fill_text(&self, selector: &str, text: &str, timeout: Duration) -> Result<(), NavError>;

    /// The fully rendered page markup as of now.
    fn current_content(&self) -> Result<String, NavError>;

    /// The session's current location.
    fn current_url(&self) -> String;

    /// Load `url` without any readiness guarantee; callers confirm readiness
    /// with [`wait_for`](Navigator::wait_for) on the element they need.
    fn navigate_to(&self, url: &str) -> Result<(), NavError>;

    /// Release the session. Called exactly once per run, on every path.
    fn close(&self);
}

/// Common trait for listing scrapers, so new sources can be added behind the
/// same seam.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Run the scrape end-to-end, returning whatever was collected.
    async fn scrape(&self) -> Result<Vec<Listing>>;

    /// Name of the scraped source.
    fn source_name(&self) -> &'static str;
}
