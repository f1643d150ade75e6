use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::scrapers::error::NavError;
use crate::scrapers::traits::Navigator;

/// Static user-agent sent with every request. The only anti-bot measure in
/// place; the site otherwise sees a plain headless Chrome.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Cap on waiting for the page's root element after `open`.
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// [`Navigator`] backed by a headless Chrome session.
pub struct ChromeNavigator {
    // Holds the Chrome process alive for the lifetime of the session.
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeNavigator {
    /// Launch a headless Chrome and open a fresh tab.
    pub fn launch() -> Result<Self, NavError> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(vec![OsStr::new("--disable-dev-shm-usage")])
            .build()
            .map_err(|e| NavError::Init(anyhow::anyhow!("failed to build launch options: {e}")))?;

        let browser = Browser::new(options).map_err(NavError::Init)?;
        let tab = browser.new_tab().map_err(NavError::Init)?;
        tab.set_user_agent(USER_AGENT, None, None)
            .map_err(NavError::Init)?;

        info!("Browser session initialized");
        Ok(Self { browser, tab })
    }
}

impl Navigator for ChromeNavigator {
    fn open(&self, url: &str) -> Result<(), NavError> {
        info!("Navigating to {url}");
        self.tab.navigate_to(url)?;
        self.tab.wait_until_navigated()?;
        self.wait_for("body", PAGE_LOAD_TIMEOUT)?;

        // Anti-bot systems sometimes bounce headless sessions to another
        // host; treat that as a failed open rather than scraping the wrong
        // site.
        let landed = self.tab.get_url();
        if !same_host(url, &landed) {
            return Err(NavError::Redirect { url: landed });
        }
        Ok(())
    }

    fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), NavError> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_| NavError::Timeout {
                selector: selector.to_string(),
                timeout,
            })?;
        Ok(())
    }

    fn click(&self, selector: &str, timeout: Duration) -> Result<(), NavError> {
        let element = self
            .tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_| NavError::Timeout {
                selector: selector.to_string(),
                timeout,
            })?;

        element.click().map_err(|e| NavError::Interaction {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        debug!("Clicked {selector}");
        Ok(())
    }

    fn select_option(
        &self,
        selector: &str,
        label: &str,
        timeout: Duration,
    ) -> Result<(), NavError> {
        let element = self
            .tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_| NavError::Timeout {
                selector: selector.to_string(),
                timeout,
            })?;

        let found = element
            .call_js_fn(
                r#"function (label) {
                    const option = Array.from(this.options)
                        .find(o => o.text.trim() === label);
                    if (!option) return false;
                    this.value = option.value;
                    this.dispatchEvent(new Event('change', { bubbles: true }));
                    return true;
                }"#,
                vec![json!(label)],
                false,
            )
            .map_err(|e| NavError::Interaction {
                selector: selector.to_string(),
                reason: e.to_string(),
            })?;

        match found.value {
            Some(serde_json::Value::Bool(true)) => Ok(()),
            _ => Err(NavError::Interaction {
                selector: selector.to_string(),
                reason: format!("no option labelled \"{label}\""),
            }),
        }
    }

    fn fill_text(&self, selector: &str, text: &str, timeout: Duration) -> Result<(), NavError> {
        let element = self
            .tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .map_err(|_| NavError::Timeout {
                selector: selector.to_string(),
                timeout,
            })?;

        element
            .call_js_fn("function () { this.value = ''; }", vec![], false)
            .and_then(|_| element.click().map(|_| ()))
            .and_then(|_| element.type_into(text).map(|_| ()))
            .map_err(|e| NavError::Interaction {
                selector: selector.to_string(),
                reason: e.to_string(),
            })
    }

    fn current_content(&self) -> Result<String, NavError> {
        Ok(self.tab.get_content()?)
    }

    fn current_url(&self) -> String {
        self.tab.get_url()
    }

    fn navigate_to(&self, url: &str) -> Result<(), NavError> {
        self.tab.navigate_to(url)?;
        self.tab.wait_until_navigated()?;
        Ok(())
    }

    fn close(&self) {
        if let Err(e) = self.tab.close(true) {
            warn!("Failed to close browser tab: {e}");
        }
        debug!("Browser session released");
    }
}

/// True when `actual` is on the same host as `expected`, or a subdomain of
/// it. Guards the open against redirect-based diversion.
fn same_host(expected: &str, actual: &str) -> bool {
    let host = |raw: &str| {
        Url::parse(raw)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
    };
    match (host(expected), host(actual)) {
        (Some(expected), Some(actual)) => {
            actual == expected || actual.ends_with(&format!(".{expected}"))
        }
        _ => false,
    }
}
