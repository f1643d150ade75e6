use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::models::Listing;
use crate::scrapers::browser::ChromeNavigator;
use crate::scrapers::error::NavError;
use crate::scrapers::extract;
use crate::scrapers::traits::{Navigator, Scraper};

/// Search-form controls on the landing page.
const FOR_RENT_TAB: &str = "#for-rent-tab";
const LOCATION_INPUT: &str = "#search-location";
const SUBMIT_BUTTON: &str = "button[type='submit']";

/// Container that signals a results page has rendered.
const RESULTS_CONTAINER: &str = ".property-list";

const INTERACT_TIMEOUT: Duration = Duration::from_secs(10);
const RESULTS_TIMEOUT: Duration = Duration::from_secs(30);
const NEXT_PAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Scraper for nigeriapropertycentre.com rental listings.
///
/// Generic over [`Navigator`] so the filter and pagination flow can be tested
/// against an in-memory fake.
pub struct PropertyCentreScraper<N: Navigator> {
    nav: N,
    config: Config,
}

impl PropertyCentreScraper<ChromeNavigator> {
    /// Launch a headless Chrome session for this config.
    pub fn launch(config: Config) -> Result<Self, NavError> {
        Ok(Self {
            nav: ChromeNavigator::launch()?,
            config,
        })
    }
}

impl<N: Navigator> PropertyCentreScraper<N> {
    pub fn with_navigator(nav: N, config: Config) -> Self {
        Self { nav, config }
    }

    /// Run the whole flow, returning whatever was collected. Any failure past
    /// initialization is logged and converted into a partial (possibly
    /// empty) result; the browser session is released on every path.
    fn run(&self) -> Vec<Listing> {
        let mut collected = Vec::new();

        if let Err(err) = self.drive(&mut collected) {
            error!("Scrape aborted at {}: {err}", self.nav.current_url());
            match self.nav.current_content() {
                Ok(markup) => debug!("Page source at failure: {markup}"),
                Err(err) => debug!("Page source unavailable: {err}"),
            }
        }

        self.nav.close();
        collected
    }

    fn drive(&self, collected: &mut Vec<Listing>) -> Result<(), NavError> {
        self.nav.open(&self.config.base_url)?;
        self.apply_filters()?;

        self.nav.wait_for(RESULTS_CONTAINER, RESULTS_TIMEOUT)?;
        info!("Search results loaded");

        self.paginate(collected)
    }

    /// Fill in the search form. The For Rent tab and the final submit are
    /// load-bearing; each select filter is best-effort, a failed one
    /// degrades result relevance but does not stop the run.
    fn apply_filters(&self) -> Result<(), NavError> {
        let criteria = &self.config.criteria;

        self.nav.click(FOR_RENT_TAB, INTERACT_TIMEOUT)?;

        self.nav
            .fill_text(LOCATION_INPUT, &criteria.location, INTERACT_TIMEOUT)?;
        info!("Entered location: {}", criteria.location);

        for (selector, label) in criteria.select_fields() {
            match self.nav.select_option(selector, label, INTERACT_TIMEOUT) {
                Ok(()) => info!("Selected {label} for {selector}"),
                Err(err) => error!("Failed to select {label} for {selector}: {err}"),
            }
        }

        self.nav.click(SUBMIT_BUTTON, INTERACT_TIMEOUT)
    }

    /// Walk result pages until one yields no listings, the next link
    /// disappears, or the page ceiling is reached.
    fn paginate(&self, collected: &mut Vec<Listing>) -> Result<(), NavError> {
        let mut page = 1u32;

        while page <= self.config.max_pages {
            info!("Scraping page {page}");
            let markup = self.nav.current_content()?;

            let listings = extract::extract_listings(&markup);
            if listings.is_empty() {
                warn!("No listings found on page {page}. Ending search.");
                break;
            }
            info!("Scraped {} listings from page {page}", listings.len());

            match extract::find_next_page_link(&markup) {
                Some(next_url) if page < self.config.max_pages => {
                    collected.extend(listings);
                    info!("Navigating to next page: {next_url}");
                    self.nav.navigate_to(&next_url)?;
                    self.nav.wait_for(RESULTS_CONTAINER, NEXT_PAGE_TIMEOUT)?;
                    page += 1;
                }
                _ => {
                    collected.extend(listings);
                    info!("No more pages to scrape");
                    break;
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl<N: Navigator + Send + Sync> Scraper for PropertyCentreScraper<N> {
    async fn scrape(&self) -> Result<Vec<Listing>> {
        info!("Starting scrape of {}", self.config.base_url);
        Ok(self.run())
    }

    fn source_name(&self) -> &'static str {
        "NigeriaPropertyCentre"
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, HashSet};

    use super::*;

    /// In-memory navigator serving canned pages keyed by URL.
    struct FakeNavigator {
        pages: HashMap<String, String>,
        current: RefCell<String>,
        clicks: RefCell<Vec<String>>,
        selects: RefCell<Vec<(String, String)>>,
        failing_selects: HashSet<String>,
        failing_clicks: HashSet<String>,
        closed: Cell<u32>,
    }

    impl FakeNavigator {
        fn new(pages: &[(&str, String)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, html)| (url.to_string(), html.clone()))
                    .collect(),
                current: RefCell::new(String::new()),
                clicks: RefCell::new(Vec::new()),
                selects: RefCell::new(Vec::new()),
                failing_selects: HashSet::new(),
                failing_clicks: HashSet::new(),
                closed: Cell::new(0),
            }
        }
    }

    impl Navigator for FakeNavigator {
        fn open(&self, url: &str) -> Result<(), NavError> {
            *self.current.borrow_mut() = url.to_string();
            Ok(())
        }

        fn wait_for(&self, _selector: &str, _timeout: Duration) -> Result<(), NavError> {
            Ok(())
        }

        fn click(&self, selector: &str, timeout: Duration) -> Result<(), NavError> {
            if self.failing_clicks.contains(selector) {
                return Err(NavError::Timeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            self.clicks.borrow_mut().push(selector.to_string());
            Ok(())
        }

        fn select_option(
            &self,
            selector: &str,
            label: &str,
            _timeout: Duration,
        ) -> Result<(), NavError> {
            if self.failing_selects.contains(selector) {
                return Err(NavError::Interaction {
                    selector: selector.to_string(),
                    reason: format!("no option labelled \"{label}\""),
                });
            }
            self.selects
                .borrow_mut()
                .push((selector.to_string(), label.to_string()));
            Ok(())
        }

        fn fill_text(&self, _selector: &str, _text: &str, _timeout: Duration)
            -> Result<(), NavError> {
            Ok(())
        }

        fn current_content(&self) -> Result<String, NavError> {
            let url = self.current.borrow().clone();
            self.pages
                .get(&url)
                .cloned()
                .ok_or_else(|| NavError::Other(anyhow::anyhow!("no page at {url}")))
        }

        fn current_url(&self) -> String {
            self.current.borrow().clone()
        }

        fn navigate_to(&self, url: &str) -> Result<(), NavError> {
            *self.current.borrow_mut() = url.to_string();
            Ok(())
        }

        fn close(&self) {
            self.closed.set(self.closed.get() + 1);
        }
    }

    fn listing(title: &str) -> String {
        format!(
            "<div class=\"property-list-item\">\
               <h4 class=\"property-title\">{title}</h4>\
               <span class=\"price\">₦ 5,000,000</span>\
               <address>Lekki, Lagos</address>\
             </div>"
        )
    }

    fn page(listings: &[String], next: Option<&str>) -> String {
        let next_link = next
            .map(|href| format!("<a class=\"next\" href=\"{href}\">Next</a>"))
            .unwrap_or_default();
        format!(
            "<html><body><div class=\"property-list\">{}</div>{next_link}</body></html>",
            listings.concat()
        )
    }

    fn config(max_pages: u32) -> Config {
        Config {
            base_url: "https://npc.test/".to_string(),
            max_pages,
            ..Config::default()
        }
    }

    #[test]
    fn two_page_run_collects_all_listings() {
        let nav = FakeNavigator::new(&[
            (
                "https://npc.test/",
                page(
                    &[listing("Flat 1"), listing("Flat 2"), listing("Flat 3")],
                    Some("https://npc.test/page2"),
                ),
            ),
            ("https://npc.test/page2", page(&[listing("Flat 4")], None)),
        ]);

        let scraper = PropertyCentreScraper::with_navigator(nav, config(10));
        let listings = scraper.run();

        assert_eq!(listings.len(), 4);
        assert_eq!(
            listings.iter().map(|l| l.title.as_str()).collect::<Vec<_>>(),
            ["Flat 1", "Flat 2", "Flat 3", "Flat 4"]
        );
        assert_eq!(scraper.nav.closed.get(), 1);
    }

    #[test]
    fn page_ceiling_bounds_a_cyclic_next_chain() {
        // The next link points back at the same page.
        let nav = FakeNavigator::new(&[(
            "https://npc.test/",
            page(&[listing("Flat")], Some("https://npc.test/")),
        )]);

        let scraper = PropertyCentreScraper::with_navigator(nav, config(3));
        let listings = scraper.run();

        assert_eq!(listings.len(), 3);
    }

    #[test]
    fn stops_at_first_page_without_listings() {
        let nav = FakeNavigator::new(&[
            (
                "https://npc.test/",
                page(
                    &[listing("Flat 1"), listing("Flat 2")],
                    Some("https://npc.test/page2"),
                ),
            ),
            (
                "https://npc.test/page2",
                page(&[], Some("https://npc.test/page3")),
            ),
            ("https://npc.test/page3", page(&[listing("Unreached")], None)),
        ]);

        let scraper = PropertyCentreScraper::with_navigator(nav, config(10));
        let listings = scraper.run();

        assert_eq!(listings.len(), 2);
    }

    #[test]
    fn failed_filter_does_not_block_remaining_filters_or_submit() {
        let mut nav = FakeNavigator::new(&[(
            "https://npc.test/",
            page(&[listing("Flat 1")], None),
        )]);
        nav.failing_selects.insert("#search-bedrooms".to_string());

        let scraper = PropertyCentreScraper::with_navigator(nav, config(10));
        let listings = scraper.run();

        assert_eq!(listings.len(), 1);
        // The four other select filters were still applied.
        assert_eq!(scraper.nav.selects.borrow().len(), 4);
        assert!(scraper
            .nav
            .clicks
            .borrow()
            .contains(&SUBMIT_BUTTON.to_string()));
    }

    #[test]
    fn failed_submit_aborts_with_empty_result() {
        let mut nav = FakeNavigator::new(&[(
            "https://npc.test/",
            page(&[listing("Flat 1")], None),
        )]);
        nav.failing_clicks.insert(SUBMIT_BUTTON.to_string());

        let scraper = PropertyCentreScraper::with_navigator(nav, config(10));
        let listings = scraper.run();

        assert!(listings.is_empty());
        assert_eq!(scraper.nav.closed.get(), 1);
    }

    #[test]
    fn failed_for_rent_tab_aborts_with_empty_result() {
        let mut nav = FakeNavigator::new(&[(
            "https://npc.test/",
            page(&[listing("Flat 1")], None),
        )]);
        nav.failing_clicks.insert(FOR_RENT_TAB.to_string());

        let scraper = PropertyCentreScraper::with_navigator(nav, config(10));
        let listings = scraper.run();

        assert!(listings.is_empty());
        assert!(scraper.nav.selects.borrow().is_empty());
        assert_eq!(scraper.nav.closed.get(), 1);
    }
}
