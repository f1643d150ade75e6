use std::env;

use crate::scrapers::types::SearchCriteria;

const DEFAULT_BASE_URL: &str = "https://nigeriapropertycentre.com/";
const DEFAULT_MAX_PAGES: u32 = 10;
const DEFAULT_OUTPUT: &str = "lekki_apartments.csv";

/// Run configuration for the scraper.
#[derive(Debug, Clone)]
pub struct Config {
    /// Landing page of the listing site.
    pub base_url: String,
    /// Hard ceiling on result pages visited, guards against cyclic
    /// next-page links.
    pub max_pages: u32,
    /// Output CSV path; overwritten if it exists.
    pub output_path: String,
    pub criteria: SearchCriteria,
}

impl Config {
    /// Build a config from environment variables, falling back to defaults
    /// so the binary runs with no arguments.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("NPC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            max_pages: env::var("NPC_MAX_PAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_PAGES),
            output_path: env::var("NPC_OUTPUT").unwrap_or_else(|_| DEFAULT_OUTPUT.to_string()),
            criteria: SearchCriteria::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            output_path: DEFAULT_OUTPUT.to_string(),
            criteria: SearchCriteria::default(),
        }
    }
}
