pub mod browser;
pub mod error;
pub mod extract;
pub mod property_centre;
pub mod traits;
pub mod types;

pub use browser::ChromeNavigator;
pub use error::NavError;
pub use property_centre::PropertyCentreScraper;
pub use traits::{Navigator, Scraper};
