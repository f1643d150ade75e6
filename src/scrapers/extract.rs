use scraper::{ElementRef, Html, Selector};

use crate::models::Listing;

/// Markup signatures of one listing on a results page.
const CONTAINER: &str = "div.property-list-item";
const TITLE: &str = "h4.property-title";
const PRICE: &str = "span.price";
const LOCATION: &str = "address";

/// The single next-page affordance, when a further page exists.
const NEXT_LINK: &str = "a.next";

/// Extract all well-formed listings from one page's rendered markup, in
/// document order.
///
/// A container missing any of title, price or location is skipped rather
/// than stored with empty fields. Parsing is pure; re-running on the same
/// markup yields the same result.
pub fn extract_listings(markup: &str) -> Vec<Listing> {
    let document = Html::parse_document(markup);
    let container = Selector::parse(CONTAINER).unwrap();
    let title_sel = Selector::parse(TITLE).unwrap();
    let price_sel = Selector::parse(PRICE).unwrap();
    let location_sel = Selector::parse(LOCATION).unwrap();

    let mut listings = Vec::new();
    for item in document.select(&container) {
        let title = item.select(&title_sel).next();
        let price = item.select(&price_sel).next();
        let location = item.select(&location_sel).next();

        if let (Some(title), Some(price), Some(location)) = (title, price, location) {
            listings.push(Listing {
                title: text_of(title),
                price: text_of(price),
                location: text_of(location),
            });
        }
    }

    listings
}

/// The next-page URL, if this page advertises one.
pub fn find_next_page_link(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    let next = Selector::parse(NEXT_LINK).unwrap();

    document
        .select(&next)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
