use serde::{Deserialize, Serialize};

/// Search filters applied to the site's form before submitting.
///
/// Labels must match the visible option text on the site exactly; a label the
/// control does not offer degrades that one filter only (best-effort policy).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text location typed into the search box.
    pub location: String,
    pub listing_type: String,
    pub bedrooms: String,
    pub max_price: String,
    pub furnishing: String,
    pub serviced: String,
}

impl SearchCriteria {
    /// Select controls and the option label wanted for each, in form order.
    pub fn select_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("#search-type", self.listing_type.as_str()),
            ("#search-bedrooms", self.bedrooms.as_str()),
            ("#search-max-price", self.max_price.as_str()),
            ("#search-furnishing", self.furnishing.as_str()),
            ("#search-serviced", self.serviced.as_str()),
        ]
    }
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            location: "Lekki, Lagos".to_string(),
            listing_type: "Flat / Apartment".to_string(),
            bedrooms: "1".to_string(),
            max_price: "₦ 10 Million".to_string(),
            furnishing: "Furnished".to_string(),
            serviced: "Serviced".to_string(),
        }
    }
}
