use serde::{Deserialize, Serialize};

/// One rental listing extracted from a results page.
///
/// All fields are free text, trimmed of surrounding whitespace. The price is
/// kept display-formatted (e.g. "₦ 5,000,000 per annum") rather than parsed
/// to a number. Duplicates across pages are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Listing {
    pub title: String,
    pub price: String,
    pub location: String,
}
