use anyhow::Result;

use crate::models::Listing;

const HEADER: [&str; 3] = ["Title", "Price", "Location"];

/// Render listings as a CSV document: a fixed header row, then one row per
/// listing. An empty input still produces the header, so a failed run leaves
/// a well-formed (if empty) file behind.
pub fn to_csv(listings: &[Listing]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for listing in listings {
        writer.serialize(listing)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV output: {e}"))
}
