use crate::domain::model::{
    MunicipalityListing, MunicipalitySummary, PartyResults, Record, FIELD_ENVELOPES, FIELD_ID,
    FIELD_NAME, FIELD_REGISTERED, FIELD_VALID_VOTES,
};
use crate::utils::error::{Result, ScrapeError};

/// Joins the three per-municipality sequences by index into flat records.
///
/// The sequences carry no shared key, so they must have the same length and
/// order. Party key sets are not compared across municipalities.
pub fn assemble(
    listings: &[MunicipalityListing],
    summaries: &[MunicipalitySummary],
    party_results: &[PartyResults],
) -> Result<Vec<Record>> {
    if listings.len() != summaries.len() || listings.len() != party_results.len() {
        return Err(ScrapeError::LengthMismatch {
            listings: listings.len(),
            summaries: summaries.len(),
            party_results: party_results.len(),
        });
    }

    let records = listings
        .iter()
        .zip(summaries)
        .zip(party_results)
        .map(|((listing, summary), parties)| {
            let mut record = Record::new();
            record.insert(FIELD_ID, listing.id.as_str());
            record.insert(FIELD_NAME, listing.name.as_str());
            record.insert(FIELD_REGISTERED, summary.registered);
            record.insert(FIELD_ENVELOPES, summary.envelopes);
            record.insert(FIELD_VALID_VOTES, summary.valid_votes);
            for (party, votes) in parties.iter() {
                record.insert(party, votes);
            }
            record
        })
        .collect();

    Ok(records)
}
