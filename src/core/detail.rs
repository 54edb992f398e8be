use crate::core::cells::{adjacent_cell, cell_text, is_placeholder, parse_count, Direction};
use crate::core::document::{selector, Document};
use crate::domain::model::{MunicipalitySummary, PartyResults};
use crate::utils::error::{Result, ScrapeError};

const SUMMARY_TABLE: &str = "table.table";
const REGISTERED_CELL: &str = r#"td.cislo[headers="sa2"]"#;
const ENVELOPES_CELL: &str = r#"td.cislo[headers="sa3"]"#;
const VALID_VOTES_CELL: &str = r#"td.cislo[headers="sa6"]"#;
const PARTY_NAME_CELL: &str = "td.overflow_name";

/// Reads registered voters, issued envelopes and valid votes from the first
/// results table of a municipality page.
pub fn extract_summary(doc: &Document) -> Result<MunicipalitySummary> {
    let page = doc.label();
    let table = doc.require(SUMMARY_TABLE)?;

    let counter = |css: &str| -> Result<u64> {
        let sel = selector(css)?;
        let cell = table.select(&sel).next().ok_or_else(|| {
            ScrapeError::layout(&page, format!("summary table has no {}", css))
        })?;
        parse_count(&cell_text(cell))
    };

    Ok(MunicipalitySummary {
        registered: counter(REGISTERED_CELL)?,
        envelopes: counter(ENVELOPES_CELL)?,
        valid_votes: counter(VALID_VOTES_CELL)?,
    })
}

/// Pairs every party-name cell with the vote count one column to its right.
pub fn extract_party_results(doc: &Document) -> Result<PartyResults> {
    let page = doc.label();
    let name_sel = selector(PARTY_NAME_CELL)?;
    let mut results = PartyResults::new();

    for cell in doc.html().select(&name_sel) {
        if is_placeholder(cell) {
            continue;
        }
        let name = cell_text(cell);
        let votes = parse_count(&cell_text(adjacent_cell(cell, Direction::Next, &page)?))?;

        if let Some(previous) = results.insert(name.as_str(), votes) {
            tracing::warn!(
                "Party '{}' listed twice on {}: {} replaces {}",
                name,
                page,
                votes,
                previous
            );
        }
    }

    if results.is_empty() {
        return Err(ScrapeError::layout(
            &page,
            format!("no {} cells found", PARTY_NAME_CELL),
        ));
    }
    Ok(results)
}
