use crate::domain::model::{Record, Table};
use crate::domain::ports::HeaderPolicy;
use crate::utils::error::{Result, ScrapeError};

/// Resolves the export header for `records` under `policy`.
pub fn columns(records: &[Record], policy: HeaderPolicy) -> Result<Vec<String>> {
    let first = records.first().ok_or(ScrapeError::NothingToExport)?;
    let mut columns: Vec<String> = first.keys().map(str::to_string).collect();

    if policy == HeaderPolicy::Union {
        for record in &records[1..] {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }
    }
    Ok(columns)
}

pub fn build_table(records: Vec<Record>, policy: HeaderPolicy) -> Result<Table> {
    let columns = columns(&records, policy)?;

    let dropped: usize = records
        .iter()
        .map(|r| r.keys().filter(|k| !columns.iter().any(|c| c == k)).count())
        .sum();
    if dropped > 0 {
        tracing::warn!(
            "{} values have no column in the first record's header and will not be exported",
            dropped
        );
    }

    Ok(Table { columns, records })
}

/// Renders the table as CSV: one header row, then one row per record with
/// empty cells for missing keys.
pub fn to_csv(table: &Table) -> Result<Vec<u8>> {
    if table.records.is_empty() {
        return Err(ScrapeError::NothingToExport);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(&table.columns)?;
    for record in &table.records {
        writer.write_record(table.columns.iter().map(|column| record.cell(column)))?;
    }

    writer.into_inner().map_err(|e| ScrapeError::Io(e.into_error()))
}
