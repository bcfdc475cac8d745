//! Candidate CSV loading — `label,amount[,position]` with a header row.
//!
//! Some deployments export the extraction collaborator's candidates as
//! CSV instead of the JSON document; both funnel into the same
//! [`ExtractedTotal`] list.

use billaudit_engine::model::ExtractedTotal;
use billaudit_engine::money::centavos_from_pesos;

use crate::error::ExtractError;

/// Load candidates. Returns the parsed totals plus a count of rows dropped
/// by the amount contract (non-positive amounts); a cell that is not a
/// number at all is an error, not a skip.
pub fn load_candidates_csv(data: &str) -> Result<(Vec<ExtractedTotal>, usize), ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ExtractError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let idx = |name: &str| -> Result<usize, ExtractError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ExtractError::MissingColumn { column: name.into() })
    };

    let label_idx = idx("label")?;
    let amount_idx = idx("amount")?;
    let position_idx = headers.iter().position(|h| h == "position");

    let mut totals = Vec::new();
    let mut skipped = 0;

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ExtractError::Csv(e.to_string()))?;

        let amount_str = record.get(amount_idx).unwrap_or("").trim();
        let amount: f64 = amount_str
            .replace(',', "")
            .parse()
            .map_err(|_| ExtractError::AmountParse {
                row: row + 1,
                value: amount_str.into(),
            })?;
        if !amount.is_finite() || amount <= 0.0 {
            skipped += 1;
            continue;
        }

        let position = match position_idx.and_then(|i| record.get(i)) {
            Some(cell) if !cell.trim().is_empty() => {
                cell.trim().parse().map_err(|_| ExtractError::AmountParse {
                    row: row + 1,
                    value: cell.trim().into(),
                })?
            }
            _ => row,
        };

        totals.push(ExtractedTotal {
            label: record.get(label_idx).unwrap_or("").trim().to_string(),
            amount_centavos: centavos_from_pesos(amount),
            position,
        });
    }

    Ok((totals, skipped))
}
