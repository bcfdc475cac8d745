//! Extraction-document parsing.
//!
//! The LLM collaborator emits one JSON document per bill with peso
//! decimals; this layer converts to centavos and enforces the amount
//! contract (finite, positive) before anything reaches the engine.
//!
//! ```json
//! {
//!   "totals": [{"label": "GRAND TOTAL", "amount": 25044.00, "position": 5}],
//!   "line_items_total": 25044.00,
//!   "financials": {"discounts": 1000.0, "balance_due": 24044.0},
//!   "deductions": [{"type": "hmo", "amount": 12000.0,
//!                   "documentation": {"type": "loa", "value": "LOA-123"}}]
//! }
//! ```

use serde::Deserialize;

use billaudit_engine::model::{AuditInput, DeductionItem, DeductionType, ExtractedTotal, FinancialFigures};
use billaudit_engine::money::centavos_from_pesos;

use crate::error::ExtractError;

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    totals: Vec<RawTotal>,
    #[serde(default)]
    line_items_total: Option<f64>,
    #[serde(default)]
    financials: Option<RawFinancials>,
    #[serde(default)]
    deductions: Vec<RawDeduction>,
}

#[derive(Debug, Deserialize)]
struct RawTotal {
    label: String,
    amount: f64,
    #[serde(default)]
    position: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFinancials {
    discounts: f64,
    payments: f64,
    hmo_coverage: f64,
    philhealth_coverage: f64,
    balance_due: f64,
}

#[derive(Debug, Deserialize)]
struct RawDeduction {
    #[serde(rename = "type")]
    kind: String,
    amount: f64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    documentation: Option<RawDocumentation>,
}

#[derive(Debug, Deserialize)]
struct RawDocumentation {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default)]
    authorized_by: Option<String>,
}

/// Parsed document plus a count of what the amount contract rejected.
#[derive(Debug)]
pub struct ParsedDocument {
    pub input: AuditInput,
    /// Candidates and deduction entries dropped for non-finite or
    /// non-positive amounts.
    pub skipped: usize,
}

pub fn parse_document(json: &str) -> Result<ParsedDocument, ExtractError> {
    let raw: RawDocument =
        serde_json::from_str(json).map_err(|e| ExtractError::Json(e.to_string()))?;

    let mut skipped = 0;

    let mut totals = Vec::with_capacity(raw.totals.len());
    for (index, t) in raw.totals.iter().enumerate() {
        if !t.amount.is_finite() || t.amount <= 0.0 {
            skipped += 1;
            continue;
        }
        totals.push(ExtractedTotal {
            label: t.label.clone(),
            amount_centavos: centavos_from_pesos(t.amount),
            position: t.position.unwrap_or(index),
        });
    }

    let mut deductions = Vec::with_capacity(raw.deductions.len());
    for d in &raw.deductions {
        if !d.amount.is_finite() || d.amount < 0.0 {
            skipped += 1;
            continue;
        }
        let documented = d
            .documentation
            .as_ref()
            .filter(|doc| !doc.value.trim().is_empty());
        deductions.push(DeductionItem {
            deduction_type: DeductionType::parse(&d.kind),
            amount_centavos: centavos_from_pesos(d.amount),
            description: d.description.clone(),
            has_documentation: documented.is_some(),
            documentation_type: documented.map(|doc| doc.kind.clone()),
            documentation_value: documented.map(|doc| doc.value.clone()),
            authorized_by: documented.and_then(|doc| doc.authorized_by.clone()),
            verification_issue: None,
        });
    }

    let financials = raw.financials.map(|f| FinancialFigures {
        discounts_centavos: sanitize_pesos(f.discounts),
        payments_centavos: sanitize_pesos(f.payments),
        hmo_coverage_centavos: sanitize_pesos(f.hmo_coverage),
        philhealth_coverage_centavos: sanitize_pesos(f.philhealth_coverage),
        balance_due_centavos: sanitize_pesos(f.balance_due),
        deductions,
    });

    Ok(ParsedDocument {
        input: AuditInput {
            totals,
            calculated_line_items_total: raw
                .line_items_total
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(centavos_from_pesos),
            financials,
        },
        skipped,
    })
}

/// Aggregate figures must be non-negative; anything else is collaborator
/// noise and clamps to zero rather than poisoning the arithmetic.
fn sanitize_pesos(value: f64) -> i64 {
    if !value.is_finite() || value < 0.0 {
        0
    } else {
        centavos_from_pesos(value)
    }
}
